//! # Data Transfer Objects
//!
//! Request and response bodies for the HTTP API.
//!
//! ## Request Flow
//! ```text
//! JSON body ──► RentRequest (all fields Option) ──► validate() ──► Rental
//!                     │                                  │
//!                     │ "duration": 3  → Some("3")       └─ missing → ValidationError
//!                     │ "duration": "" → Some("")  ──────────────────────┘
//!                     │ absent / null  → None      ──────────────────────┘
//!                     │ 0 / false      → None      ──────────────────────┘
//! ```
//!
//! Request fields accept any JSON scalar. Numbers and booleans are stored
//! by their string form, except that zero and `false` read as missing.
//! Objects and arrays fail deserialization.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::types::{Purchase, Rental, Subscription, User};
use crate::validation::{require, ValidationResult};

// =============================================================================
// Scalar Fields
// =============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    /// String form of the value, or `None` for `0`, `0.0` and `false`,
    /// which count as not supplied.
    fn into_text(self) -> Option<String> {
        match self {
            Scalar::Text(s) => Some(s),
            Scalar::Int(0) | Scalar::UInt(0) | Scalar::Bool(false) => None,
            Scalar::Float(n) if n == 0.0 => None,
            Scalar::Int(n) => Some(n.to_string()),
            Scalar::UInt(n) => Some(n.to_string()),
            Scalar::Float(n) => Some(n.to_string()),
            Scalar::Bool(b) => Some(b.to_string()),
        }
    }
}

/// `#[serde(with = "scalar")]` for request fields.
mod scalar {
    use super::{Deserialize, Deserializer, Scalar};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(Scalar::into_text))
    }
}

// =============================================================================
// Requests
// =============================================================================

/// `POST /api/signup`
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct SignupRequest {
    #[serde(default, with = "scalar")]
    #[ts(type = "string | number | boolean | null")]
    pub username: Option<String>,
    #[serde(default, with = "scalar")]
    #[ts(type = "string | number | boolean | null")]
    pub email: Option<String>,
    #[serde(default, with = "scalar")]
    #[ts(type = "string | number | boolean | null")]
    pub password: Option<String>,
}

impl SignupRequest {
    pub fn validate(self) -> ValidationResult<User> {
        Ok(User {
            username: require("username", self.username)?,
            email: require("email", self.email)?,
            password: require("password", self.password)?,
        })
    }
}

/// Email and password pair taken from a login request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// `POST /api/login`
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct LoginRequest {
    #[serde(default, with = "scalar")]
    #[ts(type = "string | number | boolean | null")]
    pub email: Option<String>,
    #[serde(default, with = "scalar")]
    #[ts(type = "string | number | boolean | null")]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn validate(self) -> ValidationResult<Credentials> {
        Ok(Credentials {
            email: require("email", self.email)?,
            password: require("password", self.password)?,
        })
    }
}

/// `POST /api/subscribe`
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct SubscribeRequest {
    #[serde(default, with = "scalar")]
    #[ts(type = "string | number | boolean | null")]
    pub email: Option<String>,
}

impl SubscribeRequest {
    pub fn validate(self) -> ValidationResult<Subscription> {
        Ok(Subscription {
            email: require("email", self.email)?,
        })
    }
}

/// `POST /api/rent`
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct RentRequest {
    #[serde(default, with = "scalar")]
    #[ts(type = "string | number | boolean | null")]
    pub name: Option<String>,
    #[serde(default, with = "scalar")]
    #[ts(type = "string | number | boolean | null")]
    pub email: Option<String>,
    #[serde(default, with = "scalar")]
    #[ts(type = "string | number | boolean | null")]
    pub phone: Option<String>,
    #[serde(default, with = "scalar")]
    #[ts(type = "string | number | boolean | null")]
    pub category: Option<String>,
    #[serde(default, with = "scalar")]
    #[ts(type = "string | number | boolean | null")]
    pub duration: Option<String>,
}

impl RentRequest {
    pub fn validate(self) -> ValidationResult<Rental> {
        Ok(Rental {
            name: require("name", self.name)?,
            email: require("email", self.email)?,
            phone: require("phone", self.phone)?,
            category: require("category", self.category)?,
            duration: require("duration", self.duration)?,
        })
    }
}

/// `POST /api/buy`
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct BuyRequest {
    #[serde(default, with = "scalar")]
    #[ts(type = "string | number | boolean | null")]
    pub name: Option<String>,
    #[serde(default, with = "scalar")]
    #[ts(type = "string | number | boolean | null")]
    pub email: Option<String>,
    #[serde(default, with = "scalar")]
    #[ts(type = "string | number | boolean | null")]
    pub phone: Option<String>,
    #[serde(default, with = "scalar")]
    #[ts(type = "string | number | boolean | null")]
    pub category: Option<String>,
    #[serde(default, with = "scalar")]
    #[ts(type = "string | number | boolean | null")]
    pub quantity: Option<String>,
}

impl BuyRequest {
    pub fn validate(self) -> ValidationResult<Purchase> {
        Ok(Purchase {
            name: require("name", self.name)?,
            email: require("email", self.email)?,
            phone: require("phone", self.phone)?,
            category: require("category", self.category)?,
            quantity: require("quantity", self.quantity)?,
        })
    }
}

/// `?email=` query for `GET /api/profile` and `GET /api/orders`.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct EmailQuery {
    #[serde(default)]
    pub email: Option<String>,
}

impl EmailQuery {
    pub fn validate(self) -> ValidationResult<String> {
        require("email", self.email)
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Body carrying only a message (subscribe).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct SignupResponse {
    pub user: User,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct LoginResponse {
    pub message: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct RentResponse {
    pub message: String,
    pub rental: Rental,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct BuyResponse {
    pub message: String,
    pub purchase: Purchase,
}

/// Public profile. `name` is the stored username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ProfileResponse {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct OrdersResponse {
    pub rentals: Vec<Rental>,
    pub purchases: Vec<Purchase>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_scalars_become_strings() {
        let req: RentRequest = serde_json::from_str(
            r#"{"name":"Ann","email":"a@x.com","phone":5551234,"category":"bikes","duration":2.5}"#,
        )
        .unwrap();

        let rental = req.validate().unwrap();
        assert_eq!(rental.phone, "5551234");
        assert_eq!(rental.duration, "2.5");
    }

    #[test]
    fn test_missing_null_and_empty_are_required() {
        let req: SignupRequest =
            serde_json::from_str(r#"{"username":"bob","email":null}"#).unwrap();
        assert_eq!(
            req.validate(),
            Err(ValidationError::Required { field: "email" })
        );

        let req: SignupRequest =
            serde_json::from_str(r#"{"username":"bob","email":"a@x.com","password":""}"#)
                .unwrap();
        assert_eq!(
            req.validate(),
            Err(ValidationError::Required { field: "password" })
        );
    }

    #[test]
    fn test_zero_and_false_read_as_missing() {
        let req: BuyRequest = serde_json::from_str(
            r#"{"name":"Ann","email":"a@x.com","phone":"555","category":"tents","quantity":0}"#,
        )
        .unwrap();
        assert_eq!(req.quantity, None);
        assert_eq!(
            req.validate(),
            Err(ValidationError::Required { field: "quantity" })
        );

        let req: RentRequest = serde_json::from_str(
            r#"{"name":"Ann","email":"a@x.com","phone":"555","category":"bikes","duration":false}"#,
        )
        .unwrap();
        assert_eq!(
            req.validate(),
            Err(ValidationError::Required { field: "duration" })
        );

        let req: RentRequest =
            serde_json::from_str(r#"{"phone":0.0,"duration":-0.0,"category":true,"name":"0"}"#)
                .unwrap();
        assert_eq!(req.phone, None);
        assert_eq!(req.duration, None);
        assert_eq!(req.category.as_deref(), Some("true"));
        assert_eq!(req.name.as_deref(), Some("0"));
    }

    #[test]
    fn test_object_field_is_rejected() {
        let result: Result<SubscribeRequest, _> =
            serde_json::from_str(r#"{"email":{"nested":true}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_buy_request_validates_into_purchase() {
        let req: BuyRequest = serde_json::from_str(
            r#"{"name":"Ann","email":"a@x.com","phone":"555","category":"tents","quantity":2}"#,
        )
        .unwrap();

        let purchase = req.validate().unwrap();
        assert_eq!(purchase.quantity, "2");
        assert_eq!(purchase.category, "tents");
    }

    #[test]
    fn test_login_and_query() {
        let creds = LoginRequest {
            email: Some("a@x.com".to_string()),
            password: Some("p".to_string()),
        }
        .validate()
        .unwrap();
        assert_eq!(creds.password, "p");

        assert!(EmailQuery::default().validate().is_err());
        assert_eq!(
            EmailQuery {
                email: Some("a@x.com".to_string())
            }
            .validate(),
            Ok("a@x.com".to_string())
        );
    }

    #[test]
    fn test_response_key_order() {
        let body = LoginResponse {
            message: "Login successful!".to_string(),
            email: "a@x.com".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"message":"Login successful!","email":"a@x.com"}"#
        );
    }
}
