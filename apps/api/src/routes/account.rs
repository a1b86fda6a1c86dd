//! # Account Routes
//!
//! Signup, login and profile lookup.
//!
//! Passwords are stored and compared as plain text, and the signup
//! response echoes the stored user, password included.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use tally_core::dto::{
    EmailQuery, LoginRequest, LoginResponse, ProfileResponse, SignupRequest, SignupResponse,
};
use tally_store::StoreError;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::AppState;

const FIELDS_REQUIRED: &str = "All fields are required";

/// `POST /api/signup`
pub async fn signup(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<Json<SignupResponse>> {
    let Json(request) = body?;
    let user = request
        .validate()
        .map_err(|e| ApiError::invalid(e, FIELDS_REQUIRED))?;

    match state.store.users().create(&user).await {
        Ok(()) => {}
        Err(StoreError::UniqueViolation { field, .. }) => {
            warn!(field = %field, email = %user.email, "Signup rejected: duplicate");
            let message = if field == "email" {
                "Email already exists!"
            } else {
                "Username already exists!"
            };
            return Err(ApiError::conflict(message));
        }
        Err(e) => return Err(e.into()),
    }

    info!(username = %user.username, email = %user.email, "User signed up");
    Ok(Json(SignupResponse {
        user,
        message: "User signed up successfully!".to_string(),
    }))
}

/// `POST /api/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(request) = body?;
    let credentials = request
        .validate()
        .map_err(|e| ApiError::invalid(e, FIELDS_REQUIRED))?;

    let user = state
        .store
        .users()
        .find_by_credentials(&credentials.email, &credentials.password)
        .await?;

    match user {
        Some(user) => {
            info!(email = %user.email, "Login successful");
            Ok(Json(LoginResponse {
                message: "Login successful!".to_string(),
                email: user.email,
            }))
        }
        None => {
            warn!(email = %credentials.email, "Login rejected");
            Err(ApiError::new(
                ErrorCode::InvalidCredentials,
                "Invalid credentials!",
            ))
        }
    }
}

/// `GET /api/profile?email=`
pub async fn profile(
    State(state): State<Arc<AppState>>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> ApiResult<Json<ProfileResponse>> {
    let Query(query) = query?;
    let email = query
        .validate()
        .map_err(|e| ApiError::invalid(e, "Email is required!"))?;

    let user = state
        .store
        .users()
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found!"))?;

    Ok(Json(ProfileResponse {
        name: user.username,
        email: user.email,
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================
