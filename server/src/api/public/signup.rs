use crate::api::{ApiError, StatusResponse};
use crate::auth::{create_session, hash_password};
use crate::db::DbPool;
use crate::models::{NewUser, User};
use crate::schema::users;
use crate::store::StoreError;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub success: bool,
    pub message: String,
    pub user_id: Uuid,
    pub token: String,
}

/// Minimal structural check: one `@`, non-empty local part, dotted domain,
/// no whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.split('.').count() >= 2 && domain.split('.').all(|part| !part.is_empty())
}

fn validate(req: &SignupRequest) -> Result<(), String> {
    if req.name.trim().is_empty() {
        return Err("Name is required".to_string());
    }
    if req.username.trim().is_empty() {
        return Err("Username is required".to_string());
    }
    if !is_valid_email(req.email.trim()) {
        return Err("A valid email address is required".to_string());
    }
    if req.password.len() < 6 {
        return Err("Password must be at least 6 characters".to_string());
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/v1/users/signup",
    tag = "auth",
    request_body(content = SignupRequest, example = json!({
        "name": "Ada Lovelace",
        "username": "ada",
        "email": "ada@example.com",
        "password": "password"
    })),
    responses(
        (status = 201, description = "User created successfully", body = SignupResponse),
        (status = 403, description = "Validation failure", body = StatusResponse),
        (status = 409, description = "Username or email already taken", body = StatusResponse)
    )
)]
pub async fn signup(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&req).map_err(ApiError::Validation)?;

    let password_hash = hash_password(&req.password).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        ApiError::Internal
    })?;

    let mut conn = pool.get().map_err(StoreError::from)?;

    let email = req.email.trim().to_ascii_lowercase();
    let new_user = NewUser {
        name: req.name.trim(),
        username: req.username.trim(),
        email: &email,
        password_hash: &password_hash,
    };

    let user: User = diesel::insert_into(users::table)
        .values(&new_user)
        .returning(User::as_returning())
        .get_result(&mut conn)
        .map_err(StoreError::from)?;

    let token = create_session(&mut conn, user.id).map_err(StoreError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            success: true,
            message: "User created successfully".to_string(),
            user_id: user.id,
            token,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SignupRequest {
        SignupRequest {
            name: "Ada Lovelace".to_string(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "password".to_string(),
        }
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b+tag@mail.example.co"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("adaexample.com"));
        assert!(!is_valid_email("ada@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada@exa mple.com"));
        assert!(!is_valid_email("ada@example..com"));
    }

    #[test]
    fn test_validate_accepts_well_formed_request() {
        assert!(validate(&request()).is_ok());
    }

    #[test]
    fn test_validate_rejects_short_password() {
        let req = SignupRequest {
            password: "12345".to_string(),
            ..request()
        };
        assert_eq!(
            validate(&req).unwrap_err(),
            "Password must be at least 6 characters"
        );
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let req = SignupRequest {
            name: "  ".to_string(),
            ..request()
        };
        assert!(validate(&req).is_err());
    }
}
