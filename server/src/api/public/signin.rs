use crate::api::StatusResponse;
use crate::auth::verify_password;
use crate::db::DbPool;
use crate::models::User;
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SigninResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/users/signin",
    tag = "auth",
    request_body(content = SigninRequest, example = json!({"username": "ada", "password": "password"})),
    responses(
        (status = 200, description = "Signed in successfully", body = SigninResponse),
        (status = 401, description = "Invalid credentials", body = StatusResponse)
    )
)]
pub async fn signin(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<SigninRequest>,
) -> impl IntoResponse {
    let invalid_credentials = || {
        (
            StatusCode::UNAUTHORIZED,
            Json(StatusResponse::failure("Invalid credentials")),
        )
            .into_response()
    };

    let mut conn = match pool.get() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "database connection failed");
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(StatusResponse::failure("Service temporarily unavailable")),
            )
                .into_response();
        }
    };

    let user: User = match users::table
        .filter(
            diesel::dsl::sql::<diesel::sql_types::Bool>("LOWER(username) = LOWER(")
                .bind::<diesel::sql_types::Text, _>(&req.username)
                .sql(")"),
        )
        .select(User::as_select())
        .first(&mut conn)
    {
        Ok(u) => u,
        Err(_) => return invalid_credentials(),
    };

    if !verify_password(&req.password, &user.password_hash) {
        return invalid_credentials();
    }

    let token = match crate::auth::create_session(&mut conn, user.id) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "failed to create session");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StatusResponse::failure("Internal server error")),
            )
                .into_response();
        }
    };

    (
        StatusCode::OK,
        Json(SigninResponse {
            success: true,
            message: "Signed in successfully".to_string(),
            token,
        }),
    )
        .into_response()
}
