use crate::api::StatusResponse;
use crate::auth::AuthUser;
use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

#[utoipa::path(
    get,
    path = "/api/v1/ping",
    tag = "testing",
    responses(
        (status = 200, description = "Authenticated ping response", body = StatusResponse),
        (status = 401, description = "Unauthorized", body = StatusResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn ping(AuthUser(_user): AuthUser) -> impl IntoResponse {
    Json(StatusResponse::success("pong"))
}

#[derive(OpenApi)]
#[openapi(paths(ping))]
pub struct ApiDoc;
