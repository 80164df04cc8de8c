pub mod signin;
pub mod signup;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for unauthenticated endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/users/signup", post(signup::signup))
        .route("/api/v1/users/signin", post(signin::signin))
}

#[derive(OpenApi)]
#[openapi(
    paths(signup::signup, signin::signin),
    components(schemas(
        signup::SignupRequest,
        signup::SignupResponse,
        signin::SigninRequest,
        signin::SigninResponse,
    ))
)]
pub struct ApiDoc;
