//! Owner-scoped listings: the requester's own recipes and their favorites.

use crate::api::recipes::RecipeListResponse;
use crate::api::{ApiError, StatusResponse};
use crate::auth::AuthUser;
use crate::store::RecipeStore;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use utoipa::OpenApi;

#[utoipa::path(
    get,
    path = "/api/v1/myrecipes",
    tag = "recipes",
    responses(
        (status = 201, description = "The requester's recipes", body = RecipeListResponse),
        (status = 401, description = "Unauthorized", body = StatusResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn my_recipes(
    AuthUser(user): AuthUser,
    State(store): State<RecipeStore>,
) -> Result<impl IntoResponse, ApiError> {
    let found = store.list_by_owner(user.id)?;
    Ok((
        StatusCode::CREATED,
        Json(RecipeListResponse::found(
            "Your recipes retrieved successfully",
            found,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    tag = "favorites",
    responses(
        (status = 201, description = "The requester's favorited recipes", body = RecipeListResponse),
        (status = 401, description = "Unauthorized", body = StatusResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn my_favorites(
    AuthUser(user): AuthUser,
    State(store): State<RecipeStore>,
) -> Result<impl IntoResponse, ApiError> {
    let found = store.favorites_of(user.id)?;
    Ok((
        StatusCode::CREATED,
        Json(RecipeListResponse::found(
            "Your favorite recipes retrieved successfully",
            found,
        )),
    ))
}

#[derive(OpenApi)]
#[openapi(paths(my_recipes, my_favorites))]
pub struct ApiDoc;
