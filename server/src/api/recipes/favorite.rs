use crate::api::{ApiError, StatusResponse};
use crate::auth::AuthUser;
use crate::store::{RecipeStore, StoreError};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/favorites",
    tag = "favorites",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 201, description = "Recipe favorited", body = StatusResponse),
        (status = 401, description = "Unauthorized", body = StatusResponse),
        (status = 404, description = "Recipe not found", body = StatusResponse),
        (status = 409, description = "Already favorited", body = StatusResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_favorite(
    AuthUser(user): AuthUser,
    State(store): State<RecipeStore>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    // Distinguish a missing recipe (404) from a duplicate favorite (409)
    store.find_by_id(id)?;
    store.add_favorite(user.id, id)?;

    Ok((
        StatusCode::CREATED,
        Json(StatusResponse::success("Recipe favorited successfully")),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}/favorites",
    tag = "favorites",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 205, description = "Favorite removed", body = StatusResponse),
        (status = 401, description = "Unauthorized", body = StatusResponse),
        (status = 404, description = "Favorite not found", body = StatusResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn remove_favorite(
    AuthUser(user): AuthUser,
    State(store): State<RecipeStore>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    // A missing (user, recipe) row is "Favorite not found", not "Recipe
    // not found"; the generic store mapping would report the latter.
    store.remove_favorite(user.id, id).map_err(|e| match e {
        StoreError::NotFound => ApiError::NotFound("Favorite"),
        other => ApiError::Store(other),
    })?;

    Ok((
        StatusCode::RESET_CONTENT,
        Json(StatusResponse::success("Favorite removed successfully")),
    ))
}
