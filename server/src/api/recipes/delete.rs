use crate::api::{ApiError, StatusResponse};
use crate::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 205, description = "Recipe deleted successfully", body = StatusResponse),
        (status = 401, description = "Not the recipe owner", body = StatusResponse),
        (status = 404, description = "Recipe not found", body = StatusResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let existing = state.store.find_by_id(id)?;
    if existing.recipe.user_id != user.id {
        return Err(ApiError::Unauthorized);
    }

    state.store.delete(id)?;

    // The row (and its favorites, via cascade) is gone; only now is the
    // image file safe to remove.
    if let Some(image_url) = existing.recipe.image_url {
        state.assets.remove(&image_url).await;
    }

    // 205 on delete is inherited from the v1 API contract
    Ok((
        StatusCode::RESET_CONTENT,
        Json(StatusResponse::success("Recipe deleted successfully")),
    ))
}
