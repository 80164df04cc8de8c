use super::{RecipeBody, RecipeResponse};
use crate::api::{ApiError, StatusResponse};
use crate::auth::AuthUser;
use crate::store::{Counter, RecipeStore};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details with incremented view count", body = RecipeResponse),
        (status = 401, description = "Unauthorized", body = StatusResponse),
        (status = 404, description = "Recipe not found", body = StatusResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_recipe(
    AuthUser(_user): AuthUser,
    State(store): State<RecipeStore>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    // Viewing is itself an engagement event: bump the counter first, then
    // reload so the response reflects the committed count.
    store.increment(id, Counter::Views)?;
    let found = store.find_by_id(id)?;

    Ok((
        StatusCode::OK,
        Json(RecipeResponse {
            success: true,
            message: "Recipe retrieved successfully".to_string(),
            recipe: RecipeBody::from(found),
        }),
    ))
}
