use super::{RecipeBody, RecipeResponse};
use crate::api::{ApiError, StatusResponse};
use crate::auth::AuthUser;
use crate::store::{RecipeStore, VoteDirection};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/upvotes",
    tag = "votes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Upvote applied", body = RecipeResponse),
        (status = 401, description = "Unauthorized", body = StatusResponse),
        (status = 404, description = "Recipe not found", body = StatusResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upvote_recipe(
    AuthUser(_user): AuthUser,
    State(store): State<RecipeStore>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    vote(&store, id, VoteDirection::Up)
}

#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/downvotes",
    tag = "votes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Downvote applied", body = RecipeResponse),
        (status = 401, description = "Unauthorized", body = StatusResponse),
        (status = 404, description = "Recipe not found", body = StatusResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn downvote_recipe(
    AuthUser(_user): AuthUser,
    State(store): State<RecipeStore>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    vote(&store, id, VoteDirection::Down)
}

fn vote(
    store: &RecipeStore,
    id: Uuid,
    direction: VoteDirection,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    store.apply_vote(id, direction)?;

    // Reload the full row so the response never shows counters from before
    // the increment.
    let reloaded = store.find_by_id(id)?;

    let message = match direction {
        VoteDirection::Up => "Recipe upvoted successfully",
        VoteDirection::Down => "Recipe downvoted successfully",
    };

    Ok((
        StatusCode::OK,
        Json(RecipeResponse {
            success: true,
            message: message.to_string(),
            recipe: RecipeBody::from(reloaded),
        }),
    ))
}
