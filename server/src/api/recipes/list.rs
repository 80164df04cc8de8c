use super::RecipeListResponse;
use crate::api::{ApiError, StatusResponse};
use crate::auth::AuthUser;
use crate::discovery::{DiscoverParams, Strategy};
use crate::store::RecipeStore;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    tag = "recipes",
    params(DiscoverParams),
    responses(
        (status = 201, description = "Recipes retrieved", body = RecipeListResponse),
        (status = 401, description = "Unauthorized", body = StatusResponse),
        (status = 500, description = "Server error", body = StatusResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn discover_recipes(
    AuthUser(_user): AuthUser,
    State(store): State<RecipeStore>,
    Query(params): Query<DiscoverParams>,
) -> Result<impl IntoResponse, ApiError> {
    let strategy = Strategy::select(&params);
    tracing::debug!(?strategy, "discovery strategy selected");

    let found = store.search(&strategy)?;

    // 201 on success is inherited from the v1 API contract; an empty result
    // set is still a success.
    Ok((
        StatusCode::CREATED,
        Json(RecipeListResponse::found(
            "Recipes retrieved successfully",
            found,
        )),
    ))
}
