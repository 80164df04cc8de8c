use super::{OwnerBody, RecipeBody, RecipeInput, RecipeResponse};
use crate::api::{ApiError, StatusResponse};
use crate::auth::AuthUser;
use crate::models::NewRecipe;
use crate::store::RecipeStore;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    pub name: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub directions: String,
    pub image_url: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = RecipeResponse),
        (status = 401, description = "Unauthorized", body = StatusResponse),
        (status = 403, description = "Validation failure", body = StatusResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(store): State<RecipeStore>,
    Json(request): Json<CreateRecipeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = RecipeInput::normalize(
        &request.name,
        request.description.as_deref(),
        &request.ingredients,
        &request.directions,
    )
    .map_err(ApiError::Validation)?;

    let ingredients: Vec<Option<String>> = input.ingredients.into_iter().map(Some).collect();

    let recipe = store.create(&NewRecipe {
        user_id: user.id,
        name: &input.name,
        description: input.description.as_deref(),
        ingredients: &ingredients,
        directions: &input.directions,
        image_url: request.image_url.as_deref(),
    })?;

    Ok((
        StatusCode::CREATED,
        Json(RecipeResponse {
            success: true,
            message: "Recipe created successfully".to_string(),
            recipe: RecipeBody::with_owner(
                recipe,
                OwnerBody {
                    name: user.name,
                    updated_at: user.updated_at,
                },
            ),
        }),
    ))
}
