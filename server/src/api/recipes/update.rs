use super::{normalize_ingredients, RecipeBody, RecipeResponse};
use crate::api::{ApiError, StatusResponse};
use crate::auth::AuthUser;
use crate::notify;
use crate::store::RecipeChanges;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub directions: Option<String>,
    pub image_url: Option<String>,
}

/// Validate the fields present in a partial update and produce the changeset.
/// Absent fields stay untouched; present fields must still pass the same
/// rules as on create.
fn validate(request: UpdateRecipeRequest) -> Result<RecipeChanges, String> {
    let name = match request.name {
        Some(name) => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err("Recipe name is required".to_string());
            }
            Some(name)
        }
        None => None,
    };

    let directions = match request.directions {
        Some(directions) => {
            let directions = directions.trim().to_string();
            if directions.is_empty() {
                return Err("Recipe directions are required".to_string());
            }
            Some(directions)
        }
        None => None,
    };

    let ingredients = match request.ingredients {
        Some(raw) => {
            let normalized = normalize_ingredients(&raw);
            if normalized.is_empty() {
                return Err("At least one ingredient is required".to_string());
            }
            Some(normalized.into_iter().map(Some).collect())
        }
        None => None,
    };

    Ok(RecipeChanges {
        name,
        description: request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        ingredients,
        directions,
        image_url: request.image_url,
        updated_at: Utc::now(),
    })
}

#[utoipa::path(
    put,
    path = "/api/v1/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated successfully", body = RecipeResponse),
        (status = 401, description = "Not the recipe owner", body = StatusResponse),
        (status = 403, description = "Validation failure", body = StatusResponse),
        (status = 404, description = "Recipe not found", body = StatusResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRecipeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let changes = validate(request).map_err(ApiError::Validation)?;

    let existing = state.store.find_by_id(id)?;
    if existing.recipe.user_id != user.id {
        return Err(ApiError::Unauthorized);
    }

    // Remember the image the update is about to orphan; it is removed only
    // after the row is committed.
    let orphaned_image = match (&changes.image_url, &existing.recipe.image_url) {
        (Some(new), Some(old)) if new != old => Some(old.clone()),
        _ => None,
    };

    let updated = state.store.update(id, changes)?;

    // Post-commit side effects: asset cleanup, then favoriter fan-out as a
    // detached task the response never waits on.
    if let Some(old) = orphaned_image {
        state.assets.remove(&old).await;
    }

    let store = state.store.clone();
    let notifier = state.notifier.clone();
    let subject = format!("Recipe updated: {}", updated.name);
    let body = format!(
        "\"{}\" was just updated by its author. Take another look!",
        updated.name
    );
    tokio::spawn(async move {
        notify::notify_favoriters(store, notifier, id, subject, body).await;
    });

    // Reload so the response carries the owner's public attributes
    let reloaded = state.store.find_by_id(id)?;

    Ok((
        StatusCode::OK,
        Json(RecipeResponse {
            success: true,
            message: "Recipe updated successfully".to_string(),
            recipe: RecipeBody::from(reloaded),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_request() -> UpdateRecipeRequest {
        UpdateRecipeRequest {
            name: None,
            description: None,
            ingredients: None,
            directions: None,
            image_url: None,
        }
    }

    #[test]
    fn test_validate_accepts_empty_update() {
        let changes = validate(empty_request()).unwrap();
        assert!(changes.name.is_none());
        assert!(changes.ingredients.is_none());
        assert!(changes.directions.is_none());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let request = UpdateRecipeRequest {
            name: Some("   ".to_string()),
            ..empty_request()
        };
        assert_eq!(validate(request).unwrap_err(), "Recipe name is required");
    }

    #[test]
    fn test_validate_rejects_all_blank_ingredients() {
        let request = UpdateRecipeRequest {
            ingredients: Some(vec!["  ".to_string(), String::new()]),
            ..empty_request()
        };
        assert_eq!(
            validate(request).unwrap_err(),
            "At least one ingredient is required"
        );
    }

    #[test]
    fn test_validate_trims_present_fields() {
        let request = UpdateRecipeRequest {
            name: Some("  Fried Rice  ".to_string()),
            directions: Some("  Fry it.  ".to_string()),
            ..empty_request()
        };
        let changes = validate(request).unwrap();
        assert_eq!(changes.name.as_deref(), Some("Fried Rice"));
        assert_eq!(changes.directions.as_deref(), Some("Fry it."));
    }
}
