pub mod create;
pub mod delete;
pub mod favorite;
pub mod get;
pub mod list;
pub mod update;
pub mod vote;

use crate::models::Recipe;
use crate::store::RecipeWithOwner;
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Returns the router for /api/v1/recipes endpoints (mounted at /api/v1/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::discover_recipes).post(create::create_recipe))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route("/{id}/upvotes", post(vote::upvote_recipe))
        .route("/{id}/downvotes", post(vote::downvote_recipe))
        .route(
            "/{id}/favorites",
            post(favorite::add_favorite).delete(favorite::remove_favorite),
        )
}

/// Public attributes of a recipe's owner on the wire.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerBody {
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

/// A recipe as returned by every endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeBody {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub directions: String,
    pub image_url: Option<String>,
    pub upvotes: i32,
    pub downvotes: i32,
    pub views: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner: OwnerBody,
}

impl RecipeBody {
    pub fn with_owner(recipe: Recipe, owner: OwnerBody) -> Self {
        Self {
            id: recipe.id,
            user_id: recipe.user_id,
            name: recipe.name,
            description: recipe.description,
            ingredients: recipe.ingredients.into_iter().flatten().collect(),
            directions: recipe.directions,
            image_url: recipe.image_url,
            upvotes: recipe.upvotes,
            downvotes: recipe.downvotes,
            views: recipe.views,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
            owner,
        }
    }
}

impl From<RecipeWithOwner> for RecipeBody {
    fn from(row: RecipeWithOwner) -> Self {
        let RecipeWithOwner { recipe, owner } = row;
        RecipeBody::with_owner(
            recipe,
            OwnerBody {
                name: owner.name,
                updated_at: owner.updated_at,
            },
        )
    }
}

/// Envelope for a single recipe.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub success: bool,
    pub message: String,
    pub recipe: RecipeBody,
}

/// Envelope for a recipe list. The array field is named `recipe` for
/// compatibility with the v1 API contract.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeListResponse {
    pub success: bool,
    pub message: String,
    pub recipe: Vec<RecipeBody>,
}

impl RecipeListResponse {
    pub fn found(message: impl Into<String>, recipes: Vec<RecipeWithOwner>) -> Self {
        Self {
            success: true,
            message: message.into(),
            recipe: recipes.into_iter().map(RecipeBody::from).collect(),
        }
    }
}

/// Validated and whitespace-normalized recipe fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeInput {
    pub name: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub directions: String,
}

impl RecipeInput {
    /// Trim all fields, drop blank ingredient entries, and require name,
    /// ingredients, and directions to be non-empty.
    pub fn normalize(
        name: &str,
        description: Option<&str>,
        ingredients: &[String],
        directions: &str,
    ) -> Result<Self, String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Recipe name is required".to_string());
        }

        let ingredients = normalize_ingredients(ingredients);
        if ingredients.is_empty() {
            return Err("At least one ingredient is required".to_string());
        }

        let directions = directions.trim();
        if directions.is_empty() {
            return Err("Recipe directions are required".to_string());
        }

        Ok(Self {
            name: name.to_string(),
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_owned),
            ingredients,
            directions: directions.to_string(),
        })
    }
}

pub(crate) fn normalize_ingredients(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .map(str::to_owned)
        .collect()
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::discover_recipes,
        get::get_recipe,
        create::create_recipe,
        update::update_recipe,
        delete::delete_recipe,
        vote::upvote_recipe,
        vote::downvote_recipe,
        favorite::add_favorite,
        favorite::remove_favorite,
    ),
    components(schemas(
        OwnerBody,
        RecipeBody,
        RecipeResponse,
        RecipeListResponse,
        create::CreateRecipeRequest,
        update::UpdateRecipeRequest,
        crate::discovery::SortKey,
        crate::discovery::SortOrder,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredients(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_trims_fields() {
        let input = RecipeInput::normalize(
            "  Jollof Rice  ",
            Some("  spicy  "),
            &ingredients(&[" Rice ", "Oil"]),
            "  Cook it.  ",
        )
        .unwrap();

        assert_eq!(input.name, "Jollof Rice");
        assert_eq!(input.description.as_deref(), Some("spicy"));
        assert_eq!(input.ingredients, vec!["Rice", "Oil"]);
        assert_eq!(input.directions, "Cook it.");
    }

    #[test]
    fn test_normalize_rejects_blank_name() {
        let err = RecipeInput::normalize("   ", None, &ingredients(&["Rice"]), "Cook");
        assert_eq!(err.unwrap_err(), "Recipe name is required");
    }

    #[test]
    fn test_normalize_rejects_blank_directions() {
        let err = RecipeInput::normalize("Rice", None, &ingredients(&["Rice"]), "  ");
        assert_eq!(err.unwrap_err(), "Recipe directions are required");
    }

    #[test]
    fn test_normalize_drops_blank_ingredients() {
        let input =
            RecipeInput::normalize("Rice", None, &ingredients(&["Rice", "  ", ""]), "Cook")
                .unwrap();
        assert_eq!(input.ingredients, vec!["Rice"]);
    }

    #[test]
    fn test_normalize_rejects_all_blank_ingredients() {
        let err = RecipeInput::normalize("Rice", None, &ingredients(&["  ", ""]), "Cook");
        assert_eq!(err.unwrap_err(), "At least one ingredient is required");
    }

    #[test]
    fn test_blank_description_becomes_none() {
        let input =
            RecipeInput::normalize("Rice", Some("   "), &ingredients(&["Rice"]), "Cook").unwrap();
        assert_eq!(input.description, None);
    }
}
