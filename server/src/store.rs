//! Store adapter for the recipes and favorites tables.
//!
//! All reads and writes against recipe data go through [`RecipeStore`]; the
//! HTTP handlers never touch a connection directly. Counter updates use a
//! single SQL `SET col = col + 1 ... RETURNING` statement so concurrent votes
//! and views on the same row never lose an increment.

use crate::db::DbPool;
use crate::discovery::Strategy;
use crate::models::{NewFavorite, NewRecipe, Recipe};
use crate::schema::{favorites, recipes, users};
use chrono::{DateTime, Utc};
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::sql_types::{Bool, Text};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("duplicate key: {0}")]
    Conflict(String),

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("connection checkout failed: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("database error: {0}")]
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for StoreError {
    fn from(e: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};
        match e {
            Error::NotFound => StoreError::NotFound,
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                StoreError::Conflict(info.message().to_string())
            }
            Error::DatabaseError(DatabaseErrorKind::NotNullViolation, info)
            | Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info)
            | Error::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
                StoreError::Constraint(info.message().to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

/// Public attributes of a recipe's owning user, eagerly included with every
/// recipe read.
#[derive(Debug, Clone, Queryable)]
pub struct Owner {
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RecipeWithOwner {
    pub recipe: Recipe,
    pub owner: Owner,
}

/// Counter columns eligible for atomic increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Upvotes,
    Downvotes,
    Views,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn counter(self) -> Counter {
        match self {
            VoteDirection::Up => Counter::Upvotes,
            VoteDirection::Down => Counter::Downvotes,
        }
    }
}

/// Post-increment vote counters for a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteCounts {
    pub upvotes: i32,
    pub downvotes: i32,
}

/// Partial update for a recipe; `None` fields are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
pub struct RecipeChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<Option<String>>>,
    pub directions: Option<String>,
    pub image_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

type Conn = PooledConnection<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct RecipeStore {
    pool: Arc<DbPool>,
}

impl RecipeStore {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<Conn, StoreError> {
        Ok(self.pool.get()?)
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<RecipeWithOwner, StoreError> {
        let mut conn = self.conn()?;
        let (recipe, owner) = recipes::table
            .inner_join(users::table)
            .filter(recipes::id.eq(id))
            .select((Recipe::as_select(), (users::name, users::updated_at)))
            .first::<(Recipe, Owner)>(&mut conn)?;
        Ok(RecipeWithOwner { recipe, owner })
    }

    /// Execute a discovery strategy. Empty result sets are a success.
    pub fn search(&self, strategy: &Strategy) -> Result<Vec<RecipeWithOwner>, StoreError> {
        let mut conn = self.conn()?;

        let mut query = recipes::table.inner_join(users::table).into_boxed();

        query = match strategy {
            Strategy::MostUpvoted => query.order((recipes::upvotes.desc(), recipes::id.asc())),
            Strategy::Ingredient(term) => query
                .filter(
                    sql::<Bool>(INGREDIENT_MATCH_SQL)
                        .bind::<Text, _>(like_pattern(term))
                        .sql(")"),
                )
                .order(recipes::created_at.desc()),
            Strategy::Name(term) => query
                .filter(recipes::name.ilike(like_pattern(term)))
                .order(recipes::created_at.desc()),
            Strategy::Keyword(term) => {
                let pattern = like_pattern(term);
                query
                    .filter(
                        recipes::name
                            .ilike(pattern.clone())
                            .or(recipes::description.ilike(pattern.clone()).assume_not_null())
                            .or(sql::<Bool>(INGREDIENT_MATCH_SQL)
                                .bind::<Text, _>(pattern)
                                .sql(")")),
                    )
                    .order(recipes::created_at.desc())
            }
            Strategy::All => query.order(recipes::created_at.desc()),
        };

        let rows = query
            .select((Recipe::as_select(), (users::name, users::updated_at)))
            .load::<(Recipe, Owner)>(&mut conn)?;

        Ok(with_owners(rows))
    }

    pub fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<RecipeWithOwner>, StoreError> {
        let mut conn = self.conn()?;
        let rows = recipes::table
            .inner_join(users::table)
            .filter(recipes::user_id.eq(user_id))
            .order(recipes::created_at.desc())
            .select((Recipe::as_select(), (users::name, users::updated_at)))
            .load::<(Recipe, Owner)>(&mut conn)?;
        Ok(with_owners(rows))
    }

    /// Recipes the given user has favorited, most recently favorited first.
    pub fn favorites_of(&self, user_id: Uuid) -> Result<Vec<RecipeWithOwner>, StoreError> {
        let mut conn = self.conn()?;
        let rows = favorites::table
            .inner_join(recipes::table.inner_join(users::table))
            .filter(favorites::user_id.eq(user_id))
            .order(favorites::created_at.desc())
            .select((Recipe::as_select(), (users::name, users::updated_at)))
            .load::<(Recipe, Owner)>(&mut conn)?;
        Ok(with_owners(rows))
    }

    pub fn create(&self, new_recipe: &NewRecipe<'_>) -> Result<Recipe, StoreError> {
        let mut conn = self.conn()?;
        let recipe = diesel::insert_into(recipes::table)
            .values(new_recipe)
            .returning(Recipe::as_returning())
            .get_result(&mut conn)?;
        Ok(recipe)
    }

    pub fn update(&self, id: Uuid, changes: RecipeChanges) -> Result<Recipe, StoreError> {
        let mut conn = self.conn()?;
        let recipe = diesel::update(recipes::table.find(id))
            .set(changes)
            .returning(Recipe::as_returning())
            .get_result(&mut conn)?;
        Ok(recipe)
    }

    pub fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(recipes::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Atomically increment a counter column, returning the committed row.
    /// The increment happens in the database, not read-modify-write, so
    /// concurrent increments on the same recipe all apply.
    pub fn increment(&self, id: Uuid, counter: Counter) -> Result<Recipe, StoreError> {
        let mut conn = self.conn()?;
        let target = diesel::update(recipes::table.find(id));
        let recipe = match counter {
            Counter::Upvotes => target
                .set(recipes::upvotes.eq(recipes::upvotes + 1))
                .returning(Recipe::as_returning())
                .get_result(&mut conn),
            Counter::Downvotes => target
                .set(recipes::downvotes.eq(recipes::downvotes + 1))
                .returning(Recipe::as_returning())
                .get_result(&mut conn),
            Counter::Views => target
                .set(recipes::views.eq(recipes::views + 1))
                .returning(Recipe::as_returning())
                .get_result(&mut conn),
        }?;
        Ok(recipe)
    }

    /// Apply a vote and return the post-increment counter pair. Missing
    /// recipes surface as `NotFound`.
    pub fn apply_vote(
        &self,
        id: Uuid,
        direction: VoteDirection,
    ) -> Result<VoteCounts, StoreError> {
        let recipe = self.increment(id, direction.counter())?;
        Ok(VoteCounts {
            upvotes: recipe.upvotes,
            downvotes: recipe.downvotes,
        })
    }

    pub fn add_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        diesel::insert_into(favorites::table)
            .values(&NewFavorite { user_id, recipe_id })
            .execute(&mut conn)?;
        Ok(())
    }

    pub fn remove_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            favorites::table
                .filter(favorites::user_id.eq(user_id))
                .filter(favorites::recipe_id.eq(recipe_id)),
        )
        .execute(&mut conn)?;
        if deleted == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Email addresses of every user who favorited the recipe. Duplicates are
    /// possible only across rows; the notifier de-duplicates before sending.
    pub fn favoriter_emails(&self, recipe_id: Uuid) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn()?;
        let emails = favorites::table
            .inner_join(users::table)
            .filter(favorites::recipe_id.eq(recipe_id))
            .select(users::email)
            .load::<String>(&mut conn)?;
        Ok(emails)
    }
}

fn with_owners(rows: Vec<(Recipe, Owner)>) -> Vec<RecipeWithOwner> {
    rows.into_iter()
        .map(|(recipe, owner)| RecipeWithOwner { recipe, owner })
        .collect()
}

/// Substring pattern for ILIKE with LIKE metacharacters escaped.
fn like_pattern(term: &str) -> String {
    format!(
        "%{}%",
        term.replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_")
    )
}

/// Opening fragment of the per-element ingredient match; callers bind the
/// pattern and close the subquery with `.sql(")")`.
const INGREDIENT_MATCH_SQL: &str =
    "EXISTS (SELECT 1 FROM unnest(recipes.ingredients) AS ing WHERE ing ILIKE ";

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::DatabaseErrorKind;

    #[test]
    fn test_like_pattern_wraps_term() {
        assert_eq!(like_pattern("egg"), "%egg%");
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
    }

    #[test]
    fn test_vote_direction_counter() {
        assert_eq!(VoteDirection::Up.counter(), Counter::Upvotes);
        assert_eq!(VoteDirection::Down.counter(), Counter::Downvotes);
    }

    #[test]
    fn test_not_found_maps_to_store_not_found() {
        let err: StoreError = diesel::result::Error::NotFound.into();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn test_unique_violation_maps_to_conflict() {
        let err: StoreError = diesel::result::Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate favorite".to_string()),
        )
        .into();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[test]
    fn test_check_violation_maps_to_constraint() {
        let err: StoreError = diesel::result::Error::DatabaseError(
            DatabaseErrorKind::CheckViolation,
            Box::new("upvotes must be non-negative".to_string()),
        )
        .into();
        assert!(matches!(err, StoreError::Constraint(_)));
    }
}
