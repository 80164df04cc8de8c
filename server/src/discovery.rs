//! Discovery strategy selection.
//!
//! A discovery request carries up to five recognized query parameters. Exactly
//! one strategy runs per request: the rules below are evaluated in priority
//! order and the first match wins. The store executes the selected strategy
//! against the database.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Sort field for recipe discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Upvotes,
    /// Any unrecognized sort value; falls through to the default strategy
    #[serde(other)]
    Other,
}

/// Sort direction for recipe discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Descending,
    Ascending,
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DiscoverParams {
    /// Sort field; only `upvotes` is recognized
    pub sort: Option<SortKey>,
    /// Sort direction; only `descending` selects the most-upvoted strategy
    pub order: Option<SortOrder>,
    /// Case-insensitive substring match against recipe ingredients
    pub ingredients: Option<String>,
    /// Case-insensitive substring match against recipe names
    pub recipes: Option<String>,
    /// Case-insensitive substring match against name, ingredients, or description
    pub search: Option<String>,
}

/// The discovery strategy selected for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// All recipes ordered by upvote count descending, id ascending on ties
    MostUpvoted,
    /// Recipes with an ingredient entry matching the term
    Ingredient(String),
    /// Recipes whose name matches the term
    Name(String),
    /// Recipes whose name, ingredients, or description match the term
    Keyword(String),
    /// Unfiltered listing
    All,
}

type Rule = fn(&DiscoverParams) -> Option<Strategy>;

/// Priority-ordered selection rules; the first rule producing a strategy wins.
const RULES: &[Rule] = &[
    |p| {
        (p.sort == Some(SortKey::Upvotes) && p.order == Some(SortOrder::Descending))
            .then_some(Strategy::MostUpvoted)
    },
    |p| term(&p.ingredients).map(Strategy::Ingredient),
    |p| term(&p.recipes).map(Strategy::Name),
    |p| term(&p.search).map(Strategy::Keyword),
];

/// A search term is only usable if it is non-empty after trimming.
fn term(param: &Option<String>) -> Option<String> {
    param
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}

impl Strategy {
    pub fn select(params: &DiscoverParams) -> Strategy {
        RULES
            .iter()
            .find_map(|rule| rule(params))
            .unwrap_or(Strategy::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> DiscoverParams {
        DiscoverParams::default()
    }

    #[test]
    fn test_no_params_selects_default() {
        assert_eq!(Strategy::select(&params()), Strategy::All);
    }

    #[test]
    fn test_most_upvoted_requires_both_sort_and_order() {
        let p = DiscoverParams {
            sort: Some(SortKey::Upvotes),
            order: Some(SortOrder::Descending),
            ..params()
        };
        assert_eq!(Strategy::select(&p), Strategy::MostUpvoted);

        let p = DiscoverParams {
            sort: Some(SortKey::Upvotes),
            ..params()
        };
        assert_eq!(Strategy::select(&p), Strategy::All);

        let p = DiscoverParams {
            sort: Some(SortKey::Upvotes),
            order: Some(SortOrder::Ascending),
            ..params()
        };
        assert_eq!(Strategy::select(&p), Strategy::All);
    }

    #[test]
    fn test_unrecognized_sort_falls_through() {
        let p = DiscoverParams {
            sort: Some(SortKey::Other),
            order: Some(SortOrder::Descending),
            ..params()
        };
        assert_eq!(Strategy::select(&p), Strategy::All);
    }

    #[test]
    fn test_ingredient_strategy() {
        let p = DiscoverParams {
            ingredients: Some("rice".to_string()),
            ..params()
        };
        assert_eq!(Strategy::select(&p), Strategy::Ingredient("rice".to_string()));
    }

    #[test]
    fn test_name_strategy() {
        let p = DiscoverParams {
            recipes: Some("jollof".to_string()),
            ..params()
        };
        assert_eq!(Strategy::select(&p), Strategy::Name("jollof".to_string()));
    }

    #[test]
    fn test_keyword_strategy() {
        let p = DiscoverParams {
            search: Some("egg".to_string()),
            ..params()
        };
        assert_eq!(Strategy::select(&p), Strategy::Keyword("egg".to_string()));
    }

    #[test]
    fn test_priority_first_match_wins() {
        // sort=upvotes&order=descending beats search=foo
        let p = DiscoverParams {
            sort: Some(SortKey::Upvotes),
            order: Some(SortOrder::Descending),
            search: Some("foo".to_string()),
            ..params()
        };
        assert_eq!(Strategy::select(&p), Strategy::MostUpvoted);

        // ingredients beats recipes and search
        let p = DiscoverParams {
            ingredients: Some("rice".to_string()),
            recipes: Some("stew".to_string()),
            search: Some("soup".to_string()),
            ..params()
        };
        assert_eq!(Strategy::select(&p), Strategy::Ingredient("rice".to_string()));

        // recipes beats search
        let p = DiscoverParams {
            recipes: Some("stew".to_string()),
            search: Some("soup".to_string()),
            ..params()
        };
        assert_eq!(Strategy::select(&p), Strategy::Name("stew".to_string()));
    }

    #[test]
    fn test_blank_terms_are_ignored() {
        let p = DiscoverParams {
            ingredients: Some("   ".to_string()),
            search: Some("soup".to_string()),
            ..params()
        };
        assert_eq!(Strategy::select(&p), Strategy::Keyword("soup".to_string()));

        let p = DiscoverParams {
            search: Some(String::new()),
            ..params()
        };
        assert_eq!(Strategy::select(&p), Strategy::All);
    }

    #[test]
    fn test_terms_are_trimmed() {
        let p = DiscoverParams {
            recipes: Some("  pancakes  ".to_string()),
            ..params()
        };
        assert_eq!(Strategy::select(&p), Strategy::Name("pancakes".to_string()));
    }
}
