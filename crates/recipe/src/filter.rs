//! Recipe search, filtering and sorting
//!
//! A FilterSpec carries one complete search/filter/sort request. Filters
//! compose conjunctively and every field applies independently, so any
//! combination of them can be active at once.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::dietary::{DietaryClassifier, DietaryType};
use crate::model::{Difficulty, Recipe};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    CreatedAt,
    Title,
    CookTime,
    Rating,
    ReviewCount,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Inclusive numeric range; an absent bound leaves that side open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeFilter {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl RangeFilter {
    pub fn contains(&self, value: i64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// One complete search/filter/sort request
///
/// Unset fields filter nothing; the default spec returns every recipe
/// sorted newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub text_query: String,
    pub difficulty: Option<Difficulty>,
    pub cuisine: Option<String>,
    pub dietary: Option<DietaryType>,
    pub min_rating: Option<f64>,
    pub servings_range: RangeFilter,
    pub cook_time_range: RangeFilter,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

/// Applies FilterSpecs to in-memory recipe pages
///
/// Stateless apart from the injected dietary keyword lists; the same spec
/// against the same list always yields the same result.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilterEngine {
    classifier: DietaryClassifier,
}

impl RecipeFilterEngine {
    pub fn new(classifier: DietaryClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &DietaryClassifier {
        &self.classifier
    }

    /// Filter and sort a recipe page, preserving input order between ties
    pub fn apply<'a>(&self, recipes: &'a [Recipe], spec: &FilterSpec) -> Vec<&'a Recipe> {
        let mut matches: Vec<&Recipe> = recipes
            .iter()
            .filter(|recipe| self.matches(recipe, spec))
            .collect();

        // Vec::sort_by is stable, which the tie-break contract relies on
        matches.sort_by(|a, b| {
            let ordering = compare_by_key(a, b, spec.sort_key);
            match spec.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        matches
    }

    fn matches(&self, recipe: &Recipe, spec: &FilterSpec) -> bool {
        matches_text(recipe, spec.text_query.trim())
            && spec.difficulty.is_none_or(|want| recipe.difficulty == want)
            && spec
                .cuisine
                .as_deref()
                .is_none_or(|cuisine| matches_cuisine(recipe, cuisine))
            && spec
                .dietary
                .is_none_or(|want| self.classifier.classify(&recipe.tags) == Some(want))
            && spec.min_rating.is_none_or(|min| recipe.rating >= min)
            && spec.servings_range.contains(recipe.servings)
            && spec.cook_time_range.contains(recipe.cook_time_minutes)
    }
}

/// Case-insensitive substring search across title, description, tags and
/// ingredient lines. An empty query matches everything.
fn matches_text(recipe: &Recipe, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let query = query.to_lowercase();
    recipe.title.to_lowercase().contains(&query)
        || recipe.description.to_lowercase().contains(&query)
        || recipe
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&query))
        || recipe
            .ingredients
            .iter()
            .any(|line| line.to_lowercase().contains(&query))
}

fn matches_cuisine(recipe: &Recipe, cuisine: &str) -> bool {
    let cuisine = cuisine.to_lowercase();
    recipe
        .tags
        .iter()
        .any(|tag| tag.to_lowercase().contains(&cuisine))
}

fn compare_by_key(a: &Recipe, b: &Recipe, key: SortKey) -> Ordering {
    match key {
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::CookTime => a.cook_time_minutes.cmp(&b.cook_time_minutes),
        SortKey::Rating => a.rating.total_cmp(&b.rating),
        SortKey::ReviewCount => a.review_count.cmp(&b.review_count),
    }
}
