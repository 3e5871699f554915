use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{RecipeError, RecipeResult};
use crate::model::{Difficulty, Recipe};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRecipeCommand {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 2000,
        message = "Description must be between 1 and 2000 characters"
    ))]
    pub description: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub difficulty: Option<Difficulty>,

    #[validate(range(min = 0, message = "Cook time cannot be negative"))]
    #[serde(default)]
    pub cook_time_minutes: Option<i64>,

    #[validate(range(min = 1, message = "Servings must be at least 1"))]
    #[serde(default)]
    pub servings: Option<i64>,

    #[validate(custom(function = "validate_lines"))]
    pub ingredients: Vec<String>,

    #[validate(custom(function = "validate_lines"))]
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateRecipeCommand {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: Option<String>,

    #[validate(length(
        min = 1,
        max = 2000,
        message = "Description must be between 1 and 2000 characters"
    ))]
    pub description: Option<String>,

    pub tags: Option<Vec<String>>,
    pub difficulty: Option<Difficulty>,

    #[validate(range(min = 0, message = "Cook time cannot be negative"))]
    pub cook_time_minutes: Option<i64>,

    #[validate(range(min = 1, message = "Servings must be at least 1"))]
    pub servings: Option<i64>,

    #[validate(custom(function = "validate_lines"))]
    pub ingredients: Option<Vec<String>>,

    #[validate(custom(function = "validate_lines"))]
    pub instructions: Option<Vec<String>>,
}

/// At least one line must survive trimming; blank-only lists read the same
/// as empty ones in the UI
fn validate_lines(lines: &Vec<String>) -> Result<(), ValidationError> {
    if lines.iter().any(|line| !line.trim().is_empty()) {
        return Ok(());
    }

    let mut error = ValidationError::new("empty_lines");
    error.message = Some(std::borrow::Cow::from(
        "At least one non-blank entry is required",
    ));
    Err(error)
}

impl CreateRecipeCommand {
    /// Build the recipe this command describes
    ///
    /// Unset fields take the catalog defaults: Medium difficulty, 30
    /// minutes cook time, 4 servings. Blank ingredient/instruction lines
    /// are dropped; tags are trimmed and deduplicated of blanks.
    pub fn into_recipe(self, user_id: &str) -> RecipeResult<Recipe> {
        self.validate()
            .map_err(|e| RecipeError::ValidationError(e.to_string()))?;

        Ok(Recipe {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            tags: clean_lines(self.tags),
            difficulty: self.difficulty.unwrap_or_default(),
            cook_time_minutes: self.cook_time_minutes.unwrap_or(30),
            servings: self.servings.unwrap_or(4),
            ingredients: clean_lines(self.ingredients),
            instructions: clean_lines(self.instructions),
            rating: 0.0,
            review_count: 0,
            created_at: Utc::now(),
        })
    }
}

impl UpdateRecipeCommand {
    pub fn validated(self) -> RecipeResult<Self> {
        self.validate()
            .map_err(|e| RecipeError::ValidationError(e.to_string()))?;
        Ok(self)
    }
}

fn clean_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
