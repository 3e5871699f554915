//! Typed recipe domain model
//!
//! Rows keep ingredients, instructions and tags as JSON text columns; they
//! are parsed into these types exactly once at the storage boundary so the
//! scaling and filtering code only ever sees typed data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// A recipe as the rest of the system sees it
///
/// `rating` and `review_count` are denormalized aggregates maintained when
/// reviews change, so listing and sorting never recompute them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
    pub cook_time_minutes: i64,
    pub servings: i64,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub rating: f64,
    pub review_count: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parses_case_insensitively() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("Medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_difficulty_displays_canonical_name() {
        assert_eq!(Difficulty::Easy.to_string(), "Easy");
        assert_eq!(Difficulty::default().to_string(), "Medium");
    }
}
