pub mod collections;
pub mod commands;
pub mod dietary;
pub mod error;
pub mod filter;
pub mod model;
pub mod read_model;
pub mod reviews;
pub mod scaling;

pub use collections::{
    Collection, CreateCollectionCommand, SavedRecipeStore, SqliteSavedRecipeStore,
};
pub use commands::{CreateRecipeCommand, UpdateRecipeCommand};
pub use dietary::{DietaryClassifier, DietaryType};
pub use error::{RecipeError, RecipeResult};
pub use filter::{FilterSpec, RangeFilter, RecipeFilterEngine, SortKey, SortOrder};
pub use model::{Difficulty, Recipe};
pub use reviews::{AddReviewCommand, Review};
pub use scaling::{format_quantity, parse_quantity, scale_ingredients, ParsedQuantity};
