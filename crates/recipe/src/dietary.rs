//! Derived dietary classification
//!
//! A recipe's dietary type is never stored; it is recomputed from the
//! recipe's tags on demand. Keyword lists are configurable so deployments
//! can extend them without code changes.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryType {
    Vegan,
    Vegetarian,
    NonVegetarian,
}

/// Classifies recipes against keyword lists by substring containment in
/// lowercased tags. Priority runs vegan, then vegetarian, then
/// non-vegetarian; tags matching none of the lists stay unclassified.
#[derive(Debug, Clone)]
pub struct DietaryClassifier {
    vegan_keywords: Vec<String>,
    vegetarian_keywords: Vec<String>,
    non_vegetarian_keywords: Vec<String>,
}

impl Default for DietaryClassifier {
    fn default() -> Self {
        Self::new(
            vec!["vegan".to_string()],
            vec!["vegetarian".to_string(), "veggie".to_string()],
            vec![
                "chicken".to_string(),
                "beef".to_string(),
                "pork".to_string(),
                "fish".to_string(),
                "meat".to_string(),
                "seafood".to_string(),
                "lamb".to_string(),
                "turkey".to_string(),
                "bacon".to_string(),
                "ham".to_string(),
                "sausage".to_string(),
            ],
        )
    }
}

impl DietaryClassifier {
    pub fn new(
        vegan_keywords: Vec<String>,
        vegetarian_keywords: Vec<String>,
        non_vegetarian_keywords: Vec<String>,
    ) -> Self {
        Self {
            vegan_keywords: lowercased(vegan_keywords),
            vegetarian_keywords: lowercased(vegetarian_keywords),
            non_vegetarian_keywords: lowercased(non_vegetarian_keywords),
        }
    }

    /// Derive the dietary type for a tag set, or None when unclassified
    pub fn classify(&self, tags: &[String]) -> Option<DietaryType> {
        let tags: Vec<String> = tags.iter().map(|tag| tag.to_lowercase()).collect();

        if contains_any(&tags, &self.vegan_keywords) {
            return Some(DietaryType::Vegan);
        }
        if contains_any(&tags, &self.vegetarian_keywords) {
            return Some(DietaryType::Vegetarian);
        }
        if contains_any(&tags, &self.non_vegetarian_keywords) {
            return Some(DietaryType::NonVegetarian);
        }

        None
    }
}

fn lowercased(keywords: Vec<String>) -> Vec<String> {
    keywords.into_iter().map(|kw| kw.to_lowercase()).collect()
}

fn contains_any(tags: &[String], keywords: &[String]) -> bool {
    tags.iter()
        .any(|tag| keywords.iter().any(|kw| tag.contains(kw.as_str())))
}
