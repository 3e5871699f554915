//! Ingredient quantity parsing, fraction formatting and recipe scaling
//!
//! Ingredient lines are free text ("1 1/2 cups milk"). Scaling parses the
//! leading numeral off each line, multiplies it by the serving factor and
//! reassembles the line with a human-friendly rendering of the result.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{RecipeError, RecipeResult};

/// Leading numeral token followed by at least one whitespace and the rest of
/// the line. Mixed fractions ("1 1/2") are tried before simple tokens so the
/// fractional part is not swallowed into the remainder.
static LEADING_QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+\s+\d+/\d+|\d+(?:\.\d+)?(?:/\d+)?)\s+(.+)$")
        .expect("leading quantity pattern is valid")
});

/// Absolute tolerance for continued-fraction convergents. A fixed epsilon
/// keeps the loop well-behaved for values near zero, where a
/// value-proportional tolerance degenerates.
const FRACTION_EPSILON: f64 = 1e-6;

/// Upper bound on the denominator search; past this the last convergent is
/// kept as-is.
const MAX_DENOMINATOR: f64 = 10_000.0;

/// A quantity extracted from the head of an ingredient line.
///
/// `amount` is `None` when the line carries no leading numeral, in which
/// case `remainder` holds the whole line verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuantity {
    pub amount: Option<f64>,
    pub remainder: String,
}

/// Parse the leading quantity off an ingredient line
///
/// Supported numeral forms:
/// - Whole numbers: "2 cups flour" → 2
/// - Decimals: "2.5 cups water" → 2.5
/// - Simple fractions: "1/2 cup sugar" → 0.5
/// - Mixed fractions: "1 1/2 cups milk" → 1.5
///
/// Malformed input is never an error: anything that does not start with a
/// numeral token (including a zero denominator) yields `amount: None` and
/// the untouched line as the remainder.
///
/// # Arguments
/// * `line` - The ingredient line to parse
///
/// # Returns
/// * ParsedQuantity with the extracted amount, or a verbatim passthrough
pub fn parse_quantity(line: &str) -> ParsedQuantity {
    if let Some(captures) = LEADING_QUANTITY.captures(line) {
        let token = &captures[1];
        if let Some(amount) = parse_token(token) {
            return ParsedQuantity {
                amount: Some(amount),
                remainder: captures[2].to_string(),
            };
        }
    }

    ParsedQuantity {
        amount: None,
        remainder: line.to_string(),
    }
}

fn parse_token(token: &str) -> Option<f64> {
    // Mixed form: "1 1/2"
    if let Some((whole, fraction)) = token.split_once(char::is_whitespace) {
        let whole: f64 = whole.parse().ok()?;
        return Some(whole + parse_fraction(fraction.trim_start())?);
    }

    if token.contains('/') {
        return parse_fraction(token);
    }

    token.parse().ok()
}

fn parse_fraction(token: &str) -> Option<f64> {
    let (numerator, denominator) = token.split_once('/')?;
    let numerator: f64 = numerator.parse().ok()?;
    let denominator: f64 = denominator.parse().ok()?;

    if denominator == 0.0 {
        return None;
    }

    Some(numerator / denominator)
}

/// Format a scaled quantity as a human-friendly string
///
/// Rendering rules:
/// - Integral values: plain integer ("3")
/// - Values below 1: nearest simple fraction ("3/4")
/// - Larger fractional values: two decimals with trailing zeros stripped
///   ("2.50" → "2.5", "2.00" → "2")
///
/// # Arguments
/// * `value` - The quantity to format
///
/// # Returns
/// * String representation of the quantity
pub fn format_quantity(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }

    if value < 1.0 {
        return closest_fraction(value);
    }

    let fixed = format!("{value:.2}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Best rational approximation via continued-fraction convergents.
///
/// The h/k accumulators follow the standard recurrence; each iteration
/// folds the next partial quotient in and stops once the convergent is
/// within FRACTION_EPSILON of the input, the remainder hits zero, or the
/// denominator bound is reached.
fn closest_fraction(value: f64) -> String {
    let (mut h1, mut h2) = (1.0_f64, 0.0_f64);
    let (mut k1, mut k2) = (0.0_f64, 1.0_f64);
    let mut b = value;

    loop {
        let a = b.floor();
        let next_h = a * h1 + h2;
        let next_k = a * k1 + k2;

        // Keep the last in-bound convergent instead of overshooting
        if next_k > MAX_DENOMINATOR && k1 > 0.0 {
            break;
        }

        h2 = h1;
        h1 = next_h;
        k2 = k1;
        k1 = next_k;

        if (value - h1 / k1).abs() <= FRACTION_EPSILON {
            break;
        }

        let remainder = b - a;
        if remainder.abs() < f64::EPSILON {
            break;
        }
        b = 1.0 / remainder;
    }

    if k1 == 1.0 {
        return format!("{}", h1 as i64);
    }

    format!("{}/{}", h1 as i64, k1 as i64)
}

/// Scale every ingredient line by `current_servings / original_servings`
///
/// Lines without a leading quantity pass through unchanged. The output has
/// the same length and order as the input.
///
/// # Arguments
/// * `ingredients` - The ingredient lines to scale
/// * `original_servings` - Serving count the quantities are written for
/// * `current_servings` - Serving count to scale to
///
/// # Returns
/// * Ok(Vec<String>) - Rescaled ingredient lines
/// * Err(RecipeError::InvalidArgument) - When either serving count is not positive
pub fn scale_ingredients(
    ingredients: &[String],
    original_servings: i64,
    current_servings: i64,
) -> RecipeResult<Vec<String>> {
    if original_servings <= 0 || current_servings <= 0 {
        return Err(RecipeError::InvalidArgument(format!(
            "serving counts must be positive, got {original_servings} and {current_servings}"
        )));
    }

    let factor = current_servings as f64 / original_servings as f64;

    Ok(ingredients
        .iter()
        .map(|line| match parse_quantity(line) {
            ParsedQuantity {
                amount: Some(amount),
                remainder,
            } => format!("{} {}", format_quantity(amount * factor), remainder),
            _ => line.clone(),
        })
        .collect())
}
