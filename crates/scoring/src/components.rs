use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Score returned when nothing with a positive weight was measured.
pub const NEUTRAL_SCORE: u8 = 50;

/// A named 0-100 sub-score and its relative weight inside a category.
///
/// Weights are relative: they need not sum to one because the average is taken over
/// the weight that is actually present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub name: String,
    pub score: u8,
    pub weight: f64,
}

impl ScoreComponent {
    /// Scores above 100 are capped.
    pub fn new(name: impl Into<String>, score: u8, weight: f64) -> Self {
        Self {
            name: name.into(),
            score: score.min(100),
            weight,
        }
    }
}

/// A category's 0-100 score and its weight in the overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: u8,
    pub weight: f64,
}

impl CategoryScore {
    pub fn new(category: impl Into<String>, score: u8, weight: f64) -> Self {
        Self {
            category: category.into(),
            score: score.min(100),
            weight,
        }
    }
}

/// `Σ(score·weight) / Σweight` over the entries whose weight is finite and positive.
fn weighted_mean(entries: impl Iterator<Item = (u8, f64)>) -> u8 {
    let (sum, total) = entries
        .filter(|(_, w)| w.is_finite() && *w > 0.0)
        .fold((0.0, 0.0), |(sum, total), (score, w)| {
            (sum + f64::from(score) * w, total + w)
        });
    if total > 0.0 {
        (sum / total).round().clamp(0.0, 100.0) as u8
    } else {
        NEUTRAL_SCORE
    }
}

/// Weighted average of a category's components.
///
/// Components with zero (or non-finite) weight are treated as absent. With nothing
/// present the neutral score 50 is returned.
pub fn weighted_average(components: &[ScoreComponent]) -> u8 {
    weighted_mean(components.iter().map(|c| (c.score, c.weight)))
}

/// Applies industry modifiers to each category score, capping the result at 100.
///
/// Categories without a modifier are unchanged. Non-positive or non-finite modifiers
/// are ignored.
pub fn apply_modifiers(
    categories: &[CategoryScore],
    modifiers: &HashMap<String, f64>,
) -> Vec<CategoryScore> {
    categories
        .iter()
        .map(|c| {
            let factor = match modifiers.get(&c.category) {
                Some(f) if f.is_finite() && *f > 0.0 => *f,
                Some(f) => {
                    warn!(category = %c.category, modifier = *f, "Ignoring invalid industry modifier");
                    1.0
                }
                None => 1.0,
            };
            let adjusted = (f64::from(c.score) * factor).round().min(100.0) as u8;
            CategoryScore::new(c.category.clone(), adjusted, c.weight)
        })
        .collect()
}

/// Overall score: modifiers applied per category (each capped at 100), then the same
/// weighted average as [`weighted_average`].
pub fn weighted_overall_score(
    categories: &[CategoryScore],
    modifiers: &HashMap<String, f64>,
) -> u8 {
    let adjusted = apply_modifiers(categories, modifiers);
    weighted_mean(adjusted.iter().map(|c| (c.score, c.weight)))
}
