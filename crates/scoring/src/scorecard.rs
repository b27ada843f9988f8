use crate::components::CategoryScore;
use serde::{Deserialize, Serialize};

/// Standard deviation assumed for the distribution of scores within an industry.
const INDUSTRY_SCORE_SPREAD: f64 = 15.0;
/// Share of a normal population within one standard deviation on either side of the mean.
const ONE_SIGMA_SHARE: f64 = 34.0;
/// Distance from the industry average that counts as clearly above or below it.
const COMPARISON_MARGIN: i16 = 10;

/// Health band of an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    Excellent,
    Good,
    Average,
    Poor,
}

impl ScoreStatus {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ScoreStatus::Excellent,
            60..=79 => ScoreStatus::Good,
            40..=59 => ScoreStatus::Average,
            _ => ScoreStatus::Poor,
        }
    }
}

/// How urgently a category should be worked on, by its headroom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn from_potential(potential: u8) -> Self {
        match potential {
            60.. => Priority::Critical,
            40..=59 => Priority::High,
            20..=39 => Priority::Medium,
            _ => Priority::Low,
        }
    }
}

/// Headroom of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementPotential {
    pub category: String,
    pub current_score: u8,
    /// `100 - current_score`.
    pub potential: u8,
    /// Potential scaled by the category weight, one decimal.
    pub weighted_impact: f64,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonStatus {
    AboveAverage,
    Average,
    BelowAverage,
}

/// Position of a score relative to the industry's typical score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryComparison {
    pub industry: String,
    pub industry_average: u8,
    pub score: u8,
    pub difference: i16,
    /// Approximate percentile (1-99) assuming normally distributed scores.
    pub percentile: u8,
    pub status: ComparisonStatus,
}

impl IndustryComparison {
    pub fn new(industry: impl Into<String>, score: u8, industry_average: u8) -> Self {
        let difference = i16::from(score) - i16::from(industry_average);
        let z = f64::from(difference) / INDUSTRY_SCORE_SPREAD;
        let percentile = (50.0 + z * ONE_SIGMA_SHARE).round().clamp(1.0, 99.0) as u8;
        let status = if difference >= COMPARISON_MARGIN {
            ComparisonStatus::AboveAverage
        } else if difference <= -COMPARISON_MARGIN {
            ComparisonStatus::BelowAverage
        } else {
            ComparisonStatus::Average
        };
        Self {
            industry: industry.into(),
            industry_average,
            score,
            difference,
            percentile,
            status,
        }
    }
}

/// The full health picture for one business: overall score, adjusted categories and
/// where the headroom is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub overall: u8,
    pub status: ScoreStatus,
    /// Category scores after industry modifiers.
    pub categories: Vec<CategoryScore>,
    pub weakest: Option<CategoryScore>,
    pub strongest: Option<CategoryScore>,
    /// `100 - overall`.
    pub total_potential: u8,
    /// Sorted by weighted impact, largest first.
    pub improvement: Vec<ImprovementPotential>,
    pub industry_comparison: IndustryComparison,
}

/// First category with the lowest score.
pub fn weakest(categories: &[CategoryScore]) -> Option<&CategoryScore> {
    categories
        .iter()
        .fold(None, |best: Option<&CategoryScore>, c| match best {
            Some(b) if b.score <= c.score => Some(b),
            _ => Some(c),
        })
}

/// First category with the highest score.
pub fn strongest(categories: &[CategoryScore]) -> Option<&CategoryScore> {
    categories
        .iter()
        .fold(None, |best: Option<&CategoryScore>, c| match best {
            Some(b) if b.score >= c.score => Some(b),
            _ => Some(c),
        })
}

pub fn improvement_potential(categories: &[CategoryScore]) -> Vec<ImprovementPotential> {
    let mut potentials: Vec<ImprovementPotential> = categories
        .iter()
        .map(|c| {
            let potential = 100 - c.score.min(100);
            let weight = if c.weight.is_finite() { c.weight.max(0.0) } else { 0.0 };
            ImprovementPotential {
                category: c.category.clone(),
                current_score: c.score,
                potential,
                weighted_impact: (f64::from(potential) * weight * 10.0).round() / 10.0,
                priority: Priority::from_potential(potential),
            }
        })
        .collect();
    potentials.sort_by(|a, b| b.weighted_impact.total_cmp(&a.weighted_impact));
    potentials
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bands() {
        assert_eq!(ScoreStatus::from_score(80), ScoreStatus::Excellent);
        assert_eq!(ScoreStatus::from_score(79), ScoreStatus::Good);
        assert_eq!(ScoreStatus::from_score(40), ScoreStatus::Average);
        assert_eq!(ScoreStatus::from_score(39), ScoreStatus::Poor);
    }

    #[test]
    fn priority_follows_headroom() {
        assert_eq!(Priority::from_potential(75), Priority::Critical);
        assert_eq!(Priority::from_potential(40), Priority::High);
        assert_eq!(Priority::from_potential(20), Priority::Medium);
        assert_eq!(Priority::from_potential(5), Priority::Low);
    }

    #[test]
    fn percentile_is_clamped_and_symmetric() {
        let at_average = IndustryComparison::new("food", 48, 48);
        assert_eq!(at_average.percentile, 50);
        assert_eq!(at_average.status, ComparisonStatus::Average);

        // one spread above -> 84th percentile
        let above = IndustryComparison::new("food", 63, 48);
        assert_eq!(above.percentile, 84);
        assert_eq!(above.status, ComparisonStatus::AboveAverage);

        let far_below = IndustryComparison::new("food", 0, 48);
        assert_eq!(far_below.percentile, 1);
        assert_eq!(far_below.status, ComparisonStatus::BelowAverage);
        assert_eq!(far_below.difference, -48);
    }

    #[test]
    fn ties_keep_the_first_category() {
        let categories = vec![
            CategoryScore::new("marketing", 40, 0.22),
            CategoryScore::new("sales", 40, 0.28),
            CategoryScore::new("content", 90, 0.18),
            CategoryScore::new("funnel", 90, 0.22),
        ];
        assert_eq!(weakest(&categories).unwrap().category, "marketing");
        assert_eq!(strongest(&categories).unwrap().category, "content");
        assert!(weakest(&[]).is_none());
    }

    #[test]
    fn improvement_is_ranked_by_weighted_impact() {
        let categories = vec![
            CategoryScore::new("marketing", 40, 0.22),
            CategoryScore::new("sales", 40, 0.28),
            CategoryScore::new("analytics", 10, 0.10),
        ];
        let ranked = improvement_potential(&categories);
        let order: Vec<_> = ranked.iter().map(|p| p.category.as_str()).collect();
        assert_eq!(order, vec!["sales", "marketing", "analytics"]);
        assert_eq!(ranked[0].weighted_impact, 16.8);
        assert_eq!(ranked[2].priority, Priority::Critical);
    }
}
