use thiserror::Error;

use crate::models::{BudgetTier, ComponentPercentages, ComponentScores, MatchPreferences, Neighborhood, ScoringWeights};

/// Upper bound of the attribute scale used for normalization
const SCALE_MAX: f64 = 5.0;

/// Reference rent used to penalize overshoot of an open-ended band
const OPEN_BAND_ANCHOR_RENT: f64 = 2000.0;

/// Cap applied to the family component when the user asks for it
const FAMILY_CAP: f64 = 0.8;

/// Cap applied to the quiet component when the user asks for it
const QUIET_CAP: f64 = 0.7;

/// Score given to family/quiet when the user has no preference
const NEUTRAL_SCORE: f64 = 0.5;

/// Floor for neighborhoods cheaper than the preferred band
const UNDER_BAND_FLOOR: f64 = 0.5;

/// Errors raised while scoring a single neighborhood
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("neighborhood {id}: {field} is not a finite number")]
    NonFinite { id: String, field: &'static str },
}

/// Rent band `[lo, hi]` for a budget tier
pub fn budget_band(budget: BudgetTier) -> (f64, f64) {
    match budget {
        BudgetTier::Low => (0.0, 1200.0),
        BudgetTier::Medium => (1200.0, 2000.0),
        BudgetTier::High => (2000.0, f64::INFINITY),
    }
}

/// How well a rent fits the budget band (0-1)
///
/// Inside the closed band scores 1.0. Cheaper than the band decays towards a
/// floor of 0.5, pricier than the band decays linearly to 0.
pub fn calculate_budget_score(rent: f64, budget: BudgetTier) -> f64 {
    let (lo, hi) = budget_band(budget);

    if lo <= rent && rent <= hi {
        1.0
    } else if rent < lo {
        (1.0 - (lo - rent) / lo).max(UNDER_BAND_FLOOR)
    } else if hi.is_infinite() {
        (1.0 - (rent - OPEN_BAND_ANCHOR_RENT) / OPEN_BAND_ANCHOR_RENT).max(0.0)
    } else {
        (1.0 - (rent - hi) / hi).max(0.0)
    }
}

/// Divide by the scale maximum, clamping only from above
#[inline]
pub fn normalize(value: f64) -> f64 {
    (value / SCALE_MAX).min(1.0)
}

/// Attribute scaled by user importance (1-5)
#[inline]
pub fn calculate_weighted_score(attribute: f64, importance: u8) -> f64 {
    normalize(attribute) * (f64::from(importance) / SCALE_MAX)
}

#[inline]
pub fn calculate_family_score(family_friendly: f64, wants_family: bool) -> f64 {
    if wants_family {
        normalize(family_friendly) * FAMILY_CAP
    } else {
        NEUTRAL_SCORE
    }
}

/// Lower noise scores higher. Noise above 5 goes negative and is left as is.
#[inline]
pub fn calculate_quiet_score(noise_level: f64, wants_quiet: bool) -> f64 {
    if wants_quiet {
        ((SCALE_MAX - noise_level) / SCALE_MAX) * QUIET_CAP
    } else {
        NEUTRAL_SCORE
    }
}

/// Compute all five component scores for a neighborhood
pub fn score_neighborhood(
    neighborhood: &Neighborhood,
    preferences: &MatchPreferences,
) -> Result<ComponentScores, ScoringError> {
    let attributes = [
        ("avgRent", neighborhood.avg_rent),
        ("safetyScore", neighborhood.safety_score),
        ("walkabilityScore", neighborhood.walkability),
        ("familyFriendlyScore", neighborhood.family_friendly),
        ("noiseLevel", neighborhood.noise_level),
    ];

    if let Some(&(field, _)) = attributes.iter().find(|(_, value)| !value.is_finite()) {
        return Err(ScoringError::NonFinite {
            id: neighborhood.id.clone(),
            field,
        });
    }

    Ok(ComponentScores {
        budget: calculate_budget_score(neighborhood.avg_rent, preferences.budget),
        safety: calculate_weighted_score(neighborhood.safety_score, preferences.safety_importance),
        walkability: calculate_weighted_score(
            neighborhood.walkability,
            preferences.walkability_importance,
        ),
        family: calculate_family_score(neighborhood.family_friendly, preferences.family_friendly),
        quiet: calculate_quiet_score(neighborhood.noise_level, preferences.quiet_environment),
    })
}

/// Weighted sum of component scores on a 0-1 scale
pub fn composite_score(scores: &ComponentScores, weights: &ScoringWeights) -> f64 {
    scores.budget * weights.budget
        + scores.safety * weights.safety
        + scores.walkability * weights.walkability
        + scores.family * weights.family
        + scores.quiet * weights.quiet
}

/// Convert a 0-1 score into an integer percentage, rounding half away from zero
#[inline]
pub fn to_percentage(score: f64) -> i32 {
    (score * 100.0).round() as i32
}

pub fn component_percentages(scores: &ComponentScores) -> ComponentPercentages {
    ComponentPercentages {
        budget: to_percentage(scores.budget),
        safety: to_percentage(scores.safety),
        walkability: to_percentage(scores.walkability),
        family: to_percentage(scores.family),
        quiet: to_percentage(scores.quiet),
    }
}
