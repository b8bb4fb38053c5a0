use crate::models::{ComponentScores, MatchPreferences, Neighborhood};

/// Explain why a neighborhood matches
///
/// At most one reason per component, always in the order budget, safety,
/// walkability, family, quiet. Thresholds apply to the unrounded 0-1 scores.
pub fn generate_match_reasons(
    neighborhood: &Neighborhood,
    preferences: &MatchPreferences,
    scores: &ComponentScores,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if scores.budget > 0.8 {
        reasons.push("Great budget fit");
    } else if scores.budget > 0.6 {
        reasons.push("Good value for money");
    }

    if scores.safety > 0.7 && preferences.safety_importance >= 4 {
        reasons.push("Excellent safety rating");
    } else if scores.safety > 0.5 && preferences.safety_importance >= 3 {
        reasons.push("Good safety record");
    }

    if scores.walkability > 0.7 && preferences.walkability_importance >= 4 {
        reasons.push("Highly walkable");
    } else if scores.walkability > 0.5 && preferences.walkability_importance >= 3 {
        reasons.push("Good walkability");
    }

    if preferences.family_friendly {
        if neighborhood.family_friendly > 4.0 {
            reasons.push("Very family-friendly");
        } else if neighborhood.family_friendly > 3.5 {
            reasons.push("Family-friendly amenities");
        }
    }

    if preferences.quiet_environment {
        if neighborhood.noise_level < 2.5 {
            reasons.push("Very peaceful environment");
        } else if neighborhood.noise_level < 3.5 {
            reasons.push("Quiet neighborhood");
        }
    }

    reasons.into_iter().map(String::from).collect()
}

/// Coarse label for a match score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl MatchQuality {
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 80 => MatchQuality::Excellent,
            s if s >= 60 => MatchQuality::Good,
            s if s >= 40 => MatchQuality::Fair,
            _ => MatchQuality::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchQuality::Excellent => "Excellent Match",
            MatchQuality::Good => "Good Match",
            MatchQuality::Fair => "Fair Match",
            MatchQuality::Poor => "Poor Match",
        }
    }
}
