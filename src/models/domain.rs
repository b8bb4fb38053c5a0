use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A residential neighborhood from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighborhood {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "avgRent")]
    pub avg_rent: f64,
    #[serde(rename = "safetyScore")]
    pub safety_score: f64,
    #[serde(rename = "walkabilityScore")]
    pub walkability: f64,
    #[serde(rename = "familyFriendlyScore")]
    pub family_friendly: f64,
    #[serde(rename = "noiseLevel")]
    pub noise_level: f64,
    pub highlights: Vec<String>,
}

/// Categorical rent budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Low,
    Medium,
    High,
}

impl BudgetTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Low => "low",
            BudgetTier::Medium => "medium",
            BudgetTier::High => "high",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(BudgetTier::Low),
            "medium" => Ok(BudgetTier::Medium),
            "high" => Ok(BudgetTier::High),
            other => Err(format!("unknown budget tier: {}", other)),
        }
    }
}

/// Validated matching preferences for a single request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPreferences {
    pub budget: BudgetTier,
    /// 1-5
    pub safety_importance: u8,
    /// 1-5
    pub walkability_importance: u8,
    pub family_friendly: bool,
    pub quiet_environment: bool,
}

/// Per-component sub-scores on a 0-1 scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentScores {
    pub budget: f64,
    pub safety: f64,
    pub walkability: f64,
    pub family: f64,
    pub quiet: f64,
}

/// Component scores expressed as integer percentages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentPercentages {
    pub budget: i32,
    pub safety: i32,
    pub walkability: i32,
    pub family: i32,
    pub quiet: i32,
}

/// Scored and explained neighborhood
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub neighborhood: Neighborhood,
    #[serde(rename = "matchScore")]
    pub match_score: i32,
    #[serde(rename = "matchQuality")]
    pub match_quality: String,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
    #[serde(rename = "componentScores")]
    pub component_scores: ComponentPercentages,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub budget: f64,
    pub safety: f64,
    pub walkability: f64,
    pub family: f64,
    pub quiet: f64,
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.budget + self.safety + self.walkability + self.family + self.quiet
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            budget: 0.30,
            safety: 0.25,
            walkability: 0.20,
            family: 0.15,
            quiet: 0.10,
        }
    }
}
