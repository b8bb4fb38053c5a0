use crate::core::{
    reasons::{generate_match_reasons, MatchQuality},
    scoring::{component_percentages, composite_score, score_neighborhood, to_percentage},
};
use crate::models::{MatchPreferences, MatchResult, Neighborhood, ScoringWeights};

/// Default number of matches returned per request
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// Result of the matching process
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub matches: Vec<MatchResult>,
    pub total_neighborhoods: usize,
    pub skipped: usize,
}

/// Ranks catalog neighborhoods against a preference set
///
/// # Pipeline Stages
/// 1. Component scoring (records that cannot be scored are skipped)
/// 2. Weighted composite and reason generation
/// 3. Stable sort by match score, then truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    max_results: usize,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, max_results: usize) -> Self {
        Self { weights, max_results }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), DEFAULT_MAX_RESULTS)
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Score every neighborhood and return the best matches
    ///
    /// Neighborhoods with equal match scores keep their catalog order.
    ///
    /// # Arguments
    /// * `neighborhoods` - The read-only catalog
    /// * `preferences` - Validated user preferences
    pub fn find_matches(
        &self,
        neighborhoods: &[Neighborhood],
        preferences: &MatchPreferences,
    ) -> MatchOutcome {
        let total_neighborhoods = neighborhoods.len();
        let mut skipped = 0;

        let mut matches: Vec<MatchResult> = neighborhoods
            .iter()
            .filter_map(|neighborhood| match self.score(neighborhood, preferences) {
                Ok(result) => Some(result),
                Err(e) => {
                    tracing::warn!("Skipping neighborhood {}: {}", neighborhood.name, e);
                    skipped += 1;
                    None
                }
            })
            .collect();

        // sort_by is stable, so ties keep catalog order
        matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        matches.truncate(self.max_results);

        MatchOutcome {
            matches,
            total_neighborhoods,
            skipped,
        }
    }

    fn score(
        &self,
        neighborhood: &Neighborhood,
        preferences: &MatchPreferences,
    ) -> Result<MatchResult, crate::core::ScoringError> {
        let scores = score_neighborhood(neighborhood, preferences)?;
        let match_score = to_percentage(composite_score(&scores, &self.weights));

        Ok(MatchResult {
            neighborhood: neighborhood.clone(),
            match_score,
            match_quality: MatchQuality::from_score(match_score).label().to_string(),
            match_reasons: generate_match_reasons(neighborhood, preferences, &scores),
            component_scores: component_percentages(&scores),
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
