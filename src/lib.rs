//! NeighborFit - neighborhood matching service
//!
//! This library provides the weighted scoring engine that ranks neighborhoods
//! against a user's preferences, plus the catalog loader and HTTP routes that
//! feed it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{Matcher, MatchOutcome, MatchQuality, ScoringError};
pub use models::{
    BudgetTier, FindMatchesRequest, FindMatchesResponse, MatchPreferences, MatchResult,
    Neighborhood, ScoringWeights,
};
pub use services::{Catalog, CatalogError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let outcome = Matcher::default().find_matches(Catalog::empty().neighborhoods(), &MatchPreferences {
            budget: BudgetTier::Low,
            safety_importance: 3,
            walkability_importance: 3,
            family_friendly: false,
            quiet_environment: false,
        });
        assert!(outcome.matches.is_empty());
    }
}
