// Core algorithm exports
pub mod matcher;
pub mod reasons;
pub mod scoring;

pub use matcher::{Matcher, MatchOutcome, DEFAULT_MAX_RESULTS};
pub use reasons::{generate_match_reasons, MatchQuality};
pub use scoring::{
    budget_band, calculate_budget_score, composite_score, score_neighborhood, to_percentage,
    ScoringError,
};
