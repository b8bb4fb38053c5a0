// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BudgetTier, ComponentPercentages, ComponentScores, MatchPreferences, MatchResult,
    Neighborhood, ScoringWeights,
};
pub use requests::{FindMatchesRequest, RequestError};
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse, NeighborhoodsResponse};
