pub mod error;
pub mod match_service;
pub mod odds_service;

pub use error::ServiceError;
pub use match_service::MatchService;
pub use odds_service::OddsService;
