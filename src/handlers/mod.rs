pub mod backend_health_handler;
pub mod match_handler;
pub mod odds_handler;
pub mod extractor_errors;
