//! Persistence seam shared by both services.
//!
//! Implementations must enforce the two uniqueness constraints themselves
//! (team pair + sport + date per match, specifier per match) and report a
//! violation as [`StoreError::UniqueViolation`]; the services only pre-check.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::matches::{Match, NewMatch, Sport};
use crate::models::odds::{MatchOdd, NewOdd, Specifier};
use crate::models::page::{Page, PageRequest};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    UniqueViolation(String),

    #[error("{0}")]
    Missing(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn match_exists(
        &self,
        team_a: &str,
        team_b: &str,
        sport: Sport,
        match_date: NaiveDate,
    ) -> Result<bool, StoreError>;

    /// Persist a match and its odds in one unit; assigns every id.
    async fn insert_match(&self, new_match: NewMatch) -> Result<Match, StoreError>;

    /// Write back the mutable columns (description, kick-off time) of an existing match.
    async fn update_match(&self, m: &Match) -> Result<Match, StoreError>;

    async fn find_match_by_id(&self, id: i64) -> Result<Option<Match>, StoreError>;

    async fn find_all_matches(&self, request: &PageRequest) -> Result<Page<Match>, StoreError>;

    async fn match_exists_by_id(&self, id: i64) -> Result<bool, StoreError>;

    /// Removes the match and every odd it owns.
    async fn delete_match_by_id(&self, id: i64) -> Result<(), StoreError>;

    async fn odd_exists_for_match_and_specifier(
        &self,
        match_id: i64,
        specifier: Specifier,
    ) -> Result<bool, StoreError>;

    async fn insert_odd(&self, match_id: i64, new_odd: NewOdd) -> Result<MatchOdd, StoreError>;

    async fn update_odd(&self, odd: &MatchOdd) -> Result<MatchOdd, StoreError>;

    async fn find_odds_by_match(&self, match_id: i64) -> Result<Vec<MatchOdd>, StoreError>;

    async fn delete_odd(&self, odd: &MatchOdd) -> Result<(), StoreError>;
}

pub(crate) fn duplicate_match_message(team_a: &str, team_b: &str, sport: Sport, match_date: NaiveDate) -> String {
    format!(
        "{} match between {} and {} on {} already exists.",
        sport,
        team_a,
        team_b,
        crate::utils::date_time::format_date(match_date)
    )
}

pub(crate) fn duplicate_odd_message(match_id: i64, specifier: Specifier) -> String {
    format!(
        "Odd for specifier {} already exists for match with id {}",
        specifier, match_id
    )
}

pub(crate) fn match_not_found_message(id: i64) -> String {
    format!("Match with id {} not found", id)
}

pub(crate) fn odd_not_found_message(match_id: i64, odd_id: i64) -> String {
    format!("No odd with id {} for matchId {} found", odd_id, match_id)
}
