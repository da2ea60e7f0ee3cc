use std::sync::Arc;

use crate::db::store::{duplicate_odd_message, match_not_found_message, odd_not_found_message, MatchStore};
use crate::models::matches::Match;
use crate::models::odds::{MatchOdd, NewOdd, OddDto, UpdateOddDto};
use crate::services::error::ServiceError;
use crate::validation::validate_odd_update;

/// Business rules for the odds of a match. Every operation is scoped under
/// its parent match.
#[derive(Clone)]
pub struct OddsService {
    store: Arc<dyn MatchStore>,
}

impl OddsService {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    async fn require_match(&self, match_id: i64) -> Result<Match, ServiceError> {
        self.store
            .find_match_by_id(match_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(match_not_found_message(match_id)))
    }

    async fn find_odd_of_match(&self, match_id: i64, odd_id: i64) -> Result<Option<MatchOdd>, ServiceError> {
        let odds = self.store.find_odds_by_match(match_id).await?;
        Ok(odds.into_iter().find(|odd| odd.id == odd_id))
    }

    pub async fn create_odd_for_match(&self, match_id: i64, input: OddDto) -> Result<MatchOdd, ServiceError> {
        let new_odd = NewOdd::try_from(input)?;
        let parent = self.require_match(match_id).await?;

        if self
            .store
            .odd_exists_for_match_and_specifier(parent.id, new_odd.specifier)
            .await?
        {
            return Err(ServiceError::AlreadyExists(duplicate_odd_message(
                parent.id,
                new_odd.specifier,
            )));
        }

        let saved = self.store.insert_odd(parent.id, new_odd).await?;
        tracing::info!(
            "Created odd {} ({} @ {}) for match {}",
            saved.id,
            saved.specifier,
            saved.odd,
            parent.id
        );
        Ok(saved)
    }

    /// Never fails for an existing match; no odds yields an empty vector.
    pub async fn get_odds_for_match(&self, match_id: i64) -> Result<Vec<MatchOdd>, ServiceError> {
        let parent = self.require_match(match_id).await?;
        Ok(parent.odds)
    }

    pub async fn update_odd(&self, match_id: i64, odd_id: i64, update: UpdateOddDto) -> Result<MatchOdd, ServiceError> {
        let new_value = validate_odd_update(&update)?;
        self.require_match(match_id).await?;

        let mut existing = self
            .find_odd_of_match(match_id, odd_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(odd_not_found_message(match_id, odd_id)))?;

        if let Some(value) = new_value {
            existing.odd = value;
        }
        let updated = self.store.update_odd(&existing).await?;
        tracing::info!("Updated odd {} of match {}", odd_id, match_id);
        Ok(updated)
    }

    /// Returns `false` when either the match or the odd does not exist.
    pub async fn delete(&self, match_id: i64, odd_id: i64) -> Result<bool, ServiceError> {
        if !self.store.match_exists_by_id(match_id).await? {
            return Ok(false);
        }
        match self.find_odd_of_match(match_id, odd_id).await? {
            Some(odd) => {
                self.store.delete_odd(&odd).await?;
                tracing::info!("Deleted odd {} of match {}", odd_id, match_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
