use std::sync::Arc;

use crate::db::store::{duplicate_match_message, match_not_found_message, MatchStore};
use crate::models::matches::{Match, MatchDto, MatchUpdate, NewMatch, UpdateMatchDto};
use crate::models::page::{Page, PageRequest};
use crate::services::error::ServiceError;

/// Business rules for creating, reading, updating and deleting matches.
#[derive(Clone)]
pub struct MatchService {
    store: Arc<dyn MatchStore>,
}

impl MatchService {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a new match together with any odds it carries.
    ///
    /// Fails with `AlreadyExists` when the same teams already meet in the
    /// same sport on the same date, whatever the time or description.
    pub async fn save(&self, input: MatchDto) -> Result<Match, ServiceError> {
        let new_match = NewMatch::try_from(input)?;

        if self
            .store
            .match_exists(&new_match.team_a, &new_match.team_b, new_match.sport, new_match.match_date)
            .await?
        {
            return Err(ServiceError::AlreadyExists(duplicate_match_message(
                &new_match.team_a,
                &new_match.team_b,
                new_match.sport,
                new_match.match_date,
            )));
        }

        let saved = self.store.insert_match(new_match).await?;
        tracing::info!(
            "Created {} match {} ({} vs {}) with {} odds",
            saved.sport,
            saved.id,
            saved.team_a,
            saved.team_b,
            saved.odds.len()
        );
        Ok(saved)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Match, ServiceError> {
        self.store
            .find_match_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(match_not_found_message(id)))
    }

    pub async fn list(&self, request: PageRequest) -> Result<Page<Match>, ServiceError> {
        Ok(self.store.find_all_matches(&request).await?)
    }

    /// Returns `false` when there was nothing to delete.
    pub async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        if !self.store.match_exists_by_id(id).await? {
            return Ok(false);
        }
        self.store.delete_match_by_id(id).await?;
        tracing::info!("Deleted match {} and its odds", id);
        Ok(true)
    }

    /// Apply the supplied fields of `update`; omitted fields keep their stored value.
    pub async fn update(&self, id: i64, update: UpdateMatchDto) -> Result<Match, ServiceError> {
        let update = MatchUpdate::try_from(update)?;
        let mut existing = self.find_by_id(id).await?;

        if let Some(time) = update.time {
            existing.match_time = time;
        }
        if let Some(description) = update.description {
            existing.description = description;
        }

        let updated = self.store.update_match(&existing).await?;
        tracing::info!("Updated match {}", id);
        Ok(updated)
    }
}
