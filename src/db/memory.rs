//! Arena-style store kept entirely in process memory.
//!
//! Odds live in their own map keyed by id and carry the id of the match that
//! owns them; `odds_by_match` indexes them per match. All mutations happen
//! under one write lock, so the uniqueness re-checks below are race free and
//! deleting a match removes it and its odds together.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use tokio::sync::RwLock;

use crate::db::store::{
    duplicate_match_message, duplicate_odd_message, match_not_found_message, odd_not_found_message,
    MatchStore, StoreError,
};
use crate::models::matches::{Match, NewMatch, Sport};
use crate::models::odds::{MatchOdd, NewOdd, Specifier};
use crate::models::page::{MatchSortField, Page, PageRequest, SortDirection};

#[derive(Debug, Clone)]
struct MatchRow {
    id: i64,
    description: String,
    match_date: NaiveDate,
    match_time: NaiveTime,
    team_a: String,
    team_b: String,
    sport: Sport,
}

impl MatchRow {
    fn same_fixture(&self, team_a: &str, team_b: &str, sport: Sport, match_date: NaiveDate) -> bool {
        self.team_a == team_a && self.team_b == team_b && self.sport == sport && self.match_date == match_date
    }
}

#[derive(Debug, Default)]
struct Arena {
    last_match_id: i64,
    last_odd_id: i64,
    matches: BTreeMap<i64, MatchRow>,
    odds: BTreeMap<i64, MatchOdd>,
    odds_by_match: HashMap<i64, BTreeSet<i64>>,
}

impl Arena {
    fn odds_of(&self, match_id: i64) -> Vec<MatchOdd> {
        self.odds_by_match
            .get(&match_id)
            .map(|ids| ids.iter().filter_map(|id| self.odds.get(id).cloned()).collect())
            .unwrap_or_default()
    }

    fn assemble(&self, row: &MatchRow) -> Match {
        Match {
            id: row.id,
            description: row.description.clone(),
            match_date: row.match_date,
            match_time: row.match_time,
            team_a: row.team_a.clone(),
            team_b: row.team_b.clone(),
            sport: row.sport,
            odds: self.odds_of(row.id),
        }
    }

    fn has_specifier(&self, match_id: i64, specifier: Specifier) -> bool {
        self.odds_of(match_id).iter().any(|odd| odd.specifier == specifier)
    }

    fn push_odd(&mut self, match_id: i64, new_odd: NewOdd) -> MatchOdd {
        self.last_odd_id += 1;
        let odd = MatchOdd {
            id: self.last_odd_id,
            match_id,
            specifier: new_odd.specifier,
            odd: new_odd.odd,
        };
        self.odds.insert(odd.id, odd.clone());
        self.odds_by_match.entry(match_id).or_default().insert(odd.id);
        odd
    }
}

#[derive(Debug, Default)]
pub struct InMemoryMatchStore {
    arena: RwLock<Arena>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn match_count(&self) -> usize {
        self.arena.read().await.matches.len()
    }

    /// Number of odds across all matches.
    pub async fn odd_count(&self) -> usize {
        self.arena.read().await.odds.len()
    }
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    async fn match_exists(
        &self,
        team_a: &str,
        team_b: &str,
        sport: Sport,
        match_date: NaiveDate,
    ) -> Result<bool, StoreError> {
        let arena = self.arena.read().await;
        Ok(arena
            .matches
            .values()
            .any(|row| row.same_fixture(team_a, team_b, sport, match_date)))
    }

    async fn insert_match(&self, new_match: NewMatch) -> Result<Match, StoreError> {
        let mut arena = self.arena.write().await;
        if arena
            .matches
            .values()
            .any(|row| row.same_fixture(&new_match.team_a, &new_match.team_b, new_match.sport, new_match.match_date))
        {
            return Err(StoreError::UniqueViolation(duplicate_match_message(
                &new_match.team_a,
                &new_match.team_b,
                new_match.sport,
                new_match.match_date,
            )));
        }
        let mut specifiers = BTreeSet::new();
        if let Some(dup) = new_match.odds.iter().find(|odd| !specifiers.insert(odd.specifier)) {
            return Err(StoreError::UniqueViolation(duplicate_odd_message(
                arena.last_match_id + 1,
                dup.specifier,
            )));
        }

        arena.last_match_id += 1;
        let row = MatchRow {
            id: arena.last_match_id,
            description: new_match.description,
            match_date: new_match.match_date,
            match_time: new_match.match_time,
            team_a: new_match.team_a,
            team_b: new_match.team_b,
            sport: new_match.sport,
        };
        arena.matches.insert(row.id, row.clone());
        for odd in new_match.odds {
            arena.push_odd(row.id, odd);
        }
        Ok(arena.assemble(&row))
    }

    async fn update_match(&self, m: &Match) -> Result<Match, StoreError> {
        let mut arena = self.arena.write().await;
        let row = arena
            .matches
            .get_mut(&m.id)
            .ok_or_else(|| StoreError::Missing(match_not_found_message(m.id)))?;
        row.description = m.description.clone();
        row.match_time = m.match_time;
        let row = row.clone();
        Ok(arena.assemble(&row))
    }

    async fn find_match_by_id(&self, id: i64) -> Result<Option<Match>, StoreError> {
        let arena = self.arena.read().await;
        Ok(arena.matches.get(&id).map(|row| arena.assemble(row)))
    }

    async fn find_all_matches(&self, request: &PageRequest) -> Result<Page<Match>, StoreError> {
        let arena = self.arena.read().await;
        let mut rows: Vec<&MatchRow> = arena.matches.values().collect();
        match request.sort.field {
            // BTreeMap iteration is already id ordered
            MatchSortField::Id => {}
            MatchSortField::MatchDate => {
                rows.sort_by_key(|row| (row.match_date, row.match_time, row.id));
            }
        }
        if request.sort.direction == SortDirection::Desc {
            rows.reverse();
        }
        let content = rows
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .map(|row| arena.assemble(row))
            .collect();
        Ok(Page {
            content,
            page: request.page,
            size: request.size,
            total_elements: arena.matches.len() as u64,
        })
    }

    async fn match_exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.arena.read().await.matches.contains_key(&id))
    }

    async fn delete_match_by_id(&self, id: i64) -> Result<(), StoreError> {
        let mut arena = self.arena.write().await;
        arena.matches.remove(&id);
        if let Some(odd_ids) = arena.odds_by_match.remove(&id) {
            for odd_id in odd_ids {
                arena.odds.remove(&odd_id);
            }
        }
        Ok(())
    }

    async fn odd_exists_for_match_and_specifier(
        &self,
        match_id: i64,
        specifier: Specifier,
    ) -> Result<bool, StoreError> {
        Ok(self.arena.read().await.has_specifier(match_id, specifier))
    }

    async fn insert_odd(&self, match_id: i64, new_odd: NewOdd) -> Result<MatchOdd, StoreError> {
        let mut arena = self.arena.write().await;
        if !arena.matches.contains_key(&match_id) {
            return Err(StoreError::Missing(match_not_found_message(match_id)));
        }
        if arena.has_specifier(match_id, new_odd.specifier) {
            return Err(StoreError::UniqueViolation(duplicate_odd_message(
                match_id,
                new_odd.specifier,
            )));
        }
        Ok(arena.push_odd(match_id, new_odd))
    }

    async fn update_odd(&self, odd: &MatchOdd) -> Result<MatchOdd, StoreError> {
        let mut arena = self.arena.write().await;
        match arena.odds.get_mut(&odd.id) {
            Some(stored) if stored.match_id == odd.match_id => {
                stored.odd = odd.odd;
                Ok(stored.clone())
            }
            _ => Err(StoreError::Missing(odd_not_found_message(odd.match_id, odd.id))),
        }
    }

    async fn find_odds_by_match(&self, match_id: i64) -> Result<Vec<MatchOdd>, StoreError> {
        Ok(self.arena.read().await.odds_of(match_id))
    }

    async fn delete_odd(&self, odd: &MatchOdd) -> Result<(), StoreError> {
        let mut arena = self.arena.write().await;
        if arena.odds.remove(&odd.id).is_some() {
            if let Some(ids) = arena.odds_by_match.get_mut(&odd.match_id) {
                ids.remove(&odd.id);
            }
        }
        Ok(())
    }
}
