use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use crate::db::store::{
    duplicate_match_message, duplicate_odd_message, match_not_found_message, odd_not_found_message,
    MatchStore, StoreError,
};
use crate::models::matches::{Match, NewMatch, Sport};
use crate::models::odds::{MatchOdd, NewOdd, Specifier};
use crate::models::page::{MatchSortField, Page, PageRequest, SortDirection};

#[derive(Debug, sqlx::FromRow)]
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
    fn into_match(self, odds: Vec<MatchOdd>) -> Match {
        Match {
            id: self.id,
            description: self.description,
            match_date: self.match_date,
            match_time: self.match_time,
            team_a: self.team_a,
            team_b: self.team_b,
            sport: self.sport,
            odds,
        }
    }
}

/// Translate a unique-constraint violation into `StoreError::UniqueViolation`
/// carrying `message`; any other error passes through.
fn unique_violation_as(e: sqlx::Error, message: impl FnOnce() -> String) -> StoreError {
    let is_unique = e
        .as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false);
    if is_unique {
        StoreError::UniqueViolation(message())
    } else {
        StoreError::Database(e)
    }
}

/// PostgreSQL-backed store. Uniqueness and cascading deletes are enforced by
/// the schema in `migrations/`.
#[derive(Debug, Clone)]
pub struct PgMatchStore {
    pool: PgPool,
}

impl PgMatchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    async fn odds_for_matches(&self, match_ids: &[i64]) -> Result<HashMap<i64, Vec<MatchOdd>>, StoreError> {
        let odds = sqlx::query_as::<_, MatchOdd>(
            r#"
            SELECT id, match_id, specifier, odd
            FROM match_odds
            WHERE match_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(match_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_match: HashMap<i64, Vec<MatchOdd>> = HashMap::new();
        for odd in odds {
            by_match.entry(odd.match_id).or_default().push(odd);
        }
        Ok(by_match)
    }

    async fn insert_odd_in(
        tx: &mut Transaction<'_, Postgres>,
        match_id: i64,
        new_odd: &NewOdd,
    ) -> Result<MatchOdd, StoreError> {
        sqlx::query_as::<_, MatchOdd>(
            r#"
            INSERT INTO match_odds (match_id, specifier, odd)
            VALUES ($1, $2, $3)
            RETURNING id, match_id, specifier, odd
            "#,
        )
        .bind(match_id)
        .bind(new_odd.specifier)
        .bind(new_odd.odd)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| unique_violation_as(e, || duplicate_odd_message(match_id, new_odd.specifier)))
    }
}

#[async_trait]
impl MatchStore for PgMatchStore {
    async fn match_exists(
        &self,
        team_a: &str,
        team_b: &str,
        sport: Sport,
        match_date: NaiveDate,
    ) -> Result<bool, StoreError> {
        let exists: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM matches
                WHERE team_a = $1 AND team_b = $2 AND sport = $3 AND match_date = $4
            )
            "#,
        )
        .bind(team_a)
        .bind(team_b)
        .bind(sport)
        .bind(match_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.0)
    }

    async fn insert_match(&self, new_match: NewMatch) -> Result<Match, StoreError> {
        // The match row and its odds are committed together or not at all
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, MatchRow>(
            r#"
            INSERT INTO matches (description, match_date, match_time, team_a, team_b, sport)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, description, match_date, match_time, team_a, team_b, sport
            "#,
        )
        .bind(&new_match.description)
        .bind(new_match.match_date)
        .bind(new_match.match_time)
        .bind(&new_match.team_a)
        .bind(&new_match.team_b)
        .bind(new_match.sport)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            unique_violation_as(e, || {
                duplicate_match_message(
                    &new_match.team_a,
                    &new_match.team_b,
                    new_match.sport,
                    new_match.match_date,
                )
            })
        })?;

        let mut odds = Vec::with_capacity(new_match.odds.len());
        for new_odd in &new_match.odds {
            odds.push(Self::insert_odd_in(&mut tx, row.id, new_odd).await?);
        }

        tx.commit().await?;

        debug!("Inserted match {} with {} odds", row.id, odds.len());
        Ok(row.into_match(odds))
    }

    async fn update_match(&self, m: &Match) -> Result<Match, StoreError> {
        let row = sqlx::query_as::<_, MatchRow>(
            r#"
            UPDATE matches
            SET description = $2, match_time = $3
            WHERE id = $1
            RETURNING id, description, match_date, match_time, team_a, team_b, sport
            "#,
        )
        .bind(m.id)
        .bind(&m.description)
        .bind(m.match_time)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::Missing(match_not_found_message(m.id)))?;

        let odds = self.find_odds_by_match(row.id).await?;
        Ok(row.into_match(odds))
    }

    async fn find_match_by_id(&self, id: i64) -> Result<Option<Match>, StoreError> {
        let row = sqlx::query_as::<_, MatchRow>(
            r#"
            SELECT id, description, match_date, match_time, team_a, team_b, sport
            FROM matches
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let odds = self.find_odds_by_match(row.id).await?;
                Ok(Some(row.into_match(odds)))
            }
            None => Ok(None),
        }
    }

    async fn find_all_matches(&self, request: &PageRequest) -> Result<Page<Match>, StoreError> {
        let direction = match request.sort.direction {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        };
        let order_by = match request.sort.field {
            MatchSortField::Id => format!("id {}", direction),
            MatchSortField::MatchDate => format!(
                "match_date {dir}, match_time {dir}, id {dir}",
                dir = direction
            ),
        };
        let sql = format!(
            r#"
            SELECT id, description, match_date, match_time, team_a, team_b, sport
            FROM matches
            ORDER BY {}
            LIMIT $1 OFFSET $2
            "#,
            order_by
        );
        debug!("Fetching match page {} (size {})", request.page, request.size);

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM matches")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, MatchRow>(&sql)
            .bind(request.size as i64)
            .bind(request.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut odds = self.odds_for_matches(&ids).await?;
        let content = rows
            .into_iter()
            .map(|row| {
                let match_odds = odds.remove(&row.id).unwrap_or_default();
                row.into_match(match_odds)
            })
            .collect();

        Ok(Page {
            content,
            page: request.page,
            size: request.size,
            total_elements: total.0.max(0) as u64,
        })
    }

    async fn match_exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM matches WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists.0)
    }

    async fn delete_match_by_id(&self, id: i64) -> Result<(), StoreError> {
        // match_odds rows go with it through ON DELETE CASCADE
        sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!("Deleted match {}", id);
        Ok(())
    }

    async fn odd_exists_for_match_and_specifier(
        &self,
        match_id: i64,
        specifier: Specifier,
    ) -> Result<bool, StoreError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM match_odds WHERE match_id = $1 AND specifier = $2)",
        )
        .bind(match_id)
        .bind(specifier)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists.0)
    }

    async fn insert_odd(&self, match_id: i64, new_odd: NewOdd) -> Result<MatchOdd, StoreError> {
        let mut tx = self.pool.begin().await?;
        let odd = Self::insert_odd_in(&mut tx, match_id, &new_odd)
            .await
            .map_err(|e| match e {
                // The parent vanished between the service's lookup and this insert
                StoreError::Database(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                    StoreError::Missing(match_not_found_message(match_id))
                }
                other => other,
            })?;
        tx.commit().await?;
        Ok(odd)
    }

    async fn update_odd(&self, odd: &MatchOdd) -> Result<MatchOdd, StoreError> {
        sqlx::query_as::<_, MatchOdd>(
            r#"
            UPDATE match_odds
            SET odd = $3
            WHERE id = $1 AND match_id = $2
            RETURNING id, match_id, specifier, odd
            "#,
        )
        .bind(odd.id)
        .bind(odd.match_id)
        .bind(odd.odd)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::Missing(odd_not_found_message(odd.match_id, odd.id)))
    }

    async fn find_odds_by_match(&self, match_id: i64) -> Result<Vec<MatchOdd>, StoreError> {
        let odds = sqlx::query_as::<_, MatchOdd>(
            r#"
            SELECT id, match_id, specifier, odd
            FROM match_odds
            WHERE match_id = $1
            ORDER BY id
            "#,
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(odds)
    }

    async fn delete_odd(&self, odd: &MatchOdd) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM match_odds WHERE id = $1 AND match_id = $2")
            .bind(odd.id)
            .bind(odd.match_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
