use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::models::odds::{MatchOdd, NewOdd, OddDto};
use crate::utils::date_time::{format_date, format_time};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "varchar", rename_all = "UPPERCASE")]
pub enum Sport {
    Football,
    Basketball,
    Tennis,
}

impl Sport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Football => "FOOTBALL",
            Sport::Basketball => "BASKETBALL",
            Sport::Tennis => "TENNIS",
        }
    }
}

impl Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored match together with the odds it owns, ordered by odd id.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: i64,
    pub description: String,
    pub match_date: NaiveDate,
    pub match_time: NaiveTime,
    pub team_a: String,
    pub team_b: String,
    pub sport: Sport,
    pub odds: Vec<MatchOdd>,
}

/// A validated match that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMatch {
    pub description: String,
    pub match_date: NaiveDate,
    pub match_time: NaiveTime,
    pub team_a: String,
    pub team_b: String,
    pub sport: Sport,
    pub odds: Vec<NewOdd>,
}

/// Match as it travels over the wire. Incoming payloads are validated into a
/// [`NewMatch`] before anything touches the store.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub team_a: Option<String>,
    #[serde(default)]
    pub team_b: Option<String>,
    #[serde(default)]
    pub sport: Option<Sport>,
    #[serde(default)]
    pub odds: Option<Vec<OddDto>>,
}

impl From<&Match> for MatchDto {
    fn from(m: &Match) -> Self {
        Self {
            id: Some(m.id),
            date: Some(format_date(m.match_date)),
            time: Some(format_time(m.match_time)),
            description: Some(m.description.clone()),
            team_a: Some(m.team_a.clone()),
            team_b: Some(m.team_b.clone()),
            sport: Some(m.sport),
            odds: Some(m.odds.iter().map(OddDto::from).collect()),
        }
    }
}

/// Request to update a match. Only the kick-off time and the description are mutable.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct UpdateMatchDto {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Parsed form of [`UpdateMatchDto`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchUpdate {
    pub time: Option<NaiveTime>,
    pub description: Option<String>,
}
