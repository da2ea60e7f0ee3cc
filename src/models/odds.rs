// src/models/odds.rs
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Betting market an odd is quoted for: home win, draw or away win.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "varchar", rename_all = "UPPERCASE")]
pub enum Specifier {
    One,
    X,
    Two,
}

impl Specifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Specifier::One => "ONE",
            Specifier::X => "X",
            Specifier::Two => "TWO",
        }
    }
}

impl Display for Specifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored odd, always owned by exactly one match.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct MatchOdd {
    pub id: i64,
    pub match_id: i64,
    pub specifier: Specifier,
    pub odd: f64,
}

/// A validated odd that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOdd {
    pub specifier: Specifier,
    pub odd: f64,
}

/// Odd as it travels over the wire.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OddDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub specifier: Option<Specifier>,
    #[serde(default)]
    pub odd: Option<f64>,
}

impl From<&MatchOdd> for OddDto {
    fn from(odd: &MatchOdd) -> Self {
        Self {
            id: Some(odd.id),
            specifier: Some(odd.specifier),
            odd: Some(odd.odd),
        }
    }
}

/// Partial update of an odd; an absent value leaves the stored one untouched.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct UpdateOddDto {
    #[serde(default)]
    pub odd: Option<f64>,
}
