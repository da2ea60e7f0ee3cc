//! Input validation run before any persistence attempt.
//!
//! Every wire DTO is turned into its validated domain counterpart here, so
//! services and stores only ever see well-formed values.

use std::collections::HashSet;

use crate::models::matches::{MatchDto, MatchUpdate, NewMatch, UpdateMatchDto};
use crate::models::odds::{NewOdd, OddDto, UpdateOddDto};
use crate::services::error::ServiceError;
use crate::utils::date_time::{parse_date, parse_time};

pub const TEAMS_NOT_EQUAL_MESSAGE: &str = "TeamA & TeamB must not be equal";

/// Both teams present and different, ignoring case.
pub fn teams_not_equal(team_a: Option<&str>, team_b: Option<&str>) -> bool {
    match (team_a, team_b) {
        (Some(a), Some(b)) => a.to_lowercase() != b.to_lowercase(),
        _ => false,
    }
}

pub fn validate_odd_value(odd: f64) -> Result<f64, ServiceError> {
    if !odd.is_finite() || odd <= 0.0 {
        return Err(ServiceError::Validation(format!(
            "Odd must be a positive number, got {}",
            odd
        )));
    }
    Ok(odd)
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ServiceError> {
    value.ok_or_else(|| ServiceError::Validation(format!("{} must not be null", field)))
}

impl TryFrom<OddDto> for NewOdd {
    type Error = ServiceError;

    fn try_from(dto: OddDto) -> Result<Self, Self::Error> {
        let specifier = required(dto.specifier, "specifier")?;
        let odd = validate_odd_value(required(dto.odd, "odd")?)?;
        Ok(NewOdd { specifier, odd })
    }
}

impl TryFrom<MatchDto> for NewMatch {
    type Error = ServiceError;

    fn try_from(dto: MatchDto) -> Result<Self, Self::Error> {
        if !teams_not_equal(dto.team_a.as_deref(), dto.team_b.as_deref()) {
            return Err(ServiceError::Validation(TEAMS_NOT_EQUAL_MESSAGE.to_string()));
        }
        let team_a = required(dto.team_a, "teamA")?;
        let team_b = required(dto.team_b, "teamB")?;
        let sport = required(dto.sport, "sport")?;
        let match_date = parse_date(&required(dto.date, "date")?).map_err(ServiceError::Validation)?;
        let match_time = parse_time(&required(dto.time, "time")?).map_err(ServiceError::Validation)?;

        let mut seen = HashSet::new();
        let mut odds = Vec::new();
        for odd in dto.odds.unwrap_or_default() {
            let odd = NewOdd::try_from(odd)?;
            if !seen.insert(odd.specifier) {
                return Err(ServiceError::Validation(format!(
                    "Duplicate odd for specifier {} in request",
                    odd.specifier
                )));
            }
            odds.push(odd);
        }

        let description = dto
            .description
            .unwrap_or_else(|| format!("{}-{}", team_a, team_b));

        Ok(NewMatch {
            description,
            match_date,
            match_time,
            team_a,
            team_b,
            sport,
            odds,
        })
    }
}

impl TryFrom<UpdateMatchDto> for MatchUpdate {
    type Error = ServiceError;

    fn try_from(dto: UpdateMatchDto) -> Result<Self, Self::Error> {
        let time = dto
            .time
            .as_deref()
            .map(parse_time)
            .transpose()
            .map_err(ServiceError::Validation)?;
        Ok(MatchUpdate {
            time,
            description: dto.description,
        })
    }
}

/// Returns the new odd value, if the update carries one.
pub fn validate_odd_update(dto: &UpdateOddDto) -> Result<Option<f64>, ServiceError> {
    dto.odd.map(validate_odd_value).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::matches::Sport;
    use crate::models::odds::Specifier;
    use chrono::{NaiveDate, NaiveTime};

    fn match_dto() -> MatchDto {
        MatchDto {
            date: Some("21/02/2025".into()),
            time: Some("21:30".into()),
            team_a: Some("OSFP".into()),
            team_b: Some("PAO".into()),
            sport: Some(Sport::Basketball),
            ..Default::default()
        }
    }

    fn odd(specifier: Specifier, value: f64) -> OddDto {
        OddDto { id: None, specifier: Some(specifier), odd: Some(value) }
    }

    #[test]
    fn teams_must_differ_ignoring_case() {
        assert!(teams_not_equal(Some("OSFP"), Some("PAO")));
        assert!(!teams_not_equal(Some("osfp"), Some("OSFP")));
        assert!(!teams_not_equal(None, Some("PAO")));
        assert!(!teams_not_equal(Some("OSFP"), None));
    }

    #[test]
    fn valid_dto_becomes_new_match_with_default_description() {
        let new_match = NewMatch::try_from(match_dto()).unwrap();
        assert_eq!(new_match.description, "OSFP-PAO");
        assert_eq!(new_match.match_date, NaiveDate::from_ymd_opt(2025, 2, 21).unwrap());
        assert_eq!(new_match.match_time, NaiveTime::from_hms_opt(21, 30, 0).unwrap());
        assert!(new_match.odds.is_empty());
    }

    #[test]
    fn supplied_description_is_kept() {
        let dto = MatchDto { description: Some("Derby".into()), ..match_dto() };
        assert_eq!(NewMatch::try_from(dto).unwrap().description, "Derby");
    }

    #[test]
    fn equal_teams_are_rejected() {
        let dto = MatchDto { team_b: Some("osfp".into()), ..match_dto() };
        let err = NewMatch::try_from(dto).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m == TEAMS_NOT_EQUAL_MESSAGE));
    }

    #[test]
    fn missing_or_malformed_fields_are_rejected() {
        let cases = [
            MatchDto { sport: None, ..match_dto() },
            MatchDto { date: None, ..match_dto() },
            MatchDto { date: Some("2025-02-21".into()), ..match_dto() },
            MatchDto { time: Some("9:30".into()), ..match_dto() },
        ];
        for dto in cases {
            assert!(matches!(NewMatch::try_from(dto), Err(ServiceError::Validation(_))));
        }
    }

    #[test]
    fn odds_are_validated() {
        let dto = MatchDto { odds: Some(vec![odd(Specifier::One, 0.0)]), ..match_dto() };
        assert!(matches!(NewMatch::try_from(dto), Err(ServiceError::Validation(_))));

        let dto = MatchDto {
            odds: Some(vec![OddDto { id: None, specifier: None, odd: Some(1.5) }]),
            ..match_dto()
        };
        assert!(matches!(NewMatch::try_from(dto), Err(ServiceError::Validation(_))));

        let dto = MatchDto {
            odds: Some(vec![odd(Specifier::One, 1.4), odd(Specifier::One, 1.9)]),
            ..match_dto()
        };
        assert!(matches!(NewMatch::try_from(dto), Err(ServiceError::Validation(_))));

        let dto = MatchDto {
            odds: Some(vec![odd(Specifier::One, 1.4), odd(Specifier::Two, 1.3)]),
            ..match_dto()
        };
        assert_eq!(NewMatch::try_from(dto).unwrap().odds.len(), 2);
    }

    #[test]
    fn match_update_parses_only_supplied_fields() {
        let update = MatchUpdate::try_from(UpdateMatchDto { time: Some("19:00".into()), description: None }).unwrap();
        assert_eq!(update.time, NaiveTime::from_hms_opt(19, 0, 0));
        assert_eq!(update.description, None);

        let err = MatchUpdate::try_from(UpdateMatchDto { time: Some("7pm".into()), description: None });
        assert!(matches!(err, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn odd_update_rejects_non_positive_values() {
        assert_eq!(validate_odd_update(&UpdateOddDto { odd: None }).unwrap(), None);
        assert_eq!(validate_odd_update(&UpdateOddDto { odd: Some(2.5) }).unwrap(), Some(2.5));
        assert!(validate_odd_update(&UpdateOddDto { odd: Some(-1.0) }).is_err());
        assert!(validate_odd_update(&UpdateOddDto { odd: Some(f64::NAN) }).is_err());
    }
}
