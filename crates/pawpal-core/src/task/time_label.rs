//! Ordering of free-form time-of-day labels.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// How `sort_by_time` compares task time labels.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeOrdering {
    /// Plain string comparison. Correct only for zero-padded "HH:MM".
    #[default]
    Lexical,
    /// Parse "H:MM"/"HH:MM" as time-of-day; unparseable labels go last,
    /// compared as strings among themselves.
    Chronological,
}

impl fmt::Display for TimeOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeOrdering::Lexical => write!(f, "lexical"),
            TimeOrdering::Chronological => write!(f, "chronological"),
        }
    }
}

impl FromStr for TimeOrdering {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexical" => Ok(TimeOrdering::Lexical),
            "chronological" => Ok(TimeOrdering::Chronological),
            _ => Err(ValidationError::UnknownTimeOrdering(s.to_string())),
        }
    }
}

/// Parse an "H:MM" or "HH:MM" label into a time-of-day.
pub fn parse_time_label(label: &str) -> Option<NaiveTime> {
    let (hour, minute) = label.trim().split_once(':')?;
    if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
        return None;
    }

    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Compare two time labels under the given ordering.
pub fn compare_labels(a: &str, b: &str, ordering: TimeOrdering) -> Ordering {
    match ordering {
        TimeOrdering::Lexical => a.cmp(b),
        TimeOrdering::Chronological => match (parse_time_label(a), parse_time_label(b)) {
            (Some(ta), Some(tb)) => ta.cmp(&tb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_padded_and_unpadded_hours() {
        assert_eq!(parse_time_label("09:00"), NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(parse_time_label("9:05"), NaiveTime::from_hms_opt(9, 5, 0));
        assert_eq!(parse_time_label("23:59"), NaiveTime::from_hms_opt(23, 59, 0));
    }

    #[test]
    fn rejects_free_text_and_out_of_range() {
        assert!(parse_time_label("after dinner").is_none());
        assert!(parse_time_label("24:00").is_none());
        assert!(parse_time_label("12:5").is_none());
        assert!(parse_time_label(":30").is_none());
    }

    #[test]
    fn lexical_puts_unpadded_nine_after_ten() {
        assert_eq!(compare_labels("9:00", "10:00", TimeOrdering::Lexical), Ordering::Greater);
        assert_eq!(compare_labels("09:00", "10:00", TimeOrdering::Lexical), Ordering::Less);
    }

    #[test]
    fn chronological_parses_before_comparing() {
        assert_eq!(
            compare_labels("9:00", "10:00", TimeOrdering::Chronological),
            Ordering::Less
        );
        assert_eq!(
            compare_labels("09:00", "9:00", TimeOrdering::Chronological),
            Ordering::Equal
        );
        assert_eq!(
            compare_labels("evening", "23:00", TimeOrdering::Chronological),
            Ordering::Greater
        );
    }

    #[test]
    fn ordering_parse() {
        assert_eq!("Chronological".parse::<TimeOrdering>().unwrap(), TimeOrdering::Chronological);
        assert!("random".parse::<TimeOrdering>().is_err());
    }
}
