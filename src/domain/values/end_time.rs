//! Offer end-time representation and the heuristic remaining-hours parser.
//!
//! Sources report expiry in wildly different shapes: not at all, a loose
//! human string ("Ends in 2d"), or a concrete timestamp. The parser is total:
//! anything it cannot understand is treated as infinitely far away, so an
//! unknown end time is never ranked as urgent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EndTime {
    /// Free-form duration-bearing string as reported by a source.
    Text(String),
    /// Concrete expiry timestamp.
    At(DateTime<Utc>),
}

impl fmt::Display for EndTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndTime::Text(s) => write!(f, "{s}"),
            EndTime::At(ts) => write!(f, "{}", ts.to_rfc3339()),
        }
    }
}

/// Hours until the offer ends, as seen at `now`.
///
/// Absent or "permanent" end times are infinite. Textual end times are parsed
/// from the `ends in {N}{d|h}` shape (`d` unit ×24); anything unparseable is
/// infinite. Concrete timestamps yield the exact remaining hours, floored at
/// zero once expired.
pub fn remaining_hours(end_time: Option<&EndTime>, now: DateTime<Utc>) -> f64 {
    match end_time {
        None => f64::INFINITY,
        Some(EndTime::At(ts)) => {
            let mins = (*ts - now).num_minutes() as f64;
            (mins / 60.0).max(0.0)
        }
        Some(EndTime::Text(s)) => parse_text_hours(s),
    }
}

fn parse_text_hours(raw: &str) -> f64 {
    let s = raw.to_lowercase();
    if s.contains("permanent") {
        return f64::INFINITY;
    }
    let Some(rest) = s.split("ends in").nth(1) else {
        return f64::INFINITY;
    };
    let Some(token) = rest.split_whitespace().next() else {
        return f64::INFINITY;
    };
    let unit = token.chars().last();
    let digits: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let Ok(value) = digits.parse::<f64>() else {
        return f64::INFINITY;
    };
    match unit {
        Some('d') => value * 24.0,
        Some('h') => value,
        // Bare number, assume hours.
        Some(c) if c.is_ascii_digit() => value,
        _ => f64::INFINITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_absent_is_infinite() {
        assert_eq!(remaining_hours(None, Utc::now()), f64::INFINITY);
    }

    #[test]
    fn test_permanent_is_infinite() {
        let et = EndTime::Text("Permanent collection".into());
        assert_eq!(remaining_hours(Some(&et), Utc::now()), f64::INFINITY);
    }

    #[test]
    fn test_ends_in_days() {
        let et = EndTime::Text("Ends in 2d".into());
        assert_eq!(remaining_hours(Some(&et), Utc::now()), 48.0);
    }

    #[test]
    fn test_ends_in_hours() {
        let et = EndTime::Text("ends in 18h".into());
        assert_eq!(remaining_hours(Some(&et), Utc::now()), 18.0);
    }

    #[test]
    fn test_garbage_is_infinite() {
        let et = EndTime::Text("soon™".into());
        assert_eq!(remaining_hours(Some(&et), Utc::now()), f64::INFINITY);
        let et = EndTime::Text("ends in whenever".into());
        assert_eq!(remaining_hours(Some(&et), Utc::now()), f64::INFINITY);
    }

    #[test]
    fn test_timestamp_remaining() {
        let now = Utc::now();
        let et = EndTime::At(now + Duration::hours(6));
        let hours = remaining_hours(Some(&et), now);
        assert!((hours - 6.0).abs() < 0.1);
    }

    #[test]
    fn test_expired_timestamp_floors_at_zero() {
        let now = Utc::now();
        let et = EndTime::At(now - Duration::hours(3));
        assert_eq!(remaining_hours(Some(&et), now), 0.0);
    }
}
