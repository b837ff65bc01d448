//! Progression math: level curve and streak window.
//!
//! Pure functions over ledger aggregates. Nothing here is stored; level and
//! streak are recomputed from the ledger on every read, so spending XP can
//! never demote a level and a streak can never get stuck stale.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Hours of inactivity after which a streak lapses.
pub const STREAK_WINDOW_HOURS: i64 = 48;

/// Level curve: `max(1, floor(sqrt(lifetime_xp / 100)))`.
/// 100 XP = Lv 1, 400 XP = Lv 2, 900 XP = Lv 3.
pub fn level_for(lifetime_xp: i64) -> u32 {
    if lifetime_xp <= 0 {
        return 1;
    }
    let level = ((lifetime_xp as f64) / 100.0).sqrt().floor() as u32;
    level.max(1)
}

/// Display title for a level.
pub fn level_title(level: u32) -> &'static str {
    match level {
        1 => "Scavenger",
        2 => "Tracker",
        3 => "Hunter",
        4 => "Ranger",
        _ => "Legend",
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StreakStatus {
    pub active: bool,
    pub age_text: String,
    pub message: String,
}

/// Streak is active iff the last earning activity is within the 48h window.
/// The age text is presentational only and plays no part in the decision.
pub fn streak_status(last_earn: Option<DateTime<Utc>>, now: DateTime<Utc>) -> StreakStatus {
    let Some(last) = last_earn else {
        return StreakStatus {
            active: false,
            age_text: "Never".into(),
            message: "Start your streak!".into(),
        };
    };

    let age_text = age_text(last, now);
    // Exact comparison: 48h00m01s is already lapsed.
    let active = now - last <= Duration::hours(STREAK_WINDOW_HOURS);
    StreakStatus {
        active,
        age_text,
        message: if active {
            "Streak Active".into()
        } else {
            "Streak Inactive".into()
        },
    }
}

/// Coarse human age: "Just now" under an hour, else "{N}h ago".
pub fn age_text(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - then).num_hours();
    if hours < 1 {
        "Just now".into()
    } else {
        format!("{hours}h ago")
    }
}

/// Derived player metrics for the HUD. Never stored.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerStats {
    pub balance: i64,
    pub level: u32,
    pub streak: StreakStatus,
}
