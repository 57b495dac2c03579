//! Global daily check-in streak tracking.
//!
//! One state for the whole app, independent of which pillar is focused.
//! Streak semantics are calendar-day based with a one-day grace period:
//! logging yesterday keeps the streak alive until the end of today; a gap
//! of two or more days resets it.
//!
//! Operations take "today" as an explicit [`DateKey`] so they stay pure
//! and testable against fixed dates; production callers pass
//! [`crate::calendar::today()`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calendar::DateKey;

/// Maximum streak value. Streaks track the 21-day challenge horizon and
/// cap there.
pub const STREAK_CAP: u32 = 21;

/// Persistent state of the global daily log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLogState {
    /// Consecutive calendar days logged, capped at [`STREAK_CAP`].
    #[serde(default)]
    pub streak: u32,

    /// Lifetime count of logged days. Monotonically non-decreasing.
    #[serde(default)]
    pub total_days_logged: u32,

    /// Last calendar day a check-in was recorded.
    #[serde(default)]
    pub last_log_date: Option<DateKey>,

    /// Append-only record of logged days. Values are always `true`; the
    /// map form matches the persisted JSON schema.
    #[serde(default)]
    pub log_history: BTreeMap<DateKey, bool>,
}

/// Result of re-evaluating the streak against the current date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadEvaluation {
    /// Whether the user already checked in today.
    pub is_logged_today: bool,
    /// Streak after applying the grace-period rule.
    pub streak: u32,
}

impl DailyLogState {
    /// Re-evaluate the streak for the current date.
    ///
    /// Pure; must be re-run every time the app becomes active, never
    /// cached. If the last log was today the user is logged and the
    /// streak stands. If it was yesterday the user is not yet logged but
    /// the streak is preserved (grace period). Any older date, or no log
    /// at all, resets the streak to 0.
    pub fn evaluate_on_load(&self, today: DateKey) -> LoadEvaluation {
        match self.last_log_date {
            Some(d) if d == today => LoadEvaluation {
                is_logged_today: true,
                streak: self.streak,
            },
            Some(d) if d == today.pred() => LoadEvaluation {
                is_logged_today: false,
                streak: self.streak,
            },
            _ => LoadEvaluation {
                is_logged_today: false,
                streak: 0,
            },
        }
    }

    /// Record today's check-in.
    ///
    /// Unconditional: it does not deduplicate. The caller must check
    /// `evaluate_on_load(today).is_logged_today` first and only invoke
    /// this when it is false. [`crate::engine::ProgressEngine::log_today`]
    /// performs that guard.
    pub fn log_today(&mut self, today: DateKey) {
        // Apply the grace-period rule before incrementing, so a stale
        // streak from a multi-day gap restarts at 1.
        self.streak = self.evaluate_on_load(today).streak;
        self.streak = (self.streak + 1).min(STREAK_CAP);
        self.total_days_logged += 1;
        self.last_log_date = Some(today);
        self.log_history.insert(today, true);
    }
}
