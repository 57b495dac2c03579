//! Per-pillar 21-day challenge progression.
//!
//! Each pillar carries an independent [`ChallengeState`]: which tasks
//! were checked on which calendar day, how far the challenge has
//! advanced, and the resulting streak/adherence counters.
//!
//! The machine is deliberately split into two named transitions:
//! [`ChallengeState::toggle_task`] (reversible check/uncheck) and
//! [`ChallengeState::try_advance`] (permanent day advancement, at most
//! once per calendar day). Unchecking a task after the day advanced does
//! not roll anything back; advancement is permanent for that calendar day
//! once granted. [`ChallengeState::check_task`] is the combined entry the
//! engine uses.

pub mod catalog;

pub use catalog::{Phase, Pillar, Task, TaskCatalog};

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::calendar::DateKey;
use crate::error::ValidationError;

/// Final challenge day; the challenge is terminal once reached.
pub const FINAL_DAY: u8 = 21;

/// Persistent progression state for one pillar's challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeState {
    /// Active challenge day, 1..=21. Monotonically non-decreasing,
    /// advances by at most 1 per distinct calendar day.
    #[serde(default = "default_current_day")]
    pub current_day: u8,

    /// Tasks checked per calendar day.
    #[serde(default)]
    pub completed_tasks: BTreeMap<DateKey, BTreeSet<String>>,

    /// Consecutive days on which the day was passed.
    #[serde(default)]
    pub streak_days: u32,

    /// Lifetime count of days passed for this pillar.
    #[serde(default)]
    pub completed_days: u32,

    /// Last calendar day on which all available tasks were completed.
    #[serde(default)]
    pub last_completion_date: Option<DateKey>,

    /// Set once on first task interaction, never changed afterwards.
    #[serde(default)]
    pub start_date: Option<DateKey>,
}

fn default_current_day() -> u8 {
    1
}

impl Default for ChallengeState {
    fn default() -> Self {
        Self {
            current_day: default_current_day(),
            completed_tasks: BTreeMap::new(),
            streak_days: 0,
            completed_days: 0,
            last_completion_date: None,
            start_date: None,
        }
    }
}

/// What a [`ChallengeState::check_task`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Whether the task is checked after the toggle.
    pub task_checked: bool,
    /// Whether every available task is now checked for today.
    pub all_done: bool,
    /// Whether the challenge day advanced in this call.
    pub advanced: bool,
}

impl ChallengeState {
    /// Whether the challenge has reached its terminal day.
    pub fn is_complete(&self) -> bool {
        self.current_day >= FINAL_DAY
    }

    /// Task ids checked on a given calendar day.
    pub fn tasks_done_on(&self, date: DateKey) -> BTreeSet<String> {
        self.completed_tasks.get(&date).cloned().unwrap_or_default()
    }

    /// Toggle membership of `task_id` in today's checked set. Returns
    /// whether the task is checked after the toggle. Reversible; never
    /// touches the day counters.
    pub fn toggle_task(&mut self, task_id: &str, today: DateKey) -> bool {
        let today_tasks = self.completed_tasks.entry(today).or_default();
        if today_tasks.remove(task_id) {
            false
        } else {
            today_tasks.insert(task_id.to_string());
            true
        }
    }

    /// Advance the challenge day if today's advancement has not already
    /// been granted. Returns whether advancement happened.
    ///
    /// Callers invoke this only when "all available tasks done" just
    /// became true; the guards here enforce at most one advance per
    /// calendar day and the terminal day-21 state. Advancement is
    /// permanent: nothing in this module ever decrements the counters.
    pub fn try_advance(&mut self, today: DateKey) -> bool {
        if self.current_day >= FINAL_DAY {
            return false;
        }
        if self.last_completion_date == Some(today) {
            return false;
        }

        // Streak continuity: completing yesterday (or for the first time
        // ever) extends the streak; any gap restarts it at 1.
        match self.last_completion_date {
            None => self.streak_days += 1,
            Some(d) if d == today.pred() => self.streak_days += 1,
            Some(_) => self.streak_days = 1,
        }

        self.last_completion_date = Some(today);
        self.completed_days += 1;
        self.current_day += 1;
        true
    }

    /// Combined entry: toggle a task and advance the day when the toggle
    /// completes the last available task.
    ///
    /// Advancement fires only when all-done *newly* became true in this
    /// call, at most once per calendar day, and never at day 21. Toggling
    /// a task off after advancement leaves the counters untouched.
    ///
    /// # Errors
    /// Returns [`ValidationError::UnknownTask`] if the task id is not in
    /// the catalog for this pillar.
    pub fn check_task(
        &mut self,
        catalog: &TaskCatalog,
        pillar: Pillar,
        task_id: &str,
        today: DateKey,
    ) -> Result<CheckOutcome, ValidationError> {
        if !catalog.contains(pillar, task_id) {
            return Err(ValidationError::UnknownTask {
                pillar: pillar.to_string(),
                task_id: task_id.to_string(),
            });
        }

        if self.start_date.is_none() {
            self.start_date = Some(today);
        }

        let available: Vec<String> = catalog
            .available_on(pillar, self.current_day)
            .into_iter()
            .map(|t| t.id.clone())
            .collect();

        let before = self.tasks_done_on(today);
        let all_done_before =
            !available.is_empty() && available.iter().all(|id| before.contains(id));

        let task_checked = self.toggle_task(task_id, today);

        let after = self.tasks_done_on(today);
        let all_done = !available.is_empty() && available.iter().all(|id| after.contains(id));

        let advanced = if all_done && !all_done_before {
            self.try_advance(today)
        } else {
            false
        };

        Ok(CheckOutcome {
            task_checked,
            all_done,
            advanced,
        })
    }

    /// Privileged direct override of the current day, for support and
    /// test tooling. Writes `current_day` only; streak and task history
    /// are deliberately left untouched, even when this lowers the day.
    ///
    /// # Errors
    /// Returns [`ValidationError::DayOutOfRange`] for days outside 1..=21.
    pub fn set_challenge_day(&mut self, day: u8) -> Result<(), ValidationError> {
        if !(1..=FINAL_DAY).contains(&day) {
            return Err(ValidationError::DayOutOfRange(day));
        }
        self.current_day = day;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> DateKey {
        DateKey::from_ymd(2025, 6, d).unwrap()
    }

    /// Two tasks on day 1, a third unlocking on day 6.
    fn small_catalog() -> TaskCatalog {
        let mut catalog = TaskCatalog::new();
        for (id, unlocked_day) in [("walk", 1), ("water", 1), ("stretch", 6)] {
            catalog.add(
                Pillar::Movement,
                Task {
                    id: id.to_string(),
                    name: id.to_string(),
                    description: String::new(),
                    unlocked_day,
                    phase: Phase::of_day(unlocked_day),
                },
            );
        }
        catalog
    }

    #[test]
    fn test_completing_last_task_advances_once() {
        let catalog = small_catalog();
        let mut s = ChallengeState::default();

        let out = s
            .check_task(&catalog, Pillar::Movement, "walk", day(10))
            .unwrap();
        assert!(out.task_checked && !out.all_done && !out.advanced);
        assert_eq!(s.current_day, 1);

        let out = s
            .check_task(&catalog, Pillar::Movement, "water", day(10))
            .unwrap();
        assert!(out.all_done && out.advanced);
        assert_eq!(s.current_day, 2);
        assert_eq!(s.completed_days, 1);
        assert_eq!(s.last_completion_date, Some(day(10)));
    }

    #[test]
    fn test_no_second_advance_same_day() {
        let catalog = small_catalog();
        let mut s = ChallengeState::default();
        s.check_task(&catalog, Pillar::Movement, "walk", day(10)).unwrap();
        s.check_task(&catalog, Pillar::Movement, "water", day(10)).unwrap();
        assert_eq!(s.current_day, 2);

        // Uncheck and re-check: all-done becomes newly true again, but
        // today's advancement was already granted
        s.check_task(&catalog, Pillar::Movement, "water", day(10)).unwrap();
        let out = s
            .check_task(&catalog, Pillar::Movement, "water", day(10))
            .unwrap();
        assert!(out.all_done && !out.advanced);
        assert_eq!(s.current_day, 2);
        assert_eq!(s.completed_days, 1);
    }

    #[test]
    fn test_uncheck_does_not_roll_back() {
        let catalog = small_catalog();
        let mut s = ChallengeState::default();
        s.check_task(&catalog, Pillar::Movement, "walk", day(10)).unwrap();
        s.check_task(&catalog, Pillar::Movement, "water", day(10)).unwrap();

        let out = s
            .check_task(&catalog, Pillar::Movement, "walk", day(10))
            .unwrap();
        assert!(!out.task_checked && !out.all_done && !out.advanced);
        assert_eq!(s.current_day, 2);
        assert_eq!(s.completed_days, 1);
        assert_eq!(s.streak_days, 1);
    }

    #[test]
    fn test_streak_extends_after_yesterday() {
        let catalog = small_catalog();
        let mut s = ChallengeState::default();
        s.check_task(&catalog, Pillar::Movement, "walk", day(10)).unwrap();
        s.check_task(&catalog, Pillar::Movement, "water", day(10)).unwrap();
        assert_eq!(s.streak_days, 1);

        s.check_task(&catalog, Pillar::Movement, "walk", day(11)).unwrap();
        s.check_task(&catalog, Pillar::Movement, "water", day(11)).unwrap();
        assert_eq!(s.streak_days, 2);
        assert_eq!(s.completed_days, 2);
        assert_eq!(s.current_day, 3);
    }

    #[test]
    fn test_streak_resets_after_gap() {
        let catalog = small_catalog();
        let mut s = ChallengeState::default();
        s.check_task(&catalog, Pillar::Movement, "walk", day(5)).unwrap();
        s.check_task(&catalog, Pillar::Movement, "water", day(5)).unwrap();
        s.check_task(&catalog, Pillar::Movement, "walk", day(6)).unwrap();
        s.check_task(&catalog, Pillar::Movement, "water", day(6)).unwrap();
        assert_eq!(s.streak_days, 2);

        // 3-day gap
        s.check_task(&catalog, Pillar::Movement, "walk", day(10)).unwrap();
        s.check_task(&catalog, Pillar::Movement, "water", day(10)).unwrap();
        assert_eq!(s.streak_days, 1);
        assert_eq!(s.completed_days, 3);
    }

    #[test]
    fn test_terminal_day_21() {
        let catalog = small_catalog();
        let mut s = ChallengeState {
            current_day: FINAL_DAY,
            ..Default::default()
        };

        for d in 10..20 {
            s.check_task(&catalog, Pillar::Movement, "walk", day(d)).unwrap();
            s.check_task(&catalog, Pillar::Movement, "water", day(d)).unwrap();
            s.check_task(&catalog, Pillar::Movement, "stretch", day(d)).unwrap();
        }
        assert_eq!(s.current_day, FINAL_DAY);
        assert_eq!(s.completed_days, 0);
        assert!(s.is_complete());
    }

    #[test]
    fn test_start_date_set_once() {
        let catalog = small_catalog();
        let mut s = ChallengeState::default();
        s.check_task(&catalog, Pillar::Movement, "walk", day(10)).unwrap();
        assert_eq!(s.start_date, Some(day(10)));

        s.check_task(&catalog, Pillar::Movement, "water", day(12)).unwrap();
        assert_eq!(s.start_date, Some(day(10)));
    }

    #[test]
    fn test_unknown_task_rejected() {
        let catalog = small_catalog();
        let mut s = ChallengeState::default();
        let err = s
            .check_task(&catalog, Pillar::Movement, "juggle", day(10))
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnknownTask { .. }));
        // Rejected call leaves no trace, not even start_date
        assert_eq!(s, ChallengeState::default());
    }

    #[test]
    fn test_locked_task_does_not_count_toward_all_done() {
        let catalog = small_catalog();
        let mut s = ChallengeState::default();
        // "stretch" unlocks on day 6; on day 1 only walk+water are available
        s.check_task(&catalog, Pillar::Movement, "stretch", day(10)).unwrap();
        let out = s
            .check_task(&catalog, Pillar::Movement, "walk", day(10))
            .unwrap();
        assert!(!out.all_done);

        let out = s
            .check_task(&catalog, Pillar::Movement, "water", day(10))
            .unwrap();
        assert!(out.all_done && out.advanced);
    }

    #[test]
    fn test_set_challenge_day_override() {
        let mut s = ChallengeState::default();
        s.streak_days = 4;
        s.completed_days = 9;

        s.set_challenge_day(15).unwrap();
        assert_eq!(s.current_day, 15);
        // Counters deliberately untouched, even when lowering
        s.set_challenge_day(3).unwrap();
        assert_eq!(s.current_day, 3);
        assert_eq!(s.streak_days, 4);
        assert_eq!(s.completed_days, 9);

        assert!(s.set_challenge_day(0).is_err());
        assert!(s.set_challenge_day(22).is_err());
    }

    #[test]
    fn test_empty_catalog_never_advances() {
        let catalog = small_catalog();
        let mut s = ChallengeState::default();
        // Sleep has no tasks in this catalog; unknown task is rejected
        assert!(s
            .check_task(&catalog, Pillar::Sleep, "walk", day(10))
            .is_err());
        assert_eq!(s.current_day, 1);
    }
}
