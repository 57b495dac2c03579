//! Milestone projection over challenge progress.
//!
//! Pure and read-only: derives which reward thresholds a pillar has
//! reached from its `current_day`. Suppressing already-shown milestone
//! banners is the caller's concern; acknowledgements are persisted by the
//! engine (`acknowledge_milestone`) but never consulted here.

use serde::{Deserialize, Serialize};

/// Fixed milestone thresholds, in ascending order.
pub const MILESTONE_DAYS: [u8; 4] = [5, 10, 15, 21];

/// A reached reward threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Milestone(pub u8);

/// Milestones reached at the given challenge day: every threshold `m`
/// with `current_day >= m`.
pub fn reached(current_day: u8) -> Vec<Milestone> {
    MILESTONE_DAYS
        .into_iter()
        .filter(|&m| current_day >= m)
        .map(Milestone)
        .collect()
}

/// The next threshold not yet reached, if any.
pub fn next(current_day: u8) -> Option<Milestone> {
    MILESTONE_DAYS
        .into_iter()
        .find(|&m| current_day < m)
        .map(Milestone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_first_threshold() {
        assert!(reached(4).is_empty());
        assert_eq!(next(4), Some(Milestone(5)));
    }

    #[test]
    fn test_exact_thresholds() {
        assert_eq!(reached(5), vec![Milestone(5)]);
        assert_eq!(reached(10), vec![Milestone(5), Milestone(10)]);
        assert_eq!(reached(15), vec![Milestone(5), Milestone(10), Milestone(15)]);
    }

    #[test]
    fn test_terminal_day_reaches_everything() {
        assert_eq!(
            reached(21),
            vec![Milestone(5), Milestone(10), Milestone(15), Milestone(21)]
        );
        assert_eq!(next(21), None);
    }

    #[test]
    fn test_between_thresholds() {
        assert_eq!(reached(12), vec![Milestone(5), Milestone(10)]);
        assert_eq!(next(12), Some(Milestone(15)));
    }
}
