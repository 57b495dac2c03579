//! Static challenge definitions: pillars, phases, and the task catalog.
//!
//! Tasks are fixed content shipped with the app, never mutated at
//! runtime. A task is "available" on challenge day D iff its
//! `unlocked_day <= D`, so later phases gate harder practice behind
//! earlier habit-building.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One of the seven tracked habit categories. Each pillar runs its own
/// independent 21-day challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    Breathing,
    Sleep,
    Nutrition,
    Movement,
    Hydration,
    Mindset,
    Connection,
}

impl Pillar {
    pub const ALL: [Pillar; 7] = [
        Pillar::Breathing,
        Pillar::Sleep,
        Pillar::Nutrition,
        Pillar::Movement,
        Pillar::Hydration,
        Pillar::Mindset,
        Pillar::Connection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pillar::Breathing => "breathing",
            Pillar::Sleep => "sleep",
            Pillar::Nutrition => "nutrition",
            Pillar::Movement => "movement",
            Pillar::Hydration => "hydration",
            Pillar::Mindset => "mindset",
            Pillar::Connection => "connection",
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pillar {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pillar::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownPillar(s.to_string()))
    }
}

/// Grouping of challenge days used to gate task unlocks and encouragement
/// content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Days 1-5
    Foundation,
    /// Days 6-10
    Building,
    /// Days 11-15
    Deepening,
    /// Days 16-21
    Mastery,
}

impl Phase {
    /// Phase a given challenge day falls into. Days outside 1..=21 clamp
    /// to the nearest phase.
    pub fn of_day(day: u8) -> Phase {
        match day {
            0..=5 => Phase::Foundation,
            6..=10 => Phase::Building,
            11..=15 => Phase::Deepening,
            _ => Phase::Mastery,
        }
    }
}

/// A static challenge task definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub description: String,
    /// First challenge day on which this task is available.
    pub unlocked_day: u8,
    pub phase: Phase,
}

impl Task {
    /// Whether this task is available on the given challenge day.
    pub fn available_on(&self, day: u8) -> bool {
        self.unlocked_day <= day
    }
}

/// The full set of task definitions, keyed by pillar.
#[derive(Debug, Clone, Default)]
pub struct TaskCatalog {
    tasks: HashMap<Pillar, Vec<Task>>,
}

impl TaskCatalog {
    /// Empty catalog, for tests that supply their own tasks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task definition for a pillar.
    pub fn add(&mut self, pillar: Pillar, task: Task) {
        self.tasks.entry(pillar).or_default().push(task);
    }

    /// Every task for a pillar, available or not.
    pub fn tasks_for(&self, pillar: Pillar) -> &[Task] {
        self.tasks.get(&pillar).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tasks available on the given challenge day.
    pub fn available_on(&self, pillar: Pillar, day: u8) -> Vec<&Task> {
        self.tasks_for(pillar)
            .iter()
            .filter(|t| t.available_on(day))
            .collect()
    }

    /// Whether a task id exists for the pillar (regardless of unlock day).
    pub fn contains(&self, pillar: Pillar, task_id: &str) -> bool {
        self.tasks_for(pillar).iter().any(|t| t.id == task_id)
    }

    /// The catalog shipped with the app: one practice per phase per
    /// pillar, unlocking at days 1, 6, 11, and 16.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for pillar in Pillar::ALL {
            for (unlocked_day, name, description) in builtin_tasks(pillar) {
                let task = Task {
                    id: format!("{}-d{}", pillar.as_str(), unlocked_day),
                    name: name.to_string(),
                    description: description.to_string(),
                    unlocked_day,
                    phase: Phase::of_day(unlocked_day),
                };
                catalog.add(pillar, task);
            }
        }
        catalog
    }
}

fn builtin_tasks(pillar: Pillar) -> [(u8, &'static str, &'static str); 4] {
    match pillar {
        Pillar::Breathing => [
            (1, "Morning breaths", "Take 10 slow nasal breaths after waking"),
            (6, "Box breathing", "One round of 4-4-4-4 box breathing"),
            (11, "Extended exhale", "5 minutes of 4-in 8-out breathing"),
            (16, "Breath before meals", "Three slow breaths before each meal"),
        ],
        Pillar::Sleep => [
            (1, "Fixed bedtime", "Go to bed within 30 minutes of your target"),
            (6, "Screen curfew", "No screens for the last 30 minutes before bed"),
            (11, "Dark room", "Sleep in a fully darkened room"),
            (16, "Wind-down ritual", "10-minute wind-down routine before lights out"),
        ],
        Pillar::Nutrition => [
            (1, "Vegetable serving", "Eat at least one serving of vegetables"),
            (6, "Protein at breakfast", "Include a protein source at breakfast"),
            (11, "No late snacking", "Finish eating 2 hours before bed"),
            (16, "Whole-food day", "A full day without ultra-processed food"),
        ],
        Pillar::Movement => [
            (1, "Daily walk", "Walk for at least 15 minutes"),
            (6, "Mobility break", "5 minutes of stretching mid-day"),
            (11, "Strength session", "One bodyweight strength circuit"),
            (16, "Active hour", "Accumulate 60 minutes of movement"),
        ],
        Pillar::Hydration => [
            (1, "Morning glass", "Drink a glass of water on waking"),
            (6, "Carry a bottle", "Keep a water bottle within reach all day"),
            (11, "Swap a drink", "Replace one sugary drink with water"),
            (16, "Two liters", "Reach two liters of water across the day"),
        ],
        Pillar::Mindset => [
            (1, "One gratitude", "Write down one thing you are grateful for"),
            (6, "Two-minute pause", "A two-minute quiet pause before work"),
            (11, "Reframe practice", "Reframe one negative thought in writing"),
            (16, "Evening review", "Review the day's wins for five minutes"),
        ],
        Pillar::Connection => [
            (1, "Reach out", "Send a genuine message to someone you care about"),
            (6, "Undivided attention", "One conversation with no phone in hand"),
            (11, "Shared activity", "Do one activity together with someone"),
            (16, "Express appreciation", "Tell someone specifically why you value them"),
        ],
    }
}
