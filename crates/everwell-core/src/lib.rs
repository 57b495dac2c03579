//! # Everwell Core Library
//!
//! Core business logic for Everwell's progress & streak engine: daily
//! check-in streaks and per-pillar 21-day challenge progression, both on
//! calendar-day semantics. The CLI binary is a thin layer over this
//! library; a GUI shell would sit on the same surface.
//!
//! ## Architecture
//!
//! - **Calendar**: a `DateKey` value type and canonical today/yesterday;
//!   all progression is calendar-day based, never 24-hour-window based
//! - **Store**: an injected async key-value adapter (in-memory fake and
//!   a JSON-file document store ship with the crate)
//! - **Trackers**: the global daily log and the per-pillar challenge
//!   state machine, pure over an explicit "today"
//! - **Migration**: version-marker-gated upgrade from the legacy flat
//!   key layout
//! - **Sync**: fire-and-forget outbox to the cloud mirror; local
//!   persistence is the source of truth
//!
//! ## Key Components
//!
//! - [`ProgressEngine`]: the facade the UI layer calls
//! - [`DailyLogState`]: global check-in streak state
//! - [`ChallengeState`]: per-pillar 21-day state machine
//! - [`KvStore`]: storage seam

pub mod calendar;
pub mod challenge;
pub mod daily_log;
pub mod engine;
pub mod error;
pub mod migration;
pub mod milestones;
pub mod store;
pub mod sync;

pub use calendar::{today, yesterday, DateKey};
pub use challenge::{ChallengeState, CheckOutcome, Phase, Pillar, Task, TaskCatalog, FINAL_DAY};
pub use daily_log::{DailyLogState, LoadEvaluation, STREAK_CAP};
pub use engine::{LogOutcome, ProgressEngine};
pub use error::{CoreError, Result, StoreError, SyncError, ValidationError};
pub use migration::MigrationReport;
pub use milestones::{Milestone, MILESTONE_DAYS};
pub use store::{JsonFileStore, KvStore, MemoryStore};
pub use sync::{CloudSync, HttpSyncClient, NullSync, SyncDispatcher, SyncPayload};
