//! Engine facade over the store, trackers, and sync outbox.
//!
//! [`ProgressEngine`] is the only surface the UI layer calls. Every
//! mutation follows the same shape: load the affected state slice
//! (defaulting on malformed JSON), apply the tracker operation, persist,
//! then emit a fire-and-forget sync event. Store failures abort the
//! operation before anything is persisted; sync failures never surface.

use std::collections::{BTreeMap, BTreeSet};

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::calendar::{today, DateKey};
use crate::challenge::{ChallengeState, CheckOutcome, Pillar, TaskCatalog};
use crate::daily_log::{DailyLogState, LoadEvaluation};
use crate::error::Result;
use crate::migration::{self, MigrationReport};
use crate::milestones::{self, Milestone};
use crate::store::{keys, KvStore};
use crate::sync::{SyncDispatcher, SyncPayload};

/// Result of a check-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOutcome {
    /// True when the check-in was a no-op because today was already logged.
    pub already_logged: bool,
    /// Daily log state after the call.
    pub state: DailyLogState,
}

/// The progress & streak engine.
///
/// Single logical writer: each operation runs to completion, including
/// its persistence write, before the caller issues the next one.
pub struct ProgressEngine<S: KvStore> {
    store: S,
    catalog: TaskCatalog,
    sync: SyncDispatcher,
    user_id: String,
}

impl<S: KvStore> ProgressEngine<S> {
    /// Run the schema migration, ensure the anonymous user id, and build
    /// the engine. Safe to call on every app start.
    pub async fn initialize(
        store: S,
        catalog: TaskCatalog,
        sync: SyncDispatcher,
    ) -> Result<(Self, MigrationReport)> {
        let report = migration::migrate(&store, today()).await?;
        let user_id = migration::ensure_user_id(&store).await?;
        Ok((
            Self {
                store,
                catalog,
                sync,
                user_id,
            },
            report,
        ))
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn catalog(&self) -> &TaskCatalog {
        &self.catalog
    }

    /// Parse a persisted JSON value, degrading to the default on failure.
    fn parse_or_default<T: DeserializeOwned + Default>(key: &str, raw: Option<String>) -> T {
        match raw {
            None => T::default(),
            Some(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                warn!(key, error = %e, "malformed persisted value, using default");
                T::default()
            }),
        }
    }

    // ---- daily log ----

    /// Load the global daily log from its per-field keys.
    pub async fn daily_log(&self) -> Result<DailyLogState> {
        let raw = self
            .store
            .batch_get(&[
                keys::KEY_STREAK,
                keys::KEY_LAST_LOG_DATE,
                keys::KEY_TOTAL_DAYS_LOGGED,
                keys::KEY_LOG_HISTORY,
            ])
            .await?;

        let streak = raw[0]
            .as_deref()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(0);
        let last_log_date = raw[1].as_deref().and_then(|s| {
            s.parse::<DateKey>()
                .map_err(|e| warn!(value = s, error = %e, "malformed lastLogDate, ignoring"))
                .ok()
        });
        let total_days_logged = raw[2]
            .as_deref()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(0);
        let log_history: BTreeMap<DateKey, bool> =
            Self::parse_or_default(keys::KEY_LOG_HISTORY, raw[3].clone());

        Ok(DailyLogState {
            streak,
            total_days_logged,
            last_log_date,
            log_history,
        })
    }

    async fn persist_daily_log(&self, state: &DailyLogState) -> Result<()> {
        let mut entries = vec![
            (keys::KEY_STREAK.to_string(), state.streak.to_string()),
            (
                keys::KEY_TOTAL_DAYS_LOGGED.to_string(),
                state.total_days_logged.to_string(),
            ),
            (
                keys::KEY_LOG_HISTORY.to_string(),
                serde_json::to_string(&state.log_history)?,
            ),
        ];
        if let Some(d) = state.last_log_date {
            entries.push((keys::KEY_LAST_LOG_DATE.to_string(), d.to_string()));
        }
        self.store.batch_set(&entries).await?;
        Ok(())
    }

    /// Re-evaluate the streak for the current date. Never cached; call it
    /// every time the app becomes active.
    pub async fn evaluate_on_load(&self) -> Result<(DailyLogState, LoadEvaluation)> {
        let state = self.daily_log().await?;
        let eval = state.evaluate_on_load(today());
        Ok((state, eval))
    }

    /// Record today's check-in, guarded against double-logging.
    pub async fn log_today(&self) -> Result<LogOutcome> {
        let mut state = self.daily_log().await?;
        let eval = state.evaluate_on_load(today());
        if eval.is_logged_today {
            return Ok(LogOutcome {
                already_logged: true,
                state,
            });
        }

        state.log_today(today());
        self.persist_daily_log(&state).await?;
        self.sync.dispatch(
            &self.user_id,
            SyncPayload::DailyLog {
                date: today(),
                streak: state.streak,
                total_days_logged: state.total_days_logged,
            },
        );
        Ok(LogOutcome {
            already_logged: false,
            state,
        })
    }

    // ---- challenges ----

    /// All per-pillar challenge states. Pillars never touched are absent.
    pub async fn challenge_states(&self) -> Result<BTreeMap<Pillar, ChallengeState>> {
        let raw = self.store.get(keys::KEY_CHALLENGE_STATES).await?;
        Ok(Self::parse_or_default(keys::KEY_CHALLENGE_STATES, raw))
    }

    /// One pillar's challenge state, defaulted if never touched.
    pub async fn challenge_state(&self, pillar: Pillar) -> Result<ChallengeState> {
        let mut states = self.challenge_states().await?;
        Ok(states.remove(&pillar).unwrap_or_default())
    }

    async fn persist_challenge_states(
        &self,
        states: &BTreeMap<Pillar, ChallengeState>,
    ) -> Result<()> {
        self.store
            .set(
                keys::KEY_CHALLENGE_STATES,
                &serde_json::to_string(states)?,
            )
            .await?;
        Ok(())
    }

    /// Toggle a challenge task for today, advancing the day when the
    /// toggle completes the last available task.
    pub async fn check_task(&self, pillar: Pillar, task_id: &str) -> Result<CheckOutcome> {
        let mut states = self.challenge_states().await?;
        let state = states.entry(pillar).or_default();
        let outcome = state.check_task(&self.catalog, pillar, task_id, today())?;

        let snapshot = state.clone();
        self.persist_challenge_states(&states).await?;

        self.sync.dispatch(
            &self.user_id,
            SyncPayload::ChallengeTasks {
                pillar,
                date: today(),
                task_ids: snapshot.tasks_done_on(today()).into_iter().collect(),
            },
        );
        if outcome.advanced {
            self.sync.dispatch(
                &self.user_id,
                SyncPayload::ChallengeProgress {
                    pillar,
                    state: snapshot,
                },
            );
        }
        Ok(outcome)
    }

    /// Privileged day override; see [`ChallengeState::set_challenge_day`].
    pub async fn set_challenge_day(&self, pillar: Pillar, day: u8) -> Result<ChallengeState> {
        let mut states = self.challenge_states().await?;
        let state = states.entry(pillar).or_default();
        state.set_challenge_day(day)?;
        let snapshot = state.clone();
        self.persist_challenge_states(&states).await?;
        Ok(snapshot)
    }

    // ---- milestones ----

    /// Milestones reached by a pillar's current day.
    pub async fn milestones(&self, pillar: Pillar) -> Result<Vec<Milestone>> {
        let state = self.challenge_state(pillar).await?;
        Ok(milestones::reached(state.current_day))
    }

    /// Milestone days already acknowledged per pillar.
    pub async fn acknowledged_milestones(&self) -> Result<BTreeMap<Pillar, BTreeSet<u8>>> {
        let raw = self.store.get(keys::KEY_ACKNOWLEDGED_MILESTONES).await?;
        Ok(Self::parse_or_default(keys::KEY_ACKNOWLEDGED_MILESTONES, raw))
    }

    /// Record that a milestone banner was shown, so the UI can suppress
    /// repeats. Acknowledging an unreached or repeated milestone is
    /// harmless.
    pub async fn acknowledge_milestone(&self, pillar: Pillar, day: u8) -> Result<()> {
        let mut acked = self.acknowledged_milestones().await?;
        acked.entry(pillar).or_default().insert(day);
        self.store
            .set(
                keys::KEY_ACKNOWLEDGED_MILESTONES,
                &serde_json::to_string(&acked)?,
            )
            .await?;
        Ok(())
    }

    // ---- profile & content passthrough ----

    pub async fn focus_pillar(&self) -> Result<Option<Pillar>> {
        let raw = self.store.get(keys::KEY_FOCUS_PILLAR).await?;
        Ok(raw.and_then(|s| s.parse().ok()))
    }

    pub async fn set_focus_pillar(&self, pillar: Pillar) -> Result<()> {
        self.store
            .set(keys::KEY_FOCUS_PILLAR, pillar.as_str())
            .await?;
        Ok(())
    }

    /// Raw pillar-scores document; scoring arithmetic lives elsewhere.
    pub async fn pillar_scores(&self) -> Result<serde_json::Value> {
        let raw = self.store.get(keys::KEY_PILLAR_SCORES).await?;
        Ok(Self::parse_or_default(keys::KEY_PILLAR_SCORES, raw))
    }

    pub async fn set_pillar_scores(&self, scores: serde_json::Value) -> Result<()> {
        self.store
            .set(keys::KEY_PILLAR_SCORES, &scores.to_string())
            .await?;
        self.sync
            .dispatch(&self.user_id, SyncPayload::PillarScores { scores });
        Ok(())
    }

    pub async fn read_chapters(&self) -> Result<serde_json::Value> {
        let raw = self.store.get(keys::KEY_READ_CHAPTERS).await?;
        Ok(Self::parse_or_default(keys::KEY_READ_CHAPTERS, raw))
    }

    pub async fn set_read_chapters(&self, chapters: serde_json::Value) -> Result<()> {
        self.store
            .set(keys::KEY_READ_CHAPTERS, &chapters.to_string())
            .await?;
        self.sync.dispatch(
            &self.user_id,
            SyncPayload::BookProgress {
                read_chapters: chapters,
            },
        );
        Ok(())
    }

    // ---- reset ----

    /// Full reset: every state key back to defaults. The anonymous user
    /// id and the schema version marker survive.
    pub async fn reset_all(&self) -> Result<()> {
        for key in [
            keys::KEY_CURRENT_SCREEN,
            keys::KEY_USER_NAME,
            keys::KEY_INTAKE_COMPLETED,
            keys::KEY_PILLAR_SCORES,
            keys::KEY_FOCUS_PILLAR,
            keys::KEY_STREAK,
            keys::KEY_LAST_LOG_DATE,
            keys::KEY_TOTAL_DAYS_LOGGED,
            keys::KEY_LOG_HISTORY,
            keys::KEY_CHALLENGE_STATES,
            keys::KEY_ACKNOWLEDGED_MILESTONES,
            keys::KEY_READ_CHAPTERS,
            keys::KEY_THEME,
        ] {
            self.store.remove(key).await?;
        }
        self.sync.dispatch(
            &self.user_id,
            SyncPayload::Bulk {
                snapshot: serde_json::json!({ "reset": true }),
            },
        );
        Ok(())
    }
}
