//! Best-effort cloud mirror.
//!
//! Local persistence is the source of truth; the remote copy is
//! advisory. Mutations emit a [`SyncPayload`] describing what changed and
//! the [`SyncDispatcher`] attempts delivery on a detached task:
//! fire-and-forget, never awaited for correctness, failures logged and
//! dropped. Nothing here can roll back or block a local write.

pub mod http;

pub use http::HttpSyncClient;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calendar::DateKey;
use crate::challenge::{ChallengeState, Pillar};
use crate::error::SyncError;

/// Description of a local state change, ready for upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncPayload {
    ProfileUpdate {
        name: Option<String>,
        intake_completed: bool,
    },
    PillarScores {
        scores: serde_json::Value,
    },
    DailyLog {
        date: DateKey,
        streak: u32,
        total_days_logged: u32,
    },
    ChallengeProgress {
        pillar: Pillar,
        state: ChallengeState,
    },
    ChallengeTasks {
        pillar: Pillar,
        date: DateKey,
        task_ids: Vec<String>,
    },
    BookProgress {
        read_chapters: serde_json::Value,
    },
    /// Full-state upload, used after migration or reset.
    Bulk {
        snapshot: serde_json::Value,
    },
}

impl SyncPayload {
    /// Short kind tag, used for endpoint routing and log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            SyncPayload::ProfileUpdate { .. } => "profile",
            SyncPayload::PillarScores { .. } => "pillar_scores",
            SyncPayload::DailyLog { .. } => "daily_log",
            SyncPayload::ChallengeProgress { .. } => "challenge_progress",
            SyncPayload::ChallengeTasks { .. } => "challenge_tasks",
            SyncPayload::BookProgress { .. } => "book_progress",
            SyncPayload::Bulk { .. } => "bulk",
        }
    }
}

/// Delivery backend for the cloud mirror. Implementations must swallow
/// nothing: errors are returned so the dispatcher can log them, but the
/// dispatcher is the only caller and it drops them.
#[async_trait]
pub trait CloudSync: Send + Sync {
    async fn deliver(&self, user_id: &str, payload: SyncPayload) -> Result<(), SyncError>;
}

/// No-op backend for tests and offline operation.
#[derive(Debug, Default)]
pub struct NullSync;

#[async_trait]
impl CloudSync for NullSync {
    async fn deliver(&self, _user_id: &str, _payload: SyncPayload) -> Result<(), SyncError> {
        Ok(())
    }
}

/// Fire-and-forget outbox dispatcher.
#[derive(Clone)]
pub struct SyncDispatcher {
    client: Option<Arc<dyn CloudSync>>,
}

impl SyncDispatcher {
    /// Dispatcher that drops every event (sync disabled).
    pub fn disabled() -> Self {
        Self { client: None }
    }

    /// Dispatcher delivering through the given backend.
    pub fn new(client: Arc<dyn CloudSync>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Issue a delivery attempt and return immediately.
    ///
    /// The attempt runs on a detached task; its outcome is logged and
    /// dropped. There is no retry, cancellation, or timeout contract.
    pub fn dispatch(&self, user_id: &str, payload: SyncPayload) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let user_id = user_id.to_string();
        let kind = payload.kind();
        tokio::spawn(async move {
            match client.deliver(&user_id, payload).await {
                Ok(()) => debug!(kind, "sync delivered"),
                Err(e) => warn!(kind, error = %e, "sync delivery failed, dropping"),
            }
        });
    }
}
