//! One-shot upgrade from the legacy flat key layout.
//!
//! Early builds persisted a handful of unnamespaced keys. This module
//! moves them under the `everwell.` namespace exactly once, gated by the
//! stored schema-version marker: once the marker matches
//! [`keys::SCHEMA_VERSION`] the migration is a true no-op and legacy keys
//! are never read again.
//!
//! Unreadable or malformed legacy values degrade to never-set (with a
//! warning); the migration still marks itself complete so it is not
//! retried indefinitely.

use std::collections::BTreeMap;

use tracing::warn;
use uuid::Uuid;

use crate::calendar::DateKey;
use crate::challenge::ChallengeState;
use crate::error::Result;
use crate::store::{keys, keys::legacy, KvStore};

/// What a migration run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// False when the schema version already matched (no-op).
    pub performed: bool,
    /// Legacy fields carried into the namespaced layout.
    pub carried: Vec<&'static str>,
    /// Whether daily-log fields were synthesized from `isLoggedToday`.
    pub synthesized_daily_log: bool,
}

/// Read the anonymous user id, creating it if absent.
pub async fn ensure_user_id<S: KvStore + ?Sized>(store: &S) -> Result<String> {
    if let Some(id) = store.get(keys::KEY_USER_ID).await? {
        return Ok(id);
    }
    let id = Uuid::new_v4().to_string();
    store.set(keys::KEY_USER_ID, &id).await?;
    Ok(id)
}

/// Upgrade the legacy flat key layout to the current namespaced layout.
///
/// Safe to invoke on every app start. `today` is only used to synthesize
/// daily-log fields from a legacy `isLoggedToday = "true"` flag.
pub async fn migrate<S: KvStore + ?Sized>(store: &S, today: DateKey) -> Result<MigrationReport> {
    if store.get(keys::KEY_SCHEMA_VERSION).await?.as_deref() == Some(keys::SCHEMA_VERSION) {
        return Ok(MigrationReport::default());
    }

    // A failed legacy read degrades every field to never-set; the
    // migration still completes so it is not retried forever.
    let legacy_values = match store.batch_get(&legacy::ALL).await {
        Ok(values) => values,
        Err(e) => {
            warn!(error = %e, "legacy keys unreadable, migrating with defaults");
            vec![None; legacy::ALL.len()]
        }
    };
    let legacy_map: BTreeMap<&str, String> = legacy::ALL
        .iter()
        .zip(legacy_values)
        .filter_map(|(k, v)| v.map(|v| (*k, v)))
        .collect();

    let mut report = MigrationReport {
        performed: true,
        ..Default::default()
    };
    let mut entries: Vec<(String, String)> = Vec::new();
    let mut carry = |field: &'static str, key: &str, value: String| {
        entries.push((key.to_string(), value));
        report.carried.push(field);
    };

    if let Some(v) = legacy_map.get(legacy::CURRENT_SCREEN) {
        carry(legacy::CURRENT_SCREEN, keys::KEY_CURRENT_SCREEN, v.clone());
    }
    if let Some(v) = legacy_map.get(legacy::USER_NAME) {
        carry(legacy::USER_NAME, keys::KEY_USER_NAME, v.clone());
    }
    if let Some(v) = legacy_map.get(legacy::FOCUS_PILLAR) {
        carry(legacy::FOCUS_PILLAR, keys::KEY_FOCUS_PILLAR, v.clone());
    }
    if let Some(v) = legacy_map.get(legacy::STREAK) {
        match v.parse::<u32>() {
            Ok(_) => carry(legacy::STREAK, keys::KEY_STREAK, v.clone()),
            Err(_) => warn!(value = %v, "legacy streak not a number, dropping"),
        }
    }
    if let Some(v) = legacy_map.get(legacy::CHALLENGE_STATES) {
        match serde_json::from_str::<BTreeMap<String, ChallengeState>>(v) {
            Ok(_) => carry(
                legacy::CHALLENGE_STATES,
                keys::KEY_CHALLENGE_STATES,
                v.clone(),
            ),
            Err(e) => warn!(error = %e, "legacy challengeStates unparseable, dropping"),
        }
    }
    if let Some(v) = legacy_map.get(legacy::READ_CHAPTERS) {
        match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(v) {
            Ok(_) => carry(legacy::READ_CHAPTERS, keys::KEY_READ_CHAPTERS, v.clone()),
            Err(e) => warn!(error = %e, "legacy readChapters unparseable, dropping"),
        }
    }

    // The legacy layout only kept a boolean for "logged today"; turn it
    // into the full daily-log shape.
    if legacy_map.get(legacy::IS_LOGGED_TODAY).map(String::as_str) == Some("true") {
        entries.push((keys::KEY_LAST_LOG_DATE.to_string(), today.to_string()));
        entries.push((keys::KEY_TOTAL_DAYS_LOGGED.to_string(), "1".to_string()));
        let history = serde_json::json!({ today.to_string(): true });
        entries.push((keys::KEY_LOG_HISTORY.to_string(), history.to_string()));
        report.synthesized_daily_log = true;
    }

    store.batch_set(&entries).await?;
    for key in legacy::ALL {
        store.remove(key).await?;
    }

    ensure_user_id(store).await?;
    store
        .set(keys::KEY_SCHEMA_VERSION, keys::SCHEMA_VERSION)
        .await?;

    Ok(report)
}
