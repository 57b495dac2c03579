//! Key schema for the persistent store.
//!
//! Current keys are namespaced under `everwell.`; the pre-migration legacy
//! layout used flat unnamespaced names. The migration engine maps the
//! latter onto the former exactly once, gated by [`SCHEMA_VERSION`].

/// Current schema version marker value.
pub const SCHEMA_VERSION: &str = "2";

/// Key holding the schema version marker.
pub const KEY_SCHEMA_VERSION: &str = "everwell.schemaVersion";

/// Durable anonymous user identifier (uuid v4).
pub const KEY_USER_ID: &str = "everwell.userId";

pub const KEY_CURRENT_SCREEN: &str = "everwell.currentScreen";
pub const KEY_USER_NAME: &str = "everwell.profile.name";
pub const KEY_INTAKE_COMPLETED: &str = "everwell.intakeCompleted";
pub const KEY_PILLAR_SCORES: &str = "everwell.pillarScores";
pub const KEY_FOCUS_PILLAR: &str = "everwell.focusPillar";

/// Global daily-log streak fields.
pub const KEY_STREAK: &str = "everwell.streak";
pub const KEY_LAST_LOG_DATE: &str = "everwell.lastLogDate";
pub const KEY_TOTAL_DAYS_LOGGED: &str = "everwell.totalDaysLogged";
pub const KEY_LOG_HISTORY: &str = "everwell.logHistory";

/// JSON map keyed by pillar id -> ChallengeState.
pub const KEY_CHALLENGE_STATES: &str = "everwell.challengeStates";

/// JSON map of pillar id -> set of acknowledged milestone days.
pub const KEY_ACKNOWLEDGED_MILESTONES: &str = "everwell.acknowledgedMilestones";

pub const KEY_READ_CHAPTERS: &str = "everwell.readChapters";
pub const KEY_THEME: &str = "everwell.theme";

/// Legacy (pre-migration) flat keys.
pub mod legacy {
    pub const CURRENT_SCREEN: &str = "currentScreen";
    pub const USER_NAME: &str = "userName";
    pub const FOCUS_PILLAR: &str = "focusPillar";
    /// Boolean string ("true"/"false").
    pub const IS_LOGGED_TODAY: &str = "isLoggedToday";
    pub const STREAK: &str = "streak";
    pub const CHALLENGE_STATES: &str = "challengeStates";
    pub const READ_CHAPTERS: &str = "readChapters";

    /// Every legacy key, in the order the migration reads them.
    pub const ALL: [&str; 7] = [
        CURRENT_SCREEN,
        USER_NAME,
        FOCUS_PILLAR,
        IS_LOGGED_TODAY,
        STREAK,
        CHALLENGE_STATES,
        READ_CHAPTERS,
    ];
}
