//! Headless mode - drive the store from an NDJSON action script
//!
//! Input is one action per line in the store's JSON form
//! (`{"type": "...", "payload": {...}}`). Blank lines and lines starting with
//! `#` are skipped. Output is NDJSON, one event per line:
//!
//! ```json
//! {"event":"dispatched","line":1,"action":"login","timestamp":1704700001000}
//! {"event":"snapshot","line":1,"state":{"authenticated":true,...},"timestamp":1704700001002}
//! {"event":"rejected","line":2,"message":"Action rejected: ...","timestamp":1704700001003}
//! ```

pub mod runner;

use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use hearth_core::prelude::*;
use hearth_core::{Hearth, HearthId};
use hearth_store::{AppState, AuthStatus};

pub use runner::{demo_backend, run_headless};

/// Events emitted in headless mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// A script line was accepted and dispatched
    Dispatched {
        line: usize,
        action: String,
        timestamp: i64,
    },

    /// A script line could not be parsed into an action
    Rejected {
        line: usize,
        message: String,
        timestamp: i64,
    },

    /// State after the line and every effect it triggered have settled
    Snapshot {
        line: usize,
        state: StateSnapshot,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Write this event as one NDJSON line
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let json = serde_json::to_string(self)?;
        writeln!(out, "{}", json)?;
        out.flush()?;
        Ok(())
    }

    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn dispatched(line: usize, action: &str) -> Self {
        Self::Dispatched {
            line,
            action: action.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn rejected(line: usize, error: &Error) -> Self {
        Self::Rejected {
            line,
            message: error.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn snapshot(line: usize, state: &AppState) -> Self {
        Self::Snapshot {
            line,
            state: StateSnapshot::from(state),
            timestamp: Self::now(),
        }
    }
}

/// Flat, serializable view of the state tree
///
/// Leaves out the auth token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSnapshot {
    pub authenticated: bool,
    pub auth_failed: bool,
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub avatar_error: Option<String>,
    pub avatars: Vec<String>,
    pub hearths: Vec<Hearth>,
    pub hearths_error: Option<String>,
    pub pending: Vec<HearthId>,
}

impl From<&AppState> for StateSnapshot {
    fn from(state: &AppState) -> Self {
        let profile = state.user.profile.as_ref().or(state.auth.user.as_ref());
        Self {
            authenticated: state.auth.is_authenticated(),
            auth_failed: state.auth.status == AuthStatus::Failed,
            username: profile.map(|u| u.username.clone()),
            avatar: profile.map(|u| u.avatar.clone()),
            avatar_error: state.user.avatar_error.as_ref().map(|e| e.to_string()),
            avatars: state.user.avatars.iter().map(|a| a.name.clone()).collect(),
            hearths: state.hearths.hearths.clone(),
            hearths_error: state.hearths.error.as_ref().map(|e| e.to_string()),
            pending: state.hearths.pending.keys().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::User;

    #[test]
    fn test_event_serializes_with_tag() {
        let mut out = Vec::new();
        HeadlessEvent::dispatched(3, "loadHearths")
            .write_to(&mut out)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["event"], "dispatched");
        assert_eq!(value["line"], 3);
        assert_eq!(value["action"], "loadHearths");
        assert!(out.ends_with(b"\n"));
    }

    #[test]
    fn test_snapshot_prefers_profile_over_auth_user() {
        let mut state = AppState::new();
        std::sync::Arc::make_mut(&mut state.auth).user = Some(User::new(1, "alice"));
        std::sync::Arc::make_mut(&mut state.user).profile =
            Some(User::new(1, "alice").with_avatar("fox"));

        let snapshot = StateSnapshot::from(&state);

        assert_eq!(snapshot.username.as_deref(), Some("alice"));
        assert_eq!(snapshot.avatar.as_deref(), Some("fox"));
        assert!(!snapshot.authenticated);
    }
}
