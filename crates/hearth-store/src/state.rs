//! State tree
//!
//! The store owns one [`AppState`]. Slices sit behind `Arc` so an untouched
//! slice keeps its pointer across dispatches; selectors memoize on that.

use std::collections::BTreeMap;
use std::sync::Arc;

use hearth_core::{AuthToken, Avatar, Hearth, HearthId, ServiceError, User};

/// Root of the state tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub auth: Arc<AuthState>,
    pub user: Arc<UserState>,
    pub hearths: Arc<HearthsState>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Where the login flow currently stands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<AuthToken>,
    pub status: AuthStatus,
    pub error: Option<ServiceError>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated && self.user.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    pub profile: Option<User>,
    pub avatars: Vec<Avatar>,
    /// Set only by a failed avatar update, cleared on the next attempt
    pub avatar_error: Option<ServiceError>,
    pub avatar_updates_in_flight: u32,
    /// Last profile or avatar-list load failure
    pub error: Option<ServiceError>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HearthsState {
    /// Load/insertion order
    pub hearths: Vec<Hearth>,
    /// False until the first successful load
    pub loaded: bool,
    pub loading: bool,
    pub error: Option<ServiceError>,
    /// Hearth id -> number of save/remove requests still in flight
    pub pending: BTreeMap<HearthId, usize>,
}

impl HearthsState {
    pub fn get(&self, id: HearthId) -> Option<&Hearth> {
        self.hearths.iter().find(|h| h.id == id)
    }

    pub fn is_pending(&self, id: HearthId) -> bool {
        self.pending.contains_key(&id)
    }

    pub(crate) fn begin_request(&mut self, id: HearthId) {
        *self.pending.entry(id).or_insert(0) += 1;
    }

    pub(crate) fn finish_request(&mut self, id: HearthId) {
        if let Some(count) = self.pending.get_mut(&id) {
            *count -= 1;
            if *count == 0 {
                self.pending.remove(&id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_tree_is_fully_defined_and_empty() {
        let state = AppState::new();
        assert!(state.auth.user.is_none());
        assert_eq!(state.auth.status, AuthStatus::Anonymous);
        assert!(state.user.avatar_error.is_none());
        assert!(state.hearths.hearths.is_empty());
        assert!(!state.hearths.loaded);
    }

    #[test]
    fn test_pending_counts_overlapping_requests() {
        let mut hearths = HearthsState::default();
        hearths.begin_request(3);
        hearths.begin_request(3);
        hearths.finish_request(3);
        assert!(hearths.is_pending(3));
        hearths.finish_request(3);
        assert!(!hearths.is_pending(3));

        // finishing an unknown id is harmless
        hearths.finish_request(42);
        assert!(hearths.pending.is_empty());
    }

    #[test]
    fn test_is_authenticated_requires_user() {
        let mut auth = AuthState {
            status: AuthStatus::Authenticated,
            ..AuthState::default()
        };
        assert!(!auth.is_authenticated());
        auth.user = Some(User::new(1, "alice"));
        assert!(auth.is_authenticated());
    }
}
