//! Reducer module - pure state transitions, one per slice
//!
//! Organized into submodules:
//! - `auth`: login status, token and the authenticated user
//! - `user`: profile, avatar list and avatar error
//! - `hearths`: the ordered hearth collection
//!
//! Each slice reducer takes `(&Arc<Slice>, &Action)` and returns the next
//! `Arc<Slice>`. When nothing changes, the input `Arc` is handed back so
//! callers can detect the no-op with `Arc::ptr_eq`.

pub(crate) mod auth;
pub(crate) mod hearths;
pub(crate) mod user;


use std::sync::Arc;

use crate::action::Action;
use crate::state::AppState;

/// Combined reducer over the whole tree
///
/// Returns `state` itself when no slice changed.
pub fn reduce(state: &Arc<AppState>, action: &Action) -> Arc<AppState> {
    let auth = auth::reduce(&state.auth, action);
    let user = user::reduce(&state.user, action);
    let hearths = hearths::reduce(&state.hearths, action);

    if Arc::ptr_eq(&auth, &state.auth)
        && Arc::ptr_eq(&user, &state.user)
        && Arc::ptr_eq(&hearths, &state.hearths)
    {
        return Arc::clone(state);
    }

    Arc::new(AppState {
        auth,
        user,
        hearths,
    })
}

/// Apply `edit` to a copy of the slice; keep the original `Arc` if the
/// edit turned out to be a no-op.
pub(crate) fn edit<S, F>(state: &Arc<S>, edit: F) -> Arc<S>
where
    S: Clone + PartialEq,
    F: FnOnce(&mut S),
{
    let mut next = S::clone(state);
    edit(&mut next);
    if next == **state {
        Arc::clone(state)
    } else {
        Arc::new(next)
    }
}

/// Replace a slice with its initial value
pub(crate) fn reset<S>(state: &Arc<S>) -> Arc<S>
where
    S: Clone + Default + PartialEq,
{
    edit(state, |s| *s = S::default())
}
