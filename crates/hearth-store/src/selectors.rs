//! Selectors - memoized projections out of the state tree
//!
//! Plain `select_*` functions borrow straight from an [`AppState`] and are
//! fine for one-off reads. [`Selector`] values memoize on the `Arc` of their
//! input slice: as long as the slice pointer is unchanged they hand back the
//! same `Arc<T>`, so downstream consumers can compare with `Arc::ptr_eq`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hearth_core::{Avatar, Hearth, HearthId, ServiceError, User};

use crate::state::{AppState, AuthState, AuthStatus, HearthsState, UserState};

// ─────────────────────────────────────────────────────────
// Slice getters and plain projections
// ─────────────────────────────────────────────────────────

pub fn select_auth(state: &AppState) -> &Arc<AuthState> {
    &state.auth
}

pub fn select_user_state(state: &AppState) -> &Arc<UserState> {
    &state.user
}

pub fn select_hearths_state(state: &AppState) -> &Arc<HearthsState> {
    &state.hearths
}

/// The authenticated user (`state.auth.user`)
pub fn select_user(state: &AppState) -> Option<&User> {
    state.auth.user.as_ref()
}

/// Last avatar update failure (`state.user.avatar_error`)
pub fn select_user_avatar_error(state: &AppState) -> Option<&ServiceError> {
    state.user.avatar_error.as_ref()
}

pub fn select_hearth_list(state: &AppState) -> &[Hearth] {
    &state.hearths.hearths
}

// ─────────────────────────────────────────────────────────
// Memoized selectors
// ─────────────────────────────────────────────────────────

trait Project<T>: Send + Sync {
    fn project(&self, state: &AppState) -> Arc<T>;
}

/// A memoized projection producing `Arc<T>`
///
/// Clones share one cache.
pub struct Selector<T> {
    inner: Arc<dyn Project<T>>,
}

impl<T> Clone for Selector<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + Sync + 'static> Selector<T> {
    /// Run the selector against `state`
    pub fn select(&self, state: &AppState) -> Arc<T> {
        self.inner.project(state)
    }

    /// Derive a selector from this one, memoized on this selector's output
    pub fn map<U, F>(self, f: F) -> Selector<U>
    where
        U: Send + Sync + 'static,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        Selector {
            inner: Arc::new(Derived {
                parent: self,
                project: f,
                cache: Mutex::new(None),
            }),
        }
    }
}

/// Build a selector reading one slice and projecting it with `project`
pub fn create_selector<S, T, F>(input: fn(&AppState) -> &Arc<S>, project: F) -> Selector<T>
where
    S: Send + Sync + 'static,
    T: Send + Sync + 'static,
    F: Fn(&S) -> T + Send + Sync + 'static,
{
    Selector {
        inner: Arc::new(SliceMemo {
            input,
            project,
            cache: Mutex::new(None),
        }),
    }
}

/// Memo keyed on the input `Arc`; holding the `Arc` (not a raw address)
/// keeps a freed-and-reused allocation from looking like a cache hit.
type Memo<I, T> = Mutex<Option<(Arc<I>, Arc<T>)>>;

fn lock<I, T>(memo: &Memo<I, T>) -> MutexGuard<'_, Option<(Arc<I>, Arc<T>)>> {
    memo.lock().unwrap_or_else(PoisonError::into_inner)
}

fn memoized<I, T>(memo: &Memo<I, T>, input: &Arc<I>, compute: impl FnOnce(&I) -> T) -> Arc<T> {
    let mut cache = lock(memo);
    if let Some((seen, output)) = cache.as_ref() {
        if Arc::ptr_eq(seen, input) {
            return Arc::clone(output);
        }
    }
    let output = Arc::new(compute(input));
    *cache = Some((Arc::clone(input), Arc::clone(&output)));
    output
}

struct SliceMemo<S, T, F> {
    input: fn(&AppState) -> &Arc<S>,
    project: F,
    cache: Memo<S, T>,
}

impl<S, T, F> Project<T> for SliceMemo<S, T, F>
where
    S: Send + Sync,
    T: Send + Sync,
    F: Fn(&S) -> T + Send + Sync,
{
    fn project(&self, state: &AppState) -> Arc<T> {
        memoized(&self.cache, (self.input)(state), &self.project)
    }
}

struct Derived<P, T, F> {
    parent: Selector<P>,
    project: F,
    cache: Memo<P, T>,
}

impl<P, T, F> Project<T> for Derived<P, T, F>
where
    P: Send + Sync + 'static,
    T: Send + Sync,
    F: Fn(&P) -> T + Send + Sync,
{
    fn project(&self, state: &AppState) -> Arc<T> {
        let parent = self.parent.select(state);
        memoized(&self.cache, &parent, &self.project)
    }
}

// ─────────────────────────────────────────────────────────
// Catalog
// ─────────────────────────────────────────────────────────

/// `state.auth.user`
pub fn user() -> Selector<Option<User>> {
    create_selector(select_auth, |auth| auth.user.clone())
}

/// `state.user.avatar_error`
pub fn user_avatar_error() -> Selector<Option<ServiceError>> {
    create_selector(select_user_state, |user| user.avatar_error.clone())
}

pub fn user_profile() -> Selector<Option<User>> {
    create_selector(select_user_state, |user| user.profile.clone())
}

pub fn avatars() -> Selector<Vec<Avatar>> {
    create_selector(select_user_state, |user| user.avatars.clone())
}

pub fn auth_status() -> Selector<AuthStatus> {
    create_selector(select_auth, |auth| auth.status)
}

pub fn is_authenticated() -> Selector<bool> {
    create_selector(select_auth, AuthState::is_authenticated)
}

pub fn hearths() -> Selector<Vec<Hearth>> {
    create_selector(select_hearths_state, |s| s.hearths.clone())
}

pub fn hearths_loaded() -> Selector<bool> {
    create_selector(select_hearths_state, |s| s.loaded)
}

pub fn hearths_error() -> Selector<Option<ServiceError>> {
    create_selector(select_hearths_state, |s| s.error.clone())
}

/// Number of hearths, derived from [`hearths`]
pub fn hearth_count() -> Selector<usize> {
    hearths().map(Vec::len)
}

pub fn hearth_by_id(id: HearthId) -> Selector<Option<Hearth>> {
    create_selector(select_hearths_state, move |s| s.get(id).cloned())
}

pub fn is_hearth_pending(id: HearthId) -> Selector<bool> {
    create_selector(select_hearths_state, move |s| s.is_pending(id))
}
