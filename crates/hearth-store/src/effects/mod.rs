//! Effects - asynchronous reactions to intent actions
//!
//! An [`Effect`] looks at every dispatched action and, for the intents it
//! owns, returns a future that performs the I/O and resolves to exactly one
//! outcome action. The store spawns that future; the effect itself holds no
//! state besides its service handle.
//!
//! Families:
//! - `auth`: login, current user
//! - `user`: avatar catalog, avatar update
//! - `hearths`: load, create, save details, remove

mod auth;
mod hearths;
mod user;

pub use auth::AuthEffects;
pub use hearths::HearthsEffects;
pub use user::UserEffects;

use std::sync::Arc;

use futures_util::future::BoxFuture;
use hearth_core::ServiceError;

use crate::action::Action;

/// A running effect invocation; resolves to its single outcome action
pub type EffectFuture = BoxFuture<'static, Action>;

/// A long-lived reaction to one family of intents
pub trait Effect: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Return a future for `action` if this effect handles it
    ///
    /// Called once per dispatched action, after the reducer pass.
    fn react(&self, action: &Action) -> Option<EffectFuture>;
}

/// Map a service result onto the matching success or failure action
pub(crate) fn settle<T>(
    result: Result<T, ServiceError>,
    success: impl FnOnce(T) -> Action,
    failure: impl FnOnce(ServiceError) -> Action,
) -> Action {
    match result {
        Ok(value) => success(value),
        Err(error) => failure(error),
    }
}

/// Build the three standard effect families over one backend
pub fn standard_effects<S>(service: Arc<S>) -> Vec<Arc<dyn Effect>>
where
    S: crate::services::AuthService
        + crate::services::AvatarService
        + crate::services::HearthService
        + Send
        + Sync
        + 'static,
{
    vec![
        Arc::new(AuthEffects::new(Arc::clone(&service))),
        Arc::new(UserEffects::new(Arc::clone(&service))),
        Arc::new(HearthsEffects::new(service)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionKind;
    use crate::services::{AvatarService, InMemoryBackend};
    use hearth_core::{Avatar, Hearth, HearthUpdates, User};

    /// Backend whose avatar calls always fail
    struct BrokenAvatars;

    impl AvatarService for BrokenAvatars {
        async fn get_avatars(&self) -> Result<Vec<Avatar>, ServiceError> {
            Err(ServiceError::network("connection refused"))
        }

        async fn update_avatar(&self, _avatar_name: String) -> Result<User, ServiceError> {
            Err(ServiceError::network("connection refused"))
        }
    }

    fn backend() -> Arc<InMemoryBackend> {
        Arc::new(
            InMemoryBackend::new()
                .with_account(User::new(1, "alice"), "pw")
                .with_avatar(Avatar::new(1, "fox"))
                .with_hearth(Hearth::new(10, "Home"), [1]),
        )
    }

    #[test]
    fn test_effects_ignore_actions_they_do_not_own() {
        let effects = standard_effects(backend());
        for effect in &effects {
            assert!(effect.react(&Action::Logout).is_none());
            assert!(effect
                .react(&Action::AddHearth {
                    hearth: Hearth::new(1, "x")
                })
                .is_none());
        }
    }

    #[test]
    fn test_each_intent_is_owned_by_exactly_one_family() {
        let effects = standard_effects(backend());
        let intents = [
            Action::login("alice", "pw"),
            Action::LoadUser,
            Action::LoadAvatars,
            Action::update_user_avatar("fox"),
            Action::LoadHearths,
            Action::CreateHearth,
            Action::SaveHearthDetails {
                hearth_id: 10,
                updates: HearthUpdates::name("Cabin"),
            },
            Action::RemoveHearth { hearth_id: 10 },
        ];
        for intent in intents {
            let owners = effects
                .iter()
                .filter(|e| e.react(&intent).is_some())
                .count();
            assert_eq!(owners, 1, "{}", intent.kind());
        }
    }

    #[tokio::test]
    async fn test_login_effect_produces_success() {
        let effect = AuthEffects::new(backend());
        let outcome = effect.react(&Action::login("alice", "pw")).unwrap().await;
        assert_eq!(outcome.kind(), ActionKind::LoginSuccess);
    }

    #[tokio::test]
    async fn test_login_effect_produces_failure() {
        let effect = AuthEffects::new(backend());
        let outcome = effect.react(&Action::login("alice", "bad")).unwrap().await;
        assert!(matches!(
            outcome,
            Action::LoginFailure {
                error: ServiceError::Unauthorized { .. }
            }
        ));
    }

    #[tokio::test]
    async fn test_avatar_failure_becomes_failure_action() {
        let effect = UserEffects::new(Arc::new(BrokenAvatars));
        let outcome = effect.react(&Action::update_user_avatar("fox")).unwrap().await;
        assert_eq!(
            outcome,
            Action::UpdateUserAvatarFailure {
                error: ServiceError::network("connection refused")
            }
        );
    }

    #[tokio::test]
    async fn test_remove_failure_keeps_hearth_id() {
        let effect = HearthsEffects::new(backend());
        // not logged in
        let outcome = effect
            .react(&Action::RemoveHearth { hearth_id: 10 })
            .unwrap()
            .await;
        assert!(matches!(
            outcome,
            Action::RemoveHearthFailure { hearth_id: 10, .. }
        ));
    }
}
