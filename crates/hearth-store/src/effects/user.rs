//! Avatar effects
//!
//! Overlapping `UpdateUserAvatar` intents are not cancelled: each one runs to
//! completion and produces its own outcome.

use std::sync::Arc;

use futures_util::FutureExt;
use hearth_core::prelude::*;

use super::{settle, Effect, EffectFuture};
use crate::action::Action;
use crate::services::AvatarService;

pub struct UserEffects<S> {
    service: Arc<S>,
}

impl<S> UserEffects<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }
}

impl<S> Effect for UserEffects<S>
where
    S: AvatarService + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "user"
    }

    fn react(&self, action: &Action) -> Option<EffectFuture> {
        let service = Arc::clone(&self.service);
        match action {
            Action::LoadAvatars => Some(
                async move {
                    settle(
                        service.get_avatars().await,
                        |avatars| Action::LoadAvatarsSuccess { avatars },
                        |error| Action::LoadAvatarsFailure { error },
                    )
                }
                .boxed(),
            ),
            Action::UpdateUserAvatar { avatar_name } => {
                let avatar_name = avatar_name.clone();
                Some(
                    async move {
                        debug!("Updating avatar to {}", avatar_name);
                        settle(
                            service.update_avatar(avatar_name).await,
                            |user| Action::UpdateUserAvatarSuccess { user },
                            |error| Action::UpdateUserAvatarFailure { error },
                        )
                    }
                    .boxed(),
                )
            }
            _ => None,
        }
    }
}
