//! Login and current-user effects

use std::sync::Arc;

use futures_util::FutureExt;

use super::{settle, Effect, EffectFuture};
use crate::action::Action;
use crate::services::AuthService;

pub struct AuthEffects<S> {
    service: Arc<S>,
}

impl<S> AuthEffects<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }
}

impl<S> Effect for AuthEffects<S>
where
    S: AuthService + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "auth"
    }

    fn react(&self, action: &Action) -> Option<EffectFuture> {
        let service = Arc::clone(&self.service);
        match action {
            Action::Login { credentials } => {
                let credentials = credentials.clone();
                Some(
                    async move {
                        settle(
                            service.login(credentials).await,
                            |(user, token)| Action::LoginSuccess { user, token },
                            |error| Action::LoginFailure { error },
                        )
                    }
                    .boxed(),
                )
            }
            Action::LoadUser => Some(
                async move {
                    settle(
                        service.current_user().await,
                        |user| Action::LoadUserSuccess { user },
                        |error| Action::LoadUserFailure { error },
                    )
                }
                .boxed(),
            ),
            _ => None,
        }
    }
}
