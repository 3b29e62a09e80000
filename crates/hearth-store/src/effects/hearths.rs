//! Hearth collection effects

use std::sync::Arc;

use futures_util::FutureExt;

use super::{settle, Effect, EffectFuture};
use crate::action::Action;
use crate::services::HearthService;

pub struct HearthsEffects<S> {
    service: Arc<S>,
}

impl<S> HearthsEffects<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }
}

impl<S> Effect for HearthsEffects<S>
where
    S: HearthService + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "hearths"
    }

    fn react(&self, action: &Action) -> Option<EffectFuture> {
        let service = Arc::clone(&self.service);
        let future = match action {
            Action::LoadHearths => async move {
                settle(
                    service.list_hearths().await,
                    |hearths| Action::LoadHearthsSuccess { hearths },
                    |error| Action::LoadHearthsFailure { error },
                )
            }
            .boxed(),

            Action::CreateHearth => async move {
                settle(
                    service.create_hearth().await,
                    |hearth| Action::CreateHearthSuccess { hearth },
                    |error| Action::CreateHearthFailure { error },
                )
            }
            .boxed(),

            Action::SaveHearthDetails { hearth_id, updates } => {
                let (hearth_id, updates) = (*hearth_id, updates.clone());
                async move {
                    settle(
                        service.update_hearth(hearth_id, updates).await,
                        |hearth| Action::SaveHearthDetailsSuccess { hearth },
                        |error| Action::SaveHearthDetailsFailure { hearth_id, error },
                    )
                }
                .boxed()
            }

            Action::RemoveHearth { hearth_id } => {
                let hearth_id = *hearth_id;
                async move {
                    settle(
                        service.delete_hearth(hearth_id).await,
                        |()| Action::RemoveHearthSuccess { hearth_id },
                        |error| Action::RemoveHearthFailure { hearth_id, error },
                    )
                }
                .boxed()
            }

            _ => return None,
        };
        Some(future)
    }
}
