//! User slice reducer

use std::sync::Arc;

use super::{edit, reset};
use crate::action::Action;
use crate::state::UserState;

pub fn reduce(state: &Arc<UserState>, action: &Action) -> Arc<UserState> {
    match action {
        Action::LoginSuccess { user, .. } => edit(state, |s| s.profile = Some(user.clone())),

        Action::LoadUser | Action::LoadAvatars => edit(state, |s| s.error = None),

        Action::LoadUserSuccess { user } => edit(state, |s| {
            s.profile = Some(user.clone());
            s.error = None;
        }),

        Action::LoadAvatarsSuccess { avatars } => edit(state, |s| {
            s.avatars = avatars.clone();
            s.error = None;
        }),

        Action::LoadUserFailure { error } | Action::LoadAvatarsFailure { error } => {
            edit(state, |s| s.error = Some(error.clone()))
        }

        Action::UpdateUserAvatar { .. } => edit(state, |s| {
            s.avatar_error = None;
            s.avatar_updates_in_flight += 1;
        }),

        Action::UpdateUserAvatarSuccess { user } => edit(state, |s| {
            s.profile = Some(user.clone());
            s.avatar_updates_in_flight = s.avatar_updates_in_flight.saturating_sub(1);
        }),

        Action::UpdateUserAvatarFailure { error } => edit(state, |s| {
            s.avatar_error = Some(error.clone());
            s.avatar_updates_in_flight = s.avatar_updates_in_flight.saturating_sub(1);
        }),

        Action::ClearAvatarError => edit(state, |s| s.avatar_error = None),

        Action::Logout => reset(state),

        Action::Login { .. }
        | Action::LoginFailure { .. }
        | Action::LoadHearths
        | Action::LoadHearthsSuccess { .. }
        | Action::LoadHearthsFailure { .. }
        | Action::AddHearth { .. }
        | Action::UpdateHearth { .. }
        | Action::DeleteHearth { .. }
        | Action::UpdateHearthDetails { .. }
        | Action::CreateHearth
        | Action::CreateHearthSuccess { .. }
        | Action::CreateHearthFailure { .. }
        | Action::SaveHearthDetails { .. }
        | Action::SaveHearthDetailsSuccess { .. }
        | Action::SaveHearthDetailsFailure { .. }
        | Action::RemoveHearth { .. }
        | Action::RemoveHearthSuccess { .. }
        | Action::RemoveHearthFailure { .. } => Arc::clone(state),
    }
}
