//! Auth slice reducer

use std::sync::Arc;

use hearth_core::User;

use super::{edit, reset};
use crate::action::Action;
use crate::state::{AuthState, AuthStatus};

pub fn reduce(state: &Arc<AuthState>, action: &Action) -> Arc<AuthState> {
    match action {
        Action::Login { .. } => edit(state, |s| {
            s.status = AuthStatus::Authenticating;
            s.error = None;
        }),

        Action::LoginSuccess { user, token } => edit(state, |s| {
            s.user = Some(user.clone());
            s.token = Some(token.clone());
            s.status = AuthStatus::Authenticated;
            s.error = None;
        }),

        Action::LoginFailure { error } => edit(state, |s| {
            s.user = None;
            s.token = None;
            s.status = AuthStatus::Failed;
            s.error = Some(error.clone());
        }),

        Action::Logout => reset(state),

        // A fresher copy of the signed-in user
        Action::LoadUserSuccess { user } | Action::UpdateUserAvatarSuccess { user } => {
            edit(state, |s| refresh_user(s, user))
        }

        Action::LoadUser
        | Action::LoadUserFailure { .. }
        | Action::LoadAvatars
        | Action::LoadAvatarsSuccess { .. }
        | Action::LoadAvatarsFailure { .. }
        | Action::UpdateUserAvatar { .. }
        | Action::UpdateUserAvatarFailure { .. }
        | Action::ClearAvatarError
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

fn refresh_user(state: &mut AuthState, user: &User) {
    if let Some(current) = state.user.as_mut() {
        if current.id == user.id {
            *current = user.clone();
        }
    }
}
