//! Hearths slice reducer

use std::sync::Arc;

use hearth_core::{Hearth, HearthId, HearthUpdates};

use super::{edit, reset};
use crate::action::Action;
use crate::state::HearthsState;

pub fn reduce(state: &Arc<HearthsState>, action: &Action) -> Arc<HearthsState> {
    match action {
        Action::LoadHearths => edit(state, |s| {
            s.loading = true;
            s.error = None;
        }),

        Action::LoadHearthsSuccess { hearths } => edit(state, |s| {
            s.hearths = hearths.clone();
            s.loaded = true;
            s.loading = false;
            s.error = None;
        }),

        // Keep whatever was loaded before; the error is what changes
        Action::LoadHearthsFailure { error } => edit(state, |s| {
            s.loading = false;
            s.error = Some(error.clone());
        }),

        // No dedup: duplicate ids are the backend's problem
        Action::AddHearth { hearth } | Action::CreateHearthSuccess { hearth } => {
            edit(state, |s| s.hearths.push(hearth.clone()))
        }

        Action::UpdateHearth { hearth } => edit(state, |s| replace_first(&mut s.hearths, hearth)),

        Action::DeleteHearth { hearth_id } => {
            edit(state, |s| s.hearths.retain(|h| h.id != *hearth_id))
        }

        Action::UpdateHearthDetails { hearth_id, updates } => {
            edit(state, |s| merge_details(&mut s.hearths, *hearth_id, updates))
        }

        Action::CreateHearth => edit(state, |s| s.error = None),
        Action::CreateHearthFailure { error } => edit(state, |s| s.error = Some(error.clone())),

        Action::SaveHearthDetails { hearth_id, .. } | Action::RemoveHearth { hearth_id } => {
            edit(state, |s| {
                s.begin_request(*hearth_id);
                s.error = None;
            })
        }

        Action::SaveHearthDetailsSuccess { hearth } => edit(state, |s| {
            replace_first(&mut s.hearths, hearth);
            s.finish_request(hearth.id);
        }),

        Action::RemoveHearthSuccess { hearth_id } => edit(state, |s| {
            s.hearths.retain(|h| h.id != *hearth_id);
            s.finish_request(*hearth_id);
        }),

        Action::SaveHearthDetailsFailure { hearth_id, error }
        | Action::RemoveHearthFailure { hearth_id, error } => edit(state, |s| {
            s.finish_request(*hearth_id);
            s.error = Some(error.clone());
        }),

        Action::Logout => reset(state),

        Action::Login { .. }
        | Action::LoginSuccess { .. }
        | Action::LoginFailure { .. }
        | Action::LoadUser
        | Action::LoadUserSuccess { .. }
        | Action::LoadUserFailure { .. }
        | Action::LoadAvatars
        | Action::LoadAvatarsSuccess { .. }
        | Action::LoadAvatarsFailure { .. }
        | Action::UpdateUserAvatar { .. }
        | Action::UpdateUserAvatarSuccess { .. }
        | Action::UpdateUserAvatarFailure { .. }
        | Action::ClearAvatarError => Arc::clone(state),
    }
}

/// Replace the first hearth with the same id; silently ignore a missing id
fn replace_first(hearths: &mut [Hearth], hearth: &Hearth) {
    if let Some(slot) = hearths.iter_mut().find(|h| h.id == hearth.id) {
        *slot = hearth.clone();
    }
}

fn merge_details(hearths: &mut [Hearth], id: HearthId, updates: &HearthUpdates) {
    for hearth in hearths.iter_mut().filter(|h| h.id == id) {
        *hearth = hearth.merged(updates);
    }
}
