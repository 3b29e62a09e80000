//! Action catalog (intents and their outcomes)
//!
//! Every state change goes through an [`Action`]. Asynchronous intents are
//! paired with exactly one success and one failure variant; see
//! [`ActionKind::outcomes`].

use hearth_core::{
    AuthToken, Avatar, Credentials, Hearth, HearthId, HearthUpdates, ServiceError, User,
};
use serde::{Deserialize, Serialize};

/// All possible actions in the store
///
/// Serialized as `{"type": "<camelCaseKind>", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    // ─────────────────────────────────────────────────────────
    // Auth
    // ─────────────────────────────────────────────────────────
    Login { credentials: Credentials },
    LoginSuccess { user: User, token: AuthToken },
    LoginFailure { error: ServiceError },
    Logout,

    LoadUser,
    LoadUserSuccess { user: User },
    LoadUserFailure { error: ServiceError },

    // ─────────────────────────────────────────────────────────
    // User profile / avatar
    // ─────────────────────────────────────────────────────────
    LoadAvatars,
    LoadAvatarsSuccess { avatars: Vec<Avatar> },
    LoadAvatarsFailure { error: ServiceError },

    UpdateUserAvatar { avatar_name: String },
    UpdateUserAvatarSuccess { user: User },
    UpdateUserAvatarFailure { error: ServiceError },
    /// Acknowledge a displayed avatar error
    ClearAvatarError,

    // ─────────────────────────────────────────────────────────
    // Hearths
    // ─────────────────────────────────────────────────────────
    LoadHearths,
    LoadHearthsSuccess { hearths: Vec<Hearth> },
    LoadHearthsFailure { error: ServiceError },

    AddHearth { hearth: Hearth },
    UpdateHearth { hearth: Hearth },
    DeleteHearth { hearth_id: HearthId },
    UpdateHearthDetails {
        hearth_id: HearthId,
        updates: HearthUpdates,
    },

    /// Ask the backend for a new hearth (name and image assigned server side)
    CreateHearth,
    CreateHearthSuccess { hearth: Hearth },
    CreateHearthFailure { error: ServiceError },

    SaveHearthDetails {
        hearth_id: HearthId,
        updates: HearthUpdates,
    },
    SaveHearthDetailsSuccess { hearth: Hearth },
    SaveHearthDetailsFailure {
        hearth_id: HearthId,
        error: ServiceError,
    },

    RemoveHearth { hearth_id: HearthId },
    RemoveHearthSuccess { hearth_id: HearthId },
    RemoveHearthFailure {
        hearth_id: HearthId,
        error: ServiceError,
    },
}

/// Payload-free discriminant of [`Action`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    Login,
    LoginSuccess,
    LoginFailure,
    Logout,
    LoadUser,
    LoadUserSuccess,
    LoadUserFailure,
    LoadAvatars,
    LoadAvatarsSuccess,
    LoadAvatarsFailure,
    UpdateUserAvatar,
    UpdateUserAvatarSuccess,
    UpdateUserAvatarFailure,
    ClearAvatarError,
    LoadHearths,
    LoadHearthsSuccess,
    LoadHearthsFailure,
    AddHearth,
    UpdateHearth,
    DeleteHearth,
    UpdateHearthDetails,
    CreateHearth,
    CreateHearthSuccess,
    CreateHearthFailure,
    SaveHearthDetails,
    SaveHearthDetailsSuccess,
    SaveHearthDetailsFailure,
    RemoveHearth,
    RemoveHearthSuccess,
    RemoveHearthFailure,
}

impl ActionKind {
    /// Every kind, in declaration order
    pub const ALL: [ActionKind; 30] = [
        ActionKind::Login,
        ActionKind::LoginSuccess,
        ActionKind::LoginFailure,
        ActionKind::Logout,
        ActionKind::LoadUser,
        ActionKind::LoadUserSuccess,
        ActionKind::LoadUserFailure,
        ActionKind::LoadAvatars,
        ActionKind::LoadAvatarsSuccess,
        ActionKind::LoadAvatarsFailure,
        ActionKind::UpdateUserAvatar,
        ActionKind::UpdateUserAvatarSuccess,
        ActionKind::UpdateUserAvatarFailure,
        ActionKind::ClearAvatarError,
        ActionKind::LoadHearths,
        ActionKind::LoadHearthsSuccess,
        ActionKind::LoadHearthsFailure,
        ActionKind::AddHearth,
        ActionKind::UpdateHearth,
        ActionKind::DeleteHearth,
        ActionKind::UpdateHearthDetails,
        ActionKind::CreateHearth,
        ActionKind::CreateHearthSuccess,
        ActionKind::CreateHearthFailure,
        ActionKind::SaveHearthDetails,
        ActionKind::SaveHearthDetailsSuccess,
        ActionKind::SaveHearthDetailsFailure,
        ActionKind::RemoveHearth,
        ActionKind::RemoveHearthSuccess,
        ActionKind::RemoveHearthFailure,
    ];

    /// The wire tag, identical to the serialized `type` field
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Login => "login",
            ActionKind::LoginSuccess => "loginSuccess",
            ActionKind::LoginFailure => "loginFailure",
            ActionKind::Logout => "logout",
            ActionKind::LoadUser => "loadUser",
            ActionKind::LoadUserSuccess => "loadUserSuccess",
            ActionKind::LoadUserFailure => "loadUserFailure",
            ActionKind::LoadAvatars => "loadAvatars",
            ActionKind::LoadAvatarsSuccess => "loadAvatarsSuccess",
            ActionKind::LoadAvatarsFailure => "loadAvatarsFailure",
            ActionKind::UpdateUserAvatar => "updateUserAvatar",
            ActionKind::UpdateUserAvatarSuccess => "updateUserAvatarSuccess",
            ActionKind::UpdateUserAvatarFailure => "updateUserAvatarFailure",
            ActionKind::ClearAvatarError => "clearAvatarError",
            ActionKind::LoadHearths => "loadHearths",
            ActionKind::LoadHearthsSuccess => "loadHearthsSuccess",
            ActionKind::LoadHearthsFailure => "loadHearthsFailure",
            ActionKind::AddHearth => "addHearth",
            ActionKind::UpdateHearth => "updateHearth",
            ActionKind::DeleteHearth => "deleteHearth",
            ActionKind::UpdateHearthDetails => "updateHearthDetails",
            ActionKind::CreateHearth => "createHearth",
            ActionKind::CreateHearthSuccess => "createHearthSuccess",
            ActionKind::CreateHearthFailure => "createHearthFailure",
            ActionKind::SaveHearthDetails => "saveHearthDetails",
            ActionKind::SaveHearthDetailsSuccess => "saveHearthDetailsSuccess",
            ActionKind::SaveHearthDetailsFailure => "saveHearthDetailsFailure",
            ActionKind::RemoveHearth => "removeHearth",
            ActionKind::RemoveHearthSuccess => "removeHearthSuccess",
            ActionKind::RemoveHearthFailure => "removeHearthFailure",
        }
    }

    /// `(success, failure)` kinds for an asynchronous intent, `None` otherwise
    pub fn outcomes(self) -> Option<(ActionKind, ActionKind)> {
        use ActionKind::*;
        match self {
            Login => Some((LoginSuccess, LoginFailure)),
            LoadUser => Some((LoadUserSuccess, LoadUserFailure)),
            LoadAvatars => Some((LoadAvatarsSuccess, LoadAvatarsFailure)),
            UpdateUserAvatar => Some((UpdateUserAvatarSuccess, UpdateUserAvatarFailure)),
            LoadHearths => Some((LoadHearthsSuccess, LoadHearthsFailure)),
            CreateHearth => Some((CreateHearthSuccess, CreateHearthFailure)),
            SaveHearthDetails => Some((SaveHearthDetailsSuccess, SaveHearthDetailsFailure)),
            RemoveHearth => Some((RemoveHearthSuccess, RemoveHearthFailure)),
            _ => None,
        }
    }

    /// Whether this kind starts an asynchronous operation
    pub fn is_intent(self) -> bool {
        self.outcomes().is_some()
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Action {
    pub fn login(username: impl Into<String>, password: impl Into<String>) -> Self {
        Action::Login {
            credentials: Credentials::new(username, password),
        }
    }

    pub fn update_user_avatar(avatar_name: impl Into<String>) -> Self {
        Action::UpdateUserAvatar {
            avatar_name: avatar_name.into(),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Login { .. } => ActionKind::Login,
            Action::LoginSuccess { .. } => ActionKind::LoginSuccess,
            Action::LoginFailure { .. } => ActionKind::LoginFailure,
            Action::Logout => ActionKind::Logout,
            Action::LoadUser => ActionKind::LoadUser,
            Action::LoadUserSuccess { .. } => ActionKind::LoadUserSuccess,
            Action::LoadUserFailure { .. } => ActionKind::LoadUserFailure,
            Action::LoadAvatars => ActionKind::LoadAvatars,
            Action::LoadAvatarsSuccess { .. } => ActionKind::LoadAvatarsSuccess,
            Action::LoadAvatarsFailure { .. } => ActionKind::LoadAvatarsFailure,
            Action::UpdateUserAvatar { .. } => ActionKind::UpdateUserAvatar,
            Action::UpdateUserAvatarSuccess { .. } => ActionKind::UpdateUserAvatarSuccess,
            Action::UpdateUserAvatarFailure { .. } => ActionKind::UpdateUserAvatarFailure,
            Action::ClearAvatarError => ActionKind::ClearAvatarError,
            Action::LoadHearths => ActionKind::LoadHearths,
            Action::LoadHearthsSuccess { .. } => ActionKind::LoadHearthsSuccess,
            Action::LoadHearthsFailure { .. } => ActionKind::LoadHearthsFailure,
            Action::AddHearth { .. } => ActionKind::AddHearth,
            Action::UpdateHearth { .. } => ActionKind::UpdateHearth,
            Action::DeleteHearth { .. } => ActionKind::DeleteHearth,
            Action::UpdateHearthDetails { .. } => ActionKind::UpdateHearthDetails,
            Action::CreateHearth => ActionKind::CreateHearth,
            Action::CreateHearthSuccess { .. } => ActionKind::CreateHearthSuccess,
            Action::CreateHearthFailure { .. } => ActionKind::CreateHearthFailure,
            Action::SaveHearthDetails { .. } => ActionKind::SaveHearthDetails,
            Action::SaveHearthDetailsSuccess { .. } => ActionKind::SaveHearthDetailsSuccess,
            Action::SaveHearthDetailsFailure { .. } => ActionKind::SaveHearthDetailsFailure,
            Action::RemoveHearth { .. } => ActionKind::RemoveHearth,
            Action::RemoveHearthSuccess { .. } => ActionKind::RemoveHearthSuccess,
            Action::RemoveHearthFailure { .. } => ActionKind::RemoveHearthFailure,
        }
    }

    /// Build the failure outcome of this intent carrying `error`
    ///
    /// Returns `None` for actions that are not asynchronous intents.
    pub fn failure(&self, error: ServiceError) -> Option<Action> {
        match self {
            Action::Login { .. } => Some(Action::LoginFailure { error }),
            Action::LoadUser => Some(Action::LoadUserFailure { error }),
            Action::LoadAvatars => Some(Action::LoadAvatarsFailure { error }),
            Action::UpdateUserAvatar { .. } => Some(Action::UpdateUserAvatarFailure { error }),
            Action::LoadHearths => Some(Action::LoadHearthsFailure { error }),
            Action::CreateHearth => Some(Action::CreateHearthFailure { error }),
            Action::SaveHearthDetails { hearth_id, .. } => {
                Some(Action::SaveHearthDetailsFailure {
                    hearth_id: *hearth_id,
                    error,
                })
            }
            Action::RemoveHearth { hearth_id } => Some(Action::RemoveHearthFailure {
                hearth_id: *hearth_id,
                error,
            }),
            _ => None,
        }
    }

    /// Parse an action from its `{type, payload}` JSON form
    ///
    /// The error names at most the `type` tag; payload values (passwords)
    /// never end up in the message.
    pub fn from_json(raw: &str) -> hearth_core::Result<Action> {
        serde_json::from_str(raw)
            .map_err(|e| hearth_core::Error::invalid_action(describe_rejection(raw, &e)))
    }
}

fn describe_rejection(raw: &str, error: &serde_json::Error) -> String {
    let tag = serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|value| value.get("type")?.as_str().map(str::to_owned));

    match tag {
        Some(tag) if !ActionKind::ALL.iter().any(|k| k.as_str() == tag) => {
            format!("unknown action type `{}`", tag)
        }
        Some(tag) => format!(
            "invalid payload for `{}` (line {}, column {})",
            tag,
            error.line(),
            error.column()
        ),
        None => format!(
            "{:?} error at line {}, column {}",
            error.classify(),
            error.line(),
            error.column()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_intent_has_distinct_success_and_failure() {
        for kind in ActionKind::ALL {
            if let Some((success, failure)) = kind.outcomes() {
                assert_ne!(success, failure);
                assert!(success.as_str().starts_with(kind.as_str()));
                assert!(success.as_str().ends_with("Success"));
                assert!(failure.as_str().ends_with("Failure"));
                assert!(!success.is_intent());
                assert!(!failure.is_intent());
            }
        }
    }

    #[test]
    fn test_outcome_kinds_belong_to_one_intent_only() {
        let mut seen = std::collections::BTreeSet::new();
        for kind in ActionKind::ALL {
            if let Some((success, failure)) = kind.outcomes() {
                assert!(seen.insert(success), "{} reused", success);
                assert!(seen.insert(failure), "{} reused", failure);
            }
        }
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn test_failure_matches_declared_outcome() {
        let intents = [
            Action::login("a", "b"),
            Action::LoadUser,
            Action::LoadAvatars,
            Action::update_user_avatar("fox"),
            Action::LoadHearths,
            Action::CreateHearth,
            Action::SaveHearthDetails {
                hearth_id: 1,
                updates: HearthUpdates::name("x"),
            },
            Action::RemoveHearth { hearth_id: 1 },
        ];
        for intent in intents {
            let (_, failure_kind) = intent.kind().outcomes().unwrap();
            let failure = intent.failure(ServiceError::network("down")).unwrap();
            assert_eq!(failure.kind(), failure_kind);
        }
        assert!(Action::Logout
            .failure(ServiceError::network("down"))
            .is_none());
    }

    #[test]
    fn test_serialized_type_matches_kind_tag() {
        let action = Action::DeleteHearth { hearth_id: 5 };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "deleteHearth");
        assert_eq!(json["payload"]["hearthId"], 5);
        assert_eq!(json["type"], action.kind().as_str());
    }

    #[test]
    fn test_from_json_parses_payload_and_unit_actions() {
        let action = Action::from_json(r#"{"type":"updateUserAvatar","payload":{"avatarName":"fox"}}"#)
            .unwrap();
        assert_eq!(action, Action::update_user_avatar("fox"));

        let action = Action::from_json(r#"{"type":"logout"}"#).unwrap();
        assert_eq!(action, Action::Logout);
    }

    #[test]
    fn test_from_json_rejects_unknown_type() {
        let err = Action::from_json(r#"{"type":"launchRocket"}"#).unwrap_err();
        assert!(matches!(err, hearth_core::Error::InvalidAction { .. }));
        assert!(err.to_string().contains("unknown action type `launchRocket`"));
    }

    #[test]
    fn test_from_json_error_does_not_echo_credentials() {
        let truncated = r#"{"type":"login","payload":{"credentials":{"username":"alice","password":"hunter2"},"extra":}"#;
        let password_as_number = r#"{"type":"login","payload":{"credentials":{"username":"alice","password":918273}}}"#;

        for raw in [truncated, password_as_number] {
            let message = Action::from_json(raw).unwrap_err().to_string();
            assert!(!message.contains("hunter2"), "{}", message);
            assert!(!message.contains("918273"), "{}", message);
            assert!(!message.contains("alice"), "{}", message);
        }

        let message = Action::from_json(password_as_number).unwrap_err().to_string();
        assert!(message.contains("invalid payload for `login`"), "{}", message);
    }
}
