//! Domain types shared between the store and its backend collaborators
//!
//! Field names follow the backend's JSON (`imageName`, `admin_user`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend-assigned identifier of a hearth
pub type HearthId = i64;

/// Backend-assigned identifier of a user
pub type UserId = i64;

/// A shared household
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hearth {
    pub id: HearthId,
    pub name: String,
    #[serde(rename = "imageName", default)]
    pub image_name: Option<String>,
    #[serde(default)]
    pub admin_user: Option<UserId>,
}

impl Hearth {
    pub fn new(id: HearthId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image_name: None,
            admin_user: None,
        }
    }

    /// Shallow-merge `updates` into this hearth, returning the merged copy
    pub fn merged(&self, updates: &HearthUpdates) -> Hearth {
        Hearth {
            id: self.id,
            name: updates.name.clone().unwrap_or_else(|| self.name.clone()),
            image_name: updates
                .image_name
                .clone()
                .or_else(|| self.image_name.clone()),
            admin_user: updates.admin_user.or(self.admin_user),
        }
    }
}

/// Partial hearth update; every `Some` field overwrites
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HearthUpdates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "imageName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_user: Option<UserId>,
}

impl HearthUpdates {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// A selectable profile picture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Avatar {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image_url: None,
        }
    }
}

/// The signed-in user's profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: String,
}

impl User {
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: None,
            avatar: String::new(),
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }
}

/// Login form contents
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Token pair issued on login
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    pub access: String,
    pub refresh: String,
}

impl AuthToken {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}
