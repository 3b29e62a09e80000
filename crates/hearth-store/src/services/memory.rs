//! In-process backend implementing every service trait
//!
//! Mirrors the server's rules: new hearths get a default name and image and
//! the caller as admin, only the admin may delete a hearth, and everything
//! except the avatar catalog needs a logged-in session.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;

use hearth_core::{
    AuthToken, Avatar, Credentials, Hearth, HearthId, HearthUpdates, ServiceError, User, UserId,
};

use super::{AuthService, AvatarService, HearthService};

/// Name given to hearths created without one
pub const DEFAULT_HEARTH_NAME: &str = "Nouveau foyer";

/// Image given to hearths created without one
pub const DEFAULT_HEARTH_IMAGE: &str = "defaultHouse";

#[derive(Debug)]
struct Account {
    user: User,
    password: String,
}

#[derive(Debug)]
struct StoredHearth {
    hearth: Hearth,
    members: Vec<UserId>,
}

#[derive(Debug, Default)]
struct BackendData {
    accounts: Vec<Account>,
    session: Option<UserId>,
    avatars: Vec<Avatar>,
    hearths: Vec<StoredHearth>,
    issued_tokens: u64,
    offline: bool,
}

impl BackendData {
    fn session_user(&self) -> Result<UserId, ServiceError> {
        self.session
            .ok_or_else(|| ServiceError::unauthorized("Authentication credentials were not provided."))
    }

    fn account_mut(&mut self, id: UserId) -> Result<&mut Account, ServiceError> {
        self.accounts
            .iter_mut()
            .find(|a| a.user.id == id)
            .ok_or_else(|| ServiceError::not_found(format!("user {}", id)))
    }

    fn hearth_mut(&mut self, id: HearthId) -> Result<&mut StoredHearth, ServiceError> {
        self.hearths
            .iter_mut()
            .find(|h| h.hearth.id == id)
            .ok_or_else(|| ServiceError::not_found(format!("hearth {}", id)))
    }

    fn next_hearth_id(&self) -> HearthId {
        self.hearths.iter().map(|h| h.hearth.id).max().unwrap_or(0) + 1
    }
}

/// Backend kept entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    data: RwLock<BackendData>,
    latency: Option<Duration>,
    calls: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account that can log in with `password`
    pub fn with_account(mut self, user: User, password: impl Into<String>) -> Self {
        self.data.get_mut().accounts.push(Account {
            user,
            password: password.into(),
        });
        self
    }

    pub fn with_avatar(mut self, avatar: Avatar) -> Self {
        self.data.get_mut().avatars.push(avatar);
        self
    }

    /// Seed a hearth shared by `members`
    pub fn with_hearth(mut self, hearth: Hearth, members: impl IntoIterator<Item = UserId>) -> Self {
        self.data.get_mut().hearths.push(StoredHearth {
            hearth,
            members: members.into_iter().collect(),
        });
        self
    }

    /// Delay every call by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make every subsequent call fail with a network error
    pub async fn set_offline(&self, offline: bool) {
        self.data.write().await.offline = offline;
    }

    /// Total number of service calls received
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Count the call, apply latency and the offline switch
    async fn enter(&self) -> Result<(), ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.data.read().await.offline {
            return Err(ServiceError::network("backend unreachable"));
        }
        Ok(())
    }
}

impl AuthService for InMemoryBackend {
    async fn login(&self, credentials: Credentials) -> Result<(User, AuthToken), ServiceError> {
        self.enter().await?;
        let mut data = self.data.write().await;

        let user = data
            .accounts
            .iter()
            .find(|a| a.user.username == credentials.username && a.password == credentials.password)
            .map(|a| a.user.clone())
            .ok_or_else(|| {
                ServiceError::unauthorized("No active account found with the given credentials")
            })?;

        data.session = Some(user.id);
        data.issued_tokens += 1;
        let n = data.issued_tokens;
        Ok((
            user,
            AuthToken::new(format!("access-{}", n), format!("refresh-{}", n)),
        ))
    }

    async fn current_user(&self) -> Result<User, ServiceError> {
        self.enter().await?;
        let mut data = self.data.write().await;
        let id = data.session_user()?;
        Ok(data.account_mut(id)?.user.clone())
    }
}

impl AvatarService for InMemoryBackend {
    async fn get_avatars(&self) -> Result<Vec<Avatar>, ServiceError> {
        self.enter().await?;
        Ok(self.data.read().await.avatars.clone())
    }

    async fn update_avatar(&self, avatar_name: String) -> Result<User, ServiceError> {
        self.enter().await?;
        let mut data = self.data.write().await;
        let id = data.session_user()?;

        if !data.avatars.iter().any(|a| a.name == avatar_name) {
            return Err(ServiceError::validation(format!(
                "Unknown avatar: {}",
                avatar_name
            )));
        }

        let account = data.account_mut(id)?;
        account.user.avatar = avatar_name;
        Ok(account.user.clone())
    }
}

impl HearthService for InMemoryBackend {
    async fn list_hearths(&self) -> Result<Vec<Hearth>, ServiceError> {
        self.enter().await?;
        let data = self.data.read().await;
        let id = data.session_user()?;
        Ok(data
            .hearths
            .iter()
            .filter(|h| h.members.contains(&id))
            .map(|h| h.hearth.clone())
            .collect())
    }

    async fn create_hearth(&self) -> Result<Hearth, ServiceError> {
        self.enter().await?;
        let mut data = self.data.write().await;
        let user_id = data.session_user()?;

        let hearth = Hearth {
            id: data.next_hearth_id(),
            name: DEFAULT_HEARTH_NAME.to_string(),
            image_name: Some(DEFAULT_HEARTH_IMAGE.to_string()),
            admin_user: Some(user_id),
        };
        data.hearths.push(StoredHearth {
            hearth: hearth.clone(),
            members: vec![user_id],
        });
        Ok(hearth)
    }

    async fn update_hearth(
        &self,
        hearth_id: HearthId,
        updates: HearthUpdates,
    ) -> Result<Hearth, ServiceError> {
        self.enter().await?;
        let mut data = self.data.write().await;
        data.session_user()?;

        if updates.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ServiceError::validation("name: This field may not be blank."));
        }

        let stored = data.hearth_mut(hearth_id)?;
        stored.hearth = stored.hearth.merged(&updates);
        Ok(stored.hearth.clone())
    }

    async fn delete_hearth(&self, hearth_id: HearthId) -> Result<(), ServiceError> {
        self.enter().await?;
        let mut data = self.data.write().await;
        let user_id = data.session_user()?;

        let stored = data.hearth_mut(hearth_id)?;
        if stored.hearth.admin_user != Some(user_id) {
            return Err(ServiceError::forbidden(
                "Only the administrator can delete the hearth.",
            ));
        }
        data.hearths.retain(|h| h.hearth.id != hearth_id);
        Ok(())
    }
}
