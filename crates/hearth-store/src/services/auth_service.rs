//! Authentication operations

use hearth_core::{AuthToken, Credentials, ServiceError, User};

/// Login and current-user lookup
#[trait_variant::make(AuthService: Send)]
pub trait LocalAuthService {
    /// Exchange credentials for a session
    async fn login(&self, credentials: Credentials) -> Result<(User, AuthToken), ServiceError>;

    /// Fetch the profile of the signed-in user
    async fn current_user(&self) -> Result<User, ServiceError>;
}
