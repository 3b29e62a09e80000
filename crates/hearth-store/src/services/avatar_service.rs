//! Avatar catalog and selection

use hearth_core::{Avatar, ServiceError, User};

#[trait_variant::make(AvatarService: Send)]
pub trait LocalAvatarService {
    async fn get_avatars(&self) -> Result<Vec<Avatar>, ServiceError>;

    /// Set the signed-in user's avatar by name; returns the updated user
    async fn update_avatar(&self, avatar_name: String) -> Result<User, ServiceError>;
}
