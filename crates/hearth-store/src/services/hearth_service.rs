//! Hearth CRUD

use hearth_core::{Hearth, HearthId, HearthUpdates, ServiceError};

#[trait_variant::make(HearthService: Send)]
pub trait LocalHearthService {
    /// Hearths the signed-in user belongs to
    async fn list_hearths(&self) -> Result<Vec<Hearth>, ServiceError>;

    /// Create a hearth with server-chosen defaults, owned by the caller
    async fn create_hearth(&self) -> Result<Hearth, ServiceError>;

    /// Partial update; returns the stored hearth
    async fn update_hearth(
        &self,
        hearth_id: HearthId,
        updates: HearthUpdates,
    ) -> Result<Hearth, ServiceError>;

    async fn delete_hearth(&self, hearth_id: HearthId) -> Result<(), ServiceError>;
}
