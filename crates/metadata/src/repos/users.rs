//! User repository.

use crate::error::MetadataResult;
use crate::models::UserRow;
use async_trait::async_trait;

/// Repository for the user record.
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Insert a user and return the assigned id.
    async fn create_user(&self, name: &str) -> MetadataResult<i64>;

    /// Get a user by id.
    async fn get_user(&self, user_id: i64) -> MetadataResult<Option<UserRow>>;

    /// Get the first user by id order, if any exists.
    ///
    /// Used by bootstrap to resolve the seeded single-user record.
    async fn first_user(&self) -> MetadataResult<Option<UserRow>>;

    /// Set or clear the user's stored profile image path.
    ///
    /// Returns [`crate::MetadataError::NotFound`] if the user does not exist.
    async fn set_profile_image_path(
        &self,
        user_id: i64,
        path: Option<&str>,
    ) -> MetadataResult<()>;
}
