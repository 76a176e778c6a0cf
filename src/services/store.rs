use async_trait::async_trait;
use crate::errors::StoreResult;
use crate::models::{User, Vote};

/// Document store holding the `users`, `voted` and `votes` collections.
#[async_trait]
pub trait VoteStore: Send + Sync {
    async fn get_user(&self, email: &str) -> StoreResult<Option<User>>;

    /// Creates or overwrites the user keyed by email.
    async fn save_user(&self, user: &User) -> StoreResult<()>;

    /// All users whose phone equals `phone`. Phone numbers are not unique.
    async fn find_users_by_phone(&self, phone: &str) -> StoreResult<Vec<User>>;

    /// Sets `verified` on the user only while its phone still equals
    /// `phone`, as one atomic update. Returns whether the user was updated.
    async fn set_verified(&self, email: &str, phone: &str) -> StoreResult<bool>;

    /// Creates the voted marker only if absent. Returns `false` when the
    /// marker already existed, in which case nothing was written.
    async fn mark_voted(&self, uid: &str) -> StoreResult<bool>;

    async fn append_vote(&self, vote: &Vote) -> StoreResult<()>;

    async fn list_votes(&self) -> StoreResult<Vec<Vote>>;
}
