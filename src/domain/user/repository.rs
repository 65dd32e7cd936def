//! User repository interface

use async_trait::async_trait;

use super::model::User;
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a new user
    async fn save(&self, user: User) -> DomainResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    /// Find user by username or email (login lookup)
    async fn find_by_login(&self, login: &str) -> DomainResult<Option<User>>;

    /// Update an existing user
    async fn update(&self, user: User) -> DomainResult<()>;

    /// Total number of users (default-admin seeding check)
    async fn count(&self) -> DomainResult<u64>;
}
