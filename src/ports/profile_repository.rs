//! ProfileRepository port for per-user durable state.
//!
//! The repository is the only path to persisted profiles; any durable
//! key-value store can back it. Callers are responsible for serializing
//! read-modify-write cycles per user (see the session workflow's lock
//! registry); the repository itself only guarantees that a single `save`
//! lands atomically.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::UserProfile;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage I/O failed: {0}")]
    Io(String),

    #[error("profile serialization failed: {0}")]
    Serialization(String),
}

impl From<RepositoryError> for DomainError {
    fn from(err: RepositoryError) -> Self {
        DomainError::new(ErrorCode::StorageFailure, err.to_string())
    }
}

/// Repository for user profiles, one record per user identifier.
///
/// A missing user yields `Ok(None)`; callers create the profile lazily. An
/// unreadable record is `StateCorruption`: implementations log the loss and
/// also yield `Ok(None)` so one corrupt user never affects another.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Loads a user's profile.
    async fn find(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError>;

    /// Persists a profile, replacing any previous record atomically.
    async fn save(&self, profile: &UserProfile) -> Result<(), RepositoryError>;
}
