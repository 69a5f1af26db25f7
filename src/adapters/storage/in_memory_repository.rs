//! In-memory profile repository for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::UserId;
use crate::domain::user::UserProfile;
use crate::ports::{ProfileRepository, RepositoryError};

/// HashMap-backed repository; contents die with the process.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<HashMap<UserId, UserProfile>>,
}

impl InMemoryProfileRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles.
    pub fn len(&self) -> usize {
        self.profiles.lock().expect("profile map lock").len()
    }

    /// Returns true if no profile is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
        Ok(self
            .profiles
            .lock()
            .expect("profile map lock")
            .get(user_id)
            .cloned())
    }

    async fn save(&self, profile: &UserProfile) -> Result<(), RepositoryError> {
        self.profiles
            .lock()
            .expect("profile map lock")
            .insert(profile.user_id().clone(), profile.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    #[tokio::test]
    async fn save_and_find_round_trips() {
        let repo = InMemoryProfileRepository::new();
        let profile = UserProfile::new(
            UserId::new("user-1").unwrap(),
            Timestamp::from_unix_secs(1_704_326_400),
        );

        repo.save(&profile).await.unwrap();
        assert_eq!(repo.find(profile.user_id()).await.unwrap(), Some(profile));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn missing_user_yields_none() {
        let repo = InMemoryProfileRepository::new();
        assert!(repo
            .find(&UserId::new("ghost").unwrap())
            .await
            .unwrap()
            .is_none());
    }
}
