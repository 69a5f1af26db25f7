//! File-based profile repository.
//!
//! One JSON document per user under a base directory. Writes go through a
//! temp file in the same directory followed by an atomic rename, so a crash
//! mid-write leaves the previous record intact. A record that fails to parse
//! is treated as `StateCorruption`: the loss is logged and the caller gets a
//! fresh start, without touching any other user's file.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::UserId;
use crate::domain::user::UserProfile;
use crate::ports::{ProfileRepository, RepositoryError};

/// File-backed storage for user profiles.
#[derive(Debug, Clone)]
pub struct JsonFileProfileRepository {
    base_path: PathBuf,
}

impl JsonFileProfileRepository {
    /// Creates a repository rooted at a base directory.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// File path for a user's record. User ids come from the messaging
    /// gateway and may contain path-hostile characters; they are escaped.
    fn profile_path(&self, user_id: &UserId) -> PathBuf {
        let escaped: String = user_id
            .as_str()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", escaped))
    }

    async fn ensure_base_dir(&self) -> Result<(), RepositoryError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| RepositoryError::Io(e.to_string()))
    }
}

#[async_trait]
impl ProfileRepository for JsonFileProfileRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
        let path = self.profile_path(user_id);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)
            .await
            .map_err(|e| RepositoryError::Io(e.to_string()))?;

        match serde_json::from_str::<UserProfile>(&json) {
            Ok(profile) if profile.bandit().is_consistent() => Ok(Some(profile)),
            Ok(_) => {
                tracing::warn!(
                    user_id = %user_id,
                    "profile record violates bandit invariants, reinitializing"
                );
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "profile record unreadable, reinitializing"
                );
                Ok(None)
            }
        }
    }

    async fn save(&self, profile: &UserProfile) -> Result<(), RepositoryError> {
        self.ensure_base_dir().await?;

        let json = serde_json::to_string_pretty(profile)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        let path = self.profile_path(profile.user_id());
        let tmp_path = path.with_extension("json.tmp");

        fs::write(&tmp_path, json)
            .await
            .map_err(|e| RepositoryError::Io(e.to_string()))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| RepositoryError::Io(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::relief::StressCategory;
    use tempfile::TempDir;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn profile(id: &str) -> UserProfile {
        UserProfile::new(user(id), Timestamp::from_unix_secs(1_704_326_400))
    }

    #[tokio::test]
    async fn save_and_find_round_trips() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileProfileRepository::new(dir.path());

        let p = profile("whatsapp:+14155550100");
        repo.save(&p).await.unwrap();

        let loaded = repo.find(p.user_id()).await.unwrap().unwrap();
        assert_eq!(loaded, p);
    }

    #[tokio::test]
    async fn missing_user_yields_none() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileProfileRepository::new(dir.path());

        assert!(repo.find(&user("nobody")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_record_reinitializes_without_error() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileProfileRepository::new(dir.path());

        let id = user("corrupted");
        std::fs::write(repo.profile_path(&id), "{ not json").unwrap();

        assert!(repo.find(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_record_does_not_affect_other_users() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileProfileRepository::new(dir.path());

        let healthy = profile("healthy");
        repo.save(&healthy).await.unwrap();
        std::fs::write(repo.profile_path(&user("corrupted")), "broken").unwrap();

        assert!(repo.find(&user("corrupted")).await.unwrap().is_none());
        assert_eq!(
            repo.find(healthy.user_id()).await.unwrap().unwrap(),
            healthy
        );
    }

    #[tokio::test]
    async fn inconsistent_bandit_state_is_treated_as_corruption() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileProfileRepository::new(dir.path());

        let p = profile("tampered");
        repo.save(&p).await.unwrap();

        // Tamper the persisted totals.
        let path = repo.profile_path(p.user_id());
        let json = std::fs::read_to_string(&path)
            .unwrap()
            .replace("\"total_counts\": 0", "\"total_counts\": 9");
        std::fs::write(&path, json).unwrap();

        assert!(repo.find(p.user_id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_replaces_previous_record() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileProfileRepository::new(dir.path());

        let mut p = profile("whatsapp:+14155550100");
        repo.save(&p).await.unwrap();
        let now = Timestamp::now();
        p.begin_stress_check(StressCategory::Anxiety, now).unwrap();
        repo.save(&p).await.unwrap();

        let loaded = repo.find(p.user_id()).await.unwrap().unwrap();
        assert_eq!(loaded.phase(), p.phase());
    }

    #[tokio::test]
    async fn no_temp_file_remains_after_save() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileProfileRepository::new(dir.path());

        let p = profile("tmpcheck");
        repo.save(&p).await.unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
