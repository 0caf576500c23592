//! Profile persistence.
//!
//! Profiles are stored whole, as a versioned JSON snapshot per row. All writes
//! go through [`ProfileRepository::mutate`], which serialises load → apply →
//! save per profile id.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{ProfileRow, UserProfile};

/// Bumped whenever the snapshot layout changes incompatibly.
pub const SNAPSHOT_SCHEMA_VERSION: i32 = 1;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load(&self, id: Uuid) -> Result<Option<UserProfile>, AppError>;
    /// Inserts or replaces the snapshot for `id`.
    async fn save(&self, id: Uuid, profile: &UserProfile) -> Result<(), AppError>;
    /// Returns whether a row existed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

fn decode_snapshot(row: ProfileRow) -> Result<UserProfile, AppError> {
    if row.schema_version != SNAPSHOT_SCHEMA_VERSION {
        return Err(AppError::Internal(anyhow!(
            "profile {} has snapshot schema version {}, expected {}",
            row.id,
            row.schema_version,
            SNAPSHOT_SCHEMA_VERSION
        )));
    }
    serde_json::from_value(row.snapshot)
        .map_err(|e| AppError::Internal(anyhow!("profile {} snapshot is unreadable: {e}", row.id)))
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL store
// ────────────────────────────────────────────────────────────────────────────

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn load(&self, id: Uuid) -> Result<Option<UserProfile>, AppError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            "SELECT id, schema_version, snapshot, created_at, updated_at FROM profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(decode_snapshot).transpose()
    }

    async fn save(&self, id: Uuid, profile: &UserProfile) -> Result<(), AppError> {
        let snapshot = serde_json::to_value(profile)
            .map_err(|e| AppError::Internal(anyhow!("failed to encode profile {id}: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO profiles (id, schema_version, snapshot, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            ON CONFLICT (id) DO UPDATE
            SET schema_version = EXCLUDED.schema_version,
                snapshot = EXCLUDED.snapshot,
                updated_at = NOW()
            "#,
        )
        .bind(id)
        .bind(SNAPSHOT_SCHEMA_VERSION)
        .bind(snapshot)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Repository
// ────────────────────────────────────────────────────────────────────────────

pub struct ProfileRepository {
    store: Arc<dyn ProfileStore>,
    locks: StdMutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl ProfileRepository {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self {
            store,
            locks: StdMutex::new(HashMap::new()),
        }
    }

    fn lock_for(&self, id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(locks.entry(id).or_default())
    }

    /// Drops the caller's handle and evicts the entry once no other task
    /// holds or waits on it. Clones are only handed out under the map lock,
    /// so a count of one here means the map owns the last reference.
    fn release_lock(&self, id: Uuid, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        drop(lock);
        if locks.get(&id).is_some_and(|l| Arc::strong_count(l) == 1) {
            locks.remove(&id);
        }
    }

    #[cfg(test)]
    fn tracked_locks(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Creates a fresh profile and returns its id.
    pub async fn create(&self, name: &str, email: &str) -> Result<(Uuid, UserProfile), AppError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }
        if !email.contains('@') {
            return Err(AppError::Validation(format!("'{email}' is not an email address")));
        }

        let id = Uuid::new_v4();
        let profile = UserProfile::new(name, email);
        self.store.save(id, &profile).await?;
        info!(profile_id = %id, "Profile created");
        Ok((id, profile))
    }

    pub async fn get(&self, id: Uuid) -> Result<UserProfile, AppError> {
        self.store
            .load(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))
    }

    /// Applies `apply` to the stored profile and persists the result. Writes
    /// to the same profile never interleave; nothing is saved if `apply` fails.
    pub async fn mutate<T, F>(&self, id: Uuid, apply: F) -> Result<(UserProfile, T), AppError>
    where
        F: FnOnce(&mut UserProfile) -> Result<T, AppError>,
    {
        let lock = self.lock_for(id);
        let result = {
            let _guard = lock.lock().await;
            self.apply_and_save(id, apply).await
        };
        self.release_lock(id, lock);
        result
    }

    async fn apply_and_save<T, F>(&self, id: Uuid, apply: F) -> Result<(UserProfile, T), AppError>
    where
        F: FnOnce(&mut UserProfile) -> Result<T, AppError>,
    {
        let mut profile = self.get(id).await?;
        let outcome = apply(&mut profile)?;
        self.store.save(id, &profile).await?;
        debug!(profile_id = %id, "Profile saved");

        Ok((profile, outcome))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let lock = self.lock_for(id);
        let deleted = {
            let _guard = lock.lock().await;
            self.store.delete(id).await
        };
        self.release_lock(id, lock);
        let deleted = deleted?;

        if deleted {
            info!(profile_id = %id, "Profile deleted");
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Profile {id} not found")))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory store for tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[derive(Default)]
pub struct MemoryProfileStore {
    rows: Mutex<HashMap<Uuid, ProfileRow>>,
}

#[cfg(test)]
impl MemoryProfileStore {
    pub async fn insert_raw(&self, row: ProfileRow) {
        self.rows.lock().await.insert(row.id, row);
    }
}

#[cfg(test)]
#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn load(&self, id: Uuid) -> Result<Option<UserProfile>, AppError> {
        let row = self.rows.lock().await.get(&id).cloned();
        row.map(decode_snapshot).transpose()
    }

    async fn save(&self, id: Uuid, profile: &UserProfile) -> Result<(), AppError> {
        let now = chrono::Utc::now();
        let snapshot = serde_json::to_value(profile).map_err(|e| AppError::Internal(e.into()))?;
        let mut rows = self.rows.lock().await;
        let created_at = rows.get(&id).map(|r| r.created_at).unwrap_or(now);
        rows.insert(
            id,
            ProfileRow {
                id,
                schema_version: SNAPSHOT_SCHEMA_VERSION,
                snapshot,
                created_at,
                updated_at: now,
            },
        );
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.rows.lock().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository() -> (Arc<MemoryProfileStore>, ProfileRepository) {
        let store = Arc::new(MemoryProfileStore::default());
        (store.clone(), ProfileRepository::new(store))
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (_, repo) = repository();
        let (id, created) = repo.create(" Asha ", "asha@example.com").await.unwrap();
        let loaded = repo.get(id).await.unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.name, "Asha");
        assert_eq!(loaded.streak, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input() {
        let (_, repo) = repository();
        assert!(matches!(
            repo.create("", "a@b.c").await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            repo.create("Asha", "not-an-email").await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (_, repo) = repository();
        assert!(matches!(
            repo.get(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_mutation_is_not_saved() {
        let (_, repo) = repository();
        let (id, _) = repo.create("Asha", "asha@example.com").await.unwrap();

        let result: Result<(UserProfile, ()), _> = repo
            .mutate(id, |p| {
                p.target_role = "Backend Developer".to_string();
                Err(AppError::Validation("nope".to_string()))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(repo.get(id).await.unwrap().target_role, "Frontend Developer");
    }

    #[tokio::test]
    async fn test_concurrent_mutations_do_not_lose_writes() {
        let (_, repo) = repository();
        let repo = Arc::new(repo);
        let (id, _) = repo.create("Asha", "asha@example.com").await.unwrap();

        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.mutate(id, move |p| {
                        p.completed_resources.push(format!("day-{}-learn", i + 1));
                        Ok(())
                    })
                    .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(repo.get(id).await.unwrap().completed_resources.len(), 20);
    }

    #[tokio::test]
    async fn test_lock_entries_are_released_after_mutation() {
        let (_, repo) = repository();
        let repo = Arc::new(repo);
        let (id, _) = repo.create("Asha", "asha@example.com").await.unwrap();

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.mutate(id, |p| Ok(p.streak += 1)).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }
        let _ = repo
            .mutate(Uuid::new_v4(), |_| Ok(()))
            .await
            .unwrap_err();

        assert_eq!(repo.get(id).await.unwrap().streak, 9);
        assert_eq!(repo.tracked_locks(), 0);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let (_, repo) = repository();
        let (id, _) = repo.create("Asha", "asha@example.com").await.unwrap();
        repo.delete(id).await.unwrap();
        assert!(matches!(repo.delete(id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unknown_schema_version_is_rejected() {
        let (store, repo) = repository();
        let id = Uuid::new_v4();
        let now = chrono::Utc::now();
        store
            .insert_raw(ProfileRow {
                id,
                schema_version: 2,
                snapshot: serde_json::to_value(UserProfile::new("Asha", "a@b.c")).unwrap(),
                created_at: now,
                updated_at: now,
            })
            .await;

        assert!(matches!(repo.get(id).await, Err(AppError::Internal(_))));
    }
}
