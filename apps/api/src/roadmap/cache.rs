use redis::AsyncCommands;
use tracing::{debug, warn};

use crate::models::roadmap::RoadmapStep;

/// Roadmaps are regenerated at most weekly per role.
pub const ROADMAP_TTL_SECS: u64 = 7 * 24 * 60 * 60;

fn cache_key(role: &str) -> String {
    format!("roadmap_daily:{}", role.trim().to_lowercase())
}

/// Role-scoped roadmap cache in Redis. Every failure degrades to a miss; the
/// cache never fails a request.
#[derive(Clone)]
pub struct RoadmapCache {
    client: redis::Client,
}

impl RoadmapCache {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    async fn try_get(&self, key: &str) -> redis::RedisResult<Option<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.get(key).await
    }

    async fn try_set(&self, key: &str, value: String) -> redis::RedisResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set_ex(key, value, ROADMAP_TTL_SECS).await
    }

    pub async fn get(&self, role: &str) -> Option<Vec<RoadmapStep>> {
        let key = cache_key(role);
        let raw = match self.try_get(&key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key = %key, error = %e, "Roadmap cache read failed");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(steps) => {
                debug!(key = %key, "Roadmap cache hit");
                Some(steps)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding unreadable cached roadmap");
                None
            }
        }
    }

    pub async fn put(&self, role: &str, steps: &[RoadmapStep]) {
        let key = cache_key(role);
        let value = match serde_json::to_string(steps) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Roadmap not cached");
                return;
            }
        };
        if let Err(e) = self.try_set(&key, value).await {
            warn!(key = %key, error = %e, "Roadmap cache write failed");
        }
    }
}
