use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use crate::analysis::service::AnalysisService;
use crate::config::Config;
use crate::profiles::repository::ProfileRepository;
use crate::roadmap::cache::RoadmapCache;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Single write path for profiles.
    pub profiles: Arc<ProfileRepository>,
    /// Remote provider with rule-based fallback.
    pub analysis: Arc<AnalysisService>,
    pub roadmap_cache: RoadmapCache,
    /// Exported readiness reports.
    pub s3: S3Client,
    /// Plain HTTP client for the GitHub API.
    pub http: reqwest::Client,
    pub config: Arc<Config>,
}

#[cfg(test)]
impl AppState {
    /// In-memory profiles, an always-failing primary provider, and Redis/S3
    /// clients pointed at closed ports.
    pub fn for_tests() -> Self {
        use aws_sdk_s3::config::{BehaviorVersion, Region};

        use crate::analysis::rule_based::RuleBasedProvider;
        use crate::analysis::testing::StubProvider;
        use crate::profiles::repository::MemoryProfileStore;

        let config = Config::for_tests();
        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();

        AppState {
            profiles: Arc::new(ProfileRepository::new(Arc::new(MemoryProfileStore::default()))),
            analysis: Arc::new(AnalysisService::new(
                Arc::new(StubProvider::failing("offline remote")),
                Arc::new(RuleBasedProvider),
            )),
            roadmap_cache: RoadmapCache::new(
                redis::Client::open(config.redis_url.as_str()).expect("valid redis url"),
            ),
            s3: S3Client::from_conf(s3_config),
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }
}
