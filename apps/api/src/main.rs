mod analysis;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod profiles;
mod readiness;
mod report;
mod roadmap;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::remote::GeminiProvider;
use crate::analysis::rule_based::RuleBasedProvider;
use crate::analysis::service::AnalysisService;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::GeminiClient;
use crate::profiles::repository::{PgProfileStore, ProfileRepository};
use crate::roadmap::cache::RoadmapCache;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerReady API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let profiles = Arc::new(ProfileRepository::new(Arc::new(PgProfileStore::new(db))));

    // Initialize Redis
    let redis = redis::Client::open(config.redis_url.clone())?;
    info!("Redis client initialized");

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Remote provider first, rule-based engine as the floor
    let gemini = GeminiClient::new(config.gemini_api_key.clone(), &config.gemini_base_url)?;
    if config.gemini_api_key.is_none() {
        info!("GEMINI_API_KEY not set; every analysis call will be served by the rule-based engine");
    }
    let analysis = Arc::new(AnalysisService::new(
        Arc::new(GeminiProvider::new(gemini)),
        Arc::new(RuleBasedProvider),
    ));
    info!(
        "Analysis service initialized (primary: {}, fallback: {})",
        analysis.primary_name(),
        analysis.fallback_name()
    );

    // Build app state
    let state = AppState {
        profiles,
        analysis,
        roadmap_cache: RoadmapCache::new(redis),
        s3,
        http: reqwest::Client::new(),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "careerready-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
