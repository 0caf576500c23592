//! Public repository listing from the GitHub REST API.

use reqwest::{Client, StatusCode};
use tracing::info;

use crate::errors::AppError;
use crate::models::market::RepoSummary;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const REPOS_PER_PAGE: u32 = 50;

/// GitHub logins are alphanumeric with single inner hyphens, at most 39 chars.
fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= 39
        && !username.starts_with('-')
        && !username.ends_with('-')
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Lists a user's public repositories, most recently updated first.
pub async fn fetch_public_repos(
    http: &Client,
    api_base: &str,
    username: &str,
) -> Result<Vec<RepoSummary>, AppError> {
    let username = username.trim();
    if !is_valid_username(username) {
        return Err(AppError::Validation(format!(
            "'{username}' is not a valid GitHub username"
        )));
    }

    let url = format!(
        "{}/users/{}/repos",
        api_base.trim_end_matches('/'),
        username
    );
    let response = http
        .get(&url)
        .query(&[("sort", "updated".to_string()), ("per_page", REPOS_PER_PAGE.to_string())])
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("GitHub request failed: {e}")))?;

    match response.status() {
        StatusCode::NOT_FOUND => return Err(AppError::NotFound("GitHub user not found".to_string())),
        status if !status.is_success() => {
            return Err(AppError::Upstream(format!(
                "Failed to fetch repositories (status {status})"
            )))
        }
        _ => {}
    }

    let repos: Vec<RepoSummary> = response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("Unreadable GitHub response: {e}")))?;

    if repos.is_empty() {
        return Err(AppError::Validation(
            "No public repositories found for this user".to_string(),
        ));
    }

    info!(username, repos = repos.len(), "Fetched GitHub repositories");
    Ok(repos)
}
