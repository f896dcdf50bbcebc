use super::error::{FetchFailure, UnknownCause};
use super::rate_limit::RateLimitHeaders;
use super::{FeedData, FeedFetcher, Profile, Project};
use crate::config::{ExcludeConfig, SortBy};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// GitHub's ceiling for `per_page` on search endpoints.
pub const MAX_PER_PAGE: usize = 100;

/// Creates a client carrying the headers GitHub expects on every call.
pub fn build_client(token: Option<&str>) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("gitfolio"));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github.v3+json"),
    );

    if let Some(token) = token.filter(|t| !t.is_empty()) {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .context("Invalid GitHub token value")?;
        headers.insert(AUTHORIZATION, value);
    }

    Client::builder()
        .default_headers(headers)
        .build()
        .context("Failed to build HTTP client")
}

#[derive(Debug, Deserialize)]
struct GithubUserResponse {
    avatar_url: String,
    name: Option<String>,
    bio: Option<String>,
}

impl From<GithubUserResponse> for Profile {
    fn from(user: GithubUserResponse) -> Self {
        Self {
            avatar: user.avatar_url,
            name: user.name.unwrap_or_default(),
            bio: user.bio.unwrap_or_default(),
        }
    }
}

pub fn profile_url(api_base: &str, username: &str) -> String {
    format!(
        "{}/users/{}",
        api_base.trim_end_matches('/'),
        urlencoding::encode(username)
    )
}

pub struct ProfileFetcher {
    api_base: String,
    username: String,
    client: Client,
}

impl ProfileFetcher {
    pub fn new(api_base: String, username: String, client: Client) -> Self {
        Self {
            api_base,
            username,
            client,
        }
    }

    /// One best-effort GET of `/users/{username}`. Every failure comes back
    /// classified; nothing escapes as an error.
    pub async fn fetch_profile(&self) -> Result<Profile, FetchFailure> {
        let url = profile_url(&self.api_base, &self.username);
        debug!(%url, "fetching github profile");

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "profile request failed");
                return Err(FetchFailure::unknown(UnknownCause::Transport(e.to_string())));
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            let headers = RateLimitHeaders::extract(response.headers());
            let failure = FetchFailure::classify(status, headers, &self.username);
            warn!(
                %status,
                error = %failure.error,
                code = failure.error.status_code(),
                "profile fetch failed"
            );
            return Err(failure);
        }

        match response.json::<GithubUserResponse>().await {
            Ok(user) => {
                info!(username = %self.username, "profile loaded");
                Ok(user.into())
            }
            Err(e) => {
                warn!(error = %e, "could not decode profile response");
                Err(FetchFailure::unknown(UnknownCause::Decode(e.to_string())))
            }
        }
    }
}

#[async_trait]
impl FeedFetcher for ProfileFetcher {
    async fn fetch(&self) -> Result<FeedData> {
        Ok(match self.fetch_profile().await {
            Ok(profile) => FeedData::Profile(profile),
            Err(failure) => FeedData::ProfileFailed(failure),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<RepoItem>,
}

#[derive(Debug, Deserialize)]
struct RepoItem {
    name: String,
    html_url: String,
    description: Option<String>,
    language: Option<String>,
    stargazers_count: u32,
    forks_count: u32,
}

impl From<RepoItem> for Project {
    fn from(repo: RepoItem) -> Self {
        Self {
            name: repo.name,
            description: repo.description.filter(|d| !d.trim().is_empty()),
            language: repo.language,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            url: repo.html_url,
        }
    }
}

/// Builds the repository search qualifier string, e.g.
/// `user:ada fork:false -repo:ada/dotfiles`.
pub fn search_query(username: &str, exclude: &ExcludeConfig) -> String {
    let mut query = format!("user:{} fork:{}", username, !exclude.forks);
    for project in exclude.projects.iter().filter(|p| !p.trim().is_empty()) {
        query.push_str(&format!(" -repo:{}/{}", username, project.trim()));
    }
    query
}

pub struct ProjectsFetcher {
    api_base: String,
    username: String,
    sort_by: SortBy,
    limit: usize,
    exclude: ExcludeConfig,
    client: Client,
}

impl ProjectsFetcher {
    pub fn new(
        api_base: String,
        username: String,
        sort_by: SortBy,
        limit: usize,
        exclude: ExcludeConfig,
        client: Client,
    ) -> Self {
        let clamped = limit.clamp(1, MAX_PER_PAGE);
        if clamped != limit {
            warn!(limit, used = clamped, "github.limit out of range");
        }
        Self {
            api_base,
            username,
            sort_by,
            limit: clamped,
            exclude,
            client,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/search/repositories?q={}&sort={}&per_page={}&type=Repositories",
            self.api_base.trim_end_matches('/'),
            urlencoding::encode(&search_query(&self.username, &self.exclude)),
            self.sort_by.as_str(),
            self.limit,
        )
    }
}

#[async_trait]
impl FeedFetcher for ProjectsFetcher {
    async fn fetch(&self) -> Result<FeedData> {
        let url = self.url();
        debug!(%url, "fetching repositories");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send repository search request")?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "GitHub search error: {}",
                response.status()
            ));
        }

        let search: SearchResponse = response
            .json()
            .await
            .context("Failed to deserialize repository search response")?;

        let projects: Vec<Project> = search
            .items
            .into_iter()
            .take(self.limit)
            .map(Project::from)
            .collect();

        info!(count = projects.len(), "repositories loaded");
        Ok(FeedData::Projects(projects))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_url_encodes_username() {
        assert_eq!(
            profile_url("https://api.github.com/", "ada lovelace"),
            "https://api.github.com/users/ada%20lovelace"
        );
    }

    #[test]
    fn test_profile_from_response() {
        let user: GithubUserResponse = serde_json::from_str(
            r#"{"login":"ada","avatar_url":"http://x/a.png","name":"Ada","bio":"dev"}"#,
        )
        .unwrap();
        assert_eq!(
            Profile::from(user),
            Profile {
                avatar: "http://x/a.png".to_string(),
                name: "Ada".to_string(),
                bio: "dev".to_string(),
            }
        );
    }

    #[test]
    fn test_profile_null_fields_become_empty() {
        let user: GithubUserResponse =
            serde_json::from_str(r#"{"avatar_url":"http://x/a.png","name":null,"bio":null}"#)
                .unwrap();
        let profile = Profile::from(user);
        assert!(profile.name.is_empty());
        assert!(profile.bio.is_empty());
    }

    #[test]
    fn test_search_query_includes_forks() {
        let exclude = ExcludeConfig::default();
        assert_eq!(search_query("ada", &exclude), "user:ada fork:true");
    }

    #[test]
    fn test_search_query_excludes_forks_and_projects() {
        let exclude = ExcludeConfig {
            forks: true,
            projects: vec!["dotfiles".to_string(), " ".to_string(), "notes".to_string()],
        };
        assert_eq!(
            search_query("ada", &exclude),
            "user:ada fork:false -repo:ada/dotfiles -repo:ada/notes"
        );
    }

    #[test]
    fn test_projects_url() {
        let fetcher = ProjectsFetcher::new(
            GITHUB_API_BASE.to_string(),
            "ada".to_string(),
            SortBy::Updated,
            5,
            ExcludeConfig::default(),
            Client::new(),
        );
        assert_eq!(
            fetcher.url(),
            "https://api.github.com/search/repositories?q=user%3Aada%20fork%3Atrue&sort=updated&per_page=5&type=Repositories"
        );
    }

    #[test]
    fn test_projects_limit_clamped() {
        let per_page = |limit| {
            ProjectsFetcher::new(
                GITHUB_API_BASE.to_string(),
                "ada".to_string(),
                SortBy::Stars,
                limit,
                ExcludeConfig::default(),
                Client::new(),
            )
            .url()
        };
        assert!(per_page(0).contains("&per_page=1&"));
        assert!(per_page(500).contains("&per_page=100&"));
        assert!(per_page(100).contains("&per_page=100&"));
    }

    #[test]
    fn test_blank_description_dropped() {
        let repo: RepoItem = serde_json::from_str(
            r#"{"name":"x","html_url":"https://github.com/ada/x","description":"  ","language":"Rust","stargazers_count":3,"forks_count":1}"#,
        )
        .unwrap();
        let project = Project::from(repo);
        assert_eq!(project.description, None);
        assert_eq!(project.language.as_deref(), Some("Rust"));
    }
}
