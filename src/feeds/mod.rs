pub mod avatar;
pub mod error;
pub mod github;
pub mod rate_limit;

use anyhow::Result;
use async_trait::async_trait;

pub use avatar::AvatarImage;
pub use error::{FetchFailure, ProfileError, UnknownCause};
pub use rate_limit::{RateLimit, RateLimitHeaders};

pub const PROFILE_FEED: &str = "profile";
pub const AVATAR_FEED: &str = "avatar";
pub const PROJECTS_FEED: &str = "projects";

#[derive(Debug, Clone)]
pub struct FeedMessage {
    pub widget_id: String,
    pub data: FeedData,
}

#[derive(Debug, Clone)]
pub enum FeedData {
    Profile(Profile),
    ProfileFailed(FetchFailure),
    Projects(Vec<Project>),
    Avatar(AvatarImage),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Profile {
    pub avatar: String,
    pub name: String,
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub url: String,
}

#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self) -> Result<FeedData>;
}
