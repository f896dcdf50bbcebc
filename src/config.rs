use crate::feeds::github::GITHUB_API_BASE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub skills: Vec<String>,
    pub github: GithubConfig,
    pub social: SocialConfig,
    pub resume: ResumeConfig,
    pub dashboard: DashboardConfig,
    pub theme: ThemeConfig,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skills: vec![
                "Rust".to_string(),
                "Tokio".to_string(),
                "PostgreSQL".to_string(),
                "Git".to_string(),
                "Docker".to_string(),
            ],
            github: GithubConfig::default(),
            social: SocialConfig::default(),
            resume: ResumeConfig::default(),
            dashboard: DashboardConfig::default(),
            theme: ThemeConfig::default(),
            experiences: Vec::new(),
            education: Vec::new(),
            certifications: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub username: String,
    pub sort_by: SortBy,
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub api_base: String,
    pub exclude: ExcludeConfig,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            username: "octocat".to_string(),
            sort_by: SortBy::Stars,
            limit: 8,
            token: None,
            api_base: GITHUB_API_BASE.to_string(),
            exclude: ExcludeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Stars,
    Updated,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stars => "stars",
            Self::Updated => "updated",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcludeConfig {
    pub forks: bool,
    pub projects: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    pub website: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub twitter: String,
    pub mastodon: String,
    pub facebook: String,
    pub instagram: String,
    pub dribbble: String,
    pub behance: String,
    pub medium: String,
    pub dev: String,
    pub stackoverflow: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub label: &'static str,
    pub value: String,
    pub url: String,
}

impl SocialConfig {
    /// Configured links in display order, blanks skipped.
    pub fn links(&self) -> Vec<SocialLink> {
        let entries: [(&'static str, &str, fn(&str) -> String); 13] = [
            ("Website", self.website.as_str(), |v: &str| {
                if v.contains("://") {
                    v.to_string()
                } else {
                    format!("https://{}", v)
                }
            }),
            ("LinkedIn", self.linkedin.as_str(), |v: &str| {
                format!("https://www.linkedin.com/in/{}", v)
            }),
            ("Twitter", self.twitter.as_str(), |v: &str| format!("https://twitter.com/{}", v)),
            ("Mastodon", self.mastodon.as_str(), mastodon_url),
            ("Facebook", self.facebook.as_str(), |v: &str| {
                format!("https://www.facebook.com/{}", v)
            }),
            ("Instagram", self.instagram.as_str(), |v: &str| {
                format!("https://www.instagram.com/{}", v)
            }),
            ("Dribbble", self.dribbble.as_str(), |v: &str| format!("https://dribbble.com/{}", v)),
            ("Behance", self.behance.as_str(), |v: &str| format!("https://www.behance.net/{}", v)),
            ("Medium", self.medium.as_str(), |v: &str| format!("https://medium.com/@{}", v)),
            ("dev.to", self.dev.as_str(), |v: &str| format!("https://dev.to/{}", v)),
            ("Stack Overflow", self.stackoverflow.as_str(), |v: &str| {
                format!("https://stackoverflow.com/users/{}", v)
            }),
            ("Email", self.email.as_str(), |v: &str| format!("mailto:{}", v)),
            ("Phone", self.phone.as_str(), |v: &str| format!("tel:{}", v)),
        ];

        entries
            .into_iter()
            .filter(|(_, value, _)| !value.trim().is_empty())
            .map(|(label, value, to_url)| {
                let value = value.trim();
                SocialLink {
                    label,
                    value: value.to_string(),
                    url: to_url(value),
                }
            })
            .collect()
    }
}

/// `user@instance` becomes `https://instance/@user`.
fn mastodon_url(handle: &str) -> String {
    let handle = handle.trim_start_matches('@');
    match handle.split_once('@') {
        Some((user, instance)) => format!("https://{}/@{}", instance, user),
        None => format!("https://mastodon.social/@{}", handle),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeConfig {
    pub file_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub show_demo: bool,
    pub avatar_size: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            show_demo: true,
            avatar_size: 24,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub body: String,
    pub year: String,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub default_theme: String,
    pub disable_switch: bool,
    pub respect_prefers_color_scheme: bool,
    pub hide_avatar_ring: bool,
    pub themes: Vec<String>,
    pub custom_theme: CustomTheme,
}

pub const DEFAULT_THEMES: &[&str] = &[
    "light",
    "dark",
    "cupcake",
    "bumblebee",
    "emerald",
    "corporate",
    "synthwave",
    "retro",
    "cyberpunk",
    "valentine",
    "halloween",
    "garden",
    "forest",
    "aqua",
    "lofi",
    "pastel",
    "fantasy",
    "wireframe",
    "black",
    "luxury",
    "dracula",
    "cmyk",
    "autumn",
    "business",
    "acid",
    "lemonade",
    "night",
    "coffee",
    "winter",
    "procyon",
];

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_theme: "business".to_string(),
            disable_switch: false,
            respect_prefers_color_scheme: false,
            hide_avatar_ring: false,
            themes: DEFAULT_THEMES.iter().map(|t| t.to_string()).collect(),
            custom_theme: CustomTheme::default(),
        }
    }
}

/// Colours for the `procyon` theme, as `#rrggbb` or `#rgb`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomTheme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub neutral: String,
    pub base_100: String,
}

impl Default for CustomTheme {
    fn default() -> Self {
        Self {
            primary: "#fc055b".to_string(),
            secondary: "#219aaf".to_string(),
            accent: "#e8d03a".to_string(),
            neutral: "#2A2730".to_string(),
            base_100: "#E3E3ED".to_string(),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("gitfolio").join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Loads `path`, writing the defaults there first if it does not exist.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            info!(path = %path.display(), "wrote default config");
            return Ok(config);
        }
        Self::load(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.github.username, "octocat");
        assert_eq!(config.github.api_base, GITHUB_API_BASE);
        assert_eq!(config.theme.default_theme, "business");
        assert_eq!(config.theme.themes.len(), DEFAULT_THEMES.len());
        assert!(config.dashboard.show_demo);
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str(
            r#"
            skills = ["Rust", "Go"]

            [github]
            username = "ada"
            sort_by = "updated"

            [github.exclude]
            forks = true
            projects = ["dotfiles"]

            [theme]
            disable_switch = true

            [[experiences]]
            company = "Analytical Engines"
            position = "Programmer"
            from = "1842"
            to = "1843"
            "#,
        )
        .unwrap();

        assert_eq!(config.github.username, "ada");
        assert_eq!(config.github.sort_by, SortBy::Updated);
        assert_eq!(config.github.limit, 8);
        assert!(config.github.exclude.forks);
        assert_eq!(config.skills, vec!["Rust", "Go"]);
        assert!(config.theme.disable_switch);
        assert_eq!(config.theme.default_theme, "business");
        assert_eq!(config.experiences[0].company, "Analytical Engines");
    }

    #[test]
    fn test_load_or_init_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let created = Config::load_or_init(&path).unwrap();
        assert!(path.exists());

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.github.username, created.github.username);
        assert_eq!(loaded.theme.themes, created.theme.themes);
        assert_eq!(loaded.skills, created.skills);
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[github\nusername = ").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("config.toml"));
    }

    #[test]
    fn test_social_links_skip_blanks() {
        let social = SocialConfig {
            website: "ada.dev".to_string(),
            email: "ada@example.com".to_string(),
            mastodon: "@ada@hachyderm.io".to_string(),
            twitter: "  ".to_string(),
            ..SocialConfig::default()
        };

        let links = social.links();
        let urls: Vec<&str> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://ada.dev",
                "https://hachyderm.io/@ada",
                "mailto:ada@example.com"
            ]
        );
    }
}
