// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::normalize::DEFAULT_IMAGE_ORIGIN;
use crate::projection::DEFAULT_PAGE_SIZE;

pub const DEFAULT_CONFIG_PATH: &str = "config/site.toml";
pub const DEFAULT_API_URL: &str =
    "https://newsapi.timesmed.com/WebAPI/getnewslist?siteId=11&language=English";

pub const ENV_CONFIG_PATH: &str = "COFFEE_CONFIG_PATH";
pub const ENV_API_URL: &str = "COFFEE_API_URL";
pub const ENV_IMAGE_ORIGIN: &str = "COFFEE_IMAGE_ORIGIN";
pub const ENV_REVALIDATE_SECS: &str = "COFFEE_REVALIDATE_SECS";
pub const ENV_PAGE_SIZE: &str = "COFFEE_PAGE_SIZE";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
fn default_image_origin() -> String {
    DEFAULT_IMAGE_ORIGIN.to_string()
}
fn default_revalidate_secs() -> u64 {
    300
}
fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
fn default_home_section_slug() -> String {
    "business".to_string()
}
fn default_home_section_title() -> String {
    "Business News".to_string()
}

/// Site settings. Every key is optional in `config/site.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiteConfig {
    /// Upstream `getnewslist` endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Base that relative image paths resolve against.
    #[serde(default = "default_image_origin")]
    pub image_origin: String,
    /// Response cache revalidation window.
    #[serde(default = "default_revalidate_secs")]
    pub revalidate_secs: u64,
    /// Items per category page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Category teaser at the bottom of the home page.
    #[serde(default = "default_home_section_slug")]
    pub home_section_slug: String,
    #[serde(default = "default_home_section_title")]
    pub home_section_title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            image_origin: default_image_origin(),
            revalidate_secs: default_revalidate_secs(),
            page_size: default_page_size(),
            home_section_slug: default_home_section_slug(),
            home_section_title: default_home_section_title(),
        }
    }
}

impl SiteConfig {
    /// Load from an explicit TOML file, then apply env overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading site config from {}", path.display()))?;
        let cfg: SiteConfig = toml::from_str(&content)
            .with_context(|| format!("parsing site config {}", path.display()))?;
        Ok(cfg.with_env_overrides().sanitized())
    }

    /// Resolution order:
    /// 1) `$COFFEE_CONFIG_PATH` (must exist)
    /// 2) `config/site.toml`
    /// 3) built-in defaults
    ///
    /// Individual `COFFEE_*` env vars override whatever was loaded.
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            return Self::load_from(&pb);
        }
        let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_p.exists() {
            return Self::load_from(&default_p);
        }
        tracing::info!(target: "config", "no site config file, using defaults");
        Ok(Self::default().with_env_overrides().sanitized())
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(v) = env_nonempty(ENV_API_URL) {
            self.api_url = v;
        }
        if let Some(v) = env_nonempty(ENV_IMAGE_ORIGIN) {
            self.image_origin = v;
        }
        if let Some(v) = env_nonempty(ENV_REVALIDATE_SECS).and_then(|s| s.parse().ok()) {
            self.revalidate_secs = v;
        }
        if let Some(v) = env_nonempty(ENV_PAGE_SIZE).and_then(|s| s.parse().ok()) {
            self.page_size = v;
        }
        self
    }

    fn sanitized(mut self) -> Self {
        if self.page_size == 0 {
            tracing::warn!(target: "config", "page_size 0 is invalid, using default");
            self.page_size = default_page_size();
        }
        if reqwest::Url::parse(&self.image_origin).is_err() {
            tracing::warn!(
                target: "config",
                origin = %self.image_origin,
                "invalid image origin, using default"
            );
            self.image_origin = default_image_origin();
        }
        self
    }

    pub fn revalidate(&self) -> Duration {
        Duration::from_secs(self.revalidate_secs)
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
