//! Configuration management.
//!
//! A `showcase.{toml,yaml,json}` file is discovered with `prefer` (or given
//! with `--config`) and parsed with serde by extension. Relative paths inside
//! it resolve against the file's directory.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::content::{ContentLoader, ContentLocation, HttpClient, LoadError};
use crate::session::Layout;
use crate::sites::SiteKind;

/// Default server bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1:3030";

/// Environment variable overriding the configured user agent.
pub const USER_AGENT_ENV: &str = "SHOWCASE_USER_AGENT";

/// One site as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, prefer::FromValue)]
pub struct SiteConfig {
    /// Which page logic to use.
    pub kind: SiteKind,
    /// Directory holding the page, its content document and assets.
    pub root: String,
    /// HTML template; defaults to `<root>/index.html`, then the built-in one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Content document path or URL; defaults to the site's file in `root`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, prefer::FromValue)]
pub struct Config {
    /// User agent for content requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Request timeout in seconds. Unset means no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// Address the server listens on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    /// Initial top offset of the tutor nav bar, in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_offset_top: Option<u32>,
    /// Served sites by URL name.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    #[prefer(default)]
    pub sites: HashMap<String, SiteConfig>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    #[prefer(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Discover and load the config file, falling back to defaults.
    pub async fn load() -> Self {
        match prefer::load("showcase").await {
            Ok(pref_config) => match pref_config.source_path() {
                Some(path) => match Self::load_from_path(path).await {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::warn!("{}", e);
                        Self::default()
                    }
                },
                None => Self::default(),
            },
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        let mut config = Self::parse(&contents, path)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, String> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        match ext {
            "toml" => {
                toml::from_str(contents).map_err(|e| format!("Failed to parse TOML config: {}", e))
            }
            "yaml" | "yml" => serde_yaml::from_str(contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e)),
            _ => serde_json::from_str(contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e)),
        }
    }

    /// Directory relative paths are resolved against.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are joined onto `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Resolve into runtime settings.
    pub fn into_settings(self, base_dir: &Path) -> Settings {
        let mut sites = BTreeMap::new();
        for (name, site) in &self.sites {
            let content = site.content.as_deref().map(|c| {
                match ContentLocation::parse(c) {
                    Ok(ContentLocation::File(p)) => {
                        self.resolve_path(&p.to_string_lossy(), base_dir).display().to_string()
                    }
                    _ => c.to_string(),
                }
            });
            sites.insert(
                name.clone(),
                SiteSettings {
                    name: name.clone(),
                    kind: site.kind,
                    root: self.resolve_path(&site.root, base_dir),
                    template: site
                        .template
                        .as_deref()
                        .map(|t| self.resolve_path(t, base_dir)),
                    content,
                },
            );
        }

        let user_agent = std::env::var(USER_AGENT_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .or(self.user_agent);

        Settings {
            user_agent,
            request_timeout: self.request_timeout.map(Duration::from_secs),
            bind: self.bind.unwrap_or_else(|| DEFAULT_BIND.to_string()),
            layout: Layout {
                nav_offset_top: f64::from(self.nav_offset_top.unwrap_or(0)),
            },
            sites,
            config_path: self.source_path,
        }
    }
}

/// A configured site with its paths resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSettings {
    pub name: String,
    pub kind: SiteKind,
    pub root: PathBuf,
    pub template: Option<PathBuf>,
    pub content: Option<String>,
}

impl SiteSettings {
    /// Where the page itself lives.
    pub fn page_location(&self) -> ContentLocation {
        ContentLocation::File(self.root.join("index.html"))
    }

    /// Where the page's content document is fetched from.
    pub fn content_location(&self) -> Result<ContentLocation, LoadError> {
        match &self.content {
            Some(content) => ContentLocation::parse(content),
            None => self.page_location().relative_to(self.kind.content_file()),
        }
    }

    /// Template HTML: the configured file, the root's `index.html`, or the
    /// built-in template, in that order.
    pub async fn template_html(&self) -> std::io::Result<String> {
        if let Some(path) = &self.template {
            return tokio::fs::read_to_string(path).await;
        }
        let index = self.root.join("index.html");
        if index.is_file() {
            return tokio::fs::read_to_string(index).await;
        }
        Ok(self.kind.default_template().to_string())
    }
}

/// Runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub user_agent: Option<String>,
    pub request_timeout: Option<Duration>,
    pub bind: String,
    pub layout: Layout,
    pub sites: BTreeMap<String, SiteSettings>,
    pub config_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Config::default().into_settings(Path::new("."))
    }
}

impl Settings {
    pub fn site(&self, name: &str) -> Option<&SiteSettings> {
        self.sites.get(name)
    }

    /// Build the content loader these settings describe.
    pub fn loader(&self) -> Result<ContentLoader, reqwest::Error> {
        let client = HttpClient::with_user_agent(self.request_timeout, self.user_agent.as_deref())?;
        Ok(ContentLoader::new(client))
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
}

/// Load settings from an explicit path or by discovery.
///
/// An explicitly named file that cannot be loaded is an error; a discovered
/// one falls back to defaults with a warning.
pub async fn load_settings(options: LoadOptions) -> Result<Settings, String> {
    let config = match options.config_path {
        Some(ref path) => Config::load_from_path(path).await?,
        None => Config::load().await,
    };

    let base_dir = config
        .base_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if let Some(ref path) = config.source_path {
        tracing::debug!("Loaded config from {}", path.display());
    }

    Ok(config.into_settings(&base_dir))
}
