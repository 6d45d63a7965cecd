use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default authority used in feed tag URIs
pub const DEFAULT_TAG_AUTHORITY: &str = "theyworkforyou.co.nz";

/// Default public site the generated links point at
pub const DEFAULT_SITE_URL: &str = "http://theyworkforyou.co.nz";

/// Sort order for dossier files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl From<&str> for SortOrder {
    fn from(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "DESC" => SortOrder::Descending,
            _ => SortOrder::Ascending,
        }
    }
}

/// Configuration for the narrative processor
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Base URL prepended to bill, committee and member paths
    pub site_url: String,
    pub tag_authority: String,
    pub sort_order: SortOrder,
    pub limit: Option<usize>,
    /// Persist committee assignments inferred from votes
    pub write_back: bool,
}

impl Config {
    /// Create a new default configuration
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            site_url: DEFAULT_SITE_URL.to_string(),
            tag_authority: DEFAULT_TAG_AUTHORITY.to_string(),
            sort_order: SortOrder::Ascending,
            limit: None,
            write_back: true,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.data_dir.exists() {
            return Err(Error::Config(format!(
                "Data directory does not exist: {}",
                self.data_dir.display()
            )));
        }

        if !self.data_dir.is_dir() {
            return Err(Error::Config(format!(
                "Data directory is not a directory: {}",
                self.data_dir.display()
            )));
        }

        if self.tag_authority.trim().is_empty() {
            return Err(Error::Config("Tag authority must not be empty".to_string()));
        }

        if !(self.site_url.starts_with("http://") || self.site_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "Site URL must be absolute: {}",
                self.site_url
            )));
        }

        Ok(())
    }

    /// Path of the committee directory file inside the data directory
    pub fn committees_path(&self) -> PathBuf {
        self.data_dir.join("committees.json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("data")
    }
}

/// Settings read from a `billnarrator.yml` file. Every key is optional;
/// command line flags take precedence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub site_url: Option<String>,
    pub tag_authority: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<usize>,
    pub write_back: Option<bool>,
}

impl FileConfig {
    /// Load and parse a YAML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Ok(serde_yaml::from_str(&contents)?)
    }
}

/// Builder for creating configurations
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default settings
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config: Config::new(data_dir),
        }
    }

    /// Apply the keys present in a configuration file
    pub fn file(mut self, file: FileConfig) -> Self {
        if let Some(dir) = file.data_dir {
            self.config.data_dir = dir;
        }
        if let Some(url) = file.site_url {
            self.config.site_url = url.trim_end_matches('/').to_string();
        }
        if let Some(authority) = file.tag_authority {
            self.config.tag_authority = authority;
        }
        if let Some(sort) = file.sort {
            self.config.sort_order = SortOrder::from(sort.as_str());
        }
        if let Some(limit) = file.limit {
            self.config.limit = Some(limit);
        }
        if let Some(write_back) = file.write_back {
            self.config.write_back = write_back;
        }
        self
    }

    /// Set the data directory
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = dir.into();
        self
    }

    /// Set the site base URL; a trailing slash is dropped
    pub fn site_url(mut self, url: impl Into<String>) -> Self {
        self.config.site_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn tag_authority(mut self, authority: impl Into<String>) -> Self {
        self.config.tag_authority = authority.into();
        self
    }

    /// Set the sort order
    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.config.sort_order = order;
        self
    }

    /// Set sort order from string
    pub fn sort_order_str(mut self, order: &str) -> Result<Self> {
        match order.to_uppercase().as_str() {
            "ASC" | "DESC" => {
                self.config.sort_order = SortOrder::from(order);
                Ok(self)
            }
            other => Err(Error::Config(format!(
                "Invalid sort value '{}'. Allowed values are: ASC, DESC",
                other
            ))),
        }
    }

    /// Set the limit
    pub fn limit(mut self, limit: usize) -> Self {
        self.config.limit = Some(limit);
        self
    }

    /// Clear the limit
    pub fn no_limit(mut self) -> Self {
        self.config.limit = None;
        self
    }

    pub fn write_back(mut self, enabled: bool) -> Self {
        self.config.write_back = enabled;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
