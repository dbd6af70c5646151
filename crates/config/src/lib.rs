//! Configuration for the catalog client.
//!
//! Configuration is written in TOML. Vitrine looks for it at
//! `$XDG_CONFIG_HOME/vitrine/config.toml` (or the platform equivalent) unless
//! an explicit path is given; a missing default file means "all defaults".
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3001/api"
//! timeout_ms = 10000
//!
//! [catalog]
//! page_limit = 20
//!
//! [filters]
//! search_debounce_ms = 500
//! range_debounce_ms = 800
//! ```
//!
//! # Overrides
//!
//! `VITRINE_API_BASE` replaces `api.base_url`. Command-line flags are applied
//! by the frontend on top of both.

pub mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;
use url::Url;

pub use error::{ConfigError, Result};

/// Environment variable overriding `api.base_url`.
pub const ENV_API_BASE: &str = "VITRINE_API_BASE";

/// Parsed configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Remote API settings.
	pub api: ApiConfig,
	/// List paging settings.
	pub catalog: CatalogConfig,
	/// Filter input debounce settings.
	pub filters: FilterConfig,
}

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
	/// Base URL every request path is appended to.
	pub base_url: String,
	/// Default per-request timeout in milliseconds.
	pub timeout_ms: u64,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			base_url: "http://localhost:3001/api".into(),
			timeout_ms: 10_000,
		}
	}
}

/// List paging settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
	/// Products requested per page.
	pub page_limit: u32,
}

impl Default for CatalogConfig {
	fn default() -> Self {
		Self { page_limit: 20 }
	}
}

/// Debounce windows for filter inputs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
	/// Window for the free-text search box.
	pub search_debounce_ms: u64,
	/// Window for numeric range bounds.
	pub range_debounce_ms: u64,
}

impl Default for FilterConfig {
	fn default() -> Self {
		Self {
			search_debounce_ms: 500,
			range_debounce_ms: 800,
		}
	}
}

impl FilterConfig {
	pub fn search_window(&self) -> Duration {
		Duration::from_millis(self.search_debounce_ms)
	}

	pub fn range_window(&self) -> Duration {
		Duration::from_millis(self.range_debounce_ms)
	}
}

impl Config {
	/// Parses and validates a TOML document.
	pub fn from_toml(input: &str) -> Result<Self> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Loads configuration from `path`, or from [`default_path`] when `None`.
	///
	/// An explicit path must exist. Environment overrides are applied after
	/// the file is read.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		let (path, required) = match path {
			Some(path) => (Some(path.to_path_buf()), true),
			None => (default_path(), false),
		};

		let mut config = match path {
			Some(path) if required || path.exists() => {
				let text = std::fs::read_to_string(&path).map_err(|error| ConfigError::Io {
					path: path.clone(),
					error,
				})?;
				debug!(path = %path.display(), "config.load");
				toml::from_str(&text)?
			}
			_ => Self::default(),
		};

		config.apply_env(|key| std::env::var(key).ok());
		config.validate()?;
		Ok(config)
	}

	/// Applies environment overrides read through `lookup`.
	pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
		if let Some(base) = lookup(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
			debug!(base_url = %base, "config.env_override");
			self.api.base_url = base;
		}
	}

	/// Checks values that the schema alone cannot.
	pub fn validate(&self) -> Result<()> {
		self.api_base()?;
		if self.api.timeout_ms == 0 {
			return Err(ConfigError::InvalidValue {
				key: "api.timeout_ms",
				reason: "must be greater than zero".into(),
			});
		}
		if self.catalog.page_limit == 0 {
			return Err(ConfigError::InvalidValue {
				key: "catalog.page_limit",
				reason: "must be greater than zero".into(),
			});
		}
		Ok(())
	}

	/// Parsed API base URL.
	pub fn api_base(&self) -> Result<Url> {
		Url::parse(&self.api.base_url).map_err(|error| ConfigError::InvalidUrl {
			value: self.api.base_url.clone(),
			error,
		})
	}

	/// Default per-request timeout.
	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.api.timeout_ms)
	}
}

/// `$XDG_CONFIG_HOME/vitrine/config.toml`, if a config directory exists.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("vitrine").join("config.toml"))
}
