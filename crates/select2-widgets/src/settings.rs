//! Select2 settings
//!
//! Settings can be built in code, read from `SELECT2_*` environment
//! variables, or loaded from a `.toml` / `.json` file. Missing keys fall back
//! to their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const SELECT2_VERSION_URL: &str = "https://cdnjs.cloudflare.com/ajax/libs/select2/4.0.13";

/// Settings shared by every select2 widget and data view
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Select2Settings {
	/// select2 JavaScript files
	#[serde(default = "default_js")]
	pub js: Vec<String>,

	/// select2 stylesheets, served for the `screen` medium
	#[serde(default = "default_css")]
	pub css: Vec<String>,

	/// Directory holding select2's translation files
	#[serde(default = "default_i18n_path")]
	pub i18n_path: String,

	/// Languages with a translation file under `i18n_path`
	#[serde(default = "default_i18n_languages")]
	pub i18n_available_languages: Vec<String>,

	#[serde(default = "default_theme")]
	pub theme: String,

	/// Active language, rendered as the widget's `lang` attribute
	#[serde(default = "default_language")]
	pub language: String,

	/// Prefix of widget cache keys
	#[serde(default = "default_cache_prefix")]
	pub cache_prefix: String,

	/// Lifetime of cached widget registrations; `None` keeps them forever
	#[serde(default)]
	pub cache_ttl_secs: Option<u64>,

	/// Most widget registrations kept at once; the oldest go first
	#[serde(default = "default_cache_max_entries")]
	pub cache_max_entries: usize,

	/// Key used to sign field ids
	#[serde(default = "default_secret_key")]
	pub secret_key: String,

	/// Path the auto-response view is mounted on
	#[serde(default = "default_auto_view_path")]
	pub auto_view_path: String,
}

impl Default for Select2Settings {
	fn default() -> Self {
		Self {
			js: default_js(),
			css: default_css(),
			i18n_path: default_i18n_path(),
			i18n_available_languages: default_i18n_languages(),
			theme: default_theme(),
			language: default_language(),
			cache_prefix: default_cache_prefix(),
			cache_ttl_secs: None,
			cache_max_entries: default_cache_max_entries(),
			secret_key: default_secret_key(),
			auto_view_path: default_auto_view_path(),
		}
	}
}

impl Select2Settings {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
		self.secret_key = secret_key.into();
		self
	}

	pub fn with_language(mut self, language: impl Into<String>) -> Self {
		self.language = language.into();
		self
	}

	pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
		self.theme = theme.into();
		self
	}

	pub fn with_cache_ttl_secs(mut self, ttl: u64) -> Self {
		self.cache_ttl_secs = Some(ttl);
		self
	}

	pub fn with_cache_max_entries(mut self, max_entries: usize) -> Self {
		self.cache_max_entries = max_entries;
		self
	}

	/// Validate settings
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.secret_key.is_empty() {
			return Err(SettingsError::ValidationError(
				"SELECT2_SECRET_KEY must not be empty".to_string(),
			));
		}
		if self.cache_max_entries == 0 {
			return Err(SettingsError::ValidationError(
				"SELECT2_CACHE_MAX_ENTRIES must be at least 1".to_string(),
			));
		}
		if self.cache_prefix.is_empty() {
			return Err(SettingsError::ValidationError(
				"SELECT2_CACHE_PREFIX must not be empty".to_string(),
			));
		}
		if !self.auto_view_path.starts_with('/') {
			return Err(SettingsError::ValidationError(format!(
				"SELECT2_AUTO_VIEW_PATH must start with '/', got '{}'",
				self.auto_view_path
			)));
		}
		Ok(())
	}

	/// Load settings from environment variables
	///
	/// List values (`SELECT2_JS`, `SELECT2_CSS`,
	/// `SELECT2_I18N_AVAILABLE_LANGUAGES`) are comma separated.
	pub fn from_env() -> Result<Self, SettingsError> {
		let mut settings = Self::default();

		if let Some(js) = env_list("SELECT2_JS") {
			settings.js = js;
		}
		if let Some(css) = env_list("SELECT2_CSS") {
			settings.css = css;
		}
		if let Ok(path) = std::env::var("SELECT2_I18N_PATH") {
			settings.i18n_path = path;
		}
		if let Some(languages) = env_list("SELECT2_I18N_AVAILABLE_LANGUAGES") {
			settings.i18n_available_languages = languages;
		}
		if let Ok(theme) = std::env::var("SELECT2_THEME") {
			settings.theme = theme;
		}
		if let Ok(language) = std::env::var("SELECT2_LANGUAGE") {
			settings.language = language;
		}
		if let Ok(prefix) = std::env::var("SELECT2_CACHE_PREFIX") {
			settings.cache_prefix = prefix;
		}
		if let Ok(ttl) = std::env::var("SELECT2_CACHE_TTL") {
			let ttl = ttl.trim().parse().map_err(|e| {
				SettingsError::ParseError(format!("SELECT2_CACHE_TTL '{}': {}", ttl, e))
			})?;
			settings.cache_ttl_secs = Some(ttl);
		}
		if let Ok(max_entries) = std::env::var("SELECT2_CACHE_MAX_ENTRIES") {
			settings.cache_max_entries = max_entries.trim().parse().map_err(|e| {
				SettingsError::ParseError(format!(
					"SELECT2_CACHE_MAX_ENTRIES '{}': {}",
					max_entries, e
				))
			})?;
		}
		if let Ok(secret) = std::env::var("SELECT2_SECRET_KEY") {
			settings.secret_key = secret;
		}
		if let Ok(path) = std::env::var("SELECT2_AUTO_VIEW_PATH") {
			settings.auto_view_path = path;
		}

		Ok(settings)
	}

	/// Load settings from a `.toml` or `.json` file
	pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
		let path = path.into();
		let contents = std::fs::read_to_string(&path).map_err(|e| {
			SettingsError::FileError(format!("Failed to read {}: {}", path.display(), e))
		})?;

		match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => toml::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e))),
			Some("json") => serde_json::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("JSON parse error: {}", e))),
			_ => Err(SettingsError::UnsupportedFormat(
				"Supported formats: .toml, .json".to_string(),
			)),
		}
	}

	/// Translation file for the active language, if select2 ships one
	///
	/// Tries the exact code, then a case-insensitive match, then the base
	/// language (`"pt-pt"` falls back to `"pt"`).
	///
	/// # Examples
	///
	/// ```
	/// use select2_widgets::Select2Settings;
	///
	/// let settings = Select2Settings::new().with_language("de-at");
	/// assert_eq!(
	///     settings.i18n_file().as_deref(),
	///     Some("https://cdnjs.cloudflare.com/ajax/libs/select2/4.0.13/js/i18n/de.js")
	/// );
	///
	/// let settings = Select2Settings::new().with_language("tlh");
	/// assert_eq!(settings.i18n_file(), None);
	/// ```
	pub fn i18n_file(&self) -> Option<String> {
		let available = &self.i18n_available_languages;
		let wanted = self.language.as_str();
		let base = wanted.split(['-', '_']).next().unwrap_or(wanted);

		let found = available
			.iter()
			.find(|lang| lang.as_str() == wanted)
			.or_else(|| available.iter().find(|lang| lang.eq_ignore_ascii_case(wanted)))
			.or_else(|| available.iter().find(|lang| lang.eq_ignore_ascii_case(base)))?;
		Some(format!("{}/{}.js", self.i18n_path.trim_end_matches('/'), found))
	}
}

fn env_list(key: &str) -> Option<Vec<String>> {
	let raw = std::env::var(key).ok()?;
	Some(
		raw.split(',')
			.map(|s| s.trim().to_string())
			.filter(|s| !s.is_empty())
			.collect(),
	)
}

fn default_js() -> Vec<String> {
	vec![format!("{}/js/select2.min.js", SELECT2_VERSION_URL)]
}

fn default_css() -> Vec<String> {
	vec![format!("{}/css/select2.min.css", SELECT2_VERSION_URL)]
}

fn default_i18n_path() -> String {
	format!("{}/js/i18n", SELECT2_VERSION_URL)
}

fn default_i18n_languages() -> Vec<String> {
	[
		"ar", "az", "bg", "ca", "cs", "da", "de", "el", "en", "es", "et", "eu", "fa", "fi", "fr",
		"gl", "he", "hi", "hr", "hu", "id", "is", "it", "ja", "km", "ko", "lt", "lv", "mk", "ms",
		"nb", "nl", "pl", "pt-BR", "pt", "ro", "ru", "sk", "sr-Cyrl", "sr", "sv", "th", "tr", "uk",
		"vi", "zh-CN", "zh-TW",
	]
	.iter()
	.map(|lang| lang.to_string())
	.collect()
}

fn default_theme() -> String {
	"default".to_string()
}

fn default_language() -> String {
	"en".to_string()
}

fn default_cache_prefix() -> String {
	"select2_".to_string()
}

fn default_cache_max_entries() -> usize {
	10_000
}

fn default_secret_key() -> String {
	"change-me-in-production".to_string()
}

fn default_auto_view_path() -> String {
	"/select2/fields/auto.json".to_string()
}

/// Settings errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("File error: {0}")]
	FileError(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Unsupported format: {0}")]
	UnsupportedFormat(String),
}
