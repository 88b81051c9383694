//! Shared select2 state
//!
//! A [`Select2Context`] owns the settings, the field id signer, the widget
//! cache and the route table. Widgets and data views built from one context
//! see the same registrations.

use crate::cache::{InMemoryWidgetCache, WidgetCache};
use crate::error::Select2Result;
use crate::settings::Select2Settings;
use crate::signing::FieldIdSigner;
use crate::urls::UrlConf;
use crate::views::AutoResponseView;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Route name of the auto-response view.
pub const AUTO_VIEW_NAME: &str = "select2:auto-json";

struct Inner {
	settings: Select2Settings,
	signer: FieldIdSigner,
	cache: Arc<dyn WidgetCache>,
	urls: UrlConf,
}

/// Everything widgets and data views share
///
/// Cloning is cheap; all clones refer to the same cache and routes.
///
/// # Examples
///
/// ```
/// use select2_widgets::{AUTO_VIEW_NAME, Select2Context, Select2Settings};
///
/// let context = Select2Context::new(Select2Settings::default()).unwrap();
/// assert_eq!(context.reverse(AUTO_VIEW_NAME).unwrap(), "/select2/fields/auto.json");
/// ```
#[derive(Clone)]
pub struct Select2Context {
	inner: Arc<Inner>,
}

impl Select2Context {
	/// Validate `settings`, create an in-memory widget cache and mount the
	/// auto-response view.
	pub fn new(settings: Select2Settings) -> Select2Result<Self> {
		let mut cache = InMemoryWidgetCache::new().with_max_entries(settings.cache_max_entries);
		if let Some(ttl) = settings.cache_ttl_secs {
			cache = cache.with_default_ttl(Duration::from_secs(ttl));
		}
		Self::with_cache(settings, Arc::new(cache))
	}

	pub fn with_cache(settings: Select2Settings, cache: Arc<dyn WidgetCache>) -> Select2Result<Self> {
		settings.validate()?;
		let context = Self {
			inner: Arc::new(Inner {
				signer: FieldIdSigner::new(&settings.secret_key),
				settings,
				cache,
				urls: UrlConf::new(),
			}),
		};
		let auto_view = AutoResponseView::from_context(&context);
		context
			.urls()
			.route(AUTO_VIEW_NAME, &context.settings().auto_view_path, auto_view);
		tracing::debug!(
			path = %context.settings().auto_view_path,
			"mounted select2 auto-response view"
		);
		Ok(context)
	}

	pub fn settings(&self) -> &Select2Settings {
		&self.inner.settings
	}

	pub fn signer(&self) -> &FieldIdSigner {
		&self.inner.signer
	}

	pub fn cache(&self) -> Arc<dyn WidgetCache> {
		Arc::clone(&self.inner.cache)
	}

	pub fn urls(&self) -> &UrlConf {
		&self.inner.urls
	}

	pub fn reverse(&self, name: &str) -> Select2Result<String> {
		self.inner.urls.reverse(name)
	}

	/// Cache key of the widget with `id`.
	pub fn cache_key(&self, id: &Uuid) -> String {
		format!("{}{}", self.inner.settings.cache_prefix, id)
	}
}
