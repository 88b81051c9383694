//! JSON data views
//!
//! [`AutoResponseView`] answers the AJAX searches of every model widget. It
//! finds the widget's data source through the signed `field_id` parameter,
//! so no per-widget view has to be written.

use crate::cache::WidgetCache;
use crate::context::Select2Context;
use crate::error::{Select2Error, Select2Result};
use crate::pagination::paginate;
use crate::search::dependent_lookups;
use crate::signing::FieldIdSigner;
use crate::urls::Handler;
use http::header::{CONTENT_TYPE, HeaderValue};
use http::{Request, Response, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;

/// Build a response with a JSON body.
pub fn json_response(status: StatusCode, body: &Value) -> Response<String> {
	let mut response = Response::new(body.to_string());
	*response.status_mut() = status;
	response
		.headers_mut()
		.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
	response
}

/// Decoded query string of a request
///
/// # Examples
///
/// ```
/// use http::Request;
/// use select2_widgets::views::QueryParams;
///
/// let request = Request::get("/auto.json?term=abbey+road&city%5B%5D=1&city%5B%5D=2")
///     .body(())
///     .unwrap();
/// let params = QueryParams::from_request(&request);
///
/// assert_eq!(params.get("term"), Some("abbey road"));
/// assert_eq!(params.get_all("city[]"), vec!["1", "2"]);
/// assert_eq!(params.get("page"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
	pairs: Vec<(String, String)>,
}

impl QueryParams {
	pub fn from_request<B>(request: &Request<B>) -> Self {
		let pairs = request
			.uri()
			.query()
			.map(|query| {
				url::form_urlencoded::parse(query.as_bytes())
					.into_owned()
					.collect()
			})
			.unwrap_or_default();
		Self { pairs }
	}

	/// First value for `name`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.pairs
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	pub fn get_all(&self, name: &str) -> Vec<&str> {
		self.pairs
			.iter()
			.filter(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
			.collect()
	}
}

/// Search endpoint shared by all model widgets
///
/// Query parameters: `field_id` (required), `term`, `page` and the values of
/// the widget's dependent fields. Responds with
/// `{"results": [{"id", "text"}, ...], "more": bool}`.
#[derive(Clone)]
pub struct AutoResponseView {
	signer: FieldIdSigner,
	cache: Arc<dyn WidgetCache>,
	cache_prefix: String,
}

impl AutoResponseView {
	pub fn new(
		signer: FieldIdSigner,
		cache: Arc<dyn WidgetCache>,
		cache_prefix: impl Into<String>,
	) -> Self {
		Self {
			signer,
			cache,
			cache_prefix: cache_prefix.into(),
		}
	}

	pub fn from_context(context: &Select2Context) -> Self {
		Self::new(
			context.signer().clone(),
			context.cache(),
			context.settings().cache_prefix.clone(),
		)
	}

	pub fn handle(&self, request: &Request<()>) -> Response<String> {
		match self.respond(request) {
			Ok(body) => json_response(StatusCode::OK, &body),
			Err(e) if e.is_not_found() => {
				tracing::warn!(path = request.uri().path(), error = %e, "rejected select2 data request");
				json_response(StatusCode::NOT_FOUND, &json!({"detail": e.to_string()}))
			}
			Err(e) => {
				tracing::error!(path = request.uri().path(), error = %e, "select2 data request failed");
				json_response(
					StatusCode::INTERNAL_SERVER_ERROR,
					&json!({"detail": e.to_string()}),
				)
			}
		}
	}

	fn respond(&self, request: &Request<()>) -> Select2Result<Value> {
		let params = QueryParams::from_request(request);

		let field_id = params
			.get("field_id")
			.filter(|id| !id.is_empty())
			.ok_or(Select2Error::MissingFieldId)?;
		let key = self.signer.unsign(field_id)?;
		let cached = self
			.cache
			.get(&format!("{}{}", self.cache_prefix, key))
			.ok_or(Select2Error::FieldIdNotFound)?;
		if cached.url != request.uri().path() {
			return Err(Select2Error::WrongView);
		}

		let term = params.get("term").unwrap_or_default();
		let dependent = dependent_lookups(cached.source.dependent_fields(), |name| {
			params.get_all(name).into_iter().map(str::to_string).collect()
		});

		let results = cached.source.results(term, &dependent)?;
		let page = paginate(results.len(), cached.source.max_results(), params.get("page"))?;

		Ok(json!({
			"results": &results[page.start..page.end],
			"more": page.has_next(),
		}))
	}
}

impl Handler for AutoResponseView {
	fn handle(&self, request: &Request<()>) -> Response<String> {
		AutoResponseView::handle(self, request)
	}
}
