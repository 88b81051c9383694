//! Named routes
//!
//! Routes map an exact request path to a handler and can be reversed by name.
//! Names may be namespaced with colons, e.g. `"select2:auto-json"`.

use crate::error::{Select2Error, Select2Result};
use crate::views::json_response;
use http::{Request, Response, StatusCode};
use parking_lot::RwLock;
use serde_json::json;
use std::sync::Arc;

/// Something that answers a request
pub trait Handler: Send + Sync {
	fn handle(&self, request: &Request<()>) -> Response<String>;
}

impl<F> Handler for F
where
	F: Fn(&Request<()>) -> Response<String> + Send + Sync,
{
	fn handle(&self, request: &Request<()>) -> Response<String> {
		self(request)
	}
}

#[derive(Clone)]
struct Route {
	name: String,
	path: String,
	handler: Arc<dyn Handler>,
}

/// Route table
///
/// # Examples
///
/// ```
/// use http::{Request, Response};
/// use select2_widgets::UrlConf;
///
/// let urls = UrlConf::new();
/// urls.route("heavy_data_1", "/heavy_data_1/", |_: &Request<()>| {
///     Response::new("[]".to_string())
/// });
///
/// assert_eq!(urls.reverse("heavy_data_1").unwrap(), "/heavy_data_1/");
/// assert!(urls.reverse("missing").is_err());
/// ```
#[derive(Default)]
pub struct UrlConf {
	routes: RwLock<Vec<Route>>,
}

impl UrlConf {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register `handler` at `path` under `name`, replacing any route with the same name.
	pub fn route<H>(&self, name: &str, path: &str, handler: H)
	where
		H: Handler + 'static,
	{
		let route = Route {
			name: name.to_string(),
			path: path.to_string(),
			handler: Arc::new(handler),
		};
		let mut routes = self.routes.write();
		routes.retain(|r| r.name != name);
		routes.push(route);
	}

	pub fn reverse(&self, name: &str) -> Select2Result<String> {
		self.routes
			.read()
			.iter()
			.find(|r| r.name == name)
			.map(|r| r.path.clone())
			.ok_or_else(|| Select2Error::NoReverseMatch(name.to_string()))
	}

	pub fn resolve(&self, path: &str) -> Option<Arc<dyn Handler>> {
		self.routes
			.read()
			.iter()
			.find(|r| r.path == path)
			.map(|r| Arc::clone(&r.handler))
	}

	/// Registered route names in registration order.
	pub fn names(&self) -> Vec<String> {
		self.routes.read().iter().map(|r| r.name.clone()).collect()
	}

	/// Hand the request to the route matching its path, or answer 404.
	pub fn dispatch(&self, request: &Request<()>) -> Response<String> {
		let path = request.uri().path();
		match self.resolve(path) {
			Some(handler) => handler.handle(request),
			None => {
				tracing::debug!(path, "no route matches");
				json_response(StatusCode::NOT_FOUND, &json!({"detail": "Not found."}))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn ok(body: &'static str) -> impl Fn(&Request<()>) -> Response<String> + Send + Sync {
		move |_| Response::new(body.to_string())
	}

	fn get(uri: &str) -> Request<()> {
		Request::get(uri).body(()).unwrap()
	}

	#[rstest]
	fn test_dispatch_matches_path_ignoring_query() {
		// Arrange
		let urls = UrlConf::new();
		urls.route("a", "/a/", ok("A"));
		urls.route("b", "/b/", ok("B"));

		// Act
		let response = urls.dispatch(&get("/b/?term=x"));

		// Assert
		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(response.body(), "B");
	}

	#[rstest]
	fn test_dispatch_unknown_path_is_json_404() {
		let urls = UrlConf::new();

		let response = urls.dispatch(&get("/nowhere/"));

		assert_eq!(response.status(), StatusCode::NOT_FOUND);
		assert_eq!(response.body(), r#"{"detail":"Not found."}"#);
	}

	#[rstest]
	fn test_route_replaces_same_name() {
		let urls = UrlConf::new();
		urls.route("select2:auto-json", "/old.json", ok("old"));
		urls.route("select2:auto-json", "/new.json", ok("new"));

		assert_eq!(urls.names(), vec!["select2:auto-json"]);
		assert_eq!(urls.reverse("select2:auto-json").unwrap(), "/new.json");
		assert!(urls.resolve("/old.json").is_none());
	}
}
