//! Static asset declarations for widgets and forms

use crate::field::escape_attribute;
use std::collections::BTreeMap;

/// JavaScript and CSS files a widget needs on the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Media {
	pub js: Vec<String>,
	/// Stylesheets keyed by medium (`"screen"`, `"all"`, ...)
	pub css: BTreeMap<String, Vec<String>>,
}

impl Media {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_js<I, S>(mut self, files: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		for file in files {
			push_unique(&mut self.js, file.into());
		}
		self
	}

	pub fn with_css<I, S>(mut self, medium: &str, files: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let list = self.css.entry(medium.to_string()).or_default();
		for file in files {
			push_unique(list, file.into());
		}
		self
	}

	/// Merge another declaration into this one, keeping first-seen order
	///
	/// # Examples
	///
	/// ```
	/// use select2_forms::Media;
	///
	/// let a = Media::new().with_js(["a.js", "b.js"]);
	/// let b = Media::new().with_js(["b.js", "c.js"]);
	/// assert_eq!(a.merge(&b).js, vec!["a.js", "b.js", "c.js"]);
	/// ```
	pub fn merge(mut self, other: &Media) -> Self {
		for file in &other.js {
			push_unique(&mut self.js, file.clone());
		}
		for (medium, files) in &other.css {
			let list = self.css.entry(medium.clone()).or_default();
			for file in files {
				push_unique(list, file.clone());
			}
		}
		self
	}

	pub fn is_empty(&self) -> bool {
		self.js.is_empty() && self.css.values().all(Vec::is_empty)
	}

	pub fn render_js(&self) -> String {
		self.js
			.iter()
			.map(|path| format!("<script src=\"{}\"></script>", escape_attribute(path)))
			.collect::<Vec<_>>()
			.join("\n")
	}

	pub fn render_css(&self) -> String {
		let mut tags = Vec::new();
		for (medium, files) in &self.css {
			for path in files {
				tags.push(format!(
					"<link href=\"{}\" media=\"{}\" rel=\"stylesheet\">",
					escape_attribute(path),
					escape_attribute(medium)
				));
			}
		}
		tags.join("\n")
	}

	/// CSS links followed by script tags.
	pub fn render(&self) -> String {
		let css = self.render_css();
		let js = self.render_js();
		match (css.is_empty(), js.is_empty()) {
			(true, _) => js,
			(_, true) => css,
			_ => format!("{}\n{}", css, js),
		}
	}
}

fn push_unique(list: &mut Vec<String>, file: String) {
	if !list.contains(&file) {
		list.push(file);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_media_render_orders_css_before_js() {
		// Arrange
		let media = Media::new()
			.with_js(["select2.min.js"])
			.with_css("screen", ["select2.min.css"]);

		// Act
		let html = media.render();

		// Assert
		assert_eq!(
			html,
			"<link href=\"select2.min.css\" media=\"screen\" rel=\"stylesheet\">\n<script src=\"select2.min.js\"></script>"
		);
	}

	#[rstest]
	fn test_media_merge_deduplicates_css() {
		let a = Media::new().with_css("screen", ["a.css"]);
		let b = Media::new().with_css("screen", ["a.css", "b.css"]);
		let merged = a.merge(&b);
		assert_eq!(merged.css["screen"], vec!["a.css", "b.css"]);
	}

	#[rstest]
	fn test_empty_media() {
		assert!(Media::new().is_empty());
		assert_eq!(Media::new().render(), "");
	}
}
