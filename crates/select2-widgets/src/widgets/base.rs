use crate::context::Select2Context;
use crate::settings::Select2Settings;
use select2_forms::Media;
use select2_forms::widget::{Attrs, SelectOption, attrs_from, options_from_choices};

const SELECT2_CLASS: &str = "django-select2";

/// How many values a select2 widget holds, and whether free-text tags are allowed
pub trait SelectKind: Send + Sync + 'static {
	const MULTIPLE: bool;
	const TAGS: bool;
}

/// One value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Single;

/// Any number of values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Multiple;

/// Any number of values, new ones may be typed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tags;

impl SelectKind for Single {
	const MULTIPLE: bool = false;
	const TAGS: bool = false;
}

impl SelectKind for Multiple {
	const MULTIPLE: bool = true;
	const TAGS: bool = false;
}

impl SelectKind for Tags {
	const MULTIPLE: bool = true;
	const TAGS: bool = true;
}

/// Defaults added by tag widgets.
pub(crate) fn tag_attrs() -> Attrs {
	attrs_from([
		("data-minimum-input-length", "1"),
		("data-tags", "true"),
		("data-token-separators", r#"[",", " "]"#),
	])
}

/// Scripts and stylesheets every select2 widget needs
///
/// # Examples
///
/// ```
/// use select2_widgets::Select2Settings;
/// use select2_widgets::widgets::select2_media;
///
/// let media = select2_media(&Select2Settings::new().with_language("de"));
/// assert!(media.js[1].ends_with("/i18n/de.js"));
/// assert_eq!(media.js.last().map(String::as_str), Some("django_select2/django_select2.js"));
/// assert!(media.css["screen"].contains(&"django_select2/django_select2.css".to_string()));
/// ```
pub fn select2_media(settings: &Select2Settings) -> Media {
	let mut js = settings.js.clone();
	js.extend(settings.i18n_file());
	js.push("django_select2/django_select2.js".to_string());

	let mut css = settings.css.clone();
	css.push("django_select2/django_select2.css".to_string());

	Media::new().with_js(js).with_css("screen", css)
}

/// State and attribute handling shared by all select2 widgets
#[derive(Debug, Clone)]
pub struct Select2Base {
	pub(crate) attrs: Attrs,
	pub(crate) required: bool,
	empty_label: String,
	language: String,
	theme: String,
	media: Media,
}

impl Select2Base {
	pub fn new(context: &Select2Context) -> Self {
		let settings = context.settings();
		Self {
			attrs: Attrs::new(),
			required: false,
			empty_label: String::new(),
			language: settings.language.clone(),
			theme: settings.theme.clone(),
			media: select2_media(settings),
		}
	}

	pub fn set_attrs(&mut self, attrs: Attrs) {
		self.attrs.extend(attrs);
	}

	pub fn set_empty_label(&mut self, label: impl Into<String>) {
		self.empty_label = label.into();
	}

	pub fn media(&self) -> Media {
		self.media.clone()
	}

	/// Final attributes of a render
	///
	/// Later sources win: select2 defaults, then each of `layers`, then the
	/// widget's own attrs, then `extra`. The `django-select2` class is always
	/// appended.
	pub fn build_attrs(&self, layers: &[Attrs], extra: &Attrs) -> Attrs {
		let mut attrs = attrs_from([
			("lang", self.language.as_str()),
			("data-minimum-input-length", "0"),
			("data-theme", self.theme.as_str()),
		]);
		if self.required {
			attrs.insert("data-allow-clear".to_string(), "false".to_string());
		} else {
			attrs.insert("data-allow-clear".to_string(), "true".to_string());
			attrs.insert("data-placeholder".to_string(), self.empty_label.clone());
		}

		for layer in layers {
			attrs.extend(layer.clone());
		}
		attrs.extend(self.attrs.clone());
		attrs.extend(extra.clone());

		add_class(&mut attrs, SELECT2_CLASS);
		attrs
	}

	/// Options for `choices`, led by an empty option when a single select may be cleared.
	pub fn options(
		&self,
		choices: &[(String, String)],
		selected: &[String],
		multiple: bool,
	) -> Vec<SelectOption> {
		let mut options = options_from_choices(choices, selected, multiple);
		self.add_empty_option(&mut options, multiple);
		options
	}

	pub(crate) fn add_empty_option(&self, options: &mut Vec<SelectOption>, multiple: bool) {
		let has_empty = options.first().is_some_and(|o| o.value.is_empty());
		if !self.required && !multiple && !has_empty {
			options.insert(0, SelectOption::new("", "", false));
		}
	}
}

/// Append `class` to the `class` attribute.
pub(crate) fn add_class(attrs: &mut Attrs, class: &str) {
	match attrs.get_mut("class") {
		Some(existing) if !existing.is_empty() => {
			existing.push(' ');
			existing.push_str(class);
		}
		_ => {
			attrs.insert("class".to_string(), class.to_string());
		}
	}
}
