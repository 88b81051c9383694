//! Page number pagination for data views

use crate::error::{Select2Error, Select2Result};

const LAST_PAGE: &str = "last";

/// One page of a result list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
	pub number: usize,
	pub num_pages: usize,
	pub start: usize,
	pub end: usize,
}

impl Page {
	pub fn has_next(&self) -> bool {
		self.number < self.num_pages
	}
}

/// Locate page `page` (1-based, or `"last"`) of `count` items
///
/// The first page always exists, even when there are no items.
///
/// # Examples
///
/// ```
/// use select2_widgets::pagination::paginate;
///
/// let page = paginate(60, 25, Some("2")).unwrap();
/// assert_eq!((page.start, page.end), (25, 50));
/// assert!(page.has_next());
///
/// let last = paginate(60, 25, Some("last")).unwrap();
/// assert_eq!(last.number, 3);
/// assert!(!last.has_next());
/// ```
pub fn paginate(count: usize, per_page: usize, page: Option<&str>) -> Select2Result<Page> {
	let per_page = per_page.max(1);
	let num_pages = count.div_ceil(per_page).max(1);

	let number = match page.map(str::trim) {
		None | Some("") => 1,
		Some(LAST_PAGE) => num_pages,
		Some(raw) => {
			let n: i64 = raw.parse().map_err(|_| {
				Select2Error::InvalidPage("That page number is not an integer".to_string())
			})?;
			if n < 1 {
				return Err(Select2Error::InvalidPage(
					"That page number is less than 1".to_string(),
				));
			}
			n as usize
		}
	};

	if number > num_pages {
		return Err(Select2Error::InvalidPage(
			"That page contains no results".to_string(),
		));
	}

	let start = (number - 1) * per_page;
	Ok(Page {
		number,
		num_pages,
		start,
		end: (start + per_page).min(count),
	})
}
