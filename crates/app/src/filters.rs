//! Filter panel controller.
//!
//! The panel keeps the user's in-progress edits and decides when they become
//! the committed [`FilterSet`]. Search text and each numeric bound are
//! debounced independently; category, status and date edits commit on the
//! next [`FilterPanel::poll`]. The committed set is mirrored as a query string
//! so the frontend can keep it in its location bar.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use indexmap::IndexSet;
use tracing::debug;
use vitrine_primitives::{FilterSet, ProductStatus};
use vitrine_worker::Debounced;

/// Default window for the search box.
pub const SEARCH_WINDOW: Duration = Duration::from_millis(500);
/// Default window for numeric bounds.
pub const RANGE_WINDOW: Duration = Duration::from_millis(800);

/// Debounce windows per input kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterWindows {
	pub search: Duration,
	pub range: Duration,
}

impl Default for FilterWindows {
	fn default() -> Self {
		Self {
			search: SEARCH_WINDOW,
			range: RANGE_WINDOW,
		}
	}
}

/// One of the four numeric range inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
	MinPrice,
	MaxPrice,
	MinStock,
	MaxStock,
}

impl Bound {
	pub const ALL: [Self; 4] = [Self::MinPrice, Self::MaxPrice, Self::MinStock, Self::MaxStock];

	const fn index(self) -> usize {
		match self {
			Self::MinPrice => 0,
			Self::MaxPrice => 1,
			Self::MinStock => 2,
			Self::MaxStock => 3,
		}
	}
}

/// Edit state of the filter controls.
#[derive(Debug)]
pub struct FilterPanel {
	search: Debounced<String>,
	bounds: [Debounced<String>; 4],
	category: Option<String>,
	statuses: IndexSet<ProductStatus>,
	start_date: Option<NaiveDate>,
	end_date: Option<NaiveDate>,
	committed: FilterSet,
	query: String,
	dirty: bool,
	closed: bool,
}

impl FilterPanel {
	/// A panel with no constraints.
	pub fn new(windows: FilterWindows) -> Self {
		Self::from_query("", windows)
	}

	/// A panel initialized from a location query string.
	pub fn from_query(query: &str, windows: FilterWindows) -> Self {
		let committed = vitrine_query::decode(query).normalized();
		let amount = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
		let count = |v: Option<u64>| v.map(|v| v.to_string()).unwrap_or_default();
		let bounds = [
			amount(committed.min_price),
			amount(committed.max_price),
			count(committed.min_stock),
			count(committed.max_stock),
		]
		.map(|text| Debounced::new(text, windows.range));

		Self {
			search: Debounced::new(committed.search_text.clone(), windows.search),
			bounds,
			category: committed.category.clone(),
			statuses: committed.statuses.clone(),
			start_date: committed.start_date,
			end_date: committed.end_date,
			query: vitrine_query::encode(&committed),
			committed,
			dirty: false,
			closed: false,
		}
	}

	/// Search box contents, including uncommitted typing.
	pub fn search_text(&self) -> &str {
		self.search.latest()
	}

	/// Contents of a numeric input, including uncommitted typing.
	pub fn bound_text(&self, bound: Bound) -> &str {
		self.bounds[bound.index()].latest()
	}

	pub fn category(&self) -> Option<&str> {
		self.category.as_deref()
	}

	pub fn statuses(&self) -> &IndexSet<ProductStatus> {
		&self.statuses
	}

	pub fn set_search(&mut self, text: impl Into<String>, now: Instant) {
		self.search.set(text.into(), now);
	}

	pub fn set_bound(&mut self, bound: Bound, text: impl Into<String>, now: Instant) {
		self.bounds[bound.index()].set(text.into(), now);
	}

	/// Selects a category, or all categories with `None`.
	pub fn set_category(&mut self, category: Option<String>) {
		if self.closed {
			return;
		}
		self.category = category.filter(|c| !c.is_empty());
		self.dirty = true;
	}

	/// Toggles one status checkbox.
	pub fn toggle_status(&mut self, status: ProductStatus) {
		if self.closed {
			return;
		}
		if !self.statuses.shift_remove(&status) {
			self.statuses.insert(status);
		}
		self.dirty = true;
	}

	/// Sets the creation date range.
	pub fn set_dates(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
		if self.closed {
			return;
		}
		self.start_date = start;
		self.end_date = end;
		self.dirty = true;
	}

	/// Resets every control, pending edits included.
	///
	/// The cleared set is committed by the next poll without waiting for any
	/// window.
	pub fn clear(&mut self) {
		if self.closed {
			return;
		}
		self.search.reset(String::new());
		for bound in &mut self.bounds {
			bound.reset(String::new());
		}
		self.category = None;
		self.statuses.clear();
		self.start_date = None;
		self.end_date = None;
		self.dirty = true;
	}

	/// Earliest instant at which a pending edit becomes due.
	pub fn next_deadline(&self) -> Option<Instant> {
		std::iter::once(&self.search)
			.chain(&self.bounds)
			.filter_map(Debounced::deadline)
			.min()
	}

	/// Returns true when a pending edit or an immediate change awaits a poll.
	pub fn has_pending(&self) -> bool {
		self.dirty || self.search.is_pending() || self.bounds.iter().any(Debounced::is_pending)
	}

	/// Commits every edit that is due at `now`.
	///
	/// Returns the new committed set when it differs from the previous one.
	pub fn poll(&mut self, now: Instant) -> Option<&FilterSet> {
		if self.closed {
			return None;
		}
		let mut changed = std::mem::take(&mut self.dirty);
		changed |= self.search.poll(now).is_some();
		for bound in &mut self.bounds {
			changed |= bound.poll(now).is_some();
		}
		if !changed {
			return None;
		}

		let next = self.compose();
		let query = vitrine_query::encode(&next);
		if query == self.query {
			return None;
		}
		debug!(query = %query, "filters.commit");
		self.committed = next;
		self.query = query;
		Some(&self.committed)
	}

	/// Last committed filter set.
	pub fn filters(&self) -> &FilterSet {
		&self.committed
	}

	/// Last committed filter set as a query string.
	pub fn query(&self) -> &str {
		&self.query
	}

	/// Stops all further commits. Pending edits are dropped.
	pub fn close(&mut self) {
		self.search.cancel();
		for bound in &mut self.bounds {
			bound.cancel();
		}
		self.dirty = false;
		self.closed = true;
	}

	fn compose(&self) -> FilterSet {
		let text = |bound: Bound| self.bounds[bound.index()].value().as_str();
		FilterSet {
			search_text: self.search.value().trim().to_owned(),
			category: self.category.clone(),
			statuses: self.statuses.clone(),
			min_price: vitrine_query::parse_amount(text(Bound::MinPrice)),
			max_price: vitrine_query::parse_amount(text(Bound::MaxPrice)),
			min_stock: vitrine_query::parse_count(text(Bound::MinStock)),
			max_stock: vitrine_query::parse_count(text(Bound::MaxStock)),
			start_date: self.start_date,
			end_date: self.end_date,
		}
	}
}
