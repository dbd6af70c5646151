use vitrine_primitives::{Page, PageRequest, Product};
use vitrine_query::CacheKey;

/// Load state of one cache entry.
///
/// ```text
/// Empty -> Loading -> Loaded -> LoadingMore -> Loaded -> ... -> Exhausted
///             \                     \
///              +--> Errored <--------+   (a new fetch goes back to Loading/LoadingMore)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
	/// Nothing fetched or in flight.
	Empty,
	/// First page in flight.
	Loading,
	/// At least one page present and more are available.
	Loaded,
	/// A follow-up page is in flight.
	LoadingMore,
	/// The last fetched page reported no further pages.
	Exhausted,
	/// The last attempt failed.
	Errored,
}

impl LoadState {
	/// Returns true while a fetch is in flight.
	pub const fn is_fetching(self) -> bool {
		matches!(self, Self::Loading | Self::LoadingMore)
	}
}

/// Why a fetch attempt failed, kept for display until the next attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
	pub message: String,
	pub status: Option<u16>,
}

/// Outcome of [`crate::PagedCache::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
	/// The result was recorded.
	Applied,
	/// The ticket was superseded, cancelled, or its key discarded; nothing changed.
	Stale,
}

/// Notification delivered to cache observers.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEvent {
	/// An entry changed state or gained a page.
	Changed { key: CacheKey, state: LoadState },
	/// An entry was dropped because another key became active.
	Discarded { key: CacheKey },
	/// Every entry was dropped after a mutation.
	Invalidated,
}

/// Read-only view of one entry.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
	pub state: LoadState,
	pub pages: &'a [Page],
	pub error: Option<&'a FetchFailure>,
	/// Request the next fetch will issue.
	pub next: PageRequest,
}

impl<'a> Snapshot<'a> {
	/// All accumulated products in page order.
	pub fn items(&self) -> impl Iterator<Item = &'a Product> + use<'a> {
		self.pages.iter().flat_map(|page| page.items.iter())
	}

	/// Number of accumulated products.
	pub fn len(&self) -> usize {
		self.pages.iter().map(|page| page.items.len()).sum()
	}

	/// Returns true when no products are accumulated.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Server-reported total from the most recent page.
	pub fn total(&self) -> Option<u64> {
		self.pages.last().map(|page| page.total)
	}

	/// Whether the server may hold further pages.
	pub fn has_more(&self) -> bool {
		self.pages.last().is_none_or(|page| page.has_more)
	}

	/// Whether a next-page fetch would be accepted right now.
	pub fn can_load_more(&self) -> bool {
		match self.state {
			LoadState::Loaded => true,
			LoadState::Errored => !self.pages.is_empty() && self.has_more(),
			_ => false,
		}
	}
}
