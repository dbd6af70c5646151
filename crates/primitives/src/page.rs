use serde::{Deserialize, Serialize};

use crate::Product;

/// Number of products requested per page when nothing else is configured.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Position of one page within a paged listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
	/// 1-based page number.
	pub page: u32,
	/// Maximum items per page.
	pub limit: u32,
}

impl PageRequest {
	/// Returns the first page with the given limit.
	pub const fn first(limit: u32) -> Self {
		Self { page: 1, limit }
	}

	/// Returns the request for the page after this one.
	pub const fn next(self) -> Self {
		Self {
			page: self.page.saturating_add(1),
			limit: self.limit,
		}
	}
}

impl Default for PageRequest {
	fn default() -> Self {
		Self::first(DEFAULT_PAGE_LIMIT)
	}
}

/// One fetch result for a given filter set and page number.
///
/// Deserializes from the list endpoint body `{ data, total, hasMore, page, limit }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
	/// Products on this page, in server order.
	#[serde(rename = "data")]
	pub items: Vec<Product>,
	/// Total matching products across all pages.
	pub total: u64,
	/// Whether a further page exists.
	pub has_more: bool,
	/// 1-based page number.
	pub page: u32,
	/// Page size the server applied.
	#[serde(default)]
	pub limit: u32,
}
