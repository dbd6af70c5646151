//! Bidirectional mapping between [`FilterSet`] and a URL query string.
//!
//! The codec is pure and lossy-safe:
//!
//! - Encoding emits fields in a fixed order and omits empty or absent ones.
//! - `status` is a repeated key; its values keep selection order both ways.
//! - Decoding ignores unknown keys and treats malformed values as unset
//!   instead of failing.
//!
//! For every valid filter set, `decode(&encode(&f)) == f.normalized()`.
//!
//! # Keys
//!
//! ```text
//! search  category  status*  minPrice  maxPrice  minStock  maxStock
//! startDate  endDate  page  limit
//! ```

mod key;
#[cfg(test)]
mod tests;

use std::str::FromStr;

use chrono::NaiveDate;
use url::form_urlencoded;
use vitrine_primitives::{FilterSet, PageRequest, ProductStatus, is_valid_amount};

pub use key::CacheKey;

/// Query parameter names.
pub mod keys {
	pub const SEARCH: &str = "search";
	pub const CATEGORY: &str = "category";
	pub const STATUS: &str = "status";
	pub const MIN_PRICE: &str = "minPrice";
	pub const MAX_PRICE: &str = "maxPrice";
	pub const MIN_STOCK: &str = "minStock";
	pub const MAX_STOCK: &str = "maxStock";
	pub const START_DATE: &str = "startDate";
	pub const END_DATE: &str = "endDate";
	pub const PAGE: &str = "page";
	pub const LIMIT: &str = "limit";
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Encodes a filter set as a query string without a leading `?`.
pub fn encode(filters: &FilterSet) -> String {
	let mut out = form_urlencoded::Serializer::new(String::new());
	append_filters(&mut out, filters);
	out.finish()
}

/// Encodes a filter set followed by `page` and `limit`.
pub fn encode_request(filters: &FilterSet, request: PageRequest) -> String {
	let mut out = form_urlencoded::Serializer::new(String::new());
	append_filters(&mut out, filters);
	out.append_pair(keys::PAGE, &request.page.to_string());
	out.append_pair(keys::LIMIT, &request.limit.to_string());
	out.finish()
}

/// Decodes a query string into a filter set.
///
/// Never fails: unknown keys, unknown statuses, negative or malformed
/// numbers, and malformed dates are all dropped.
pub fn decode(query: &str) -> FilterSet {
	decode_request(query).0
}

/// Decodes a query string into a filter set plus the page request, if both
/// `page` and `limit` are present and valid. A missing `limit` falls back to
/// the default page size.
pub fn decode_request(query: &str) -> (FilterSet, Option<PageRequest>) {
	let query = query.strip_prefix('?').unwrap_or(query);
	let mut filters = FilterSet::default();
	let mut page = None;
	let mut limit = None;

	for (key, value) in form_urlencoded::parse(query.as_bytes()) {
		match key.as_ref() {
			keys::SEARCH => filters.search_text = value.into_owned(),
			keys::CATEGORY => filters.category = Some(value.into_owned()).filter(|c| !c.is_empty()),
			keys::STATUS => {
				if let Ok(status) = value.parse::<ProductStatus>() {
					filters.statuses.insert(status);
				}
			}
			keys::MIN_PRICE => filters.min_price = parse_amount(&value),
			keys::MAX_PRICE => filters.max_price = parse_amount(&value),
			keys::MIN_STOCK => filters.min_stock = parse_count(&value),
			keys::MAX_STOCK => filters.max_stock = parse_count(&value),
			keys::START_DATE => filters.start_date = parse_date(&value),
			keys::END_DATE => filters.end_date = parse_date(&value),
			keys::PAGE => page = parse_number::<u32>(&value).filter(|&p| p >= 1),
			keys::LIMIT => limit = parse_number::<u32>(&value).filter(|&l| l >= 1),
			_ => {}
		}
	}

	let request = page.map(|page| PageRequest {
		page,
		limit: limit.unwrap_or(PageRequest::default().limit),
	});
	(filters, request)
}

fn append_filters(out: &mut form_urlencoded::Serializer<'_, String>, filters: &FilterSet) {
	if !filters.search_text.is_empty() {
		out.append_pair(keys::SEARCH, &filters.search_text);
	}
	if let Some(category) = filters.category.as_deref().filter(|c| !c.is_empty()) {
		out.append_pair(keys::CATEGORY, category);
	}
	for status in &filters.statuses {
		out.append_pair(keys::STATUS, status.as_str());
	}

	let amounts = [(keys::MIN_PRICE, filters.min_price), (keys::MAX_PRICE, filters.max_price)];
	for (key, value) in amounts {
		if let Some(value) = value.filter(|v| is_valid_amount(*v)) {
			out.append_pair(key, &value.to_string());
		}
	}

	let counts = [(keys::MIN_STOCK, filters.min_stock), (keys::MAX_STOCK, filters.max_stock)];
	for (key, value) in counts {
		if let Some(value) = value {
			out.append_pair(key, &value.to_string());
		}
	}

	let dates = [(keys::START_DATE, filters.start_date), (keys::END_DATE, filters.end_date)];
	for (key, value) in dates {
		if let Some(value) = value {
			out.append_pair(key, &value.format(DATE_FORMAT).to_string());
		}
	}
}

/// Reads a price bound: a non-negative finite decimal, otherwise unset.
pub fn parse_amount(raw: &str) -> Option<f64> {
	raw.trim().parse::<f64>().ok().filter(|v| is_valid_amount(*v))
}

/// Reads a stock bound: a non-negative integer, otherwise unset.
pub fn parse_count(raw: &str) -> Option<u64> {
	parse_number(raw)
}

fn parse_number<T: FromStr>(raw: &str) -> Option<T> {
	raw.trim().parse().ok()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
	NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}
