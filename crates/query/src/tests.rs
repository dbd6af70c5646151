use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use vitrine_primitives::{FilterSet, PageRequest, ProductStatus};

use super::*;

fn sample_filters() -> FilterSet {
	FilterSet {
		search_text: "oak desk".into(),
		category: Some("Office & Home".into()),
		statuses: [ProductStatus::Inactive, ProductStatus::Active].into_iter().collect(),
		min_price: Some(10.5),
		max_price: Some(200.0),
		min_stock: Some(0),
		max_stock: Some(40),
		start_date: NaiveDate::from_ymd_opt(2024, 1, 31),
		end_date: NaiveDate::from_ymd_opt(2024, 12, 1),
	}
}

#[test]
fn test_encode_fixed_order_and_repeated_status() {
	assert_eq!(
		encode(&sample_filters()),
		"search=oak+desk&category=Office+%26+Home&status=Inactive&status=Active\
		 &minPrice=10.5&maxPrice=200&minStock=0&maxStock=40\
		 &startDate=2024-01-31&endDate=2024-12-01"
	);
}

#[test]
fn test_encode_empty_filters_is_empty_string() {
	assert_eq!(encode(&FilterSet::default()), "");
	let blank_category = FilterSet {
		category: Some(String::new()),
		..FilterSet::default()
	};
	assert_eq!(encode(&blank_category), "");
}

#[test]
fn test_decode_restores_sample() {
	let filters = sample_filters();
	assert_eq!(decode(&encode(&filters)), filters);
}

#[test]
fn test_decode_preserves_status_order() {
	let filters = decode("status=Discontinued&status=Active&status=Inactive");
	let order: Vec<_> = filters.statuses.into_iter().collect();
	assert_eq!(
		order,
		[ProductStatus::Discontinued, ProductStatus::Active, ProductStatus::Inactive]
	);
}

#[test]
fn test_decode_ignores_unknown_keys_and_statuses() {
	let filters = decode("?foo=bar&status=Archived&status=Active&search=lamp");
	assert_eq!(filters, FilterSet::search("lamp").with_status(ProductStatus::Active));
}

#[test]
fn test_decode_malformed_numbers_are_unset() {
	let filters = decode("minPrice=abc&maxPrice=-4&minStock=1.5&maxStock=NaN&startDate=2024-13-01");
	assert_eq!(filters, FilterSet::default());
}

#[test]
fn test_decode_keeps_inverted_ranges() {
	let filters = decode("minPrice=50&maxPrice=5&minStock=9&maxStock=1");
	assert_eq!(filters.min_price, Some(50.0));
	assert_eq!(filters.max_price, Some(5.0));
	assert_eq!(filters.min_stock, Some(9));
	assert_eq!(filters.max_stock, Some(1));
}

#[test]
fn test_request_roundtrip_carries_page_and_limit() {
	let filters = FilterSet::search("abc");
	let query = encode_request(&filters, PageRequest { page: 2, limit: 20 });
	assert_eq!(query, "search=abc&page=2&limit=20");

	let (decoded, request) = decode_request(&query);
	assert_eq!(decoded, filters);
	assert_eq!(request, Some(PageRequest { page: 2, limit: 20 }));
}

#[test]
fn test_decode_request_rejects_page_zero() {
	let (_, request) = decode_request("page=0&limit=20");
	assert_eq!(request, None);
	let (_, request) = decode_request("page=3");
	assert_eq!(request, Some(PageRequest::first(20).next().next()));
}

#[test]
fn test_cache_key_ignores_empty_equivalents() {
	let a = FilterSet::search("abc");
	let b = FilterSet {
		category: Some(String::new()),
		..FilterSet::search("abc")
	};
	assert_eq!(CacheKey::of(&a), CacheKey::of(&b));
	assert_ne!(CacheKey::of(&a), CacheKey::of(&FilterSet::search("abcd")));
	assert_eq!(CacheKey::of(&FilterSet::default()).to_string(), "<all>");
}

#[test]
fn test_encode_skips_negative_and_non_finite_prices() {
	let filters = FilterSet {
		min_price: Some(-5.0),
		max_price: Some(f64::NAN),
		min_stock: Some(3),
		..FilterSet::default()
	};
	assert_eq!(encode(&filters), "minStock=3");
	assert_eq!(decode(&encode(&filters)), filters.normalized());
	assert_eq!(CacheKey::of(&filters), CacheKey::of(&filters.normalized()));

	let unbounded = FilterSet {
		max_price: Some(f64::INFINITY),
		..FilterSet::default()
	};
	assert_eq!(encode(&unbounded), "");
	assert_eq!(decode("minPrice=-5&maxPrice=NaN"), FilterSet::default());
}
