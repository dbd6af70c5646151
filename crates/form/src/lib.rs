//! Create-product form validation.
//!
//! [`validate`] is synchronous and pure. It checks every rule and reports all
//! violations at once, keyed by [`Field`]; a failing draft never reaches the
//! network. Server-side rejections are merged into the same [`FormErrors`]
//! surface with [`FormErrors::merge_server`].

mod errors;
mod field;
pub mod messages;

use std::sync::LazyLock;

use regex::Regex;
use vitrine_primitives::{ProductDraft, ProductStatus};

pub use errors::FormErrors;
pub use field::Field;
pub use messages::{Locale, Messages, UNKNOWN_ERROR};

pub const MIN_NAME_CHARS: usize = 3;
pub const MAX_DESCRIPTION_CHARS: usize = 500;
pub const MIN_PRICE: f64 = 0.01;
pub const MAX_PRICE: f64 = 999_999.99;

static SKU_PATTERN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[A-Z]{3}-[0-9]{4}$").expect("SKU pattern is valid"));

/// Raw form state, as typed by the user.
///
/// Numeric fields hold text so that "empty" and "not a number" can be told
/// apart. Empty optional text fields mean "absent".
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
	pub product_name: String,
	pub sku: String,
	pub category: String,
	pub description: String,
	pub price: String,
	pub cost_price: String,
	pub stock_quantity: String,
	pub reorder_level: String,
	pub status: Option<ProductStatus>,
	/// Comma-separated.
	pub tags: String,
	pub supplier: String,
	pub notes: String,
}

impl Default for ProductInput {
	fn default() -> Self {
		Self {
			product_name: String::new(),
			sku: String::new(),
			category: String::new(),
			description: String::new(),
			price: String::new(),
			cost_price: String::new(),
			stock_quantity: String::new(),
			reorder_level: String::new(),
			status: Some(ProductStatus::Active),
			tags: String::new(),
			supplier: String::new(),
			notes: String::new(),
		}
	}
}

/// Result of reading one numeric input.
enum Numeric {
	Missing,
	Invalid,
	Value(f64),
}

fn numeric(raw: &str) -> Numeric {
	let raw = raw.trim();
	if raw.is_empty() {
		return Numeric::Missing;
	}
	match raw.parse::<f64>() {
		Ok(value) if value.is_finite() => Numeric::Value(value),
		_ => Numeric::Invalid,
	}
}

fn optional_text(raw: &str) -> Option<String> {
	let trimmed = raw.trim();
	(!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Returns true if `sku` has the form `XXX-####`.
pub fn is_valid_sku(sku: &str) -> bool {
	SKU_PATTERN.is_match(sku)
}

/// Validates the form and builds the draft to submit.
pub fn validate(input: &ProductInput) -> Result<ProductDraft, FormErrors> {
	validate_in(input, Locale::default())
}

/// Like [`validate`], with messages in `locale`.
pub fn validate_in(input: &ProductInput, locale: Locale) -> Result<ProductDraft, FormErrors> {
	let msg = locale.messages();
	let mut errors = FormErrors::new();

	if input.product_name.chars().count() < MIN_NAME_CHARS {
		errors.set(Field::ProductName, msg.name_too_short);
	}

	if !is_valid_sku(&input.sku) {
		errors.set(Field::Sku, msg.sku_format);
	}

	if input.category.is_empty() {
		errors.set(Field::Category, msg.category_required);
	}

	if input.description.chars().count() > MAX_DESCRIPTION_CHARS {
		errors.set(Field::Description, msg.description_too_long);
	}

	let price = match numeric(&input.price) {
		Numeric::Missing => {
			errors.set(Field::Price, msg.price_required);
			None
		}
		Numeric::Invalid => {
			errors.set(Field::Price, msg.price_invalid);
			None
		}
		Numeric::Value(p) if p < MIN_PRICE => {
			errors.set(Field::Price, msg.price_too_low);
			None
		}
		Numeric::Value(p) if p > MAX_PRICE => {
			errors.set(Field::Price, msg.price_too_high);
			None
		}
		Numeric::Value(p) => Some(p),
	};

	let cost_price = match numeric(&input.cost_price) {
		Numeric::Missing => None,
		Numeric::Invalid => {
			errors.set(Field::CostPrice, msg.cost_price_invalid);
			None
		}
		Numeric::Value(cost) => {
			if price.is_some_and(|p| cost >= p) {
				errors.set(Field::CostPrice, msg.cost_price_not_below_price);
			}
			Some(cost)
		}
	};

	let stock_quantity = match numeric(&input.stock_quantity) {
		Numeric::Missing => {
			errors.set(Field::StockQuantity, msg.stock_required);
			None
		}
		Numeric::Value(q) if q >= 0.0 && q.fract() == 0.0 && q <= u64::MAX as f64 => Some(q as u64),
		Numeric::Invalid | Numeric::Value(_) => {
			errors.set(Field::StockQuantity, msg.stock_invalid);
			None
		}
	};

	let reorder_level = match numeric(&input.reorder_level) {
		Numeric::Missing => None,
		Numeric::Invalid => {
			errors.set(Field::ReorderLevel, msg.reorder_level_invalid);
			None
		}
		Numeric::Value(level) => {
			if stock_quantity.is_some_and(|q| level >= q as f64) {
				errors.set(Field::ReorderLevel, msg.reorder_level_not_below_stock);
			}
			Some(level)
		}
	};

	if input.status.is_none() {
		errors.set(Field::Status, msg.status_invalid);
	}

	let tags: Vec<String> = input
		.tags
		.split(',')
		.map(str::trim)
		.filter(|t| !t.is_empty())
		.map(str::to_owned)
		.collect();

	match (price, stock_quantity, input.status) {
		(Some(price), Some(stock_quantity), Some(status)) if errors.is_empty() => Ok(ProductDraft {
			product_name: input.product_name.clone(),
			sku: input.sku.clone(),
			category: input.category.clone(),
			description: optional_text(&input.description),
			price,
			cost_price,
			stock_quantity,
			reorder_level,
			status,
			tags: (!tags.is_empty()).then_some(tags),
			supplier: optional_text(&input.supplier),
			notes: optional_text(&input.notes),
		}),
		_ => Err(errors),
	}
}
