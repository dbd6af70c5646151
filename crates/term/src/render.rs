//! Plain-text rendering of catalog data.

use vitrine_cache::Snapshot;
use vitrine_form::FormErrors;
use vitrine_primitives::{Category, FilterSet, Product, Supplier};

pub fn product_header() -> String {
	format!(
		"{:>6}  {:<8}  {:<28}  {:<14}  {:>10}  {:>6}  {}",
		"ID", "SKU", "NAME", "CATEGORY", "PRICE", "STOCK", "STATUS"
	)
}

pub fn product_row(product: &Product) -> String {
	format!(
		"{:>6}  {:<8}  {:<28}  {:<14}  {:>10.2}  {:>6}  {}",
		product.id,
		product.sku,
		clip(&product.product_name, 28),
		clip(&product.category, 14),
		product.price,
		product.stock_quantity,
		product.status
	)
}

/// `"Showing 40 of 45 products"`, with a hint when more pages exist.
pub fn list_footer(snapshot: &Snapshot<'_>) -> String {
	let shown = snapshot.len();
	let mut line = match snapshot.total() {
		Some(total) => format!("Showing {shown} of {total} products"),
		None => format!("Showing {shown} products"),
	};
	if snapshot.can_load_more() {
		line.push_str(" (more available)");
	}
	line
}

/// One `key: value` line per constrained field.
pub fn filter_lines(filters: &FilterSet) -> Vec<String> {
	let mut lines = Vec::new();
	if !filters.search_text.is_empty() {
		lines.push(format!("search: {}", filters.search_text));
	}
	if let Some(category) = &filters.category {
		lines.push(format!("category: {category}"));
	}
	if !filters.statuses.is_empty() {
		let statuses: Vec<&str> = filters.statuses.iter().map(|s| s.as_str()).collect();
		lines.push(format!("status: {}", statuses.join(", ")));
	}
	if filters.min_price.is_some() || filters.max_price.is_some() {
		lines.push(format!("price: {}", range(filters.min_price, filters.max_price)));
	}
	if filters.min_stock.is_some() || filters.max_stock.is_some() {
		lines.push(format!("stock: {}", range(filters.min_stock, filters.max_stock)));
	}
	if filters.start_date.is_some() || filters.end_date.is_some() {
		lines.push(format!("created: {}", range(filters.start_date, filters.end_date)));
	}
	if lines.is_empty() {
		lines.push("(no filters)".into());
	}
	lines
}

/// Field errors first, then the banner.
pub fn form_error_lines(errors: &FormErrors) -> Vec<String> {
	let mut lines: Vec<String> = errors.fields().map(|(field, msg)| format!("{field}: {msg}")).collect();
	if let Some(banner) = errors.banner() {
		lines.push(format!("error: {banner}"));
	}
	lines
}

pub fn category_row(category: &Category) -> String {
	format!("{:>4}  {}", category.id, category.name)
}

pub fn supplier_row(supplier: &Supplier) -> String {
	format!("{:<10}  {}", supplier.id, supplier.name)
}

fn range<T: std::fmt::Display>(min: Option<T>, max: Option<T>) -> String {
	let side = |v: Option<T>| v.map(|v| v.to_string()).unwrap_or_else(|| "*".into());
	format!("{} .. {}", side(min), side(max))
}

fn clip(text: &str, width: usize) -> String {
	if text.chars().count() <= width {
		return text.to_owned();
	}
	let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
	clipped.push('…');
	clipped
}
