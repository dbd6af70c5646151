use serde::{Deserialize, Serialize};

use crate::ProductStatus;

/// Server-assigned product identifier.
pub type ProductId = i64;

/// A catalog product as returned by the server.
///
/// The client never mutates a product after creation; products are only
/// listed, created from a [`ProductDraft`], and deleted by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
	pub id: ProductId,
	pub product_name: String,
	pub sku: String,
	pub category: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	pub price: f64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cost_price: Option<f64>,
	pub stock_quantity: u64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reorder_level: Option<f64>,
	pub status: ProductStatus,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tags: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub supplier: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_updated: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_at: Option<String>,
}

/// A validated product awaiting creation. Serialized as the `POST /products` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
	pub product_name: String,
	pub sku: String,
	pub category: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	pub price: f64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cost_price: Option<f64>,
	pub stock_quantity: u64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reorder_level: Option<f64>,
	pub status: ProductStatus,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tags: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub supplier: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
}

/// Product category reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
	pub id: i64,
	pub name: String,
}

/// Supplier reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
	pub id: String,
	pub name: String,
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn test_draft_omits_absent_optionals() {
		let draft = ProductDraft {
			product_name: "Desk lamp".into(),
			sku: "LMP-0042".into(),
			category: "Lighting".into(),
			description: None,
			price: 24.5,
			cost_price: None,
			stock_quantity: 12,
			reorder_level: Some(3.0),
			status: ProductStatus::Active,
			tags: None,
			supplier: None,
			notes: None,
		};

		let json = serde_json::to_value(&draft).unwrap();
		assert_eq!(
			json,
			serde_json::json!({
				"product_name": "Desk lamp",
				"sku": "LMP-0042",
				"category": "Lighting",
				"price": 24.5,
				"stock_quantity": 12,
				"reorder_level": 3.0,
				"status": "Active",
			})
		);
	}

	#[test]
	fn test_product_tolerates_missing_optionals() {
		let product: Product = serde_json::from_str(
			r#"{"id":7,"product_name":"Mug","sku":"MUG-0001","category":"Kitchen",
			"price":9.99,"stock_quantity":0,"status":"Discontinued"}"#,
		)
		.unwrap();
		assert_eq!(product.id, 7);
		assert_eq!(product.status, ProductStatus::Discontinued);
		assert_eq!(product.tags, None);
	}
}
