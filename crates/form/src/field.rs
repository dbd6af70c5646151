use std::fmt;

/// Input fields of the create-product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
	ProductName,
	Sku,
	Category,
	Description,
	Price,
	CostPrice,
	StockQuantity,
	ReorderLevel,
	Status,
	Tags,
	Supplier,
	Notes,
}

impl Field {
	/// Every field, in form order.
	pub const ALL: [Self; 12] = [
		Self::ProductName,
		Self::Sku,
		Self::Category,
		Self::Description,
		Self::Price,
		Self::CostPrice,
		Self::StockQuantity,
		Self::ReorderLevel,
		Self::Status,
		Self::Tags,
		Self::Supplier,
		Self::Notes,
	];

	/// Wire name, matching server error paths.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::ProductName => "product_name",
			Self::Sku => "sku",
			Self::Category => "category",
			Self::Description => "description",
			Self::Price => "price",
			Self::CostPrice => "cost_price",
			Self::StockQuantity => "stock_quantity",
			Self::ReorderLevel => "reorder_level",
			Self::Status => "status",
			Self::Tags => "tags",
			Self::Supplier => "supplier",
			Self::Notes => "notes",
		}
	}

	/// Resolves a server error path. Nested paths such as `tags[0]` or
	/// `tags.0` resolve to their top-level field.
	pub fn from_path(path: &str) -> Option<Self> {
		let head = path.split(['.', '[']).next().unwrap_or(path);
		Self::ALL.into_iter().find(|field| field.as_str() == head)
	}
}

impl fmt::Display for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
