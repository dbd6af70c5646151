use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductStatus {
	/// Listed and sellable.
	Active,
	/// Temporarily hidden.
	Inactive,
	/// No longer stocked.
	Discontinued,
}

impl ProductStatus {
	/// Every status, in display order.
	pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::Discontinued];

	/// Wire and URL representation.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Active => "Active",
			Self::Inactive => "Inactive",
			Self::Discontinued => "Discontinued",
		}
	}
}

impl fmt::Display for ProductStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A status name that is not one of [`ProductStatus::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown product status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ProductStatus {
	type Err = UnknownStatus;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|status| status.as_str() == s)
			.ok_or_else(|| UnknownStatus(s.to_owned()))
	}
}

/// The committed set of list-query constraints.
///
/// Every field left empty (or `None`) means "no constraint". Range bounds are
/// not checked against each other: an inverted range is passed through and
/// the server decides what it means.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
	/// Free-text search over product name and SKU.
	pub search_text: String,
	/// Exact category name.
	pub category: Option<String>,
	/// Accepted statuses, in the order they were selected.
	pub statuses: IndexSet<ProductStatus>,
	/// Lower price bound.
	pub min_price: Option<f64>,
	/// Upper price bound.
	pub max_price: Option<f64>,
	/// Lower stock bound.
	pub min_stock: Option<u64>,
	/// Upper stock bound.
	pub max_stock: Option<u64>,
	/// Earliest creation date.
	pub start_date: Option<NaiveDate>,
	/// Latest creation date.
	pub end_date: Option<NaiveDate>,
}

impl FilterSet {
	/// Returns a filter set with only a search term.
	pub fn search(text: impl Into<String>) -> Self {
		Self {
			search_text: text.into(),
			..Self::default()
		}
	}

	/// Returns true when no field constrains the list.
	pub fn is_empty(&self) -> bool {
		self.normalized() == Self::default()
	}

	/// Collapses empty-string and absent values into one representation.
	///
	/// Price bounds that are negative or not finite constrain nothing and are
	/// dropped.
	pub fn normalized(&self) -> Self {
		Self {
			category: self.category.clone().filter(|c| !c.is_empty()),
			min_price: self.min_price.filter(|v| is_valid_amount(*v)),
			max_price: self.max_price.filter(|v| is_valid_amount(*v)),
			..self.clone()
		}
	}

	/// Adds a status, keeping the original position if it was already present.
	pub fn with_status(mut self, status: ProductStatus) -> Self {
		self.statuses.insert(status);
		self
	}

	/// Toggles a status on or off. Re-enabled statuses move to the end.
	pub fn toggle_status(&mut self, status: ProductStatus) {
		if !self.statuses.shift_remove(&status) {
			self.statuses.insert(status);
		}
	}
}

/// Returns true if `value` can bound a price: finite and not negative.
pub fn is_valid_amount(value: f64) -> bool {
	value.is_finite() && value >= 0.0
}
