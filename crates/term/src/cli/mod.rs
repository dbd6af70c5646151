//! CLI schema for the vitrine binary.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use vitrine_form::{Locale, ProductInput};
use vitrine_primitives::{FilterSet, ProductStatus};

#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(about = "Browse and manage a product catalog")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Config file (defaults to $XDG_CONFIG_HOME/vitrine/config.toml)
	#[arg(long, short = 'c', global = true, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// API base URL, overriding config and VITRINE_API_BASE
	#[arg(long, global = true, value_name = "URL")]
	pub base_url: Option<String>,

	/// Verbose logging
	#[arg(long, short = 'v', global = true)]
	pub verbose: bool,

	/// Language of validation and error messages (en, fa)
	#[arg(long, global = true, default_value_t = Locale::English)]
	pub locale: Locale,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// List products matching filters
	List {
		/// Filter flags.
		#[command(flatten)]
		filters: FilterArgs,
		/// Number of pages to fetch
		#[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
		pages: u32,
	},
	/// Create a product
	Create(CreateArgs),
	/// Delete a product by id
	Delete {
		/// Product id.
		id: i64,
		/// Skip the confirmation prompt
		#[arg(long, short = 'y')]
		yes: bool,
	},
	/// List categories
	Categories,
	/// List suppliers
	Suppliers {
		/// Only suppliers whose name starts with this text
		#[arg(long)]
		search: Option<String>,
	},
	/// Inspect the filter query codec
	Query {
		/// Query subcommand action.
		#[command(subcommand)]
		action: QueryAction,
	},
	/// Interactive list session with live filters
	Browse {
		/// Initial filters as a query string (e.g. "search=lamp&status=Active")
		#[arg(long, default_value = "")]
		query: String,
	},
}

/// Codec subcommands.
#[derive(Subcommand, Debug)]
pub enum QueryAction {
	/// Print the query string for the given filter flags
	Encode {
		/// Filter flags.
		#[command(flatten)]
		filters: FilterArgs,
	},
	/// Print the filters a query string decodes to
	Decode {
		/// Query string, with or without a leading '?'.
		query: String,
	},
}

/// Filter flags shared by `list` and `query encode`.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
	/// Start from a query string; flags below override its fields
	#[arg(long, value_name = "QUERY")]
	pub query: Option<String>,

	/// Free-text search
	#[arg(long, short = 's')]
	pub search: Option<String>,

	/// Category name
	#[arg(long)]
	pub category: Option<String>,

	/// Accepted status (repeatable, order kept)
	#[arg(long = "status", value_name = "STATUS")]
	pub statuses: Vec<ProductStatus>,

	#[arg(long, value_parser = amount)]
	pub min_price: Option<f64>,

	#[arg(long, value_parser = amount)]
	pub max_price: Option<f64>,

	#[arg(long)]
	pub min_stock: Option<u64>,

	#[arg(long)]
	pub max_stock: Option<u64>,

	/// Earliest creation date (YYYY-MM-DD)
	#[arg(long)]
	pub start_date: Option<NaiveDate>,

	/// Latest creation date (YYYY-MM-DD)
	#[arg(long)]
	pub end_date: Option<NaiveDate>,
}

impl FilterArgs {
	/// Builds the filter set, layering flags over `--query`.
	pub fn to_filters(&self) -> FilterSet {
		let mut filters = self.query.as_deref().map(vitrine_query::decode).unwrap_or_default();
		if let Some(search) = &self.search {
			filters.search_text = search.trim().to_owned();
		}
		if let Some(category) = &self.category {
			filters.category = Some(category.clone());
		}
		if !self.statuses.is_empty() {
			filters.statuses = self.statuses.iter().copied().collect();
		}
		filters.min_price = self.min_price.or(filters.min_price);
		filters.max_price = self.max_price.or(filters.max_price);
		filters.min_stock = self.min_stock.or(filters.min_stock);
		filters.max_stock = self.max_stock.or(filters.max_stock);
		filters.start_date = self.start_date.or(filters.start_date);
		filters.end_date = self.end_date.or(filters.end_date);
		filters.normalized()
	}
}

/// Price bound flag: a finite, non-negative number.
fn amount(raw: &str) -> Result<f64, String> {
	vitrine_query::parse_amount(raw).ok_or_else(|| format!("expected a non-negative number, got {raw:?}"))
}

/// Fields of a new product. Numbers are taken as text and validated locally.
#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
	/// Product name (at least 3 characters)
	#[arg(long)]
	pub name: String,
	/// SKU in the form XXX-####
	#[arg(long)]
	pub sku: String,
	#[arg(long)]
	pub category: String,
	/// Sale price (0.01 to 999999.99)
	#[arg(long)]
	pub price: String,
	/// Units in stock
	#[arg(long)]
	pub stock: String,
	#[arg(long, default_value = "")]
	pub description: String,
	/// Cost price, below the sale price
	#[arg(long, default_value = "")]
	pub cost_price: String,
	/// Reorder level, below the stock quantity
	#[arg(long, default_value = "")]
	pub reorder_level: String,
	#[arg(long, default_value_t = ProductStatus::Active)]
	pub status: ProductStatus,
	/// Comma-separated tags
	#[arg(long, default_value = "")]
	pub tags: String,
	#[arg(long, default_value = "")]
	pub supplier: String,
	#[arg(long, default_value = "")]
	pub notes: String,
}

impl CreateArgs {
	pub fn to_input(&self) -> ProductInput {
		ProductInput {
			product_name: self.name.clone(),
			sku: self.sku.clone(),
			category: self.category.clone(),
			description: self.description.clone(),
			price: self.price.clone(),
			cost_price: self.cost_price.clone(),
			stock_quantity: self.stock.clone(),
			reorder_level: self.reorder_level.clone(),
			status: Some(self.status),
			tags: self.tags.clone(),
			supplier: self.supplier.clone(),
			notes: self.notes.clone(),
		}
	}
}
