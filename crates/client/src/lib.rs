//! Typed client for the product catalog REST API.
//!
//! [`CatalogApi`] is the seam between the catalog session and the network.
//! [`HttpCatalog`] implements it over `reqwest`; tests substitute fakes.
//!
//! # Endpoints
//!
//! | Operation | Request |
//! |---|---|
//! | list products | `GET /products?<filters>&page=&limit=` |
//! | create product | `POST /products` |
//! | delete product | `DELETE /products/{id}` |
//! | categories | `GET /categories` |
//! | suppliers | `GET /suppliers?search=` |
//!
//! Every call takes [`CallOptions`]: a cancellation token and an optional
//! timeout override. A cancelled call resolves to [`ClientError::Aborted`].

pub mod error;
mod http;

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use vitrine_primitives::{Category, FilterSet, Page, PageRequest, Product, ProductDraft, ProductId, Supplier};

pub use error::{ClientError, Result};
pub use http::HttpCatalog;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Per-call cancellation and timeout settings.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
	/// Cancelling this token aborts the request.
	pub cancel: CancellationToken,
	/// Overrides the client's default timeout for this call.
	pub timeout: Option<Duration>,
}

impl CallOptions {
	/// Options with a fresh, uncancelled token and the default timeout.
	pub fn new() -> Self {
		Self::default()
	}

	/// Uses `cancel` as the abort signal.
	pub fn with_cancel(cancel: CancellationToken) -> Self {
		Self { cancel, timeout: None }
	}

	/// Overrides the timeout for this call.
	#[must_use]
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}
}

/// Remote catalog operations.
#[async_trait]
pub trait CatalogApi: Send + Sync {
	/// Fetches one page of products matching `filters`.
	async fn list_products(&self, filters: &FilterSet, request: PageRequest, opts: &CallOptions) -> Result<Page>;

	/// Creates a product and returns it with its server-assigned id.
	async fn create_product(&self, draft: &ProductDraft, opts: &CallOptions) -> Result<Product>;

	/// Deletes a product by id.
	async fn delete_product(&self, id: ProductId, opts: &CallOptions) -> Result<()>;

	/// Lists all categories.
	async fn list_categories(&self, opts: &CallOptions) -> Result<Vec<Category>>;

	/// Lists suppliers, optionally filtered by a search prefix.
	async fn list_suppliers(&self, search: Option<&str>, opts: &CallOptions) -> Result<Vec<Supplier>>;
}
