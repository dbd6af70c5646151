//! Core types for the product catalog: filters, products, pages, and wire bodies.

/// Committed list-query constraints.
pub mod filter;
/// Paged list results and page requests.
pub mod page;
/// Products, drafts, and read-only reference data.
pub mod product;
/// Server error payloads and response envelopes.
pub mod wire;

pub use filter::{FilterSet, ProductStatus, UnknownStatus, is_valid_amount};
pub use page::{DEFAULT_PAGE_LIMIT, Page, PageRequest};
pub use product::{Category, Product, ProductDraft, ProductId, Supplier};
pub use wire::{DataEnvelope, ErrorBody, FieldIssue};
