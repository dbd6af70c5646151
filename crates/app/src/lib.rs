//! Headless controllers for the catalog frontend.
//!
//! Each controller owns the state a screen would own and exposes it through
//! plain methods, so any frontend (the terminal binary, tests) can drive it:
//!
//! - [`FilterPanel`] turns raw, in-progress edits into committed
//!   [`FilterSet`](vitrine_primitives::FilterSet)s through per-field debounce.
//! - [`CatalogSession`] owns the [`PagedCache`](vitrine_cache::PagedCache)
//!   and is its only writer.
//! - [`ProductForm`] validates locally, submits, and maps failures onto form
//!   errors.
//!
//! All controllers assume a single-threaded owner.

pub mod filters;
pub mod form;
pub mod notice;
pub mod session;

pub use filters::{Bound, FilterPanel, FilterWindows};
pub use form::{ProductForm, SubmitOutcome};
pub use notice::{ErrorKind, Notice};
pub use session::CatalogSession;
pub use vitrine_form::Locale;
