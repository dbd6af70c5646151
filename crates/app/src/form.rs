//! Create-product form controller.

use tracing::{debug, warn};
use vitrine_client::{CallOptions, CatalogApi};
use vitrine_form::{FormErrors, Locale, ProductInput};
use vitrine_primitives::Product;

use crate::notice::{self, ErrorKind};

/// Result of [`ProductForm::submit`] and [`crate::CatalogSession::create`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
	/// The server created the product. The input has been reset.
	Created(Product),
	/// Local validation failed; nothing was sent.
	Invalid,
	/// The request failed; errors are in [`ProductForm::errors`].
	Rejected(ErrorKind),
}

/// State of the create-product form.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
	/// Raw field values.
	pub input: ProductInput,
	errors: FormErrors,
	locale: Locale,
}

impl ProductForm {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_input(input: ProductInput) -> Self {
		Self {
			input,
			..Self::default()
		}
	}

	/// Reports errors in `locale`.
	#[must_use]
	pub fn with_locale(mut self, locale: Locale) -> Self {
		self.locale = locale;
		self
	}

	pub fn locale(&self) -> Locale {
		self.locale
	}

	/// Errors of the last submission attempt.
	pub fn errors(&self) -> &FormErrors {
		&self.errors
	}

	/// Validates and, if valid, creates the product.
	///
	/// This does not touch any cached list. Forms shown next to a list are
	/// submitted through [`crate::CatalogSession::create`], which refetches it.
	pub async fn submit(&mut self, api: &dyn CatalogApi, opts: &CallOptions) -> SubmitOutcome {
		let draft = match vitrine_form::validate_in(&self.input, self.locale) {
			Ok(draft) => draft,
			Err(errors) => {
				debug!(fields = errors.fields().count(), "form.invalid");
				self.errors = errors;
				return SubmitOutcome::Invalid;
			}
		};
		self.errors = FormErrors::new();

		match api.create_product(&draft, opts).await {
			Ok(product) => {
				debug!(id = product.id, sku = %product.sku, "form.created");
				self.input = ProductInput::default();
				SubmitOutcome::Created(product)
			}
			Err(err) => {
				warn!(error = %err, status = ?err.status(), "form.rejected");
				let kind = ErrorKind::of(&err).unwrap_or(ErrorKind::Unknown);
				self.errors = notice::form_errors(&err, self.locale);
				SubmitOutcome::Rejected(kind)
			}
		}
	}

	/// Clears the input and any errors.
	pub fn reset(&mut self) {
		*self = Self::default().with_locale(self.locale);
	}
}
