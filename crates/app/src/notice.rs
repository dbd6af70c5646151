//! User-facing error taxonomy.
//!
//! Client failures are caught at the controller boundary and turned into
//! either a list-level [`Notice`] or [`FormErrors`]. Cancelled requests map to
//! nothing: they are expected and never shown.

use std::fmt;

use vitrine_client::ClientError;
pub use vitrine_form::messages::{NETWORK_MESSAGE, TIMEOUT_MESSAGE};
use vitrine_form::{Field, FormErrors, Locale};

/// How an error is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Rejected locally before any request; shown next to the field.
	Validation,
	/// Rejected by the server for a known field; shown next to the field.
	ApiField,
	/// Rejected by the server without a usable field; shown as a banner.
	ApiGlobal,
	/// No response in time (status 408).
	Timeout,
	/// Transport failure (status 0).
	Network,
	/// Anything else.
	Unknown,
}

impl ErrorKind {
	/// Classifies a client error. Returns `None` for aborted requests.
	pub fn of(err: &ClientError) -> Option<Self> {
		Some(match err {
			ClientError::Aborted => return None,
			ClientError::Api { details, .. } => {
				let has_field = details.iter().flat_map(|body| &body.errors).any(|issue| {
					issue.field_path().and_then(Field::from_path).is_some()
				});
				if has_field { Self::ApiField } else { Self::ApiGlobal }
			}
			ClientError::Timeout => Self::Timeout,
			ClientError::Network(_) => Self::Network,
			_ => Self::Unknown,
		})
	}
}

/// A classified, displayable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
	pub kind: ErrorKind,
	pub message: String,
}

impl Notice {
	/// List-level notice for a failed request, or `None` if it was aborted.
	pub fn from_client(err: &ClientError) -> Option<Self> {
		Self::localized(err, Locale::default())
	}

	/// Like [`Self::from_client`], with generic messages in `locale`.
	///
	/// Server-supplied text is shown as sent.
	pub fn localized(err: &ClientError, locale: Locale) -> Option<Self> {
		let kind = ErrorKind::of(err)?;
		let msg = locale.messages();
		let message = match kind {
			ErrorKind::Timeout => msg.timeout.to_owned(),
			ErrorKind::Network => msg.network.to_owned(),
			ErrorKind::ApiField | ErrorKind::ApiGlobal => err.to_string(),
			ErrorKind::Validation | ErrorKind::Unknown => msg.unknown_error.to_owned(),
		};
		Some(Self { kind, message })
	}
}

impl fmt::Display for Notice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.message)
	}
}

/// Form errors for a failed create request.
///
/// Server field errors attach to their fields; everything else becomes a
/// banner message.
pub fn form_errors(err: &ClientError, locale: Locale) -> FormErrors {
	let msg = locale.messages();
	match err {
		ClientError::Api { details, .. } => FormErrors::from_server_or(details.as_ref(), msg.unknown_error),
		_ => {
			let mut errors = FormErrors::new();
			let message = match ErrorKind::of(err) {
				Some(ErrorKind::Timeout) => msg.timeout,
				Some(ErrorKind::Network) => msg.network,
				_ => msg.unknown_error,
			};
			errors.push_global(message);
			errors
		}
	}
}
