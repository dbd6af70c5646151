use indexmap::IndexMap;
use vitrine_primitives::ErrorBody;

use crate::Field;
use crate::messages::UNKNOWN_ERROR;

/// Field-level and global errors of one submission attempt.
///
/// Local validation and server-reported errors share this surface: field
/// errors are placed next to their input, everything else goes to a banner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
	fields: IndexMap<Field, String>,
	global: Vec<String>,
}

impl FormErrors {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds the errors for a rejected submission.
	///
	/// Falls back to [`UNKNOWN_ERROR`] when the body yields nothing to show.
	pub fn from_server(body: Option<&ErrorBody>) -> Self {
		Self::from_server_or(body, UNKNOWN_ERROR)
	}

	/// Like [`Self::from_server`], with a caller-chosen `fallback` banner.
	pub fn from_server_or(body: Option<&ErrorBody>, fallback: &str) -> Self {
		let mut errors = Self::new();
		if let Some(body) = body {
			errors.merge_server(body);
		}
		if errors.is_empty() {
			errors.push_global(fallback);
		}
		errors
	}

	/// Attaches `message` to `field`, replacing any earlier message.
	pub fn set(&mut self, field: Field, message: impl Into<String>) {
		self.fields.insert(field, message.into());
	}

	/// Adds a banner message.
	pub fn push_global(&mut self, message: impl Into<String>) {
		self.global.push(message.into());
	}

	/// Merges a server error body.
	///
	/// Field issues on a known path attach to that field. Issues on unknown
	/// paths and non-field issues become banner messages, as does the
	/// top-level message.
	pub fn merge_server(&mut self, body: &ErrorBody) {
		for issue in &body.errors {
			match issue.field_path().and_then(Field::from_path) {
				Some(field) => self.set(field, issue.msg.clone()),
				None if !issue.msg.is_empty() => self.push_global(issue.msg.clone()),
				None => {}
			}
		}
		if let Some(message) = body.message.as_deref().filter(|m| !m.is_empty()) {
			self.push_global(message);
		}
	}

	/// Message attached to `field`.
	pub fn field(&self, field: Field) -> Option<&str> {
		self.fields.get(&field).map(String::as_str)
	}

	/// Field errors in the order they were recorded.
	pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> {
		self.fields.iter().map(|(field, msg)| (*field, msg.as_str()))
	}

	/// Banner messages.
	pub fn global(&self) -> &[String] {
		&self.global
	}

	/// Banner text, if any banner message exists.
	pub fn banner(&self) -> Option<String> {
		(!self.global.is_empty()).then(|| self.global.join("; "))
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty() && self.global.is_empty()
	}
}
