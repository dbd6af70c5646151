use std::fmt;

use vitrine_primitives::FilterSet;

/// Canonical identity of a filter set, used to key paged results.
///
/// Two filter sets share a key exactly when they encode to the same query
/// string. Page number and limit are not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
	/// Derives the key for a filter set.
	pub fn of(filters: &FilterSet) -> Self {
		Self(crate::encode(filters))
	}

	/// The encoded query string backing this key.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&FilterSet> for CacheKey {
	fn from(filters: &FilterSet) -> Self {
		Self::of(filters)
	}
}

impl fmt::Display for CacheKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.0.is_empty() {
			f.write_str("<all>")
		} else {
			f.write_str(&self.0)
		}
	}
}
