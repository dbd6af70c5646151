/// Execution classes used for task observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
	/// Page loads that may be superseded and cancelled by newer filters.
	Fetch,
	/// Create/delete requests; never cancelled by filter changes.
	Mutation,
	/// Read-only reference data (categories, suppliers).
	Reference,
}

impl TaskClass {
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::Fetch => "fetch",
			Self::Mutation => "mutation",
			Self::Reference => "reference",
		}
	}
}
