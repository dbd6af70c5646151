use serde::{Deserialize, Serialize};

/// `{ data: [...] }` wrapper used by the reference-data endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
	pub data: T,
}

/// One entry of a server validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldIssue {
	/// Issue kind; `"field"` for errors tied to an input field.
	#[serde(rename = "type", default)]
	pub kind: String,
	/// Human-readable message.
	#[serde(default)]
	pub msg: String,
	/// Field path the issue refers to, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub path: Option<String>,
	/// Offending value as the server saw it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<serde_json::Value>,
	/// Request part the value came from (body, query, ...).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub location: Option<String>,
}

impl FieldIssue {
	/// Returns the field path when this issue is attached to a field.
	pub fn field_path(&self) -> Option<&str> {
		if self.kind == "field" {
			self.path.as_deref().filter(|p| !p.is_empty())
		} else {
			None
		}
	}
}

/// Error body returned with a non-2xx response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
	#[serde(default)]
	pub errors: Vec<FieldIssue>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_body_reads_validation_payload() {
		let body: ErrorBody = serde_json::from_str(
			r#"{"errors":[{"type":"field","msg":"duplicate SKU","path":"sku","location":"body"},
			{"type":"alternative","msg":"bad request"}],"message":"Validation failed"}"#,
		)
		.unwrap();

		assert_eq!(body.errors.len(), 2);
		assert_eq!(body.errors[0].field_path(), Some("sku"));
		assert_eq!(body.errors[1].field_path(), None);
		assert_eq!(body.message.as_deref(), Some("Validation failed"));
	}
}
