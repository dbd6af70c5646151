use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::{Url, form_urlencoded};
use vitrine_primitives::{
	Category, DataEnvelope, ErrorBody, FilterSet, Page, PageRequest, Product, ProductDraft, ProductId, Supplier,
};

use crate::{CallOptions, CatalogApi, ClientError, DEFAULT_TIMEOUT, Result};

const JSON: &str = "application/json";

/// [`CatalogApi`] over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
	http: Client,
	base: String,
	timeout: Duration,
}

impl HttpCatalog {
	/// Creates a client rooted at `base` (e.g. `http://localhost:3001/api`).
	pub fn new(base: &Url) -> Result<Self> {
		let http = Client::builder().build().map_err(ClientError::Other)?;
		Ok(Self {
			http,
			base: base.as_str().trim_end_matches('/').to_owned(),
			timeout: DEFAULT_TIMEOUT,
		})
	}

	/// Replaces the default per-request timeout.
	#[must_use]
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Base URL all paths are appended to.
	pub fn base(&self) -> &str {
		&self.base
	}

	async fn get<T: DeserializeOwned>(&self, path: &str, opts: &CallOptions) -> Result<T> {
		let body = self.send(Method::GET, path, None::<&()>, opts).await?;
		Ok(serde_json::from_slice(&body)?)
	}

	/// Issues one request and returns the raw success body.
	///
	/// Cancellation wins over completion; the timeout covers the whole
	/// exchange including the body read.
	async fn send<B: Serialize + ?Sized>(
		&self,
		method: Method,
		path: &str,
		body: Option<&B>,
		opts: &CallOptions,
	) -> Result<Vec<u8>> {
		let url = format!("{}{path}", self.base);
		let mut builder = self
			.http
			.request(method.clone(), &url)
			.header(CONTENT_TYPE, HeaderValue::from_static(JSON));
		if let Some(body) = body {
			builder = builder.json(body);
		}

		let timeout = opts.timeout.unwrap_or(self.timeout);
		let started = Instant::now();
		let exchange = async {
			let response = builder.send().await.map_err(ClientError::from_transport)?;
			read_body(response).await
		};

		let outcome = tokio::select! {
			biased;
			_ = opts.cancel.cancelled() => Err(ClientError::Aborted),
			result = tokio::time::timeout(timeout, exchange) => {
				result.unwrap_or_else(|_| Err(ClientError::Timeout))
			}
		};

		let elapsed_ms = started.elapsed().as_millis() as u64;
		match &outcome {
			Ok(_) => debug!(%method, path, elapsed_ms, "catalog.request.ok"),
			Err(ClientError::Aborted) => debug!(%method, path, elapsed_ms, "catalog.request.aborted"),
			Err(err) => warn!(%method, path, elapsed_ms, status = ?err.status(), error = %err, "catalog.request.failed"),
		}
		outcome
	}
}

async fn read_body(response: reqwest::Response) -> Result<Vec<u8>> {
	let status = response.status();
	let is_json = response
		.headers()
		.get(CONTENT_TYPE)
		.and_then(|v| v.to_str().ok())
		.is_some_and(|v| v.contains(JSON));
	let bytes = response.bytes().await.map_err(ClientError::from_transport)?;

	if status.is_success() {
		return Ok(bytes.to_vec());
	}

	let details = is_json
		.then(|| serde_json::from_slice::<ErrorBody>(&bytes).ok())
		.flatten();
	Err(api_error(status, details))
}

fn api_error(status: StatusCode, details: Option<ErrorBody>) -> ClientError {
	let message = details
		.as_ref()
		.and_then(|d| d.message.clone())
		.filter(|m| !m.is_empty())
		.or_else(|| status.canonical_reason().map(str::to_owned))
		.unwrap_or_else(|| status.as_str().to_owned());
	ClientError::Api {
		status: status.as_u16(),
		message,
		details,
	}
}

fn with_query(path: &str, query: &str) -> String {
	if query.is_empty() { path.to_owned() } else { format!("{path}?{query}") }
}

#[async_trait]
impl CatalogApi for HttpCatalog {
	async fn list_products(&self, filters: &FilterSet, request: PageRequest, opts: &CallOptions) -> Result<Page> {
		let path = with_query("/products", &vitrine_query::encode_request(filters, request));
		self.get(&path, opts).await
	}

	async fn create_product(&self, draft: &ProductDraft, opts: &CallOptions) -> Result<Product> {
		let body = self.send(Method::POST, "/products", Some(draft), opts).await?;
		Ok(serde_json::from_slice(&body)?)
	}

	async fn delete_product(&self, id: ProductId, opts: &CallOptions) -> Result<()> {
		self.send(Method::DELETE, &format!("/products/{id}"), None::<&()>, opts)
			.await
			.map(drop)
	}

	async fn list_categories(&self, opts: &CallOptions) -> Result<Vec<Category>> {
		let envelope: DataEnvelope<Vec<Category>> = self.get("/categories", opts).await?;
		Ok(envelope.data)
	}

	async fn list_suppliers(&self, search: Option<&str>, opts: &CallOptions) -> Result<Vec<Supplier>> {
		let query = match search.filter(|s| !s.is_empty()) {
			Some(search) => form_urlencoded::Serializer::new(String::new())
				.append_pair("search", search)
				.finish(),
			None => String::new(),
		};
		let envelope: DataEnvelope<Vec<Supplier>> = self.get(&with_query("/suppliers", &query), opts).await?;
		Ok(envelope.data)
	}
}
