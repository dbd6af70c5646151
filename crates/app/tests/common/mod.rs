#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use vitrine_client::{CallOptions, CatalogApi, ClientError, Result};
use vitrine_primitives::{
	Category, ErrorBody, FilterSet, Page, PageRequest, Product, ProductDraft, ProductId, ProductStatus, Supplier,
};

/// A request the fake received.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
	List { search: String, request: PageRequest },
	Create(String),
	Delete(ProductId),
	Categories,
	Suppliers(Option<String>),
}

/// In-memory catalog with scripted latency and failures.
#[derive(Default)]
pub struct FakeCatalog {
	products: Mutex<Vec<Product>>,
	calls: Mutex<Vec<Call>>,
	delays: Mutex<HashMap<String, Duration>>,
	honor_cancel: bool,
	fail_list: Mutex<Option<ClientError>>,
	reject_create: Mutex<Option<ErrorBody>>,
}

pub fn product(id: ProductId, name: &str) -> Product {
	Product {
		id,
		product_name: name.to_owned(),
		sku: format!("ABC-{:04}", id),
		category: "Misc".into(),
		description: None,
		price: 9.99,
		cost_price: None,
		stock_quantity: 5,
		reorder_level: None,
		status: ProductStatus::Active,
		tags: None,
		supplier: None,
		notes: None,
		last_updated: None,
		created_at: None,
	}
}

impl FakeCatalog {
	/// `count` products named `"{prefix} {id}"`, ids starting at 1.
	pub fn with_products(prefix: &str, count: i64) -> Self {
		let fake = Self::default();
		fake.add_products(prefix, count);
		fake
	}

	pub fn add_products(&self, prefix: &str, count: i64) {
		let mut products = self.products.lock().unwrap();
		let start = products.len() as i64 + 1;
		products.extend((start..start + count).map(|id| product(id, &format!("{prefix} {id}"))));
	}

	/// Makes list calls for `search` take `delay` before answering.
	pub fn delay_search(&self, search: &str, delay: Duration) {
		self.delays.lock().unwrap().insert(search.to_owned(), delay);
	}

	/// Makes delayed list calls resolve to `Aborted` once cancelled.
	pub fn honoring_cancel(mut self) -> Self {
		self.honor_cancel = true;
		self
	}

	pub fn fail_next_list(&self, err: ClientError) {
		*self.fail_list.lock().unwrap() = Some(err);
	}

	pub fn reject_next_create(&self, body: ErrorBody) {
		*self.reject_create.lock().unwrap() = Some(body);
	}

	pub fn calls(&self) -> Vec<Call> {
		self.calls.lock().unwrap().clone()
	}

	pub fn list_calls(&self) -> Vec<(String, u32)> {
		self.calls()
			.into_iter()
			.filter_map(|call| match call {
				Call::List { search, request } => Some((search, request.page)),
				_ => None,
			})
			.collect()
	}

	fn record(&self, call: Call) {
		self.calls.lock().unwrap().push(call);
	}

	fn page_for(&self, filters: &FilterSet, request: PageRequest) -> Page {
		let needle = filters.search_text.to_lowercase();
		let matching: Vec<Product> = self
			.products
			.lock()
			.unwrap()
			.iter()
			.filter(|p| p.product_name.to_lowercase().contains(&needle))
			.cloned()
			.collect();

		let limit = request.limit as usize;
		let start = (request.page as usize - 1) * limit;
		let end = (start + limit).min(matching.len());
		Page {
			items: matching.get(start..end).map(<[Product]>::to_vec).unwrap_or_default(),
			total: matching.len() as u64,
			has_more: end < matching.len(),
			page: request.page,
			limit: request.limit,
		}
	}
}

#[async_trait]
impl CatalogApi for FakeCatalog {
	async fn list_products(&self, filters: &FilterSet, request: PageRequest, opts: &CallOptions) -> Result<Page> {
		self.record(Call::List {
			search: filters.search_text.clone(),
			request,
		});

		let delay = self.delays.lock().unwrap().get(&filters.search_text).copied();
		if let Some(delay) = delay {
			if self.honor_cancel {
				tokio::select! {
					_ = opts.cancel.cancelled() => return Err(ClientError::Aborted),
					_ = tokio::time::sleep(delay) => {}
				}
			} else {
				tokio::time::sleep(delay).await;
			}
		}

		if let Some(err) = self.fail_list.lock().unwrap().take() {
			return Err(err);
		}
		Ok(self.page_for(filters, request))
	}

	async fn create_product(&self, draft: &ProductDraft, _opts: &CallOptions) -> Result<Product> {
		self.record(Call::Create(draft.sku.clone()));
		if let Some(body) = self.reject_create.lock().unwrap().take() {
			return Err(ClientError::Api {
				status: 400,
				message: body.message.clone().unwrap_or_else(|| "Bad Request".into()),
				details: Some(body),
			});
		}

		let mut products = self.products.lock().unwrap();
		let id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
		let mut created = product(id, &draft.product_name);
		created.sku = draft.sku.clone();
		created.category = draft.category.clone();
		created.price = draft.price;
		created.stock_quantity = draft.stock_quantity;
		created.status = draft.status;
		products.push(created.clone());
		Ok(created)
	}

	async fn delete_product(&self, id: ProductId, _opts: &CallOptions) -> Result<()> {
		self.record(Call::Delete(id));
		let mut products = self.products.lock().unwrap();
		let before = products.len();
		products.retain(|p| p.id != id);
		if products.len() == before {
			return Err(ClientError::Api {
				status: 404,
				message: "Product not found".into(),
				details: None,
			});
		}
		Ok(())
	}

	async fn list_categories(&self, _opts: &CallOptions) -> Result<Vec<Category>> {
		self.record(Call::Categories);
		Ok(vec![Category {
			id: 1,
			name: "Misc".into(),
		}])
	}

	async fn list_suppliers(&self, search: Option<&str>, _opts: &CallOptions) -> Result<Vec<Supplier>> {
		self.record(Call::Suppliers(search.map(str::to_owned)));
		Ok(Vec::new())
	}
}
