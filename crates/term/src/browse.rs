//! Interactive list session.
//!
//! Reads one command per line from stdin. Filter edits go through the
//! [`FilterPanel`] and commit after their debounce window, so typing several
//! `search` lines in quick succession triggers a single fetch.

use std::sync::Arc;
use std::time::Instant;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use vitrine_app::{Bound, CatalogSession, FilterPanel, FilterWindows, Locale, ProductForm, SubmitOutcome};
use vitrine_cache::Completion;
use vitrine_client::CatalogApi;
use vitrine_config::Config;
use vitrine_form::ProductInput;
use vitrine_primitives::{ProductId, ProductStatus};

use crate::commands::{describe, is_yes};
use crate::render;

const HELP: &str = "\
commands:
  search <text>            set the search text (empty clears)
  category [name]          select a category, or all
  status <Active|Inactive|Discontinued>
                           toggle a status
  min-price|max-price|min-stock|max-stock [value]
                           set or clear a range bound
  clear                    reset every filter
  more                     load the next page
  create <field>=<value>; ...
                           create a product (name, sku, category, price, stock,
                           description, cost, reorder, status, tags, supplier, notes)
  delete <id>              delete a product, after confirmation
  show                     print the list again
  help                     print this text
  quit";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
	Search(String),
	Category(Option<String>),
	Status(ProductStatus),
	Bound(Bound, String),
	Clear,
	More,
	Create(Box<ProductInput>),
	Delete(ProductId),
	Show,
	Help,
	Quit,
	Empty,
}

impl Input {
	pub fn parse(line: &str) -> Result<Self, String> {
		let line = line.trim();
		let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
		let rest = rest.trim();

		let bound = |bound: Bound| -> Result<Self, String> { Ok(Self::Bound(bound, rest.to_owned())) };
		match word {
			"" => Ok(Self::Empty),
			"search" => Ok(Self::Search(rest.to_owned())),
			"category" => Ok(Self::Category(Some(rest.to_owned()).filter(|c| !c.is_empty()))),
			"status" => rest.parse().map(Self::Status).map_err(|err| format!("{err}")),
			"min-price" => bound(Bound::MinPrice),
			"max-price" => bound(Bound::MaxPrice),
			"min-stock" => bound(Bound::MinStock),
			"max-stock" => bound(Bound::MaxStock),
			"clear" => Ok(Self::Clear),
			"more" => Ok(Self::More),
			"create" => product_input(rest).map(|input| Self::Create(Box::new(input))),
			"delete" => rest
				.parse()
				.map(Self::Delete)
				.map_err(|_| format!("invalid product id: {rest:?}")),
			"show" => Ok(Self::Show),
			"help" | "?" => Ok(Self::Help),
			"quit" | "exit" => Ok(Self::Quit),
			other => Err(format!("unknown command: {other} (try `help`)")),
		}
	}
}

/// Reads `field=value` pairs separated by `;`. Values are kept as typed and
/// checked by form validation.
fn product_input(rest: &str) -> Result<ProductInput, String> {
	let mut input = ProductInput::default();
	for pair in rest.split(';').map(str::trim).filter(|p| !p.is_empty()) {
		let Some((field, value)) = pair.split_once('=') else {
			return Err(format!("expected field=value, got {pair:?}"));
		};
		let value = value.trim().to_owned();
		match field.trim() {
			"name" => input.product_name = value,
			"sku" => input.sku = value,
			"category" => input.category = value,
			"description" => input.description = value,
			"price" => input.price = value,
			"cost" => input.cost_price = value,
			"stock" => input.stock_quantity = value,
			"reorder" => input.reorder_level = value,
			"status" => input.status = Some(value.parse().map_err(|err| format!("{err}"))?),
			"tags" => input.tags = value,
			"supplier" => input.supplier = value,
			"notes" => input.notes = value,
			other => return Err(format!("unknown product field: {other}")),
		}
	}
	Ok(input)
}

/// State of one browse session.
struct Browser {
	panel: FilterPanel,
	session: CatalogSession,
	locale: Locale,
	/// Product awaiting a `y/N` answer on the next line.
	pending_delete: Option<ProductId>,
}

impl Browser {
	fn new(api: Arc<dyn CatalogApi>, config: &Config, locale: Locale, query: &str) -> Self {
		let windows = FilterWindows {
			search: config.filters.search_window(),
			range: config.filters.range_window(),
		};
		let panel = FilterPanel::from_query(query, windows);
		let mut session = CatalogSession::new(api, config.catalog.page_limit)
			.with_timeout(config.timeout())
			.with_locale(locale);
		session.set_filters(panel.filters().clone());
		Self {
			panel,
			session,
			locale,
			pending_delete: None,
		}
	}

	/// Handles one input line. Returns false once the user quits.
	async fn line(&mut self, line: &str) -> bool {
		if let Some(id) = self.pending_delete.take() {
			if is_yes(line) {
				self.delete(id).await;
			} else {
				println!("Delete cancelled.");
			}
			return true;
		}

		match Input::parse(line) {
			Ok(Input::Quit) => return false,
			Ok(input) => self.handle(input).await,
			Err(message) => eprintln!("{message}"),
		}
		true
	}

	async fn handle(&mut self, input: Input) {
		let now = Instant::now();
		match input {
			Input::Search(text) => self.panel.set_search(text, now),
			Input::Category(category) => self.panel.set_category(category),
			Input::Status(status) => self.panel.toggle_status(status),
			Input::Bound(bound, text) => self.panel.set_bound(bound, text, now),
			Input::Clear => self.panel.clear(),
			Input::More => {
				if !self.session.load_more() {
					println!("No more products to load.");
				}
			}
			Input::Create(input) => self.create(*input).await,
			Input::Delete(id) => {
				let name = self
					.session
					.items()
					.into_iter()
					.find(|product| product.id == id)
					.map(|product| format!(" \"{}\"", product.product_name))
					.unwrap_or_default();
				println!("Delete product {id}{name}? [y/N]");
				self.pending_delete = Some(id);
			}
			Input::Show => self.show(),
			Input::Help => println!("{HELP}"),
			Input::Quit | Input::Empty => {}
		}
	}

	async fn create(&mut self, input: ProductInput) {
		let mut form = ProductForm::with_input(input).with_locale(self.locale);
		match self.session.create(&mut form).await {
			SubmitOutcome::Created(product) => println!("Created product {} ({})", product.id, product.sku),
			SubmitOutcome::Invalid | SubmitOutcome::Rejected(_) => {
				for line in render::form_error_lines(form.errors()) {
					eprintln!("{line}");
				}
			}
		}
	}

	async fn delete(&mut self, id: ProductId) {
		match self.session.delete(id).await {
			Ok(()) => println!("Deleted product {id}"),
			Err(err) => eprintln!("{}", describe(&err, self.locale)),
		}
	}

	/// Hands settled filter edits to the session. Returns true if any did.
	fn commit(&mut self, now: Instant) -> bool {
		let Some(filters) = self.panel.poll(now).cloned() else {
			return false;
		};
		debug!(query = %self.panel.query(), "browse.filters");
		println!("?{}", self.panel.query());
		self.session.set_filters(filters);
		true
	}

	fn show(&self) {
		for line in render::filter_lines(self.session.filters()) {
			println!("# {line}");
		}
		let Some(snapshot) = self.session.snapshot() else {
			return;
		};
		if let Some(failure) = snapshot.error {
			eprintln!("error: {}", failure.message);
		}
		println!("{}", render::product_header());
		for product in snapshot.items() {
			println!("{}", render::product_row(product));
		}
		println!("{}", render::list_footer(&snapshot));
	}
}

pub async fn run(api: Arc<dyn CatalogApi>, config: &Config, locale: Locale, query: &str) -> anyhow::Result<()> {
	let mut browser = Browser::new(api, config, locale, query);
	let mut lines = BufReader::new(tokio::io::stdin()).lines();
	println!("{HELP}");

	loop {
		let deadline = browser.panel.next_deadline();
		tokio::select! {
			line = lines.next_line() => {
				let Some(line) = line? else { break };
				if !browser.line(&line).await {
					break;
				}
			}
			completion = browser.session.next_completion() => {
				if completion == Completion::Applied {
					browser.show();
				}
			}
			_ = sleep_until(deadline) => {}
		}

		browser.commit(Instant::now());
	}

	browser.panel.close();
	Ok(())
}

async fn sleep_until(deadline: Option<Instant>) {
	match deadline {
		Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
		None => std::future::pending().await,
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Mutex;
	use std::time::Duration;

	use async_trait::async_trait;
	use pretty_assertions::assert_eq;
	use vitrine_client::{CallOptions, Result};
	use vitrine_primitives::{Category, FilterSet, Page, PageRequest, Product, ProductDraft, Supplier};

	use super::*;

	/// Records every request and answers with empty pages.
	#[derive(Default)]
	struct Recorder {
		calls: Mutex<Vec<String>>,
	}

	impl Recorder {
		fn calls(&self) -> Vec<String> {
			self.calls.lock().unwrap().clone()
		}

		fn record(&self, call: String) {
			self.calls.lock().unwrap().push(call);
		}
	}

	#[async_trait]
	impl CatalogApi for Recorder {
		async fn list_products(&self, filters: &FilterSet, request: PageRequest, _: &CallOptions) -> Result<Page> {
			self.record(format!("list {:?} {}", filters.search_text, request.page));
			Ok(Page {
				items: Vec::new(),
				total: 0,
				has_more: false,
				page: request.page,
				limit: request.limit,
			})
		}

		async fn create_product(&self, draft: &ProductDraft, _: &CallOptions) -> Result<Product> {
			self.record(format!("create {}", draft.sku));
			Ok(Product {
				id: 1,
				product_name: draft.product_name.clone(),
				sku: draft.sku.clone(),
				category: draft.category.clone(),
				description: draft.description.clone(),
				price: draft.price,
				cost_price: draft.cost_price,
				stock_quantity: draft.stock_quantity,
				reorder_level: draft.reorder_level,
				status: draft.status,
				tags: draft.tags.clone(),
				supplier: draft.supplier.clone(),
				notes: draft.notes.clone(),
				last_updated: None,
				created_at: None,
			})
		}

		async fn delete_product(&self, id: ProductId, _: &CallOptions) -> Result<()> {
			self.record(format!("delete {id}"));
			Ok(())
		}

		async fn list_categories(&self, _: &CallOptions) -> Result<Vec<Category>> {
			Ok(Vec::new())
		}

		async fn list_suppliers(&self, _: Option<&str>, _: &CallOptions) -> Result<Vec<Supplier>> {
			Ok(Vec::new())
		}
	}

	async fn browser() -> (Arc<Recorder>, Browser) {
		let api = Arc::new(Recorder::default());
		let mut browser = Browser::new(api.clone(), &Config::default(), Locale::English, "");
		assert_eq!(browser.session.next_completion().await, Completion::Applied);
		(api, browser)
	}

	#[test]
	fn test_parse_commands() {
		assert_eq!(Input::parse("search  desk lamp "), Ok(Input::Search("desk lamp".into())));
		assert_eq!(Input::parse("search"), Ok(Input::Search(String::new())));
		assert_eq!(Input::parse("category"), Ok(Input::Category(None)));
		assert_eq!(Input::parse("status Discontinued"), Ok(Input::Status(ProductStatus::Discontinued)));
		assert_eq!(Input::parse("max-stock 40"), Ok(Input::Bound(Bound::MaxStock, "40".into())));
		assert_eq!(Input::parse("delete 17"), Ok(Input::Delete(17)));
		assert_eq!(Input::parse("   "), Ok(Input::Empty));
	}

	#[test]
	fn test_parse_create_fields() {
		let Ok(Input::Create(input)) =
			Input::parse("create name=Desk lamp; sku=LMP-0042;price=24.5 ; stock=10; status=Inactive;")
		else {
			panic!("expected create");
		};
		assert_eq!(input.product_name, "Desk lamp");
		assert_eq!(input.sku, "LMP-0042");
		assert_eq!(input.price, "24.5");
		assert_eq!(input.stock_quantity, "10");
		assert_eq!(input.status, Some(ProductStatus::Inactive));
		assert!(input.category.is_empty());
	}

	#[test]
	fn test_parse_rejects_bad_input() {
		assert!(Input::parse("status active").is_err());
		assert!(Input::parse("delete seven").is_err());
		assert!(Input::parse("frobnicate").is_err());
		assert!(Input::parse("create name").is_err());
		assert!(Input::parse("create colour=red").is_err());
	}

	#[tokio::test]
	async fn test_settled_search_switches_session_filters() {
		let (api, mut browser) = browser().await;
		let typed = Instant::now();

		assert!(browser.line("search lamp").await);
		assert!(!browser.commit(typed));
		assert_eq!(browser.session.filters().search_text, "");

		assert!(browser.commit(typed + Duration::from_secs(1)));
		assert_eq!(browser.session.filters().search_text, "lamp");
		assert_eq!(browser.session.next_completion().await, Completion::Applied);
		assert_eq!(api.calls(), ["list \"\" 1", "list \"lamp\" 1"]);
	}

	#[tokio::test]
	async fn test_delete_waits_for_confirmation() {
		let (api, mut browser) = browser().await;

		assert!(browser.line("delete 4").await);
		assert_eq!(browser.pending_delete, Some(4));
		assert!(browser.line("quit").await);
		assert_eq!(browser.pending_delete, None);
		assert!(!api.calls().iter().any(|call| call.starts_with("delete")));

		assert!(browser.line("delete 4").await);
		assert!(browser.line("y").await);
		assert_eq!(api.calls().last().map(String::as_str), Some("delete 4"));
	}

	#[tokio::test]
	async fn test_create_refetches_list() {
		let (api, mut browser) = browser().await;

		browser
			.line("create name=Desk lamp; sku=LMP-0042; category=Lighting; price=24.5; stock=10")
			.await;
		assert_eq!(api.calls().last().map(String::as_str), Some("create LMP-0042"));
		assert!(browser.session.snapshot().is_some_and(|snap| snap.state.is_fetching()));

		browser.line("create name=x").await;
		assert_eq!(api.calls().iter().filter(|call| call.starts_with("create")).count(), 1);
	}
}
