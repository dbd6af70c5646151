//! Catalog list session.
//!
//! [`CatalogSession`] binds the committed filters to the paged cache. It is
//! the cache's single writer: fetches run as spawned tasks that report back
//! over a completion channel, and the owner applies them with
//! [`CatalogSession::apply_completions`] or [`CatalogSession::next_completion`].
//! Completions are checked against the cache's in-flight generation, so a
//! response for a superseded filter set or page never lands.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};
use vitrine_cache::{CacheEvent, Completion, FetchFailure, FetchTicket, PagedCache, Snapshot, SubscriptionId};
use vitrine_client::{CallOptions, CatalogApi, ClientError};
use vitrine_form::Locale;
use vitrine_primitives::{FilterSet, Page, Product, ProductId};
use vitrine_query::CacheKey;
use vitrine_worker::TaskClass;

use crate::form::{ProductForm, SubmitOutcome};
use crate::notice::Notice;

struct FetchDone {
	ticket: FetchTicket,
	outcome: Result<Page, ClientError>,
}

/// The product list for one screen.
///
/// Fetches are spawned on the ambient tokio runtime, so every method that may
/// start one must be called from within it.
pub struct CatalogSession {
	api: Arc<dyn CatalogApi>,
	cache: PagedCache,
	filters: FilterSet,
	key: CacheKey,
	timeout: Option<Duration>,
	locale: Locale,
	done_tx: mpsc::UnboundedSender<FetchDone>,
	done_rx: mpsc::UnboundedReceiver<FetchDone>,
}

impl std::fmt::Debug for CatalogSession {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CatalogSession")
			.field("cache", &self.cache)
			.field("key", &self.key)
			.field("timeout", &self.timeout)
			.finish_non_exhaustive()
	}
}

impl CatalogSession {
	/// Creates a session fetching `limit` products per page.
	///
	/// Nothing is requested until [`Self::set_filters`] or [`Self::refresh`].
	pub fn new(api: Arc<dyn CatalogApi>, limit: u32) -> Self {
		let (done_tx, done_rx) = mpsc::unbounded_channel();
		let filters = FilterSet::default();
		Self {
			api,
			cache: PagedCache::new(limit),
			key: CacheKey::of(&filters),
			filters,
			timeout: None,
			locale: Locale::default(),
			done_tx,
			done_rx,
		}
	}

	/// Overrides the per-request timeout of list fetches.
	#[must_use]
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	/// Language of fetch failure messages.
	#[must_use]
	pub fn with_locale(mut self, locale: Locale) -> Self {
		self.locale = locale;
		self
	}

	/// Remote API shared with other controllers.
	pub fn api(&self) -> &Arc<dyn CatalogApi> {
		&self.api
	}

	/// Filters the list is currently showing.
	pub fn filters(&self) -> &FilterSet {
		&self.filters
	}

	/// Switches the list to `filters` and fetches its first page.
	///
	/// Pages of the previous filter set are discarded and its in-flight fetch
	/// is cancelled. Returns false when the filters did not change.
	pub fn set_filters(&mut self, filters: FilterSet) -> bool {
		let key = CacheKey::of(&filters);
		if !self.cache.activate(key.clone()) {
			return false;
		}
		self.filters = filters;
		self.key = key;
		self.start_fetch();
		true
	}

	/// Fetches the first page if nothing has been loaded yet, or retries after
	/// an error.
	pub fn refresh(&mut self) -> bool {
		if self.cache.active().is_none() {
			self.cache.activate(self.key.clone());
		}
		let retry = self
			.snapshot()
			.is_some_and(|snap| snap.error.is_some() || (snap.pages.is_empty() && !snap.state.is_fetching()));
		retry && self.start_fetch()
	}

	/// Requests the next page.
	///
	/// Does nothing while a fetch is in flight or once the server reported no
	/// further pages.
	pub fn load_more(&mut self) -> bool {
		if self.cache.active().is_none() {
			self.cache.activate(self.key.clone());
		}
		self.start_fetch()
	}

	fn start_fetch(&mut self) -> bool {
		let Some(ticket) = self.cache.begin_fetch(&self.key) else {
			return false;
		};

		let api = Arc::clone(&self.api);
		let filters = self.filters.clone();
		let tx = self.done_tx.clone();
		let mut opts = CallOptions::with_cancel(ticket.token().cancellation().clone());
		opts.timeout = self.timeout;

		vitrine_worker::spawn(TaskClass::Fetch, async move {
			let outcome = api.list_products(&filters, ticket.request(), &opts).await;
			let _ = tx.send(FetchDone { ticket, outcome });
		});
		true
	}

	/// Applies every completion that has already arrived.
	///
	/// Returns how many changed the cache.
	pub fn apply_completions(&mut self) -> usize {
		let mut applied = 0;
		while let Ok(done) = self.done_rx.try_recv() {
			if self.apply(done) == Completion::Applied {
				applied += 1;
			}
		}
		applied
	}

	/// Waits for the next fetch to finish and applies it.
	pub async fn next_completion(&mut self) -> Completion {
		match self.done_rx.recv().await {
			Some(done) => self.apply(done),
			// The session holds a sender, so the channel never closes.
			None => Completion::Stale,
		}
	}

	fn apply(&mut self, done: FetchDone) -> Completion {
		let FetchDone { ticket, outcome } = done;
		match outcome {
			Ok(page) => self.cache.complete(ticket, Ok(page)),
			Err(err) if err.is_aborted() => {
				// Superseded fetches were already detached by the cache.
				if self.cache.is_current(&ticket) {
					self.cache.cancel_fetch(ticket.key());
				}
				debug!(key = %ticket.key(), page = ticket.request().page, "catalog.fetch.aborted");
				Completion::Stale
			}
			Err(err) => {
				if self.cache.is_current(&ticket) {
					warn!(key = %ticket.key(), page = ticket.request().page, error = %err, "catalog.fetch.failed");
				}
				let message = Notice::localized(&err, self.locale).map_or_else(|| err.to_string(), |n| n.message);
				let failure = FetchFailure {
					message,
					status: err.status(),
				};
				self.cache.complete(ticket, Err(failure))
			}
		}
	}

	/// Deletes a product, then restarts the list from its first page.
	///
	/// On failure the cache is left untouched.
	pub async fn delete(&mut self, id: ProductId) -> Result<(), ClientError> {
		let opts = CallOptions {
			timeout: self.timeout,
			..CallOptions::new()
		};
		self.api.delete_product(id, &opts).await?;
		debug!(id, "catalog.deleted");
		self.invalidate();
		Ok(())
	}

	/// Submits `form`, then restarts the list from its first page if the
	/// product was created.
	///
	/// Rejected and invalid submissions leave the cache untouched.
	pub async fn create(&mut self, form: &mut ProductForm) -> SubmitOutcome {
		let opts = CallOptions {
			timeout: self.timeout,
			..CallOptions::new()
		};
		let outcome = form.submit(self.api.as_ref(), &opts).await;
		if let SubmitOutcome::Created(product) = &outcome {
			debug!(id = product.id, "catalog.created");
			self.invalidate();
		}
		outcome
	}

	/// Discards every cached page after a mutation and refetches page 1.
	pub fn invalidate(&mut self) {
		self.cache.invalidate_all();
		self.start_fetch();
	}

	/// Current state of the list.
	pub fn snapshot(&self) -> Option<Snapshot<'_>> {
		self.cache.snapshot(&self.key)
	}

	/// Accumulated products in page order.
	pub fn items(&self) -> Vec<&Product> {
		self.snapshot().map(|snap| snap.items().collect()).unwrap_or_default()
	}

	/// Returns true if [`Self::load_more`] would issue a request.
	pub fn can_load_more(&self) -> bool {
		self.snapshot().is_some_and(|snap| snap.can_load_more())
	}

	/// Registers a callback run after every cache change.
	pub fn subscribe(&mut self, observer: impl FnMut(&CacheEvent) + Send + 'static) -> SubscriptionId {
		self.cache.subscribe(observer)
	}

	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		self.cache.unsubscribe(id)
	}
}

impl Drop for CatalogSession {
	fn drop(&mut self) {
		self.cache.cancel_fetch(&self.key);
	}
}
