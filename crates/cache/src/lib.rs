//! Paged result cache for the catalog list.
//!
//! [`PagedCache`] maps each filter set's [`CacheKey`] to the pages fetched for
//! it so far. It is owned by a single coordinator and mutated only through
//! its methods; there is no locking.
//!
//! # Fetch lifecycle
//!
//! 1. [`PagedCache::activate`] makes a key current and discards every other
//!    key, cancelling their in-flight fetches.
//! 2. [`PagedCache::begin_fetch`] hands out a [`FetchTicket`] for the next
//!    page, or `None` if a fetch is already in flight or the list is exhausted.
//! 3. The caller performs the request and reports it with
//!    [`PagedCache::complete`]. Results whose generation is no longer the
//!    entry's in-flight generation are dropped as [`Completion::Stale`].
//!
//! # Invalidation
//!
//! A successful create or delete calls [`PagedCache::invalidate_all`], which
//! drops every key's pages. The current filter may or may not include the
//! affected product, so the next read restarts from page 1.

mod state;

use std::collections::HashMap;

use tracing::debug;
use vitrine_primitives::{DEFAULT_PAGE_LIMIT, Page, PageRequest};
use vitrine_query::CacheKey;
use vitrine_worker::{GenerationClock, GenerationToken};

pub use state::{CacheEvent, Completion, FetchFailure, LoadState, Snapshot};

/// Handle returned by [`PagedCache::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&CacheEvent) + Send>;

/// Permission to fetch one page for one key.
#[derive(Debug, Clone)]
pub struct FetchTicket {
	key: CacheKey,
	request: PageRequest,
	token: GenerationToken,
}

impl FetchTicket {
	/// Key the page belongs to.
	pub fn key(&self) -> &CacheKey {
		&self.key
	}

	/// Page and limit to request.
	pub fn request(&self) -> PageRequest {
		self.request
	}

	/// Generation and cancellation scope of this fetch.
	pub fn token(&self) -> &GenerationToken {
		&self.token
	}
}

#[derive(Debug)]
struct Entry {
	pages: Vec<Page>,
	next: PageRequest,
	state: LoadState,
	in_flight: Option<GenerationToken>,
	error: Option<FetchFailure>,
}

impl Entry {
	fn new(limit: u32) -> Self {
		Self {
			pages: Vec::new(),
			next: PageRequest::first(limit),
			state: LoadState::Empty,
			in_flight: None,
			error: None,
		}
	}

	fn owns(&self, ticket: &FetchTicket) -> bool {
		self.in_flight
			.as_ref()
			.is_some_and(|t| t.generation() == ticket.token.generation())
	}

	fn cancel_in_flight(&mut self) {
		if let Some(token) = self.in_flight.take() {
			token.cancel();
		}
	}

	fn snapshot(&self) -> Snapshot<'_> {
		Snapshot {
			state: self.state,
			pages: &self.pages,
			error: self.error.as_ref(),
			next: self.next,
		}
	}
}

/// Accumulated pages per filter set, with single-flight fetching.
pub struct PagedCache {
	entries: HashMap<CacheKey, Entry>,
	active: Option<CacheKey>,
	limit: u32,
	clock: GenerationClock,
	observers: Vec<(SubscriptionId, Observer)>,
	next_subscription: u64,
}

impl Default for PagedCache {
	fn default() -> Self {
		Self::new(DEFAULT_PAGE_LIMIT)
	}
}

impl std::fmt::Debug for PagedCache {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PagedCache")
			.field("entries", &self.entries)
			.field("active", &self.active)
			.field("limit", &self.limit)
			.field("observers", &self.observers.len())
			.finish()
	}
}

impl PagedCache {
	/// Creates an empty cache fetching `limit` products per page.
	pub fn new(limit: u32) -> Self {
		Self {
			entries: HashMap::new(),
			active: None,
			limit: limit.max(1),
			clock: GenerationClock::new(),
			observers: Vec::new(),
			next_subscription: 0,
		}
	}

	/// Page size used for new entries.
	pub fn limit(&self) -> u32 {
		self.limit
	}

	/// Currently active key.
	pub fn active(&self) -> Option<&CacheKey> {
		self.active.as_ref()
	}

	/// Makes `key` the active key, discarding every other entry.
	///
	/// Returns false if `key` was already active.
	pub fn activate(&mut self, key: CacheKey) -> bool {
		if self.active.as_ref() == Some(&key) {
			return false;
		}

		let stale: Vec<CacheKey> = self.entries.keys().filter(|k| **k != key).cloned().collect();
		for old in stale {
			if let Some(mut entry) = self.entries.remove(&old) {
				entry.cancel_in_flight();
				debug!(key = %old, pages = entry.pages.len(), "cache.discard");
				self.emit(&CacheEvent::Discarded { key: old });
			}
		}

		let limit = self.limit;
		self.entries.entry(key.clone()).or_insert_with(|| Entry::new(limit));
		debug!(key = %key, "cache.activate");
		self.active = Some(key);
		true
	}

	/// Starts the next fetch for `key`, if one is allowed.
	///
	/// Returns `None` when `key` is not active, a fetch is already in flight,
	/// or the list is exhausted.
	pub fn begin_fetch(&mut self, key: &CacheKey) -> Option<FetchTicket> {
		if self.active.as_ref() != Some(key) {
			return None;
		}
		let entry = self.entries.get_mut(key)?;

		let state = match entry.state {
			LoadState::Empty => LoadState::Loading,
			LoadState::Loaded => LoadState::LoadingMore,
			LoadState::Errored if entry.pages.is_empty() => LoadState::Loading,
			LoadState::Errored => LoadState::LoadingMore,
			LoadState::Loading | LoadState::LoadingMore | LoadState::Exhausted => return None,
		};

		let token = self.clock.issue();
		entry.state = state;
		entry.error = None;
		entry.in_flight = Some(token.clone());
		let ticket = FetchTicket {
			key: key.clone(),
			request: entry.next,
			token,
		};

		debug!(
			key = %key,
			page = ticket.request.page,
			generation = %ticket.token.generation(),
			"cache.fetch.begin"
		);
		self.emit(&CacheEvent::Changed { key: key.clone(), state });
		Some(ticket)
	}

	/// Returns true while `ticket` is the in-flight fetch of its key.
	pub fn is_current(&self, ticket: &FetchTicket) -> bool {
		self.entries.get(&ticket.key).is_some_and(|entry| entry.owns(ticket))
	}

	/// Records the outcome of a fetch started with [`Self::begin_fetch`].
	pub fn complete(&mut self, ticket: FetchTicket, outcome: Result<Page, FetchFailure>) -> Completion {
		let current = self.entries.get_mut(&ticket.key).filter(|entry| entry.owns(&ticket));
		let Some(entry) = current else {
			debug!(
				key = %ticket.key,
				page = ticket.request.page,
				generation = %ticket.token.generation(),
				"cache.fetch.stale"
			);
			return Completion::Stale;
		};

		entry.in_flight = None;
		match outcome {
			Ok(page) => {
				entry.state = if page.has_more { LoadState::Loaded } else { LoadState::Exhausted };
				entry.next = ticket.request.next();
				debug!(
					key = %ticket.key,
					page = ticket.request.page,
					items = page.items.len(),
					has_more = page.has_more,
					"cache.fetch.applied"
				);
				entry.pages.push(page);
			}
			Err(failure) => {
				debug!(key = %ticket.key, page = ticket.request.page, error = %failure.message, "cache.fetch.failed");
				entry.state = LoadState::Errored;
				entry.error = Some(failure);
			}
		}

		let state = entry.state;
		self.emit(&CacheEvent::Changed { key: ticket.key, state });
		Completion::Applied
	}

	/// Cancels the in-flight fetch for `key`, reverting to the prior state.
	///
	/// Returns false when nothing was in flight.
	pub fn cancel_fetch(&mut self, key: &CacheKey) -> bool {
		let Some(entry) = self.entries.get_mut(key) else {
			return false;
		};
		if entry.in_flight.is_none() {
			return false;
		}
		entry.cancel_in_flight();
		entry.state = if entry.pages.is_empty() { LoadState::Empty } else { LoadState::Loaded };
		let state = entry.state;
		self.emit(&CacheEvent::Changed { key: key.clone(), state });
		true
	}

	/// Drops the pages of every key and cancels all in-flight fetches.
	///
	/// The active key stays active with an empty entry, so the next fetch
	/// starts again at page 1.
	pub fn invalidate_all(&mut self) {
		for entry in self.entries.values_mut() {
			entry.cancel_in_flight();
		}
		let dropped = self.entries.len();
		self.entries.clear();
		if let Some(key) = &self.active {
			self.entries.insert(key.clone(), Entry::new(self.limit));
		}
		debug!(dropped, "cache.invalidate_all");
		self.emit(&CacheEvent::Invalidated);
	}

	/// Read-only view of `key`'s entry.
	pub fn snapshot(&self, key: &CacheKey) -> Option<Snapshot<'_>> {
		self.entries.get(key).map(Entry::snapshot)
	}

	/// Read-only view of the active entry.
	pub fn active_snapshot(&self) -> Option<Snapshot<'_>> {
		self.active.as_ref().and_then(|key| self.snapshot(key))
	}

	/// Registers an observer called after every state change.
	pub fn subscribe(&mut self, observer: impl FnMut(&CacheEvent) + Send + 'static) -> SubscriptionId {
		self.next_subscription += 1;
		let id = SubscriptionId(self.next_subscription);
		self.observers.push((id, Box::new(observer)));
		id
	}

	/// Removes an observer. Returns false if it was not registered.
	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		let before = self.observers.len();
		self.observers.retain(|(existing, _)| *existing != id);
		self.observers.len() != before
	}

	fn emit(&mut self, event: &CacheEvent) {
		for (_, observer) in &mut self.observers {
			observer(event);
		}
	}
}
