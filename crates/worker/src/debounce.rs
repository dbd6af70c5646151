//! Trailing-edge debounced values.
//!
//! A [`Debounced`] holds the last committed value of a rapidly changing
//! source. Every [`Debounced::set`] restarts the stability window; once the
//! source has been unchanged for the whole window, [`Debounced::poll`]
//! commits the latest value and emits it exactly once.
//!
//! The state object is driven by the caller's clock rather than owning a
//! timer. An async loop sleeps until [`Debounced::deadline`] and then polls;
//! tests pass synthetic instants.

use std::time::{Duration, Instant};

use tracing::trace;

#[derive(Debug, Clone)]
struct PendingValue<T> {
	value: T,
	changed_at: Instant,
}

/// A value that follows its source only after a quiet period.
#[derive(Debug, Clone)]
pub struct Debounced<T> {
	window: Duration,
	committed: T,
	pending: Option<PendingValue<T>>,
	cancelled: bool,
}

impl<T: PartialEq> Debounced<T> {
	/// Creates a debounced value with an initial committed value.
	pub fn new(initial: T, window: Duration) -> Self {
		Self {
			window,
			committed: initial,
			pending: None,
			cancelled: false,
		}
	}

	/// Stability window.
	pub fn window(&self) -> Duration {
		self.window
	}

	/// Last committed value.
	pub fn value(&self) -> &T {
		&self.committed
	}

	/// Latest source value, committed or not.
	pub fn latest(&self) -> &T {
		self.pending.as_ref().map_or(&self.committed, |p| &p.value)
	}

	/// Returns true while a change is waiting for its window to elapse.
	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	/// Records a source change at `now`, restarting the window.
	///
	/// Setting the committed value while nothing is pending is a no-op.
	/// Ignored after [`Self::cancel`].
	pub fn set(&mut self, value: T, now: Instant) {
		if self.cancelled {
			return;
		}
		if self.pending.is_none() && value == self.committed {
			return;
		}
		self.pending = Some(PendingValue { value, changed_at: now });
	}

	/// Instant at which the pending value becomes committable.
	pub fn deadline(&self) -> Option<Instant> {
		self.pending.as_ref().map(|p| p.changed_at + self.window)
	}

	/// Commits the pending value if its window has elapsed.
	///
	/// Returns the newly committed value, or `None` when nothing is due or
	/// the settled value equals the one already committed.
	pub fn poll(&mut self, now: Instant) -> Option<&T> {
		let due = self.deadline().is_some_and(|deadline| now >= deadline);
		if !due {
			return None;
		}
		self.commit()
	}

	/// Commits the pending value immediately, ignoring the window.
	pub fn flush(&mut self) -> Option<&T> {
		self.commit()
	}

	/// Replaces both committed and pending state without emitting.
	pub fn reset(&mut self, value: T) {
		self.pending = None;
		self.committed = value;
	}

	/// Drops any pending change and stops all further emission.
	pub fn cancel(&mut self) {
		self.pending = None;
		self.cancelled = true;
	}

	/// Returns true after [`Self::cancel`].
	pub fn is_cancelled(&self) -> bool {
		self.cancelled
	}

	fn commit(&mut self) -> Option<&T> {
		let pending = self.pending.take()?;
		if pending.value == self.committed {
			return None;
		}
		trace!(window_ms = self.window.as_millis() as u64, "debounce.commit");
		self.committed = pending.value;
		Some(&self.committed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const W: Duration = Duration::from_millis(500);

	#[test]
	fn test_rapid_updates_emit_once_with_last_value() {
		let t0 = Instant::now();
		let mut d = Debounced::new(String::new(), W);

		for (i, text) in ["a", "ab", "abc"].into_iter().enumerate() {
			let at = t0 + Duration::from_millis(200 * i as u64);
			d.set(text.to_owned(), at);
			assert_eq!(d.poll(at), None);
		}

		let last = t0 + Duration::from_millis(400);
		assert_eq!(d.poll(last + W - Duration::from_millis(1)), None);
		assert_eq!(d.poll(last + W).cloned(), Some("abc".to_owned()));
		assert_eq!(d.poll(last + W * 3), None);
		assert_eq!(d.value(), "abc");
	}

	#[test]
	fn test_each_update_resets_window() {
		let t0 = Instant::now();
		let mut d = Debounced::new(0u32, W);
		d.set(1, t0);
		d.set(2, t0 + Duration::from_millis(499));
		assert_eq!(d.deadline(), Some(t0 + Duration::from_millis(999)));
		assert_eq!(d.poll(t0 + W), None);
		assert_eq!(d.poll(t0 + Duration::from_millis(999)), Some(&2));
	}

	#[test]
	fn test_reverting_to_committed_value_emits_nothing() {
		let t0 = Instant::now();
		let mut d = Debounced::new("x".to_owned(), W);
		d.set("xy".to_owned(), t0);
		d.set("x".to_owned(), t0 + Duration::from_millis(10));
		assert!(d.is_pending());
		assert_eq!(d.poll(t0 + W * 2), None);
		assert!(!d.is_pending());
	}

	#[test]
	fn test_cancel_stops_emission() {
		let t0 = Instant::now();
		let mut d = Debounced::new(0u32, W);
		d.set(5, t0);
		d.cancel();
		assert_eq!(d.poll(t0 + W), None);
		d.set(6, t0 + W);
		assert_eq!(d.deadline(), None);
		assert_eq!(d.flush(), None);
		assert_eq!(*d.value(), 0);
	}

	#[test]
	fn test_independent_windows() {
		let t0 = Instant::now();
		let mut search = Debounced::new(String::new(), Duration::from_millis(500));
		let mut price = Debounced::new(None::<f64>, Duration::from_millis(800));
		search.set("lamp".into(), t0);
		price.set(Some(10.0), t0);

		let at = t0 + Duration::from_millis(600);
		assert!(search.poll(at).is_some());
		assert!(price.poll(at).is_none());
		assert_eq!(price.poll(t0 + Duration::from_millis(800)), Some(&Some(10.0)));
	}

	#[test]
	fn test_flush_commits_immediately() {
		let t0 = Instant::now();
		let mut d = Debounced::new(1u8, W);
		d.set(2, t0);
		assert_eq!(d.flush(), Some(&2));
		assert_eq!(d.latest(), &2);
	}
}
