//! Cooperative task primitives for the catalog client.
//!
//! Everything here assumes a single-threaded, event-driven owner: values are
//! advanced by explicit calls carrying the current instant, and stale work is
//! recognised by [`Generation`] rather than by locking.

mod class;
pub mod debounce;
mod spawn;
mod token;

pub use class::TaskClass;
pub use debounce::Debounced;
pub use spawn::spawn;
pub use token::{Generation, GenerationClock, GenerationToken};
