use std::future::Future;

use tokio::task::JoinHandle;

use crate::TaskClass;

/// Spawns an async task on the ambient runtime with classification metadata.
///
/// Must be called from within a tokio runtime.
pub fn spawn<F>(class: TaskClass, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tracing::trace!(worker_class = class.as_str(), "worker.spawn");
	tokio::spawn(fut)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_spawn_runs_on_current_thread_runtime() {
		let handle = spawn(TaskClass::Fetch, async { 41 + 1 });
		assert_eq!(handle.await.ok(), Some(42));
	}
}
