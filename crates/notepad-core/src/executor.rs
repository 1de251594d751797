//! Execution context for persistence work
//!
//! Storage calls are blocking `SQLite` calls. They run on the runtime's
//! blocking pool so the caller driving a screen never waits on disk I/O.

use std::future::Future;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::error::{Error, Result};

/// Handle to the async runtime that persistence work is scheduled on
#[derive(Debug, Clone)]
pub struct Executor {
    handle: Handle,
}

impl Executor {
    /// Wrap an explicit runtime handle
    pub const fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Use the runtime the caller is running inside of
    pub fn current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|error| Error::Executor(error.to_string()))
    }

    /// Spawn a task on the runtime
    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handle.spawn(future)
    }

    /// Run blocking work on the blocking pool and await its result
    pub async fn run_blocking<F, T>(&self, work: F) -> Result<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        self.handle.spawn_blocking(work).await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_run_blocking_returns_value() {
        let executor = Executor::current().unwrap();
        let value = executor.run_blocking(|| Ok(21 * 2)).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_run_blocking_propagates_error() {
        let executor = Executor::current().unwrap();
        let result: Result<()> = executor
            .run_blocking(|| Err(Error::InvalidInput("nope".into())))
            .await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_current_outside_runtime_fails() {
        assert!(matches!(Executor::current(), Err(Error::Executor(_))));
    }
}
