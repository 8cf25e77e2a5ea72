//! Structured background work.
//!
//! A [`TaskScope`] is owned by whatever screen or controller starts the work.
//! Shutting the scope down (or dropping it) cancels every task it spawned, so
//! no task outlives its owner.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;

pub struct TaskScope {
    token: CancellationToken,
    tasks: Mutex<JoinSet<()>>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            tasks: Mutex::new(JoinSet::new()),
        }
    }

    /// Spawns `task` onto the current runtime.
    ///
    /// The task is dropped at its next `.await` once the scope is cancelled.
    /// Handles of tasks that already finished are reaped first.
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = self.token.clone();
        let mut tasks = self.lock();
        while let Some(result) = tasks.try_join_next() {
            log_join_error(result);
        }
        tasks.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = task => {}
            }
        });
    }

    /// Token that is cancelled together with the scope.
    pub fn token(&self) -> CancellationToken {
        self.token.child_token()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Number of spawned tasks not yet joined.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Waits for every task spawned so far to run to completion.
    pub async fn drain(&self) {
        let mut tasks = std::mem::take(&mut *self.lock());
        while let Some(result) = tasks.join_next().await {
            log_join_error(result);
        }
    }

    /// Cancels every task and waits for all of them to finish.
    pub async fn shutdown(&self) {
        self.token.cancel();
        self.drain().await;
        tracing::debug!("Task scope shut down");
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, JoinSet<()>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn log_join_error(result: Result<(), JoinError>) {
    if let Err(e) = result {
        if e.is_panic() {
            tracing::warn!(error = %e, "Scoped task panicked");
        }
    }
}

impl Default for TaskScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        // JoinSet aborts its tasks on drop; cancelling also reaches child tokens.
        self.token.cancel();
    }
}
