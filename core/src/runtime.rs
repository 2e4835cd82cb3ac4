//! Scheduling seam for the single-threaded UI loop.

use futures::future::{AbortHandle, Abortable, LocalBoxFuture};
use futures::FutureExt;
use std::time::Duration;

/// Runs local (non-`Send`) tasks and provides timers.
pub trait Spawner: Clone + 'static {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);

    /// Timer future. Implementations fix the deadline when this is called,
    /// not when the future is first polled.
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Owns a spawned task; dropping the guard cancels it.
#[derive(Debug)]
pub struct TaskGuard {
    handle: AbortHandle,
}

impl TaskGuard {
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawns `task` so that it stops at its next suspension point once the
/// returned guard is cancelled or dropped.
pub fn spawn_cancellable<S: Spawner>(
    spawner: &S,
    task: LocalBoxFuture<'static, ()>,
) -> TaskGuard {
    let (handle, registration) = AbortHandle::new_pair();
    spawner.spawn_local(Abortable::new(task, registration).map(|_| ()).boxed_local());
    TaskGuard { handle }
}

/// One-shot delayed callback tied to a `TaskGuard`.
pub fn spawn_timeout<S, F>(spawner: &S, delay: Duration, callback: F) -> TaskGuard
where
    S: Spawner,
    F: FnOnce() + 'static,
{
    let timer = spawner.sleep(delay);
    spawn_cancellable(
        spawner,
        async move {
            timer.await;
            callback();
        }
        .boxed_local(),
    )
}
