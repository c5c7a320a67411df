//! Task spawning and timers.
//!
//! The core never names an executor. The browser front end plugs in
//! `spawn_local` and `setTimeout`, tests plug in a tokio `LocalSet` with a
//! paused clock.

use std::future::Future;
use std::time::Duration;

use futures::future::{self, Either, LocalBoxFuture};

/// Single-threaded executor hooks.
pub trait Runtime {
    /// Run a detached task to completion.
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);

    /// Resolve after `duration`.
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Race `fut` against a timer. `None` means the timer won and `fut` was dropped.
pub async fn with_timeout<R, F>(runtime: &R, duration: Duration, fut: F) -> Option<F::Output>
where
    R: Runtime + ?Sized,
    F: Future,
{
    let fut = Box::pin(fut);
    let timer = runtime.sleep(duration);

    match future::select(fut, timer).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(((), _)) => None,
    }
}
