//! Timer ownership. Every periodic task is held by the view state that
//! started it and is aborted when that handle drops, so a slow response
//! can never update a torn-down view.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::app::AppEvent;

pub struct TaskGuard {
    handle: JoinHandle<()>,
}

impl TaskGuard {
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self { handle }
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn a ticker that emits `make()` into the app event channel every
/// `period` until its guard drops or the channel closes.
pub fn repeating<F>(tx: mpsc::Sender<AppEvent>, period: Duration, make: F) -> TaskGuard
where
    F: Fn() -> AppEvent + Send + 'static,
{
    TaskGuard::new(tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick of a tokio interval completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            if tx.send(make()).await.is_err() {
                break;
            }
        }
    }))
}
