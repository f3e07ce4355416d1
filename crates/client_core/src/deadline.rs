//! Deadline that actively cancels an in-flight call when it expires.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub struct Deadline {
    token: CancellationToken,
    expired: Arc<AtomicBool>,
    timeout: Duration,
    timer: JoinHandle<()>,
}

impl Deadline {
    /// Derives a child of `parent` that is cancelled once `timeout` elapses.
    /// Cancelling `parent` cancels the child without marking it expired.
    pub fn arm(parent: &CancellationToken, timeout: Duration) -> Self {
        let token = parent.child_token();
        let expired = Arc::new(AtomicBool::new(false));
        let timer = tokio::spawn({
            let token = token.clone();
            let expired = Arc::clone(&expired);
            async move {
                tokio::time::sleep(timeout).await;
                expired.store(true, Ordering::SeqCst);
                token.cancel();
            }
        });
        Self {
            token,
            expired,
            timeout,
            timer,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn expired(&self) -> bool {
        self.expired.load(Ordering::SeqCst)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.timer.abort();
    }
}
