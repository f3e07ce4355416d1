//! Submit-wait-cancel lifecycle for one outstanding analysis at a time.

use std::sync::{Arc, Mutex, PoisonError};

use shared::{
    error::ClassifiedError,
    protocol::{AnalysisForm, AnalysisRequest, AnalysisResult},
};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::{
    submit::{SubmitGuard, SubmitLock, SubmitSurface},
    AnalysisClient,
};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("an analysis is already in progress")]
    InProgress,
    #[error(transparent)]
    Failed(#[from] ClassifiedError),
}

pub struct Orchestrator {
    client: AnalysisClient,
    lock: SubmitLock,
    cancel: Mutex<CancellationToken>,
}

impl Orchestrator {
    pub fn new(client: AnalysisClient, surface: Arc<dyn SubmitSurface>) -> Self {
        Self {
            client,
            lock: SubmitLock::new(surface),
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.lock.is_held()
    }

    /// Runs one submission. The control stays disabled for the whole call and
    /// is re-enabled on every exit path, including the future being dropped.
    pub async fn submit(&self, form: &AnalysisForm) -> Result<AnalysisResult, SubmitError> {
        let Some((guard, cancel)) = self.acquire() else {
            warn!("analysis: submission rejected, another request is in flight");
            return Err(SubmitError::InProgress);
        };

        let request = AnalysisRequest::from_form(form);

        match self.client.analyze(&request, &cancel).await {
            Ok(result) => {
                info!("analysis: result handed off to presenter");
                guard.hand_off();
                Ok(result)
            }
            Err(err) => {
                warn!(class = ?err.class(), error = %err, "analysis: submission failed");
                Err(SubmitError::Failed(err))
            }
        }
    }

    /// Aborts the outstanding call, if any. It completes as a network error.
    pub fn cancel(&self) {
        self.cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cancel();
    }

    /// Takes the submit lock and installs this call's token under the token
    /// mutex, so a `cancel()` racing the start always reaches the new call.
    /// Surface callbacks run under that mutex and must not call `cancel()`
    /// on the same thread.
    fn acquire(&self) -> Option<(SubmitGuard<'_>, CancellationToken)> {
        let mut slot = self.cancel.lock().unwrap_or_else(PoisonError::into_inner);
        let guard = self.lock.try_acquire()?;
        *slot = CancellationToken::new();
        Some((guard, slot.clone()))
    }
}
