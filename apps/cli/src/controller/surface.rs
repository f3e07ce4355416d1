//! Terminal stand-in for the submit button and status line.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, PoisonError,
};

use client_core::{StatusMessage, SubmitSurface};

pub struct TerminalSurface {
    submit_enabled: AtomicBool,
    status: Mutex<StatusMessage>,
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self {
            submit_enabled: AtomicBool::new(true),
            status: Mutex::new(StatusMessage::Idle),
        }
    }
}

#[cfg(test)]
impl TerminalSurface {
    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> StatusMessage {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SubmitSurface for TerminalSurface {
    fn set_submit_enabled(&self, enabled: bool) {
        self.submit_enabled.store(enabled, Ordering::SeqCst);
        tracing::debug!(enabled, "ui: submit control toggled");
    }

    fn set_status(&self, status: StatusMessage) {
        let mut slot = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        if *slot != status {
            tracing::info!("{}", status.text());
        }
        *slot = status;
    }
}
