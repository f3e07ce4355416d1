//! Scoped lock over the submit control plus the transient status line.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

pub const IDLE_STATUS_TEXT: &str = "Analysis typically takes 20-40 seconds depending on event size";
pub const IN_PROGRESS_STATUS_TEXT: &str = "Analyzing... This takes 30-60 seconds. Please wait.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    Idle,
    InProgress,
}

impl StatusMessage {
    pub fn text(self) -> &'static str {
        match self {
            Self::Idle => IDLE_STATUS_TEXT,
            Self::InProgress => IN_PROGRESS_STATUS_TEXT,
        }
    }
}

/// The UI surface that owns the submit control and status line.
pub trait SubmitSurface: Send + Sync {
    fn set_submit_enabled(&self, enabled: bool);
    fn set_status(&self, status: StatusMessage);
}

pub struct SubmitLock {
    in_flight: AtomicBool,
    surface: Arc<dyn SubmitSurface>,
}

impl SubmitLock {
    pub fn new(surface: Arc<dyn SubmitSurface>) -> Self {
        Self {
            in_flight: AtomicBool::new(false),
            surface,
        }
    }

    pub fn is_held(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Disables the control and shows the in-progress status. Returns `None`
    /// while another submission holds the lock.
    pub fn try_acquire(&self) -> Option<SubmitGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        self.surface.set_submit_enabled(false);
        self.surface.set_status(StatusMessage::InProgress);
        Some(SubmitGuard {
            lock: self,
            handed_off: false,
        })
    }
}

/// Re-enables the control exactly once when dropped. Unless the result was
/// handed off, the status line is reverted as well.
pub struct SubmitGuard<'a> {
    lock: &'a SubmitLock,
    handed_off: bool,
}

impl SubmitGuard<'_> {
    /// Leaves the in-progress status in place for the presenter to supersede.
    pub fn hand_off(mut self) {
        self.handed_off = true;
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if !self.handed_off {
            self.lock.surface.set_status(StatusMessage::Idle);
        }
        self.lock.surface.set_submit_enabled(true);
        self.lock.in_flight.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "tests/submit_tests.rs"]
mod tests;
