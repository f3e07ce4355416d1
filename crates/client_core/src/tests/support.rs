use std::sync::Mutex;

use crate::submit::{StatusMessage, SubmitSurface};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Enabled(bool),
    Status(StatusMessage),
}

/// Surface that records every transition for assertions.
#[derive(Default)]
pub struct RecordingSurface {
    calls: Mutex<Vec<SurfaceCall>>,
}

impl RecordingSurface {
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().expect("calls").clone()
    }

    pub fn submit_enabled(&self) -> bool {
        self.calls()
            .iter()
            .rev()
            .find_map(|call| match call {
                SurfaceCall::Enabled(enabled) => Some(*enabled),
                SurfaceCall::Status(_) => None,
            })
            .unwrap_or(true)
    }

    pub fn status(&self) -> StatusMessage {
        self.calls()
            .iter()
            .rev()
            .find_map(|call| match call {
                SurfaceCall::Status(status) => Some(*status),
                SurfaceCall::Enabled(_) => None,
            })
            .unwrap_or(StatusMessage::Idle)
    }

    pub fn enable_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| **call == SurfaceCall::Enabled(true))
            .count()
    }
}

impl SubmitSurface for RecordingSurface {
    fn set_submit_enabled(&self, enabled: bool) {
        self.calls
            .lock()
            .expect("calls")
            .push(SurfaceCall::Enabled(enabled));
    }

    fn set_status(&self, status: StatusMessage) {
        self.calls
            .lock()
            .expect("calls")
            .push(SurfaceCall::Status(status));
    }
}
