//! Controller layer: runs one submit-then-present cycle against the results
//! region.

pub mod results;
pub mod surface;

use std::sync::Arc;

use client_core::{AnalysisClient, Orchestrator, StatusMessage, SubmitError, SubmitSurface};
use report::{NormalizeOptions, OutputFormat};
use shared::{
    error::ClassifiedError,
    protocol::{AnalysisForm, AnalysisResult},
};
use thiserror::Error;
use tracing::{info, warn};

use results::ResultsRegion;
use surface::TerminalSurface;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error(transparent)]
    Present(ClassifiedError),
    #[error("failed to publish results: {0:#}")]
    Output(anyhow::Error),
}

impl SessionError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Submit(SubmitError::InProgress) => {
                "An analysis is already running. Please wait for it to finish.".to_string()
            }
            Self::Submit(SubmitError::Failed(err)) | Self::Present(err) => err.user_message(),
            Self::Output(err) => format!("{err:#}"),
        }
    }
}

pub struct AnalysisSession {
    orchestrator: Arc<Orchestrator>,
    surface: Arc<TerminalSurface>,
    region: ResultsRegion,
    options: NormalizeOptions,
    format: OutputFormat,
}

impl AnalysisSession {
    pub fn new(
        client: AnalysisClient,
        region: ResultsRegion,
        options: NormalizeOptions,
        format: OutputFormat,
    ) -> Self {
        let surface = Arc::new(TerminalSurface::default());
        let orchestrator = Arc::new(Orchestrator::new(client, surface.clone()));
        Self {
            orchestrator,
            surface,
            region,
            options,
            format,
        }
    }

    pub fn orchestrator(&self) -> Arc<Orchestrator> {
        self.orchestrator.clone()
    }

    #[cfg(test)]
    pub fn surface(&self) -> &TerminalSurface {
        &self.surface
    }

    #[cfg(test)]
    pub fn region(&self) -> &ResultsRegion {
        &self.region
    }

    pub async fn run(&self, form: &AnalysisForm) -> Result<(), SessionError> {
        let result = self.orchestrator.submit(form).await?;
        self.show(&result)
    }

    /// Renders `result` and swaps it into the region. On any failure the
    /// previous view stays untouched and the status line is restored.
    pub fn show(&self, result: &AnalysisResult) -> Result<(), SessionError> {
        let rendered = match report::present(result, &self.options, self.format) {
            Ok(rendered) => rendered,
            Err(err) => {
                warn!(error = %err, "ui: payload rejected by presenter");
                self.surface.set_status(StatusMessage::Idle);
                return Err(SessionError::Present(err));
            }
        };
        if let Err(err) = self.region.replace(rendered) {
            self.surface.set_status(StatusMessage::Idle);
            return Err(SessionError::Output(err));
        }
        info!("ui: analysis results displayed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
