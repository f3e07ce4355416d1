//! Result presenter: normalization, ranking, tiering and rendering of an
//! analysis payload. Every function here is pure.

use shared::{error::ClassifiedError, protocol::AnalysisResult};

pub mod html;
pub mod normalize;
pub mod rank;
pub mod text;
pub mod view;

pub use html::render_html;
pub use normalize::{normalize, NormalizeOptions, NormalizedAttendee, NormalizedReport};
pub use rank::rank;
pub use text::render_text;
pub use view::{build_view, ReportView};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Html,
    Text,
    Json,
}

/// Renders `view` in the requested format.
pub fn render(view: &ReportView, format: OutputFormat) -> Result<String, ClassifiedError> {
    match format {
        OutputFormat::Html => Ok(render_html(view)),
        OutputFormat::Text => Ok(render_text(view)),
        OutputFormat::Json => serde_json::to_string_pretty(view)
            .map_err(|e| ClassifiedError::malformed(format!("view serialization failed: {e}"))),
    }
}

/// Full normalize, rank, assemble and render pass. Yields nothing on a
/// structural violation, so callers never see a partial view.
pub fn present(
    result: &AnalysisResult,
    options: &NormalizeOptions,
    format: OutputFormat,
) -> Result<String, ClassifiedError> {
    let report = normalize(result, options)?;
    render(&build_view(&report), format)
}
