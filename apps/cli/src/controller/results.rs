//! Results region: holds the rendered view and swaps it in one step.

use std::{
    fs,
    io::Write as _,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use anyhow::Context;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

pub struct ResultsRegion {
    target: OutputTarget,
    current: Mutex<Option<String>>,
}

impl ResultsRegion {
    pub fn new(target: OutputTarget) -> Self {
        Self {
            target,
            current: Mutex::new(None),
        }
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<String> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Publishes a complete view. A file target is written beside the
    /// destination and renamed over it, so readers never observe a partial
    /// view and a failed write leaves the previous one in place.
    pub fn replace(&self, rendered: String) -> anyhow::Result<()> {
        match &self.target {
            OutputTarget::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(rendered.as_bytes())
                    .context("failed to write view to stdout")?;
                stdout.flush().context("failed to flush stdout")?;
            }
            OutputTarget::File(path) => swap_file(path, &rendered)?,
        }
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(rendered);
        Ok(())
    }
}

fn swap_file(path: &Path, rendered: &str) -> anyhow::Result<()> {
    let file_name = path
        .file_name()
        .with_context(|| format!("output path '{}' has no file name", path.display()))?;
    let staging = path.with_file_name(format!(".{}.partial", file_name.to_string_lossy()));

    fs::write(&staging, rendered)
        .with_context(|| format!("failed to write '{}'", staging.display()))?;
    if let Err(err) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(err).with_context(|| format!("failed to replace '{}'", path.display()));
    }
    tracing::info!(path = %path.display(), bytes = rendered.len(), "ui: results view replaced");
    Ok(())
}
