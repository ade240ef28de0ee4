use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use plotly::Plot;
use tracing::info;

/// How finished figures reach the user.
///
/// Decided once per process from the `DISPLAY` environment variable, before
/// any product runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// A display is attached; figures without an output path open in the
    /// browser.
    Interactive,
    /// No display; figures are always written to file.
    Headless,
}

impl Backend {
    pub fn from_env() -> Self {
        Self::from_display(std::env::var("DISPLAY").ok().as_deref())
    }

    pub fn from_display(display: Option<&str>) -> Self {
        match display {
            Some(display) if !display.is_empty() => Backend::Interactive,
            _ => Backend::Headless,
        }
    }
}

/// Per-invocation state handed to every product: the program start time used
/// by the timing checkpoints and the rendering backend.
#[derive(Debug, Clone)]
pub struct Session {
    started: Instant,
    backend: Backend,
}

impl Session {
    pub fn from_env() -> Self {
        Self::new(Backend::from_env())
    }

    pub fn new(backend: Backend) -> Self {
        Self {
            started: Instant::now(),
            backend,
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Render a finished figure. An explicit output path always wins; without
    /// one the backend decides between the browser and `<stem>.html`.
    pub fn render(
        &self,
        plot: &Plot,
        output: Option<&Path>,
        stem: &str,
    ) -> anyhow::Result<()> {
        match (output, self.backend) {
            (Some(output), _) => plot.write_html(output),
            (None, Backend::Interactive) => plot.show(),
            (None, Backend::Headless) => {
                let output = PathBuf::from(format!("{stem}.html"));
                info!("saving plot to {}", output.display());
                plot.write_html(&output);
            }
        }
        Ok(())
    }
}
