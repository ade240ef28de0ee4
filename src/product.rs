use anyhow::bail;
use plotly::Plot;
use polars::frame::DataFrame;
use tracing::warn;

use crate::session::Session;

/// The capability interface every plot product implements. The argument
/// schema lives on the same struct through the clap derive.
pub trait PlotProduct {
    /// Subcommand and default output-file stem.
    const ACTION: &'static str;

    fn run(self, session: &Session) -> anyhow::Result<Outcome>;
}

/// What a finished run leaves behind for callers that want to inspect it:
/// the figure, the frame as read, and the columns that were actually drawn.
pub struct Outcome {
    pub plot: Plot,
    pub data: DataFrame,
    pub result: DataFrame,
    /// Requested channels that could not be plotted.
    pub failures: Vec<String>,
}

impl Outcome {
    pub fn new(plot: Plot, data: DataFrame, result: DataFrame) -> Self {
        Self {
            plot,
            data,
            result,
            failures: vec![],
        }
    }

    pub fn with_failures(mut self, failures: Vec<String>) -> Self {
        self.failures = failures;
        self
    }

    pub fn has_error(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Split requested channels into those present in the frame and those not.
/// A channel that is missing is a warning the caller reports through
/// [`Outcome::failures`]; no channel at all leaves nothing to plot.
pub fn select_channels(
    data: &DataFrame,
    requested: &[String],
) -> anyhow::Result<(Vec<String>, Vec<String>)> {
    let mut found = vec![];
    let mut missing = vec![];
    for channel in requested {
        if data.column(channel).is_ok() {
            found.push(channel.clone());
        } else {
            warn!("channel `{channel}` is not in the data");
            missing.push(channel.clone());
        }
    }
    if found.is_empty() {
        bail!("none of the requested channels are present: {requested:?}");
    }
    Ok((found, missing))
}
