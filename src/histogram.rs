use std::path::PathBuf;

use clap::Args;
use plotly::{common::Title, layout::Axis, Histogram, Layout, Plot, Trace};
use polars::{frame::DataFrame, prelude::Column};
use tracing::debug;

use crate::{
    frame::float_values,
    io::read_frame,
    logging::VerbosityArgs,
    product::{select_channels, Outcome, PlotProduct},
    session::Session,
};

/// Draw the sample distribution of channels
#[derive(Debug, Clone, Args)]
pub struct HistogramArgs {
    /// Data file with one row per sample (csv, json, ndjson)
    pub input: PathBuf,
    /// Channel columns to draw, one distribution each
    #[clap(short, long, default_value = "strain")]
    pub channel: Vec<String>,
    /// Write the figure here instead of letting the backend decide
    #[clap(short, long)]
    pub output: Option<PathBuf>,
    #[clap(flatten)]
    pub verbosity: VerbosityArgs,
}

impl PlotProduct for HistogramArgs {
    const ACTION: &'static str = "histogram";

    fn run(self, session: &Session) -> anyhow::Result<Outcome> {
        let data = read_frame(&self.input)?.collect()?;
        debug!(
            "{} samples read from {}",
            data.height(),
            self.input.display()
        );
        let (channels, failures) = select_channels(&data, &self.channel)?;

        let plot = plot(&data, &channels)?;
        session.render(&plot, self.output.as_deref(), Self::ACTION)?;

        let result = data.select(channels)?;
        Ok(Outcome::new(plot, data, result).with_failures(failures))
    }
}

fn plot(data: &DataFrame, channels: &[String]) -> anyhow::Result<Plot> {
    let mut plot = Plot::new();

    for channel in channels {
        let samples = data.column(channel)?;
        plot.add_trace(trace(samples)?);
    }

    let mut layout = Layout::default().y_axis(Axis::default().title(Title::with_text("count")));
    if channels.len() == 1 {
        layout = layout.x_axis(Axis::default().title(Title::with_text(
            channels.first().unwrap().as_str(),
        )));
    }
    plot.set_layout(layout);
    Ok(plot)
}

fn trace(samples: &Column) -> anyhow::Result<Box<dyn Trace>> {
    let name = samples.name().to_string();
    let samples = float_values(samples)?;
    let trace = Histogram::new(samples).name(name.as_str());
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use polars::df;

    use super::*;

    #[test]
    fn one_distribution_per_channel() {
        let data = df!(
            "strain" => [1.0, 1.0, 2.0],
            "aux" => [3.0, 4.0, 5.0],
        )
        .unwrap();
        let channels = vec!["strain".to_string(), "aux".to_string()];
        let plot = plot(&data, &channels).unwrap();

        let json = serde_json::to_value(&plot).unwrap();
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["layout"]["yaxis"]["title"]["text"], "count");
    }

    #[test]
    fn single_channel_titles_the_x_axis() {
        let data = df!("strain" => [1.0, 2.0]).unwrap();
        let channels = vec!["strain".to_string()];
        let plot = plot(&data, &channels).unwrap();

        let json = serde_json::to_value(&plot).unwrap();
        assert_eq!(json["layout"]["xaxis"]["title"]["text"], "strain");
    }
}
