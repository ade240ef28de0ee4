use std::path::PathBuf;

use clap::Args;
use plotly::{
    common::{Mode, Title},
    layout::{Axis, AxisType},
    Layout, Plot, Scatter, Trace,
};
use polars::{frame::DataFrame, prelude::Column};
use tracing::debug;

use crate::{
    frame::float_values,
    io::read_frame,
    logging::VerbosityArgs,
    product::{select_channels, Outcome, PlotProduct},
    session::Session,
};

/// Draw amplitude spectra of channels on logarithmic axes
#[derive(Debug, Clone, Args)]
pub struct SpectrumArgs {
    /// Data file with one row per frequency bin (csv, json, ndjson)
    pub input: PathBuf,
    /// Column holding bin frequencies
    #[clap(short, long, default_value = "frequency")]
    pub frequency: String,
    /// Spectral-amplitude columns to draw, one trace each
    #[clap(short, long, default_value = "asd")]
    pub channel: Vec<String>,
    /// Draw both axes linear instead of logarithmic
    #[clap(long)]
    pub linear: bool,
    /// Write the figure here instead of letting the backend decide
    #[clap(short, long)]
    pub output: Option<PathBuf>,
    #[clap(flatten)]
    pub verbosity: VerbosityArgs,
}

impl PlotProduct for SpectrumArgs {
    const ACTION: &'static str = "spectrum";

    fn run(self, session: &Session) -> anyhow::Result<Outcome> {
        let data = read_frame(&self.input)?.collect()?;
        debug!("{} bins read from {}", data.height(), self.input.display());
        let (channels, failures) = select_channels(&data, &self.channel)?;

        let plot = plot(data.clone(), &self.frequency, &channels, self.linear)?;
        session.render(&plot, self.output.as_deref(), Self::ACTION)?;

        let mut drawn = vec![];
        if data.column(&self.frequency).is_ok() {
            drawn.push(self.frequency.clone());
        }
        drawn.extend(channels);
        let result = data.select(drawn)?;
        Ok(Outcome::new(plot, data, result).with_failures(failures))
    }
}

fn plot(
    data: DataFrame,
    frequency: &str,
    channels: &[String],
    linear: bool,
) -> anyhow::Result<Plot> {
    let mut plot = Plot::new();

    let x = data.column(frequency).ok();
    for channel in channels {
        let y = data.column(channel)?;
        plot.add_trace(trace(x, y)?);
    }

    let mut x_axis = Axis::default().title(Title::with_text(frequency));
    let mut y_axis = Axis::default();
    if !linear {
        x_axis = x_axis.type_(AxisType::Log);
        y_axis = y_axis.type_(AxisType::Log);
    }
    if channels.len() == 1 {
        y_axis = y_axis.title(Title::with_text(channels.first().unwrap().as_str()));
    }
    plot.set_layout(Layout::default().x_axis(x_axis).y_axis(y_axis));
    Ok(plot)
}

fn trace(x: Option<&Column>, y: &Column) -> anyhow::Result<Box<dyn Trace>> {
    let name = y.name().to_string();
    let x = match x {
        Some(x) => float_values(x)?,
        None => (0..y.len()).map(|i| Some((i + 1) as f64)).collect(),
    };
    let y = float_values(y)?;
    let trace = Scatter::new(x, y).name(name.as_str()).mode(Mode::Lines);
    Ok(trace)
}
