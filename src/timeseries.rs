use std::{borrow::Cow, path::PathBuf};

use clap::Args;
use plotly::{
    common::{Mode, Title},
    layout::Axis,
    Layout, Plot, Scatter, Trace,
};
use polars::{frame::DataFrame, lazy::frame::IntoLazy, prelude::Column};
use tracing::debug;

use crate::{
    frame::float_values,
    group::ChannelGroups,
    io::read_frame,
    logging::VerbosityArgs,
    product::{select_channels, Outcome, PlotProduct},
    session::Session,
};

/// Draw channels of a time-series file against time
#[derive(Debug, Clone, Args)]
pub struct TimeseriesArgs {
    /// Data file with one row per sample (csv, json, ndjson)
    pub input: PathBuf,
    /// Column holding sample times
    #[clap(short, long, default_value = "time")]
    pub time: String,
    /// Channel columns to draw, one trace each
    #[clap(short, long, default_value = "strain")]
    pub channel: Vec<String>,
    /// Category columns splitting every channel into one trace per value
    #[clap(short, long)]
    pub group: Option<Vec<String>>,
    /// Write the figure here instead of letting the backend decide
    #[clap(short, long)]
    pub output: Option<PathBuf>,
    #[clap(flatten)]
    pub verbosity: VerbosityArgs,
}

impl PlotProduct for TimeseriesArgs {
    const ACTION: &'static str = "timeseries";

    fn run(self, session: &Session) -> anyhow::Result<Outcome> {
        let data = read_frame(&self.input)?.collect()?;
        debug!(
            "{} samples read from {}",
            data.height(),
            self.input.display()
        );
        let (channels, failures) = select_channels(&data, &self.channel)?;

        let groups = match &self.group {
            Some(names) => Some(ChannelGroups::from_frame(&data, names.clone())?),
            None => None,
        };
        let plot = plot(data.clone(), &self.time, &channels, groups.as_ref())?;
        session.render(&plot, self.output.as_deref(), Self::ACTION)?;

        let mut drawn = vec![];
        if data.column(&self.time).is_ok() {
            drawn.push(self.time.clone());
        }
        drawn.extend(channels);
        let result = data.select(drawn)?;
        Ok(Outcome::new(plot, data, result).with_failures(failures))
    }
}

fn plot(
    data: DataFrame,
    time: &str,
    channels: &[String],
    groups: Option<&ChannelGroups>,
) -> anyhow::Result<Plot> {
    let mut plot = Plot::new();

    match groups {
        Some(groups) => {
            groups.for_each_split(data.clone().lazy(), |split, label| {
                let split = split.collect()?;
                let x = split.column(time).ok();
                for channel in channels {
                    let y = split.column(channel)?;
                    plot.add_trace(trace(x, y, Some(label))?);
                }
                Ok(())
            })?;
        }
        None => {
            let x = data.column(time).ok();
            for channel in channels {
                let y = data.column(channel)?;
                plot.add_trace(trace(x, y, None)?);
            }
        }
    }

    let mut layout = Layout::default().x_axis(Axis::default().title(Title::with_text(time)));
    if channels.len() == 1 {
        layout = layout.y_axis(Axis::default().title(Title::with_text(
            channels.first().unwrap().as_str(),
        )));
    }
    plot.set_layout(layout);
    Ok(plot)
}

fn trace(x: Option<&Column>, y: &Column, label: Option<&str>) -> anyhow::Result<Box<dyn Trace>> {
    let name: Cow<str> = match label {
        Some(label) => format!("{}:{}", label, y.name()).into(),
        None => y.name().as_str().into(),
    };
    let x = match x {
        Some(x) => float_values(x)?,
        None => (0..y.len()).map(|i| Some((i + 1) as f64)).collect(),
    };
    let y = float_values(y)?;
    let trace = Scatter::new(x, y).name(name.as_ref()).mode(Mode::Lines);
    Ok(trace)
}
