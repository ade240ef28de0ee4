use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use plotly::{
    common::{ColorScale, ColorScalePalette, Title},
    layout::Axis,
    HeatMap, Layout, Plot,
};
use polars::frame::DataFrame;
use tracing::debug;

use crate::{
    frame::float_values,
    io::read_frame,
    logging::VerbosityArgs,
    product::{Outcome, PlotProduct},
    session::Session,
};

/// Draw a time-frequency map from frequency-binned columns
#[derive(Debug, Clone, Args)]
pub struct SpectrogramArgs {
    /// Data file with one row per time step and one column per frequency bin,
    /// each bin column named by its frequency
    pub input: PathBuf,
    /// Column holding step times
    #[clap(short, long, default_value = "time")]
    pub time: String,
    /// Write the figure here instead of letting the backend decide
    #[clap(short, long)]
    pub output: Option<PathBuf>,
    #[clap(flatten)]
    pub verbosity: VerbosityArgs,
}

impl PlotProduct for SpectrogramArgs {
    const ACTION: &'static str = "spectrogram";

    fn run(self, session: &Session) -> anyhow::Result<Outcome> {
        let data = read_frame(&self.input)?.collect()?;
        debug!("{} steps read from {}", data.height(), self.input.display());
        let bins = frequency_bins(&data, &self.time)?;

        let plot = plot(&data, &self.time, &bins)?;
        session.render(&plot, self.output.as_deref(), Self::ACTION)?;

        let result = data.select(bins.iter().map(|bin| bin.column.clone()))?;
        Ok(Outcome::new(plot, data, result))
    }
}

struct FrequencyBin {
    frequency: f64,
    column: String,
}

/// Every column other than the time column whose name parses as a number is
/// a frequency bin; bins come back sorted ascending.
fn frequency_bins(data: &DataFrame, time: &str) -> anyhow::Result<Vec<FrequencyBin>> {
    let mut bins = vec![];
    for name in data.get_column_names() {
        let name = name.as_str();
        if name == time {
            continue;
        }
        match name.parse::<f64>() {
            Ok(frequency) => bins.push(FrequencyBin {
                frequency,
                column: name.to_string(),
            }),
            Err(_) => debug!("column `{name}` does not name a frequency bin, skipping"),
        }
    }
    if bins.is_empty() {
        bail!("no frequency-named columns in the data");
    }
    bins.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));
    Ok(bins)
}

fn plot(data: &DataFrame, time: &str, bins: &[FrequencyBin]) -> anyhow::Result<Plot> {
    let x = match data.column(time).ok() {
        Some(t) => float_values(t)?,
        None => (0..data.height()).map(|i| Some((i + 1) as f64)).collect(),
    };
    let y: Vec<f64> = bins.iter().map(|bin| bin.frequency).collect();
    let mut z = vec![];
    for bin in bins {
        z.push(float_values(data.column(&bin.column)?)?);
    }

    let mut plot = Plot::new();
    let trace = HeatMap::new(x, y, z).color_scale(ColorScale::Palette(ColorScalePalette::Viridis));
    plot.add_trace(trace);
    plot.set_layout(
        Layout::default()
            .x_axis(Axis::default().title(Title::with_text(time)))
            .y_axis(Axis::default().title(Title::with_text("frequency"))),
    );
    Ok(plot)
}

#[cfg(test)]
mod tests {
    use polars::df;

    use super::*;

    fn binned_frame() -> DataFrame {
        df!(
            "time" => [0.0, 1.0],
            "32" => [3.0, 4.0],
            "16" => [1.0, 2.0],
            "state" => ["observing", "observing"],
        )
        .unwrap()
    }

    #[test]
    fn bins_are_sorted_and_non_numeric_names_skipped() {
        let bins = frequency_bins(&binned_frame(), "time").unwrap();
        let frequencies: Vec<f64> = bins.iter().map(|bin| bin.frequency).collect();
        assert_eq!(frequencies, vec![16.0, 32.0]);
    }

    #[test]
    fn no_bins_is_a_hard_error() {
        let df = df!("time" => [0.0], "state" => ["down"]).unwrap();
        assert!(frequency_bins(&df, "time").is_err());
    }

    #[test]
    fn heat_map_rows_follow_bin_order() {
        let data = binned_frame();
        let bins = frequency_bins(&data, "time").unwrap();
        let plot = plot(&data, "time", &bins).unwrap();

        let json = serde_json::to_value(&plot).unwrap();
        let z = json["data"][0]["z"].as_array().unwrap();
        assert_eq!(z.len(), 2);
        assert_eq!(z[0][0], 1.0);
        assert_eq!(z[1][0], 3.0);
    }
}
