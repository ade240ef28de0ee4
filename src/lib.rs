use clap::{Parser, Subcommand};
use histogram::HistogramArgs;
use spectrogram::SpectrogramArgs;
use spectrum::SpectrumArgs;
use timeseries::TimeseriesArgs;

use crate::{
    logging::VerbosityArgs,
    product::{Outcome, PlotProduct},
    session::Session,
};

pub mod driver;
pub mod frame;
pub mod group;
pub mod histogram;
pub mod io;
pub mod logging;
pub mod product;
pub mod session;
pub mod spectrogram;
pub mod spectrum;
pub mod timeseries;

/// Generate plots of gravitational-wave detector data
#[derive(Debug, Clone, Parser)]
#[command(version)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

/// The plot products, one subcommand each.
///
/// Declaration order is subcommand order.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    Timeseries(TimeseriesArgs),
    Spectrum(SpectrumArgs),
    Spectrogram(SpectrogramArgs),
    Histogram(HistogramArgs),
}

impl Command {
    pub fn action(&self) -> &'static str {
        match self {
            Command::Timeseries(_) => TimeseriesArgs::ACTION,
            Command::Spectrum(_) => SpectrumArgs::ACTION,
            Command::Spectrogram(_) => SpectrogramArgs::ACTION,
            Command::Histogram(_) => HistogramArgs::ACTION,
        }
    }

    pub fn verbosity(&self) -> &VerbosityArgs {
        match self {
            Command::Timeseries(args) => &args.verbosity,
            Command::Spectrum(args) => &args.verbosity,
            Command::Spectrogram(args) => &args.verbosity,
            Command::Histogram(args) => &args.verbosity,
        }
    }

    pub fn run(self, session: &Session) -> anyhow::Result<Outcome> {
        match self {
            Command::Timeseries(args) => args.run(session),
            Command::Spectrum(args) => args.run(session),
            Command::Spectrogram(args) => args.run(session),
            Command::Histogram(args) => args.run(session),
        }
    }
}
