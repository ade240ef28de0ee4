use clap::{ArgAction, Args};
use tracing::level_filters::LevelFilter;

/// Verbosity flags shared by every subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct VerbosityArgs {
    /// Increase verbose output
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    /// Show only fatal errors
    #[clap(short, long)]
    pub silent: bool,
}

impl VerbosityArgs {
    /// Baseline shows INFO; each `-v` uncovers one more level; `--silent`
    /// wins over everything.
    pub fn level_filter(&self) -> LevelFilter {
        if self.silent {
            return LevelFilter::ERROR;
        }
        match self.verbose {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

/// Install the process-wide subscriber. Later calls are no-ops.
pub fn init(verbosity: &VerbosityArgs) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(verbosity.level_filter())
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
