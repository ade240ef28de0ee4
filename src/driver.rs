use tracing::{debug, info};

use crate::{product::Outcome, session::Session, Command};

/// Exit code reported when a product finishes but flagged an error, so batch
/// callers can test for it.
pub const PRODUCT_ERROR: u8 = 2;

/// Run the selected product and map its outcome to an exit code.
///
/// Hard failures from construction or execution propagate unmodified; the
/// only translation done here is product-flagged errors into [`PRODUCT_ERROR`].
pub fn run(command: Command, session: &Session) -> anyhow::Result<u8> {
    debug!("{} product created", command.action());
    debug!("setup time: {:.1} s", session.elapsed().as_secs_f64());

    let outcome = command.run(session)?;

    info!("program run time: {:.1} s", session.elapsed().as_secs_f64());
    Ok(exit_code(&outcome))
}

pub fn exit_code(outcome: &Outcome) -> u8 {
    if outcome.has_error() {
        PRODUCT_ERROR
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use plotly::Plot;
    use polars::frame::DataFrame;

    use super::*;

    #[test]
    fn product_error_maps_to_2() {
        let outcome = Outcome::new(Plot::new(), DataFrame::default(), DataFrame::default())
            .with_failures(vec!["h1:strain".to_string()]);
        assert_eq!(exit_code(&outcome), PRODUCT_ERROR);
    }

    #[test]
    fn clean_outcome_maps_to_0() {
        let outcome = Outcome::new(Plot::new(), DataFrame::default(), DataFrame::default());
        assert_eq!(exit_code(&outcome), 0);
    }
}
