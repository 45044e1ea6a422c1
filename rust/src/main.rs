use clap::Parser;

use parade::config::{CliConfig, ExportDestination};
use parade::logging;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    logging::init_logging(config.verbose)?;

    match parade::app::run(&config) {
        Ok(destination) => {
            // Keep stdout clean when the schedule itself went there.
            if config.destination == ExportDestination::File {
                println!("Schedule written to {destination}");
            }
            Ok(())
        }
        Err(err) => {
            tracing::error!("{err}");
            Err(err.into())
        }
    }
}
