//! `stow` command-line entry point.

use clap::Parser;
use stowage_cli::{logger, run, Cli, EventLogSink};
use stowage_core::{ActionSink, LogSink};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let mut sink: Box<dyn ActionSink> = match &cli.log_file {
        Some(path) => Box::new(EventLogSink::open(path)?),
        None => Box::new(LogSink),
    };

    let output = run(&cli, sink.as_mut())?;
    output.emit(cli.output.as_deref())?;

    if let Some(path) = &cli.output {
        log::info!("Output written to {}", path.display());
    }
    Ok(())
}
