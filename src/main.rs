//! MetaSleuth — metadata address outlier finder for forensic file listings.
//!
//! Thin binary entry point. All logic lives in the `metasleuth-core`
//! and `metasleuth-cli` crates.

use clap::Parser;
use metasleuth_cli::Args;

fn main() -> anyhow::Result<()> {
    // Argument errors exit here with clap's usage message.
    let args = Args::parse();

    // Initialise structured logging. stdout carries the report, so logs
    // go to stderr.
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("MetaSleuth starting with {args:?}");

    let stdout = std::io::stdout();
    metasleuth_cli::run(&args, stdout.lock())?;

    Ok(())
}
