//! Issuetrak console entry point.

use clap::Parser;

use issuetrak_console::cli::Cli;
use issuetrak_console::{app, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let result = app::run(cli);
    logging::shutdown();

    if let Err(e) = result {
        tracing::error!("Exiting with error: {}", e);
        eprintln!("{}", e.user_message());
        if let Some(action) = e.suggested_action() {
            eprintln!("{}", action);
        }
        std::process::exit(1);
    }

    Ok(())
}
