use clap::Parser;
use ytdrop_core::logging;

mod cli;
mod server;
mod view;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // File logging under XDG state; stderr when asked or when that fails (no HOME in containers).
    if cli.log_stderr || logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = cli.run().await {
        eprintln!("ytdrop error: {:#}", err);
        std::process::exit(1);
    }
}
