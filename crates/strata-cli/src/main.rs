use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = cli::Cli::parse();
    match commands::run_command(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("strata: {e}");
            e.exit_code()
        }
    }
}
