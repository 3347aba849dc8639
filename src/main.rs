use std::process::ExitCode;

use clap::Parser;

use sample_lsp::config;
use sample_lsp::lsp::server::run_server;

/// Language server that flags all-uppercase words
#[derive(Debug, Parser)]
#[command(name = "sample-lsp", version, about)]
struct Cli {
    /// Communicate over stdin/stdout (the only supported transport)
    #[arg(long)]
    stdio: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _cli = Cli::parse();

    match run_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "The language server couldn't be started. See the log file for details: {}",
                config::log_path().display()
            );
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
