use std::process::ExitCode;

use auth_store::cli::{self, Cli, Command};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Serve => cli::serve::run(config_path).await.map(|_| ExitCode::SUCCESS),
        Command::Check(args) => cli::check::run(config_path, args).await,
    }
}
