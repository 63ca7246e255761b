//! Check command - validates a single credential and exits

use std::process::ExitCode;

use clap::Args;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Account name to validate
    pub account_name: String,

    /// API key presented for the account
    pub api_key: String,
}

/// Run one validation; exit code 0 when valid, 1 otherwise
pub async fn run(config_path: Option<&str>, args: CheckArgs) -> anyhow::Result<ExitCode> {
    if args.account_name.is_empty() || args.api_key.is_empty() {
        anyhow::bail!("account name and API key must not be empty");
    }

    let config = super::load_config(config_path)?;
    let state = crate::create_app_state(&config)?;

    let outcome = state
        .validation_service
        .validate_detailed(&args.account_name, &args.api_key)
        .await;

    println!("{}: {}", args.account_name, outcome);

    if outcome.result().is_valid() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
