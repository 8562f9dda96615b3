//! Heartcore - fetch content from the Umbraco Heartcore delivery API
//!
//! Prints the requested content as pretty JSON on stdout; logs go to stderr.

use std::process::ExitCode;

use clap::Parser;

use heartcore::cli::{execute, Cli};
use heartcore::logging::init_logging;
use heartcore::{ClientConfig, ContentClient};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ClientConfig::from_env(cli.overrides());
    let client = match ContentClient::new(config) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let value = match execute(&client, &cli.command).await {
        Ok(value) => value,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
