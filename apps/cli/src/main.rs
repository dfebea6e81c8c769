//! StockLedger command line entry point.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    stockledger_cli::run().await
}
