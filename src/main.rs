//! Account Ledger CLI
//!
//! # Usage
//!
//! ```bash
//! cargo run -- serve
//! cargo run -- serve --bind 127.0.0.1:8080 --accounts accounts.csv --workers 4
//! cargo run -- replay transactions.csv > statements.json
//! cargo run -- replay --strategy sync transactions.csv > statements.json
//! cargo run -- replay --strategy async --batch-size 2000 --max-concurrent 8 transactions.csv
//! ```
//!
//! Without `--accounts`, accounts 1 to 5 are provisioned with their built-in
//! limits. Logging goes to stderr and is controlled by `RUST_LOG`
//! (default `info`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (bad provisioning file, input not readable, storage fault, etc.)

use rust_account_ledger::cli::{self, Command, EngineArgs};
use rust_account_ledger::core::{seed_accounts, LedgerEngine};
use rust_account_ledger::io::read_accounts;
use rust_account_ledger::server::LedgerServer;
use rust_account_ledger::strategy;
use rust_account_ledger::LedgerError;
use std::process;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn build_engine(args: &EngineArgs) -> Result<Arc<LedgerEngine>, LedgerError> {
    let accounts = match &args.accounts {
        Some(path) => read_accounts(path)?,
        None => seed_accounts(),
    };
    let count = accounts.len();
    let engine = LedgerEngine::with_accounts(accounts, args.engine_config())?;
    info!(accounts = count, "accounts provisioned");
    Ok(Arc::new(engine))
}

fn run(command: Command) -> Result<(), LedgerError> {
    match command {
        Command::Serve(args) => {
            let engine = build_engine(&args.engine)?;
            LedgerServer::new(args.server_config(), engine).run()
        }
        Command::Replay(args) => {
            let engine = build_engine(&args.engine)?;
            let config = matches!(args.strategy, cli::StrategyType::Async)
                .then(|| args.to_replay_config());
            let strategy = strategy::create_strategy(args.strategy.clone(), config);

            let mut output = std::io::stdout();
            strategy.process(&engine, &args.input_file, &mut output)?;
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    if let Err(e) = run(args.command) {
        error!(error = %e, "fatal");
        process::exit(1);
    }
}
