use crate::core::EngineConfig;
use crate::server::ServerConfig;
use crate::strategy::ReplayConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Account ledger with limit-checked credits and debits
#[derive(Parser, Debug)]
#[command(name = "account-ledger")]
#[command(about = "Account ledger with limit-checked credits and debits", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the ledger over HTTP
    Serve(ServeArgs),
    /// Replay a transaction CSV file and print every account's statement
    Replay(ReplayArgs),
}

/// Options shared by every subcommand that builds an engine
#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// Account provisioning CSV (`id,limite,saldo`)
    #[arg(
        long = "accounts",
        value_name = "FILE",
        help = "Provisioning CSV file (default: the five built-in accounts)"
    )]
    pub accounts: Option<PathBuf>,

    #[arg(
        long = "max-attempts",
        value_name = "COUNT",
        help = "Commit attempts per submission before reporting contention (default: 16)"
    )]
    pub max_attempts: Option<u32>,

    #[arg(
        long = "statement-window",
        value_name = "COUNT",
        help = "Number of recent transactions in a statement (default: 10)"
    )]
    pub statement_window: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(
        long = "bind",
        value_name = "ADDR",
        default_value = "0.0.0.0:8000",
        help = "Address to listen on"
    )]
    pub bind: SocketAddr,

    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Runtime worker threads (default: CPU cores)"
    )]
    pub workers: Option<usize>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Input CSV file path containing transaction records
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Replay strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Replay strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of rows per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of rows per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of concurrent account partitions (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of accounts submitting concurrently (default: CPU cores)"
    )]
    pub max_concurrent: Option<usize>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Available replay strategies
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl EngineArgs {
    /// Build an EngineConfig, falling back to defaults for omitted values
    pub fn engine_config(&self) -> EngineConfig {
        if self.max_attempts.is_none() && self.statement_window.is_none() {
            return EngineConfig::default();
        }
        let default = EngineConfig::default();
        EngineConfig::new(
            self.max_attempts.unwrap_or(default.max_attempts),
            self.statement_window.unwrap_or(default.statement_window),
        )
    }
}

impl ServeArgs {
    pub fn server_config(&self) -> ServerConfig {
        let default = ServerConfig::default();
        ServerConfig::new(self.bind, self.workers.unwrap_or(default.workers))
    }
}

impl ReplayArgs {
    /// Create a ReplayConfig from CLI arguments
    ///
    /// Zero values fall back to defaults with a warning.
    pub fn to_replay_config(&self) -> ReplayConfig {
        if self.batch_size.is_some() || self.max_concurrent.is_some() {
            let default = ReplayConfig::default();
            ReplayConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent.unwrap_or(default.max_concurrent),
            )
        } else {
            ReplayConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn replay(args: &[&str]) -> ReplayArgs {
        match CliArgs::try_parse_from(args).unwrap().command {
            Command::Replay(replay) => replay,
            other => panic!("Expected replay, got {:?}", other),
        }
    }

    fn serve(args: &[&str]) -> ServeArgs {
        match CliArgs::try_parse_from(args).unwrap().command {
            Command::Serve(serve) => serve,
            other => panic!("Expected serve, got {:?}", other),
        }
    }

    // Strategy parsing tests
    #[rstest]
    #[case::default_strategy(&["program", "replay", "input.csv"], StrategyType::Async)]
    #[case::explicit_sync(&["program", "replay", "--strategy", "sync", "input.csv"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "replay", "--strategy", "async", "input.csv"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        assert_eq!(replay(args).strategy, expected);
    }

    // ReplayConfig conversion tests
    #[rstest]
    #[case::all_defaults(&["program", "replay", "input.csv"], 1000, num_cpus::get())]
    #[case::custom_batch_size(&["program", "replay", "--batch-size", "2000", "input.csv"], 2000, num_cpus::get())]
    #[case::custom_max_concurrent(&["program", "replay", "--max-concurrent", "8", "input.csv"], 1000, 8)]
    #[case::zero_batch_size(&["program", "replay", "--batch-size", "0", "input.csv"], 1000, num_cpus::get())]
    #[case::zero_max_concurrent(&["program", "replay", "--max-concurrent", "0", "input.csv"], 1000, num_cpus::get())]
    fn test_replay_config_conversion(
        #[case] args: &[&str],
        #[case] expected_batch_size: usize,
        #[case] expected_max_concurrent: usize,
    ) {
        let config = replay(args).to_replay_config();

        assert_eq!(config.batch_size, expected_batch_size);
        assert_eq!(config.max_concurrent, expected_max_concurrent);
    }

    // EngineConfig conversion tests, shared by both subcommands
    #[rstest]
    #[case::defaults(&["program", "serve"], 16, 10)]
    #[case::max_attempts(&["program", "serve", "--max-attempts", "3"], 3, 10)]
    #[case::window(&["program", "replay", "--statement-window", "5", "in.csv"], 16, 5)]
    #[case::zero_falls_back(&["program", "serve", "--max-attempts", "0", "--statement-window", "0"], 16, 10)]
    fn test_engine_config_conversion(
        #[case] args: &[&str],
        #[case] max_attempts: u32,
        #[case] statement_window: usize,
    ) {
        let engine = match CliArgs::try_parse_from(args).unwrap().command {
            Command::Serve(serve) => serve.engine,
            Command::Replay(replay) => replay.engine,
        };
        let config = engine.engine_config();

        assert_eq!(config.max_attempts, max_attempts);
        assert_eq!(config.statement_window, statement_window);
    }

    #[test]
    fn test_serve_defaults() {
        let args = serve(&["program", "serve"]);

        assert_eq!(args.bind, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
        assert!(args.engine.accounts.is_none());
        assert_eq!(args.server_config().workers, num_cpus::get());
    }

    #[test]
    fn test_serve_options() {
        let args = serve(&[
            "program",
            "serve",
            "--bind",
            "127.0.0.1:8080",
            "--workers",
            "2",
            "--accounts",
            "accounts.csv",
        ]);

        let config = args.server_config();
        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.workers, 2);
        assert_eq!(args.engine.accounts, Some(PathBuf::from("accounts.csv")));
    }

    // Error handling tests
    #[rstest]
    #[case::missing_subcommand(&["program"])]
    #[case::missing_input(&["program", "replay"])]
    #[case::invalid_strategy(&["program", "replay", "--strategy", "invalid", "input.csv"])]
    #[case::invalid_bind(&["program", "serve", "--bind", "nowhere"])]
    #[case::negative_attempts(&["program", "serve", "--max-attempts", "-1"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
