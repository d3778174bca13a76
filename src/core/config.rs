//! Engine configuration

use crate::types::Account;
use tracing::warn;

/// Tuning knobs shared by the processor and the statement service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Attempts a submission makes before failing with `Contention`
    pub max_attempts: u32,
    /// Number of ledger entries a statement shows
    pub statement_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_attempts: 16,
            statement_window: 10,
        }
    }
}

impl EngineConfig {
    /// Create a new EngineConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(max_attempts: u32, statement_window: usize) -> Self {
        let default = Self::default();

        let max_attempts = if max_attempts == 0 {
            warn!(
                max_attempts,
                default = default.max_attempts,
                "invalid max_attempts, using default"
            );
            default.max_attempts
        } else {
            max_attempts
        };

        let statement_window = if statement_window == 0 {
            warn!(
                statement_window,
                default = default.statement_window,
                "invalid statement_window, using default"
            );
            default.statement_window
        } else {
            statement_window
        };

        Self {
            max_attempts,
            statement_window,
        }
    }
}

/// Accounts provisioned when no accounts file is given
///
/// Ids 1 to 5, each with a zero opening balance.
pub fn seed_accounts() -> Vec<Account> {
    [
        (1, 100_000),
        (2, 80_000),
        (3, 1_000_000),
        (4, 10_000_000),
        (5, 500_000),
    ]
    .into_iter()
    .map(|(id, limit)| Account::new(id, limit))
    .collect()
}
