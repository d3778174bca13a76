//! Thread-safe in-memory transaction ledger
//!
//! Entries are kept per account in commit order. Readers get the newest entries
//! first. Appends for one account are serialized by the `DashMap` entry; the
//! processor additionally only appends while it holds the account's commit gate,
//! so the stored order is the commit order.

use crate::core::traits::TransactionLedger;
use crate::types::{AccountId, LedgerError, Transaction};
use dashmap::DashMap;

/// In-memory implementation of [`TransactionLedger`]
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    /// Entries by account, oldest first
    entries: DashMap<AccountId, Vec<Transaction>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of entries recorded for an account
    pub fn len(&self, account_id: AccountId) -> usize {
        self.entries
            .get(&account_id)
            .map_or(0, |entries| entries.len())
    }

    /// Every entry recorded for an account, oldest first
    pub fn history(&self, account_id: AccountId) -> Vec<Transaction> {
        self.entries
            .get(&account_id)
            .map(|entries| entries.value().clone())
            .unwrap_or_default()
    }
}

impl TransactionLedger for InMemoryLedger {
    fn append(&self, account_id: AccountId, transaction: Transaction) -> Result<(), LedgerError> {
        debug_assert_eq!(account_id, transaction.account_id);
        self.entries.entry(account_id).or_default().push(transaction);
        Ok(())
    }

    fn recent(&self, account_id: AccountId, n: usize) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self
            .entries
            .get(&account_id)
            .map(|entries| entries.iter().rev().take(n).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionKind;
    use chrono::{Duration, Utc};

    fn entry(account_id: AccountId, amount: i64, description: &str) -> Transaction {
        Transaction {
            account_id,
            amount,
            kind: TransactionKind::Credit,
            description: description.to_string(),
            occurred_at: Utc::now(),
        }
    }

    #[test]
    fn test_recent_on_empty_account_is_empty() {
        let ledger = InMemoryLedger::new();

        assert!(ledger.recent(1, 10).unwrap().is_empty());
        assert_eq!(ledger.len(1), 0);
    }

    #[test]
    fn test_recent_returns_newest_first() {
        let ledger = InMemoryLedger::new();
        for (amount, description) in [(1, "a"), (2, "b"), (3, "c")] {
            ledger.append(1, entry(1, amount, description)).unwrap();
        }

        let amounts: Vec<i64> = ledger
            .recent(1, 10)
            .unwrap()
            .iter()
            .map(|t| t.amount)
            .collect();

        assert_eq!(amounts, vec![3, 2, 1]);
    }

    #[test]
    fn test_recent_is_bounded_by_n() {
        let ledger = InMemoryLedger::new();
        for amount in 1..=15 {
            ledger.append(1, entry(1, amount, "x")).unwrap();
        }

        let recent = ledger.recent(1, 10).unwrap();

        assert_eq!(recent.len(), 10);
        assert_eq!(recent.first().unwrap().amount, 15);
        assert_eq!(recent.last().unwrap().amount, 6);
        assert_eq!(ledger.len(1), 15);
    }

    #[test]
    fn test_recent_zero_window() {
        let ledger = InMemoryLedger::new();
        ledger.append(1, entry(1, 5, "x")).unwrap();

        assert!(ledger.recent(1, 0).unwrap().is_empty());
    }

    #[test]
    fn test_accounts_are_kept_apart() {
        let ledger = InMemoryLedger::new();
        ledger.append(1, entry(1, 10, "one")).unwrap();
        ledger.append(2, entry(2, 20, "two")).unwrap();

        assert_eq!(ledger.len(1), 1);
        assert_eq!(ledger.history(1)[0].description, "one");
        assert_eq!(ledger.len(2), 1);
        assert_eq!(ledger.recent(2, 10).unwrap()[0].description, "two");
    }

    #[test]
    fn test_entries_are_stored_unchanged() {
        let ledger = InMemoryLedger::new();
        let original = Transaction {
            account_id: 4,
            amount: 77,
            kind: TransactionKind::Debit,
            description: "padaria".to_string(),
            occurred_at: Utc::now() - Duration::seconds(5),
        };

        ledger.append(4, original.clone()).unwrap();

        assert_eq!(ledger.history(4), vec![original]);
    }

    #[test]
    fn test_concurrent_appends_are_all_kept() {
        use std::sync::Arc;
        use std::thread;

        let ledger = Arc::new(InMemoryLedger::new());
        let mut handles = vec![];

        for i in 0..20 {
            let ledger_clone = Arc::clone(&ledger);
            handles.push(thread::spawn(move || {
                ledger_clone.append(1, entry(1, i + 1, "t")).unwrap();
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let total: i64 = ledger.history(1).iter().map(|t| t.amount).sum();
        assert_eq!(ledger.len(1), 20);
        assert_eq!(total, (1..=20).sum::<i64>());
    }
}
