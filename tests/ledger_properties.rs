//! Engine-level properties
//!
//! Exercises the public engine API the way concurrent callers do:
//! - the balance never goes below `-limit`
//! - the balance equals the signed sum of the account's ledger entries
//! - a failed ledger append leaves no trace in either store
//! - statements are never torn by concurrent writers
//! - at most one of two racing debits wins when only one fits

use rstest::rstest;
use rust_account_ledger::core::{
    AccountStore, EngineConfig, InMemoryAccountStore, InMemoryLedger, LedgerEngine,
    TransactionLedger,
};
use rust_account_ledger::{
    Account, AccountId, LedgerError, Transaction, TransactionKind, TransactionRequest,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

fn engine_with(accounts: impl IntoIterator<Item = Account>) -> Arc<LedgerEngine> {
    Arc::new(LedgerEngine::with_accounts(accounts, EngineConfig::default()).unwrap())
}

fn ledger_sum(engine: &LedgerEngine, account_id: AccountId) -> i64 {
    engine
        .ledger()
        .history(account_id)
        .iter()
        .map(Transaction::signed_amount)
        .sum()
}

/// Deterministic mix of credits and debits, some of which exceed the limit
fn request_for(thread_id: usize, i: usize) -> TransactionRequest {
    let amount = ((thread_id * 31 + i * 17) % 97 + 1) as i64;
    if (thread_id + i) % 3 == 0 {
        TransactionRequest::credit(amount, "c")
    } else {
        TransactionRequest::debit(amount, "d")
    }
}

#[test]
fn test_scenario_credit_then_debit() {
    let engine = engine_with([Account::new(1, 1000)]);

    engine
        .process_transaction(1, &TransactionRequest::credit(100, "deposit"))
        .unwrap();
    let outcome = engine
        .process_transaction(1, &TransactionRequest::debit(50, "withdraw"))
        .unwrap();
    let statement = engine.get_statement(1).unwrap();

    assert_eq!(outcome.balance, 50);
    assert_eq!(outcome.limit, 1000);
    assert_eq!(statement.balance, 50);
    let kinds: Vec<TransactionKind> = statement
        .recent_transactions
        .iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(kinds, vec![TransactionKind::Debit, TransactionKind::Credit]);
    assert_eq!(statement.recent_transactions[0].amount, 50);
    assert_eq!(statement.recent_transactions[1].amount, 100);
}

#[rstest]
#[case::exactly_at_floor(500, 500, Some(-500))]
#[case::one_past_floor(500, 501, None)]
#[case::zero_limit(0, 1, None)]
fn test_boundary_debit(#[case] limit: i64, #[case] amount: i64, #[case] expected: Option<i64>) {
    let engine = engine_with([Account::new(1, limit)]);

    let result = engine.process_transaction(1, &TransactionRequest::debit(amount, "x"));

    match expected {
        Some(balance) => assert_eq!(result.unwrap().balance, balance),
        None => {
            assert!(matches!(
                result,
                Err(LedgerError::InsufficientLimit { account: 1, .. })
            ));
            assert_eq!(engine.get_statement(1).unwrap().balance, 0);
            assert!(engine.ledger().history(1).is_empty());
        }
    }
}

#[test]
fn test_unknown_account() {
    let engine = engine_with([Account::new(1, 10)]);

    assert!(matches!(
        engine.process_transaction(99, &TransactionRequest::credit(1, "x")),
        Err(LedgerError::AccountNotFound { account: 99 })
    ));
    assert!(matches!(
        engine.get_statement(99),
        Err(LedgerError::AccountNotFound { account: 99 })
    ));
    assert!(engine.ledger().history(99).is_empty());
}

#[test]
fn test_concurrent_debit_race_admits_exactly_one() {
    for _ in 0..50 {
        let engine = engine_with([Account::new(1, 100)]);
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let engine = Arc::clone(&engine);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    engine.process_transaction(1, &TransactionRequest::debit(60, "race"))
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let committed = results.iter().filter(|r| r.is_ok()).count();
        let rejected = results
            .iter()
            .filter(|r| matches!(r, Err(LedgerError::InsufficientLimit { .. })))
            .count();

        assert_eq!(committed, 1);
        assert_eq!(rejected, 1);
        assert_eq!(engine.get_statement(1).unwrap().balance, -60);
        assert_eq!(engine.ledger().len(1), 1);
    }
}

#[test]
fn test_limit_invariant_and_conservation_under_load() {
    let limit = 300;
    let engine = engine_with([Account::new(1, limit), Account::new(2, 0)]);
    let threads = 8;
    let per_thread = 200;

    let handles: Vec<_> = (0..threads)
        .map(|thread_id| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let mut committed = 0;
                for i in 0..per_thread {
                    let account = if i % 4 == 0 { 2 } else { 1 };
                    match engine.process_transaction(account, &request_for(thread_id, i)) {
                        Ok(outcome) => {
                            assert!(outcome.balance >= -outcome.limit);
                            committed += 1;
                        }
                        Err(LedgerError::InsufficientLimit { .. }) => {}
                        Err(LedgerError::Contention { .. }) => {}
                        Err(e) => panic!("unexpected error: {}", e),
                    }
                }
                committed
            })
        })
        .collect();

    let committed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

    let total_entries = engine.ledger().len(1) + engine.ledger().len(2);
    assert_eq!(committed, total_entries);
    for (account, limit) in [(1, limit), (2, 0)] {
        let statement = engine.get_statement(account).unwrap();
        assert!(statement.balance >= -limit);
        assert_eq!(statement.balance, ledger_sum(&engine, account));
    }
}

#[test]
fn test_statements_are_never_torn() {
    let engine = Arc::new(
        LedgerEngine::with_accounts([Account::new(1, 1_000)], EngineConfig::new(16, 10_000))
            .unwrap(),
    );
    let stop = Arc::new(AtomicBool::new(false));
    let observed = Arc::new(AtomicUsize::new(0));

    let writers: Vec<_> = (0..4)
        .map(|thread_id| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for i in 0..250 {
                    let _ = engine.process_transaction(1, &request_for(thread_id, i));
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..2)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let stop = Arc::clone(&stop);
            let observed = Arc::clone(&observed);
            thread::spawn(move || {
                while !stop.load(Ordering::Acquire) {
                    let statement = engine.get_statement(1).unwrap();
                    let sum: i64 = statement
                        .recent_transactions
                        .iter()
                        .map(Transaction::signed_amount)
                        .sum();
                    assert_eq!(statement.balance, sum, "statement torn by a writer");
                    assert!(statement
                        .recent_transactions
                        .windows(2)
                        .all(|w| w[0].occurred_at >= w[1].occurred_at));
                    assert!(statement
                        .recent_transactions
                        .first()
                        .map_or(true, |t| t.occurred_at <= statement.snapshot_at));
                    observed.fetch_add(1, Ordering::Relaxed);
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }
    stop.store(true, Ordering::Release);
    for reader in readers {
        reader.join().unwrap();
    }

    assert!(observed.load(Ordering::Relaxed) > 0);
}

/// Ledger whose appends fail while `failing` is set
#[derive(Debug, Default)]
struct FaultyLedger {
    inner: InMemoryLedger,
    failing: AtomicBool,
}

impl TransactionLedger for FaultyLedger {
    fn append(&self, account_id: AccountId, transaction: Transaction) -> Result<(), LedgerError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(LedgerError::storage("ledger unavailable"));
        }
        self.inner.append(account_id, transaction)
    }

    fn recent(&self, account_id: AccountId, n: usize) -> Result<Vec<Transaction>, LedgerError> {
        self.inner.recent(account_id, n)
    }
}

#[test]
fn test_failed_append_leaves_no_trace() {
    let accounts = Arc::new(InMemoryAccountStore::new());
    let ledger = Arc::new(FaultyLedger::default());
    let engine = LedgerEngine::new(
        Arc::clone(&accounts),
        Arc::clone(&ledger),
        EngineConfig::default(),
    );
    engine.provision(Account::new(1, 100)).unwrap();
    engine
        .process_transaction(1, &TransactionRequest::credit(40, "ok"))
        .unwrap();

    ledger.failing.store(true, Ordering::SeqCst);
    let result = engine.process_transaction(1, &TransactionRequest::debit(90, "lost"));

    assert!(matches!(result, Err(LedgerError::Storage { .. })));
    assert_eq!(accounts.get(1).unwrap().balance, 40);
    assert_eq!(ledger.inner.len(1), 1);

    ledger.failing.store(false, Ordering::SeqCst);
    let statement = engine.get_statement(1).unwrap();
    assert_eq!(statement.balance, 40);
    assert_eq!(statement.recent_transactions.len(), 1);
    assert_eq!(statement.recent_transactions[0].description, "ok");
}
