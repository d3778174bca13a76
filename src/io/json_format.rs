//! JSON wire format
//!
//! Request and response bodies of the HTTP surface, also used for the replay
//! report. Field names follow the public API: `valor`, `tipo`, `descricao`,
//! `limite`, `saldo`, `ultimas_transacoes`. Timestamps are RFC 3339 UTC.

use crate::types::{
    AccountId, LedgerError, Statement, Transaction, TransactionKind, TransactionOutcome,
    TransactionRequest,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Body of `POST /clientes/{id}/transacoes`
///
/// Typed on purpose: a non-integer `valor` or a missing field fails to
/// deserialize and never reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBody {
    pub valor: i64,
    pub tipo: String,
    pub descricao: String,
}

impl From<TransactionBody> for TransactionRequest {
    fn from(body: TransactionBody) -> Self {
        TransactionRequest::new(body.valor, body.tipo, body.descricao)
    }
}

/// Response of a committed submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeBody {
    pub limite: i64,
    pub saldo: i64,
}

impl From<TransactionOutcome> for OutcomeBody {
    fn from(outcome: TransactionOutcome) -> Self {
        OutcomeBody {
            limite: outcome.limit,
            saldo: outcome.balance,
        }
    }
}

/// Balance block of a statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceBody {
    pub total: i64,
    pub data_extrato: DateTime<Utc>,
    pub limite: i64,
}

/// One statement line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryBody {
    pub valor: i64,
    pub tipo: TransactionKind,
    pub descricao: String,
    pub realizada_em: DateTime<Utc>,
}

impl From<Transaction> for EntryBody {
    fn from(transaction: Transaction) -> Self {
        EntryBody {
            valor: transaction.amount,
            tipo: transaction.kind,
            descricao: transaction.description,
            realizada_em: transaction.occurred_at,
        }
    }
}

/// Response of `GET /clientes/{id}/extrato`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementBody {
    pub saldo: BalanceBody,
    pub ultimas_transacoes: Vec<EntryBody>,
}

impl From<Statement> for StatementBody {
    fn from(statement: Statement) -> Self {
        StatementBody {
            saldo: BalanceBody {
                total: statement.balance,
                data_extrato: statement.snapshot_at,
                limite: statement.limit,
            },
            ultimas_transacoes: statement
                .recent_transactions
                .into_iter()
                .map(EntryBody::from)
                .collect(),
        }
    }
}

/// Error body of every non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub erro: String,
}

/// Statement of one account in the replay report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStatementBody {
    pub cliente: AccountId,
    #[serde(flatten)]
    pub extrato: StatementBody,
}

/// Write statements as a pretty-printed JSON array
///
/// # Arguments
///
/// * `statements` - Statements to write, in the order given
/// * `output` - Destination writer
pub fn write_statements_json(
    statements: Vec<Statement>,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let report: Vec<AccountStatementBody> = statements
        .into_iter()
        .map(|statement| AccountStatementBody {
            cliente: statement.account_id,
            extrato: statement.into(),
        })
        .collect();

    serde_json::to_writer_pretty(&mut *output, &report)?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_statement() -> Statement {
        let at: DateTime<Utc> = "2024-01-17T02:34:38.543030Z".parse().unwrap();
        Statement {
            account_id: 1,
            balance: 50,
            limit: 1000,
            snapshot_at: at,
            recent_transactions: vec![Transaction {
                account_id: 1,
                amount: 50,
                kind: TransactionKind::Debit,
                description: "saque".to_string(),
                occurred_at: at,
            }],
        }
    }

    #[test]
    fn test_transaction_body_rejects_fractional_valor() {
        let result = serde_json::from_value::<TransactionBody>(json!({
            "valor": 1.2, "tipo": "d", "descricao": "x"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_transaction_body_rejects_null_description() {
        let result = serde_json::from_value::<TransactionBody>(json!({
            "valor": 1, "tipo": "d", "descricao": null
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_transaction_body_converts_to_request() {
        let body: TransactionBody = serde_json::from_value(json!({
            "valor": 1000, "tipo": "c", "descricao": "descricao"
        }))
        .unwrap();

        let request: TransactionRequest = body.into();

        assert_eq!(request, TransactionRequest::credit(1000, "descricao"));
    }

    #[test]
    fn test_outcome_body_shape() {
        let body = OutcomeBody::from(TransactionOutcome {
            limit: 100000,
            balance: -9098,
        });

        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"limite": 100000, "saldo": -9098})
        );
    }

    #[test]
    fn test_statement_body_shape() {
        let body = StatementBody::from(sample_statement());

        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({
                "saldo": {
                    "total": 50,
                    "data_extrato": "2024-01-17T02:34:38.543030Z",
                    "limite": 1000
                },
                "ultimas_transacoes": [{
                    "valor": 50,
                    "tipo": "d",
                    "descricao": "saque",
                    "realizada_em": "2024-01-17T02:34:38.543030Z"
                }]
            })
        );
    }

    #[test]
    fn test_write_statements_json_includes_account_id() {
        let mut output = Vec::new();

        write_statements_json(vec![sample_statement()], &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value[0]["cliente"], 1);
        assert_eq!(value[0]["saldo"]["total"], 50);
        assert_eq!(value[0]["ultimas_transacoes"][0]["tipo"], "d");
    }
}
