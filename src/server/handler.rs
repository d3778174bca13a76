use crate::core::LedgerEngine;
use crate::io::{OutcomeBody, StatementBody, TransactionBody};
use crate::server::error::ApiError;
use crate::types::{AccountId, TransactionRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;

/// An id that is not a number cannot name an account.
fn parse_account_id(raw: &str) -> Result<AccountId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::UnknownAccount(raw.to_string()))
}

/// POST /clientes/{id}/transacoes
pub async fn post_transaction(
    State(engine): State<Arc<LedgerEngine>>,
    Path(id): Path<String>,
    body: Result<Json<TransactionBody>, JsonRejection>,
) -> Result<Json<OutcomeBody>, ApiError> {
    let account_id = parse_account_id(&id)?;
    let Json(body) = body?;
    let request = TransactionRequest::from(body);

    let outcome = engine.process_transaction(account_id, &request)?;
    Ok(Json(outcome.into()))
}

/// GET /clientes/{id}/extrato
pub async fn get_statement(
    State(engine): State<Arc<LedgerEngine>>,
    Path(id): Path<String>,
) -> Result<Json<StatementBody>, ApiError> {
    let account_id = parse_account_id(&id)?;

    let statement = engine.get_statement(account_id)?;
    Ok(Json(statement.into()))
}
