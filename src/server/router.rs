use crate::core::LedgerEngine;
use crate::server::handler;
use axum::http::{header, HeaderValue};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{middleware, Router};
use std::sync::Arc;

async fn allow_any_origin(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

/// Build the axum router with both ledger endpoints.
pub fn build_router(engine: Arc<LedgerEngine>) -> Router {
    Router::new()
        .route("/clientes/:id/transacoes", post(handler::post_transaction))
        .route("/clientes/:id/extrato", get(handler::get_statement))
        .layer(middleware::map_response(allow_any_origin))
        .with_state(engine)
}
