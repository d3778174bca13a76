//! HTTP surface
//!
//! - `POST /clientes/{id}/transacoes` submits a transaction
//! - `GET /clientes/{id}/extrato` returns the account statement
//!
//! Every response is JSON; errors carry `{"erro": "..."}`.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
#[allow(clippy::module_inception)]
pub mod server;

pub use config::ServerConfig;
pub use error::ApiError;
pub use router::build_router;
pub use server::LedgerServer;
