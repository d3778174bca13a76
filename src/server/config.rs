use std::net::SocketAddr;
use tracing::warn;

/// HTTP server settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Runtime worker threads
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            workers: num_cpus::get(),
        }
    }
}

impl ServerConfig {
    /// Zero workers fall back to the default with a warning.
    pub fn new(bind_addr: SocketAddr, workers: usize) -> Self {
        let default = Self::default();
        let workers = if workers == 0 {
            warn!(workers, default = default.workers, "invalid workers, using default");
            default.workers
        } else {
            workers
        };

        Self { bind_addr, workers }
    }
}
