use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Largest accepted blob body, in bytes.
    pub max_blob_size: usize,
    /// Whether the DELETE endpoint is enabled.
    pub allow_delete: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:9460".parse().expect("static addr"),
            max_blob_size: 64 * 1024 * 1024,
            allow_delete: true,
        }
    }
}
