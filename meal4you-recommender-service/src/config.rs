use std::env;
use std::net::SocketAddr;

use dotenvy::dotenv;

use crate::error::RecommenderError;

pub const DEFAULT_RPC_LISTEN_ADDR: &str = "0.0.0.0:8110";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub rpc_listen_addr: SocketAddr,
}

impl Config {
    /// Reads configuration from the environment, honoring a `.env` file.
    pub fn from_env() -> Result<Self, RecommenderError> {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").map_err(|_| RecommenderError::MissingConfig("DATABASE_URL"))?;
        let rpc_listen_addr = env::var("RPC_LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_RPC_LISTEN_ADDR.to_string());

        Self::new(database_url, &rpc_listen_addr)
    }

    pub fn new(database_url: String, rpc_listen_addr: &str) -> Result<Self, RecommenderError> {
        let rpc_listen_addr = rpc_listen_addr
            .parse::<SocketAddr>()
            .map_err(|_| RecommenderError::InvalidConfig {
                key: "RPC_LISTEN_ADDR",
                value: rpc_listen_addr.to_string(),
            })?;
        Ok(Self {
            database_url,
            rpc_listen_addr,
        })
    }
}
