//! Tanya Server - HTTP API for the library chat engine
//!
//! This crate provides the thin HTTP layer in front of the tanya answering
//! engine. It supports:
//!
//! - **Chat**: the `/get` endpoint the web widget polls with the user's
//!   message, answered as `{response, score, pattern}`.
//! - **Administration**: explicit intent-table reload.
//! - **Health**: liveness probe for deployment platforms.
//!
//! # Features
//!
//! - **Configuration**: environment variable and file-based configuration
//! - **Middleware**: CORS, request timeout, structured request tracing
//! - **Error Handling**: JSON error responses with error codes
//! - **Graceful Shutdown**: proper signal handling for production deployments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - Service information
//! - `GET /health` - Liveness probe
//! - `GET /get?msg=...` - Answer one chat message
//! - `POST /api/v1/reload` - Reload the intent table

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
