//! HTTP layer for number-guess.
//!
//! ## Endpoints
//!
//! - `GET /init?quad=NAME` - Start a session; XML body with token and TTL
//! - `GET /try?token=T&guess=G` - Submit a guess; JSON verdict
//! - `GET /health` - Health check
//! - `GET /` - Service information
//!
//! Malformed parameters yield `422`, unknown, expired or solved tokens `404`.
//!
//! ## Example
//!
//! ```no_run
//! use number_guess::api::{ServerConfig, serve};
//!
//! #[tokio::main]
//! async fn main() -> number_guess::Result<()> {
//!     let config = ServerConfig::new("127.0.0.1", 3000);
//!     serve(config).await
//! }
//! ```

pub mod handlers;
pub mod router;
pub mod types;

// Re-export commonly used types
pub use handlers::AppState;
pub use router::{create_router, create_router_with_state, serve, serve_with_state, ServerConfig};
pub use types::{ErrorResponse, GuessResponse, InitParams, InitResponse, TryParams};
