//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, timeout, tracing)
//!     → middleware/security_txt.rs (answer security.txt paths)
//!     → proxy.rs (forward everything else to the upstream)
//!     → Send to client
//! ```

pub mod middleware;
pub mod proxy;
pub mod server;

pub use proxy::{Upstream, UpstreamError};
pub use server::HttpServer;
