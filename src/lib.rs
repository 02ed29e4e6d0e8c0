//! security.txt gateway library.
//!
//! Serves an RFC 9116 security.txt document from configuration and hands
//! every other request to the next handler.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security_txt;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use security_txt::{generate, SecurityTxt};
