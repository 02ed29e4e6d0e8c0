//! Request interception layers.

pub mod security_txt;

pub use security_txt::security_txt_middleware;
