//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream that receives every request not answered by the interceptor.
    pub upstream: Option<UpstreamConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Interceptor instance settings.
    pub interceptor: InterceptorConfig,

    /// Fields published in the security.txt document.
    pub security_txt: SecurityTxtConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Base URL of the upstream (e.g., "http://127.0.0.1:3000").
    /// Only the scheme and authority are used; the request path is kept.
    pub url: String,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// How the interceptor obtains the document for each matching request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CacheMode {
    /// Render the document again for every matching request.
    PerRequest,
    /// Render once on the first matching request and reuse the bytes.
    #[default]
    Cached,
}

impl CacheMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheMode::PerRequest => "per_request",
            CacheMode::Cached => "cached",
        }
    }
}

/// Interceptor instance configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InterceptorConfig {
    /// Instance name, used as a label in logs and metrics.
    pub name: String,

    /// Document caching policy.
    pub cache_mode: CacheMode,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            name: "security-txt".to_string(),
            cache_mode: CacheMode::default(),
        }
    }
}

/// Fields of the security.txt document (RFC 9116).
///
/// Values are emitted verbatim; nothing here is validated. Every field is
/// optional, although the RFC requires at least one `contact` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecurityTxtConfig {
    /// Links or mail addresses; use `https://` for links and `mailto:` for
    /// mail addresses.
    pub contact: Vec<String>,

    /// Expiry date in ISO 8601 format (e.g. 2026-12-31T23:59:00.000Z).
    pub expires: String,

    /// Links to public keys.
    pub encryption: Vec<String>,

    /// Links to acknowledgement pages.
    pub acknowledgements: Vec<String>,

    /// Comma-separated language tags (e.g. "en, de").
    #[serde(alias = "preferred_languages")]
    pub preferred_languages: String,

    /// Links to security policies.
    pub policy: Vec<String>,

    /// Links to security-related job postings.
    pub hiring: Vec<String>,

    /// Links to CSAF provider metadata. Not part of RFC 9116, but extension
    /// fields are permitted.
    pub csaf: Vec<String>,
}
