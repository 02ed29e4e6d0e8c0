//! security.txt (RFC 9116) publishing.
//!
//! # Data Flow
//! ```text
//! SecurityTxtConfig (immutable, built once)
//!     → document.rs (render "Label: value" lines in fixed field order)
//!     → interceptor.rs (match path, per-request or cached rendering)
//!     → http::middleware::security_txt (answer or pass to next handler)
//! ```
//!
//! # Design Decisions
//! - Field set is closed: an ordered enum table, no runtime map
//! - Field values are published verbatim, never validated
//! - The cache slot belongs to the interceptor instance, not the process

pub mod document;
pub mod interceptor;

pub use document::{generate, Field};
pub use interceptor::{is_security_txt_path, SecurityTxt, LEGACY_PATH, WELL_KNOWN_PATH};

#[cfg(test)]
pub(crate) fn sample_config() -> crate::config::SecurityTxtConfig {
    crate::config::SecurityTxtConfig {
        contact: vec![
            "mailto:test@example.test".into(),
            "https://example.test/contact".into(),
        ],
        expires: "2026-12-31T23:59:00.000Z".into(),
        encryption: vec!["https://example.test/pgp-key.txt".into()],
        acknowledgements: vec!["https://example.test/hall-of-fame.html".into()],
        preferred_languages: "en, de, dk".into(),
        policy: vec![
            "https://example.test/security-policy.html".into(),
            "https://bughunter.example.test/security-policy.html".into(),
        ],
        hiring: vec!["https://example.test/jobs.html".into()],
        csaf: vec![
            "https://example.test/.well-known/csaf/provider-metadata.json".into(),
            "https://example.test/csaf/provider-metadata.json".into(),
        ],
    }
}
