//! Rendering of the security.txt document.

use axum::body::Bytes;

use crate::config::SecurityTxtConfig;

/// A field of the security.txt document, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Contact,
    Expires,
    Encryption,
    Acknowledgements,
    PreferredLanguages,
    Policy,
    Hiring,
    Csaf,
}

impl Field {
    /// Every field, in the order lines are written.
    pub const ALL: [Field; 8] = [
        Field::Contact,
        Field::Expires,
        Field::Encryption,
        Field::Acknowledgements,
        Field::PreferredLanguages,
        Field::Policy,
        Field::Hiring,
        Field::Csaf,
    ];

    /// The label written before the colon.
    pub fn label(self) -> &'static str {
        match self {
            Field::Contact => "Contact",
            Field::Expires => "Expires",
            Field::Encryption => "Encryption",
            Field::Acknowledgements => "Acknowledgements",
            Field::PreferredLanguages => "Preferred-Languages",
            Field::Policy => "Policy",
            Field::Hiring => "Hiring",
            Field::Csaf => "CSAF",
        }
    }

    /// Configured values for this field. Scalars are viewed as a single
    /// element; empty entries are still included.
    pub fn values(self, config: &SecurityTxtConfig) -> &[String] {
        match self {
            Field::Contact => &config.contact,
            Field::Expires => std::slice::from_ref(&config.expires),
            Field::Encryption => &config.encryption,
            Field::Acknowledgements => &config.acknowledgements,
            Field::PreferredLanguages => std::slice::from_ref(&config.preferred_languages),
            Field::Policy => &config.policy,
            Field::Hiring => &config.hiring,
            Field::Csaf => &config.csaf,
        }
    }
}

/// Render `config` as a security.txt document.
///
/// One `Label: value\n` line per non-empty value, fields in [`Field::ALL`]
/// order and list entries in configuration order. An empty config renders
/// to an empty document.
pub fn generate(config: &SecurityTxtConfig) -> Bytes {
    let mut buf = String::new();

    for field in Field::ALL {
        for value in field.values(config).iter().filter(|v| !v.is_empty()) {
            buf.push_str(field.label());
            buf.push_str(": ");
            buf.push_str(value);
            buf.push('\n');
        }
    }

    Bytes::from(buf)
}
