//! The security.txt interceptor: path matching and document caching.

use std::sync::OnceLock;

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue},
    response::Response,
};
use percent_encoding::percent_decode_str;

use crate::config::{CacheMode, InterceptorConfig, SecurityTxtConfig};
use crate::observability::metrics;
use crate::security_txt::document::generate;

/// Canonical location (RFC 9116 §3).
pub const WELL_KNOWN_PATH: &str = "/.well-known/security.txt";

/// Legacy top-level location, still probed by scanners.
pub const LEGACY_PATH: &str = "/security.txt";

/// Returns true if `path` is one of the two security.txt locations.
///
/// The path is percent-decoded, then compared ignoring case. `path` must not
/// include the query string. Paths that do not decode to UTF-8 never match.
pub fn is_security_txt_path(path: &str) -> bool {
    let Ok(decoded) = percent_decode_str(path).decode_utf8() else {
        return false;
    };
    let path = decoded.to_lowercase();
    path == WELL_KNOWN_PATH || path == LEGACY_PATH
}

/// Serves the document for one configured instance.
///
/// Shared between concurrent requests behind an `Arc`. In
/// [`CacheMode::Cached`] the rendered bytes are kept in a slot owned by this
/// instance; separate instances never share a slot.
#[derive(Debug)]
pub struct SecurityTxt {
    name: String,
    mode: CacheMode,
    config: SecurityTxtConfig,
    cache: OnceLock<Bytes>,
}

impl SecurityTxt {
    /// Create an interceptor. The config is owned and never modified.
    pub fn new(name: impl Into<String>, mode: CacheMode, config: SecurityTxtConfig) -> Self {
        Self {
            name: name.into(),
            mode,
            config,
            cache: OnceLock::new(),
        }
    }

    /// Create an interceptor from the gateway's `[interceptor]` section.
    pub fn from_config(interceptor: &InterceptorConfig, config: SecurityTxtConfig) -> Self {
        Self::new(interceptor.name.clone(), interceptor.cache_mode, config)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    pub fn config(&self) -> &SecurityTxtConfig {
        &self.config
    }

    /// The document bytes, rendered or taken from the cache slot.
    pub fn document(&self) -> Bytes {
        match self.mode {
            CacheMode::PerRequest => self.render(),
            CacheMode::Cached => self
                .cache
                .get_or_init(|| {
                    tracing::debug!(interceptor = %self.name, "Populating security.txt cache");
                    self.render()
                })
                .clone(),
        }
    }

    /// The cached document, if the slot has been populated.
    pub fn cached_document(&self) -> Option<&Bytes> {
        self.cache.get()
    }

    /// Build the `200 OK` plain-text response for a matching request.
    pub fn response(&self) -> Response {
        let body = self.document();
        tracing::debug!(
            interceptor = %self.name,
            cache_mode = self.mode.as_str(),
            bytes = body.len(),
            "Serving security.txt"
        );
        metrics::record_served(&self.name, self.mode);

        let mut response = Response::new(Body::from(body));
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        response
    }

    fn render(&self) -> Bytes {
        metrics::record_generated(&self.name);
        generate(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security_txt::sample_config;
    use std::sync::Arc;

    #[test]
    fn test_path_matching() {
        for path in [
            "/security.txt",
            "/.well-known/security.txt",
            "/SECURITY.TXT",
            "/Security.Txt",
            "/.Well-Known/Security.TXT",
            "/.well-known/security%2Etxt",
            "/%73ecurity.txt",
            "/%2Ewell-known/security.txt",
            "/%2E%57ELL-KNOWN%2Fsecurity.txt",
        ] {
            assert!(is_security_txt_path(path), "{path} should match");
        }

        for path in [
            "/security.txtx",
            "/foo/security.txt",
            "/.well-known/security.txt/",
            "/.well-known",
            "security.txt",
            "/",
            "",
            "/security%2Etxtx",
            "/%FFsecurity.txt",
            "/security.txt%00",
        ] {
            assert!(!is_security_txt_path(path), "{path} should not match");
        }
    }

    #[test]
    fn test_cached_mode_populates_lazily() {
        let interceptor = SecurityTxt::new("test", CacheMode::Cached, sample_config());
        assert!(interceptor.cached_document().is_none());

        let first = interceptor.document();
        assert_eq!(interceptor.cached_document(), Some(&first));

        let second = interceptor.document();
        assert_eq!(first, second);
        // Same backing allocation: the second call did not re-render
        assert_eq!(first.as_ptr(), second.as_ptr());
    }

    #[test]
    fn test_per_request_mode_never_caches() {
        let interceptor = SecurityTxt::new("test", CacheMode::PerRequest, sample_config());
        let first = interceptor.document();
        let second = interceptor.document();

        assert_eq!(first, second);
        // Each call rendered into its own buffer
        assert_ne!(first.as_ptr(), second.as_ptr());
        assert!(interceptor.cached_document().is_none());
    }

    #[test]
    fn test_modes_render_identical_bytes() {
        let cached = SecurityTxt::new("a", CacheMode::Cached, sample_config());
        let fresh = SecurityTxt::new("b", CacheMode::PerRequest, sample_config());
        assert_eq!(cached.document(), fresh.document());
    }

    #[test]
    fn test_instances_do_not_share_cache() {
        let first = SecurityTxt::new("first", CacheMode::Cached, sample_config());
        let second = SecurityTxt::new(
            "second",
            CacheMode::Cached,
            SecurityTxtConfig {
                contact: vec!["mailto:other@example.test".into()],
                ..Default::default()
            },
        );

        let a = first.document();
        assert!(second.cached_document().is_none());
        let b = second.document();

        assert_ne!(a, b);
        assert_eq!(b, "Contact: mailto:other@example.test\n".as_bytes());
    }

    #[test]
    fn test_response_headers() {
        let interceptor = SecurityTxt::new("test", CacheMode::Cached, SecurityTxtConfig::default());
        let response = interceptor.response();

        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain"
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_access() {
        let interceptor = Arc::new(SecurityTxt::new("test", CacheMode::Cached, sample_config()));
        let expected = generate(&sample_config());

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let interceptor = interceptor.clone();
                tokio::spawn(async move { interceptor.document() })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap(), expected);
        }
        assert_eq!(interceptor.cached_document(), Some(&expected));
    }
}
