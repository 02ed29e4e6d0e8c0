//! Upstream forwarding.
//!
//! # Responsibilities
//! - Re-target passthrough requests at the configured upstream
//! - Keep method, path, query, headers and body
//! - Map transport failures to 502 Bad Gateway
//!
//! # Design Decisions
//! - Single upstream, no retries or load balancing
//! - Bodies are streamed, never buffered
//! - Without an upstream every passthrough request gets 404

use std::str::FromStr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, PathAndQuery, Scheme},
        Request, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;

/// Where passthrough requests are sent.
#[derive(Clone)]
pub struct Upstream {
    scheme: Scheme,
    authority: Authority,
    client: Client<HttpConnector, Body>,
}

/// Error building an [`Upstream`] from configuration.
#[derive(Debug, thiserror::Error)]
#[error("invalid upstream url `{url}`: {reason}")]
pub struct UpstreamError {
    url: String,
    reason: String,
}

impl Upstream {
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let invalid = |reason: String| UpstreamError {
            url: config.url.clone(),
            reason,
        };

        let url = Url::parse(&config.url).map_err(|e| invalid(e.to_string()))?;
        if url.scheme() != "http" {
            return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
        }
        let host = url
            .host_str()
            .ok_or_else(|| invalid("missing host".to_string()))?;
        let authority = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        let authority = Authority::from_str(&authority).map_err(|e| invalid(e.to_string()))?;
        let scheme = Scheme::from_str(url.scheme()).map_err(|e| invalid(e.to_string()))?;

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self {
            scheme,
            authority,
            client,
        })
    }

    /// Rewrite `uri` to point at this upstream, keeping path and query.
    fn target(&self, uri: &Uri) -> Uri {
        let mut parts = uri.clone().into_parts();
        parts.scheme = Some(self.scheme.clone());
        parts.authority = Some(self.authority.clone());
        if parts.path_and_query.is_none() {
            parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        Uri::from_parts(parts).unwrap_or_else(|_| uri.clone())
    }
}

/// Fallback handler: forward to the upstream, or 404 without one.
pub async fn proxy_handler(
    State(upstream): State<Option<Upstream>>,
    request: Request<Body>,
) -> Response {
    let Some(upstream) = upstream else {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };

    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let (mut parts, body) = request.into_parts();
    parts.uri = upstream.target(&parts.uri);
    let request = Request::from_parts(parts, body);

    match upstream.client.request(request).await {
        Ok(response) => {
            let status = response.status();
            tracing::debug!(
                method = %method,
                path = %path,
                status = %status,
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Forwarded request"
            );
            metrics::record_upstream(status.as_u16());

            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(
                method = %method,
                path = %path,
                upstream = %upstream.authority,
                error = %e,
                "Upstream error"
            );
            metrics::record_upstream(StatusCode::BAD_GATEWAY.as_u16());
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
