//! security.txt middleware.
//! Answers the two security.txt paths and passes everything else through.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::security_txt::{is_security_txt_path, SecurityTxt};

pub async fn security_txt_middleware(
    State(interceptor): State<Arc<SecurityTxt>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if is_security_txt_path(req.uri().path()) {
        return interceptor.response();
    }

    next.run(req).await
}
