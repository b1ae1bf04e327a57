//! Request pipeline wrapped around every route.
//!
//! Stages, outermost first:
//!
//! 1. [`Stage::BindLogger`] opens the `http.request` span all inner logging runs in.
//! 2. [`Stage::RequestId`] resolves the request id, records it on the span and
//!    echoes it in the `x-request-id` response header.
//! 3. [`Stage::LogRequest`] logs method, url, latency and final status.
//! 4. [`Stage::Recover`] turns a handler panic into a logged `500` so the
//!    server keeps serving other requests.

use std::any::Any;
use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Json, Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::Span;
use uuid::Uuid;

use crate::models::OperationResult;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    BindLogger,
    RequestId,
    LogRequest,
    Recover,
}

/// Ordered list of stages, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn standard() -> Self {
        Self {
            stages: vec![
                Stage::BindLogger,
                Stage::RequestId,
                Stage::LogRequest,
                Stage::Recover,
            ],
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Wrap every route of `router` in the pipeline.
    pub fn apply<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        // The last layer added is the outermost, so fold from the inside out.
        self.stages
            .iter()
            .rev()
            .fold(router, |router, stage| match stage {
                Stage::BindLogger => router.layer(
                    TraceLayer::new_for_http()
                        .make_span_with(request_span)
                        .on_request(())
                        .on_response(())
                        .on_failure(()),
                ),
                Stage::RequestId => router.layer(middleware::from_fn(request_id_middleware)),
                Stage::LogRequest => router.layer(middleware::from_fn(log_request_middleware)),
                Stage::Recover => router.layer(CatchPanicLayer::custom(panic_response)),
            })
    }
}

// ============================================================
// Logger binding
// ============================================================

fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "http.request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
    )
}

// ============================================================
// Request id
// ============================================================

/// Inbound `x-request-id` if present and non-empty, otherwise a fresh UUID.
pub fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

pub async fn request_id_middleware(mut request: Request<Body>, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());
    let header = HeaderValue::from_str(&request_id).ok();

    if let Some(value) = &header {
        request.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
    }
    Span::current().record("request_id", request_id.as_str());

    let mut response = next.run(request).await;
    if let Some(value) = header {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

// ============================================================
// Request logging
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn for_status(status: StatusCode) -> Self {
        if status.is_server_error() {
            return Severity::Error;
        }

        match status {
            StatusCode::BAD_REQUEST
            | StatusCode::UNAUTHORIZED
            | StatusCode::FORBIDDEN
            | StatusCode::NOT_FOUND => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

pub async fn log_request_middleware(request: Request<Body>, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let url = request.uri().to_string();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let latency = started.elapsed();

    match Severity::for_status(response.status()) {
        Severity::Error => {
            tracing::error!(%method, %url, ?latency, status, "Request failed")
        }
        Severity::Warn => {
            tracing::warn!(%method, %url, ?latency, status, "Request processed")
        }
        Severity::Info => {
            tracing::info!(%method, %url, ?latency, status, "Request processed")
        }
    }

    response
}

// ============================================================
// Panic containment
// ============================================================

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "non-string panic payload"
    };

    tracing::error!(error = %detail, "Panic recovered");

    let status = StatusCode::INTERNAL_SERVER_ERROR;
    let body = OperationResult::failure(status, "Internal server error");
    (status, Json(body)).into_response()
}
