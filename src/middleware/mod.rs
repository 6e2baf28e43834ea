//! Middleware layer.
//!
//! Middleware intercepts requests and responses and is the right place for
//! cross-cutting concerns: request logging, request-id injection, header
//! inspection. Layers run in registration order for [`Middleware::before`]
//! and in reverse order for [`Middleware::after`].
//!
//! Built-in middleware:
//! - [`Trace`] — one log line per request with method, path, status, size, latency

use std::time::Duration;

use crate::method::Method;
use crate::request::Request;
use crate::response::Response;

mod trace;

pub use trace::Trace;

/// A request/response interceptor registered with
/// [`Router::layer`](crate::Router::layer).
pub trait Middleware: Send + Sync + 'static {
    /// Runs before routing. Returning `Some` short-circuits the handler and
    /// the remaining `before` hooks; every `after` hook still runs.
    fn before(&self, _req: &Request) -> Option<Response> {
        None
    }

    /// Runs once the response exists.
    fn after(&self, _req: &RequestSummary, _res: &mut Response, _latency: Duration) {}
}

/// The parts of a request still available after the handler consumed it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestSummary {
    pub method: Method,
    pub path: String,
}

impl RequestSummary {
    pub(crate) fn of(req: &Request) -> Self {
        Self { method: req.method(), path: req.path().to_owned() }
    }
}
