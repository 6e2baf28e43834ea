use std::time::Duration;

use tracing::info;

use super::{Middleware, RequestSummary};
use crate::response::Response;

/// Request logger. Emits one `tracing` event per request on the `http`
/// target with method, path, status, body size and latency fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl Middleware for Trace {
    fn after(&self, req: &RequestSummary, res: &mut Response, latency: Duration) {
        let status: u16 = res.status_code().into();
        info!(
            target: "http",
            method = %req.method,
            path = %req.path,
            status,
            bytes = res.body().len(),
            latency_ms = latency.as_secs_f64() * 1000.0,
            "request"
        );
    }
}
