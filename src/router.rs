//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. A router owns the
//! application state `S` and hands a clone of it to every handler call.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::{Middleware, RequestSummary};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
pub struct Router<S = ()> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    layers: Vec<Arc<dyn Middleware>>,
    fallback: Option<BoxedHandler<S>>,
    state: S,
}

impl Router<()> {
    /// A router without application state.
    pub fn new() -> Self {
        Self::with_state(())
    }
}

impl Default for Router<()> {
    fn default() -> Self { Self::new() }
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// A router whose handlers receive a clone of `state` on every call.
    pub fn with_state(state: S) -> Self {
        Self {
            routes: HashMap::new(),
            layers: Vec::new(),
            fallback: None,
            state,
        }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is malformed or conflicts with an existing route for
    /// the same method. Routes are fixed at startup, so this is a programming
    /// error rather than a runtime condition.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Put, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::Delete, path, handler)
    }

    /// Append a middleware layer.
    pub fn layer(mut self, middleware: impl Middleware) -> Self {
        self.layers.push(Arc::new(middleware));
        self
    }

    /// Handler for requests whose path matches no route under any method.
    /// Without one, such requests get a bare 404.
    pub fn fallback(mut self, handler: impl Handler<S>) -> Self {
        self.fallback = Some(handler.into_boxed_handler());
        self
    }

    pub fn state(&self) -> &S { &self.state }

    /// Runs `req` through the middleware chain and the matching handler and
    /// returns the single response for it.
    pub async fn respond(&self, req: Request) -> Response {
        let started = Instant::now();
        let summary = RequestSummary::of(&req);

        let short_circuit = self.layers.iter().find_map(|layer| layer.before(&req));
        let mut response = match short_circuit {
            Some(res) => res,
            None => self.route(req).await,
        };

        let latency = started.elapsed();
        for layer in self.layers.iter().rev() {
            layer.after(&summary, &mut response, latency);
        }
        response
    }

    async fn route(&self, req: Request) -> Response {
        if let Some((handler, params)) = self.lookup(req.method(), req.path()) {
            return handler.call(self.state.clone(), req.with_params(params)).await;
        }

        let allowed = self.allowed_methods(req.path());
        if !allowed.is_empty() {
            return method_not_allowed(&allowed);
        }

        match &self.fallback {
            Some(handler) => handler.call(self.state.clone(), req).await,
            None => Response::status(Status::NotFound),
        }
    }

    /// Finds the handler for `method` + `path`. `HEAD` without its own route
    /// uses the `GET` one; hyper drops the body on the way out.
    pub(crate) fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler<S>, HashMap<String, String>)> {
        self.lookup_exact(method, path).or_else(|| match method {
            Method::Head => self.lookup_exact(Method::Get, path),
            _ => None,
        })
    }

    fn lookup_exact(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler<S>, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    /// Methods with a route matching `path`, in a stable order.
    pub(crate) fn allowed_methods(&self, path: &str) -> Vec<Method> {
        Method::ALL.into_iter()
            .filter(|&m| self.matches(m, path))
            .collect()
    }

    fn matches(&self, method: Method, path: &str) -> bool {
        let routed = |m: Method| self.routes.get(&m).is_some_and(|tree| tree.at(path).is_ok());
        routed(method) || (method == Method::Head && routed(Method::Get))
    }
}

/// `405` with an `allow` header listing what the path does accept.
pub(crate) fn method_not_allowed(allowed: &[Method]) -> Response {
    let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
    Response::builder()
        .status(Status::MethodNotAllowed)
        .header("allow", &allow)
        .no_body()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use bytes::Bytes;

    use super::*;

    fn req(method: Method, path: &str) -> Request {
        Request::new(method, path, Vec::new(), Bytes::new())
    }

    async fn echo_id(_: (), req: Request) -> String {
        req.param("id").unwrap_or_default().to_owned()
    }

    #[tokio::test]
    async fn routes_by_method_and_extracts_params() {
        let app = Router::new().get("/things/{id}", echo_id);

        let res = app.respond(req(Method::Get, "/things/42")).await;
        assert_eq!(res.status_code(), Status::Ok);
        assert_eq!(res.body(), b"42");
    }

    #[tokio::test]
    async fn known_path_with_other_method_is_405() {
        let app = Router::new()
            .get("/things/{id}", echo_id)
            .delete("/things/{id}", echo_id);

        let res = app.respond(req(Method::Patch, "/things/1")).await;
        assert_eq!(res.status_code(), Status::MethodNotAllowed);
        assert_eq!(res.header("allow"), Some("DELETE, GET, HEAD"));
    }

    #[tokio::test]
    async fn head_falls_back_to_get_route() {
        let app = Router::new().get("/things/{id}", echo_id);

        let res = app.respond(req(Method::Head, "/things/7")).await;
        assert_eq!(res.status_code(), Status::Ok);
        assert_eq!(res.body(), b"7");

        let res = app.respond(req(Method::Post, "/things/7")).await;
        assert_eq!(res.header("allow"), Some("GET, HEAD"));
    }

    #[tokio::test]
    async fn unknown_path_uses_fallback_or_404() {
        let bare = Router::new().get("/things/{id}", echo_id);
        assert_eq!(bare.respond(req(Method::Get, "/nope")).await.status_code(), Status::NotFound);

        let with_fallback = Router::new().fallback(|_: (), _req: Request| async { "fallback" });
        let res = with_fallback.respond(req(Method::Get, "/nope")).await;
        assert_eq!(res.body(), b"fallback");
    }

    #[tokio::test]
    async fn handlers_receive_state() {
        let app = Router::with_state(Arc::new(AtomicUsize::new(0)))
            .post("/hits", |hits: Arc<AtomicUsize>, _req: Request| async move {
                hits.fetch_add(1, Ordering::SeqCst).to_string()
            });

        app.respond(req(Method::Post, "/hits")).await;
        let res = app.respond(req(Method::Post, "/hits")).await;
        assert_eq!(res.body(), b"1");
        assert_eq!(app.state().load(Ordering::SeqCst), 2);
    }

    struct Gate;

    impl Middleware for Gate {
        fn before(&self, req: &Request) -> Option<Response> {
            (req.header("x-block").is_some()).then(|| Response::status(Status::BadRequest))
        }
    }

    #[derive(Clone)]
    struct Counter(Arc<AtomicUsize>);

    impl Middleware for Counter {
        fn after(&self, _req: &RequestSummary, res: &mut Response, _latency: Duration) {
            self.0.fetch_add(1, Ordering::SeqCst);
            res.headers.push(("x-seen".into(), "1".into()));
        }
    }

    #[tokio::test]
    async fn before_short_circuits_and_after_always_runs() {
        let seen = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .get("/things/{id}", echo_id)
            .layer(Counter(Arc::clone(&seen)))
            .layer(Gate);

        let blocked = Request::new(
            Method::Get,
            "/things/1",
            vec![("x-block".into(), "yes".into())],
            Bytes::new(),
        );
        let res = app.respond(blocked).await;
        assert_eq!(res.status_code(), Status::BadRequest);
        assert_eq!(res.header("x-seen"), Some("1"));

        let res = app.respond(req(Method::Get, "/things/1")).await;
        assert_eq!(res.body(), b"1");
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_routes_panic() {
        let _ = Router::new()
            .get("/things/{id}", echo_id)
            .get("/things/{name}", echo_id);
    }
}
