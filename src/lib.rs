//! # usuarios
//!
//! An in-memory user registry served over HTTP, on top of a small
//! hyper-based framework layer.
//!
//! ## The service
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | GET | `/api/users` | 200, `<ul>` of `id - name` | — |
//! | GET | `/api/users/{id}` | 200, `<h1>id - name</h1>` | 404 |
//! | POST | `/api/users` | 201, created record (JSON) | 400 |
//! | PUT | `/api/users/{id}` | 200, updated record (JSON) | 404, 400 |
//! | DELETE | `/api/users/{id}` | 200, deleted record (JSON) | 404 |
//!
//! Bodies are `{"name": "..."}` with a name of at least three characters,
//! sent as JSON or as a form. Records live for the lifetime of the process.
//!
//! ## The framework layer
//!
//! - Radix-tree routing via [`matchit`], one tree per method
//! - Async I/O on tokio, HTTP/1.1 and HTTP/2 via hyper
//! - Handlers are plain `async fn(state, Request) -> impl IntoResponse`
//! - Middleware with before/after hooks; [`middleware::Trace`] logs requests
//! - Graceful shutdown on SIGTERM / Ctrl-C, draining in-flight requests
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use usuarios::{app, Config, Env, Server, UserRegistry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), usuarios::Error> {
//!     let config = Config::from_env(&Env::real())?;
//!     let router = app::router(&config, UserRegistry::seeded());
//!     Server::bind(config.addr()).serve(router).await
//! }
//! ```

mod config;
mod env;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod app;
pub mod middleware;
pub mod statics;
pub mod users;

pub use app::AppState;
pub use config::Config;
pub use env::Env;
pub use error::Error;
pub use handler::Handler;
pub use method::{Method, UnknownMethod};
pub use request::Request;
pub use response::{ContentType, Html, IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::{Server, serve_listener, shutdown_signal};
pub use status::Status;
pub use users::{RegistryError, User, UserRegistry};
