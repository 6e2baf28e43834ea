//! Application assembly: shared state and the route table.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::middleware::Trace;
use crate::request::Request;
use crate::router::Router;
use crate::statics;
use crate::users::{self, UserRegistry};

pub const GREETING: &str = "Hello from the user registry";

/// State handed to every handler. Cloning is cheap: every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<RwLock<UserRegistry>>,
    /// Collection path, used to build `location` headers.
    pub users_path: Arc<str>,
    pub public_dir: Arc<Path>,
}

impl AppState {
    pub fn new(registry: UserRegistry, users_path: &str, public_dir: impl AsRef<Path>) -> Self {
        Self {
            users: Arc::new(RwLock::new(registry)),
            users_path: Arc::from(users_path),
            public_dir: Arc::from(public_dir.as_ref()),
        }
    }
}

/// Builds the full route table over `registry`:
///
/// ```text
/// GET    /                      greeting
/// GET    {prefix}/users         list
/// POST   {prefix}/users         create
/// GET    {prefix}/users/{id}    get
/// PUT    {prefix}/users/{id}    update
/// DELETE {prefix}/users/{id}    delete
/// *      anything else          static files from the public directory
/// ```
pub fn router(config: &Config, registry: UserRegistry) -> Router<AppState> {
    let collection = config.users_path();
    let item = format!("{collection}/{{id}}");
    let state = AppState::new(registry, &collection, &config.public_dir);

    let router = Router::with_state(state)
        .get("/", greeting)
        .get(&collection, users::list_users)
        .post(&collection, users::create_user)
        .get(&item, users::get_user)
        .put(&item, users::update_user)
        .delete(&item, users::delete_user)
        .fallback(statics::serve);

    if config.request_logging() {
        router.layer(Trace)
    } else {
        router
    }
}

async fn greeting(_state: AppState, _req: Request) -> &'static str {
    GREETING
}
