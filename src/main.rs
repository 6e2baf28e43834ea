//! Service entry point.
//!
//! ```text
//! PORT=8080 RUST_LOG=debug cargo run
//! curl http://localhost:8080/api/users
//! curl -X POST http://localhost:8080/api/users \
//!      -H 'content-type: application/json' -d '{"name":"Lupita"}'
//! ```

use std::process::ExitCode;

use tracing::{error, info};
use usuarios::{Config, Env, Error, Server, UserRegistry, app};

#[tokio::main]
async fn main() -> ExitCode {
    setup_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::from_env(&Env::real())?;
    info!(
        app = %config.app_name,
        env = %config.environment,
        users = %config.users_path(),
        "starting"
    );

    let router = app::router(&config, UserRegistry::seeded());
    Server::bind(config.addr()).serve(router).await
}

/// `RUST_LOG` filter, `info` when unset.
fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .compact()
        .init();
}
