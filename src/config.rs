//! Process configuration, read once from the environment at startup.
//!
//! | Variable | Default |
//! |---|---|
//! | `PORT` | `3000` |
//! | `HOST` | `0.0.0.0` |
//! | `API_PREFIX` | `/api` |
//! | `PUBLIC_DIR` | `public` |
//! | `APP_NAME` | `usuarios` |
//! | `APP_ENV` | `development` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::env::Env;
use crate::error::Error;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Mount prefix for the users resource, normalised to `""` or `/segment…`
    /// without a trailing slash.
    pub api_prefix: String,
    pub public_dir: PathBuf,
    pub app_name: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            api_prefix: "/api".to_owned(),
            public_dir: PathBuf::from("public"),
            app_name: "usuarios".to_owned(),
            environment: "development".to_owned(),
        }
    }
}

impl Config {
    pub fn from_env(env: &Env) -> Result<Self, Error> {
        let defaults = Self::default();

        let port = match env.var("PORT") {
            Some(raw) => raw.trim().parse::<u16>()
                .map_err(|e| Error::config("PORT", format!("`{raw}`: {e}")))?,
            None => defaults.port,
        };
        let host = match env.var("HOST") {
            Some(raw) => raw.trim().parse::<IpAddr>()
                .map_err(|e| Error::config("HOST", format!("`{raw}`: {e}")))?,
            None => defaults.host,
        };

        Ok(Self {
            host,
            port,
            api_prefix: env.var("API_PREFIX")
                .map(|p| normalize_prefix(&p))
                .unwrap_or(defaults.api_prefix),
            public_dir: env.var("PUBLIC_DIR").map(PathBuf::from).unwrap_or(defaults.public_dir),
            app_name: env.var("APP_NAME").unwrap_or(defaults.app_name),
            environment: env.var("APP_ENV").unwrap_or(defaults.environment),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Per-request logging is on in development only.
    pub fn request_logging(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }

    /// Path of the users collection, e.g. `/api/users`.
    pub fn users_path(&self) -> String {
        format!("{}/users", self.api_prefix)
    }
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
