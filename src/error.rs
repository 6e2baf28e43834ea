//! Unified infrastructure error type.

use thiserror::Error;

/// The error type returned by the service's fallible startup and serving
/// operations.
///
/// Application-level failures (unknown user, invalid payload) are expressed
/// as HTTP [`Response`](crate::Response) values via
/// [`RegistryError`](crate::users::RegistryError), not as `Error`s. This type
/// surfaces infrastructure failures: reading configuration, binding to a
/// port, or accepting a connection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid value for {var}: {reason}")]
    Config { var: &'static str, reason: String },
}

impl Error {
    pub(crate) fn config(var: &'static str, reason: impl Into<String>) -> Self {
        Self::Config { var, reason: reason.into() }
    }
}
