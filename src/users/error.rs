use thiserror::Error;

use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// Failures a users handler reports to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The payload broke a schema rule; carries the first violation.
    #[error("{0}")]
    Validation(String),

    #[error("user not found")]
    NotFound,
}

impl RegistryError {
    pub fn status(&self) -> Status {
        match self {
            Self::Validation(_) => Status::BadRequest,
            Self::NotFound      => Status::NotFound,
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        Response::builder().status(self.status()).text(self.to_string())
    }
}
