//! The user registry: records, payload validation, the in-memory collection
//! and the HTTP handlers over it.

mod error;
mod handlers;
mod markup;
mod model;
mod registry;
mod validation;

pub use error::RegistryError;
pub use handlers::{create_user, delete_user, get_user, list_users, parse_id, update_user};
pub use model::{NewUser, User, UserId, MIN_NAME_LEN};
pub use registry::UserRegistry;
pub use validation::{decode_payload, validate};
