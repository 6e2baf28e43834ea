use serde::{Deserialize, Serialize};

use super::error::RegistryError;

pub type UserId = u64;

/// Shortest accepted name, in UTF-16 code units (what browsers and JSON
/// clients report as `length`).
pub const MIN_NAME_LEN: usize = 3;

/// One registry record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// A name that passed validation. Only obtainable through [`NewUser::new`]
/// or [`validate`](super::validate), so the registry never stores a short
/// name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>) -> Result<Self, RegistryError> {
        let name = name.into();
        if name.encode_utf16().count() < MIN_NAME_LEN {
            return Err(RegistryError::Validation(format!(
                "\"name\" length must be at least {MIN_NAME_LEN} characters long"
            )));
        }
        Ok(Self { name })
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn into_name(self) -> String { self.name }
}
