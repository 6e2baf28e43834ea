use tracing::debug;

use super::error::RegistryError;
use super::model::{NewUser, User, UserId};

const SEED_NAMES: [&str; 5] = ["Jessica", "Aldo", "Mac", "Karen", "Chikis"];

/// Ordered in-memory collection of users.
///
/// Insertion order is preserved; removing a record shifts the ones after it.
/// Ids come from a counter that only moves forward, so an id is never handed
/// out twice even after deletions.
#[derive(Debug, Clone)]
pub struct UserRegistry {
    users: Vec<User>,
    next_id: UserId,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self { users: Vec::new(), next_id: 1 }
    }

    /// The five demo users the service starts with.
    pub fn seeded() -> Self {
        Self::from_users(
            SEED_NAMES.iter().zip(1..).map(|(name, id)| User::new(id, *name)).collect(),
        )
    }

    /// Takes `users` as-is; new ids continue after the largest one present.
    pub fn from_users(users: Vec<User>) -> Self {
        let next_id = users.iter().map(|u| u.id).max().map_or(1, |max| max + 1);
        Self { users, next_id }
    }

    pub fn list(&self) -> &[User] { &self.users }
    pub fn len(&self) -> usize { self.users.len() }
    pub fn is_empty(&self) -> bool { self.users.is_empty() }

    pub fn get(&self, id: UserId) -> Result<&User, RegistryError> {
        self.users.iter().find(|u| u.id == id).ok_or(RegistryError::NotFound)
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.get(id).is_ok()
    }

    /// Appends a record with the next id and returns it.
    pub fn create(&mut self, new: NewUser) -> User {
        let user = User::new(self.next_id, new.into_name());
        self.next_id += 1;
        self.users.push(user.clone());
        debug!(id = user.id, "user created");
        user
    }

    /// Replaces the name of `id`; the id itself never changes.
    pub fn update(&mut self, id: UserId, new: NewUser) -> Result<User, RegistryError> {
        let user = self.users.iter_mut()
            .find(|u| u.id == id)
            .ok_or(RegistryError::NotFound)?;
        user.name = new.into_name();
        debug!(id, "user updated");
        Ok(user.clone())
    }

    /// Removes `id` and returns the removed record.
    pub fn delete(&mut self, id: UserId) -> Result<User, RegistryError> {
        let index = self.users.iter()
            .position(|u| u.id == id)
            .ok_or(RegistryError::NotFound)?;
        let user = self.users.remove(index);
        debug!(id, "user deleted");
        Ok(user)
    }
}

impl Default for UserRegistry {
    fn default() -> Self { Self::new() }
}
