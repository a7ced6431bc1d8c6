use serde::{Deserialize, Serialize};

use super::id::Id;

/// A registered account. Created at signup, never mutated, never deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub email: String,
    /// Opaque hashed credential, never the clear-text password.
    pub password: String,
}

impl User {
    pub const fn new(id: Id, email: String, password: String) -> User {
        User {
            id,
            email,
            password,
        }
    }
}
