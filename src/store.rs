mod json;
mod memory;

pub use json::{JsonStore, DB_PATH_VAR};
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::voting::{Poll, User};

/// The full persisted state: every user and every poll, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Database {
    pub users: Vec<User>,
    pub polls: Vec<Poll>,
}

/// Read/write access to the full state.
///
/// `write` is atomic from a reader's perspective: a concurrent `read` sees
/// either the previous state or the new one, never a partial write. There is
/// no isolation beyond that; callers read-modify-write, and two concurrent
/// writers can lose one of the updates.
#[async_trait]
pub trait Store: Send + Sync {
    /// The current state, or the empty default if none has been written yet.
    async fn read(&self) -> Result<Database, StoreError>;

    /// Replace the full state.
    async fn write(&self, db: &Database) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voting::{Id, PollOption, User};

    #[test]
    fn state_document_keys_are_stable() {
        let db = Database {
            users: vec![User::new(
                Id(1),
                String::from("ada@example.com"),
                String::from("sha256$00$11"),
            )],
            polls: vec![crate::voting::Poll {
                id: Id(1),
                question: String::from("Favorite color?"),
                options: vec![PollOption::new(Id(1), String::from("Red"))],
                created_by: Id(1),
            }],
        };

        let value = serde_json::to_value(&db).unwrap();
        assert!(value.get("users").is_some());
        assert!(value.get("polls").is_some());

        let user = &value["users"][0];
        assert_eq!(user["id"], 1);
        assert_eq!(user["email"], "ada@example.com");
        assert_eq!(user["password"], "sha256$00$11");

        let poll = &value["polls"][0];
        assert_eq!(poll["id"], 1);
        assert_eq!(poll["question"], "Favorite color?");
        assert_eq!(poll["created_by"], 1);
        assert_eq!(poll["options"][0]["id"], 1);
        assert_eq!(poll["options"][0]["text"], "Red");
        assert_eq!(poll["options"][0]["votes"], 0);
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let db: Database = serde_json::from_str("{}").unwrap();
        assert_eq!(db, Database::default());
    }
}
