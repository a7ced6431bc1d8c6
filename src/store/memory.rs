use std::sync::Mutex;

use async_trait::async_trait;

use super::{Database, Store};
use crate::error::StoreError;

/// In-process store over a mutex-guarded state. The backend used by tests
/// and by ephemeral deployments that never touch disk.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<Database>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Start from a pre-populated state instead of the empty default.
    pub fn with_state(db: Database) -> MemoryStore {
        MemoryStore {
            state: Mutex::new(db),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn read(&self) -> Result<Database, StoreError> {
        // a poisoned lock still holds a structurally sound state
        let state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(state.clone())
    }

    async fn write(&self, db: &Database) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *state = db.clone();
        Ok(())
    }
}
