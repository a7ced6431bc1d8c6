use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dotenvy::dotenv;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use super::{Database, Store};
use crate::error::{self, StoreError};

/// Environment variable naming the state file; `db.json` when unset.
pub const DB_PATH_VAR: &str = "QUICKPOLL_DB";

const DEFAULT_DB_PATH: &str = "db.json";

/// File-backed store holding the full state as one pretty-printed JSON
/// document.
///
/// Each write stages to its own uniquely named sibling file and is renamed
/// over the target, so a reader never observes a half-written document and
/// racing writers never share a staging file. A missing file reads as the
/// empty state; an unreadable or unparseable one is an error rather than a
/// silent reset, since the next write would destroy whatever the file held.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> JsonStore {
        JsonStore { path: path.into() }
    }

    /// Resolve the state file location from `.env`/environment, falling
    /// back to [`DEFAULT_DB_PATH`] in the working directory.
    pub fn from_env() -> JsonStore {
        dotenv().ok();

        let path = env::var(DB_PATH_VAR).unwrap_or_else(|_| String::from(DEFAULT_DB_PATH));
        JsonStore::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unique sibling name for one write's staging file.
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
        PathBuf::from(name)
    }
}

#[async_trait]
impl Store for JsonStore {
    async fn read(&self) -> Result<Database, StoreError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no state file at {}, starting empty", self.path.display());
                return Ok(Database::default());
            }
            Err(err) => return Err(error::store_read(&self.path, err)),
        };

        serde_json::from_str(&raw).map_err(|err| error::store_parse(&self.path, err))
    }

    async fn write(&self, db: &Database) -> Result<(), StoreError> {
        let raw =
            serde_json::to_string_pretty(db).map_err(|err| error::store_write(&self.path, err))?;

        // stage under a per-write unique name next to the target, so racing
        // writers never share a staging file and the rename never crosses
        // filesystems
        let staging = self.staging_path();
        fs::write(&staging, raw)
            .await
            .map_err(|err| error::store_write(&self.path, err))?;
        if let Err(err) = fs::rename(&staging, &self.path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(error::store_write(&self.path, err));
        }

        debug!("persisted state to {}", self.path.display());
        Ok(())
    }
}
