//! File-backed rotation store.
//!
//! Persists the rotation state as a single JSON document inside a
//! capability-scoped directory. Writes go to a temporary file which is then
//! renamed over the live document, so a crash mid-write leaves either the
//! old record or the new one, never a torn file.

use async_trait::async_trait;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::sync::{Arc, Mutex};

use crate::rotation::{
    domain::RotationState,
    ports::{RotationStateStore, RotationStoreError, StoreResult, VersionedState},
};

const STATE_FILE: &str = "rotation-state.json";
const STATE_FILE_TMP: &str = "rotation-state.json.tmp";

/// On-disk representation of the versioned rotation state.
#[derive(Debug, Serialize, Deserialize)]
struct StateDocument {
    version: u64,
    state: RotationState,
}

/// Rotation store persisting state to `rotation-state.json` in a directory.
///
/// An internal mutex serialises same-process writers; cross-process safety
/// relies on the version check re-reading the document under that lock and
/// on the atomic rename.
#[derive(Debug, Clone)]
pub struct FileRotationStore {
    dir: Arc<Dir>,
    write_lock: Arc<Mutex<()>>,
}

impl FileRotationStore {
    /// Creates a store rooted at the given open directory.
    #[must_use]
    pub fn new(dir: Dir) -> Self {
        Self {
            dir: Arc::new(dir),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn read_document(&self) -> StoreResult<Option<StateDocument>> {
        let contents = match self.dir.read_to_string(STATE_FILE) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(RotationStoreError::unavailable(err)),
        };
        let document =
            serde_json::from_str(&contents).map_err(RotationStoreError::unavailable)?;
        Ok(Some(document))
    }

    fn write_document(&self, document: &StateDocument) -> StoreResult<()> {
        let json =
            serde_json::to_vec_pretty(document).map_err(RotationStoreError::write_failed)?;
        self.dir
            .write(STATE_FILE_TMP, &json)
            .map_err(RotationStoreError::write_failed)?;
        self.dir
            .rename(STATE_FILE_TMP, &self.dir, STATE_FILE)
            .map_err(RotationStoreError::write_failed)?;
        Ok(())
    }
}

#[async_trait]
impl RotationStateStore for FileRotationStore {
    async fn load(&self) -> StoreResult<Option<VersionedState>> {
        let document = self.read_document()?;
        Ok(document.map(|doc| VersionedState::new(doc.state, doc.version)))
    }

    async fn save(
        &self,
        state: &RotationState,
        expected_version: Option<u64>,
    ) -> StoreResult<u64> {
        let guard = self.write_lock.lock().map_err(|err| {
            RotationStoreError::write_failed(std::io::Error::other(err.to_string()))
        })?;

        let actual = self.read_document()?.map(|doc| doc.version);
        if actual != expected_version {
            return Err(RotationStoreError::VersionConflict {
                expected: expected_version,
                actual,
            });
        }

        let next_version = actual.unwrap_or(0).saturating_add(1);
        self.write_document(&StateDocument {
            version: next_version,
            state: state.clone(),
        })?;
        drop(guard);
        Ok(next_version)
    }
}
