use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use kith_common::snapshot::{AccountRecord, Snapshot};
use kith_common::{Account, Username};

use crate::error::StoreError;

/// Persistence gateway: one whole-document JSON snapshot file.
///
/// `save` and `load` are the entire contract. All file access in the crate
/// goes through here; the directory never touches the filesystem itself.
#[derive(Debug)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize every account and rewrite the snapshot file.
    ///
    /// The bytes go to a tmp sibling first, then rename over the old file,
    /// so an interrupted save keeps the previous snapshot intact.
    pub fn save(&self, accounts: &HashMap<Username, Account>) -> Result<(), StoreError> {
        let snapshot: Snapshot = accounts
            .iter()
            .map(|(username, account)| {
                let record = AccountRecord {
                    posts: account.posts().to_vec(),
                    friends: account.friends().to_vec(),
                };
                (username.clone(), record)
            })
            .collect();
        let data = serde_json::to_vec(&snapshot).map_err(StoreError::Encode)?;

        let tmp_path = self.path.with_extension("json.tmp");
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(&data)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Read the snapshot back into accounts, sequences restored verbatim.
    ///
    /// A missing file is the expected first-run state and yields an empty
    /// map. A file that exists but does not parse is `Corrupt`, never
    /// silently ignored.
    pub fn load(&self) -> Result<HashMap<Username, Account>, StoreError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(err) => return Err(err.into()),
        };
        let snapshot: Snapshot = serde_json::from_slice(&data).map_err(StoreError::Corrupt)?;
        Ok(snapshot
            .into_iter()
            .map(|(username, record)| {
                let account = Account::restore(username.clone(), record.posts, record.friends);
                (username, account)
            })
            .collect())
    }
}
