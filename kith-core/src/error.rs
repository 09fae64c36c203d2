use kith_common::Username;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of directory operations. Every variant leaves the directory
/// unchanged and skips the snapshot save.
#[derive(Debug, Error)]
pub enum Error {
    #[error("username {0} already exists")]
    DuplicateAccount(Username),

    #[error("user {0} not found")]
    AccountNotFound(Username),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures of the snapshot gateway. A missing file at load time is not an
/// error (first run), so it has no variant here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot io: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot would not serialize: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("snapshot does not parse: {0}")]
    Corrupt(#[source] serde_json::Error),
}
