pub mod directory;
pub mod error;
pub mod store;

pub use directory::Directory;
pub use error::{Error, Result, StoreError};
pub use store::SnapshotStore;
