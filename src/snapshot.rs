use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Username;

/// On-disk value for one account: exactly the two sequences, in order.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct AccountRecord {
    pub posts: Vec<String>,
    pub friends: Vec<Username>,
}

/// Whole-document snapshot: username -> record. Each save replaces the
/// previous snapshot entirely.
pub type Snapshot = HashMap<Username, AccountRecord>;
