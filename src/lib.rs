pub mod snapshot;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Case-sensitive account identifier, also the storage key.
#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Clone, Debug, Serialize, Deserialize, Default)]
pub struct Username(pub String);

impl AsRef<Username> for Username {
    fn as_ref(&self) -> &Username {
        self
    }
}

impl Username {
    pub fn new(string: impl AsRef<str>) -> Self {
        Self(string.as_ref().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named account holding posts and friend links.
///
/// Fields are private: callers read through the accessors and mutate only
/// through the append operations. Both sequences are append-only, keep
/// insertion order, and allow duplicates.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Account {
    username: Username,
    posts: Vec<String>,
    friends: Vec<Username>,
}

impl Account {
    pub fn new(username: Username) -> Self {
        Self {
            username,
            posts: Vec::new(),
            friends: Vec::new(),
        }
    }

    /// Rebuild an account from previously persisted sequences, verbatim.
    pub fn restore(username: Username, posts: Vec<String>, friends: Vec<Username>) -> Self {
        Self {
            username,
            posts,
            friends,
        }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn posts(&self) -> &[String] {
        &self.posts
    }

    pub fn friends(&self) -> &[Username] {
        &self.friends
    }

    pub fn add_post(&mut self, content: impl Into<String>) {
        self.posts.push(content.into());
    }

    pub fn add_friend(&mut self, friend: Username) {
        self.friends.push(friend);
    }
}
