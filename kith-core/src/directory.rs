use std::collections::HashMap;

use kith_common::{Account, Username};
use tracing::info;

use crate::error::{Error, Result};
use crate::store::SnapshotStore;

/// In-memory account directory backed by a snapshot store.
///
/// Keys are unique and every key equals its account's own username. Each
/// successful mutation rewrites the whole snapshot before returning; failed
/// operations leave both memory and disk untouched.
#[derive(Debug)]
pub struct Directory {
    accounts: HashMap<Username, Account>,
    store: SnapshotStore,
}

impl Directory {
    /// Load prior state through the gateway, or start empty when no
    /// snapshot exists yet. A snapshot that exists but does not parse is a
    /// fatal startup error.
    pub fn open(store: SnapshotStore) -> Result<Self> {
        let accounts = store.load()?;
        Ok(Self { accounts, store })
    }

    /// Insert a fresh account with empty posts and friends.
    pub fn create_account(&mut self, username: &Username) -> Result<()> {
        if self.accounts.contains_key(username) {
            return Err(Error::DuplicateAccount(username.clone()));
        }
        self.accounts
            .insert(username.clone(), Account::new(username.clone()));
        info!("user {username} created");
        self.store.save(&self.accounts)?;
        Ok(())
    }

    /// Presence-only login: succeeds iff the username exists. No credential
    /// semantics.
    pub fn authenticate(&self, username: &Username) -> bool {
        let known = self.accounts.contains_key(username);
        if known {
            info!("user {username} logged in");
        } else {
            info!("user {username} does not exist");
        }
        known
    }

    /// Append `content` to the user's posts, unconditionally. Empty content
    /// is allowed and there is no length limit.
    pub fn add_post(&mut self, username: &Username, content: impl Into<String>) -> Result<()> {
        let account = self
            .accounts
            .get_mut(username)
            .ok_or_else(|| Error::AccountNotFound(username.clone()))?;
        account.add_post(content);
        info!("post created by {username}");
        self.store.save(&self.accounts)?;
        Ok(())
    }

    /// Record a friendship on both sides: two independent appends, so
    /// repeating a pair duplicates entries and befriending yourself appends
    /// your own name twice.
    pub fn add_friendship(&mut self, first: &Username, second: &Username) -> Result<()> {
        for username in [first, second] {
            if !self.accounts.contains_key(username) {
                return Err(Error::AccountNotFound(username.clone()));
            }
        }
        if let Some(account) = self.accounts.get_mut(first) {
            account.add_friend(second.clone());
        }
        if let Some(account) = self.accounts.get_mut(second) {
            account.add_friend(first.clone());
        }
        info!("{first} and {second} are now friends");
        self.store.save(&self.accounts)?;
        Ok(())
    }

    pub fn account(&self, username: &Username) -> Option<&Account> {
        self.accounts.get(username)
    }

    pub fn posts(&self, username: &Username) -> Option<&[String]> {
        self.accounts.get(username).map(Account::posts)
    }

    pub fn friends(&self, username: &Username) -> Option<&[Username]> {
        self.accounts.get(username).map(Account::friends)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_in(tmp: &TempDir) -> Directory {
        Directory::open(SnapshotStore::new(tmp.path().join("user_data.json"))).unwrap()
    }

    fn name(s: &str) -> Username {
        Username::new(s)
    }

    #[test]
    fn starts_empty_without_a_snapshot() {
        let tmp = TempDir::new().unwrap();
        let directory = open_in(&tmp);
        assert!(directory.is_empty());
    }

    #[test]
    fn usernames_are_unique() {
        let tmp = TempDir::new().unwrap();
        let mut directory = open_in(&tmp);
        directory.create_account(&name("alice")).unwrap();
        let err = directory.create_account(&name("alice")).unwrap_err();
        assert!(matches!(err, Error::DuplicateAccount(ref u) if u.as_str() == "alice"));
        assert_eq!(directory.len(), 1);
        assert!(directory.posts(&name("alice")).unwrap().is_empty());
    }

    #[test]
    fn usernames_are_case_sensitive() {
        let tmp = TempDir::new().unwrap();
        let mut directory = open_in(&tmp);
        directory.create_account(&name("alice")).unwrap();
        directory.create_account(&name("Alice")).unwrap();
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn authenticate_is_presence_only() {
        let tmp = TempDir::new().unwrap();
        let mut directory = open_in(&tmp);
        assert!(!directory.authenticate(&name("alice")));
        directory.create_account(&name("alice")).unwrap();
        assert!(directory.authenticate(&name("alice")));
    }

    #[test]
    fn posts_append_in_call_order() {
        let tmp = TempDir::new().unwrap();
        let mut directory = open_in(&tmp);
        let alice = name("alice");
        directory.create_account(&alice).unwrap();
        for content in ["hi", "", "hi", "third"] {
            directory.add_post(&alice, content).unwrap();
        }
        assert_eq!(directory.posts(&alice).unwrap(), ["hi", "", "hi", "third"]);
    }

    #[test]
    fn post_for_unknown_user_fails() {
        let tmp = TempDir::new().unwrap();
        let mut directory = open_in(&tmp);
        let err = directory.add_post(&name("carol"), "x").unwrap_err();
        assert!(matches!(err, Error::AccountNotFound(ref u) if u.as_str() == "carol"));
    }

    #[test]
    fn friendship_is_symmetric() {
        let tmp = TempDir::new().unwrap();
        let mut directory = open_in(&tmp);
        let (alice, bob) = (name("alice"), name("bob"));
        directory.create_account(&alice).unwrap();
        directory.create_account(&bob).unwrap();
        directory.add_friendship(&alice, &bob).unwrap();
        assert_eq!(directory.friends(&alice).unwrap(), [bob.clone()]);
        assert_eq!(directory.friends(&bob).unwrap(), [alice.clone()]);
    }

    #[test]
    fn repeated_friendship_duplicates_entries() {
        let tmp = TempDir::new().unwrap();
        let mut directory = open_in(&tmp);
        let (alice, bob) = (name("alice"), name("bob"));
        directory.create_account(&alice).unwrap();
        directory.create_account(&bob).unwrap();
        directory.add_friendship(&alice, &bob).unwrap();
        directory.add_friendship(&alice, &bob).unwrap();
        assert_eq!(directory.friends(&alice).unwrap(), [bob.clone(), bob.clone()]);
        assert_eq!(
            directory.friends(&bob).unwrap(),
            [alice.clone(), alice.clone()]
        );
    }

    #[test]
    fn self_friendship_appends_twice() {
        let tmp = TempDir::new().unwrap();
        let mut directory = open_in(&tmp);
        let alice = name("alice");
        directory.create_account(&alice).unwrap();
        directory.add_friendship(&alice, &alice).unwrap();
        assert_eq!(
            directory.friends(&alice).unwrap(),
            [alice.clone(), alice.clone()]
        );
    }

    #[test]
    fn friendship_with_unknown_user_changes_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut directory = open_in(&tmp);
        let alice = name("alice");
        directory.create_account(&alice).unwrap();
        let err = directory.add_friendship(&alice, &name("carol")).unwrap_err();
        assert!(matches!(err, Error::AccountNotFound(ref u) if u.as_str() == "carol"));
        assert!(directory.friends(&alice).unwrap().is_empty());
    }

    #[test]
    fn failed_operations_do_not_save() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("user_data.json");
        let mut directory = Directory::open(SnapshotStore::new(&path)).unwrap();
        directory.add_post(&name("carol"), "x").unwrap_err();
        directory
            .add_friendship(&name("carol"), &name("dave"))
            .unwrap_err();
        assert!(!path.exists());
    }

    #[test]
    fn state_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("user_data.json");
        let (alice, bob) = (name("alice"), name("bob"));
        {
            let mut directory = Directory::open(SnapshotStore::new(&path)).unwrap();
            directory.create_account(&alice).unwrap();
            directory.create_account(&bob).unwrap();
            directory.add_post(&alice, "hi").unwrap();
            directory.add_post(&alice, "again").unwrap();
            directory.add_friendship(&alice, &bob).unwrap();
        }
        let directory = Directory::open(SnapshotStore::new(&path)).unwrap();
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.posts(&alice).unwrap(), ["hi", "again"]);
        assert_eq!(directory.friends(&alice).unwrap(), [bob.clone()]);
        assert_eq!(directory.friends(&bob).unwrap(), [alice.clone()]);
        assert!(directory.posts(&bob).unwrap().is_empty());
    }

    #[test]
    fn corrupt_snapshot_fails_open() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("user_data.json");
        std::fs::write(&path, b"{").unwrap();
        let err = Directory::open(SnapshotStore::new(&path)).unwrap_err();
        assert!(matches!(err, Error::Store(_)));
    }

    // The walkthrough from the original application, end to end.
    #[test]
    fn signup_post_friend_scenario() {
        let tmp = TempDir::new().unwrap();
        let mut directory = open_in(&tmp);
        let (alice, bob, carol) = (name("alice"), name("bob"), name("carol"));

        assert!(directory.create_account(&alice).is_ok());
        assert!(directory.create_account(&alice).is_err());
        directory.add_post(&alice, "hi").unwrap();
        assert_eq!(directory.posts(&alice).unwrap(), ["hi"]);

        assert!(directory.create_account(&bob).is_ok());
        directory.add_friendship(&alice, &bob).unwrap();
        assert_eq!(directory.friends(&alice).unwrap(), [bob.clone()]);
        assert_eq!(directory.friends(&bob).unwrap(), [alice.clone()]);

        let err = directory.add_post(&carol, "x").unwrap_err();
        assert_eq!(err.to_string(), "user carol not found");
    }
}
