//! Username directory capability.
//!
//! The uniqueness rule consults a read-only set of already-registered
//! usernames. The directory is injected as a trait object so validation
//! stays storage-agnostic and unit-testable with a fixed set.

use std::collections::HashSet;

/// Read-only view of already-registered usernames.
///
pub trait UserDirectory: Send + Sync {
    /// Return whether the given username is already registered.
    fn contains(&self, username: &str) -> bool;
}

/// Directory backed by an in-memory set of usernames.
///
#[derive(Clone, Debug, Default)]
pub struct InMemoryDirectory {
    users: HashSet<String>,
}

impl InMemoryDirectory {
    /// Return a new empty directory.
    ///
    pub fn new() -> InMemoryDirectory {
        InMemoryDirectory::default()
    }

    /// Add a username to the directory.
    ///
    pub fn insert(&mut self, username: impl Into<String>) {
        self.users.insert(username.into());
    }
}

impl<S: Into<String>> FromIterator<S> for InMemoryDirectory {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        InMemoryDirectory {
            users: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl UserDirectory for InMemoryDirectory {
    fn contains(&self, username: &str) -> bool {
        self.users.contains(username)
    }
}
