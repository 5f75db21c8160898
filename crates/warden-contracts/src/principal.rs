//! Principal types.
//!
//! A principal is one piece of identifying information (a username, an
//! account id, an email address) attached to a subject once it has logged in
//! or been remembered. A subject with no principals is a guest.

use serde::{Deserialize, Serialize};

/// An opaque identifying value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(pub String);

impl Principal {
    /// Construct a principal from any string-like value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The ordered principals held by a subject.
///
/// The first principal added is the primary one. Adding a principal that is
/// already present is a no-op, so insertion order is preserved without
/// duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalCollection {
    inner: Vec<Principal>,
}

impl PrincipalCollection {
    /// An empty collection, as held by a guest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a principal unless it is already present.
    pub fn add(&mut self, principal: Principal) {
        if !self.inner.contains(&principal) {
            self.inner.push(principal);
        }
    }

    /// The first principal, if any.
    pub fn primary(&self) -> Option<&Principal> {
        self.inner.first()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Iterate over the principals in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Principal> {
        self.inner.iter()
    }
}

impl FromIterator<Principal> for PrincipalCollection {
    fn from_iter<I: IntoIterator<Item = Principal>>(iter: I) -> Self {
        let mut collection = Self::new();
        for principal in iter {
            collection.add(principal);
        }
        collection
    }
}
