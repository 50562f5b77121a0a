//! The permissions a caller presents for one request.
//!
//! The auth layer in front of the gateway has already verified the
//! credential. Whatever abilities it carries arrive here as plain names. A
//! credential without ability data is the empty set, never an error.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::command::PermissionGrant;

/// Set of permission names carried by the caller's credential.
///
/// Deserializes from a list, from `null`, or (with `#[serde(default)]` on the
/// containing field) from nothing at all. The last two both yield the empty
/// set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Vec<String>>", into = "Vec<String>")]
pub struct CallerGrantSet {
    inner: BTreeSet<PermissionGrant>,
}

impl CallerGrantSet {
    /// The weakest possible grant set.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn grant(&mut self, permission: PermissionGrant) {
        self.inner.insert(permission);
    }

    pub fn has(&self, permission: &PermissionGrant) -> bool {
        self.inner.contains(permission)
    }

    pub fn all(&self) -> impl Iterator<Item = &PermissionGrant> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CallerGrantSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().map(PermissionGrant::new).collect(),
        }
    }
}

impl From<Option<Vec<String>>> for CallerGrantSet {
    fn from(abilities: Option<Vec<String>>) -> Self {
        abilities.unwrap_or_default().into_iter().collect()
    }
}

impl From<CallerGrantSet> for Vec<String> {
    fn from(set: CallerGrantSet) -> Self {
        set.inner.into_iter().map(|p| p.0).collect()
    }
}

/// The authenticated caller as handed over by the auth layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallerCredential {
    /// Who the caller is, for logging only.
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub abilities: CallerGrantSet,
}
