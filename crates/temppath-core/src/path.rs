//! `TempPath` newtype.
//!
//! A temp path has no identity beyond its string value: two temp paths are
//! the same entry if and only if their strings are equal.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// String-valued path of a temporary file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TempPath(String);

impl TempPath {
    /// Create from an existing string value.
    #[must_use]
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    /// Return the inner string as a slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Borrow as a filesystem path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Consume self and return the inner `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::ops::Deref for TempPath {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TempPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for TempPath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl std::borrow::Borrow<str> for TempPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TempPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TempPath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TempPath {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
