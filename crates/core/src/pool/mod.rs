//! Media pool folder paths and the path-based folder lookup.

mod resolver;

pub use resolver::resolve_folder;

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A normalized media pool folder path.
///
/// Backslashes are folded to `/` and a trailing separator is enforced, so
/// `A\B` and `A/B/` address the same folder. The empty path is rejected
/// here; anything else, interior empty segments included, is handed to the
/// lookup untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderPath(String);

impl FolderPath {
    pub fn new(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::invalid("a folder path is required"));
        }
        let mut path = raw.replace('\\', "/");
        if !path.ends_with('/') {
            path.push('/');
        }
        Ok(Self(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FolderPath {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        Self::new(raw)
    }
}
