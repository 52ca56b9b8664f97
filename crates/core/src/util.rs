//! Small helpers shared across the operator catalog.

use std::path::Path;

use tracing::warn;

use crate::error::{Error, Result};

/// Parse `raw` as a collection index and check it against `available`.
///
/// Host collections are 1-based; index 0 is let through with a warning so
/// the following host access fails on its own terms.
pub fn to_valid_index(raw: &str, entity: &str, available: usize) -> Result<usize> {
    let index: i64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::invalid(format!("the key value '{raw}' is not an integer index")))?;
    if index < 0 || index as usize > available {
        return Err(Error::IndexOutOfRange {
            entity: entity.to_string(),
            index,
            available,
        });
    }
    if index == 0 {
        warn!("{entity} lists on the host start at index 1");
    }
    Ok(index as usize)
}

/// Check that `path` ends with the file suffix a format expects.
pub fn ensure_suffix(path: &Path, suffix: &str) -> Result<()> {
    let matches = path
        .to_str()
        .map(|p| p.ends_with(suffix))
        .unwrap_or(false);
    if !matches {
        let found = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        return Err(Error::invalid(format!(
            "the file path must end with '{suffix}', got '{found}'"
        )));
    }
    Ok(())
}
