//! Filesystem helpers for the data directory and the bundled SQL scripts.

use crate::error::Error;
use crate::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Creates the directory at `path`, along with any missing parents. A directory which already
/// exists is left untouched.
pub fn ensure_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::CreateDirectory {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), "data directory ready");

    Ok(())
}

/// Reads the whole file at `path` as UTF-8 text.
pub fn read_text_asset(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => {
            debug!(path = %path.display(), bytes = text.len(), "read SQL script");
            Ok(text)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::AssetMissing {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(Error::AssetUnreadable {
            path: path.to_path_buf(),
            source,
        }),
    }
}
