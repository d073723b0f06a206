use log::debug;
use std::{
    io::{ErrorKind, Result},
    path::Path,
};

/// Create `path` and all of its missing parents.
///
/// Succeeds if `path` already is a directory; fails with `NotADirectory` if
/// something other than a directory occupies it.
pub fn mkdirs_if_missing(path: &Path) -> Result<()> {
    if !path.exists() {
        debug!("Creating directory {}", path.display());
        std::fs::create_dir_all(path)
    } else if path.is_dir() {
        Ok(())
    } else {
        Err(std::io::Error::new(
            ErrorKind::NotADirectory,
            format!("{} is not a directory", path.display()),
        ))
    }
}
