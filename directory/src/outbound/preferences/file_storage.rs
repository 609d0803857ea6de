//! File-backed preference storage.
//!
//! Each key maps to one file of the same name inside the state directory.
//! Access goes through a `cap-std` directory handle so keys cannot escape it.

use std::io;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::debug;

use super::atomic_io::replace_file;
use crate::domain::ports::{PreferenceStorage, PreferenceStorageError};

/// Preference storage rooted at a directory on disk.
#[derive(Debug)]
pub struct FilePreferenceStorage {
    root: Utf8PathBuf,
    dir: Dir,
}

impl FilePreferenceStorage {
    /// Open `root`, creating it and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the directory cannot be created or opened.
    pub fn open(root: &Utf8Path) -> io::Result<Self> {
        Dir::create_ambient_dir_all(root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())?;
        debug!(root = %root, "opened preference directory");
        Ok(Self {
            root: root.to_path_buf(),
            dir,
        })
    }

    /// Directory the preference files live in.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

/// Keys become file names, so they must be a single plain path component.
fn file_name_for(key: &str) -> Result<&str, PreferenceStorageError> {
    let path = Utf8Path::new(key);
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Utf8Component::Normal(name)), None) if !name.starts_with('.') => Ok(name),
        _ => Err(PreferenceStorageError::invalid_key(key)),
    }
}

impl PreferenceStorage for FilePreferenceStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceStorageError> {
        let name = file_name_for(key)?;
        match self.dir.read_to_string(name) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(PreferenceStorageError::read(key, error.to_string())),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PreferenceStorageError> {
        let name = file_name_for(key)?;
        replace_file(&self.dir, name, value.as_bytes())
            .map_err(|error| PreferenceStorageError::write(key, error.to_string()))?;
        debug!(key, root = %self.root, "wrote preference file");
        Ok(())
    }
}
