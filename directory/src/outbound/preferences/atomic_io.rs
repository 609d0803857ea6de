//! Temp-file-and-rename writes inside a capability directory.
//!
//! Readers of a preference file see either the previous contents or the new
//! ones, never a torn write. Concurrent writers race on the final rename, so
//! the last rename wins.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use cap_std::fs::{Dir, OpenOptions};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replace `file_name` in `dir` with `contents`.
///
/// `file_name` must be a bare file name; callers validate it.
///
/// # Errors
///
/// Returns the underlying I/O error when the temporary file cannot be
/// created, written, synced or renamed. The temporary file is removed on
/// failure.
pub(super) fn replace_file(dir: &Dir, file_name: &str, contents: &[u8]) -> io::Result<()> {
    let temp_name = temp_name_for(file_name);

    let written = write_new_file(dir, &temp_name, contents)
        .and_then(|()| rename_over(dir, &temp_name, file_name));
    if let Err(error) = written {
        // The temp file may not exist if creation failed.
        drop(dir.remove_file(&temp_name));
        return Err(error);
    }

    // Directory sync is best-effort; not every platform supports it.
    drop(dir.open(".").and_then(|handle| handle.sync_all()));
    Ok(())
}

fn temp_name_for(file_name: &str) -> String {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    format!(
        ".{file_name}.tmp.{pid}.{nanos}.{counter}",
        pid = std::process::id()
    )
}

fn write_new_file(dir: &Dir, name: &str, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(name, &options)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(windows)]
fn rename_over(dir: &Dir, from: &str, to: &str) -> io::Result<()> {
    // Windows rename fails if the target exists.
    match dir.remove_file(to) {
        Ok(()) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => return Err(error),
    }
    dir.rename(from, dir, to)
}

#[cfg(not(windows))]
fn rename_over(dir: &Dir, from: &str, to: &str) -> io::Result<()> {
    dir.rename(from, dir, to)
}

#[cfg(test)]
mod tests {
    //! Replacement semantics and temp-file cleanup.

    use cap_std::ambient_authority;

    use super::*;

    fn temp_dir() -> (tempfile::TempDir, Dir) {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let dir = Dir::open_ambient_dir(tmp.path(), ambient_authority()).expect("open temp dir");
        (tmp, dir)
    }

    fn entry_names(dir: &Dir) -> Vec<String> {
        let mut names: Vec<String> = dir
            .entries()
            .expect("list entries")
            .map(|entry| {
                entry
                    .expect("entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    #[test]
    fn creates_missing_file() {
        let (_tmp, dir) = temp_dir();

        replace_file(&dir, "app-theme", b"dark").expect("write succeeds");

        assert_eq!(dir.read_to_string("app-theme").expect("read"), "dark");
    }

    #[test]
    fn replaces_existing_contents_and_leaves_no_temp_files() {
        let (_tmp, dir) = temp_dir();
        replace_file(&dir, "user-favorites", b"[1,2,3]").expect("first write");

        replace_file(&dir, "user-favorites", b"[4]").expect("second write");

        assert_eq!(dir.read_to_string("user-favorites").expect("read"), "[4]");
        assert_eq!(entry_names(&dir), ["user-favorites"]);
    }

    #[test]
    fn temp_names_are_unique_and_hidden() {
        let first = temp_name_for("app-theme");
        let second = temp_name_for("app-theme");

        assert_ne!(first, second);
        assert!(first.starts_with(".app-theme.tmp."));
    }
}
