//! Writing a file into a cache entry
//!
//! An entry only counts as present once its `.complete` marker exists. The
//! binary is copied into place through a temporary file in the same directory
//! and renamed, then the marker is written last.

use sopslab_core::{Result, SopslabError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Copies `source` to `entry_dir/target_name` and marks the entry complete
///
/// Anything already in `entry_dir` is discarded first; without a marker it
/// is the leftover of an interrupted install.
pub(crate) fn store_entry(
    source: &Path,
    entry_dir: &Path,
    target_name: &str,
    marker: &Path,
) -> Result<PathBuf> {
    remove_stale(entry_dir, marker)?;

    fs::create_dir_all(entry_dir).map_err(|e| {
        SopslabError::cache(format!("create directory {}", entry_dir.display()), e)
    })?;

    let target = entry_dir.join(target_name);
    atomic_copy(source, &target)?;

    fs::write(marker, "").map_err(|e| {
        SopslabError::cache(format!("write marker {}", marker.display()), e)
    })?;

    debug!("cache entry {} complete", entry_dir.display());
    Ok(entry_dir.to_path_buf())
}

fn remove_stale(entry_dir: &Path, marker: &Path) -> Result<()> {
    for (path, is_dir) in [(entry_dir, true), (marker, false)] {
        let removed = if is_dir {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };

        match removed {
            Ok(()) => debug!("removed stale cache path {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(SopslabError::cache(
                    format!("remove stale {}", path.display()),
                    e,
                ));
            }
        }
    }
    Ok(())
}

/// Copies through a sibling temp file and renames, keeping permissions
fn atomic_copy(from: &Path, to: &Path) -> Result<()> {
    let dest_dir = to.parent().ok_or_else(|| {
        SopslabError::cache(
            format!("get parent directory of {}", to.display()),
            io::Error::other("no parent directory"),
        )
    })?;

    let mut temp_dest = NamedTempFile::new_in(dest_dir).map_err(|e| {
        SopslabError::cache(format!("create temporary file in {}", dest_dir.display()), e)
    })?;

    let mut src_file = fs::File::open(from)
        .map_err(|e| SopslabError::cache(format!("open {}", from.display()), e))?;
    io::copy(&mut src_file, &mut temp_dest).map_err(|e| {
        SopslabError::cache(format!("copy {} into cache", from.display()), e)
    })?;
    drop(src_file);

    let permissions = fs::metadata(from)
        .map_err(|e| SopslabError::cache(format!("read metadata of {}", from.display()), e))?
        .permissions();
    fs::set_permissions(temp_dest.path(), permissions)
        .map_err(|e| SopslabError::cache("set permissions on temporary file", e))?;

    temp_dest
        .as_file()
        .sync_all()
        .map_err(|e| SopslabError::cache("sync temporary file", e))?;

    temp_dest.persist(to).map_err(|e| {
        SopslabError::cache(format!("rename temporary file to {}", to.display()), e.error)
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_store_entry_copies_and_marks() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("download");
        fs::write(&source, "binary").unwrap();

        let entry = temp.path().join("sops").join("3.8.1").join("x64");
        let marker = temp.path().join("sops").join("3.8.1").join("x64.complete");

        let dir = store_entry(&source, &entry, "sops", &marker).unwrap();

        assert_eq!(dir, entry);
        assert_eq!(fs::read_to_string(entry.join("sops")).unwrap(), "binary");
        assert!(marker.exists());
        // source is left for the caller to clean up
        assert!(source.exists());
    }

    #[test]
    fn test_store_entry_replaces_stale_contents() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("download");
        fs::write(&source, "new").unwrap();

        let entry = temp.path().join("entry");
        fs::create_dir_all(entry.join("leftover")).unwrap();
        fs::write(entry.join("sops"), "half-written").unwrap();
        let marker = temp.path().join("entry.complete");

        store_entry(&source, &entry, "sops", &marker).unwrap();

        assert!(!entry.join("leftover").exists());
        assert_eq!(fs::read_to_string(entry.join("sops")).unwrap(), "new");
    }

    #[test]
    #[cfg(unix)]
    fn test_store_entry_preserves_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let source = temp.path().join("download");
        fs::write(&source, "bin").unwrap();
        fs::set_permissions(&source, fs::Permissions::from_mode(0o777)).unwrap();

        let entry = temp.path().join("entry");
        let marker = temp.path().join("entry.complete");
        store_entry(&source, &entry, "sops", &marker).unwrap();

        let mode = fs::metadata(entry.join("sops")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o777);
    }

    #[test]
    fn test_missing_source_is_cache_error() {
        let temp = TempDir::new().unwrap();
        let result = store_entry(
            &temp.path().join("absent"),
            &temp.path().join("entry"),
            "sops",
            &temp.path().join("entry.complete"),
        );
        assert!(matches!(result, Err(SopslabError::Cache { .. })));
        assert!(!temp.path().join("entry.complete").exists());
    }
}
