//! Locating the executable inside a cache entry
//!
//! A cache entry normally holds the binary at its top level, but entries
//! written by other tools may nest it. The finder walks the entry depth-first
//! and takes the first file whose name matches exactly.
//!
//! Sibling order is whatever the filesystem returns from `readdir`; it is not
//! sorted. With several nested copies of the executable the chosen one is the
//! first the walk reaches, which may differ between filesystems.

use crate::permissions::make_fully_executable;
use sopslab_core::{Result, SopslabError};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Lazily yields every file under `root` named exactly `executable_name`
///
/// Symlinks are followed, so a linked binary counts as a file. Directories
/// never match even when their name does.
pub fn find_executables<'a>(
    root: &'a Path,
    executable_name: &'a str,
) -> impl Iterator<Item = walkdir::Result<PathBuf>> + 'a {
    let target = OsStr::new(executable_name);

    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    return None;
                }
                debug!("{}", entry.path().display());
                (entry.file_name() == target).then(|| Ok(entry.into_path()))
            }
            Err(e) => Some(Err(e)),
        })
}

/// Returns the path of the executable below `root`, made executable
///
/// `root` itself is opened up to full permissions first.
///
/// # Errors
///
/// - `ExecutableNotFound` naming `root` when no file matches
/// - `Cache` when `root` cannot be walked or permissions cannot be set
pub fn locate(root: &Path, executable_name: &str) -> Result<PathBuf> {
    make_fully_executable(root)
        .map_err(|e| SopslabError::cache(format!("set permissions on {}", root.display()), e))?;

    let found = find_executables(root, executable_name)
        .next()
        .transpose()
        .map_err(|e| {
            SopslabError::cache(
                format!("walk directory {}", root.display()),
                io::Error::other(e),
            )
        })?;

    let Some(path) = found else {
        return Err(SopslabError::ExecutableNotFound {
            name: executable_name.to_string(),
            dir: root.to_path_buf(),
        });
    };

    make_fully_executable(&path)
        .map_err(|e| SopslabError::cache(format!("set permissions on {}", path.display()), e))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::is_executable;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_tree_names_directory() {
        let temp = TempDir::new().unwrap();

        let err = locate(temp.path(), "sops").unwrap_err();
        match &err {
            SopslabError::ExecutableNotFound { dir, name } => {
                assert_eq!(dir, temp.path());
                assert_eq!(name, "sops");
            }
            other => panic!("expected ExecutableNotFound, got {:?}", other),
        }
        assert!(err.to_string().contains(&temp.path().display().to_string()));
    }

    #[test]
    fn test_top_level_binary() {
        let temp = TempDir::new().unwrap();
        let binary = temp.path().join("sops");
        fs::write(&binary, "bin").unwrap();

        let found = locate(temp.path(), "sops").unwrap();
        assert_eq!(found, binary);
        assert!(is_executable(&found));
    }

    #[test]
    fn test_nested_copies_return_one_of_them() {
        let temp = TempDir::new().unwrap();
        let deep = temp.path().join("a").join("b");
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join("sops"), "deep").unwrap();
        fs::write(temp.path().join("a").join("sops"), "shallow").unwrap();

        let found = locate(temp.path(), "sops").unwrap();
        let candidates = [deep.join("sops"), temp.path().join("a").join("sops")];
        assert!(candidates.contains(&found), "unexpected match {:?}", found);
        assert!(is_executable(&found));

        // Same tree, same walk: the choice is stable across calls
        assert_eq!(locate(temp.path(), "sops").unwrap(), found);
    }

    #[test]
    fn test_directory_with_matching_name_is_skipped() {
        let temp = TempDir::new().unwrap();
        let dir_named_sops = temp.path().join("sops");
        fs::create_dir_all(&dir_named_sops).unwrap();
        fs::write(dir_named_sops.join("sops"), "bin").unwrap();

        let found = locate(temp.path(), "sops").unwrap();
        assert_eq!(found, dir_named_sops.join("sops"));
    }

    #[test]
    fn test_name_must_match_exactly() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("sops.exe.bak"), "x").unwrap();
        fs::write(temp.path().join("sops-v3.8.1.linux.amd64"), "x").unwrap();

        assert!(matches!(
            locate(temp.path(), "sops"),
            Err(SopslabError::ExecutableNotFound { .. })
        ));
    }

    #[test]
    fn test_find_executables_yields_every_match() {
        let temp = TempDir::new().unwrap();
        for dir in ["x", "y/z"] {
            let d = temp.path().join(dir);
            fs::create_dir_all(&d).unwrap();
            fs::write(d.join("sops"), "bin").unwrap();
        }
        fs::write(temp.path().join("other"), "x").unwrap();

        let matches: Vec<_> = find_executables(temp.path(), "sops")
            .collect::<walkdir::Result<_>>()
            .unwrap();
        assert_eq!(matches.len(), 2);
    }

    #[test]
    #[cfg(unix)]
    fn test_root_permissions_opened_up() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let root = temp.path().join("entry");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("sops"), "bin").unwrap();
        fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();

        locate(&root, "sops").unwrap();

        let mode = fs::metadata(&root).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o777);
    }

    #[test]
    fn test_missing_root_is_cache_error() {
        let temp = TempDir::new().unwrap();
        let result = locate(&temp.path().join("missing"), "sops");
        assert!(matches!(result, Err(SopslabError::Cache { .. })));
    }
}
