//! Execute permissions for downloaded binaries

use std::fs;
use std::io;
use std::path::Path;

/// Mode applied to cached binaries and the directories holding them
#[cfg(unix)]
pub const FULL_ACCESS_MODE: u32 = 0o777;

/// Grants read, write and execute to owner, group and other
///
/// Windows has no execute bit; there the path only has to exist.
#[cfg(unix)]
pub fn make_fully_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(FULL_ACCESS_MODE))
}

#[cfg(not(unix))]
pub fn make_fully_executable(path: &Path) -> io::Result<()> {
    fs::metadata(path).map(|_| ())
}

/// Whether anyone may execute `path`
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    #[cfg(unix)]
    fn test_make_fully_executable_sets_0777() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let file = temp.path().join("sops");
        fs::write(&file, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o600)).unwrap();
        assert!(!is_executable(&file));

        make_fully_executable(&file).unwrap();

        let mode = fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o777);
        assert!(is_executable(&file));
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(make_fully_executable(&temp.path().join("absent")).is_err());
    }
}
