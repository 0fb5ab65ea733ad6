//! Filesystem and HTTP body fixtures

use std::fs;
use std::path::{Path, PathBuf};

/// Writes a small shell script standing in for the sops binary
///
/// Parent directories are created. On Unix the file is made executable.
pub fn write_fake_binary(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, "#!/bin/sh\necho 'sops 0.0.0-fake'\n")?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }

    Ok(())
}

/// Creates a complete cache entry `<root>/sops/<cache_version>/<arch>/<name>`
///
/// `cache_version` is the on-disk key (`3.8.1`, not `v3.8.1`). Returns the
/// path of the binary.
pub fn seed_cache_entry(
    root: &Path,
    cache_version: &str,
    arch: &str,
    name: &str,
) -> std::io::Result<PathBuf> {
    let version_dir = root.join("sops").join(cache_version);
    let binary = version_dir.join(arch).join(name);
    write_fake_binary(&binary)?;
    fs::write(version_dir.join(format!("{}.complete", arch)), "")?;
    Ok(binary)
}

/// Release index body listing `tags` in order
pub fn releases_json(tags: &[&str]) -> String {
    let records: Vec<String> = tags
        .iter()
        .map(|tag| format!(r#"{{"tag_name":"{}","draft":false}}"#, tag))
        .collect();
    format!("[{}]", records.join(","))
}
