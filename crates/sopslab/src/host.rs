//! Runner host integration
//!
//! CI runners hand a step two files: `GITHUB_OUTPUT` collects `name=value`
//! outputs and `GITHUB_PATH` collects directories to prepend to `PATH` for
//! later steps. Outside a runner neither is set.

use sopslab_core::config::consts::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use crate::output::print_text;

/// Publishes a step output
///
/// Appends `name=value` to the `GITHUB_OUTPUT` file, or prints it to stdout
/// when the variable is unset.
pub fn set_output(name: &str, value: &str) -> io::Result<()> {
    let line = format!("{}={}", name, value);

    match std::env::var_os(env::GITHUB_OUTPUT).filter(|v| !v.is_empty()) {
        Some(file) => append_line(Path::new(&file), &line),
        None => print_text(&line),
    }
}

/// Adds `dir` to the `PATH` of later steps
///
/// Nothing happens when the current `PATH` already starts with `dir`.
/// Returns whether the directory was recorded.
pub fn add_path(dir: &Path) -> io::Result<bool> {
    let current = std::env::var(env::PATH).unwrap_or_default();
    if current.starts_with(&*dir.to_string_lossy()) {
        return Ok(false);
    }

    let Some(file) = std::env::var_os(env::GITHUB_PATH).filter(|v| !v.is_empty()) else {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not set", env::GITHUB_PATH),
        ));
    };

    append_line(Path::new(&file), &dir.to_string_lossy())?;
    Ok(true)
}

fn append_line(file: &Path, line: &str) -> io::Result<()> {
    let mut f = OpenOptions::new().create(true).append(true).open(file)?;
    writeln!(f, "{}", line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sopslab_testkit::with_isolated_cache_env;
    use std::fs;

    #[test]
    fn test_set_output_appends_to_file() {
        with_isolated_cache_env(|isolated| {
            fs::write(&isolated.output_file, "other=1\n").unwrap();

            set_output("sops-path", "/cache/sops/3.8.1/x64/sops").unwrap();

            assert_eq!(
                fs::read_to_string(&isolated.output_file).unwrap(),
                "other=1\nsops-path=/cache/sops/3.8.1/x64/sops\n"
            );
        });
    }

    #[test]
    fn test_add_path_records_directory() {
        with_isolated_cache_env(|isolated| {
            let dir = isolated.cache_dir.join("sops").join("3.8.1").join("x64");

            assert!(add_path(&dir).unwrap());
            assert_eq!(
                fs::read_to_string(&isolated.path_file).unwrap(),
                format!("{}\n", dir.display())
            );
        });
    }

    #[test]
    fn test_add_path_skips_when_path_starts_with_dir() {
        with_isolated_cache_env(|isolated| {
            let original = std::env::var("PATH").ok();
            let dir = isolated.cache_dir.clone();
            // SAFETY: ENV_LOCK is held by with_isolated_cache_env
            unsafe {
                std::env::set_var("PATH", format!("{}:/usr/bin", dir.display()));
            }

            let added = add_path(&dir);

            unsafe {
                match original {
                    Some(p) => std::env::set_var("PATH", p),
                    None => std::env::remove_var("PATH"),
                }
            }
            assert!(!added.unwrap());
            assert_eq!(fs::read_to_string(&isolated.path_file).unwrap(), "");
        });
    }

    #[test]
    fn test_add_path_without_runner_file_is_error() {
        with_isolated_cache_env(|isolated| {
            // SAFETY: ENV_LOCK is held by with_isolated_cache_env
            unsafe {
                std::env::remove_var("GITHUB_PATH");
            }
            assert!(add_path(&isolated.cache_dir.join("bin")).is_err());
        });
    }
}
