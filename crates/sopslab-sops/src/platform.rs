//! Platform detection and download URL construction
//!
//! sops publishes one raw executable per platform, named with the OS and CPU
//! identifiers used by the Node.js `os.platform()`/`os.arch()` scheme
//! (`darwin`, `win32`, `x64`, `arm64`, ...) except that x86-64 is spelled
//! `amd64`:
//!
//! ```text
//! sops-v3.8.1.exe            every Windows architecture
//! sops-v3.8.1.linux.amd64    non-Windows x86-64
//! sops-v3.8.1.darwin.arm64   non-Windows, arch identifier passed through
//! ```

use crate::github::{Endpoints, UrlError, append_path_segments};
use sopslab_core::config::consts::tool;
use std::fmt;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Windows,
    MacOS,
    Linux,
    /// Any other target, carrying its identifier
    Other(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86_64,
    Aarch64,
    X86,
    Arm,
    /// Any other target, carrying its identifier
    Other(&'static str),
}

impl Os {
    pub fn detect() -> Os {
        Os::from_target(std::env::consts::OS)
    }

    /// Maps a Rust `target_os` value to the asset naming scheme
    pub fn from_target(target_os: &'static str) -> Os {
        match target_os {
            "windows" => Os::Windows,
            "macos" => Os::MacOS,
            "linux" => Os::Linux,
            "solaris" | "illumos" => Os::Other("sunos"),
            other => Os::Other(other),
        }
    }

    pub fn identifier(&self) -> &'static str {
        match *self {
            Os::Windows => "win32",
            Os::MacOS => "darwin",
            Os::Linux => "linux",
            Os::Other(id) => id,
        }
    }
}

impl Arch {
    pub fn detect() -> Arch {
        Arch::from_target(std::env::consts::ARCH)
    }

    /// Maps a Rust `target_arch` value to the asset naming scheme
    pub fn from_target(target_arch: &'static str) -> Arch {
        match target_arch {
            "x86_64" => Arch::X86_64,
            "aarch64" => Arch::Aarch64,
            "x86" => Arch::X86,
            "arm" => Arch::Arm,
            "powerpc" => Arch::Other("ppc"),
            "powerpc64" => Arch::Other("ppc64"),
            "loongarch64" => Arch::Other("loong64"),
            other => Arch::Other(other),
        }
    }

    pub fn identifier(&self) -> &'static str {
        match *self {
            Arch::X86_64 => "x64",
            Arch::Aarch64 => "arm64",
            Arch::X86 => "ia32",
            Arch::Arm => "arm",
            Arch::Other(id) => id,
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Operating system and CPU architecture of a host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl Platform {
    pub fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// The platform this process runs on
    pub fn current() -> Self {
        Self::new(Os::detect(), Arch::detect())
    }

    pub fn is_windows(&self) -> bool {
        self.os == Os::Windows
    }

    /// Release asset suffix following `sops-<version>.`
    pub fn download_suffix(&self) -> String {
        match (self.os, self.arch) {
            (Os::Windows, _) => "exe".to_string(),
            (os, Arch::X86_64) => format!("{}.amd64", os.identifier()),
            (os, arch) => format!("{}.{}", os.identifier(), arch.identifier()),
        }
    }

    /// `.exe` on Windows, empty elsewhere
    pub fn executable_suffix(&self) -> &'static str {
        if self.is_windows() { ".exe" } else { "" }
    }

    /// File name of the sops executable on this platform
    pub fn executable_name(&self) -> String {
        format!("{}{}", tool::NAME, self.executable_suffix())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

/// Builds the download URL of the sops binary for `version` on `platform`
///
/// `version` is used verbatim (callers pass a resolved, `v`-prefixed version).
/// No network access happens here.
///
/// # Examples
///
/// ```
/// use sopslab_sops::github::Endpoints;
/// use sopslab_sops::platform::{Arch, Os, Platform, download_url};
///
/// let url = download_url(
///     "v3.8.1",
///     &Platform::new(Os::Linux, Arch::X86_64),
///     &Endpoints::github()?,
/// )?;
/// assert_eq!(
///     url.as_str(),
///     "https://github.com/getsops/sops/releases/download/v3.8.1/sops-v3.8.1.linux.amd64"
/// );
/// # Ok::<(), sopslab_sops::github::UrlError>(())
/// ```
pub fn download_url(
    version: &str,
    platform: &Platform,
    endpoints: &Endpoints,
) -> Result<Url, UrlError> {
    let asset = format!("{}-{}.{}", tool::NAME, version, platform.download_suffix());

    let mut url = endpoints.download_base.clone();
    append_path_segments(&mut url, &[version, &asset])?;
    Ok(url)
}
