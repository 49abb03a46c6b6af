//! Target platform table and validation
//!
//! Maps the build system's architecture and operating-system identifiers to
//! the release artifact to download and the filename it is installed under.

use std::fmt;
use std::str::FromStr;

/// The only architecture the upstream release publishes binaries for.
pub const SUPPORTED_ARCH: &str = "x64";

/// Operating system a build targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOs {
    Windows,
    Linux,
    MacOs,
}

impl TargetOs {
    /// Filename of the release artifact for this OS, as published upstream.
    pub fn release_filename(&self) -> &'static str {
        match self {
            TargetOs::Windows => "ss14_noise-x86_64-pc-windows-msvc.dll",
            TargetOs::Linux => "libss14_noise-x86_64-unknown-linux-gnu.so",
            TargetOs::MacOs => "libss14_noise-x86_64-apple-darwin.dylib",
        }
    }

    /// Filename the artifact is installed under. The target-triple qualifier
    /// is dropped so the build output loads it by its plain library name.
    pub fn install_filename(&self) -> &'static str {
        match self {
            TargetOs::Windows => "ss14_noise.dll",
            TargetOs::Linux => "libss14_noise.so",
            TargetOs::MacOs => "libss14_noise.dylib",
        }
    }
}

impl FromStr for TargetOs {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Windows" => Ok(TargetOs::Windows),
            "Linux" => Ok(TargetOs::Linux),
            "MacOS" => Ok(TargetOs::MacOs),
            other => Err(TargetError::UnsupportedOs(other.to_string())),
        }
    }
}

/// Checks the architecture identifier passed by the build system.
pub fn validate_arch(arch: &str) -> Result<(), TargetError> {
    if arch == SUPPORTED_ARCH {
        Ok(())
    } else {
        Err(TargetError::UnsupportedArch(arch.to_string()))
    }
}

/// Configuration errors reported before any filesystem or network work.
/// Each variant maps to its own process exit code.
#[derive(Debug)]
pub enum TargetError {
    /// The requested architecture has no published binaries.
    UnsupportedArch(String),
    /// The operating-system identifier is not one of the supported three.
    UnsupportedOs(String),
}

impl TargetError {
    pub fn exit_code(&self) -> i32 {
        match self {
            TargetError::UnsupportedArch(_) => 1,
            TargetError::UnsupportedOs(_) => 2,
        }
    }
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetError::UnsupportedArch(arch) => {
                write!(
                    f,
                    "ss14_noise is only published for x64 builds, cannot fetch it for {:?}",
                    arch
                )
            }
            TargetError::UnsupportedOs(os) => {
                write!(f, "Unknown platform target: {}", os)
            }
        }
    }
}

impl std::error::Error for TargetError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_os_from_str() {
        assert_eq!("Windows".parse::<TargetOs>().unwrap(), TargetOs::Windows);
        assert_eq!("Linux".parse::<TargetOs>().unwrap(), TargetOs::Linux);
        assert_eq!("MacOS".parse::<TargetOs>().unwrap(), TargetOs::MacOs);
    }

    #[test]
    fn test_target_os_from_str_rejects_unknown() {
        // Identifiers are exact, including case
        for bad in ["windows", "macos", "FreeBSD", "", "Mac OS"] {
            let err = bad.parse::<TargetOs>().unwrap_err();
            assert!(matches!(err, TargetError::UnsupportedOs(_)), "{:?}", bad);
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn test_release_filenames_carry_target_triple() {
        assert_eq!(
            TargetOs::Windows.release_filename(),
            "ss14_noise-x86_64-pc-windows-msvc.dll"
        );
        assert_eq!(
            TargetOs::Linux.release_filename(),
            "libss14_noise-x86_64-unknown-linux-gnu.so"
        );
        assert_eq!(
            TargetOs::MacOs.release_filename(),
            "libss14_noise-x86_64-apple-darwin.dylib"
        );
    }

    #[test]
    fn test_install_filenames_drop_target_triple() {
        assert_eq!(TargetOs::Windows.install_filename(), "ss14_noise.dll");
        assert_eq!(TargetOs::Linux.install_filename(), "libss14_noise.so");
        assert_eq!(TargetOs::MacOs.install_filename(), "libss14_noise.dylib");
    }

    #[test]
    fn test_validate_arch() {
        assert!(validate_arch("x64").is_ok());

        for bad in ["x86", "arm64", "X64", ""] {
            let err = validate_arch(bad).unwrap_err();
            assert!(matches!(err, TargetError::UnsupportedArch(_)), "{:?}", bad);
            assert_eq!(err.exit_code(), 1);
        }
    }

    #[test]
    fn test_error_messages_name_the_offending_value() {
        let err = validate_arch("arm64").unwrap_err();
        assert!(err.to_string().contains("arm64"));

        let err = "BeOS".parse::<TargetOs>().unwrap_err();
        assert!(err.to_string().contains("BeOS"));
    }
}
