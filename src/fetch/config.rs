use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::runtime::Runtime;

/// Release version this build of the tool fetches.
pub const CURRENT_VERSION: &str = "noise_0.0.1";

/// Fixed release root every artifact URL starts with.
pub const RELEASES_ROOT: &str =
    "https://github.com/space-wizards/space-station-14/releases/download";

/// Dependency cache subfolder under `<repo root>/Dependencies/`.
const CACHE_SUBDIR: &str = "ss14_noise";

/// Immutable configuration for one fetch run.
///
/// Production code builds this via [`FetchConfig::resolve`]; tests construct
/// it directly to inject a different pinned version, release root, or cache
/// location.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Pinned release version.
    pub version: String,
    /// Base URL artifact URLs are formed from.
    pub release_root: String,
    /// Directory holding the version marker and cached binaries.
    pub cache_dir: PathBuf,
}

impl FetchConfig {
    /// Resolves the production configuration. The tool is checked in under
    /// the repository's `Tools/` directory, so the repository root is two
    /// levels up from the resolved executable, and the cache lives at
    /// `<repo root>/Dependencies/ss14_noise`.
    pub fn resolve<R: Runtime>(runtime: &R) -> Result<Self> {
        let exe = runtime
            .current_exe()
            .context("Failed to locate the running executable")?;
        let exe = runtime.canonicalize(&exe)?;
        let repo_root = exe
            .parent()
            .and_then(|dir| dir.parent())
            .with_context(|| format!("Executable path {:?} has no grandparent directory", exe))?;

        Ok(Self {
            version: CURRENT_VERSION.to_string(),
            release_root: RELEASES_ROOT.to_string(),
            cache_dir: repo_root.join("Dependencies").join(CACHE_SUBDIR),
        })
    }

    /// URL of the artifact named `filename` under the pinned version.
    pub fn artifact_url(&self, filename: &str) -> String {
        format!("{}/{}/{}", self.release_root, self.version, filename)
    }
}
