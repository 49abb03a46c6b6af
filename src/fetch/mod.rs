//! The fetch sequence: cache upkeep, conditional download, staleness copy.

mod config;

pub use config::{CURRENT_VERSION, FetchConfig, RELEASES_ROOT};

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;

use crate::cache;
use crate::download::download_file;
use crate::http::HttpClient;
use crate::runtime::Runtime;
use crate::target::TargetOs;

/// Ensures the platform artifact is cached and installed into `dest_dir`.
///
/// Steps run in order: create the cache directory, reconcile the version
/// marker (purging stale artifacts on a version bump), download the artifact
/// if it is not cached, then copy it into the destination unless the
/// destination copy is already at least as new as the cache entry. A second
/// run with unchanged state performs no network request and no copy.
#[tracing::instrument(skip(runtime, config, http_client))]
pub async fn fetch<R: Runtime>(
    runtime: &R,
    config: &FetchConfig,
    os: TargetOs,
    dest_dir: &Path,
    http_client: &HttpClient,
) -> Result<()> {
    runtime
        .create_dir_all(&config.cache_dir)
        .with_context(|| format!("Failed to create cache directory {:?}", config.cache_dir))?;

    cache::ensure_version(runtime, &config.cache_dir, &config.version)?;

    let cache_path = config.cache_dir.join(os.release_filename());
    if runtime.exists(&cache_path) {
        debug!("Using cached artifact {:?}", cache_path);
    } else {
        let url = config.artifact_url(os.release_filename());
        download_file(runtime, &url, &cache_path, http_client).await?;
    }

    let dest_path = dest_dir.join(os.install_filename());
    install_if_stale(runtime, &cache_path, &dest_path)
}

/// Copies the cache entry to the destination when the destination is missing
/// or strictly older. The copy mirrors the source's modification time, so an
/// unchanged cache entry leaves the destination untouched on later runs.
fn install_if_stale<R: Runtime>(runtime: &R, cache_path: &Path, dest_path: &Path) -> Result<()> {
    if runtime.exists(dest_path) {
        let cached = runtime.modified(cache_path)?;
        let installed = runtime.modified(dest_path)?;
        if cached <= installed {
            debug!("Destination {:?} is up to date, skipping copy", dest_path);
            return Ok(());
        }
    }

    info!("Installing {:?} to {:?}", cache_path, dest_path);
    runtime
        .copy(cache_path, dest_path)
        .with_context(|| format!("Failed to copy {:?} to {:?}", cache_path, dest_path))?;

    let mtime = runtime.modified(cache_path)?;
    runtime.set_modified(dest_path, mtime)?;
    Ok(())
}
