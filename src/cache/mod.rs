//! Version-pinned dependency cache upkeep.
//!
//! The cache directory holds the downloaded platform binaries plus a marker
//! file recording which release version they came from. When the marker no
//! longer matches the pinned version, every cached artifact is stale and is
//! purged before the marker is rewritten.

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;

use crate::runtime::Runtime;

/// Marker file recording the last fetched release version.
pub const VERSION_FILE: &str = "VERSION";

/// Reads the version marker. `None` means no marker exists yet, which never
/// matches any pinned version.
#[tracing::instrument(skip(runtime))]
pub fn read_version<R: Runtime>(runtime: &R, cache_dir: &Path) -> Result<Option<String>> {
    let marker = cache_dir.join(VERSION_FILE);
    if !runtime.exists(&marker) {
        return Ok(None);
    }
    let contents = runtime
        .read_to_string(&marker)
        .with_context(|| format!("Failed to read version marker {:?}", marker))?;
    Ok(Some(contents.trim().to_string()))
}

/// Removes every direct child of the cache directory, the version marker
/// included. Non-recursive; the cache is flat.
#[tracing::instrument(skip(runtime))]
pub fn purge<R: Runtime>(runtime: &R, cache_dir: &Path) -> Result<()> {
    let entries = runtime
        .read_dir(cache_dir)
        .with_context(|| format!("Failed to list cache directory {:?}", cache_dir))?;
    for entry in entries {
        debug!("Removing stale cache entry {:?}", entry);
        runtime
            .remove_file(&entry)
            .with_context(|| format!("Failed to remove stale cache entry {:?}", entry))?;
    }
    Ok(())
}

/// Reconciles the cache with the pinned version: purges all cached artifacts
/// when the stored marker differs, then rewrites the marker unconditionally.
/// The cache directory must already exist.
#[tracing::instrument(skip(runtime))]
pub fn ensure_version<R: Runtime>(runtime: &R, cache_dir: &Path, pinned: &str) -> Result<()> {
    let stored = read_version(runtime, cache_dir)?;
    if stored.as_deref() != Some(pinned) {
        info!(
            "Cached version {:?} does not match pinned version {:?}, purging cache",
            stored, pinned
        );
        purge(runtime, cache_dir)?;
    }

    let marker = cache_dir.join(VERSION_FILE);
    runtime
        .write(&marker, pinned.as_bytes())
        .with_context(|| format!("Failed to write version marker {:?}", marker))
}
