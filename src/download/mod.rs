use crate::http::HttpClient;
use crate::runtime::Runtime;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Downloads a release artifact from a URL to the given path.
#[tracing::instrument(skip(runtime, http_client))]
pub async fn download_file<R: Runtime>(
    runtime: &R,
    url: &str,
    path: &Path,
    http_client: &HttpClient,
) -> Result<()> {
    info!("Downloading {} to {:?}...", url, path);

    let path = path.to_path_buf();
    http_client
        .download_file(url, || {
            runtime
                .create_file(&path)
                .with_context(|| format!("Failed to create file at {:?}", path))
        })
        .await?;

    info!("Download complete.");
    Ok(())
}
