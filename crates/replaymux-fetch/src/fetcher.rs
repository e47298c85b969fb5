//! Resumable single-resource fetcher.
//!
//! One [`Fetcher`] serves one session: it holds the session's remote asset
//! root and local working directory and mirrors remote relative paths onto
//! local ones. The local filesystem is the only cache — an asset whose
//! final path exists is complete and is never probed or re-fetched.
//!
//! In-flight transfers write to `<name>.part` and are renamed into place
//! only once the declared length has been reached, so a crashed or torn
//! transfer can never masquerade as a complete asset.

use crate::{Error, Result};
use reqwest::{StatusCode, Url};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWriteExt, BufWriter};

/// User agent sent with every request.
const USER_AGENT: &str = concat!("replaymux/", env!("CARGO_PKG_VERSION"));

/// Write buffer size; bounds peak memory regardless of asset size.
const TRANSFER_BUF_SIZE: usize = 64 * 1024;

/// How a [`Fetcher::fetch`] call concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The asset was already on disk; no network traffic happened.
    Cached(PathBuf),
    /// The asset was downloaded (fresh or resumed) to this path.
    Fetched(PathBuf),
    /// The remote does not have this asset. Normal for optional assets.
    NotFound,
}

impl FetchOutcome {
    /// Local path of the asset, if it is available.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Cached(p) | Self::Fetched(p) => Some(p),
            Self::NotFound => None,
        }
    }
}

/// Fetches remote resources into a session working directory.
pub struct Fetcher {
    client: reqwest::Client,
    base_url: Url,
    out_dir: PathBuf,
}

impl Fetcher {
    /// Create a fetcher for the given asset root and local directory.
    pub fn new<P: AsRef<Path>>(base_url: Url, out_dir: P) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url,
            out_dir: out_dir.as_ref().to_path_buf(),
        })
    }

    /// Local directory assets are mirrored into.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Fetch one resource by its path relative to the asset root.
    ///
    /// Short-circuits to [`FetchOutcome::Cached`] when the destination
    /// already exists. Otherwise probes with HEAD first: a non-success
    /// status is [`FetchOutcome::NotFound`], which callers of optional
    /// assets simply tolerate. Hard transport failures are errors.
    pub async fn fetch(&self, relative: &str) -> Result<FetchOutcome> {
        let dest = self.out_dir.join(relative);
        if dest.exists() {
            tracing::debug!(path = %dest.display(), "asset already present");
            return Ok(FetchOutcome::Cached(dest));
        }

        let url = self.join(relative)?;

        let probe = self.client.head(url.clone()).send().await?;
        if !probe.status().is_success() {
            tracing::debug!(%url, status = %probe.status(), "asset not available");
            return Ok(FetchOutcome::NotFound);
        }
        let declared = content_length_header(&probe);

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tracing::info!(%url, "downloading");
        self.transfer(relative, &url, &dest, declared).await?;

        Ok(FetchOutcome::Fetched(dest))
    }

    /// Fetch a resource the pipeline cannot run without.
    pub async fn fetch_required(&self, relative: &str) -> Result<PathBuf> {
        match self.fetch(relative).await? {
            FetchOutcome::Cached(path) | FetchOutcome::Fetched(path) => Ok(path),
            FetchOutcome::NotFound => Err(Error::required_missing(relative)),
        }
    }

    fn join(&self, relative: &str) -> Result<Url> {
        self.base_url.join(relative).map_err(|e| Error::BadAssetPath {
            path: relative.to_string(),
            message: e.to_string(),
        })
    }

    /// Stream the resource body to `<dest>.part`, resuming with byte-range
    /// requests until the declared total length is reached, then move the
    /// finished file into place.
    async fn transfer(
        &self,
        relative: &str,
        url: &Url,
        dest: &Path,
        declared: Option<u64>,
    ) -> Result<()> {
        let part = part_path(dest);
        let mut written = match tokio::fs::metadata(&part).await {
            Ok(meta) => meta.len(),
            Err(_) => 0,
        };

        // A prior run can die between writing the last byte and the rename
        // below. Finalize such a part here; a ranged GET starting at the
        // very end of the resource would only draw a 416.
        if let Some(len) = declared {
            if len > 0 && written >= len {
                tracing::info!(path = %dest.display(), "partial file already complete");
                tokio::fs::rename(&part, dest).await?;
                return Ok(());
            }
        }

        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&part)
            .await?;
        let mut writer = BufWriter::with_capacity(TRANSFER_BUF_SIZE, file);
        let mut total: Option<u64> = None;

        loop {
            let mut request = self.client.get(url.clone());
            if written > 0 {
                request = request.header(reqwest::header::RANGE, format!("bytes={written}-"));
            }
            let mut response = request.send().await?;
            let status = response.status();

            if written > 0 && status == StatusCode::OK {
                // Server ignored the range request and replied with the
                // whole resource; restart using this response.
                tracing::warn!(%url, "range request ignored, restarting transfer");
                writer.flush().await?;
                writer.get_mut().set_len(0).await?;
                written = 0;
                total = None;
            } else if !status.is_success() {
                return Err(Error::transfer_failed(
                    relative,
                    format!("HTTP status {status}"),
                ));
            }

            if total.is_none() {
                total = response.content_length().map(|remaining| written + remaining);
            }

            let pass_start = written;
            loop {
                match response.chunk().await {
                    Ok(Some(chunk)) => {
                        writer.write_all(&chunk).await?;
                        written += chunk.len() as u64;
                    }
                    Ok(None) => break,
                    // A torn connection mid-body is recoverable as long as
                    // the total length is known; the next pass picks up at
                    // the current offset.
                    Err(e) if total.is_some() => {
                        tracing::warn!(%url, error = %e, "transfer interrupted");
                        break;
                    }
                    Err(e) => return Err(e.into()),
                }
            }

            match total {
                // No declared length: whatever arrived in one pass is the file.
                None => break,
                Some(t) if written >= t => break,
                Some(t) if written == pass_start => {
                    return Err(Error::transfer_failed(
                        relative,
                        format!("no progress resuming at byte {written} of {t}"),
                    ));
                }
                Some(t) => {
                    tracing::info!(%url, written, total = t, "continuing transfer");
                }
            }
        }

        writer.flush().await?;
        drop(writer);
        tokio::fs::rename(&part, dest).await?;

        Ok(())
    }
}

// reqwest reports a zero body size hint for HEAD responses, so the declared
// length has to come from the header itself.
fn content_length_header(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_path() {
        assert_eq!(
            part_path(Path::new("work/m/video/webcams.mp4")),
            PathBuf::from("work/m/video/webcams.mp4.part")
        );
    }

    #[test]
    fn test_outcome_path() {
        let p = PathBuf::from("x");
        assert_eq!(FetchOutcome::Cached(p.clone()).path(), Some(p.as_path()));
        assert_eq!(FetchOutcome::Fetched(p.clone()).path(), Some(p.as_path()));
        assert_eq!(FetchOutcome::NotFound.path(), None);
    }
}
