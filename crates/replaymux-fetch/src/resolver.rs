//! Asset-set resolution.
//!
//! Given a playback link, enumerate and download every resource the
//! session needs. Only the metadata document and the slide-event log are
//! required; everything else is fetched best-effort and its absence
//! degrades functionality later instead of aborting the run.

use crate::{Error, Fetcher, Result};
use replaymux_common::layout::{
    DESKSHARE_CANDIDATES, METADATA_XML, OPTIONAL_ASSETS, SHAPES_SVG, WEBCAMS_CANDIDATES,
};
use replaymux_common::{SessionId, SessionLayout};
use replaymux_parser::shapes;
use reqwest::Url;
use std::path::{Path, PathBuf};

/// Download everything a session needs into `<work_root>/<session id>`.
///
/// Returns once the working directory holds all assets the remote has.
/// Re-running is cheap: every asset already on disk is skipped without a
/// network call.
///
/// # Errors
///
/// Fatal: an invalid playback link, a hard transport failure, an absent or
/// malformed slide-event log or metadata document, or a failed fallback
/// transcode. An absent optional asset is not an error.
pub async fn resolve_session(
    playback_url: &str,
    work_root: &Path,
) -> Result<(SessionId, SessionLayout)> {
    let id = SessionId::from_playback_url(playback_url)?;
    let base_url = session_base_url(playback_url, &id)?;
    let layout = SessionLayout::new(work_root, &id);
    let fetcher = Fetcher::new(base_url, layout.root())?;

    tracing::info!(session = %id, root = %layout.root().display(), "resolving session assets");

    fetcher.fetch_required(METADATA_XML).await?;
    let shapes_path = fetcher.fetch_required(SHAPES_SVG).await?;

    // Slide images referenced by the event log. A missing image only means
    // the events pointing at it cannot be rendered later.
    let shapes_doc = tokio::fs::read_to_string(&shapes_path).await?;
    for href in shapes::image_hrefs(&shapes_doc)? {
        fetcher.fetch(&href).await?;
    }

    for relative in OPTIONAL_ASSETS {
        fetcher.fetch(relative).await?;
    }

    fetch_media_stream(&fetcher, &layout, &WEBCAMS_CANDIDATES).await?;
    fetch_media_stream(&fetcher, &layout, &DESKSHARE_CANDIDATES).await?;

    Ok((id, layout))
}

/// Fetch a media stream under its candidate names in priority order.
///
/// If only the raw (webm) variant exists, transcode it into the
/// deliverable mp4 format so downstream stages have a single name to rely
/// on.
async fn fetch_media_stream(
    fetcher: &Fetcher,
    layout: &SessionLayout,
    candidates: &[&str; 2],
) -> Result<()> {
    if fetcher.fetch(candidates[0]).await?.path().is_some() {
        return Ok(());
    }

    match fetcher.fetch(candidates[1]).await?.path() {
        Some(raw) => {
            let mp4 = layout.asset(candidates[0]);
            if !mp4.exists() {
                transcode_stream(raw.to_path_buf(), mp4).await?;
            }
        }
        None => {
            tracing::warn!(stream = candidates[0], "media stream not available");
        }
    }

    Ok(())
}

async fn transcode_stream(raw: PathBuf, mp4: PathBuf) -> Result<()> {
    tracing::info!(
        raw = %raw.display(),
        mp4 = %mp4.display(),
        "transcoding raw media stream to deliverable format"
    );
    if let Some(parent) = mp4.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::task::spawn_blocking(move || replaymux_av::actions::transcode_to_mp4(&raw, &mp4))
        .await
        .map_err(|e| Error::transfer_failed("media transcode", e.to_string()))??;
    Ok(())
}

fn session_base_url(playback_url: &str, id: &SessionId) -> Result<Url> {
    Url::parse(playback_url)
        .and_then(|u| u.join(&id.asset_root()))
        .map_err(|_| Error::Session(replaymux_common::Error::invalid_url(playback_url)))
}
