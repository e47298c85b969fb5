//! Timeline reconstruction.
//!
//! Converts the slide-event log into one encoded video segment per event:
//! [`plan`] does the pure interval→frame arithmetic, [`materialize`] turns
//! each plan into a file on disk through the external engine. A segment
//! whose output file already exists is skipped outright, which is what
//! makes a crashed run resumable by simply re-running the program.

mod plan;

pub use plan::{plan, SegmentPlan, SegmentSource};

use anyhow::{Context, Result};
use replaymux_common::SessionLayout;
use std::fs;

/// Materialize every planned segment under `output-video/slides/`.
///
/// Still segments stage one copy of the slide image per frame index in a
/// temporary directory and encode it as an image sequence whose numbering
/// starts at the segment's global frame index. Deskshare segments are a
/// single time-domain extraction from the screen-share stream.
pub fn materialize(layout: &SessionLayout, plans: &[SegmentPlan], frame_rate: u32) -> Result<()> {
    let slides_dir = layout.slides_dir();
    fs::create_dir_all(&slides_dir)
        .with_context(|| format!("creating {}", slides_dir.display()))?;

    for plan in plans {
        let output = layout.segment(&plan.label);
        if output.exists() {
            tracing::info!(label = %plan.label, "segment already encoded, skipping");
            continue;
        }

        match &plan.source {
            SegmentSource::Deskshare => {
                let stream = layout.deskshare();
                if !stream.exists() {
                    anyhow::bail!(
                        "event {} needs the screen-share stream, but {} is missing",
                        plan.label,
                        stream.display()
                    );
                }
                tracing::info!(
                    label = %plan.label,
                    start = plan.start_secs,
                    end = plan.end_secs,
                    "building deskshare segment"
                );
                replaymux_av::actions::extract_segment(
                    &stream,
                    plan.start_secs,
                    plan.end_secs - plan.start_secs,
                    &output,
                )
                .with_context(|| format!("encoding deskshare segment {}", plan.label))?;
            }
            SegmentSource::Still(href) => {
                let image = layout.asset(href);
                if !image.exists() {
                    // The resolver tolerates images absent on the remote;
                    // events pointing at one simply cannot be rendered.
                    tracing::warn!(label = %plan.label, image = %href, "slide image missing, segment skipped");
                    continue;
                }
                tracing::info!(
                    label = %plan.label,
                    frames = plan.frame_count(),
                    "building slide segment"
                );
                encode_still(layout, plan, &image, frame_rate, &output)?;
            }
        }
    }

    Ok(())
}

fn encode_still(
    layout: &SessionLayout,
    plan: &SegmentPlan,
    image: &std::path::Path,
    frame_rate: u32,
    output: &std::path::Path,
) -> Result<()> {
    let staging = tempfile::Builder::new()
        .prefix(&format!("{}-frames-", plan.label))
        .tempdir_in(layout.slides_dir())
        .context("creating frame staging directory")?;

    for index in plan.frame_start..plan.frame_end {
        let frame = staging.path().join(format!("image{index}.png"));
        fs::copy(image, &frame)
            .with_context(|| format!("staging frame {}", frame.display()))?;
    }

    replaymux_av::actions::encode_image_sequence(
        staging.path(),
        plan.frame_start,
        frame_rate,
        output,
    )
    .with_context(|| format!("encoding slide segment {}", plan.label))?;

    // staging dir removed on drop
    Ok(())
}
