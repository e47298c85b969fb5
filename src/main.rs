mod cli;

use replaymux::{pipeline, timeline};
use replaymux_common::SessionLayout;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "replaymux=trace,replaymux_fetch=trace,replaymux_av=debug".to_string()
        } else {
            "replaymux=info,replaymux_fetch=info,replaymux_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Run {
            url,
            work_dir,
            frame_rate,
        } => {
            ensure_tools()?;
            let layout = download(&url, &work_dir)?;
            render(&layout, frame_rate)
        }
        Commands::Download { url, work_dir } => {
            ensure_tools()?;
            download(&url, &work_dir)?;
            Ok(())
        }
        Commands::Render {
            session_dir,
            frame_rate,
        } => {
            ensure_tools()?;
            render(&SessionLayout::from_dir(session_dir), frame_rate)
        }
        Commands::CheckTools => check_tools(),
        Commands::Version => {
            println!("replaymux {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Fail before any network or pipeline activity if a required tool is absent.
fn ensure_tools() -> Result<()> {
    for tool in ["ffmpeg", "ffprobe"] {
        replaymux_av::require_tool(tool)
            .with_context(|| format!("required external tool missing: {tool}"))?;
    }
    Ok(())
}

fn check_tools() -> Result<()> {
    let mut all_available = true;

    for info in replaymux_av::check_tools() {
        if info.available {
            println!(
                "{}: {} ({})",
                info.name,
                info.version.as_deref().unwrap_or("unknown version"),
                info.path
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default()
            );
        } else {
            println!("{}: NOT FOUND", info.name);
            all_available = false;
        }
    }

    anyhow::ensure!(all_available, "required external tools are missing");
    Ok(())
}

fn download(url: &str, work_dir: &Path) -> Result<SessionLayout> {
    let rt = tokio::runtime::Runtime::new()?;
    let (id, layout) = rt
        .block_on(replaymux_fetch::resolve_session(url, work_dir))
        .context("resolving session assets")?;
    tracing::info!(session = %id, dir = %layout.root().display(), "session assets resolved");
    Ok(layout)
}

fn render(layout: &SessionLayout, frame_rate_override: Option<u32>) -> Result<()> {
    let metadata = std::fs::read_to_string(layout.metadata_xml())
        .with_context(|| format!("reading {}", layout.metadata_xml().display()))?;
    let duration_secs =
        replaymux_parser::metadata::duration_secs(&metadata).context("parsing session metadata")?;

    let frame_rate = match frame_rate_override {
        Some(rate) => rate,
        None => probe_frame_rate(layout, duration_secs),
    };

    tracing::info!(duration_secs, frame_rate, "rendering session");

    let shapes = std::fs::read_to_string(layout.shapes_svg())
        .with_context(|| format!("reading {}", layout.shapes_svg().display()))?;
    let events = replaymux_parser::shapes::parse(&shapes).context("parsing slide-event log")?;

    let plans = timeline::plan(&events, duration_secs, frame_rate);
    tracing::info!(segments = plans.len(), "timeline planned");

    timeline::materialize(layout, &plans, frame_rate)?;

    let final_path = pipeline::RenderPipeline::new(layout, duration_secs).run()?;
    tracing::info!(output = %final_path.display(), "session rendered");

    Ok(())
}

/// Frame rate of the webcam stream; the slide video is encoded to match so
/// the final merge does not resample. Also cross-checks the stream's own
/// duration against the session metadata, since a mismatch usually means a
/// truncated webcam download.
fn probe_frame_rate(layout: &SessionLayout, metadata_secs: f64) -> u32 {
    match replaymux_av::probe::probe(&layout.webcams()) {
        Ok(info) => {
            if info.duration_disagrees_with(metadata_secs) {
                tracing::warn!(
                    stream_secs = ?info.duration_secs,
                    metadata_secs,
                    "webcam stream duration disagrees with session metadata"
                );
            }
            info.rounded_frame_rate().unwrap_or_else(|| {
                tracing::warn!("webcam stream has no video track, defaulting to 1 fps");
                1
            })
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not probe webcam stream, defaulting to 1 fps");
            1
        }
    }
}
