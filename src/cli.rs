use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "replaymux")]
#[command(author, version, about = "Reconstructs a recorded session into a single video")]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download a session and render it to a single video
    Run {
        /// Playback URL of the recorded session
        url: String,

        /// Directory to place session working directories in
        #[arg(long, default_value = ".")]
        work_dir: PathBuf,

        /// Override the slide video frame rate instead of probing the
        /// webcam stream
        #[arg(long)]
        frame_rate: Option<u32>,
    },

    /// Download session assets without rendering
    Download {
        /// Playback URL of the recorded session
        url: String,

        /// Directory to place session working directories in
        #[arg(long, default_value = ".")]
        work_dir: PathBuf,
    },

    /// Render an already-downloaded session directory
    Render {
        /// Session working directory (as created by download)
        session_dir: PathBuf,

        /// Override the slide video frame rate instead of probing the
        /// webcam stream
        #[arg(long)]
        frame_rate: Option<u32>,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Display version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_args_are_required() {
        assert!(Cli::try_parse_from(["replaymux", "run"]).is_err());
        assert!(Cli::try_parse_from(["replaymux", "download"]).is_err());
        assert!(Cli::try_parse_from(["replaymux", "render"]).is_err());
    }
}
