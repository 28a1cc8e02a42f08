use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (default: `$XDG_CONFIG_HOME/beamshot/config.kdl`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Logical width of the simulated display.
    #[arg(long, default_value_t = 1080)]
    pub width: u32,

    /// Logical height of the simulated display.
    #[arg(long, default_value_t = 1920)]
    pub height: u32,

    /// Display rotation in degrees (0, 90, 180 or 270).
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub rotation: i32,

    /// How the ritual ends.
    #[arg(long, value_enum, default_value_t = Outcome::Send)]
    pub outcome: Outcome,

    /// Deliver a confirming touch this many milliseconds after showing.
    #[arg(long)]
    pub touch_after_ms: Option<u64>,

    /// Frame interval of the simulated host.
    #[arg(long, default_value_t = 16)]
    pub frame_ms: u64,

    /// Simulate a display that cannot be captured.
    #[arg(long)]
    pub capture_unavailable: bool,

    /// Write the captured screenshot to this PNG file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Outcome {
    /// Run the slow shrink, then the success sequence.
    Send,
    /// Scale back up without sending.
    Finish,
    /// Dismiss halfway through the slow shrink.
    Abort,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_args() {
        let cli = Cli::try_parse_from([
            "beamshot",
            "--rotation",
            "90",
            "--outcome",
            "abort",
            "--touch-after-ms",
            "100",
        ])
        .unwrap();
        assert_eq!(cli.rotation, 90);
        assert_eq!(cli.outcome, Outcome::Abort);
        assert_eq!(cli.touch_after_ms, Some(100));
        assert_eq!((cli.width, cli.height), (1080, 1920));
    }
}
