//! CLI definitions for MediaWall.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// MediaWall CLI.
#[derive(Parser)]
#[command(name = "mediawall")]
#[command(about = "Four-window browser media wall")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/mediawall.toml", global = true, env = "MEDIAWALL_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List preset names
    Presets,

    /// Print the planned window rectangles
    Plan {
        /// Screen width (default: detected)
        #[arg(long)]
        width: Option<u32>,

        /// Screen height (default: detected)
        #[arg(long)]
        height: Option<u32>,
    },

    /// Show a preset and keep the wall up until Ctrl-C
    Show {
        /// Preset name
        preset: String,
    },

    /// Read wall commands from stdin
    Console,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["mediawall", "show", "christmas"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config/mediawall.toml"));
        assert!(matches!(cli.command, Commands::Show { preset } if preset == "christmas"));
    }

    #[test]
    fn test_parse_plan_with_config() {
        let cli = Cli::try_parse_from([
            "mediawall", "plan", "--width", "2560", "--height", "1440", "-c", "wall.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("wall.toml"));
        assert!(matches!(
            cli.command,
            Commands::Plan { width: Some(2560), height: Some(1440) }
        ));
    }

    #[test]
    fn test_command_required() {
        assert!(Cli::try_parse_from(["mediawall"]).is_err());
    }
}
