//! Application orchestration and command routing.
//!
//! Handles command-line argument parsing and delegates to appropriate command handlers.

use crate::commands::{self, OutputFormat, RenderRequest};
use crate::logging;
use crate::waveform::RenderMode;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use std::process;

/// Waveform bars with drag-to-seek and a playback colour sweep
#[derive(Parser)]
#[command(name = "wavebars")]
#[command(version)]
#[command(about = "Render an audio amplitude envelope as a row of bars")]
#[command(long_about = "Render an audio amplitude envelope as a row of bars.\n\nSamples are read from a JSON array of numbers in [0, 1], or from an object\nwith a \"data\" array. Use '-' to read from stdin.\n\nEXAMPLES:\n    # Browse a waveform, drag across it to seek\n    $ wavebars view track.json\n    \n    # Smooth gradient mode with 60 bars\n    $ wavebars view track.json --mode smooth --bars 60\n    \n    # Render a frame at 40% progress to SVG\n    $ wavebars render track.json -W 800 -H 120 --progress 0.4 --format svg -o frame.svg")]
#[command(
    after_help = "CONFIGURATION:\n    Config file:        ~/.config/wavebars/wavebars.toml\n    Logs:               ~/.local/state/wavebars/wavebars.log.*"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the waveform in the terminal
    ///
    /// Drag with the mouse to preview a seek, release to commit it.
    /// Space plays/pauses a simulated playhead, Left/Right skip, q quits.
    #[command(visible_alias = "v")]
    View {
        /// JSON sample file, or '-' for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Rendering mode (overrides the config file)
        #[arg(short, long, value_name = "MODE")]
        mode: Option<RenderMode>,

        /// Number of bars (overrides the config file)
        #[arg(short, long, value_name = "N")]
        bars: Option<usize>,

        /// Seconds for the simulated playhead to cross the waveform
        #[arg(short, long, value_name = "SECS")]
        duration: Option<f64>,
    },

    /// Render a single frame headlessly
    ///
    /// Prints the draw commands as JSON, or an SVG document.
    #[command(visible_alias = "r")]
    Render {
        /// JSON sample file, or '-' for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Surface width in pixels
        #[arg(short = 'W', long, default_value_t = 800.0)]
        width: f64,

        /// Surface height in pixels
        #[arg(short = 'H', long, default_value_t = 120.0)]
        height: f64,

        /// Played fraction of the track
        #[arg(short, long, default_value_t = 0.0)]
        progress: f64,

        /// Seek preview position, as during a drag
        #[arg(long, value_name = "FRACTION")]
        hover: Option<f64>,

        /// Rendering mode (overrides the config file)
        #[arg(short, long, value_name = "MODE")]
        mode: Option<RenderMode>,

        /// Number of bars (overrides the config file)
        #[arg(short, long, value_name = "N")]
        bars: Option<usize>,

        /// Output encoding
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Open configuration file in your preferred editor
    ///
    /// Creates the file with default values first if it does not exist.
    /// Uses $EDITOR environment variable or falls back to nano/vi.
    #[command(visible_alias = "c")]
    Config,

    /// Show recent log entries from the application
    ///
    /// Display the last 50 lines of the most recent log file.
    Logs,

    /// Generate shell completion script
    ///
    /// Examples:
    ///   wavebars completions bash > wavebars.bash
    ///   wavebars completions zsh > _wavebars
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Runs the main application based on command-line arguments.
///
/// # Errors
/// - If logging initialization fails
/// - If command execution fails
pub fn run() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Commands that don't need logging
    match &cli.command {
        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "wavebars", &mut io::stdout());
            return Ok(());
        }
        Commands::Logs => {
            return match commands::handle_logs() {
                Ok(()) => Ok(()),
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            };
        }
        _ => {}
    }

    logging::init_logging()?;

    match cli.command {
        Commands::View {
            file,
            mode,
            bars,
            duration,
        } => {
            commands::handle_view(file, mode, bars, duration)?;
        }
        Commands::Render {
            file,
            width,
            height,
            progress,
            hover,
            mode,
            bars,
            format,
            output,
        } => {
            commands::handle_render(RenderRequest {
                file,
                width,
                height,
                progress,
                hover,
                mode,
                bar_count: bars,
                format,
                output,
            })?;
        }
        Commands::Config => {
            commands::handle_config()?;
        }
        Commands::Completions { .. } | Commands::Logs => {
            unreachable!("These commands are handled earlier")
        }
    }

    Ok(())
}
