//! Headless render command.
//!
//! Prints the draw commands for a single frame, either as JSON or as an SVG
//! document, so frames can be inspected or embedded without a terminal.

use crate::config::WavebarsConfig;
use crate::controller::WaveformBars;
use crate::samples;
use crate::waveform::{DrawCommand, RenderMode};
use anyhow::anyhow;
use clap::ValueEnum;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

/// Output encoding for a rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Array of draw commands
    Json,
    /// Standalone SVG with one rect per draw command
    Svg,
}

/// Frame parameters collected from the command line.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub file: PathBuf,
    pub width: f64,
    pub height: f64,
    pub progress: f64,
    pub hover: Option<f64>,
    pub mode: Option<RenderMode>,
    pub bar_count: Option<usize>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Renders one frame and writes it to stdout or the requested file.
///
/// # Errors
/// - If the surface size is not positive
/// - If the configuration or overrides are invalid
/// - If the samples cannot be loaded
/// - If the output cannot be written
pub fn handle_render(request: RenderRequest) -> anyhow::Result<()> {
    if !(request.width > 0.0 && request.height > 0.0) {
        return Err(anyhow!(
            "Surface size must be positive (got {}x{})",
            request.width,
            request.height
        ));
    }

    let config = WavebarsConfig::load()?.with_overrides(request.mode, request.bar_count, None)?;
    let data = samples::load_samples(&request.file)?;

    let mut bars = WaveformBars::new(config.bars)?;
    bars.set_data(data)?;
    bars.set_progress(request.progress);
    bars.set_hover_progress(request.hover);

    let commands = bars.frame(request.width, request.height);
    tracing::info!(
        "Rendered {} draw commands for a {}x{} surface",
        commands.len(),
        request.width,
        request.height
    );

    let document = match request.format {
        OutputFormat::Json => serde_json::to_string_pretty(&commands)?,
        OutputFormat::Svg => to_svg(&commands, request.width, request.height),
    };

    match request.output {
        Some(path) => {
            fs::write(&path, document)
                .map_err(|e| anyhow!("Failed to write {}: {e}", path.display()))?;
            tracing::info!("Frame written to {}", path.display());
        }
        None => println!("{document}"),
    }

    Ok(())
}

/// Encodes draw commands as an SVG document of the given size.
pub fn to_svg(commands: &[DrawCommand], width: f64, height: f64) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    svg.push('\n');

    // Canvas ignores negative sizes; SVG rejects them
    for command in commands
        .iter()
        .filter(|c| c.width > 0.0 && c.height > 0.0)
    {
        let _ = writeln!(
            svg,
            r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            command.x, command.y, command.width, command.height, command.fill
        );
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waveform::HexColor;

    #[test]
    fn test_svg_contains_one_rect_per_visible_command() {
        let commands = vec![
            DrawCommand {
                x: 1.0,
                y: 2.5,
                width: 3.0,
                height: 4.0,
                fill: HexColor::rgb(0xff, 0x85, 0x1b),
            },
            DrawCommand {
                x: 5.0,
                y: 10.0,
                width: 3.0,
                height: 0.0,
                fill: HexColor::rgb(0, 0, 0),
            },
        ];

        let svg = to_svg(&commands, 10.0, 10.0);
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10""#));
        assert!(svg.contains(r##"<rect x="1" y="2.5" width="3" height="4" fill="#ff851b"/>"##));
        assert_eq!(svg.matches("<rect").count(), 1);
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_json_shape() {
        let commands = vec![DrawCommand {
            x: 1.0,
            y: 0.0,
            width: 2.0,
            height: 3.0,
            fill: HexColor::rgb(1, 2, 3),
        }];
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&commands).unwrap()).unwrap();
        assert_eq!(json[0]["fill"], "#010203");
        assert_eq!(json[0]["height"], 3.0);
    }
}
