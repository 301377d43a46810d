//! Per-frame bar rendering.
//!
//! Turns a bar array plus the current playback and hover positions into an
//! ordered list of filled rectangles. Nothing here touches a drawing surface;
//! callers execute the commands against whatever backend they own.

use super::color::HexColor;
use crate::error::WaveformError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Shade applied to a bar's fill colour for its reflection.
const SHADOW_SHADE: f64 = 0.7;

/// How bars are coloured and shaped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Flat bottom-anchored bars with a hard played/hover/default cutoff
    #[default]
    Discrete,
    /// Colour blended across the playhead, with a reflection under each bar
    Smooth,
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Discrete => write!(f, "discrete"),
            Self::Smooth => write!(f, "smooth"),
        }
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discrete" => Ok(Self::Discrete),
            "smooth" => Ok(Self::Smooth),
            other => Err(format!(
                "Unknown render mode '{other}'. Expected 'discrete' or 'smooth'"
            )),
        }
    }
}

/// Bar layout and colour configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarStyle {
    /// Number of bars the samples are compressed into (at least 1)
    #[serde(default = "default_bar_count")]
    pub bar_count: usize,
    /// Gap in pixels before, between and after bars
    #[serde(default = "default_bar_margin")]
    pub bar_margin: f64,
    /// Colour of bars ahead of the playhead
    #[serde(default = "default_default_color")]
    pub default_color: HexColor,
    /// Colour of bars behind the playhead
    #[serde(default = "default_played_color")]
    pub played_color: HexColor,
    /// Colour of bars under an active seek drag (discrete mode)
    #[serde(default = "default_hover_color")]
    pub hover_color: HexColor,
    /// Reflection height relative to its bar (smooth mode)
    #[serde(default = "default_shadow_ratio")]
    pub shadow_ratio: f64,
    /// Gap in pixels between a bar and its reflection (smooth mode)
    #[serde(default = "default_shadow_margin")]
    pub shadow_margin: f64,
    #[serde(default)]
    pub mode: RenderMode,
}

fn default_bar_count() -> usize {
    100
}

fn default_bar_margin() -> f64 {
    1.0
}

fn default_default_color() -> HexColor {
    HexColor::rgb(0xff, 0x85, 0x1b)
}

fn default_played_color() -> HexColor {
    HexColor::rgb(0xff, 0xdc, 0x00)
}

fn default_hover_color() -> HexColor {
    HexColor::rgb(0xff, 0x41, 0x36)
}

fn default_shadow_ratio() -> f64 {
    0.4
}

fn default_shadow_margin() -> f64 {
    1.0
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            bar_count: default_bar_count(),
            bar_margin: default_bar_margin(),
            default_color: default_default_color(),
            played_color: default_played_color(),
            hover_color: default_hover_color(),
            shadow_ratio: default_shadow_ratio(),
            shadow_margin: default_shadow_margin(),
            mode: RenderMode::default(),
        }
    }
}

impl BarStyle {
    /// Checks the numeric constraints the renderer relies on.
    ///
    /// # Errors
    /// - `InvalidBarCount` if `bar_count` is zero
    /// - `InvalidStyle` if a margin or the shadow ratio is negative or not finite
    pub fn validate(&self) -> Result<(), WaveformError> {
        if self.bar_count == 0 {
            return Err(WaveformError::InvalidBarCount(self.bar_count));
        }

        for (name, value) in [
            ("bar_margin", self.bar_margin),
            ("shadow_ratio", self.shadow_ratio),
            ("shadow_margin", self.shadow_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(WaveformError::InvalidStyle(format!(
                    "{name} must be a non-negative number (got {value})"
                )));
            }
        }

        Ok(())
    }
}

/// A single filled rectangle, in surface pixels with the origin at the top left.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawCommand {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: HexColor,
}

/// Fraction of the played colour mixed into bar `index` in smooth mode.
///
/// Ramps from 0 to 1 over the single bar the playhead is crossing.
pub fn blend_factor(progress: f64, index: usize, bar_count: usize) -> f64 {
    (progress * bar_count as f64 - index as f64).clamp(0.0, 1.0)
}

/// Produces the draw commands for one frame.
///
/// Commands are ordered left to right. In smooth mode each bar body is
/// followed by its reflection. `hover` is only consulted in discrete mode.
pub fn render(
    bars: &[f64],
    progress: f64,
    hover: Option<f64>,
    width: f64,
    height: f64,
    style: &BarStyle,
) -> Vec<DrawCommand> {
    let count = bars.len();
    if count == 0 {
        return Vec::new();
    }

    let n = count as f64;
    let margin = style.bar_margin;
    let bar_width = (width - margin * (n + 1.0)) / n;
    let bar_x = |i: usize| i as f64 * bar_width + i as f64 * margin + margin;

    match style.mode {
        RenderMode::Discrete => bars
            .iter()
            .enumerate()
            .map(|(i, &bar)| {
                let position = i as f64 / n;
                let fill = if position < progress {
                    style.played_color
                } else if hover.is_some_and(|h| position <= h) {
                    style.hover_color
                } else {
                    style.default_color
                };

                let h = height * bar;
                DrawCommand {
                    x: bar_x(i),
                    y: height - h,
                    width: bar_width,
                    height: h,
                    fill,
                }
            })
            .collect(),
        RenderMode::Smooth => {
            let bar_max_height = (height - style.shadow_margin) / (1.0 + style.shadow_ratio);
            let shadow_top = bar_max_height + style.shadow_margin;

            let mut commands = Vec::with_capacity(count * 2);
            for (i, &bar) in bars.iter().enumerate() {
                let t = blend_factor(progress, i, count);
                let fill = style.default_color.lerp(&style.played_color, t);
                let x = bar_x(i);
                let h = bar_max_height * bar;

                commands.push(DrawCommand {
                    x,
                    y: bar_max_height - h,
                    width: bar_width,
                    height: h,
                    fill,
                });
                commands.push(DrawCommand {
                    x,
                    y: shadow_top,
                    width: bar_width,
                    height: h * style.shadow_ratio,
                    fill: fill.lighten(SHADOW_SHADE),
                });
            }
            commands
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn style(mode: RenderMode, bar_count: usize) -> BarStyle {
        BarStyle {
            bar_count,
            mode,
            ..BarStyle::default()
        }
    }

    #[test]
    fn test_discrete_geometry() {
        let style = style(RenderMode::Discrete, 4);
        let commands = render(&[1.0, 0.5, 0.25, 0.0], 0.0, None, 105.0, 40.0, &style);

        assert_eq!(commands.len(), 4);
        // (105 - 1 * 5) / 4 = 25
        assert!((commands[0].width - 25.0).abs() < EPSILON);
        let xs: Vec<f64> = commands.iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![1.0, 27.0, 53.0, 79.0]);

        assert_eq!((commands[0].y, commands[0].height), (0.0, 40.0));
        assert_eq!((commands[1].y, commands[1].height), (20.0, 20.0));
        assert_eq!((commands[3].y, commands[3].height), (40.0, 0.0));
    }

    #[test]
    fn test_bars_never_overlap() {
        let style = style(RenderMode::Discrete, 7);
        let commands = render(&[0.5; 7], 0.0, None, 333.0, 10.0, &style);
        for pair in commands.windows(2) {
            assert!(pair[0].x + pair[0].width + style.bar_margin <= pair[1].x + EPSILON);
        }
        let last = commands.last().unwrap();
        assert!((last.x + last.width + style.bar_margin - 333.0).abs() < EPSILON);
    }

    #[test]
    fn test_discrete_progress_boundary() {
        let style = style(RenderMode::Discrete, 10);
        let commands = render(&[0.5; 10], 0.5, None, 200.0, 50.0, &style);

        assert_eq!(commands[4].fill, style.played_color);
        assert_eq!(commands[5].fill, style.default_color);
    }

    #[test]
    fn test_discrete_hover_range() {
        let style = style(RenderMode::Discrete, 10);
        let commands = render(&[0.5; 10], 0.2, Some(0.6), 200.0, 50.0, &style);

        let fills: Vec<HexColor> = commands.iter().map(|c| c.fill).collect();
        assert_eq!(&fills[..2], &[style.played_color; 2]);
        // 0.2..=0.6 inclusive of the hover position
        assert_eq!(&fills[2..7], &[style.hover_color; 5]);
        assert_eq!(&fills[7..], &[style.default_color; 3]);
    }

    #[test]
    fn test_played_takes_precedence_over_hover() {
        let style = style(RenderMode::Discrete, 4);
        let commands = render(&[1.0; 4], 1.0, Some(1.0), 100.0, 10.0, &style);
        assert!(commands.iter().all(|c| c.fill == style.played_color));
    }

    #[test]
    fn test_smooth_blend_factor_at_half_bar() {
        assert_eq!(blend_factor(0.45, 4, 10), 0.5);
        assert_eq!(blend_factor(0.45, 3, 10), 1.0);
        assert_eq!(blend_factor(0.45, 5, 10), 0.0);
    }

    #[test]
    fn test_smooth_colors_and_reflection() {
        let style = BarStyle {
            default_color: HexColor::rgb(0, 0, 0),
            played_color: HexColor::rgb(200, 100, 60),
            ..style(RenderMode::Smooth, 10)
        };
        let commands = render(&[1.0; 10], 0.45, Some(0.9), 111.0, 29.0, &style);

        assert_eq!(commands.len(), 20);
        assert_eq!(commands[6].fill, style.played_color);
        assert_eq!(commands[8].fill, HexColor::rgb(100, 50, 30));
        assert_eq!(commands[9].fill, HexColor::rgb(70, 35, 21));
        assert_eq!(commands[10].fill, style.default_color);
        // hover has no effect in smooth mode
        assert_eq!(commands[18].fill, style.default_color);
    }

    #[test]
    fn test_smooth_geometry_leaves_room_for_reflection() {
        let style = style(RenderMode::Smooth, 2);
        // bar_max_height = (29 - 1) / 1.4 = 20
        let commands = render(&[1.0, 0.5], 0.0, None, 53.0, 29.0, &style);

        let (body, shadow) = (&commands[0], &commands[1]);
        assert!((body.y - 0.0).abs() < EPSILON);
        assert!((body.height - 20.0).abs() < EPSILON);
        assert!((shadow.y - 21.0).abs() < EPSILON);
        assert!((shadow.height - 8.0).abs() < EPSILON);
        assert_eq!(body.x, shadow.x);
        assert_eq!(body.width, shadow.width);
        assert!(shadow.y + shadow.height <= 29.0 + EPSILON);

        let half = &commands[2];
        assert!((half.y - 10.0).abs() < EPSILON);
        assert!((half.height - 10.0).abs() < EPSILON);
        assert!((commands[3].height - 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_render_is_deterministic() {
        let bars: Vec<f64> = (0..50).map(|i| (i as f64 * 0.37).sin().abs()).collect();
        for mode in [RenderMode::Discrete, RenderMode::Smooth] {
            let style = style(mode, 50);
            let first = render(&bars, 0.33, Some(0.7), 640.0, 120.0, &style);
            let second = render(&bars, 0.33, Some(0.7), 640.0, 120.0, &style);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_empty_bars_render_nothing() {
        assert!(render(&[], 0.5, None, 100.0, 100.0, &BarStyle::default()).is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_styles() {
        assert!(BarStyle::default().validate().is_ok());
        assert_eq!(
            style(RenderMode::Discrete, 0).validate(),
            Err(WaveformError::InvalidBarCount(0))
        );

        let negative_margin = BarStyle {
            bar_margin: -1.0,
            ..BarStyle::default()
        };
        assert!(matches!(
            negative_margin.validate(),
            Err(WaveformError::InvalidStyle(_))
        ));

        let nan_ratio = BarStyle {
            shadow_ratio: f64::NAN,
            ..BarStyle::default()
        };
        assert!(nan_ratio.validate().is_err());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Smooth".parse::<RenderMode>(), Ok(RenderMode::Smooth));
        assert_eq!("discrete".parse::<RenderMode>(), Ok(RenderMode::Discrete));
        assert!("gradient".parse::<RenderMode>().is_err());
    }
}
