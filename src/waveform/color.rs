//! Hex colour parsing and the two channel-wise colour operations used by the renderer.

use crate::error::WaveformError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

static HEX_PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

/// Compiled once and shared by every parse.
fn hex_pattern() -> Result<&'static Regex, &'static regex::Error> {
    HEX_PATTERN
        .get_or_init(|| Regex::new(r"^#?([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$"))
        .as_ref()
}

/// An opaque RGB colour, written as six hex digits with an optional leading `#`.
///
/// Always displays in the normalized `#rrggbb` lowercase form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const BLACK: HexColor = HexColor::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        HexColor { r, g, b }
    }

    /// The six lowercase hex digits without the `#` marker.
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Scales every channel by `ratio`, clamped to a byte and rounded.
    ///
    /// Ratios below 1 darken, ratios above 1 brighten.
    pub fn lighten(&self, ratio: f64) -> HexColor {
        HexColor {
            r: to_channel(self.r as f64 * ratio),
            g: to_channel(self.g as f64 * ratio),
            b: to_channel(self.b as f64 * ratio),
        }
    }

    /// Linear interpolation from `self` towards `other`.
    ///
    /// `t` is not clamped: values outside `[0, 1]` extrapolate and are then
    /// clamped per channel.
    pub fn lerp(&self, other: &HexColor, t: f64) -> HexColor {
        let mix = |a: u8, b: u8| {
            let a = a as f64;
            to_channel(a + (b as f64 - a) * t)
        };

        HexColor {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl FromStr for HexColor {
    type Err = WaveformError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let pattern = hex_pattern().map_err(|e| WaveformError::InvalidColor {
            value: value.to_string(),
            reason: e.to_string(),
        })?;

        let captures = pattern
            .captures(value.trim())
            .ok_or_else(|| WaveformError::InvalidColor {
                value: value.to_string(),
                reason: "expected six hex digits, optionally prefixed with '#'".to_string(),
            })?;

        let channel = |i: usize| {
            u8::from_str_radix(&captures[i], 16).map_err(|e| WaveformError::InvalidColor {
                value: value.to_string(),
                reason: e.to_string(),
            })
        };

        Ok(HexColor {
            r: channel(1)?,
            g: channel(2)?,
            b: channel(3)?,
        })
    }
}

impl TryFrom<String> for HexColor {
    type Error = WaveformError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// Scales each channel of a hex colour string by `ratio`.
///
/// Accepts input with or without `#` and returns six lowercase digits.
///
/// # Errors
/// - `InvalidColor` if `color` is not a six-digit hex colour
pub fn lighten(color: &str, ratio: f64) -> Result<String, WaveformError> {
    Ok(color.parse::<HexColor>()?.lighten(ratio).to_hex())
}

/// Interpolates between two hex colour strings per channel.
///
/// # Errors
/// - `InvalidColor` if either input is not a six-digit hex colour
pub fn lerp(from: &str, to: &str, t: f64) -> Result<String, WaveformError> {
    let from = from.parse::<HexColor>()?;
    let to = to.parse::<HexColor>()?;
    Ok(from.lerp(&to, t).to_hex())
}
