//! Colors used by the chart: parameter palette, gridlines, tooltip.
//!
//! Colors are kept backend-neutral so the same draw plan can be handed to
//! plotters (SVG/PNG) and egui without conversion logic in the core.

use crate::error::ChartError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional, case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self, ChartError> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChartError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ChartError::InvalidColor(s.into()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Blue ramp used for the four river pollution parameters, dark to light.
pub const RIVER_BLUES: [Rgb; 4] = [
    Rgb::new(0x03, 0x04, 0x5e), // #03045e
    Rgb::new(0x00, 0x77, 0xb6), // #0077b6
    Rgb::new(0x48, 0xca, 0xe4), // #48cae4
    Rgb::new(0xad, 0xe8, 0xf4), // #ade8f4
];

/// Fallback palette for parameters declared without a color.
const OFFICE10: [Rgb; 10] = [
    Rgb::new(68, 114, 196),
    Rgb::new(237, 125, 49),
    Rgb::new(165, 165, 165),
    Rgb::new(255, 192, 0),
    Rgb::new(91, 155, 213),
    Rgb::new(112, 173, 71),
    Rgb::new(38, 68, 120),
    Rgb::new(158, 72, 14),
    Rgb::new(99, 99, 99),
    Rgb::new(153, 115, 0),
];

#[inline]
pub fn office_color(idx: usize) -> Rgb {
    OFFICE10[idx % OFFICE10.len()]
}

pub const GRIDLINE: Rgb = Rgb::new(0xdd, 0xdd, 0xdd);
pub const AXIS: Rgb = Rgb::new(0, 0, 0);
pub const LABEL: Rgb = Rgb::new(0, 0, 0);
pub const TOOLTIP_BACKGROUND: Rgb = Rgb::new(0, 0, 0);
/// Opacity of the tooltip background.
pub const TOOLTIP_OPACITY: f64 = 0.7;
pub const TOOLTIP_TEXT: Rgb = Rgb::new(255, 255, 255);
