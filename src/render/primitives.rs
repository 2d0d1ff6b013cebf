use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds an opaque color from 8-bit channels.
    #[must_use]
    pub const fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    /// Parses `#rrggbb`.
    pub fn from_hex(hex: &str) -> DashboardResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(DashboardError::InvalidData(format!(
                "color `{hex}` must be #rrggbb"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| {
                DashboardError::InvalidData(format!("color `{hex}` has a non-hex channel"))
            })
        };
        Ok(Self::rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Formats as `#rrggbb`, ignoring alpha.
    #[must_use]
    pub fn to_hex(self) -> String {
        let to_byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            to_byte(self.red),
            to_byte(self.green),
            to_byte(self.blue)
        )
    }

    pub fn validate(self) -> DashboardResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(DashboardError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Dataset colors, assigned per category in order.
pub const CHART_PALETTE: [Color; 4] = [
    Color::rgb8(0x22, 0xc5, 0x5e),
    Color::rgb8(0xfb, 0x71, 0x85),
    Color::rgb8(0xf5, 0x9e, 0x0b),
    Color::rgb8(0x38, 0xbd, 0xf8),
];

/// Palette prefix sized to `categories`.
#[must_use]
pub fn palette_for(categories: usize) -> Vec<Color> {
    CHART_PALETTE
        .iter()
        .copied()
        .take(categories)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{CHART_PALETTE, Color, palette_for};

    #[test]
    fn palette_matches_hex_definitions() {
        let hexes: Vec<String> = CHART_PALETTE.iter().map(|color| color.to_hex()).collect();
        assert_eq!(hexes, vec!["#22c55e", "#fb7185", "#f59e0b", "#38bdf8"]);
        assert_eq!(Color::from_hex("#fb7185").expect("parse"), CHART_PALETTE[1]);
    }

    #[test]
    fn palette_is_truncated_to_category_count() {
        assert_eq!(palette_for(2).len(), 2);
        assert_eq!(palette_for(9).len(), 4);
        assert!(palette_for(0).is_empty());
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#zz0000").is_err());
    }
}
