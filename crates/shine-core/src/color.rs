//! Color-picker transforms.
//!
//! The picker reports its selection as formatted strings such as
//! `"rgb(12, 34, 56)"` or `"hsv(210, 50%, 40%)"`. The first three integers
//! are read left to right; everything else in the string is ignored.
//!
//! Two independent records consume a pick:
//! - detection channels get signed coefficients in `[-1, 1]`, inverted so
//!   black maps to `+1` (least reflective) and white to `-1`:
//!   ```text
//!   coefficient = ((c / 255) − 0.5) × 2 × −1
//!   ```
//! - the color mask gets the raw bytes unchanged as its base color.

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShineError};

/// Raw 0–255 RGB tuple for the color mask.
pub type BaseColor = [u8; 3];

/// One picked color. Produced per pick and consumed immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorSample(Srgb<u8>);

impl ColorSample {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    /// Read a sample from the picker's RGB string.
    pub fn from_picker(raw: &str) -> Result<Self> {
        let [r, g, b] = leading_integers(raw)?;
        let channel = |run: &str| {
            run.parse::<u8>().map_err(|_| ShineError::ChannelOutOfRange {
                value: run.to_string(),
            })
        };
        Ok(Self::new(channel(r)?, channel(g)?, channel(b)?))
    }

    /// Signed per-channel detection coefficients.
    pub fn detection_coefficients(&self) -> DetectionChannelCoefficients {
        let unit: Srgb<f64> = self.0.into_format();
        DetectionChannelCoefficients {
            red: detection_coefficient(unit.red),
            green: detection_coefficient(unit.green),
            blue: detection_coefficient(unit.blue),
        }
    }

    /// The raw channel bytes, unscaled.
    pub fn base_color(&self) -> BaseColor {
        let (r, g, b) = self.0.into_components();
        [r, g, b]
    }
}

/// Map a normalized channel to the inverted `[-1, 1]` detection range.
fn detection_coefficient(unit: f64) -> f64 {
    (unit - 0.5) * 2.0 * -1.0
}

/// Detection coefficients derived from a [`ColorSample`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionChannelCoefficients {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

/// Hue / saturation / value numbers read from the picker's HSV string.
///
/// Passed through as reported; no color-space conversion happens here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HsvTriplet {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

impl HsvTriplet {
    pub fn from_picker(raw: &str) -> Result<Self> {
        let [h, s, v] = leading_integers(raw)?;
        let number = |run: &str| {
            run.parse::<u32>()
                .map(|n| n as f64)
                .map_err(|_| ShineError::ChannelOutOfRange {
                    value: run.to_string(),
                })
        };
        Ok(Self {
            hue: number(h)?,
            saturation: number(s)?,
            value: number(v)?,
        })
    }
}

/// First three runs of ASCII digits in `raw`, in order.
fn leading_integers(raw: &str) -> Result<[&str; 3]> {
    let mut runs = raw
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty());

    let mut found = [""; 3];
    for (i, slot) in found.iter_mut().enumerate() {
        *slot = runs.next().ok_or_else(|| ShineError::MalformedColor {
            input: raw.to_string(),
            found: i,
        })?;
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn assert_coefficients(c: DetectionChannelCoefficients, expected: f64, tolerance: f64) {
        for (name, v) in [("red", c.red), ("green", c.green), ("blue", c.blue)] {
            assert!(
                (v - expected).abs() < tolerance,
                "{name}: {v:.8} vs {expected:.8}"
            );
        }
    }

    #[test]
    fn test_black_maps_to_plus_one() {
        let c = ColorSample::new(0, 0, 0).detection_coefficients();
        assert_coefficients(c, 1.0, EPSILON);
    }

    #[test]
    fn test_white_maps_to_minus_one() {
        let c = ColorSample::new(255, 255, 255).detection_coefficients();
        assert_coefficients(c, -1.0, EPSILON);
    }

    #[test]
    fn test_mid_grey_maps_near_zero() {
        let c = ColorSample::new(128, 128, 128).detection_coefficients();
        // 128 is one step past the true midpoint of 127.5.
        assert_coefficients(c, 0.0, 0.01);
        assert!(c.red < 0.0);
    }

    #[test]
    fn test_channels_are_independent() {
        let c = ColorSample::new(255, 0, 51).detection_coefficients();
        assert!((c.red + 1.0).abs() < EPSILON);
        assert!((c.green - 1.0).abs() < EPSILON);
        assert!((c.blue - 0.6).abs() < EPSILON);
    }

    #[test]
    fn test_base_color_passthrough() {
        let sample = ColorSample::from_picker("rgb(12, 34, 56)").unwrap();
        assert_eq!(sample.base_color(), [12, 34, 56]);
    }

    #[test]
    fn test_extraction_ignores_extra_numbers() {
        let sample = ColorSample::from_picker("rgba(1, 2, 3, 0.5)").unwrap();
        assert_eq!(sample.base_color(), [1, 2, 3]);
    }

    #[test]
    fn test_malformed_color_fails_fast() {
        let err = ColorSample::from_picker("rgb(12, 34)").unwrap_err();
        assert!(matches!(err, ShineError::MalformedColor { found: 2, .. }));

        let err = ColorSample::from_picker("#ff00ff").unwrap_err();
        assert!(matches!(err, ShineError::MalformedColor { found: 1, .. }));
    }

    #[test]
    fn test_channel_above_255_rejected() {
        let err = ColorSample::from_picker("rgb(300, 0, 0)").unwrap_err();
        assert!(matches!(err, ShineError::ChannelOutOfRange { .. }));
    }

    #[test]
    fn test_hsv_passthrough() {
        let hsv = HsvTriplet::from_picker("hsv(210, 50%, 40%)").unwrap();
        assert_eq!(
            hsv,
            HsvTriplet {
                hue: 210.0,
                saturation: 50.0,
                value: 40.0
            }
        );
    }
}
