//! Configuration records consumed by the shine renderer.
//!
//! Each record is an independent value snapshot. Nothing mutates a record
//! that a renderer may already hold: updates build a fresh copy with the
//! changed field(s) applied (see [`NumericRecord::with`]).

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Slider bounds for a numeric field. Text edits are not constrained by these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderBounds {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }
}

impl Default for SliderBounds {
    fn default() -> Self {
        Self::new(0.0, 10.0, 0.1)
    }
}

/// A key naming one numeric property inside a record.
pub trait ParamKey: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Property name as shown to the operator and used on the wire.
    fn label(self) -> &'static str;

    /// Slider bounds for this property.
    fn bounds(self) -> SliderBounds {
        SliderBounds::default()
    }

    /// Position of this key in its record's [`NumericRecord::keys`].
    fn index(self) -> usize;
}

/// A flat record of numeric properties addressed by a [`ParamKey`].
pub trait NumericRecord: Clone + PartialEq + Default + Send + Sync + 'static {
    type Key: ParamKey;

    /// All keys, in display order.
    fn keys() -> &'static [Self::Key];

    fn get(&self, key: Self::Key) -> f64;

    fn set(&mut self, key: Self::Key, value: f64);

    /// Copy of `self` with `key` replaced by `value`.
    fn with(&self, key: Self::Key, value: f64) -> Self {
        let mut next = self.clone();
        next.set(key, value);
        next
    }
}

// ── Glare ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GlareKey {
    GlowPower,
    HueShiftAngleMax,
    HueShiftAngleMin,
    HueBlendPower,
    LightIntensity,
    GlareIntensity,
}

impl ParamKey for GlareKey {
    fn label(self) -> &'static str {
        match self {
            Self::GlowPower => "glowPower",
            Self::HueShiftAngleMax => "hueShiftAngleMax",
            Self::HueShiftAngleMin => "hueShiftAngleMin",
            Self::HueBlendPower => "hueBlendPower",
            Self::LightIntensity => "lightIntensity",
            Self::GlareIntensity => "glareIntensity",
        }
    }

    fn bounds(self) -> SliderBounds {
        match self {
            Self::GlowPower => SliderBounds::new(0.0, 64.0, 0.1),
            // Half a turn either way is the useful range for hue shift.
            Self::HueShiftAngleMax => SliderBounds::new(0.0, PI, 0.01),
            Self::HueShiftAngleMin => SliderBounds::new(-PI, 0.0, 0.01),
            Self::LightIntensity => SliderBounds::new(0.0, 100.0, 0.1),
            Self::HueBlendPower | Self::GlareIntensity => SliderBounds::default(),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Glare highlight options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlareOptions {
    pub glow_power: f64,
    /// Radians.
    pub hue_shift_angle_max: f64,
    /// Radians.
    pub hue_shift_angle_min: f64,
    pub hue_blend_power: f64,
    pub light_intensity: f64,
    pub glare_intensity: f64,
}

impl Default for GlareOptions {
    fn default() -> Self {
        Self {
            glow_power: 1.0,
            hue_shift_angle_max: 0.0,
            hue_shift_angle_min: 0.0,
            hue_blend_power: 0.2,
            light_intensity: 1.0,
            glare_intensity: 0.2,
        }
    }
}

impl NumericRecord for GlareOptions {
    type Key = GlareKey;

    fn keys() -> &'static [GlareKey] {
        const ALL: [GlareKey; 6] = [
            GlareKey::GlowPower,
            GlareKey::HueShiftAngleMax,
            GlareKey::HueShiftAngleMin,
            GlareKey::HueBlendPower,
            GlareKey::LightIntensity,
            GlareKey::GlareIntensity,
        ];
        &ALL
    }

    fn get(&self, key: GlareKey) -> f64 {
        match key {
            GlareKey::GlowPower => self.glow_power,
            GlareKey::HueShiftAngleMax => self.hue_shift_angle_max,
            GlareKey::HueShiftAngleMin => self.hue_shift_angle_min,
            GlareKey::HueBlendPower => self.hue_blend_power,
            GlareKey::LightIntensity => self.light_intensity,
            GlareKey::GlareIntensity => self.glare_intensity,
        }
    }

    fn set(&mut self, key: GlareKey, value: f64) {
        match key {
            GlareKey::GlowPower => self.glow_power = value,
            GlareKey::HueShiftAngleMax => self.hue_shift_angle_max = value,
            GlareKey::HueShiftAngleMin => self.hue_shift_angle_min = value,
            GlareKey::HueBlendPower => self.hue_blend_power = value,
            GlareKey::LightIntensity => self.light_intensity = value,
            GlareKey::GlareIntensity => self.glare_intensity = value,
        }
    }
}

// ── Detection channels ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DetectionKey {
    RedChannel,
    GreenChannel,
    BlueChannel,
    Hue,
    Saturation,
    Value,
}

impl ParamKey for DetectionKey {
    fn label(self) -> &'static str {
        match self {
            Self::RedChannel => "redChannel",
            Self::GreenChannel => "greenChannel",
            Self::BlueChannel => "blueChannel",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Value => "value",
        }
    }

    fn bounds(self) -> SliderBounds {
        match self {
            Self::RedChannel | Self::GreenChannel | Self::BlueChannel => {
                SliderBounds::new(-1.0, 1.0, 0.01)
            }
            Self::Hue | Self::Saturation | Self::Value => SliderBounds::default(),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Reverse-holo detection channel flags.
///
/// Larger positive channel values make that channel *less* reflective,
/// smaller values make it more reflective.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionChannelOptions {
    pub red_channel: f64,
    pub green_channel: f64,
    pub blue_channel: f64,
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

impl NumericRecord for DetectionChannelOptions {
    type Key = DetectionKey;

    fn keys() -> &'static [DetectionKey] {
        const ALL: [DetectionKey; 6] = [
            DetectionKey::RedChannel,
            DetectionKey::GreenChannel,
            DetectionKey::BlueChannel,
            DetectionKey::Hue,
            DetectionKey::Saturation,
            DetectionKey::Value,
        ];
        &ALL
    }

    fn get(&self, key: DetectionKey) -> f64 {
        match key {
            DetectionKey::RedChannel => self.red_channel,
            DetectionKey::GreenChannel => self.green_channel,
            DetectionKey::BlueChannel => self.blue_channel,
            DetectionKey::Hue => self.hue,
            DetectionKey::Saturation => self.saturation,
            DetectionKey::Value => self.value,
        }
    }

    fn set(&mut self, key: DetectionKey, value: f64) {
        match key {
            DetectionKey::RedChannel => self.red_channel = value,
            DetectionKey::GreenChannel => self.green_channel = value,
            DetectionKey::BlueChannel => self.blue_channel = value,
            DetectionKey::Hue => self.hue = value,
            DetectionKey::Saturation => self.saturation = value,
            DetectionKey::Value => self.value = value,
        }
    }
}

// ── RGB tolerance ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToleranceKey {
    Tolerance,
}

impl ParamKey for ToleranceKey {
    fn label(self) -> &'static str {
        "tolerance"
    }

    fn index(self) -> usize {
        0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RgbTolerance {
    pub tolerance: f64,
}

impl Default for RgbTolerance {
    fn default() -> Self {
        Self { tolerance: 1.0 }
    }
}

impl NumericRecord for RgbTolerance {
    type Key = ToleranceKey;

    fn keys() -> &'static [ToleranceKey] {
        &[ToleranceKey::Tolerance]
    }

    fn get(&self, _key: ToleranceKey) -> f64 {
        self.tolerance
    }

    fn set(&mut self, _key: ToleranceKey, value: f64) {
        self.tolerance = value;
    }
}

// ── Color mask ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceRange {
    pub upper: f64,
    pub lower: f64,
}

/// Options for the color-similarity mask. `base_color` is raw 0–255 RGB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorMaskOptions {
    pub base_color: [u8; 3],
    pub use_hsv: bool,
    pub hue_tolerance_range: ToleranceRange,
    pub low_brightness_threshold: f64,
    pub low_saturation_threshold: f64,
}

impl Default for ColorMaskOptions {
    fn default() -> Self {
        Self {
            base_color: [0, 0, 255],
            use_hsv: true,
            hue_tolerance_range: ToleranceRange {
                upper: 9.0,
                lower: 9.0,
            },
            low_brightness_threshold: 0.1,
            low_saturation_threshold: 1e-11,
        }
    }
}

// ── Addressing ──────────────────────────────────────────────────────────────

/// Addresses a numeric field in any record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "record", content = "key", rename_all = "camelCase")]
pub enum ParamId {
    Glare(GlareKey),
    Detection(DetectionKey),
    Tolerance,
}

impl From<GlareKey> for ParamId {
    fn from(key: GlareKey) -> Self {
        Self::Glare(key)
    }
}

impl From<DetectionKey> for ParamId {
    fn from(key: DetectionKey) -> Self {
        Self::Detection(key)
    }
}

impl From<ToleranceKey> for ParamId {
    fn from(_: ToleranceKey) -> Self {
        Self::Tolerance
    }
}

/// Identifies one of the independent records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordId {
    Glare,
    Detection,
    ColorMask,
    Tolerance,
}

impl RecordId {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Glare => "glare",
            Self::Detection => "detection",
            Self::ColorMask => "colorMask",
            Self::Tolerance => "tolerance",
        }
    }
}
