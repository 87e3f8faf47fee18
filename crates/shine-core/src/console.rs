//! The control console: the record store plus every numeric field bound to it.
//!
//! All operator input enters here. Each handler runs to completion and
//! leaves exactly one replaced record behind, after which any field whose
//! value moved underneath it is resynchronized.

use serde::{Deserialize, Serialize};

use crate::color::{BaseColor, ColorSample, DetectionChannelCoefficients, HsvTriplet};
use crate::error::Result;
use crate::field::{FieldView, NumericSyncField};
use crate::params::{
    ColorMaskOptions, DetectionChannelOptions, DetectionKey, GlareKey, GlareOptions,
    NumericRecord, ParamId, ParamKey, RecordId, RgbTolerance, ToleranceKey,
};
use crate::store::{ConfigurationStore, EffectFrame};

/// Records and field states, as sent to a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleSnapshot {
    pub revision: u64,
    pub glare: GlareOptions,
    pub detection: DetectionChannelOptions,
    pub color_mask: ColorMaskOptions,
    pub rgb_tolerance: RgbTolerance,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone)]
pub struct ControlConsole {
    store: ConfigurationStore,
    glare_fields: Vec<NumericSyncField<GlareKey>>,
    detection_fields: Vec<NumericSyncField<DetectionKey>>,
    tolerance_field: NumericSyncField<ToleranceKey>,
}

impl Default for ControlConsole {
    fn default() -> Self {
        Self::new(ConfigurationStore::default())
    }
}

impl ControlConsole {
    /// Mount the console over `store`, binding one field per numeric key.
    pub fn new(store: ConfigurationStore) -> Self {
        Self {
            glare_fields: bind_fields(store.glare().get()),
            detection_fields: bind_fields(store.detection().get()),
            tolerance_field: NumericSyncField::new(
                ToleranceKey::Tolerance,
                store.tolerance().get(),
            ),
            store,
        }
    }

    pub fn store(&self) -> &ConfigurationStore {
        &self.store
    }

    /// Operator typed into the text box of `param`.
    pub fn text_edited(&mut self, param: ParamId, raw: &str) -> bool {
        match param {
            ParamId::Glare(key) => {
                self.glare_fields[key.index()].on_text_edited(self.store.glare_mut(), raw)
            }
            ParamId::Detection(key) => self.detection_fields[key.index()]
                .on_text_edited(self.store.detection_mut(), raw),
            ParamId::Tolerance => self
                .tolerance_field
                .on_text_edited(self.store.tolerance_mut(), raw),
        }
    }

    /// Operator dragged the slider of `param`. Returns the committed value.
    pub fn slider_moved(&mut self, param: ParamId, value: f64) -> f64 {
        match param {
            ParamId::Glare(key) => {
                self.glare_fields[key.index()].on_slider_moved(self.store.glare_mut(), value)
            }
            ParamId::Detection(key) => self.detection_fields[key.index()]
                .on_slider_moved(self.store.detection_mut(), value),
            ParamId::Tolerance => self
                .tolerance_field
                .on_slider_moved(self.store.tolerance_mut(), value),
        }
    }

    /// Detection-channel pick: writes the signed RGB coefficients.
    pub fn pick_detection_color(&mut self, rgb: &str) -> Result<DetectionChannelCoefficients> {
        let coefficients = ColorSample::from_picker(rgb)?.detection_coefficients();
        self.store.detection_mut().replace_with(|record| DetectionChannelOptions {
            red_channel: coefficients.red,
            green_channel: coefficients.green,
            blue_channel: coefficients.blue,
            ..record.clone()
        });
        tracing::debug!("detection pick {rgb:?} -> {coefficients:?}");
        self.observe_detection();
        Ok(coefficients)
    }

    /// Detection-channel HSV pick: writes hue, saturation and value unscaled.
    pub fn pick_detection_hsv(&mut self, hsv: &str) -> Result<HsvTriplet> {
        let triplet = HsvTriplet::from_picker(hsv)?;
        self.store.detection_mut().replace_with(|record| DetectionChannelOptions {
            hue: triplet.hue,
            saturation: triplet.saturation,
            value: triplet.value,
            ..record.clone()
        });
        tracing::debug!("detection hsv pick {hsv:?} -> {triplet:?}");
        self.observe_detection();
        Ok(triplet)
    }

    /// Color-mask pick: writes the raw bytes as the mask's base color.
    pub fn pick_mask_color(&mut self, rgb: &str) -> Result<BaseColor> {
        let base_color = ColorSample::from_picker(rgb)?.base_color();
        self.store.color_mask_mut().replace_with(|record| ColorMaskOptions {
            base_color,
            ..record.clone()
        });
        tracing::debug!("mask pick {rgb:?} -> {base_color:?}");
        Ok(base_color)
    }

    /// Restore one record to its defaults and resync its fields.
    pub fn reset(&mut self, record: RecordId) -> bool {
        if !self.store.reset(record) {
            return false;
        }
        tracing::debug!("reset {}", record.label());
        match record {
            RecordId::Glare => {
                let current = self.store.glare().get();
                for field in &mut self.glare_fields {
                    field.observe(current);
                }
            }
            RecordId::Detection => self.observe_detection(),
            RecordId::Tolerance => {
                self.tolerance_field.observe(self.store.tolerance().get());
            }
            RecordId::ColorMask => {}
        }
        true
    }

    /// Presentation state of one field.
    pub fn field(&self, param: ParamId) -> FieldView {
        match param {
            ParamId::Glare(key) => self.glare_fields[key.index()].view(self.store.glare().get()),
            ParamId::Detection(key) => {
                self.detection_fields[key.index()].view(self.store.detection().get())
            }
            ParamId::Tolerance => self.tolerance_field.view(self.store.tolerance().get()),
        }
    }

    /// Presentation state of every field, glare first, then detection, then
    /// tolerance.
    pub fn fields(&self) -> Vec<FieldView> {
        let glare = self.store.glare().get();
        let detection = self.store.detection().get();
        self.glare_fields
            .iter()
            .map(|field| field.view(glare))
            .chain(self.detection_fields.iter().map(|field| field.view(detection)))
            .chain(std::iter::once(
                self.tolerance_field.view(self.store.tolerance().get()),
            ))
            .collect()
    }

    pub fn snapshot(&self) -> ConsoleSnapshot {
        ConsoleSnapshot {
            revision: self.store.revision(),
            glare: self.store.glare().get().clone(),
            detection: self.store.detection().get().clone(),
            color_mask: self.store.color_mask().get().clone(),
            rgb_tolerance: self.store.tolerance().get().clone(),
            fields: self.fields(),
        }
    }

    /// Everything the renderer needs for one frame.
    pub fn effect_frame(&self, touch: glam::Vec2) -> EffectFrame {
        self.store.effect_frame(touch)
    }

    fn observe_detection(&mut self) {
        let current = self.store.detection().get();
        for field in &mut self.detection_fields {
            field.observe(current);
        }
    }
}

fn bind_fields<R: NumericRecord>(record: &R) -> Vec<NumericSyncField<R::Key>> {
    R::keys()
        .iter()
        .map(|&key| NumericSyncField::new(key, record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_binds_every_field() {
        let console = ControlConsole::default();
        let fields = console.fields();
        assert_eq!(fields.len(), 13);
        assert!(fields.iter().all(|f| !f.text_error));
        assert_eq!(console.field(GlareKey::HueBlendPower.into()).text, "0.2");
    }

    #[test]
    fn test_detection_pick_resyncs_fields() {
        let mut console = ControlConsole::default();
        let red = ParamId::Detection(DetectionKey::RedChannel);
        console.text_edited(red, "0.5");

        console.pick_detection_color("rgb(0, 255, 0)").unwrap();

        let view = console.field(red);
        assert_eq!(view.value, 1.0);
        assert_eq!(view.text, "1");
        assert!(!view.text_error);
        assert_eq!(console.field(DetectionKey::GreenChannel.into()).text, "-1");
    }

    #[test]
    fn test_detection_pick_preserves_other_fields() {
        let mut console = ControlConsole::default();
        console.slider_moved(DetectionKey::Hue.into(), 4.0);
        console.pick_detection_color("rgb(12, 34, 56)").unwrap();
        assert_eq!(console.store().detection().get().hue, 4.0);
    }

    #[test]
    fn test_mask_pick_sets_base_color() {
        let mut console = ControlConsole::default();
        let base = console.pick_mask_color("rgb(12, 34, 56)").unwrap();
        assert_eq!(base, [12, 34, 56]);
        assert_eq!(console.store().color_mask().get().base_color, [12, 34, 56]);
        assert!(console.store().color_mask().get().use_hsv);
    }

    #[test]
    fn test_malformed_pick_leaves_records_alone() {
        let mut console = ControlConsole::default();
        assert!(console.pick_detection_color("rgb(1, 2)").is_err());
        assert!(console.pick_mask_color("").is_err());
        assert_eq!(console.store().revision(), 0);
    }

    #[test]
    fn test_hsv_pick_writes_unscaled() {
        let mut console = ControlConsole::default();
        console.pick_detection_hsv("hsv(120, 40%, 90%)").unwrap();
        let detection = console.store().detection().get();
        assert_eq!((detection.hue, detection.saturation, detection.value), (120.0, 40.0, 90.0));
        assert_eq!(console.field(DetectionKey::Hue.into()).text, "120");
    }

    #[test]
    fn test_reset_resyncs_divergent_text() {
        let mut console = ControlConsole::default();
        let glow = ParamId::Glare(GlareKey::GlowPower);
        console.text_edited(glow, "9x");
        assert!(console.field(glow).text_error);

        assert!(console.reset(RecordId::Glare));
        let view = console.field(glow);
        assert_eq!(view.value, 1.0);
        assert_eq!(view.text, "1");
        assert!(!view.text_error);
    }

    #[test]
    fn test_records_update_independently() {
        let mut console = ControlConsole::default();
        console.slider_moved(ParamId::Tolerance, 3.3);
        let snapshot = console.snapshot();
        assert_eq!(snapshot.rgb_tolerance.tolerance, 3.3);
        assert_eq!(snapshot.glare, GlareOptions::default());
        assert_eq!(snapshot.revision, 1);
    }
}
