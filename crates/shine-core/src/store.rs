//! Record store shared by every panel of the console.
//!
//! Each record lives in a [`RecordCell`] that hands out `Arc` snapshots.
//! Writers never touch a published snapshot; they build the next record from
//! the current one and swap it in, so a reader always sees one complete
//! record, never a half-applied edit.

use std::sync::Arc;

use glam::Vec2;

use crate::params::{
    ColorMaskOptions, DetectionChannelOptions, GlareOptions, RecordId, RgbTolerance,
};

/// Holds the current snapshot of one record.
#[derive(Debug, Clone)]
pub struct RecordCell<R> {
    current: Arc<R>,
    revision: u64,
}

impl<R: Clone + PartialEq + Default> RecordCell<R> {
    pub fn new(initial: R) -> Self {
        Self {
            current: Arc::new(initial),
            revision: 0,
        }
    }

    /// Borrow the current record.
    pub fn get(&self) -> &R {
        &self.current
    }

    /// Shared handle to the current record. Stays valid across later writes.
    pub fn snapshot(&self) -> Arc<R> {
        Arc::clone(&self.current)
    }

    /// Number of replacements since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the record with `update(current)`.
    ///
    /// Returns `false` (and keeps the current snapshot) when the update is a
    /// no-op.
    pub fn replace_with(&mut self, update: impl FnOnce(&R) -> R) -> bool {
        let next = update(&self.current);
        if next == *self.current {
            return false;
        }
        self.current = Arc::new(next);
        self.revision += 1;
        true
    }

    /// Restore the mount-time defaults.
    pub fn reset(&mut self) -> bool {
        self.replace_with(|_| R::default())
    }
}

impl<R: Clone + PartialEq + Default> Default for RecordCell<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

/// The independent records behind the console.
///
/// There is no ordering between records; each is updated on its own.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationStore {
    glare: RecordCell<GlareOptions>,
    detection: RecordCell<DetectionChannelOptions>,
    color_mask: RecordCell<ColorMaskOptions>,
    tolerance: RecordCell<RgbTolerance>,
}

impl ConfigurationStore {
    pub fn glare(&self) -> &RecordCell<GlareOptions> {
        &self.glare
    }

    pub fn glare_mut(&mut self) -> &mut RecordCell<GlareOptions> {
        &mut self.glare
    }

    pub fn detection(&self) -> &RecordCell<DetectionChannelOptions> {
        &self.detection
    }

    pub fn detection_mut(&mut self) -> &mut RecordCell<DetectionChannelOptions> {
        &mut self.detection
    }

    pub fn color_mask(&self) -> &RecordCell<ColorMaskOptions> {
        &self.color_mask
    }

    pub fn color_mask_mut(&mut self) -> &mut RecordCell<ColorMaskOptions> {
        &mut self.color_mask
    }

    pub fn tolerance(&self) -> &RecordCell<RgbTolerance> {
        &self.tolerance
    }

    pub fn tolerance_mut(&mut self) -> &mut RecordCell<RgbTolerance> {
        &mut self.tolerance
    }

    /// Sum of every record's revision. Changes whenever any record is replaced.
    pub fn revision(&self) -> u64 {
        self.glare.revision()
            + self.detection.revision()
            + self.color_mask.revision()
            + self.tolerance.revision()
    }

    /// Reset one record to its defaults.
    pub fn reset(&mut self, record: RecordId) -> bool {
        match record {
            RecordId::Glare => self.glare.reset(),
            RecordId::Detection => self.detection.reset(),
            RecordId::ColorMask => self.color_mask.reset(),
            RecordId::Tolerance => self.tolerance.reset(),
        }
    }

    /// Snapshot every record together with the current touch vector.
    pub fn effect_frame(&self, touch: Vec2) -> EffectFrame {
        EffectFrame {
            glare: self.glare.snapshot(),
            detection: self.detection.snapshot(),
            color_mask: self.color_mask.snapshot(),
            tolerance: self.tolerance.snapshot(),
            touch,
        }
    }
}

/// Everything the renderer reads for one frame. All fields are read-only
/// snapshots.
#[derive(Debug, Clone)]
pub struct EffectFrame {
    pub glare: Arc<GlareOptions>,
    pub detection: Arc<DetectionChannelOptions>,
    pub color_mask: Arc<ColorMaskOptions>,
    pub tolerance: Arc<RgbTolerance>,
    /// Simulated touch position.
    pub touch: Vec2,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{GlareKey, NumericRecord};

    #[test]
    fn test_snapshot_survives_replacement() {
        let mut cell = RecordCell::new(GlareOptions::default());
        let before = cell.snapshot();
        assert!(cell.replace_with(|r| r.with(GlareKey::GlowPower, 4.0)));

        assert_eq!(before.glow_power, 1.0);
        assert_eq!(cell.get().glow_power, 4.0);
        assert_eq!(cell.revision(), 1);
    }

    #[test]
    fn test_noop_replace_keeps_revision() {
        let mut cell = RecordCell::new(RgbTolerance::default());
        let before = cell.snapshot();
        assert!(!cell.replace_with(|r| r.clone()));
        assert_eq!(cell.revision(), 0);
        assert!(Arc::ptr_eq(&before, &cell.snapshot()));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut store = ConfigurationStore::default();
        store
            .color_mask_mut()
            .replace_with(|r| ColorMaskOptions {
                base_color: [1, 2, 3],
                ..r.clone()
            });
        assert!(store.reset(RecordId::ColorMask));
        assert_eq!(store.color_mask().get(), &ColorMaskOptions::default());
        assert!(!store.reset(RecordId::ColorMask));
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn test_effect_frame_holds_current_snapshots() {
        let mut store = ConfigurationStore::default();
        store
            .tolerance_mut()
            .replace_with(|r| r.with(crate::params::ToleranceKey::Tolerance, 3.0));
        let frame = store.effect_frame(Vec2::new(0.5, 0.0));
        assert_eq!(frame.tolerance.tolerance, 3.0);
        assert_eq!(frame.touch, Vec2::new(0.5, 0.0));
        assert!(Arc::ptr_eq(&frame.glare, &store.glare().snapshot()));
    }
}
