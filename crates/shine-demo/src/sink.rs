//! Stand-in for the effect renderer.

use shine_core::{EffectFrame, EffectParameterSink};

/// Logs a summary of the effect frame about once per second.
pub struct FrameLogSink {
    frames: u64,
    every: u64,
}

impl FrameLogSink {
    pub fn new(frame_rate: f64) -> Self {
        Self {
            frames: 0,
            every: (frame_rate.round() as u64).max(1),
        }
    }
}

impl EffectParameterSink for FrameLogSink {
    fn apply(&mut self, frame: &EffectFrame) {
        self.frames += 1;
        if (self.frames - 1) % self.every != 0 {
            return;
        }
        tracing::debug!(
            "frame {}: touch=({:.3}, {:.3}) glow={} detection=[{:.2}, {:.2}, {:.2}] base={:?} tolerance={}",
            self.frames,
            frame.touch.x,
            frame.touch.y,
            frame.glare.glow_power,
            frame.detection.red_channel,
            frame.detection.green_channel,
            frame.detection.blue_channel,
            frame.color_mask.base_color,
            frame.tolerance.tolerance,
        );
    }
}
