//! The renderer-side consumer of effect frames.

use crate::store::EffectFrame;

/// Receives the merged records and touch vector once per frame.
///
/// Implementations treat the frame as read-only and owe nothing back to the
/// console.
pub trait EffectParameterSink: Send + Sync + 'static {
    fn apply(&mut self, frame: &EffectFrame);
}

impl<F> EffectParameterSink for F
where
    F: FnMut(&EffectFrame) + Send + Sync + 'static,
{
    fn apply(&mut self, frame: &EffectFrame) {
        self(frame)
    }
}
