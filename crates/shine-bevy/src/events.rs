//! Bevy messages for operator input and console notifications.

use bevy::prelude::*;
use shine_core::{ConsoleSnapshot, ParamId, RecordId};

/// Operator input. Each command is applied to completion before the next.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    /// Text box edit; `text` is kept as typed.
    TextEdited { param: ParamId, text: String },
    /// Slider drag.
    SliderMoved { param: ParamId, value: f64 },
    /// Detection-channel color pick (picker RGB string).
    PickDetectionColor { rgb: String },
    /// Detection-channel HSV pick (picker HSV string).
    PickDetectionHsv { hsv: String },
    /// Color-mask base color pick (picker RGB string).
    PickMaskColor { rgb: String },
    /// Restore a record to its defaults.
    ResetRecord { record: RecordId },
    /// Host screen is going away: stop the touch generator and exit.
    Unmount,
}

/// Fired when any record changed during this frame.
#[derive(Message)]
pub struct SnapshotUpdatedEvent {
    pub snapshot: ConsoleSnapshot,
}

/// Fired when a command was rejected (malformed picker input).
#[derive(Message)]
pub struct ConsoleErrorEvent {
    pub message: String,
}
