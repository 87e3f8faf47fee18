//! IPC message contracts between the console host and the operator UI.
//!
//! These enums define the complete set of JSON messages exchanged over the
//! WebSocket bridge, tagged as `{"type": ..., "data": ...}`.

use serde::{Deserialize, Serialize};
use shine_bevy::events::ConsoleCommand;
use shine_core::{ConsoleSnapshot, ParamId, RecordId};

/// Messages from the console host to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ConsoleToUi {
    /// Initial state sync when the UI connects.
    Initialize {
        /// Current records and field states.
        snapshot: ConsoleSnapshot,
    },

    /// A record changed.
    SnapshotUpdated {
        /// Updated records and field states.
        snapshot: ConsoleSnapshot,
    },

    /// A UI message was rejected.
    Error {
        /// Error description.
        message: String,
    },
}

/// Which record a color-picker selection feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PickTarget {
    /// Detection channel coefficients from the RGB string.
    Detection,
    /// Detection hue/saturation/value from the HSV string.
    DetectionHsv,
    /// Color-mask base color from the RGB string.
    Mask,
}

/// Messages from the UI to the console host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToConsole {
    /// Request a fresh snapshot after the UI connects.
    RequestState,

    /// Text box changed.
    TextEdited {
        param: ParamId,
        text: String,
    },

    /// Slider moved.
    SliderMoved {
        param: ParamId,
        value: f64,
    },

    /// Color picker selection completed.
    ColorPicked {
        target: PickTarget,
        /// `"rgb(r, g, b)"` form, always present.
        rgb: String,
        /// `"hsv(h, s%, v%)"` form, when the picker reports it.
        #[serde(default)]
        hsv: Option<String>,
    },

    /// Restore a record to its defaults.
    ResetRecord {
        record: RecordId,
    },

    /// The operator screen is closing.
    Unmount,
}

impl UiToConsole {
    /// The console command this message maps to.
    ///
    /// `RequestState` has no command (`Ok(None)`); an HSV pick without an
    /// HSV string is rejected.
    pub fn into_command(self) -> Result<Option<ConsoleCommand>, String> {
        let cmd = match self {
            Self::RequestState => return Ok(None),
            Self::TextEdited { param, text } => ConsoleCommand::TextEdited { param, text },
            Self::SliderMoved { param, value } => ConsoleCommand::SliderMoved { param, value },
            Self::ColorPicked { target, rgb, hsv } => match target {
                PickTarget::Detection => ConsoleCommand::PickDetectionColor { rgb },
                PickTarget::Mask => ConsoleCommand::PickMaskColor { rgb },
                PickTarget::DetectionHsv => match hsv {
                    Some(hsv) => ConsoleCommand::PickDetectionHsv { hsv },
                    None => return Err("detectionHsv pick is missing the hsv string".to_string()),
                },
            },
            Self::ResetRecord { record } => ConsoleCommand::ResetRecord { record },
            Self::Unmount => ConsoleCommand::Unmount,
        };
        Ok(Some(cmd))
    }
}
