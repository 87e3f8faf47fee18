//! Bevy resources for the shine console.

use bevy::prelude::*;
use shine_core::{
    AngularRate, ControlConsole, EffectFrame, EffectParameterSink, FrameDrivenVectorGenerator,
};

/// Bevy resource holding the control console.
///
/// This is the single source of truth for effect parameters within the ECS.
/// Only `handle_console_commands` writes to it.
#[derive(Resource, Default)]
pub struct ConsoleState {
    /// The console (records plus bound fields).
    pub console: ControlConsole,
    /// Store revision last announced via `SnapshotUpdatedEvent`.
    pub published_revision: u64,
}

/// Bevy resource holding the touch generator. Shares nothing with
/// [`ConsoleState`], so frame ticks never wait on edits.
#[derive(Resource)]
pub struct TouchState {
    pub generator: FrameDrivenVectorGenerator,
}

impl TouchState {
    pub fn new(rate: AngularRate) -> Self {
        Self {
            generator: FrameDrivenVectorGenerator::new(rate),
        }
    }
}

impl Default for TouchState {
    fn default() -> Self {
        Self::new(AngularRate::default())
    }
}

/// The renderer the console feeds. Absent until the host installs one.
#[derive(Resource)]
pub struct EffectSinkSlot {
    sink: Box<dyn EffectParameterSink>,
}

impl EffectSinkSlot {
    pub fn new(sink: impl EffectParameterSink) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }

    pub fn apply(&mut self, frame: &EffectFrame) {
        self.sink.apply(frame);
    }
}
