//! Shine Bevy Plugin — runs the shine control console inside Bevy's ECS.
//!
//! Provides `ShinePlugin` which registers the console and touch generator
//! as resources, the operator command messages, and the per-frame systems
//! that feed the installed effect sink.

pub mod events;
pub mod resources;
pub mod systems;

use bevy::prelude::*;
use shine_core::AngularRate;

use events::{ConsoleCommand, ConsoleErrorEvent, SnapshotUpdatedEvent};
use resources::{ConsoleState, TouchState};
use systems::{
    advance_touch_vector, handle_console_commands, publish_console_changes, push_effect_frame,
};

/// Main Bevy plugin for the shine console.
///
/// Registers resources, messages, and systems for:
/// - Applying operator edits (`ConsoleCommand`) to the record store
/// - Announcing record changes (`SnapshotUpdatedEvent`)
/// - Advancing the orbiting touch vector once per `Update`
/// - Handing an `EffectFrame` to the `EffectSinkSlot`, if one is installed
#[derive(Default)]
pub struct ShinePlugin {
    /// Orbit speed of the simulated touch point.
    pub angular_rate: AngularRate,
}

impl Plugin for ShinePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ConsoleCommand>()
            .add_message::<SnapshotUpdatedEvent>()
            .add_message::<ConsoleErrorEvent>()
            .init_resource::<ConsoleState>()
            .insert_resource(TouchState::new(self.angular_rate))
            .add_systems(
                Update,
                (
                    handle_console_commands,
                    publish_console_changes.after(handle_console_commands),
                    advance_touch_vector,
                    push_effect_frame
                        .after(advance_touch_vector)
                        .after(handle_console_commands),
                ),
            );
    }
}
