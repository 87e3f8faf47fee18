//! Bevy systems for the shine console.
//!
//! `handle_console_commands` is the ONLY place records change. The frame
//! systems (`advance_touch_vector`, `push_effect_frame`) only read the
//! console, so edits and frame ticks never contend for the same state.

use bevy::prelude::*;
use shine_core::Tick;

use crate::events::{ConsoleCommand, ConsoleErrorEvent, SnapshotUpdatedEvent};
use crate::resources::{ConsoleState, EffectSinkSlot, TouchState};

/// Apply inbound operator commands to the console.
pub fn handle_console_commands(
    mut commands: MessageReader<ConsoleCommand>,
    mut state: ResMut<ConsoleState>,
    mut touch: ResMut<TouchState>,
    mut errors: MessageWriter<ConsoleErrorEvent>,
    mut exit: MessageWriter<AppExit>,
) {
    for cmd in commands.read() {
        let console = &mut state.console;
        let result = match cmd {
            ConsoleCommand::TextEdited { param, text } => {
                console.text_edited(*param, text);
                Ok(())
            }
            ConsoleCommand::SliderMoved { param, value } => {
                console.slider_moved(*param, *value);
                Ok(())
            }
            ConsoleCommand::PickDetectionColor { rgb } => {
                console.pick_detection_color(rgb).map(|_| ())
            }
            ConsoleCommand::PickDetectionHsv { hsv } => {
                console.pick_detection_hsv(hsv).map(|_| ())
            }
            ConsoleCommand::PickMaskColor { rgb } => console.pick_mask_color(rgb).map(|_| ()),
            ConsoleCommand::ResetRecord { record } => {
                console.reset(*record);
                Ok(())
            }
            ConsoleCommand::Unmount => {
                touch.generator.stop();
                exit.write(AppExit::Success);
                Ok(())
            }
        };

        if let Err(e) = result {
            tracing::warn!("Rejected console command {cmd:?}: {e}");
            errors.write(ConsoleErrorEvent {
                message: e.to_string(),
            });
        }
    }
}

/// Announce a fresh snapshot when the store revision moved this frame.
pub fn publish_console_changes(
    mut state: ResMut<ConsoleState>,
    mut updated: MessageWriter<SnapshotUpdatedEvent>,
) {
    let revision = state.console.store().revision();
    if revision == state.published_revision {
        return;
    }
    state.published_revision = revision;
    tracing::debug!("Console records changed, revision={revision}");
    updated.write(SnapshotUpdatedEvent {
        snapshot: state.console.snapshot(),
    });
}

/// Advance the touch generator by one frame.
///
/// Without a `Time` resource the tick carries a zero delta, which is all the
/// per-frame rate needs.
pub fn advance_touch_vector(time: Option<Res<Time>>, mut touch: ResMut<TouchState>) {
    let delta = time.map_or(0.0, |t| t.delta_secs());
    touch.generator.tick(Tick::from_secs(delta));
}

/// Hand the current records and touch vector to the installed sink.
pub fn push_effect_frame(
    state: Res<ConsoleState>,
    touch: Res<TouchState>,
    sink: Option<ResMut<EffectSinkSlot>>,
) {
    let Some(mut sink) = sink else {
        return;
    };
    if !touch.generator.is_running() {
        return;
    }
    let frame = state.console.effect_frame(touch.generator.vector());
    sink.apply(&frame);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use shine_core::{EffectFrame, GlareKey, ParamId, RecordId};

    use super::*;
    use crate::ShinePlugin;

    fn app_with_sink() -> (App, Arc<Mutex<Vec<EffectFrame>>>) {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&frames);

        let mut app = App::new();
        app.add_plugins(ShinePlugin::default())
            .insert_resource(EffectSinkSlot::new(move |frame: &EffectFrame| {
                captured.lock().push(frame.clone());
            }));
        (app, frames)
    }

    #[test]
    fn test_frame_pushed_every_update() {
        let (mut app, frames) = app_with_sink();
        for _ in 0..3 {
            app.update();
        }
        let frames = frames.lock();
        assert_eq!(frames.len(), 3);
        for frame in frames.iter() {
            assert!((frame.touch.length() - 0.5).abs() < 1e-4);
        }
        assert_eq!(app.world().resource::<TouchState>().generator.frames(), 3);
    }

    #[test]
    fn test_command_reaches_same_frame() {
        let (mut app, frames) = app_with_sink();
        app.world_mut().write_message(ConsoleCommand::SliderMoved {
            param: ParamId::Glare(GlareKey::GlowPower),
            value: 5.556,
        });
        app.update();

        assert_eq!(frames.lock()[0].glare.glow_power, 5.56);
        let state = app.world().resource::<ConsoleState>();
        assert_eq!(state.published_revision, 1);
    }

    #[test]
    fn test_bad_pick_reported_not_applied() {
        let (mut app, _frames) = app_with_sink();
        app.world_mut().write_message(ConsoleCommand::PickMaskColor {
            rgb: "rgb(1)".to_string(),
        });
        app.update();

        let state = app.world().resource::<ConsoleState>();
        assert_eq!(state.console.store().revision(), 0);
        assert_eq!(state.published_revision, 0);
    }

    #[test]
    fn test_reset_publishes_snapshot() {
        let (mut app, _frames) = app_with_sink();
        app.world_mut().write_message(ConsoleCommand::TextEdited {
            param: ParamId::Tolerance,
            text: "4".to_string(),
        });
        app.update();
        app.world_mut().write_message(ConsoleCommand::ResetRecord {
            record: RecordId::Tolerance,
        });
        app.update();

        let state = app.world().resource::<ConsoleState>();
        let view = state.console.field(ParamId::Tolerance);
        assert_eq!(view.value, 1.0);
        assert_eq!(view.text, "1");
        assert_eq!(state.published_revision, 2);
    }

    #[test]
    fn test_unmount_stops_frames() {
        let (mut app, frames) = app_with_sink();
        app.update();
        app.world_mut().write_message(ConsoleCommand::Unmount);
        app.update();
        app.update();

        assert!(!app.world().resource::<TouchState>().generator.is_running());
        assert_eq!(frames.lock().len(), 1);
    }
}
