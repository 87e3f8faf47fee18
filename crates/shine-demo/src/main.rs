//! Shine Demo — headless host for the shine control console.
//!
//! Runs the console on a fixed-rate Bevy schedule and serves it to a remote
//! operator UI over a WebSocket IPC bridge. A logging sink stands in for the
//! effect renderer.

mod config;
mod ipc;
mod sink;
mod ws_bridge;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use shine_bevy::ShinePlugin;
use shine_bevy::resources::EffectSinkSlot;
use shine_bevy::systems::{handle_console_commands, publish_console_changes};

use config::AppConfig;
use sink::FrameLogSink;
use ws_bridge::{
    OutboundUiMessages, flush_outbound_messages, forward_console_events, poll_inbound_messages,
};

fn main() -> AppExit {
    let config = AppConfig::default();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(config.frame_interval())))
        .add_plugins(LogPlugin::default())
        .add_plugins(ShinePlugin {
            angular_rate: config.angular_rate,
        })
        .insert_resource(EffectSinkSlot::new(FrameLogSink::new(config.frame_rate)))
        .init_resource::<OutboundUiMessages>();

    tracing::info!(
        "Shine console: {} Hz, rate={:?}, ws_port={}",
        config.frame_rate,
        config.angular_rate,
        config.ws_port
    );

    match ws_bridge::spawn_ws_server(config.ws_port) {
        Ok(bridge) => {
            app.insert_resource(bridge).add_systems(
                Update,
                (
                    poll_inbound_messages.before(handle_console_commands),
                    forward_console_events
                        .after(publish_console_changes)
                        .after(handle_console_commands),
                    flush_outbound_messages.after(forward_console_events),
                ),
            );
        }
        Err(e) => {
            tracing::error!("Failed to start WebSocket bridge on port {}: {e}", config.ws_port);
            tracing::warn!("Running without an operator UI");
        }
    }

    app.insert_resource(config).run()
}
