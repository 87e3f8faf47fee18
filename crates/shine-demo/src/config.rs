//! Application configuration for the demo.

use std::time::Duration;

use bevy::prelude::*;
use shine_core::AngularRate;

/// Default WebSocket port for the IPC bridge.
const DEFAULT_WS_PORT: u16 = 9410;
/// Default frame rate of the schedule runner.
const DEFAULT_FRAME_RATE: f64 = 60.0;

/// Runtime configuration for the shine demo host.
#[derive(Resource, Clone, Debug)]
pub struct AppConfig {
    /// WebSocket port for console <-> UI IPC.
    pub ws_port: u16,
    /// Frames per second delivered by the schedule runner.
    pub frame_rate: f64,
    /// How the touch orbit advances.
    pub angular_rate: AngularRate,
}

impl AppConfig {
    /// Time between scheduled frames.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ws_port: std::env::var("SHINE_WS_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_WS_PORT),
            frame_rate: std::env::var("SHINE_FRAME_RATE")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|hz: &f64| hz.is_finite() && *hz > 0.0)
                .unwrap_or(DEFAULT_FRAME_RATE),
            angular_rate: parse_angular_rate(std::env::var("SHINE_ANGULAR_RATE").ok().as_deref()),
        }
    }
}

/// `frame` (or unset) keeps the per-frame step; a number is radians per second.
fn parse_angular_rate(raw: Option<&str>) -> AngularRate {
    match raw.map(str::trim) {
        None | Some("") | Some("frame") => AngularRate::default(),
        Some(s) => match s.parse::<f32>() {
            Ok(velocity) if velocity.is_finite() => AngularRate::PerSecond(velocity),
            _ => {
                tracing::warn!("Ignoring SHINE_ANGULAR_RATE={s:?}, using per-frame rate");
                AngularRate::default()
            }
        },
    }
}
