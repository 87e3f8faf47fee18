//! Frame-driven orbiting touch point.
//!
//! Each delivered frame advances an angle and places a simulated touch on a
//! circle around the origin:
//!
//! ```text
//! angle  = (angle + step) mod 2π
//! vector = origin + (cos angle, sin angle) × radius
//! ```
//!
//! The host feeds [`Tick`]s from its render loop. Skipped frames are not
//! caught up; the next delivered tick simply advances once.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Radians per frame in the reference behaviour.
pub const DEFAULT_FRAME_STEP: f32 = 0.1;

/// Orbit radius of the simulated touch.
pub const ORBIT_RADIUS: f32 = 0.5;

/// How fast the angle advances.
///
/// `PerFrame` ties orbit speed to the display refresh rate, so faster
/// displays orbit faster. `PerSecond` uses the tick's wall-clock delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "radians", rename_all = "camelCase")]
pub enum AngularRate {
    PerFrame(f32),
    PerSecond(f32),
}

impl AngularRate {
    fn step(self, tick: Tick) -> f32 {
        match self {
            Self::PerFrame(step) => step,
            Self::PerSecond(velocity) => velocity * tick.delta_secs,
        }
    }
}

impl Default for AngularRate {
    fn default() -> Self {
        Self::PerFrame(DEFAULT_FRAME_STEP)
    }
}

/// One delivered frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tick {
    /// Wall-clock time since the previous frame.
    pub delta_secs: f32,
}

impl Tick {
    pub fn from_secs(delta_secs: f32) -> Self {
        Self { delta_secs }
    }
}

/// Derives the touch vector from an angle accumulator, one step per tick.
#[derive(Debug, Clone)]
pub struct FrameDrivenVectorGenerator {
    rate: AngularRate,
    angle: f32,
    origin: Vec2,
    radius: f32,
    vector: Vec2,
    frames: u64,
    running: bool,
}

impl FrameDrivenVectorGenerator {
    pub fn new(rate: AngularRate) -> Self {
        Self {
            rate,
            angle: 0.0,
            origin: Vec2::ZERO,
            radius: ORBIT_RADIUS,
            vector: Vec2::ZERO,
            frames: 0,
            running: true,
        }
    }

    /// Current angle in `[0, 2π)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Last generated vector. Zero before the first tick.
    pub fn vector(&self) -> Vec2 {
        self.vector
    }

    /// Ticks consumed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop consuming ticks. The last vector is kept.
    pub fn stop(&mut self) {
        if self.running {
            tracing::info!("touch generator stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    /// Advance one frame and return the new vector.
    pub fn tick(&mut self, tick: Tick) -> Vec2 {
        if !self.running {
            return self.vector;
        }
        self.angle = (self.angle + self.rate.step(tick)).rem_euclid(TAU);
        self.vector = self.origin + Vec2::from_angle(self.angle) * self.radius;
        self.frames += 1;
        tracing::trace!("touch frame {}: {:?}", self.frames, self.vector);
        self.vector
    }
}

impl Default for FrameDrivenVectorGenerator {
    fn default() -> Self {
        Self::new(AngularRate::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_starts_at_zero_origin() {
        let generator = FrameDrivenVectorGenerator::default();
        assert_eq!(generator.vector(), Vec2::ZERO);
        assert_eq!(generator.angle(), 0.0);
    }

    #[test]
    fn test_first_tick_uses_incremented_angle() {
        let mut generator = FrameDrivenVectorGenerator::default();
        let v = generator.tick(Tick::default());
        assert!((v.x - 0.1_f32.cos() * 0.5).abs() < EPSILON);
        assert!((v.y - 0.1_f32.sin() * 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_angle_accumulates_and_wraps() {
        let mut generator = FrameDrivenVectorGenerator::default();
        for n in 1..=200_u32 {
            generator.tick(Tick::from_secs(1.0 / 60.0));
            let expected = (n as f32 * DEFAULT_FRAME_STEP).rem_euclid(TAU);
            let diff = (generator.angle() - expected).abs();
            // Near the wrap point either side of 2π is the same angle.
            let diff = diff.min(TAU - diff);
            assert!(diff < EPSILON, "frame {n}: {} vs {expected}", generator.angle());
            assert!(generator.angle() < TAU);
        }
        assert_eq!(generator.frames(), 200);
    }

    #[test]
    fn test_magnitude_is_constant() {
        let mut generator = FrameDrivenVectorGenerator::default();
        for _ in 0..500 {
            let v = generator.tick(Tick::default());
            assert!((v.length() - ORBIT_RADIUS).abs() < EPSILON);
        }
    }

    #[test]
    fn test_per_second_rate_uses_delta() {
        let mut generator = FrameDrivenVectorGenerator::new(AngularRate::PerSecond(1.0));
        generator.tick(Tick::from_secs(0.25));
        generator.tick(Tick::from_secs(0.5));
        assert!((generator.angle() - 0.75).abs() < EPSILON);

        // A skipped frame is not caught up: one tick, one step.
        let mut per_frame = FrameDrivenVectorGenerator::default();
        per_frame.tick(Tick::from_secs(0.5));
        assert!((per_frame.angle() - DEFAULT_FRAME_STEP).abs() < EPSILON);
    }

    #[test]
    fn test_stopped_generator_ignores_ticks() {
        let mut generator = FrameDrivenVectorGenerator::default();
        let last = generator.tick(Tick::default());
        generator.stop();
        assert_eq!(generator.tick(Tick::default()), last);
        assert_eq!(generator.frames(), 1);
        assert!(!generator.is_running());
    }
}
