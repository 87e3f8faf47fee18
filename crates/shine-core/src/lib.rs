//! Shine Core — parameter synchronization for the holographic shine console.
//!
//! This crate holds the control plane that sits between an operator and the
//! shine effect renderer: dual text/slider numeric fields, the color-picker
//! transforms, the orbiting touch generator, and the record store the
//! renderer reads from. No framework or renderer dependencies.

pub mod color;
pub mod console;
pub mod error;
pub mod field;
pub mod numeric;
pub mod params;
pub mod sink;
pub mod store;
pub mod touch;

// Re-exports for convenience.
pub use color::{BaseColor, ColorSample, DetectionChannelCoefficients, HsvTriplet};
pub use console::{ConsoleSnapshot, ControlConsole};
pub use error::ShineError;
pub use field::{FieldView, NumericSyncField};
pub use params::{
    ColorMaskOptions, DetectionChannelOptions, DetectionKey, GlareKey, GlareOptions, ParamId,
    RecordId, RgbTolerance, SliderBounds, ToleranceKey,
};
pub use sink::EffectParameterSink;
pub use store::{ConfigurationStore, EffectFrame, RecordCell};
pub use touch::{AngularRate, FrameDrivenVectorGenerator, Tick};
