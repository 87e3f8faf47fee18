//! Errors raised by the shine control plane.

#[derive(Debug, thiserror::Error)]
pub enum ShineError {
    #[error("malformed color string {input:?}: expected 3 integers, found {found}")]
    MalformedColor { input: String, found: usize },
    #[error("color channel {value} is outside 0..=255")]
    ChannelOutOfRange { value: String },
}

pub type Result<T> = std::result::Result<T, ShineError>;
