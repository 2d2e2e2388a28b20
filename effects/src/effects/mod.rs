//! Built-in effects.
//!
//! - [`BlendColor`]: tints the target with a blend color (`Overlay`)
//! - [`Pulse`]: animated pulse of a color over a frame period (`Ignore`)

mod blend_color;
mod pulse;

pub use blend_color::BlendColor;
pub use pulse::Pulse;

/// Shader property and argument names shared by the built-in effects.
pub mod names {
    /// Blend color override and argument.
    pub const BLEND_COLOR: &str = "BlendColor";
    /// Pulse color override and argument.
    pub const PULSE_COLOR: &str = "PulseColor";
    /// Pulse intensity override (0 to 1), driven per frame.
    pub const PULSE_INTENSITY: &str = "PulseIntensity";
    /// Pulse period in frames (int argument).
    pub const PERIOD: &str = "Period";
    /// Pulse duration in frames, 0 for unbounded (int argument).
    pub const FRAMES: &str = "Frames";
}
