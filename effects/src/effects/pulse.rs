use std::f32::consts::TAU;

use glaze_core::math::Color;
use glaze_core::property::{PropertyOverrides, PropertyValue};
use glaze_core::value::ValueTable;

use super::names;
use crate::modifier::{EffectModifier, EffectType, OverlayPolicy};

const DEFAULT_PERIOD: i32 = 30;

/// Pulses a color on the target.
///
/// Arguments: `PulseColor` (color, default white), `Period` (int frames,
/// default 30, at least 1) and `Frames` (int, default 0 = until removed).
/// `PulseIntensity` follows a raised cosine starting at 0; once `Frames`
/// frames have passed it is set to 0 and per-frame updates stop.
#[derive(Debug, Default)]
pub struct Pulse {
    /// Handle kept for per-frame writes; `None` when not applied.
    overrides: Option<PropertyOverrides>,
    previous_color: Option<PropertyValue>,
    previous_intensity: Option<PropertyValue>,
    period: u32,
    /// 0 means unbounded.
    total_frames: u32,
    /// Frames since `apply`, saturating.
    frame: u32,
    /// Position within the current period, always `< period`.
    phase: u32,
}

impl Pulse {
    /// Current frame count since `apply`.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    fn intensity_at(phase: u32, period: u32) -> f32 {
        let t = phase as f32 / period as f32;
        0.5 - 0.5 * (TAU * t).cos()
    }
}

impl EffectType for Pulse {
    const NAME: &'static str = "Pulse";
    const KEYWORDS: &'static [&'static str] = &["PULSE"];
    const OVERLAY: OverlayPolicy = OverlayPolicy::Ignore;
}

impl EffectModifier for Pulse {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn keywords(&self) -> &[&str] {
        Self::KEYWORDS
    }

    fn overlay_policy(&self) -> OverlayPolicy {
        Self::OVERLAY
    }

    fn apply(&mut self, overrides: &PropertyOverrides, args: &ValueTable) {
        self.period = args.get_int(names::PERIOD, DEFAULT_PERIOD).max(1) as u32;
        self.total_frames = args.get_int(names::FRAMES, 0).max(0) as u32;
        self.frame = 0;
        self.phase = 0;

        let mut block = overrides.lock();
        self.previous_color = block.get(names::PULSE_COLOR);
        self.previous_intensity = block.get(names::PULSE_INTENSITY);
        block.set_color(
            names::PULSE_COLOR,
            args.get_color(names::PULSE_COLOR, Color::WHITE),
        );
        block.set_float(names::PULSE_INTENSITY, 0.0);
        drop(block);

        self.overrides = Some(overrides.clone());
    }

    fn remove(&mut self, overrides: &PropertyOverrides) {
        let mut block = overrides.lock();
        block.restore(names::PULSE_COLOR, self.previous_color.take());
        block.restore(names::PULSE_INTENSITY, self.previous_intensity.take());
        self.overrides = None;
    }

    fn wants_per_frame_update(&self) -> bool {
        true
    }

    fn per_frame_update(&mut self) -> bool {
        let Some(overrides) = &self.overrides else {
            return false;
        };

        self.frame = self.frame.saturating_add(1);
        self.phase = (self.phase + 1) % self.period;
        if self.total_frames > 0 && self.frame >= self.total_frames {
            overrides.lock().set_float(names::PULSE_INTENSITY, 0.0);
            return false;
        }

        let intensity = Self::intensity_at(self.phase, self.period);
        overrides.lock().set_float(names::PULSE_INTENSITY, intensity);
        true
    }
}
