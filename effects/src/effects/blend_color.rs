use glaze_core::math::Color;
use glaze_core::property::{PropertyOverrides, PropertyValue};
use glaze_core::value::ValueTable;

use super::names;
use crate::modifier::{EffectModifier, EffectType, OverlayPolicy};

/// Blends the target toward a color.
///
/// Arguments: `BlendColor` (color, default white). Writes the `BlendColor`
/// override and enables `BLEND_COLOR`.
#[derive(Debug, Default)]
pub struct BlendColor {
    /// Override present before `apply`, restored by `remove`.
    previous: Option<PropertyValue>,
}

impl BlendColor {
    fn write(overrides: &PropertyOverrides, args: &ValueTable) {
        let color = args.get_color(names::BLEND_COLOR, Color::WHITE);
        overrides.lock().set_color(names::BLEND_COLOR, color);
    }
}

impl EffectType for BlendColor {
    const NAME: &'static str = "BlendColor";
    const KEYWORDS: &'static [&'static str] = &["BLEND_COLOR"];
    const OVERLAY: OverlayPolicy = OverlayPolicy::Overlay;
}

impl EffectModifier for BlendColor {
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
        self.previous = overrides.get(names::BLEND_COLOR);
        Self::write(overrides, args);
    }

    fn remove(&mut self, overrides: &PropertyOverrides) {
        overrides
            .lock()
            .restore(names::BLEND_COLOR, self.previous.take());
    }

    fn update_arguments(&mut self, overrides: &PropertyOverrides, args: &ValueTable) {
        Self::write(overrides, args);
    }
}
