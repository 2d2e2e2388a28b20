//! # Glaze Demos
//!
//! Headless hosts driving the Glaze effect engine and scheduler.
//!
//! ## Available Demos
//!
//! - `overlay_demo` - Layers blend and pulse effects on a few sprites and
//!   logs their materials and overrides frame by frame

use std::sync::Arc;

use glaze_core::material::ShaderMaterial;
use glaze_core::property::PropertyOverrides;
use glaze_effects::{RenderTarget, TargetId};

/// Demos library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A sprite with no GPU behind it: a material slot and an override block.
#[derive(Debug)]
pub struct HeadlessSprite {
    id: TargetId,
    label: String,
    material: Arc<ShaderMaterial>,
    overrides: PropertyOverrides,
}

impl HeadlessSprite {
    pub fn new(id: u64, label: impl Into<String>, material: Arc<ShaderMaterial>) -> Self {
        Self {
            id: TargetId(id),
            label: label.into(),
            material,
            overrides: PropertyOverrides::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// One-line summary of what would be drawn this frame.
    pub fn describe(&self) -> String {
        let name = self.material.name().unwrap_or(self.material.shader());
        let mut overrides: Vec<String> = self
            .overrides
            .lock()
            .iter()
            .map(|(name, value)| format!("{name}={value:?}"))
            .collect();
        overrides.sort();
        format!("{}: {name} {{{}}}", self.label, overrides.join(", "))
    }
}

impl RenderTarget for HeadlessSprite {
    type Material = ShaderMaterial;

    fn target_id(&self) -> TargetId {
        self.id
    }

    fn material(&self) -> Arc<ShaderMaterial> {
        self.material.clone()
    }

    fn set_material(&mut self, material: Arc<ShaderMaterial>) {
        self.material = material;
    }

    fn overrides(&self) -> PropertyOverrides {
        self.overrides.clone()
    }
}
