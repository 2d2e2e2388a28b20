//! Shared host fixtures for the effect engine integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use glaze_core::material::ShaderMaterial;
use glaze_core::property::PropertyOverrides;
use glaze_core::value::{Argument, ValueTable};
use glaze_effects::{EffectEngine, RenderTarget, TargetId};

pub fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Minimal host object: a material slot plus an override block.
#[derive(Debug)]
pub struct TestRenderer {
    pub id: TargetId,
    pub material: Arc<ShaderMaterial>,
    pub overrides: PropertyOverrides,
}

impl TestRenderer {
    pub fn new(id: u64, material: &Arc<ShaderMaterial>) -> Self {
        Self {
            id: TargetId(id),
            material: material.clone(),
            overrides: PropertyOverrides::new(),
        }
    }
}

impl RenderTarget for TestRenderer {
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

pub fn base_material(name: &str) -> Arc<ShaderMaterial> {
    Arc::new(ShaderMaterial::new("sprite").with_name(name))
}

pub fn engine() -> EffectEngine<ShaderMaterial> {
    EffectEngine::with_builtin_effects()
}

pub fn args(arguments: impl IntoIterator<Item = Argument>) -> ValueTable {
    ValueTable::build(arguments).expect("test arguments must have unique names")
}
