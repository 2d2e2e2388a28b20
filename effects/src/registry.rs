//! Name-keyed effect factories.

use std::collections::HashMap;

use glaze_core::material::KeywordSet;

use crate::effects::{BlendColor, Pulse};
use crate::error::EffectError;
use crate::modifier::{EffectModifier, EffectType, OverlayPolicy};

/// Constructs a fresh modifier instance.
pub type EffectFactory = Box<dyn Fn() -> Box<dyn EffectModifier> + Send + Sync>;

/// Everything the engine knows about an effect before instantiating it.
pub struct EffectDescriptor {
    name: String,
    keywords: KeywordSet,
    overlay: OverlayPolicy,
    factory: EffectFactory,
}

impl EffectDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    pub fn overlay_policy(&self) -> OverlayPolicy {
        self.overlay
    }

    /// Instantiates a new, not yet applied modifier.
    pub fn create(&self) -> Box<dyn EffectModifier> {
        (self.factory)()
    }
}

impl std::fmt::Debug for EffectDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectDescriptor")
            .field("name", &self.name)
            .field("keywords", &self.keywords)
            .field("overlay", &self.overlay)
            .finish_non_exhaustive()
    }
}

/// Effect name → descriptor.
#[derive(Debug, Default)]
pub struct EffectRegistry {
    effects: HashMap<String, EffectDescriptor>,
}

impl EffectRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding [`BlendColor`] and [`Pulse`].
    pub fn with_builtin_effects() -> Self {
        let mut registry = Self::new();
        registry.register::<BlendColor>();
        registry.register::<Pulse>();
        registry
    }

    /// Registers a concrete effect type under [`EffectType::NAME`].
    pub fn register<E: EffectType>(&mut self) {
        self.register_factory(
            E::NAME,
            E::KEYWORDS.iter().copied().collect(),
            E::OVERLAY,
            Box::new(|| Box::new(E::default())),
        );
    }

    /// Registers an effect from its parts. Replaces any effect of the same name.
    pub fn register_factory(
        &mut self,
        name: impl Into<String>,
        keywords: KeywordSet,
        overlay: OverlayPolicy,
        factory: EffectFactory,
    ) {
        let name = name.into();
        let descriptor = EffectDescriptor {
            name: name.clone(),
            keywords,
            overlay,
            factory,
        };
        if self.effects.insert(name.clone(), descriptor).is_some() {
            log::warn!("effect {name} registered twice, replacing previous factory");
        }
    }

    pub fn get(&self, name: &str) -> Result<&EffectDescriptor, EffectError> {
        self.effects
            .get(name)
            .ok_or_else(|| EffectError::UnknownEffect(name.to_owned()))
    }

    /// Instantiates the named effect.
    pub fn create(&self, name: &str) -> Result<Box<dyn EffectModifier>, EffectError> {
        self.get(name).map(EffectDescriptor::create)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.effects.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.effects.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
