//! Composition of effects on render targets.
//!
//! The engine tracks, per target, the material the target had before any
//! effect was applied (its base) and the set of active modifiers. Whenever
//! that set changes the target gets the base's variant for the union of the
//! active keywords, taken from a shared [`MaterialVariantCache`], so targets
//! with equal effect sets on equal bases share one material instance.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use glaze_core::material::{KeywordSet, Material};
use glaze_core::value::ValueTable;
use glaze_schedule::{Callback, CallbackScheduler, Phase};
use parking_lot::Mutex;

use crate::cache::MaterialVariantCache;
use crate::config::EngineConfig;
use crate::modifier::{EffectModifier, OverlayPolicy};
use crate::registry::EffectRegistry;
use crate::target::{RenderTarget, TargetId};

/// Name of the scheduler callback installed by [`EffectEngine::attach`].
pub const UPDATE_CALLBACK_NAME: &str = "glaze-effects.update";

/// Result of [`EffectEngine::apply_effect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// A new modifier was created and applied.
    Applied,
    /// The effect was already active; its arguments were refreshed.
    Updated,
    /// The effect was already active and ignores re-application.
    Ignored,
    /// No effect with this name is registered. Nothing changed.
    UnknownEffect,
}

/// An applied modifier with the keywords and policy its descriptor declared.
struct ActiveEffect {
    modifier: Box<dyn EffectModifier>,
    keywords: KeywordSet,
    overlay: OverlayPolicy,
}

struct TargetEntry<M> {
    base: Arc<M>,
    modifiers: BTreeMap<String, ActiveEffect>,
}

impl<M> TargetEntry<M> {
    fn keywords(&self) -> KeywordSet {
        let mut keywords = KeywordSet::new();
        for active in self.modifiers.values() {
            keywords.extend_from(&active.keywords);
        }
        keywords
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AnimatedKey {
    target: TargetId,
    effect: String,
}

/// Applies, refreshes and removes effects on host render targets.
pub struct EffectEngine<M: Material> {
    registry: EffectRegistry,
    config: EngineConfig,
    targets: HashMap<TargetId, TargetEntry<M>>,
    cache: MaterialVariantCache<M>,
    /// Modifiers driven by [`update`](Self::update), in activation order.
    animated: Vec<AnimatedKey>,
    attached: Option<(Phase, Callback)>,
}

impl<M: Material> EffectEngine<M> {
    pub fn new(registry: EffectRegistry, config: EngineConfig) -> Self {
        Self {
            registry,
            cache: MaterialVariantCache::new(config.log_variant_creation),
            config,
            targets: HashMap::new(),
            animated: Vec::new(),
            attached: None,
        }
    }

    /// Engine with the built-in effects and default config.
    pub fn with_builtin_effects() -> Self {
        Self::new(EffectRegistry::with_builtin_effects(), EngineConfig::default())
    }

    /// Applies `effect` to `target`, or re-applies it if already active.
    ///
    /// On first application the target's current material is captured as its
    /// base. Unknown effect names are logged and leave everything unchanged.
    pub fn apply_effect<T>(
        &mut self,
        effect: &str,
        target: &mut T,
        args: &ValueTable,
    ) -> ApplyOutcome
    where
        T: RenderTarget<Material = M>,
    {
        let descriptor = match self.registry.get(effect) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                log::error!("apply_effect on {:?}: {err}", target.target_id());
                return ApplyOutcome::UnknownEffect;
            }
        };

        let id = target.target_id();
        let overrides = target.overrides();
        let entry = self.targets.entry(id).or_insert_with(|| TargetEntry {
            base: target.material(),
            modifiers: BTreeMap::new(),
        });

        if let Some(active) = entry.modifiers.get_mut(effect) {
            return match active.overlay {
                OverlayPolicy::Ignore => ApplyOutcome::Ignored,
                OverlayPolicy::Overlay => {
                    active.modifier.update_arguments(&overrides, args);
                    ApplyOutcome::Updated
                }
            };
        }

        let mut modifier = descriptor.create();
        let mut keywords = entry.keywords();
        keywords.extend_from(descriptor.keywords());
        target.set_material(self.cache.resolve(&keywords, &entry.base));

        modifier.apply(&overrides, args);
        if modifier.wants_per_frame_update() {
            self.animated.push(AnimatedKey {
                target: id,
                effect: effect.to_owned(),
            });
        }
        entry.modifiers.insert(
            effect.to_owned(),
            ActiveEffect {
                modifier,
                keywords: descriptor.keywords().clone(),
                overlay: descriptor.overlay_policy(),
            },
        );

        log::debug!("applied {effect} to {id:?}, keywords [{keywords}]");
        ApplyOutcome::Applied
    }

    /// Removes one effect from `target`, restoring what it overrode and
    /// switching the target to the variant for the remaining effects.
    ///
    /// Returns `false` if the effect was not active on the target.
    pub fn remove_effect<T>(&mut self, effect: &str, target: &mut T) -> bool
    where
        T: RenderTarget<Material = M>,
    {
        let id = target.target_id();
        let Some(entry) = self.targets.get_mut(&id) else {
            return false;
        };
        let Some(mut active) = entry.modifiers.remove(effect) else {
            return false;
        };

        active.modifier.remove(&target.overrides());
        self.animated
            .retain(|key| !(key.target == id && key.effect == effect));

        let keywords = entry.keywords();
        target.set_material(self.cache.resolve(&keywords, &entry.base));
        if entry.modifiers.is_empty() {
            self.targets.remove(&id);
        }

        log::debug!("removed {effect} from {id:?}, keywords [{keywords}]");
        true
    }

    /// Removes every effect from `target`, restores its base material and
    /// clears all of its overrides.
    ///
    /// Returns `false` if the target had no active effects.
    pub fn remove_all_effects<T>(&mut self, target: &mut T) -> bool
    where
        T: RenderTarget<Material = M>,
    {
        let id = target.target_id();
        let Some(entry) = self.targets.remove(&id) else {
            return false;
        };

        let overrides = target.overrides();
        for mut active in entry.modifiers.into_values().rev() {
            active.modifier.remove(&overrides);
        }
        overrides.clear();
        target.set_material(entry.base);
        self.animated.retain(|key| key.target != id);

        log::debug!("removed all effects from {id:?}");
        true
    }

    /// Advances every animated modifier by one frame.
    ///
    /// Modifiers that report completion stop being updated once the pass is
    /// over; they stay active until removed. Returns how many were updated.
    pub fn update(&mut self) -> usize {
        let mut keep = Vec::with_capacity(self.animated.len());
        let mut updated = 0;
        for key in &self.animated {
            let modifier = self
                .targets
                .get_mut(&key.target)
                .and_then(|entry| entry.modifiers.get_mut(&key.effect));
            let alive = match modifier {
                Some(active) => {
                    updated += 1;
                    active.modifier.per_frame_update()
                }
                None => false,
            };
            keep.push(alive);
        }

        let mut keep = keep.into_iter();
        self.animated.retain(|_| keep.next().unwrap_or(false));
        updated
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Names of the effects active on `target`, sorted.
    pub fn active_effects(&self, target: TargetId) -> Vec<&str> {
        self.targets
            .get(&target)
            .map(|entry| entry.modifiers.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn is_active(&self, target: TargetId, effect: &str) -> bool {
        self.targets
            .get(&target)
            .is_some_and(|entry| entry.modifiers.contains_key(effect))
    }

    /// The material `target` had before its first effect, while it has any.
    pub fn base_material(&self, target: TargetId) -> Option<&Arc<M>> {
        self.targets.get(&target).map(|entry| &entry.base)
    }

    /// Number of targets with at least one active effect.
    pub fn tracked_targets(&self) -> usize {
        self.targets.len()
    }

    /// Number of modifiers currently driven per frame.
    pub fn animated_count(&self) -> usize {
        self.animated.len()
    }

    pub fn cache(&self) -> &MaterialVariantCache<M> {
        &self.cache
    }

    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Scheduler wiring
    // -----------------------------------------------------------------------

    /// Registers the engine's per-frame driver on `scheduler`, using the
    /// configured phase and priority.
    ///
    /// The callback holds only a weak reference; once the engine is dropped
    /// it does nothing. Attaching twice returns the existing callback.
    pub fn attach(engine: &Arc<Mutex<Self>>, scheduler: &CallbackScheduler) -> Callback {
        let mut guard = engine.lock();
        if let Some((_, callback)) = &guard.attached {
            log::warn!("effect engine already attached");
            return callback.clone();
        }

        let weak = Arc::downgrade(engine);
        let callback = Callback::named(UPDATE_CALLBACK_NAME, move || {
            let Some(engine) = weak.upgrade() else {
                return;
            };
            match engine.try_lock() {
                Some(mut engine) => {
                    engine.update();
                }
                None => log::warn!("effect engine locked during per-frame update, frame skipped"),
            };
        });

        let phase = guard.config.update_phase;
        scheduler.register_with_priority(phase, callback.clone(), guard.config.update_priority);
        guard.attached = Some((phase, callback.clone()));
        log::debug!(
            "effect engine attached to {phase:?} at priority {}",
            guard.config.update_priority
        );
        callback
    }

    /// Unregisters the driver installed by [`attach`](Self::attach).
    /// Returns `false` if the engine was not attached.
    pub fn detach(engine: &Arc<Mutex<Self>>, scheduler: &CallbackScheduler) -> bool {
        let Some((phase, callback)) = engine.lock().attached.take() else {
            return false;
        };
        scheduler.unregister(phase, &callback)
    }
}

impl<M: Material> Default for EffectEngine<M> {
    fn default() -> Self {
        Self::with_builtin_effects()
    }
}
