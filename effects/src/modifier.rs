//! The effect modifier contract.
//!
//! An [`EffectModifier`] is one active effect on one render target. The
//! engine creates it on first application, calls [`apply`](EffectModifier::apply)
//! once, optionally [`update_arguments`](EffectModifier::update_arguments) on
//! re-application, and finally [`remove`](EffectModifier::remove) once.

use glaze_core::property::PropertyOverrides;
use glaze_core::value::ValueTable;

/// What happens when an already active effect is applied again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayPolicy {
    /// Re-application refreshes the effect's arguments in place.
    Overlay,
    /// Re-application is a no-op.
    Ignore,
}

/// One visual effect's state on one target.
pub trait EffectModifier: Send + 'static {
    /// Effect name, as registered.
    fn name(&self) -> &str;

    /// Shader keywords this effect needs enabled on the target's material.
    ///
    /// The engine uses the keywords of the effect's registry descriptor; for
    /// types registered with [`EffectRegistry::register`](crate::EffectRegistry::register)
    /// the two agree.
    fn keywords(&self) -> &[&str];

    /// Re-application policy. As with keywords, the descriptor's value is the
    /// one the engine acts on.
    fn overlay_policy(&self) -> OverlayPolicy;

    /// Captures whatever override state `remove` must restore, then applies
    /// the effect's overrides.
    fn apply(&mut self, overrides: &PropertyOverrides, args: &ValueTable);

    /// Restores the state captured by `apply`.
    fn remove(&mut self, overrides: &PropertyOverrides);

    /// Re-applies new argument values without re-capturing state.
    ///
    /// Only called for [`OverlayPolicy::Overlay`] effects. Effects with that
    /// policy must override this; the default is a contract violation.
    fn update_arguments(&mut self, overrides: &PropertyOverrides, args: &ValueTable) {
        let _ = (overrides, args);
        log::error!(
            "effect {} does not support update_arguments but was re-applied",
            self.name()
        );
        debug_assert!(
            false,
            "effect {} does not implement update_arguments",
            self.name()
        );
    }

    /// Whether the engine should drive [`per_frame_update`](Self::per_frame_update).
    /// Queried once, right after `apply`.
    fn wants_per_frame_update(&self) -> bool {
        false
    }

    /// Advances the effect by one frame. Returning `false` stops further
    /// per-frame calls for this activation; the effect itself stays active.
    fn per_frame_update(&mut self) -> bool {
        false
    }
}

/// Static description of a concrete effect type, used for registration.
pub trait EffectType: EffectModifier + Default {
    /// Registry key.
    const NAME: &'static str;
    /// Keywords enabled while the effect is active.
    const KEYWORDS: &'static [&'static str];
    /// Re-application policy.
    const OVERLAY: OverlayPolicy;
}
