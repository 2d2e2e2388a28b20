//! # Glaze Effects
//!
//! Named visual effects layered onto render targets.
//!
//! An effect is a small [`EffectModifier`] that writes per-object property
//! overrides and needs a set of shader keywords enabled. The
//! [`EffectEngine`] keeps, for each [`RenderTarget`], the original material and
//! the active modifiers, and assigns the target the cached material variant
//! with the union of their keywords. Several effects compose on one target
//! and any subset can be removed while the others stay in place.
//!
//! ```ignore
//! let engine = Arc::new(Mutex::new(EffectEngine::with_builtin_effects()));
//! EffectEngine::attach(&engine, &scheduler);
//!
//! let args = ValueTable::build([Argument::new("BlendColor", Color::RED)])?;
//! engine.lock().apply_effect("BlendColor", &mut sprite, &args);
//! ```

mod cache;
mod config;
pub mod effects;
mod engine;
mod error;
mod modifier;
mod registry;
mod target;

pub use cache::{CacheStats, MaterialVariantCache};
pub use config::{ConfigError, EngineConfig};
pub use engine::{ApplyOutcome, EffectEngine, UPDATE_CALLBACK_NAME};
pub use error::EffectError;
pub use modifier::{EffectModifier, EffectType, OverlayPolicy};
pub use registry::{EffectDescriptor, EffectFactory, EffectRegistry};
pub use target::{RenderTarget, TargetId};
