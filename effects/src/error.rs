//! Effect error types.

/// Errors reported by the effect registry and engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EffectError {
    /// No effect with this name is registered.
    #[error("unknown effect: {0}")]
    UnknownEffect(String),
}
