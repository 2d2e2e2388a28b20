//! # Glaze Core
//!
//! Core types shared by the Glaze crates: math aliases, effect arguments,
//! per-object property overrides and keyword-variant materials.

pub mod material;
pub mod math;
pub mod property;
pub mod value;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
