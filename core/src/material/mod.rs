//! Material identity and keyword variants.
//!
//! - [`Material`]: the capability the effect engine needs from a host
//!   material: a stable identity and the ability to clone itself into a
//!   keyword variant
//! - [`MaterialId`]: identity of one material instance
//! - [`KeywordSet`]: canonical (sorted, deduplicated) shader keyword set
//! - [`ShaderMaterial`]: a CPU-side reference material used by headless hosts
//!   and tests
//!
//! Keyword activation is a material-level operation, so a variant is always a
//! new material instance. Base materials are never modified.

mod keywords;

use std::sync::atomic::{AtomicU64, Ordering};

pub use keywords::KeywordSet;

use crate::property::PropertyBlock;

/// Identity of a material instance.
///
/// Two materials compare equal by id only if they are the same instance; a
/// variant created from a base gets a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(u64);

impl MaterialId {
    /// Allocates a new process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// A host material that can be specialized by shader keywords.
pub trait Material: Send + Sync + 'static {
    /// Stable identity of this instance.
    fn id(&self) -> MaterialId;

    /// Creates a new material instance: a copy of `self` with `keywords`
    /// enabled in addition to its own. Must not modify `self`.
    fn create_variant(&self, keywords: &KeywordSet) -> Self
    where
        Self: Sized;
}

/// CPU-side material: shader name, enabled keywords and default properties.
#[derive(Debug, Clone)]
pub struct ShaderMaterial {
    id: MaterialId,
    name: Option<String>,
    shader: String,
    keywords: KeywordSet,
    properties: PropertyBlock,
}

impl ShaderMaterial {
    /// Creates a material for `shader` with no keywords enabled.
    pub fn new(shader: impl Into<String>) -> Self {
        Self {
            id: MaterialId::next(),
            name: None,
            shader: shader.into(),
            keywords: KeywordSet::new(),
            properties: PropertyBlock::new(),
        }
    }

    /// Set the material name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Enable a keyword on this material.
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.insert(keyword);
        self
    }

    /// Set the default property values.
    #[must_use]
    pub fn with_properties(mut self, properties: PropertyBlock) -> Self {
        self.properties = properties;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn shader(&self) -> &str {
        &self.shader
    }

    /// Enabled keywords.
    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Default property values (not per-object overrides).
    pub fn properties(&self) -> &PropertyBlock {
        &self.properties
    }
}

impl Material for ShaderMaterial {
    fn id(&self) -> MaterialId {
        self.id
    }

    fn create_variant(&self, keywords: &KeywordSet) -> Self {
        let name = self
            .name
            .as_ref()
            .map(|name| format!("{name} [{keywords}]"));
        Self {
            id: MaterialId::next(),
            name,
            shader: self.shader.clone(),
            keywords: self.keywords.union(keywords),
            properties: self.properties.clone(),
        }
    }
}
