//! Memoized keyword variants of base materials.

use std::collections::HashMap;
use std::sync::Arc;

use glaze_core::material::{KeywordSet, Material, MaterialId};

/// Hit/miss counters for a [`MaterialVariantCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// `(keyword set, base material)` → derived material.
///
/// Each keyword combination has at most one derived instance per base
/// material. Base materials are never modified; the empty keyword set
/// resolves to the base itself.
pub struct MaterialVariantCache<M: Material> {
    variants: HashMap<KeywordSet, HashMap<MaterialId, Arc<M>>>,
    stats: CacheStats,
    log_creation: bool,
}

impl<M: Material> MaterialVariantCache<M> {
    pub fn new(log_creation: bool) -> Self {
        Self {
            variants: HashMap::new(),
            stats: CacheStats::default(),
            log_creation,
        }
    }

    /// Returns the variant of `base` with `keywords` enabled, creating it on
    /// first use.
    pub fn resolve(&mut self, keywords: &KeywordSet, base: &Arc<M>) -> Arc<M> {
        if keywords.is_empty() {
            return base.clone();
        }

        let per_base = self.variants.entry(keywords.clone()).or_default();
        if let Some(variant) = per_base.get(&base.id()) {
            self.stats.hits += 1;
            return variant.clone();
        }

        self.stats.misses += 1;
        let variant = Arc::new(base.create_variant(keywords));
        if self.log_creation {
            log::debug!(
                "created material variant {:?} of {:?} with keywords [{keywords}]",
                variant.id(),
                base.id()
            );
        }
        per_base.insert(base.id(), variant.clone());
        variant
    }

    /// Cached variant for the pair, if one exists.
    pub fn get(&self, keywords: &KeywordSet, base: MaterialId) -> Option<&Arc<M>> {
        self.variants.get(keywords)?.get(&base)
    }

    /// Number of derived materials held.
    pub fn len(&self) -> usize {
        self.variants.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drops every variant derived from `base`. Returns how many were dropped.
    pub fn evict_base(&mut self, base: MaterialId) -> usize {
        let mut evicted = 0;
        self.variants.retain(|_, per_base| {
            if per_base.remove(&base).is_some() {
                evicted += 1;
            }
            !per_base.is_empty()
        });
        evicted
    }

    pub fn clear(&mut self) {
        self.variants.clear();
    }
}

impl<M: Material> Default for MaterialVariantCache<M> {
    fn default() -> Self {
        Self::new(true)
    }
}
