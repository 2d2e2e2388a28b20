use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use glaze_core::material::{KeywordSet, ShaderMaterial};
use glaze_core::property::PropertyOverrides;
use glaze_core::value::ValueTable;
use glaze_effects::{EffectEngine, MaterialVariantCache, RenderTarget, TargetId};

struct Sprite {
    id: TargetId,
    material: Arc<ShaderMaterial>,
    overrides: PropertyOverrides,
}

impl RenderTarget for Sprite {
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

fn sprites(count: u64, base: &Arc<ShaderMaterial>) -> Vec<Sprite> {
    (0..count)
        .map(|i| Sprite {
            id: TargetId(i),
            material: base.clone(),
            overrides: PropertyOverrides::new(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Variant cache
// ---------------------------------------------------------------------------

fn bench_cache_hit(c: &mut Criterion) {
    let mut cache = MaterialVariantCache::new(false);
    let base = Arc::new(ShaderMaterial::new("sprite"));
    let keywords: KeywordSet = ["BLEND_COLOR", "PULSE", "OUTLINE"].into_iter().collect();
    cache.resolve(&keywords, &base);

    c.bench_function("cache_resolve_hit", |b| {
        b.iter(|| black_box(cache.resolve(black_box(&keywords), &base)));
    });
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

fn bench_apply_remove(c: &mut Criterion) {
    let base = Arc::new(ShaderMaterial::new("sprite"));
    let mut targets = sprites(64, &base);
    let mut engine: EffectEngine<ShaderMaterial> = EffectEngine::with_builtin_effects();
    let args = ValueTable::new();

    c.bench_function("apply_remove_64_targets", |b| {
        b.iter(|| {
            for target in targets.iter_mut() {
                engine.apply_effect("BlendColor", target, &args);
            }
            for target in targets.iter_mut() {
                engine.remove_effect("BlendColor", target);
            }
        });
    });
}

fn bench_update_animated(c: &mut Criterion) {
    let base = Arc::new(ShaderMaterial::new("sprite"));
    let mut targets = sprites(512, &base);
    let mut engine: EffectEngine<ShaderMaterial> = EffectEngine::with_builtin_effects();
    for target in targets.iter_mut() {
        engine.apply_effect("Pulse", target, &ValueTable::new());
    }

    c.bench_function("update_512_pulses", |b| {
        b.iter(|| black_box(engine.update()));
    });
}

criterion_group!(cache, bench_cache_hit);
criterion_group!(engine, bench_apply_remove, bench_update_animated);

criterion_main!(cache, engine);
