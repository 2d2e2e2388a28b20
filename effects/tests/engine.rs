//! Effect composition on render targets: application, overlay policy,
//! variant sharing and restoration.

mod common;

use std::sync::Arc;

use rstest::rstest;

use common::{args, base_material, engine, init_logging, TestRenderer};
use glaze_core::material::KeywordSet;
use glaze_core::math::Color;
use glaze_core::property::PropertyValue;
use glaze_core::value::{Argument, ValueTable};
use glaze_effects::effects::names;
use glaze_effects::{ApplyOutcome, EffectModifier, EffectType, OverlayPolicy};

#[test]
fn overlay_effect_updates_in_place() {
    init_logging();
    let mut engine = engine();
    let base = base_material("hero");
    let mut hero = TestRenderer::new(1, &base);

    let red = args([Argument::new(names::BLEND_COLOR, Color::RED)]);
    assert_eq!(engine.apply_effect("BlendColor", &mut hero, &red), ApplyOutcome::Applied);
    let variant = hero.material.clone();

    let black = args([Argument::new(names::BLEND_COLOR, Color::BLACK)]);
    assert_eq!(engine.apply_effect("BlendColor", &mut hero, &black), ApplyOutcome::Updated);

    assert!(Arc::ptr_eq(&hero.material, &variant));
    assert_eq!(engine.active_effects(hero.id), ["BlendColor"]);
    assert_eq!(hero.overrides.lock().get_color(names::BLEND_COLOR), Some(Color::BLACK));

    // Restoration still targets the state from before the first apply.
    assert!(engine.remove_effect("BlendColor", &mut hero));
    assert!(hero.overrides.lock().is_empty());
    assert!(Arc::ptr_eq(&hero.material, &base));
}

#[test]
fn ignore_effect_reapply_is_noop() {
    init_logging();
    let mut engine = engine();
    let base = base_material("hero");
    let mut hero = TestRenderer::new(1, &base);

    let slow = args([Argument::new(names::PERIOD, 40)]);
    assert_eq!(engine.apply_effect("Pulse", &mut hero, &slow), ApplyOutcome::Applied);
    engine.update();
    let material = hero.material.clone();
    let snapshot = hero.overrides.snapshot();

    let fast = args([
        Argument::new(names::PERIOD, 2),
        Argument::new(names::PULSE_COLOR, Color::RED),
    ]);
    assert_eq!(engine.apply_effect("Pulse", &mut hero, &fast), ApplyOutcome::Ignored);

    assert!(Arc::ptr_eq(&hero.material, &material));
    assert_eq!(hero.overrides.snapshot(), snapshot);
    assert_eq!(engine.animated_count(), 1);
    assert_eq!(engine.cache().len(), 1);
}

#[test]
fn unknown_effect_changes_nothing() {
    init_logging();
    let mut engine = engine();
    let base = base_material("hero");
    let mut hero = TestRenderer::new(1, &base);

    let outcome = engine.apply_effect("Dissolve", &mut hero, &ValueTable::new());
    assert_eq!(outcome, ApplyOutcome::UnknownEffect);
    assert!(Arc::ptr_eq(&hero.material, &base));
    assert!(hero.overrides.lock().is_empty());
    assert_eq!(engine.tracked_targets(), 0);
}

#[test]
fn application_order_does_not_affect_shared_variant() {
    init_logging();
    let mut engine = engine();
    let base = base_material("crate");
    let mut first = TestRenderer::new(1, &base);
    let mut second = TestRenderer::new(2, &base);
    let none = ValueTable::new();

    engine.apply_effect("BlendColor", &mut first, &none);
    engine.apply_effect("Pulse", &mut first, &none);
    engine.apply_effect("Pulse", &mut second, &none);
    engine.apply_effect("BlendColor", &mut second, &none);

    assert!(Arc::ptr_eq(&first.material, &second.material));
    assert!(!Arc::ptr_eq(&first.material, &base));
    let expected: KeywordSet = ["BLEND_COLOR", "PULSE"].into_iter().collect();
    assert_eq!(first.material.keywords(), &expected);

    // Base untouched.
    assert!(base.keywords().is_empty());
}

#[test]
fn targets_with_distinct_bases_get_distinct_variants() {
    init_logging();
    let mut engine = engine();
    let mut a = TestRenderer::new(1, &base_material("a"));
    let mut b = TestRenderer::new(2, &base_material("b"));

    engine.apply_effect("BlendColor", &mut a, &ValueTable::new());
    engine.apply_effect("BlendColor", &mut b, &ValueTable::new());

    assert!(!Arc::ptr_eq(&a.material, &b.material));
    assert_eq!(a.material.name(), Some("a [BLEND_COLOR]"));
    assert_eq!(engine.cache().len(), 2);
}

#[test]
fn remove_all_restores_base_and_clears_overrides() {
    init_logging();
    let mut engine = engine();
    let base = base_material("hero");
    let mut hero = TestRenderer::new(1, &base);
    // Host-owned override unrelated to any effect.
    hero.overrides.lock().set_float("Outline", 2.0);

    let none = ValueTable::new();
    engine.apply_effect("BlendColor", &mut hero, &none);
    engine.apply_effect("Pulse", &mut hero, &none);
    assert_eq!(engine.animated_count(), 1);

    assert!(engine.remove_all_effects(&mut hero));
    assert!(Arc::ptr_eq(&hero.material, &base));
    assert!(hero.overrides.lock().is_empty());
    assert_eq!(engine.tracked_targets(), 0);
    assert_eq!(engine.animated_count(), 0);
    assert!(!engine.remove_all_effects(&mut hero));
}

#[rstest]
#[case::absent(None)]
#[case::float(Some(PropertyValue::Float(0.25)))]
#[case::color(Some(PropertyValue::Color(Color::rgb(0.1, 0.2, 0.3))))]
fn apply_then_remove_restores_overrides(#[case] existing: Option<PropertyValue>) {
    init_logging();
    let mut engine = engine();
    let mut hero = TestRenderer::new(1, &base_material("hero"));
    hero.overrides.lock().set_float("Roughness", 0.5);
    if let Some(value) = existing {
        hero.overrides.set(names::BLEND_COLOR, value);
    }
    let before = hero.overrides.snapshot();

    let red = args([Argument::new(names::BLEND_COLOR, Color::RED)]);
    engine.apply_effect("BlendColor", &mut hero, &red);
    assert_ne!(hero.overrides.snapshot(), before);

    engine.remove_effect("BlendColor", &mut hero);
    assert_eq!(hero.overrides.snapshot(), before);
}

#[test]
fn removing_one_effect_keeps_the_others() {
    init_logging();
    let mut engine = engine();
    let base = base_material("hero");
    let mut hero = TestRenderer::new(1, &base);
    let none = ValueTable::new();

    engine.apply_effect("BlendColor", &mut hero, &none);
    engine.apply_effect("Pulse", &mut hero, &none);
    let both = hero.material.clone();

    engine.remove_effect("Pulse", &mut hero);
    assert_eq!(hero.material.keywords().canonical(), "BLEND_COLOR");
    assert!(engine.is_active(hero.id, "BlendColor"));
    assert!(!engine.is_active(hero.id, "Pulse"));
    assert_eq!(engine.animated_count(), 0);
    assert!(hero.overrides.lock().get(names::PULSE_INTENSITY).is_none());
    assert_eq!(hero.overrides.lock().get_color(names::BLEND_COLOR), Some(Color::WHITE));

    // Re-adding lands on the cached variant again.
    engine.apply_effect("Pulse", &mut hero, &none);
    assert!(Arc::ptr_eq(&hero.material, &both));
}

#[test]
fn base_is_captured_on_first_apply_only() {
    init_logging();
    let mut engine = engine();
    let base = base_material("hero");
    let mut hero = TestRenderer::new(1, &base);
    let none = ValueTable::new();

    engine.apply_effect("BlendColor", &mut hero, &none);
    engine.apply_effect("Pulse", &mut hero, &none);
    assert!(Arc::ptr_eq(engine.base_material(hero.id).unwrap(), &base));

    engine.remove_all_effects(&mut hero);
    assert!(engine.base_material(hero.id).is_none());
}

#[derive(Default)]
struct Outline {
    previous: Option<PropertyValue>,
}

impl EffectType for Outline {
    const NAME: &'static str = "Outline";
    const KEYWORDS: &'static [&'static str] = &["OUTLINE", "BLEND_COLOR"];
    const OVERLAY: OverlayPolicy = OverlayPolicy::Ignore;
}

impl EffectModifier for Outline {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn keywords(&self) -> &[&str] {
        Self::KEYWORDS
    }

    fn overlay_policy(&self) -> OverlayPolicy {
        Self::OVERLAY
    }

    fn apply(&mut self, overrides: &glaze_core::property::PropertyOverrides, args: &ValueTable) {
        self.previous = overrides.set(
            "OutlineWidth",
            PropertyValue::Float(args.get_float("Width", 1.0)),
        );
    }

    fn remove(&mut self, overrides: &glaze_core::property::PropertyOverrides) {
        overrides.lock().restore("OutlineWidth", self.previous.take());
    }
}

#[test]
fn custom_effects_share_keywords_with_builtins() {
    init_logging();
    let mut registry = glaze_effects::EffectRegistry::with_builtin_effects();
    registry.register::<Outline>();
    let mut engine: glaze_effects::EffectEngine<glaze_core::material::ShaderMaterial> =
        glaze_effects::EffectEngine::new(registry, Default::default());
    let mut hero = TestRenderer::new(1, &base_material("hero"));
    let none = ValueTable::new();

    engine.apply_effect("BlendColor", &mut hero, &none);
    engine.apply_effect("Outline", &mut hero, &none);
    assert_eq!(hero.material.keywords().canonical(), "BLEND_COLOR OUTLINE");

    // BLEND_COLOR is still needed by Outline.
    engine.remove_effect("BlendColor", &mut hero);
    assert_eq!(hero.material.keywords().canonical(), "BLEND_COLOR OUTLINE");
    assert_eq!(hero.overrides.lock().get_float("OutlineWidth"), Some(1.0));
}

fn tint_registry(overlay: OverlayPolicy) -> glaze_effects::EffectRegistry {
    let mut registry = glaze_effects::EffectRegistry::with_builtin_effects();
    registry.register_factory(
        "Tint",
        ["TINT"].into_iter().collect(),
        overlay,
        Box::new(|| Box::new(glaze_effects::effects::BlendColor::default())),
    );
    registry
}

#[test]
fn registered_keywords_persist_while_effect_is_active() {
    init_logging();
    let mut engine: glaze_effects::EffectEngine<glaze_core::material::ShaderMaterial> =
        glaze_effects::EffectEngine::new(tint_registry(OverlayPolicy::Overlay), Default::default());
    let mut hero = TestRenderer::new(1, &base_material("hero"));
    let none = ValueTable::new();

    engine.apply_effect("Tint", &mut hero, &none);
    assert_eq!(hero.material.keywords().canonical(), "TINT");

    engine.apply_effect("Pulse", &mut hero, &none);
    assert_eq!(hero.material.keywords().canonical(), "PULSE TINT");

    engine.remove_effect("Pulse", &mut hero);
    assert_eq!(hero.material.keywords().canonical(), "TINT");
}

#[rstest]
#[case::ignore(OverlayPolicy::Ignore, ApplyOutcome::Ignored)]
#[case::overlay(OverlayPolicy::Overlay, ApplyOutcome::Updated)]
fn registered_overlay_policy_decides_reapply(
    #[case] overlay: OverlayPolicy,
    #[case] expected: ApplyOutcome,
) {
    init_logging();
    let mut engine: glaze_effects::EffectEngine<glaze_core::material::ShaderMaterial> =
        glaze_effects::EffectEngine::new(tint_registry(overlay), Default::default());
    let mut hero = TestRenderer::new(1, &base_material("hero"));

    let red = args([Argument::new(names::BLEND_COLOR, Color::RED)]);
    let black = args([Argument::new(names::BLEND_COLOR, Color::BLACK)]);
    assert_eq!(engine.apply_effect("Tint", &mut hero, &red), ApplyOutcome::Applied);
    assert_eq!(engine.apply_effect("Tint", &mut hero, &black), expected);

    let color = hero.overrides.lock().get_color(names::BLEND_COLOR);
    let written = if expected == ApplyOutcome::Ignored {
        Color::RED
    } else {
        Color::BLACK
    };
    assert_eq!(color, Some(written));
}
