//! The host's renderable object, as seen by the effect engine.

use std::sync::Arc;

use glaze_core::material::Material;
use glaze_core::property::PropertyOverrides;

/// Host-supplied identity of a render target.
///
/// The engine keys its per-target state by this id, never by value equality,
/// so the host must keep it stable for the target's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

/// A renderable object with a material slot and per-object overrides.
pub trait RenderTarget {
    type Material: Material;

    fn target_id(&self) -> TargetId;

    /// The material currently assigned to the target.
    fn material(&self) -> Arc<Self::Material>;

    fn set_material(&mut self, material: Arc<Self::Material>);

    /// Shared handle to the target's override block. Clones must refer to the
    /// same block.
    fn overrides(&self) -> PropertyOverrides;
}
