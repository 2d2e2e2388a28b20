use serde::{Deserialize, Serialize};

/// A host lifecycle phase with its own independent callback set.
///
/// The host calls each phase's dispatch entry point once per corresponding
/// event, in this order within a frame: fixed step(s), update, late update.
/// [`Shutdown`](Phase::Shutdown) is dispatched once when the host exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Fixed-timestep simulation step.
    FixedUpdate,
    /// Variable per-frame update.
    Update,
    /// Runs after every `Update` callback of the frame.
    LateUpdate,
    /// Application shutdown.
    Shutdown,
}

impl Phase {
    /// Number of phases.
    pub const COUNT: usize = 4;

    /// All phases in dispatch order.
    pub const ALL: [Phase; Self::COUNT] = [
        Phase::FixedUpdate,
        Phase::Update,
        Phase::LateUpdate,
        Phase::Shutdown,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Priority bucket within a phase.
///
/// Buckets are dispatched High → Default → Low. Negative priorities land in
/// `High`, zero in `Default`, positive in `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    /// Priority < 0, sorted ascending.
    High,
    /// Priority == 0, insertion order.
    Default,
    /// Priority > 0, sorted ascending.
    Low,
}

impl Bucket {
    pub(crate) const COUNT: usize = 3;

    /// All buckets in dispatch order.
    pub const ALL: [Bucket; Self::COUNT] = [Bucket::High, Bucket::Default, Bucket::Low];

    /// Bucket for a priority value.
    pub fn for_priority(priority: i32) -> Self {
        match priority {
            p if p < 0 => Bucket::High,
            0 => Bucket::Default,
            _ => Bucket::Low,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}
