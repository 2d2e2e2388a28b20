//! # Glaze Schedule
//!
//! Priority-bucketed callback dispatch for the host's lifecycle phases.
//!
//! The host owns one [`CallbackScheduler`] and drives it from its frame loop:
//!
//! ```text
//! loop {
//!     for _ in 0..fixed_steps { scheduler.fixed_update(); }
//!     scheduler.update();
//!     scheduler.late_update();
//! }
//! scheduler.shutdown();
//! ```
//!
//! Systems register [`Callback`]s on a [`Phase`] with an optional priority.
//! Registration and unregistration are safe at any time, including from
//! inside a callback of the phase being dispatched.

mod callback;
mod list;
mod phase;
mod scheduler;

pub use callback::{Callback, CallbackError, CallbackFault, CallbackResult};
pub use phase::{Bucket, Phase};
pub use scheduler::{CallbackScheduler, DispatchStats};
