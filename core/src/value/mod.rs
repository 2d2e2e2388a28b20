//! Named, typed parameters handed to effect modifiers.
//!
//! - [`Argument`]: one named value with its [`ArgumentType`] tag
//! - [`ValueTable`]: immutable name→argument lookup with soft-fail getters
//! - [`ArgumentKind`]: Rust types that can be read out of a table

mod argument;
mod table;

pub use argument::{Argument, ArgumentKind, ArgumentType, ArgumentValue};
pub use table::{ValueTable, ValueTableError};
