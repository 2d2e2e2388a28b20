use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::argument::{Argument, ArgumentKind};
use crate::math::{Color, Vec2, Vec3, Vec4};

/// Errors produced while building a [`ValueTable`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueTableError {
    /// Two arguments share the same name.
    #[error("duplicate argument name: {0}")]
    DuplicateName(String),
    /// RON text could not be parsed into an argument list.
    #[cfg(feature = "serialize-ron")]
    #[error("RON parse error: {0}")]
    Ron(String),
}

/// Immutable name→argument lookup.
///
/// Built once from an ordered argument list and read-only afterwards. The
/// getters never fail: a missing name or a stored type different from the
/// requested one yields the caller's default. This is the intended API for
/// optional effect parameters.
///
/// # Example
///
/// ```
/// use glaze_core::math::Color;
/// use glaze_core::value::{Argument, ValueTable};
///
/// let args = ValueTable::build([Argument::new("BlendColor", Color::WHITE)]).unwrap();
/// assert_eq!(args.get_color("BlendColor", Color::BLACK), Color::WHITE);
/// assert_eq!(args.get_color("Missing", Color::BLACK), Color::BLACK);
/// assert_eq!(args.get_int("BlendColor", 0), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Argument>", into = "Vec<Argument>")]
pub struct ValueTable {
    /// Arguments in build order.
    arguments: Vec<Argument>,
    /// Name → index into `arguments`.
    index: HashMap<String, usize>,
}

impl ValueTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from an ordered argument sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ValueTableError::DuplicateName`] if two arguments share a name.
    pub fn build(arguments: impl IntoIterator<Item = Argument>) -> Result<Self, ValueTableError> {
        let arguments: Vec<Argument> = arguments.into_iter().collect();
        let mut index = HashMap::with_capacity(arguments.len());

        for (i, arg) in arguments.iter().enumerate() {
            if index.insert(arg.name().to_owned(), i).is_some() {
                return Err(ValueTableError::DuplicateName(arg.name().to_owned()));
            }
        }

        Ok(Self { arguments, index })
    }

    /// Parses a RON argument list, e.g.
    /// `[(name: "BlendColor", value: Color((r: 1.0, g: 0.0, b: 0.0, a: 1.0)))]`.
    #[cfg(feature = "serialize-ron")]
    pub fn from_ron(text: &str) -> Result<Self, ValueTableError> {
        let arguments: Vec<Argument> =
            ron::from_str(text).map_err(|e| ValueTableError::Ron(e.to_string()))?;
        Self::build(arguments)
    }

    /// Returns the argument stored under `name`.
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.index.get(name).map(|&i| &self.arguments[i])
    }

    /// Returns `true` if an argument named `name` exists (of any type).
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    /// Returns `true` if the table holds no arguments.
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Iterates arguments in build order.
    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.iter()
    }

    /// Reads `name` as `T`, or returns `default` if absent or of another type.
    pub fn get<T: ArgumentKind>(&self, name: &str, default: T) -> T {
        self.argument(name)
            .and_then(|arg| T::from_value(arg.value()))
            .unwrap_or(default)
    }

    pub fn get_int(&self, name: &str, default: i32) -> i32 {
        self.get(name, default)
    }

    pub fn get_float(&self, name: &str, default: f32) -> f32 {
        self.get(name, default)
    }

    /// Borrowing string getter; avoids cloning the stored string.
    pub fn get_str<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        match self.argument(name).map(Argument::value) {
            Some(super::ArgumentValue::String(s)) => s,
            _ => default,
        }
    }

    /// Color getter. Only arguments tagged `Color` are returned.
    pub fn get_color(&self, name: &str, default: Color) -> Color {
        self.get(name, default)
    }

    pub fn get_vec2(&self, name: &str, default: Vec2) -> Vec2 {
        self.get(name, default)
    }

    pub fn get_vec3(&self, name: &str, default: Vec3) -> Vec3 {
        self.get(name, default)
    }

    pub fn get_vec4(&self, name: &str, default: Vec4) -> Vec4 {
        self.get(name, default)
    }
}

impl TryFrom<Vec<Argument>> for ValueTable {
    type Error = ValueTableError;

    fn try_from(arguments: Vec<Argument>) -> Result<Self, Self::Error> {
        Self::build(arguments)
    }
}

impl From<ValueTable> for Vec<Argument> {
    fn from(table: ValueTable) -> Self {
        table.arguments
    }
}
