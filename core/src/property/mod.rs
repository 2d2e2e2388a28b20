//! Per-object shader property overrides.
//!
//! A [`PropertyBlock`] holds named overrides that the renderer applies on top
//! of a target's material without touching the material itself.
//! [`PropertyOverrides`] is the shared handle a host keeps per render target:
//! the host reads it at draw time, effect modifiers write through it.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::math::{Color, Vec4};

/// A typed override value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    /// Scalar override.
    Float(f32),
    /// Color override.
    Color(Color),
    /// 4-component vector override.
    Vector(Vec4),
}

impl PropertyValue {
    /// Reads the value as a color. Vectors are reinterpreted channel-wise.
    pub fn as_color(&self) -> Option<Color> {
        match *self {
            Self::Color(c) => Some(c),
            Self::Vector(v) => Some(Color::from(v)),
            Self::Float(_) => None,
        }
    }

    /// Reads the value as a vector. Colors are reinterpreted channel-wise.
    pub fn as_vector(&self) -> Option<Vec4> {
        match *self {
            Self::Vector(v) => Some(v),
            Self::Color(c) => Some(c.into()),
            Self::Float(_) => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match *self {
            Self::Float(f) => Some(f),
            _ => None,
        }
    }
}

/// A set of named property overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBlock {
    values: HashMap<String, PropertyValue>,
}

impl PropertyBlock {
    /// Creates an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the override stored under `name`.
    pub fn get(&self, name: &str) -> Option<PropertyValue> {
        self.values.get(name).copied()
    }

    /// Stores an override, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: PropertyValue) -> Option<PropertyValue> {
        self.values.insert(name.into(), value)
    }

    /// Removes an override, returning the previous value.
    pub fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        self.values.remove(name)
    }

    /// Writes `previous` back under `name`, removing the override when
    /// `previous` is `None`.
    pub fn restore(&mut self, name: &str, previous: Option<PropertyValue>) {
        match previous {
            Some(value) => {
                self.values.insert(name.to_owned(), value);
            }
            None => {
                self.values.remove(name);
            }
        }
    }

    pub fn get_color(&self, name: &str) -> Option<Color> {
        self.get(name).and_then(|v| v.as_color())
    }

    pub fn set_color(&mut self, name: impl Into<String>, color: Color) {
        self.set(name, PropertyValue::Color(color));
    }

    pub fn get_vector(&self, name: &str) -> Option<Vec4> {
        self.get(name).and_then(|v| v.as_vector())
    }

    pub fn set_vector(&mut self, name: impl Into<String>, vector: Vec4) {
        self.set(name, PropertyValue::Vector(vector));
    }

    pub fn get_float(&self, name: &str) -> Option<f32> {
        self.get(name).and_then(|v| v.as_float())
    }

    pub fn set_float(&mut self, name: impl Into<String>, value: f32) {
        self.set(name, PropertyValue::Float(value));
    }

    /// Removes every override.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Shared handle to a target's [`PropertyBlock`].
///
/// Clones refer to the same block. Modifiers that animate keep a clone so
/// they can write overrides from the per-frame driver without access to the
/// host's target object.
#[derive(Debug, Clone, Default)]
pub struct PropertyOverrides(Arc<Mutex<PropertyBlock>>);

impl PropertyOverrides {
    /// Creates a handle to a new empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the block for reading or writing.
    pub fn lock(&self) -> MutexGuard<'_, PropertyBlock> {
        self.0.lock()
    }

    /// Returns a copy of the current block.
    pub fn snapshot(&self) -> PropertyBlock {
        self.0.lock().clone()
    }

    pub fn get(&self, name: &str) -> Option<PropertyValue> {
        self.0.lock().get(name)
    }

    pub fn set(&self, name: impl Into<String>, value: PropertyValue) -> Option<PropertyValue> {
        self.0.lock().set(name, value)
    }

    pub fn remove(&self, name: &str) -> Option<PropertyValue> {
        self.0.lock().remove(name)
    }

    /// Removes every override.
    pub fn clear(&self) {
        self.0.lock().clear();
    }

    /// Returns `true` if both handles point at the same block.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
