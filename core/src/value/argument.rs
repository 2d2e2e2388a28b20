use serde::{Deserialize, Serialize};

use crate::math::{Color, Vec2, Vec3, Vec4};

/// Type tag of an [`ArgumentValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentType {
    /// 32-bit signed integer.
    Int,
    /// Single f32 value.
    Float,
    /// UTF-8 string.
    String,
    /// RGBA color.
    Color,
    /// 2-component float vector.
    Vec2,
    /// 3-component float vector.
    Vec3,
    /// 4-component float vector.
    Vec4,
}

/// A typed argument value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgumentValue {
    Int(i32),
    Float(f32),
    String(String),
    Color(Color),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
}

impl ArgumentValue {
    /// Returns the type tag of this value.
    pub fn ty(&self) -> ArgumentType {
        match self {
            Self::Int(_) => ArgumentType::Int,
            Self::Float(_) => ArgumentType::Float,
            Self::String(_) => ArgumentType::String,
            Self::Color(_) => ArgumentType::Color,
            Self::Vec2(_) => ArgumentType::Vec2,
            Self::Vec3(_) => ArgumentType::Vec3,
            Self::Vec4(_) => ArgumentType::Vec4,
        }
    }
}

impl From<i32> for ArgumentValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for ArgumentValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for ArgumentValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for ArgumentValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Color> for ArgumentValue {
    fn from(v: Color) -> Self {
        Self::Color(v)
    }
}

impl From<Vec2> for ArgumentValue {
    fn from(v: Vec2) -> Self {
        Self::Vec2(v)
    }
}

impl From<Vec3> for ArgumentValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<Vec4> for ArgumentValue {
    fn from(v: Vec4) -> Self {
        Self::Vec4(v)
    }
}

/// A single named argument.
///
/// Immutable once constructed; the type tag is derived from the value so the
/// two can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    name: String,
    value: ArgumentValue,
}

impl Argument {
    /// Creates a new argument.
    pub fn new(name: impl Into<String>, value: impl Into<ArgumentValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Argument name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Argument value.
    pub fn value(&self) -> &ArgumentValue {
        &self.value
    }

    /// Type tag of the value.
    pub fn ty(&self) -> ArgumentType {
        self.value.ty()
    }
}

/// A Rust type that can be read out of an [`ArgumentValue`].
///
/// Extraction only succeeds when the stored tag equals [`TYPE`](Self::TYPE);
/// there are no implicit conversions (an `Int` is never read as a `Float`).
pub trait ArgumentKind: Sized {
    /// The tag this type is stored under.
    const TYPE: ArgumentType;

    /// Extracts the value if the tag matches [`TYPE`](Self::TYPE).
    fn from_value(value: &ArgumentValue) -> Option<Self>;
}

macro_rules! impl_argument_kind {
    ($ty:ty, $variant:ident) => {
        impl ArgumentKind for $ty {
            const TYPE: ArgumentType = ArgumentType::$variant;

            fn from_value(value: &ArgumentValue) -> Option<Self> {
                match value {
                    ArgumentValue::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

impl_argument_kind!(i32, Int);
impl_argument_kind!(f32, Float);
impl_argument_kind!(String, String);
impl_argument_kind!(Color, Color);
impl_argument_kind!(Vec2, Vec2);
impl_argument_kind!(Vec3, Vec3);
impl_argument_kind!(Vec4, Vec4);
