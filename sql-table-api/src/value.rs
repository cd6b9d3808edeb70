//! This module exposes the [`Value`] type bound to statements and read from cursors.

mod convert;

use serde::{Deserialize, Serialize};

pub use self::convert::{ConversionError, FromValue};

/// A generic wrapper enum to hold any value exchanged with the database.
#[derive(Debug, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Value {
    Blob(Vec<u8>),
    Boolean(bool),
    Decimal(rust_decimal::Decimal),
    Float64(f64),
    Int32(i32),
    Int64(i64),
    Null,
    Text(String),
    Uint32(u32),
    Uint64(u64),
    Uuid(uuid::Uuid),
}

// macro rules for implementing From trait for Value enum variants
macro_rules! impl_conv_for_value {
    ($variant:ident, $ty:ty, $name:ident) => {
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$variant(value)
            }
        }

        impl Value {
            /// Attempts to extract a reference to the inner value if it matches the variant.
            pub fn $name(&self) -> Option<&$ty> {
                if let Value::$variant(v) = self {
                    Some(v)
                } else {
                    None
                }
            }
        }
    };
}

impl_conv_for_value!(Blob, Vec<u8>, as_blob);
impl_conv_for_value!(Boolean, bool, as_boolean);
impl_conv_for_value!(Decimal, rust_decimal::Decimal, as_decimal);
impl_conv_for_value!(Float64, f64, as_float64);
impl_conv_for_value!(Int32, i32, as_int32);
impl_conv_for_value!(Int64, i64, as_int64);
impl_conv_for_value!(Text, String, as_text);
impl_conv_for_value!(Uint32, u32, as_uint32);
impl_conv_for_value!(Uint64, u64, as_uint64);
impl_conv_for_value!(Uuid, uuid::Uuid, as_uuid);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Blob(value.to_vec())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl Value {
    /// Checks if the value is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the value of any integer variant, widened to `i128`.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::Int32(v) => Some(i128::from(*v)),
            Value::Int64(v) => Some(i128::from(*v)),
            Value::Uint32(v) => Some(i128::from(*v)),
            Value::Uint64(v) => Some(i128::from(*v)),
            _ => None,
        }
    }

    /// Returns the type name of the value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Blob(_) => "Blob",
            Value::Boolean(_) => "Boolean",
            Value::Decimal(_) => "Decimal",
            Value::Float64(_) => "Float64",
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::Null => "Null",
            Value::Text(_) => "Text",
            Value::Uint32(_) => "Uint32",
            Value::Uint64(_) => "Uint64",
            Value::Uuid(_) => "Uuid",
        }
    }
}

/// Builds a `Vec<Value>` of bind arguments, converting each expression with [`Value::from`].
///
/// ```rust
/// use sql_table_api::value::Value;
/// use sql_table_api::values;
///
/// let args = values![1i64, "alice", None::<String>];
/// assert_eq!(args, vec![Value::Int64(1), Value::Text("alice".to_string()), Value::Null]);
/// ```
#[macro_export]
macro_rules! values {
    () => {
        ::std::vec::Vec::<$crate::value::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::value::Value::from($value)),+]
    };
}
