use std::str::FromStr as _;

use thiserror::Error;

use crate::value::Value;

/// An enum representing the errors which can occur converting a [`Value`] into a Rust type.
#[derive(Debug, Error, PartialEq)]
pub enum ConversionError {
    /// The value variant cannot represent the requested type.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// The value does not fit in the requested type.
    #[error("Value {value} is out of range for {target}")]
    OutOfRange {
        value: String,
        target: &'static str,
    },
    /// The value has the right variant but its content is not valid for the requested type.
    #[error("Invalid {target}: {reason}")]
    Invalid {
        target: &'static str,
        reason: String,
    },
}

impl ConversionError {
    fn mismatch(expected: &'static str, value: &Value) -> Self {
        Self::TypeMismatch {
            expected,
            found: value.type_name(),
        }
    }
}

/// Types which can be read out of a [`Value`].
pub trait FromValue: Sized {
    /// Converts the value into `Self`.
    fn from_value(value: Value) -> Result<Self, ConversionError>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        Ok(value)
    }
}

impl<T> FromValue for Option<T>
where
    T: FromValue,
{
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }
}

// macro rules for implementing FromValue for integer types; any integer variant is accepted if it fits.
macro_rules! impl_from_value_for_integer {
    ($($ty:ty => $name:literal),+ $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self, ConversionError> {
                    let Some(integer) = value.as_integer() else {
                        return Err(ConversionError::mismatch($name, &value));
                    };
                    <$ty>::try_from(integer).map_err(|_| ConversionError::OutOfRange {
                        value: integer.to_string(),
                        target: $name,
                    })
                }
            }
        )+
    };
}

impl_from_value_for_integer!(
    i32 => "Int32",
    i64 => "Int64",
    u32 => "Uint32",
    u64 => "Uint64",
);

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Float64(v) => Ok(v),
            value => value
                .as_integer()
                .map(|integer| integer as f64)
                .ok_or_else(|| ConversionError::mismatch("Float64", &value)),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Boolean(v) => Ok(v),
            value => match value.as_integer() {
                Some(0) => Ok(false),
                Some(1) => Ok(true),
                Some(other) => Err(ConversionError::OutOfRange {
                    value: other.to_string(),
                    target: "Boolean",
                }),
                None => Err(ConversionError::mismatch("Boolean", &value)),
            },
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Text(v) => Ok(v),
            value => Err(ConversionError::mismatch("Text", &value)),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Blob(v) => Ok(v),
            value => Err(ConversionError::mismatch("Blob", &value)),
        }
    }
}

impl FromValue for rust_decimal::Decimal {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        let invalid = |reason: String| ConversionError::Invalid {
            target: "Decimal",
            reason,
        };

        match value {
            Value::Decimal(v) => Ok(v),
            Value::Text(text) => {
                rust_decimal::Decimal::from_str(&text).map_err(|err| invalid(err.to_string()))
            }
            Value::Float64(float) => {
                rust_decimal::Decimal::try_from(float).map_err(|err| invalid(err.to_string()))
            }
            value => match value.as_integer() {
                Some(integer) => rust_decimal::Decimal::try_from_i128_with_scale(integer, 0)
                    .map_err(|err| invalid(err.to_string())),
                None => Err(ConversionError::mismatch("Decimal", &value)),
            },
        }
    }
}

impl FromValue for uuid::Uuid {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        let invalid = |reason: String| ConversionError::Invalid {
            target: "Uuid",
            reason,
        };

        match value {
            Value::Uuid(v) => Ok(v),
            Value::Text(text) => uuid::Uuid::parse_str(&text).map_err(|err| invalid(err.to_string())),
            Value::Blob(bytes) => {
                uuid::Uuid::from_slice(&bytes).map_err(|err| invalid(err.to_string()))
            }
            value => Err(ConversionError::mismatch("Uuid", &value)),
        }
    }
}
