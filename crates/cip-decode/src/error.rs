use std::fmt;

/// A feature that could not be turned into a domain entity.
///
/// Always scoped to one feature; callers log it and move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The field catalog was not a list of `{id, value}` entries.
    Fields(String),
    /// Coordinates did not match the shape the geometry type requires.
    Geometry(String),
    /// Geometry type tag this sink has no representation for.
    UnsupportedGeometry(String),
    /// An enumerated field carried a label outside its known set.
    UnknownEnumValue { field_id: i64, value: String },
    /// A numeric field did not parse.
    InvalidNumber { field_id: i64, value: String },
    /// A date did not parse as `YYYY-MM-DD`.
    InvalidDate(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Fields(msg) => write!(f, "malformed field catalog: {msg}"),
            DecodeError::Geometry(msg) => write!(f, "malformed geometry: {msg}"),
            DecodeError::UnsupportedGeometry(kind) => {
                write!(f, "unsupported geometry type '{kind}'")
            }
            DecodeError::UnknownEnumValue { field_id, value } => {
                write!(f, "field {field_id}: unknown value '{value}'")
            }
            DecodeError::InvalidNumber { field_id, value } => {
                write!(f, "field {field_id}: invalid number '{value}'")
            }
            DecodeError::InvalidDate(value) => write!(f, "invalid date '{value}'"),
        }
    }
}

impl std::error::Error for DecodeError {}
