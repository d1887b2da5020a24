//! Field declarations for record schemas.

use crate::model::value::FieldValue;

/// Declared value kind of one schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    Bool,
    Integer,
    Float,
    DateTime,
}

impl FieldKind {
    /// Stable label shared with `FieldValue::kind_name`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::DateTime => "date_time",
        }
    }
}

/// Specification of one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub kind: FieldKind,
    /// When set, persisting without a non-null value is rejected.
    pub required: bool,
}

impl FieldSpec {
    pub const fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
        }
    }

    /// Date/time-valued field with no further constraints.
    pub const fn date_time() -> Self {
        Self::new(FieldKind::DateTime)
    }

    pub const fn string() -> Self {
        Self::new(FieldKind::String)
    }

    pub const fn bool() -> Self {
        Self::new(FieldKind::Bool)
    }

    pub const fn integer() -> Self {
        Self::new(FieldKind::Integer)
    }

    pub const fn float() -> Self {
        Self::new(FieldKind::Float)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Returns whether `value` may be stored under this field.
    ///
    /// `Null` is accepted here; required-ness is checked separately.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        matches!(
            (self.kind, value),
            (_, FieldValue::Null)
                | (FieldKind::String, FieldValue::String(_))
                | (FieldKind::Bool, FieldValue::Bool(_))
                | (FieldKind::Integer, FieldValue::Integer(_))
                | (FieldKind::Float, FieldValue::Float(_))
                | (FieldKind::Float, FieldValue::Integer(_))
                | (FieldKind::DateTime, FieldValue::DateTime(_))
        )
    }
}
