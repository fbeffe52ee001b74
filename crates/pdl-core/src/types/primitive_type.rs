use std::fmt;

use serde::{Deserialize, Serialize};

/// The built-in PDL type names.
///
/// Any type name that is not one of these is a reference to a type declared
/// in some domain and is recorded as `$ref`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Integer,
    Number,
    Boolean,
    String,
    Object,
    Any,
    Array,
    Binary,
}

impl PrimitiveType {
    /// All primitives, in declaration order.
    pub const ALL: [PrimitiveType; 8] = [
        Self::Integer,
        Self::Number,
        Self::Boolean,
        Self::String,
        Self::Object,
        Self::Any,
        Self::Array,
        Self::Binary,
    ];

    /// Looks up a primitive by its PDL spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }

    /// Returns the PDL spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Object => "object",
            Self::Any => "any",
            Self::Array => "array",
            Self::Binary => "binary",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_round_trips_every_primitive() {
        for p in PrimitiveType::ALL {
            assert_eq!(PrimitiveType::from_name(p.as_str()), Some(p));
        }
    }

    #[test]
    fn unknown_names_are_not_primitive() {
        for name in ["enum", "Runtime.RemoteObject", "Integer", ""] {
            assert_eq!(PrimitiveType::from_name(name), None, "{name}");
        }
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&PrimitiveType::Binary).unwrap();
        assert_eq!(json, "\"binary\"");
    }
}
