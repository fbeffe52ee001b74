use serde::Deserialize;

use super::data_type::{DataType, Property};

/// One `domain` block of a protocol description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Domain {
    pub domain: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub experimental: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
    #[serde(default)]
    pub commands: Vec<Command>,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// A `type X extends Y` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TypeDefinition {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub experimental: bool,
    #[serde(default)]
    pub deprecated: bool,
    /// `None` when the declaration has no `properties` block, which is
    /// different from an empty block.
    #[serde(default)]
    pub properties: Option<Vec<Property>>,
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(flatten)]
    pub data_type: DataType,
}

/// A `command` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Command {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub experimental: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub parameters: Vec<Property>,
    #[serde(default)]
    pub returns: Vec<Property>,
    #[serde(default)]
    pub redirect: Option<String>,
}

/// An `event` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Event {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub experimental: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub parameters: Vec<Property>,
    #[serde(default)]
    pub redirect: Option<String>,
}
