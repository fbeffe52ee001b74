use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::Protocol;

/// A parsed protocol description.
///
/// The document is an ordered tree of JSON mappings and sequences. Map keys
/// keep the order in which the parser inserted them, and that order is what
/// gets serialized. Nothing on the conversion path re-sorts, filters or
/// renames keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Value);

impl Document {
    /// Wraps an already-built tree.
    pub fn new(root: Value) -> Self {
        Self(root)
    }

    /// Creates the skeleton every PDL document starts from:
    /// `{"version": {}, "domains": []}`.
    pub fn empty_protocol() -> Self {
        let mut root = Map::new();
        root.insert("version".to_string(), Value::Object(Map::new()));
        root.insert("domains".to_string(), Value::Array(Vec::new()));
        Self(Value::Object(root))
    }

    /// Returns the root value.
    pub fn root(&self) -> &Value {
        &self.0
    }

    /// Returns the root value mutably.
    pub fn root_mut(&mut self) -> &mut Value {
        &mut self.0
    }

    /// Consumes the document and returns the root value.
    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Number of entries in the top-level `domains` list, or 0 when the
    /// document has no such list.
    pub fn domain_count(&self) -> usize {
        self.0
            .get("domains")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Builds the typed view of this document.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error when the tree does not have the
    /// shape of a protocol description (e.g. a JSON document loaded from a
    /// non-`.pdl` source).
    pub fn to_protocol(&self) -> Result<Protocol, serde_json::Error> {
        Protocol::deserialize(&self.0)
    }
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Self(root)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        doc.0
    }
}
