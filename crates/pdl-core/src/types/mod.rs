//! Typed view of a protocol document.
//!
//! These types are read from a [`Document`](crate::Document) on demand. The
//! conversion path never goes through them, so they are free to ignore keys
//! they do not model.

pub mod data_type;
pub mod domain;
pub mod primitive_type;
pub mod protocol;

pub use data_type::{DataType, Property};
pub use domain::{Command, Domain, Event, TypeDefinition};
pub use primitive_type::PrimitiveType;
pub use protocol::{Protocol, ProtocolStats, Version};
