//! # pdl-core
//!
//! Core model and conversion pipeline for PDL (Protocol Description
//! Language) documents.
//!
//! This crate provides:
//! - [`Document`], the ordered tree a parser produces
//! - [`ProtocolParser`], the interface a grammar implementation plugs into
//! - [`Converter`], the read, parse and emit pipeline
//! - [`json`], the JSON emitter (2-space indent, insertion order)
//! - [`types`], a typed read-only view of a document
//! - [`typescript`], TypeScript declarations generated from that view
//!
//! # Example
//!
//! ```
//! use pdl_core::{Converter, Document, ProtocolParser};
//!
//! struct Fixed;
//!
//! impl ProtocolParser for Fixed {
//!     type Error = std::io::Error;
//!
//!     fn parse(&self, _: &str, _: &str, _: bool) -> Result<Document, Self::Error> {
//!         Ok(Document::empty_protocol())
//!     }
//! }
//!
//! let json = Converter::new(Fixed).convert("").unwrap();
//! assert_eq!(json, "{\n  \"version\": {},\n  \"domains\": []\n}");
//! ```

pub mod convert;
pub mod document;
pub mod error;
pub mod json;
pub mod parser;
pub mod types;
pub mod typescript;

pub use convert::Converter;
pub use document::Document;
pub use error::ConvertError;
pub use json::JsonStyle;
pub use parser::{ProtocolParser, DEFAULT_SOURCE_NAME};
