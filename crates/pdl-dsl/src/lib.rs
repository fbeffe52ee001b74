//! # pdl-dsl
//!
//! Parser for the Protocol Definition Language (PDL), the indentation-based
//! format browser debugging protocols are written in.
//!
//! This crate provides:
//! - A lexer that recognizes the head of each PDL line form by prefix
//! - A line-oriented parser that reads the rest of each line and builds the
//!   ordered JSON document
//! - [`loads`], which also accepts JSON sources, and [`PdlParser`], which
//!   plugs the grammar into [`pdl_core::Converter`]
//!
//! # Example
//!
//! ```
//! use pdl_dsl::parse;
//!
//! let source = "\
//! version
//!   major 1
//!   minor 3
//!
//! # Things about Foo.
//! domain Foo
//!   command enable
//! ";
//!
//! let document = parse(source).expect("parse failed");
//! let root = document.root();
//! assert_eq!(root["version"]["major"], "1");
//! assert_eq!(root["domains"][0]["description"], "Things about Foo.");
//! assert_eq!(root["domains"][0]["commands"][0]["name"], "enable");
//! ```

pub mod error;
mod lexer;
pub mod loader;
pub mod parser;
pub mod token;

pub use error::{DslError, ParseErrors, Span};
pub use loader::{loads, PdlParser};
pub use parser::{parse, parse_with, ParseOptions};
