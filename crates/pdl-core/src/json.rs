//! JSON emission for protocol documents.
//!
//! Output is indented by two spaces, uses `": "` between keys and values and
//! `","` between elements, and writes keys in the order they are stored.
//! With [`JsonStyle::ascii_only`] set (the default) every character outside
//! printable ASCII is written as a lowercase `\uXXXX` escape, using surrogate
//! pairs above U+FFFF.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};

/// Indentation unit for emitted documents.
pub const INDENT: &[u8] = b"  ";

/// Knobs for [`to_writer`] and [`to_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonStyle {
    /// Escape everything outside `' '..='~'` as `\uXXXX`.
    pub ascii_only: bool,
}

impl Default for JsonStyle {
    fn default() -> Self {
        Self { ascii_only: true }
    }
}

impl JsonStyle {
    /// Style that writes non-ASCII characters as raw UTF-8.
    pub fn unicode() -> Self {
        Self { ascii_only: false }
    }
}

/// Serializes `value` into `writer`.
///
/// # Errors
///
/// Returns the serializer's error, which wraps any I/O failure of `writer`.
pub fn to_writer<W, T>(writer: W, value: &T, style: JsonStyle) -> serde_json::Result<()>
where
    W: io::Write,
    T: Serialize + ?Sized,
{
    let formatter = ProtocolFormatter::new(style);
    let mut serializer = Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)
}

/// Serializes `value` into a string. No trailing newline is added.
///
/// # Errors
///
/// Returns the serializer's error.
pub fn to_string<T>(value: &T, style: JsonStyle) -> serde_json::Result<String>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::with_capacity(1024);
    to_writer(&mut buf, value, style)?;
    String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)
}

/// Pretty formatter with optional ASCII-only string output.
struct ProtocolFormatter<'a> {
    pretty: PrettyFormatter<'a>,
    ascii_only: bool,
}

impl ProtocolFormatter<'_> {
    fn new(style: JsonStyle) -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(INDENT),
            ascii_only: style.ascii_only,
        }
    }
}

impl Formatter for ProtocolFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        if !self.ascii_only {
            return writer.write_all(fragment.as_bytes());
        }

        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            if is_plain_ascii(c) {
                continue;
            }
            if start < i {
                writer.write_all(fragment[start..i].as_bytes())?;
            }
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units).iter() {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + c.len_utf8();
        }
        if start < fragment.len() {
            writer.write_all(fragment[start..].as_bytes())?;
        }
        Ok(())
    }
}

fn is_plain_ascii(c: char) -> bool {
    (' '..='~').contains(&c)
}
