use pdl_core::types::PrimitiveType;
use pdl_core::Document;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::DslError;
use crate::lexer::{lex_line, LineHead};
use crate::token::Token;

const SECTION_CONTEXT: &str = "a 'parameters', 'returns' or 'properties' block";
const ITEM_CONTEXT: &str = "a type, command or event";

/// Options for [`parse_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Record the `binary` primitive as `string`.
    pub map_binary_to_string: bool,
}

impl ParseOptions {
    /// The relaxed options used for lenient loading.
    pub fn lenient() -> Self {
        Self {
            map_binary_to_string: true,
        }
    }

    /// Lenient or default options depending on `lenient`.
    pub fn from_lenient(lenient: bool) -> Self {
        if lenient {
            Self::lenient()
        } else {
            Self::default()
        }
    }
}

/// Parse PDL source text into a [`Document`] with default options.
///
/// # Errors
///
/// Returns every error found in the document. No document is produced when
/// any line fails.
pub fn parse(source: &str) -> Result<Document, Vec<DslError>> {
    parse_with(source, &ParseOptions::default())
}

/// Parse PDL source text into a [`Document`].
///
/// # Errors
///
/// Returns every error found in the document. No document is produced when
/// any line fails.
pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Document, Vec<DslError>> {
    let mut parser = Parser::new(*options);
    parser.parse_source(source);
    parser.finish()
}

/// `experimental`, `deprecated` and `optional` prefixes of a line.
#[derive(Debug, Clone, Copy, Default)]
struct Modifiers {
    experimental: bool,
    deprecated: bool,
    optional: bool,
}

impl Modifiers {
    /// Reads the flags spelled out in a declaration head.
    fn from_head(head: &str) -> Self {
        Self {
            experimental: head.contains("experimental "),
            deprecated: head.contains("deprecated "),
            optional: false,
        }
    }
}

/// Leading run of non-whitespace and the text after it.
fn leading_word(text: &str) -> Option<(&str, &str)> {
    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    (end > 0).then(|| text.split_at(end))
}

/// Leading run of characters matching `accept`.
fn leading_run(text: &str, accept: impl Fn(char) -> bool) -> Option<&str> {
    let end = text.find(|c: char| !accept(c)).unwrap_or(text.len());
    (end > 0).then(|| &text[..end])
}

fn leading_letters(text: &str) -> Option<&str> {
    leading_run(text, |c| c.is_ascii_alphabetic())
}

/// `ID extends [array of] TYPE`, where the id runs up to the last ` extends `
/// that is followed by a type. The type is the leading run of ASCII letters;
/// anything after it is ignored.
fn split_type_declaration(text: &str) -> Option<(&str, bool, &str)> {
    const EXTENDS: &str = " extends ";
    const ARRAY_OF: &str = "array of ";

    text.char_indices()
        .rev()
        .filter(|&(at, _)| text[at..].starts_with(EXTENDS))
        .find_map(|(at, _)| {
            let after = &text[at + EXTENDS.len()..];
            match after.strip_prefix(ARRAY_OF).and_then(leading_letters) {
                Some(base) => Some((&text[..at], true, base)),
                None => leading_letters(after).map(|base| (&text[..at], false, base)),
            }
        })
}

/// A parameter line, `[experimental] [deprecated] [optional] [array of] TYPE NAME`.
#[derive(Debug, Clone, Copy)]
struct ParameterForm<'a> {
    mods: Modifiers,
    is_array: bool,
    type_name: &'a str,
    name: &'a str,
}

/// Matches a parameter line with its indentation removed.
///
/// Each prefix is tried present before absent, outermost first, and the
/// first combination that leaves `TYPE NAME` wins. That is how a modifier
/// keyword can still serve as the type, as in `optional thing`. Words are
/// separated by exactly one space and text after the name is ignored.
fn match_parameter(text: &str) -> Option<ParameterForm<'_>> {
    const PREFIXES: [&str; 4] = ["experimental ", "deprecated ", "optional ", "array of "];

    'combination: for mask in (0..1u8 << PREFIXES.len()).rev() {
        let mut cursor = text;
        let mut taken = [false; PREFIXES.len()];
        for (i, prefix) in PREFIXES.iter().enumerate() {
            if mask & (1 << (PREFIXES.len() - 1 - i)) == 0 {
                continue;
            }
            match cursor.strip_prefix(prefix) {
                Some(rest) => {
                    cursor = rest;
                    taken[i] = true;
                }
                None => continue 'combination,
            }
        }

        let Some((type_name, after)) = leading_word(cursor) else {
            continue;
        };
        let Some((name, _)) = after.strip_prefix(' ').and_then(leading_word) else {
            continue;
        };
        return Some(ParameterForm {
            mods: Modifiers {
                experimental: taken[0],
                deprecated: taken[1],
                optional: taken[2],
            },
            is_array: taken[3],
            type_name,
            name,
        });
    }
    None
}

/// Matches an enum literal with six spaces of indentation removed: one word,
/// optionally behind two more spaces, with nothing after it.
fn match_enum_literal(text: &str) -> Option<&str> {
    let is_word = |s: &&str| !s.is_empty() && !s.contains(char::is_whitespace);
    text.strip_prefix("  ")
        .filter(is_word)
        .or_else(|| Some(text).filter(is_word))
}

/// Assigns `type`/`$ref`/`items` for a declared type name.
fn assign_type(item: &mut Map<String, Value>, type_name: &str, is_array: bool, map_binary: bool) {
    if is_array {
        item.insert("type".into(), Value::from("array"));
        let mut items = Map::new();
        assign_type(&mut items, type_name, false, map_binary);
        item.insert("items".into(), Value::Object(items));
        return;
    }

    let resolved = match type_name {
        "enum" => "string",
        "binary" if map_binary => "string",
        other => other,
    };
    if PrimitiveType::from_name(resolved).is_some() {
        item.insert("type".into(), Value::from(resolved));
    } else {
        item.insert("$ref".into(), Value::from(resolved));
    }
}

/// One non-blank, non-comment source line.
struct Line<'a> {
    number: usize,
    text: &'a str,
    head: LineHead<'a>,
}

impl Line<'_> {
    fn illegal(&self) -> DslError {
        DslError::IllegalToken {
            line: self.number,
            text: self.text.to_string(),
            span: self.head.span.clone(),
        }
    }

    fn missing(&self, construct: &'static str, requires: &'static str) -> DslError {
        DslError::MissingContext {
            construct,
            requires,
            line: self.number,
            span: self.head.span.clone(),
        }
    }
}

/// Location of a type, command or event.
#[derive(Debug, Clone, Copy)]
struct ItemRef {
    domain: usize,
    list: &'static str,
    index: usize,
}

/// Location of an item's `parameters`, `returns` or `properties` list.
#[derive(Debug, Clone, Copy)]
struct SectionRef {
    item: ItemRef,
    key: &'static str,
}

/// Location of the list enum literals are appended to.
#[derive(Debug, Clone, Copy)]
enum EnumRef {
    Item(ItemRef),
    Param { section: SectionRef, index: usize },
}

/// Ordered tree under construction.
#[derive(Default)]
struct Builder {
    version: Map<String, Value>,
    domains: Vec<Map<String, Value>>,
}

impl Builder {
    fn push_domain(&mut self, domain: Map<String, Value>) {
        self.domains.push(domain);
    }

    fn current_domain(&self) -> Option<usize> {
        self.domains.len().checked_sub(1)
    }

    /// Appends to one of a domain's lists, creating the list on first use.
    fn push_to_domain(&mut self, domain: usize, key: &'static str, value: Value) -> Option<usize> {
        let list = self
            .domains
            .get_mut(domain)?
            .entry(key)
            .or_insert_with(|| Value::Array(Vec::new()))
            .as_array_mut()?;
        list.push(value);
        Some(list.len() - 1)
    }

    fn item_mut(&mut self, item: ItemRef) -> Option<&mut Map<String, Value>> {
        self.domains
            .get_mut(item.domain)?
            .get_mut(item.list)?
            .as_array_mut()?
            .get_mut(item.index)?
            .as_object_mut()
    }

    fn section_mut(&mut self, section: SectionRef) -> Option<&mut Vec<Value>> {
        self.item_mut(section.item)?
            .get_mut(section.key)?
            .as_array_mut()
    }

    fn enum_mut(&mut self, target: EnumRef) -> Option<&mut Vec<Value>> {
        let owner = match target {
            EnumRef::Item(item) => self.item_mut(item)?,
            EnumRef::Param { section, index } => {
                self.section_mut(section)?.get_mut(index)?.as_object_mut()?
            }
        };
        owner.get_mut("enum")?.as_array_mut()
    }

    fn into_document(self) -> Document {
        let mut root = Map::new();
        root.insert("version".into(), Value::Object(self.version));
        root.insert(
            "domains".into(),
            Value::Array(self.domains.into_iter().map(Value::Object).collect()),
        );
        Document::new(Value::Object(root))
    }
}

/// Line-oriented parser for the PDL grammar.
///
/// Besides the tree itself it tracks the pending description comment and the
/// most recent item, section and enum list, which later lines attach to.
struct Parser {
    options: ParseOptions,
    builder: Builder,
    description: String,
    clear_description: bool,
    item: Option<ItemRef>,
    section: Option<SectionRef>,
    enum_list: Option<EnumRef>,
    errors: Vec<DslError>,
}

impl Parser {
    fn new(options: ParseOptions) -> Self {
        Self {
            options,
            builder: Builder::default(),
            description: String::new(),
            clear_description: false,
            item: None,
            section: None,
            enum_list: None,
            errors: Vec::new(),
        }
    }

    fn parse_source(&mut self, source: &str) {
        let mut line_start = 0;
        for (index, raw) in source.split('\n').enumerate() {
            let start = line_start;
            line_start += raw.len() + 1;
            let raw = raw.strip_suffix('\r').unwrap_or(raw);

            if self.clear_description {
                self.description.clear();
                self.clear_description = false;
            }

            let trimmed = raw.trim();
            if let Some(comment) = trimmed.strip_prefix('#') {
                if !self.description.is_empty() {
                    self.description.push('\n');
                }
                // The character after `#` is a separator, whatever it is.
                let mut chars = comment.chars();
                chars.next();
                self.description.push_str(chars.as_str());
                continue;
            }
            self.clear_description = true;

            if trimmed.is_empty() {
                continue;
            }

            if let Err(e) = self.parse_raw_line(raw, start, index + 1) {
                self.errors.push(e);
            }
        }
    }

    fn parse_raw_line(&mut self, raw: &str, start: usize, number: usize) -> Result<(), DslError> {
        let line = Line {
            number,
            text: raw,
            head: lex_line(raw, start, number)?,
        };
        trace!(line = number, form = ?line.head.token, "classifying line");

        let mods = if line.head.token.takes_modifiers() {
            Modifiers::from_head(line.head.head)
        } else {
            Modifiers::default()
        };
        match line.head.token {
            Token::Domain => {
                let domain = self.new_item("domain", line.head.rest, mods);
                self.builder.push_domain(domain);
                Ok(())
            }
            Token::Version => Ok(()),
            Token::DependsOn => self.push_dependency(&line),
            Token::Major => self.set_version(&line, "major"),
            Token::Minor => self.set_version(&line, "minor"),
            Token::Type => self.parse_type_declaration(&line, mods),
            Token::Command => self.push_member(&line, "commands", "command", mods),
            Token::Event => self.push_member(&line, "events", "event", mods),
            Token::Parameters => self.open_list(&line, "parameters"),
            Token::Returns => self.open_list(&line, "returns"),
            Token::Properties => self.open_list(&line, "properties"),
            Token::Enum => self.open_list(&line, "enum"),
            Token::Redirect => self.set_redirect(&line),
            Token::Member => self.parse_section_member(&line),
        }
    }

    /// `major N` / `minor N`; the number is the leading run of digits.
    fn set_version(&mut self, line: &Line<'_>, key: &str) -> Result<(), DslError> {
        let number = leading_run(line.head.rest, |c| c.is_ascii_digit())
            .ok_or_else(|| line.illegal())?;
        self.builder.version.insert(key.into(), Value::from(number));
        Ok(())
    }

    fn push_dependency(&mut self, line: &Line<'_>) -> Result<(), DslError> {
        let (name, _) = leading_word(line.head.rest).ok_or_else(|| line.illegal())?;
        let domain = self
            .builder
            .current_domain()
            .ok_or_else(|| line.missing("dependency", "a domain"))?;
        self.builder
            .push_to_domain(domain, "dependencies", Value::from(name))
            .ok_or_else(|| line.missing("dependency", "a domain"))?;
        Ok(())
    }

    fn parse_type_declaration(&mut self, line: &Line<'_>, mods: Modifiers) -> Result<(), DslError> {
        let (id, is_array, base) =
            split_type_declaration(line.head.rest).ok_or_else(|| line.illegal())?;

        let domain = self
            .builder
            .current_domain()
            .ok_or_else(|| line.missing("type declaration", "a domain"))?;
        let mut item = self.new_item("id", id, mods);
        assign_type(&mut item, base, is_array, self.options.map_binary_to_string);

        let index = self
            .builder
            .push_to_domain(domain, "types", Value::Object(item))
            .ok_or_else(|| line.missing("type declaration", "a domain"))?;
        self.item = Some(ItemRef {
            domain,
            list: "types",
            index,
        });
        Ok(())
    }

    /// A command or event; the name is the rest of the line, verbatim.
    fn push_member(
        &mut self,
        line: &Line<'_>,
        list: &'static str,
        construct: &'static str,
        mods: Modifiers,
    ) -> Result<(), DslError> {
        let domain = self
            .builder
            .current_domain()
            .ok_or_else(|| line.missing(construct, "a domain"))?;
        let item = self.new_item("name", line.head.rest, mods);
        let index = self
            .builder
            .push_to_domain(domain, list, Value::Object(item))
            .ok_or_else(|| line.missing(construct, "a domain"))?;
        self.item = Some(ItemRef {
            domain,
            list,
            index,
        });
        Ok(())
    }

    /// `parameters`, `returns`, `properties` or `enum`: (re)sets the list on
    /// the current item and makes it the target of the lines that follow.
    fn open_list(&mut self, line: &Line<'_>, key: &'static str) -> Result<(), DslError> {
        let construct = if key == "enum" { "'enum' block" } else { "member block" };
        let item_ref = self.item.ok_or_else(|| line.missing(construct, ITEM_CONTEXT))?;
        self.builder
            .item_mut(item_ref)
            .ok_or_else(|| line.missing(construct, ITEM_CONTEXT))?
            .insert(key.into(), Value::Array(Vec::new()));

        if key == "enum" {
            self.enum_list = Some(EnumRef::Item(item_ref));
        } else {
            self.section = Some(SectionRef {
                item: item_ref,
                key,
            });
        }
        Ok(())
    }

    fn set_redirect(&mut self, line: &Line<'_>) -> Result<(), DslError> {
        let (target, _) = leading_word(line.head.rest).ok_or_else(|| line.illegal())?;
        let item_ref = self.item.ok_or_else(|| line.missing("redirect", ITEM_CONTEXT))?;
        self.builder
            .item_mut(item_ref)
            .ok_or_else(|| line.missing("redirect", ITEM_CONTEXT))?
            .insert("redirect".into(), Value::from(target));
        Ok(())
    }

    /// A parameter, or failing that an enum literal.
    fn parse_section_member(&mut self, line: &Line<'_>) -> Result<(), DslError> {
        if let Some(param) = match_parameter(line.head.rest) {
            return self.push_parameter(line, param);
        }
        if let Some(literal) = match_enum_literal(line.head.rest) {
            return self.push_enum_literal(line, literal);
        }
        Err(line.illegal())
    }

    fn push_parameter(&mut self, line: &Line<'_>, form: ParameterForm<'_>) -> Result<(), DslError> {
        let mut param = self.new_item("name", form.name, form.mods);
        if form.mods.optional {
            param.insert("optional".into(), Value::Bool(true));
        }
        assign_type(
            &mut param,
            form.type_name,
            form.is_array,
            self.options.map_binary_to_string,
        );
        let is_enum = form.type_name == "enum";
        if is_enum {
            param.insert("enum".into(), Value::Array(Vec::new()));
        }

        let section = self
            .section
            .ok_or_else(|| line.missing("parameter", SECTION_CONTEXT))?;
        let list = self
            .builder
            .section_mut(section)
            .ok_or_else(|| line.missing("parameter", SECTION_CONTEXT))?;
        list.push(Value::Object(param));
        let index = list.len() - 1;

        if is_enum {
            self.enum_list = Some(EnumRef::Param { section, index });
        }
        Ok(())
    }

    fn push_enum_literal(&mut self, line: &Line<'_>, literal: &str) -> Result<(), DslError> {
        let target = self
            .enum_list
            .ok_or_else(|| line.missing("enum literal", "an enum"))?;
        self.builder
            .enum_mut(target)
            .ok_or_else(|| line.missing("enum literal", "an enum"))?
            .push(Value::from(literal));
        Ok(())
    }

    /// Starts a new item map: identifying key, then the pending
    /// description, then the modifier flags.
    fn new_item(&self, key: &str, value: &str, mods: Modifiers) -> Map<String, Value> {
        let mut item = Map::new();
        item.insert(key.into(), Value::from(value));
        if !self.description.is_empty() {
            item.insert(
                "description".into(),
                Value::from(self.description.trim()),
            );
        }
        if mods.experimental {
            item.insert("experimental".into(), Value::Bool(true));
        }
        if mods.deprecated {
            item.insert("deprecated".into(), Value::Bool(true));
        }
        item
    }

    fn finish(self) -> Result<Document, Vec<DslError>> {
        debug!(
            domains = self.builder.domains.len(),
            errors = self.errors.len(),
            "parsed PDL source"
        );
        if self.errors.is_empty() {
            Ok(self.builder.into_document())
        } else {
            Err(self.errors)
        }
    }
}
