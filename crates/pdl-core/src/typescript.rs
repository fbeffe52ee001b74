//! TypeScript declarations for a protocol.
//!
//! The generated module has one namespace per protocol (`<prefix><name>`),
//! a `Domains` interface listing every domain's API, and for each domain an
//! `<Domain>Api` interface plus a `<Domain>` namespace holding the parameter,
//! result, event and type declarations.

use crate::types::{Command, DataType, Domain, Event, Property, Protocol, TypeDefinition};

/// Namespace prefix used when the caller does not pick one.
pub const DEFAULT_NAMESPACE_PREFIX: &str = "Cdp";

/// Generates declarations for `protocol` inside `export namespace Cdp<name>`.
pub fn generate(name: &str, protocol: &Protocol) -> String {
    generate_with_prefix(DEFAULT_NAMESPACE_PREFIX, name, protocol)
}

/// Generates declarations inside `export namespace <prefix><name>`.
pub fn generate_with_prefix(prefix: &str, name: &str, protocol: &Protocol) -> String {
    let mut out = Emitter::default();
    let mut interfaces = Separator::default();

    out.line("");
    out.line(format!("export namespace {prefix}{name} {{"));
    out.line("export type integer = number;");
    interfaces.next(&mut out);

    interfaces.next(&mut out);
    out.doc("The list of domains.", false);
    out.line("export interface Domains {");
    for domain in &protocol.domains {
        out.line(format!("{0}: {0}Api;", domain.domain));
    }
    out.line("}");

    for domain in &protocol.domains {
        emit_domain(&mut out, &mut interfaces, domain);
    }

    out.line("}");
    out.finish()
}

fn emit_domain(out: &mut Emitter, interfaces: &mut Separator, domain: &Domain) {
    let name = title_case(&domain.domain);
    let mut api = Separator::default();

    interfaces.next(out);
    out.doc(&format!("Methods and events of the '{name}' domain."), false);
    out.line(format!("export interface {name}Api {{"));
    out.line("requests: {");
    for command in &domain.commands {
        api.next(out);
        out.doc(desc(&command.description), command.deprecated);
        let method = title_case(&command.name);
        out.line(format!(
            "{}: {{ params: {name}.{method}Params, result: {name}.{method}Result }}",
            command.name
        ));
    }
    out.line("};");

    out.line("events: {");
    for event in &domain.events {
        api.next(out);
        out.doc(desc(&event.description), event.deprecated);
        out.line(format!(
            "{}: {{ params: {name}.{}Event }};",
            event.name,
            title_case(&event.name)
        ));
    }
    out.line("};");
    out.line("}");

    let mut types = Separator::default();
    interfaces.next(out);
    out.doc(&format!("Types of the '{name}' domain."), false);
    out.line(format!("export namespace {name} {{"));
    for command in &domain.commands {
        emit_command_types(out, &mut types, &name, command);
    }
    for event in &domain.events {
        emit_event_types(out, &mut types, &name, event);
    }
    for type_def in &domain.types {
        emit_type_definition(out, &mut types, type_def);
    }
    out.line("}");
}

fn emit_command_types(out: &mut Emitter, types: &mut Separator, domain: &str, command: &Command) {
    let method = title_case(&command.name);

    types.next(out);
    out.doc(
        &format!("Parameters of the '{domain}.{}' method.", command.name),
        false,
    );
    out.line(format!("export interface {method}Params {{"));
    emit_props(out, &command.parameters);
    out.line("}");

    types.next(out);
    out.doc(
        &format!("Return value of the '{domain}.{}' method.", command.name),
        false,
    );
    out.line(format!("export interface {method}Result {{"));
    emit_props(out, &command.returns);
    out.line("}");
}

fn emit_event_types(out: &mut Emitter, types: &mut Separator, domain: &str, event: &Event) {
    types.next(out);
    out.doc(
        &format!("Parameters of the '{domain}.{}' event.", event.name),
        false,
    );
    out.line(format!("export interface {}Event {{", title_case(&event.name)));
    emit_props(out, &event.parameters);
    out.line("}");
}

fn emit_type_definition(out: &mut Emitter, types: &mut Separator, type_def: &TypeDefinition) {
    types.next(out);
    out.doc(desc(&type_def.description), type_def.deprecated);
    let id = title_case(&type_def.id);
    if type_def.data_type.is_object() {
        out.line(format!("export interface {id} {{"));
        match &type_def.properties {
            Some(props) => emit_props(out, props),
            None => out.line("[key: string]: any;"),
        }
        out.line("}");
    } else {
        out.line(format!(
            "export type {id} = {};",
            type_expression(&type_def.data_type)
        ));
    }
}

fn emit_props(out: &mut Emitter, props: &[Property]) {
    let mut separator = Separator::default();
    for prop in props {
        separator.next(out);
        out.doc(desc(&prop.description), prop.deprecated);
        let optional = if prop.optional { "?" } else { "" };
        out.line(format!(
            "{}{optional}: {};",
            prop.name,
            type_expression(&prop.data_type)
        ));
    }
}

/// Maps a PDL type to a TypeScript type expression.
pub fn type_expression(data_type: &DataType) -> String {
    if data_type.is("string") {
        if let Some(values) = &data_type.enum_values {
            return values
                .iter()
                .map(|v| format!("'{v}'"))
                .collect::<Vec<_>>()
                .join(" | ");
        }
    }
    if let Some(reference) = &data_type.reference {
        return reference.clone();
    }
    if data_type.is("array") {
        let inner = data_type
            .items
            .as_deref()
            .map_or_else(|| "any".to_string(), type_expression);
        return format!("{inner}[]");
    }
    if data_type.is_object() {
        return "any".to_string();
    }
    data_type.type_name.clone().unwrap_or_else(|| "any".to_string())
}

/// Upper-cases the first character.
pub fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn desc(description: &Option<String>) -> &str {
    description.as_deref().unwrap_or("")
}

/// Pushes a blank line before every call except the first.
#[derive(Default)]
struct Separator {
    started: bool,
}

impl Separator {
    fn next(&mut self, out: &mut Emitter) {
        if self.started {
            out.line("");
        }
        self.started = true;
    }
}

/// Line sink that indents by brace depth.
#[derive(Default)]
struct Emitter {
    lines: Vec<String>,
    depth: usize,
}

impl Emitter {
    /// Pushes one line at the current depth. Code lines ending in `{` open a
    /// level and lines starting with `}` close one; doc comment lines never
    /// change the depth.
    fn line(&mut self, text: impl Into<String>) {
        let text = text.into();
        let code = !text.starts_with(" *");
        if code && text.starts_with('}') {
            self.depth = self.depth.saturating_sub(1);
        }
        if text.is_empty() {
            self.lines.push(text);
            return;
        }
        let opens = code && text.ends_with('{');
        self.lines.push(format!("{}{text}", "\t".repeat(self.depth)));
        if opens {
            self.depth += 1;
        }
    }

    /// Emits a `/** ... */` block. Nothing is emitted when there is neither
    /// text nor a tag.
    fn doc(&mut self, text: &str, deprecated: bool) {
        let mut text = text.to_string();
        if deprecated {
            text.push_str("\n@deprecated");
        }
        if text.is_empty() {
            return;
        }
        self.line("/**");
        for line in text.split('\n') {
            self.line(format!(" * {line}"));
        }
        self.line(" */");
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}
