use pdl_core::Converter;
use pdl_dsl::{parse, PdlParser};
use proptest::prelude::*;

const KEYWORDS: &[&str] = &[
    "experimental",
    "deprecated",
    "optional",
    "domain",
    "depends",
    "on",
    "type",
    "extends",
    "array",
    "of",
    "command",
    "event",
    "parameters",
    "returns",
    "properties",
    "enum",
    "redirect",
    "version",
    "major",
    "minor",
];

/// Strategy for PascalCase domain names.
fn domain_name() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9]{0,12}"
}

/// Strategy for camelCase member names that are not keywords.
fn member_name() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,12}".prop_filter("not a keyword", |s| !KEYWORDS.contains(&s.as_str()))
}

/// Strategy for a parameter type.
fn param_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("integer".to_string()),
        Just("number".to_string()),
        Just("boolean".to_string()),
        Just("string".to_string()),
        Just("object".to_string()),
        Just("any".to_string()),
        "[A-Z][a-zA-Z]{0,8}\\.[A-Z][a-zA-Z]{0,8}",
    ]
}

proptest! {
    /// Parsing never panics on arbitrary input.
    #[test]
    fn parser_never_panics(input in "\\PC{0,200}") {
        let _ = parse(&input);
    }

    /// Indentation-shaped noise never panics either.
    #[test]
    fn indented_noise_never_panics(lines in prop::collection::vec(("[ ]{0,9}", "[a-z #]{0,20}"), 0..20)) {
        let source: String = lines.iter().map(|(indent, text)| format!("{indent}{text}\n")).collect();
        let _ = parse(&source);
    }

    /// Domains and their commands come out in declaration order.
    #[test]
    fn declaration_order_preserved(
        domains in prop::collection::vec((domain_name(), prop::collection::vec(member_name(), 0..5)), 1..5),
    ) {
        let mut source = String::new();
        for (domain, commands) in &domains {
            source.push_str(&format!("domain {domain}\n"));
            for command in commands {
                source.push_str(&format!("  command {command}\n"));
            }
        }

        let doc = parse(&source).unwrap();
        let parsed = doc.root()["domains"].as_array().unwrap();
        prop_assert_eq!(parsed.len(), domains.len());
        for (value, (domain, commands)) in parsed.iter().zip(&domains) {
            prop_assert_eq!(value["domain"].as_str(), Some(domain.as_str()));
            let names: Vec<&str> = value
                .get("commands")
                .and_then(|c| c.as_array())
                .map(|c| c.iter().filter_map(|v| v["name"].as_str()).collect())
                .unwrap_or_default();
            let expected: Vec<&str> = commands.iter().map(String::as_str).collect();
            prop_assert_eq!(names, expected);
        }
    }

    /// A parameter line records its name and exactly one of `type` / `$ref`.
    #[test]
    fn parameter_type_assignment(
        name in member_name(),
        ty in param_type(),
        optional in any::<bool>(),
    ) {
        let modifier = if optional { "optional " } else { "" };
        let source = format!("domain Foo\n  command bar\n    parameters\n      {modifier}{ty} {name}\n");
        let doc = parse(&source).unwrap();
        let param = &doc.root()["domains"][0]["commands"][0]["parameters"][0];

        prop_assert_eq!(param["name"].as_str(), Some(name.as_str()));
        prop_assert_eq!(param.get("optional").is_some(), optional);
        let is_ref = ty.contains('.');
        prop_assert_eq!(param.get("$ref").is_some(), is_ref);
        prop_assert_eq!(param.get("type").is_some(), !is_ref);
    }

    /// Converting twice gives identical output, which reparses to the document.
    #[test]
    fn conversion_idempotent_and_faithful(
        domain in domain_name(),
        commands in prop::collection::vec(member_name(), 0..6),
        description in "[A-Za-z ,.]{0,40}",
    ) {
        let mut source = format!("# {description}\ndomain {domain}\n");
        for command in &commands {
            source.push_str(&format!("  command {command}\n"));
        }

        let converter = Converter::new(PdlParser);
        let first = converter.convert(&source).unwrap();
        let second = converter.convert(&source).unwrap();
        prop_assert_eq!(&first, &second);

        let reparsed: serde_json::Value = serde_json::from_str(&first).unwrap();
        let parsed = converter.parse(&source).unwrap();
        prop_assert_eq!(&reparsed, parsed.root());
    }
}
