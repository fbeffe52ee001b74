use pdl_core::json::{self, JsonStyle};
use pdl_core::Document;
use proptest::prelude::*;
use serde_json::{json, Value};

proptest! {
    #[test]
    fn ascii_output_is_ascii_and_reloads(s in "\\PC{0,40}") {
        let value = json!({ "description": s });
        let out = json::to_string(&value, JsonStyle::default()).unwrap();
        prop_assert!(out.bytes().all(|b| b.is_ascii()));
        let back: Value = serde_json::from_str(&out).unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn unicode_output_reloads(s in "\\PC{0,40}") {
        let value = json!({ "description": s });
        let out = json::to_string(&value, JsonStyle::unicode()).unwrap();
        let back: Value = serde_json::from_str(&out).unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn keys_keep_insertion_order(keys in prop::collection::vec("[a-z]{1,8}", 1..10)) {
        let mut object = serde_json::Map::new();
        for key in &keys {
            object.insert(key.clone(), Value::Bool(true));
        }
        let expected: Vec<String> = object.keys().cloned().collect();
        let out = json::to_string(&Value::Object(object), JsonStyle::default()).unwrap();
        let back: serde_json::Map<String, Value> = serde_json::from_str(&out).unwrap();
        let actual: Vec<String> = back.keys().cloned().collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn domain_count_matches(n in 0usize..8) {
        let domains: Vec<Value> = (0..n).map(|i| json!({ "domain": format!("D{i}") })).collect();
        let doc = Document::new(json!({ "version": {}, "domains": domains }));
        prop_assert_eq!(doc.domain_count(), n);
        let protocol = doc.to_protocol().unwrap();
        prop_assert_eq!(protocol.stats().domains, n);
    }
}

#[test]
fn astral_characters_use_surrogate_pairs() {
    let out = json::to_string(&json!("\u{1F600}"), JsonStyle::default()).unwrap();
    assert_eq!(out, r#""\ud83d\ude00""#);
}

#[test]
fn empty_protocol_layout() {
    let out = json::to_string(Document::empty_protocol().root(), JsonStyle::default()).unwrap();
    assert_eq!(out, "{\n  \"version\": {},\n  \"domains\": []\n}");
}
