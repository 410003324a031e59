use std::fs;

use ker::{Document, KerError, Value, format_document, from_json_value, parse_document, to_json_value};

const CANONICAL: &str = r#"name = "gateway"
version = 3
debug = false
ratio = 0.5
server {
    host = "0.0.0.0"
    port = 8080
    tags = ["edge", "public"]
    tls {
        enabled = true
        cert = "/etc/ssl/cert.pem"
    }
}
upstreams = [
    {
        name = "a"
        weight = 1
    },
    {
        name = "b"
        weight = 2
    },
]
"display name" = "Edge \"Gateway\"\n"
empty {}
nothing = []
fallback = null
"#;

fn sample() -> Document {
    let text = fs::read_to_string("tests/fixtures/sample.ker").expect("Failed to read sample.ker");
    parse_document(&text).expect("Failed to parse sample.ker")
}

#[test]
fn test_fixture_formats_canonically() {
    assert_eq!(format_document(&sample()), CANONICAL);
}

#[test]
fn test_format_is_idempotent() {
    let once = format_document(&sample());
    let twice = format_document(&parse_document(&once).expect("Failed to reparse"));
    assert_eq!(once, twice);
}

#[test]
fn test_reparse_gives_same_tree() {
    let doc = sample();
    assert_eq!(parse_document(&format_document(&doc)).unwrap(), doc);
}

#[test]
fn test_json_round_trip() {
    let doc = sample();
    let json = to_json_value(&doc);
    assert_eq!(from_json_value(&json).expect("Failed to convert back"), doc);
}

#[test]
fn test_json_keeps_number_kinds() {
    let json = to_json_value(&sample());
    assert!(json["version"].is_i64());
    assert!(json["ratio"].is_f64());
    assert_eq!(json["server"]["tls"]["enabled"], true);
    assert!(json["fallback"].is_null());
    assert_eq!(json["empty"], serde_json::json!({}));
}

#[test]
fn test_key_order_is_preserved() {
    let doc = sample();
    let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "name",
            "version",
            "debug",
            "ratio",
            "server",
            "upstreams",
            "display name",
            "empty",
            "nothing",
            "fallback"
        ]
    );

    let json = to_json_value(&doc);
    let json_keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(json_keys, keys);
}

#[test]
fn test_comments_do_not_survive() {
    let out = format_document(&sample());
    assert!(!out.contains('#'));
    assert!(!out.contains("//"));
}

#[test]
fn test_nested_structure() {
    let doc = sample();
    let Some(Value::Array(upstreams)) = doc.get("upstreams") else {
        panic!("upstreams should be an array");
    };
    assert_eq!(upstreams.len(), 2);
    assert_eq!(
        upstreams[1].as_block().and_then(|b| b.get("name")),
        Some(&Value::from("b"))
    );
}

#[test]
fn test_empty_document() {
    let doc = parse_document("# only a comment\n").unwrap();
    assert!(doc.is_empty());
    assert_eq!(format_document(&doc), "");
    assert_eq!(to_json_value(&doc), serde_json::json!({}));
}

#[test]
fn test_duplicate_keys_are_rejected() {
    let err = parse_document("a = 1\nb { }\na = 2").unwrap_err();
    assert!(matches!(err, KerError::DuplicateKey { ref key, .. } if key == "a"));
    assert_eq!(err.position(), Some((3, 1)));
}

#[test]
fn test_malformed_input_is_rejected() {
    for source in ["a = ", "a = [1, 2", "a { b = 1", "= 1", "a = \"open", "a = 01", "a = @"] {
        let err = parse_document(source).expect_err(source);
        assert!(err.position().is_some(), "{source}: {err}");
    }
}

#[test]
fn test_non_object_json_is_rejected() {
    let err = from_json_value(&serde_json::json!([1, 2])).unwrap_err();
    assert!(matches!(err, KerError::ConversionError { .. }));
}
