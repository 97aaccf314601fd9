mod common;

use common::example_bytes;
use livemap::{LiveMap, Object, Value};
use serde_json::json;

fn example() -> LiveMap {
    LiveMap::from_bytes(&example_bytes()).unwrap()
}

fn user_map() -> LiveMap {
    let object: Object = serde_json::from_value(json!({"user": {"name": "mirkowang"}})).unwrap();
    LiveMap::new(object)
}

#[test]
fn test_new_wraps_mapping() {
    let map = LiveMap::new(Object::new());
    assert!(map.is_empty());

    let mut object = Object::new();
    object.insert("hello".to_string(), Value::from("world"));
    let map = LiveMap::new(object);
    assert_eq!(map.get_string("hello").as_deref(), Some("world"));
}

#[test]
fn test_read_into_empty_map() {
    let mut map = LiveMap::default();
    let bytes = serde_json::to_vec(&json!({"hello": "world", "age": 29})).unwrap();

    map.read(&bytes).unwrap();

    assert_eq!(map.len(), 2);
}

#[test]
fn test_read_merges_and_overwrites() {
    let mut map = example();
    map.read(br#"{"age": "thirty", "city": "Shenzhen"}"#).unwrap();

    assert_eq!(map.len(), 6);
    assert_eq!(map.get_string("age").as_deref(), Some("thirty"));
    assert_eq!(map.get_string("city").as_deref(), Some("Shenzhen"));
    assert_eq!(map.get_string("hello").as_deref(), Some("world"));
}

#[test]
fn test_get_int() {
    let map = example();
    assert_eq!(map.get_int("age"), Some(29));
}

#[test]
fn test_get_int_from_string() {
    let map = example();
    assert_eq!(map.get_int("year"), Some(2020));
}

#[test]
fn test_get_string() {
    let map = example();
    assert_eq!(map.get_string("hello").as_deref(), Some("world"));
}

#[test]
fn test_get_string_from_int() {
    let map = example();
    assert_eq!(map.get_string("age").as_deref(), Some("29"));
}

#[test]
fn test_get_string_from_float() {
    let map = example();
    assert_eq!(map.get_string("weight").as_deref(), Some("60.3"));
}

#[test]
fn test_get_float() {
    let map = example();
    assert_eq!(map.get_float("weight"), Some(60.3));
    assert_eq!(map.get_float("age"), Some(29.0));
    assert_eq!(map.get_float("year"), Some(2020.0));
}

#[test]
fn test_get_bool() {
    let map = example();
    assert_eq!(map.get_bool("good"), Some(true));
    assert_eq!(map.get_bool("age"), Some(true));
    assert_eq!(map.get_bool("hello"), None);
}

#[test]
fn test_get_nested_string() {
    let map = user_map();

    assert_eq!(map.get_string("user.name").as_deref(), Some("mirkowang"));
    assert_eq!(map.get_string("user.something"), None);
}

#[test]
fn test_get_live_map() {
    let map = user_map();

    let user = map.get_live_map("user").unwrap();
    assert_eq!(user.len(), 1);
    assert_eq!(user.get_string("name").as_deref(), Some("mirkowang"));

    assert!(map.get_live_map("user.name").is_none());
    assert!(map.get_live_map("nobody").is_none());
}

#[test]
fn test_absent_key_is_uniform() {
    let map = example();
    assert_eq!(map.get_int("absent"), None);
    assert_eq!(map.get_string("absent"), None);
    assert_eq!(map.get_float("absent"), None);
    assert_eq!(map.get_bool("absent"), None);
    assert!(map.get_live_map("absent").is_none());
}

#[test]
fn test_unconvertible_value_contract() {
    let map = LiveMap::from_bytes(br#"{"none": null, "list": [1, 2], "obj": {"a": 1}}"#).unwrap();

    for key in ["none", "list", "obj"] {
        assert_eq!(map.get_int(key), Some(0), "{key}");
        assert_eq!(map.get_string(key), None, "{key}");
        assert_eq!(map.get_float(key), None, "{key}");
        assert_eq!(map.get_bool(key), None, "{key}");
    }
}

#[test]
fn test_malformed_payload_is_rejected() {
    let payloads: [&[u8]; 6] = [
        b"",
        b"{\"age\": 29",
        b"{age: 29}",
        b"[1, 2, 3]",
        b"\"just a string\"",
        b"null",
    ];

    for payload in payloads {
        let err = LiveMap::from_bytes(payload).unwrap_err();
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("failed to decode document"));
    }
}

#[test]
fn test_decode_error_keeps_parser_details() {
    let err = LiveMap::from_bytes(b"{\n  \"age\": 29,\n  oops\n}").unwrap_err();
    assert_eq!(err.line(), 3);
    assert!(err.inner().is_syntax());

    let err = "[1]".parse::<LiveMap>().unwrap_err();
    assert!(err.into_inner().is_data());
}

#[test]
fn test_conversions() {
    let bytes: &[u8] = br#"{"a": 1}"#;
    let map = LiveMap::try_from(bytes).unwrap();
    assert_eq!(map.get("a"), Some(&Value::Uint(1)));

    let object: Object = map.clone().into();
    assert_eq!(LiveMap::from(object), map);
}

#[test]
fn test_deeply_nested_document_is_accepted() {
    let depth = 1000;
    let document = format!("{}1{}", r#"{"a": "#.repeat(depth), "}".repeat(depth));

    let map = LiveMap::from_bytes(document.as_bytes()).unwrap();

    let path = vec!["a"; depth].join(".");
    assert_eq!(map.get_int("a"), Some(0));
    assert_eq!(map.try_get::<i64>(&path), Ok(1));
    assert_eq!(map.get_string(&path).as_deref(), Some("1"));

    let parent = vec!["a"; depth - 1].join(".");
    let innermost = map.get_live_map(&parent).unwrap();
    assert_eq!(innermost.get_int("a"), Some(1));

    // Unbalanced documents are still rejected at any depth
    let truncated = &document[..document.len() - 1];
    assert!(LiveMap::from_bytes(truncated.as_bytes()).is_err());
}
