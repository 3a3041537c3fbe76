#![cfg(feature = "serde")]

use vc_serial::{Node, Serializable, TypeRegistry};

#[derive(Serializable, Default, Debug, PartialEq)]
#[serial(object, default)]
pub struct Point {
    #[serial(attribute)]
    id: u16,
    x: i32,
    y: i32,
}

fn node() -> Node {
    let mut registry = TypeRegistry::new();
    registry.register::<Point>();
    let engine = registry.build().unwrap();
    engine.serialize("P", &Point { id: 7, x: 3, y: 4 }).unwrap()
}

#[test]
fn ron_document() {
    let node = node();
    let text = ron::to_string(&node).unwrap();
    let back: Node = ron::from_str(&text).unwrap();
    assert_eq!(back, node);
}

#[test]
fn json_document() {
    let node = node();
    let value = serde_json::to_value(&node).unwrap();

    assert_eq!(value["name"], "P");
    assert_eq!(value["attributes"][0]["name"], "id");
    assert_eq!(value["children"][1]["attributes"][0]["value"], "4");

    let back: Node = serde_json::from_value(value).unwrap();
    assert_eq!(back, node);
}

#[test]
fn empty_lists_are_omitted() {
    let leaf = Node::new("leaf");
    assert_eq!(serde_json::to_string(&leaf).unwrap(), r#"{"name":"leaf"}"#);
    let back: Node = serde_json::from_str(r#"{"name":"leaf"}"#).unwrap();
    assert_eq!(back, leaf);
}
