use vc_serial::{Node, SerialEngine, Serializable, Serializability, TypeRegistry};

#[derive(Serializable, Default, Debug, Clone, PartialEq)]
#[serial(object, default)]
pub struct Point {
    x: i32,
    y: i32,
}

#[derive(Serializable, Default, Debug, Clone, PartialEq)]
#[serial(object, default)]
pub struct Line {
    from: Point,
    to: Point,
}

#[derive(Serializable, Default, Debug, Clone, PartialEq)]
#[serial(object, default)]
pub struct Tag {
    #[serial(attribute)]
    id: u32,
    #[serial(rename = "text")]
    label: String,
    #[serial(skip)]
    cached: Option<usize>,
}

#[derive(Serializable, Default, Debug, Clone, PartialEq)]
#[serial(object, default)]
pub struct Pair(u8, bool);

#[derive(Serializable, Default, Debug, Clone, PartialEq)]
#[serial(object, default)]
pub struct Marker;

fn engine() -> SerialEngine {
    let mut registry = TypeRegistry::new();
    registry.register::<Line>();
    registry.register::<Tag>();
    registry.register::<Pair>();
    registry.register::<Marker>();
    registry.build().unwrap()
}

#[test]
fn int32() {
    let engine = engine();

    let node = engine.serialize("n", &42_i32).unwrap();
    assert_eq!(node.name(), "n");
    assert_eq!(node.attribute("Value"), Some("42"));
    assert!(node.children().is_empty());

    assert_eq!(engine.deserialize::<i32>(&node).unwrap(), 42);
    assert_eq!(engine.serializability(core::any::TypeId::of::<i32>()), Some(Serializability::Primitive));
}

#[test]
fn point() {
    let engine = engine();
    let point = Point { x: 3, y: 4 };

    let node = engine.serialize("P", &point).unwrap();
    let expected = Node::new("P")
        .with_child(Node::primitive("x", "3"))
        .with_child(Node::primitive("y", "4"));
    assert_eq!(node, expected);

    assert_eq!(engine.deserialize::<Point>(&node).unwrap(), point);
}

#[test]
fn nested_objects() {
    let engine = engine();
    let line = Line {
        from: Point { x: -1, y: 0 },
        to: Point { x: 7, y: 9 },
    };

    let node = engine.serialize("line", &line).unwrap();
    assert_eq!(node.children().len(), 2);
    assert_eq!(
        node.child("to").and_then(|to| to.child("y")).and_then(Node::value),
        Some("9")
    );

    assert_eq!(engine.deserialize::<Line>(&node).unwrap(), line);
}

#[test]
fn attribute_rename_and_skip() {
    let engine = engine();
    let tag = Tag {
        id: 17,
        label: String::from("hello world"),
        cached: Some(3),
    };

    let node = engine.serialize("tag", &tag).unwrap();
    assert_eq!(node.attribute("id"), Some("17"));
    assert_eq!(node.child("text").and_then(Node::value), Some("hello world"));
    assert!(node.child("label").is_none());
    assert!(node.child("cached").is_none());

    let back = engine.deserialize::<Tag>(&node).unwrap();
    assert_eq!(back.id, 17);
    assert_eq!(back.label, "hello world");
    assert_eq!(back.cached, None);
}

#[test]
fn tuple_and_unit_structs() {
    let engine = engine();

    let node = engine.serialize("pair", &Pair(5, true)).unwrap();
    assert_eq!(node.child("0").and_then(Node::value), Some("5"));
    assert_eq!(node.child("1").and_then(Node::value), Some("true"));
    assert_eq!(engine.deserialize::<Pair>(&node).unwrap(), Pair(5, true));

    let node = engine.serialize("marker", &Marker).unwrap();
    assert_eq!(node, Node::new("marker"));
    assert_eq!(engine.deserialize::<Marker>(&node).unwrap(), Marker);
}

#[test]
fn deterministic() {
    let engine = engine();
    let line = Line {
        from: Point { x: 1, y: 2 },
        to: Point { x: 3, y: 4 },
    };

    let first = engine.serialize("line", &line).unwrap();
    let second = engine.serialize("line", &line).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn built_in_primitives() {
    let engine = engine();

    let node = engine.serialize("s", &String::from("a < b")).unwrap();
    assert_eq!(engine.deserialize::<String>(&node).unwrap(), "a < b");

    let node = engine.serialize("f", &0.1_f64).unwrap();
    assert_eq!(engine.deserialize::<f64>(&node).unwrap(), 0.1);

    let node = engine.serialize("c", &'λ').unwrap();
    assert_eq!(engine.deserialize::<char>(&node).unwrap(), 'λ');

    let node = engine.serialize("big", &u128::MAX).unwrap();
    assert_eq!(node.value(), Some("340282366920938463463374607431768211455"));
    assert_eq!(engine.deserialize::<u128>(&node).unwrap(), u128::MAX);
}

#[test]
fn type_erased_calls() {
    use core::any::{Any, TypeId};

    let engine = engine();
    let point: Box<dyn Any> = Box::new(Point { x: 1, y: 2 });

    let node = engine
        .serialize_dyn(TypeId::of::<Point>(), "p", point.as_ref())
        .unwrap();
    assert_eq!(node.child("y").and_then(Node::value), Some("2"));

    let back = engine.deserialize_dyn(TypeId::of::<Point>(), &node).unwrap();
    assert_eq!(back.downcast_ref::<Point>(), Some(&Point { x: 1, y: 2 }));

    assert!(engine.serialize_dyn(TypeId::of::<Vec<u8>>(), "v", &0_u8).is_err());
}
