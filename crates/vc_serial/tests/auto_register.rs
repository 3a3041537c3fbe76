#![cfg(feature = "auto_register")]

use vc_serial::{Node, Serializable, TypeRegistry};

#[derive(Serializable, Default, Debug, PartialEq)]
#[serial(object, default, auto_register)]
pub struct Score {
    value: u32,
    owner: Player,
}

#[derive(Serializable, Default, Debug, PartialEq)]
#[serial(object, default)]
pub struct Player {
    name: String,
}

#[derive(Serializable, Default)]
#[serial(object, default)]
pub struct NotSubmitted {
    value: u8,
}

#[test]
fn registers_annotated_types() {
    let mut registry = TypeRegistry::new();
    if !registry.auto_register() {
        // `inventory` is not supported on this platform.
        return;
    }

    assert!(registry.contains::<Score>());
    assert!(registry.contains::<Player>());
    assert!(!registry.contains::<NotSubmitted>());
    assert!(registry.auto_register());

    let engine = registry.build().unwrap();
    let score = Score {
        value: 12,
        owner: Player {
            name: String::from("ada"),
        },
    };
    let node = engine.serialize("score", &score).unwrap();
    assert_eq!(
        node.child("owner").and_then(|owner| owner.child("name")).and_then(Node::value),
        Some("ada")
    );
    assert_eq!(engine.deserialize::<Score>(&node).unwrap(), score);
}
