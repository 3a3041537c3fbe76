#![cfg(feature = "std")]

use std::sync::Arc;
use std::thread;

use vc_serial::{Node, Serializable, TypeRegistry};

#[derive(Serializable, Default, Debug, Clone, PartialEq)]
#[serial(object, default)]
pub struct Sample {
    id: u64,
    label: String,
    ratio: f32,
}

#[test]
fn shared_engine_reads() {
    let mut registry = TypeRegistry::new();
    registry.register::<Sample>();
    let engine = Arc::new(registry.build().unwrap());

    let handles: Vec<_> = (0..8_u64)
        .map(|worker| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for round in 0..64_u64 {
                    let sample = Sample {
                        id: worker * 1000 + round,
                        label: format!("worker-{worker}"),
                        ratio: round as f32 / 4.0,
                    };
                    let node = engine.serialize("sample", &sample).unwrap();
                    assert_eq!(engine.deserialize::<Sample>(&node).unwrap(), sample);
                }
                engine.serialize("last", &worker).unwrap()
            })
        })
        .collect();

    for (worker, handle) in handles.into_iter().enumerate() {
        let node = handle.join().unwrap();
        assert_eq!(node, Node::primitive("last", worker.to_string()));
    }
}
