//! Topological layering.
//!
//! A Kahn-style frontier expansion: every pass takes the remaining types
//! whose dependencies are all processed, appends them as one layer and
//! marks them processed. Types inside a layer are independent of each
//! other and keep their registration order.

use alloc::vec::Vec;
use core::any::TypeId;

use log::debug;

use crate::analysis::DependencyGraph;
use crate::error::{InitError, TypeList};
use crate::info::{Serializability, Type};
use crate::utils::HashSet;

/// Splits `types` into dependency-ordered layers.
///
/// `processed` holds the types already available, it is extended with
/// every layered type. A pass that makes no progress means the remaining
/// types form a cycle: [`InitError::CyclicDependency`].
pub fn layer(
    category: Serializability,
    types: &[Type],
    processed: &mut HashSet<TypeId>,
    graph: &DependencyGraph,
) -> Result<Vec<Vec<Type>>, InitError> {
    let mut remaining = types.to_vec();
    let mut layers = Vec::new();

    while !remaining.is_empty() {
        let (ready, blocked): (Vec<Type>, Vec<Type>) = remaining.into_iter().partition(|ty| {
            graph
                .dependencies_of(ty.id())
                .all(|dependency| processed.contains(&dependency.id()))
        });

        if ready.is_empty() {
            let cycle = graph.find_cycle(&blocked).unwrap_or_default();
            return Err(InitError::CyclicDependency {
                category,
                remaining: TypeList::set(blocked),
                cycle: TypeList::chain(cycle),
            });
        }

        processed.extend(ready.iter().map(Type::id));
        layers.push(ready);
        remaining = blocked;
    }

    debug!(
        "{} {category} types in {} layers",
        types.len(),
        layers.len()
    );
    Ok(layers)
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::layer;
    use crate::analysis::{Classification, DependencyGraph, extract_all};
    use crate::error::InitError;
    use crate::info::{SerialMarkers, Serializability, Type, TypePath};
    use crate::registry::{SlotDescriptor, TypeDescriptor, TypeRegistry};
    use crate::utils::HashSet;

    macro_rules! test_type {
        ($name:ident { $($field:ident: $ty:ident),* }) => {
            #[derive(Default)]
            struct $name { $($field: $ty),* }

            impl TypePath for $name {
                fn type_path() -> &'static str { stringify!($name) }
                fn type_name() -> &'static str { stringify!($name) }
            }

            impl $name {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::new::<$name>()
                        .with_markers(SerialMarkers::OBJECT)
                        .with_default::<$name>()
                        $(.with_slot(SlotDescriptor::new::<$name, $ty>(
                            stringify!($field),
                            |o| &o.$field,
                            |o, v| o.$field = v,
                        )))*
                }
            }
        };
    }

    test_type!(Top { left: Left, right: Right });
    test_type!(Left { base: Base });
    test_type!(Right { base: Base, value: i32 });
    test_type!(Base { value: i32 });

    #[test]
    fn dependencies_come_first() {
        let mut registry = TypeRegistry::new();
        registry.register_descriptor(Top::descriptor());
        registry.register_descriptor(Left::descriptor());
        registry.register_descriptor(Right::descriptor());
        registry.register_descriptor(Base::descriptor());

        let classification = Classification::new(&registry).unwrap();
        let metas = extract_all(&registry, &classification).unwrap();
        let graph = DependencyGraph::new(&classification, &metas);

        let mut processed: HashSet<_> = classification.primitives().iter().map(Type::id).collect();
        let layers = layer(
            Serializability::Object,
            classification.objects(),
            &mut processed,
            &graph,
        )
        .unwrap();

        assert_eq!(
            layers,
            [
                Vec::from([Type::of::<Base>()]),
                Vec::from([Type::of::<Left>(), Type::of::<Right>()]),
                Vec::from([Type::of::<Top>()]),
            ]
        );
        assert!(processed.contains(&Type::of::<Top>().id()));
    }

    #[test]
    fn stalled_pass_reports_cycle() {
        let mut registry = TypeRegistry::new();
        registry.register_descriptor(Left::descriptor());
        registry.register_descriptor(Base::descriptor());

        let classification = Classification::new(&registry).unwrap();
        let metas = extract_all(&registry, &classification).unwrap();
        let graph = DependencyGraph::new(&classification, &metas);

        // Without `Base` processed and outside the set, `Left` can never be ready.
        let err = layer(
            Serializability::Object,
            &[Type::of::<Left>()],
            &mut HashSet::default(),
            &graph,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            InitError::CyclicDependency { category: Serializability::Object, .. }
        ));
    }
}
