use alloc::vec;
use alloc::vec::Vec;
use core::any::TypeId;

use crate::analysis::Classification;
use crate::info::{Serializability, Type, TypeMetaInfo};
use crate::utils::TypeIdMap;

// -----------------------------------------------------------------------------
// DependencyGraph

/// The directed dependency graph among composite types.
///
/// Nodes are the `Object`, `File` and `Folder` types in classification
/// order. There is an edge `A -> B` for each unique sub-type or explicit
/// dependency `B` of `A` that is itself composite, primitives are leaves
/// and never part of the graph.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<Type>,
    indices: TypeIdMap<usize>,
    dependencies: Vec<Vec<usize>>,
    dependents: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Builds the graph from the extracted meta-infos.
    pub fn new(classification: &Classification, metas: &TypeIdMap<TypeMetaInfo>) -> Self {
        let mut graph = Self::default();
        for category in Serializability::SERIALIZABLE.into_iter().filter(|c| c.is_composite()) {
            for &ty in classification.bucket(category) {
                graph.indices.insert(ty.id(), graph.nodes.len());
                graph.nodes.push(ty);
            }
        }
        graph.dependencies = vec![Vec::new(); graph.nodes.len()];
        graph.dependents = vec![Vec::new(); graph.nodes.len()];

        for from in 0..graph.nodes.len() {
            let Some(meta) = metas.get(&graph.nodes[from].id()) else {
                continue;
            };
            for sub in meta.referenced_types() {
                if let Some(&to) = graph.indices.get(&sub.id()) {
                    graph.dependencies[from].push(to);
                    graph.dependents[to].push(from);
                }
            }
        }
        graph
    }

    /// The composite types, in classification order.
    #[inline]
    pub fn nodes(&self) -> &[Type] {
        &self.nodes
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.indices.contains(&type_id)
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.dependencies.iter().map(Vec::len).sum()
    }

    /// The composite types `type_id` depends on.
    pub fn dependencies_of(&self, type_id: TypeId) -> impl Iterator<Item = Type> + '_ {
        self.neighbours(&self.dependencies, type_id)
    }

    /// The composite types depending on `type_id`.
    pub fn dependents_of(&self, type_id: TypeId) -> impl Iterator<Item = Type> + '_ {
        self.neighbours(&self.dependents, type_id)
    }

    fn neighbours<'a>(
        &'a self,
        adjacency: &'a [Vec<usize>],
        type_id: TypeId,
    ) -> impl Iterator<Item = Type> + 'a {
        self.indices
            .get(&type_id)
            .map(|&index| adjacency[index].as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&index| self.nodes[index])
    }

    /// Finds one cycle among `within`, following edges inside that set only.
    ///
    /// The cycle is returned closed, the first type repeated at the end:
    /// `A -> B -> A`.
    pub fn find_cycle(&self, within: &[Type]) -> Option<Vec<Type>> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Outside,
            Unvisited,
            OnPath,
            Done,
        }

        let mut marks = vec![Mark::Outside; self.nodes.len()];
        for ty in within {
            if let Some(&index) = self.indices.get(&ty.id()) {
                marks[index] = Mark::Unvisited;
            }
        }

        // Iterative DFS, `path` holds the current chain with the next edge to try.
        let mut path: Vec<(usize, usize)> = Vec::new();
        for root in 0..self.nodes.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            marks[root] = Mark::OnPath;
            path.push((root, 0));

            while let Some(top) = path.last_mut() {
                let (node, next) = *top;
                let Some(&to) = self.dependencies[node].get(next) else {
                    marks[node] = Mark::Done;
                    path.pop();
                    continue;
                };
                top.1 += 1;
                match marks[to] {
                    Mark::Unvisited => {
                        marks[to] = Mark::OnPath;
                        path.push((to, 0));
                    }
                    Mark::OnPath => {
                        let start = path.iter().position(|&(entry, _)| entry == to)?;
                        let mut cycle: Vec<Type> =
                            path[start..].iter().map(|&(entry, _)| self.nodes[entry]).collect();
                        cycle.push(self.nodes[to]);
                        return Some(cycle);
                    }
                    Mark::Outside | Mark::Done => {}
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::DependencyGraph;
    use crate::info::{Type, TypePath};
    use crate::utils::TypeIdMap;

    struct A;
    struct B;
    struct C;

    macro_rules! impl_path {
        ($($ty:ident),*) => {$(
            impl TypePath for $ty {
                fn type_path() -> &'static str { stringify!($ty) }
                fn type_name() -> &'static str { stringify!($ty) }
            }
        )*};
    }
    impl_path!(A, B, C);

    fn graph(edges: &[(usize, usize)]) -> DependencyGraph {
        let nodes = [Type::of::<A>(), Type::of::<B>(), Type::of::<C>()];
        let mut graph = DependencyGraph {
            nodes: nodes.to_vec(),
            indices: TypeIdMap::new(),
            dependencies: alloc::vec![Vec::new(); 3],
            dependents: alloc::vec![Vec::new(); 3],
        };
        for (index, ty) in nodes.iter().enumerate() {
            graph.indices.insert(ty.id(), index);
        }
        for &(from, to) in edges {
            graph.dependencies[from].push(to);
            graph.dependents[to].push(from);
        }
        graph
    }

    #[test]
    fn queries() {
        let graph = graph(&[(0, 1), (0, 2), (1, 2)]);
        let deps: Vec<_> = graph.dependencies_of(Type::of::<A>().id()).collect();
        assert_eq!(deps, [Type::of::<B>(), Type::of::<C>()]);

        let dependents: Vec<_> = graph.dependents_of(Type::of::<C>().id()).collect();
        assert_eq!(dependents, [Type::of::<A>(), Type::of::<B>()]);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.dependencies_of(core::any::TypeId::of::<u8>()).count(), 0);
    }

    #[test]
    fn acyclic_graph_has_no_cycle() {
        let graph = graph(&[(0, 1), (1, 2), (0, 2)]);
        assert_eq!(graph.find_cycle(graph.nodes()), None);
    }

    #[test]
    fn finds_cycle() {
        let graph = graph(&[(0, 1), (1, 2), (2, 1)]);
        let cycle = graph.find_cycle(graph.nodes()).unwrap();
        assert_eq!(cycle, [Type::of::<B>(), Type::of::<C>(), Type::of::<B>()]);

        // Restricted to a set without `C` the cycle disappears.
        assert_eq!(graph.find_cycle(&[Type::of::<A>(), Type::of::<B>()]), None);
    }
}
