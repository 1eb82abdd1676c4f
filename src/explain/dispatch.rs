//! Node dispatcher: grammar kind id → shape → candidate detectors.

use tree_sitter::{Language, Node};

use crate::syntax::ShapeKind;

use super::catalog::{Catalog, FeatureDetector};

/// Precomputed lookup from a node's grammar kind id to its shape.
///
/// Only shapes with at least one registered detector are kept, so nodes the
/// catalog cannot match are skipped with a single table read.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    table: Vec<Option<ShapeKind>>,
}

impl Dispatcher {
    pub fn new(catalog: &Catalog, language: &Language) -> Self {
        // Aliased rules share a name across several ids, so scan every id
        // instead of resolving names one at a time.
        let table = (0..language.node_kind_count())
            .map(|id| {
                let id = id as u16;
                if !language.node_kind_is_named(id) {
                    return None;
                }
                language
                    .node_kind_for_id(id)
                    .and_then(ShapeKind::from_node_kind)
                    .filter(|shape| catalog.handles(*shape))
            })
            .collect();

        Self { table }
    }

    /// Shape of a node, if any detector could match it.
    pub fn shape_of(&self, node: Node<'_>) -> Option<ShapeKind> {
        self.table
            .get(node.kind_id() as usize)
            .copied()
            .flatten()
    }

    /// Candidate detectors for a node, in priority order.
    pub fn candidates<'c>(
        &self,
        catalog: &'c Catalog,
        node: Node<'_>,
    ) -> impl Iterator<Item = &'c FeatureDetector> + 'c {
        self.shape_of(node)
            .into_iter()
            .flat_map(move |shape| catalog.detectors_for(shape))
    }

    /// Number of grammar kinds routed to at least one detector.
    pub fn routed_kinds(&self) -> usize {
        self.table.iter().filter(|s| s.is_some()).count()
    }
}
