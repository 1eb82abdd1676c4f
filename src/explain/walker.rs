//! Single pre-order walk that pairs nodes with the first detector matching them.

use std::panic::{self, AssertUnwindSafe};

use tree_sitter::Node;

use crate::syntax::ParsedSource;

use super::catalog::{Catalog, FeatureDetector, NodeContext};
use super::dispatch::Dispatcher;

/// A node and the detector that recognized it.
#[derive(Debug, Clone, Copy)]
pub struct Match<'t, 'c> {
    pub node: Node<'t>,
    pub detector: &'c FeatureDetector,
}

/// Counters collected during one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Nodes visited, named and anonymous.
    pub nodes: usize,
    /// Predicate evaluations.
    pub evaluations: usize,
    pub matches: usize,
    /// Predicates that errored or panicked.
    pub faults: usize,
}

/// Walk the tree once and collect matches in pre-order.
///
/// At most one match is recorded per node; children are always visited,
/// whether or not their parent matched.
pub fn analyze<'t, 'c>(
    parsed: &'t ParsedSource,
    catalog: &'c Catalog,
    dispatcher: &Dispatcher,
) -> (Vec<Match<'t, 'c>>, WalkStats) {
    let mut matches = Vec::new();
    let mut stats = WalkStats::default();
    let mut cursor = parsed.root().walk();

    'walk: loop {
        let node = cursor.node();
        stats.nodes += 1;

        if let Some(detector) = first_match(parsed, catalog, dispatcher, node, &mut stats) {
            matches.push(Match { node, detector });
        }

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                continue 'walk;
            }
            if !cursor.goto_parent() {
                break 'walk;
            }
        }
    }

    stats.matches = matches.len();
    tracing::debug!(
        nodes = stats.nodes,
        evaluations = stats.evaluations,
        matches = stats.matches,
        faults = stats.faults,
        "walk complete"
    );

    (matches, stats)
}

fn first_match<'c>(
    parsed: &ParsedSource,
    catalog: &'c Catalog,
    dispatcher: &Dispatcher,
    node: Node<'_>,
    stats: &mut WalkStats,
) -> Option<&'c FeatureDetector> {
    let ctx = NodeContext::new(node, parsed.source());
    for detector in dispatcher.candidates(catalog, node) {
        stats.evaluations += 1;
        match evaluate(detector, &ctx) {
            Some(true) => return Some(detector),
            Some(false) => {}
            None => stats.faults += 1,
        }
    }
    None
}

/// Run one predicate in isolation. `None` means it failed.
fn evaluate(detector: &FeatureDetector, ctx: &NodeContext<'_>) -> Option<bool> {
    let node = ctx.node();
    match panic::catch_unwind(AssertUnwindSafe(|| (detector.predicate)(ctx))) {
        Ok(Ok(matched)) => Some(matched),
        Ok(Err(e)) => {
            tracing::warn!(
                detector = detector.id,
                kind = node.kind(),
                start_byte = node.start_byte(),
                error = %e,
                "detector failed, treating node as unmatched"
            );
            None
        }
        Err(_) => {
            tracing::warn!(
                detector = detector.id,
                kind = node.kind(),
                start_byte = node.start_byte(),
                "detector panicked, treating node as unmatched"
            );
            None
        }
    }
}
