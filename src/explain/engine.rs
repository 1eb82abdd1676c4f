//! Explainer: the entry point tying catalog, dispatcher, walker and aggregator together.

use std::sync::Arc;

use crate::syntax::{self, ParsedSource, SyntaxError};

use super::aggregate::aggregate;
use super::catalog::Catalog;
use super::dispatch::Dispatcher;
use super::types::AnalysisResult;
use super::walker;

/// Explains the features used in C# source text.
///
/// Holds only immutable data, so one instance can serve any number of
/// concurrent runs. Each call is a full, stateless re-walk.
#[derive(Debug, Clone)]
pub struct Explainer {
    catalog: Arc<Catalog>,
    dispatcher: Arc<Dispatcher>,
}

impl Explainer {
    /// Create an explainer over a catalog built at startup.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let dispatcher = Dispatcher::new(&catalog, &syntax::language());
        Self {
            catalog,
            dispatcher: Arc::new(dispatcher),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Explain an already parsed source.
    ///
    /// Never fails: a detector that errors is skipped for that node, and a
    /// source with no recognized construct yields an empty result.
    pub fn explain(&self, parsed: &ParsedSource) -> AnalysisResult {
        let (matches, _) = walker::analyze(parsed, &self.catalog, &self.dispatcher);
        aggregate(parsed, &self.catalog, &matches)
    }

    /// Parse and explain source text.
    pub fn explain_source(&self, source: &str) -> Result<AnalysisResult, SyntaxError> {
        let parsed = ParsedSource::parse(source)?;
        Ok(self.explain(&parsed))
    }
}
