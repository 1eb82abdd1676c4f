//! C# feature explanation.
//!
//! A [`Catalog`] holds the detectors; a [`Dispatcher`] routes each syntax node
//! to the detectors registered for its shape; the walker visits every node
//! once in pre-order and keeps the first detector that accepts it. Matches
//! become [`ExplanationRecord`]s carrying the node's source text.

pub mod aggregate;
pub mod catalog;
pub mod dispatch;
pub mod engine;
pub mod features;
pub mod snippet;
pub mod types;
pub mod walker;

pub use aggregate::aggregate;
pub use catalog::{
    Catalog, CatalogBuilder, CatalogError, DetectorError, FeatureDetector, NodeContext,
    Predicate, Selector,
};
pub use dispatch::Dispatcher;
pub use engine::Explainer;
pub use features::{is_builtin, BUILTIN_FEATURES};
pub use snippet::extract;
pub use types::{AnalysisResult, ExplanationRecord};
pub use walker::{analyze, Match, WalkStats};
