//! Feature catalog: the registry of detectors, grouped by node shape.

use std::collections::{HashMap, HashSet};
use std::fmt;

use thiserror::Error;
use tree_sitter::Node;

use crate::config::ExplainConfig;
use crate::syntax::{ShapeKind, Span};

use super::features;

/// Failure of a single detector predicate on a single node.
///
/// The walker treats any of these as "no match" for that node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectorError {
    #[error("node {kind} has no `{field}` field")]
    MissingField { kind: &'static str, field: &'static str },
    #[error("span {0} does not fit the source text")]
    InvalidSpan(Span),
}

/// Errors raised while building a catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("documentation base address must be an absolute http(s) URL, got {0:?}")]
    InvalidBaseUrl(String),
    #[error("detector id must not be empty")]
    EmptyId,
    #[error("detector {0} has an empty name")]
    EmptyName(&'static str),
    #[error("detector {0} has an empty description")]
    EmptyText(&'static str),
    #[error("detector {0} applies to no node shape")]
    NoShapes(&'static str),
    #[error("detector {0} is already registered")]
    DuplicateId(&'static str),
}

/// Shape test run against a candidate node.
pub type Predicate = fn(&NodeContext<'_>) -> Result<bool, DetectorError>;

/// Narrows a matched node to the span its snippet should cover.
///
/// Returning `None` falls back to the node's own span.
pub type Selector = fn(&NodeContext<'_>) -> Option<Span>;

/// A node together with the source text it spans.
#[derive(Clone, Copy)]
pub struct NodeContext<'a> {
    node: Node<'a>,
    source: &'a str,
}

impl<'a> NodeContext<'a> {
    pub fn new(node: Node<'a>, source: &'a str) -> Self {
        Self { node, source }
    }

    pub fn node(&self) -> Node<'a> {
        self.node
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Source text of any node in the same tree.
    pub fn text_of(&self, node: Node<'_>) -> Result<&'a str, DetectorError> {
        let span = Span::from_node(node);
        self.source
            .get(span.start_byte..span.end_byte)
            .ok_or(DetectorError::InvalidSpan(span))
    }

    /// Required field child of the current node.
    pub fn field(&self, field: &'static str) -> Result<Node<'a>, DetectorError> {
        self.node
            .child_by_field_name(field)
            .ok_or(DetectorError::MissingField {
                kind: self.node.kind(),
                field,
            })
    }

    /// All direct children, named and anonymous.
    pub fn children(&self) -> Vec<Node<'a>> {
        let mut cursor = self.node.walk();
        self.node.children(&mut cursor).collect()
    }

    /// Whether a direct child has the given kind (anonymous tokens included).
    pub fn has_child_kind(&self, kind: &str) -> bool {
        self.children().iter().any(|c| c.kind() == kind)
    }
}

/// A registered rule recognizing one language feature.
#[derive(Clone, Copy)]
pub struct FeatureDetector {
    /// Stable identifier, used in configuration.
    pub id: &'static str,
    /// Display name shown to the user.
    pub name: &'static str,
    /// Descriptive prose.
    pub text: &'static str,
    /// Documentation path, joined to the catalog's base address.
    pub doc_path: &'static str,
    /// Node shapes this detector is offered.
    pub shapes: &'static [ShapeKind],
    pub predicate: Predicate,
    pub selector: Option<Selector>,
}

impl fmt::Debug for FeatureDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureDetector")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("shapes", &self.shapes)
            .field("doc_path", &self.doc_path)
            .field("has_selector", &self.selector.is_some())
            .finish()
    }
}

/// Immutable detector registry.
///
/// Built once at startup and shared read-only between analysis runs.
#[derive(Debug)]
pub struct Catalog {
    docs_base_url: String,
    detectors: Vec<FeatureDetector>,
    by_shape: HashMap<ShapeKind, Vec<usize>>,
}

impl Catalog {
    /// Start building a catalog whose links begin with `docs_base_url`.
    pub fn builder(docs_base_url: &str) -> Result<CatalogBuilder, CatalogError> {
        CatalogBuilder::new(docs_base_url)
    }

    /// Register every built-in C# detector not disabled by the config.
    pub fn builtin(config: &ExplainConfig) -> Result<Catalog, CatalogError> {
        let mut builder = CatalogBuilder::new(&config.docs_base_url)?;
        features::register_builtin(&mut builder, config)?;
        Ok(builder.build())
    }

    pub fn docs_base_url(&self) -> &str {
        &self.docs_base_url
    }

    /// Candidate detectors for a shape, in priority order.
    pub fn detectors_for(&self, shape: ShapeKind) -> impl Iterator<Item = &FeatureDetector> + '_ {
        self.by_shape
            .get(&shape)
            .into_iter()
            .flatten()
            .map(move |&index| &self.detectors[index])
    }

    /// Whether any detector is registered for the shape.
    pub fn handles(&self, shape: ShapeKind) -> bool {
        self.by_shape.contains_key(&shape)
    }

    /// All detectors in registration order.
    pub fn detectors(&self) -> &[FeatureDetector] {
        &self.detectors
    }

    pub fn get(&self, id: &str) -> Option<&FeatureDetector> {
        self.detectors.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Documentation link for a detector.
    pub fn link_for(&self, detector: &FeatureDetector) -> String {
        let path = detector.doc_path.trim_start_matches('/');
        if path.is_empty() {
            return self.docs_base_url.clone();
        }
        format!("{}/{}", self.docs_base_url, path)
    }
}

/// Collects detectors before freezing them into a `Catalog`.
#[derive(Debug)]
pub struct CatalogBuilder {
    docs_base_url: String,
    detectors: Vec<FeatureDetector>,
    ids: HashSet<&'static str>,
}

impl CatalogBuilder {
    pub fn new(docs_base_url: &str) -> Result<Self, CatalogError> {
        let trimmed = docs_base_url.trim().trim_end_matches('/');
        let scheme_ok = trimmed.starts_with("https://") || trimmed.starts_with("http://");
        let host = trimmed.split_once("://").map(|(_, rest)| rest).unwrap_or("");
        if !scheme_ok || host.is_empty() {
            return Err(CatalogError::InvalidBaseUrl(docs_base_url.to_string()));
        }

        Ok(Self {
            docs_base_url: trimmed.to_string(),
            detectors: Vec::new(),
            ids: HashSet::new(),
        })
    }

    /// Register a detector. Registration order is match priority within a shape.
    pub fn register(&mut self, detector: FeatureDetector) -> Result<&mut Self, CatalogError> {
        if detector.id.trim().is_empty() {
            return Err(CatalogError::EmptyId);
        }
        if detector.name.trim().is_empty() {
            return Err(CatalogError::EmptyName(detector.id));
        }
        if detector.text.trim().is_empty() {
            return Err(CatalogError::EmptyText(detector.id));
        }
        if detector.shapes.is_empty() {
            return Err(CatalogError::NoShapes(detector.id));
        }
        if !self.ids.insert(detector.id) {
            return Err(CatalogError::DuplicateId(detector.id));
        }

        self.detectors.push(detector);
        Ok(self)
    }

    pub fn build(self) -> Catalog {
        let mut by_shape: HashMap<ShapeKind, Vec<usize>> = HashMap::new();
        for (index, detector) in self.detectors.iter().enumerate() {
            for &shape in detector.shapes {
                let group = by_shape.entry(shape).or_default();
                if !group.contains(&index) {
                    group.push(index);
                }
            }
        }

        Catalog {
            docs_base_url: self.docs_base_url,
            detectors: self.detectors,
            by_shape,
        }
    }
}
