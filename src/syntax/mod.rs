//! Tree-sitter adapter for C# source text.
//!
//! Parsing is not part of the explanation engine proper: this module only
//! turns source text into the immutable tree + text pair the engine walks.
//!
//! - `ParsedSource`: a parsed tree together with the exact text it came from
//! - `Span`: byte range inside that text
//! - `ShapeKind`: the node shapes detectors can be registered against

mod shape;

pub use shape::ShapeKind;

use std::fmt;

use thiserror::Error;
use tree_sitter::{Language, Node, Parser, Tree};

/// Errors raised while producing a syntax tree.
#[derive(Error, Debug)]
pub enum SyntaxError {
    #[error("failed to load C# grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("parser produced no tree")]
    NoTree,
}

/// The tree-sitter C# grammar.
pub fn language() -> Language {
    tree_sitter_c_sharp::LANGUAGE.into()
}

/// Byte range inside a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start_byte: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end_byte: usize,
}

impl Span {
    pub fn new(start_byte: usize, end_byte: usize) -> Self {
        Self {
            start_byte,
            end_byte,
        }
    }

    /// Create a span covering a tree-sitter node.
    pub fn from_node(node: Node<'_>) -> Self {
        Self::new(node.start_byte(), node.end_byte())
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_byte, self.end_byte)
    }
}

/// A parsed tree and the exact source text it was parsed from.
///
/// Both are immutable once built; every node span indexes into `source`.
pub struct ParsedSource {
    tree: Tree,
    source: String,
}

impl ParsedSource {
    /// Parse C# source text.
    ///
    /// Syntax errors do not fail the parse: tree-sitter returns a tree with
    /// ERROR nodes, which the engine walks like any other node.
    pub fn parse(source: impl Into<String>) -> Result<Self, SyntaxError> {
        let source = source.into();
        let mut parser = Parser::new();
        parser.set_language(&language())?;
        let tree = parser.parse(&source, None).ok_or(SyntaxError::NoTree)?;
        Ok(Self { tree, source })
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Get the source code as a string slice.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Text covered by a span, or `None` if the span does not fit the source.
    pub fn span_text(&self, span: Span) -> Option<&str> {
        self.source.get(span.start_byte..span.end_byte)
    }

    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: Node<'_>) -> &str {
        self.span_text(Span::from_node(node)).unwrap_or("")
    }
}

impl fmt::Debug for ParsedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedSource")
            .field("len", &self.source.len())
            .field("root", &self.tree.root_node().kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_loads() {
        let mut parser = Parser::new();
        assert!(parser.set_language(&language()).is_ok());
    }

    #[test]
    fn test_parse_class() {
        let parsed = ParsedSource::parse("class C { int P => 1; }").unwrap();
        assert_eq!(parsed.root().kind(), "compilation_unit");

        let class = parsed.root().named_child(0).unwrap();
        assert_eq!(class.kind(), "class_declaration");
        assert_eq!(parsed.node_text(class), "class C { int P => 1; }");
    }

    #[test]
    fn test_parse_keeps_source_verbatim() {
        let source = "class C {\r\n\tint P => 1;   \r\n}\r\n";
        let parsed = ParsedSource::parse(source).unwrap();
        assert_eq!(parsed.source(), source);
    }

    #[test]
    fn test_span_text_out_of_range() {
        let parsed = ParsedSource::parse("class C {}").unwrap();
        assert_eq!(parsed.span_text(Span::new(0, 5)), Some("class"));
        assert_eq!(parsed.span_text(Span::new(4, 400)), None);
    }

    #[test]
    fn test_broken_source_still_parses() {
        let parsed = ParsedSource::parse("class C { int P => ; ").unwrap();
        assert!(parsed.root().has_error());
    }
}
