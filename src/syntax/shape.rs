//! Node shapes that detectors can be registered against.

use std::fmt;

/// A C# syntax node shape.
///
/// Each variant corresponds to exactly one named node kind of the
/// tree-sitter C# grammar. Nodes whose kind has no variant are walked but
/// never offered to a detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    // Members
    MethodDeclaration,
    ConstructorDeclaration,
    DestructorDeclaration,
    OperatorDeclaration,
    ConversionOperatorDeclaration,
    PropertyDeclaration,
    IndexerDeclaration,
    AccessorDeclaration,
    // Types and namespaces
    RecordDeclaration,
    FileScopedNamespaceDeclaration,
    // Statements
    LocalFunctionStatement,
    LocalDeclarationStatement,
    SwitchSection,
    // Expressions
    IsPatternExpression,
    SwitchExpression,
    InterpolatedStringExpression,
    ConditionalAccessExpression,
    BinaryExpression,
    AssignmentExpression,
    LambdaExpression,
    TupleExpression,
    AwaitExpression,
    ThrowExpression,
    DefaultExpression,
    WithExpression,
    RangeExpression,
    ImplicitObjectCreationExpression,
    InvocationExpression,
    Argument,
    // Literals and types
    RawStringLiteral,
    TupleType,
}

impl ShapeKind {
    /// Every shape, in declaration order.
    pub const ALL: &'static [ShapeKind] = &[
        ShapeKind::MethodDeclaration,
        ShapeKind::ConstructorDeclaration,
        ShapeKind::DestructorDeclaration,
        ShapeKind::OperatorDeclaration,
        ShapeKind::ConversionOperatorDeclaration,
        ShapeKind::PropertyDeclaration,
        ShapeKind::IndexerDeclaration,
        ShapeKind::AccessorDeclaration,
        ShapeKind::RecordDeclaration,
        ShapeKind::FileScopedNamespaceDeclaration,
        ShapeKind::LocalFunctionStatement,
        ShapeKind::LocalDeclarationStatement,
        ShapeKind::SwitchSection,
        ShapeKind::IsPatternExpression,
        ShapeKind::SwitchExpression,
        ShapeKind::InterpolatedStringExpression,
        ShapeKind::ConditionalAccessExpression,
        ShapeKind::BinaryExpression,
        ShapeKind::AssignmentExpression,
        ShapeKind::LambdaExpression,
        ShapeKind::TupleExpression,
        ShapeKind::AwaitExpression,
        ShapeKind::ThrowExpression,
        ShapeKind::DefaultExpression,
        ShapeKind::WithExpression,
        ShapeKind::RangeExpression,
        ShapeKind::ImplicitObjectCreationExpression,
        ShapeKind::InvocationExpression,
        ShapeKind::Argument,
        ShapeKind::RawStringLiteral,
        ShapeKind::TupleType,
    ];

    /// The grammar node kind this shape stands for.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::MethodDeclaration => "method_declaration",
            ShapeKind::ConstructorDeclaration => "constructor_declaration",
            ShapeKind::DestructorDeclaration => "destructor_declaration",
            ShapeKind::OperatorDeclaration => "operator_declaration",
            ShapeKind::ConversionOperatorDeclaration => "conversion_operator_declaration",
            ShapeKind::PropertyDeclaration => "property_declaration",
            ShapeKind::IndexerDeclaration => "indexer_declaration",
            ShapeKind::AccessorDeclaration => "accessor_declaration",
            ShapeKind::RecordDeclaration => "record_declaration",
            ShapeKind::FileScopedNamespaceDeclaration => "file_scoped_namespace_declaration",
            ShapeKind::LocalFunctionStatement => "local_function_statement",
            ShapeKind::LocalDeclarationStatement => "local_declaration_statement",
            ShapeKind::SwitchSection => "switch_section",
            ShapeKind::IsPatternExpression => "is_pattern_expression",
            ShapeKind::SwitchExpression => "switch_expression",
            ShapeKind::InterpolatedStringExpression => "interpolated_string_expression",
            ShapeKind::ConditionalAccessExpression => "conditional_access_expression",
            ShapeKind::BinaryExpression => "binary_expression",
            ShapeKind::AssignmentExpression => "assignment_expression",
            ShapeKind::LambdaExpression => "lambda_expression",
            ShapeKind::TupleExpression => "tuple_expression",
            ShapeKind::AwaitExpression => "await_expression",
            ShapeKind::ThrowExpression => "throw_expression",
            ShapeKind::DefaultExpression => "default_expression",
            ShapeKind::WithExpression => "with_expression",
            ShapeKind::RangeExpression => "range_expression",
            ShapeKind::ImplicitObjectCreationExpression => "implicit_object_creation_expression",
            ShapeKind::InvocationExpression => "invocation_expression",
            ShapeKind::Argument => "argument",
            ShapeKind::RawStringLiteral => "raw_string_literal",
            ShapeKind::TupleType => "tuple_type",
        }
    }

    /// Look up the shape for a grammar node kind.
    pub fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            "method_declaration" => Some(ShapeKind::MethodDeclaration),
            "constructor_declaration" => Some(ShapeKind::ConstructorDeclaration),
            "destructor_declaration" => Some(ShapeKind::DestructorDeclaration),
            "operator_declaration" => Some(ShapeKind::OperatorDeclaration),
            "conversion_operator_declaration" => Some(ShapeKind::ConversionOperatorDeclaration),
            "property_declaration" => Some(ShapeKind::PropertyDeclaration),
            "indexer_declaration" => Some(ShapeKind::IndexerDeclaration),
            "accessor_declaration" => Some(ShapeKind::AccessorDeclaration),
            "record_declaration" => Some(ShapeKind::RecordDeclaration),
            "file_scoped_namespace_declaration" => Some(ShapeKind::FileScopedNamespaceDeclaration),
            "local_function_statement" => Some(ShapeKind::LocalFunctionStatement),
            "local_declaration_statement" => Some(ShapeKind::LocalDeclarationStatement),
            "switch_section" => Some(ShapeKind::SwitchSection),
            "is_pattern_expression" => Some(ShapeKind::IsPatternExpression),
            "switch_expression" => Some(ShapeKind::SwitchExpression),
            "interpolated_string_expression" => Some(ShapeKind::InterpolatedStringExpression),
            "conditional_access_expression" => Some(ShapeKind::ConditionalAccessExpression),
            "binary_expression" => Some(ShapeKind::BinaryExpression),
            "assignment_expression" => Some(ShapeKind::AssignmentExpression),
            "lambda_expression" => Some(ShapeKind::LambdaExpression),
            "tuple_expression" => Some(ShapeKind::TupleExpression),
            "await_expression" => Some(ShapeKind::AwaitExpression),
            "throw_expression" => Some(ShapeKind::ThrowExpression),
            "default_expression" => Some(ShapeKind::DefaultExpression),
            "with_expression" => Some(ShapeKind::WithExpression),
            "range_expression" => Some(ShapeKind::RangeExpression),
            "implicit_object_creation_expression" => {
                Some(ShapeKind::ImplicitObjectCreationExpression)
            }
            "invocation_expression" => Some(ShapeKind::InvocationExpression),
            "argument" => Some(ShapeKind::Argument),
            "raw_string_literal" => Some(ShapeKind::RawStringLiteral),
            "tuple_type" => Some(ShapeKind::TupleType),
            _ => None,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind_names_round_trip() {
        for shape in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_node_kind(shape.as_str()), Some(*shape));
        }
    }

    #[test]
    fn test_every_shape_exists_in_grammar() {
        let language = crate::syntax::language();
        for shape in ShapeKind::ALL {
            assert_ne!(
                language.id_for_node_kind(shape.as_str(), true),
                0,
                "{} is not a named node kind",
                shape
            );
        }
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(ShapeKind::from_node_kind("class_declaration"), None);
        assert_eq!(ShapeKind::from_node_kind(""), None);
    }
}
