//! Built-in C# feature detectors.
//!
//! Detectors are listed in priority order: when two detectors share a node
//! shape, the one registered first wins.

use crate::config::ExplainConfig;
use crate::syntax::{ShapeKind, Span};

use super::catalog::{CatalogBuilder, CatalogError, DetectorError, FeatureDetector, NodeContext};

/// Members whose body can be written as `=> expression`.
const MEMBER_SHAPES: &[ShapeKind] = &[
    ShapeKind::MethodDeclaration,
    ShapeKind::ConstructorDeclaration,
    ShapeKind::DestructorDeclaration,
    ShapeKind::OperatorDeclaration,
    ShapeKind::ConversionOperatorDeclaration,
    ShapeKind::PropertyDeclaration,
    ShapeKind::IndexerDeclaration,
    ShapeKind::AccessorDeclaration,
    ShapeKind::LocalFunctionStatement,
];

/// Pattern nodes that make a `case` label or `is` test a pattern match.
///
/// Constant patterns are left out: `case 1:` predates pattern matching.
const PATTERN_KINDS: &[&str] = &[
    "declaration_pattern",
    "recursive_pattern",
    "var_pattern",
    "type_pattern",
    "relational_pattern",
    "negated_pattern",
    "and_pattern",
    "or_pattern",
    "list_pattern",
    "parenthesized_pattern",
    "discard",
];

pub static BUILTIN_FEATURES: &[FeatureDetector] = &[
    FeatureDetector {
        id: "local-function",
        name: "local function",
        text: "A local function is a method declared inside another member. It can only be \
               called from the containing member and can capture its local variables.",
        doc_path: "/en-us/dotnet/csharp/programming-guide/classes-and-structs/local-functions",
        shapes: &[ShapeKind::LocalFunctionStatement],
        predicate: always,
        selector: None,
    },
    FeatureDetector {
        id: "expression-bodied-member",
        name: "expression-bodied member",
        text: "An expression-bodied member uses `=>` followed by a single expression instead \
               of a block body. For properties and indexers this defines a read-only getter.",
        doc_path: "/en-us/dotnet/csharp/programming-guide/statements-expressions-operators/expression-bodied-members",
        shapes: MEMBER_SHAPES,
        predicate: has_arrow_body,
        selector: None,
    },
    FeatureDetector {
        id: "pattern-matching",
        name: "pattern matching",
        text: "Pattern matching tests a value against a shape, such as a type, a property \
               pattern or a relational pattern, and can extract parts of the value into new \
               variables when the test succeeds.",
        doc_path: "/en-us/dotnet/csharp/fundamentals/functional/pattern-matching",
        shapes: &[ShapeKind::SwitchSection, ShapeKind::IsPatternExpression],
        predicate: is_pattern_match,
        selector: Some(pattern_label_span),
    },
    FeatureDetector {
        id: "switch-expression",
        name: "switch expression",
        text: "A switch expression selects one value from a list of pattern arms. Unlike a \
               switch statement it produces a value and each arm is a single expression.",
        doc_path: "/en-us/dotnet/csharp/language-reference/operators/switch-expression",
        shapes: &[ShapeKind::SwitchExpression],
        predicate: always,
        selector: None,
    },
    FeatureDetector {
        id: "string-interpolation",
        name: "string interpolation",
        text: "An interpolated string starts with `$` and embeds expressions in braces. The \
               expressions are evaluated and formatted into the resulting string.",
        doc_path: "/en-us/dotnet/csharp/language-reference/tokens/interpolated",
        shapes: &[ShapeKind::InterpolatedStringExpression],
        predicate: always,
        selector: None,
    },
    FeatureDetector {
        id: "raw-string-literal",
        name: "raw string literal",
        text: "A raw string literal is delimited by three or more double quotes. It can span \
               multiple lines and contain quotes and backslashes without escaping.",
        doc_path: "/en-us/dotnet/csharp/language-reference/tokens/raw-string",
        shapes: &[ShapeKind::RawStringLiteral],
        predicate: always,
        selector: None,
    },
    FeatureDetector {
        id: "null-conditional-operator",
        name: "null-conditional operator",
        text: "The `?.` and `?[]` operators access a member or element only when the operand \
               is not null. Otherwise the whole expression evaluates to null.",
        doc_path: "/en-us/dotnet/csharp/language-reference/operators/member-access-operators#null-conditional-operators--and-",
        shapes: &[ShapeKind::ConditionalAccessExpression],
        predicate: always,
        selector: None,
    },
    FeatureDetector {
        id: "null-coalescing-operator",
        name: "null-coalescing operator",
        text: "The `??` operator returns its left operand when it is not null and otherwise \
               evaluates and returns its right operand.",
        doc_path: "/en-us/dotnet/csharp/language-reference/operators/null-coalescing-operator",
        shapes: &[ShapeKind::BinaryExpression],
        predicate: is_null_coalescing,
        selector: None,
    },
    FeatureDetector {
        id: "null-coalescing-assignment",
        name: "null-coalescing assignment",
        text: "The `??=` operator assigns its right operand to the left operand only when the \
               left operand evaluates to null.",
        doc_path: "/en-us/dotnet/csharp/language-reference/operators/null-coalescing-operator",
        shapes: &[ShapeKind::AssignmentExpression],
        predicate: is_null_coalescing_assignment,
        selector: None,
    },
    FeatureDetector {
        id: "lambda-expression",
        name: "lambda expression",
        text: "A lambda expression creates an anonymous function. The parameters are listed \
               before `=>` and the body, an expression or a block, follows it.",
        doc_path: "/en-us/dotnet/csharp/language-reference/operators/lambda-expressions",
        shapes: &[ShapeKind::LambdaExpression],
        predicate: always,
        selector: None,
    },
    FeatureDetector {
        id: "tuple-literal",
        name: "tuple",
        text: "A tuple literal groups several values into one lightweight value of a \
               System.ValueTuple type. Elements can optionally be named.",
        doc_path: "/en-us/dotnet/csharp/language-reference/builtin-types/value-tuples",
        shapes: &[ShapeKind::TupleExpression],
        predicate: always,
        selector: None,
    },
    FeatureDetector {
        id: "tuple-type",
        name: "tuple type",
        text: "A tuple type such as `(int, string)` describes a System.ValueTuple with the \
               listed element types and optional element names.",
        doc_path: "/en-us/dotnet/csharp/language-reference/builtin-types/value-tuples",
        shapes: &[ShapeKind::TupleType],
        predicate: always,
        selector: None,
    },
    FeatureDetector {
        id: "await",
        name: "await",
        text: "The `await` operator suspends the enclosing async method until the awaited \
               task completes, without blocking the calling thread.",
        doc_path: "/en-us/dotnet/csharp/language-reference/operators/await",
        shapes: &[ShapeKind::AwaitExpression],
        predicate: always,
        selector: None,
    },
    FeatureDetector {
        id: "throw-expression",
        name: "throw expression",
        text: "A throw expression raises an exception from inside an expression, for example \
               as the right operand of `??` or as an arm of a conditional operator.",
        doc_path: "/en-us/dotnet/csharp/language-reference/statements/exception-handling-statements#the-throw-expression",
        shapes: &[ShapeKind::ThrowExpression],
        predicate: always,
        selector: None,
    },
    FeatureDetector {
        id: "default-literal",
        name: "default literal",
        text: "The `default` literal produces the default value of the type the compiler \
               infers from the context, without naming the type explicitly.",
        doc_path: "/en-us/dotnet/csharp/language-reference/operators/default#default-literal",
        shapes: &[ShapeKind::DefaultExpression],
        predicate: is_default_literal,
        selector: None,
    },
    FeatureDetector {
        id: "record",
        name: "record",
        text: "A record is a type with compiler-generated value equality, a readable \
               ToString and support for non-destructive mutation with `with`.",
        doc_path: "/en-us/dotnet/csharp/language-reference/builtin-types/record",
        shapes: &[ShapeKind::RecordDeclaration],
        predicate: always,
        selector: None,
    },
    FeatureDetector {
        id: "with-expression",
        name: "with expression",
        text: "A `with` expression copies a record or struct and changes the listed \
               properties on the copy, leaving the original untouched.",
        doc_path: "/en-us/dotnet/csharp/language-reference/operators/with-expression",
        shapes: &[ShapeKind::WithExpression],
        predicate: always,
        selector: None,
    },
    FeatureDetector {
        id: "range",
        name: "range",
        text: "The `..` operator creates a Range between two indices. Either end can be left \
               out, and `^` counts an index from the end of the sequence.",
        doc_path: "/en-us/dotnet/csharp/language-reference/operators/member-access-operators#range-operator-",
        shapes: &[ShapeKind::RangeExpression],
        predicate: always,
        selector: None,
    },
    FeatureDetector {
        id: "using-declaration",
        name: "using declaration",
        text: "A using declaration disposes the declared variable automatically when the \
               enclosing scope ends, without an explicit using block.",
        doc_path: "/en-us/dotnet/csharp/language-reference/statements/using",
        shapes: &[ShapeKind::LocalDeclarationStatement],
        predicate: is_using_declaration,
        selector: None,
    },
    FeatureDetector {
        id: "file-scoped-namespace",
        name: "file-scoped namespace",
        text: "A file-scoped namespace declaration ends with `;` and applies to every type in \
               the file, removing one level of braces and indentation.",
        doc_path: "/en-us/dotnet/csharp/language-reference/keywords/namespace",
        shapes: &[ShapeKind::FileScopedNamespaceDeclaration],
        predicate: always,
        selector: None,
    },
    FeatureDetector {
        id: "target-typed-new",
        name: "target-typed new",
        text: "A target-typed `new()` expression omits the type name when the compiler can \
               infer it from the variable, parameter or return type being assigned.",
        doc_path: "/en-us/dotnet/csharp/language-reference/operators/new-operator#target-typed-new",
        shapes: &[ShapeKind::ImplicitObjectCreationExpression],
        predicate: always,
        selector: None,
    },
    FeatureDetector {
        id: "nameof",
        name: "nameof",
        text: "A `nameof` expression produces the name of a variable, type or member as a \
               compile-time string constant that follows renames.",
        doc_path: "/en-us/dotnet/csharp/language-reference/operators/nameof",
        shapes: &[ShapeKind::InvocationExpression],
        predicate: is_nameof,
        selector: None,
    },
    FeatureDetector {
        id: "out-variable",
        name: "out variable",
        text: "An out variable is declared directly in the argument list of the call that \
               assigns it, instead of in a separate statement before the call.",
        doc_path: "/en-us/dotnet/csharp/language-reference/keywords/out-parameter-modifier",
        shapes: &[ShapeKind::Argument],
        predicate: is_out_variable,
        selector: None,
    },
];

/// Register the built-in detectors the config leaves enabled.
pub fn register_builtin(
    builder: &mut CatalogBuilder,
    config: &ExplainConfig,
) -> Result<(), CatalogError> {
    for detector in BUILTIN_FEATURES {
        if config.feature_enabled(detector.id) {
            builder.register(*detector)?;
        }
    }
    Ok(())
}

/// Whether an id names a built-in detector.
pub fn is_builtin(id: &str) -> bool {
    BUILTIN_FEATURES.iter().any(|d| d.id == id)
}

fn always(_: &NodeContext<'_>) -> Result<bool, DetectorError> {
    Ok(true)
}

fn has_arrow_body(ctx: &NodeContext<'_>) -> Result<bool, DetectorError> {
    Ok(ctx.has_child_kind("arrow_expression_clause"))
}

fn is_pattern_match(ctx: &NodeContext<'_>) -> Result<bool, DetectorError> {
    let node = ctx.node();
    if node.kind() == "is_pattern_expression" {
        let pattern = ctx.field("pattern")?;
        return Ok(!matches!(pattern.kind(), "type_pattern" | "constant_pattern"));
    }

    Ok(case_label(ctx)
        .iter()
        .any(|c| c.kind() == "when_clause" || PATTERN_KINDS.contains(&c.kind())))
}

/// For a switch section: `case` through the end of the pattern or guard.
fn pattern_label_span(ctx: &NodeContext<'_>) -> Option<Span> {
    let node = ctx.node();
    if node.kind() != "switch_section" {
        return None;
    }
    let last = case_label(ctx).last().copied()?;
    Some(Span::new(node.start_byte(), last.end_byte()))
}

/// Children of a switch section between `case` and `:`.
fn case_label<'a>(ctx: &NodeContext<'a>) -> Vec<tree_sitter::Node<'a>> {
    let children = ctx.children();
    if children.first().map(|c| c.kind()) != Some("case") {
        return Vec::new();
    }
    children
        .into_iter()
        .skip(1)
        .take_while(|c| c.kind() != ":")
        .filter(|c| c.is_named())
        .collect()
}

fn is_null_coalescing(ctx: &NodeContext<'_>) -> Result<bool, DetectorError> {
    Ok(ctx.field("operator")?.kind() == "??")
}

fn is_null_coalescing_assignment(ctx: &NodeContext<'_>) -> Result<bool, DetectorError> {
    Ok(ctx.field("operator")?.kind() == "??=")
}

fn is_default_literal(ctx: &NodeContext<'_>) -> Result<bool, DetectorError> {
    Ok(ctx.node().child_by_field_name("type").is_none())
}

fn is_using_declaration(ctx: &NodeContext<'_>) -> Result<bool, DetectorError> {
    Ok(ctx.has_child_kind("using"))
}

fn is_nameof(ctx: &NodeContext<'_>) -> Result<bool, DetectorError> {
    let function = ctx.field("function")?;
    Ok(function.kind() == "identifier" && ctx.text_of(function)? == "nameof")
}

fn is_out_variable(ctx: &NodeContext<'_>) -> Result<bool, DetectorError> {
    Ok(ctx.has_child_kind("out") && ctx.has_child_kind("declaration_expression"))
}
