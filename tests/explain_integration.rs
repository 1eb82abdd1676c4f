//! Integration tests for feature explanation.
//!
//! These tests run the built-in catalog over the C# fixtures in testdata/.

use std::path::PathBuf;
use std::sync::Arc;

use csexplain::cli::{collect_files, explain_files};
use csexplain::{Catalog, ExplainConfig, Explainer};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn explainer(config: &ExplainConfig) -> Explainer {
    let catalog = Catalog::builtin(config).expect("builtin catalog should build");
    Explainer::new(Arc::new(catalog))
}

fn read_fixture(rel: &str) -> String {
    std::fs::read_to_string(testdata_path().join(rel)).expect("fixture should exist")
}

fn names(source: &str) -> Vec<String> {
    explainer(&ExplainConfig::default())
        .explain_source(source)
        .expect("should parse")
        .into_records()
        .into_iter()
        .map(|r| r.name)
        .collect()
}

#[test]
fn test_expression_bodied_property() {
    let result = explainer(&ExplainConfig::default())
        .explain_source("class C { int P => 1; }")
        .unwrap();

    assert_eq!(result.len(), 1);
    let record = &result.records()[0];
    assert_eq!(record.name, "expression-bodied member");
    assert_eq!(record.code, "int P => 1; ");
    assert!(!record.text.is_empty());
    assert!(record.link.starts_with("https://docs.microsoft.com/"));
}

#[test]
fn test_case_pattern() {
    let result = explainer(&ExplainConfig::default())
        .explain_source("class C { void M() { switch(1) { case int i: break; } } }")
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result.records()[0].name, "pattern matching");
    assert_eq!(result.records()[0].code, "case int i");
}

#[test]
fn test_nothing_to_explain() {
    assert!(names("class C { }").is_empty());
    assert!(names("").is_empty());
    assert!(names(&read_fixture("project/Legacy/Counter.cs")).is_empty());
}

#[test]
fn test_shapes_fixture() {
    let source = read_fixture("project/Shapes.cs");
    let result = explainer(&ExplainConfig::default())
        .explain_source(&source)
        .unwrap();

    let names: Vec<_> = result.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "file-scoped namespace",
            "record",
            "expression-bodied member",
            "switch expression",
            "string interpolation",
        ]
    );
    assert_eq!(result.records()[0].code, "namespace Demo;\n");
    assert_eq!(
        result.records()[1].code,
        "public record Point(int X, int Y);\n"
    );
    assert_eq!(result.records()[4].code, "$\"point {p.X}\"");

    // Every snippet is verbatim source text.
    for record in &result {
        assert!(source.contains(record.code.as_str()), "{:?}", record.code);
    }
}

#[test]
fn test_nulls_fixture() {
    let source = read_fixture("project/Nulls.cs");
    let result = explainer(&ExplainConfig::default())
        .explain_source(&source)
        .unwrap();

    let pairs: Vec<_> = result
        .iter()
        .map(|r| (r.name.as_str(), r.code.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("null-coalescing assignment", "name ??= \"none\""),
            ("null-coalescing operator", "s?.Length ?? 0"),
            ("null-conditional operator", "s?.Length "),
        ]
    );
}

#[test]
fn test_outer_construct_reported_before_inner() {
    let names = names("class C { System.Func<int, (int, int)> F => x => (x, x); }");
    assert_eq!(
        names,
        vec!["expression-bodied member", "tuple type", "lambda expression", "tuple"]
    );
}

#[test]
fn test_more_features() {
    let source = r#"
class C
{
    async System.Threading.Tasks.Task Run(string s, int[] xs, object o)
    {
        using var stream = new System.IO.MemoryStream();
        await System.Threading.Tasks.Task.Yield();
        int.TryParse(s, out var n);
        var tail = xs[1..];
        System.Text.StringBuilder sb = new();
        int d = default;
        string t = s ?? throw new System.ArgumentNullException(nameof(s));
    }
}
"#;
    let names = names(source);
    for expected in [
        "using declaration",
        "await",
        "out variable",
        "range",
        "target-typed new",
        "default literal",
        "null-coalescing operator",
        "throw expression",
        "nameof",
    ] {
        assert!(
            names.iter().any(|n| n == expected),
            "missing {} in {:?}",
            expected,
            names
        );
    }
}

#[test]
fn test_repeated_runs_identical() {
    let source = read_fixture("project/Shapes.cs");
    let explainer = explainer(&ExplainConfig::default());
    let first = explainer.explain_source(&source).unwrap();
    for _ in 0..3 {
        assert_eq!(explainer.explain_source(&source).unwrap(), first);
    }
}

#[test]
fn test_configured_directory() {
    let dir = testdata_path().join("configured");
    let config = ExplainConfig::load(None, &dir).expect("config should load");
    assert_eq!(config.disabled_features.len(), 2);

    let files = collect_files(&dir, &config).unwrap();
    assert_eq!(files.len(), 1, "generated file should be excluded");

    let explained = explain_files(&explainer(&config), &files, &dir).unwrap();
    assert_eq!(explained[0].path, "Shapes.cs");

    let result = &explained[0].result;
    let names: Vec<_> = result.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["record", "expression-bodied member", "switch expression"]
    );
    for record in result {
        assert!(record.link.starts_with("https://learn.microsoft.com/en-us/"));
    }
}

#[test]
fn test_project_directory_sorted() {
    let dir = testdata_path().join("project");
    let config = ExplainConfig::default();
    let files = collect_files(&dir, &config).unwrap();
    assert_eq!(files.len(), 3);

    let explained = explain_files(&explainer(&config), &files, &dir).unwrap();
    let paths: Vec<_> = explained.iter().map(|f| f.path.replace('\\', "/")).collect();
    assert_eq!(paths, vec!["Legacy/Counter.cs", "Nulls.cs", "Shapes.cs"]);
    assert!(explained[0].result.is_empty());
    assert_eq!(explained[1].result.len(), 3);
    assert_eq!(explained[2].result.len(), 5);
}

#[test]
fn test_broken_source_does_not_fail() {
    // The parser recovers from errors, so a partial tree is still walked.
    let source = "class C { int P => 1; void M( { }";
    let result = explainer(&ExplainConfig::default())
        .explain_source(source)
        .unwrap();
    for record in &result {
        assert!(source.contains(record.code.as_str()));
    }
}
