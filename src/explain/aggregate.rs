//! Result aggregation: matches in walk order → explanation records.

use crate::syntax::ParsedSource;

use super::catalog::Catalog;
use super::snippet;
use super::types::{AnalysisResult, ExplanationRecord};
use super::walker::Match;

/// Turn matches into records, keeping the order the walker emitted them in.
pub fn aggregate(
    parsed: &ParsedSource,
    catalog: &Catalog,
    matches: &[Match<'_, '_>],
) -> AnalysisResult {
    let mut result = AnalysisResult::new();
    for m in matches {
        result.push(ExplanationRecord {
            code: snippet::extract(parsed, m.node, m.detector.selector),
            name: m.detector.name.to_string(),
            text: m.detector.text.to_string(),
            link: catalog.link_for(m.detector),
        });
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplainConfig;
    use crate::explain::dispatch::Dispatcher;
    use crate::explain::walker;
    use crate::syntax::language;

    #[test]
    fn test_empty_matches_give_empty_result() {
        let catalog = Catalog::builtin(&ExplainConfig::default()).unwrap();
        let parsed = ParsedSource::parse("class C { }").unwrap();
        let result = aggregate(&parsed, &catalog, &[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_records_follow_match_order() {
        let catalog = Catalog::builtin(&ExplainConfig::default()).unwrap();
        let dispatcher = Dispatcher::new(&catalog, &language());
        let parsed = ParsedSource::parse(
            "class C { string N => nameof(C); object F() => (1, 2); }",
        )
        .unwrap();
        let (matches, _) = walker::analyze(&parsed, &catalog, &dispatcher);
        let result = aggregate(&parsed, &catalog, &matches);

        let names: Vec<_> = result.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "expression-bodied member",
                "nameof",
                "expression-bodied member",
                "tuple"
            ]
        );
        assert_eq!(result.records()[1].code, "nameof(C)");
        assert_eq!(result.records()[3].code, "(1, 2)");
        for record in &result {
            assert!(record.link.starts_with("https://docs.microsoft.com/"));
            assert!(!record.text.is_empty());
        }
    }
}
