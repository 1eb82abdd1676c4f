//! Core types for explanation results.

use serde::{Deserialize, Serialize};

/// One recognized language construct.
///
/// These four fields are the whole output contract: nothing else about the
/// match (node kind, offsets, detector id) crosses this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExplanationRecord {
    /// Verbatim source text of the construct, trailing trivia included.
    pub code: String,
    /// Display name of the feature.
    pub name: String,
    /// Descriptive prose.
    pub text: String,
    /// Documentation URL.
    pub link: String,
}

/// Explanations for one source text, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult {
    records: Vec<ExplanationRecord>,
}

impl AnalysisResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ExplanationRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExplanationRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<ExplanationRecord> {
        self.records
    }

    pub(crate) fn push(&mut self, record: ExplanationRecord) {
        self.records.push(record);
    }
}

impl From<Vec<ExplanationRecord>> for AnalysisResult {
    fn from(records: Vec<ExplanationRecord>) -> Self {
        Self { records }
    }
}

impl IntoIterator for AnalysisResult {
    type Item = ExplanationRecord;
    type IntoIter = std::vec::IntoIter<ExplanationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a AnalysisResult {
    type Item = &'a ExplanationRecord;
    type IntoIter = std::slice::Iter<'a, ExplanationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ExplanationRecord {
        ExplanationRecord {
            code: "x?.y".to_string(),
            name: "null-conditional operator".to_string(),
            text: "Accesses y when x is not null.".to_string(),
            link: "https://docs.microsoft.com/x".to_string(),
        }
    }

    #[test]
    fn test_record_serializes_four_fields() {
        let value = serde_json::to_value(record()).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["code", "link", "name", "text"]);
    }

    #[test]
    fn test_result_serializes_as_array() {
        let result = AnalysisResult::from(vec![record()]);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.starts_with('['));

        let empty = serde_json::to_string(&AnalysisResult::new()).unwrap();
        assert_eq!(empty, "[]");
    }
}
