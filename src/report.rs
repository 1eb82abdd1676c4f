//! Output formatting for csexplain results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use std::io::{self, Write};

use colored::*;
use serde::{Deserialize, Serialize};

use crate::explain::{AnalysisResult, Catalog, ExplanationRecord};

/// Explanations for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileExplanation {
    pub path: String,
    pub result: AnalysisResult,
}

// =============================================================================
// JSON Format
// =============================================================================

#[derive(Serialize, Deserialize)]
pub struct JsonFileReport {
    pub path: String,
    pub explanations: Vec<ExplanationRecord>,
}

#[derive(Serialize, Deserialize)]
pub struct JsonFeature {
    pub id: String,
    pub name: String,
    pub link: String,
}

pub fn render_json(files: &[FileExplanation]) -> anyhow::Result<String> {
    let report: Vec<JsonFileReport> = files
        .iter()
        .map(|f| JsonFileReport {
            path: f.path.clone(),
            explanations: f.result.records().to_vec(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Write results in JSON format.
pub fn write_json(files: &[FileExplanation]) -> anyhow::Result<()> {
    let json = render_json(files)?;
    println!("{}", json);
    Ok(())
}

pub fn render_features_json(catalog: &Catalog) -> anyhow::Result<String> {
    let features: Vec<JsonFeature> = catalog
        .detectors()
        .iter()
        .map(|d| JsonFeature {
            id: d.id.to_string(),
            name: d.name.to_string(),
            link: catalog.link_for(d),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&features)?)
}

// =============================================================================
// Pretty Format
// =============================================================================

pub fn write_pretty<W: Write>(out: &mut W, files: &[FileExplanation]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "  {} v{}",
        "csexplain".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out)?;

    for file in files {
        write_file(out, file)?;
    }

    let total: usize = files.iter().map(|f| f.result.len()).sum();
    writeln!(
        out,
        "  {} explanation{} in {} file{}",
        total.to_string().bold(),
        plural(total),
        files.len(),
        plural(files.len())
    )?;
    writeln!(out)?;
    Ok(())
}

fn write_file<W: Write>(out: &mut W, file: &FileExplanation) -> io::Result<()> {
    write!(out, "  {}", file.path.bold())?;
    if file.result.is_empty() {
        writeln!(out, "  {}", "(no recognized features)".dimmed())?;
        writeln!(out)?;
        return Ok(());
    }
    writeln!(out)?;

    for record in &file.result {
        writeln!(out, "    {}", record.name.green().bold())?;
        for line in record.code.trim_end().lines() {
            writeln!(out, "      {}", line.yellow())?;
        }
        writeln!(out, "      {}", record.text)?;
        writeln!(out, "      {}", record.link.dimmed())?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn write_features_pretty<W: Write>(out: &mut W, catalog: &Catalog) -> io::Result<()> {
    writeln!(out, "Known features:")?;
    writeln!(out)?;
    for detector in catalog.detectors() {
        writeln!(
            out,
            "  {:<28} {}",
            detector.id.cyan(),
            detector.name
        )?;
        writeln!(out, "  {:<28} {}", "", catalog.link_for(detector).dimmed())?;
    }
    Ok(())
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplainConfig;

    fn sample() -> Vec<FileExplanation> {
        vec![
            FileExplanation {
                path: "src/A.cs".to_string(),
                result: AnalysisResult::from(vec![ExplanationRecord {
                    code: "int P => 1; ".to_string(),
                    name: "expression-bodied member".to_string(),
                    text: "Members can use an expression body.".to_string(),
                    link: "https://docs.microsoft.com/x".to_string(),
                }]),
            },
            FileExplanation {
                path: "src/B.cs".to_string(),
                result: AnalysisResult::new(),
            },
        ]
    }

    #[test]
    fn test_json_shape() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let files = value.as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0]["path"], "src/A.cs");
        assert_eq!(files[0]["explanations"][0]["code"], "int P => 1; ");
        assert_eq!(files[1]["explanations"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_pretty_mentions_every_record() {
        let mut out = Vec::new();
        write_pretty(&mut out, &sample()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("src/A.cs"));
        assert!(text.contains("expression-bodied member"));
        assert!(text.contains("int P => 1;"));
        assert!(text.contains("no recognized features"));
    }

    #[test]
    fn test_features_listing() {
        let catalog = Catalog::builtin(&ExplainConfig::default()).unwrap();
        let json = render_features_json(&catalog).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let features = value.as_array().unwrap();
        assert_eq!(features.len(), catalog.len());
        assert_eq!(features[0]["id"], "local-function");

        let mut out = Vec::new();
        write_features_pretty(&mut out, &catalog).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("null-coalescing-operator"));
    }
}
