//! Command-line interface for csexplain.

use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use crate::config::ExplainConfig;
use crate::explain::{Catalog, Explainer};
use crate::report::{self, FileExplanation};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &["bin", "obj", "node_modules"];

/// Explain the C# language features used in source files.
///
/// Every recognized construct is reported with its source text, a short
/// description and a link to the language documentation.
#[derive(Parser)]
#[command(name = "csexplain")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Explain the features used in a file or directory
    Explain(ExplainArgs),
    /// List the features csexplain recognizes
    Features(FeaturesArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

/// Arguments for the explain command.
#[derive(Parser)]
pub struct ExplainArgs {
    /// Path to explain (.cs file or directory)
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

/// Arguments for the features command.
#[derive(Parser)]
pub struct FeaturesArgs {
    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<ExplainConfig> {
    let cwd = std::env::current_dir()?;
    ExplainConfig::load(explicit, &cwd)
}

/// Collect `.cs` files under `root`, sorted by path.
pub fn collect_files(root: &Path, config: &ExplainConfig) -> anyhow::Result<Vec<PathBuf>> {
    let excluded = config.excluded_matcher()?;
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            // Skip hidden and build output directories
            !name.starts_with('.') && !SKIPPED_DIRS.contains(&name.as_ref())
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("cs") {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        if excluded.is_match(relative) || excluded.is_match(path) {
            tracing::debug!(path = %path.display(), "excluded by config");
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Explain each file in parallel. Output order follows `files`.
///
/// Files that cannot be read as UTF-8 text are logged and skipped.
pub fn explain_files(
    explainer: &Explainer,
    files: &[PathBuf],
    root: &Path,
) -> anyhow::Result<Vec<FileExplanation>> {
    files
        .par_iter()
        .filter_map(|path| match std::fs::read_to_string(path) {
            Ok(source) => Some((path, source)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable file");
                None
            }
        })
        .map(|(path, source)| -> anyhow::Result<FileExplanation> {
            let result = explainer.explain_source(&source)?;
            tracing::debug!(path = %path.display(), records = result.len(), "explained");
            Ok(FileExplanation {
                path: display_path(path, root),
                result,
            })
        })
        .collect()
}

fn display_path(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().to_string(),
        _ => path.to_string_lossy().to_string(),
    }
}

/// Run the explain command.
pub fn run_explain(args: &ExplainArgs) -> anyhow::Result<i32> {
    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: invalid config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let metadata = match std::fs::metadata(&args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let (root, files) = if metadata.is_dir() {
        (args.path.clone(), collect_files(&args.path, &config)?)
    } else {
        let root = args.path.parent().map(Path::to_path_buf).unwrap_or_default();
        (root, vec![args.path.clone()])
    };

    if files.is_empty() {
        eprintln!("Warning: no .cs files to explain");
        return Ok(EXIT_SUCCESS);
    }

    let catalog = Arc::new(Catalog::builtin(&config)?);
    let explainer = Explainer::new(catalog);
    tracing::info!(files = files.len(), "explaining");
    let explained = explain_files(&explainer, &files, &root)?;

    match args.format {
        OutputFormat::Json => report::write_json(&explained)?,
        OutputFormat::Pretty => report::write_pretty(&mut io::stdout().lock(), &explained)?,
    }

    Ok(EXIT_SUCCESS)
}

/// Run the features command.
pub fn run_features(args: &FeaturesArgs) -> anyhow::Result<i32> {
    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: invalid config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    let catalog = Catalog::builtin(&config)?;

    match args.format {
        OutputFormat::Json => println!("{}", report::render_features_json(&catalog)?),
        OutputFormat::Pretty => report::write_features_pretty(&mut io::stdout().lock(), &catalog)?,
    }

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_collect_files_skips_build_output() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "B.cs", "class B { }");
        write(dir.path(), "src/A.cs", "class A { }");
        write(dir.path(), "obj/Debug/Gen.cs", "class G { }");
        write(dir.path(), "bin/X.cs", "class X { }");
        write(dir.path(), ".vs/Y.cs", "class Y { }");
        write(dir.path(), "notes.txt", "not code");

        let files = collect_files(dir.path(), &ExplainConfig::default()).unwrap();
        let names: Vec<_> = files.iter().map(|p| display_path(p, dir.path())).collect();
        assert_eq!(
            names,
            vec![
                "B.cs".to_string(),
                format!("src{}A.cs", std::path::MAIN_SEPARATOR)
            ]
        );
    }

    #[test]
    fn test_collect_files_honors_excluded_paths() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Model.cs", "class M { }");
        write(dir.path(), "Generated/Model.g.cs", "class G { }");

        let config = ExplainConfig {
            excluded_paths: vec!["Generated/**".to_string()],
            ..Default::default()
        };
        let files = collect_files(dir.path(), &config).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("Model.cs"));
    }

    #[test]
    fn test_explain_files_skips_non_utf8() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "A.cs", "class A { int P => 1; }");
        fs::write(dir.path().join("Latin1.cs"), b"class L { string S = \"caf\xe9\"; }").unwrap();
        write(dir.path(), "Z.cs", "class Z { }");

        let files = collect_files(dir.path(), &ExplainConfig::default()).unwrap();
        assert_eq!(files.len(), 3);
        let catalog = Arc::new(Catalog::builtin(&ExplainConfig::default()).unwrap());
        let explained = explain_files(&Explainer::new(catalog), &files, dir.path()).unwrap();

        let paths: Vec<_> = explained.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["A.cs", "Z.cs"]);
    }

    #[test]
    fn test_explain_files_keeps_order() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "A.cs", "class A { int P => 1; }");
        write(dir.path(), "B.cs", "class B { }");
        write(dir.path(), "C.cs", "class C { object F() => (1, 2); }");

        let files = collect_files(dir.path(), &ExplainConfig::default()).unwrap();
        let catalog = Arc::new(Catalog::builtin(&ExplainConfig::default()).unwrap());
        let explained = explain_files(&Explainer::new(catalog), &files, dir.path()).unwrap();

        let paths: Vec<_> = explained.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["A.cs", "B.cs", "C.cs"]);
        assert_eq!(explained[0].result.len(), 1);
        assert!(explained[1].result.is_empty());
        assert_eq!(explained[2].result.len(), 2);
    }
}
