//! csexplain - explains the C# language features used in source code.
//!
//! Given C# source text, csexplain reports every recognized construct
//! (pattern matching, expression-bodied members, tuples, null-conditional
//! access and so on) with its verbatim source text, a short description and
//! a documentation link.
//!
//! # Architecture
//!
//! The codebase uses tree-sitter for AST-based analysis:
//!
//! - `syntax`: C# parsing and the node shapes detectors can target
//! - `explain`: feature catalog, dispatch, tree walk and result assembly
//! - `session`: latest-wins reanalysis for an editing session
//! - `config`: YAML configuration
//! - `report`: Output formatting (pretty, JSON)
//!
//! # Adding a New Feature
//!
//! Add a `FeatureDetector` to `BUILTIN_FEATURES` in `src/explain/features.rs`.
//! Registration order is priority order within a shape.

pub mod cli;
pub mod config;
pub mod explain;
pub mod report;
pub mod session;
pub mod syntax;

pub use config::ExplainConfig;
pub use explain::{
    AnalysisResult, Catalog, CatalogBuilder, CatalogError, DetectorError, Explainer,
    ExplanationRecord, FeatureDetector,
};
pub use session::{Delivery, Session};
pub use syntax::{ParsedSource, ShapeKind, Span, SyntaxError};

/// Environment variable holding the log filter (e.g. `csexplain=debug`).
pub const LOG_ENV: &str = "CSEXPLAIN_LOG";

/// Initialize logging to stderr.
///
/// Call this once at startup. Defaults to `warn` when `CSEXPLAIN_LOG` is unset
/// or invalid.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
