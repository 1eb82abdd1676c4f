//! Editing session: reruns the explainer on each trigger, latest trigger wins.
//!
//! Each trigger carries the full document text. A newer trigger supersedes
//! whatever was in flight, so only the result for the most recent text is
//! ever delivered.

use tokio::task::JoinHandle;

use crate::explain::{AnalysisResult, Explainer};

/// Result of one analysis run, tagged with the trigger that started it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub generation: u64,
    pub result: AnalysisResult,
}

#[derive(Debug)]
struct InFlight {
    generation: u64,
    handle: JoinHandle<AnalysisResult>,
}

/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct Session {
    explainer: Explainer,
    generation: u64,
    in_flight: Option<InFlight>,
}

impl Session {
    pub fn new(explainer: Explainer) -> Self {
        Self {
            explainer,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start an analysis of `source`, superseding any run still in flight.
    ///
    /// Returns the generation assigned to the new run.
    pub fn trigger(&mut self, source: impl Into<String>) -> u64 {
        self.generation += 1;
        let generation = self.generation;

        if let Some(previous) = self.in_flight.take() {
            tracing::debug!(
                superseded = previous.generation,
                generation,
                "superseding in-flight analysis"
            );
            // A blocking task that already started runs to completion; its
            // result is dropped with the handle.
            previous.handle.abort();
        }

        let explainer = self.explainer.clone();
        let source = source.into();
        let handle = tokio::task::spawn_blocking(move || {
            match explainer.explain_source(&source) {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!(generation, error = %e, "failed to parse source");
                    AnalysisResult::new()
                }
            }
        });

        self.in_flight = Some(InFlight { generation, handle });
        generation
    }

    /// Wait for the in-flight run. `None` when nothing is in flight.
    pub async fn deliver(&mut self) -> Option<Delivery> {
        let InFlight { generation, handle } = self.in_flight.take()?;
        if generation != self.generation {
            return None;
        }

        match handle.await {
            Ok(result) => {
                tracing::debug!(generation, records = result.len(), "analysis delivered");
                Some(Delivery { generation, result })
            }
            Err(e) => {
                tracing::warn!(generation, error = %e, "analysis task did not complete");
                None
            }
        }
    }
}
