//! Sibling analyzers running on the bookkeeping pool.

use std::{sync::Arc, time::Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, bounded};
use rayon::ThreadPool;
use tracing::debug;

use crate::{
    error::{ExperimentError, MetricsError},
    graph::Graph,
    metrics::{MetricKind, MetricMap},
};

/// A metric computed in the background and collected before a deadline.
#[derive(Debug)]
pub struct PendingMetric {
    kind: MetricKind,
    receiver: Receiver<Result<MetricMap, MetricsError>>,
}

impl PendingMetric {
    /// Starts computing `kind` over `graph` on `pool`.
    #[must_use]
    pub fn spawn(pool: &ThreadPool, kind: MetricKind, graph: Arc<Graph>) -> Self {
        Self::spawn_with(pool, kind, move || kind.analyzer().analyze(&graph))
    }

    fn spawn_with<F>(pool: &ThreadPool, kind: MetricKind, analyze: F) -> Self
    where
        F: FnOnce() -> Result<MetricMap, MetricsError> + Send + 'static,
    {
        let (sender, receiver) = bounded(1);
        pool.spawn(move || {
            if sender.send(analyze()).is_err() {
                debug!(metric = kind.name(), "pending metric abandoned");
            }
        });
        Self { kind, receiver }
    }

    /// The metric being computed.
    #[must_use]
    pub const fn kind(&self) -> MetricKind {
        self.kind
    }

    /// Blocks until the metric is ready or `deadline` passes.
    ///
    /// # Errors
    /// Returns [`ExperimentError::DeadlineExceeded`] on timeout,
    /// [`ExperimentError::AnalyzerLost`] when the worker exited without a
    /// result and [`ExperimentError::Metrics`] when the analyzer failed.
    pub fn wait(self, deadline: Instant) -> Result<MetricMap, ExperimentError> {
        match self.receiver.recv_deadline(deadline) {
            Ok(result) => Ok(result?),
            Err(RecvTimeoutError::Timeout) => Err(ExperimentError::DeadlineExceeded),
            Err(RecvTimeoutError::Disconnected) => Err(ExperimentError::AnalyzerLost {
                metric: self.kind.name(),
            }),
        }
    }
}
