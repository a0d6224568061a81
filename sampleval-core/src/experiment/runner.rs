//! Batch orchestration: one population analysis, many sampler jobs.

use std::{
    collections::BTreeMap,
    num::NonZeroUsize,
    sync::Arc,
    time::{Duration, Instant},
};

use crossbeam_channel::{RecvTimeoutError, bounded};
use rayon::{ThreadPool, prelude::*};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::{ExperimentError, MetricsError, SamplingError},
    graph::{EdgeType, Graph},
    metrics::{MetricKind, MetricMap},
    sampling::{AchievedStats, Sampler, SamplerParams, SamplingPolicy, mix_seed},
    stats::{MetricComparison, compare_metric_maps},
};

use super::{
    broadcast::{PopulationSubscriber, population_channel},
    pending::PendingMetric,
    pools::{PoolTiers, Pools},
    report::{ExperimentReport, JobFailure, ReportRow},
};

type PopulationMetrics = BTreeMap<MetricKind, MetricMap>;

/// A validated sampling experiment.
///
/// Population metrics are computed once on the population pool and
/// broadcast to every job. Each mixture ratio forms a batch of replica jobs
/// sharing one deadline; jobs that miss it are reported as timed out and the
/// run moves on to the next batch.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use sampleval_core::{EdgeType, ExperimentBuilder, Graph, MetricKind, VertexId};
///
/// let mut population = Graph::new(EdgeType::Undirected);
/// for id in 0..20 {
///     population.connect(VertexId::new(id), VertexId::new((id + 1) % 20));
/// }
/// let report = ExperimentBuilder::new()
///     .with_alpha(0.5)
///     .with_mixture_ratios([0.5])
///     .with_replicas(2)
///     .with_metrics([MetricKind::Degree])
///     .build()
///     .expect("valid configuration")
///     .run(Arc::new(population))
///     .expect("run succeeds");
/// assert_eq!(report.rows().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Experiment {
    pub(super) policy: SamplingPolicy,
    pub(super) alpha: f64,
    pub(super) mixture_ratios: Vec<f64>,
    pub(super) replicas: NonZeroUsize,
    pub(super) metrics: Vec<MetricKind>,
    pub(super) seed: u64,
    pub(super) top_k_fraction: f64,
    pub(super) batch_timeout: Duration,
    pub(super) pool_tiers: PoolTiers,
    pub(super) edge_type: Option<EdgeType>,
}

impl Experiment {
    /// Sampling policy used by every job.
    #[must_use]
    pub fn policy(&self) -> &SamplingPolicy {
        &self.policy
    }

    /// Target fraction of population vertices per sample.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Mixture ratios, one batch each.
    #[must_use]
    pub fn mixture_ratios(&self) -> &[f64] {
        &self.mixture_ratios
    }

    /// Samples per mixture ratio.
    #[must_use]
    pub fn replicas(&self) -> NonZeroUsize {
        self.replicas
    }

    /// Metrics compared for every sample, in report order.
    #[must_use]
    pub fn metrics(&self) -> &[MetricKind] {
        &self.metrics
    }

    /// Base seed of every job seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Time allowed for one batch.
    #[must_use]
    pub fn batch_timeout(&self) -> Duration {
        self.batch_timeout
    }

    /// Seed of replica `replica` in batch `batch`.
    #[must_use]
    pub fn job_seed(&self, batch: usize, replica: usize) -> u64 {
        let job = batch
            .saturating_mul(self.replicas.get())
            .saturating_add(replica);
        mix_seed(self.seed, u64::try_from(job).unwrap_or(u64::MAX))
    }

    /// Runs every batch against `population`.
    ///
    /// # Errors
    /// Returns [`ExperimentError::Sampling`] when `population` has no
    /// vertices or edges, [`ExperimentError::PoolBuild`] when a worker pool
    /// cannot start and [`ExperimentError::Metrics`] when a population metric
    /// fails. Failures of individual jobs are recorded in the report.
    #[instrument(
        name = "experiment.run",
        err,
        skip(self, population),
        fields(
            policy = self.policy.name(),
            vertices = population.vertex_count(),
            edges = population.edge_count(),
            batches = self.mixture_ratios.len(),
            replicas = self.replicas.get(),
        ),
    )]
    pub fn run(&self, population: Arc<Graph>) -> Result<ExperimentReport, ExperimentError> {
        if population.vertex_count() == 0 || population.edge_count() == 0 {
            return Err(SamplingError::InvalidGraph {
                vertices: population.vertex_count(),
                edges: population.edge_count(),
            }
            .into());
        }
        let pools = self.pool_tiers.build()?;

        let (publisher, subscriber) = population_channel::<PopulationMetrics>();
        let (failure_sender, failure_receiver) = bounded::<MetricsError>(1);
        {
            let graph = Arc::clone(&population);
            let metrics = self.metrics.clone();
            pools.population.spawn(move || match analyze_population(&graph, &metrics) {
                Ok(values) => publisher.publish(values),
                Err(err) => {
                    warn!(code = %err.code(), error = %err, "population analysis failed");
                    if failure_sender.send(err).is_err() {
                        debug!("experiment finished before population analysis");
                    }
                }
            });
        }

        let mut rows = Vec::new();
        for (batch, &mixture_ratio) in self.mixture_ratios.iter().enumerate() {
            rows.extend(self.run_batch(batch, mixture_ratio, &population, &subscriber, &pools));
        }
        if let Ok(err) = failure_receiver.try_recv() {
            return Err(err.into());
        }

        let order = |kind: MetricKind| self.metrics.iter().position(|&known| known == kind);
        rows.sort_by(|a, b| {
            order(a.metric)
                .cmp(&order(b.metric))
                .then(a.mixture_ratio.total_cmp(&b.mixture_ratio))
                .then(a.replica.cmp(&b.replica))
        });
        let failures = rows.iter().filter(|row| row.outcome.is_err()).count();
        info!(rows = rows.len(), failures, "experiment finished");
        Ok(ExperimentReport::new(self.policy.name(), rows))
    }

    #[instrument(name = "experiment.batch", skip(self, population, subscriber, pools))]
    fn run_batch(
        &self,
        batch: usize,
        mixture_ratio: f64,
        population: &Arc<Graph>,
        subscriber: &PopulationSubscriber<PopulationMetrics>,
        pools: &Pools,
    ) -> Vec<ReportRow> {
        let replicas = self.replicas.get();
        // `build` caps the timeout, so the deadline is representable.
        let deadline = Instant::now() + self.batch_timeout;
        let edge_type = self.edge_type.unwrap_or_else(|| population.edge_type());
        let (sender, receiver) = bounded(replicas);

        for replica in 0..replicas {
            let job = Job {
                population: Arc::clone(population),
                subscriber: subscriber.clone(),
                bookkeeping: Arc::clone(&pools.bookkeeping),
                policy: self.policy.clone(),
                alpha: self.alpha,
                mixture_ratio,
                edge_type,
                seed: self.job_seed(batch, replica),
                replica,
                metrics: self.metrics.clone(),
                top_k_fraction: self.top_k_fraction,
                deadline,
            };
            let sender = sender.clone();
            pools.samples.spawn(move || {
                if sender.send(job.run()).is_err() {
                    debug!(replica, "batch closed before the job reported");
                }
            });
        }
        drop(sender);

        let mut outcomes: BTreeMap<usize, JobOutcome> = BTreeMap::new();
        let mut missing = JobFailure::TimedOut;
        while outcomes.len() < replicas {
            match receiver.recv_deadline(deadline) {
                Ok(outcome) => {
                    outcomes.insert(outcome.replica, outcome);
                }
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    missing = JobFailure::from(&ExperimentError::JobLost);
                    break;
                }
            }
        }
        if outcomes.len() < replicas {
            warn!(
                reported = outcomes.len(),
                replicas,
                status = %missing.status(),
                "batch incomplete"
            );
        }
        record_batch(replicas, outcomes.len());

        let mut rows = Vec::with_capacity(replicas * self.metrics.len());
        for replica in 0..replicas {
            match outcomes.remove(&replica) {
                Some(outcome) => rows.extend(outcome.into_rows(mixture_ratio)),
                None => rows.extend(self.metrics.iter().map(|&metric| ReportRow {
                    metric,
                    mixture_ratio,
                    replica,
                    achieved: None,
                    outcome: Err(missing.clone()),
                })),
            }
        }
        rows
    }
}

#[instrument(name = "experiment.population", err, skip_all, fields(metrics = metrics.len()))]
fn analyze_population(
    graph: &Graph,
    metrics: &[MetricKind],
) -> Result<PopulationMetrics, MetricsError> {
    metrics
        .par_iter()
        .map(|&kind| kind.analyzer().analyze(graph).map(|values| (kind, values)))
        .collect()
}

struct Job {
    population: Arc<Graph>,
    subscriber: PopulationSubscriber<PopulationMetrics>,
    bookkeeping: Arc<ThreadPool>,
    policy: SamplingPolicy,
    alpha: f64,
    mixture_ratio: f64,
    edge_type: EdgeType,
    seed: u64,
    replica: usize,
    metrics: Vec<MetricKind>,
    top_k_fraction: f64,
    deadline: Instant,
}

struct JobOutcome {
    replica: usize,
    achieved: Option<AchievedStats>,
    results: Vec<(MetricKind, Result<MetricComparison, JobFailure>)>,
}

impl JobOutcome {
    fn into_rows(self, mixture_ratio: f64) -> impl Iterator<Item = ReportRow> {
        let Self {
            replica,
            achieved,
            results,
        } = self;
        results.into_iter().map(move |(metric, outcome)| ReportRow {
            metric,
            mixture_ratio,
            replica,
            achieved,
            outcome,
        })
    }
}

impl Job {
    #[instrument(
        name = "experiment.job",
        skip(self),
        fields(mixture_ratio = self.mixture_ratio, replica = self.replica, seed = self.seed)
    )]
    fn run(self) -> JobOutcome {
        let achieved_and_sample = SamplerParams::new(self.alpha, self.mixture_ratio)
            .map_err(ExperimentError::from)
            .and_then(|params| {
                let params = params.with_seed(self.seed).with_edge_type(self.edge_type);
                let mut sampler = Sampler::new(self.policy.clone(), params);
                let achieved = sampler.sample_graph(&self.population)?;
                Ok((achieved, Arc::new(sampler.into_graph())))
            });
        let (achieved, sample) = match achieved_and_sample {
            Ok(pair) => pair,
            Err(err) => return self.failed(None, &err),
        };

        let mut pending: BTreeMap<MetricKind, PendingMetric> = BTreeMap::new();
        let mut inline: BTreeMap<MetricKind, Result<MetricMap, ExperimentError>> = BTreeMap::new();
        for &kind in &self.metrics {
            if kind.is_expensive() {
                pending.insert(
                    kind,
                    PendingMetric::spawn(&self.bookkeeping, kind, Arc::clone(&sample)),
                );
            } else {
                inline.insert(kind, kind.analyzer().analyze(&sample).map_err(Into::into));
            }
        }

        let population = match self.subscriber.wait(self.deadline) {
            Ok(population) => population,
            Err(err) => return self.failed(Some(achieved), &err),
        };

        let mut results = Vec::with_capacity(self.metrics.len());
        for &kind in &self.metrics {
            let sample_values = match (inline.remove(&kind), pending.remove(&kind)) {
                (Some(values), _) => values,
                (None, Some(metric)) => metric.wait(self.deadline),
                (None, None) => Err(ExperimentError::AnalyzerLost { metric: kind.name() }),
            };
            let outcome = sample_values.and_then(|values| {
                let population_values = population
                    .get(&kind)
                    .ok_or(ExperimentError::PopulationUnavailable)?;
                Ok(compare_metric_maps(
                    population_values,
                    &values,
                    self.top_k_fraction,
                )?)
            });
            results.push((kind, outcome.map_err(|err| self.failure(kind, &err))));
        }
        debug!(metrics = results.len(), "job finished");
        JobOutcome {
            replica: self.replica,
            achieved: Some(achieved),
            results,
        }
    }

    fn failure(&self, metric: MetricKind, err: &ExperimentError) -> JobFailure {
        warn!(
            metric = metric.name(),
            mixture_ratio = self.mixture_ratio,
            replica = self.replica,
            code = %err.code(),
            error = %err,
            "job metric failed"
        );
        JobFailure::from(err)
    }

    fn failed(&self, achieved: Option<AchievedStats>, err: &ExperimentError) -> JobOutcome {
        JobOutcome {
            replica: self.replica,
            achieved,
            results: self
                .metrics
                .iter()
                .map(|&kind| (kind, Err(self.failure(kind, err))))
                .collect(),
        }
    }
}

#[cfg(feature = "metrics")]
fn record_batch(replicas: usize, reported: usize) {
    metrics::counter!("experiment_jobs_reported").increment(reported as u64);
    metrics::counter!("experiment_jobs_missing").increment((replicas - reported) as u64);
}

#[cfg(not(feature = "metrics"))]
fn record_batch(_replicas: usize, _reported: usize) {}
