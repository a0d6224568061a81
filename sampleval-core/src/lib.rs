//! Sampleval core library.
//!
//! Grows targeted samples of a parent graph, computes per-vertex metrics on
//! the population and on each sample, and scores how well the sample
//! preserves them.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod experiment;
mod graph;
mod metrics;
mod sampling;
pub mod stats;

#[cfg(test)]
mod test_utils;

pub use crate::{
    error::{
        ExperimentError, ExperimentErrorCode, GraphError, GraphErrorCode, MetricsError,
        MetricsErrorCode, Result, SamplingError, SamplingErrorCode, StatsError, StatsErrorCode,
    },
    experiment::{
        DEFAULT_ALPHA, DEFAULT_BATCH_TIMEOUT, DEFAULT_TOP_K_FRACTION, Experiment,
        ExperimentBuilder, ExperimentReport, JobFailure, MAX_BATCH_TIMEOUT, PendingMetric,
        PoolTiers, PopulationPublisher, PopulationSubscriber, REPORT_KEY_COLUMNS, ReportRow,
        population_channel,
    },
    graph::{Edge, EdgeId, EdgeInsertion, EdgeType, Graph, VertexId},
    metrics::{
        BetweennessAnalyzer, ClusteringAnalyzer, DegreeAnalyzer, MetricKind, MetricMap,
        MetricsAnalyzer,
    },
    sampling::{
        AchievedStats, BfsConfig, DEFAULT_BACKWARD_BURN_MULTIPLIER,
        DEFAULT_FORWARD_BURN_PROBABILITY, DEFAULT_RERUN_MAX, ForestFireConfig, GrowthSession,
        Sampler, SamplerParams, SamplingPolicy, SessionSnapshot, WalkConfig, WalkTransition,
        mix_seed,
    },
    stats::{KsFailure, KsFailureCode, MetricComparison},
};
