//! Experiment orchestration.
//!
//! An [`Experiment`] sweeps mixture ratios, runs replica sampler jobs on a
//! tiered set of rayon pools and compares every sample's metrics with the
//! population's, producing an [`ExperimentReport`].

mod broadcast;
mod builder;
mod pending;
mod pools;
mod report;
mod runner;

pub use self::{
    broadcast::{PopulationPublisher, PopulationSubscriber, population_channel},
    builder::{
        DEFAULT_ALPHA, DEFAULT_BATCH_TIMEOUT, DEFAULT_TOP_K_FRACTION, ExperimentBuilder,
        MAX_BATCH_TIMEOUT,
    },
    pending::PendingMetric,
    pools::PoolTiers,
    report::{ExperimentReport, JobFailure, REPORT_KEY_COLUMNS, ReportRow},
    runner::Experiment,
};
