//! Error types for the sampleval core library.
//!
//! Defines the error enums exposed by the graph container, the samplers and
//! the statistics engine, each paired with a stable machine-readable code.

use thiserror::Error;

use crate::graph::{EdgeId, VertexId};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl ::std::fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

pub(crate) use define_error_codes;

/// An error produced while mutating a [`crate::Graph`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// An edge referenced a vertex that is not part of the graph.
    #[error("vertex {vertex} is not part of the graph")]
    UnknownVertex {
        /// The missing endpoint.
        vertex: VertexId,
    },
    /// An edge id was reused for a different endpoint pair.
    #[error("edge {edge} already connects {existing_source} -> {existing_target}")]
    DuplicateEdgeId {
        /// The conflicting edge identifier.
        edge: EdgeId,
        /// Source of the edge already stored under `edge`.
        existing_source: VertexId,
        /// Target of the edge already stored under `edge`.
        existing_target: VertexId,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// An edge referenced a vertex that is not part of the graph.
        UnknownVertex => UnknownVertex { .. } => "GRAPH_UNKNOWN_VERTEX",
        /// An edge id was reused for a different endpoint pair.
        DuplicateEdgeId => DuplicateEdgeId { .. } => "GRAPH_DUPLICATE_EDGE_ID",
    }
}

/// Error type produced when configuring or running a [`crate::Sampler`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SamplingError {
    /// The parent graph has no vertices or no edges.
    #[error("parent graph must contain at least one vertex and one edge (got {vertices} vertices, {edges} edges)")]
    InvalidGraph {
        /// Vertex count of the rejected parent.
        vertices: usize,
        /// Edge count of the rejected parent.
        edges: usize,
    },
    /// The target fraction was outside `(0, 1]`.
    #[error("alpha must lie in (0, 1] (got {got})")]
    InvalidAlpha {
        /// The rejected target fraction.
        got: f64,
    },
    /// The mixture ratio was outside `[0, 1]`.
    #[error("mixture ratio must lie in [0, 1] (got {got})")]
    InvalidMixtureRatio {
        /// The rejected mixture ratio.
        got: f64,
    },
    /// A variant-specific parameter was invalid.
    #[error("invalid sampler parameter: {reason}")]
    InvalidParameters {
        /// Human-readable description of the violated constraint.
        reason: String,
    },
    /// Copying parent structure into the sample failed.
    #[error("sample graph mutation failed: {source}")]
    Graph {
        /// Underlying graph container error.
        #[from]
        source: GraphError,
    },
}

define_error_codes! {
    /// Stable codes describing [`SamplingError`] variants.
    enum SamplingErrorCode for SamplingError {
        /// The parent graph has no vertices or no edges.
        InvalidGraph => InvalidGraph { .. } => "SAMPLING_INVALID_GRAPH",
        /// The target fraction was outside `(0, 1]`.
        InvalidAlpha => InvalidAlpha { .. } => "SAMPLING_INVALID_ALPHA",
        /// The mixture ratio was outside `[0, 1]`.
        InvalidMixtureRatio => InvalidMixtureRatio { .. } => "SAMPLING_INVALID_MIXTURE_RATIO",
        /// A variant-specific parameter was invalid.
        InvalidParameters => InvalidParameters { .. } => "SAMPLING_INVALID_PARAMETERS",
        /// Copying parent structure into the sample failed.
        GraphFailure => Graph { .. } => "SAMPLING_GRAPH_FAILURE",
    }
}

impl SamplingError {
    /// Retrieve the inner [`GraphErrorCode`] when the error originated in the graph container.
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Graph { source } => Some(source.code()),
            _ => None,
        }
    }
}

/// Errors raised by the statistics engine on precondition violations.
///
/// Numerical degeneracy is never an error; see the individual functions for
/// their sentinel policies.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum StatsError {
    /// The two series had different lengths.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch {
        /// Length of the left-hand series.
        left: usize,
        /// Length of the right-hand series.
        right: usize,
    },
    /// The top-K fraction was outside `(0, 1]`.
    #[error("top-k fraction must lie in (0, 1] (got {got})")]
    InvalidTopKFraction {
        /// The rejected fraction.
        got: f64,
    },
    /// A sample metric referenced a vertex without a population value.
    #[error("vertex {vertex} has no population metric value")]
    MissingPopulationValue {
        /// The unmatched sample vertex.
        vertex: VertexId,
    },
}

define_error_codes! {
    /// Stable codes describing [`StatsError`] variants.
    enum StatsErrorCode for StatsError {
        /// The two series had different lengths.
        DimensionMismatch => DimensionMismatch { .. } => "STATS_DIMENSION_MISMATCH",
        /// The top-K fraction was outside `(0, 1]`.
        InvalidTopKFraction => InvalidTopKFraction { .. } => "STATS_INVALID_TOP_K_FRACTION",
        /// A sample metric referenced a vertex without a population value.
        MissingPopulationValue => MissingPopulationValue { .. } => "STATS_MISSING_POPULATION_VALUE",
    }
}

/// Errors raised by the metric analyzers.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MetricsError {
    /// The analyzed graph had no vertices.
    #[error("{analyzer} cannot analyze an empty graph")]
    EmptyGraph {
        /// Name of the analyzer that rejected the graph.
        analyzer: &'static str,
    },
    /// A metric name did not match any known analyzer.
    #[error("unknown metric `{name}`")]
    UnknownMetric {
        /// The unrecognised name.
        name: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`MetricsError`] variants.
    enum MetricsErrorCode for MetricsError {
        /// The analyzed graph had no vertices.
        EmptyGraph => EmptyGraph { .. } => "METRICS_EMPTY_GRAPH",
        /// A metric name did not match any known analyzer.
        UnknownMetric => UnknownMetric { .. } => "METRICS_UNKNOWN_METRIC",
    }
}

/// Errors raised while configuring or running an [`crate::Experiment`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ExperimentError {
    /// The experiment configuration was rejected.
    #[error("invalid experiment configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the violated constraint.
        reason: String,
    },
    /// A worker pool could not be created.
    #[error("failed to build the {tier} pool: {reason}")]
    PoolBuild {
        /// Name of the pool tier.
        tier: &'static str,
        /// Failure reported by the thread pool builder.
        reason: String,
    },
    /// A sampler rejected its parameters or the population graph.
    #[error("sampling failed: {source}")]
    Sampling {
        /// Underlying sampler error.
        #[from]
        source: SamplingError,
    },
    /// A metric analyzer failed.
    #[error("metric analysis failed: {source}")]
    Metrics {
        /// Underlying analyzer error.
        #[from]
        source: MetricsError,
    },
    /// Comparing sample metrics with population metrics failed.
    #[error("metric comparison failed: {source}")]
    Stats {
        /// Underlying statistics error.
        #[from]
        source: StatsError,
    },
    /// The population publisher went away without publishing.
    #[error("population metrics were never published")]
    PopulationUnavailable,
    /// A batch deadline passed before a result arrived.
    #[error("batch deadline exceeded")]
    DeadlineExceeded,
    /// A background analyzer exited without reporting a result.
    #[error("{metric} analyzer exited without a result")]
    AnalyzerLost {
        /// Name of the lost metric.
        metric: &'static str,
    },
    /// A sampler job exited without reporting.
    #[error("sampler job exited without reporting")]
    JobLost,
    /// Writing the report failed.
    #[error("failed to write report: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: std::io::Error,
    },
    /// Encoding the report as CSV failed.
    #[error("failed to encode report: {source}")]
    Csv {
        /// Underlying CSV error.
        #[from]
        source: csv::Error,
    },
}

define_error_codes! {
    /// Stable codes describing [`ExperimentError`] variants.
    enum ExperimentErrorCode for ExperimentError {
        /// The experiment configuration was rejected.
        InvalidConfig => InvalidConfig { .. } => "EXPERIMENT_INVALID_CONFIG",
        /// A worker pool could not be created.
        PoolBuild => PoolBuild { .. } => "EXPERIMENT_POOL_BUILD",
        /// A sampler rejected its parameters or the population graph.
        SamplingFailure => Sampling { .. } => "EXPERIMENT_SAMPLING_FAILURE",
        /// A metric analyzer failed.
        MetricsFailure => Metrics { .. } => "EXPERIMENT_METRICS_FAILURE",
        /// Comparing sample metrics with population metrics failed.
        StatsFailure => Stats { .. } => "EXPERIMENT_STATS_FAILURE",
        /// The population publisher went away without publishing.
        PopulationUnavailable => PopulationUnavailable => "EXPERIMENT_POPULATION_UNAVAILABLE",
        /// A batch deadline passed before a result arrived.
        DeadlineExceeded => DeadlineExceeded => "EXPERIMENT_DEADLINE_EXCEEDED",
        /// A background analyzer exited without reporting a result.
        AnalyzerLost => AnalyzerLost { .. } => "EXPERIMENT_ANALYZER_LOST",
        /// A sampler job exited without reporting.
        JobLost => JobLost => "EXPERIMENT_JOB_LOST",
        /// Writing the report failed.
        Io => Io { .. } => "EXPERIMENT_IO",
        /// Encoding the report as CSV failed.
        Csv => Csv { .. } => "EXPERIMENT_CSV",
    }
}

/// Convenient alias for results returned by the sampling API.
pub type Result<T> = core::result::Result<T, SamplingError>;
