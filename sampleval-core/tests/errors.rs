use sampleval_core::{
    ExperimentError, ExperimentErrorCode, GraphError, GraphErrorCode, KsFailure, KsFailureCode,
    MetricsError, MetricsErrorCode, SamplingError, SamplingErrorCode, StatsError, StatsErrorCode,
    VertexId,
};
use rstest::rstest;

#[rstest]
#[case(
    GraphError::UnknownVertex { vertex: VertexId::new(3) },
    GraphErrorCode::UnknownVertex,
    "GRAPH_UNKNOWN_VERTEX"
)]
fn graph_codes_are_stable(
    #[case] error: GraphError,
    #[case] expected: GraphErrorCode,
    #[case] code: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), code);
    assert_eq!(expected.to_string(), code);
}

#[rstest]
#[case(SamplingError::InvalidGraph { vertices: 0, edges: 0 }, SamplingErrorCode::InvalidGraph)]
#[case(SamplingError::InvalidAlpha { got: 0.0 }, SamplingErrorCode::InvalidAlpha)]
#[case(
    SamplingError::InvalidMixtureRatio { got: 2.0 },
    SamplingErrorCode::InvalidMixtureRatio
)]
#[case(
    SamplingError::InvalidParameters { reason: "max_degree".to_owned() },
    SamplingErrorCode::InvalidParameters
)]
fn sampling_codes_are_stable(#[case] error: SamplingError, #[case] expected: SamplingErrorCode) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.graph_code(), None);
}

#[test]
fn graph_failures_inside_sampling_keep_their_code() {
    let error = SamplingError::from(GraphError::UnknownVertex {
        vertex: VertexId::new(1),
    });
    assert_eq!(error.code(), SamplingErrorCode::GraphFailure);
    assert_eq!(error.graph_code(), Some(GraphErrorCode::UnknownVertex));
    assert!(error.to_string().contains("vertex 1"));
}

#[rstest]
#[case(StatsError::DimensionMismatch { left: 1, right: 2 }, StatsErrorCode::DimensionMismatch)]
#[case(StatsError::InvalidTopKFraction { got: 0.0 }, StatsErrorCode::InvalidTopKFraction)]
#[case(
    StatsError::MissingPopulationValue { vertex: VertexId::new(9) },
    StatsErrorCode::MissingPopulationValue
)]
fn stats_codes_are_stable(#[case] error: StatsError, #[case] expected: StatsErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case(KsFailure::NotANumber, KsFailureCode::NotANumber, "KS_NOT_A_NUMBER")]
#[case(KsFailure::Underflow, KsFailureCode::Underflow, "KS_UNDERFLOW")]
#[case(
    KsFailure::InsufficientData { left: 1, right: 0 },
    KsFailureCode::InsufficientData,
    "KS_INSUFFICIENT_DATA"
)]
fn ks_failure_codes_are_stable(
    #[case] failure: KsFailure,
    #[case] expected: KsFailureCode,
    #[case] code: &str,
) {
    assert_eq!(failure.code(), expected);
    assert_eq!(failure.code().as_str(), code);
}

#[test]
fn metrics_codes_are_stable() {
    let error = MetricsError::EmptyGraph {
        analyzer: "degree",
    };
    assert_eq!(error.code(), MetricsErrorCode::EmptyGraph);
    assert_eq!(error.to_string(), "degree cannot analyze an empty graph");
}

#[rstest]
#[case(ExperimentError::PopulationUnavailable, ExperimentErrorCode::PopulationUnavailable)]
#[case(ExperimentError::DeadlineExceeded, ExperimentErrorCode::DeadlineExceeded)]
#[case(ExperimentError::JobLost, ExperimentErrorCode::JobLost)]
#[case(
    ExperimentError::AnalyzerLost { metric: "betweenness" },
    ExperimentErrorCode::AnalyzerLost
)]
#[case(
    ExperimentError::from(SamplingError::InvalidAlpha { got: 2.0 }),
    ExperimentErrorCode::SamplingFailure
)]
#[case(
    ExperimentError::from(MetricsError::UnknownMetric { name: "x".to_owned() }),
    ExperimentErrorCode::MetricsFailure
)]
#[case(
    ExperimentError::from(StatsError::DimensionMismatch { left: 0, right: 1 }),
    ExperimentErrorCode::StatsFailure
)]
#[case(
    ExperimentError::from(std::io::Error::other("disk full")),
    ExperimentErrorCode::Io
)]
#[case(
    ExperimentError::from(csv::Error::from(std::io::Error::other("disk full"))),
    ExperimentErrorCode::Csv
)]
fn experiment_codes_are_stable(
    #[case] error: ExperimentError,
    #[case] expected: ExperimentErrorCode,
) {
    assert_eq!(error.code(), expected);
    assert!(error.code().as_str().starts_with("EXPERIMENT_"));
}
