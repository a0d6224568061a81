//! Experiment results and their CSV rendering.

use std::io::Write;

use crate::{
    error::ExperimentError,
    metrics::MetricKind,
    sampling::AchievedStats,
    stats::MetricComparison,
};

/// Leading report columns, followed by [`MetricComparison::COLUMN_NAMES`]
/// and a final `status` column.
pub const REPORT_KEY_COLUMNS: [&str; 5] = [
    "metric",
    "mixture_ratio",
    "replica",
    "achieved_alpha",
    "achieved_mixture_ratio",
];

/// Why a job produced no comparison for a metric.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobFailure {
    /// The batch deadline passed first.
    TimedOut,
    /// The job failed with a typed error.
    Failed {
        /// Stable code of the underlying [`ExperimentError`].
        code: &'static str,
        /// Rendered error message.
        message: String,
    },
}

impl JobFailure {
    /// Status column value.
    #[must_use]
    pub fn status(&self) -> String {
        match self {
            Self::TimedOut => "timed_out".to_owned(),
            Self::Failed { code, .. } => format!("failed:{code}"),
        }
    }
}

impl From<&ExperimentError> for JobFailure {
    fn from(err: &ExperimentError) -> Self {
        match err {
            ExperimentError::DeadlineExceeded => Self::TimedOut,
            other => Self::Failed {
                code: other.code().as_str(),
                message: other.to_string(),
            },
        }
    }
}

/// One (metric, mixture ratio, replica) result.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportRow {
    /// Metric compared.
    pub metric: MetricKind,
    /// Requested mixture ratio of the batch.
    pub mixture_ratio: f64,
    /// Replica index within the batch.
    pub replica: usize,
    /// Sampler statistics, absent when sampling never finished.
    pub achieved: Option<AchievedStats>,
    /// The comparison, or why it is missing.
    pub outcome: Result<MetricComparison, JobFailure>,
}

/// Every row produced by one experiment run.
#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentReport {
    policy: &'static str,
    rows: Vec<ReportRow>,
}

impl ExperimentReport {
    pub(super) fn new(policy: &'static str, rows: Vec<ReportRow>) -> Self {
        Self { policy, rows }
    }

    /// Name of the sampling policy used.
    #[must_use]
    pub fn policy(&self) -> &'static str {
        self.policy
    }

    /// Rows ordered by metric, mixture ratio and replica.
    #[must_use]
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Rows without a comparison.
    pub fn failures(&self) -> impl Iterator<Item = &ReportRow> + '_ {
        self.rows.iter().filter(|row| row.outcome.is_err())
    }

    /// Writes the report as CSV with a header line.
    ///
    /// # Errors
    /// Returns [`ExperimentError::Csv`] when encoding or writing a record
    /// fails, and [`ExperimentError::Io`] when the final flush fails.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ExperimentError> {
        let mut encoder = csv::Writer::from_writer(writer);
        encoder.write_record(
            REPORT_KEY_COLUMNS
                .iter()
                .chain(MetricComparison::COLUMN_NAMES.iter())
                .chain(&["status"]),
        )?;
        for row in &self.rows {
            encoder.write_record(row.fields())?;
        }
        encoder.flush()?;
        Ok(())
    }
}

impl ReportRow {
    /// Field values in report column order.
    fn fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.metric.name().to_owned(),
            self.mixture_ratio.to_string(),
            self.replica.to_string(),
        ];
        match self.achieved {
            Some(stats) => fields.extend([
                stats.achieved_alpha.to_string(),
                stats.achieved_mixture_ratio.to_string(),
            ]),
            None => fields.extend([String::new(), String::new()]),
        }
        match &self.outcome {
            Ok(comparison) => {
                fields.push(comparison.vertices.to_string());
                fields.extend(
                    comparison
                        .values()
                        .iter()
                        .skip(1)
                        .map(ToString::to_string),
                );
                fields.push("ok".to_owned());
            }
            Err(failure) => {
                fields.extend(MetricComparison::COLUMN_NAMES.iter().map(|_| String::new()));
                fields.push(failure.status());
            }
        }
        fields
    }
}
