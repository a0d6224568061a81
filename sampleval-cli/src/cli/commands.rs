//! Command implementations and argument parsing for the sampleval CLI.

use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sampleval_core::{
    AchievedStats, BfsConfig, DEFAULT_ALPHA, DEFAULT_BACKWARD_BURN_MULTIPLIER,
    DEFAULT_FORWARD_BURN_PROBABILITY, DEFAULT_TOP_K_FRACTION, EdgeType, ExperimentBuilder,
    ExperimentError, ExperimentReport, ForestFireConfig, Graph, MetricKind, MetricMap,
    MetricsError, PoolTiers, Sampler, SamplerParams, SamplingError, SamplingPolicy, WalkConfig,
};
use sampleval_providers_edgelist::{
    EdgeListError, read_edge_list_path, write_edge_list, write_metric_map,
};
use sampleval_providers_synthetic::{GraphModel, SyntheticError};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_REPLICAS: usize = 3;
const DEFAULT_TIMEOUT_SECS: u64 = 600;
const DEFAULT_MIXTURE_RATIOS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "sampleval",
    about = "Measure how well graph samples preserve vertex metrics."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Sweep mixture ratios and report how each sample's metrics compare.
    Run(RunCommand),
    /// Draw one sample and print it as an edge list.
    Sample(SampleCommand),
    /// Compute one metric over a whole graph and print the metric map.
    Analyze(AnalyzeCommand),
}

/// Sampler selection shared by `run` and `sample`.
#[derive(Debug, Args, Clone)]
pub struct SamplingArgs {
    /// Sampling policy.
    #[arg(long, value_enum, default_value_t = PolicyName::Bfs)]
    pub policy: PolicyName,

    /// Neighbour cap per expansion for `bounded-bfs`.
    #[arg(long)]
    pub max_degree: Option<usize>,

    /// Walk restarts before a spread counts as failed.
    #[arg(long)]
    pub rerun_max: Option<usize>,

    /// Forward burn probability for `forest-fire`.
    #[arg(long, default_value_t = DEFAULT_FORWARD_BURN_PROBABILITY)]
    pub forward_burn_probability: f64,

    /// Backward burn multiplier for `forest-fire`.
    #[arg(long, default_value_t = DEFAULT_BACKWARD_BURN_MULTIPLIER)]
    pub backward_burn_multiplier: f64,

    /// Fraction of the graph's vertices each sample covers.
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    pub alpha: f64,

    /// Seed for the sampler's random streams.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Edge semantics for the sample (defaults to the graph's own).
    #[arg(long, value_enum)]
    pub edge_type: Option<EdgeTypeArg>,
}

/// Named sampling policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyName {
    /// Uniform random vertices.
    RandomNode,
    /// Breadth-first expansion over whole neighbourhoods.
    Bfs,
    /// Breadth-first expansion with a neighbour cap.
    BoundedBfs,
    /// Uniform random walk.
    RandomWalk,
    /// Metropolis–Hastings random walk.
    MetropolisHastings,
    /// Forest-fire burning.
    ForestFire,
}

/// Edge semantics accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EdgeTypeArg {
    /// Follow edges from source to target only.
    Directed,
    /// Follow edges both ways.
    Undirected,
}

impl From<EdgeTypeArg> for EdgeType {
    fn from(value: EdgeTypeArg) -> Self {
        match value {
            EdgeTypeArg::Directed => Self::Directed,
            EdgeTypeArg::Undirected => Self::Undirected,
        }
    }
}

impl SamplingArgs {
    fn policy(&self) -> Result<SamplingPolicy, CliError> {
        let policy = match self.policy {
            PolicyName::RandomNode => SamplingPolicy::RandomNode,
            PolicyName::Bfs => SamplingPolicy::Bfs(BfsConfig::full_frontier()),
            PolicyName::BoundedBfs => SamplingPolicy::Bfs(match self.max_degree {
                Some(max_degree) => BfsConfig::bounded().with_max_degree(max_degree)?,
                None => BfsConfig::bounded(),
            }),
            PolicyName::RandomWalk => SamplingPolicy::RandomWalk(self.walk(WalkConfig::uniform())?),
            PolicyName::MetropolisHastings => {
                SamplingPolicy::RandomWalk(self.walk(WalkConfig::metropolis_hastings())?)
            }
            PolicyName::ForestFire => SamplingPolicy::ForestFire(ForestFireConfig::new(
                self.forward_burn_probability,
                self.backward_burn_multiplier,
            )?),
        };
        Ok(policy)
    }

    fn walk(&self, config: WalkConfig) -> Result<WalkConfig, SamplingError> {
        match self.rerun_max {
            Some(rerun_max) => config.with_rerun_max(rerun_max),
            None => Ok(config),
        }
    }
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Sampler selection.
    #[command(flatten)]
    pub sampling: SamplingArgs,

    /// Comma-separated mixture ratios to sweep.
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_MIXTURE_RATIOS)]
    pub mixture_ratios: Vec<f64>,

    /// Samples drawn per mixture ratio.
    #[arg(long, default_value_t = DEFAULT_REPLICAS)]
    pub replicas: usize,

    /// Comma-separated metrics to compare (defaults to all).
    #[arg(long, value_delimiter = ',')]
    pub metrics: Vec<MetricKind>,

    /// Share of vertices in each top-K set.
    #[arg(long, default_value_t = DEFAULT_TOP_K_FRACTION)]
    pub top_k_fraction: f64,

    /// Seconds each mixture-ratio batch may take.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Threads per worker pool (defaults to tiers sized from the host).
    #[arg(long)]
    pub threads: Option<NonZeroUsize>,

    /// Graph to sample.
    #[command(subcommand)]
    pub source: GraphSource,
}

/// Options accepted by the `sample` command.
#[derive(Debug, Args, Clone)]
pub struct SampleCommand {
    /// Sampler selection.
    #[command(flatten)]
    pub sampling: SamplingArgs,

    /// Probability of taking a spread move instead of a jump.
    #[arg(long, default_value_t = 0.5)]
    pub mixture_ratio: f64,

    /// Graph to sample.
    #[command(subcommand)]
    pub source: GraphSource,
}

/// Options accepted by the `analyze` command.
#[derive(Debug, Args, Clone)]
pub struct AnalyzeCommand {
    /// Metric to compute.
    #[arg(long)]
    pub metric: MetricKind,

    /// Graph to analyse.
    #[command(subcommand)]
    pub source: GraphSource,
}

/// Graph inputs.
#[derive(Debug, Subcommand, Clone)]
pub enum GraphSource {
    /// Read a whitespace-separated edge list.
    EdgeList(EdgeListArgs),
    /// Generate a seeded random graph.
    Synthetic(SyntheticArgs),
}

/// Edge-list ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct EdgeListArgs {
    /// Path to the edge-list file.
    pub path: PathBuf,

    /// Treat each line as a directed edge.
    #[arg(long)]
    pub directed: bool,
}

/// Synthetic graph arguments.
#[derive(Debug, Args, Clone)]
pub struct SyntheticArgs {
    /// Random graph model.
    #[arg(long, value_enum)]
    pub model: ModelName,

    /// Vertex count.
    #[arg(long)]
    pub nodes: usize,

    /// Edges per arriving vertex (Barabási–Albert) or edge probability
    /// (Erdős–Rényi).
    #[arg(long)]
    pub param: f64,

    /// Generator seed.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

/// Supported random graph models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelName {
    /// Preferential attachment.
    BarabasiAlbert,
    /// Independent edges.
    ErdosRenyi,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// An argument combination cannot be mapped onto a model or sampler.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Flag that triggered the failure.
        name: &'static str,
        /// Explanation of the constraint.
        reason: String,
    },
    /// Edge-list ingestion or rendering failed.
    #[error(transparent)]
    EdgeList(#[from] EdgeListError),
    /// Graph generation failed.
    #[error(transparent)]
    Synthetic(#[from] SyntheticError),
    /// Sampler configuration or execution failed.
    #[error(transparent)]
    Sampling(#[from] SamplingError),
    /// Metric computation failed.
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    /// Experiment configuration or execution failed.
    #[error(transparent)]
    Experiment(#[from] ExperimentError),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    /// Stable code of the underlying core error, when there is one.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Sampling(err) => Some(err.code().as_str()),
            Self::Metrics(err) => Some(err.code().as_str()),
            Self::Experiment(err) => Some(err.code().as_str()),
            _ => None,
        }
    }
}

/// Result of one CLI command.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    /// Comparison rows from `run`.
    Report(ExperimentReport),
    /// One drawn sample from `sample`.
    Sample {
        /// Policy label.
        policy: &'static str,
        /// Coverage and move mix the sampler reached.
        achieved: AchievedStats,
        /// The sampled graph.
        graph: Graph,
    },
    /// Per-vertex values from `analyze`.
    Metric {
        /// Metric computed.
        kind: MetricKind,
        /// Value per vertex.
        values: MetricMap,
    },
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the graph, configuring the sampler or
/// running the command fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use sampleval_cli::cli::{Cli, CommandOutput, run_cli};
/// # use clap::Parser;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli::try_parse_from([
///     "sampleval", "sample", "--alpha", "0.5",
///     "synthetic", "--model", "erdos-renyi", "--nodes", "20", "--param", "0.3",
/// ])?;
/// let CommandOutput::Sample { graph, .. } = run_cli(cli)? else {
///     unreachable!("sample always yields a sample");
/// };
/// assert_eq!(graph.vertex_count(), 10);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<CommandOutput, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Run(run) => {
            span.record("command", field::display("run"));
            run_experiment(run)
        }
        Command::Sample(sample) => {
            span.record("command", field::display("sample"));
            run_sample(sample)
        }
        Command::Analyze(analyze) => {
            span.record("command", field::display("analyze"));
            run_analyze(analyze)
        }
    }
}

#[instrument(
    name = "cli.experiment",
    err,
    skip(command),
    fields(
        policy = field::Empty,
        ratios = command.mixture_ratios.len(),
        replicas = command.replicas
    ),
)]
pub(super) fn run_experiment(command: RunCommand) -> Result<CommandOutput, CliError> {
    let policy = command.sampling.policy()?;
    Span::current().record("policy", field::display(policy.name()));

    let metrics = if command.metrics.is_empty() {
        MetricKind::ALL.to_vec()
    } else {
        command.metrics
    };
    let mut builder = ExperimentBuilder::new()
        .with_policy(policy)
        .with_alpha(command.sampling.alpha)
        .with_mixture_ratios(command.mixture_ratios)
        .with_replicas(command.replicas)
        .with_metrics(metrics)
        .with_seed(command.sampling.seed)
        .with_top_k_fraction(command.top_k_fraction)
        .with_batch_timeout(Duration::from_secs(command.timeout_secs));
    if let Some(threads) = command.threads {
        builder = builder.with_pool_tiers(PoolTiers::uniform(threads));
    }
    if let Some(edge_type) = command.sampling.edge_type {
        builder = builder.with_edge_type(edge_type.into());
    }
    let experiment = builder.build()?;

    let graph = load_graph(command.source)?;
    let report = experiment.run(Arc::new(graph))?;
    info!(
        rows = report.rows().len(),
        failures = report.failures().count(),
        "experiment command completed"
    );
    Ok(CommandOutput::Report(report))
}

#[instrument(
    name = "cli.sample",
    err,
    skip(command),
    fields(
        policy = field::Empty,
        alpha = command.sampling.alpha,
        mixture_ratio = command.mixture_ratio
    ),
)]
pub(super) fn run_sample(command: SampleCommand) -> Result<CommandOutput, CliError> {
    let policy = command.sampling.policy()?;
    let policy_name = policy.name();
    Span::current().record("policy", field::display(policy_name));
    let params = SamplerParams::new(command.sampling.alpha, command.mixture_ratio)?
        .with_seed(command.sampling.seed);

    let graph = load_graph(command.source)?;
    let edge_type = command
        .sampling
        .edge_type
        .map_or(graph.edge_type(), EdgeType::from);
    let mut sampler = Sampler::new(policy, params.with_edge_type(edge_type));
    let achieved = sampler.sample_graph(&graph)?;
    let sample = sampler.into_graph();
    info!(
        vertices = sample.vertex_count(),
        edges = sample.edge_count(),
        "sample command completed"
    );
    Ok(CommandOutput::Sample {
        policy: policy_name,
        achieved,
        graph: sample,
    })
}

#[instrument(name = "cli.analyze", err, skip(command), fields(metric = %command.metric))]
pub(super) fn run_analyze(command: AnalyzeCommand) -> Result<CommandOutput, CliError> {
    let graph = load_graph(command.source)?;
    let values = command.metric.analyzer().analyze(&graph)?;
    info!(vertices = values.len(), "analyze command completed");
    Ok(CommandOutput::Metric {
        kind: command.metric,
        values,
    })
}

#[instrument(
    name = "cli.load_graph",
    err,
    skip(source),
    fields(source = field::Empty, path = field::Empty, model = field::Empty),
)]
pub(super) fn load_graph(source: GraphSource) -> Result<Graph, CliError> {
    let span = Span::current();
    let graph = match source {
        GraphSource::EdgeList(EdgeListArgs { path, directed }) => {
            span.record("source", field::display("edge-list"));
            span.record("path", field::display(path.display()));
            let edge_type = if directed {
                EdgeType::Directed
            } else {
                EdgeType::Undirected
            };
            read_edge_list_path(&path, edge_type)?
        }
        GraphSource::Synthetic(args) => {
            span.record("source", field::display("synthetic"));
            let model = synthetic_model(&args)?;
            span.record("model", field::debug(&model));
            model.generate(args.seed)?
        }
    };
    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );
    Ok(graph)
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "whole attachment counts are checked before conversion"
)]
pub(super) fn synthetic_model(args: &SyntheticArgs) -> Result<GraphModel, CliError> {
    match args.model {
        ModelName::BarabasiAlbert => {
            if !(args.param >= 1.0 && args.param.fract() == 0.0 && args.param <= 1e9) {
                return Err(CliError::InvalidArgument {
                    name: "param",
                    reason: format!(
                        "Barabási–Albert needs a whole number of edges per vertex (got {})",
                        args.param
                    ),
                });
            }
            Ok(GraphModel::BarabasiAlbert {
                nodes: args.nodes,
                edges_per_node: args.param as usize,
            })
        }
        ModelName::ErdosRenyi => Ok(GraphModel::ErdosRenyi {
            nodes: args.nodes,
            probability: args.param,
        }),
    }
}

/// Renders `output` to `writer`.
///
/// Reports become CSV, samples become an edge list preceded by a comment
/// carrying the achieved statistics, and metric maps become
/// `vertex<TAB>value` lines.
///
/// # Errors
/// Returns [`CliError`] if writing to the supplied writer fails.
pub fn render_output(output: &CommandOutput, mut writer: impl Write) -> Result<(), CliError> {
    match output {
        CommandOutput::Report(report) => report.write_csv(writer)?,
        CommandOutput::Sample {
            policy,
            achieved,
            graph,
        } => {
            writeln!(
                writer,
                "# policy={policy} achieved_alpha={} achieved_mixture_ratio={}",
                achieved.achieved_alpha, achieved.achieved_mixture_ratio
            )?;
            write_edge_list(graph, writer)?;
        }
        CommandOutput::Metric { kind, values } => {
            writeln!(writer, "# metric={kind}")?;
            write_metric_map(values, writer)?;
        }
    }
    Ok(())
}
