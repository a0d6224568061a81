//! Command-line interface for sampling experiments.
//!
//! `run` sweeps mixture ratios and prints a CSV comparison report, `sample`
//! prints one sample as an edge list and `analyze` prints a metric map.
//! Every command reads an edge-list file or generates a synthetic graph.

mod commands;

pub use commands::{
    AnalyzeCommand, Cli, CliError, Command, CommandOutput, EdgeListArgs, EdgeTypeArg,
    GraphSource, ModelName, PolicyName, RunCommand, SampleCommand, SamplingArgs, SyntheticArgs,
    render_output, run_cli,
};

#[cfg(test)]
mod test_helpers;
