//! Small helpers shared across CLI tests.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;

use super::{Cli, CliError, CommandOutput, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// A 12-vertex ring with two chords.
pub(super) fn ring_edge_list() -> String {
    let mut contents = String::from("# ring\n");
    for vertex in 0..12 {
        contents.push_str(&format!("{vertex} {}\n", (vertex + 1) % 12));
    }
    contents.push_str("0 6\n3 9\n");
    contents
}

pub(super) fn parse(args: &[&str]) -> Cli {
    match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => panic!("arguments must parse: {err}"),
    }
}

pub(super) fn run_args(args: &[&str]) -> Result<CommandOutput, CliError> {
    run_cli(parse(args))
}

pub(super) fn run_cli_expecting_error(args: &[&str], panic_msg: &str) -> CliError {
    match run_args(args) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn render(output: &CommandOutput) -> String {
    let mut buffer = Vec::new();
    if let Err(err) = super::render_output(output, &mut buffer) {
        panic!("rendering to memory must succeed: {err}");
    }
    match String::from_utf8(buffer) {
        Ok(text) => text,
        Err(err) => panic!("output must be UTF-8: {err}"),
    }
}
