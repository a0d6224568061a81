use thiserror::Error;

use sampleval_core::{GraphError, VertexId};

#[derive(Debug, Error)]
pub enum EdgeListError {
    #[error("line {line}: `{token}` is not a vertex identifier")]
    InvalidVertex { line: usize, token: String },
    #[error("line {line}: `{token}` is not a number")]
    InvalidValue { line: usize, token: String },
    #[error("line {line}: expected {expected} fields but found {found}")]
    FieldCount {
        line: usize,
        expected: &'static str,
        found: usize,
    },
    #[error("line {line}: vertex {vertex} already has a value")]
    DuplicateVertex { line: usize, vertex: VertexId },
    #[error("input contains no edges")]
    EmptyInput,
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
