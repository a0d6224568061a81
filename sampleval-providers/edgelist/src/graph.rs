//! Edge-list import and export.
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use sampleval_core::{Edge, EdgeInsertion, EdgeType, Graph, VertexId};
use tracing::debug;

use crate::{data_lines, errors::EdgeListError};

/// Reads a graph from edge-list lines.
///
/// Edge identifiers follow line order. In an undirected graph a line
/// repeating an existing pair in reverse is skipped.
///
/// # Errors
/// Returns [`EdgeListError::InvalidVertex`] or [`EdgeListError::FieldCount`]
/// for malformed lines, [`EdgeListError::EmptyInput`] when no edge is
/// present and [`EdgeListError::Io`] when reading fails.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use sampleval_core::{EdgeType, VertexId};
/// use sampleval_providers_edgelist::read_edge_list;
///
/// let graph = read_edge_list(Cursor::new("0 1\n# comment\n1 2\n"), EdgeType::Directed)
///     .expect("edge list must parse");
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.successors(VertexId::new(1)), vec![VertexId::new(2)]);
/// ```
pub fn read_edge_list<R: BufRead>(reader: R, edge_type: EdgeType) -> Result<Graph, EdgeListError> {
    let mut graph = Graph::new(edge_type);
    for entry in data_lines(reader) {
        let (line, content) = entry?;
        let ids = content
            .split_whitespace()
            .map(|token| parse_vertex(line, token))
            .collect::<Result<Vec<_>, _>>()?;
        match ids.as_slice() {
            [vertex] => {
                graph.add_vertex(*vertex);
            }
            [source, target] => {
                graph.add_vertex(*source);
                graph.add_vertex(*target);
                let edge = Edge::new(graph.next_edge_id(), *source, *target);
                if graph.insert_edge(edge)? == EdgeInsertion::ReversePairPresent {
                    debug!(line, %source, %target, "skipping reversed undirected pair");
                }
            }
            other => {
                return Err(EdgeListError::FieldCount {
                    line,
                    expected: "one or two",
                    found: other.len(),
                });
            }
        }
    }
    if graph.edge_count() == 0 {
        return Err(EdgeListError::EmptyInput);
    }
    Ok(graph)
}

/// Reads an edge-list file.
///
/// # Errors
/// See [`read_edge_list`].
pub fn read_edge_list_path(
    path: impl AsRef<Path>,
    edge_type: EdgeType,
) -> Result<Graph, EdgeListError> {
    read_edge_list(BufReader::new(File::open(path)?), edge_type)
}

/// Writes `graph` as edge-list lines in edge-id order, followed by one line
/// per isolated vertex.
///
/// # Errors
/// Returns [`EdgeListError::Io`] when writing fails.
pub fn write_edge_list<W: Write>(graph: &Graph, mut writer: W) -> Result<(), EdgeListError> {
    let kind = if graph.is_directed() {
        "directed"
    } else {
        "undirected"
    };
    writeln!(
        writer,
        "# {kind} graph: {} vertices, {} edges",
        graph.vertex_count(),
        graph.edge_count()
    )?;
    for edge in graph.edges() {
        writeln!(writer, "{} {}", edge.source(), edge.target())?;
    }
    for vertex in graph.vertices() {
        if graph.neighbors(vertex).is_empty() {
            writeln!(writer, "{vertex}")?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Writes `graph` to an edge-list file, replacing any existing content.
///
/// # Errors
/// See [`write_edge_list`].
pub fn write_edge_list_path(graph: &Graph, path: impl AsRef<Path>) -> Result<(), EdgeListError> {
    write_edge_list(graph, BufWriter::new(File::create(path)?))
}

fn parse_vertex(line: usize, token: &str) -> Result<VertexId, EdgeListError> {
    token
        .parse::<u64>()
        .map(VertexId::new)
        .map_err(|_| EdgeListError::InvalidVertex {
            line,
            token: token.to_owned(),
        })
}
