//! Tests for edge-list and metric-map files.

use std::io::{self, BufRead, Cursor, Read};

use rstest::rstest;
use sampleval_core::{EdgeType, Graph, MetricMap, VertexId};
use sampleval_providers_edgelist::{
    EdgeListError, read_edge_list, read_edge_list_path, read_metric_map, read_metric_map_path,
    write_edge_list, write_edge_list_path, write_metric_map, write_metric_map_path,
};

fn v(id: u64) -> VertexId {
    VertexId::new(id)
}

fn render(graph: &Graph) -> String {
    let mut buffer = Vec::new();
    write_edge_list(graph, &mut buffer).expect("writing to memory must succeed");
    String::from_utf8(buffer).expect("edge lists are UTF-8")
}

#[test]
fn reads_edges_comments_and_isolated_vertices() {
    let input = "# header\n0 1\n\n1\t2  # trailing comment\n7\n";
    let graph = read_edge_list(Cursor::new(input), EdgeType::Directed).expect("valid input");
    assert_eq!(graph.vertex_count(), 4);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.successors(v(1)), vec![v(2)]);
    assert!(graph.contains_vertex(v(7)));
    assert!(graph.neighbors(v(7)).is_empty());
}

#[test]
fn undirected_input_skips_reversed_pairs() {
    let graph = read_edge_list(Cursor::new("0 1\n1 0\n0 1\n"), EdgeType::Undirected)
        .expect("valid input");
    // The exact repeat is a parallel edge; the reversal is dropped.
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.edges_between(v(0), v(1)).len(), 2);
}

#[rstest]
#[case("0 x\n", 1, "x")]
#[case("0 1\n-3 2\n", 2, "-3")]
fn invalid_identifiers_report_their_line(
    #[case] input: &str,
    #[case] line: usize,
    #[case] token: &str,
) {
    let err = read_edge_list(Cursor::new(input), EdgeType::Directed).expect_err("invalid id");
    match err {
        EdgeListError::InvalidVertex {
            line: got_line,
            token: got_token,
        } => {
            assert_eq!(got_line, line);
            assert_eq!(got_token, token);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn extra_fields_are_rejected() {
    let err = read_edge_list(Cursor::new("0 1 2\n"), EdgeType::Directed).expect_err("three ids");
    assert!(matches!(
        err,
        EdgeListError::FieldCount {
            line: 1,
            found: 3,
            ..
        }
    ));
}

#[rstest]
#[case("")]
#[case("# only a comment\n")]
#[case("4\n5\n")]
fn inputs_without_edges_are_empty(#[case] input: &str) {
    let err = read_edge_list(Cursor::new(input), EdgeType::Undirected).expect_err("no edges");
    assert!(matches!(err, EdgeListError::EmptyInput));
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("boom"))
    }
}

impl BufRead for FailingReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Err(io::Error::other("boom"))
    }

    fn consume(&mut self, _amt: usize) {}
}

#[test]
fn read_errors_propagate() {
    let err = read_edge_list(FailingReader, EdgeType::Directed).expect_err("reader fails");
    assert!(matches!(err, EdgeListError::Io(_)));
    let err = read_metric_map(FailingReader).expect_err("reader fails");
    assert!(matches!(err, EdgeListError::Io(_)));
}

#[test]
fn writer_emits_header_edges_and_isolated_vertices() {
    let mut graph = Graph::new(EdgeType::Undirected);
    graph.connect(v(2), v(0));
    graph.connect(v(0), v(1));
    graph.add_vertex(v(9));
    assert_eq!(
        render(&graph),
        "# undirected graph: 4 vertices, 2 edges\n2 0\n0 1\n9\n"
    );
}

#[rstest]
#[case(EdgeType::Directed)]
#[case(EdgeType::Undirected)]
fn written_graphs_read_back_identically(#[case] edge_type: EdgeType) {
    let mut graph = Graph::new(edge_type);
    for (source, target) in [(0, 1), (1, 2), (2, 0), (3, 3), (1, 2)] {
        graph.connect(v(source), v(target));
    }
    graph.add_vertex(v(11));

    let restored =
        read_edge_list(Cursor::new(render(&graph)), edge_type).expect("written output parses");
    assert_eq!(restored.vertices().collect::<Vec<_>>(), graph.vertices().collect::<Vec<_>>());
    assert_eq!(
        restored.edges().copied().collect::<Vec<_>>(),
        graph.edges().copied().collect::<Vec<_>>()
    );
}

#[test]
fn path_helpers_round_trip_through_files() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("graph.txt");
    let mut graph = Graph::new(EdgeType::Directed);
    graph.connect(v(5), v(6));
    write_edge_list_path(&graph, &path).expect("write file");
    let restored = read_edge_list_path(&path, EdgeType::Directed).expect("read file");
    assert_eq!(restored.edge_count(), 1);
    assert_eq!(restored.successors(v(5)), vec![v(6)]);

    let missing = read_edge_list_path(dir.path().join("absent.txt"), EdgeType::Directed);
    assert!(matches!(missing, Err(EdgeListError::Io(_))));
}

#[test]
fn metric_maps_round_trip_with_special_values() {
    let map: MetricMap = [(v(3), 0.1), (v(1), f64::INFINITY), (v(2), -2.5), (v(8), f64::NAN)]
        .into_iter()
        .collect();
    let mut buffer = Vec::new();
    write_metric_map(&map, &mut buffer).expect("write to memory");
    assert_eq!(
        String::from_utf8(buffer.clone()).expect("UTF-8"),
        "1\tinf\n2\t-2.5\n3\t0.1\n8\tNaN\n"
    );

    let restored = read_metric_map(Cursor::new(buffer)).expect("written output parses");
    assert_eq!(restored.len(), 4);
    assert_eq!(restored[&v(3)], 0.1);
    assert_eq!(restored[&v(1)], f64::INFINITY);
    assert!(restored[&v(8)].is_nan());
}

#[rstest]
#[case("1\t2\t3\n")]
#[case("1 2.0\n")]
fn metric_lines_need_one_tab(#[case] input: &str) {
    let err = read_metric_map(Cursor::new(input)).expect_err("malformed line");
    assert!(matches!(err, EdgeListError::FieldCount { line: 1, .. }));
}

#[test]
fn metric_values_must_be_numbers() {
    let err = read_metric_map(Cursor::new("0\t1.0\n1\thigh\n")).expect_err("bad value");
    assert!(matches!(
        err,
        EdgeListError::InvalidValue { line: 2, ref token } if token == "high"
    ));
}

#[test]
fn duplicate_metric_vertices_are_rejected() {
    let err = read_metric_map(Cursor::new("4\t1\n4\t2\n")).expect_err("vertex repeats");
    assert!(matches!(
        err,
        EdgeListError::DuplicateVertex { line: 2, vertex } if vertex == v(4)
    ));
}

#[test]
fn metric_map_files_round_trip() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("degree.tsv");
    let map: MetricMap = [(v(0), 2.0), (v(1), 1.0)].into_iter().collect();
    write_metric_map_path(&map, &path).expect("write file");
    assert_eq!(read_metric_map_path(&path).expect("read file"), map);
}
