//! Line-based UTF-8 files for graphs and cached metric maps.
//!
//! Edge lists hold one `source target` pair per line, separated by
//! whitespace. A line with a single identifier declares an isolated vertex.
//! Metric maps hold one `vertex<TAB>value` pair per line. Both formats skip
//! blank lines and `#` comments.

mod errors;
mod graph;
mod metric_map;

pub use errors::EdgeListError;
pub use graph::{read_edge_list, read_edge_list_path, write_edge_list, write_edge_list_path};
pub use metric_map::{
    read_metric_map, read_metric_map_path, write_metric_map, write_metric_map_path,
};

/// Yields `(line_number, content)` for every line carrying data.
fn data_lines<R: std::io::BufRead>(
    reader: R,
) -> impl Iterator<Item = Result<(usize, String), EdgeListError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(index, line)| match line {
            Err(err) => Some(Err(EdgeListError::Io(err))),
            Ok(line) => {
                let content = line.split('#').next().unwrap_or_default().trim().to_owned();
                (!content.is_empty()).then_some(Ok((index + 1, content)))
            }
        })
}
