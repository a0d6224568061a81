//! Cached metric maps.
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use sampleval_core::{MetricMap, VertexId};

use crate::{data_lines, errors::EdgeListError};

/// Reads `vertex<TAB>value` lines into a [`MetricMap`].
///
/// Values accept anything [`f64`]'s parser does, including `NaN` and `inf`.
///
/// # Errors
/// Returns [`EdgeListError::FieldCount`], [`EdgeListError::InvalidVertex`]
/// or [`EdgeListError::InvalidValue`] for malformed lines,
/// [`EdgeListError::DuplicateVertex`] when a vertex repeats and
/// [`EdgeListError::Io`] when reading fails.
pub fn read_metric_map<R: BufRead>(reader: R) -> Result<MetricMap, EdgeListError> {
    let mut map = MetricMap::new();
    for entry in data_lines(reader) {
        let (line, content) = entry?;
        let fields: Vec<&str> = content.split('\t').map(str::trim).collect();
        let [vertex, value] = fields.as_slice() else {
            return Err(EdgeListError::FieldCount {
                line,
                expected: "two",
                found: fields.len(),
            });
        };
        let vertex = vertex
            .parse::<u64>()
            .map(VertexId::new)
            .map_err(|_| EdgeListError::InvalidVertex {
                line,
                token: (*vertex).to_owned(),
            })?;
        let value = value
            .parse::<f64>()
            .map_err(|_| EdgeListError::InvalidValue {
                line,
                token: (*value).to_owned(),
            })?;
        if map.insert(vertex, value).is_some() {
            return Err(EdgeListError::DuplicateVertex { line, vertex });
        }
    }
    Ok(map)
}

/// Reads a metric-map file.
///
/// # Errors
/// See [`read_metric_map`].
pub fn read_metric_map_path(path: impl AsRef<Path>) -> Result<MetricMap, EdgeListError> {
    read_metric_map(BufReader::new(File::open(path)?))
}

/// Writes `map` as `vertex<TAB>value` lines in vertex order.
///
/// Values use the shortest representation that parses back to the same
/// [`f64`].
///
/// # Errors
/// Returns [`EdgeListError::Io`] when writing fails.
pub fn write_metric_map<W: Write>(map: &MetricMap, mut writer: W) -> Result<(), EdgeListError> {
    for (vertex, value) in map {
        writeln!(writer, "{vertex}\t{value}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `map` to a file, replacing any existing content.
///
/// # Errors
/// See [`write_metric_map`].
pub fn write_metric_map_path(map: &MetricMap, path: impl AsRef<Path>) -> Result<(), EdgeListError> {
    write_metric_map(map, BufWriter::new(File::create(path)?))
}
