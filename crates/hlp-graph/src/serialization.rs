use std::collections::HashMap;
use std::fs;
use std::path::Path;

use hlp_core::{ErrorKind, HlpError, Label, VertexId};
use serde_json::Value;

use crate::hypergraph::Hypergraph;
use crate::ids::make_vertex;

/// Magic number of the binary hypergraph format: "HGR1" when read as
/// little-endian bytes.
pub const HGR_MAGIC: u32 = 0x3152_4748;

/// Version of the binary hypergraph format.
pub const HGR_VERSION: u32 = 1;

/// Serializes the graph into the binary `HGR1` format.
///
/// Layout (all integers little-endian): `u32` magic, `u32` version, `u64` N,
/// `u64` M, then per edge a `u64` size followed by that many `u64` vertex
/// ids, then a `u8` labels flag (always 1) and N `i32` labels.
pub fn graph_to_bytes(graph: &Hypergraph) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&HGR_MAGIC.to_le_bytes());
    bytes.extend_from_slice(&HGR_VERSION.to_le_bytes());
    bytes.extend_from_slice(&(graph.num_vertices() as u64).to_le_bytes());
    bytes.extend_from_slice(&(graph.num_edges() as u64).to_le_bytes());

    for vertices in graph.hyperedges() {
        bytes.extend_from_slice(&(vertices.len() as u64).to_le_bytes());
        for vertex in vertices {
            bytes.extend_from_slice(&u64::from(vertex.as_raw()).to_le_bytes());
        }
    }

    bytes.push(1u8);
    for label in graph.labels() {
        bytes.extend_from_slice(&label.to_le_bytes());
    }
    bytes
}

/// Restores a graph from the binary `HGR1` format.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<Hypergraph, HlpError> {
    let mut reader = ByteReader::new(bytes);

    let magic = reader.read_u32()?;
    let version = reader.read_u32()?;
    if magic != HGR_MAGIC || version != HGR_VERSION {
        return Err(
            HlpError::format("bad-magic-or-version", "invalid hypergraph file")
                .with_context("magic", format!("{magic:#010x}"))
                .with_context("version", version),
        );
    }

    let num_vertices = reader.read_u64()?;
    let num_edges = reader.read_u64()?;
    if num_vertices == 0 {
        return Err(HlpError::format(
            "bad-header",
            "invalid hypergraph file: zero vertices",
        ));
    }
    let num_vertices = checked_count("num_vertices", num_vertices)?;

    let mut graph = Hypergraph::new(num_vertices);
    for _ in 0..num_edges {
        let size = reader.read_u64()?;
        if size == 0 {
            return Err(HlpError::format(
                "bad-edge-size",
                "invalid hypergraph file: empty edge",
            ));
        }
        let mut vertices = Vec::with_capacity(size as usize);
        for _ in 0..size {
            let raw = reader.read_u64()?;
            let raw = u32::try_from(raw).map_err(|_| {
                HlpError::format("vertex-id-overflow", "vertex id exceeds 32-bit range")
                    .with_context("vertex", raw)
            })?;
            vertices.push(VertexId::from_raw(raw));
        }
        graph.add_hyperedge(&vertices)?;
    }

    // Labels block is optional on load; absent means all-zero labels.
    if let Ok(has_labels) = reader.read_u8() {
        if has_labels != 0 {
            let mut labels = Vec::with_capacity(num_vertices);
            for _ in 0..num_vertices {
                labels.push(reader.read_i32()?);
            }
            graph.set_labels(&labels)?;
        }
    }

    Ok(graph)
}

/// Restores a graph from one of the two accepted JSON schemas.
///
/// The HyperNetX-like schema is selected when the document carries
/// `"type": "hypergraph"`, `node-data`, or `edge-dict`; otherwise the dense
/// schema (`num_vertices` + `edges`) applies.
pub fn graph_from_json_str(json: &str) -> Result<Hypergraph, HlpError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|err| HlpError::format("json-parse", err.to_string()))?;
    let root = value.as_object().ok_or_else(|| {
        HlpError::format("json-root", "top-level JSON value must be an object")
    })?;

    let hypernetx = root.get("type").and_then(Value::as_str) == Some("hypergraph")
        || root.contains_key("node-data")
        || root.contains_key("edge-dict");

    if hypernetx {
        load_hypernetx(root)
    } else {
        load_dense(root)
    }
}

/// Writes the graph to `path` in the binary format.
pub fn save_graph(graph: &Hypergraph, path: &Path) -> Result<(), HlpError> {
    fs::write(path, graph_to_bytes(graph)).map_err(|err| {
        HlpError::io("file-write", err.to_string())
            .with_context("path", path.display().to_string())
    })
}

/// Loads a graph from `path`, auto-detecting the format: after leading
/// whitespace a `{` byte selects JSON, anything else selects binary.
pub fn load_graph(path: &Path) -> Result<Hypergraph, HlpError> {
    let bytes = fs::read(path).map_err(|err| {
        HlpError::io("file-read", err.to_string())
            .with_context("path", path.display().to_string())
    })?;

    let first = bytes.iter().find(|b| !b.is_ascii_whitespace());
    let result = if first == Some(&b'{') {
        tracing::debug!(path = %path.display(), "loading hypergraph from JSON");
        let text = std::str::from_utf8(&bytes)
            .map_err(|err| HlpError::format("json-utf8", err.to_string()))?;
        graph_from_json_str(text)
    } else {
        tracing::debug!(path = %path.display(), "loading hypergraph from binary");
        graph_from_bytes(&bytes)
    };
    result.map_err(|err| {
        if err.kind() == ErrorKind::Format {
            err.with_context("path", path.display().to_string())
        } else {
            err
        }
    })
}

fn load_dense(root: &serde_json::Map<String, Value>) -> Result<Hypergraph, HlpError> {
    let num_vertices = ["num_vertices", "vertices", "numVertices"]
        .iter()
        .find_map(|key| root.get(*key))
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            HlpError::format("json-num-vertices", "missing or invalid num_vertices")
        })?;
    if num_vertices == 0 {
        return Err(HlpError::format("json-num-vertices", "num_vertices must be > 0"));
    }
    let num_vertices = checked_count("num_vertices", num_vertices)?;

    let mut graph = Hypergraph::new(num_vertices);
    if let Some(edges) = root.get("edges").or_else(|| root.get("hyperedges")) {
        let edges = edges.as_array().ok_or_else(|| {
            HlpError::format("json-edges", "edges must be an array of arrays")
        })?;
        for edge in edges {
            let members = edge
                .as_array()
                .ok_or_else(|| HlpError::format("json-edges", "each edge must be an array"))?;
            if members.is_empty() {
                return Err(HlpError::format(
                    "json-empty-hyperedge",
                    "hyperedge cannot be empty",
                ));
            }
            let mut vertices = Vec::with_capacity(members.len());
            for member in members {
                let raw = member.as_u64().ok_or_else(|| {
                    HlpError::format("json-edge-entry", "edge entries must be unsigned integers")
                })?;
                let raw = u32::try_from(raw).map_err(|_| {
                    HlpError::format("vertex-id-overflow", "vertex id exceeds 32-bit range")
                        .with_context("vertex", raw)
                })?;
                vertices.push(VertexId::from_raw(raw));
            }
            graph.add_hyperedge(&vertices)?;
        }
    }

    if let Some(labels) = root.get("labels") {
        let labels = parse_labels(labels)?;
        if labels.len() != num_vertices {
            return Err(HlpError::format(
                "json-labels",
                "labels length must equal num_vertices",
            )
            .with_context("labels", labels.len())
            .with_context("num_vertices", num_vertices));
        }
        graph.set_labels(&labels)?;
    }
    Ok(graph)
}

fn load_hypernetx(root: &serde_json::Map<String, Value>) -> Result<Hypergraph, HlpError> {
    let mut idmap: HashMap<String, VertexId> = HashMap::new();
    let mut order = 0usize;
    let mut edges: Vec<Vec<VertexId>> = Vec::new();
    let mut labels: Option<Vec<Label>> = None;

    // Vertex ids are assigned in first-seen order, so the top-level keys must
    // be walked in document order (serde_json preserve_order).
    for (key, value) in root {
        match key.as_str() {
            "node-data" => {
                let nodes = value.as_object().ok_or_else(|| {
                    HlpError::format("json-node-data", "node-data must be an object")
                })?;
                for node in nodes.keys() {
                    ensure_id(&mut idmap, &mut order, node);
                }
            }
            "edge-dict" => {
                let dict = value.as_object().ok_or_else(|| {
                    HlpError::format("json-edge-dict", "edge-dict must be an object")
                })?;
                for members in dict.values() {
                    let members = members.as_array().ok_or_else(|| {
                        HlpError::format("json-edge-dict", "edge-dict values must be arrays")
                    })?;
                    if members.is_empty() {
                        return Err(HlpError::format(
                            "json-empty-hyperedge",
                            "hyperedge cannot be empty",
                        ));
                    }
                    let mut edge = Vec::with_capacity(members.len());
                    for member in members {
                        let node = member.as_str().ok_or_else(|| {
                            HlpError::format(
                                "json-edge-dict",
                                "edge-dict members must be node-id strings",
                            )
                        })?;
                        edge.push(ensure_id(&mut idmap, &mut order, node));
                    }
                    edges.push(edge);
                }
            }
            "labels" => labels = Some(parse_labels(value)?),
            _ => {} // type, hypergraph-data, and unknown metadata are ignored
        }
    }

    let num_vertices = idmap.len();
    if num_vertices == 0 {
        return Err(HlpError::format(
            "json-no-vertices",
            "no vertices found in node-data/edge-dict",
        ));
    }

    let mut graph = Hypergraph::new(num_vertices);
    for edge in &edges {
        graph.add_hyperedge(edge)?;
    }
    if let Some(labels) = labels {
        if labels.len() != num_vertices {
            return Err(HlpError::format(
                "json-labels",
                "labels length must equal number of vertices",
            )
            .with_context("labels", labels.len())
            .with_context("num_vertices", num_vertices));
        }
        graph.set_labels(&labels)?;
    }
    Ok(graph)
}

fn parse_labels(value: &Value) -> Result<Vec<Label>, HlpError> {
    let entries = value.as_array().ok_or_else(|| {
        HlpError::format("json-labels", "labels must be an array of integers")
    })?;
    let mut labels = Vec::with_capacity(entries.len());
    for entry in entries {
        let label = entry.as_i64().ok_or_else(|| {
            HlpError::format("json-labels", "labels must be an array of integers")
        })?;
        labels.push(label as Label);
    }
    Ok(labels)
}

fn ensure_id(idmap: &mut HashMap<String, VertexId>, order: &mut usize, node: &str) -> VertexId {
    if let Some(id) = idmap.get(node) {
        return *id;
    }
    let id = make_vertex(*order);
    *order += 1;
    idmap.insert(node.to_string(), id);
    id
}

fn checked_count(name: &str, value: u64) -> Result<usize, HlpError> {
    usize::try_from(value)
        .ok()
        .filter(|v| u32::try_from(*v).is_ok())
        .ok_or_else(|| {
            HlpError::format("count-overflow", "count exceeds supported range")
                .with_context(name, value)
        })
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], HlpError> {
        if self.pos + len > self.bytes.len() {
            return Err(
                HlpError::format("truncated", "invalid hypergraph file: truncated")
                    .with_context("offset", self.pos),
            );
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, HlpError> {
        Ok(self.take(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32, HlpError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes(bytes.try_into().expect("length checked")))
    }

    fn read_i32(&mut self) -> Result<i32, HlpError> {
        let bytes = self.take(4)?;
        Ok(i32::from_le_bytes(bytes.try_into().expect("length checked")))
    }

    fn read_u64(&mut self) -> Result<u64, HlpError> {
        let bytes = self.take(8)?;
        Ok(u64::from_le_bytes(bytes.try_into().expect("length checked")))
    }
}
