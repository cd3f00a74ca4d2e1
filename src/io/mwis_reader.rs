use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::Path,
};

use fxhash::FxHashSet;

use super::{MAX_NODES, Result, capped_capacity};
use crate::{
    exact::mwis::Weight,
    graph::{Edge, EdgeOps, GraphEdgeEditing, GraphNew, Node, NumEdges, NumNodes},
};

/// Reads a vertex-weighted graph in a PACE-like format:
///
/// ```text
/// c comment
/// p mwis <nodes> <edges>
/// w <node> <weight>
/// <u> <v>
/// ```
///
/// Nodes are 1-based in the file and 0-based in the result. Weight lines are
/// optional and may appear anywhere after the header; unlisted nodes have weight 1.
pub trait WeightedGraphReader: Sized {
    fn try_read_mwis<R: BufRead>(reader: R) -> Result<(Self, Vec<Weight>)>;
    fn try_read_mwis_file<P: AsRef<Path>>(path: P) -> Result<(Self, Vec<Weight>)>;
}

impl<G> WeightedGraphReader for G
where
    G: GraphNew + GraphEdgeEditing,
{
    fn try_read_mwis<R: BufRead>(reader: R) -> Result<(Self, Vec<Weight>)> {
        let instance = MwisReader::try_new(reader)?.read_body()?;

        let mut graph = Self::new(instance.number_of_nodes);
        graph.add_edges(instance.edges);
        Ok((graph, instance.weights))
    }

    fn try_read_mwis_file<P: AsRef<Path>>(path: P) -> Result<(Self, Vec<Weight>)> {
        let reader = File::open(path)?;
        let buf_reader = BufReader::new(reader);
        Self::try_read_mwis(buf_reader)
    }
}

pub struct MwisInstance {
    pub number_of_nodes: NumNodes,
    pub weights: Vec<Weight>,
    pub edges: Vec<Edge>,
}

pub struct MwisReader<R> {
    lines: Lines<R>,
    number_of_nodes: NumNodes,
    number_of_edges: NumEdges,
}

impl<R: BufRead> MwisReader<R> {
    pub fn try_new(reader: R) -> Result<Self> {
        let mut mwis_reader = Self {
            lines: reader.lines(),
            number_of_nodes: 0,
            number_of_edges: 0,
        };

        (mwis_reader.number_of_nodes, mwis_reader.number_of_edges) = mwis_reader.parse_header()?;
        Ok(mwis_reader)
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        self.number_of_nodes
    }

    pub fn number_of_edges(&self) -> NumEdges {
        self.number_of_edges
    }

    /// Consumes the remaining lines; fails on malformed lines, out-of-range nodes,
    /// repeated edges or weights, and if the number of edges differs from the header.
    pub fn read_body(mut self) -> Result<MwisInstance> {
        let n = self.number_of_nodes;
        let mut weights = vec![1; n as usize];
        let mut has_weight = vec![false; n as usize];
        let mut edges = Vec::with_capacity(capped_capacity(self.number_of_edges));
        let mut known_edges = FxHashSet::default();

        while let Some(line) = self.next_non_comment_line()? {
            let mut parts = line.split_whitespace().peekable();

            if parts.peek() == Some(&"w") {
                parts.next();
                let node = self.parse_node(parts.next(), "Weight>Node")?;
                let weight: Weight = parse_next_value!(parts, "Weight>Weight");
                raise_error_unless!(
                    parts.next().is_none(),
                    "Invalid weight line; expected end of line"
                );
                raise_error_unless!(
                    !std::mem::replace(&mut has_weight[node as usize], true),
                    format!("Weight of node {} is given more than once", node + 1)
                );
                weights[node as usize] = weight;
                continue;
            }

            let u = self.parse_node(parts.next(), "Source node")?;
            let v = self.parse_node(parts.next(), "Target node")?;
            raise_error_unless!(
                parts.next().is_none(),
                "Invalid edge line; expected end of line"
            );

            let edge = Edge(u, v);
            raise_error_unless!(
                known_edges.insert(edge.normalized()),
                format!("Edge {} {} is given more than once", u + 1, v + 1)
            );
            edges.push(edge);
        }

        raise_error_unless!(
            edges.len() as NumEdges == self.number_of_edges,
            format!(
                "Header announces {} edges but {} were found",
                self.number_of_edges,
                edges.len()
            )
        );

        Ok(MwisInstance {
            number_of_nodes: n,
            weights,
            edges,
        })
    }

    fn next_non_comment_line(&mut self) -> Result<Option<String>> {
        loop {
            let line = self.lines.next();
            match line {
                None => return Ok(None),
                Some(Err(x)) => return Err(x),
                Some(Ok(line)) if line.starts_with('c') || line.trim().is_empty() => continue,
                Some(Ok(line)) => return Ok(Some(line)),
            }
        }
    }

    fn parse_header(&mut self) -> Result<(NumNodes, NumEdges)> {
        let line = self.next_non_comment_line()?;

        raise_error_unless!(line.is_some(), "No header found");
        let line = line.unwrap();

        let mut parts = line.split_whitespace();

        raise_error_unless!(
            parts.next() == Some("p"),
            "Invalid header found; line should start with p"
        );

        raise_error_unless!(
            parts.next() == Some("mwis"),
            "Invalid header found; file type should be \"mwis\""
        );

        let number_of_nodes: NumNodes = parse_next_value!(parts, "Header>Number of nodes");
        let number_of_edges: NumEdges = parse_next_value!(parts, "Header>Number of edges");

        raise_error_unless!(
            parts.next().is_none(),
            "Invalid header found; expected end of line"
        );

        raise_error_unless!(
            number_of_nodes <= MAX_NODES,
            format!("Header declares {number_of_nodes} nodes; at most {MAX_NODES} are supported")
        );

        // loops included
        let max_edges = number_of_nodes as NumEdges * (number_of_nodes as NumEdges + 1) / 2;
        raise_error_unless!(
            number_of_edges <= max_edges,
            format!(
                "Header declares {number_of_edges} edges; {number_of_nodes} nodes admit at most {max_edges}"
            )
        );

        Ok((number_of_nodes, number_of_edges))
    }

    /// Parses a 1-based node id and returns it 0-based
    fn parse_node(&self, token: Option<&str>, name: &str) -> Result<Node> {
        let node: Node = parse_next_value!(token.into_iter(), name);
        raise_error_unless!(
            (1..=self.number_of_nodes).contains(&node),
            format!(
                "{name} {node} is out of range 1..={}",
                self.number_of_nodes
            )
        );
        Ok(node - 1)
    }
}
