use super::*;
use std::fmt;

/// Undirected graph stored as adjacency arrays together with an edge list.
#[derive(Clone, Default)]
pub struct AdjArray {
    adj: Vec<Neighborhood>,
    edges: Vec<Edge>,
}

impl GraphNodeOrder for AdjArray {
    fn number_of_nodes(&self) -> NumNodes {
        self.adj.len() as NumNodes
    }
}

impl GraphEdgeOrder for AdjArray {
    fn number_of_edges(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }
}

impl AdjacencyList for AdjArray {
    fn neighbors_of(&self, u: Node) -> &[Node] {
        &self.adj[u as usize].nodes
    }
}

impl UndirectedGraph for AdjArray {}

impl AdjacencyTest for AdjArray {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.adj[u as usize].find_neighbor(v).is_some()
    }
}

impl GraphEdgeList for AdjArray {
    fn edge(&self, e: EdgeId) -> Edge {
        self.edges[e as usize]
    }

    fn edge_between(&self, u: Node, v: Node) -> Option<EdgeId> {
        self.adj.get(u as usize)?.find_neighbor(v)
    }
}

impl GraphNew for AdjArray {
    fn new(number_of_nodes: NumNodes) -> Self {
        Self {
            adj: vec![Default::default(); number_of_nodes as usize],
            edges: Vec::new(),
        }
    }
}

impl GraphEdgeEditing for AdjArray {
    fn try_add_edge(&mut self, u: Node, v: Node) -> Result<EdgeId, EdgeId> {
        if let Some(e) = self.adj[u as usize].find_neighbor(v) {
            return Err(e);
        }

        let e = self.edges.len() as EdgeId;
        self.edges.push(Edge(u, v));

        self.adj[u as usize].push(v, e);
        if u != v {
            self.adj[v as usize].push(u, e);
        }

        Ok(e)
    }
}

impl AdjArray {
    pub fn test_only_from(edges: impl Clone + IntoIterator<Item = impl Into<Edge>>) -> Self {
        let n = edges
            .clone()
            .into_iter()
            .map(|e| e.into())
            .map(|e| e.0.max(e.1) + 1)
            .max()
            .unwrap_or(0);

        graph_from_edges(n as NumNodes, edges)
    }
}

#[derive(Default, Clone)]
struct Neighborhood {
    nodes: Vec<Node>,
    edge_ids: Vec<EdgeId>,
}

impl Neighborhood {
    fn find_neighbor(&self, v: Node) -> Option<EdgeId> {
        let position = self.nodes.iter().position(|&x| x == v)?;
        Some(self.edge_ids[position])
    }

    fn push(&mut self, v: Node, e: EdgeId) {
        self.nodes.push(v);
        self.edge_ids.push(e);
    }
}

impl fmt::Debug for AdjArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AdjArray {{ n: {}, edges: [", self.number_of_nodes())?;
        for (i, Edge(u, v)) in self.edges.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{u}-{v}")?;
        }
        f.write_str("] }")
    }
}

super::graph_tests::impl_graph_tests!(AdjArray);
