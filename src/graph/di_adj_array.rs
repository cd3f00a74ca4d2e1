use super::*;

/// Directed graph storing out- and in-neighborhoods together with an edge list.
/// [`AdjacencyList::neighbors_of`] yields out-neighbors.
#[derive(Clone, Debug, Default)]
pub struct DiAdjArray {
    out_adj: Vec<Vec<Node>>,
    in_adj: Vec<Vec<Node>>,
    out_edge_ids: Vec<Vec<EdgeId>>,
    edges: Vec<Edge>,
}

/// Access to the in-neighbors of a directed graph
pub trait InNeighbors: GraphNodeOrder {
    /// Returns the slice of all nodes `v` with an edge (v, u)
    fn in_neighbors_of(&self, u: Node) -> &[Node];

    fn in_degree_of(&self, u: Node) -> NumNodes {
        self.in_neighbors_of(u).len() as NumNodes
    }
}

impl GraphNodeOrder for DiAdjArray {
    fn number_of_nodes(&self) -> NumNodes {
        self.out_adj.len() as NumNodes
    }
}

impl GraphEdgeOrder for DiAdjArray {
    fn number_of_edges(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }
}

impl AdjacencyList for DiAdjArray {
    fn neighbors_of(&self, u: Node) -> &[Node] {
        &self.out_adj[u as usize]
    }
}

impl InNeighbors for DiAdjArray {
    fn in_neighbors_of(&self, u: Node) -> &[Node] {
        &self.in_adj[u as usize]
    }
}

impl AdjacencyTest for DiAdjArray {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.out_adj[u as usize].contains(&v)
    }
}

impl GraphEdgeList for DiAdjArray {
    fn edge(&self, e: EdgeId) -> Edge {
        self.edges[e as usize]
    }

    fn edge_between(&self, u: Node, v: Node) -> Option<EdgeId> {
        let out = self.out_adj.get(u as usize)?;
        let position = out.iter().position(|&x| x == v)?;
        Some(self.out_edge_ids[u as usize][position])
    }
}

impl GraphNew for DiAdjArray {
    fn new(n: NumNodes) -> Self {
        Self {
            out_adj: vec![Vec::new(); n as usize],
            in_adj: vec![Vec::new(); n as usize],
            out_edge_ids: vec![Vec::new(); n as usize],
            edges: Vec::new(),
        }
    }
}

impl GraphEdgeEditing for DiAdjArray {
    fn try_add_edge(&mut self, u: Node, v: Node) -> Result<EdgeId, EdgeId> {
        if let Some(e) = self.edge_between(u, v) {
            return Err(e);
        }

        let e = self.edges.len() as EdgeId;
        self.edges.push(Edge(u, v));
        self.out_adj[u as usize].push(v);
        self.out_edge_ids[u as usize].push(e);
        self.in_adj[v as usize].push(u);

        Ok(e)
    }
}

super::graph_tests::impl_graph_tests!(DiAdjArray);
