pub mod adj_array;
pub mod bitset;
pub mod di_adj_array;
pub mod edge;
pub mod gnp;
pub mod queries;

pub type Node = u32;
pub type NumNodes = Node;
pub type NumEdges = u64;
pub type EdgeId = u32;

use std::ops::Range;

pub use adj_array::*;
pub use bitset::*;
pub use di_adj_array::*;
pub use edge::*;
pub use gnp::*;
pub use queries::*;

/// Provides getters pertaining to the size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V. Since vertices are contiguous from 0, the
    /// range does not borrow self and may be used while mutating the graph.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns true if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an empty [`BitSet`] with one bit per vertex
    fn vertex_bitset_unset(&self) -> BitSet {
        BitSet::new(self.number_of_nodes())
    }
}

pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;
}

#[macro_export]
macro_rules! node_iterator {
    ($iter : ident, $single : ident, $type : ty) => {
        fn $iter(&self) -> impl Iterator<Item = $type> + '_ {
            self.vertices().map(|u| self.$single(u))
        }
    };
}

pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Returns a slice of (out-)neighbors of a given vertex.
    /// ** Panics if the v >= n **
    fn neighbors_of(&self, u: Node) -> &[Node];

    /// Returns the number of neighbors of from [`u`]
    fn degree_of(&self, u: Node) -> NumNodes {
        self.neighbors_of(u).len() as NumNodes
    }

    node_iterator!(degrees, degree_of, NumNodes);
    node_iterator!(neighbors, neighbors_of, &[Node]);
}

/// Marker for graphs whose adjacency is symmetric, i.e. `v` is in `neighbors_of(u)`
/// iff `u` is in `neighbors_of(v)`.
pub trait UndirectedGraph: AdjacencyList {}

/// Provides efficient tests whether an edge exists
pub trait AdjacencyTest {
    /// Returns *true* exactly if the graph contains the edge (u, v). For directed
    /// graphs the edge is FROM u TO v.
    fn has_edge(&self, u: Node, v: Node) -> bool;
}

/// Access to the edge list of a graph. Each edge added to the graph receives a
/// stable [`EdgeId`]; ids are contiguous from 0.
pub trait GraphEdgeList: GraphNodeOrder + GraphEdgeOrder {
    /// Returns the endpoints of edge `e` in insertion orientation.
    /// ** Panics if e >= m **
    fn edge(&self, e: EdgeId) -> Edge;

    /// Returns the id of the edge (u, v) if it exists. Undirected graphs ignore
    /// the orientation.
    fn edge_between(&self, u: Node, v: Node) -> Option<EdgeId>;

    /// Returns an iterator over all edges together with their ids
    fn edges(&self) -> impl Iterator<Item = (EdgeId, Edge)> + '_ {
        (0..self.number_of_edges() as EdgeId).map(|e| (e, self.edge(e)))
    }
}

pub trait GraphNew {
    /// Creates an empty graph with n singleton nodes
    fn new(n: NumNodes) -> Self;
}

/// Provides functions to insert edges
pub trait GraphEdgeEditing: GraphNew {
    /// Adds the edge *(u,v)* to the graph and returns its id.
    /// ** Panics if the edge is already contained or possibly if u, v >= n **
    fn add_edge(&mut self, u: Node, v: Node) -> EdgeId {
        match self.try_add_edge(u, v) {
            Ok(e) => e,
            Err(e) => panic!("Edge ({u}, {v}) already exists with id {e}"),
        }
    }

    /// Adds the edge *(u,v)* to the graph. Returns the id of the new edge, or the
    /// id of the existing edge as an error if it was present previously.
    /// ** Can panic if u, v >= n, depending on implementation **
    fn try_add_edge(&mut self, u: Node, v: Node) -> Result<EdgeId, EdgeId>;

    fn add_edges(&mut self, edges: impl IntoIterator<Item = impl Into<Edge>>) {
        for Edge(u, v) in edges.into_iter().map(|d| d.into()) {
            self.add_edge(u, v);
        }
    }
}

/// Creates a graph with `n` nodes from an edge list
pub fn graph_from_edges<G: GraphEdgeEditing>(
    n: NumNodes,
    edges: impl IntoIterator<Item = impl Into<Edge>>,
) -> G {
    let mut graph = G::new(n);
    graph.add_edges(edges);
    graph
}
