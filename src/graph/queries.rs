use super::*;
use crate::errors::PreconditionError;

/// Read-only queries about edges and their endpoints. Directed and undirected
/// graphs are treated alike: only the endpoint sets of edges matter.
pub trait EdgeQueries: GraphEdgeList {
    /// Returns the endpoints of `e` or an error if `e` is not an edge id of the graph
    fn try_edge(&self, e: EdgeId) -> Result<Edge, PreconditionError> {
        if (e as NumEdges) < self.number_of_edges() {
            Ok(self.edge(e))
        } else {
            Err(PreconditionError::EdgeOutOfRange {
                edge: e,
                edges: self.number_of_edges(),
            })
        }
    }

    /// Returns true iff `e1` and `e2` share at least one endpoint
    fn incident_to_same_vertex(&self, e1: EdgeId, e2: EdgeId) -> Result<bool, PreconditionError> {
        Ok(self.try_edge(e1)?.shares_endpoint_with(&self.try_edge(e2)?))
    }

    /// Returns true iff `v` is an endpoint of `e`
    fn is_extreme(&self, v: Node, e: EdgeId) -> Result<bool, PreconditionError> {
        Ok(self.try_edge(e)?.contains(v))
    }

    /// Returns the endpoint of `e` opposite to `v`; a self-loop yields `v` itself.
    /// Fails if `v` is not an endpoint of `e`.
    fn other_extreme(&self, v: Node, e: EdgeId) -> Result<Node, PreconditionError> {
        let edge = self.try_edge(e)?;
        match edge {
            Edge(a, b) if a == v => Ok(b),
            Edge(a, b) if b == v => Ok(a),
            _ => Err(PreconditionError::NotAnEndpoint { node: v, edge }),
        }
    }

    /// Returns all vertices not contained in `subset` in ascending order.
    /// Duplicates in `subset` are ignored.
    fn vertex_complement<I>(&self, subset: I) -> Result<Vec<Node>, PreconditionError>
    where
        I: IntoIterator<Item = Node>,
    {
        let n = self.number_of_nodes();
        let mut selected = BitSet::new(n);
        for u in subset {
            if u >= n {
                return Err(PreconditionError::NodeOutOfRange { node: u, nodes: n });
            }
            selected.set_bit(u);
        }

        Ok(selected.iter_cleared_bits().collect())
    }
}

impl<G: GraphEdgeList> EdgeQueries for G {}

#[cfg(test)]
mod test {
    use super::*;

    /// Two 4-cycles 0-1-2-3-0, one undirected and one directed
    fn squares() -> (AdjArray, DiAdjArray) {
        let edges = (0..4 as Node).map(|i| (i, (i + 1) % 4));
        (
            graph_from_edges(4, edges.clone()),
            graph_from_edges(4, edges),
        )
    }

    #[test]
    fn incident_undirected() {
        let (u, _) = squares();

        let e1 = u.edge_between(0, 1).unwrap();
        let e2 = u.edge_between(1, 2).unwrap();
        let e3 = u.edge_between(2, 3).unwrap();

        assert_eq!(u.incident_to_same_vertex(e1, e2), Ok(true));
        assert_eq!(u.incident_to_same_vertex(e1, e3), Ok(false));
        assert_eq!(u.incident_to_same_vertex(e1, e1), Ok(true));
    }

    #[test]
    fn incident_directed() {
        let (_, d) = squares();

        let e1 = d.edge_between(0, 1).unwrap();
        let e2 = d.edge_between(1, 2).unwrap();
        let e3 = d.edge_between(2, 3).unwrap();
        let e4 = d.edge_between(3, 0).unwrap();

        assert_eq!(d.incident_to_same_vertex(e1, e2), Ok(true));
        assert_eq!(d.incident_to_same_vertex(e1, e4), Ok(true));
        assert_eq!(d.incident_to_same_vertex(e1, e3), Ok(false));
    }

    #[test]
    fn is_extreme_both_kinds() {
        let (u, d) = squares();

        let ue = u.edge_between(0, 1).unwrap();
        assert_eq!(u.is_extreme(0, ue), Ok(true));
        assert_eq!(u.is_extreme(1, ue), Ok(true));
        assert_eq!(u.is_extreme(2, ue), Ok(false));

        let de = d.edge_between(0, 1).unwrap();
        assert_eq!(d.is_extreme(0, de), Ok(true));
        assert_eq!(d.is_extreme(1, de), Ok(true));
        assert_eq!(d.is_extreme(2, de), Ok(false));
    }

    #[test]
    fn edge_queries_reject_unknown_edges() {
        let (u, d) = squares();
        let out_of_range = PreconditionError::EdgeOutOfRange { edge: 4, edges: 4 };

        assert_eq!(u.incident_to_same_vertex(0, 4), Err(out_of_range.clone()));
        assert_eq!(d.incident_to_same_vertex(4, 0), Err(out_of_range.clone()));
        assert_eq!(u.is_extreme(0, 4), Err(out_of_range));
        assert_eq!(
            d.is_extreme(0, EdgeId::MAX),
            Err(PreconditionError::EdgeOutOfRange {
                edge: EdgeId::MAX,
                edges: 4
            })
        );
    }

    #[test]
    fn other_extreme_both_kinds() {
        let (u, d) = squares();

        let ue = u.edge_between(0, 1).unwrap();
        assert_eq!(u.other_extreme(0, ue), Ok(1));
        assert_eq!(u.other_extreme(1, ue), Ok(0));

        let de = d.edge_between(0, 1).unwrap();
        assert_eq!(d.other_extreme(0, de), Ok(1));
        assert_eq!(d.other_extreme(1, de), Ok(0));
    }

    #[test]
    fn other_extreme_rejects_non_endpoint() {
        let (u, _) = squares();
        let ue = u.edge_between(0, 1).unwrap();

        assert_eq!(
            u.other_extreme(2, ue),
            Err(PreconditionError::NotAnEndpoint {
                node: 2,
                edge: Edge(0, 1)
            })
        );
        assert_eq!(
            u.other_extreme(0, 17),
            Err(PreconditionError::EdgeOutOfRange { edge: 17, edges: 4 })
        );
    }

    #[test]
    fn other_extreme_of_loop() {
        let graph = AdjArray::test_only_from([(0, 0), (0, 1)]);
        let e = graph.edge_between(0, 0).unwrap();
        assert_eq!(graph.other_extreme(0, e), Ok(0));
    }

    #[test]
    fn vertex_complement_both_kinds() {
        let (u, d) = squares();

        assert_eq!(u.vertex_complement([0, 1]), Ok(vec![2, 3]));
        assert_eq!(d.vertex_complement([0, 1]), Ok(vec![2, 3]));
        assert_eq!(u.vertex_complement([3, 1, 3]), Ok(vec![0, 2]));
        assert_eq!(u.vertex_complement([]), Ok(vec![0, 1, 2, 3]));
        assert_eq!(u.vertex_complement(0..4), Ok(vec![]));
    }

    #[test]
    fn vertex_complement_rejects_out_of_range() {
        let (u, _) = squares();
        assert_eq!(
            u.vertex_complement([1, 4]),
            Err(PreconditionError::NodeOutOfRange { node: 4, nodes: 4 })
        );
    }
}
