use super::instance::TspInstance;
use crate::{errors::PreconditionError, graph::*};

/// Complete graph over a subset of the vertices of a [`TspInstance`]. Vertices of the
/// view are relabelled to `0..k` in the order of the subset; the distance matrix is
/// computed once on construction.
#[derive(Clone, Debug)]
pub struct CompleteGraphView {
    external: Vec<Node>,
    distances: Vec<f64>,
}

impl CompleteGraphView {
    /// Builds the view over `subset`, or over all vertices of `instance` if `subset` is `None`.
    /// Fails on out-of-range or repeated vertices.
    pub fn new(instance: &TspInstance, subset: Option<&[Node]>) -> Result<Self, PreconditionError> {
        let external = match subset {
            None => instance.vertices().collect(),
            Some(subset) => {
                let n = instance.number_of_nodes();
                let mut seen = BitSet::new(n);
                for &u in subset {
                    if u >= n {
                        return Err(PreconditionError::NodeOutOfRange { node: u, nodes: n });
                    }
                    if seen.set_bit(u) {
                        return Err(PreconditionError::DuplicateNode { node: u });
                    }
                }
                subset.to_vec()
            }
        };

        let k = external.len();
        let mut distances = vec![0.0; k * k];
        for i in 0..k {
            for j in (i + 1)..k {
                let d = instance.distance(external[i], external[j]);
                distances[i * k + j] = d;
                distances[j * k + i] = d;
            }
        }

        Ok(Self {
            external,
            distances,
        })
    }

    #[inline]
    pub fn distance(&self, u: Node, v: Node) -> f64 {
        self.distances[u as usize * self.external.len() + v as usize]
    }

    /// Instance ids of the vertices of the view; position `i` holds the id of local vertex `i`
    pub fn external_ids(&self) -> &[Node] {
        &self.external
    }

    pub fn to_external(&self, local_tour: &[Node]) -> Vec<Node> {
        local_tour
            .iter()
            .map(|&u| self.external[u as usize])
            .collect()
    }

    /// Length of the closed tour over local vertex ids
    pub fn tour_cost(&self, local_tour: &[Node]) -> f64 {
        match local_tour {
            [] | [_] => 0.0,
            [.., last] => {
                local_tour
                    .windows(2)
                    .map(|w| self.distance(w[0], w[1]))
                    .sum::<f64>()
                    + self.distance(*last, local_tour[0])
            }
        }
    }
}

impl GraphNodeOrder for CompleteGraphView {
    fn number_of_nodes(&self) -> NumNodes {
        self.external.len() as NumNodes
    }
}

impl AdjacencyTest for CompleteGraphView {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        u != v && u < self.number_of_nodes() && v < self.number_of_nodes()
    }
}
