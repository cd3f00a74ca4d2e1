use super::*;

pub trait EdgeOps {
    fn normalized(&self) -> Self;
    fn is_normalized(&self) -> bool;
    fn is_loop(&self) -> bool;
    fn reverse(&self) -> Self;
}

/// An edge given by its two endpoints. For directed graphs the edge points
/// FROM `.0` TO `.1`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Edge(pub Node, pub Node);

impl Edge {
    pub fn source(&self) -> Node {
        self.0
    }

    pub fn target(&self) -> Node {
        self.1
    }

    /// Returns true iff `u` is one of the endpoints
    pub fn contains(&self, u: Node) -> bool {
        self.0 == u || self.1 == u
    }

    /// Returns true iff the endpoint sets of both edges intersect
    pub fn shares_endpoint_with(&self, other: &Edge) -> bool {
        other.contains(self.0) || other.contains(self.1)
    }
}

impl EdgeOps for Edge {
    fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }
}

impl From<(Node, Node)> for Edge {
    fn from(value: (Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&(Node, Node)> for Edge {
    fn from(value: &(Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&Edge> for Edge {
    fn from(value: &Edge) -> Self {
        *value
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalize() {
        assert_eq!(Edge(3, 1).normalized(), Edge(1, 3));
        assert_eq!(Edge(1, 3).normalized(), Edge(1, 3));
        assert!(Edge(1, 3).is_normalized());
        assert!(!Edge(3, 1).is_normalized());
        assert_eq!(Edge(3, 1).reverse(), Edge(1, 3));
    }

    #[test]
    fn endpoints() {
        let e = Edge(0, 1);
        assert!(e.contains(0));
        assert!(e.contains(1));
        assert!(!e.contains(2));

        assert!(e.shares_endpoint_with(&Edge(1, 2)));
        assert!(e.shares_endpoint_with(&Edge(2, 0)));
        assert!(!e.shares_endpoint_with(&Edge(2, 3)));
        assert!(Edge(4, 4).is_loop());
    }
}
