//! Exact maximum-weight independent set via branch-and-bound.
//!
//! The search keeps every vertex in one of three states (see [`Decision`]). Each node of
//! the search tree selects an undecided vertex `v` and first explores the branch that
//! includes `v` (excluding all of its undecided neighbors) and then the branch that
//! excludes `v`. A subtree is discarded if even taking all undecided vertices cannot
//! beat the best known solution.
//!
//! The tree walk uses an explicit stack of [`Frame`]s and undoes the modifications of
//! a branch when backtracking, so the state is shared by all tree nodes.

use std::{mem::take, str::FromStr};

use log::{debug, info, trace};

use crate::{
    errors::{InvariantCheck, InvariantViolation, PreconditionError},
    graph::*,
};

pub type Weight = u32;
pub type TotalWeight = u64;

/// An independent set in ascending node order together with its total weight
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndependentSet {
    nodes: Vec<Node>,
    weight: TotalWeight,
}

impl IndependentSet {
    pub(crate) fn from_sorted(nodes: Vec<Node>, weights: &[Weight]) -> Self {
        debug_assert!(nodes.is_sorted());
        let weight = nodes.iter().map(|&u| weights[u as usize] as TotalWeight).sum();
        Self { nodes, weight }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn weight(&self) -> TotalWeight {
        self.weight
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<'a, G: AdjacencyTest> InvariantCheck<(&'a G, &'a [Weight]), InvariantViolation>
    for IndependentSet
{
    fn is_correct(&self, context: &(&'a G, &'a [Weight])) -> Result<(), InvariantViolation> {
        let (graph, weights) = *context;
        for (i, &u) in self.nodes.iter().enumerate() {
            if i > 0 && self.nodes[i - 1] >= u {
                return Err(InvariantViolation::NotAscending(u));
            }

            if let Some(&v) = self.nodes[i..].iter().find(|&&v| graph.has_edge(u, v)) {
                return Err(InvariantViolation::NotIndependent(u, v));
            }
        }

        let actual = self
            .nodes
            .iter()
            .map(|&u| weights[u as usize] as TotalWeight)
            .sum();

        if actual != self.weight {
            return Err(InvariantViolation::WeightMismatch {
                cached: self.weight,
                actual,
            });
        }

        Ok(())
    }
}

/// Selects the undecided vertex to branch on. Ties are broken by the respective
/// other criterion and finally by the smaller node id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BranchingRule {
    /// Branch on a heaviest undecided vertex
    #[default]
    MaxWeight,
    /// Branch on a vertex with most undecided neighbors
    MaxDegree,
}

impl FromStr for BranchingRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "max-weight" => Ok(BranchingRule::MaxWeight),
            "max-degree" => Ok(BranchingRule::MaxDegree),
            _ => Err(format!(
                "unknown branching rule {s:?}; expected max-weight or max-degree"
            )),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MwisConfig {
    pub branching: BranchingRule,
    /// Include all vertices without neighbors before the search starts
    pub include_isolated: bool,
    /// Verify the result against the input before returning
    pub paranoid: bool,
}

impl Default for MwisConfig {
    fn default() -> Self {
        Self {
            branching: Default::default(),
            include_isolated: true,
            paranoid: cfg!(debug_assertions),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MwisStats {
    pub nodes_explored: u64,
    pub leaves: u64,
    pub pruned: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Decision {
    Undecided,
    Included,
    Excluded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Branch {
    Include,
    Exclude,
}

/// One level of the search tree: the vertex branched on, the branch currently explored
/// and the neighbors the include-branch moved from undecided to excluded.
struct Frame {
    vertex: Node,
    branch: Branch,
    excluded_neighbors: Vec<Node>,
}

pub struct MwisSolver<'a, G> {
    graph: &'a G,
    weights: &'a [Weight],
    config: MwisConfig,

    state: Vec<Decision>,
    num_undecided: NumNodes,
    current_weight: TotalWeight,
    undecided_weight: TotalWeight,

    best_weight: TotalWeight,
    best: Vec<Node>,

    stats: MwisStats,
}

/// Computes a maximum-weight independent set of `graph` using the default configuration.
///
/// # Example
/// ```
/// use combopt::{exact::mwis::mwis, graph::*};
///
/// let cycle: AdjArray = graph_from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)]);
/// let solution = mwis(&[1, 2, 1, 2], &cycle).unwrap();
///
/// assert_eq!(solution.nodes(), [1, 3]);
/// assert_eq!(solution.weight(), 4);
/// ```
pub fn mwis<G>(weights: &[Weight], graph: &G) -> Result<IndependentSet, PreconditionError>
where
    G: UndirectedGraph + AdjacencyTest,
{
    Ok(MwisSolver::new(graph, weights)?.solve())
}

impl<'a, G> MwisSolver<'a, G>
where
    G: UndirectedGraph + AdjacencyTest,
{
    pub fn new(graph: &'a G, weights: &'a [Weight]) -> Result<Self, PreconditionError> {
        if weights.len() != graph.len() {
            return Err(PreconditionError::WeightCardinality {
                weights: weights.len(),
                nodes: graph.number_of_nodes(),
            });
        }

        Ok(Self {
            graph,
            weights,
            config: Default::default(),
            state: Vec::with_capacity(graph.len()),
            num_undecided: 0,
            current_weight: 0,
            undecided_weight: 0,
            best_weight: 0,
            best: Vec::new(),
            stats: Default::default(),
        })
    }

    pub fn configure(&mut self, config: MwisConfig) {
        self.config = config;
    }

    pub fn stats(&self) -> MwisStats {
        self.stats
    }

    /// Runs the search to completion and returns an optimal solution.
    pub fn solve(&mut self) -> IndependentSet {
        self.reset();
        self.fix_trivial_vertices();
        self.search();

        let mut nodes = take(&mut self.best);
        nodes.sort_unstable();
        let solution = IndependentSet::from_sorted(nodes, self.weights);

        debug!(
            "MWIS search: n={} explored={} leaves={} pruned={}",
            self.graph.number_of_nodes(),
            self.stats.nodes_explored,
            self.stats.leaves,
            self.stats.pruned,
        );
        info!(
            "MWIS of weight {} with {} nodes",
            solution.weight(),
            solution.len()
        );

        if self.config.paranoid
            && let Err(violation) = solution.is_correct(&(self.graph, self.weights))
        {
            panic!("Produced invalid independent set: {violation}");
        }

        solution
    }

    fn reset(&mut self) {
        self.state.clear();
        self.state.resize(self.graph.len(), Decision::Undecided);
        self.num_undecided = self.graph.number_of_nodes();
        self.current_weight = 0;
        self.undecided_weight = self.weights.iter().map(|&w| w as TotalWeight).sum();
        self.best_weight = 0;
        self.best.clear();
        self.stats = Default::default();
    }

    /// Vertices with a self-loop can never be selected; isolated vertices can always be
    /// selected without harm since weights are non-negative.
    fn fix_trivial_vertices(&mut self) {
        for u in self.graph.vertices() {
            if self.graph.has_edge(u, u) {
                self.exclude(u);
            } else if self.config.include_isolated && self.graph.degree_of(u) == 0 {
                let excluded = self.include(u);
                debug_assert!(excluded.is_empty());
            }
        }
    }

    fn search(&mut self) {
        let mut stack: Vec<Frame> = Vec::new();
        let mut descend = true;

        loop {
            if descend {
                self.stats.nodes_explored += 1;

                if self.current_weight + self.undecided_weight <= self.best_weight {
                    self.stats.pruned += 1;
                    descend = false;
                } else if self.num_undecided == 0 {
                    self.record_leaf();
                    descend = false;
                } else {
                    let vertex = self.select_branching_vertex();
                    let excluded_neighbors = self.include(vertex);
                    stack.push(Frame {
                        vertex,
                        branch: Branch::Include,
                        excluded_neighbors,
                    });
                    continue;
                }
            }

            let Some(frame) = stack.last_mut() else {
                break;
            };

            match frame.branch {
                Branch::Include => {
                    let excluded_neighbors = take(&mut frame.excluded_neighbors);
                    self.undo_include(frame.vertex, &excluded_neighbors);
                    self.exclude(frame.vertex);
                    frame.branch = Branch::Exclude;
                    descend = true;
                }
                Branch::Exclude => {
                    self.undo_exclude(frame.vertex);
                    stack.pop();
                }
            }
        }
    }

    fn record_leaf(&mut self) {
        self.stats.leaves += 1;

        // a leaf's bound equals its weight, so it is only reached if it beats the incumbent
        debug_assert!(self.current_weight > self.best_weight);

        trace!("New incumbent of weight {}", self.current_weight);
        self.best_weight = self.current_weight;
        self.best.clear();
        self.best.extend(
            self.graph
                .vertices()
                .filter(|&u| self.state[u as usize] == Decision::Included),
        );
    }

    fn select_branching_vertex(&self) -> Node {
        let undecided_degree = |u: Node| {
            self.graph
                .neighbors_of(u)
                .iter()
                .filter(|&&v| self.state[v as usize] == Decision::Undecided)
                .count()
        };

        let candidates = self
            .graph
            .vertices()
            .filter(|&u| self.state[u as usize] == Decision::Undecided);

        // max_by_key returns the last maximum; reversing the iteration yields the smallest id
        let selected = match self.config.branching {
            BranchingRule::MaxWeight => candidates
                .rev()
                .max_by_key(|&u| (self.weights[u as usize], undecided_degree(u))),
            BranchingRule::MaxDegree => candidates
                .rev()
                .max_by_key(|&u| (undecided_degree(u), self.weights[u as usize])),
        };

        selected.expect("Branching requires an undecided vertex")
    }

    /// Moves `u` to the solution and all its undecided neighbors to the excluded vertices.
    /// Returns the neighbors that got excluded.
    fn include(&mut self, u: Node) -> Vec<Node> {
        debug_assert_eq!(self.state[u as usize], Decision::Undecided);
        let weight = self.weights[u as usize] as TotalWeight;

        self.state[u as usize] = Decision::Included;
        self.num_undecided -= 1;
        self.undecided_weight -= weight;
        self.current_weight += weight;

        let mut excluded = Vec::new();
        for &v in self.graph.neighbors_of(u) {
            if self.state[v as usize] == Decision::Undecided {
                self.exclude(v);
                excluded.push(v);
            }
        }
        excluded
    }

    fn undo_include(&mut self, u: Node, excluded_neighbors: &[Node]) {
        debug_assert_eq!(self.state[u as usize], Decision::Included);
        for &v in excluded_neighbors {
            self.undo_exclude(v);
        }

        let weight = self.weights[u as usize] as TotalWeight;
        self.state[u as usize] = Decision::Undecided;
        self.num_undecided += 1;
        self.undecided_weight += weight;
        self.current_weight -= weight;
    }

    fn exclude(&mut self, u: Node) {
        debug_assert_eq!(self.state[u as usize], Decision::Undecided);
        self.state[u as usize] = Decision::Excluded;
        self.num_undecided -= 1;
        self.undecided_weight -= self.weights[u as usize] as TotalWeight;
    }

    fn undo_exclude(&mut self, u: Node) {
        debug_assert_eq!(self.state[u as usize], Decision::Excluded);
        self.state[u as usize] = Decision::Undecided;
        self.num_undecided += 1;
        self.undecided_weight += self.weights[u as usize] as TotalWeight;
    }
}
