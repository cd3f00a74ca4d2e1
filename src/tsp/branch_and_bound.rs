//! Depth-first branch-and-bound over partial tours.
//!
//! The tour is anchored at vertex 0. Every node of the search tree is a simple path
//! starting at 0; it is extended by one unvisited vertex at a time, nearest first.
//! The remainder of any completion is a Hamiltonian path from the last vertex through
//! all unvisited vertices back to 0, so its cost is bounded from below by a minimum
//! spanning tree over these vertices.

use itertools::Itertools;
use log::{debug, trace};

use super::{TspBackend, view::CompleteGraphView};
use crate::{errors::TspError, graph::*};

/// Smallest instance accepted by [`solve`]
pub const MIN_VERTICES: NumNodes = 5;

const EPS: f64 = 1e-9;

/// Computes an optimal tour over all vertices of `view` in local ids, starting at 0.
pub fn solve(view: &CompleteGraphView) -> Result<Vec<Node>, TspError> {
    let n = view.number_of_nodes();
    if n < MIN_VERTICES {
        return Err(TspError::DegenerateInstance {
            backend: TspBackend::Combinatorial,
            vertices: n,
            minimum: MIN_VERTICES,
        });
    }

    let mut search = TourSearch::new(view);
    search.branch();

    debug!(
        "Branch-and-bound explored {} partial tours, pruned {}, improved incumbent {} times",
        search.explored, search.pruned, search.improvements
    );

    Ok(search.best_tour)
}

struct TourSearch<'a> {
    view: &'a CompleteGraphView,
    path: Vec<Node>,
    visited: BitSet,
    path_cost: f64,

    best_tour: Vec<Node>,
    best_cost: f64,

    explored: u64,
    pruned: u64,
    improvements: u64,
}

impl<'a> TourSearch<'a> {
    fn new(view: &'a CompleteGraphView) -> Self {
        let n = view.number_of_nodes();
        let best_tour = nearest_neighbor_tour(view);
        let best_cost = view.tour_cost(&best_tour);
        trace!("Initial incumbent of cost {best_cost:.3}");

        let mut path = Vec::with_capacity(n as usize);
        path.push(0);

        Self {
            view,
            path,
            visited: BitSet::new_with_bits_set(n, [0 as Node]),
            path_cost: 0.0,
            best_tour,
            best_cost,
            explored: 0,
            pruned: 0,
            improvements: 0,
        }
    }

    fn branch(&mut self) {
        self.explored += 1;
        let last = *self.path.last().unwrap();

        if self.path.len() == self.view.len() {
            let cost = self.path_cost + self.view.distance(last, 0);
            if cost < self.best_cost - EPS {
                trace!("Improved incumbent from {:.3} to {cost:.3}", self.best_cost);
                self.best_cost = cost;
                self.best_tour.clone_from(&self.path);
                self.improvements += 1;
            }
            return;
        }

        if self.path_cost + self.remainder_lower_bound(last) >= self.best_cost - EPS {
            self.pruned += 1;
            return;
        }

        let candidates = self
            .visited
            .iter_cleared_bits()
            .sorted_by(|&u, &v| {
                self.view
                    .distance(last, u)
                    .total_cmp(&self.view.distance(last, v))
            })
            .collect_vec();

        for u in candidates {
            let step = self.view.distance(last, u);
            if self.path_cost + step >= self.best_cost - EPS {
                // candidates are sorted by step length
                self.pruned += 1;
                break;
            }

            self.path.push(u);
            self.visited.set_bit(u);
            self.path_cost += step;

            self.branch();

            self.path_cost -= step;
            self.visited.unset_bit(u);
            self.path.pop();
        }
    }

    /// Weight of a minimum spanning tree over `last`, vertex 0, and all unvisited
    /// vertices, computed with Prim's algorithm on the complete graph.
    fn remainder_lower_bound(&self, last: Node) -> f64 {
        let mut members = self.visited.iter_cleared_bits().collect_vec();
        members.push(0);
        if last != 0 {
            members.push(last);
        }

        let mut in_tree = vec![false; members.len()];
        let mut min_edge = vec![f64::INFINITY; members.len()];
        min_edge[0] = 0.0;

        let mut weight = 0.0;
        for _ in 0..members.len() {
            let (i, _) = min_edge
                .iter()
                .enumerate()
                .filter(|&(i, _)| !in_tree[i])
                .min_by(|a, b| a.1.total_cmp(b.1))
                .unwrap();

            in_tree[i] = true;
            weight += min_edge[i];

            for j in 0..members.len() {
                if !in_tree[j] {
                    let d = self.view.distance(members[i], members[j]);
                    if d < min_edge[j] {
                        min_edge[j] = d;
                    }
                }
            }
        }

        weight
    }
}

/// Starting at 0, repeatedly moves to the closest unvisited vertex
fn nearest_neighbor_tour(view: &CompleteGraphView) -> Vec<Node> {
    let mut visited = view.vertex_bitset_unset();
    let mut tour = Vec::with_capacity(view.len());

    let mut current = 0;
    loop {
        visited.set_bit(current);
        tour.push(current);

        let Some(next) = visited
            .iter_cleared_bits()
            .min_by(|&u, &v| {
                view.distance(current, u)
                    .total_cmp(&view.distance(current, v))
            })
        else {
            break;
        };
        current = next;
    }

    tour
}
