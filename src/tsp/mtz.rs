//! Miller-Tucker-Zemlin formulation of the TSP solved with HiGHS.
//!
//! For every ordered pair `i != j` a binary arc variable `x_ij` with cost `d(i, j)`;
//! every vertex has exactly one outgoing and one incoming arc. Subtours are excluded
//! by order variables `1 <= u_i <= n - 1` for `i >= 1` and the constraints
//! `u_i - u_j + (n - 1) x_ij <= n - 2` for all `i, j >= 1`, `i != j`.

use highs::{HighsModelStatus, Model, RowProblem, Sense};
use itertools::Itertools;
use log::{debug, warn};

use super::{TourStatus, TspBackend, TspConfig, view::CompleteGraphView};
use crate::{errors::TspError, graph::*};

/// Instances up to this size have a single tour up to rotation and reflection
const TRIVIAL_VERTICES: NumNodes = 3;

/// Computes a tour over all vertices of `view` in local ids, starting at 0.
pub fn solve(
    view: &CompleteGraphView,
    config: &TspConfig,
) -> Result<(Vec<Node>, TourStatus), TspError> {
    let n = view.number_of_nodes();
    if n <= TRIVIAL_VERTICES {
        return Ok((view.vertices().collect(), TourStatus::Optimal));
    }

    let failure = |reason: String| TspError::SolverFailure {
        backend: TspBackend::Mtz,
        reason,
    };

    let mut pb = RowProblem::default();

    let arcs = view
        .vertices()
        .cartesian_product(view.vertices())
        .filter(|&(i, j)| i != j)
        .collect_vec();

    let arc_vars = arcs
        .iter()
        .map(|&(i, j)| pb.add_integer_column(view.distance(i, j), 0.0..=1.0))
        .collect_vec();

    // order variables; vertex 0 has none
    let order_vars = view
        .vertices()
        .skip(1)
        .map(|_| pb.add_column(0.0, 1.0..=(n - 1) as f64))
        .collect_vec();

    for u in view.vertices() {
        let outgoing = arcs
            .iter()
            .zip(&arc_vars)
            .filter(|((i, _), _)| *i == u)
            .map(|(_, &var)| (var, 1.0));
        pb.add_row(1.0..=1.0, outgoing);

        let incoming = arcs
            .iter()
            .zip(&arc_vars)
            .filter(|((_, j), _)| *j == u)
            .map(|(_, &var)| (var, 1.0));
        pb.add_row(1.0..=1.0, incoming);
    }

    for (&(i, j), &x) in arcs.iter().zip(&arc_vars) {
        if i == 0 || j == 0 {
            continue;
        }

        let ui = order_vars[i as usize - 1];
        let uj = order_vars[j as usize - 1];
        pb.add_row(
            ..=(n - 2) as f64,
            [(ui, 1.0), (uj, -1.0), (x, (n - 1) as f64)],
        );
    }

    debug!(
        "MTZ model with {} arc and {} order variables",
        arc_vars.len(),
        order_vars.len()
    );

    let mut model = Model::new(pb);
    model.make_quiet();
    if let Some(limit) = config.time_limit {
        model.set_option("time_limit", limit.as_secs_f64());
    }
    #[cfg(not(feature = "par"))]
    {
        model.set_option("parallel", "off");
        model.set_option("threads", 1);
    }
    model.set_sense(Sense::Minimise);

    let solved = model.solve();
    let status = tour_status(solved.status())?;

    let solution = solved.get_solution();
    let columns = solution.columns();
    if columns.len() < arcs.len() {
        return Err(failure("no primal solution available".into()));
    }

    let mut successor: Vec<Option<Node>> = vec![None; n as usize];
    for (&(i, j), &value) in arcs.iter().zip(columns) {
        if value > 0.5 {
            if successor[i as usize].is_some() {
                return Err(failure(format!("vertex {i} has several successors")));
            }
            successor[i as usize] = Some(j);
        }
    }

    let tour = follow_successors(&successor)
        .ok_or_else(|| failure("selected arcs do not form a Hamiltonian cycle".into()))?;

    Ok((tour, status))
}

/// Maps the model status to the status of the extracted tour; only an optimal model or
/// one stopped at the time limit may carry a usable incumbent.
fn tour_status(status: HighsModelStatus) -> Result<TourStatus, TspError> {
    match status {
        HighsModelStatus::Optimal => Ok(TourStatus::Optimal),
        HighsModelStatus::ReachedTimeLimit => {
            warn!("MTZ model reached time limit; tour may be suboptimal");
            Ok(TourStatus::Feasible)
        }
        status => Err(TspError::SolverFailure {
            backend: TspBackend::Mtz,
            reason: format!("HiGHS terminated with {status:?}"),
        }),
    }
}

/// Walks the successor function from vertex 0; returns `None` unless it is a single
/// cycle through all vertices.
fn follow_successors(successor: &[Option<Node>]) -> Option<Vec<Node>> {
    let mut visited = BitSet::new(successor.len() as NumNodes);
    let mut tour = Vec::with_capacity(successor.len());

    let mut current = 0;
    while !visited.set_bit(current) {
        tour.push(current);
        current = successor[current as usize]?;
    }

    (current == 0 && tour.len() == successor.len()).then_some(tour)
}
