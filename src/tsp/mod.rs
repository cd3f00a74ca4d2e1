//! Exact solvers for the Euclidean travelling salesman problem.
//!
//! [`solve_tsp`] builds a [`CompleteGraphView`] over the requested vertices and
//! dispatches to one of two independent exact backends (see [`TspBackend`]). Both
//! backends return tours over the same vertex set; [`cross_validate`] runs both and
//! compares their results.

pub mod branch_and_bound;
pub mod instance;
pub mod mtz;
pub mod validation;
pub mod view;

use std::{fmt, str::FromStr, time::Duration};

use itertools::Itertools;
use log::info;
use serde::{Deserialize, Serialize};

pub use instance::*;
pub use validation::*;
pub use view::CompleteGraphView;

use crate::{errors::TspError, graph::*};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TspBackend {
    /// Depth-first branch-and-bound over partial tours with spanning tree bounds.
    /// Rejects instances with fewer than [`branch_and_bound::MIN_VERTICES`] vertices.
    Combinatorial,
    /// Miller-Tucker-Zemlin integer program solved with HiGHS
    Mtz,
}

impl TspBackend {
    pub const ALL: [TspBackend; 2] = [TspBackend::Combinatorial, TspBackend::Mtz];
}

impl fmt::Display for TspBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TspBackend::Combinatorial => "combinatorial",
            TspBackend::Mtz => "mtz",
        })
    }
}

impl FromStr for TspBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "combinatorial" | "bnb" => Ok(TspBackend::Combinatorial),
            "mtz" | "mip" => Ok(TspBackend::Mtz),
            _ => Err(format!("unknown TSP backend {s:?}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TourStatus {
    /// The tour is proven to be optimal
    Optimal,
    /// The tour is Hamiltonian but the solver stopped before proving optimality
    Feasible,
}

/// A closed tour: the successor of the last vertex is the first one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    vertices: Vec<Node>,
    cost: f64,
    status: TourStatus,
    backend: TspBackend,
}

impl Tour {
    pub fn vertices(&self) -> &[Node] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Node> {
        self.vertices
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn status(&self) -> TourStatus {
        self.status
    }

    pub fn is_optimal(&self) -> bool {
        self.status == TourStatus::Optimal
    }

    pub fn backend(&self) -> TspBackend {
        self.backend
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Visited vertices in ascending order
    pub fn sorted_vertices(&self) -> Vec<Node> {
        self.vertices.iter().copied().sorted_unstable().collect()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TspConfig {
    /// Time limit handed to the MIP solver. If it is reached, the best known
    /// tour is returned with [`TourStatus::Feasible`].
    pub time_limit: Option<Duration>,
}

/// Solves the TSP over `subset` (or all vertices of `instance`) with the given backend.
///
/// # Example
/// ```
/// use combopt::tsp::*;
///
/// let points = (0..6).map(|i| Point::new((i % 3) as f64, (i / 3) as f64)).collect();
/// let instance = TspInstance::new(points).unwrap();
///
/// let tour = solve_tsp(&instance, None, TspBackend::Combinatorial).unwrap();
/// assert_eq!(tour.sorted_vertices(), [0, 1, 2, 3, 4, 5]);
/// assert!((tour.cost() - 6.0).abs() < 1e-9);
/// ```
pub fn solve_tsp(
    instance: &TspInstance,
    subset: Option<&[Node]>,
    backend: TspBackend,
) -> Result<Tour, TspError> {
    solve_tsp_with_config(instance, subset, backend, &TspConfig::default())
}

pub fn solve_tsp_with_config(
    instance: &TspInstance,
    subset: Option<&[Node]>,
    backend: TspBackend,
    config: &TspConfig,
) -> Result<Tour, TspError> {
    let view = CompleteGraphView::new(instance, subset)?;
    info!(
        "Solve TSP over {} of {} vertices using the {backend} backend",
        view.number_of_nodes(),
        instance.number_of_nodes()
    );

    let (local_tour, status) = match backend {
        TspBackend::Combinatorial => (branch_and_bound::solve(&view)?, TourStatus::Optimal),
        TspBackend::Mtz => mtz::solve(&view, config)?,
    };

    let tour = Tour {
        cost: view.tour_cost(&local_tour),
        vertices: view.to_external(&local_tour),
        status,
        backend,
    };

    validate_tour(&tour, instance, view.external_ids())?;
    info!("Found {status:?} tour of cost {:.3}", tour.cost());

    Ok(tour)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{errors::PreconditionError, testing::bench10};

    #[test]
    fn backend_names() {
        for backend in TspBackend::ALL {
            assert_eq!(backend.to_string().parse::<TspBackend>(), Ok(backend));
        }
        assert!("concorde".parse::<TspBackend>().is_err());
    }

    #[test]
    fn solve_full_instance() {
        let instance = bench10();

        for backend in TspBackend::ALL {
            let tour = solve_tsp(&instance, None, backend).unwrap();

            assert_eq!(tour.len(), 10);
            assert_eq!(tour.sorted_vertices(), (0..10).collect_vec());
            assert_eq!(tour.backend(), backend);
            assert!(tour.is_optimal());
        }
    }

    #[test]
    fn solve_subset() {
        let instance = bench10();
        let vertices = [0, 1, 5, 6, 8];

        for backend in TspBackend::ALL {
            let tour = solve_tsp(&instance, Some(&vertices), backend).unwrap();
            assert_eq!(tour.sorted_vertices(), vertices);
        }
    }

    #[test]
    fn combinatorial_rejects_four_vertices() {
        let instance = bench10();
        let vertices = [0, 1, 5, 6];

        let result = solve_tsp(&instance, Some(&vertices), TspBackend::Combinatorial);
        assert!(matches!(
            result,
            Err(TspError::DegenerateInstance {
                backend: TspBackend::Combinatorial,
                vertices: 4,
                minimum: 5
            })
        ));

        // the MIP backend has no such limitation
        let tour = solve_tsp(&instance, Some(&vertices), TspBackend::Mtz).unwrap();
        assert_eq!(tour.sorted_vertices(), [0, 1, 5, 6]);
    }

    #[test]
    fn mtz_handles_tiny_subsets() {
        let instance = bench10();

        for vertices in [&[][..], &[3], &[3, 7], &[3, 7, 9]] {
            let tour = solve_tsp(&instance, Some(vertices), TspBackend::Mtz).unwrap();
            assert_eq!(tour.sorted_vertices(), vertices.iter().copied().sorted().collect_vec());
            assert!(tour.is_optimal());
        }
    }

    #[test]
    fn rejects_invalid_subsets() {
        let instance = bench10();

        for backend in TspBackend::ALL {
            assert!(matches!(
                solve_tsp(&instance, Some(&[0, 1, 2, 3, 10]), backend),
                Err(TspError::Precondition(PreconditionError::NodeOutOfRange {
                    node: 10,
                    nodes: 10
                }))
            ));
            assert!(matches!(
                solve_tsp(&instance, Some(&[0, 1, 2, 3, 2]), backend),
                Err(TspError::Precondition(PreconditionError::DuplicateNode {
                    node: 2
                }))
            ));
        }
    }

    #[test]
    fn tour_serializes() {
        let instance = bench10();
        let tour = solve_tsp(&instance, Some(&[0, 1, 5, 6, 8]), TspBackend::Combinatorial).unwrap();

        let json = serde_json::to_string(&tour).unwrap();
        assert!(json.contains("\"backend\":\"combinatorial\""));
        assert!(json.contains("\"status\":\"optimal\""));

        let parsed: Tour = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tour);
    }
}
