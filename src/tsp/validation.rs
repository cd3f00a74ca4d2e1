use log::{info, warn};

use super::*;
use crate::errors::{InvariantCheck, InvariantViolation, TspError};

/// Relative tolerance for comparing tour costs
pub const COST_TOLERANCE: f64 = 1e-6;

pub fn costs_agree(a: f64, b: f64) -> bool {
    (a - b).abs() <= COST_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

impl<'a> InvariantCheck<(&'a TspInstance, &'a [Node]), InvariantViolation> for Tour {
    /// Checks that the tour visits every requested vertex exactly once, nothing else,
    /// and that its cached cost matches the recomputed one.
    fn is_correct(
        &self,
        &(instance, requested): &(&'a TspInstance, &'a [Node]),
    ) -> Result<(), InvariantViolation> {
        let n = instance.number_of_nodes();
        if let Some(&node) = requested.iter().find(|&&u| u >= n) {
            return Err(InvariantViolation::RequestedOutOfRange { node, nodes: n });
        }

        let mut is_requested = BitSet::new(n);
        is_requested.set_bits(requested.iter().copied());

        let mut visited = BitSet::new(n);
        for &u in self.vertices() {
            if u >= n || !is_requested.get_bit(u) {
                return Err(InvariantViolation::UnexpectedNode(u));
            }
            if visited.set_bit(u) {
                return Err(InvariantViolation::RevisitedNode(u));
            }
        }

        if let Some(u) = requested.iter().copied().find(|&u| !visited.get_bit(u)) {
            return Err(InvariantViolation::MissingNode(u));
        }

        let actual = instance.tour_cost(self.vertices());
        if !costs_agree(self.cost(), actual) {
            return Err(InvariantViolation::CostMismatch {
                cached: self.cost(),
                actual,
            });
        }

        Ok(())
    }
}

/// Checks that `tour` is a Hamiltonian cycle over exactly the `requested` vertices of `instance`.
pub fn validate_tour(
    tour: &Tour,
    instance: &TspInstance,
    requested: &[Node],
) -> Result<(), InvariantViolation> {
    tour.is_correct(&(instance, requested))
}

/// Tours computed by both backends for the same vertex set
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CrossValidation {
    pub combinatorial: Tour,
    pub mtz: Tour,
}

/// Solves the instance with both backends and checks that they agree on the vertex set
/// and, if both results are proven optimal, on the tour cost.
pub fn cross_validate(
    instance: &TspInstance,
    subset: Option<&[Node]>,
    config: &TspConfig,
) -> Result<CrossValidation, TspError> {
    let combinatorial = solve_tsp_with_config(instance, subset, TspBackend::Combinatorial, config)?;
    let mtz = solve_tsp_with_config(instance, subset, TspBackend::Mtz, config)?;

    check_agreement(&combinatorial, &mtz)?;
    Ok(CrossValidation { combinatorial, mtz })
}

/// Vertex sets must always coincide; costs are only compared if both tours are optimal
fn check_agreement(combinatorial: &Tour, mtz: &Tour) -> Result<(), TspError> {
    if combinatorial.sorted_vertices() != mtz.sorted_vertices() {
        return Err(TspError::BackendDisagreement(format!(
            "tours visit different vertices: {:?} vs {:?}",
            combinatorial.vertices(),
            mtz.vertices()
        )));
    }

    if combinatorial.is_optimal() && mtz.is_optimal() {
        if !costs_agree(combinatorial.cost(), mtz.cost()) {
            return Err(TspError::BackendDisagreement(format!(
                "optimal costs differ: {} vs {}",
                combinatorial.cost(),
                mtz.cost()
            )));
        }
        info!("Both backends agree on cost {:.3}", combinatorial.cost());
    } else {
        warn!(
            "Skip cost comparison: combinatorial is {:?}, mtz is {:?}",
            combinatorial.status(),
            mtz.status()
        );
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{bench10, random_tsp_instances, tsplib_instances};
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;
    use std::time::Duration;

    fn tour(vertices: Vec<Node>, cost: f64) -> Tour {
        Tour {
            vertices,
            cost,
            status: TourStatus::Optimal,
            backend: TspBackend::Combinatorial,
        }
    }

    #[test]
    fn detects_invalid_tours() {
        let instance = bench10();
        let requested = [0, 2, 4];
        let cost = instance.tour_cost(&[0, 2, 4]);

        assert_eq!(validate_tour(&tour(vec![4, 0, 2], cost), &instance, &requested), Ok(()));
        assert_eq!(
            validate_tour(&tour(vec![0, 2], cost), &instance, &requested),
            Err(InvariantViolation::MissingNode(4))
        );
        assert_eq!(
            validate_tour(&tour(vec![0, 2, 4, 2], cost), &instance, &requested),
            Err(InvariantViolation::RevisitedNode(2))
        );
        assert_eq!(
            validate_tour(&tour(vec![0, 2, 4, 5], cost), &instance, &requested),
            Err(InvariantViolation::UnexpectedNode(5))
        );
        assert_eq!(
            validate_tour(&tour(vec![0, 2, 4, 17], cost), &instance, &requested),
            Err(InvariantViolation::UnexpectedNode(17))
        );
        assert!(matches!(
            validate_tour(&tour(vec![0, 2, 4], cost + 1.0), &instance, &requested),
            Err(InvariantViolation::CostMismatch { .. })
        ));
    }

    #[test]
    fn rejects_requested_nodes_out_of_range() {
        let instance = bench10();
        let vertices = vec![0, 1, 5, 6, 8];
        let cost = instance.tour_cost(&vertices);

        assert_eq!(
            validate_tour(&tour(vertices.clone(), cost), &instance, &[0, 1, 5, 6, 8, 42]),
            Err(InvariantViolation::RequestedOutOfRange {
                node: 42,
                nodes: 10
            })
        );
        assert_eq!(
            validate_tour(&tour(vertices, cost), &instance, &[10, 0, 1, 5, 6, 8]),
            Err(InvariantViolation::RequestedOutOfRange {
                node: 10,
                nodes: 10
            })
        );
    }

    #[test]
    fn cost_comparison_requires_optimality() {
        let combinatorial = tour(vec![0, 1, 2, 3, 4], 10.0);
        let heuristic = Tour {
            vertices: vec![0, 2, 1, 3, 4],
            cost: 12.0,
            status: TourStatus::Feasible,
            backend: TspBackend::Mtz,
        };

        // a feasible tour may be worse than the optimum
        assert!(check_agreement(&combinatorial, &heuristic).is_ok());
        assert!(check_agreement(&combinatorial, &tour(vec![4, 3, 2, 1, 0], 10.0)).is_ok());

        assert!(matches!(
            check_agreement(&combinatorial, &tour(vec![0, 2, 1, 3, 4], 12.0)),
            Err(TspError::BackendDisagreement(_))
        ));

        let other_vertices = Tour {
            vertices: vec![0, 1, 2, 3, 5],
            ..heuristic
        };
        assert!(matches!(
            check_agreement(&combinatorial, &other_vertices),
            Err(TspError::BackendDisagreement(_))
        ));
    }

    #[test]
    fn cross_validation_under_time_limit() {
        let mut rng = Pcg64Mcg::seed_from_u64(0x1_0c4_7e57);
        let config = TspConfig {
            time_limit: Some(Duration::from_millis(1)),
        };

        for instance in random_tsp_instances(&mut rng, 11..13).take(2) {
            match cross_validate(&instance, None, &config) {
                Ok(result) => {
                    assert!(result.combinatorial.is_optimal());
                    assert_eq!(
                        result.combinatorial.sorted_vertices(),
                        result.mtz.sorted_vertices()
                    );
                    if result.mtz.is_optimal() {
                        assert!(costs_agree(result.combinatorial.cost(), result.mtz.cost()));
                    } else {
                        assert!(result.mtz.cost() >= result.combinatorial.cost() - 1e-6);
                    }
                }
                Err(err) => assert!(
                    matches!(
                        err,
                        TspError::SolverFailure {
                            backend: TspBackend::Mtz,
                            ..
                        }
                    ),
                    "{err}"
                ),
            }
        }
    }

    #[test]
    fn tolerance_is_relative() {
        assert!(costs_agree(1e6, 1e6 + 0.5));
        assert!(!costs_agree(1e6, 1e6 + 10.0));
        assert!(costs_agree(0.0, 1e-7));
    }

    #[test]
    fn backends_agree_on_bench10() {
        let instance = bench10();
        let config = TspConfig::default();

        for subset in [None, Some(&[0, 1, 5, 6, 8][..]), Some(&[9, 3, 4, 2, 7, 1])] {
            let result = cross_validate(&instance, subset, &config).unwrap();
            assert!(costs_agree(result.combinatorial.cost(), result.mtz.cost()));
        }
    }

    #[test]
    fn backends_agree_on_instances_on_disk() {
        let config = TspConfig::default();

        for (path, instance) in tsplib_instances() {
            let result = cross_validate(&instance, None, &config).unwrap();

            if path.ends_with("hexagon6.tsp") {
                assert!((result.combinatorial.cost() - 6.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn backends_agree_on_random_instances() {
        let mut rng = Pcg64Mcg::seed_from_u64(0x7e57_5eed);
        let config = TspConfig::default();

        for instance in random_tsp_instances(&mut rng, 5..9).take(10) {
            let result = cross_validate(&instance, None, &config).unwrap();
            assert_eq!(result.combinatorial.len(), instance.len());
        }
    }
}
