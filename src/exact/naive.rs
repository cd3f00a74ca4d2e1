use super::mwis::{IndependentSet, TotalWeight, Weight};
use crate::{
    errors::PreconditionError,
    graph::*,
    utils::subsets::{EnumerationOrder, visit_subsets_in_order},
};

/// Largest graph accepted by [`naive_mwis`]
pub const NAIVE_MAX_NODES: NumNodes = 30;

/// Computes a maximum-weight independent set by testing all 2^n vertex subsets.
/// Intended as a reference to cross-check [`super::mwis::mwis`] on small graphs.
///
/// Subsets are enumerated in descending order, so among several optimal solutions
/// the one with the numerically largest inclusion vector is returned.
pub fn naive_mwis<G>(weights: &[Weight], graph: &G) -> Result<IndependentSet, PreconditionError>
where
    G: UndirectedGraph,
{
    if weights.len() != graph.len() {
        return Err(PreconditionError::WeightCardinality {
            weights: weights.len(),
            nodes: graph.number_of_nodes(),
        });
    }

    if graph.number_of_nodes() > NAIVE_MAX_NODES {
        return Err(PreconditionError::TooManyElements {
            elements: graph.number_of_nodes(),
        });
    }

    let mut best: Option<(TotalWeight, Vec<bool>)> = None;

    visit_subsets_in_order(
        graph.number_of_nodes(),
        EnumerationOrder::Descending,
        |selected| {
            let mut weight = 0;
            for u in graph.vertices() {
                if !selected[u as usize] {
                    continue;
                }

                if graph.neighbors_of(u).iter().any(|&v| selected[v as usize]) {
                    return;
                }

                weight += weights[u as usize] as TotalWeight;
            }

            if best.as_ref().is_none_or(|(w, _)| *w < weight) {
                best = Some((weight, selected.to_vec()));
            }
        },
    )?;

    let (_, selected) = best.expect("The empty set is always independent");
    let nodes = graph.vertices().filter(|&u| selected[u as usize]).collect();

    Ok(IndependentSet::from_sorted(nodes, weights))
}
