use std::{ops::Range, path::PathBuf};

use glob::glob;
use itertools::Itertools;
use rand::Rng;

use crate::{
    exact::mwis::Weight,
    graph::*,
    io::{TspLibReader, WeightedGraphReader},
    tsp::{Point, TspInstance},
};

fn globbed_files(pattern: &str) -> Vec<PathBuf> {
    glob(pattern)
        .expect("Failed to glob")
        .map(|r| r.expect("Failed to access globbed path"))
        .sorted()
        .collect()
}

/// Infinite stream of random G(n,p) graphs with random weights in `0..=max_weight`.
/// The number of nodes is drawn from `nodes`, the average degree cycles through 1.5, 3 and 6.
pub fn random_weighted_graphs<R: Rng>(
    rng: &mut R,
    nodes: Range<NumNodes>,
    max_weight: Weight,
) -> impl Iterator<Item = (AdjArray, Vec<Weight>)> + '_ {
    (0..).map(move |i| {
        let n = rng.gen_range(nodes.clone());
        let avg_deg = [1.5, 3.0, 6.0][i % 3];
        let p = (avg_deg / n.max(1) as f64).min(1.0);

        let graph = AdjArray::random_gnp(rng, n, p);
        let weights = (0..n).map(|_| rng.gen_range(0..=max_weight)).collect();

        (graph, weights)
    })
}

/// Infinite stream of instances with points drawn uniformly from `[0, 100)^2`
pub fn random_tsp_instances<R: Rng>(
    rng: &mut R,
    nodes: Range<NumNodes>,
) -> impl Iterator<Item = TspInstance> + '_ {
    (0..).map(move |_| {
        let n = rng.gen_range(nodes.clone());
        let points = (0..n)
            .map(|_| Point::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)))
            .collect();
        TspInstance::new(points).unwrap()
    })
}

pub fn tsplib_instances() -> Vec<(PathBuf, TspInstance)> {
    globbed_files("instances/tsplib/*.tsp")
        .into_iter()
        .map(|path| {
            let instance = TspInstance::try_read_tsplib_file(&path)
                .unwrap_or_else(|e| panic!("Cannot read {path:?}: {e}"));
            (path, instance)
        })
        .collect()
}

pub fn mwis_instances() -> Vec<(PathBuf, AdjArray, Vec<Weight>)> {
    globbed_files("instances/mwis/*.mwis")
        .into_iter()
        .map(|path| {
            let (graph, weights) = AdjArray::try_read_mwis_file(&path)
                .unwrap_or_else(|e| panic!("Cannot read {path:?}: {e}"));
            (path, graph, weights)
        })
        .collect()
}

/// The 10-vertex benchmark instance `instances/tsplib/bench10.tsp`
pub fn bench10() -> TspInstance {
    TspInstance::try_read_tsplib_file("instances/tsplib/bench10.tsp")
        .expect("Cannot read bench10 instance")
}
