use std::{path::PathBuf, time::Instant};

use combopt::{log::build_logger_for_verbosity, prelude::*};
use itertools::Itertools;
use log::{LevelFilter, info};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(about = "Computes a maximum-weight independent set")]
struct Opts {
    /// Instance in mwis format; read from stdin if omitted
    #[structopt(short, long)]
    instance: Option<PathBuf>,

    /// max-weight or max-degree
    #[structopt(short, long, default_value = "max-weight")]
    branching: BranchingRule,

    /// Do not include isolated vertices before branching
    #[structopt(long)]
    no_isolated: bool,

    /// Verify the solution before printing it
    #[structopt(long)]
    paranoid: bool,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

fn load_graph(path: &Option<PathBuf>) -> anyhow::Result<(AdjArray, Vec<Weight>)> {
    if let Some(path) = path {
        Ok(AdjArray::try_read_mwis_file(path)?)
    } else {
        let stdin = std::io::stdin().lock();
        Ok(AdjArray::try_read_mwis(stdin)?)
    }
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::from_args();
    build_logger_for_verbosity(LevelFilter::Warn, opts.verbose);

    let (graph, weights) = load_graph(&opts.instance)?;
    info!(
        "Loaded graph with n={} m={}",
        graph.number_of_nodes(),
        graph.number_of_edges()
    );

    let start = Instant::now();
    let mut solver = MwisSolver::new(&graph, &weights)?;
    solver.configure(MwisConfig {
        branching: opts.branching,
        include_isolated: !opts.no_isolated,
        paranoid: opts.paranoid || cfg!(debug_assertions),
    });
    let solution = solver.solve();
    info!(
        "Solved in {:.3}s: {:?}",
        start.elapsed().as_secs_f64(),
        solver.stats()
    );

    println!("s {} {}", solution.len(), solution.weight());
    println!("{}", solution.nodes().iter().map(|&u| u + 1).join(" "));

    Ok(())
}
