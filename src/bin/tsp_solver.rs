use std::{path::PathBuf, str::FromStr, time::Duration};

use anyhow::Context;
use combopt::{log::build_logger_for_verbosity, prelude::*};
use itertools::Itertools;
use log::{LevelFilter, info};
use structopt::StructOpt;

#[derive(Clone, Copy, Debug)]
enum BackendChoice {
    Single(TspBackend),
    Both,
}

impl FromStr for BackendChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "both" {
            Ok(BackendChoice::Both)
        } else {
            s.parse().map(BackendChoice::Single)
        }
    }
}

#[derive(Debug, StructOpt)]
#[structopt(about = "Computes an optimal tour for a Euclidean TSPLIB instance")]
struct Opts {
    /// Instance in TSPLIB format; read from stdin if omitted
    #[structopt(short, long)]
    instance: Option<PathBuf>,

    /// combinatorial, mtz or both
    #[structopt(short, long, default_value = "combinatorial")]
    backend: BackendChoice,

    /// Comma-separated 0-based vertex ids to restrict the tour to
    #[structopt(short, long, use_delimiter = true)]
    subset: Option<Vec<Node>>,

    /// Time limit of the MIP solver in seconds
    #[structopt(short, long)]
    time_limit: Option<f64>,

    /// Print the result as JSON
    #[structopt(long)]
    json: bool,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

fn load_instance(path: &Option<PathBuf>) -> anyhow::Result<TspInstance> {
    if let Some(path) = path {
        TspInstance::try_read_tsplib_file(path)
            .with_context(|| format!("Cannot read instance {}", path.display()))
    } else {
        let stdin = std::io::stdin().lock();
        Ok(TspInstance::try_read_tsplib(stdin)?)
    }
}

fn print_tour(tour: &Tour) {
    println!("{} {:.6} {:?}", tour.backend(), tour.cost(), tour.status());
    println!("{}", tour.vertices().iter().join(" "));
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::from_args();
    build_logger_for_verbosity(LevelFilter::Warn, opts.verbose);

    let instance = load_instance(&opts.instance)?;
    info!(
        "Loaded instance {} with {} vertices",
        instance.name().unwrap_or("<unnamed>"),
        instance.number_of_nodes()
    );

    let config = TspConfig {
        time_limit: opts
            .time_limit
            .map(Duration::try_from_secs_f64)
            .transpose()
            .context("Invalid time limit")?,
    };
    let subset = opts.subset.as_deref();

    match opts.backend {
        BackendChoice::Single(backend) => {
            let tour = solve_tsp_with_config(&instance, subset, backend, &config)?;
            if opts.json {
                println!("{}", serde_json::to_string_pretty(&tour)?);
            } else {
                print_tour(&tour);
            }
        }
        BackendChoice::Both => {
            let result = cross_validate(&instance, subset, &config)?;
            if opts.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_tour(&result.combinatorial);
                print_tour(&result.mtz);
            }
        }
    }

    Ok(())
}
