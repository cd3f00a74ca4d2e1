pub mod errors;
pub mod exact;
pub mod graph;
pub mod io;
pub mod log;
pub mod tsp;
pub mod utils;

pub mod prelude {
    pub use super::errors::*;
    pub use super::exact::*;
    pub use super::graph::*;
    pub use super::io::{TspLibReader, WeightedGraphReader};
    pub use super::tsp::*;
}

#[cfg(test)]
mod testing;
