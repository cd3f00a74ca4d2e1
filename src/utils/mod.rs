pub mod subsets;

pub use subsets::*;
