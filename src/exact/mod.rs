pub mod mwis;
pub mod naive;

pub use mwis::{BranchingRule, IndependentSet, MwisConfig, MwisSolver, Weight, mwis};
pub use naive::naive_mwis;
