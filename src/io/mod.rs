pub type Result<T> = std::io::Result<T>;

/// Largest number of nodes a header may declare; node-indexed buffers are sized from it
pub const MAX_NODES: crate::graph::NumNodes = 1 << 24;

/// Upper bound for buffers presized from a header count
const MAX_PREALLOCATION: usize = 1 << 20;

fn capped_capacity(count: u64) -> usize {
    count.min(MAX_PREALLOCATION as u64) as usize
}

macro_rules! raise_error_unless {
    ($cond : expr, $info : expr) => {
        if !($cond) {
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, $info));
        }
    };
}

macro_rules! parse_next_value {
    ($iterator : expr, $name : expr) => {{
        let next = $iterator.next();
        raise_error_unless!(
            next.is_some(),
            format!("Premature end of line when parsing {}.", $name)
        );

        let parsed = next.unwrap().parse();
        raise_error_unless!(
            parsed.is_ok(),
            format!("Invalid value found. Cannot parse {}.", $name)
        );

        parsed.unwrap()
    }};
}

pub mod mwis_reader;
pub use mwis_reader::*;
pub mod tsplib_reader;
pub use tsplib_reader::*;
