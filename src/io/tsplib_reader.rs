use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::debug;

use super::{MAX_NODES, Result};
use crate::{
    graph::{BitSet, Node, NumNodes},
    tsp::{Point, TspInstance},
};

/// Reads symmetric Euclidean instances in TSPLIB format. Only `EUC_2D` instances with
/// a `NODE_COORD_SECTION` are supported; node ids `1..=DIMENSION` are shifted to `0..n`.
pub trait TspLibReader: Sized {
    fn try_read_tsplib<R: BufRead>(reader: R) -> Result<Self>;
    fn try_read_tsplib_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

impl TspLibReader for TspInstance {
    fn try_read_tsplib<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();

        let mut name = None;
        let mut dimension: Option<NumNodes> = None;

        // keyword section
        loop {
            let line = lines.next();
            raise_error_unless!(line.is_some(), "Premature end of file; no NODE_COORD_SECTION");
            let line = line.unwrap()?;
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            if line == "NODE_COORD_SECTION" {
                break;
            }

            raise_error_unless!(line != "EOF", "Premature EOF; no NODE_COORD_SECTION");

            let split = line.split_once(':');
            raise_error_unless!(
                split.is_some(),
                format!("Invalid keyword line {line:?}; expected KEY : VALUE")
            );
            let (key, value) = split.unwrap();

            match (key.trim(), value.trim()) {
                ("NAME", value) => name = Some(value.to_owned()),
                ("TYPE", value) => raise_error_unless!(
                    value == "TSP",
                    format!("Unsupported problem type {value:?}; expected TSP")
                ),
                ("DIMENSION", value) => {
                    dimension = Some(parse_next_value!(std::iter::once(value), "DIMENSION"))
                }
                ("EDGE_WEIGHT_TYPE", value) => raise_error_unless!(
                    value == "EUC_2D",
                    format!("Unsupported edge weight type {value:?}; expected EUC_2D")
                ),
                (key, _) => debug!("Ignore TSPLIB keyword {key}"),
            }
        }

        raise_error_unless!(dimension.is_some(), "Missing DIMENSION");
        let n = dimension.unwrap();
        raise_error_unless!(
            n <= MAX_NODES,
            format!("DIMENSION {n} exceeds the supported maximum of {MAX_NODES}")
        );

        let mut points = vec![Point::default(); n as usize];
        let mut seen = BitSet::new(n);

        for line in lines {
            let line = line?;
            let line = line.trim();

            if line.is_empty() {
                continue;
            }
            if line == "EOF" {
                break;
            }

            let mut parts = line.split_whitespace();
            let id: Node = parse_next_value!(parts, "Node id");
            let x: f64 = parse_next_value!(parts, "x coordinate");
            let y: f64 = parse_next_value!(parts, "y coordinate");

            raise_error_unless!(
                parts.next().is_none(),
                format!("Invalid coordinate line {line:?}; expected end of line")
            );
            raise_error_unless!(
                (1..=n).contains(&id),
                format!("Node id {id} is out of range 1..={n}")
            );
            raise_error_unless!(
                !seen.set_bit(id - 1),
                format!("Node id {id} is given more than once")
            );

            points[id as usize - 1] = Point::new(x, y);
        }

        raise_error_unless!(
            seen.are_all_set(),
            format!("Only {} of {n} node coordinates are given", seen.cardinality())
        );

        let instance = TspInstance::new(points).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;

        Ok(match name {
            Some(name) => instance.with_name(name),
            None => instance,
        })
    }

    fn try_read_tsplib_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = File::open(path)?;
        let buf_reader = BufReader::new(reader);
        Self::try_read_tsplib(buf_reader)
    }
}
