use serde::{Deserialize, Serialize};

use crate::{errors::PreconditionError, graph::*};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        euclidean_distance(self, other)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

pub fn euclidean_distance(a: &Point, b: &Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// A set of points in the plane labelled `0..n`. The distance between two vertices is
/// the Euclidean distance of their points.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedTspInstance")]
pub struct TspInstance {
    name: Option<String>,
    points: Vec<Point>,
}

#[derive(Deserialize)]
struct UncheckedTspInstance {
    name: Option<String>,
    points: Vec<Point>,
}

impl TryFrom<UncheckedTspInstance> for TspInstance {
    type Error = PreconditionError;

    fn try_from(unchecked: UncheckedTspInstance) -> Result<Self, Self::Error> {
        let instance = TspInstance::new(unchecked.points)?;
        Ok(TspInstance {
            name: unchecked.name,
            ..instance
        })
    }
}

impl TspInstance {
    /// Creates an instance where vertex `i` is located at `points[i]`.
    /// Fails if a coordinate is NaN or infinite.
    pub fn new(points: Vec<Point>) -> Result<Self, PreconditionError> {
        if let Some(node) = points.iter().position(|p| !p.is_finite()) {
            return Err(PreconditionError::NonFiniteCoordinate { node: node as Node });
        }

        Ok(Self { name: None, points })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn point(&self, u: Node) -> Point {
        self.points[u as usize]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn distance(&self, u: Node, v: Node) -> f64 {
        self.point(u).distance_to(&self.point(v))
    }

    /// Length of the closed tour visiting `tour` in order and returning to its start
    pub fn tour_cost(&self, tour: &[Node]) -> f64 {
        match tour {
            [] | [_] => 0.0,
            [.., last] => {
                tour.windows(2).map(|w| self.distance(w[0], w[1])).sum::<f64>()
                    + self.distance(*last, tour[0])
            }
        }
    }
}

impl GraphNodeOrder for TspInstance {
    fn number_of_nodes(&self) -> NumNodes {
        self.points.len() as NumNodes
    }
}
