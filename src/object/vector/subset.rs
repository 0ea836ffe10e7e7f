use super::{types::*, OptionNA, Vector};
use crate::error::Error;

/// A single unresolved index value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Integer(i32),
    Double(f64),
    Logical(bool),
    Character(String),
    NA,
}

/// Raw Indices
///
/// Indices as a caller wrote them, before they are checked against a
/// container. Numeric indices are 1-based here and only become 0-based
/// positions once resolved.
///
#[derive(Debug, Clone, PartialEq)]
pub enum RawIndex {
    /// Index omitted in its slot, as in `x[, 1]`
    Missing,
    /// The empty index of `x[]`
    Empty,
    Scalar(Scalar),
    Integer(Vec<Integer>),
    Double(Vec<Double>),
    Logical(Vec<Logical>),
    Character(Vec<Character>),
    /// `count` values starting at `start`, each `stride` apart
    Strided {
        start: i64,
        stride: i64,
        count: usize,
    },
    /// Column-major `nrow x ndim` table of 1-based coordinates, one row per
    /// selected element
    Matrix { data: Vec<Integer>, nrow: usize },
}

impl RawIndex {
    /// A sequence `from:to` in either direction
    pub fn range(from: i64, to: i64) -> Self {
        let stride = if to >= from { 1 } else { -1 };
        RawIndex::Strided {
            start: from,
            stride,
            count: from.abs_diff(to) as usize + 1,
        }
    }

    /// Human readable type name, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            RawIndex::Missing | RawIndex::Empty => "symbol",
            RawIndex::Scalar(Scalar::Integer(_))
            | RawIndex::Integer(_)
            | RawIndex::Strided { .. } => "integer",
            RawIndex::Scalar(Scalar::Double(_)) | RawIndex::Double(_) => "double",
            RawIndex::Scalar(Scalar::Logical(_) | Scalar::NA) | RawIndex::Logical(_) => "logical",
            RawIndex::Scalar(Scalar::Character(_)) | RawIndex::Character(_) => "character",
            RawIndex::Matrix { .. } => "matrix",
        }
    }
}

impl From<Scalar> for RawIndex {
    fn from(value: Scalar) -> Self {
        RawIndex::Scalar(value)
    }
}

impl From<i32> for RawIndex {
    fn from(value: i32) -> Self {
        RawIndex::Scalar(Scalar::Integer(value))
    }
}

impl From<f64> for RawIndex {
    fn from(value: f64) -> Self {
        RawIndex::Scalar(Scalar::Double(value))
    }
}

impl From<bool> for RawIndex {
    fn from(value: bool) -> Self {
        RawIndex::Scalar(Scalar::Logical(value))
    }
}

impl From<&str> for RawIndex {
    fn from(value: &str) -> Self {
        RawIndex::Scalar(Scalar::Character(value.to_string()))
    }
}

impl From<Vec<i32>> for RawIndex {
    fn from(value: Vec<i32>) -> Self {
        RawIndex::Integer(value.into_iter().map(OptionNA::Some).collect())
    }
}

impl From<Vec<Integer>> for RawIndex {
    fn from(value: Vec<Integer>) -> Self {
        RawIndex::Integer(value)
    }
}

impl From<Vec<f64>> for RawIndex {
    fn from(value: Vec<f64>) -> Self {
        RawIndex::Double(value.into_iter().map(OptionNA::Some).collect())
    }
}

impl From<Vec<Double>> for RawIndex {
    fn from(value: Vec<Double>) -> Self {
        RawIndex::Double(value)
    }
}

impl From<Vec<bool>> for RawIndex {
    fn from(value: Vec<bool>) -> Self {
        RawIndex::Logical(value.into_iter().map(OptionNA::Some).collect())
    }
}

impl From<Vec<Logical>> for RawIndex {
    fn from(value: Vec<Logical>) -> Self {
        RawIndex::Logical(value)
    }
}

impl From<Vec<&str>> for RawIndex {
    fn from(value: Vec<&str>) -> Self {
        RawIndex::Character(value.into_iter().map(Character::from).collect())
    }
}

impl From<Vec<Character>> for RawIndex {
    fn from(value: Vec<Character>) -> Self {
        RawIndex::Character(value)
    }
}

impl TryFrom<Vector> for RawIndex {
    type Error = Error;
    fn try_from(value: Vector) -> Result<Self, Self::Error> {
        match value {
            // a vector with a two column dim is a coordinate table
            Vector::Integer(v) if v.dim().is_some_and(|d| d.len() == 2) => {
                let nrow = v.dim().map_or(0, |d| d[0]);
                Ok(RawIndex::Matrix {
                    data: v.to_vec(),
                    nrow,
                })
            }
            Vector::Double(v) if v.dim().is_some_and(|d| d.len() == 2) => {
                let nrow = v.dim().map_or(0, |d| d[0]);
                let data = v
                    .to_vec()
                    .into_iter()
                    .map(|x| match x {
                        OptionNA::Some(x) if x.is_finite() => OptionNA::Some(x.trunc() as i32),
                        _ => OptionNA::NA,
                    })
                    .collect();
                Ok(RawIndex::Matrix { data, nrow })
            }
            Vector::Integer(v) => Ok(RawIndex::Integer(v.to_vec())),
            Vector::Double(v) => Ok(RawIndex::Double(v.to_vec())),
            Vector::Logical(v) => Ok(RawIndex::Logical(v.to_vec())),
            Vector::Character(v) => Ok(RawIndex::Character(v.to_vec())),
            Vector::Raw(_) => Err(Error::InvalidIndexType("raw".to_string())),
        }
    }
}
