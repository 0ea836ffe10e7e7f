use tracing::trace;

use super::resolve::{
    less_than_one, more_than_one, subscript_is_na, Position, PositionResolver, Positions,
};
use super::{AccessMode, AccessOptions};
use crate::error::{AccessResult, Error};
use crate::object::types::*;
use crate::object::{OptionNA, RawIndex, Vector};

/// Access Plan
///
/// The full description of which slots an access touches. A single index
/// (or an index on a container without dimensions) is a linear plan over
/// the flattened storage. One index per dimension is a box: the cartesian
/// product of each dimension's positions, visited first dimension fastest.
///
#[derive(Debug, Clone, PartialEq)]
pub enum AccessPlan {
    Linear(Positions),
    Box {
        positions: Vec<Positions>,
        shape: Vec<usize>,
        drop: bool,
    },
}

impl AccessPlan {
    pub fn build(
        raw: &[RawIndex],
        target: &Vector,
        options: &AccessOptions,
        replace: bool,
    ) -> AccessResult<AccessPlan> {
        let resolver = PositionResolver::new(options.mode)
            .for_replacement(replace)
            .with_exact(options.exact);

        let plan = match (raw, target.dim()) {
            ([], _) if options.mode == AccessMode::Subscript => return Err(Error::NoIndex),
            ([], _) => AccessPlan::Linear(Positions::all(target.len())),
            ([RawIndex::Matrix { data, nrow }], Some(dim)) if matrix_fits(data, *nrow, dim) => {
                if options.mode == AccessMode::Subscript && *nrow > 1 {
                    return Err(more_than_one());
                }

                let positions = matrix_positions(data, *nrow, dim)?;
                if options.mode == AccessMode::Subscript {
                    match positions.as_slice() {
                        [Position::At(_)] => (),
                        [Position::NA] => return Err(subscript_is_na()),
                        _ => return Err(less_than_one()),
                    }
                }
                AccessPlan::Linear(positions)
            }
            ([RawIndex::Matrix { data, .. }], _) => {
                let names = target.attributes().linear_names().map(|n| n.borrow());
                let names = names.as_ref().map(|n| n.as_slice());
                let index = RawIndex::Integer(data.clone());
                AccessPlan::Linear(resolver.resolve(&index, target.len(), names)?)
            }
            ([index], _) => {
                let names = target.attributes().linear_names().map(|n| n.borrow());
                let names = names.as_ref().map(|n| n.as_slice());
                AccessPlan::Linear(resolver.resolve(index, target.len(), names)?)
            }
            (raw, Some(dim)) if raw.len() == dim.len() => {
                let resolver = resolver.with_ndims(dim.len());
                let attrs = target.attributes();

                let positions = raw
                    .iter()
                    .zip(dim.iter())
                    .enumerate()
                    .map(|(k, (index, extent))| {
                        let names = attrs.dimnames_of(k).map(|n| n.borrow());
                        let names = names.as_ref().map(|n| n.as_slice());
                        resolver.resolve(index, *extent, names)
                    })
                    .collect::<AccessResult<Vec<_>>>()?;

                AccessPlan::Box {
                    positions,
                    shape: dim.to_vec(),
                    drop: options.drop.unwrap_or(true),
                }
            }
            (raw, dim) => {
                return Err(Error::InvalidArgNumber {
                    expected: dim.map_or(1, |d| d.len()),
                    found: raw.len(),
                })
            }
        };

        trace!(
            mode = %options.mode,
            replace,
            linear = plan.is_linear(),
            count = plan.count(),
            "built access plan"
        );

        Ok(plan)
    }

    pub fn is_linear(&self) -> bool {
        matches!(self, AccessPlan::Linear(_))
    }

    /// Number of slots visited, NA positions included
    pub fn count(&self) -> usize {
        match self {
            AccessPlan::Linear(p) => p.len(),
            AccessPlan::Box { positions, .. } => positions.iter().map(|p| p.len()).product(),
        }
    }

    /// Number of slots visited that are not NA, i.e. those a replacement
    /// writes to
    pub fn targets(&self) -> usize {
        match self {
            AccessPlan::Linear(p) => p.iter().filter(|p| *p != Position::NA).count(),
            AccessPlan::Box { positions, .. } => positions
                .iter()
                .map(|p| p.iter().filter(|p| *p != Position::NA).count())
                .product(),
        }
    }

    /// Whether the plan selects every slot of the container unchanged
    pub fn is_select_all(&self) -> bool {
        match self {
            AccessPlan::Linear(p) => p.is_select_all(),
            AccessPlan::Box { .. } => false,
        }
    }

    /// Linear storage offsets of the visited slots, in visiting order, for
    /// storage laid out with `shape`. `None` marks slots that are NA or
    /// outside of `shape`.
    pub fn offsets<'a>(
        &'a self,
        len: usize,
        shape: &'a [usize],
    ) -> Box<dyn Iterator<Item = Option<usize>> + 'a> {
        match self {
            AccessPlan::Linear(p) => Box::new(p.iter().map(move |p| match p {
                Position::At(i) if i < len => Some(i),
                _ => None,
            })),
            AccessPlan::Box { positions, .. } => Box::new(BoxOffsets::new(positions, shape)),
        }
    }
}

/// Column-major walk over the cartesian product of per-dimension positions
pub struct BoxOffsets<'a> {
    positions: &'a [Positions],
    shape: &'a [usize],
    strides: Vec<usize>,
    cursor: Vec<usize>,
    done: bool,
}

impl<'a> BoxOffsets<'a> {
    pub fn new(positions: &'a [Positions], shape: &'a [usize]) -> Self {
        let strides = shape
            .iter()
            .scan(1, |stride, extent| {
                let current = *stride;
                *stride *= extent;
                Some(current)
            })
            .collect();

        BoxOffsets {
            positions,
            shape,
            strides,
            cursor: vec![0; positions.len()],
            done: positions.is_empty() || positions.iter().any(|p| p.is_empty()),
        }
    }
}

impl Iterator for BoxOffsets<'_> {
    type Item = Option<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let offset = self
            .cursor
            .iter()
            .enumerate()
            .try_fold(0, |offset, (k, &c)| match self.positions[k].as_slice()[c] {
                Position::At(i) if i < self.shape[k] => Some(offset + i * self.strides[k]),
                _ => None,
            });

        // advance, first dimension fastest
        let mut k = 0;
        loop {
            if k == self.cursor.len() {
                self.done = true;
                break;
            }
            self.cursor[k] += 1;
            if self.cursor[k] < self.positions[k].len() {
                break;
            }
            self.cursor[k] = 0;
            k += 1;
        }

        Some(offset)
    }
}

fn matrix_fits(data: &[Integer], nrow: usize, dim: &[usize]) -> bool {
    nrow > 0 && data.len() == nrow * dim.len()
}

/// Convert coordinate rows into linear positions
fn matrix_positions(data: &[Integer], nrow: usize, dim: &[usize]) -> AccessResult<Positions> {
    let len = dim.iter().product();
    let mut indices = Vec::with_capacity(nrow);

    'rows: for r in 0..nrow {
        let mut offset = 0;
        let mut stride = 1;
        let mut na = false;

        for (c, extent) in dim.iter().enumerate() {
            match data[c * nrow + r] {
                OptionNA::NA => na = true,
                OptionNA::Some(0) => continue 'rows,
                OptionNA::Some(i) if i < 0 => {
                    return Err(Error::InvalidSubscript(
                        "negative values are not allowed in a matrix subscript".to_string(),
                    ))
                }
                OptionNA::Some(i) if i as usize > *extent => {
                    return Err(Error::SubscriptOutOfBounds)
                }
                OptionNA::Some(i) => offset += (i as usize - 1) * stride,
            }
            stride *= extent;
        }

        indices.push(if na { Position::NA } else { Position::At(offset) });
    }

    Ok(Positions::new(indices, len))
}
