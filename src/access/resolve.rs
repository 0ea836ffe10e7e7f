use tracing::trace;

use super::lookup::{NameLookup, NameMatch};
use super::AccessMode;
use crate::error::{AccessResult, Error};
use crate::object::types::*;
use crate::object::{OptionNA, RawIndex, Scalar};

/// A resolved, 0-based position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    At(usize),
    NA,
}

impl Position {
    pub fn index(self) -> Option<usize> {
        match self {
            Position::At(i) => Some(i),
            Position::NA => None,
        }
    }
}

/// Positions
///
/// The resolved positions for one dimension, in selection order. Positions
/// may point past `extent`; extraction reads those as NA and replacement
/// grows the container to reach them.
///
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Positions {
    indices: Vec<Position>,
    extent: usize,
    appended: Vec<Character>,
    select_all: bool,
}

impl Positions {
    pub fn new(indices: Vec<Position>, extent: usize) -> Self {
        Positions {
            indices,
            extent,
            ..Default::default()
        }
    }

    /// Every position of a dimension, in order
    pub fn all(extent: usize) -> Self {
        Positions {
            indices: (0..extent).map(Position::At).collect(),
            extent,
            select_all: true,
            ..Default::default()
        }
    }

    fn with_appended(mut self, appended: Vec<Character>) -> Self {
        self.appended = appended;
        self
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.indices.iter().copied()
    }

    pub fn as_slice(&self) -> &[Position] {
        &self.indices
    }

    /// Extent of the dimension the positions were resolved against
    pub fn extent(&self) -> usize {
        self.extent
    }

    /// Names for the slots created past `extent` by unmatched names
    pub fn appended(&self) -> &[Character] {
        &self.appended
    }

    pub fn is_select_all(&self) -> bool {
        self.select_all
    }

    /// Extent needed to hold every position
    pub fn required_extent(&self) -> usize {
        self.iter()
            .filter_map(Position::index)
            .map(|i| i + 1)
            .fold(self.extent, std::cmp::max)
    }

    pub fn in_bounds(&self) -> bool {
        self.required_extent() <= self.extent
    }

    pub fn has_na(&self) -> bool {
        self.indices.contains(&Position::NA)
    }
}

/// Position Resolver
///
/// Converts one [`RawIndex`] into [`Positions`] for a single dimension of
/// known extent. `[` resolution accepts any number of positions; `[[`
/// resolution yields exactly one or fails.
///
#[derive(Debug, Clone, Copy)]
pub struct PositionResolver {
    mode: AccessMode,
    replace: bool,
    exact: bool,
    ndims: usize,
}

impl PositionResolver {
    pub fn new(mode: AccessMode) -> Self {
        PositionResolver {
            mode,
            replace: false,
            exact: true,
            ndims: 1,
        }
    }

    /// Resolve for writing, allowing positions that grow the container
    pub fn for_replacement(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    /// Prefix matching of names, honored by `[[` only
    pub fn with_exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    /// Number of dimensions indexed together with this one
    pub fn with_ndims(mut self, ndims: usize) -> Self {
        self.ndims = ndims;
        self
    }

    pub fn resolve(
        &self,
        raw: &RawIndex,
        extent: usize,
        names: Option<&[Character]>,
    ) -> AccessResult<Positions> {
        let positions = match self.mode {
            AccessMode::Subset => self.resolve_subset(raw, extent, names),
            AccessMode::Subscript => self.resolve_subscript(raw, extent, names),
        }?;

        trace!(
            mode = %self.mode,
            index = raw.type_name(),
            extent,
            n = positions.len(),
            "resolved positions"
        );

        Ok(positions)
    }

    fn resolve_subset(
        &self,
        raw: &RawIndex,
        extent: usize,
        names: Option<&[Character]>,
    ) -> AccessResult<Positions> {
        match raw {
            RawIndex::Missing | RawIndex::Empty => Ok(Positions::all(extent)),
            RawIndex::Scalar(Scalar::Integer(i)) => self.numeric(vec![Some(*i as i64)], extent),
            RawIndex::Scalar(Scalar::Double(x)) => {
                self.numeric(vec![double_position(&OptionNA::Some(*x))], extent)
            }
            RawIndex::Scalar(Scalar::Logical(b)) => self.logical(&[OptionNA::Some(*b)], extent),
            RawIndex::Scalar(Scalar::NA) => self.logical(&[OptionNA::NA], extent),
            RawIndex::Scalar(Scalar::Character(s)) => {
                self.character(&[Character::from(s.as_str())], extent, names)
            }
            RawIndex::Integer(v) => {
                let values = v.iter().map(|i| i.clone().as_option().map(|i| i as i64));
                self.numeric(values.collect(), extent)
            }
            RawIndex::Double(v) => self.numeric(v.iter().map(double_position).collect(), extent),
            RawIndex::Logical(v) => self.logical(v, extent),
            RawIndex::Character(v) => self.character(v, extent, names),
            RawIndex::Strided {
                start,
                stride,
                count,
            } => {
                if *stride == 0 {
                    return Err(Error::InvalidIndexType("sequence with zero stride".to_string()));
                }
                let values = (0..*count as i64)
                    .map(|k| {
                        k.checked_mul(*stride)
                            .and_then(|step| start.checked_add(step))
                            .map(Some)
                            .ok_or(Error::SubscriptOutOfBounds)
                    })
                    .collect::<AccessResult<Vec<_>>>()?;
                self.numeric(values, extent)
            }
            RawIndex::Matrix { .. } => Err(Error::InvalidIndexType(raw.type_name().to_string())),
        }
    }

    /// Positive, zero and NA values select; negative values exclude.
    fn numeric(&self, values: Vec<Option<i64>>, extent: usize) -> AccessResult<Positions> {
        let has_negative = values.iter().any(|v| matches!(v, Some(i) if *i < 0));
        let has_selecting = values.iter().any(|v| !matches!(v, Some(i) if *i <= 0));

        if has_negative && has_selecting {
            return Err(Error::MixedSign);
        }

        if has_negative {
            let mut keep = vec![true; extent];
            for i in values.iter().flatten() {
                let i = i.unsigned_abs() as usize;
                if (1..=extent).contains(&i) {
                    keep[i - 1] = false;
                }
            }

            let indices = keep
                .into_iter()
                .enumerate()
                .filter(|(_, k)| *k)
                .map(|(i, _)| Position::At(i))
                .collect();

            return Ok(Positions::new(indices, extent));
        }

        let indices = values
            .into_iter()
            .filter_map(|v| match v {
                None => Some(Position::NA),
                Some(0) => None,
                Some(i) => Some(Position::At(i as usize - 1)),
            })
            .collect();

        Ok(Positions::new(indices, extent))
    }

    /// Masks recycle over the longer of the mask and the dimension.
    fn logical(&self, mask: &[Logical], extent: usize) -> AccessResult<Positions> {
        if mask.is_empty() {
            return Ok(Positions::new(vec![], extent));
        }

        if self.ndims > 1 && mask.len() > extent {
            return Err(Error::SubscriptOutOfBounds);
        }

        let n = std::cmp::max(extent, mask.len());
        let indices = (0..n)
            .filter_map(|i| match mask[i % mask.len()] {
                OptionNA::Some(true) => Some(Position::At(i)),
                OptionNA::Some(false) => None,
                OptionNA::NA => Some(Position::NA),
            })
            .collect();

        Ok(Positions::new(indices, extent))
    }

    fn character(
        &self,
        queries: &[Character],
        extent: usize,
        names: Option<&[Character]>,
    ) -> AccessResult<Positions> {
        let names = names.unwrap_or(&[]);
        let matches = NameLookup::find_all(names, queries, extent);

        if !self.replace {
            let indices = matches
                .into_iter()
                .map(|m| match m {
                    NameMatch::Found(i) => Position::At(i),
                    NameMatch::NotFound(_) => Position::NA,
                })
                .collect();
            return Ok(Positions::new(indices, extent));
        }

        let mut appended: Vec<Character> = vec![];
        let indices = matches
            .into_iter()
            .zip(queries.iter())
            .map(|(m, query)| match m {
                NameMatch::Found(i) => Position::At(i),
                NameMatch::NotFound(slot) => {
                    if slot - extent == appended.len() {
                        appended.push(query.clone());
                    }
                    Position::At(slot)
                }
            })
            .collect();

        Ok(Positions::new(indices, extent).with_appended(appended))
    }

    fn resolve_subscript(
        &self,
        raw: &RawIndex,
        extent: usize,
        names: Option<&[Character]>,
    ) -> AccessResult<Positions> {
        match single(raw)? {
            Scalar::NA => Err(subscript_is_na()),
            Scalar::Logical(true) => self.subscript_position(1, extent),
            Scalar::Logical(false) => Err(less_than_one()),
            Scalar::Integer(i) => self.subscript_position(i as i64, extent),
            Scalar::Double(x) if x.is_finite() && x.fract() == 0.0 => {
                self.subscript_position(x as i64, extent)
            }
            Scalar::Double(x) => Err(Error::InvalidSubscript(format!(
                "subscript {x} is not a whole number"
            ))),
            Scalar::Character(s) => self.subscript_name(&s, extent, names),
        }
    }

    fn subscript_position(&self, p: i64, extent: usize) -> AccessResult<Positions> {
        if p == 0 {
            return Err(less_than_one());
        }

        if p < 0 {
            return Err(Error::InvalidSubscript(format!("invalid negative subscript {p}")));
        }

        let i = (p - 1) as usize;
        if i >= extent && !self.can_grow() {
            return Err(Error::SubscriptOutOfBounds);
        }

        Ok(Positions::new(vec![Position::At(i)], extent))
    }

    fn subscript_name(
        &self,
        name: &str,
        extent: usize,
        names: Option<&[Character]>,
    ) -> AccessResult<Positions> {
        let found = match names {
            Some(names) => {
                let lookup = NameLookup::new(names);
                if self.exact {
                    lookup.find(name)
                } else {
                    lookup.find_partial(name)
                }
            }
            None if !self.can_grow() => {
                return Err(Error::InvalidIndexType(
                    "character subscript without names".to_string(),
                ))
            }
            None => None,
        };

        match found {
            Some(i) => Ok(Positions::new(vec![Position::At(i)], extent)),
            None if self.can_grow() && !name.is_empty() => {
                Ok(Positions::new(vec![Position::At(extent)], extent)
                    .with_appended(vec![Character::from(name)]))
            }
            None => Err(Error::SubscriptOutOfBounds),
        }
    }

    fn can_grow(&self) -> bool {
        self.replace && self.ndims == 1
    }
}

/// Truncate toward zero. Non-finite values are NA.
fn double_position(x: &Double) -> Option<i64> {
    match x {
        OptionNA::Some(x) if x.is_finite() => Some(x.trunc() as i64),
        _ => None,
    }
}

pub(super) fn subscript_is_na() -> Error {
    Error::InvalidSubscript("subscript is NA".to_string())
}

pub(super) fn less_than_one() -> Error {
    Error::InvalidSubscript("attempt to select less than one element".to_string())
}

pub(super) fn more_than_one() -> Error {
    Error::InvalidSubscript("attempt to select more than one element".to_string())
}

fn one<T: Clone>(x: &[T]) -> AccessResult<T> {
    match x {
        [x] => Ok(x.clone()),
        [] => Err(less_than_one()),
        _ => Err(more_than_one()),
    }
}

/// Reduce a `[[` index to its single value
fn single(raw: &RawIndex) -> AccessResult<Scalar> {
    let na_or = |x: Option<Scalar>| x.unwrap_or(Scalar::NA);
    match raw {
        RawIndex::Missing | RawIndex::Empty => Err(Error::NoIndex),
        RawIndex::Scalar(s) => Ok(s.clone()),
        RawIndex::Integer(v) => Ok(na_or(one(v)?.as_option().map(Scalar::Integer))),
        RawIndex::Double(v) => Ok(na_or(one(v)?.as_option().map(Scalar::Double))),
        RawIndex::Logical(v) => Ok(na_or(one(v)?.as_option().map(Scalar::Logical))),
        RawIndex::Character(v) => Ok(na_or(one(v)?.as_option().map(Scalar::Character))),
        RawIndex::Strided { stride: 0, .. } => {
            Err(Error::InvalidIndexType("sequence with zero stride".to_string()))
        }
        RawIndex::Strided { start, count: 1, .. } => i32::try_from(*start)
            .map(Scalar::Integer)
            .map_err(|_| Error::SubscriptOutOfBounds),
        RawIndex::Strided { count: 0, .. } => Err(less_than_one()),
        RawIndex::Strided { .. } => Err(more_than_one()),
        RawIndex::Matrix { .. } => Err(Error::InvalidIndexType(raw.type_name().to_string())),
    }
}
