use tracing::{debug, warn};

use super::plan::AccessPlan;
use super::resolve::Positions;
use super::{AccessMode, AccessOptions};
use crate::error::{AccessResult, Error};
use crate::internal_err;
use crate::object::coercion::{AtomicMode, Coercion, DefaultCoercion};
use crate::object::rep::Rep;
use crate::object::types::Character;
use crate::object::{CowObj, Ownership, RawIndex, Vector};

/// Longest vector that replacement will grow to
const MAX_LENGTH: usize = i32::MAX as usize;

/// The outcome of a replacement, along with any warnings raised on the way
#[derive(Debug, Clone, PartialEq)]
pub struct Replacement {
    pub result: Vector,
    pub warnings: Vec<Error>,
}

impl Replacement {
    pub fn new(result: Vector) -> Self {
        Replacement {
            result,
            warnings: vec![],
        }
    }
}

/// Mutator
///
/// Writes values into selected positions. The target is widened to the
/// common type of target and value, grown when positions reach past its
/// end, and either written in place or copied first depending on its
/// [`Ownership`]. Values recycle over the written positions.
///
#[derive(Debug, Clone)]
pub struct Mutator<C = DefaultCoercion> {
    options: AccessOptions,
    ownership: Ownership,
    coercion: C,
}

impl Mutator<DefaultCoercion> {
    pub fn new(options: AccessOptions) -> Self {
        Mutator {
            options,
            ownership: Ownership::Exclusive,
            coercion: DefaultCoercion,
        }
    }
}

impl<C: Coercion> Mutator<C> {
    pub fn with_ownership(mut self, ownership: Ownership) -> Self {
        self.ownership = ownership;
        self
    }

    pub fn with_coercion<D: Coercion>(self, coercion: D) -> Mutator<D> {
        Mutator {
            options: self.options,
            ownership: self.ownership,
            coercion,
        }
    }

    pub fn replace(
        &self,
        target: Vector,
        indices: &[RawIndex],
        value: &Vector,
    ) -> AccessResult<Replacement> {
        let vtype = self.coercion.widen(target.vtype(), value.vtype())?;

        // conversion allocates, leaving nothing to share
        let (target, ownership) = if target.vtype() != vtype {
            (self.coercion.convert(target, vtype)?, Ownership::Exclusive)
        } else {
            (target, self.ownership)
        };

        let value = if value.vtype() != vtype {
            self.coercion.convert(value.clone(), vtype)?
        } else {
            value.clone()
        };

        let plan = AccessPlan::build(indices, &target, &self.options, true)?;

        if self.options.mode == AccessMode::Subscript {
            match value.len() {
                0 => return Err(Error::ZeroLengthReplacement),
                1 => (),
                _ => return Err(Error::MoreElementsSupplied),
            }
        }

        let targets = plan.targets();
        if targets == 0 {
            return Ok(Replacement::new(target));
        }

        if value.is_empty() {
            return Err(Error::ZeroLengthReplacement);
        }

        let mut warnings = vec![];
        if targets % value.len() != 0 {
            let warning = Error::RecycleLengthMismatch {
                targets,
                values: value.len(),
            };
            warn!("{warning}");
            warnings.push(warning);
        }

        let target = match ownership {
            Ownership::Shared => {
                debug!(len = target.len(), "copying shared vector before replacement");
                target.materialize()
            }
            Ownership::Exclusive => target,
        };

        let result = match (target, value) {
            (Vector::Raw(x), Vector::Raw(v)) => Vector::Raw(replace_rep(x, &plan, &v)?),
            (Vector::Logical(x), Vector::Logical(v)) => Vector::Logical(replace_rep(x, &plan, &v)?),
            (Vector::Integer(x), Vector::Integer(v)) => Vector::Integer(replace_rep(x, &plan, &v)?),
            (Vector::Double(x), Vector::Double(v)) => Vector::Double(replace_rep(x, &plan, &v)?),
            (Vector::Character(x), Vector::Character(v)) => {
                Vector::Character(replace_rep(x, &plan, &v)?)
            }
            (x, v) => {
                return Err(internal_err!(format!(
                    "coercion produced mismatched types {} and {}",
                    x.vtype(),
                    v.vtype()
                )))
            }
        };

        Ok(Replacement { result, warnings })
    }
}

fn replace_rep<T: AtomicMode>(
    mut x: Rep<T>,
    plan: &AccessPlan,
    value: &Rep<T>,
) -> AccessResult<Rep<T>> {
    match plan {
        AccessPlan::Linear(positions) => {
            if !positions.in_bounds() {
                grow_linear(&mut x, positions)?;
            }
        }
        AccessPlan::Box {
            positions, shape, ..
        } => {
            let exceeding: Vec<usize> = (0..positions.len())
                .filter(|&k| !positions[k].in_bounds())
                .collect();

            match exceeding.as_slice() {
                [] => (),
                [k] => grow_dimension(&mut x, shape, *k, &positions[*k])?,
                _ => return Err(Error::SubscriptOutOfBounds),
            }
        }
    }

    let len = x.len();
    let shape = x.dim().map_or_else(|| vec![len], <[usize]>::to_vec);

    // copied up front, the value may share storage with the target
    let values = value.to_vec();
    let mut values = values.iter().cycle();

    x.with_inner_mut(|data| {
        for offset in plan.offsets(len, &shape).flatten() {
            if let Some(v) = values.next() {
                data[offset] = v.clone();
            }
        }
    });

    x.refresh_complete();
    Ok(x)
}

/// Extend a vector to reach every position. Dimensions no longer apply;
/// names, or the names of a one-dimensional array, are padded, taking new
/// names from unmatched name indices.
fn grow_linear<T: AtomicMode>(x: &mut Rep<T>, positions: &Positions) -> AccessResult<()> {
    let old_len = x.len();
    let new_len = positions.required_extent();
    if new_len > MAX_LENGTH {
        return Err(Error::SubscriptOutOfBounds);
    }

    debug!(from = old_len, to = new_len, "growing vector");
    x.with_inner_mut(|data| data.resize(new_len, T::na()));

    let attrs = x.attributes_mut();
    let names = attrs.linear_names().map(|n| n.borrow().to_vec());
    attrs.dim = None;
    attrs.dimnames = None;

    let appended = positions.appended();
    if names.is_some() || !appended.is_empty() {
        let names = padded_names(names, old_len, new_len, appended);
        attrs.names = Some(CowObj::from(names));
    }

    Ok(())
}

/// Extend one dimension of an array, moving existing values to their
/// coordinates in the larger layout.
fn grow_dimension<T: AtomicMode>(
    x: &mut Rep<T>,
    shape: &[usize],
    dim: usize,
    positions: &Positions,
) -> AccessResult<()> {
    let mut new_shape = shape.to_vec();
    new_shape[dim] = positions.required_extent();

    let new_len = new_shape
        .iter()
        .try_fold(1_usize, |len, extent| len.checked_mul(*extent))
        .filter(|len| *len <= MAX_LENGTH)
        .ok_or(Error::SubscriptOutOfBounds)?;

    debug!(?shape, ?new_shape, "growing array");

    let old = x.to_vec();
    let mut data = vec![T::na(); new_len];
    for (offset, value) in old.into_iter().enumerate() {
        let mut rest = offset;
        let mut new_offset = 0;
        let mut stride = 1;
        for (extent, new_extent) in shape.iter().zip(new_shape.iter()) {
            new_offset += (rest % extent) * stride;
            rest /= extent;
            stride *= new_extent;
        }
        data[new_offset] = value;
    }

    x.with_inner_mut(|values| *values = data);

    let attrs = x.attributes_mut();
    attrs.names = None;

    let appended = positions.appended();
    let has_names = attrs.dimnames_of(dim).is_some();
    if has_names || !appended.is_empty() {
        let names = attrs.dimnames_of(dim).map(|n| n.borrow().to_vec());
        let names = padded_names(names, shape[dim], new_shape[dim], appended);
        let dimnames = attrs.dimnames.get_or_insert_with(|| vec![None; shape.len()]);
        dimnames[dim] = Some(CowObj::from(names));
    }

    attrs.dim = Some(new_shape);
    Ok(())
}

fn padded_names(
    names: Option<Vec<Character>>,
    old_len: usize,
    new_len: usize,
    appended: &[Character],
) -> Vec<Character> {
    let mut names = names.unwrap_or_else(|| vec![Character::from(""); old_len]);
    names.resize(new_len, Character::from(""));
    for (name, slot) in appended.iter().zip(names.iter_mut().skip(old_len)) {
        *slot = name.clone();
    }
    names
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::object::coercion::VecType;
    use crate::object::types::*;
    use crate::object::{OptionNA, ViewMut};
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rstest::rstest;

    fn subset(x: Vector, indices: &[RawIndex], value: &Vector) -> AccessResult<Replacement> {
        Mutator::new(AccessOptions::default()).replace(x, indices, value)
    }

    fn subscript(x: Vector, indices: &[RawIndex], value: &Vector) -> AccessResult<Replacement> {
        Mutator::new(AccessOptions::new(AccessMode::Subscript)).replace(x, indices, value)
    }

    fn chr(x: &[&str]) -> Vec<Character> {
        x.iter().map(|&s| Character::from(s)).collect()
    }

    fn seq(n: i32) -> Vec<i32> {
        (1..=n).collect()
    }

    fn minus_ones(n: usize) -> Vector {
        Vector::from(vec![-1; n])
    }

    #[test]
    fn writes_in_place_when_exclusive() {
        let x = Vector::from(vec![1, 2, 3, 4]);
        let view = x.view_mut();

        let r = subset(x, &[RawIndex::from(vec![2, 3])], &Vector::from(vec![20, 30])).unwrap();
        assert_eq!(r.result, Vector::from(vec![1, 20, 30, 4]));
        assert!(r.result.ptr_eq(&view));
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn copies_when_shared() {
        let x = Vector::from(vec![1, 2, 3, 4]);
        let observer = x.view_mut();

        let r = Mutator::new(AccessOptions::default())
            .with_ownership(Ownership::Shared)
            .replace(x, &[RawIndex::from(1)], &Vector::from(vec![100]))
            .unwrap();

        assert_eq!(r.result, Vector::from(vec![100, 2, 3, 4]));
        assert_eq!(observer, Vector::from(vec![1, 2, 3, 4]));
        assert!(!r.result.ptr_eq(&observer));
    }

    #[test]
    fn inferred_ownership_protects_copies() {
        let x = Vector::from(vec![1, 2, 3]);
        let copy = x.clone();
        assert_eq!(x.ownership(), Ownership::Shared);

        let ownership = x.ownership();
        let r = Mutator::new(AccessOptions::default())
            .with_ownership(ownership)
            .replace(x, &[RawIndex::from(3)], &Vector::from(vec![0]))
            .unwrap();

        assert_eq!(r.result, Vector::from(vec![1, 2, 0]));
        assert_eq!(copy, Vector::from(vec![1, 2, 3]));
    }

    #[test]
    fn growth_by_one_stays_complete() {
        let x = Vector::from(vec![0.0, 1.0, 2.0, 3.0]);
        let r = subset(x, &[RawIndex::from(5)], &Vector::from(vec![-1.0])).unwrap();
        assert_eq!(r.result, Vector::from(vec![0.0, 1.0, 2.0, 3.0, -1.0]));
        assert_eq!(r.result.len(), 5);
        assert!(r.result.is_complete());
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn growth_fills_with_na() {
        let x = Vector::from(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let r = subset(x, &[RawIndex::from(10)], &Vector::from(vec![10.0])).unwrap();
        let mut expected: Vec<Double> = (1..=5).map(|i| OptionNA::Some(i as f64)).collect();
        expected.extend(vec![OptionNA::NA; 4]);
        expected.push(OptionNA::Some(10.0));
        assert_eq!(r.result, Vector::from(expected));
        assert!(!r.result.is_complete());
    }

    #[test]
    fn growth_pads_names_and_drops_dims() {
        let x = Vector::from(seq(4))
            .with_dim(vec![2, 2])
            .unwrap();
        let r = subset(x, &[RawIndex::from(6)], &Vector::from(vec![6])).unwrap();
        assert_eq!(r.result.dim(), None);
        assert_eq!(r.result.len(), 6);

        let x = Vector::from(vec![1, 2]).with_names(chr(&["a", "b"])).unwrap();
        let r = subset(x, &[RawIndex::from(4)], &Vector::from(vec![4])).unwrap();
        let values = vec![OptionNA::Some(1), OptionNA::Some(2), OptionNA::NA, OptionNA::Some(4)];
        let expected = Vector::from(values)
            .with_names(chr(&["a", "b", "", ""]))
            .unwrap();
        assert_eq!(r.result, expected);
    }

    #[test]
    fn unmatched_names_append() {
        let x = Vector::from(vec![1, 2]).with_names(chr(&["a", "b"])).unwrap();
        let r = subset(
            x,
            &[RawIndex::from(vec!["c", "a", "c"])],
            &Vector::from(vec![10, 20, 30]),
        )
        .unwrap();

        let expected = Vector::from(vec![20, 2, 30])
            .with_names(chr(&["a", "b", "c"]))
            .unwrap();
        assert_eq!(r.result, expected);
    }

    #[test]
    fn names_on_unnamed_vectors() {
        let x = Vector::from(vec![1, 2]);
        let r = subset(x, &[RawIndex::from("z")], &Vector::from(vec![3])).unwrap();
        let expected = Vector::from(vec![1, 2, 3]).with_names(chr(&["", "", "z"])).unwrap();
        assert_eq!(r.result, expected);
    }

    #[test]
    fn value_names_are_ignored() {
        let x = Vector::from(vec![1, 2]).with_names(chr(&["a", "b"])).unwrap();
        let value = Vector::from(vec![9]).with_names(chr(&["z"])).unwrap();
        let r = subset(x, &[RawIndex::from(1)], &value).unwrap();
        assert_eq!(r.result, Vector::from(vec![9, 2]).with_names(chr(&["a", "b"])).unwrap());
    }

    #[test]
    fn values_recycle_over_targets() {
        let x = Vector::from(vec![0, 1, 2, 3]);
        let mask = RawIndex::from(vec![true, false]);
        let r = subset(x, &[mask], &Vector::from(vec![-1, -2])).unwrap();
        assert_eq!(r.result, Vector::from(vec![-1, 1, -2, 3]));
        assert!(r.warnings.is_empty());

        let x = Vector::from(vec![0, 0, 0]);
        let r = subset(x, &[RawIndex::Empty], &Vector::from(vec![1, 2])).unwrap();
        assert_eq!(r.result, Vector::from(vec![1, 2, 1]));
        assert_eq!(r.warnings, vec![Error::RecycleLengthMismatch { targets: 3, values: 2 }]);
        assert!(r.warnings[0].is_warning());
    }

    #[test]
    fn scalar_true_recycles_over_everything() {
        let x = Vector::from(vec![0, 0, 0, 0]);
        let r = subset(x, &[RawIndex::from(true)], &Vector::from(vec![7, 8])).unwrap();
        assert_eq!(r.result, Vector::from(vec![7, 8, 7, 8]));
    }

    #[rstest]
    #[case(RawIndex::from(vec![2, 4]))]
    #[case(RawIndex::from(vec![-1]))]
    #[case(RawIndex::from(vec![true, false, true]))]
    #[case(RawIndex::from(vec!["c", "a"]))]
    fn replacing_a_selection_with_itself_changes_nothing(#[case] index: RawIndex) {
        let x = Vector::from(vec![1.5, 2.5, 3.5, 4.5])
            .with_names(chr(&["a", "b", "c", "d"]))
            .unwrap();
        let indices = [index];
        let selected =
            crate::access::extract(&x, AccessMode::Subset, &indices, true, None).unwrap();

        let r = subset(x.clone(), &indices, &selected).unwrap();
        assert_eq!(r.result, x);
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn na_positions_are_skipped() {
        let x = Vector::from(vec![1, 2, 3, 4]);
        let mask = RawIndex::Logical(vec![OptionNA::Some(true), OptionNA::NA]);
        let r = subset(x, &[mask], &Vector::from(vec![0])).unwrap();
        assert_eq!(r.result, Vector::from(vec![0, 2, 0, 4]));
        assert!(r.result.is_complete());

        // skipped positions consume no value
        let x = Vector::from(vec![1, 2, 3]);
        let index = RawIndex::Integer(vec![OptionNA::Some(1), OptionNA::NA, OptionNA::Some(3)]);
        let r = subset(x, &[index], &Vector::from(vec![10, 30])).unwrap();
        assert_eq!(r.result, Vector::from(vec![10, 2, 30]));
    }

    #[rstest]
    #[case(VecType::Integer, VecType::Logical, VecType::Integer)]
    #[case(VecType::Logical, VecType::Double, VecType::Double)]
    #[case(VecType::Integer, VecType::Character, VecType::Character)]
    #[case(VecType::Double, VecType::Integer, VecType::Double)]
    #[case(VecType::Character, VecType::Logical, VecType::Character)]
    fn result_type_is_widest(
        #[case] target: VecType,
        #[case] value: VecType,
        #[case] expected: VecType,
    ) {
        let x = Vector::from(vec![true, false]).as_type(target).unwrap();
        let v = Vector::from(vec![true]).as_type(value).unwrap();
        let r = subset(x, &[RawIndex::from(1)], &v).unwrap();
        assert_eq!(r.result.vtype(), expected);
    }

    #[test]
    fn widening_happens_without_targets() {
        let x = Vector::from(vec![1, 2]);
        let r = subset(x, &[RawIndex::from(0)], &Vector::from(vec!["a"])).unwrap();
        assert_eq!(r.result, Vector::from(vec!["1", "2"]));
    }

    #[test]
    fn raw_mixing_fails() {
        let x = Vector::from(Rep::<Raw>::new(vec![1, 2]));
        let r = subset(x, &[RawIndex::from(1)], &Vector::from(vec![1]));
        assert_eq!(
            r,
            Err(Error::TypeCoercionFailure {
                from: VecType::Integer,
                to: VecType::Raw
            })
        );
    }

    #[test]
    fn raw_growth_fills_zero() {
        let x = Vector::from(Rep::<Raw>::new(vec![1]));
        let v = Vector::from(Rep::<Raw>::new(vec![9]));
        let r = subset(x, &[RawIndex::from(3)], &v).unwrap();
        assert_eq!(r.result, Vector::from(Rep::<Raw>::new(vec![1, 0, 9])));
        assert!(r.result.is_complete());
    }

    #[test]
    fn zero_length_values() {
        let x = Vector::from(vec![1, 2]);
        let empty = Vector::from(Vec::<i32>::new());
        assert_eq!(
            subset(x.clone(), &[RawIndex::from(1)], &empty),
            Err(Error::ZeroLengthReplacement)
        );
        assert_eq!(
            subset(x.clone(), &[RawIndex::from(Vec::<i32>::new())], &empty).map(|r| r.result),
            Ok(x)
        );
    }

    #[test]
    fn completeness_after_replacement() {
        // writing a complete value over the only NA completes the vector
        let x = Vector::from(vec![OptionNA::Some(1), OptionNA::NA]);
        let r = subset(x, &[RawIndex::from(2)], &Vector::from(vec![2])).unwrap();
        assert!(r.result.is_complete());

        // writing NA makes it incomplete
        let x = Vector::from(vec![1, 2]);
        let r = subset(x, &[RawIndex::from(1)], &Vector::from(vec![OptionNA::<i32>::NA])).unwrap();
        assert!(!r.result.is_complete());
    }

    #[test]
    fn box_replacement() {
        let cases: Vec<(Vec<usize>, Vec<RawIndex>, Vec<usize>)> = vec![
            (
                vec![5, 4],
                vec![RawIndex::from(vec![2, 3, 4]), RawIndex::from(vec![2, 3])],
                vec![6, 7, 8, 11, 12, 13],
            ),
            (
                vec![3, 3],
                vec![RawIndex::from(vec![2, 3]), RawIndex::from(vec![2, 3])],
                vec![4, 5, 7, 8],
            ),
            (
                vec![2, 3, 4],
                vec![RawIndex::from(2), RawIndex::from(2), RawIndex::from(2)],
                vec![9],
            ),
            (
                vec![2, 3, 4],
                vec![
                    RawIndex::from(2),
                    RawIndex::from(vec![2, 3]),
                    RawIndex::from(vec![2, 3, 4]),
                ],
                vec![9, 11, 15, 17, 21, 23],
            ),
        ];

        for (dim, indices, replaced) in cases {
            let n: usize = dim.iter().product();
            let x = Vector::from((0..n as i32).collect::<Vec<_>>())
                .with_dim(dim.clone())
                .unwrap();

            let r = subset(x, &indices, &minus_ones(1)).unwrap();

            let expected: Vec<i32> = (0..n)
                .map(|i| if replaced.contains(&i) { -1 } else { i as i32 })
                .collect();
            let expected = Vector::from(expected).with_dim(dim).unwrap();
            assert_eq!(r.result, expected);
        }
    }

    #[test]
    fn box_growth_along_one_dimension() {
        let x = Vector::from(seq(4))
            .with_dim(vec![2, 2])
            .unwrap()
            .with_dimnames(vec![Some(chr(&["a", "b"])), None])
            .unwrap();

        let r = subset(x, &[RawIndex::from(3), RawIndex::Missing], &Vector::from(vec![0])).unwrap();
        let expected = Vector::from(vec![
            OptionNA::Some(1),
            OptionNA::Some(2),
            OptionNA::Some(0),
            OptionNA::Some(3),
            OptionNA::Some(4),
            OptionNA::Some(0),
        ])
        .with_dim(vec![3, 2])
        .unwrap()
        .with_dimnames(vec![Some(chr(&["a", "b", ""])), None])
        .unwrap();
        assert_eq!(r.result, expected);

        let x = Vector::from(seq(4)).with_dim(vec![2, 2]).unwrap();
        let r = subset(x, &[RawIndex::from(1), RawIndex::from(3)], &Vector::from(vec![9])).unwrap();
        let expected = Vector::from(vec![
            OptionNA::Some(1),
            OptionNA::Some(2),
            OptionNA::Some(3),
            OptionNA::Some(4),
            OptionNA::Some(9),
            OptionNA::NA,
        ])
        .with_dim(vec![2, 3])
        .unwrap();
        assert_eq!(r.result, expected);
        assert!(!r.result.is_complete());
    }

    #[test]
    fn box_growth_along_two_dimensions_fails() {
        let x = Vector::from(seq(4)).with_dim(vec![2, 2]).unwrap();
        let r = subset(x, &[RawIndex::from(3), RawIndex::from(3)], &Vector::from(vec![0]));
        assert_eq!(r, Err(Error::SubscriptOutOfBounds));
    }

    #[test]
    fn subscript_replacement() {
        let x = Vector::from(vec![1, 2, 3]).with_names(chr(&["a", "b", "c"])).unwrap();

        let r = subscript(x.clone(), &[RawIndex::from("b")], &Vector::from(vec![20])).unwrap();
        let expected = Vector::from(vec![1, 20, 3])
            .with_names(chr(&["a", "b", "c"]))
            .unwrap();
        assert_eq!(r.result, expected);

        let r = subscript(x.clone(), &[RawIndex::from("d")], &Vector::from(vec![4])).unwrap();
        assert_eq!(
            r.result,
            Vector::from(vec![1, 2, 3, 4])
                .with_names(chr(&["a", "b", "c", "d"]))
                .unwrap()
        );

        assert_eq!(
            subscript(x.clone(), &[RawIndex::from(1)], &Vector::from(vec![1, 2])),
            Err(Error::MoreElementsSupplied)
        );
        assert_eq!(
            subscript(x.clone(), &[RawIndex::from(1)], &Vector::from(Vec::<i32>::new())),
            Err(Error::ZeroLengthReplacement)
        );
        assert_eq!(
            subscript(x, &[RawIndex::Missing], &Vector::from(vec![1])),
            Err(Error::NoIndex)
        );
    }

    #[test]
    fn subscript_replacement_with_a_coordinate_matrix() {
        let x = Vector::from(seq(6)).with_dim(vec![2, 3]).unwrap();

        let cell = RawIndex::Matrix {
            data: vec![OptionNA::Some(1), OptionNA::Some(2)],
            nrow: 1,
        };
        let r = subscript(x.clone(), &[cell], &Vector::from(vec![0])).unwrap();
        let expected = Vector::from(vec![1, 2, 0, 4, 5, 6]).with_dim(vec![2, 3]).unwrap();
        assert_eq!(r.result, expected);

        let rows = RawIndex::Matrix {
            data: vec![1, 2, 1, 3].into_iter().map(OptionNA::Some).collect(),
            nrow: 2,
        };
        assert!(matches!(
            subscript(x, &[rows], &Vector::from(vec![0])),
            Err(Error::InvalidSubscript(_))
        ));
    }

    #[test]
    fn one_dimensional_arrays_by_name() {
        let x = Vector::from(vec![1, 2])
            .with_dim(vec![2])
            .unwrap()
            .with_dimnames(vec![Some(chr(&["a", "b"]))])
            .unwrap();

        let r = subset(x.clone(), &[RawIndex::from("b")], &Vector::from(vec![20])).unwrap();
        let expected = Vector::from(vec![1, 20])
            .with_dim(vec![2])
            .unwrap()
            .with_dimnames(vec![Some(chr(&["a", "b"]))])
            .unwrap();
        assert_eq!(r.result, expected);

        let r = subset(x, &[RawIndex::from("c")], &Vector::from(vec![3])).unwrap();
        let expected = Vector::from(vec![1, 2, 3])
            .with_names(chr(&["a", "b", "c"]))
            .unwrap();
        assert_eq!(r.result, expected);
    }

    #[test]
    fn subscript_grows_by_one_position() {
        let x = Vector::from(vec![1, 2]);
        let r = subscript(x, &[RawIndex::from(4)], &Vector::from(vec![4])).unwrap();
        let values = vec![OptionNA::Some(1), OptionNA::Some(2), OptionNA::NA, OptionNA::Some(4)];
        assert_eq!(r.result, Vector::from(values));
    }

    #[test]
    fn self_assignment_through_a_view() {
        let x = Vector::from(vec![1, 2, 3]);
        let value = x.view_mut();
        let r = subset(x, &[RawIndex::from(vec![3, 2, 1])], &value).unwrap();
        assert_eq!(r.result, Vector::from(vec![3, 2, 1]));
        assert_eq!(value, Vector::from(vec![3, 2, 1]));
    }

    #[test]
    fn replaced_then_extracted_values_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20;

        for _ in 0..50 {
            // distinct positions so later writes do not mask earlier ones
            let mut idx: Vec<i32> = seq(n);
            for i in (1..idx.len()).rev() {
                idx.swap(i, rng.gen_range(0..=i));
            }
            idx.truncate(rng.gen_range(1..n as usize));

            let value: Vec<f64> = idx.iter().map(|_| rng.gen::<f64>()).collect();
            let x = Vector::from(vec![0.0; n as usize]);
            let index = [RawIndex::from(idx)];
            let r = subset(x, &index, &Vector::from(value.clone())).unwrap();

            let y = crate::access::extract(&r.result, AccessMode::Subset, &index, true, None)
                .unwrap();
            assert_eq!(y, Vector::from(value));
        }
    }
}
