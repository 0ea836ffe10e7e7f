use super::plan::AccessPlan;
use super::resolve::Position;
use super::{AccessMode, AccessOptions};
use crate::error::AccessResult;
use crate::object::coercion::AtomicMode;
use crate::object::rep::Rep;
use crate::object::types::Character;
use crate::object::{Names, RawIndex, Vector};

/// Reads selected elements into a fresh vector
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor {
    options: AccessOptions,
}

impl Extractor {
    pub fn new(options: AccessOptions) -> Self {
        Extractor { options }
    }

    pub fn extract(&self, target: &Vector, indices: &[RawIndex]) -> AccessResult<Vector> {
        let plan = AccessPlan::build(indices, target, &self.options, false)?;
        self.apply(target, &plan)
    }

    /// Extract along an already built plan
    pub fn apply(&self, target: &Vector, plan: &AccessPlan) -> AccessResult<Vector> {
        let mode = self.options.mode;
        Ok(match target {
            Vector::Raw(x) => Vector::Raw(extract_rep(x, plan, mode)?),
            Vector::Logical(x) => Vector::Logical(extract_rep(x, plan, mode)?),
            Vector::Integer(x) => Vector::Integer(extract_rep(x, plan, mode)?),
            Vector::Double(x) => Vector::Double(extract_rep(x, plan, mode)?),
            Vector::Character(x) => Vector::Character(extract_rep(x, plan, mode)?),
        })
    }
}

fn extract_rep<T: AtomicMode>(
    x: &Rep<T>,
    plan: &AccessPlan,
    mode: AccessMode,
) -> AccessResult<Rep<T>> {
    // `x[]` is the container itself, attributes and all
    if mode == AccessMode::Subset && plan.is_select_all() {
        return Ok(x.clone());
    }

    let len = x.len();
    let shape = x.dim().map_or_else(|| vec![len], <[usize]>::to_vec);
    let values: Vec<T> = {
        let data = x.values();
        plan.offsets(len, &shape)
            .map(|offset| offset.map_or_else(T::na, |i| data[i].clone()))
            .collect()
    };

    let rep = Rep::new(values);
    if mode == AccessMode::Subscript {
        return Ok(rep);
    }

    match plan {
        AccessPlan::Linear(positions) => {
            let attrs = x.attributes();
            match (attrs.dim.as_deref(), attrs.linear_names()) {
                // one-dimensional arrays stay arrays
                (Some([_]), Some(names)) if attrs.names.is_none() => {
                    let names = gather_names(names, positions.iter());
                    rep.with_dim(vec![positions.len()])?
                        .with_dimnames(vec![Some(names)])
                }
                (Some([_]), None) => rep.with_dim(vec![positions.len()]),
                (_, Some(names)) => rep.with_names(gather_names(names, positions.iter())),
                (_, None) => Ok(rep),
            }
        }
        AccessPlan::Box {
            positions, drop, ..
        } => {
            let counts: Vec<usize> = positions.iter().map(|p| p.len()).collect();
            let attrs = x.attributes();
            let dimnames: Option<Vec<Option<Vec<Character>>>> = attrs.dimnames.as_ref().map(|_| {
                positions
                    .iter()
                    .enumerate()
                    .map(|(k, p)| attrs.dimnames_of(k).map(|n| gather_names(n, p.iter())))
                    .collect()
            });

            let kept: Vec<usize> = (0..counts.len())
                .filter(|&k| !*drop || counts[k] != 1)
                .collect();

            if kept.len() >= 2 {
                let rep = rep.with_dim(kept.iter().map(|&k| counts[k]).collect())?;
                return match dimnames {
                    Some(mut dimnames) => {
                        let dimnames = kept.iter().map(|&k| dimnames[k].take()).collect();
                        rep.with_dimnames(dimnames)
                    }
                    None => Ok(rep),
                };
            }

            // a one dimensional result takes its names from the only named
            // dimension that could have produced them
            let Some(mut dimnames) = dimnames else {
                return Ok(rep);
            };

            let len = rep.len();
            let source = {
                let mut candidates =
                    (0..counts.len()).filter(|&k| counts[k] == len && dimnames[k].is_some());
                match (candidates.next(), candidates.next()) {
                    (Some(k), None) => Some(k),
                    _ => None,
                }
            };

            match source.and_then(|k| dimnames[k].take()) {
                Some(names) => rep.with_names(names),
                None => Ok(rep),
            }
        }
    }
}

/// Names of the selected slots; slots past the end get `""`
fn gather_names(names: &Names, positions: impl Iterator<Item = Position>) -> Vec<Character> {
    let names = names.borrow();
    positions
        .map(|p| match p {
            Position::At(i) if i < names.len() => names[i].clone(),
            _ => Character::from(""),
        })
        .collect()
}
