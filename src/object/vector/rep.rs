use std::cell::Ref;
use std::fmt::Display;
use std::rc::Rc;

use super::coercion::{AtomicMode, CoercibleInto};
use super::types::*;
use crate::error::{AccessResult, Error};
use crate::object::{Attributes, CowObj, Names, Ownership, ViewMut};

/// Vector storage with its structural attributes
///
/// Values live behind a [`CowObj`], so cloning a `Rep` is a lazy copy while
/// [`ViewMut::view_mut`] hands out an alias that observes in-place writes.
/// `complete` is `true` only when no element is NA.
#[derive(Debug, Clone, PartialEq)]
pub struct Rep<T: Clone> {
    values: CowObj<Vec<T>>,
    attrs: Attributes,
    complete: bool,
}

impl<T: AtomicMode> Default for Rep<T> {
    fn default() -> Self {
        Rep::new(Vec::new())
    }
}

impl<T: AtomicMode> Rep<T> {
    /// Create a plain vector, deriving its completeness
    ///
    /// ```
    /// use r_access::object::rep::Rep;
    /// use r_access::object::OptionNA;
    ///
    /// let x = Rep::new(vec![OptionNA::Some(1), OptionNA::NA]);
    /// assert_eq!(x.len(), 2);
    /// assert!(!x.is_complete());
    /// ```
    ///
    pub fn new(values: Vec<T>) -> Self {
        let complete = !values.iter().any(|x| x.is_na());
        Rep {
            values: CowObj::from(values),
            attrs: Attributes::default(),
            complete,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the values immutably
    pub fn values(&self) -> Ref<'_, Rc<Vec<T>>> {
        self.values.borrow()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.values.borrow().as_ref().clone()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }

    pub fn dim(&self) -> Option<&[usize]> {
        self.attrs.dim.as_deref()
    }

    pub fn names(&self) -> Option<&Names> {
        self.attrs.names.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Rescan the values after a write
    pub(crate) fn refresh_complete(&mut self) {
        self.complete = !self.values.borrow().iter().any(|x| x.is_na());
    }

    pub(crate) fn with_inner_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Vec<T>) -> R,
    {
        self.values.with_inner_mut(f)
    }

    pub fn ownership(&self) -> Ownership {
        self.values.ownership()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.values.ptr_eq(&other.values)
    }

    /// Copy the values into fresh storage
    pub fn materialize(&self) -> Self {
        Rep {
            values: self.values.materialize(),
            attrs: self.attrs.clone(),
            complete: self.complete,
        }
    }

    pub fn with_dim(mut self, dim: Vec<usize>) -> AccessResult<Self> {
        let expected: usize = dim.iter().product();
        if expected != self.len() {
            return Err(Error::DimsLengthMismatch {
                expected,
                found: self.len(),
            });
        }
        self.attrs.dim = Some(dim);
        self.attrs.dimnames = None;
        Ok(self)
    }

    pub fn with_names(mut self, names: Vec<Character>) -> AccessResult<Self> {
        if names.len() != self.len() {
            return Err(Error::AttributeLength {
                attribute: "names",
                expected: self.len(),
                found: names.len(),
            });
        }
        self.attrs.names = Some(CowObj::from(names));
        Ok(self)
    }

    pub fn with_dimnames(mut self, dimnames: Vec<Option<Vec<Character>>>) -> AccessResult<Self> {
        let dim = self.attrs.dim.clone().unwrap_or_default();
        if dimnames.len() != dim.len() {
            return Err(Error::AttributeLength {
                attribute: "dimnames",
                expected: dim.len(),
                found: dimnames.len(),
            });
        }

        for (names, extent) in dimnames.iter().zip(dim.iter()) {
            if let Some(names) = names {
                if names.len() != *extent {
                    return Err(Error::AttributeLength {
                        attribute: "dimnames",
                        expected: *extent,
                        found: names.len(),
                    });
                }
            }
        }

        self.attrs.dimnames = Some(
            dimnames
                .into_iter()
                .map(|n| n.map(CowObj::from))
                .collect(),
        );
        Ok(self)
    }

    /// Convert each element, keeping attributes
    pub fn as_mode<U>(&self) -> Rep<U>
    where
        T: CoercibleInto<U>,
        U: AtomicMode,
    {
        let values: Vec<U> = self
            .values
            .borrow()
            .iter()
            .map(|x| x.clone().coerce_into())
            .collect();

        let mut rep = Rep::new(values);
        rep.attrs = self.attrs.clone();
        rep
    }
}

impl<T: Clone> ViewMut for Rep<T> {
    fn view_mut(&self) -> Self {
        Rep {
            values: self.values.view_mut(),
            attrs: self.attrs.clone(),
            complete: self.complete,
        }
    }
}

impl<T: AtomicMode> From<Vec<T>> for Rep<T> {
    fn from(values: Vec<T>) -> Self {
        Rep::new(values)
    }
}

impl From<Vec<f64>> for Rep<Double> {
    fn from(x: Vec<f64>) -> Self {
        Rep::new(x.into_iter().map(Double::Some).collect())
    }
}

impl From<Vec<i32>> for Rep<Integer> {
    fn from(x: Vec<i32>) -> Self {
        Rep::new(x.into_iter().map(Integer::Some).collect())
    }
}

impl From<Vec<bool>> for Rep<Logical> {
    fn from(x: Vec<bool>) -> Self {
        Rep::new(x.into_iter().map(Logical::Some).collect())
    }
}

impl From<Vec<String>> for Rep<Character> {
    fn from(x: Vec<String>) -> Self {
        Rep::new(x.into_iter().map(Character::Some).collect())
    }
}

impl From<Vec<&str>> for Rep<Character> {
    fn from(x: Vec<&str>) -> Self {
        Rep::new(x.into_iter().map(Character::from).collect())
    }
}

impl<T> Display for Rep<T>
where
    T: AtomicMode,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.len();
        if n == 0 {
            write!(f, "{}(0)", T::TYPE)?;
        } else {
            let nlen = format!("{}", n).len();
            let xb = self.values.borrow();

            let x_strs = xb.iter().map(|xi| xi.format());
            let max_len = x_strs
                .clone()
                .fold(0, |max_len, xi| std::cmp::max(max_len, xi.len()))
                .max(1);

            let mut col = 0;
            let gutterlen = 2 + nlen + 1;

            // hard coded max print & console width
            let maxprint = 20 * ((80 - gutterlen) / max_len).max(1);

            x_strs
                .take(maxprint)
                .enumerate()
                .try_for_each(|(i, x_str)| {
                    if i == 0 {
                        col = gutterlen + max_len;
                        write!(f, "{:>3$}[{}] {:>4$}", "", i + 1, x_str, nlen - 1, max_len)
                    } else if col + 1 + max_len > 80 {
                        col = gutterlen + max_len;
                        let i_str = format!("{}", i + 1);
                        let gutter = nlen - i_str.len();
                        write!(f, "\n{:>3$}[{}] {:>4$}", "", i_str, x_str, gutter, max_len)
                    } else {
                        col += 1 + max_len;
                        write!(f, " {:>1$}", x_str, max_len)
                    }
                })?;

            if n > maxprint {
                write!(f, "\n[ omitting {} entries ]", n - maxprint)?;
            }
        }

        if let Some(names) = &self.attrs.names {
            let names = names.borrow();
            let names: Vec<String> = names.iter().map(|n| format!("{:?}", n)).collect();
            write!(f, "\nattr(,\"names\")\n{}", names.join(" "))?;
        }

        if let Some(dim) = &self.attrs.dim {
            let dim: Vec<String> = dim.iter().map(|d| d.to_string()).collect();
            write!(f, "\nattr(,\"dim\")\n{}", dim.join(" "))?;
        }

        if let Some(dimnames) = &self.attrs.dimnames {
            write!(f, "\nattr(,\"dimnames\")")?;
            for (i, names) in dimnames.iter().enumerate() {
                let names = match names {
                    Some(names) => names
                        .borrow()
                        .iter()
                        .map(|n| format!("{:?}", n))
                        .collect::<Vec<_>>()
                        .join(" "),
                    None => "NULL".to_string(),
                };
                write!(f, "\n[[{}]] {}", i + 1, names)?;
            }
        }

        Ok(())
    }
}
