use std::fmt::Debug;
use std::fmt::Display;

use crate::error::{AccessResult, Error};
use crate::object::{Attributes, Names, Ownership, ViewMut};

use super::coercion::{AtomicMode, VecType};
use super::rep::Rep;
use super::types::*;

#[derive(Default, Clone, PartialEq, Eq)]
pub enum OptionNA<T> {
    #[default]
    NA,
    Some(T),
}

impl<T> PartialOrd for OptionNA<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (OptionNA::Some(l), OptionNA::Some(r)) => l.partial_cmp(r),
            _ => None,
        }
    }
}

impl<T> OptionNA<T> {
    pub fn map<F, U>(self, f: F) -> OptionNA<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            OptionNA::Some(x) => OptionNA::Some(f(x)),
            OptionNA::NA => OptionNA::NA,
        }
    }

    pub fn as_option(self) -> Option<T> {
        match self {
            OptionNA::Some(x) => Option::Some(x),
            OptionNA::NA => Option::None,
        }
    }

    pub fn is_na_value(&self) -> bool {
        matches!(self, OptionNA::NA)
    }
}

impl<T> From<Option<T>> for OptionNA<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(x) => OptionNA::Some(x),
            None => OptionNA::NA,
        }
    }
}

impl From<&str> for Character {
    fn from(value: &str) -> Self {
        OptionNA::Some(value.to_string())
    }
}

/// A typed, attributed vector
///
/// Every variant wraps a [`Rep`], so the access algorithms are written once
/// over `Rep<T>` and dispatched here.
#[derive(Debug, Clone, PartialEq)]
pub enum Vector {
    Raw(Rep<Raw>),
    Logical(Rep<Logical>),
    Integer(Rep<Integer>),
    Double(Rep<Double>),
    Character(Rep<Character>),
}

/// See [`Rep`] for the documentation on the methods.
impl Vector {
    pub fn len(&self) -> usize {
        use Vector::*;
        match self {
            Raw(x) => x.len(),
            Logical(x) => x.len(),
            Integer(x) => x.len(),
            Double(x) => x.len(),
            Character(x) => x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn vtype(&self) -> VecType {
        use Vector::*;
        match self {
            Raw(_) => VecType::Raw,
            Logical(_) => VecType::Logical,
            Integer(_) => VecType::Integer,
            Double(_) => VecType::Double,
            Character(_) => VecType::Character,
        }
    }

    pub fn attributes(&self) -> &Attributes {
        use Vector::*;
        match self {
            Raw(x) => x.attributes(),
            Logical(x) => x.attributes(),
            Integer(x) => x.attributes(),
            Double(x) => x.attributes(),
            Character(x) => x.attributes(),
        }
    }

    pub fn dim(&self) -> Option<&[usize]> {
        self.attributes().dim.as_deref()
    }

    pub fn names(&self) -> Option<&Names> {
        self.attributes().names.as_ref()
    }

    pub fn dimnames(&self) -> Option<&[Option<Names>]> {
        self.attributes().dimnames.as_deref()
    }

    pub fn is_complete(&self) -> bool {
        use Vector::*;
        match self {
            Raw(x) => x.is_complete(),
            Logical(x) => x.is_complete(),
            Integer(x) => x.is_complete(),
            Double(x) => x.is_complete(),
            Character(x) => x.is_complete(),
        }
    }

    pub fn ownership(&self) -> Ownership {
        use Vector::*;
        match self {
            Raw(x) => x.ownership(),
            Logical(x) => x.ownership(),
            Integer(x) => x.ownership(),
            Double(x) => x.ownership(),
            Character(x) => x.ownership(),
        }
    }

    /// Whether both vectors read from the same storage
    pub fn ptr_eq(&self, other: &Vector) -> bool {
        use Vector::*;
        match (self, other) {
            (Raw(l), Raw(r)) => l.ptr_eq(r),
            (Logical(l), Logical(r)) => l.ptr_eq(r),
            (Integer(l), Integer(r)) => l.ptr_eq(r),
            (Double(l), Double(r)) => l.ptr_eq(r),
            (Character(l), Character(r)) => l.ptr_eq(r),
            _ => false,
        }
    }

    pub fn with_dim(self, dim: Vec<usize>) -> AccessResult<Self> {
        use Vector::*;
        Ok(match self {
            Raw(x) => Raw(x.with_dim(dim)?),
            Logical(x) => Logical(x.with_dim(dim)?),
            Integer(x) => Integer(x.with_dim(dim)?),
            Double(x) => Double(x.with_dim(dim)?),
            Character(x) => Character(x.with_dim(dim)?),
        })
    }

    pub fn with_names(self, names: Vec<Character>) -> AccessResult<Self> {
        use Vector::*;
        Ok(match self {
            Raw(x) => Raw(x.with_names(names)?),
            Logical(x) => Logical(x.with_names(names)?),
            Integer(x) => Integer(x.with_names(names)?),
            Double(x) => Double(x.with_names(names)?),
            Character(x) => Character(x.with_names(names)?),
        })
    }

    pub fn with_dimnames(self, dimnames: Vec<Option<Vec<Character>>>) -> AccessResult<Self> {
        use Vector::*;
        Ok(match self {
            Raw(x) => Raw(x.with_dimnames(dimnames)?),
            Logical(x) => Logical(x.with_dimnames(dimnames)?),
            Integer(x) => Integer(x.with_dimnames(dimnames)?),
            Double(x) => Double(x.with_dimnames(dimnames)?),
            Character(x) => Character(x.with_dimnames(dimnames)?),
        })
    }

    /// Convert to another element type, keeping attributes.
    pub fn as_type(self, to: VecType) -> AccessResult<Vector> {
        use Vector::*;
        let from = self.vtype();
        match (self, to) {
            (x, to) if from == to => Ok(x),
            (Logical(x), VecType::Integer) => Ok(Integer(x.as_mode())),
            (Logical(x), VecType::Double) => Ok(Double(x.as_mode())),
            (Logical(x), VecType::Character) => Ok(Character(x.as_mode())),
            (Integer(x), VecType::Double) => Ok(Double(x.as_mode())),
            (Integer(x), VecType::Character) => Ok(Character(x.as_mode())),
            (Double(x), VecType::Character) => Ok(Character(x.as_mode())),
            _ => Err(Error::TypeCoercionFailure { from, to }),
        }
    }

    /// Materialize storage so that the result no longer shares with `self`
    pub fn materialize(&self) -> Vector {
        use Vector::*;
        match self {
            Raw(x) => Raw(x.materialize()),
            Logical(x) => Logical(x.materialize()),
            Integer(x) => Integer(x.materialize()),
            Double(x) => Double(x.materialize()),
            Character(x) => Character(x.materialize()),
        }
    }
}

impl ViewMut for Vector {
    fn view_mut(&self) -> Self {
        use Vector::*;
        match self {
            Raw(x) => Raw(x.view_mut()),
            Logical(x) => Logical(x.view_mut()),
            Integer(x) => Integer(x.view_mut()),
            Double(x) => Double(x.view_mut()),
            Character(x) => Character(x.view_mut()),
        }
    }
}

impl From<Rep<Raw>> for Vector {
    fn from(x: Rep<Raw>) -> Self {
        Vector::Raw(x)
    }
}

impl From<Rep<Logical>> for Vector {
    fn from(x: Rep<Logical>) -> Self {
        Vector::Logical(x)
    }
}

impl From<Rep<Integer>> for Vector {
    fn from(x: Rep<Integer>) -> Self {
        Vector::Integer(x)
    }
}

impl From<Rep<Double>> for Vector {
    fn from(x: Rep<Double>) -> Self {
        Vector::Double(x)
    }
}

impl From<Rep<Character>> for Vector {
    fn from(x: Rep<Character>) -> Self {
        Vector::Character(x)
    }
}

impl From<Vec<f64>> for Vector {
    fn from(x: Vec<f64>) -> Self {
        Vector::Double(Rep::from(x))
    }
}

impl From<Vec<OptionNA<f64>>> for Vector {
    fn from(x: Vec<OptionNA<f64>>) -> Self {
        Vector::Double(Rep::from(x))
    }
}

impl From<Vec<i32>> for Vector {
    fn from(x: Vec<i32>) -> Self {
        Vector::Integer(Rep::from(x))
    }
}

impl From<Vec<OptionNA<i32>>> for Vector {
    fn from(x: Vec<OptionNA<i32>>) -> Self {
        Vector::Integer(Rep::from(x))
    }
}

impl From<Vec<bool>> for Vector {
    fn from(x: Vec<bool>) -> Self {
        Vector::Logical(Rep::from(x))
    }
}

impl From<Vec<OptionNA<bool>>> for Vector {
    fn from(x: Vec<OptionNA<bool>>) -> Self {
        Vector::Logical(Rep::from(x))
    }
}

impl From<Vec<String>> for Vector {
    fn from(x: Vec<String>) -> Self {
        Vector::Character(Rep::from(x))
    }
}

impl From<Vec<&str>> for Vector {
    fn from(x: Vec<&str>) -> Self {
        Vector::Character(Rep::from(x))
    }
}

impl From<Vec<OptionNA<String>>> for Vector {
    fn from(x: Vec<OptionNA<String>>) -> Self {
        Vector::Character(Rep::from(x))
    }
}

pub trait DefaultDebug {}
impl DefaultDebug for i32 {}
impl DefaultDebug for f64 {}

impl<T> Debug for OptionNA<T>
where
    T: DefaultDebug + Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionNA::Some(x) => write!(f, "{}", x),
            OptionNA::NA => write!(f, "NA"),
        }
    }
}

impl Debug for OptionNA<bool> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionNA::Some(true) => write!(f, "TRUE"),
            OptionNA::Some(false) => write!(f, "FALSE"),
            OptionNA::NA => write!(f, "NA"),
        }
    }
}

impl Debug for OptionNA<String> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionNA::Some(x) => write!(f, "\"{}\"", x),
            OptionNA::NA => write!(f, "NA"),
        }
    }
}

impl<T> Display for OptionNA<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionNA::Some(x) => write!(f, "{}", x),
            OptionNA::NA => write!(f, "NA"),
        }
    }
}

impl Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vector::Raw(x) => std::fmt::Display::fmt(&x, f),
            Vector::Logical(x) => std::fmt::Display::fmt(&x, f),
            Vector::Integer(x) => std::fmt::Display::fmt(&x, f),
            Vector::Double(x) => std::fmt::Display::fmt(&x, f),
            Vector::Character(x) => std::fmt::Display::fmt(&x, f),
        }
    }
}
