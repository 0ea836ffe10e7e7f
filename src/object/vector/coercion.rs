use std::fmt::Debug;

use super::{OptionNA, Vector};
use crate::error::{AccessResult, Error};

/// Element types, ordered by coercion precedence
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum VecType {
    Raw,
    Logical,
    Integer,
    Double,
    Character,
}

impl VecType {
    /// The smallest type able to represent both `self` and `other`.
    /// Raw only ever widens to itself.
    pub fn widen(self, other: VecType) -> Option<VecType> {
        use VecType::*;
        match (self, other) {
            (Raw, Raw) => Some(Raw),
            (Raw, _) | (_, Raw) => None,
            (l, r) => Some(std::cmp::max(l, r)),
        }
    }
}

pub trait AtomicMode: Clone + Debug + PartialEq {
    const TYPE: VecType;

    /// The value stored in slots nobody has written to
    fn na() -> Self;
    fn is_na(&self) -> bool;

    fn format(&self) -> String {
        format!("{:?}", self)
    }
}

pub trait CoercibleInto<T>: Sized {
    fn coerce_into(self) -> T;
}

impl<T, U> CoercibleInto<OptionNA<U>> for OptionNA<T>
where
    T: CoercibleInto<U>,
{
    #[inline]
    fn coerce_into(self) -> OptionNA<U> {
        self.map(|x| x.coerce_into())
    }
}

impl CoercibleInto<u8> for u8 {
    #[inline]
    fn coerce_into(self) -> u8 {
        self
    }
}

impl CoercibleInto<bool> for bool {
    #[inline]
    fn coerce_into(self) -> bool {
        self
    }
}

impl CoercibleInto<i32> for bool {
    #[inline]
    fn coerce_into(self) -> i32 {
        self as i32
    }
}

impl CoercibleInto<f64> for bool {
    #[inline]
    fn coerce_into(self) -> f64 {
        (self as i32) as f64
    }
}

impl CoercibleInto<String> for bool {
    #[inline]
    fn coerce_into(self) -> String {
        if self { "TRUE" } else { "FALSE" }.to_string()
    }
}

impl CoercibleInto<i32> for i32 {
    #[inline]
    fn coerce_into(self) -> i32 {
        self
    }
}

impl CoercibleInto<f64> for i32 {
    #[inline]
    fn coerce_into(self) -> f64 {
        self as f64
    }
}

impl CoercibleInto<String> for i32 {
    #[inline]
    fn coerce_into(self) -> String {
        self.to_string()
    }
}

impl CoercibleInto<f64> for f64 {
    #[inline]
    fn coerce_into(self) -> f64 {
        self
    }
}

impl CoercibleInto<String> for f64 {
    fn coerce_into(self) -> String {
        match self {
            x if x.is_nan() => "NaN".to_string(),
            x if x == f64::INFINITY => "Inf".to_string(),
            x if x == f64::NEG_INFINITY => "-Inf".to_string(),
            x => x.to_string(),
        }
    }
}

impl CoercibleInto<String> for String {
    #[inline]
    fn coerce_into(self) -> String {
        self
    }
}

/// Type widening used by replacement
///
/// Replacement asks for the common type of target and value and then
/// converts whichever side does not already have it. Embedders with their
/// own promotion rules can plug them in here.
pub trait Coercion {
    fn widen(&self, target: VecType, value: VecType) -> AccessResult<VecType>;
    fn convert(&self, x: Vector, to: VecType) -> AccessResult<Vector>;
}

/// raw < logical < integer < double < character
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCoercion;

impl Coercion for DefaultCoercion {
    fn widen(&self, target: VecType, value: VecType) -> AccessResult<VecType> {
        target
            .widen(value)
            .ok_or(Error::TypeCoercionFailure { from: value, to: target })
    }

    fn convert(&self, x: Vector, to: VecType) -> AccessResult<Vector> {
        x.as_type(to)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::object::types::*;

    #[test]
    fn precedence_is_ordered() {
        use VecType::*;
        assert_eq!(Logical.widen(Integer), Some(Integer));
        assert_eq!(Double.widen(Integer), Some(Double));
        assert_eq!(Logical.widen(Character), Some(Character));
        assert_eq!(Raw.widen(Raw), Some(Raw));
        assert_eq!(Raw.widen(Logical), None);
        assert_eq!(Character.widen(Raw), None);
    }

    #[test]
    fn type_names_round_trip_through_strum() {
        use std::str::FromStr;
        assert_eq!(VecType::Character.to_string(), "character");
        assert_eq!(VecType::from_str("double"), Ok(VecType::Double));
    }

    #[test]
    fn na_survives_coercion() {
        let x: Integer = OptionNA::NA;
        let y: Character = x.coerce_into();
        assert!(y.is_na());

        let t: Logical = OptionNA::Some(true);
        let s: Character = t.coerce_into();
        assert_eq!(s, OptionNA::Some("TRUE".to_string()));
    }

    #[test]
    fn doubles_print_like_r() {
        assert_eq!(CoercibleInto::<String>::coerce_into(1.0_f64), "1");
        assert_eq!(CoercibleInto::<String>::coerce_into(2.5_f64), "2.5");
        assert_eq!(CoercibleInto::<String>::coerce_into(f64::INFINITY), "Inf");
    }

    #[test]
    fn raw_mixing_fails() {
        let err = DefaultCoercion.widen(VecType::Raw, VecType::Integer);
        assert_eq!(
            err,
            Err(Error::TypeCoercionFailure {
                from: VecType::Integer,
                to: VecType::Raw
            })
        );
    }
}
