use super::coercion::{AtomicMode, VecType};
use super::OptionNA;

pub type Double = OptionNA<f64>;
impl AtomicMode for Double {
    const TYPE: VecType = VecType::Double;
    fn na() -> Self {
        OptionNA::NA
    }
    fn is_na(&self) -> bool {
        self.is_na_value()
    }
}

pub type Integer = OptionNA<i32>;
impl AtomicMode for Integer {
    const TYPE: VecType = VecType::Integer;
    fn na() -> Self {
        OptionNA::NA
    }
    fn is_na(&self) -> bool {
        self.is_na_value()
    }
}

pub type Logical = OptionNA<bool>;
impl AtomicMode for Logical {
    const TYPE: VecType = VecType::Logical;
    fn na() -> Self {
        OptionNA::NA
    }
    fn is_na(&self) -> bool {
        self.is_na_value()
    }
}

pub type Character = OptionNA<String>;
impl AtomicMode for Character {
    const TYPE: VecType = VecType::Character;
    fn na() -> Self {
        OptionNA::NA
    }
    fn is_na(&self) -> bool {
        self.is_na_value()
    }
}

/// Raw bytes have no missing value; slots that would hold NA hold `00`.
pub type Raw = u8;
impl AtomicMode for Raw {
    const TYPE: VecType = VecType::Raw;
    fn na() -> Self {
        0
    }
    fn is_na(&self) -> bool {
        false
    }
    fn format(&self) -> String {
        format!("{:02x}", self)
    }
}
