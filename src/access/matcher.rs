//! String comparison used for name-based indexing
//!
//! Equality is checked against a cached hash first so that the hashed name
//! table and the linear scan agree on every answer. Neither function is
//! defined for NA; callers must filter those out before comparing.

use crate::object::types::Character;
use crate::object::OptionNA;

/// 31-polynomial string hash over UTF-16 code units.
///
/// Distinct strings may collide (`"FB"` and `"Ea"` do), so a matching hash
/// is never taken as proof of equality.
///
/// ```
/// use r_access::access::matcher::hash;
/// assert_eq!(hash("FB"), hash("Ea"));
/// assert_ne!(hash("a"), hash("b"));
/// ```
pub fn hash(s: &str) -> u32 {
    s.encode_utf16()
        .fold(0_u32, |h, c| h.wrapping_mul(31).wrapping_add(c as u32))
}

/// A string paired with its hash, computed once
#[derive(Debug, Clone, Copy)]
pub struct Hashed<'a> {
    pub value: &'a str,
    pub hash: u32,
}

impl<'a> Hashed<'a> {
    pub fn new(value: &'a str) -> Self {
        Hashed {
            value,
            hash: hash(value),
        }
    }

    pub fn matches(&self, other: &Hashed<'_>) -> bool {
        if std::ptr::eq(self.value, other.value) {
            return true;
        }
        self.hash == other.hash && self.value == other.value
    }
}

fn expect_str(x: &Character) -> &str {
    match x {
        OptionNA::Some(s) => s.as_str(),
        OptionNA::NA => panic!("NA strings cannot be matched"),
    }
}

/// Exact string equality.
///
/// # Panics
///
/// If either side is NA.
pub fn equals(a: &Character, b: &Character) -> bool {
    Hashed::new(expect_str(a)).matches(&Hashed::new(expect_str(b)))
}

/// Whether `target` begins with `prefix`.
///
/// # Panics
///
/// If either side is NA.
pub fn starts_with(target: &Character, prefix: &Character) -> bool {
    expect_str(target).starts_with(expect_str(prefix))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn colliding_hashes_are_not_equal() {
        assert_eq!(hash("FB"), hash("Ea"));
        assert!(!equals(&"FB".into(), &"Ea".into()));
        assert!(equals(&"FB".into(), &"FB".into()));
    }

    #[test]
    fn hash_is_stable() {
        // values shared with other runtimes that use the same polynomial
        assert_eq!(hash(""), 0);
        assert_eq!(hash("a"), 97);
        assert_eq!(hash("ab"), 97 * 31 + 98);
    }

    #[test]
    fn prefixes() {
        assert!(starts_with(&"alpha".into(), &"al".into()));
        assert!(starts_with(&"alpha".into(), &"".into()));
        assert!(!starts_with(&"al".into(), &"alpha".into()));
    }

    #[test]
    #[should_panic]
    fn na_is_rejected() {
        equals(&OptionNA::NA, &"a".into());
    }
}
