//! Vectorized element access
//!
//! Index resolution, extraction and replacement for `[` ([`AccessMode::Subset`])
//! and `[[` ([`AccessMode::Subscript`]). Indices are resolved per dimension
//! by the [`PositionResolver`], combined into an [`AccessPlan`], and then
//! read by the [`Extractor`] or written by the [`Mutator`].
//!
//! ```
//! use r_access::access::{extract, replace, AccessMode};
//! use r_access::object::{Ownership, RawIndex, Vector};
//!
//! let x = Vector::from(vec![10, 20, 30, 40]);
//!
//! let y = extract(&x, AccessMode::Subset, &[RawIndex::from(vec![-1, -2])], true, None).unwrap();
//! assert_eq!(y, Vector::from(vec![30, 40]));
//!
//! let value = Vector::from(vec![0.5]);
//! let z = replace(x, AccessMode::Subset, &[RawIndex::from(6)], &value, Ownership::Exclusive)
//!     .unwrap();
//! assert_eq!(z.result.len(), 6);
//! assert!(!z.result.is_complete());
//! ```

pub mod extract;
pub mod lookup;
pub mod matcher;
pub mod plan;
pub mod replace;
pub mod resolve;

pub use extract::Extractor;
pub use lookup::{NameLookup, NameMatch};
pub use plan::AccessPlan;
pub use replace::{Mutator, Replacement};
pub use resolve::{Position, PositionResolver, Positions};

use crate::error::AccessResult;
use crate::object::coercion::Coercion;
use crate::object::{Ownership, RawIndex, Vector};

/// `[` or `[[`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum AccessMode {
    /// Any number of elements, keeping structure (`[`)
    #[default]
    Subset,
    /// Exactly one element (`[[`)
    Subscript,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessOptions {
    pub mode: AccessMode,
    /// Require exact name matches; only `[[` ever matches prefixes
    pub exact: bool,
    /// Drop extent-1 dimensions from box results, `true` when unset
    pub drop: Option<bool>,
}

impl Default for AccessOptions {
    fn default() -> Self {
        AccessOptions {
            mode: AccessMode::Subset,
            exact: true,
            drop: None,
        }
    }
}

impl AccessOptions {
    pub fn new(mode: AccessMode) -> Self {
        AccessOptions {
            mode,
            ..Default::default()
        }
    }
}

/// Read the elements selected by `indices` into a new vector.
pub fn extract(
    target: &Vector,
    mode: AccessMode,
    indices: &[RawIndex],
    exact: bool,
    drop: Option<bool>,
) -> AccessResult<Vector> {
    let options = AccessOptions { mode, exact, drop };
    Extractor::new(options).extract(target, indices)
}

/// Write `value` into the elements selected by `indices`.
///
/// With [`Ownership::Exclusive`] the target's storage is updated in place;
/// with [`Ownership::Shared`] it is copied first and the original is left
/// untouched.
pub fn replace(
    target: Vector,
    mode: AccessMode,
    indices: &[RawIndex],
    value: &Vector,
    ownership: Ownership,
) -> AccessResult<Replacement> {
    Mutator::new(AccessOptions::new(mode))
        .with_ownership(ownership)
        .replace(target, indices, value)
}

/// As [`replace`], widening types with a caller supplied [`Coercion`].
pub fn replace_with<C: Coercion>(
    target: Vector,
    mode: AccessMode,
    indices: &[RawIndex],
    value: &Vector,
    ownership: Ownership,
    coercion: C,
) -> AccessResult<Replacement> {
    Mutator::new(AccessOptions::new(mode))
        .with_ownership(ownership)
        .with_coercion(coercion)
        .replace(target, indices, value)
}
