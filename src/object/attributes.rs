use super::types::Character;
use super::CowObj;

pub type Names = CowObj<Vec<Character>>;

/// Structural attributes carried alongside a vector's values
///
/// `dim` lists extents in column-major order. `dimnames`, when present, has
/// one optional entry per dimension.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attributes {
    pub dim: Option<Vec<usize>>,
    pub names: Option<Names>,
    pub dimnames: Option<Vec<Option<Names>>>,
}

impl Attributes {
    /// Number of dimensions, treating a plain vector as one-dimensional
    pub fn ndims(&self) -> usize {
        self.dim.as_ref().map_or(1, |d| d.len())
    }

    /// Names matched by a single index. A one-dimensional array without
    /// names is named by its only dimension.
    pub fn linear_names(&self) -> Option<&Names> {
        match self.ndims() {
            1 if self.names.is_none() => self.dimnames_of(0),
            _ => self.names.as_ref(),
        }
    }

    /// Names of a single dimension, if any were given
    pub fn dimnames_of(&self, dim: usize) -> Option<&Names> {
        self.dimnames
            .as_ref()
            .and_then(|dn| dn.get(dim))
            .and_then(|n| n.as_ref())
    }
}
