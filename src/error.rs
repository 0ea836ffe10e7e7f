use crate::object::coercion::VecType;
use crate::parser::Rule;

pub type AccessResult<T> = Result<T, Error>;

#[macro_export]
macro_rules! internal_err {
    () => {
        $crate::error::Error::Internal(None, std::file!(), std::line!())
    };
    ( $x:expr ) => {
        $crate::error::Error::Internal(Some($x.to_string()), std::file!(), std::line!())
    };
}

/// Access Errors
///
/// A stable classification of everything that can go wrong while resolving
/// indices or reading and writing selected elements. The rendered messages
/// are only a default; embedders are expected to match on the variants and
/// produce their own text.
///
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// `[[` was called with a missing or empty index
    #[error("subscript is missing")]
    NoIndex,

    /// `[[` resolved to zero, several, negative or NA positions
    #[error("invalid subscript: {0}")]
    InvalidSubscript(String),

    #[error("subscript out of bounds")]
    SubscriptOutOfBounds,

    #[error("incorrect number of dimensions (expected {expected}, found {found})")]
    InvalidArgNumber { expected: usize, found: usize },

    #[error("can't mix positive and negative subscripts")]
    MixedSign,

    /// Warning-level: the operation still completes
    #[error("number of items to replace ({targets}) is not a multiple of replacement length ({values})")]
    RecycleLengthMismatch { targets: usize, values: usize },

    #[error("incompatible types (from {from} to {to}) in subassignment type fix")]
    TypeCoercionFailure { from: VecType, to: VecType },

    #[error("invalid subscript type '{0}'")]
    InvalidIndexType(String),

    #[error("replacement has length zero")]
    ZeroLengthReplacement,

    #[error("more elements supplied than there are to replace")]
    MoreElementsSupplied,

    #[error("dims [product {expected}] do not match the length of object [{found}]")]
    DimsLengthMismatch { expected: usize, found: usize },

    #[error("length of '{attribute}' [{found}] must match {expected}")]
    AttributeLength {
        attribute: &'static str,
        expected: usize,
        found: usize,
    },

    // literal parsing errors
    #[error("{0}")]
    ParseFailure(Box<pest::error::Error<Rule>>),

    #[error("unexpected literal '{0}'")]
    ParseUnexpected(String),

    #[error("Internal Error ({1}:{2}){}", .0.as_ref().map(|m| format!("\n{m}")).unwrap_or_default())]
    Internal(Option<String>, &'static str, u32),
}

impl Error {
    /// Whether the condition should be surfaced as a warning rather than
    /// aborting the operation.
    pub fn is_warning(&self) -> bool {
        matches!(self, Error::RecycleLengthMismatch { .. })
    }
}

impl From<pest::error::Error<Rule>> for Error {
    fn from(value: pest::error::Error<Rule>) -> Self {
        Error::ParseFailure(Box::new(value))
    }
}
