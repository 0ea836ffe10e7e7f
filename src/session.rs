use tracing::debug;

use crate::access::{AccessMode, AccessOptions, Extractor, Mutator, Replacement};
use crate::cli::{Cli, Command, Target};
use crate::error::AccessResult;
use crate::object::{Ownership, RawIndex, Vector};
use crate::parser::parse_vector;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Session {
    pub options: AccessOptions,
    pub ownership: Ownership,
}

impl Session {
    pub fn extract(&self, target: &Vector, indices: &[RawIndex]) -> AccessResult<Vector> {
        Extractor::new(self.options).extract(target, indices)
    }

    pub fn replace(
        &self,
        target: Vector,
        indices: &[RawIndex],
        value: &Vector,
    ) -> AccessResult<Replacement> {
        Mutator::new(self.options)
            .with_ownership(self.ownership)
            .replace(target, indices, value)
    }

    /// Run a parsed command, reporting extraction results without warnings.
    pub fn run(&self, command: &Command) -> AccessResult<Replacement> {
        let target = command.target();
        let x = target.vector()?;
        let indices = target.indices()?;
        debug!(mode = %self.options.mode, indices = indices.len(), "running {}", x.vtype());

        match command {
            Command::Extract { .. } => self.extract(&x, &indices).map(Replacement::new),
            Command::Replace { value, .. } => {
                let value = parse_vector(value)?;
                self.replace(x, &indices, &value)
            }
        }
    }
}

impl From<&Target> for Session {
    fn from(value: &Target) -> Self {
        let mode = if value.subscript {
            AccessMode::Subscript
        } else {
            AccessMode::Subset
        };

        let ownership = if value.shared {
            Ownership::Shared
        } else {
            Ownership::Exclusive
        };

        Session {
            options: AccessOptions {
                mode,
                exact: !value.inexact,
                drop: value.no_drop.then_some(false),
            },
            ownership,
        }
    }
}

impl From<&Cli> for Session {
    fn from(value: &Cli) -> Self {
        Session::from(value.command.target())
    }
}

impl From<Cli> for Session {
    fn from(value: Cli) -> Self {
        Session::from(&value)
    }
}
