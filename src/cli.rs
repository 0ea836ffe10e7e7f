use crate::error::AccessResult;
use crate::internal_err;
use crate::object::coercion::VecType;
use crate::object::types::Character;
use crate::object::{RawIndex, Vector};
use crate::parser::{parse_index, parse_vector};

/// Evaluate `[` and `[[` on literal vectors
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "r-access", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, clap::Subcommand)]
pub enum Command {
    /// Read elements, as `x[i]` or `x[[i]]`
    Extract {
        #[command(flatten)]
        target: Target,
    },
    /// Write elements, as `x[i] <- value` or `x[[i]] <- value`
    Replace {
        #[command(flatten)]
        target: Target,

        /// Replacement value literal
        #[arg(short, long, allow_hyphen_values = true)]
        value: String,
    },
}

impl Command {
    pub fn target(&self) -> &Target {
        match self {
            Command::Extract { target } | Command::Replace { target, .. } => target,
        }
    }
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct Target {
    /// Vector literal, such as `c(1, NA, 3)`, `1:10` or `"a"`
    #[arg(allow_hyphen_values = true)]
    pub data: String,

    /// Index literal, repeated once per dimension. An empty string leaves
    /// that dimension's index missing.
    #[arg(short, long = "index", allow_hyphen_values = true)]
    pub indices: Vec<String>,

    /// Comma separated dimensions
    #[arg(long, value_delimiter = ',')]
    pub dim: Vec<usize>,

    /// Names literal, such as `c("a", "b")`
    #[arg(long)]
    pub names: Option<String>,

    /// Dimension names literal, repeated once per dimension. An empty string
    /// leaves that dimension unnamed.
    #[arg(long = "dimnames")]
    pub dimnames: Vec<String>,

    /// Use `[[` rather than `[`
    #[arg(long)]
    pub subscript: bool,

    /// Keep extent-1 dimensions of box results
    #[arg(long)]
    pub no_drop: bool,

    /// Allow `[[` to match unique name prefixes
    #[arg(long)]
    pub inexact: bool,

    /// Treat the data as referenced elsewhere, so replacement copies it
    #[arg(long)]
    pub shared: bool,
}

impl Target {
    /// Build the target vector with its dim, names and dimnames applied.
    pub fn vector(&self) -> AccessResult<Vector> {
        let mut x = parse_vector(&self.data)?;

        if !self.dim.is_empty() {
            x = x.with_dim(self.dim.clone())?;
        }

        if let Some(names) = &self.names {
            x = x.with_names(character(names)?)?;
        }

        if !self.dimnames.is_empty() {
            let dimnames = self
                .dimnames
                .iter()
                .map(|d| match d.trim() {
                    "" => Ok(None),
                    d => character(d).map(Some),
                })
                .collect::<AccessResult<Vec<_>>>()?;
            x = x.with_dimnames(dimnames)?;
        }

        Ok(x)
    }

    /// Parse every index, treating no indices at all as `x[]`.
    pub fn indices(&self) -> AccessResult<Vec<RawIndex>> {
        if self.indices.is_empty() {
            return Ok(vec![RawIndex::Empty]);
        }
        self.indices.iter().map(|i| parse_index(i)).collect()
    }
}

fn character(input: &str) -> AccessResult<Vec<Character>> {
    match parse_vector(input)?.as_type(VecType::Character)? {
        Vector::Character(v) => Ok(v.to_vec()),
        _ => Err(internal_err!("names did not convert to character")),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::object::OptionNA;
    use clap::Parser;

    #[test]
    fn parses_extract() {
        let cli = Cli::try_parse_from([
            "r-access", "extract", "c(1, 2, 3)", "-i", "-1", "--names", "c('a', 'b', 'c')",
        ])
        .unwrap();

        let target = cli.command.target();
        assert_eq!(target.indices, vec!["-1".to_string()]);

        let x = target.vector().unwrap();
        assert_eq!(x.names().map(|n| n.borrow().len()), Some(3));
        assert_eq!(target.indices().unwrap(), vec![RawIndex::from(vec![-1.0])]);
    }

    #[test]
    fn parses_replace_with_dims() {
        let cli = Cli::try_parse_from([
            "r-access", "replace", "1:6", "--dim", "2,3", "-i", "", "-i", "2", "--value", "-1L",
        ])
        .unwrap();

        let Command::Replace { target, value } = &cli.command else {
            unreachable!()
        };
        assert_eq!(value, "-1L");
        assert_eq!(target.vector().unwrap().dim(), Some(&[2, 3][..]));
        assert_eq!(target.indices().unwrap()[0], RawIndex::Missing);
    }

    #[test]
    fn dimnames_allow_unnamed_dimensions() {
        let target = Target {
            data: "1:4".to_string(),
            dim: vec![2, 2],
            dimnames: vec!["".to_string(), "c('x', 'y')".to_string()],
            ..Default::default()
        };

        let x = target.vector().unwrap();
        let dimnames = x.dimnames().unwrap();
        assert!(dimnames[0].is_none());
        assert_eq!(
            dimnames[1].as_ref().map(|n| n.borrow().to_vec()),
            Some(vec![OptionNA::Some("x".to_string()), OptionNA::Some("y".to_string())])
        );
    }

    #[test]
    fn no_indices_select_everything() {
        let target = Target {
            data: "1:3".to_string(),
            ..Default::default()
        };
        assert_eq!(target.indices().unwrap(), vec![RawIndex::Empty]);
    }
}
