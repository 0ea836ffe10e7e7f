/// Literal Parsers
///
/// Reads the small literal language used to describe targets, indices and
/// replacement values on the command line: atoms (`1`, `2L`, `TRUE`, `NA`,
/// `"a"`), combinations (`c(1, NA, 3)`), integer ranges (`1:10`) and typed
/// zero-length vectors (`integer(0)`).
///
/// Combined atoms are widened to their common type, so `c(1L, 2.5)` is a
/// double vector and `c(1, "a")` a character vector.
///
use crate::error::{AccessResult, Error};
use crate::internal_err;
use crate::object::coercion::{CoercibleInto, VecType};
use crate::object::rep::Rep;
use crate::object::types::*;
use crate::object::{OptionNA, RawIndex, Vector};

use pest::iterators::Pair;
use pest::Parser;

#[derive(Parser)]
#[grammar = "grammar/literal.pest"]
pub struct LiteralParser;

#[derive(Debug, Clone, PartialEq)]
enum Atom {
    NA,
    Logical(bool),
    Integer(i32),
    Double(f64),
    Character(String),
}

impl Atom {
    fn vtype(&self) -> VecType {
        match self {
            Atom::NA | Atom::Logical(_) => VecType::Logical,
            Atom::Integer(_) => VecType::Integer,
            Atom::Double(_) => VecType::Double,
            Atom::Character(_) => VecType::Character,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Literal {
    Missing,
    Range(i64, i64),
    Vector(Vector),
}

/// Parse a vector literal.
///
/// ```
/// use r_access::parser::parse_vector;
/// use r_access::object::Vector;
///
/// let x = parse_vector("c(1L, NA, 3L)").unwrap();
/// assert_eq!(x.len(), 3);
/// assert!(!x.is_complete());
///
/// let y = parse_vector("3:1").unwrap();
/// assert_eq!(y, Vector::from(vec![3, 2, 1]));
/// ```
pub fn parse_vector(input: &str) -> AccessResult<Vector> {
    match parse_literal(input)? {
        Literal::Vector(v) => Ok(v),
        Literal::Range(from, to) => range_vector(from, to),
        Literal::Missing => Err(Error::ParseUnexpected(input.to_string())),
    }
}

/// Parse an index literal. An empty input is a missing index, as in `x[, 1]`.
pub fn parse_index(input: &str) -> AccessResult<RawIndex> {
    match parse_literal(input)? {
        Literal::Missing => Ok(RawIndex::Missing),
        Literal::Range(from, to) => Ok(RawIndex::range(from, to)),
        Literal::Vector(v) => RawIndex::try_from(v),
    }
}

fn parse_literal(input: &str) -> AccessResult<Literal> {
    let mut pairs = LiteralParser::parse(Rule::literal, input)?;
    let literal = pairs.next().ok_or(internal_err!("empty parse"))?;

    match literal.into_inner().next() {
        None => Ok(Literal::Missing),
        Some(pair) if pair.as_rule() == Rule::EOI => Ok(Literal::Missing),
        Some(pair) => parse_expr(pair),
    }
}

fn parse_expr(pair: Pair<Rule>) -> AccessResult<Literal> {
    match pair.as_rule() {
        Rule::empty => {
            let name = pair
                .into_inner()
                .next()
                .map(|p| p.as_str())
                .unwrap_or_default();
            Ok(Literal::Vector(empty_vector(name)?))
        }
        Rule::combine => {
            let atoms = pair
                .into_inner()
                .map(parse_atom)
                .collect::<AccessResult<Vec<_>>>()?;
            Ok(Literal::Vector(combine(atoms)?))
        }
        Rule::range => {
            let mut bounds = pair.into_inner().map(|p| {
                p.as_str()
                    .parse::<i64>()
                    .map_err(|_| Error::ParseUnexpected(p.as_str().to_string()))
            });
            let from = bounds.next().ok_or(internal_err!())??;
            let to = bounds.next().ok_or(internal_err!())??;
            Ok(Literal::Range(from, to))
        }
        _ => Ok(Literal::Vector(combine(vec![parse_atom(pair)?])?)),
    }
}

fn parse_atom(pair: Pair<Rule>) -> AccessResult<Atom> {
    let text = pair.as_str();
    let unexpected = || Error::ParseUnexpected(text.to_string());

    match pair.as_rule() {
        Rule::na => Ok(Atom::NA),
        Rule::boolean => Ok(Atom::Logical(text == "TRUE")),
        Rule::string => {
            let inner = pair.into_inner().next().map(|p| p.as_str());
            Ok(Atom::Character(inner.unwrap_or_default().to_string()))
        }
        Rule::suffixed => text
            .trim_end_matches('L')
            .parse::<i32>()
            .map(Atom::Integer)
            .map_err(|_| unexpected()),
        Rule::double => match text {
            "Inf" => Ok(Atom::Double(f64::INFINITY)),
            "-Inf" => Ok(Atom::Double(f64::NEG_INFINITY)),
            "NaN" => Ok(Atom::Double(f64::NAN)),
            _ => text.parse::<f64>().map(Atom::Double).map_err(|_| unexpected()),
        },
        _ => Err(unexpected()),
    }
}

fn empty_vector(name: &str) -> AccessResult<Vector> {
    Ok(match name {
        "raw" => Vector::from(Rep::<Raw>::new(vec![])),
        "logical" => Vector::from(Vec::<Logical>::new()),
        "integer" => Vector::from(Vec::<Integer>::new()),
        "double" | "numeric" => Vector::from(Vec::<Double>::new()),
        "character" => Vector::from(Vec::<Character>::new()),
        other => return Err(Error::ParseUnexpected(other.to_string())),
    })
}

fn range_vector(from: i64, to: i64) -> AccessResult<Vector> {
    let bound = |x: i64| i32::try_from(x).map_err(|_| Error::ParseUnexpected(x.to_string()));
    let (from, to) = (bound(from)?, bound(to)?);
    let values: Vec<i32> = if from <= to {
        (from..=to).collect()
    } else {
        (to..=from).rev().collect()
    };
    Ok(Vector::from(values))
}

fn combine(atoms: Vec<Atom>) -> AccessResult<Vector> {
    let vtype = atoms
        .iter()
        .map(Atom::vtype)
        .max()
        .unwrap_or(VecType::Logical);

    let vector = match vtype {
        VecType::Logical => Vector::from(
            atoms
                .into_iter()
                .map(|a| match a {
                    Atom::Logical(x) => OptionNA::Some(x),
                    _ => OptionNA::NA,
                })
                .collect::<Vec<Logical>>(),
        ),
        VecType::Integer => Vector::from(
            atoms
                .into_iter()
                .map(|a| match a {
                    Atom::Logical(x) => OptionNA::Some(x.coerce_into()),
                    Atom::Integer(x) => OptionNA::Some(x),
                    _ => OptionNA::NA,
                })
                .collect::<Vec<Integer>>(),
        ),
        VecType::Double => Vector::from(
            atoms
                .into_iter()
                .map(|a| match a {
                    Atom::Logical(x) => OptionNA::Some(x.coerce_into()),
                    Atom::Integer(x) => OptionNA::Some(x.coerce_into()),
                    Atom::Double(x) => OptionNA::Some(x),
                    _ => OptionNA::NA,
                })
                .collect::<Vec<Double>>(),
        ),
        VecType::Character => Vector::from(
            atoms
                .into_iter()
                .map(|a| match a {
                    Atom::NA => OptionNA::NA,
                    Atom::Logical(x) => OptionNA::Some(x.coerce_into()),
                    Atom::Integer(x) => OptionNA::Some(x.coerce_into()),
                    Atom::Double(x) => OptionNA::Some(x.coerce_into()),
                    Atom::Character(x) => OptionNA::Some(x),
                })
                .collect::<Vec<Character>>(),
        ),
        VecType::Raw => return Err(internal_err!("raw atoms are not parsed")),
    };

    Ok(vector)
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn atoms() {
        assert_eq!(parse_vector("1").unwrap(), Vector::from(vec![1.0]));
        assert_eq!(parse_vector("-2L").unwrap(), Vector::from(vec![-2]));
        assert_eq!(parse_vector("TRUE").unwrap(), Vector::from(vec![true]));
        assert_eq!(parse_vector("'a'").unwrap(), Vector::from(vec!["a"]));
        assert_eq!(
            parse_vector("NA").unwrap(),
            Vector::from(vec![OptionNA::<bool>::NA])
        );
    }

    #[test]
    fn combinations_widen() {
        let x = parse_vector("c(TRUE, 2L, NA)").unwrap();
        assert_eq!(
            x,
            Vector::from(vec![OptionNA::Some(1), OptionNA::Some(2), OptionNA::NA])
        );

        let x = parse_vector("c(1L, 2.5)").unwrap();
        assert_eq!(x, Vector::from(vec![1.0, 2.5]));

        let x = parse_vector(r#"c(1, "b", FALSE)"#).unwrap();
        assert_eq!(x, Vector::from(vec!["1", "b", "FALSE"]));
    }

    #[test]
    fn special_doubles() {
        let Vector::Double(x) = parse_vector("c(Inf, -Inf, NaN)").unwrap() else {
            unreachable!()
        };
        let x = x.to_vec();
        assert_eq!(x[0], OptionNA::Some(f64::INFINITY));
        assert_eq!(x[1], OptionNA::Some(f64::NEG_INFINITY));
        assert!(matches!(x[2], OptionNA::Some(v) if v.is_nan()));
    }

    #[rstest]
    #[case("integer(0)", VecType::Integer)]
    #[case("numeric()", VecType::Double)]
    #[case("character(0)", VecType::Character)]
    #[case("raw(0)", VecType::Raw)]
    #[case("c()", VecType::Logical)]
    fn empty_vectors(#[case] input: &str, #[case] vtype: VecType) {
        let x = parse_vector(input).unwrap();
        assert!(x.is_empty());
        assert_eq!(x.vtype(), vtype);
    }

    #[test]
    fn ranges() {
        assert_eq!(parse_vector("2:4").unwrap(), Vector::from(vec![2, 3, 4]));
        assert_eq!(parse_vector("-1:-3").unwrap(), Vector::from(vec![-1, -2, -3]));
        assert_eq!(
            parse_index("1:3").unwrap(),
            RawIndex::Strided {
                start: 1,
                stride: 1,
                count: 3
            }
        );
    }

    #[test]
    fn indices() {
        assert_eq!(parse_index("").unwrap(), RawIndex::Missing);
        assert_eq!(parse_index("  ").unwrap(), RawIndex::Missing);
        assert_eq!(parse_index("c(-1, -2)").unwrap(), RawIndex::from(vec![-1.0, -2.0]));
        assert_eq!(parse_index(r#""b""#).unwrap(), RawIndex::from(vec!["b"]));
        assert_eq!(parse_index("integer(0)").unwrap(), RawIndex::Integer(vec![]));
        assert_eq!(
            parse_index("raw(0)"),
            Err(Error::InvalidIndexType("raw".to_string()))
        );
    }

    #[test]
    fn malformed_input() {
        assert!(matches!(parse_vector("c(1, "), Err(Error::ParseFailure(_))));
        assert!(matches!(parse_vector("NAB"), Err(Error::ParseFailure(_))));
        assert!(matches!(parse_vector(""), Err(Error::ParseUnexpected(_))));
    }
}
