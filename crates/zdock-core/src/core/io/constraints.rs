use crate::core::io::traits::FileFormat;
use crate::core::models::constraint::{AtomCoord, Constraint, ConstraintKind};
use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConstraintError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: ConstraintParseErrorKind,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConstraintParseErrorKind {
    #[error("Expected 11 or 12 fields, found {0}")]
    FieldCount(usize),
    #[error("Invalid {field} (value: '{value}')")]
    InvalidField { field: &'static str, value: String },
    #[error("Constraint type must be MIN or MAX (value: '{0}')")]
    InvalidKind(String),
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::Min => f.write_str("MIN"),
            ConstraintKind::Max => f.write_str("MAX"),
        }
    }
}

impl FromStr for ConstraintKind {
    type Err = ConstraintParseErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MIN" => Ok(ConstraintKind::Min),
            "MAX" => Ok(ConstraintKind::Max),
            _ => Err(ConstraintParseErrorKind::InvalidKind(s.to_string())),
        }
    }
}

fn field<T: FromStr>(token: &str, name: &'static str) -> Result<T, ConstraintParseErrorKind> {
    token.parse().map_err(|_| ConstraintParseErrorKind::InvalidField {
        field: name,
        value: token.to_string(),
    })
}

fn atom_coord(tokens: &[&str]) -> Result<AtomCoord, ConstraintParseErrorKind> {
    let mut chain = tokens[3].chars();
    let chain_id = match (chain.next(), chain.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(ConstraintParseErrorKind::InvalidField {
                field: "chain id",
                value: tokens[3].to_string(),
            });
        }
    };
    Ok(AtomCoord {
        serial: field(tokens[0], "atom serial")?,
        atom_name: tokens[1].to_string(),
        residue_name: tokens[2].to_string(),
        chain_id,
        residue_seq: field(tokens[4], "residue number")?,
    })
}

fn parse_constraint(text: &str) -> Result<Constraint, ConstraintParseErrorKind> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 11 && tokens.len() != 12 {
        return Err(ConstraintParseErrorKind::FieldCount(tokens.len()));
    }
    let kind = match tokens.get(11) {
        Some(token) => token.parse()?,
        None => ConstraintKind::default(),
    };
    Ok(Constraint {
        first: atom_coord(&tokens[0..5])?,
        second: atom_coord(&tokens[5..10])?,
        distance: field(tokens[10], "distance")?,
        kind,
    })
}

/// Reader and writer for distance-constraint files.
///
/// One constraint per line: two atoms given as `serial name residue chain
/// resseq`, a distance, and an optional `MIN`/`MAX` (default `MAX`). Text
/// after `#` and blank lines are ignored.
pub struct ConstraintFile;

impl FileFormat for ConstraintFile {
    type Content = Vec<Constraint>;
    type Error = ConstraintError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Constraint>, ConstraintError> {
        let mut constraints = Vec::new();
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let text = line.split('#').next().unwrap_or("").trim();
            if text.is_empty() {
                continue;
            }
            let constraint = parse_constraint(text).map_err(|kind| ConstraintError::Parse {
                line: line_num + 1,
                kind,
            })?;
            constraints.push(constraint);
        }
        Ok(constraints)
    }

    fn write_to(content: &Vec<Constraint>, writer: &mut impl Write) -> Result<(), ConstraintError> {
        for c in content {
            writeln!(writer, "{}\t{}\t{:.3}\t{}", c.first, c.second, c.distance, c.kind)?;
        }
        Ok(())
    }
}
