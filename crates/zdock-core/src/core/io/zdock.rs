use crate::core::io::traits::FileFormat;
use crate::core::models::document::{
    DocumentError, DocumentRef, GridParameters, HeaderLayout, MultimerDocument, PairwiseDocument,
    ResultDocument,
};
use crate::core::models::placement::StructurePlacement;
use crate::core::models::record::{Dialect, ResultRecord};
use nalgebra::Vector3;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

const MULTIMER_HEADER_ROWS: usize = 3;

#[derive(Debug, Error)]
pub enum ZdockError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: ZdockParseErrorKind,
    },
    #[error("Invalid header: {0}")]
    Header(ZdockParseErrorKind),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ZdockParseErrorKind {
    #[error("Invalid prediction")]
    InvalidPrediction,
    #[error("{found} record in a {expected} result file")]
    MixedDialect { expected: Dialect, found: Dialect },
    #[error("{dialect} result files have {expected} header rows, found {found}")]
    HeaderRowCount {
        dialect: Dialect,
        expected: &'static str,
        found: usize,
    },
    #[error("Expected {expected}")]
    HeaderField { expected: &'static str },
    #[error("Symmetry must be at least 3 (found {0})")]
    SymmetryTooSmall(usize),
}

/// A header line as collected by [`scan`], with its 1-based line number.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLine {
    pub line: usize,
    pub text: String,
}

/// Output of the scanning phase: header lines, records and the dialect they fixed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawDocument {
    pub header: Vec<HeaderLine>,
    pub records: Vec<ResultRecord>,
    pub dialect: Option<Dialect>,
}

fn parse_record(text: &str) -> Option<ResultRecord> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.as_slice() {
        [r0, r1, r2, g0, g1, g2, score] => Some(ResultRecord::pairwise(
            [r0.parse().ok()?, r1.parse().ok()?, r2.parse().ok()?],
            [g0.parse().ok()?, g1.parse().ok()?, g2.parse().ok()?],
            score.parse().ok()?,
        )),
        [r0, r1, g0, g1, score] => Some(ResultRecord::multimer(
            [r0.parse().ok()?, r1.parse().ok()?],
            [g0.parse().ok()?, g1.parse().ok()?],
            score.parse().ok()?,
        )),
        _ => None,
    }
}

/// First phase of parsing: classifies every line as header or record.
///
/// Text after `#` and blank lines are ignored. Header lines are only accepted
/// before the first record, and the first record fixes the dialect. Scanning
/// stops once `limit` records have been read.
pub fn scan(reader: &mut impl BufRead, limit: Option<usize>) -> Result<RawDocument, ZdockError> {
    let mut raw = RawDocument::default();
    if limit == Some(0) {
        return Ok(raw);
    }

    for (index, line_res) in reader.lines().enumerate() {
        let line = index + 1;
        let content = line_res?;
        let text = content.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }

        match parse_record(text) {
            Some(record) => {
                let found = record.dialect();
                match raw.dialect {
                    Some(expected) if expected != found => {
                        return Err(ZdockError::Parse {
                            line,
                            kind: ZdockParseErrorKind::MixedDialect { expected, found },
                        });
                    }
                    _ => raw.dialect = Some(found),
                }
                raw.records.push(record);
                if limit.is_some_and(|n| raw.records.len() >= n) {
                    break;
                }
            }
            None if raw.records.is_empty() => raw.header.push(HeaderLine {
                line,
                text: text.to_string(),
            }),
            None => {
                return Err(ZdockError::Parse {
                    line,
                    kind: ZdockParseErrorKind::InvalidPrediction,
                });
            }
        }
    }
    Ok(raw)
}

struct Fields<'a> {
    line: usize,
    tokens: Vec<&'a str>,
    expected: &'static str,
}

impl<'a> Fields<'a> {
    fn new(row: &'a HeaderLine, min_fields: usize, expected: &'static str) -> Result<Self, ZdockError> {
        let fields = Self {
            line: row.line,
            tokens: row.text.split_whitespace().collect(),
            expected,
        };
        if fields.tokens.len() < min_fields {
            return Err(fields.error());
        }
        Ok(fields)
    }

    fn get<T: FromStr>(&self, index: usize) -> Result<T, ZdockError> {
        self.tokens
            .get(index)
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| self.error())
    }

    fn error(&self) -> ZdockError {
        ZdockError::Parse {
            line: self.line,
            kind: ZdockParseErrorKind::HeaderField {
                expected: self.expected,
            },
        }
    }
}

fn parse_rotation(row: &HeaderLine, min_fields: usize) -> Result<[f64; 3], ZdockError> {
    let fields = Fields::new(row, min_fields, "rotation angles")?;
    let third = if min_fields == 3 { fields.get(2)? } else { 0.0 };
    Ok([fields.get(0)?, fields.get(1)?, third])
}

fn parse_placement(row: &HeaderLine, rotation: [f64; 3]) -> Result<StructurePlacement, ZdockError> {
    let fields = Fields::new(row, 4, "a file name and three translation components")?;
    Ok(StructurePlacement {
        filename: fields.tokens[0].to_string(),
        translation: Vector3::new(fields.get(1)?, fields.get(2)?, fields.get(3)?),
        rotation,
    })
}

fn interpret_multimer(raw: RawDocument) -> Result<ResultDocument, ZdockError> {
    let rows = &raw.header;
    if rows.len() != MULTIMER_HEADER_ROWS {
        return Err(ZdockError::Header(ZdockParseErrorKind::HeaderRowCount {
            dialect: Dialect::Multimer,
            expected: "3",
            found: rows.len(),
        }));
    }
    let grid_fields = Fields::new(&rows[0], 3, "box size, spacing and symmetry")?;
    let grid = GridParameters {
        box_size: grid_fields.get(0)?,
        spacing: grid_fields.get(1)?,
    };
    let symmetry: usize = grid_fields.get(2)?;
    let rotation = parse_rotation(&rows[1], 2)?;
    let structure = parse_placement(&rows[2], rotation)?;
    match MultimerDocument::new(grid, symmetry, structure, raw.records) {
        Ok(doc) => Ok(doc.into()),
        Err(DocumentError::SymmetryTooSmall(found)) => Err(ZdockError::Parse {
            line: rows[0].line,
            kind: ZdockParseErrorKind::SymmetryTooSmall(found),
        }),
        Err(e) => Err(e.into()),
    }
}

fn interpret_pairwise(raw: RawDocument) -> Result<ResultDocument, ZdockError> {
    let rows = &raw.header;
    let legacy = HeaderLayout::Legacy;
    let layout = match rows.len() {
        n if n == legacy.header_rows() => legacy,
        5 => {
            let fields = Fields::new(&rows[0], 3, "box size, spacing and switched flag")?;
            let switched: i32 = fields.get(2)?;
            HeaderLayout::Modern {
                switched: switched != 0,
            }
        }
        found => {
            return Err(ZdockError::Header(ZdockParseErrorKind::HeaderRowCount {
                dialect: Dialect::Pairwise,
                expected: "4 or 5",
                found,
            }));
        }
    };

    let grid_fields = Fields::new(&rows[0], 2, "box size and spacing")?;
    let grid = GridParameters {
        box_size: grid_fields.get(0)?,
        spacing: grid_fields.get(1)?,
    };

    let map = layout.rows();
    let receptor_rotation = match map.receptor_rotation {
        Some(row) => parse_rotation(&rows[row], 3)?,
        None => [0.0; 3],
    };
    let ligand_rotation = parse_rotation(&rows[map.ligand_rotation], 3)?;
    let receptor = parse_placement(&rows[map.receptor_file], receptor_rotation)?;
    let ligand = parse_placement(&rows[map.ligand_file], ligand_rotation)?;

    Ok(PairwiseDocument::new(grid, layout, receptor, ligand, raw.records)?.into())
}

/// Second phase of parsing: derives the header fields from the scanned lines.
///
/// The dialect comes from the records; a file without records is classified
/// by its header row count.
pub fn interpret(raw: RawDocument) -> Result<ResultDocument, ZdockError> {
    let dialect = raw.dialect.unwrap_or(if raw.header.len() == MULTIMER_HEADER_ROWS {
        Dialect::Multimer
    } else {
        Dialect::Pairwise
    });
    debug!(
        header_rows = raw.header.len(),
        records = raw.records.len(),
        %dialect,
        "Interpreting result file"
    );
    match dialect {
        Dialect::Pairwise => interpret_pairwise(raw),
        Dialect::Multimer => interpret_multimer(raw),
    }
}

fn write_rotation(f: &mut fmt::Formatter<'_>, rotation: &[f64; 3]) -> fmt::Result {
    writeln!(f, "{:.6}\t{:.6}\t{:.6}", rotation[0], rotation[1], rotation[2])
}

fn write_pairwise_header(f: &mut fmt::Formatter<'_>, doc: &PairwiseDocument) -> fmt::Result {
    let GridParameters { box_size, spacing } = doc.grid;
    match doc.layout {
        HeaderLayout::Legacy => {
            writeln!(f, "{box_size}\t{spacing:.1}")?;
            write_rotation(f, &doc.ligand.rotation)?;
            writeln!(f, "{}", doc.receptor)?;
            writeln!(f, "{}", doc.ligand)
        }
        HeaderLayout::Modern { switched } => {
            writeln!(f, "{box_size}\t{spacing:.1}\t{}", i32::from(switched))?;
            write_rotation(f, &doc.receptor.rotation)?;
            write_rotation(f, &doc.ligand.rotation)?;
            if switched {
                writeln!(f, "{}", doc.ligand)?;
                writeln!(f, "{}", doc.receptor)
            } else {
                writeln!(f, "{}", doc.receptor)?;
                writeln!(f, "{}", doc.ligand)
            }
        }
    }
}

fn write_multimer_header(f: &mut fmt::Formatter<'_>, doc: &MultimerDocument) -> fmt::Result {
    let GridParameters { box_size, spacing } = doc.grid;
    writeln!(f, "{box_size}\t{spacing:.1}\t{}", doc.symmetry)?;
    write_rotation(f, &doc.structure.rotation)?;
    writeln!(f, "{}", doc.structure)
}

/// Serializes the document in the result-file wire format.
impl fmt::Display for ResultDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            DocumentRef::Pairwise(doc) => write_pairwise_header(f, doc)?,
            DocumentRef::Multimer(doc) => write_multimer_header(f, doc)?,
        }
        for record in self.records() {
            writeln!(f, "{record}")?;
        }
        Ok(())
    }
}

/// Reader and writer for docking result files.
pub struct ZdockFile;

impl ZdockFile {
    /// Reads at most `limit` records; the header is always read in full.
    pub fn read_with_limit(
        reader: &mut impl BufRead,
        limit: usize,
    ) -> Result<ResultDocument, ZdockError> {
        interpret(scan(reader, Some(limit))?)
    }

    pub fn read_with_limit_from_path<P: AsRef<Path>>(
        path: P,
        limit: usize,
    ) -> Result<ResultDocument, ZdockError> {
        let mut reader = BufReader::new(File::open(path.as_ref())?);
        Ok(Self::read_with_limit(&mut reader, limit)?.with_source(path.as_ref()))
    }
}

impl FileFormat for ZdockFile {
    type Content = ResultDocument;
    type Error = ZdockError;

    fn read_from(reader: &mut impl BufRead) -> Result<ResultDocument, ZdockError> {
        interpret(scan(reader, None)?)
    }

    fn write_to(content: &ResultDocument, writer: &mut impl Write) -> Result<(), ZdockError> {
        write!(writer, "{content}")?;
        Ok(())
    }

    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<ResultDocument, ZdockError> {
        let mut reader = BufReader::new(File::open(path.as_ref())?);
        Ok(Self::read_from(&mut reader)?.with_source(path.as_ref()))
    }
}
