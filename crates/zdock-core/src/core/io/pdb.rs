use crate::core::io::traits::FileFormat;
use crate::core::models::structure::{AtomRecord, Record, Structure};
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: &'static str, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: &'static str, value: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

const MIN_ATOM_LINE: usize = 54;

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn parse_int<T: std::str::FromStr>(
    line: &str,
    line_num: usize,
    start: usize,
    end: usize,
    columns: &'static str,
) -> Result<T, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns,
            value: value.into(),
        },
    })
}

fn parse_float(
    line: &str,
    line_num: usize,
    start: usize,
    end: usize,
    columns: &'static str,
) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns,
            value: value.into(),
        },
    })
}

fn parse_atom(line: String, line_num: usize, hetero: bool) -> Result<AtomRecord, PdbError> {
    if line.len() < MIN_ATOM_LINE {
        return Err(PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::LineTooShort,
        });
    }
    let serial = parse_int(&line, line_num, 6, 11, "7-11")?;
    let residue_seq = parse_int(&line, line_num, 22, 26, "23-26")?;
    let x = parse_float(&line, line_num, 30, 38, "31-38")?;
    let y = parse_float(&line, line_num, 38, 46, "39-46")?;
    let z = parse_float(&line, line_num, 46, 54, "47-54")?;
    let name = slice_and_trim(&line, 12, 16).to_string();
    let residue_name = slice_and_trim(&line, 17, 20).to_string();
    let chain_id = line.get(21..22).and_then(|s| s.chars().next()).unwrap_or(' ');

    Ok(AtomRecord::from_line(
        line,
        hetero,
        serial,
        name,
        residue_name,
        chain_id,
        residue_seq,
        Point3::new(x, y, z),
    ))
}

/// Reader and writer for the fixed-column PDB format.
///
/// Only ATOM/HETATM and MODEL/ENDMDL records are interpreted; every other line
/// is kept verbatim so that the file can be written back unchanged apart from
/// the atom fields that were edited.
pub struct PdbFile;

impl PdbFile {
    /// Writes only the ATOM/HETATM records of the structure.
    pub fn write_atoms_to(structure: &Structure, writer: &mut impl Write) -> Result<(), PdbError> {
        for atom in structure.atoms() {
            writeln!(writer, "{atom}")?;
        }
        Ok(())
    }
}

impl FileFormat for PdbFile {
    type Content = Structure;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, PdbError> {
        let mut records = Vec::new();
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let record = match slice_and_trim(&line, 0, 6) {
                "ATOM" => Record::Atom(parse_atom(line, line_num, false)?),
                "HETATM" => Record::Atom(parse_atom(line, line_num, true)?),
                "MODEL" => Record::Model {
                    number: slice_and_trim(&line, 10, 14).parse().ok(),
                    raw: line,
                },
                "ENDMDL" => Record::EndModel(line),
                _ => Record::Other(line),
            };
            records.push(record);
        }
        Ok(Structure::new(records))
    }

    fn write_to(content: &Structure, writer: &mut impl Write) -> Result<(), PdbError> {
        for record in content.records() {
            writeln!(writer, "{record}")?;
        }
        Ok(())
    }
}
