use super::constraint::AtomCoord;
use crate::core::utils::geometry::{self, PoseMatrix};
use crate::core::utils::identifiers::is_backbone_atom;
use nalgebra::{Point3, Vector3};
use std::fmt;
use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StructureError {
    #[error("Model {index} not found (structure has {available} model(s))")]
    ModelNotFound { index: usize, available: usize },
    #[error("Coordinate matrix has {found} column(s) but the selection has {expected} atom(s)")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("Atom not found: {0}")]
    AtomNotFound(AtomCoord),
    #[error("Selection contains no atoms")]
    EmptySelection,
}

/// An ATOM or HETATM record.
///
/// The original line is retained so that columns this type does not model
/// (occupancy, B-factor, element, ...) are written back untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    pub hetero: bool,
    pub serial: u32,
    pub name: String,
    pub residue_name: String,
    pub chain_id: char,
    pub residue_seq: i32,
    pub position: Point3<f64>,
    raw: String,
}

impl AtomRecord {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_line(
        raw: String,
        hetero: bool,
        serial: u32,
        name: String,
        residue_name: String,
        chain_id: char,
        residue_seq: i32,
        position: Point3<f64>,
    ) -> Self {
        Self {
            hetero,
            serial,
            name,
            residue_name,
            chain_id,
            residue_seq,
            position,
            raw,
        }
    }

    /// Synthesizes a HETATM record with unit occupancy and zero B-factor.
    pub fn hetatm(
        serial: u32,
        name: &str,
        residue_name: &str,
        chain_id: char,
        residue_seq: i32,
        position: Point3<f64>,
    ) -> Self {
        let padded_name = if name.len() < 4 {
            format!(" {name:<3}")
        } else {
            name.to_string()
        };
        let raw = format!(
            "HETATM{serial:>5} {padded_name:<4} {residue_name:>3} {chain_id}{residue_seq:>4}    {:8.3}{:8.3}{:8.3}  1.00  0.00",
            position.x, position.y, position.z
        );
        Self {
            hetero: true,
            serial,
            name: name.to_string(),
            residue_name: residue_name.to_string(),
            chain_id,
            residue_seq,
            position,
            raw,
        }
    }

    pub fn matches(&self, coord: &AtomCoord) -> bool {
        self.serial == coord.serial
            && self.name == coord.atom_name
            && self.residue_name == coord.residue_name
            && self.chain_id == coord.chain_id
            && self.residue_seq == coord.residue_seq
    }
}

impl fmt::Display for AtomRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let column = |start: usize, end: usize| self.raw.get(start..end).unwrap_or("");
        let tail = self.raw.get(54..).unwrap_or("");
        write!(
            f,
            "{}{:>5}{}{}{}{:8.3}{:8.3}{:8.3}{}",
            column(0, 6),
            self.serial,
            column(11, 21),
            self.chain_id,
            column(22, 30),
            self.position.x,
            self.position.y,
            self.position.z,
            tail
        )
    }
}

/// One line of a PDB file.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Atom(AtomRecord),
    Model { number: Option<i32>, raw: String },
    EndModel(String),
    Other(String),
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Atom(atom) => write!(f, "{atom}"),
            Record::Model { raw, .. } | Record::EndModel(raw) | Record::Other(raw) => {
                f.write_str(raw)
            }
        }
    }
}

/// Span of records belonging to one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRange {
    /// Serial from the MODEL record; `None` for the implicit single model.
    pub number: Option<i32>,
    pub records: Range<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelSelection {
    #[default]
    First,
    /// Zero-based position in the model list.
    Index(usize),
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AtomFilter {
    #[default]
    All,
    Backbone,
}

impl AtomFilter {
    fn accepts(&self, atom: &AtomRecord) -> bool {
        match self {
            AtomFilter::All => true,
            AtomFilter::Backbone => is_backbone_atom(&atom.name),
        }
    }
}

/// A molecular structure stored as one ordered list of records.
///
/// Models are index ranges into that list, and coordinate matrices are
/// derived from (and written back to) the atom records on demand.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Structure {
    records: Vec<Record>,
    models: Vec<ModelRange>,
}

impl Structure {
    pub fn new(records: Vec<Record>) -> Self {
        let models = find_models(&records);
        Self { records, models }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn models(&self) -> &[ModelRange] {
        &self.models
    }

    pub fn atoms(&self) -> impl Iterator<Item = &AtomRecord> {
        self.records.iter().filter_map(|r| match r {
            Record::Atom(atom) => Some(atom),
            _ => None,
        })
    }

    pub fn atoms_mut(&mut self) -> impl Iterator<Item = &mut AtomRecord> {
        self.records.iter_mut().filter_map(|r| match r {
            Record::Atom(atom) => Some(atom),
            _ => None,
        })
    }

    fn model_range(&self, selection: ModelSelection) -> Result<Range<usize>, StructureError> {
        let index = match selection {
            ModelSelection::All => return Ok(0..self.records.len()),
            ModelSelection::First => 0,
            ModelSelection::Index(index) => index,
        };
        self.models
            .get(index)
            .map(|m| m.records.clone())
            .ok_or(StructureError::ModelNotFound {
                index,
                available: self.models.len(),
            })
    }

    /// Record indices of the atoms picked by `selection` and `filter`, in file order.
    pub fn select(
        &self,
        selection: ModelSelection,
        filter: AtomFilter,
    ) -> Result<Vec<usize>, StructureError> {
        let range = self.model_range(selection)?;
        Ok(range
            .filter(|&i| matches!(&self.records[i], Record::Atom(atom) if filter.accepts(atom)))
            .collect())
    }

    pub fn coordinates(
        &self,
        selection: ModelSelection,
        filter: AtomFilter,
    ) -> Result<PoseMatrix, StructureError> {
        let indices = self.select(selection, filter)?;
        let mut matrix = PoseMatrix::zeros(indices.len());
        for (column, &i) in indices.iter().enumerate() {
            if let Record::Atom(atom) = &self.records[i] {
                matrix.set_column(column, &atom.position.coords);
            }
        }
        Ok(matrix)
    }

    pub fn set_coordinates(
        &mut self,
        selection: ModelSelection,
        filter: AtomFilter,
        matrix: &PoseMatrix,
    ) -> Result<(), StructureError> {
        let indices = self.select(selection, filter)?;
        if indices.len() != matrix.ncols() {
            return Err(StructureError::ShapeMismatch {
                expected: indices.len(),
                found: matrix.ncols(),
            });
        }
        for (column, &i) in indices.iter().enumerate() {
            if let Record::Atom(atom) = &mut self.records[i] {
                atom.position = Point3::from(matrix.column(column).into_owned());
            }
        }
        Ok(())
    }

    /// Looks an atom up by serial in the first model, then requires every other field to agree.
    pub fn find_atom(&self, coord: &AtomCoord) -> Result<&AtomRecord, StructureError> {
        let range = self.model_range(ModelSelection::First)?;
        self.records[range]
            .iter()
            .find_map(|r| match r {
                Record::Atom(atom) if atom.serial == coord.serial => Some(atom),
                _ => None,
            })
            .filter(|atom| atom.matches(coord))
            .ok_or_else(|| StructureError::AtomNotFound(coord.clone()))
    }

    pub fn centroid(&self, selection: ModelSelection) -> Result<Vector3<f64>, StructureError> {
        let matrix = self.coordinates(selection, AtomFilter::All)?;
        geometry::centroid(&matrix).ok_or(StructureError::EmptySelection)
    }
}

fn find_models(records: &[Record]) -> Vec<ModelRange> {
    let mut models = Vec::new();
    let mut open: Option<(Option<i32>, usize)> = None;
    for (i, record) in records.iter().enumerate() {
        match record {
            Record::Model { number, .. } => {
                if let Some((n, start)) = open.take() {
                    models.push(ModelRange {
                        number: n,
                        records: start..i,
                    });
                }
                open = Some((*number, i + 1));
            }
            Record::EndModel(_) => {
                if let Some((n, start)) = open.take() {
                    models.push(ModelRange {
                        number: n,
                        records: start..i,
                    });
                }
            }
            _ => {}
        }
    }
    if let Some((n, start)) = open {
        models.push(ModelRange {
            number: n,
            records: start..records.len(),
        });
    }
    if models.is_empty() {
        models.push(ModelRange {
            number: None,
            records: 0..records.len(),
        });
    }
    models
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn atom(serial: u32, name: &str, x: f64) -> Record {
        let raw = format!(
            "ATOM  {serial:>5} {name:<4} ALA A   1    {x:8.3}{:8.3}{:8.3}  1.00 20.00           C",
            0.0, 0.0
        );
        Record::Atom(AtomRecord::from_line(
            raw,
            false,
            serial,
            name.to_string(),
            "ALA".to_string(),
            'A',
            1,
            Point3::new(x, 0.0, 0.0),
        ))
    }

    fn two_model_structure() -> Structure {
        Structure::new(vec![
            Record::Other("HEADER    TEST".to_string()),
            Record::Model {
                number: Some(1),
                raw: "MODEL        1".to_string(),
            },
            atom(1, "N", 1.0),
            atom(2, "CA", 2.0),
            atom(3, "CB", 3.0),
            Record::EndModel("ENDMDL".to_string()),
            Record::Model {
                number: Some(2),
                raw: "MODEL        2".to_string(),
            },
            atom(1, "N", 10.0),
            Record::EndModel("ENDMDL".to_string()),
            Record::Other("END".to_string()),
        ])
    }

    #[test]
    fn implicit_model_covers_every_record() {
        let structure = Structure::new(vec![atom(1, "N", 0.0), atom(2, "CA", 1.0)]);
        assert_eq!(structure.models().len(), 1);
        assert_eq!(structure.models()[0].number, None);
        assert_eq!(structure.models()[0].records, 0..2);
    }

    #[test]
    fn model_ranges_exclude_model_and_endmdl_lines() {
        let structure = two_model_structure();
        assert_eq!(structure.models().len(), 2);
        assert_eq!(structure.models()[0].records, 2..5);
        assert_eq!(structure.models()[1].number, Some(2));
        assert_eq!(structure.models()[1].records, 7..8);
    }

    #[test]
    fn coordinates_of_first_model_with_backbone_filter() {
        let structure = two_model_structure();
        let all = structure.coordinates(ModelSelection::First, AtomFilter::All).unwrap();
        assert_eq!(all.ncols(), 3);
        let backbone = structure.coordinates(ModelSelection::First, AtomFilter::Backbone).unwrap();
        assert_eq!(backbone.ncols(), 2);
        assert!((backbone[(0, 1)] - 2.0).abs() < TOLERANCE);
        let second = structure.coordinates(ModelSelection::Index(1), AtomFilter::All).unwrap();
        assert!((second[(0, 0)] - 10.0).abs() < TOLERANCE);
    }

    #[test]
    fn missing_model_is_an_error() {
        let structure = two_model_structure();
        let err = structure.coordinates(ModelSelection::Index(2), AtomFilter::All).unwrap_err();
        assert_eq!(err, StructureError::ModelNotFound { index: 2, available: 2 });
    }

    #[test]
    fn set_coordinates_writes_back_only_selected_model() {
        let mut structure = two_model_structure();
        let mut m = structure.coordinates(ModelSelection::First, AtomFilter::All).unwrap();
        m.add_scalar_mut(1.0);
        structure.set_coordinates(ModelSelection::First, AtomFilter::All, &m).unwrap();
        let positions: Vec<f64> = structure.atoms().map(|a| a.position.x).collect();
        assert_eq!(positions, vec![2.0, 3.0, 4.0, 10.0]);
        assert!((structure.atoms().next().unwrap().position.y - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn set_coordinates_rejects_wrong_shape() {
        let mut structure = two_model_structure();
        let err = structure
            .set_coordinates(ModelSelection::First, AtomFilter::All, &PoseMatrix::zeros(2))
            .unwrap_err();
        assert_eq!(err, StructureError::ShapeMismatch { expected: 3, found: 2 });
    }

    #[test]
    fn find_atom_requires_all_fields_to_match() {
        let structure = two_model_structure();
        let mut coord = AtomCoord {
            serial: 2,
            atom_name: "CA".to_string(),
            residue_name: "ALA".to_string(),
            chain_id: 'A',
            residue_seq: 1,
        };
        assert!((structure.find_atom(&coord).unwrap().position.x - 2.0).abs() < TOLERANCE);
        coord.residue_name = "GLY".to_string();
        assert!(matches!(
            structure.find_atom(&coord),
            Err(StructureError::AtomNotFound(_))
        ));
    }

    #[test]
    fn centroid_of_first_model() {
        let structure = two_model_structure();
        let c = structure.centroid(ModelSelection::First).unwrap();
        assert!((c.x - 2.0).abs() < TOLERANCE);
        assert!(Structure::default().centroid(ModelSelection::First).is_err());
    }

    #[test]
    fn atom_display_rewrites_serial_chain_and_coordinates() {
        let Record::Atom(mut a) = atom(5, "CA", 1.5) else {
            unreachable!()
        };
        a.serial = 123;
        a.chain_id = 'B';
        a.position = Point3::new(-10.25, 2.0, 3.125);
        let line = a.to_string();
        assert_eq!(&line[0..6], "ATOM  ");
        assert_eq!(&line[6..11], "  123");
        assert_eq!(&line[17..20], "ALA");
        assert_eq!(&line[21..22], "B");
        assert_eq!(&line[30..38], " -10.250");
        assert_eq!(&line[38..46], "   2.000");
        assert_eq!(&line[54..60], "  1.00");
    }

    #[test]
    fn hetatm_places_fields_in_pdb_columns() {
        let a = AtomRecord::hetatm(3, "N", "HOH", 'Z', 3, Point3::new(1.0, 2.0, 3.0));
        let line = a.to_string();
        assert_eq!(&line[0..6], "HETATM");
        assert_eq!(&line[6..11], "    3");
        assert_eq!(&line[12..16], " N  ");
        assert_eq!(&line[17..20], "HOH");
        assert_eq!(&line[21..22], "Z");
        assert_eq!(&line[22..26], "   3");
        assert_eq!(&line[30..54], "   1.000   2.000   3.000");
    }
}
