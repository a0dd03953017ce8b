use super::placement::StructurePlacement;
use super::record::{Dialect, ResultRecord};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Smallest symmetry order a multimer search can produce.
pub const MIN_SYMMETRY: usize = 3;

/// Geometry of the periodic search grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParameters {
    /// Edge length of the cubic grid, in cells.
    pub box_size: i32,
    /// Length units per grid cell.
    pub spacing: f64,
}

/// Header layout of a pairwise result file.
///
/// The legacy layout predates random receptor pre-rotation: it has four rows,
/// records only the ligand rotation and never swaps structure order. The
/// modern layout has five rows, both rotations and an explicit switched flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLayout {
    Legacy,
    Modern { switched: bool },
}

/// Header row indices for each field of a pairwise header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HeaderRows {
    pub receptor_rotation: Option<usize>,
    pub ligand_rotation: usize,
    pub receptor_file: usize,
    pub ligand_file: usize,
}

impl HeaderLayout {
    pub fn version(&self) -> u8 {
        match self {
            HeaderLayout::Legacy => 0,
            HeaderLayout::Modern { .. } => 1,
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, HeaderLayout::Legacy)
    }

    pub fn is_switched(&self) -> bool {
        matches!(self, HeaderLayout::Modern { switched: true })
    }

    pub fn header_rows(&self) -> usize {
        match self {
            HeaderLayout::Legacy => 4,
            HeaderLayout::Modern { .. } => 5,
        }
    }

    pub(crate) fn rows(&self) -> HeaderRows {
        match self {
            HeaderLayout::Legacy => HeaderRows {
                receptor_rotation: None,
                ligand_rotation: 1,
                receptor_file: 2,
                ligand_file: 3,
            },
            HeaderLayout::Modern { switched: false } => HeaderRows {
                receptor_rotation: Some(1),
                ligand_rotation: 2,
                receptor_file: 3,
                ligand_file: 4,
            },
            HeaderLayout::Modern { switched: true } => HeaderRows {
                receptor_rotation: Some(1),
                ligand_rotation: 2,
                receptor_file: 4,
                ligand_file: 3,
            },
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("'{accessor}' is not available for a {dialect} result document")]
    Unsupported {
        accessor: &'static str,
        dialect: Dialect,
    },
    #[error("Cannot store a {found} record in a {expected} result document")]
    DialectMismatch { expected: Dialect, found: Dialect },
    #[error("Symmetry must be at least 3 (found {0})")]
    SymmetryTooSmall(usize),
    #[error("The legacy header layout cannot record a receptor rotation")]
    RotatedFixedReceptor,
}

/// Result of a two-body docking run.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseDocument {
    pub grid: GridParameters,
    pub layout: HeaderLayout,
    pub receptor: StructurePlacement,
    pub ligand: StructurePlacement,
    pub(crate) records: Vec<ResultRecord>,
}

impl PairwiseDocument {
    pub fn new(
        grid: GridParameters,
        layout: HeaderLayout,
        receptor: StructurePlacement,
        ligand: StructurePlacement,
        records: Vec<ResultRecord>,
    ) -> Result<Self, DocumentError> {
        check_dialect(Dialect::Pairwise, &records)?;
        if layout.is_fixed() && receptor.rotation != [0.0; 3] {
            return Err(DocumentError::RotatedFixedReceptor);
        }
        Ok(Self {
            grid,
            layout,
            receptor,
            ligand,
            records,
        })
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }
}

/// Result of a symmetric multimer docking run.
#[derive(Debug, Clone, PartialEq)]
pub struct MultimerDocument {
    pub grid: GridParameters,
    pub symmetry: usize,
    pub structure: StructurePlacement,
    pub(crate) records: Vec<ResultRecord>,
}

impl MultimerDocument {
    pub fn new(
        grid: GridParameters,
        symmetry: usize,
        structure: StructurePlacement,
        records: Vec<ResultRecord>,
    ) -> Result<Self, DocumentError> {
        if symmetry < MIN_SYMMETRY {
            return Err(DocumentError::SymmetryTooSmall(symmetry));
        }
        check_dialect(Dialect::Multimer, &records)?;
        Ok(Self {
            grid,
            symmetry,
            structure,
            records,
        })
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }
}

fn check_dialect(expected: Dialect, records: &[ResultRecord]) -> Result<(), DocumentError> {
    match records.iter().find(|r| r.dialect() != expected) {
        Some(r) => Err(DocumentError::DialectMismatch {
            expected,
            found: r.dialect(),
        }),
        None => Ok(()),
    }
}

/// Borrowed view of a [`ResultDocument`] by dialect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DocumentRef<'a> {
    Pairwise(&'a PairwiseDocument),
    Multimer(&'a MultimerDocument),
}

#[derive(Debug, Clone, PartialEq)]
enum DocumentKind {
    Pairwise(PairwiseDocument),
    Multimer(MultimerDocument),
}

/// A parsed docking result file: header plus an ordered list of records.
///
/// Every record carries the document's dialect. After construction the only
/// permitted mutation is wholesale replacement of the record list.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultDocument {
    kind: DocumentKind,
    source: Option<PathBuf>,
}

impl From<PairwiseDocument> for ResultDocument {
    fn from(doc: PairwiseDocument) -> Self {
        Self {
            kind: DocumentKind::Pairwise(doc),
            source: None,
        }
    }
}

impl From<MultimerDocument> for ResultDocument {
    fn from(doc: MultimerDocument) -> Self {
        Self {
            kind: DocumentKind::Multimer(doc),
            source: None,
        }
    }
}

impl ResultDocument {
    pub fn dialect(&self) -> Dialect {
        match self.kind {
            DocumentKind::Pairwise(_) => Dialect::Pairwise,
            DocumentKind::Multimer(_) => Dialect::Multimer,
        }
    }

    pub fn kind(&self) -> DocumentRef<'_> {
        match &self.kind {
            DocumentKind::Pairwise(doc) => DocumentRef::Pairwise(doc),
            DocumentKind::Multimer(doc) => DocumentRef::Multimer(doc),
        }
    }

    pub fn is_multimer(&self) -> bool {
        self.dialect() == Dialect::Multimer
    }

    pub fn as_pairwise(&self) -> Option<&PairwiseDocument> {
        match &self.kind {
            DocumentKind::Pairwise(doc) => Some(doc),
            DocumentKind::Multimer(_) => None,
        }
    }

    pub fn as_multimer(&self) -> Option<&MultimerDocument> {
        match &self.kind {
            DocumentKind::Multimer(doc) => Some(doc),
            DocumentKind::Pairwise(_) => None,
        }
    }

    pub fn grid(&self) -> GridParameters {
        match &self.kind {
            DocumentKind::Pairwise(doc) => doc.grid,
            DocumentKind::Multimer(doc) => doc.grid,
        }
    }

    pub fn records(&self) -> &[ResultRecord] {
        match &self.kind {
            DocumentKind::Pairwise(doc) => &doc.records,
            DocumentKind::Multimer(doc) => &doc.records,
        }
    }

    pub fn num_predictions(&self) -> usize {
        self.records().len()
    }

    /// Header layout of a pairwise document; multimer headers have a single fixed layout.
    pub fn layout(&self) -> Option<HeaderLayout> {
        self.as_pairwise().map(|doc| doc.layout)
    }

    pub fn is_fixed(&self) -> bool {
        self.layout().is_some_and(|layout| layout.is_fixed())
    }

    pub fn is_switched(&self) -> bool {
        self.layout().is_some_and(|layout| layout.is_switched())
    }

    /// Header version; multimer files always use the current layout.
    pub fn version(&self) -> u8 {
        self.layout().map_or(1, |layout| layout.version())
    }

    /// The receptor of a pairwise run, or the single structure of a multimer run.
    pub fn first(&self) -> &StructurePlacement {
        match &self.kind {
            DocumentKind::Pairwise(doc) => &doc.receptor,
            DocumentKind::Multimer(doc) => &doc.structure,
        }
    }

    pub fn second(&self) -> Result<&StructurePlacement, DocumentError> {
        self.as_pairwise()
            .map(|doc| &doc.ligand)
            .ok_or_else(|| self.unsupported("second"))
    }

    pub fn structure(&self) -> Result<&StructurePlacement, DocumentError> {
        self.as_multimer()
            .map(|doc| &doc.structure)
            .ok_or_else(|| self.unsupported("structure"))
    }

    pub fn symmetry(&self) -> Result<usize, DocumentError> {
        self.as_multimer()
            .map(|doc| doc.symmetry)
            .ok_or_else(|| self.unsupported("symmetry"))
    }

    /// File this document was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Replaces the whole record list, rejecting records of the other dialect.
    pub fn set_records(&mut self, records: Vec<ResultRecord>) -> Result<(), DocumentError> {
        check_dialect(self.dialect(), &records)?;
        match &mut self.kind {
            DocumentKind::Pairwise(doc) => doc.records = records,
            DocumentKind::Multimer(doc) => doc.records = records,
        }
        Ok(())
    }

    /// A copy of this document's header carrying a different record list.
    pub fn with_records(&self, records: Vec<ResultRecord>) -> Result<Self, DocumentError> {
        check_dialect(self.dialect(), &records)?;
        let kind = match &self.kind {
            DocumentKind::Pairwise(doc) => DocumentKind::Pairwise(PairwiseDocument {
                records,
                ..doc.clone_header()
            }),
            DocumentKind::Multimer(doc) => DocumentKind::Multimer(MultimerDocument {
                records,
                ..doc.clone_header()
            }),
        };
        Ok(Self {
            kind,
            source: self.source.clone(),
        })
    }

    fn unsupported(&self, accessor: &'static str) -> DocumentError {
        DocumentError::Unsupported {
            accessor,
            dialect: self.dialect(),
        }
    }
}

impl PairwiseDocument {
    fn clone_header(&self) -> Self {
        Self {
            grid: self.grid,
            layout: self.layout,
            receptor: self.receptor.clone(),
            ligand: self.ligand.clone(),
            records: Vec::new(),
        }
    }
}

impl MultimerDocument {
    fn clone_header(&self) -> Self {
        Self {
            grid: self.grid,
            symmetry: self.symmetry,
            structure: self.structure.clone(),
            records: Vec::new(),
        }
    }
}
