use std::fmt;

/// Identifies one atom by the full set of fields of its PDB record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtomCoord {
    pub serial: u32,
    pub atom_name: String,
    pub residue_name: String,
    pub chain_id: char,
    pub residue_seq: i32,
}

impl fmt::Display for AtomCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.serial, self.atom_name, self.residue_name, self.chain_id, self.residue_seq
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstraintKind {
    /// The atoms must be at least `distance` apart.
    Min,
    /// The atoms must be at most `distance` apart.
    #[default]
    Max,
}

/// A distance restraint between two atoms of a docked complex.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub first: AtomCoord,
    pub second: AtomCoord,
    pub distance: f64,
    pub kind: ConstraintKind,
}

impl Constraint {
    /// Inclusive `(min, max)` bounds on the inter-atomic distance.
    pub fn bounds(&self) -> (f64, f64) {
        match self.kind {
            ConstraintKind::Min => (self.distance, f64::INFINITY),
            ConstraintKind::Max => (-1.0, self.distance),
        }
    }

    pub fn is_satisfied_by(&self, distance: f64) -> bool {
        let (min, max) = self.bounds();
        min <= distance && distance <= max
    }
}
