use nalgebra::Vector3;
use std::fmt;

/// One of the docked structures as it was positioned before the search started.
#[derive(Debug, Clone, PartialEq)]
pub struct StructurePlacement {
    /// Companion structure file name, as recorded in the result header.
    pub filename: String,
    /// Initial translation in real units.
    pub translation: Vector3<f64>,
    /// Initial Z-X-Z Euler rotation, in radians.
    pub rotation: [f64; 3],
}

impl StructurePlacement {
    pub fn new(filename: impl Into<String>, translation: Vector3<f64>, rotation: [f64; 3]) -> Self {
        Self {
            filename: filename.into(),
            translation,
            rotation,
        }
    }
}

/// Writes the filename/translation header row; the rotation lives on its own row.
impl fmt::Display for StructurePlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{:.3}\t{:.3}\t{:.3}",
            self.filename, self.translation.x, self.translation.y, self.translation.z
        )
    }
}
