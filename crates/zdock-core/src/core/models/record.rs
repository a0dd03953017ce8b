use std::fmt;

/// The two result-file dialects produced by the docking search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Two-body docking: 3 rotation angles, 3 grid cells.
    Pairwise,
    /// Symmetric multimer docking: 2 rotation angles, 2 grid cells.
    Multimer,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Pairwise => f.write_str("pairwise"),
            Dialect::Multimer => f.write_str("multimer"),
        }
    }
}

/// Integer displacement on the periodic search grid.
pub type GridTranslation = [i32; 3];

/// A single candidate pose from the result file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultRecord {
    pub rotation: [f64; 3],
    pub translation: GridTranslation,
    pub score: f64,
    dialect: Dialect,
}

impl ResultRecord {
    pub fn pairwise(rotation: [f64; 3], translation: GridTranslation, score: f64) -> Self {
        Self {
            rotation,
            translation,
            score,
            dialect: Dialect::Pairwise,
        }
    }

    /// Builds a multimer record; the unused third angle and grid cell are stored as zero.
    pub fn multimer(rotation: [f64; 2], translation: [i32; 2], score: f64) -> Self {
        Self {
            rotation: [rotation[0], rotation[1], 0.0],
            translation: [translation[0], translation[1], 0],
            score,
            dialect: Dialect::Multimer,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }
}

impl fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r0, r1, r2] = self.rotation;
        let [g0, g1, g2] = self.translation;
        match self.dialect {
            Dialect::Pairwise => write!(
                f,
                "{r0:.6}\t{r1:.6}\t{r2:.6}\t{g0}\t{g1}\t{g2}\t{:.3}",
                self.score
            ),
            Dialect::Multimer => write!(f, "{r0:.6}\t{r1:.6}\t{g0}\t{g1}\t{:.2}", self.score),
        }
    }
}
