use crate::core::models::structure::AtomFilter;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// What pruning writes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClusterOutput {
    /// One representative record per cluster, in original order.
    #[default]
    Reduced,
    /// Every record, with its score replaced by its 1-based cluster id.
    Annotated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PruningConfig {
    /// Poses closer than this RMSD (in length units) are merged.
    pub cutoff: f64,
    pub output: ClusterOutput,
    /// Atoms of the moving structure used for RMSD.
    pub reference_atoms: AtomFilter,
}

#[derive(Default)]
pub struct PruningConfigBuilder {
    cutoff: Option<f64>,
    output: Option<ClusterOutput>,
    backbone_only: Option<bool>,
}

impl PruningConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
    pub fn output(mut self, output: ClusterOutput) -> Self {
        self.output = Some(output);
        self
    }
    pub fn backbone_only(mut self, backbone_only: bool) -> Self {
        self.backbone_only = Some(backbone_only);
        self
    }

    pub fn build(self) -> Result<PruningConfig, ConfigError> {
        let reference_atoms = if self.backbone_only.unwrap_or(true) {
            AtomFilter::Backbone
        } else {
            AtomFilter::All
        };
        Ok(PruningConfig {
            cutoff: self.cutoff.ok_or(ConfigError::MissingParameter("cutoff"))?,
            output: self.output.unwrap_or_default(),
            reference_atoms,
        })
    }
}
