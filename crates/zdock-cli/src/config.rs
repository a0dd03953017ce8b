pub mod defaults;

use crate::cli::PruneArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;
use zdockpp::engine::config::{self as core_config, ClusterOutput};

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPruneConfig {
    cutoff: Option<f64>,
    #[serde(rename = "backbone-only")]
    backbone_only: Option<bool>,
    annotate: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    prune: Option<PartialPruneConfig>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Builds the pruning configuration: command line first, then file, then defaults.
    pub fn merge_with_cli(self, args: &PruneArgs) -> Result<core_config::PruningConfig> {
        let file = self.prune.unwrap_or_default();
        let defaults = DefaultsConfig::default();

        let mut builder = core_config::PruningConfigBuilder::new();
        if let Some(cutoff) = args.cutoff.or(file.cutoff) {
            builder = builder.cutoff(cutoff);
        }

        let backbone_only = if args.all_atoms {
            false
        } else {
            file.backbone_only.unwrap_or(defaults.backbone_only)
        };
        let annotate = args.annotate || file.annotate.unwrap_or(defaults.annotate);
        let output = if annotate {
            ClusterOutput::Annotated
        } else {
            ClusterOutput::Reduced
        };

        builder
            .backbone_only(backbone_only)
            .output(output)
            .build()
            .map_err(|e| {
                CliError::Config(format!(
                    "{e}. Pass --cutoff or set `cutoff` in the [prune] table of the config file."
                ))
            })
    }
}
