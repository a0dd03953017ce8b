/// Values used when neither the command line nor the config file sets them.
pub struct DefaultsConfig {
    pub backbone_only: bool,
    pub annotate: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            backbone_only: true,
            annotate: false,
        }
    }
}
