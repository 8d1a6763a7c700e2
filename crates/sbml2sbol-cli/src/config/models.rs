use sbml2sbol::engine::config::ConversionConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    pub core_config: ConversionConfig,
}
