use sbml2sbol::engine::config::{
    DEFAULT_MAX_PROT_PER_REACT, DEFAULT_PATHWAY_ID, DEFAULT_STRENGTHS, SbolConfig,
};

pub struct DefaultsConfig {
    pub pathway_id: String,
    pub max_prot_per_react: usize,
    pub strengths: Vec<f64>,
    pub homespace: String,
    pub version: String,
    pub validate: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let sbol = SbolConfig::default();
        Self {
            pathway_id: DEFAULT_PATHWAY_ID.to_string(),
            max_prot_per_react: DEFAULT_MAX_PROT_PER_REACT,
            strengths: DEFAULT_STRENGTHS.to_vec(),
            homespace: sbol.homespace,
            version: sbol.version,
            validate: sbol.validate,
        }
    }
}
