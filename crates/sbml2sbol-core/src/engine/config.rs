pub use crate::core::models::document::SbolConfig;
use thiserror::Error;

/// Expression strengths used when RBS modeling is enabled and no explicit list is given.
pub const DEFAULT_STRENGTHS: [f64; 3] = [10000.0, 20000.0, 30000.0];
pub const DEFAULT_MAX_PROT_PER_REACT: usize = 3;
pub const DEFAULT_PATHWAY_ID: &str = "rp_pathway";

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Parameter '{0}' cannot be empty")]
    EmptyParameter(&'static str),
    #[error("Expression strength must be a finite positive number, got {0}")]
    InvalidStrength(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Id of the `groups` package group holding the heterologous pathway.
    pub pathway_id: String,
    /// Maximum number of candidate enzymes assembled per reaction.
    pub max_prot_per_react: usize,
    /// Expression strengths to enumerate per enzyme; `None` disables RBS modeling.
    pub strengths: Option<Vec<f64>>,
    pub sbol: SbolConfig,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            pathway_id: DEFAULT_PATHWAY_ID.to_string(),
            max_prot_per_react: DEFAULT_MAX_PROT_PER_REACT,
            strengths: None,
            sbol: SbolConfig::default(),
        }
    }
}

impl ConversionConfig {
    pub fn rbs_enabled(&self) -> bool {
        self.strengths.is_some()
    }
}

#[derive(Default)]
pub struct ConversionConfigBuilder {
    rbs: bool,
    strengths: Option<Vec<f64>>,
    max_prot_per_react: Option<usize>,
    pathway_id: Option<String>,
    homespace: Option<String>,
    version: Option<String>,
    validate: Option<bool>,
}

impl ConversionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rbs(mut self, enabled: bool) -> Self {
        self.rbs = enabled;
        self
    }
    pub fn strengths(mut self, strengths: Vec<f64>) -> Self {
        self.strengths = Some(strengths);
        self
    }
    pub fn max_prot_per_react(mut self, max: usize) -> Self {
        self.max_prot_per_react = Some(max);
        self
    }
    pub fn pathway_id(mut self, id: impl Into<String>) -> Self {
        self.pathway_id = Some(id.into());
        self
    }
    pub fn homespace(mut self, homespace: impl Into<String>) -> Self {
        self.homespace = Some(homespace.into());
        self
    }
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
    pub fn validate(mut self, validate: bool) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Resolves defaults and checks the configuration.
    ///
    /// Strengths only take effect when RBS modeling is enabled; an explicit list is otherwise
    /// ignored. With RBS modeling enabled and no explicit list, [`DEFAULT_STRENGTHS`] apply;
    /// an explicit empty list leaves RBS modeling off, so every enzyme gets one variant
    /// without an RBS.
    pub fn build(self) -> Result<ConversionConfig, ConfigError> {
        let strengths = if self.rbs {
            let strengths = self
                .strengths
                .unwrap_or_else(|| DEFAULT_STRENGTHS.to_vec());
            if let Some(&bad) = strengths.iter().find(|s| !s.is_finite() || **s <= 0.0) {
                return Err(ConfigError::InvalidStrength(bad));
            }
            Some(strengths).filter(|s| !s.is_empty())
        } else {
            None
        };

        let pathway_id = self
            .pathway_id
            .unwrap_or_else(|| DEFAULT_PATHWAY_ID.to_string());
        if pathway_id.trim().is_empty() {
            return Err(ConfigError::EmptyParameter("pathway_id"));
        }

        let defaults = SbolConfig::default();
        let homespace = self.homespace.unwrap_or(defaults.homespace);
        if homespace.trim().is_empty() {
            return Err(ConfigError::EmptyParameter("homespace"));
        }

        Ok(ConversionConfig {
            pathway_id,
            max_prot_per_react: self
                .max_prot_per_react
                .unwrap_or(DEFAULT_MAX_PROT_PER_REACT),
            strengths,
            sbol: SbolConfig {
                homespace,
                version: self.version.unwrap_or(defaults.version),
                validate: self.validate.unwrap_or(defaults.validate),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_rbs_modeling() {
        let config = ConversionConfigBuilder::new().build().unwrap();
        assert_eq!(config, ConversionConfig::default());
        assert!(!config.rbs_enabled());
        assert_eq!(config.pathway_id, "rp_pathway");
        assert_eq!(config.max_prot_per_react, 3);
        assert_eq!(config.sbol.homespace, "http://liverpool.ac.uk");
        assert!(!config.sbol.validate);
    }

    #[test]
    fn rbs_without_explicit_strengths_uses_defaults() {
        let config = ConversionConfigBuilder::new().rbs(true).build().unwrap();
        assert_eq!(config.strengths, Some(vec![10000.0, 20000.0, 30000.0]));
    }

    #[test]
    fn explicit_strengths_are_kept_in_order() {
        let config = ConversionConfigBuilder::new()
            .rbs(true)
            .strengths(vec![5000.0, 1000.0])
            .build()
            .unwrap();
        assert_eq!(config.strengths, Some(vec![5000.0, 1000.0]));
    }

    #[test]
    fn strengths_are_ignored_when_rbs_is_disabled() {
        let config = ConversionConfigBuilder::new()
            .rbs(false)
            .strengths(vec![5000.0])
            .build()
            .unwrap();
        assert_eq!(config.strengths, None);
    }

    #[test]
    fn empty_strength_list_turns_rbs_modeling_off() {
        let config = ConversionConfigBuilder::new()
            .rbs(true)
            .strengths(vec![])
            .build()
            .unwrap();
        assert_eq!(config.strengths, None);
        assert!(!config.rbs_enabled());
    }

    #[test]
    fn invalid_strengths_are_rejected() {
        let negative = ConversionConfigBuilder::new()
            .rbs(true)
            .strengths(vec![100.0, -1.0])
            .build();
        assert_eq!(negative, Err(ConfigError::InvalidStrength(-1.0)));

        let zero = ConversionConfigBuilder::new()
            .rbs(true)
            .strengths(vec![0.0])
            .build();
        assert_eq!(zero, Err(ConfigError::InvalidStrength(0.0)));
    }

    #[test]
    fn blank_identifiers_are_rejected() {
        assert_eq!(
            ConversionConfigBuilder::new().pathway_id(" ").build(),
            Err(ConfigError::EmptyParameter("pathway_id"))
        );
        assert_eq!(
            ConversionConfigBuilder::new().homespace("").build(),
            Err(ConfigError::EmptyParameter("homespace"))
        );
    }

    #[test]
    fn document_settings_are_forwarded() {
        let config = ConversionConfigBuilder::new()
            .homespace("https://example.org")
            .version("2")
            .validate(true)
            .max_prot_per_react(5)
            .pathway_id("my_pathway")
            .build()
            .unwrap();
        assert_eq!(config.sbol.homespace, "https://example.org");
        assert_eq!(config.sbol.version, "2");
        assert!(config.sbol.validate);
        assert_eq!(config.max_prot_per_react, 5);
        assert_eq!(config.pathway_id, "my_pathway");
    }
}
