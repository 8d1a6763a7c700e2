use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileRbsConfig {
    pub strengths: Option<Vec<f64>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileSbolConfig {
    pub homespace: Option<String>,
    pub version: Option<String>,
    pub validate: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub pathway_id: Option<String>,
    pub max_prot_per_react: Option<usize>,
    pub rbs: Option<FileRbsConfig>,
    pub sbol: Option<FileSbolConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn full_file_is_parsed() {
        let config = FileConfig::from_toml_str(
            r#"
pathway-id = "rp_pathway_2"
max-prot-per-react = 4

[rbs]
strengths = [10000, 25000.5]

[sbol]
homespace = "https://example.org"
version = "2"
validate = true
"#,
        )
        .unwrap();

        assert_eq!(config.pathway_id.as_deref(), Some("rp_pathway_2"));
        assert_eq!(config.max_prot_per_react, Some(4));
        assert_eq!(
            config.rbs.and_then(|r| r.strengths),
            Some(vec![10000.0, 25000.5])
        );
        let sbol = config.sbol.unwrap();
        assert_eq!(sbol.homespace.as_deref(), Some("https://example.org"));
        assert_eq!(sbol.version.as_deref(), Some("2"));
        assert_eq!(sbol.validate, Some(true));
    }

    #[test]
    fn empty_file_leaves_everything_unset() {
        let config = FileConfig::from_toml_str("").unwrap();
        assert!(config.pathway_id.is_none());
        assert!(config.rbs.is_none());
        assert!(config.sbol.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml_str("max_prot_per_react = 3").is_err());
        assert!(FileConfig::from_toml_str("[rbs]\nenabled = true").is_err());
    }

    #[test]
    fn malformed_file_names_its_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "max-prot-per-react = \"three\"").unwrap();

        let err = FileConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = FileConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
