use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::utils::parser;
use sbml2sbol::engine::config::ConversionConfigBuilder;
use std::str::FromStr;
use tracing::{debug, warn};

/// Resolves the final conversion settings.
///
/// Each value comes from the first source that provides it: command-line argument, `--set`
/// override, configuration file, built-in default.
pub fn build_config(args: &Cli) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = match &args.config {
        Some(config_path) => FileConfig::from_file(config_path)?,
        None => FileConfig::default(),
    };
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let rbs_file = file_config.rbs.take().unwrap_or_default();
    let sbol_file = file_config.sbol.take().unwrap_or_default();

    let strengths = args
        .tirs
        .clone()
        .or(rbs_file.strengths)
        .unwrap_or(defaults.strengths);
    if !args.rbs && args.tirs.is_some() {
        warn!("Ignoring --tirs because RBS modeling is disabled.");
    }

    let pathway_id = args
        .pathway_id
        .clone()
        .or(file_config.pathway_id)
        .unwrap_or(defaults.pathway_id);
    let max_prot_per_react = args
        .max_prot_per_react
        .or(file_config.max_prot_per_react)
        .unwrap_or(defaults.max_prot_per_react);
    let homespace = args
        .homespace
        .clone()
        .or(sbol_file.homespace)
        .unwrap_or(defaults.homespace);
    let version = sbol_file.version.unwrap_or(defaults.version);
    let validate = args.validate || sbol_file.validate.unwrap_or(defaults.validate);

    let core_config = ConversionConfigBuilder::new()
        .rbs(args.rbs)
        .strengths(strengths)
        .pathway_id(pathway_id)
        .max_prot_per_react(max_prot_per_react)
        .homespace(homespace)
        .version(version)
        .validate(validate)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;
    debug!("Resolved conversion configuration: {:?}", core_config);

    Ok(AppConfig {
        inputs: args.inputs.clone(),
        output: args.output.clone(),
        core_config,
    })
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key.trim() {
            "pathway-id" => {
                config.pathway_id = Some(value_str.trim().to_string());
            }
            "max-prot-per-react" => {
                config.max_prot_per_react = Some(parse_value(key, value_str, "integer")?);
            }
            "rbs.strengths" => {
                let strengths = parser::parse_strength_list(value_str)
                    .map_err(|e| CliError::Argument(format!("{}: {}", key, e)))?;
                config.rbs.get_or_insert_with(Default::default).strengths = Some(strengths);
            }
            "sbol.homespace" => {
                config.sbol.get_or_insert_with(Default::default).homespace =
                    Some(value_str.trim().to_string());
            }
            "sbol.version" => {
                config.sbol.get_or_insert_with(Default::default).version =
                    Some(value_str.trim().to_string());
            }
            "sbol.validate" => {
                let validate = parser::parse_bool_flag(value_str)
                    .map_err(|e| CliError::Argument(format!("{}: {}", key, e)))?;
                config.sbol.get_or_insert_with(Default::default).validate = Some(validate);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn parse_args(extra: &[&str]) -> Cli {
        let mut argv = vec!["sbml2sbol", "true", "out.xml", "models"];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv).unwrap()
    }

    fn write_config_file(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("sbml2sbol.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_apply_without_file_or_overrides() {
        let app = build_config(&parse_args(&[])).unwrap();
        let cfg = app.core_config;
        assert_eq!(cfg.pathway_id, "rp_pathway");
        assert_eq!(cfg.max_prot_per_react, 3);
        assert_eq!(cfg.strengths, Some(vec![10000.0, 20000.0, 30000.0]));
        assert_eq!(cfg.sbol.homespace, "http://liverpool.ac.uk");
        assert_eq!(cfg.sbol.version, "1");
        assert!(!cfg.sbol.validate);
        assert_eq!(app.inputs, vec![PathBuf::from("models")]);
        assert_eq!(app.output, PathBuf::from("out.xml"));
    }

    #[test]
    fn rbs_false_disables_strengths_everywhere() {
        let args = Cli::try_parse_from(["sbml2sbol", "false", "out.xml", "in.xml", "--tirs", "5"])
            .unwrap();
        let app = build_config(&args).unwrap();
        assert_eq!(app.core_config.strengths, None);
    }

    #[test]
    fn empty_strength_list_in_file_builds_variants_without_rbs() {
        let dir = tempdir().unwrap();
        let path = write_config_file(dir.path(), "[rbs]\nstrengths = []\n");
        let app = build_config(&parse_args(&["-c", path.to_str().unwrap()])).unwrap();
        assert_eq!(app.core_config.strengths, None);
        assert!(!app.core_config.rbs_enabled());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            dir.path(),
            r#"
pathway-id = "alt_pathway"
max-prot-per-react = 1

[rbs]
strengths = [5000]

[sbol]
homespace = "https://example.org"
version = "3"
validate = true
"#,
        );
        let app = build_config(&parse_args(&["-c", path.to_str().unwrap()])).unwrap();
        let cfg = app.core_config;
        assert_eq!(cfg.pathway_id, "alt_pathway");
        assert_eq!(cfg.max_prot_per_react, 1);
        assert_eq!(cfg.strengths, Some(vec![5000.0]));
        assert_eq!(cfg.sbol.homespace, "https://example.org");
        assert_eq!(cfg.sbol.version, "3");
        assert!(cfg.sbol.validate);
    }

    #[test]
    fn set_values_override_file_and_cli_overrides_both() {
        let dir = tempdir().unwrap();
        let path = write_config_file(dir.path(), "max-prot-per-react = 1\npathway-id = \"a\"\n");
        let app = build_config(&parse_args(&[
            "-c",
            path.to_str().unwrap(),
            "-S",
            "max-prot-per-react=2",
            "-S",
            "pathway-id=b",
            "-S",
            "rbs.strengths=100,200",
            "--pathway-id",
            "c",
        ]))
        .unwrap();
        let cfg = app.core_config;
        assert_eq!(cfg.max_prot_per_react, 2);
        assert_eq!(cfg.pathway_id, "c");
        assert_eq!(cfg.strengths, Some(vec![100.0, 200.0]));
    }

    #[test]
    fn tirs_override_configured_strengths() {
        let app = build_config(&parse_args(&[
            "-S",
            "rbs.strengths=100,200",
            "--tirs",
            "7,8,9",
        ]))
        .unwrap();
        assert_eq!(app.core_config.strengths, Some(vec![7.0, 8.0, 9.0]));
    }

    #[test]
    fn validate_flag_and_set_value_enable_validation() {
        let from_flag = build_config(&parse_args(&["--validate"])).unwrap();
        assert!(from_flag.core_config.sbol.validate);

        let from_set = build_config(&parse_args(&["-S", "sbol.validate=TRUE"])).unwrap();
        assert!(from_set.core_config.sbol.validate);
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        let missing_eq = build_config(&parse_args(&["-S", "max-prot-per-react"]));
        assert!(matches!(missing_eq, Err(CliError::Config(_))));

        let unknown = build_config(&parse_args(&["-S", "rbs.enabled=true"]));
        assert!(matches!(unknown, Err(CliError::Config(_))));

        let bad_int = build_config(&parse_args(&["-S", "max-prot-per-react=many"]));
        assert!(matches!(bad_int, Err(CliError::Config(_))));

        let bad_list = build_config(&parse_args(&["-S", "rbs.strengths=1,x"]));
        assert!(matches!(bad_list, Err(CliError::Argument(_))));
    }

    #[test]
    fn non_positive_strengths_fail_configuration() {
        let result = build_config(&parse_args(&["--tirs", "100,-5"]));
        match result {
            Err(CliError::Config(msg)) => assert!(msg.contains("-5")),
            other => panic!("expected a configuration error, got {:?}", other.err()),
        }
    }
}
