use crate::utils::parser;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    name = "sbml2sbol",
    author = "Neil Swainston",
    version,
    about = "sbml2sbol - Converts rpSBML pathway models into SBOL gene-assembly designs.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Model ribosome-binding sites with target expression strengths ('true' or 'false').
    #[arg(value_name = "RBS", action = ArgAction::Set, value_parser = parser::parse_bool_flag)]
    pub rbs: bool,

    /// Path of the SBOL document to write. Parent directories are created as needed.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// rpSBML model files, or directories whose .xml/.sbml files are all read.
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    // --- Conversion Overrides ---
    /// Maximum number of candidate enzymes assembled per reaction.
    #[arg(long, value_name = "INT")]
    pub max_prot_per_react: Option<usize>,

    /// Comma-separated target expression strengths, used when RBS modeling is on.
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    pub tirs: Option<Vec<f64>>,

    /// Id of the group holding the heterologous pathway reactions.
    #[arg(long, value_name = "ID")]
    pub pathway_id: Option<String>,

    // --- Document Overrides ---
    /// URI prefix of every written identity.
    #[arg(long, value_name = "URI")]
    pub homespace: Option<String>,

    /// Check the document before writing it.
    #[arg(long)]
    pub validate: bool,

    // --- Configuration ---
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S max-prot-per-react=5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,

    // --- Logging ---
    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
