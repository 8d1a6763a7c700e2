use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid boolean '{0}'. Expected 'true' or 'false'.")]
    InvalidBool(String),

    #[error("Invalid strength '{token}' in list '{list}'. Expected a number.")]
    InvalidStrength { token: String, list: String },

    #[error("Strength list cannot be empty.")]
    EmptyList,
}

/// Parses `true`/`false` in any letter case.
pub fn parse_bool_flag(value: &str) -> Result<bool, ParseError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidBool(value.to_string())),
    }
}

/// Parses a comma-separated list of strengths such as `10000,20000,30000`.
///
/// Range checks are left to the conversion configuration.
pub fn parse_strength_list(value: &str) -> Result<Vec<f64>, ParseError> {
    if value.trim().is_empty() {
        return Err(ParseError::EmptyList);
    }
    value
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidStrength {
                    token: token.trim().to_string(),
                    list: value.to_string(),
                })
        })
        .collect()
}
