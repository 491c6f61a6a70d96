use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidSetFormat(String),

    #[error("Key cannot be empty in '{0}'.")]
    EmptyKey(String),

    #[error("Invalid boolean value for {key}: '{value}'. Expected 'true' or 'false'.")]
    InvalidBool { key: String, value: String },
}

/// Splits a `--set` argument at the first `=`. The key is trimmed, the value
/// is kept as written so that padded column text survives.
pub fn split_key_value(kv_pair: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = kv_pair
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidSetFormat(kv_pair.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyKey(kv_pair.to_string()));
    }
    Ok((key, value))
}

pub fn parse_bool(key: &str, value: &str) -> Result<bool, ParseError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ParseError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
