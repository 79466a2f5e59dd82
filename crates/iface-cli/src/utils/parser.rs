use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid chain identifier '{0}'. Chain ids are single characters (e.g., 'A,B').")]
    InvalidChainId(String),

    #[error("Chain list '{0}' is empty.")]
    EmptyChainList(String),

    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),
}

/// Parses a chain list such as `A,B`, `A, B` or `AB`.
pub fn parse_chain_list(value: &str) -> Result<Vec<char>, ParseError> {
    let trimmed = value.trim();
    let chains: Vec<char> = if trimmed.contains(',') {
        trimmed
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(ParseError::InvalidChainId(part.to_string())),
                }
            })
            .collect::<Result<_, _>>()?
    } else {
        trimmed.chars().filter(|c| !c.is_whitespace()).collect()
    };

    if chains.is_empty() {
        return Err(ParseError::EmptyChainList(value.to_string()));
    }
    Ok(chains)
}

pub fn parse_key_value(pair: &str) -> Result<(&str, &str), ParseError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidKeyValue(pair.to_string())),
    }
}
