use crate::utils::error::{PeerFinderError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PeerFinderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PeerFinderError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PeerFinderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(PeerFinderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Parses an ASN written as `65536` or `AS65536` (any case).
///
/// Zero is reserved and rejected; anything above `u32::MAX` fails to parse.
pub fn parse_asn(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    let digits = trimmed
        .get(..2)
        .filter(|prefix| prefix.eq_ignore_ascii_case("as"))
        .and_then(|_| trimmed.get(2..))
        .unwrap_or(trimmed);

    let invalid = |reason: String| PeerFinderError::InvalidConfigValueError {
        field: "asn".to_string(),
        value: input.to_string(),
        reason,
    };

    match digits.parse::<u32>() {
        Ok(0) => Err(invalid("ASN 0 is reserved".to_string())),
        Ok(asn) => Ok(asn),
        Err(e) => Err(invalid(format!("not a 16 or 32-bit ASN: {}", e))),
    }
}
