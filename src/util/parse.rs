use crate::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// Discord snowflakes are stored as text; this converts them back at the repository
/// boundary.
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Parses an optional stored id, see [`parse_u64_from_string`].
pub fn parse_optional_u64(value: Option<String>) -> Result<Option<u64>, AppError> {
    value.map(parse_u64_from_string).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snowflake() {
        let id = parse_u64_from_string("1183414374409043978".to_string()).unwrap();
        assert_eq!(id, 1183414374409043978);
    }

    #[test]
    fn rejects_non_numeric_id() {
        let result = parse_u64_from_string("abc".to_string());
        assert!(matches!(
            result,
            Err(AppError::InternalErr(InternalError::ParseStringId { .. }))
        ));
    }

    #[test]
    fn passes_through_missing_optional_id() {
        assert_eq!(parse_optional_u64(None).unwrap(), None);
        assert_eq!(parse_optional_u64(Some("7".to_string())).unwrap(), Some(7));
    }
}
