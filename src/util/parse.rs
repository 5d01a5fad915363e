use crate::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snowflake() {
        assert_eq!(
            parse_u64_from_string("1308891968004292618".to_string()).unwrap(),
            1308891968004292618
        );
    }

    #[test]
    fn rejects_non_numeric() {
        let err = parse_u64_from_string("guild_1".to_string()).unwrap_err();
        assert!(matches!(
            err,
            AppError::InternalErr(InternalError::ParseStringId { ref value, .. }) if value == "guild_1"
        ));
    }
}
