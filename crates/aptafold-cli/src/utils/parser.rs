use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE (e.g., 'folding.timeout-secs=30').")]
    MissingSeparator(String),

    #[error("Key cannot be empty in '{0}'.")]
    EmptyKey(String),

    #[error("Invalid {expected} value for '{key}': '{value}'.")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}

/// Splits `KEY=VALUE` at the first `=`, trimming whitespace around the key.
/// The value may itself contain `=` and may be empty.
pub fn parse_key_value(pair: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| ParseError::MissingSeparator(pair.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyKey(pair.to_string()));
    }
    Ok((key, value.trim()))
}

pub fn parse_value<T: FromStr>(
    key: &str,
    value: &str,
    expected: &'static str,
) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    })
}

/// Strips one layer of matching single or double quotes, so shell-quoted
/// `-S columns.structure="Secondary Structure"` and its unquoted form agree.
pub fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_first_equals_sign() {
        assert_eq!(
            parse_key_value("folding.extra-args=--noLP=1"),
            Ok(("folding.extra-args", "--noLP=1"))
        );
    }

    #[test]
    fn trims_key_and_value() {
        assert_eq!(
            parse_key_value(" batch.jobs = 4 "),
            Ok(("batch.jobs", "4"))
        );
    }

    #[test]
    fn empty_value_is_allowed() {
        assert_eq!(parse_key_value("folding.executable="), Ok(("folding.executable", "")));
    }

    #[test]
    fn rejects_missing_separator() {
        assert_eq!(
            parse_key_value("batch.jobs"),
            Err(ParseError::MissingSeparator("batch.jobs".to_string()))
        );
    }

    #[test]
    fn rejects_empty_key() {
        assert_eq!(
            parse_key_value("=4"),
            Err(ParseError::EmptyKey("=4".to_string()))
        );
    }

    #[test]
    fn parses_typed_values() {
        assert_eq!(parse_value::<u64>("folding.timeout-secs", "30", "integer"), Ok(30));
        assert_eq!(parse_value::<f64>("folding.temperature", "-5.5", "float"), Ok(-5.5));
        assert_eq!(parse_value::<bool>("output.include-metrics", "true", "boolean"), Ok(true));
    }

    #[test]
    fn reports_key_and_expected_type_on_bad_value() {
        let err = parse_value::<usize>("batch.jobs", "many", "integer").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid integer value for 'batch.jobs': 'many'."
        );
    }

    #[test]
    fn unquote_strips_one_matching_pair() {
        assert_eq!(unquote("\"Secondary Structure\""), "Secondary Structure");
        assert_eq!(unquote("'Loop Count'"), "Loop Count");
        assert_eq!(unquote("\"unbalanced'"), "\"unbalanced'");
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote("\""), "\"");
    }
}
