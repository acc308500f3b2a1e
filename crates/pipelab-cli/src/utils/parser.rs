use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Component '{component}' cannot be empty in '{input}'.")]
    EmptyComponent {
        component: &'static str,
        input: String,
    },

    #[error("Invalid answer '{value}' in '{input}'. Expected zero-based indices such as '0,2,1'.")]
    InvalidAnswer { value: String, input: String },
}

/// Splits `section.key=value` on the first `=`.
pub fn parse_key_value(input: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidKeyValue(input.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "key",
            input: input.to_string(),
        });
    }
    Ok((key, value.trim()))
}

/// Parses a comma separated list of answer indices. Whitespace is ignored.
pub fn parse_answers(input: &str) -> Result<Vec<usize>, ParseError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    input
        .split(',')
        .map(str::trim)
        .map(|value| {
            if value.is_empty() {
                return Err(ParseError::EmptyComponent {
                    component: "answer",
                    input: input.to_string(),
                });
            }
            value.parse().map_err(|_| ParseError::InvalidAnswer {
                value: value.to_string(),
                input: input.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_value_pairs() {
        assert_eq!(
            parse_key_value("composer.default-module=foldx"),
            Ok(("composer.default-module", "foldx"))
        );
        assert_eq!(
            parse_key_value("reasoning.api-url=https://host/v1?a=b"),
            Ok(("reasoning.api-url", "https://host/v1?a=b"))
        );
        assert_eq!(parse_key_value(" mastery.store-path = "), Ok(("mastery.store-path", "")));
    }

    #[test]
    fn rejects_malformed_key_value_pairs() {
        assert_eq!(
            parse_key_value("composer"),
            Err(ParseError::InvalidKeyValue("composer".to_string()))
        );
        assert!(matches!(
            parse_key_value("=value"),
            Err(ParseError::EmptyComponent { component: "key", .. })
        ));
    }

    #[test]
    fn parses_answer_lists() {
        assert_eq!(parse_answers("0,2, 1"), Ok(vec![0, 2, 1]));
        assert_eq!(parse_answers("3"), Ok(vec![3]));
        assert_eq!(parse_answers("  "), Ok(vec![]));
    }

    #[test]
    fn rejects_bad_answers() {
        assert!(matches!(
            parse_answers("0,b"),
            Err(ParseError::InvalidAnswer { value, .. }) if value == "b"
        ));
        assert!(matches!(
            parse_answers("0,,1"),
            Err(ParseError::EmptyComponent { component: "answer", .. })
        ));
        assert!(parse_answers("-1").is_err());
    }
}
