use crate::error::{IniError, Result};

/// Extracts the text between the first pair of double quotes in `raw`.
///
/// Anything before the opening quote or after the closing quote is
/// discarded. A value with no closing quote is a [`IniError::MalformedLiteral`].
pub fn decode_quoted(raw: &str) -> Result<String> {
    let malformed = || IniError::MalformedLiteral {
        value: raw.to_string(),
    };
    let (_, after_open) = raw.split_once('"').ok_or_else(malformed)?;
    let (literal, _) = after_open.split_once('"').ok_or_else(malformed)?;
    Ok(literal.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_literal() {
        assert_eq!(decode_quoted("\"Kung Fu Man\"").unwrap(), "Kung Fu Man");
    }

    #[test]
    fn ignores_surrounding_text() {
        assert_eq!(decode_quoted("x \"KFM\" trailing").unwrap(), "KFM");
        assert_eq!(decode_quoted("\"\"").unwrap(), "");
    }

    #[test]
    fn unclosed_literal_fails() {
        assert!(matches!(
            decode_quoted("\"Kung Fu Man"),
            Err(IniError::MalformedLiteral { .. })
        ));
        assert!(matches!(
            decode_quoted("Kung Fu Man"),
            Err(IniError::MalformedLiteral { .. })
        ));
    }
}
