//! CGI metavariable derivation from a request's query string.
//!
//! Per the CGI invocation convention, a query without `=` yields positional
//! command-line arguments: split on `+`, each word percent-decoded. The raw,
//! undecoded query string stays the canonical value for comparisons.

use crate::error::ValidationError;

/// Derives positional CGI arguments from a raw query string.
///
/// `None` when the query is empty or contains `=` (which suppresses
/// positional-argument derivation entirely).
///
/// # Errors
///
/// Returns an error when a word carries a malformed percent escape.
pub fn derive_cgi_args(query: &str) -> Result<Option<Vec<String>>, ValidationError> {
    if query.is_empty() || query.contains('=') {
        return Ok(None);
    }
    query
        .split('+')
        .map(percent_decode)
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Decodes `%HH` escapes. A truncated or non-hex escape is an error, as is
/// a decoded sequence that is not valid UTF-8.
///
/// # Errors
///
/// Returns an error for malformed input.
pub fn percent_decode(input: &str) -> Result<String, ValidationError> {
    let malformed = || ValidationError::InvalidPercentEncoding {
        value: input.to_owned(),
    };
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut at = 0usize;
    while let Some(&byte) = bytes.get(at) {
        if byte == b'%' {
            let hi = bytes.get(at.saturating_add(1)).and_then(hex_value);
            let lo = bytes.get(at.saturating_add(2)).and_then(hex_value);
            let (Some(hi), Some(lo)) = (hi, lo) else {
                return Err(malformed());
            };
            out.push(hi.saturating_mul(16).saturating_add(lo));
            at = at.saturating_add(3);
        } else {
            out.push(byte);
            at = at.saturating_add(1);
        }
    }
    String::from_utf8(out).map_err(|_utf8| malformed())
}

fn hex_value(byte: &u8) -> Option<u8> {
    (*byte as char).to_digit(16).map(|value| value as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_derives_nothing() -> Result<(), String> {
        assert_eq!(derive_cgi_args("").map_err(|e| e.to_string())?, None);
        Ok(())
    }

    #[test]
    fn plus_separated_words_become_args() -> Result<(), String> {
        assert_eq!(
            derive_cgi_args("hoge+fuga").map_err(|e| e.to_string())?,
            Some(vec!["hoge".to_owned(), "fuga".to_owned()])
        );
        assert_eq!(
            derive_cgi_args("arg1+arg2+arg3").map_err(|e| e.to_string())?,
            Some(vec![
                "arg1".to_owned(),
                "arg2".to_owned(),
                "arg3".to_owned()
            ])
        );
        Ok(())
    }

    #[test]
    fn equals_sign_suppresses_derivation() -> Result<(), String> {
        assert_eq!(
            derive_cgi_args("hoge+fuga=hoge+fuga").map_err(|e| e.to_string())?,
            None
        );
        assert_eq!(derive_cgi_args("a=b").map_err(|e| e.to_string())?, None);
        Ok(())
    }

    #[test]
    fn bare_separators_keep_empty_words() -> Result<(), String> {
        assert_eq!(
            derive_cgi_args("+").map_err(|e| e.to_string())?,
            Some(vec![String::new(), String::new()])
        );
        assert_eq!(
            derive_cgi_args("++").map_err(|e| e.to_string())?,
            Some(vec![String::new(), String::new(), String::new()])
        );
        Ok(())
    }

    #[test]
    fn args_are_percent_decoded() -> Result<(), String> {
        assert_eq!(
            derive_cgi_args("%61rg1+arg2").map_err(|e| e.to_string())?,
            Some(vec!["arg1".to_owned(), "arg2".to_owned()])
        );
        Ok(())
    }

    #[test]
    fn decode_handles_multibyte_sequences() -> Result<(), String> {
        assert_eq!(
            percent_decode("%E3%81%BB%E3%81%92").map_err(|e| e.to_string())?,
            "ほげ"
        );
        assert_eq!(percent_decode("plain").map_err(|e| e.to_string())?, "plain");
        assert_eq!(
            percent_decode("%73ample").map_err(|e| e.to_string())?,
            "sample"
        );
        Ok(())
    }

    #[test]
    fn malformed_escapes_are_errors() {
        for input in ["%", "%%", "% 1", "%z1", "%E3%81%9", "tail%"] {
            assert!(percent_decode(input).is_err(), "expected error for {input}");
        }
        assert!(derive_cgi_args("ok+%zz").is_err());
    }
}
