//! Literal-request templates for raw replays.
//!
//! Template files are opaque text: the harness substitutes placeholder
//! tokens and replays the result verbatim, it never parses them.

use std::path::Path;

use crate::error::ValidationError;

/// Placeholder replaced with the per-case request path.
pub const PATH_TOKEN: &str = "{PATH}";

const BUILTIN_GET: &str = "GET {PATH} HTTP/1.1\r\nHost: localhost\r\nUser-Agent: htdiff\r\nAccept: */*\r\nConnection: close\r\n\r\n";

#[derive(Debug, Clone)]
pub struct RequestTemplate {
    text: String,
}

impl RequestTemplate {
    /// Plain GET request template used when no file is supplied.
    pub fn builtin() -> Self {
        Self {
            text: BUILTIN_GET.to_owned(),
        }
    }

    /// # Errors
    ///
    /// Returns an error when the template file cannot be read.
    pub fn load(path: &Path) -> Result<Self, ValidationError> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            ValidationError::ReadTemplate {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(Self { text })
    }

    /// Applies each substitution in order; unknown tokens pass through.
    pub fn render(&self, substitutions: &[(&str, &str)]) -> String {
        let mut out = self.text.clone();
        for (token, value) in substitutions {
            out = out.replace(token, value);
        }
        out
    }

    pub fn render_path(&self, path: &str) -> String {
        self.render(&[(PATH_TOKEN, path)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_substitutes_the_path() {
        let template = RequestTemplate::builtin();
        let rendered = template.render_path("/sample.html");
        assert!(rendered.starts_with("GET /sample.html HTTP/1.1\r\n"));
        assert!(rendered.ends_with("\r\n\r\n"));
        assert!(!rendered.contains(PATH_TOKEN));
    }

    #[test]
    fn substitutions_apply_in_order() {
        let template = RequestTemplate {
            text: "{A} then {B} then {A}".to_owned(),
        };
        let rendered = template.render(&[("{A}", "x"), ("{B}", "y")]);
        assert_eq!(rendered, "x then y then x");
    }

    #[test]
    fn loads_opaque_text_from_file() -> Result<(), String> {
        let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
        let path = dir.path().join("req.txt");
        std::fs::write(&path, "BROKEN {PATH}\r\n\r\n").map_err(|err| err.to_string())?;
        let template = RequestTemplate::load(&path).map_err(|err| err.to_string())?;
        assert_eq!(template.render_path("/x"), "BROKEN /x\r\n\r\n");
        Ok(())
    }

    #[test]
    fn missing_file_is_a_validation_error() {
        let err = RequestTemplate::load(Path::new("/nonexistent/req.txt"));
        assert!(matches!(err, Err(ValidationError::ReadTemplate { .. })));
    }
}
