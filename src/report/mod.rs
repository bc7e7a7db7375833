//! Accumulates side-by-side HTML diffs for failed comparisons and writes
//! the `diff.html` artifact at the end of a run.

mod html;

use std::path::Path;

use crate::error::ReportError;

/// Hard ceiling on accumulated diff output. Exceeding it aborts the run:
/// past this point the artifact only proves that most comparisons failed.
pub const MAX_DIFF_HTML_SIZE: usize = 10_000_000;

#[derive(Debug)]
pub struct DiffBuffer {
    html: String,
    limit: usize,
}

impl Default for DiffBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffBuffer {
    pub fn new() -> Self {
        Self::with_limit(MAX_DIFF_HTML_SIZE)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            html: String::new(),
            limit,
        }
    }

    /// Appends a labeled side-by-side diff of `expected` against `actual`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::DiffBufferExceeded`] when the fragment would
    /// push the buffer past its size cap; this is fatal for the run.
    pub fn record(&mut self, label: &str, expected: &str, actual: &str) -> Result<(), ReportError> {
        let fragment = html::render_fragment(label, expected, actual);
        let next_size = self.html.len().saturating_add(fragment.len());
        if next_size > self.limit {
            return Err(ReportError::DiffBufferExceeded {
                size: next_size,
                limit: self.limit,
            });
        }
        self.html.push_str(&fragment);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.html.len()
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    /// Overwrites `path` with the full artifact, fragments in record order.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write_artifact(&self, path: &Path) -> Result<(), ReportError> {
        let document = html::render_document(&self.html);
        std::fs::write(path, document).map_err(|source| ReportError::WriteArtifact {
            path: path.to_path_buf(),
            source,
        })
    }
}
