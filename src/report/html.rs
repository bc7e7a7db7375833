//! Side-by-side HTML rendering for response diffs.

use std::fmt::Write as _;

use similar::{ChangeTag, TextDiff};

pub(crate) fn render_fragment(label: &str, expected: &str, actual: &str) -> String {
    let diff = TextDiff::from_lines(expected, actual);
    let mut rows = String::new();
    for change in diff.iter_all_changes() {
        let line = escape(change.value().trim_end_matches(['\n', '\r']));
        match change.tag() {
            ChangeTag::Equal => push_row(&mut rows, "eq", &line, &line),
            ChangeTag::Delete => push_row(&mut rows, "del", &line, ""),
            ChangeTag::Insert => push_row(&mut rows, "ins", "", &line),
        }
    }
    format!(
        "<div class=\"case\">\n<pre class=\"label\">{}</pre>\n<table class=\"diff\">\n<tr><th>expected</th><th>actual</th></tr>\n{}</table>\n</div>\n",
        escape(label),
        rows
    )
}

fn push_row(rows: &mut String, class: &str, left: &str, right: &str) {
    let _ = writeln!(
        rows,
        "<tr class=\"{}\"><td>{}</td><td>{}</td></tr>",
        class, left, right
    );
}

pub(crate) fn render_document(fragments: &str) -> String {
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>htdiff report</title>\n<style>\n\
         table.diff {{ border-collapse: collapse; width: 100%; font-family: monospace; }}\n\
         table.diff td, table.diff th {{ border: 1px solid #ccc; padding: 1px 6px; vertical-align: top; white-space: pre-wrap; width: 50%; }}\n\
         tr.del td:first-child {{ background: #fdd; }}\n\
         tr.ins td:last-child {{ background: #dfd; }}\n\
         pre.label {{ background: #eef; padding: 4px; }}\n\
         </style>\n</head>\n<body>\n<p>generated {}</p>\n{}</body>\n</html>\n",
        generated, fragments
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_contains_label_and_both_sides() {
        let fragment = render_fragment("scenario simple", "left\n", "right\n");
        assert!(fragment.contains("scenario simple"));
        assert!(fragment.contains("left"));
        assert!(fragment.contains("right"));
        assert!(fragment.contains("class=\"del\""));
        assert!(fragment.contains("class=\"ins\""));
    }

    #[test]
    fn identical_texts_render_equal_rows_only() {
        let fragment = render_fragment("label", "same\n", "same\n");
        assert!(fragment.contains("class=\"eq\""));
        assert!(!fragment.contains("class=\"del\""));
        assert!(!fragment.contains("class=\"ins\""));
    }

    #[test]
    fn markup_is_escaped() {
        let fragment = render_fragment("<l&l>", "<body>\n", "\"x\"\n");
        assert!(fragment.contains("&lt;l&amp;l&gt;"));
        assert!(fragment.contains("&lt;body&gt;"));
        assert!(fragment.contains("&quot;x&quot;"));
    }

    #[test]
    fn document_wraps_fragments() {
        let document = render_document("<div>frag</div>");
        assert!(document.starts_with("<!DOCTYPE html>"));
        assert!(document.contains("<div>frag</div>"));
        assert!(document.contains("</html>"));
    }
}
