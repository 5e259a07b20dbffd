//! reStructuredText building blocks shared by the page renderers.

use crate::model::{Inline, Paragraph};

/// Type names rendered as plain words instead of cross-references.
const PRIMITIVE_TYPES: &[&str] = &["mixed", "int", "string", "array", "float", "double"];

/// Indentation of field-list continuation lines under a method.
pub const FIELD_CONTINUATION: &str = "      ";

/// Title followed by a `=` underline of the same length.
pub fn heading(title: &str) -> String {
    format!("{}\n{}\n", title, "=".repeat(title.chars().count()))
}

/// Markup for a documented type name.
///
/// Primitives stay barewords, everything else becomes a `:class:` role.
pub fn type_markup(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        String::new()
    } else if PRIMITIVE_TYPES.contains(&name) {
        name.to_string()
    } else {
        format!(":class:`{}`", name)
    }
}

/// Render inline pieces. With `refs` off, references print as bare names.
pub fn inline(pieces: &[Inline], refs: bool) -> String {
    let mut out = String::new();
    for piece in pieces {
        match piece {
            Inline::Text(text) => out.push_str(text),
            Inline::Ref(name) if refs => {
                out.push_str(":class:`");
                out.push_str(name);
                out.push('`');
            }
            Inline::Ref(name) => out.push_str(name),
        }
    }
    out
}

/// Block text: non-empty paragraphs separated by blank lines, trimmed.
pub fn paragraphs(paras: &[Paragraph]) -> String {
    paras
        .iter()
        .map(|p| inline(p, true))
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
        .trim()
        .to_string()
}

/// Field body: first line inline with the field name, any further lines
/// indented as continuation.
pub fn field_body(paras: &[Paragraph]) -> String {
    let lines: Vec<String> = paras
        .iter()
        .map(|p| inline(p, true))
        .flat_map(|p| p.lines().map(|l| l.trim().to_string()).collect::<Vec<_>>())
        .filter(|l| !l.is_empty())
        .collect();
    lines.join(&format!("\n{}", FIELD_CONTINUATION))
}

/// Prefix every non-empty line with `prefix`.
pub fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn heading_underline_matches_title() {
        assert_eq!(heading("Image"), "Image\n=====\n");
    }

    #[test]
    fn primitives_are_barewords() {
        for name in ["int", "string", "array", "float", "double", "mixed"] {
            assert_eq!(type_markup(name), name);
        }
    }

    #[test]
    fn other_types_are_references() {
        assert_eq!(type_markup("Color"), ":class:`Color`");
        assert_eq!(type_markup("bool"), ":class:`bool`");
        assert_eq!(type_markup(""), "");
    }

    #[test]
    fn inline_with_and_without_refs() {
        let pieces = vec![text("a "), Inline::Ref("Color".to_string())];
        assert_eq!(inline(&pieces, true), "a :class:`Color`");
        assert_eq!(inline(&pieces, false), "a Color");
    }

    #[test]
    fn paragraphs_skip_empty() {
        let paras = vec![vec![text("One.")], vec![], vec![text("  Two. ")]];
        assert_eq!(paragraphs(&paras), "One.\n\n  Two.");
    }

    #[test]
    fn field_body_continuation() {
        let paras = vec![vec![text("First")], vec![text("second\nthird")]];
        assert_eq!(field_body(&paras), "First\n      second\n      third");
    }

    #[test]
    fn indent_skips_blank_lines() {
        assert_eq!(indent("a\n\nb", "    "), "    a\n\n    b");
    }
}
