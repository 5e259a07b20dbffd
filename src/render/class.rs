//! Class and interface pages for the Sphinx PHP domain.

use super::rst::{self, FIELD_CONTINUATION};
use crate::model::*;
use std::collections::HashMap;
use tracing::debug;

/// Directive used for a method entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Instance,
    Static,
}

impl MethodKind {
    fn for_section(kind: &SectionKind) -> Option<Self> {
        match kind {
            SectionKind::PublicFunc => Some(MethodKind::Instance),
            SectionKind::PublicStaticFunc => Some(MethodKind::Static),
            SectionKind::Other(_) => None,
        }
    }

    fn directive(self) -> &'static str {
        match self {
            MethodKind::Instance => "method",
            MethodKind::Static => "staticmethod",
        }
    }
}

/// Render the whole page for a class or interface titled `title`.
pub fn render_class(compound: &CompoundNode, title: &str) -> String {
    let mut out = rst::heading(title);
    out.push('\n');

    let description = rst::paragraphs(&compound.description.paragraphs);
    if !description.is_empty() {
        out.push_str(&description);
        out.push_str("\n\n");
    }

    let directive = if compound.is_interface() {
        "interface"
    } else {
        "class"
    };
    out.push_str(&format!(".. php:{}:: {}\n\n", directive, title));

    for section in &compound.sections {
        debug!("  {}", section.kind.as_str());
        let Some(kind) = MethodKind::for_section(&section.kind) else {
            debug!("    Skipping, no rules to print this section");
            continue;
        };
        for member in &section.members {
            out.push_str(&render_method(member, kind));
        }
    }
    out
}

/// Render one method entry with its parameter and return fields.
///
/// Parameters follow the formal declaration order. Free-text parameter docs
/// are looked up by name; docs naming a parameter that is not declared are
/// dropped.
pub fn render_method(member: &MemberNode, kind: MethodKind) -> String {
    let documented: HashMap<&str, &DocumentedParameter> = member
        .description
        .params
        .iter()
        .map(|p| (p.name.as_str(), p))
        .collect();

    let name = member.method_name();
    let args = args_string(member);
    debug!("    {} {}", name, args);

    let mut out = format!("  .. php:{}:: {} {}\n\n", kind.directive(), name, args);

    let description = rst::paragraphs(&member.description.paragraphs);
    if !description.is_empty() {
        out.push_str(&rst::indent(&description, "    "));
        out.push_str("\n\n");
    }

    for param in &member.params {
        let mut entry = match documented.get(param.name.as_str()) {
            Some(doc) => documented_param(doc),
            None => undocumented_param(param),
        };
        if param.default_value.is_some() && !ends_clause(&entry) {
            entry.push('.');
        }
        out.push_str(&entry);
        out.push('\n');
        if let Some(default) = &param.default_value {
            out.push_str(&format!("{}Default: ``{}``\n", FIELD_CONTINUATION, default));
        }
    }

    let returns = member.description.returns.as_ref();
    if let Some(returns) = returns {
        let body = rst::field_body(&returns.description);
        let line = match returns.return_type.as_deref() {
            Some(ty) => format!("    :returns: {} {}", rst::type_markup(ty), body),
            None => format!("    :returns: {}", body),
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }

    if !member.params.is_empty() || returns.is_some() {
        out.push('\n');
    }
    out
}

/// `(<type> <name>, ...)` from the formal parameters, or Doxygen's raw
/// argument string when none were recorded.
fn args_string(member: &MemberNode) -> String {
    if member.params.is_empty() {
        return member
            .args_string
            .clone()
            .unwrap_or_else(|| "()".to_string());
    }
    let parts: Vec<String> = member
        .params
        .iter()
        .map(|p| {
            let ty = p
                .declared_type
                .as_deref()
                .map(|t| rst::inline(t, false))
                .unwrap_or_default();
            format!("{} {}", ty, p.name).trim().to_string()
        })
        .collect();
    format!("({})", parts.join(", "))
}

fn documented_param(doc: &DocumentedParameter) -> String {
    let ty = doc.doc_type.as_deref().map(rst::type_markup).unwrap_or_default();
    let head = format!("    :param {}", ty);
    let mut entry = format!("{} {}:", head.trim_end(), doc.name);
    let body = rst::field_body(&doc.description);
    if !body.is_empty() {
        entry.push(' ');
        entry.push_str(&body);
    }
    entry.trim_end().to_string()
}

fn undocumented_param(param: &FormalParameter) -> String {
    let ty = param
        .declared_type
        .as_deref()
        .map(|t| rst::inline(t, true))
        .unwrap_or_default();
    format!("    :param {}:", format!("{} {}", ty, param.name).trim())
}

/// A description already ending in `.` or `:` reads fine before a note.
fn ends_clause(entry: &str) -> bool {
    matches!(entry.trim_end().chars().last(), Some('.') | Some(':'))
}
