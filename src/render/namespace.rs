//! Namespace index pages.

use super::rst;
use crate::scope::NamespacePage;

/// Index page: title, a globbing `toctree` over the namespace's children,
/// then the namespace's raw description text.
pub fn render_namespace(page: &NamespacePage, raw_description: &str) -> String {
    let mut out = rst::heading(&page.title);
    out.push_str("\n.. toctree::\n   :glob:\n\n   ");
    out.push_str(&page.glob);
    out.push_str("\n\n");
    out.push_str(raw_description);
    out.push('\n');
    out
}
