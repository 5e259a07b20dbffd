//! `<detaileddescription>` → [`Description`].
//!
//! Paragraphs are flattened into inline pieces. The `<parameterlist>` and
//! `<simplesect>` blocks Doxygen embeds inside paragraphs are lifted out
//! into their own fields and never appear in the paragraph text.

use super::{child, children, text_content, LoadError};
use crate::model::*;
use roxmltree::Node;

/// Parse a description element. Every element child counts as a paragraph.
pub fn parse(ref_id: &str, node: Node) -> Result<Description, LoadError> {
    let mut desc = Description::default();
    for para in node.children().filter(|n| n.is_element()) {
        let inline = parse_paragraph(ref_id, para, &mut desc)?;
        desc.paragraphs.push(inline);
    }
    Ok(desc)
}

/// Leading text of an element, before its first child element.
pub fn raw_text(node: Node) -> String {
    node.text().unwrap_or_default().to_string()
}

fn parse_paragraph(
    ref_id: &str,
    para: Node,
    desc: &mut Description,
) -> Result<Paragraph, LoadError> {
    let mut inline = Vec::new();
    for piece in para.children() {
        if piece.is_text() {
            push_text(&mut inline, piece.text().unwrap_or_default());
            continue;
        }
        if !piece.is_element() {
            continue;
        }
        match piece.tag_name().name() {
            "parameterlist" => {
                if is_param_list(piece) {
                    desc.params.extend(parse_parameter_list(ref_id, piece)?);
                }
            }
            "simplesect" => {
                if piece.attribute("kind") == Some("return") && desc.returns.is_none() {
                    desc.returns = Some(ReturnInfo {
                        return_type: None,
                        description: plain_paragraphs(piece),
                    });
                }
            }
            "ref" => inline.push(Inline::Ref(text_content(piece))),
            _ => push_text(&mut inline, &text_content(piece)),
        }
    }
    Ok(inline)
}

/// `<parameterlist>` without a kind is treated as a parameter list.
fn is_param_list(node: Node) -> bool {
    matches!(node.attribute("kind"), None | Some("param"))
}

fn parse_parameter_list(ref_id: &str, list: Node) -> Result<Vec<DocumentedParameter>, LoadError> {
    let mut params = Vec::new();
    for item in children(list, "parameteritem") {
        let names = child(item, "parameternamelist")
            .ok_or_else(|| LoadError::missing(ref_id, "parameternamelist"))?;
        let name = child(names, "parametername")
            .map(text_content)
            .ok_or_else(|| LoadError::missing(ref_id, "parametername"))?;
        let doc_type = child(names, "parametertype")
            .map(text_content)
            .filter(|t| !t.trim().is_empty());
        let description = child(item, "parameterdescription")
            .map(plain_paragraphs)
            .unwrap_or_default();
        params.push(DocumentedParameter {
            name: name.trim().to_string(),
            doc_type: doc_type.map(|t| t.trim().to_string()),
            description,
        });
    }
    Ok(params)
}

/// Every `<para>` below `node`, rendered inline. Nested blocks are dropped.
fn plain_paragraphs(node: Node) -> Vec<Paragraph> {
    node.descendants()
        .filter(|n| n.has_tag_name("para"))
        .map(|para| {
            let mut inline = Vec::new();
            for piece in para.children() {
                if piece.is_text() {
                    push_text(&mut inline, piece.text().unwrap_or_default());
                } else if piece.has_tag_name("ref") {
                    inline.push(Inline::Ref(text_content(piece)));
                } else if piece.is_element()
                    && !piece.has_tag_name("parameterlist")
                    && !piece.has_tag_name("simplesect")
                    && !piece.has_tag_name("para")
                {
                    push_text(&mut inline, &text_content(piece));
                }
            }
            inline
        })
        .collect()
}

/// Parse inline content such as a `<type>` element: text and references.
pub fn parse_inline(node: Node) -> Vec<Inline> {
    let mut inline = Vec::new();
    for piece in node.children() {
        if piece.is_text() {
            push_text(&mut inline, piece.text().unwrap_or_default());
        } else if piece.has_tag_name("ref") {
            inline.push(Inline::Ref(text_content(piece)));
        } else if piece.is_element() {
            push_text(&mut inline, &text_content(piece));
        }
    }
    inline
}

/// Append text, merging with a preceding text piece.
fn push_text(inline: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(last)) = inline.last_mut() {
        last.push_str(text);
    } else {
        inline.push(Inline::Text(text.to_string()));
    }
}
