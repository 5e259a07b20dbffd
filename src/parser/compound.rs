//! `<refid>.xml` → [`CompoundNode`].

use super::description;
use super::{child, children, parse_xml, text_content, LoadError};
use crate::model::*;
use roxmltree::Node;

/// Parse the single `<compounddef>` of a compound file.
pub fn parse(ref_id: &str, text: &str) -> Result<CompoundNode, LoadError> {
    let doc = parse_xml(ref_id, text)?;
    let def = child(doc.root_element(), "compounddef")
        .ok_or_else(|| LoadError::missing(ref_id, "compounddef"))?;

    let kind = def
        .attribute("kind")
        .map(CompoundKind::from_attr)
        .ok_or_else(|| LoadError::missing(ref_id, "compounddef@kind"))?;
    let name = child(def, "compoundname")
        .map(text_content)
        .ok_or_else(|| LoadError::missing(ref_id, "compoundname"))?;

    let (raw_description, description) = match child(def, "detaileddescription") {
        Some(node) => (
            description::raw_text(node),
            description::parse(ref_id, node)?,
        ),
        None => Default::default(),
    };

    let inner_classes = references(ref_id, def, "innerclass")?;
    let inner_namespaces = references(ref_id, def, "innernamespace")?;

    let mut sections = Vec::new();
    for section in children(def, "sectiondef") {
        sections.push(parse_section(ref_id, section)?);
    }

    Ok(CompoundNode {
        ref_id: ref_id.to_string(),
        kind,
        name: name.trim().to_string(),
        raw_description,
        description,
        inner_classes,
        inner_namespaces,
        sections,
    })
}

fn references(ref_id: &str, def: Node, tag: &'static str) -> Result<Vec<Reference>, LoadError> {
    children(def, tag)
        .map(|node| -> Result<Reference, LoadError> {
            let target = node
                .attribute("refid")
                .ok_or_else(|| LoadError::missing(ref_id, "refid"))?;
            Ok(Reference {
                ref_id: target.to_string(),
                name: text_content(node).trim().to_string(),
            })
        })
        .collect()
}

fn parse_section(ref_id: &str, section: Node) -> Result<Section, LoadError> {
    let kind = section
        .attribute("kind")
        .map(SectionKind::from_attr)
        .ok_or_else(|| LoadError::missing(ref_id, "sectiondef@kind"))?;
    let mut members = Vec::new();
    for member in children(section, "memberdef") {
        members.push(parse_member(ref_id, member)?);
    }
    Ok(Section { kind, members })
}

fn parse_member(ref_id: &str, member: Node) -> Result<MemberNode, LoadError> {
    let name = child(member, "name")
        .map(text_content)
        .ok_or_else(|| LoadError::missing(ref_id, "name"))?;
    let definition = child(member, "definition")
        .map(text_content)
        .ok_or_else(|| LoadError::missing(ref_id, "definition"))?;
    let args_string = child(member, "argsstring")
        .map(text_content)
        .filter(|s| !s.is_empty());
    let declared_type = child(member, "type")
        .map(text_content)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let mut params = Vec::new();
    for param in children(member, "param") {
        params.push(parse_param(ref_id, param)?);
    }

    let mut description = match child(member, "detaileddescription") {
        Some(node) => description::parse(ref_id, node)?,
        None => Description::default(),
    };
    if let Some(returns) = description.returns.as_mut() {
        returns.return_type = declared_type;
    }

    Ok(MemberNode {
        name: name.trim().to_string(),
        definition: definition.trim().to_string(),
        args_string,
        params,
        description,
    })
}

fn parse_param(ref_id: &str, param: Node) -> Result<FormalParameter, LoadError> {
    let name = child(param, "declname")
        .map(text_content)
        .ok_or_else(|| LoadError::missing(ref_id, "declname"))?;
    let declared_type = child(param, "type")
        .map(description::parse_inline)
        .filter(|inline| !inline.is_empty());
    let default_value = child(param, "defval").map(text_content);
    Ok(FormalParameter {
        name: name.trim().to_string(),
        declared_type,
        default_value,
    })
}
