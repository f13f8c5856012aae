//! Markup to node tree conversion using quick-xml events

use super::node::{Element, Node};
use crate::domain::{RenumberError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parse a metadata document into a node tree
///
/// Returns the root element wrapped in [`Node::Element`]. Whitespace-only text is
/// dropped; comments, processing instructions and the declaration are ignored.
///
/// # Errors
///
/// Returns [`RenumberError::Parse`] for malformed markup, mismatched end tags,
/// unclosed elements, more than one root element, or no root element at all.
///
/// # Examples
///
/// ```
/// use renumber::adapters::xml::parse_document;
///
/// let root = parse_document(r#"<mets:mets><mets:fileSec/></mets:mets>"#).unwrap();
/// let root = root.as_element().unwrap();
/// assert!(root.is("mets"));
/// assert_eq!(root.children_named("fileSec").count(), 1);
/// ```
pub fn parse_document(text: &str) -> Result<Node> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            RenumberError::Parse(format!(
                "malformed markup at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(start) => stack.push(element_from_start(&start)?),
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    RenumberError::Parse("end tag without matching start tag".to_string())
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|e| RenumberError::Parse(format!("invalid text content: {e}")))?;
                push_text(&mut stack, &value);
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                push_text(&mut stack, &value);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(RenumberError::Parse(format!(
            "unexpected end of document, <{}> is not closed",
            open.tag
        )));
    }

    root.map(Node::Element)
        .ok_or_else(|| RenumberError::Parse("document has no root element".to_string()))
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let tag = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| RenumberError::Parse(format!("tag name is not UTF-8: {e}")))?
        .to_string();

    let mut element = Element::new(tag);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| {
            RenumberError::Parse(format!("invalid attribute on <{}>: {e}", element.tag))
        })?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| RenumberError::Parse(format!("attribute name is not UTF-8: {e}")))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| {
                RenumberError::Parse(format!(
                    "invalid value for attribute {key} on <{}>: {e}",
                    element.tag
                ))
            })?
            .into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
        return Ok(());
    }

    if root.is_some() {
        return Err(RenumberError::Parse(format!(
            "more than one root element (second is <{}>)",
            element.tag
        )));
    }

    *root = Some(element);
    Ok(())
}

fn push_text(stack: &mut [Element], value: &str) {
    if value.trim().is_empty() {
        return;
    }
    // Text outside the root element carries no structure
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Scalar(value.to_string()));
    }
}
