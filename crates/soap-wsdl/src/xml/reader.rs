//! Parsing serialized documents back into the arena.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{Document, NodeId};
use crate::diagnostic::SoapError;

pub(super) fn parse(xml: &str) -> Result<Document, SoapError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut doc = Document::new();
    let mut stack: Vec<NodeId> = Vec::new();

    loop {
        match reader.read_event().map_err(|e| SoapError::xml(e.to_string()))? {
            Event::Start(ref e) => {
                let id = open_element(&mut doc, e)?;
                attach(&mut doc, &stack, id);
                stack.push(id);
            }
            Event::Empty(ref e) => {
                let id = open_element(&mut doc, e)?;
                attach(&mut doc, &stack, id);
            }
            Event::Text(ref e) => {
                let text = e.unescape().map_err(|e| SoapError::xml(e.to_string()))?;
                if let Some(&parent) = stack.last() {
                    let node = doc.create_text(text.into_owned());
                    doc.append_child(parent, node);
                }
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(SoapError::xml("unexpected end of document"));
    }
    if doc.root().is_none() {
        return Err(SoapError::xml("document has no root element"));
    }

    Ok(doc)
}

fn open_element(doc: &mut Document, start: &BytesStart<'_>) -> Result<NodeId, SoapError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
    let id = doc.create_element(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| SoapError::xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| SoapError::xml(e.to_string()))?;
        doc.set_attribute(id, &key, value.into_owned());
    }
    Ok(id)
}

fn attach(doc: &mut Document, stack: &[NodeId], id: NodeId) {
    match stack.last() {
        Some(&parent) => doc.append_child(parent, id),
        None => doc.set_root(id),
    }
}
