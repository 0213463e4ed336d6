//! Compact serialization through quick-xml.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{Document, NodeId, NodeKind};
use crate::diagnostic::SoapError;

pub(super) fn write(doc: &Document) -> Result<String, SoapError> {
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| SoapError::xml(e.to_string()))?;
    writer.get_mut().push(b'\n');

    if let Some(root) = doc.root {
        write_node(doc, root, &mut writer)?;
        writer.get_mut().push(b'\n');
    }

    String::from_utf8(writer.into_inner()).map_err(|e| SoapError::xml(e.to_string()))
}

fn write_node(doc: &Document, id: NodeId, writer: &mut Writer<Vec<u8>>) -> Result<(), SoapError> {
    match &doc.nodes[id.0].kind {
        NodeKind::Text(text) => writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(|e| SoapError::xml(e.to_string())),
        NodeKind::Element { name, attributes, children } => {
            let mut start = BytesStart::new(name.as_str());
            for (key, value) in attributes {
                start.push_attribute((key.as_str(), value.as_str()));
            }

            if children.is_empty() {
                return writer
                    .write_event(Event::Empty(start))
                    .map_err(|e| SoapError::xml(e.to_string()));
            }

            writer
                .write_event(Event::Start(start))
                .map_err(|e| SoapError::xml(e.to_string()))?;
            for child in children {
                write_node(doc, *child, writer)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(name.as_str())))
                .map_err(|e| SoapError::xml(e.to_string()))
        }
    }
}
