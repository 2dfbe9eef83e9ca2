//! Generic XML document tree for SOAP payloads
//!
//! Converts an XML document into a `serde_json::Value` keyed by local
//! element names (namespace prefixes stripped):
//!
//! - an element with child elements becomes an object
//! - an element with only text becomes a string (empty for `<a/>`)
//! - a child name that repeats becomes an array, a single child stays a
//!   plain value
//!
//! The last rule is the classic document-RPC cardinality quirk: the same
//! wrapper holds an object for one item and an array for several. Use
//! [`one_or_many`] to read collections.
//!
//! Attributes and mixed-content text are ignored.

use omni_core::ConnectorError;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value};

struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn new(name: String) -> Self {
        Self {
            name,
            children: Map::new(),
            text: String::new(),
        }
    }

    fn finish(self) -> (String, Value) {
        let value = if self.children.is_empty() {
            Value::String(self.text)
        } else {
            Value::Object(self.children)
        };
        (self.name, value)
    }
}

fn insert_child(parent: &mut Map<String, Value>, name: String, value: Value) {
    match parent.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            parent.insert(name, value);
        }
    }
}

fn local_name(raw: &[u8]) -> Result<String, ConnectorError> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| ConnectorError::Decode(format!("Element name is not UTF-8: {}", e)))
}

/// Parse `xml` into a document tree rooted at an object holding the
/// document element
pub(crate) fn parse_document(xml: &str) -> Result<Value, ConnectorError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack = vec![Frame::new(String::new())];

    loop {
        let event = reader.read_event().map_err(|e| {
            ConnectorError::Decode(format!(
                "Malformed XML at position {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(e) => {
                stack.push(Frame::new(local_name(e.local_name().as_ref())?));
            }
            Event::Empty(e) => {
                let name = local_name(e.local_name().as_ref())?;
                if let Some(parent) = stack.last_mut() {
                    insert_child(&mut parent.children, name, Value::String(String::new()));
                }
            }
            Event::Text(t) => {
                let text = t
                    .unescape()
                    .map_err(|e| ConnectorError::Decode(format!("Bad XML text: {}", e)))?;
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text);
                }
            }
            Event::CData(c) => {
                let raw = c.into_inner();
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&raw));
                }
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err(ConnectorError::Decode("Unbalanced closing tag".to_string()));
                }
                let (name, value) = stack.pop().map(Frame::finish).ok_or_else(|| {
                    ConnectorError::Decode("Unbalanced closing tag".to_string())
                })?;
                if let Some(parent) = stack.last_mut() {
                    insert_child(&mut parent.children, name, value);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() != 1 {
        return Err(ConnectorError::Decode(
            "Unexpected end of document".to_string(),
        ));
    }
    let root = stack.remove(0);
    if root.children.is_empty() {
        return Err(ConnectorError::Decode("Document has no root element".to_string()));
    }

    Ok(Value::Object(root.children))
}

/// Follow a path of element names from `node`
pub(crate) fn path<'a>(node: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names.iter().try_fold(node, |current, name| current.get(*name))
}

/// Read a collection that may be absent, empty, a single node or a list
pub(crate) fn one_or_many(node: Option<&Value>) -> Vec<&Value> {
    match node {
        None => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::String(s)) if s.trim().is_empty() => Vec::new(),
        Some(other) => vec![other],
    }
}

/// Non-empty text content of a child element
pub(crate) fn text<'a>(node: &'a Value, name: &str) -> Option<&'a str> {
    node.get(name)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
