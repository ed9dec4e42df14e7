//! Generic XML decoding into an attribute/text tree.
//!
//! The tree keeps attributes apart from child elements and CDATA apart from
//! character data. Repeated child elements are not guessed at: a name seen
//! once is `OneOrMany::Single`, a name seen more than once is
//! `OneOrMany::Many`, and consumers have to handle both.

use crate::shared::error::StigError;
use crate::shared::Result;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::collections::BTreeMap;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A value that the source may encode either once or as a repeated element
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    Single(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// First element (the only one for `Single`)
    pub fn first(&self) -> Option<&T> {
        match self {
            OneOrMany::Single(value) => Some(value),
            OneOrMany::Many(values) => values.first(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrMany::Single(value) => std::slice::from_ref(value).iter(),
            OneOrMany::Many(values) => values.iter(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OneOrMany::Single(_) => 1,
            OneOrMany::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Single(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }

    fn push(self, value: T) -> Self {
        match self {
            OneOrMany::Single(existing) => OneOrMany::Many(vec![existing, value]),
            OneOrMany::Many(mut values) => {
                values.push(value);
                OneOrMany::Many(values)
            }
        }
    }
}

/// Decoded element content
///
/// Elements holding nothing but character data collapse to `Text`; anything
/// with attributes, child elements or CDATA stays a `Node`.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlValue {
    Text(String),
    Node(XmlNode),
}

impl XmlValue {
    pub fn as_node(&self) -> Option<&XmlNode> {
        match self {
            XmlValue::Node(node) => Some(node),
            XmlValue::Text(_) => None,
        }
    }

    /// Character data of the element, falling back to its CDATA content
    pub fn text(&self) -> Option<&str> {
        match self {
            XmlValue::Text(text) => Some(text),
            XmlValue::Node(node) => node.text().or_else(|| node.cdata()),
        }
    }
}

/// An element with attributes, character data and named children
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlNode {
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    cdata: Option<String>,
    children: BTreeMap<String, OneOrMany<XmlValue>>,
}

impl XmlNode {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Character data (the `#text` of mixed content), if any
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn cdata(&self) -> Option<&str> {
        self.cdata.as_deref()
    }

    pub fn child(&self, name: &str) -> Option<&OneOrMany<XmlValue>> {
        self.children.get(name)
    }

    /// Text of the first child element called `name`
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name)
            .and_then(OneOrMany::first)
            .and_then(XmlValue::text)
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &OneOrMany<XmlValue>)> {
        self.children.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Moves a child out of the node, leaving the rest intact
    pub fn take_child(&mut self, name: &str) -> Option<OneOrMany<XmlValue>> {
        self.children.remove(name)
    }

    fn append_text(slot: &mut Option<String>, piece: &str) {
        match slot {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(piece);
            }
            None => *slot = Some(piece.to_string()),
        }
    }

    fn add_child(&mut self, name: String, value: XmlValue) {
        let merged = match self.children.remove(&name) {
            Some(existing) => existing.push(value),
            None => OneOrMany::Single(value),
        };
        self.children.insert(name, merged);
    }

    fn into_value(self) -> XmlValue {
        if self.attributes.is_empty() && self.children.is_empty() && self.cdata.is_none() {
            XmlValue::Text(self.text.unwrap_or_default())
        } else {
            XmlValue::Node(self)
        }
    }
}

/// Decodes an XML document or fragment
///
/// Returns a synthetic document node whose children are the top-level
/// elements, so fragments with several sibling roots decode as well.
pub fn decode(bytes: &[u8]) -> Result<XmlNode> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<(String, XmlNode)> = vec![(String::new(), XmlNode::default())];

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            StigError::parse(format!(
                "malformed XML at byte {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(start) => {
                let name = element_name(&start);
                let node = node_with_attributes(&start)?;
                stack.push((name, node));
            }
            Event::Empty(start) => {
                let name = element_name(&start);
                let node = node_with_attributes(&start)?;
                current(&mut stack).add_child(name, node.into_value());
            }
            Event::End(_) => {
                let (name, node) = stack
                    .pop()
                    .filter(|_| !stack.is_empty())
                    .ok_or_else(|| StigError::parse("unexpected closing tag"))?;
                current(&mut stack).add_child(name, node.into_value());
            }
            Event::Text(text) => {
                let decoded = text
                    .unescape()
                    .map(|cow| cow.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&text).into_owned());
                if !decoded.is_empty() {
                    XmlNode::append_text(&mut current(&mut stack).text, &decoded);
                }
            }
            Event::CData(cdata) => {
                let content = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                XmlNode::append_text(&mut current(&mut stack).cdata, &content);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if stack.len() != 1 {
        let (open, _) = stack.pop().unwrap_or_default();
        return Err(StigError::parse(format!(
            "unexpected end of document inside <{}>",
            open
        )));
    }
    Ok(stack.pop().map(|(_, root)| root).unwrap_or_default())
}

/// Top of the element stack; the document node is never popped
fn current(stack: &mut [(String, XmlNode)]) -> &mut XmlNode {
    let last = stack.len() - 1;
    &mut stack[last].1
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn node_with_attributes(start: &BytesStart<'_>) -> Result<XmlNode> {
    let mut node = XmlNode::default();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| {
            StigError::parse(format!(
                "invalid attribute on <{}>: {}",
                element_name(start),
                e
            ))
        })?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map(|cow| cow.into_owned())
            .unwrap_or_else(|_| String::from_utf8_lossy(&attribute.value).into_owned());
        node.attributes.insert(key, value);
    }
    Ok(node)
}
