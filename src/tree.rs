//! Generic XML tree decoding.
//!
//! Follows the common "XML as a dictionary" convention: attributes become
//! `@name` entries, element text becomes a `#text` entry and repeated child
//! tags collapse into a list under a single key. An element with neither
//! attributes nor children collapses to its text, or to `Null` when empty.
use crate::error::{Result, VastError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Key holding the text content of an element that also has attributes or children
pub const TEXT_KEY: &str = "#text";

/// Prefix marking attribute keys
pub const ATTR_PREFIX: char = '@';

/// A value in the decoded tree
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An element with no attributes, children or text
    Null,
    /// An element that only carries text, or an attribute value
    Text(String),
    /// An element with attributes and/or children
    Node(Node),
    /// A tag that repeated under the same parent
    List(Vec<Value>),
}

impl Value {
    /// Text content of a scalar, or the `#text` entry of a node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text.as_str()),
            Value::Node(node) => node.text(),
            Value::Null | Value::List(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }
}

/// An ordered mapping from child tag / `@attribute` / `#text` keys to values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    entries: Vec<(String, Value)>,
}

impl Node {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Look up an attribute by its bare name (without the `@` prefix).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.strip_prefix(ATTR_PREFIX) == Some(name))
            .and_then(|(_, value)| value.as_text())
    }

    pub fn text(&self) -> Option<&str> {
        match self.get(TEXT_KEY) {
            Some(Value::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Insert a value, collapsing a repeated key into a `List`.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some((_, Value::List(items))) => items.push(value),
            Some((_, existing)) => {
                let first = std::mem::replace(existing, Value::Null);
                *existing = Value::List(vec![first, value]);
            }
            None => self.entries.push((key, value)),
        }
    }
}

/// View a value that may be either a single item or a repeated list as a sequence.
///
/// An absent value yields an empty sequence and a lone value a one-element one.
pub fn normalize_to_sequence(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None => Vec::new(),
        Some(Value::List(items)) => items.iter().collect(),
        Some(single) => vec![single],
    }
}

/// An element that has been opened but not yet closed
struct Frame {
    name: String,
    node: Node,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart) -> Result<Frame> {
        let mut node = Node::default();

        for attr in start.attributes().flatten() {
            let key = format!(
                "{}{}",
                ATTR_PREFIX,
                String::from_utf8_lossy(attr.key.as_ref())
            );
            let value = attr.unescape_value()?.into_owned();
            node.insert(key, Value::Text(value));
        }

        Ok(Frame {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            node,
            text: String::new(),
        })
    }

    fn finish(self) -> (String, Value) {
        let Frame { name, mut node, text } = self;
        let text = text.trim();

        let value = if node.is_empty() {
            if text.is_empty() {
                Value::Null
            } else {
                Value::Text(text.to_string())
            }
        } else {
            if !text.is_empty() {
                node.insert(TEXT_KEY, Value::Text(text.to_string()));
            }
            Value::Node(node)
        };

        (name, value)
    }
}

/// Decode an XML document into a generic tree.
///
/// The returned node holds a single entry keyed by the root element name.
pub fn parse_document(xml: &str) -> Result<Node> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut document = Node::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => stack.push(Frame::open(e)?),
            Ok(Event::Empty(ref e)) => {
                let frame = Frame::open(e)?;
                close_frame(frame, &mut stack, &mut document)?;
            }
            Ok(Event::Text(e)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&e.unescape()?);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::End(_)) => match stack.pop() {
                Some(frame) => close_frame(frame, &mut stack, &mut document)?,
                None => {
                    return Err(VastError::Malformed(
                        "closing tag without a matching opening tag".to_string(),
                    ));
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(VastError::XmlParseError(e)),
            _ => (),
        }
        buf.clear();
    }

    if let Some(frame) = stack.last() {
        return Err(VastError::Malformed(format!(
            "unclosed element <{}> at end of document",
            frame.name
        )));
    }
    if document.is_empty() {
        return Err(VastError::Malformed("no element found".to_string()));
    }

    Ok(document)
}

fn close_frame(frame: Frame, stack: &mut [Frame], document: &mut Node) -> Result<()> {
    let (name, value) = frame.finish();

    match stack.last_mut() {
        Some(parent) => parent.node.insert(name, value),
        None if document.is_empty() => document.insert(name, value),
        None => {
            return Err(VastError::Malformed(format!(
                "junk after document element: <{}>",
                name
            )));
        }
    }

    Ok(())
}
