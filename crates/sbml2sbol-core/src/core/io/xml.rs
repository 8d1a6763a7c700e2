//! A small, namespace-agnostic XML element tree for reading SBML.
//!
//! Elements are navigated by *local* names: vendor annotation blocks use arbitrary prefixes and
//! name their child elements after enzyme ids, so no fixed struct shape describes them. Prefixes
//! are recorded but never required for lookups.

use quick_xml::Reader;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed XML at byte {position}: {source}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
    #[error("Malformed attribute: {0}")]
    Attribute(#[from] AttrError),
    #[error("Closing tag '{0}' has no matching opening tag")]
    UnexpectedEnd(String),
    #[error("Element '{0}' is never closed")]
    Unclosed(String),
    #[error("Document has no root element")]
    MissingRoot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    pub prefix: Option<String>,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Namespace prefix as written in the source, if any.
    pub prefix: Option<String>,
    /// Local name (prefix stripped).
    pub name: String,
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlElement>,
    /// Concatenated, unescaped character data directly inside this element.
    pub text: String,
}

impl XmlElement {
    /// Parses a complete document and returns its root element.
    ///
    /// Whitespace-only text is dropped; comments, processing instructions and the XML
    /// declaration are ignored.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, XmlError> {
        let mut reader = Reader::from_reader(reader);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|source| XmlError::Syntax {
                    position: reader.buffer_position() as u64,
                    source,
                })?;
            match event {
                Event::Start(start) => stack.push(Self::from_start(&start)?),
                Event::Empty(start) => {
                    let element = Self::from_start(&start)?;
                    attach(&mut stack, &mut root, element);
                }
                Event::End(end) => {
                    let element = stack.pop().ok_or_else(|| {
                        XmlError::UnexpectedEnd(
                            String::from_utf8_lossy(end.local_name().as_ref()).into_owned(),
                        )
                    })?;
                    attach(&mut stack, &mut root, element);
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        let unescaped = text.unescape().map_err(|source| XmlError::Syntax {
                            position: reader.buffer_position() as u64,
                            source,
                        })?;
                        current.text.push_str(&unescaped);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(XmlError::Unclosed(open.name.clone()));
        }
        root.ok_or(XmlError::MissingRoot)
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let qname = start.name();
        let mut element = XmlElement {
            prefix: qname
                .prefix()
                .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned()),
            name: String::from_utf8_lossy(qname.local_name().as_ref()).into_owned(),
            ..Default::default()
        };
        for attribute in start.attributes() {
            let attribute = attribute?;
            let value = attribute
                .unescape_value()
                .map_err(|source| XmlError::Syntax {
                    position: 0,
                    source,
                })?
                .into_owned();
            element.attributes.push(XmlAttribute {
                prefix: attribute
                    .key
                    .prefix()
                    .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned()),
                name: String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned(),
                value,
            });
        }
        Ok(element)
    }

    /// Looks up an attribute by local name, ignoring namespace declarations.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .filter(|a| a.prefix.as_deref() != Some("xmlns"))
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follows a chain of first-matching children.
    pub fn path(&self, names: &[&str]) -> Option<&XmlElement> {
        names
            .iter()
            .try_fold(self, |element, name| element.child(name))
    }

    /// Text content of the first child with the given local name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}
