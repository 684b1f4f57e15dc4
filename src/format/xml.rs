//! Minimal XML element tree
//!
//! Enough of a DOM for descriptor merging: elements with ordered attributes and
//! mixed children. Parsing and writing go through `quick-xml`. DTDs and
//! processing instructions are dropped on read.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum XmlError {
    #[error("malformed XML: {0}")]
    Malformed(String),

    #[error("document has no root element")]
    MissingRoot,

    #[error("document has more than one root element")]
    MultipleRoots,

    #[error("element <{0}> is never closed")]
    Unclosed(String),

    #[error("text outside the root element")]
    StrayText,

    #[error("failed to serialize XML: {0}")]
    Write(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.elements_mut().find(|e| e.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |e| e.name == name)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Concatenated text and CDATA content, `None` when there is none
    pub fn text(&self) -> Option<String> {
        let mut text: Option<String> = None;
        for node in &self.children {
            if let Node::Text(t) | Node::CData(t) = node {
                text.get_or_insert_with(String::new).push_str(t);
            }
        }
        text
    }

    /// Replace all text content with `text`
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children
            .retain(|n| !matches!(n, Node::Text(_) | Node::CData(_)));
        self.children.push(Node::Text(text.into()));
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn push_element(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    /// Append a child element holding only text
    #[must_use]
    pub fn with_text_child(mut self, name: &str, text: &str) -> Self {
        let mut child = Element::new(name);
        child.set_text(text);
        self.push_element(child);
        self
    }
}

/// Parse a document and return its root element
pub fn parse(bytes: &[u8]) -> Result<Element, XmlError> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| XmlError::Malformed(e.to_string()))?;

        match event {
            Event::Start(start) => stack.push(element_from(&start)?),
            Event::Empty(start) => {
                let element = element_from(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element)?;
                }
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|e| XmlError::Malformed(e.to_string()))?
                    .into_owned();
                push_node(&mut stack, Node::Text(value))?;
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(&data).into_owned();
                push_node(&mut stack, Node::CData(value))?;
            }
            Event::Comment(comment) => {
                if let Some(parent) = stack.last_mut() {
                    let value = String::from_utf8_lossy(&comment).into_owned();
                    parent.children.push(Node::Comment(value));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::Unclosed(open.name));
    }
    root.ok_or(XmlError::MissingRoot)
}

/// Serialize a root element as an indented UTF-8 document
pub fn write(root: &Element) -> Result<Vec<u8>, XmlError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| XmlError::Write(e.to_string()))?;
    write_element(&mut writer, root)?;

    let mut out = writer.into_inner();
    out.push(b'\n');
    Ok(out)
}

fn element_from(start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::Malformed(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::Malformed(e.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.push_element(element),
        None if root.is_some() => return Err(XmlError::MultipleRoots),
        None => *root = Some(element),
    }
    Ok(())
}

fn push_node(stack: &mut [Element], node: Node) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(node);
            Ok(())
        }
        None => Err(XmlError::StrayText),
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), XmlError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    let result = if element.children.is_empty() {
        writer.write_event(Event::Empty(start))
    } else {
        writer.write_event(Event::Start(start))
    };
    result.map_err(|e| XmlError::Write(e.to_string()))?;

    if element.children.is_empty() {
        return Ok(());
    }

    for child in &element.children {
        let result = match child {
            Node::Element(e) => {
                write_element(writer, e)?;
                Ok(())
            }
            Node::Text(t) => writer.write_event(Event::Text(BytesText::new(t))),
            Node::CData(t) => writer.write_event(Event::CData(BytesCData::new(t.as_str()))),
            Node::Comment(t) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(t.as_str())))
            }
        };
        result.map_err(|e| XmlError::Write(e.to_string()))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(|e| XmlError::Write(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_elements_attributes_and_text() {
        let root = parse(
            br#"<?xml version="1.0"?>
<plugin name="demo">
  <mojos>
    <mojo><goal>run</goal></mojo>
    <mojo><goal>stop</goal></mojo>
  </mojos>
  <!-- note -->
</plugin>"#,
        )
        .unwrap();

        assert_eq!(root.name, "plugin");
        assert_eq!(root.attribute("name"), Some("demo"));
        let mojos = root.child("mojos").unwrap();
        let goals: Vec<String> = mojos
            .children_named("mojo")
            .filter_map(|m| m.child("goal").and_then(Element::text))
            .collect();
        assert_eq!(goals, vec!["run", "stop"]);
        assert!(root.children.iter().any(|n| matches!(n, Node::Comment(_))));
    }

    #[test]
    fn test_text_unescaped_and_cdata() {
        let root = parse(b"<a><b>x &amp; y</b><c><![CDATA[<raw>]]></c><d/></a>").unwrap();
        assert_eq!(root.child("b").unwrap().text().as_deref(), Some("x & y"));
        assert_eq!(root.child("c").unwrap().text().as_deref(), Some("<raw>"));
        assert_eq!(root.child("d").unwrap().text(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse(b""), Err(XmlError::MissingRoot));
        assert_eq!(parse(b"<a/><b/>"), Err(XmlError::MultipleRoots));
        assert!(parse(b"<a><b></b>").is_err());
        assert!(matches!(parse(b"<a></b>"), Err(XmlError::Malformed(_))));
    }

    #[test]
    fn test_set_text_and_attribute() {
        let mut e = Element::new("impl");
        e.set_text("a.B");
        e.set_text("r.B");
        assert_eq!(e.text().as_deref(), Some("r.B"));

        e.set_attribute("x", "1");
        e.set_attribute("x", "2");
        assert_eq!(e.attributes, vec![("x".to_string(), "2".to_string())]);
    }

    #[test]
    fn test_write_is_reparseable() {
        let mut root = Element::new("component-set");
        let mut components = Element::new("components");
        components.push_element(Element::new("component").with_text_child("role", "a & b"));
        root.push_element(components);

        let bytes = write(&root).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(text.contains("<role>a &amp; b</role>"));
        assert!(text.ends_with('\n'));

        assert_eq!(parse(&bytes).unwrap(), root);
    }
}
