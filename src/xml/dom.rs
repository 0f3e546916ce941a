//! Raw-preserving XML tree for part round-trips.
//!
//! Parsed parts keep the escaped text and original start tags exactly
//! as they appeared, so a serialized part differs from its source only
//! where an element was actually edited. Attribute values are held
//! unescaped for lookup; a start tag is regenerated from them the
//! first time one of its attributes changes.

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Write;
use std::str;

use crate::error::{Error, Result};

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// A node in a parsed XML part.
///
/// Text, CDATA, comment and instruction nodes hold their content in
/// raw form (still escaped) so writing them back reproduces the
/// source bytes.
#[derive(Clone, Debug)]
pub enum XmlNode {
    /// Element node
    Element(XmlElement),
    /// Character data, escaped as in the source
    Text(String),
    /// CDATA section content
    CData(String),
    /// Comment content
    Comment(String),
    /// Processing instruction content, including the target
    ProcessingInstruction(String),
    /// XML declaration content (`xml version=...`)
    Decl(String),
    /// Document type declaration content
    DocType(String),
}

/// An element with its attributes and children.
#[derive(Clone, Debug)]
pub struct XmlElement {
    /// Full element name with prefix, e.g. "w:comment"
    name: String,
    /// Attributes as (name, unescaped value) pairs, in document order
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
    self_closing: bool,
    /// Source start-tag content; cleared when an attribute changes
    raw_tag: Option<String>,
}

impl XmlElement {
    /// Create a new element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: false,
            raw_tag: None,
        }
    }

    /// Create a new self-closing element, e.g. `<w:trackRevisions/>`.
    pub fn new_empty(name: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.self_closing = true;
        element
    }

    /// Full element name, including any prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element name with any namespace prefix removed.
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(self.name.as_str())
    }

    /// Attributes as (name, unescaped value) pairs.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Get an attribute value by exact name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing value or appending.
    ///
    /// The original start tag is discarded; it is rewritten from the
    /// attribute list on serialization.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.raw_tag = None;
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    /// Child nodes in document order.
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Append a child node.
    pub fn push_child(&mut self, node: XmlNode) {
        self.children.push(node);
    }

    /// Iterate over child elements, skipping text and other nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Iterate mutably over child elements.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Find the first descendant with the given local name, searching
    /// depth-first in document order.
    pub fn find_descendant(&self, local: &str) -> Option<&XmlElement> {
        for element in self.child_elements() {
            if element.local_name() == local {
                return Some(element);
            }
            if let Some(found) = element.find_descendant(local) {
                return Some(found);
            }
        }
        None
    }

    /// Visit every descendant element depth-first in document order.
    pub fn for_each_descendant<F: FnMut(&XmlElement)>(&self, visit: &mut F) {
        for child in &self.children {
            if let XmlNode::Element(element) = child {
                visit(element);
                element.for_each_descendant(visit);
            }
        }
    }

    /// Visit every descendant element mutably, depth-first in
    /// document order.
    pub fn for_each_descendant_mut<F: FnMut(&mut XmlElement)>(&mut self, visit: &mut F) {
        for child in &mut self.children {
            if let XmlNode::Element(element) = child {
                visit(element);
                element.for_each_descendant_mut(visit);
            }
        }
    }

    /// Write element to XML writer.
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let start = match &self.raw_tag {
            Some(raw) => BytesStart::from_content(raw.as_str(), self.name.len()),
            None => {
                let mut tag = BytesStart::new(self.name.as_str());
                for (key, value) in &self.attributes {
                    tag.push_attribute((key.as_str(), value.as_str()));
                }
                tag
            }
        };

        if self.self_closing && self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
        } else {
            writer.write_event(Event::Start(start))?;
            for child in &self.children {
                child.write_to(writer)?;
            }
            writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        }

        Ok(())
    }
}

impl XmlNode {
    /// Write node to XML writer.
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        match self {
            XmlNode::Element(element) => return element.write_to(writer),
            XmlNode::Text(raw) => {
                writer.write_event(Event::Text(BytesText::from_escaped(raw.as_str())))?
            }
            XmlNode::CData(raw) => writer.write_event(Event::CData(BytesCData::new(raw.as_str())))?,
            XmlNode::Comment(raw) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(raw.as_str())))?
            }
            XmlNode::ProcessingInstruction(raw) => {
                writer.write_event(Event::PI(BytesPI::new(raw.as_str())))?
            }
            XmlNode::Decl(raw) => writer.write_event(Event::Decl(BytesDecl::from_start(
                BytesStart::from_content(raw.as_str(), 3),
            )))?,
            XmlNode::DocType(raw) => {
                writer.write_event(Event::DocType(BytesText::from_escaped(raw.as_str())))?
            }
        }
        Ok(())
    }
}

/// A parsed XML part: everything around the root element plus the
/// root itself.
#[derive(Clone, Debug)]
pub struct XmlDocument {
    had_bom: bool,
    /// Declaration, comments and whitespace before the root
    prolog: Vec<XmlNode>,
    root: Option<XmlElement>,
    /// Trailing nodes after the root
    epilog: Vec<XmlNode>,
}

impl XmlDocument {
    /// Parse a part from its raw bytes. The content must be UTF-8;
    /// a leading byte order mark is accepted and restored on output.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let had_bom = data.starts_with(BOM);
        let text = if had_bom {
            str::from_utf8(&data[BOM.len()..])?
        } else {
            str::from_utf8(data)?
        };

        let mut reader = Reader::from_str(text);

        let mut prolog = Vec::new();
        let mut root: Option<XmlElement> = None;
        let mut epilog = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(tag) => {
                    let element = read_element(&mut reader, &tag)?;
                    match root {
                        None => root = Some(element),
                        Some(_) => epilog.push(XmlNode::Element(element)),
                    }
                }
                Event::Empty(tag) => {
                    let element = element_from_tag(&tag, true)?;
                    match root {
                        None => root = Some(element),
                        Some(_) => epilog.push(XmlNode::Element(element)),
                    }
                }
                Event::Text(content) => {
                    let node = XmlNode::Text(raw_string(&content)?);
                    push_misc(&mut prolog, &mut epilog, root.is_some(), node);
                }
                Event::CData(content) => {
                    let node = XmlNode::CData(raw_string(&content)?);
                    push_misc(&mut prolog, &mut epilog, root.is_some(), node);
                }
                Event::Comment(content) => {
                    let node = XmlNode::Comment(raw_string(&content)?);
                    push_misc(&mut prolog, &mut epilog, root.is_some(), node);
                }
                Event::PI(content) => {
                    let node = XmlNode::ProcessingInstruction(raw_string(&content)?);
                    push_misc(&mut prolog, &mut epilog, root.is_some(), node);
                }
                Event::Decl(content) => {
                    let node = XmlNode::Decl(raw_string(&content)?);
                    push_misc(&mut prolog, &mut epilog, root.is_some(), node);
                }
                Event::DocType(content) => {
                    let node = XmlNode::DocType(raw_string(&content)?);
                    push_misc(&mut prolog, &mut epilog, root.is_some(), node);
                }
                Event::End(_) => {
                    return Err(Error::InvalidXml("closing tag outside root element".into()))
                }
                Event::Eof => break,
            }
        }

        Ok(Self {
            had_bom,
            prolog,
            root,
            epilog,
        })
    }

    /// The root element, if the part has one.
    pub fn root(&self) -> Option<&XmlElement> {
        self.root.as_ref()
    }

    /// The root element, mutable.
    pub fn root_mut(&mut self) -> Option<&mut XmlElement> {
        self.root.as_mut()
    }

    /// Serialize the part back to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        if self.had_bom {
            out.extend_from_slice(BOM);
        }

        let mut writer = Writer::new(&mut out);
        for node in &self.prolog {
            node.write_to(&mut writer)?;
        }
        if let Some(root) = &self.root {
            root.write_to(&mut writer)?;
        }
        for node in &self.epilog {
            node.write_to(&mut writer)?;
        }

        Ok(out)
    }
}

fn push_misc(prolog: &mut Vec<XmlNode>, epilog: &mut Vec<XmlNode>, after_root: bool, node: XmlNode) {
    if after_root {
        epilog.push(node);
    } else {
        prolog.push(node);
    }
}

fn raw_string(content: &[u8]) -> Result<String> {
    Ok(str::from_utf8(content)?.to_string())
}

/// Build an element from a start tag, keeping the tag's source form.
fn element_from_tag(tag: &BytesStart, self_closing: bool) -> Result<XmlElement> {
    let name = str::from_utf8(tag.name().as_ref())?.to_string();
    let raw_tag = raw_string(tag)?;

    let mut attributes = Vec::new();
    for attribute in tag.attributes() {
        let attribute = attribute?;
        let key = str::from_utf8(attribute.key.as_ref())?.to_string();
        let value = attribute.unescape_value()?.into_owned();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
        self_closing,
        raw_tag: Some(raw_tag),
    })
}

/// Read an element's children after its start tag was consumed. The
/// reader checks end-tag nesting, so an End event here closes this
/// element.
fn read_element<'a>(reader: &mut Reader<&'a [u8]>, start: &BytesStart<'a>) -> Result<XmlElement> {
    let mut element = element_from_tag(start, false)?;

    loop {
        match reader.read_event()? {
            Event::Start(tag) => {
                let child = read_element(reader, &tag)?;
                element.children.push(XmlNode::Element(child));
            }
            Event::Empty(tag) => {
                let child = element_from_tag(&tag, true)?;
                element.children.push(XmlNode::Element(child));
            }
            Event::Text(content) => element.children.push(XmlNode::Text(raw_string(&content)?)),
            Event::CData(content) => element.children.push(XmlNode::CData(raw_string(&content)?)),
            Event::Comment(content) => {
                element.children.push(XmlNode::Comment(raw_string(&content)?))
            }
            Event::PI(content) => element
                .children
                .push(XmlNode::ProcessingInstruction(raw_string(&content)?)),
            Event::Decl(_) | Event::DocType(_) => {
                return Err(Error::InvalidXml("declaration inside an element".into()))
            }
            Event::End(_) => break,
            Event::Eof => return Err(Error::InvalidXml("unexpected end of file".into())),
        }
    }

    Ok(element)
}
