/*!
 * Android `strings.xml` codec.
 *
 * Reading keeps both the decoded text of every entry and its verbatim inner
 * XML, so passthrough copies reproduce the source exactly. Writing emits
 * output-tree texts without further escaping; they are already escaped.
 */

use log::warn;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::errors::ResourceError;
use crate::resources::model::{
    KeyedItem, OutputItem, OutputNode, OutputTree, ResourceNode, ResourceText, ResourceTree,
};

const ROOT_TAG: &str = "resources";
const ITEM_TAG: &str = "item";

/// Serialization options for output artifacts
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Indentation width in spaces
    pub indent: usize,
    /// Comment written right after the root element
    pub header: Option<String>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            header: None,
        }
    }
}

fn xml_err(error: impl std::fmt::Display) -> ResourceError {
    ResourceError::Xml(error.to_string())
}

fn tag_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn attributes_of(start: &BytesStart<'_>) -> Result<Vec<(String, String)>, ResourceError> {
    let mut out = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(xml_err)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(xml_err)?.into_owned();
        out.push((key, value));
    }
    Ok(out)
}

fn attribute<'a>(attributes: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Decoded text content of an XML fragment: entities resolved, tags dropped, trimmed
pub fn text_content(fragment: &str) -> Result<String, ResourceError> {
    let mut reader = Reader::from_str(fragment);
    let mut out = String::new();
    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Text(text) => out.push_str(&text.unescape().map_err(xml_err)?),
            Event::CData(data) => out.push_str(&String::from_utf8_lossy(&data.into_inner())),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(out.trim().to_string())
}

fn resource_text(raw: &str) -> Result<ResourceText, ResourceError> {
    Ok(ResourceText::with_raw(text_content(raw)?, raw))
}

/// Parse the `<item>` children of a group element
fn parse_items(fragment: &str) -> Result<Vec<(Option<String>, ResourceText)>, ResourceError> {
    let mut reader = Reader::from_str(fragment);
    let mut items = Vec::new();
    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(start) if start.name().as_ref() == ITEM_TAG.as_bytes() => {
                let attributes = attributes_of(&start)?;
                let raw = reader.read_text(start.name()).map_err(xml_err)?;
                let quantity = attribute(&attributes, "quantity").map(str::to_string);
                items.push((quantity, resource_text(&raw)?));
            }
            Event::Empty(start) if start.name().as_ref() == ITEM_TAG.as_bytes() => {
                let attributes = attributes_of(&start)?;
                let quantity = attribute(&attributes, "quantity").map(str::to_string);
                items.push((quantity, ResourceText::default()));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(items)
}

fn build_node(
    tag: String,
    attributes: Vec<(String, String)>,
    inner: &str,
) -> Result<ResourceNode, ResourceError> {
    let name = attribute(&attributes, "name").unwrap_or_default().to_string();
    let translatable = attribute(&attributes, "translatable") != Some("false");

    let node = match tag.as_str() {
        "string" => ResourceNode::Leaf {
            name,
            value: resource_text(inner)?,
            translatable,
        },
        "string-array" => ResourceNode::OrderedGroup {
            items: parse_items(inner)?.into_iter().map(|(_, value)| value).collect(),
            name,
            translatable,
        },
        "plurals" => {
            let mut items = Vec::new();
            for (quantity, value) in parse_items(inner)? {
                match quantity {
                    Some(quantity) => items.push(KeyedItem::new(quantity, value)),
                    None => warn!("Skipping <item> without a 'quantity' in <plurals name=\"{}\">", name),
                }
            }
            ResourceNode::KeyedGroup {
                name,
                items,
                translatable,
            }
        }
        _ => ResourceNode::Unsupported {
            tag,
            name,
            attributes,
            inner_xml: inner.to_string(),
        },
    };
    Ok(node)
}

/// Parse a `strings.xml` document into a resource tree
pub fn parse_resources(xml: &str) -> Result<ResourceTree, ResourceError> {
    let mut reader = Reader::from_str(xml);
    let mut nodes = Vec::new();
    let mut in_root = false;
    let mut seen_root = false;

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(start) if !in_root => {
                let tag = tag_name(&start);
                if tag != ROOT_TAG {
                    return Err(ResourceError::UnexpectedRoot(tag));
                }
                in_root = true;
                seen_root = true;
            }
            Event::Empty(start) if !in_root => {
                let tag = tag_name(&start);
                if tag != ROOT_TAG {
                    return Err(ResourceError::UnexpectedRoot(tag));
                }
                seen_root = true;
            }
            Event::Start(start) => {
                let tag = tag_name(&start);
                let attributes = attributes_of(&start)?;
                let inner = reader.read_text(start.name()).map_err(xml_err)?;
                nodes.push(build_node(tag, attributes, &inner)?);
            }
            Event::Empty(start) => {
                let tag = tag_name(&start);
                let attributes = attributes_of(&start)?;
                nodes.push(build_node(tag, attributes, "")?);
            }
            Event::Comment(comment) if in_root => {
                nodes.push(ResourceNode::Comment(
                    String::from_utf8_lossy(&comment.into_inner()).into_owned(),
                ));
            }
            Event::End(_) if in_root => in_root = false,
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(ResourceError::Xml(format!(
            "document has no <{}> element",
            ROOT_TAG
        )));
    }
    Ok(ResourceTree::new(nodes))
}

struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn emit(&mut self, event: Event<'_>) -> Result<(), ResourceError> {
        self.writer.write_event(event).map_err(xml_err)
    }

    fn start(&mut self, tag: &str, attributes: &[(&str, &str)]) -> Result<(), ResourceError> {
        let mut start = BytesStart::new(tag);
        for attr in attributes {
            start.push_attribute(*attr);
        }
        self.emit(Event::Start(start))
    }

    fn empty(&mut self, tag: &str, attributes: &[(&str, &str)]) -> Result<(), ResourceError> {
        let mut start = BytesStart::new(tag);
        for attr in attributes {
            start.push_attribute(*attr);
        }
        self.emit(Event::Empty(start))
    }

    fn end(&mut self, tag: &str) -> Result<(), ResourceError> {
        self.emit(Event::End(BytesEnd::new(tag)))
    }

    fn comment(&mut self, text: &str) -> Result<(), ResourceError> {
        self.emit(Event::Comment(BytesText::from_escaped(text)))
    }

    // Text is already escaped for the resource format
    fn text(&mut self, escaped: &str) -> Result<(), ResourceError> {
        self.emit(Event::Text(BytesText::from_escaped(escaped)))
    }

    /// Element with inline text and an optional trailing failure comment
    fn text_element(
        &mut self,
        tag: &str,
        attributes: &[(&str, &str)],
        item: &OutputItem,
    ) -> Result<(), ResourceError> {
        self.start(tag, attributes)?;
        self.text(&item.text)?;
        if let Some(annotation) = &item.failure {
            // Written raw so the comment stays on the element's line
            let inline = format!("<!-- {} -->", annotation.replace("--", "- -"));
            self.writer.get_mut().extend_from_slice(inline.as_bytes());
        }
        self.end(tag)
    }

    fn raw_element(
        &mut self,
        tag: &str,
        attributes: &[(&str, &str)],
        raw: &str,
    ) -> Result<(), ResourceError> {
        if raw.is_empty() {
            return self.empty(tag, attributes);
        }
        self.start(tag, attributes)?;
        self.text(raw)?;
        self.end(tag)
    }

    fn passthrough(&mut self, node: &ResourceNode) -> Result<(), ResourceError> {
        let flag = [("translatable", "false")];
        match node {
            ResourceNode::Comment(text) => self.comment(text),
            ResourceNode::Leaf {
                name,
                value,
                translatable,
            } => {
                let mut attrs = vec![("name", name.as_str())];
                if !translatable {
                    attrs.extend_from_slice(&flag);
                }
                self.start("string", &attrs)?;
                self.text(&value.raw)?;
                self.end("string")
            }
            ResourceNode::OrderedGroup {
                name,
                items,
                translatable,
            } => {
                let mut attrs = vec![("name", name.as_str())];
                if !translatable {
                    attrs.extend_from_slice(&flag);
                }
                if items.is_empty() {
                    return self.empty("string-array", &attrs);
                }
                self.start("string-array", &attrs)?;
                for item in items {
                    self.start(ITEM_TAG, &[])?;
                    self.text(&item.raw)?;
                    self.end(ITEM_TAG)?;
                }
                self.end("string-array")
            }
            ResourceNode::KeyedGroup {
                name,
                items,
                translatable,
            } => {
                let mut attrs = vec![("name", name.as_str())];
                if !translatable {
                    attrs.extend_from_slice(&flag);
                }
                if items.is_empty() {
                    return self.empty("plurals", &attrs);
                }
                self.start("plurals", &attrs)?;
                for item in items {
                    self.start(ITEM_TAG, &[("quantity", item.quantity.as_str())])?;
                    self.text(&item.value.raw)?;
                    self.end(ITEM_TAG)?;
                }
                self.end("plurals")
            }
            ResourceNode::Unsupported {
                tag,
                attributes,
                inner_xml,
                ..
            } => {
                let attrs: Vec<(&str, &str)> = attributes
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                self.raw_element(tag, &attrs, inner_xml)
            }
        }
    }

    fn node(&mut self, node: &OutputNode) -> Result<(), ResourceError> {
        match node {
            OutputNode::Comment(text) => self.comment(text),
            OutputNode::Passthrough(source) => self.passthrough(source),
            OutputNode::Leaf { name, item } => {
                self.text_element("string", &[("name", name.as_str())], item)
            }
            OutputNode::OrderedGroup { name, items } => {
                let attrs = [("name", name.as_str())];
                if items.is_empty() {
                    return self.empty("string-array", &attrs);
                }
                self.start("string-array", &attrs)?;
                for item in items {
                    self.text_element(ITEM_TAG, &[], item)?;
                }
                self.end("string-array")
            }
            OutputNode::KeyedGroup { name, items } => {
                let attrs = [("name", name.as_str())];
                if items.is_empty() {
                    return self.empty("plurals", &attrs);
                }
                self.start("plurals", &attrs)?;
                for (quantity, item) in items {
                    self.text_element(ITEM_TAG, &[("quantity", quantity.as_str())], item)?;
                }
                self.end("plurals")
            }
        }
    }
}

/// Serialize an output tree as a `strings.xml` document
pub fn write_resources(tree: &OutputTree, options: &WriteOptions) -> Result<String, ResourceError> {
    let mut out = XmlOut {
        writer: Writer::new_with_indent(Vec::new(), b' ', options.indent),
    };

    out.emit(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    out.start(ROOT_TAG, &[])?;
    if let Some(header) = &options.header {
        out.comment(header)?;
    }
    for node in &tree.nodes {
        out.node(node)?;
    }
    out.end(ROOT_TAG)?;

    let mut bytes = out.writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(xml_err)
}
