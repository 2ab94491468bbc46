//! XML schema document loading.
//!
//! Section documents look like:
//!
//! ```xml
//! <section name="statedef" type="int" comment="true">
//!   <property name="type" type="enum" optional="true">
//!     <value val="S"/>
//!     <value val="C"/>
//!   </property>
//!   <property name="velset" type="float tuple" optional="true"/>
//! </section>
//! ```
//!
//! and the controller document wraps `<controller name="...">` elements,
//! each holding `<property>` children, in a `<controllers>` root.

use std::path::Path;

use mugen_model::{CaseInsensitiveMap, PropType, SchemaSection, ValidController, ValidProperty};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use tracing::warn;

use crate::error::{Result, StandardsError};
use crate::signature::parse_signature;

const SECTION: &str = "section";
const CONTROLLERS: &str = "controllers";
const CONTROLLER: &str = "controller";
const PROPERTY: &str = "property";
const VALUE: &str = "value";

/// Flattened element stream; self-closing elements yield an open and a close.
#[derive(Debug)]
enum Node {
    Open { tag: String, attrs: Attrs },
    Close { tag: String },
}

#[derive(Debug, Default)]
struct Attrs(Vec<(String, String)>);

impl Attrs {
    fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn require(&self, name: &'static str, element: &'static str, path: &Path) -> Result<&str> {
        self.get(name).ok_or_else(|| StandardsError::MissingAttribute {
            path: path.to_path_buf(),
            element,
            attribute: name,
        })
    }

    fn require_bool(&self, name: &'static str, element: &'static str, path: &Path) -> Result<bool> {
        let raw = self.require(name, element, path)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(StandardsError::InvalidValue {
                path: path.to_path_buf(),
                what: name,
                value: raw.to_string(),
            }),
        }
    }
}

fn xml_error(path: &Path, source: quick_xml::Error) -> StandardsError {
    StandardsError::Xml {
        path: path.to_path_buf(),
        source,
    }
}

fn open_node(e: &BytesStart<'_>, path: &Path) -> Result<Node> {
    let tag = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let mut attrs = Attrs::default();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| xml_error(path, err.into()))?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let raw = std::str::from_utf8(&attr.value).map_err(|_| StandardsError::InvalidValue {
            path: path.to_path_buf(),
            what: "attribute encoding",
            value: String::from_utf8_lossy(&attr.value).into_owned(),
        })?;
        let value = unescape(raw).map_err(|err| xml_error(path, err.into()))?;
        attrs.0.push((key, value.into_owned()));
    }
    Ok(Node::Open { tag, attrs })
}

fn read_nodes(xml: &str, path: &Path) -> Result<Vec<Node>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut nodes = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => nodes.push(open_node(e, path)?),
            Ok(Event::Empty(ref e)) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                nodes.push(open_node(e, path)?);
                nodes.push(Node::Close { tag });
            }
            Ok(Event::End(ref e)) => nodes.push(Node::Close {
                tag: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
            }),
            Ok(Event::Eof) => break,
            Err(source) => return Err(xml_error(path, source)),
            _ => {}
        }
        buf.clear();
    }
    Ok(nodes)
}

fn property_from(attrs: &Attrs, path: &Path) -> Result<ValidProperty> {
    let name = attrs.require("name", PROPERTY, path)?;
    let types = parse_signature(attrs.require("type", PROPERTY, path)?);
    let optional = attrs.require_bool("optional", PROPERTY, path)?;
    Ok(ValidProperty::new(name, types, optional))
}

/// Collects `<property>` children until `</parent>`.
fn collect_properties(
    nodes: &mut impl Iterator<Item = Node>,
    parent: &str,
    path: &Path,
) -> Result<Vec<ValidProperty>> {
    let mut properties = Vec::new();
    let mut current: Option<ValidProperty> = None;
    for node in nodes {
        match node {
            Node::Open { tag, attrs } if tag == PROPERTY => {
                current = Some(property_from(&attrs, path)?);
            }
            Node::Open { tag, attrs } if tag == VALUE => {
                if let Some(prop) = current.as_mut() {
                    let val = attrs.require("val", VALUE, path)?;
                    prop.enum_options.push(val.to_string());
                }
            }
            Node::Close { tag } if tag == PROPERTY => {
                if let Some(mut prop) = current.take() {
                    // Options are only kept for enum-typed slots.
                    if !prop.has_enum_slot() {
                        prop.enum_options.clear();
                    }
                    properties.push(prop);
                }
            }
            Node::Close { tag } if tag == parent => break,
            _ => {}
        }
    }
    Ok(properties)
}

/// Parses a `<section>` document whose `name` must equal `expected`.
pub(crate) fn parse_section(xml: &str, path: &Path, expected: &str) -> Result<SchemaSection> {
    let mut nodes = read_nodes(xml, path)?.into_iter();
    let attrs = loop {
        match nodes.next() {
            Some(Node::Open { tag, attrs }) if tag == SECTION => break attrs,
            Some(_) => {}
            None => {
                return Err(StandardsError::MissingElement {
                    path: path.to_path_buf(),
                    element: SECTION,
                });
            }
        }
    };

    let name = attrs.require("name", SECTION, path)?;
    if !name.eq_ignore_ascii_case(expected) {
        return Err(StandardsError::InvalidValue {
            path: path.to_path_buf(),
            what: "section name",
            value: name.to_string(),
        });
    }
    let header_type = parse_signature(attrs.require("type", SECTION, path)?)
        .first()
        .copied()
        .unwrap_or(PropType::None);
    let allows_comment = attrs.require_bool("comment", SECTION, path)?;

    let mut section = SchemaSection::new(expected, header_type, allows_comment);
    for property in collect_properties(&mut nodes, SECTION, path)? {
        section.add_property(property);
    }
    Ok(section)
}

/// Parses a `<controllers>` document.
pub(crate) fn parse_controllers(
    xml: &str,
    path: &Path,
) -> Result<CaseInsensitiveMap<ValidController>> {
    let mut nodes = read_nodes(xml, path)?.into_iter();
    let mut seen_root = false;
    let mut controllers = CaseInsensitiveMap::new();

    while let Some(node) = nodes.next() {
        match node {
            Node::Open { tag, .. } if tag == CONTROLLERS => seen_root = true,
            Node::Open { tag, attrs } if tag == CONTROLLER && seen_root => {
                let name = attrs.require("name", CONTROLLER, path)?.to_string();
                let mut controller = ValidController::new(name.clone());
                for property in collect_properties(&mut nodes, CONTROLLER, path)? {
                    controller.add_property(property);
                }
                if controllers.insert(name.clone(), controller).is_some() {
                    warn!(controller = %name, path = %path.display(), "duplicate controller ignored");
                }
            }
            Node::Close { tag } if tag == CONTROLLERS => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(StandardsError::MissingElement {
            path: path.to_path_buf(),
            element: CONTROLLERS,
        });
    }
    Ok(controllers)
}
