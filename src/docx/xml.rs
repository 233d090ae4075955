use anyhow::{anyhow, Context};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Owned element/text events of one package part. Declarations, comments,
/// processing instructions and doctypes carry no body content and are dropped.
#[derive(Clone, Debug, PartialEq)]
pub enum XmlEvent {
    Start {
        name: String,
        attrs: Vec<(String, String)>,
    },
    End {
        name: String,
    },
    Empty {
        name: String,
        attrs: Vec<(String, String)>,
    },
    Text {
        text: String,
    },
}

#[derive(Clone, Debug)]
pub struct XmlPart {
    pub name: String,
    pub events: Vec<XmlEvent>,
}

pub fn parse_xml_part(name: &str, xml_bytes: &[u8]) -> anyhow::Result<XmlPart> {
    let mut reader = Reader::from_reader(xml_bytes);
    reader.config_mut().trim_text(false);

    let mut events: Vec<XmlEvent> = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let ev = reader
            .read_event_into(&mut buf)
            .with_context(|| format!("read xml event in {name}"))?;
        match ev {
            Event::Eof => break,
            Event::Start(s) => {
                events.push(XmlEvent::Start {
                    name: bytes_to_string(s.name().as_ref()),
                    attrs: collect_attrs(&s)?,
                });
            }
            Event::End(e) => {
                events.push(XmlEvent::End {
                    name: bytes_to_string(e.name().as_ref()),
                });
            }
            Event::Empty(s) => {
                events.push(XmlEvent::Empty {
                    name: bytes_to_string(s.name().as_ref()),
                    attrs: collect_attrs(&s)?,
                });
            }
            Event::Text(t) => {
                let txt = t.unescape().context("unescape text")?.into_owned();
                events.push(XmlEvent::Text { text: txt });
            }
            Event::CData(t) => {
                events.push(XmlEvent::Text {
                    text: bytes_to_string(t.into_inner()),
                });
            }
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    Ok(XmlPart {
        name: name.to_string(),
        events,
    })
}

/// Element tree over an [`XmlPart`]. Children keep document order.
#[derive(Clone, Debug, Default)]
pub struct XmlElement {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

#[derive(Clone, Debug)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl XmlElement {
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Attribute value by local name (`w:val` and `val` both match `"val"`).
    pub fn attr(&self, local: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| local_name(k) == local)
            .map(|(_, v)| v.as_str())
    }

    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|c| match c {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    pub fn elements_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.elements().filter(move |e| e.local_name() == local)
    }

    pub fn child(&self, local: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.local_name() == local)
    }

    /// Concatenated direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                XmlNode::Text(t) => Some(t.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }
}

impl XmlPart {
    /// Builds the element tree rooted at the part's single document element.
    pub fn root(&self) -> anyhow::Result<XmlElement> {
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;
        for ev in &self.events {
            match ev {
                XmlEvent::Start { name, attrs } => stack.push(XmlElement {
                    name: name.clone(),
                    attrs: attrs.clone(),
                    children: Vec::new(),
                }),
                XmlEvent::Empty { name, attrs } => {
                    let el = XmlElement {
                        name: name.clone(),
                        attrs: attrs.clone(),
                        children: Vec::new(),
                    };
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Element(el)),
                        None => root = Some(el),
                    }
                }
                XmlEvent::End { .. } => {
                    let el = stack
                        .pop()
                        .ok_or_else(|| anyhow!("unbalanced end tag in {}", self.name))?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Element(el)),
                        None => root = Some(el),
                    }
                }
                XmlEvent::Text { text } => {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlNode::Text(text.clone()));
                    }
                }
            }
        }
        if !stack.is_empty() {
            return Err(anyhow!("unclosed element in {}", self.name));
        }
        root.ok_or_else(|| anyhow!("no root element in {}", self.name))
    }
}

fn collect_attrs(s: &BytesStart<'_>) -> anyhow::Result<Vec<(String, String)>> {
    let mut attrs: Vec<(String, String)> = Vec::new();
    for a in s.attributes() {
        let a = a.context("attr")?;
        let key = bytes_to_string(a.key.as_ref());
        let val = a.unescape_value().context("unescape attr")?.into_owned();
        attrs.push((key, val));
    }
    Ok(attrs)
}

fn bytes_to_string(bytes: impl AsRef<[u8]>) -> String {
    String::from_utf8_lossy(bytes.as_ref()).into_owned()
}

/// Strips a namespace prefix: `w:tbl` -> `tbl`.
pub fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map(|(_, local)| local).unwrap_or(name)
}
