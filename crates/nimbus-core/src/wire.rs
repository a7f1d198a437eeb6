//! Wire documents
//!
//! Raw response bodies are parsed into one generic tree regardless of the
//! provider dialect. JSON maps onto it directly; XML is normalised so that
//! elements become mappings, repeated sibling elements become sequences,
//! attributes become keys and text-only elements become string scalars.

use crate::error::{MappingError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Untyped parsed tree of a raw API response
pub type WireDocument = Value;

/// Key used for the text content of an XML element that also has children or attributes
pub const XML_TEXT_KEY: &str = "$text";

/// Wire format of a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    Json,
    Xml,
}

impl WireFormat {
    /// Guess the wire format from an HTTP `Content-Type` value
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence.ends_with("json") {
            Some(WireFormat::Json)
        } else if essence.ends_with("xml") {
            Some(WireFormat::Xml)
        } else {
            None
        }
    }

    /// Parse a raw body in this format
    pub fn parse(self, bytes: &[u8]) -> Result<WireDocument> {
        parse_document(bytes, self)
    }
}

impl std::fmt::Display for WireFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireFormat::Json => write!(f, "json"),
            WireFormat::Xml => write!(f, "xml"),
        }
    }
}

impl FromStr for WireFormat {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(WireFormat::Json),
            "xml" => Ok(WireFormat::Xml),
            other => Err(MappingError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Parse raw response bytes into a [`WireDocument`]
pub fn parse_document(bytes: &[u8], format: WireFormat) -> Result<WireDocument> {
    let document = match format {
        WireFormat::Json => serde_json::from_slice(bytes)?,
        WireFormat::Xml => parse_xml(bytes)?,
    };
    tracing::debug!("Parsed {} document ({} bytes)", format, bytes.len());
    Ok(document)
}

/// An XML element that is still open while reading
struct XmlFrame {
    name: String,
    fields: Map<String, Value>,
    text: String,
}

impl XmlFrame {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut fields = Map::new();

        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| MappingError::Xml(e.to_string()))?;
            if attribute.key.as_ref().starts_with(b"xmlns") {
                continue;
            }
            let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(|e| MappingError::Xml(e.to_string()))?;
            insert_repeated(&mut fields, key, Value::String(value.into_owned()));
        }

        Ok(Self {
            name,
            fields,
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let value = if self.fields.is_empty() {
            if self.text.is_empty() {
                Value::Null
            } else {
                Value::String(self.text)
            }
        } else {
            let mut fields = self.fields;
            if !self.text.is_empty() {
                fields.insert(XML_TEXT_KEY.to_string(), Value::String(self.text));
            }
            Value::Object(fields)
        };
        (self.name, value)
    }
}

/// Insert a child, turning repeated keys into a sequence in document order
fn insert_repeated(fields: &mut Map<String, Value>, key: String, value: Value) {
    match fields.get_mut(&key) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            fields.insert(key, value);
        }
    }
}

fn attach(stack: &mut [XmlFrame], root: &mut Option<(String, Value)>, name: String, value: Value) {
    match stack.last_mut() {
        Some(parent) => insert_repeated(&mut parent.fields, name, value),
        None => *root = Some((name, value)),
    }
}

fn parse_xml(bytes: &[u8]) -> Result<Value> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlFrame> = Vec::new();
    let mut root: Option<(String, Value)> = None;
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| MappingError::Xml(e.to_string()))?;

        match event {
            Event::Start(start) => stack.push(XmlFrame::open(&start)?),
            Event::Empty(start) => {
                let (name, value) = XmlFrame::open(&start)?.close();
                attach(&mut stack, &mut root, name, value);
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    let text = text.unescape().map_err(|e| MappingError::Xml(e.to_string()))?;
                    frame.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| MappingError::Xml("unbalanced closing tag".to_string()))?;
                let (name, value) = frame.close();
                attach(&mut stack, &mut root, name, value);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(MappingError::Xml("unexpected end of document".to_string()));
    }

    let (name, value) =
        root.ok_or_else(|| MappingError::Xml("document has no root element".to_string()))?;
    let mut document = Map::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json() {
        let doc = parse_document(br#"{"a": [1, 2]}"#, WireFormat::Json).unwrap();
        assert_eq!(doc, json!({"a": [1, 2]}));
    }

    #[test]
    fn test_parse_xml_elements_and_attributes() {
        let xml = br#"<?xml version="1.0"?>
            <VApp xmlns="http://www.vmware.com/vcloud/v1" name="web" status="4">
                <Description>front end</Description>
                <Network href="https://vcloud/network/1"/>
            </VApp>"#;

        let doc = parse_document(xml, WireFormat::Xml).unwrap();
        assert_eq!(
            doc,
            json!({
                "VApp": {
                    "name": "web",
                    "status": "4",
                    "Description": "front end",
                    "Network": {"href": "https://vcloud/network/1"}
                }
            })
        );
    }

    #[test]
    fn test_parse_xml_repeated_siblings_become_sequence() {
        let xml = b"<list><item>a</item><item>b</item><item>c</item></list>";
        let doc = parse_document(xml, WireFormat::Xml).unwrap();
        assert_eq!(doc, json!({"list": {"item": ["a", "b", "c"]}}));
    }

    #[test]
    fn test_parse_xml_mixed_text() {
        let xml = br#"<Size unit="bytes">1024</Size>"#;
        let doc = parse_document(xml, WireFormat::Xml).unwrap();
        assert_eq!(doc, json!({"Size": {"unit": "bytes", "$text": "1024"}}));
    }

    #[test]
    fn test_parse_xml_empty_element_is_null() {
        let doc = parse_document(b"<root><note/></root>", WireFormat::Xml).unwrap();
        assert_eq!(doc, json!({"root": {"note": null}}));
    }

    #[test]
    fn test_parse_xml_unbalanced() {
        let result = parse_document(b"<root><a></root>", WireFormat::Xml);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_from_content_type() {
        assert_eq!(
            WireFormat::from_content_type("application/json; charset=utf-8"),
            Some(WireFormat::Json)
        );
        assert_eq!(
            WireFormat::from_content_type("application/vnd.vmware.vcloud.vApp+xml"),
            Some(WireFormat::Xml)
        );
        assert_eq!(WireFormat::from_content_type("text/plain"), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<WireFormat>().unwrap(), WireFormat::Json);
        assert!(matches!(
            "yaml".parse::<WireFormat>(),
            Err(MappingError::UnsupportedFormat(_))
        ));
    }
}
