//! Streaming XML parsing for backup message elements
//!
//! The input backup is one root element with an arbitrary number of `mms`
//! and `sms` children. Only one top-level message subtree is materialized
//! at a time; each completed element is handed to the caller and dropped,
//! so peak memory stays proportional to a single message regardless of
//! input size.

use std::collections::HashMap;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{ConvertError, ConvertResult};

/// One parsed XML element: tag, attributes, and child elements
///
/// This is the transient per-message representation. Text content is not
/// retained; every field the pipeline needs lives in attributes.
#[derive(Debug, Clone, Default)]
pub struct XmlElement {
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>) -> Self {
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = HashMap::new();
        for attr in start.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = match attr.unescape_value() {
                Ok(v) => v.into_owned(),
                Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
            };
            attributes.insert(key, value);
        }
        Self {
            tag,
            attributes,
            children: Vec::new(),
        }
    }

    /// Tag name with any XML namespace stripped
    pub fn local_name(&self) -> &str {
        strip_namespace(&self.tag)
    }

    /// Attribute value, or `None` if absent
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Attribute value with a fallback default
    pub fn attr_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attr(name).unwrap_or(default)
    }

    /// Child elements whose namespace-stripped tag matches `name`
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.local_name() == name)
    }

    /// First child whose namespace-stripped tag matches `name`
    pub fn child_named<'a>(&'a self, name: &'a str) -> Option<&'a XmlElement> {
        self.children_named(name).next()
    }
}

/// Classification of a top-level backup element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Already-normalized SMS entry (dropped, not passed through)
    Sms,
    /// MMS entry, candidate for conversion
    Mms,
    /// Anything else under the root (ignored)
    Other,
}

impl MessageKind {
    pub fn classify(tag: &str) -> Self {
        match strip_namespace(tag) {
            "sms" => Self::Sms,
            "mms" => Self::Mms,
            _ => Self::Other,
        }
    }
}

/// Remove an XML namespace from a tag name
///
/// Handles both Clark notation (`{uri}tag`, substring after the last `}`)
/// and prefixed names as they appear on the wire (`ns:tag`). A tag with
/// neither form is returned unchanged; an empty tag yields an empty
/// string.
pub fn strip_namespace(tag: &str) -> &str {
    let tag = match tag.rfind('}') {
        Some(idx) => &tag[idx + 1..],
        None => tag,
    };
    match tag.rfind(':') {
        Some(idx) => &tag[idx + 1..],
        None => tag,
    }
}

/// Streaming reader yielding one top-level message element at a time
///
/// The root element itself is consumed silently; each direct child is
/// assembled from parse events and returned complete. The caller owns the
/// returned subtree and drops it after processing, which is what bounds
/// memory for large backups.
pub struct MessageStream<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    stack: Vec<XmlElement>,
    root_seen: bool,
}

impl<R: BufRead> MessageStream<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: Reader::from_reader(source),
            buf: Vec::new(),
            stack: Vec::new(),
            root_seen: false,
        }
    }

    /// Next complete top-level element, or `None` at end of stream
    pub fn next_message(&mut self) -> ConvertResult<Option<XmlElement>> {
        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf) {
                Err(error) => {
                    let position = self.reader.buffer_position() as u64;
                    return Err(ConvertError::malformed_xml(error.to_string(), position));
                }
                Ok(Event::Start(ref start)) => {
                    if self.root_seen {
                        self.stack.push(XmlElement::from_start(start));
                    } else {
                        self.root_seen = true;
                    }
                }
                Ok(Event::Empty(ref start)) => {
                    if self.root_seen {
                        let element = XmlElement::from_start(start);
                        match self.stack.last_mut() {
                            Some(parent) => parent.children.push(element),
                            None => return Ok(Some(element)),
                        }
                    } else {
                        // Empty root, nothing to yield
                        self.root_seen = true;
                    }
                }
                Ok(Event::End(_)) => {
                    if let Some(element) = self.stack.pop() {
                        match self.stack.last_mut() {
                            Some(parent) => parent.children.push(element),
                            None => return Ok(Some(element)),
                        }
                    }
                    // End of the root itself falls through; Eof follows
                }
                Ok(Event::Eof) => return Ok(None),
                // Text, comments, declarations and PIs carry nothing we need
                Ok(_) => {}
            }
        }
    }
}
