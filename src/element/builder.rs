/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::ops::Range;

use crate::Location;
use crate::SaxElement;
use crate::SaxError;
use crate::SaxHandler;
use crate::SaxParser;
use crate::constants::NS_CLIENT;
use crate::constants::NS_STREAM;
use crate::constants::NS_XML;

use super::Attribute;
use super::DecodeError;
use super::Element;
use super::Name;
use super::error::description;

type Declarations = Vec<(Option<String>, String)>;

struct PendingTag {
    qname: String,
    attributes: Vec<(String, String)>,
}

fn split_qname(qname: &str) -> Result<(Option<&str>, &str), SaxError> {
    match qname.split_once(':') {
        None => Ok((None, qname)),
        Some((prefix, local)) => {
            if prefix.is_empty() || local.is_empty() || local.contains(':') {
                return Err(SaxError::BadXml(description::BAD_QNAME));
            }
            Ok((Some(prefix), local))
        }
    }
}

struct ElementBuilder {
    pending: Option<PendingTag>,
    stack: Vec<Element>,
    scopes: Vec<Declarations>,
    root: Option<Element>,
    content_start: Option<usize>,
    content_end: Option<usize>,
    start_tag_only: bool,
}

impl ElementBuilder {
    fn new(inherited: Declarations, start_tag_only: bool) -> Self {
        ElementBuilder {
            pending: None,
            stack: Vec::new(),
            scopes: vec![inherited],
            root: None,
            content_start: None,
            content_end: None,
            start_tag_only,
        }
    }

    fn resolve(&self, prefix: Option<&str>) -> Result<String, SaxError> {
        if prefix == Some("xml") {
            return Ok(NS_XML.to_string());
        }
        for scope in self.scopes.iter().rev() {
            for (declared, uri) in scope.iter().rev() {
                if declared.as_deref() == prefix {
                    return Ok(uri.clone());
                }
            }
        }
        match prefix {
            None => Ok(String::new()),
            Some(_) => Err(SaxError::BadXml(description::UNBOUND_PREFIX)),
        }
    }

    // Turns the collected start tag into an element. Its namespace scope is
    // pushed before resolving, since a tag can use its own declarations.
    fn open_pending(&mut self) -> Result<Element, SaxError> {
        let Some(tag) = self.pending.take() else {
            return Err(SaxError::BadXml(description::NO_ROOT));
        };

        let mut declarations = Declarations::new();
        let mut plain = Vec::with_capacity(tag.attributes.len());
        for (name, value) in tag.attributes {
            if name == "xmlns" {
                declarations.push((None, value));
            } else if let Some(prefix) = name.strip_prefix("xmlns:") {
                if prefix.is_empty() {
                    return Err(SaxError::BadXml(description::BAD_QNAME));
                }
                declarations.push((Some(prefix.to_string()), value));
            } else {
                plain.push((name, value));
            }
        }
        self.scopes.push(declarations.clone());

        let (prefix, local) = split_qname(&tag.qname)?;
        let name = Name::new(&self.resolve(prefix)?, local);

        let mut attributes: Vec<Attribute> = Vec::with_capacity(plain.len());
        for (qname, value) in plain {
            let (prefix, local) = split_qname(&qname)?;
            // Unprefixed attributes are in no namespace, not the default one.
            let namespace = match prefix {
                None => String::new(),
                Some(_) => self.resolve(prefix)?,
            };
            if attributes.iter().any(|attr| attr.name.is(local, &namespace)) {
                return Err(SaxError::BadXml(description::DUPLICATE_ATTRIBUTE));
            }
            attributes.push(Attribute {
                name: Name::new(&namespace, local),
                prefix: prefix.map(str::to_string),
                value,
            });
        }

        Ok(Element::from_parts(
            name,
            prefix.map(str::to_string),
            declarations,
            attributes,
        ))
    }

    fn close(&mut self, element: Element) {
        match self.stack.last_mut() {
            Some(parent) => parent.push_child(element),
            None => self.root = Some(element),
        }
    }
}

impl SaxHandler for ElementBuilder {
    fn handle_element(&mut self, element: &SaxElement, location: Location) -> Result<(), SaxError> {
        match element {
            SaxElement::StartTag(qname) => {
                self.pending = Some(PendingTag {
                    qname: qname.to_string(),
                    attributes: Vec::new(),
                });
            }
            SaxElement::Attribute(name, value) => {
                if let Some(tag) = self.pending.as_mut() {
                    tag.attributes.push((name.to_string(), value.to_string()));
                }
            }
            SaxElement::StartTagContent => {
                let opened = self.open_pending()?;
                if self.stack.is_empty() {
                    self.content_start = Some(location.bytes + 1);
                }
                self.stack.push(opened);
                if self.start_tag_only && self.stack.len() == 1 {
                    return Err(SaxError::HandlerAbort);
                }
            }
            SaxElement::StartTagEmpty => {
                let opened = self.open_pending()?;
                self.scopes.pop();
                self.close(opened);
            }
            SaxElement::EndTag(qname) => {
                let Some(closed) = self.stack.pop() else {
                    return Err(SaxError::BadXml(description::TAG_MISMATCH));
                };
                if closed.qualified_name() != *qname {
                    return Err(SaxError::BadXml(description::TAG_MISMATCH));
                }
                self.scopes.pop();
                if self.stack.is_empty() {
                    // location is right after the name of the '</name' tag
                    self.content_end = Some(location.bytes.saturating_sub(qname.len() + 2));
                }
                self.close(closed);
            }
            SaxElement::CData(cdata) => {
                if let Some(current) = self.stack.last_mut() {
                    current.push_text(cdata);
                }
            }
        }
        Ok(())
    }
}

/// Builds an [Element] tree from XML bytes.
///
/// Besides the tree, the parser remembers where the content of the root
/// element starts and ends in the input, so callers can keep the original
/// text of the children.
pub struct ElementParser {
    builder: ElementBuilder,
    parser: SaxParser,
}

impl ElementParser {
    pub fn new() -> ElementParser {
        ElementParser {
            builder: ElementBuilder::new(Declarations::new(), false),
            parser: SaxParser::new(),
        }
    }

    /// Creates a parser for elements received inside a client stream.
    ///
    /// The `stream` prefix and the `jabber:client` default namespace are
    /// inherited from the stream header, as if the element was nested in it.
    pub fn in_stream() -> ElementParser {
        ElementParser {
            builder: ElementBuilder::new(stream_declarations(), false),
            parser: SaxParser::new(),
        }
    }

    pub fn parse_bytes(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        Ok(self.parser.parse_bytes(&mut self.builder, bytes)?)
    }

    /// Byte range of the root element content in the parsed input.
    ///
    /// This is available once the root element is closed, and is `None`
    /// for an empty element tag.
    pub fn content_range(&self) -> Option<Range<usize>> {
        match (self.builder.content_start, self.builder.content_end) {
            (Some(start), Some(end)) if start <= end => Some(start..end),
            _ => None,
        }
    }

    pub fn location(&self) -> Location {
        self.parser.location()
    }

    pub fn into_element(mut self) -> Result<Element, DecodeError> {
        self.parser.parse_finish()?;
        match self.builder.root.take() {
            None => Err(DecodeError::BadXml(description::NO_ROOT)),
            Some(root) => Ok(root),
        }
    }
}

impl Default for ElementParser {
    fn default() -> Self {
        Self::new()
    }
}

fn stream_declarations() -> Declarations {
    vec![
        (Some("stream".to_string()), NS_STREAM.to_string()),
        (None, NS_CLIENT.to_string()),
    ]
}

/// Parses only the first start tag of the input.
///
/// This is how a stream header is read: the `<stream:stream>` element stays
/// open for the whole session, so the document is never complete. Anything
/// after the start tag is left unparsed. The returned element has no
/// children.
pub fn parse_start_tag(bytes: &[u8]) -> Result<Element, DecodeError> {
    let mut builder = ElementBuilder::new(stream_declarations(), true);
    let mut parser = SaxParser::new();
    match parser.parse_bytes(&mut builder, bytes) {
        Ok(()) | Err(SaxError::HandlerAbort) => (),
        Err(err) => return Err(err.into()),
    }
    if let Some(opened) = builder.stack.pop() {
        return Ok(opened);
    }
    match builder.root.take() {
        Some(root) => Ok(root),
        None => Err(DecodeError::BadXml(description::INCOMPLETE_START_TAG)),
    }
}
