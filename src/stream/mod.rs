/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Display;

use log::debug;

use crate::DecodeError;
use crate::Element;
use crate::constants::NS_CLIENT;
use crate::constants::NS_STREAM;
use crate::constants::STREAM_TAG;
use crate::element::parse_start_tag;
use crate::entities::escape;

pub const XML_DECLARATION: &str = "<?xml version='1.0'?>";

/// The `<stream:stream>` tag which opens an XMPP session.
///
/// Only the opening tag exists on the wire until the session ends, so the
/// header is encoded without any content or closing tag.
///
/// ```
/// use iks_stanza::StreamHeader;
///
/// let header = StreamHeader::client("example.com");
/// assert_eq!(
///     header.to_string(),
///     "<stream:stream xmlns=\"jabber:client\" \
///      xmlns:stream=\"http://etherx.jabber.org/streams\" \
///      to=\"example.com\" version=\"1.0\">"
/// );
/// ```
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct StreamHeader {
    pub to: Option<String>,
    pub from: Option<String>,
    pub id: Option<String>,
    pub lang: Option<String>,
    pub version: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn push_attribute(out: &mut String, name: &str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape(value, out);
        out.push('"');
    }
}

impl StreamHeader {
    /// Header a client sends to open a stream to the given server.
    pub fn client(to: &str) -> StreamHeader {
        StreamHeader {
            to: non_empty(to),
            version: Some("1.0".to_string()),
            ..Default::default()
        }
    }

    /// Extracts the header fields from an opening stream tag.
    ///
    /// Attribute names are matched by their local part without regard to
    /// case, so `xml:lang` and `lang` are both taken as the language.
    /// Unknown attributes are ignored. This never fails: a peer with an odd
    /// header still gets a stream.
    pub fn from_start_element(element: &Element) -> StreamHeader {
        if !element.is("stream", NS_STREAM) {
            debug!("stream header has unexpected name {}", element.name());
        }
        let mut header = StreamHeader::default();
        for attr in element.attributes() {
            let slot = match attr.name.local.to_lowercase().as_str() {
                "to" => &mut header.to,
                "from" => &mut header.from,
                "id" => &mut header.id,
                "lang" => &mut header.lang,
                "version" => &mut header.version,
                _ => {
                    debug!("ignoring stream header attribute {}", attr.name);
                    continue;
                }
            };
            *slot = non_empty(&attr.value);
        }
        header
    }

    /// Parses the opening stream tag from the start of the session data.
    ///
    /// An optional XML declaration can precede the tag, and anything after
    /// the tag is not looked at. Only malformed XML is an error.
    pub fn from_bytes(bytes: &[u8]) -> Result<StreamHeader, DecodeError> {
        let element = parse_start_tag(bytes)?;
        Ok(StreamHeader::from_start_element(&element))
    }

    pub fn encode(&self, out: &mut String) {
        out.push('<');
        out.push_str(STREAM_TAG);
        out.push_str(" xmlns=\"");
        out.push_str(NS_CLIENT);
        out.push_str("\" xmlns:stream=\"");
        out.push_str(NS_STREAM);
        out.push('"');
        push_attribute(out, "to", &self.to);
        push_attribute(out, "from", &self.from);
        push_attribute(out, "id", &self.id);
        push_attribute(out, "xml:lang", &self.lang);
        push_attribute(out, "version", &self.version);
        out.push('>');
    }

    /// Same as [encode](StreamHeader::encode) but starts with the XML
    /// declaration, for the first bytes of a session.
    pub fn encode_document_start(&self, out: &mut String) {
        out.push_str(XML_DECLARATION);
        self.encode(out);
    }

    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

impl Display for StreamHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut xml = String::new();
        self.encode(&mut xml);
        f.write_str(&xml)
    }
}

#[cfg(test)]
mod tests;
