/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use log::trace;
use log::warn;

use crate::Element;
use crate::ElementParser;
use crate::ExtensionRegistry;
use crate::Generic;
use crate::Nested;
use crate::ProtocolError;
use crate::constants::NS_XML;
use crate::constants::is_content_namespace;

use super::Header;
use super::Iq;
use super::Message;
use super::Presence;
use super::Stanza;
use super::StanzaError;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum KnownChild {
    Error,
    Subject,
    Body,
    Thread,
    Show,
    Status,
    Priority,
}

// What a child element of the stanza root turns into.
enum Child<'a> {
    Known(KnownChild, &'a Element),
    Extension(Nested),
    Raw(&'a Element),
}

fn empty_stanza(local: &str) -> Option<Stanza> {
    match local {
        "message" => Some(Stanza::Message(Message::default())),
        "presence" => Some(Stanza::Presence(Presence::default())),
        "iq" => Some(Stanza::Iq(Iq::default())),
        _ => None,
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn decode_header(root: &Element) -> Header {
    let mut header = Header::default();
    for attr in root.attributes() {
        let slot = match (attr.name.namespace.as_str(), attr.name.local.as_str()) {
            ("", "to") => &mut header.to,
            ("", "from") => &mut header.from,
            ("", "id") => &mut header.id,
            ("", "type") => &mut header.type_,
            (NS_XML, "lang") => &mut header.lang,
            _ => continue,
        };
        *slot = non_empty(&attr.value);
    }
    header
}

impl Stanza {
    /// Decodes a complete stanza document.
    ///
    /// The variant is picked by the root element name. Child elements in a
    /// namespace with a registered factory are decoded into
    /// [nested](Stanza::nested) values, stanza children like `<body/>` go
    /// to their fields, and everything is kept verbatim in
    /// [innerxml](Stanza::innerxml).
    ///
    /// Stanza children only fill their fields in the stanza namespace, so a
    /// `<body xmlns='urn:other'/>` child is kept in innerxml only.
    ///
    /// ```
    /// use iks_stanza::{ExtensionRegistry, Stanza};
    ///
    /// let registry = ExtensionRegistry::new();
    /// let stanza = Stanza::parse(b"<presence/>", &registry)?;
    /// assert_eq!(stanza.name(), "presence");
    /// assert_eq!(stanza.id(), "");
    /// assert!(Stanza::parse(b"<foo/>", &registry).is_err());
    /// # Ok::<(), iks_stanza::StanzaError>(())
    /// ```
    pub fn parse(raw: &[u8], registry: &ExtensionRegistry) -> Result<Stanza, StanzaError> {
        let mut parser = ElementParser::new();
        parser.parse_bytes(raw)?;
        let content = parser.content_range();
        let root = parser.into_element()?;

        let Some(mut stanza) = empty_stanza(&root.name().local) else {
            return Err(StanzaError::Unrecognized(root.qualified_name()));
        };
        stanza.common_mut().header = decode_header(&root);

        for child in root.child_elements() {
            match stanza.classify(child, registry)? {
                Child::Known(known, element) => stanza.bind(known, element),
                Child::Extension(nested) => stanza.add_nested(nested),
                Child::Raw(element) => {
                    trace!("{} keeps {} as raw content", stanza.name(), element.name());
                }
            }
        }

        if let Some(range) = content {
            stanza.common_mut().innerxml = String::from_utf8_lossy(&raw[range]).into_owned();
        }
        if let Some(err) = stanza.error() {
            warn!("{} stanza id '{}' carries error {}", stanza.name(), stanza.id(), err);
        }
        Ok(stanza)
    }

    fn known_child(&self, local: &str) -> Option<KnownChild> {
        match (self, local) {
            (_, "error") => Some(KnownChild::Error),
            (Stanza::Message(_), "subject") => Some(KnownChild::Subject),
            (Stanza::Message(_), "body") => Some(KnownChild::Body),
            (Stanza::Message(_), "thread") => Some(KnownChild::Thread),
            (Stanza::Presence(_), "show") => Some(KnownChild::Show),
            (Stanza::Presence(_), "status") => Some(KnownChild::Status),
            (Stanza::Presence(_), "priority") => Some(KnownChild::Priority),
            _ => None,
        }
    }

    fn classify<'a>(
        &self,
        child: &'a Element,
        registry: &ExtensionRegistry,
    ) -> Result<Child<'a>, StanzaError> {
        if let Some(nested) = registry.decode(child)? {
            return Ok(Child::Extension(nested));
        }
        let name = child.name();
        if is_content_namespace(&name.namespace) {
            if let Some(known) = self.known_child(&name.local) {
                return Ok(Child::Known(known, child));
            }
        }
        Ok(Child::Raw(child))
    }

    // A repeated child replaces the earlier one.
    fn bind(&mut self, known: KnownChild, element: &Element) {
        if known == KnownChild::Error {
            self.common_mut().error = Some(ProtocolError::from_element(element));
            return;
        }
        let slot = match (self, known) {
            (Stanza::Message(message), KnownChild::Subject) => &mut message.subject,
            (Stanza::Message(message), KnownChild::Body) => &mut message.body,
            (Stanza::Message(message), KnownChild::Thread) => &mut message.thread,
            (Stanza::Presence(presence), KnownChild::Show) => &mut presence.show,
            (Stanza::Presence(presence), KnownChild::Status) => &mut presence.status,
            (Stanza::Presence(presence), KnownChild::Priority) => &mut presence.priority,
            _ => return,
        };
        *slot = Some(Generic::from_element(element));
    }
}
