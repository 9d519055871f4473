/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod error;
mod marshal;
mod parse;

pub use error::StanzaError;

use crate::Extension;
use crate::Generic;
use crate::Jid;
use crate::Nested;
use crate::ProtocolError;

/// Addressing attributes shared by all stanzas.
///
/// Empty attribute values are read as `None` and never written.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Header {
    pub to: Option<String>,
    pub from: Option<String>,
    pub id: Option<String>,
    pub type_: Option<String>,
    /// The `xml:lang` attribute.
    pub lang: Option<String>,
}

fn parse_jid(value: &Option<String>) -> Result<Option<Jid>, StanzaError> {
    match value {
        Some(value) => Ok(Some(Jid::new(value)?)),
        None => Ok(None),
    }
}

impl Header {
    pub fn to_jid(&self) -> Result<Option<Jid>, StanzaError> {
        parse_jid(&self.to)
    }

    pub fn from_jid(&self) -> Result<Option<Jid>, StanzaError> {
        parse_jid(&self.from)
    }
}

/// Fields every stanza variant has.
#[derive(Debug, Default)]
pub struct Common {
    pub header: Header,
    pub error: Option<ProtocolError>,
    /// Extension values in the order their elements appeared.
    pub nested: Vec<Nested>,
    innerxml: String,
}

#[derive(Debug, Default)]
pub struct Message {
    pub common: Common,
    pub subject: Option<Generic>,
    pub body: Option<Generic>,
    pub thread: Option<Generic>,
}

#[derive(Debug, Default)]
pub struct Presence {
    pub common: Common,
    pub show: Option<Generic>,
    pub status: Option<Generic>,
    pub priority: Option<Generic>,
}

#[derive(Debug, Default)]
pub struct Iq {
    pub common: Common,
}

/// One of the three top level XMPP elements.
#[derive(Debug)]
pub enum Stanza {
    Message(Message),
    Presence(Presence),
    Iq(Iq),
}

impl Message {
    /// A chat message with a body.
    pub fn chat(to: &Jid, body: &str) -> Message {
        let mut message = Message {
            body: Some(Generic::new("", "body").with_text(body)),
            ..Default::default()
        };
        message.common.header.to = Some(to.to_string());
        message.common.header.type_ = Some("chat".to_string());
        message
    }
}

impl Iq {
    pub fn new(type_: &str, id: &str) -> Iq {
        let mut iq = Iq::default();
        iq.common.header.type_ = Some(type_.to_string());
        iq.common.header.id = Some(id.to_string());
        iq
    }

    /// Adds an extension payload, builder style.
    pub fn with_payload<T: Extension>(mut self, namespace: &str, payload: T) -> Iq {
        self.common.nested.push(Nested::new(namespace, Box::new(payload)));
        self
    }
}

impl From<Message> for Stanza {
    fn from(message: Message) -> Self {
        Stanza::Message(message)
    }
}

impl From<Presence> for Stanza {
    fn from(presence: Presence) -> Self {
        Stanza::Presence(presence)
    }
}

impl From<Iq> for Stanza {
    fn from(iq: Iq) -> Self {
        Stanza::Iq(iq)
    }
}

impl Stanza {
    /// Local name of the root element.
    pub fn name(&self) -> &'static str {
        match self {
            Stanza::Message(_) => "message",
            Stanza::Presence(_) => "presence",
            Stanza::Iq(_) => "iq",
        }
    }

    pub fn common(&self) -> &Common {
        match self {
            Stanza::Message(message) => &message.common,
            Stanza::Presence(presence) => &presence.common,
            Stanza::Iq(iq) => &iq.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut Common {
        match self {
            Stanza::Message(message) => &mut message.common,
            Stanza::Presence(presence) => &mut presence.common,
            Stanza::Iq(iq) => &mut iq.common,
        }
    }

    pub fn header(&self) -> &Header {
        &self.common().header
    }

    /// The `id` attribute, or an empty string when there is none.
    pub fn id(&self) -> &str {
        self.header().id.as_deref().unwrap_or_default()
    }

    pub fn error(&self) -> Option<&ProtocolError> {
        self.common().error.as_ref()
    }

    pub fn add_nested(&mut self, nested: Nested) {
        self.common_mut().nested.push(nested);
    }

    pub fn nested(&self) -> &[Nested] {
        &self.common().nested
    }

    /// First extension value of the given type.
    pub fn find_nested<T: Extension>(&self) -> Option<&T> {
        self.nested()
            .iter()
            .find_map(|nested| nested.downcast_ref::<T>())
    }

    /// Original text of everything between the root start and end tags.
    ///
    /// This is only set by [parse](Stanza::parse) and is never written out
    /// by [encode](Stanza::encode).
    pub fn innerxml(&self) -> &str {
        &self.common().innerxml
    }

    /// Turns a stanza carrying an `<error/>` into an error value.
    pub fn into_result(mut self) -> Result<Stanza, StanzaError> {
        match self.common_mut().error.take() {
            Some(err) => Err(StanzaError::Protocol(err)),
            None => Ok(self),
        }
    }
}
