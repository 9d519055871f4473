/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

pub mod constants;
mod element;
mod entities;
mod extension;
mod generic;
mod jid;
#[cfg(feature = "negotiation")]
pub mod negotiation;
mod parser;
mod stanza;
mod stream;

pub use parser::Location;
pub use parser::SaxElement;
pub use parser::SaxError;
pub use parser::SaxHandler;
pub use parser::SaxParser;

pub use element::Attribute;
pub use element::DecodeError;
pub use element::Element;
pub use element::ElementParser;
pub use element::Name;
pub use element::Node;

pub use jid::BadJid;
pub use jid::Jid;

pub use generic::ABSENT;
pub use generic::Generic;
pub use generic::OptionalGeneric;
pub use generic::ProtocolError;

pub use stream::StreamHeader;

pub use extension::Extension;
pub use extension::ExtensionFactory;
pub use extension::ExtensionRegistry;
pub use extension::Nested;

pub use stanza::Common;
pub use stanza::Header;
pub use stanza::Iq;
pub use stanza::Message;
pub use stanza::Presence;
pub use stanza::Stanza;
pub use stanza::StanzaError;
