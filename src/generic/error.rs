/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::error::Error;
use std::fmt::Display;

use crate::Element;
use crate::entities::escape;

use super::Generic;

/// A stanza level `<error/>` element.
///
/// Stanzas carry this as plain data. Since it also implements
/// [Error], a caller can return it directly when a failed request
/// should stop processing. The message is the XML form of the element.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ProtocolError {
    /// Value of the `type` attribute, such as `cancel` or `modify`.
    pub type_: String,
    /// The condition element, if any.
    pub nested: Option<Generic>,
}

impl ProtocolError {
    pub fn new(type_: &str, condition: Generic) -> ProtocolError {
        ProtocolError {
            type_: type_.to_string(),
            nested: Some(condition),
        }
    }

    pub fn from_element(element: &Element) -> ProtocolError {
        ProtocolError {
            type_: element.attribute("type").unwrap_or_default().to_string(),
            nested: element.child_elements().next().map(Generic::from_element),
        }
    }

    /// Local name of the condition element, like `item-not-found`.
    pub fn condition(&self) -> Option<&str> {
        self.nested.as_ref().map(|generic| generic.name.local.as_str())
    }

    pub fn encode(&self, out: &mut String) {
        out.push_str("<error");
        if !self.type_.is_empty() {
            out.push_str(" type=\"");
            escape(&self.type_, out);
            out.push('"');
        }
        match &self.nested {
            Some(nested) => {
                out.push('>');
                nested.encode("", out);
                out.push_str("</error>");
            }
            None => out.push_str("/>"),
        }
    }
}

impl Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut xml = String::new();
        self.encode(&mut xml);
        f.write_str(&xml)
    }
}

impl Error for ProtocolError {}
