/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::any::Any;

use crate::BadJid;
use crate::DecodeError;
use crate::Element;
use crate::Extension;
use crate::Jid;
use crate::Name;
use crate::constants::NS_BIND;
use crate::entities::escape;

use super::check_name;
use super::description;

/// Resource binding payload of an `<iq/>`.
///
/// Clients send it with the resource they want, servers answer with the
/// full JID they assigned.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Bind {
    pub resource: Option<String>,
    pub jid: Option<String>,
}

impl Bind {
    pub fn request(resource: Option<&str>) -> Bind {
        Bind {
            resource: resource.map(str::to_string),
            jid: None,
        }
    }

    pub fn factory(_name: &Name) -> Box<dyn Extension> {
        Box::new(Bind::default())
    }

    pub fn from_element(element: &Element) -> Result<Bind, DecodeError> {
        check_name(element, "bind", NS_BIND, description::NOT_BIND)?;
        let mut bind = Bind::default();
        for child in element.child_elements() {
            if child.is("resource", NS_BIND) {
                bind.resource = Some(child.text());
            } else if child.is("jid", NS_BIND) {
                bind.jid = Some(child.text());
            }
        }
        Ok(bind)
    }

    /// The assigned address from a server answer.
    pub fn jid(&self) -> Result<Option<Jid>, BadJid> {
        self.jid.as_deref().map(Jid::new).transpose()
    }
}

impl Extension for Bind {
    fn decode(&mut self, element: &Element) -> Result<(), DecodeError> {
        *self = Bind::from_element(element)?;
        Ok(())
    }

    fn encode(&self, out: &mut String) {
        out.push_str("<bind xmlns=\"");
        out.push_str(NS_BIND);
        out.push('"');
        if self.resource.is_none() && self.jid.is_none() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for (tag, value) in [("resource", &self.resource), ("jid", &self.jid)] {
            if let Some(value) = value {
                out.push('<');
                out.push_str(tag);
                out.push('>');
                escape(value, out);
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
        out.push_str("</bind>");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
