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

use crate::Generic;
use crate::entities::escape;

use super::Header;
use super::Stanza;

fn push_attribute(out: &mut String, name: &str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape(value, out);
        out.push('"');
    }
}

impl Header {
    fn encode(&self, out: &mut String) {
        push_attribute(out, "to", &self.to);
        push_attribute(out, "from", &self.from);
        push_attribute(out, "id", &self.id);
        push_attribute(out, "type", &self.type_);
        push_attribute(out, "xml:lang", &self.lang);
    }
}

impl Stanza {
    fn known_children(&self) -> [Option<&Generic>; 3] {
        match self {
            Stanza::Message(message) => [
                message.subject.as_ref(),
                message.body.as_ref(),
                message.thread.as_ref(),
            ],
            Stanza::Presence(presence) => [
                presence.show.as_ref(),
                presence.status.as_ref(),
                presence.priority.as_ref(),
            ],
            Stanza::Iq(_) => [None, None, None],
        }
    }

    /// Writes the stanza as XML.
    ///
    /// The output is the start tag with the header attributes, the error
    /// element, the stanza specific children, the extension values in
    /// their stored order, and the end tag. Unrecognized content which was
    /// only kept in [innerxml](Stanza::innerxml) is not written.
    pub fn encode(&self, out: &mut String) {
        let common = self.common();
        out.push('<');
        out.push_str(self.name());
        common.header.encode(out);
        out.push('>');
        if let Some(err) = &common.error {
            err.encode(out);
        }
        for generic in self.known_children().into_iter().flatten() {
            generic.encode("", out);
        }
        for nested in &common.nested {
            nested.value.encode(out);
        }
        out.push_str("</");
        out.push_str(self.name());
        out.push('>');
    }
}

impl Display for Stanza {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut xml = String::new();
        self.encode(&mut xml);
        f.write_str(&xml)
    }
}
