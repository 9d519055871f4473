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

use std::fmt::Display;

pub use error::ProtocolError;

use crate::Element;
use crate::Name;
use crate::constants::is_content_namespace;
use crate::entities::escape;
use crate::entities::escape_fmt;

/// Text written in place of a missing [Generic].
pub const ABSENT: &str = "nil";

/// An XML element which has no more specific model.
///
/// A Generic keeps the element name, its character data, and at most one
/// nested element. Only the first child element is decoded, any siblings
/// after it are dropped. Stanzas keep their complete original content in
/// [innerxml](crate::Stanza::innerxml) for callers who need the rest.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Generic {
    pub name: Name,
    pub nested: Option<Box<Generic>>,
    pub text: String,
}

impl Generic {
    pub fn new(namespace: &str, local: &str) -> Generic {
        Generic {
            name: Name::new(namespace, local),
            nested: None,
            text: String::new(),
        }
    }

    pub fn with_text(mut self, text: &str) -> Generic {
        self.text = text.to_string();
        self
    }

    pub fn with_nested(mut self, nested: Generic) -> Generic {
        self.nested = Some(Box::new(nested));
        self
    }

    /// Captures an element, never fails.
    ///
    /// Character data from all text nodes directly under the element are
    /// concatenated.
    pub fn from_element(element: &Element) -> Generic {
        Generic {
            name: element.name().clone(),
            nested: element
                .child_elements()
                .next()
                .map(|child| Box::new(Generic::from_element(child))),
            text: element.text(),
        }
    }

    /// Display adapter for an optional Generic.
    ///
    /// ```
    /// use iks_stanza::Generic;
    ///
    /// let body = Generic::new("", "body").with_text("hi");
    /// assert_eq!(Generic::display_optional(Some(&body)).to_string(), "<body>hi</body>");
    /// assert_eq!(Generic::display_optional(None).to_string(), "nil");
    /// ```
    pub fn display_optional(generic: Option<&Generic>) -> OptionalGeneric<'_> {
        OptionalGeneric(generic)
    }

    /// Writes the element as XML.
    ///
    /// The namespace is declared with an `xmlns` attribute unless it is
    /// inherited from the enclosing element given as `parent_namespace`.
    /// An element in no namespace under a foreign default namespace gets
    /// `xmlns=""` so it does not pick up the parent's namespace.
    pub fn encode(&self, parent_namespace: &str, out: &mut String) {
        let namespace = &self.name.namespace;
        out.push('<');
        out.push_str(&self.name.local);
        let inherited = namespace == parent_namespace
            || (is_content_namespace(namespace) && is_content_namespace(parent_namespace));
        if !inherited {
            out.push_str(" xmlns=\"");
            escape(namespace, out);
            out.push('"');
        }
        if self.nested.is_none() && self.text.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(nested) = &self.nested {
            nested.encode(namespace, out);
        }
        escape(&self.text, out);
        out.push_str("</");
        out.push_str(&self.name.local);
        out.push('>');
    }
}

/// Writes `<namespace:local>` followed by the nested element, the escaped
/// text, and the matching close. The namespace part is left out when it is
/// empty.
impl Display for Generic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.name)?;
        if let Some(nested) = &self.nested {
            nested.fmt(f)?;
        }
        escape_fmt(&self.text, f)?;
        write!(f, "</{}>", self.name)
    }
}

/// Renders a Generic that may be missing, see [Generic::display_optional].
#[derive(Debug, Clone, Copy)]
pub struct OptionalGeneric<'a>(pub Option<&'a Generic>);

impl Display for OptionalGeneric<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(generic) => generic.fmt(f),
            None => f.write_str(ABSENT),
        }
    }
}
