/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod builder;
mod error;

use std::fmt::Display;
use std::str::FromStr;

pub use builder::ElementParser;
pub use builder::parse_start_tag;
pub use error::DecodeError;

use crate::entities::escape_fmt;

/// Namespace qualified name of an element or attribute.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct Name {
    /// Namespace URI, empty when the name is in no namespace.
    pub namespace: String,
    /// Local part of the name without any prefix.
    pub local: String,
}

impl Name {
    pub fn new(namespace: &str, local: &str) -> Self {
        Name {
            namespace: namespace.to_string(),
            local: local.to_string(),
        }
    }

    pub fn is(&self, local: &str, namespace: &str) -> bool {
        self.local == local && self.namespace == namespace
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(&self.local)
        } else {
            write!(f, "{}:{}", self.namespace, self.local)
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Attribute {
    pub name: Name,
    pub prefix: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An owned, namespace resolved XML element.
///
/// This is the decoded form handed to extension decoders. Namespace
/// declarations are kept apart from the attributes so that the element
/// can be written back exactly as it was declared.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Element {
    name: Name,
    prefix: Option<String>,
    declarations: Vec<(Option<String>, String)>,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    pub(crate) fn from_parts(
        name: Name,
        prefix: Option<String>,
        declarations: Vec<(Option<String>, String)>,
        attributes: Vec<Attribute>,
    ) -> Self {
        Element {
            name,
            prefix,
            declarations,
            attributes,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The tag name as it appeared in the document, with the prefix.
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name.local),
            None => self.name.local.clone(),
        }
    }

    pub fn is(&self, local: &str, namespace: &str) -> bool {
        self.name.is(local, namespace)
    }

    /// Value of an unprefixed attribute.
    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attribute_ns("", local)
    }

    pub fn attribute_ns(&self, namespace: &str, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.is(local, namespace))
            .map(|attr| attr.value.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    pub fn find_child(&self, local: &str, namespace: &str) -> Option<&Element> {
        self.child_elements().find(|child| child.is(local, namespace))
    }

    /// Character data directly under this element, concatenated.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for node in &self.children {
            if let Node::Text(cdata) = node {
                text.push_str(cdata);
            }
        }
        text
    }

    pub(crate) fn push_child(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    pub(crate) fn push_text(&mut self, cdata: &str) {
        if let Some(Node::Text(text)) = self.children.last_mut() {
            text.push_str(cdata);
        } else {
            self.children.push(Node::Text(cdata.to_string()));
        }
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = self.qualified_name();
        write!(f, "<{tag}")?;
        for (prefix, uri) in &self.declarations {
            match prefix {
                Some(prefix) => write!(f, " xmlns:{prefix}=\"")?,
                None => f.write_str(" xmlns=\"")?,
            }
            escape_fmt(uri, f)?;
            f.write_str("\"")?;
        }
        for attr in &self.attributes {
            match &attr.prefix {
                Some(prefix) => write!(f, " {}:{}=\"", prefix, attr.name.local)?,
                None => write!(f, " {}=\"", attr.name.local)?,
            }
            escape_fmt(&attr.value, f)?;
            f.write_str("\"")?;
        }
        if self.children.is_empty() {
            return f.write_str("/>");
        }
        f.write_str(">")?;
        for node in &self.children {
            match node {
                Node::Element(element) => element.fmt(f)?,
                Node::Text(text) => escape_fmt(text, f)?,
            }
        }
        write!(f, "</{tag}>")
    }
}

impl FromStr for Element {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = ElementParser::new();
        parser.parse_bytes(s.as_bytes())?;
        parser.into_element()
    }
}
