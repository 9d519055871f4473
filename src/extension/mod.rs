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
use std::collections::HashMap;
use std::fmt::Debug;

use log::debug;

use crate::DecodeError;
use crate::Element;
use crate::Name;

/// A payload type for elements in a namespace the stanza model does not
/// know about.
///
/// Values are created empty by a registered [ExtensionFactory], and then
/// filled from the element with [decode](Extension::decode).
pub trait Extension: Any + Debug + Send + Sync {
    fn decode(&mut self, element: &Element) -> Result<(), DecodeError>;

    /// Writes the value back as a complete XML element.
    fn encode(&self, out: &mut String);

    fn as_any(&self) -> &dyn Any;
}

impl dyn Extension {
    pub fn downcast_ref<T: Extension>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Extension>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// Creates an empty extension value for an element with the given name.
pub type ExtensionFactory = fn(&Name) -> Box<dyn Extension>;

/// A decoded extension value attached to a stanza.
#[derive(Debug)]
pub struct Nested {
    /// Namespace the value was registered under.
    pub namespace: String,
    pub value: Box<dyn Extension>,
}

impl Nested {
    pub fn new(namespace: &str, value: Box<dyn Extension>) -> Nested {
        Nested {
            namespace: namespace.to_string(),
            value,
        }
    }

    pub fn downcast_ref<T: Extension>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

/// Table of extension factories keyed by namespace URI.
///
/// Build the registry once at startup and share it by reference with every
/// parse call. Registration takes `&mut self`, so a registry that is in
/// use by parsers cannot change under them.
///
/// ```
/// use iks_stanza::{ExtensionRegistry, Stanza};
///
/// let registry = ExtensionRegistry::with_defaults();
/// let stanza = Stanza::parse(
///     b"<iq type='set' id='b1'><bind xmlns='urn:ietf:params:xml:ns:xmpp-bind'/></iq>",
///     &registry,
/// )?;
/// assert_eq!(stanza.nested().len(), 1);
/// # Ok::<(), iks_stanza::StanzaError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExtensionRegistry {
    factories: HashMap<String, ExtensionFactory>,
}

impl ExtensionRegistry {
    /// An empty registry. Every extension element is left as raw content.
    pub fn new() -> ExtensionRegistry {
        ExtensionRegistry::default()
    }

    /// A registry with the payloads this crate provides.
    ///
    /// With the `negotiation` feature this is the resource binding payload.
    pub fn with_defaults() -> ExtensionRegistry {
        #[allow(unused_mut)]
        let mut registry = ExtensionRegistry::new();
        #[cfg(feature = "negotiation")]
        registry.register(crate::constants::NS_BIND, crate::negotiation::Bind::factory);
        registry
    }

    /// Adds a factory for a namespace, returning the one it replaces.
    pub fn register(
        &mut self,
        namespace: &str,
        factory: ExtensionFactory,
    ) -> Option<ExtensionFactory> {
        self.factories.insert(namespace.to_string(), factory)
    }

    pub fn is_registered(&self, namespace: &str) -> bool {
        self.factories.contains_key(namespace)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Decodes an element with the factory registered for its namespace.
    ///
    /// Returns `Ok(None)` when no factory is registered.
    pub fn decode(&self, element: &Element) -> Result<Option<Nested>, DecodeError> {
        let namespace = &element.name().namespace;
        let Some(factory) = self.factories.get(namespace) else {
            return Ok(None);
        };
        debug!("decoding extension element {}", element.name());
        let mut value = factory(element.name());
        value.decode(element)?;
        Ok(Some(Nested::new(namespace, value)))
    }
}

#[cfg(test)]
mod tests;
