/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::*;

const NS_PING: &str = "urn:xmpp:ping";

#[derive(Debug, Default)]
struct Ping {
    local: String,
}

impl Ping {
    fn factory(name: &Name) -> Box<dyn Extension> {
        Box::new(Ping {
            local: name.local.clone(),
        })
    }
}

impl Extension for Ping {
    fn decode(&mut self, element: &Element) -> Result<(), DecodeError> {
        if element.child_elements().next().is_some() {
            return Err(DecodeError::BadPayload("ping has no children"));
        }
        Ok(())
    }

    fn encode(&self, out: &mut String) {
        out.push_str("<ping xmlns=\"urn:xmpp:ping\"/>");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct Other;

impl Extension for Other {
    fn decode(&mut self, _element: &Element) -> Result<(), DecodeError> {
        Ok(())
    }

    fn encode(&self, _out: &mut String) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn register() {
    let mut registry = ExtensionRegistry::new();
    assert!(!registry.is_registered(NS_PING));
    assert!(registry.register(NS_PING, Ping::factory).is_none());
    assert!(registry.is_registered(NS_PING));
    assert!(registry.register(NS_PING, Ping::factory).is_some());
    assert_eq!(registry.namespaces().collect::<Vec<_>>(), vec![NS_PING]);
}

#[test]
fn decode() {
    let mut registry = ExtensionRegistry::new();
    registry.register(NS_PING, Ping::factory);

    let elem: Element = "<ping xmlns='urn:xmpp:ping'/>".parse().unwrap();
    let nested = registry.decode(&elem).unwrap().unwrap();
    assert_eq!(nested.namespace, NS_PING);
    assert!(nested.value.is::<Ping>());
    assert!(!nested.value.is::<Other>());
    assert_eq!(nested.downcast_ref::<Ping>().unwrap().local, "ping");

    let mut xml = String::new();
    nested.value.encode(&mut xml);
    assert_eq!(xml, "<ping xmlns=\"urn:xmpp:ping\"/>");

    let elem: Element = "<ping xmlns='urn:xmpp:ping'><x/></ping>".parse().unwrap();
    assert_eq!(
        registry.decode(&elem).unwrap_err(),
        DecodeError::BadPayload("ping has no children")
    );

    let elem: Element = "<query xmlns='jabber:iq:version'/>".parse().unwrap();
    assert!(registry.decode(&elem).unwrap().is_none());
}

#[test]
fn defaults() {
    let registry = ExtensionRegistry::with_defaults();
    #[cfg(feature = "negotiation")]
    assert!(registry.is_registered(crate::constants::NS_BIND));
    #[cfg(not(feature = "negotiation"))]
    assert!(registry.namespaces().next().is_none());
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn shareable_between_threads() {
    assert_send_sync::<ExtensionRegistry>();
    assert_send_sync::<Nested>();
    assert_send_sync::<crate::Stanza>();

    let mut registry = ExtensionRegistry::new();
    registry.register(NS_PING, Ping::factory);
    let elem: Element = "<ping xmlns='urn:xmpp:ping'/>".parse().unwrap();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert!(registry.decode(&elem).unwrap().is_some());
            });
        }
    });
}
