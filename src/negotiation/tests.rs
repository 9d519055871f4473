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
use crate::Extension;
use crate::ExtensionRegistry;
use crate::Iq;
use crate::Jid;
use crate::Stanza;
use crate::constants::*;

const FEATURES: &str = "<stream:features>\
    <starttls xmlns='urn:ietf:params:xml:ns:xmpp-tls'><required/></starttls>\
    <mechanisms xmlns='urn:ietf:params:xml:ns:xmpp-sasl'>\
    <mechanism>SCRAM-SHA-1</mechanism><mechanism>PLAIN</mechanism></mechanisms>\
    <bind xmlns='urn:ietf:params:xml:ns:xmpp-bind'/>\
    <session xmlns='urn:ietf:params:xml:ns:xmpp-session'/>\
    <sm xmlns='urn:xmpp:sm:3'/><csi xmlns='urn:xmpp:csi:0'/>\
    </stream:features>";

#[test]
fn features() {
    let features = Features::from_bytes(FEATURES.as_bytes()).unwrap();
    assert_eq!(features.starttls, Some(StartTls { required: true }));
    assert_eq!(features.mechanisms, vec!["SCRAM-SHA-1", "PLAIN"]);
    assert!(features.has_mechanism("PLAIN"));
    assert!(!features.has_mechanism("EXTERNAL"));
    assert_eq!(features.bind, Some(Bind::default()));
    assert!(features.session.as_ref().unwrap().name.is("session", NS_SESSION));
    // Only the first unknown feature is kept
    assert!(features.any.as_ref().unwrap().name.is("sm", "urn:xmpp:sm:3"));

    let again = Features::from_bytes(features.to_string().as_bytes()).unwrap();
    assert_eq!(again, features);

    assert_eq!(
        Features::from_bytes(b"<features/>").unwrap_err(),
        DecodeError::BadPayload(description::NOT_FEATURES)
    );
}

#[test]
fn features_encode() {
    let features = Features {
        starttls: Some(StartTls { required: false }),
        mechanisms: vec!["PLAIN".to_string()],
        ..Default::default()
    };
    assert_eq!(
        features.to_string(),
        "<stream:features><starttls xmlns=\"urn:ietf:params:xml:ns:xmpp-tls\"/>\
         <mechanisms xmlns=\"urn:ietf:params:xml:ns:xmpp-sasl\">\
         <mechanism>PLAIN</mechanism></mechanisms></stream:features>"
    );
    assert_eq!(
        Features::default().to_string(),
        "<stream:features></stream:features>"
    );
}

#[test]
fn auth() {
    let auth = Auth::plain(None, "juliet", "r0m30");
    assert_eq!(auth.data, "AGp1bGlldAByMG0zMA==");
    assert_eq!(
        auth.to_string(),
        "<auth xmlns=\"urn:ietf:params:xml:ns:xmpp-sasl\" mechanism=\"PLAIN\">AGp1bGlldAByMG0zMA==</auth>"
    );

    let elem: Element = auth.to_string().parse().unwrap();
    let decoded = Auth::from_element(&elem).unwrap();
    assert_eq!(decoded, auth);
    assert_eq!(decoded.initial_response().unwrap(), b"\0juliet\0r0m30");

    let auth = Auth::with_initial_response("EXTERNAL", b"");
    assert_eq!(auth.data, "=");
    assert!(auth.initial_response().unwrap().is_empty());

    let auth = Auth::new("ANONYMOUS");
    assert_eq!(
        auth.to_string(),
        "<auth xmlns=\"urn:ietf:params:xml:ns:xmpp-sasl\" mechanism=\"ANONYMOUS\"/>"
    );
    assert!(auth.initial_response().unwrap().is_empty());

    let auth = Auth {
        mechanism: "PLAIN".to_string(),
        data: "not base64!".to_string(),
    };
    assert_eq!(
        auth.initial_response().unwrap_err(),
        DecodeError::BadPayload(description::BAD_BASE64)
    );

    let elem: Element = "<auth/>".parse().unwrap();
    assert_eq!(
        Auth::from_element(&elem).unwrap_err(),
        DecodeError::BadPayload(description::NOT_AUTH)
    );
}

#[test]
fn bind() {
    let elem: Element = "<bind xmlns='urn:ietf:params:xml:ns:xmpp-bind'>\
                         <jid>juliet@example.com/balcony</jid></bind>"
        .parse()
        .unwrap();
    let bind = Bind::from_element(&elem).unwrap();
    assert_eq!(bind.resource, None);
    assert_eq!(
        bind.jid().unwrap(),
        Some(Jid::new("juliet@example.com/balcony").unwrap())
    );

    let mut xml = String::new();
    Bind::request(Some("balcony")).encode(&mut xml);
    assert_eq!(
        xml,
        "<bind xmlns=\"urn:ietf:params:xml:ns:xmpp-bind\"><resource>balcony</resource></bind>"
    );

    let bad = Bind {
        jid: Some("a@b@c".to_string()),
        ..Default::default()
    };
    assert!(bad.jid().is_err());
}

#[test]
fn bind_in_stanza() {
    let registry = ExtensionRegistry::with_defaults();
    let stanza = Stanza::parse(
        b"<iq type='result' id='bind_1'><bind xmlns='urn:ietf:params:xml:ns:xmpp-bind'>\
          <jid>juliet@example.com/4db06f06</jid></bind></iq>",
        &registry,
    )
    .unwrap();
    let bind = stanza.find_nested::<Bind>().unwrap();
    assert_eq!(bind.jid.as_deref(), Some("juliet@example.com/4db06f06"));

    let iq: Stanza = Iq::new("set", "bind_2")
        .with_payload(NS_BIND, Bind::request(Some("balcony")))
        .into();
    assert_eq!(
        iq.to_string(),
        "<iq id=\"bind_2\" type=\"set\"><bind xmlns=\"urn:ietf:params:xml:ns:xmpp-bind\">\
         <resource>balcony</resource></bind></iq>"
    );
}

#[test]
fn stream_error() {
    let err = StreamError::from_bytes(
        b"<stream:error><host-unknown xmlns='urn:ietf:params:xml:ns:xmpp-streams'/>\
          <text xmlns='urn:ietf:params:xml:ns:xmpp-streams' xml:lang='en'>No such host</text>\
          </stream:error>",
    )
    .unwrap();
    assert_eq!(err.condition(), Some("host-unknown"));
    let text = err.text.as_ref().unwrap();
    assert_eq!(text.lang.as_deref(), Some("en"));
    assert_eq!(text.text, "No such host");
    assert_eq!(err.to_string(), "stream error: host-unknown (No such host)");

    let mut xml = String::new();
    err.encode(&mut xml);
    assert_eq!(StreamError::from_bytes(xml.as_bytes()).unwrap(), err);

    let mut xml = String::new();
    StreamError::new("conflict").encode(&mut xml);
    assert_eq!(
        xml,
        "<stream:error><conflict xmlns=\"urn:ietf:params:xml:ns:xmpp-streams\"/></stream:error>"
    );

    assert_eq!(
        StreamError::from_bytes(b"<error/>").unwrap_err(),
        DecodeError::BadPayload(description::NOT_STREAM_ERROR)
    );
}
