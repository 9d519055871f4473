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

const OPEN: &str = "<stream:stream xmlns=\"jabber:client\" \
                    xmlns:stream=\"http://etherx.jabber.org/streams\"";

fn check_header(header: &StreamHeader, attributes: &str) {
    let expected = format!("{OPEN}{attributes}>");
    assert_eq!(header.to_string(), expected);
    assert!(!expected.contains("</stream:stream>"));
}

#[test]
fn encode() {
    let header = StreamHeader {
        to: Some("a".to_string()),
        id: Some("1".to_string()),
        ..Default::default()
    };
    check_header(&header, " to=\"a\" id=\"1\"");

    let header = StreamHeader {
        to: Some("example.com".to_string()),
        from: Some("juliet@example.com".to_string()),
        id: Some("x<y".to_string()),
        lang: Some("en".to_string()),
        version: Some("1.0".to_string()),
    };
    check_header(
        &header,
        " to=\"example.com\" from=\"juliet@example.com\" id=\"x&lt;y\" xml:lang=\"en\" version=\"1.0\"",
    );

    // Empty values are never written
    let header = StreamHeader {
        from: Some(String::new()),
        ..Default::default()
    };
    check_header(&header, "");

    let mut xml = String::new();
    StreamHeader::client("example.com").encode_document_start(&mut xml);
    assert_eq!(
        xml,
        format!("<?xml version='1.0'?>{OPEN} to=\"example.com\" version=\"1.0\">")
    );
}

#[test]
fn decode() {
    let header = StreamHeader::from_bytes(
        b"<?xml version='1.0'?><stream:stream xmlns='jabber:client' \
          xmlns:stream='http://etherx.jabber.org/streams' from='example.com' \
          id='abc' xml:lang='tr' version='1.0' foo='bar'><stream:features>",
    )
    .unwrap();
    assert_eq!(
        header,
        StreamHeader {
            to: None,
            from: Some("example.com".to_string()),
            id: Some("abc".to_string()),
            lang: Some("tr".to_string()),
            version: Some("1.0".to_string()),
        }
    );
    assert_eq!(header.id(), "abc");
}

#[test]
fn decode_is_lenient() {
    // Attribute names are matched without case, empty values are dropped
    let header =
        StreamHeader::from_bytes(b"<stream:stream TO='a' Version='' ID='7' lang='en'>").unwrap();
    assert_eq!(header.to.as_deref(), Some("a"));
    assert_eq!(header.version, None);
    assert_eq!(header.id(), "7");
    assert_eq!(header.lang.as_deref(), Some("en"));

    let header = StreamHeader::from_bytes(b"<something/>").unwrap();
    assert_eq!(header, StreamHeader::default());
    assert_eq!(header.id(), "");

    assert!(StreamHeader::from_bytes(b"<stream:stream to='a").is_err());
}

#[test]
fn round_trip() {
    let header = StreamHeader {
        to: Some("example.com".to_string()),
        from: Some("juliet@example.com/balcony".to_string()),
        id: Some("++TR84Sm6A3hnt3Q065SnAbbk3Y=".to_string()),
        lang: Some("en".to_string()),
        version: Some("1.0".to_string()),
    };
    let decoded = StreamHeader::from_bytes(header.to_string().as_bytes()).unwrap();
    assert_eq!(decoded, header);
}
