/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

pub const STREAM_TAG: &str = "stream:stream";

pub const NS_CLIENT: &str = "jabber:client";

pub const NS_SERVER: &str = "jabber:server";

pub const NS_STREAM: &str = "http://etherx.jabber.org/streams";

pub const NS_XML: &str = "http://www.w3.org/XML/1998/namespace";

pub const NS_TLS: &str = "urn:ietf:params:xml:ns:xmpp-tls";

pub const NS_SASL: &str = "urn:ietf:params:xml:ns:xmpp-sasl";

pub const NS_BIND: &str = "urn:ietf:params:xml:ns:xmpp-bind";

pub const NS_SESSION: &str = "urn:ietf:params:xml:ns:xmpp-session";

pub const NS_STREAMS: &str = "urn:ietf:params:xml:ns:xmpp-streams";

pub const NS_STANZAS: &str = "urn:ietf:params:xml:ns:xmpp-stanzas";

/// True for the namespaces stanza content lives in.
///
/// Standalone stanza documents carry no namespace at all, while inside a
/// stream they inherit the default namespace of the stream header.
pub fn is_content_namespace(namespace: &str) -> bool {
    namespace.is_empty() || namespace == NS_CLIENT || namespace == NS_SERVER
}
