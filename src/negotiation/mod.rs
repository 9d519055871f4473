/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

//! Elements exchanged while a stream is set up, before any stanza.

mod auth;
mod bind;
mod features;
mod stream_error;

pub use auth::Auth;
pub use bind::Bind;
pub use features::Features;
pub use features::StartTls;
pub use stream_error::ErrorText;
pub use stream_error::StreamError;

use crate::DecodeError;
use crate::Element;
use crate::ElementParser;

mod description {
    pub(super) const NOT_FEATURES: &str = "element is not stream:features";
    pub(super) const NOT_AUTH: &str = "element is not a SASL auth";
    pub(super) const NOT_BIND: &str = "element is not a resource bind";
    pub(super) const NOT_STREAM_ERROR: &str = "element is not stream:error";
    pub(super) const BAD_BASE64: &str = "SASL data is not valid base64";
}

fn check_name(
    element: &Element,
    local: &str,
    namespace: &str,
    err: &'static str,
) -> Result<(), DecodeError> {
    if element.is(local, namespace) {
        Ok(())
    } else {
        Err(DecodeError::BadPayload(err))
    }
}

// Stream level elements use the `stream` prefix declared on the header.
fn parse_in_stream(bytes: &[u8]) -> Result<Element, DecodeError> {
    let mut parser = ElementParser::in_stream();
    parser.parse_bytes(bytes)?;
    parser.into_element()
}

#[cfg(test)]
mod tests;
