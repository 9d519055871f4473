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

use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64;

use crate::DecodeError;
use crate::Element;
use crate::constants::NS_SASL;
use crate::entities::escape;

use super::check_name;
use super::description;

// An initial response of zero length is sent as a single equals sign.
const EMPTY_RESPONSE: &str = "=";

/// The SASL `<auth/>` element which starts authentication.
///
/// ```
/// use iks_stanza::negotiation::Auth;
///
/// let auth = Auth::plain(None, "juliet", "r0m30");
/// assert_eq!(auth.mechanism, "PLAIN");
/// assert_eq!(auth.initial_response()?, b"\0juliet\0r0m30");
/// # Ok::<(), iks_stanza::DecodeError>(())
/// ```
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Auth {
    pub mechanism: String,
    /// Base64 encoded initial response, as it appears in the element.
    pub data: String,
}

impl Auth {
    pub fn new(mechanism: &str) -> Auth {
        Auth {
            mechanism: mechanism.to_string(),
            data: String::new(),
        }
    }

    pub fn with_initial_response(mechanism: &str, response: &[u8]) -> Auth {
        let data = if response.is_empty() {
            EMPTY_RESPONSE.to_string()
        } else {
            Base64.encode(response)
        };
        Auth {
            mechanism: mechanism.to_string(),
            data,
        }
    }

    /// The PLAIN mechanism from RFC 4616.
    pub fn plain(authzid: Option<&str>, username: &str, password: &str) -> Auth {
        let authzid = authzid.unwrap_or_default();
        let mut message = Vec::with_capacity(authzid.len() + username.len() + password.len() + 2);
        message.extend_from_slice(authzid.as_bytes());
        message.push(0);
        message.extend_from_slice(username.as_bytes());
        message.push(0);
        message.extend_from_slice(password.as_bytes());
        Auth::with_initial_response("PLAIN", &message)
    }

    pub fn initial_response(&self) -> Result<Vec<u8>, DecodeError> {
        let data = self.data.trim();
        if data.is_empty() || data == EMPTY_RESPONSE {
            return Ok(Vec::new());
        }
        Base64
            .decode(data)
            .map_err(|_| DecodeError::BadPayload(description::BAD_BASE64))
    }

    pub fn from_element(element: &Element) -> Result<Auth, DecodeError> {
        check_name(element, "auth", NS_SASL, description::NOT_AUTH)?;
        Ok(Auth {
            mechanism: element.attribute("mechanism").unwrap_or_default().to_string(),
            data: element.text(),
        })
    }

    pub fn encode(&self, out: &mut String) {
        out.push_str("<auth xmlns=\"");
        out.push_str(NS_SASL);
        out.push('"');
        if !self.mechanism.is_empty() {
            out.push_str(" mechanism=\"");
            escape(&self.mechanism, out);
            out.push('"');
        }
        if self.data.is_empty() {
            out.push_str("/>");
        } else {
            out.push('>');
            escape(&self.data, out);
            out.push_str("</auth>");
        }
    }
}

impl Display for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut xml = String::new();
        self.encode(&mut xml);
        f.write_str(&xml)
    }
}
