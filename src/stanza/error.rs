/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::error::Error;
use std::fmt::Display;

use crate::BadJid;
use crate::DecodeError;
use crate::ProtocolError;
use crate::SaxError;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum StanzaError {
    /// Root element is not `iq`, `message` or `presence`.
    Unrecognized(String),
    /// Malformed or truncated XML, or a rejected extension payload.
    Decode(DecodeError),
    /// The peer answered with an `<error/>` element.
    Protocol(ProtocolError),
    /// An address attribute is not a valid JID.
    Format(BadJid),
}

impl Display for StanzaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StanzaError::Unrecognized(name) => {
                write!(f, "not iq, message, or presence: {name}")
            }
            StanzaError::Decode(err) => err.fmt(f),
            StanzaError::Protocol(err) => write!(f, "protocol error: {err}"),
            StanzaError::Format(err) => err.fmt(f),
        }
    }
}

impl Error for StanzaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StanzaError::Unrecognized(_) => None,
            StanzaError::Decode(err) => Some(err),
            StanzaError::Protocol(err) => Some(err),
            StanzaError::Format(err) => Some(err),
        }
    }
}

impl From<SaxError> for StanzaError {
    fn from(err: SaxError) -> Self {
        StanzaError::Decode(err.into())
    }
}

impl From<DecodeError> for StanzaError {
    fn from(err: DecodeError) -> Self {
        StanzaError::Decode(err)
    }
}

impl From<ProtocolError> for StanzaError {
    fn from(err: ProtocolError) -> Self {
        StanzaError::Protocol(err)
    }
}

impl From<BadJid> for StanzaError {
    fn from(err: BadJid) -> Self {
        StanzaError::Format(err)
    }
}
