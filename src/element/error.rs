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

use crate::SaxError;

/// Failure to turn input bytes into a structured value.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum DecodeError {
    /// Buffers for the parsed document could not be allocated.
    NoMemory,
    /// The input is malformed, truncated, or not namespace well-formed XML.
    BadXml(&'static str),
    /// The XML is fine but a payload decoder rejected its content.
    BadPayload(&'static str),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::NoMemory => write!(f, "not enough memory"),
            DecodeError::BadXml(msg) => write!(f, "invalid XML syntax: {msg}"),
            DecodeError::BadPayload(msg) => write!(f, "invalid payload: {msg}"),
        }
    }
}

impl Error for DecodeError {}

impl From<SaxError> for DecodeError {
    fn from(err: SaxError) -> Self {
        match err {
            SaxError::NoMemory => DecodeError::NoMemory,
            SaxError::BadXml(msg) => DecodeError::BadXml(msg),
            SaxError::HandlerAbort => DecodeError::BadXml(description::UNEXPECTED_HANDLER_ABORT),
        }
    }
}

pub(crate) mod description {
    pub(super) const UNEXPECTED_HANDLER_ABORT: &str = "unexpected handler abort";
    pub(in crate::element) const NO_ROOT: &str = "document has no root element";
    pub(in crate::element) const TAG_MISMATCH: &str = "start and end tags have different names";
    pub(in crate::element) const DUPLICATE_ATTRIBUTE: &str =
        "attribute name already used in this tag";
    pub(in crate::element) const UNBOUND_PREFIX: &str = "namespace prefix is not declared";
    pub(in crate::element) const BAD_QNAME: &str = "qualified name has an empty prefix or local part";
    pub(in crate::element) const INCOMPLETE_START_TAG: &str = "start tag is not complete";
}
