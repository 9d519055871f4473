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

use crate::DecodeError;
use crate::Element;
use crate::Generic;
use crate::constants::NS_STREAM;
use crate::constants::NS_STREAMS;
use crate::constants::NS_XML;
use crate::entities::escape;

use super::check_name;
use super::description;
use super::parse_in_stream;

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ErrorText {
    pub lang: Option<String>,
    pub text: String,
}

/// A `<stream:error/>`, after which the stream is closed.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct StreamError {
    /// The defined condition, like `host-unknown`.
    pub condition: Option<Generic>,
    pub text: Option<ErrorText>,
}

impl StreamError {
    pub fn new(condition: &str) -> StreamError {
        StreamError {
            condition: Some(Generic::new(NS_STREAMS, condition)),
            text: None,
        }
    }

    pub fn from_element(element: &Element) -> Result<StreamError, DecodeError> {
        check_name(element, "error", NS_STREAM, description::NOT_STREAM_ERROR)?;
        let mut stream_error = StreamError::default();
        for child in element.child_elements() {
            if child.is("text", NS_STREAMS) {
                stream_error.text = Some(ErrorText {
                    lang: child.attribute_ns(NS_XML, "lang").map(str::to_string),
                    text: child.text(),
                });
            } else if stream_error.condition.is_none() {
                stream_error.condition = Some(Generic::from_element(child));
            }
        }
        Ok(stream_error)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<StreamError, DecodeError> {
        StreamError::from_element(&parse_in_stream(bytes)?)
    }

    pub fn condition(&self) -> Option<&str> {
        self.condition
            .as_ref()
            .map(|generic| generic.name.local.as_str())
    }

    pub fn encode(&self, out: &mut String) {
        out.push_str("<stream:error>");
        if let Some(condition) = &self.condition {
            condition.encode(NS_STREAM, out);
        }
        if let Some(text) = &self.text {
            out.push_str("<text xmlns=\"");
            out.push_str(NS_STREAMS);
            out.push('"');
            if let Some(lang) = text.lang.as_deref().filter(|lang| !lang.is_empty()) {
                out.push_str(" xml:lang=\"");
                escape(lang, out);
                out.push('"');
            }
            out.push('>');
            escape(&text.text, out);
            out.push_str("</text>");
        }
        out.push_str("</stream:error>");
    }
}

impl Display for StreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stream error: {}", self.condition().unwrap_or("undefined"))?;
        if let Some(text) = &self.text {
            write!(f, " ({})", text.text)?;
        }
        Ok(())
    }
}

impl Error for StreamError {}
