/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// Type of the error which happened during the XML SAX parsing.
///
/// These categories are designed to be as few as possible and correspond to the distinct
/// actions the caller might take based on the problem. Location of the error is available
/// via the [location()](super::SaxParser::location) method.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum SaxError {
    /// Parser could not allocate the memory needed for parsing buffers.
    NoMemory,

    /// A syntax error is encountered in the XML input.
    ///
    /// The argument describes the actual syntax issue.
    BadXml(&'static str),

    /// Element handler function aborted the processing.
    ///
    /// This is intended for caller's handler to be able to stop the parser
    /// without the interruption being reported as a syntax problem.
    HandlerAbort,
}

impl std::fmt::Display for SaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaxError::NoMemory => write!(f, "not enough memory"),
            SaxError::BadXml(msg) => write!(f, "invalid xml syntax: {msg}"),
            SaxError::HandlerAbort => write!(f, "aborted by sax handler"),
        }
    }
}

impl std::error::Error for SaxError {}

pub(super) mod description {
    pub(in super::super) const PARSER_REUSE_WITHOUT_RESET: &str =
        "cannot continue after an error without a reset";
    pub(in super::super) const UTF8_INVALID_CONT_BYTE: &str = "Invalid UTF8 continuation byte";
    pub(in super::super) const UTF8_OVERLONG_SEQUENCE: &str = "Overlong UTF8 sequence";
    pub(in super::super) const UTF8_INVALID_PREFIX_BYTE: &str = "Invalid UTF8 prefix byte";
    pub(in super::super) const CHAR_INVALID: &str = "Invalid XML character";
    pub(in super::super) const DOC_NO_CONTENT: &str = "Document has no root tag";
    pub(in super::super) const DOC_OPEN_TAGS: &str = "Document has unclosed tags";
    pub(in super::super) const DOC_OPEN_MARKUP: &str =
        "Document epilog has unclosed PI or comment tag";
    pub(in super::super) const DOC_CDATA_WITHOUT_PARENT: &str =
        "Character data not allowed outside of the root tag";
    pub(in super::super) const TAG_CLOSE_WITHOUT_OPEN: &str = "Close tag without open";
    pub(in super::super) const TAG_WHITESPACE_START: &str = "Tag cannot start with whitespace";
    pub(in super::super) const TAG_OUTSIDE_ROOT: &str = "Tags cannot be outside of the root tag";
    pub(in super::super) const TAG_EMPTY_NAME: &str = "Tag has no name";
    pub(in super::super) const TAG_DOUBLE_END: &str = "End tag has standalone ending too";
    pub(in super::super) const TAG_END_TAG_ATTRIBUTES: &str = "End tag cannot have attributes";
    pub(in super::super) const TAG_EMPTY_TAG_MISSING_END: &str =
        "Empty element tags must end after the '/'";
    pub(in super::super) const TAG_ATTRIBUTE_WITHOUT_EQUAL: &str =
        "Tag attributes must have '=' before the value";
    pub(in super::super) const TAG_ATTRIBUTE_WITHOUT_QUOTE: &str =
        "Tag attribute value must be double or single quotes";
    pub(in super::super) const TAG_ATTRIBUTE_BAD_NAME: &str =
        "Tag attribute names cannot have '/', '<' or '>'";
    pub(in super::super) const TAG_ATTRIBUTE_BAD_VALUE: &str =
        "Tag value cannot have '<' character without a reference";
    pub(in super::super) const REFERENCE_INVALID_DECIMAL: &str =
        "Non digit in decimal character refence";
    pub(in super::super) const REFERENCE_INVALID_HEX: &str =
        "Non hex digit in hexadecimal character refence";
    pub(in super::super) const REFERENCE_CUSTOM_ENTITY: &str =
        "Non-predefined entity references are not supported";
    pub(in super::super) const COMMENT_MISSING_DASH: &str =
        "Comment tag should start with double dash";
    pub(in super::super) const COMMENT_MISSING_END: &str =
        "Comment tag should end after double dash";
    pub(in super::super) const MARKUP_CDATA_SECTION_BAD_START: &str =
        "Character data sections must start with '[CDATA['";
    pub(in super::super) const MARKUP_DOCTYPE_FORBIDDEN: &str =
        "Document type declarations are not allowed in XMPP";
    pub(in super::super) const MARKUP_CDATA_SECTION_OUTSIDE_ROOT: &str =
        "Character data sections cannot be outside of the root tag";
    pub(in super::super) const MARKUP_UNRECOGNIZED: &str =
        "Markup is not a comment or character data section";
    pub(in super::super) const PI_MISSING_END: &str =
        "Processing instruction must end after closing the '?'";
}
