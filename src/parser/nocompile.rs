/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// # Must not compile tests
///
/// Element passed to the handler cannot be kept after the call:
/// ```compile_fail
/// use iks_stanza::{Location, SaxElement, SaxError, SaxHandler, SaxParser};
/// struct Keeper<'a> { last: Option<&'a SaxElement<'a>> }
/// impl<'a> SaxHandler for Keeper<'a> {
///     fn handle_element(&mut self, element: &SaxElement, _: Location) -> Result<(), SaxError> {
///         self.last = Some(element);
///         Ok(())
///     }
/// }
/// ```
///
/// Tag names passed to the handler borrow the parser buffers:
/// ```compile_fail
/// use iks_stanza::{Location, SaxElement, SaxError, SaxHandler, SaxParser};
/// struct Names<'a> { names: Vec<&'a str> }
/// impl<'a> SaxHandler for Names<'a> {
///     fn handle_element(&mut self, element: &SaxElement, _: Location) -> Result<(), SaxError> {
///         if let SaxElement::StartTag(name) = element {
///             self.names.push(name);
///         }
///         Ok(())
///     }
/// }
/// ```
///
#[cfg(doctest)]
struct MustNotCompileTests;
