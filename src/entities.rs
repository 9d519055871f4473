/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

pub mod predefined {
    pub const LT: &str = "&lt;";
    pub const GT: &str = "&gt;";
    pub const AMP: &str = "&amp;";
    pub const APOS: &str = "&apos;";
    pub const QUOT: &str = "&quot;";
}

fn replacement(c: char) -> Option<&'static str> {
    match c {
        '<' => Some(predefined::LT),
        '>' => Some(predefined::GT),
        '&' => Some(predefined::AMP),
        '\'' => Some(predefined::APOS),
        '"' => Some(predefined::QUOT),
        _ => None,
    }
}

pub fn escape(s: &str, buf: &mut String) {
    let mut back = 0;
    for (pos, c) in s.char_indices() {
        if let Some(entity) = replacement(c) {
            buf.push_str(&s[back..pos]);
            buf.push_str(entity);
            back = pos + 1;
        }
    }
    buf.push_str(&s[back..]);
}

pub fn escape_fmt(s: &str, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut back = 0;
    for (pos, c) in s.char_indices() {
        if let Some(entity) = replacement(c) {
            f.write_str(&s[back..pos])?;
            f.write_str(entity)?;
            back = pos + 1;
        }
    }
    f.write_str(&s[back..])
}
