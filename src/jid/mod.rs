/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod error;

use std::fmt::Display;
use std::hash::Hash;
use std::hash::Hasher;
use std::num::NonZero;
use std::str::FromStr;

pub use error::BadJid;
use error::description;

const MAX_PART_LEN: usize = 1023;

struct PartRules {
    empty: &'static str,
    too_long: &'static str,
    separator: &'static str,
}

const LOCAL: PartRules = PartRules {
    empty: description::LOCAL_EMPTY,
    too_long: description::LOCAL_TOO_LONG,
    separator: description::LOCAL_SEPARATOR,
};

const DOMAIN: PartRules = PartRules {
    empty: description::DOMAIN_EMPTY,
    too_long: description::DOMAIN_TOO_LONG,
    separator: description::DOMAIN_SEPARATOR,
};

const RESOURCE: PartRules = PartRules {
    empty: description::RESOURCE_EMPTY,
    too_long: description::RESOURCE_TOO_LONG,
    separator: description::RESOURCE_SEPARATOR,
};

fn check_part<'a>(part: &'a str, rules: &PartRules) -> Result<&'a str, BadJid> {
    if part.is_empty() {
        return Err(BadJid(rules.empty));
    }
    if part.len() > MAX_PART_LEN {
        return Err(BadJid(rules.too_long));
    }
    if part.contains(['@', '/']) {
        return Err(BadJid(rules.separator));
    }
    Ok(part)
}

struct JidParts<'a> {
    local: Option<&'a str>,
    domain: &'a str,
    resource: Option<&'a str>,
}

impl<'a> JidParts<'a> {
    fn split(jid: &'a str) -> Result<JidParts<'a>, BadJid> {
        let (bare, resource) = match jid.split_once('/') {
            Some((bare, resource)) => (bare, Some(resource)),
            None => (jid, None),
        };
        let (local, domain) = match bare.split_once('@') {
            Some((local, domain)) => (Some(local), domain),
            None => (None, bare),
        };
        JidParts::checked(local, domain, resource)
    }

    fn checked(
        local: Option<&'a str>,
        domain: &'a str,
        resource: Option<&'a str>,
    ) -> Result<JidParts<'a>, BadJid> {
        // Domain is checked first so that an empty input reports the
        // missing domain rather than any other problem.
        let domain = check_part(domain, &DOMAIN)?;
        let local = local.map(|part| check_part(part, &LOCAL)).transpose()?;
        let resource = resource
            .map(|part| check_part(part, &RESOURCE))
            .transpose()?;
        Ok(JidParts {
            local,
            domain,
            resource,
        })
    }
}

/// The address of an entity in the XMPP protocol.
///
/// Each JID has three parts:
/// - Local part: Optionally identifies a local entity on the domain.
/// - Domain part: Identifies an XMPP server.
/// - Resource part: Optionally identifies a service or an object.
///
/// None of the parts can contain the `@` or `/` separators, so the textual
/// form of a JID always parses back to the same three parts:
///
/// ```
/// use iks_stanza::Jid;
///
/// let jid: Jid = "juliet@example.com/balcony".parse()?;
/// assert_eq!(jid.localpart(), Some("juliet"));
/// assert_eq!(jid.to_string(), "juliet@example.com/balcony");
/// # Ok::<(), iks_stanza::BadJid>(())
/// ```
#[derive(Debug, Clone, Eq)]
pub struct Jid {
    full: String,
    slash_pos: Option<NonZero<u16>>,
    at_pos: Option<NonZero<u16>>,
}

impl Jid {
    /// Create a JID from a string.
    pub fn new(jid: &str) -> Result<Self, BadJid> {
        Ok(Jid::assemble(JidParts::split(jid)?))
    }

    /// Create a JID from its separate parts.
    pub fn from_parts(
        local: Option<&str>,
        domain: &str,
        resource: Option<&str>,
    ) -> Result<Self, BadJid> {
        Ok(Jid::assemble(JidParts::checked(local, domain, resource)?))
    }

    fn assemble(parts: JidParts) -> Jid {
        let mut full_size = parts.domain.len();
        if let Some(local) = parts.local {
            full_size += local.len() + 1;
        }
        if let Some(resource) = parts.resource {
            full_size += resource.len() + 1;
        }
        let mut full = String::with_capacity(full_size);
        let mut at_pos = None;
        let mut slash_pos = None;
        if let Some(local) = parts.local {
            full.push_str(local);
            // Parts are at most 1023 octets, positions always fit.
            at_pos = NonZero::new(full.len() as u16);
            full.push('@');
        }
        full.push_str(parts.domain);
        if let Some(resource) = parts.resource {
            slash_pos = NonZero::new(full.len() as u16);
            full.push('/');
            full.push_str(resource);
        }
        Jid {
            full,
            slash_pos,
            at_pos,
        }
    }

    /// Full form of the JID with all the components.
    pub fn full(&self) -> &str {
        &self.full
    }

    /// Bare form of the JID without the resource part.
    pub fn bare(&self) -> &str {
        match self.slash_pos {
            Some(pos) => &self.full[..pos.get() as usize],
            None => &self.full,
        }
    }

    pub fn localpart(&self) -> Option<&str> {
        self.at_pos.map(|pos| &self.full[..pos.get() as usize])
    }

    pub fn domainpart(&self) -> &str {
        let start = match self.at_pos {
            Some(pos) => pos.get() as usize + 1,
            None => 0,
        };
        let end = match self.slash_pos {
            Some(pos) => pos.get() as usize,
            None => self.full.len(),
        };
        &self.full[start..end]
    }

    pub fn resourcepart(&self) -> Option<&str> {
        self.slash_pos
            .map(|pos| &self.full[pos.get() as usize + 1..])
    }

    /// True if the JID does not contain a resource part.
    pub fn is_bare(&self) -> bool {
        self.slash_pos.is_none()
    }

    /// Creates another JID by overriding the resource part.
    pub fn with_resource(self, resource: &str) -> Result<Jid, BadJid> {
        Jid::from_parts(self.localpart(), self.domainpart(), Some(resource))
    }
}

impl FromStr for Jid {
    type Err = BadJid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Jid::new(s)
    }
}

impl Display for Jid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

impl PartialEq for Jid {
    fn eq(&self, other: &Jid) -> bool {
        self.full == other.full
    }
}

impl PartialOrd for Jid {
    fn partial_cmp(&self, other: &Jid) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Jid {
    fn cmp(&self, other: &Jid) -> std::cmp::Ordering {
        self.full.cmp(&other.full)
    }
}

impl Hash for Jid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.full.hash(state)
    }
}
