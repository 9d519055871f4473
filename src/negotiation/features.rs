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

use log::trace;

use crate::DecodeError;
use crate::Element;
use crate::Extension;
use crate::Generic;
use crate::constants::NS_BIND;
use crate::constants::NS_SASL;
use crate::constants::NS_SESSION;
use crate::constants::NS_STREAM;
use crate::constants::NS_TLS;
use crate::entities::escape;

use super::Bind;
use super::check_name;
use super::description;
use super::parse_in_stream;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct StartTls {
    pub required: bool,
}

/// The `<stream:features/>` element a server sends after the header.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Features {
    pub starttls: Option<StartTls>,
    /// Offered SASL mechanism names, in server preference order.
    pub mechanisms: Vec<String>,
    pub bind: Option<Bind>,
    pub session: Option<Generic>,
    /// First feature without a more specific field.
    pub any: Option<Generic>,
}

impl Features {
    pub fn from_element(element: &Element) -> Result<Features, DecodeError> {
        check_name(element, "features", NS_STREAM, description::NOT_FEATURES)?;
        let mut features = Features::default();
        for child in element.child_elements() {
            if child.is("starttls", NS_TLS) {
                features.starttls = Some(StartTls {
                    required: child.find_child("required", NS_TLS).is_some(),
                });
            } else if child.is("mechanisms", NS_SASL) {
                features.mechanisms = child
                    .child_elements()
                    .filter(|mech| mech.is("mechanism", NS_SASL))
                    .map(|mech| mech.text().trim().to_string())
                    .collect();
            } else if child.is("bind", NS_BIND) {
                features.bind = Some(Bind::from_element(child)?);
            } else if child.is("session", NS_SESSION) {
                features.session = Some(Generic::from_element(child));
            } else if features.any.is_none() {
                features.any = Some(Generic::from_element(child));
            } else {
                trace!("dropping stream feature {}", child.name());
            }
        }
        Ok(features)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Features, DecodeError> {
        Features::from_element(&parse_in_stream(bytes)?)
    }

    pub fn has_mechanism(&self, mechanism: &str) -> bool {
        self.mechanisms.iter().any(|offered| offered == mechanism)
    }

    pub fn encode(&self, out: &mut String) {
        out.push_str("<stream:features>");
        if let Some(starttls) = &self.starttls {
            out.push_str("<starttls xmlns=\"");
            out.push_str(NS_TLS);
            if starttls.required {
                out.push_str("\"><required/></starttls>");
            } else {
                out.push_str("\"/>");
            }
        }
        if !self.mechanisms.is_empty() {
            out.push_str("<mechanisms xmlns=\"");
            out.push_str(NS_SASL);
            out.push_str("\">");
            for mechanism in &self.mechanisms {
                out.push_str("<mechanism>");
                escape(mechanism, out);
                out.push_str("</mechanism>");
            }
            out.push_str("</mechanisms>");
        }
        if let Some(bind) = &self.bind {
            bind.encode(out);
        }
        for generic in [&self.session, &self.any].into_iter().flatten() {
            generic.encode(NS_STREAM, out);
        }
        out.push_str("</stream:features>");
    }
}

impl Display for Features {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut xml = String::new();
        self.encode(&mut xml);
        f.write_str(&xml)
    }
}
