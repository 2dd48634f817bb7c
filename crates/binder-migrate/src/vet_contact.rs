//! Splitting a legacy free-text vet contact into name and phone.
//!
//! Pattern: optional `(`, three digits, optional `)`, optional whitespace,
//! optional `-`, three digits, optional `-`, four digits. Matches
//! `555-123-4567`, `(555) 123-4567` and `5551234567`. Only the first match
//! is used.

use regex::Regex;
use std::sync::OnceLock;

static PHONE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn phone_pattern() -> &'static Regex {
    PHONE_PATTERN.get_or_init(|| {
        Regex::new(r"\(?[0-9]{3}\)?\s?-?[0-9]{3}-?[0-9]{4}").expect("phone pattern compiles")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VetContact {
    pub name: String,
    pub phone: String,
}

/// Splits `contact` into a vet name and a phone number.
///
/// With a phone match, the phone is the matched text and the name is what is
/// left once the match is cut out, trimmed, with a dangling `-` separator on
/// either side removed. Without a match the whole string is the name and the
/// phone is empty.
pub fn split_vet_contact(contact: &str) -> VetContact {
    let Some(found) = phone_pattern().find(contact) else {
        return VetContact {
            name: contact.to_string(),
            phone: String::new(),
        };
    };

    let mut rest = String::with_capacity(contact.len() - found.as_str().len());
    rest.push_str(&contact[..found.start()]);
    rest.push_str(&contact[found.end()..]);

    VetContact {
        name: strip_separator(&rest).to_string(),
        phone: found.as_str().to_string(),
    }
}

fn strip_separator(rest: &str) -> &str {
    let name = rest.trim();
    let name = name.strip_prefix('-').map_or(name, str::trim_start);
    name.strip_suffix('-').map_or(name, str::trim_end)
}
