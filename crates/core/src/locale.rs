// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locales used when rendering message arguments.
//!
//! Only the numeric conventions matter to message formatting, so a
//! [`Locale`] is a name plus its decimal and digit-group separators.

/// Languages that write decimals with a comma and group digits with a period.
const COMMA_DECIMAL_PERIOD_GROUP: &[&str] = &["da", "de", "es", "id", "it", "nl", "pt", "tr"];

/// Languages that write decimals with a comma and group digits with a space.
const COMMA_DECIMAL_SPACE_GROUP: &[&str] = &["cs", "fi", "fr", "nb", "nn", "pl", "ru", "sv", "uk"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    name: String,
    decimal_separator: char,
    group_separator: char,
}

impl Locale {
    /// The culture-neutral locale (empty name, `.` decimals, `,` groups).
    pub fn invariant() -> Self {
        Self { name: String::new(), decimal_separator: '.', group_separator: ',' }
    }

    pub fn new(name: impl Into<String>, decimal_separator: char, group_separator: char) -> Self {
        Self { name: name.into(), decimal_separator, group_separator }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn group_separator(&self) -> char {
        self.group_separator
    }

    pub fn is_invariant(&self) -> bool {
        self.name.is_empty()
    }

    /// Name of the process locale: `LC_ALL` > `LC_NUMERIC` > `LANG`.
    pub fn current_name() -> String {
        ["LC_ALL", "LC_NUMERIC", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .map(|value| normalize_name(&value))
            .unwrap_or_default()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::invariant()
    }
}

/// Normalize a POSIX-style locale (`de_DE.UTF-8@euro`) to a tag (`de-DE`).
///
/// `C` and `POSIX` map to the invariant (empty) name.
pub fn normalize_name(raw: &str) -> String {
    let base = raw.split(['.', '@']).next().unwrap_or_default().trim();
    if base.eq_ignore_ascii_case("c") || base.eq_ignore_ascii_case("posix") {
        return String::new();
    }
    base.replace('_', "-")
}

/// Lookup service turning a locale name carried on the wire into a [`Locale`].
pub trait LocaleResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Locale;
}

/// Resolver backed by a small built-in table of separator conventions.
///
/// Unknown names keep their name but use invariant separators.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLocales;

impl LocaleResolver for BuiltinLocales {
    fn resolve(&self, name: &str) -> Locale {
        let name = normalize_name(name);
        let language = name.split('-').next().unwrap_or_default().to_ascii_lowercase();
        let (decimal, group) = if COMMA_DECIMAL_PERIOD_GROUP.contains(&language.as_str()) {
            (',', '.')
        } else if COMMA_DECIMAL_SPACE_GROUP.contains(&language.as_str()) {
            (',', '\u{a0}')
        } else {
            ('.', ',')
        };
        Locale::new(name, decimal, group)
    }
}

#[cfg(test)]
#[path = "locale_tests.rs"]
mod tests;
