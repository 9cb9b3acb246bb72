// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Composite message formatting.
//!
//! Templates use positional placeholders: `{index[,alignment][:format]}`.
//! `{{` and `}}` produce literal braces. Alignment pads to a minimum width,
//! on the left when positive and on the right when negative.
//! Alignment widths and numeric precisions must stay below [`MAX_WIDTH`].

use crate::locale::Locale;
use thiserror::Error;

/// Exclusive upper bound for alignment widths and specifier precisions.
pub const MAX_WIDTH: usize = 1_000_000;

/// One positional argument of a lazily formatted message.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageArg {
    Text(String),
    Integer(i64),
    Decimal(f64),
}

impl MessageArg {
    /// Render with the locale's default conventions (no format specifier).
    pub fn to_text(&self, locale: &Locale) -> String {
        match self {
            MessageArg::Text(text) => text.clone(),
            MessageArg::Integer(n) => n.to_string(),
            MessageArg::Decimal(d) => localize_decimal(&d.to_string(), locale),
        }
    }

    /// Render with an optional format specifier (`D`, `F`, `N`, `X` plus precision).
    pub fn render(&self, locale: &Locale, spec: Option<&str>) -> Result<String, FormatError> {
        let Some(spec) = spec.filter(|s| !s.is_empty()) else {
            return Ok(self.to_text(locale));
        };
        match self {
            // Text ignores specifiers
            MessageArg::Text(text) => Ok(text.clone()),
            MessageArg::Integer(n) => {
                let (kind, precision) = parse_specifier(spec, "integer")?;
                match kind {
                    'D' | 'd' => {
                        let digits = format!("{:0width$}", n.unsigned_abs(), width = precision.unwrap_or(0));
                        Ok(if *n < 0 { format!("-{digits}") } else { digits })
                    }
                    'X' => Ok(format!("{:0width$X}", n, width = precision.unwrap_or(0))),
                    'x' => Ok(format!("{:0width$x}", n, width = precision.unwrap_or(0))),
                    'F' | 'f' => Ok(fixed(*n as f64, precision.unwrap_or(2), locale, false)),
                    'N' | 'n' => Ok(fixed(*n as f64, precision.unwrap_or(2), locale, true)),
                    _ => Err(FormatError::UnsupportedSpecifier { spec: spec.to_string(), kind: "integer" }),
                }
            }
            MessageArg::Decimal(d) => {
                let (kind, precision) = parse_specifier(spec, "decimal")?;
                match kind {
                    'F' | 'f' => Ok(fixed(*d, precision.unwrap_or(2), locale, false)),
                    'N' | 'n' => Ok(fixed(*d, precision.unwrap_or(2), locale, true)),
                    _ => Err(FormatError::UnsupportedSpecifier { spec: spec.to_string(), kind: "decimal" }),
                }
            }
        }
    }
}

impl From<String> for MessageArg {
    fn from(value: String) -> Self {
        MessageArg::Text(value)
    }
}

impl From<&str> for MessageArg {
    fn from(value: &str) -> Self {
        MessageArg::Text(value.to_string())
    }
}

impl From<i64> for MessageArg {
    fn from(value: i64) -> Self {
        MessageArg::Integer(value)
    }
}

impl From<i32> for MessageArg {
    fn from(value: i32) -> Self {
        MessageArg::Integer(i64::from(value))
    }
}

impl From<u32> for MessageArg {
    fn from(value: u32) -> Self {
        MessageArg::Integer(i64::from(value))
    }
}

impl From<usize> for MessageArg {
    fn from(value: usize) -> Self {
        MessageArg::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for MessageArg {
    fn from(value: f64) -> Self {
        MessageArg::Decimal(value)
    }
}

/// Why a template could not be formatted against its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("index {index} is out of range for {count} argument(s)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("input string was not in a correct format (position {position})")]
    Malformed { position: usize },

    #[error("format specifier '{spec}' is not supported for {kind} arguments")]
    UnsupportedSpecifier { spec: String, kind: &'static str },

    #[error("width {width} is too large (must be below 1000000)")]
    WidthOutOfRange { width: usize },
}

/// Turns a template plus arguments into final text.
pub trait MessageFormatter: Send + Sync {
    fn format(&self, locale: &Locale, template: &str, args: &[MessageArg])
        -> Result<String, FormatError>;
}

/// The default formatter: composite placeholders as described in the module docs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeFormatter;

impl MessageFormatter for CompositeFormatter {
    fn format(
        &self,
        locale: &Locale,
        template: &str,
        args: &[MessageArg],
    ) -> Result<String, FormatError> {
        format_composite(locale, template, args)
    }
}

/// Text shown in place of a message whose template failed to format.
pub fn format_failure(template: &str, error: &FormatError) -> String {
    format!("\"{template}\"\n{error}")
}

pub fn format_composite(
    locale: &Locale,
    template: &str,
    args: &[MessageArg],
) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, next)| next == '{').is_some() {
                    out.push('{');
                    continue;
                }
                let mut item = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    match c {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => return Err(FormatError::Malformed { position }),
                        c => item.push(c),
                    }
                }
                if !closed {
                    return Err(FormatError::Malformed { position });
                }
                out.push_str(&format_item(locale, &item, args, position)?);
            }
            '}' => {
                if chars.next_if(|&(_, next)| next == '}').is_none() {
                    return Err(FormatError::Malformed { position });
                }
                out.push('}');
            }
            c => out.push(c),
        }
    }

    Ok(out)
}

fn format_item(
    locale: &Locale,
    item: &str,
    args: &[MessageArg],
    position: usize,
) -> Result<String, FormatError> {
    let (head, spec) = match item.split_once(':') {
        Some((head, spec)) => (head, Some(spec)),
        None => (item, None),
    };
    let (index, alignment) = match head.split_once(',') {
        Some((index, alignment)) => (index, Some(alignment)),
        None => (head, None),
    };

    let index: usize =
        index.trim().parse().map_err(|_| FormatError::Malformed { position })?;
    let alignment: i32 = match alignment {
        Some(a) => a.trim().parse().map_err(|_| FormatError::Malformed { position })?,
        None => 0,
    };
    let width = alignment.unsigned_abs() as usize;
    if width >= MAX_WIDTH {
        return Err(FormatError::WidthOutOfRange { width });
    }

    let arg = args
        .get(index)
        .ok_or(FormatError::IndexOutOfRange { index, count: args.len() })?;
    let text = arg.render(locale, spec)?;

    let len = text.chars().count();
    if len >= width {
        return Ok(text);
    }
    let padding = " ".repeat(width - len);
    Ok(if alignment > 0 { padding + &text } else { text + &padding })
}

fn parse_specifier(spec: &str, kind: &'static str) -> Result<(char, Option<usize>), FormatError> {
    let unsupported = || FormatError::UnsupportedSpecifier { spec: spec.to_string(), kind };
    let mut chars = spec.chars();
    let letter = chars.next().filter(char::is_ascii_alphabetic).ok_or_else(unsupported)?;
    let rest = chars.as_str();
    if rest.is_empty() {
        return Ok((letter, None));
    }
    let precision = rest.parse::<usize>().map_err(|_| unsupported())?;
    if precision >= MAX_WIDTH {
        return Err(FormatError::WidthOutOfRange { width: precision });
    }
    Ok((letter, Some(precision)))
}

fn fixed(value: f64, precision: usize, locale: &Locale, grouped: bool) -> String {
    let rendered = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (rendered.clone(), None),
    };
    let int_part = if grouped { group_digits(&int_part, locale.group_separator()) } else { int_part };

    let mut out = String::with_capacity(rendered.len() + 4);
    if value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&int_part);
    if let Some(frac) = frac_part {
        out.push(locale.decimal_separator());
        out.push_str(&frac);
    }
    out
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

fn localize_decimal(rendered: &str, locale: &Locale) -> String {
    if locale.decimal_separator() == '.' {
        rendered.to_string()
    } else {
        rendered.replace('.', &locale.decimal_separator().to_string())
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
