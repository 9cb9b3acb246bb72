// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::locale::{BuiltinLocales, LocaleResolver};

fn inv(template: &str, args: &[MessageArg]) -> Result<String, FormatError> {
    format_composite(&Locale::invariant(), template, args)
}

#[yare::parameterized(
    no_placeholders = { "plain text", "plain text" },
    single          = { "hello {0}", "hello world" },
    repeated        = { "{0} and {0}", "world and world" },
    escaped_open    = { "{{0}}", "{0}" },
    escaped_mixed   = { "{{{0}}}", "{world}" },
    left_padded     = { "[{0,7}]", "[  world]" },
    right_padded    = { "[{0,-7}]", "[world  ]" },
    too_narrow      = { "[{0,2}]", "[world]" },
    spaced_index    = { "{ 0 }", "world" },
)]
fn formats_text_argument(template: &str, expected: &str) {
    assert_eq!(inv(template, &["world".into()]).unwrap(), expected);
}

#[yare::parameterized(
    plain      = { MessageArg::Integer(42), "{0}", "42" },
    padded     = { MessageArg::Integer(7), "{0:D3}", "007" },
    negative_d = { MessageArg::Integer(-7), "{0:D3}", "-007" },
    hex_upper  = { MessageArg::Integer(255), "{0:X}", "FF" },
    hex_lower  = { MessageArg::Integer(255), "{0:x4}", "00ff" },
    grouped    = { MessageArg::Integer(1234567), "{0:N0}", "1,234,567" },
    fixed_int  = { MessageArg::Integer(3), "{0:F1}", "3.0" },
    decimal    = { MessageArg::Decimal(2.5), "{0}", "2.5" },
    fixed_dec  = { MessageArg::Decimal(2.346), "{0:F2}", "2.35" },
    default_f  = { MessageArg::Decimal(1.0), "{0:F}", "1.00" },
    grouped_d  = { MessageArg::Decimal(-1234.5), "{0:N1}", "-1,234.5" },
    text_spec  = { MessageArg::Text("abc".into()), "{0:N2}", "abc" },
)]
fn formats_numbers_invariant(arg: MessageArg, template: &str, expected: &str) {
    assert_eq!(inv(template, &[arg]).unwrap(), expected);
}

#[test]
fn decimals_follow_locale_separators() {
    let german = BuiltinLocales.resolve("de-DE");
    let args = [MessageArg::Decimal(1234.5)];
    assert_eq!(format_composite(&german, "{0:N2}", &args).unwrap(), "1.234,50");
    assert_eq!(format_composite(&german, "{0}", &args).unwrap(), "1234,5");
}

#[test]
fn index_out_of_range_is_reported() {
    let err = inv("{0} {1}", &[]).unwrap_err();
    assert_eq!(err, FormatError::IndexOutOfRange { index: 0, count: 0 });
}

#[yare::parameterized(
    unclosed       = { "oops {0", 5 },
    stray_close    = { "oops }", 5 },
    nested_open    = { "{0{1}}", 0 },
    non_numeric    = { "{name}", 0 },
    bad_alignment  = { "{0,x}", 0 },
)]
fn malformed_templates(template: &str, position: usize) {
    assert_eq!(inv(template, &["a".into(), "b".into()]), Err(FormatError::Malformed { position }));
}

#[test]
fn unsupported_specifier() {
    let err = inv("{0:Q}", &[MessageArg::Integer(1)]).unwrap_err();
    assert!(matches!(err, FormatError::UnsupportedSpecifier { kind: "integer", .. }));
}

#[yare::parameterized(
    huge_left       = { "{0,200000000}", 200_000_000 },
    huge_right      = { "{0,-2147483647}", 2_147_483_647 },
    at_limit        = { "{0,1000000}", 1_000_000 },
    huge_precision  = { "{0:F2000000}", 2_000_000 },
    huge_digits     = { "{1:D1000000}", 1_000_000 },
)]
fn oversized_widths_are_rejected(template: &str, width: usize) {
    let args = [MessageArg::Decimal(1.5), MessageArg::Integer(7)];
    assert_eq!(inv(template, &args), Err(FormatError::WidthOutOfRange { width }));
}

#[test]
fn widths_just_below_the_limit_are_honoured() {
    let out = inv("{0,-999999}|", &["x".into()]).unwrap();
    assert_eq!(out.len(), MAX_WIDTH);
    assert!(out.starts_with("x "));
    assert!(out.ends_with(" |"));
}

#[test]
fn failure_text_embeds_template_and_error() {
    let err = FormatError::IndexOutOfRange { index: 1, count: 1 };
    let text = format_failure("x {1}", &err);
    assert!(text.starts_with("\"x {1}\"\n"));
    assert!(text.contains("out of range"));
}

#[test]
fn composite_formatter_delegates() {
    let out = CompositeFormatter.format(&Locale::invariant(), "{1}-{0}", &["a".into(), MessageArg::Integer(2)]);
    assert_eq!(out.unwrap(), "2-a");
}

#[test]
fn to_text_uses_locale_for_decimals() {
    let french = BuiltinLocales.resolve("fr-FR");
    assert_eq!(MessageArg::Decimal(0.5).to_text(&french), "0,5");
    assert_eq!(MessageArg::Integer(-3).to_text(&french), "-3");
}
