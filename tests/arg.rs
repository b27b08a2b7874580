// Integration tests: positional argument substitution.

use unistr::{DoubleForm, UString, Utf16View};

fn u(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

#[test]
fn chained_substitution() {
    let t = UString::from("%1 was born in %2.");
    assert_eq!(t.arg_str("Joe").arg_int(1906, 0, 10, 0x20), "Joe was born in 1906.");
}

#[test]
fn rank_not_number_selects_the_argument() {
    // Numbers need not be contiguous; ranks are what match arguments.
    let t = UString::from("%7 %80 %7");
    let a = u("first");
    let b = u("second");
    assert_eq!(t.multi_arg(&[Utf16View::new(&a), Utf16View::new(&b)]), "first second first");
}

#[test]
fn repeated_lowest_number_fills_every_occurrence() {
    assert_eq!(UString::from("%1%1%1").arg_str("ha"), "hahaha");
}

#[test]
fn later_calls_pick_up_where_earlier_left() {
    let t = UString::from("%3 + %2 = %1");
    let out = t.arg_str("sum").arg_str("b").arg_str("a");
    assert_eq!(out, "a + b = sum");
}

#[test]
fn locale_prefix_on_strings_is_transparent() {
    assert_eq!(UString::from("%L1").arg_str("text"), "text");
}

#[test]
fn locale_prefix_groups_numbers() {
    assert_eq!(UString::from("%L1 / %1").arg_int(1048576, 0, 10, 0x20), "1,048,576 / 1048576");
}

#[test]
fn field_widths() {
    assert_eq!(UString::from("%1|").arg_view(Utf16View::new(&u("x")), 4, 0x20), "   x|");
    assert_eq!(UString::from("%1|").arg_view(Utf16View::new(&u("x")), -4, 0x20), "x   |");
    assert_eq!(
        UString::from("%1").arg_int(-3, 6, 10, u16::from(b'0')),
        "-00003"
    );
}

#[test]
fn double_forms_through_arg() {
    let t = UString::from("pi ~ %1");
    assert_eq!(
        t.arg_double(3.14159, 0, DoubleForm::Decimal, 2, 0x20),
        "pi ~ 3.14"
    );
    assert_eq!(
        t.arg_double(1536.0, 0, DoubleForm::Exponent, 3, 0x20),
        "pi ~ 1.536e+3"
    );
    assert_eq!(
        t.arg_double(1536.0, 0, DoubleForm::SignificantDigits, 3, 0x20),
        "pi ~ 1.54e+3"
    );
}

#[test]
fn percent_literals_survive() {
    assert_eq!(UString::from("100%% or %1%").arg_str("50"), "100%% or 50%");
}

#[test]
fn missing_arguments_leave_placeholders_for_later() {
    let t = UString::from("%1-%2-%3");
    let x = u("x");
    let partial = t.multi_arg(&[Utf16View::new(&x)]);
    assert_eq!(partial, "x-%2-%3");
    assert_eq!(partial.arg_str("y").arg_str("z"), "x-y-z");
}
