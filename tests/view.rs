// Integration tests: the non-owning views.

use unistr::{CaseSensitivity, SplitBehavior, UString, Utf16View};

fn u(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

#[test]
fn views_do_not_own() {
    let s = UString::from("backing store");
    let view = s.view();
    assert_eq!(view.len(), s.len());
    assert_eq!(view.as_ptr(), s.data());
    // Slicing produces views into the same storage.
    let word = view.mid(8, -1);
    assert_eq!(word.as_slice(), &u("store")[..]);
    assert_eq!(word.as_ptr(), unsafe { s.data().add(8) });
}

#[test]
fn clamped_slicing_conventions() {
    let data = u("0123456789");
    let v = Utf16View::new(&data);
    assert_eq!(v.slice(3, 4).as_slice(), &u("3456")[..]);
    assert_eq!(v.slice(3, -1).as_slice(), &u("3456789")[..]);
    assert_eq!(v.slice(-4, 2).as_slice(), &u("67")[..]);
    assert_eq!(v.slice(-99, 3).as_slice(), &u("012")[..]);
    assert_eq!(v.slice(99, 1).len(), 0);
    assert_eq!(v.left(99).len(), 10);
    assert_eq!(v.right(0).len(), 0);
}

#[test]
fn zero_terminated_length_computation() {
    let data = [0x68u16, 0x69, 0, 0x78];
    // SAFETY: data is zero-terminated and aligned.
    let v = unsafe { Utf16View::from_raw_parts(data.as_ptr(), -1) };
    assert_eq!(v.len(), 2);
    assert_eq!(v.as_slice(), &u("hi")[..]);
}

#[test]
fn split_behaviors() {
    let csv = u(",a,,b,");
    let comma = u(",");
    let v = Utf16View::new(&csv);

    let keep: Vec<String> = v
        .split(Utf16View::new(&comma), SplitBehavior::KeepEmptyParts, CaseSensitivity::Sensitive)
        .map(|p| String::from_utf16_lossy(p.as_slice()))
        .collect();
    assert_eq!(keep, ["", "a", "", "b", ""]);

    let skip: Vec<String> = v
        .split(Utf16View::new(&comma), SplitBehavior::SkipEmptyParts, CaseSensitivity::Sensitive)
        .map(|p| String::from_utf16_lossy(p.as_slice()))
        .collect();
    assert_eq!(skip, ["a", "b"]);
}

#[test]
fn split_case_insensitive_separator() {
    let data = u("oneSEPtwosepthree");
    let sep = u("sep");
    let parts: Vec<String> = Utf16View::new(&data)
        .split(Utf16View::new(&sep), SplitBehavior::KeepEmptyParts, CaseSensitivity::Insensitive)
        .map(|p| String::from_utf16_lossy(p.as_slice()))
        .collect();
    assert_eq!(parts, ["one", "two", "three"]);
}

#[test]
fn split_parts_outlive_the_iterator() {
    let data = u("a b c");
    let sep = u(" ");
    let v = Utf16View::new(&data);
    let parts: Vec<Utf16View<'_>> = v
        .split(Utf16View::new(&sep), SplitBehavior::KeepEmptyParts, CaseSensitivity::Sensitive)
        .collect();
    // The iterator is gone; the parts still read the original buffer.
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[2].as_slice(), &u("c")[..]);
}

#[test]
fn view_search_and_prefix() {
    let data = u("finding needles");
    let v = Utf16View::new(&data);
    let needle = u("ndle");
    assert_eq!(v.index_of(Utf16View::new(&needle), 0, CaseSensitivity::Sensitive), 10);
    assert!(v.contains(Utf16View::new(&needle), CaseSensitivity::Sensitive));
    let prefix = u("FIND");
    assert!(v.starts_with(&Utf16View::new(&prefix), CaseSensitivity::Insensitive));
    assert!(!v.starts_with(&Utf16View::new(&prefix), CaseSensitivity::Sensitive));
}
