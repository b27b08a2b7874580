// Integration tests: scan primitives behave identically to scalar loops on
// every alignment and length.

use unistr::scan::{ascii_run_len, find_code_unit, is_ascii_bytes, is_ascii_utf16};

#[test]
fn find_code_unit_exhaustive_small_sizes() {
    // Every (length, position) pair up to a few words long.
    for len in 0..40 {
        for pos in 0..len {
            let mut data = vec![0x2Eu16; len];
            data[pos] = 0x1111;
            assert_eq!(find_code_unit(&data, 0x1111), Some(pos), "len {len} pos {pos}");
        }
        let data = vec![0x2Eu16; len];
        assert_eq!(find_code_unit(&data, 0x1111), None, "len {len}");
    }
}

#[test]
fn find_code_unit_first_of_many() {
    let mut data = vec![0u16; 64];
    data[10] = 7;
    data[50] = 7;
    assert_eq!(find_code_unit(&data, 7), Some(10));
}

#[test]
fn find_zero_unit() {
    let data = [0x61u16, 0x62, 0x00, 0x63];
    assert_eq!(find_code_unit(&data, 0), Some(2));
}

#[test]
fn ascii_run_exhaustive_positions() {
    for len in 0..40 {
        for pos in 0..len {
            let mut data = vec![b'a'; len];
            data[pos] = 0xC3;
            assert_eq!(ascii_run_len(&data), pos, "len {len} pos {pos}");
            assert!(!is_ascii_bytes(&data));
        }
        assert!(is_ascii_bytes(&vec![b'a'; len]));
    }
}

#[test]
fn utf16_ascii_check() {
    assert!(is_ascii_utf16(&"plain".encode_utf16().collect::<Vec<_>>()));
    assert!(!is_ascii_utf16(&"plaïn".encode_utf16().collect::<Vec<_>>()));
    // 0x7F is ASCII, 0x80 is not.
    assert!(is_ascii_utf16(&[0x7F; 33]));
    let mut edge = vec![0x7Fu16; 33];
    edge[32] = 0x80;
    assert!(!is_ascii_utf16(&edge));
}

#[test]
fn misaligned_slices_behave_identically() {
    let backing: Vec<u16> = (0..80).map(|i| (i % 7) as u16 + 1).collect();
    for start in 0..8 {
        let slice = &backing[start..];
        let expected = slice.iter().position(|&u| u == 5);
        assert_eq!(find_code_unit(slice, 5), expected, "start {start}");
    }
}
