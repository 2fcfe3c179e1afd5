// Copyright 2026 the textcodec developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option. This file may not be copied, modified, or distributed except
// according to those terms.

mod common;

use common::{
    decode_all, decode_byte_by_byte, decode_fatal, encode_all, install_test_indexes,
    legacy_encoder,
};
use textcodec::{EncodeOptions, Error};

#[test]
fn plain_ascii_decodes_as_is() {
    install_test_indexes();
    assert_eq!(decode_all("iso-2022-jp", b"abc"), "abc");
}

#[test]
fn jis0208_mode_decodes_through_the_table() {
    install_test_indexes();
    // ESC $ B, 21 21, ESC ( B
    let input = [0x1B, 0x24, 0x42, 0x21, 0x21, 0x1B, 0x28, 0x42, 0x61];
    assert_eq!(decode_all("iso-2022-jp", &input), "\u{3000}a");
}

#[test]
fn roman_mode_remaps_backslash_and_tilde() {
    install_test_indexes();
    // ESC ( J switches to Roman.
    let input = [0x1B, 0x28, 0x4A, 0x5C, 0x7E, 0x61];
    assert_eq!(decode_all("iso-2022-jp", &input), "\u{A5}\u{203E}a");
}

#[test]
fn katakana_mode_decodes_without_the_table() {
    install_test_indexes();
    // ESC ( I switches to half-width katakana.
    let input = [0x1B, 0x28, 0x49, 0x21, 0x5F];
    assert_eq!(decode_all("iso-2022-jp", &input), "\u{FF61}\u{FF9F}");
}

#[test]
fn two_escapes_in_a_row_fault() {
    install_test_indexes();
    let input = [0x1B, 0x28, 0x42, 0x1B, 0x28, 0x42, 0x41];
    assert_eq!(decode_all("iso-2022-jp", &input), "\u{FFFD}A");
}

#[test]
fn unknown_escape_replays_its_bytes() {
    install_test_indexes();
    // ESC ( Z is not a recognized sequence; the parenthesis and Z come
    // back as literal text after the replacement.
    assert_eq!(decode_all("iso-2022-jp", &[0x1B, 0x28, 0x5A]), "\u{FFFD}(Z");
}

#[test]
fn truncated_escape_at_end_is_replaced() {
    install_test_indexes();
    assert_eq!(decode_all("iso-2022-jp", &[0x61, 0x1B]), "a\u{FFFD}");
    assert_eq!(decode_all("iso-2022-jp", &[0x61, 0x1B, 0x24]), "a\u{FFFD}$");
}

#[test]
fn truncated_double_byte_at_end_is_replaced() {
    install_test_indexes();
    let input = [0x1B, 0x24, 0x42, 0x21];
    assert_eq!(decode_all("iso-2022-jp", &input), "\u{FFFD}");
}

#[test]
fn shift_bytes_are_malformed() {
    install_test_indexes();
    assert_eq!(decode_all("iso-2022-jp", &[0x0E, 0x61]), "\u{FFFD}a");
}

#[test]
fn fatal_mode_errors_on_bad_escapes() {
    install_test_indexes();
    assert!(matches!(
        decode_fatal("iso-2022-jp", &[0x1B, 0x28, 0x5A]),
        Err(Error::Malformed)
    ));
}

#[test]
fn encode_switches_modes_and_returns_to_ascii() {
    install_test_indexes();
    assert_eq!(
        encode_all("iso-2022-jp", "A\u{3000}B"),
        [0x41, 0x1B, 0x24, 0x42, 0x21, 0x21, 0x1B, 0x28, 0x42, 0x42]
    );
}

#[test]
fn encode_yen_and_overline_switch_to_roman() {
    install_test_indexes();
    // ASCII encodes directly in Roman mode; only the final flush returns
    // to ASCII mode.
    assert_eq!(
        encode_all("iso-2022-jp", "\u{A5}a"),
        [0x1B, 0x28, 0x4A, 0x5C, 0x61, 0x1B, 0x28, 0x42]
    );
}

#[test]
fn encode_ends_in_ascii_mode_even_for_trailing_jis0208() {
    install_test_indexes();
    assert_eq!(
        encode_all("iso-2022-jp", "\u{3000}"),
        [0x1B, 0x24, 0x42, 0x21, 0x21, 0x1B, 0x28, 0x42]
    );
}

#[test]
fn streaming_encode_defers_the_closing_escape() {
    install_test_indexes();
    let mut encoder = legacy_encoder("iso-2022-jp");
    let first = encoder
        .encode_with_options("\u{3000}", EncodeOptions { stream: true })
        .unwrap();
    assert_eq!(first, [0x1B, 0x24, 0x42, 0x21, 0x21]);
    let second = encoder
        .encode_with_options("\u{3001}", EncodeOptions { stream: true })
        .unwrap();
    // Still in jis0208 mode; no second mode switch.
    assert_eq!(second, [0x21, 0x22]);
    assert_eq!(encoder.encode("").unwrap(), [0x1B, 0x28, 0x42]);
}

#[test]
fn encode_rejects_escape_and_shift_code_points() {
    install_test_indexes();
    let err = legacy_encoder("iso-2022-jp").encode("\u{1B}").unwrap_err();
    assert!(matches!(err, Error::Unmappable(0xFFFD)));
}

#[test]
fn encode_minus_sign_as_fullwidth_minus() {
    install_test_indexes();
    assert_eq!(
        encode_all("iso-2022-jp", "\u{2212}"),
        [0x1B, 0x24, 0x42, 0x21, 0x5D, 0x1B, 0x28, 0x42]
    );
    assert_eq!(
        encode_all("iso-2022-jp", "\u{FF0D}"),
        [0x1B, 0x24, 0x42, 0x21, 0x5D, 0x1B, 0x28, 0x42]
    );
}

#[test]
fn byte_at_a_time_matches_whole_input() {
    install_test_indexes();
    let input = [
        0x61, 0x1B, 0x24, 0x42, 0x21, 0x21, 0x1B, 0x28, 0x42, 0x1B, 0x28, 0x49, 0x21, 0x1B,
    ];
    assert_eq!(
        decode_byte_by_byte("iso-2022-jp", &input),
        decode_all("iso-2022-jp", &input)
    );
}
