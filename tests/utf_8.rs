// Copyright 2026 the textcodec developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option. This file may not be copied, modified, or distributed except
// according to those terms.

mod common;

use common::{decode_all, decode_byte_by_byte, decode_fatal, encode_all};
use textcodec::{DecoderOptions, Error, TextDecoder, TextEncoder};

#[test]
fn decodes_each_sequence_length() {
    assert_eq!(decode_all("utf-8", b"ab"), "ab");
    assert_eq!(decode_all("utf-8", &[0xC3, 0xA9]), "\u{E9}");
    assert_eq!(decode_all("utf-8", &[0xE2, 0x82, 0xAC]), "\u{20AC}");
    assert_eq!(decode_all("utf-8", &[0xF0, 0x9F, 0x92, 0xA9]), "\u{1F4A9}");
}

#[test]
fn encodes_each_sequence_length() {
    let mut encoder = TextEncoder::new();
    assert_eq!(encoder.encode("ab").unwrap(), b"ab");
    assert_eq!(encoder.encode("\u{E9}").unwrap(), [0xC3, 0xA9]);
    assert_eq!(encoder.encode("\u{20AC}").unwrap(), [0xE2, 0x82, 0xAC]);
    assert_eq!(encoder.encode("\u{1F4A9}").unwrap(), [0xF0, 0x9F, 0x92, 0xA9]);
}

#[test]
fn rejects_overlong_forms_per_continuation_byte() {
    // Overlong NUL: every continuation byte is outside the narrowed window,
    // so each faults individually.
    assert_eq!(decode_all("utf-8", &[0xE0, 0x80, 0x80]), "\u{FFFD}\u{FFFD}\u{FFFD}");
    assert_eq!(decode_all("utf-8", &[0xC0, 0xAF]), "\u{FFFD}\u{FFFD}");
}

#[test]
fn rejects_surrogate_encodings() {
    // ED A0 80 would be U+D800.
    assert_eq!(decode_all("utf-8", &[0xED, 0xA0, 0x80]), "\u{FFFD}\u{FFFD}\u{FFFD}");
}

#[test]
fn rejects_beyond_plane_16() {
    assert_eq!(decode_all("utf-8", &[0xF4, 0x90, 0x80, 0x80]), "\u{FFFD}\u{FFFD}\u{FFFD}\u{FFFD}");
    assert_eq!(decode_all("utf-8", &[0xF5]), "\u{FFFD}");
}

#[test]
fn lone_continuation_byte_is_replaced() {
    assert_eq!(decode_all("utf-8", &[0x80]), "\u{FFFD}");
    assert_eq!(decode_all("utf-8", &[0x61, 0xBF, 0x62]), "a\u{FFFD}b");
}

#[test]
fn truncated_sequence_at_end_is_one_replacement() {
    assert_eq!(decode_all("utf-8", &[0xE2, 0x82]), "\u{FFFD}");
    assert_eq!(decode_all("utf-8", &[0x61, 0xF0, 0x9F]), "a\u{FFFD}");
}

#[test]
fn interrupted_sequence_reprocesses_the_interrupting_byte() {
    // The ASCII byte is pushed back and decoded on its own.
    assert_eq!(decode_all("utf-8", &[0xE2, 0x82, 0x41]), "\u{FFFD}A");
}

#[test]
fn round_trips_at_the_length_boundaries() {
    let mut encoder = TextEncoder::new();
    for cp in ['\u{7F}', '\u{80}', '\u{7FF}', '\u{800}', '\u{FFFF}', '\u{10000}', '\u{10FFFF}'] {
        let text = cp.to_string();
        let bytes = encoder.encode(&text).unwrap();
        assert_eq!(decode_all("utf-8", &bytes), text);
    }
}

#[test]
fn fatal_mode_errors_instead_of_replacing() {
    assert!(matches!(decode_fatal("utf-8", &[0x80]), Err(Error::Malformed)));
    assert!(matches!(decode_fatal("utf-8", &[0xFF]), Err(Error::Malformed)));
    assert!(matches!(decode_fatal("utf-8", &[0xE2, 0x82]), Err(Error::Malformed)));
    assert_eq!(decode_fatal("utf-8", &[0xC3, 0xA9]).unwrap(), "\u{E9}");
    assert_eq!(decode_all("utf-8", &[0xFF]), "\u{FFFD}");
}

#[test]
fn leading_bom_is_consumed() {
    assert_eq!(decode_all("utf-8", &[0xEF, 0xBB, 0xBF, 0x61]), "a");
    // Only the first one.
    assert_eq!(
        decode_all("utf-8", &[0xEF, 0xBB, 0xBF, 0xEF, 0xBB, 0xBF]),
        "\u{FEFF}"
    );
}

#[test]
fn ignore_bom_keeps_it() {
    let mut decoder = TextDecoder::new(
        "utf-8",
        DecoderOptions {
            ignore_bom: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(decoder.decode(&[0xEF, 0xBB, 0xBF, 0x61]).unwrap(), "\u{FEFF}a");
}

#[test]
fn bom_is_not_consumed_mid_stream() {
    assert_eq!(decode_all("utf-8", &[0x61, 0xEF, 0xBB, 0xBF]), "a\u{FEFF}");
}

#[test]
fn encoder_never_emits_a_bom() {
    assert_eq!(encode_all("utf-8", "a"), b"a");
}

#[test]
fn byte_at_a_time_matches_whole_input() {
    let input = [
        0xEF, 0xBB, 0xBF, 0x61, 0xC3, 0xA9, 0xE2, 0x82, 0xAC, 0xF0, 0x9F, 0x92, 0xA9, 0x80,
    ];
    assert_eq!(decode_byte_by_byte("utf-8", &input), decode_all("utf-8", &input));
}
