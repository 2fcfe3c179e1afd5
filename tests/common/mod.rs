// Copyright 2026 the textcodec developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Shared test fixtures. The crate ships no mapping tables, so the tests
//! install small hand-built indexes with real values at the pointers the
//! tests touch. Byte sequences asserted against them therefore match what
//! the full `encoding-indexes` data would produce for those characters.

#![allow(dead_code)]

use textcodec::index::{install, Indexes};
use textcodec::{DecodeOptions, DecoderOptions, EncodeOptions, EncoderOptions, TextDecoder, TextEncoder};

fn sparse(len: usize, entries: &[(usize, u32)]) -> Vec<Option<u32>> {
    let mut table = vec![None; len];
    for &(pointer, code_point) in entries {
        table[pointer] = Some(code_point);
    }
    table
}

fn jis0208() -> Vec<Option<u32>> {
    sparse(
        11104,
        &[
            (0, 0x3000),    // ideographic space, 21 21 in ISO-2022-JP
            (1, 0x3001),
            (2, 0x3002),
            (60, 0xFF0D),   // fullwidth minus, 81 7C in Shift_JIS
            (1410, 0x4E9C), // 亜, 88 9F in Shift_JIS, B0 A1 in EUC-JP
            (8273, 0x2460), // inside the pointer range Shift_JIS refuses to encode
        ],
    )
}

fn jis0212() -> Vec<Option<u32>> {
    sparse(7212, &[(100, 0x4E02)]) // 8F A2 A7 in EUC-JP
}

fn euc_kr() -> Vec<Option<u32>> {
    sparse(23750, &[(9026, 0xAC00)]) // 가, B0 A1
}

fn big5() -> Vec<Option<u32>> {
    sparse(
        19782,
        &[
            (100, 0x00C7),  // below the A1 lead boundary: decodes, never encodes
            (5495, 0x4E00), // 一, A4 40
            (6000, 0x5341),
            (7000, 0x5341), // duplicate of 0x5341: encoder must take this one
            (6100, 0x9AA8), // duplicate of 0x9AA8: encoder must take this one
            (6200, 0x9AA8),
        ],
    )
}

fn gb18030() -> Vec<Option<u32>> {
    sparse(
        23940,
        &[
            (0, 0x4E02),    // 81 40
            (6432, 0x20AC), // A2 E3; GBK instead encodes the euro as 0x80
            (9026, 0x554A), // 啊, B0 A1
        ],
    )
}

fn gb18030_ranges() -> Vec<(u32, u32)> {
    vec![(0, 0x0080), (36, 0x00A5), (38, 0x00A9), (189000, 0x10000)]
}

fn windows_1252() -> Vec<Option<u32>> {
    // The full real table: 32 relocated C1 positions, then Latin-1.
    let specials: [u32; 32] = [
        0x20AC, 0x81, 0x201A, 0x192, 0x201E, 0x2026, 0x2020, 0x2021, 0x2C6, 0x2030, 0x160,
        0x2039, 0x152, 0x8D, 0x17D, 0x8F, 0x90, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013,
        0x2014, 0x2DC, 0x2122, 0x161, 0x203A, 0x153, 0x9D, 0x17E, 0x178,
    ];
    specials
        .iter()
        .copied()
        .chain(0xA0..=0xFF)
        .map(Some)
        .collect()
}

fn iso_8859_8() -> Vec<Option<u32>> {
    // Deliberately sparse so unmapped bytes exist.
    sparse(128, &[(0x60, 0x05D0)]) // byte E0 -> א
}

/// Installs the fixture tables. First call wins process-wide; every test
/// calls this and they all build the same data.
pub fn install_test_indexes() {
    let mut indexes = Indexes::new();
    indexes.insert_dense("jis0208", jis0208());
    indexes.insert_dense("jis0212", jis0212());
    indexes.insert_dense("euc-kr", euc_kr());
    indexes.insert_dense("big5", big5());
    indexes.insert_dense("gb18030", gb18030());
    indexes.insert_ranges("gb18030-ranges", gb18030_ranges());
    indexes.insert_dense("windows-1252", windows_1252());
    indexes.insert_dense("iso-8859-8", iso_8859_8());
    install(indexes);
}

pub fn decode_all(label: &str, bytes: &[u8]) -> String {
    let mut decoder =
        TextDecoder::new(label, DecoderOptions::default()).expect("decoder should construct");
    decoder.decode(bytes).expect("decode should succeed")
}

pub fn decode_fatal(label: &str, bytes: &[u8]) -> Result<String, textcodec::Error> {
    let mut decoder = TextDecoder::new(
        label,
        DecoderOptions {
            fatal: true,
            ..Default::default()
        },
    )
    .expect("decoder should construct");
    decoder.decode(bytes)
}

/// Feeds the input one byte per call with `stream` set, then flushes.
pub fn decode_byte_by_byte(label: &str, bytes: &[u8]) -> String {
    let mut decoder =
        TextDecoder::new(label, DecoderOptions::default()).expect("decoder should construct");
    let mut output = String::new();
    for &byte in bytes {
        let chunk = decoder
            .decode_with_options(&[byte], DecodeOptions { stream: true })
            .expect("streaming decode should succeed");
        output.push_str(&chunk);
    }
    output.push_str(&decoder.decode(&[]).expect("flush should succeed"));
    output
}

pub fn legacy_encoder(label: &str) -> TextEncoder {
    TextEncoder::with_label(
        label,
        EncoderOptions {
            allow_legacy_encoding: true,
            ..Default::default()
        },
    )
    .expect("encoder should construct")
}

pub fn encode_all(label: &str, input: &str) -> Vec<u8> {
    legacy_encoder(label)
        .encode(input)
        .expect("encode should succeed")
}

/// Feeds the input one code point per call with `stream` set, then
/// flushes.
pub fn encode_char_by_char(label: &str, input: &str) -> Vec<u8> {
    let mut encoder = legacy_encoder(label);
    let mut output = Vec::new();
    let mut buffer = [0u8; 4];
    for c in input.chars() {
        let chunk = encoder
            .encode_with_options(c.encode_utf8(&mut buffer), EncodeOptions { stream: true })
            .expect("streaming encode should succeed");
        output.extend(chunk);
    }
    output.extend(encoder.encode("").expect("flush should succeed"));
    output
}
