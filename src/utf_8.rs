// Copyright 2026 the textcodec developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option. This file may not be copied, modified, or distributed except
// according to those terms.

use crate::error::Error;
use crate::stream::{Stream, Token};
use crate::variant::{decoder_error, Step};

/// UTF-8 decoder with the continuation-byte window narrowed per lead byte,
/// so overlong forms and surrogate encodings are rejected at the first
/// offending byte rather than after the whole sequence.
pub struct Utf8Decoder {
    fatal: bool,
    code_point: Token,
    bytes_seen: u8,
    bytes_needed: u8,
    lower_boundary: Token,
    upper_boundary: Token,
}

impl Utf8Decoder {
    pub fn new(fatal: bool) -> Utf8Decoder {
        Utf8Decoder {
            fatal,
            code_point: 0,
            bytes_seen: 0,
            bytes_needed: 0,
            lower_boundary: 0x80,
            upper_boundary: 0xBF,
        }
    }

    pub fn handler(&mut self, stream: &mut Stream, byte: Option<Token>) -> Result<Step, Error> {
        let b = match byte {
            Some(b) => b,
            None => {
                if self.bytes_needed != 0 {
                    // Truncated sequence at end of stream.
                    self.bytes_needed = 0;
                    return decoder_error(self.fatal);
                }
                return Ok(Step::Finished);
            }
        };

        if self.bytes_needed == 0 {
            return match b {
                0x00..=0x7F => Ok(Step::one(b)),
                0xC2..=0xDF => {
                    self.bytes_needed = 1;
                    self.code_point = b & 0x1F;
                    Ok(Step::Pending)
                }
                0xE0..=0xEF => {
                    if b == 0xE0 {
                        self.lower_boundary = 0xA0;
                    }
                    if b == 0xED {
                        self.upper_boundary = 0x9F;
                    }
                    self.bytes_needed = 2;
                    self.code_point = b & 0xF;
                    Ok(Step::Pending)
                }
                0xF0..=0xF4 => {
                    if b == 0xF0 {
                        self.lower_boundary = 0x90;
                    }
                    if b == 0xF4 {
                        self.upper_boundary = 0x8F;
                    }
                    self.bytes_needed = 3;
                    self.code_point = b & 0x7;
                    Ok(Step::Pending)
                }
                _ => decoder_error(self.fatal),
            };
        }

        if !(self.lower_boundary..=self.upper_boundary).contains(&b) {
            // The byte belongs to the next sequence; put it back and fault
            // the current one.
            self.code_point = 0;
            self.bytes_needed = 0;
            self.bytes_seen = 0;
            self.lower_boundary = 0x80;
            self.upper_boundary = 0xBF;
            stream.prepend(b);
            return decoder_error(self.fatal);
        }

        self.lower_boundary = 0x80;
        self.upper_boundary = 0xBF;
        self.code_point = (self.code_point << 6) | (b & 0x3F);
        self.bytes_seen += 1;
        if self.bytes_seen != self.bytes_needed {
            return Ok(Step::Pending);
        }
        let code_point = self.code_point;
        self.code_point = 0;
        self.bytes_needed = 0;
        self.bytes_seen = 0;
        Ok(Step::one(code_point))
    }
}

/// UTF-8 encoder. Stateless: every scalar value encodes in one step.
pub struct Utf8Encoder;

impl Utf8Encoder {
    pub fn new() -> Utf8Encoder {
        Utf8Encoder
    }

    pub fn handler(&mut self, _stream: &mut Stream, code_point: Option<Token>) -> Result<Step, Error> {
        let cp = match code_point {
            Some(cp) => cp,
            None => return Ok(Step::Finished),
        };
        if cp <= 0x7F {
            return Ok(Step::one(cp));
        }
        let (count, offset) = match cp {
            0x80..=0x7FF => (1u32, 0xC0),
            0x800..=0xFFFF => (2, 0xE0),
            _ => (3, 0xF0),
        };
        let mut bytes = [0 as Token; 4];
        bytes[0] = (cp >> (6 * count)) + offset;
        let mut len = 1;
        let mut remaining = count;
        while remaining > 0 {
            let temp = cp >> (6 * (remaining - 1));
            bytes[len] = 0x80 | (temp & 0x3F);
            len += 1;
            remaining -= 1;
        }
        Ok(Step::emit(&bytes[..len]))
    }
}

impl Default for Utf8Encoder {
    fn default() -> Utf8Encoder {
        Utf8Encoder::new()
    }
}
