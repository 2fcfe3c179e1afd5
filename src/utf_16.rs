// Copyright 2026 the textcodec developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option. This file may not be copied, modified, or distributed except
// according to those terms.

use crate::error::Error;
use crate::stream::{Stream, Token};
use crate::variant::{decoder_error, Step};

fn code_unit_to_bytes(code_unit: Token, big_endian: bool) -> [Token; 2] {
    let high = code_unit >> 8;
    let low = code_unit & 0xFF;
    if big_endian {
        [high, low]
    } else {
        [low, high]
    }
}

/// Decoder shared by UTF-16LE and UTF-16BE. Pairs bytes into code units,
/// then pairs surrogate code units into supplementary-plane code points.
pub struct Utf16Decoder {
    fatal: bool,
    big_endian: bool,
    lead_byte: Option<Token>,
    lead_surrogate: Option<Token>,
}

impl Utf16Decoder {
    pub fn new(big_endian: bool, fatal: bool) -> Utf16Decoder {
        Utf16Decoder {
            fatal,
            big_endian,
            lead_byte: None,
            lead_surrogate: None,
        }
    }

    pub fn handler(&mut self, stream: &mut Stream, byte: Option<Token>) -> Result<Step, Error> {
        let b = match byte {
            Some(b) => b,
            None => {
                if self.lead_byte.is_some() || self.lead_surrogate.is_some() {
                    return decoder_error(self.fatal);
                }
                return Ok(Step::Finished);
            }
        };

        let lead_byte = match self.lead_byte.take() {
            Some(lead) => lead,
            None => {
                self.lead_byte = Some(b);
                return Ok(Step::Pending);
            }
        };

        let code_unit = if self.big_endian {
            (lead_byte << 8) + b
        } else {
            (b << 8) + lead_byte
        };

        if let Some(lead_surrogate) = self.lead_surrogate.take() {
            if (0xDC00..=0xDFFF).contains(&code_unit) {
                let code_point =
                    0x10000 + (lead_surrogate - 0xD800) * 0x400 + (code_unit - 0xDC00);
                return Ok(Step::one(code_point));
            }
            // Unpaired lead surrogate: fault it and re-decode the current
            // code unit's bytes from scratch.
            stream.prepend_all(&code_unit_to_bytes(code_unit, self.big_endian));
            return decoder_error(self.fatal);
        }

        if (0xD800..=0xDBFF).contains(&code_unit) {
            self.lead_surrogate = Some(code_unit);
            return Ok(Step::Pending);
        }
        if (0xDC00..=0xDFFF).contains(&code_unit) {
            return decoder_error(self.fatal);
        }
        Ok(Step::one(code_unit))
    }
}

/// Encoder shared by UTF-16LE and UTF-16BE.
pub struct Utf16Encoder {
    big_endian: bool,
}

impl Utf16Encoder {
    pub fn new(big_endian: bool) -> Utf16Encoder {
        Utf16Encoder { big_endian }
    }

    pub fn handler(&mut self, _stream: &mut Stream, code_point: Option<Token>) -> Result<Step, Error> {
        let cp = match code_point {
            Some(cp) => cp,
            None => return Ok(Step::Finished),
        };
        if cp <= 0xFFFF {
            return Ok(Step::emit(&code_unit_to_bytes(cp, self.big_endian)));
        }
        let lead = ((cp - 0x10000) >> 10) + 0xD800;
        let trail = ((cp - 0x10000) & 0x3FF) + 0xDC00;
        let lead_bytes = code_unit_to_bytes(lead, self.big_endian);
        let trail_bytes = code_unit_to_bytes(trail, self.big_endian);
        Ok(Step::emit(&[
            lead_bytes[0],
            lead_bytes[1],
            trail_bytes[0],
            trail_bytes[1],
        ]))
    }
}
