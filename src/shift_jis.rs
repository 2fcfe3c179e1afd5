// Copyright 2026 the textcodec developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option. This file may not be copied, modified, or distributed except
// according to those terms.

use crate::error::Error;
use crate::index;
use crate::stream::{Stream, Token};
use crate::variant::{decoder_error, encoder_error, Step};

pub struct ShiftJisDecoder {
    fatal: bool,
    table: &'static [Option<u32>],
    lead: Token,
}

impl ShiftJisDecoder {
    pub fn new(table: &'static [Option<u32>], fatal: bool) -> ShiftJisDecoder {
        ShiftJisDecoder {
            fatal,
            table,
            lead: 0,
        }
    }

    pub fn handler(&mut self, stream: &mut Stream, byte: Option<Token>) -> Result<Step, Error> {
        let b = match byte {
            Some(b) => b,
            None => {
                if self.lead != 0 {
                    self.lead = 0;
                    return decoder_error(self.fatal);
                }
                return Ok(Step::Finished);
            }
        };

        if self.lead != 0 {
            let lead = self.lead;
            self.lead = 0;
            let offset: Token = if b < 0x7F { 0x40 } else { 0x41 };
            let lead_offset: Token = if lead < 0xA0 { 0x81 } else { 0xC1 };
            let pointer = if (0x40..=0x7E).contains(&b) || (0x80..=0xFC).contains(&b) {
                Some((lead - lead_offset) * 188 + b - offset)
            } else {
                None
            };
            // Pointers 8836..=10715 are the end-user-defined range, mapped
            // linearly onto the private use area.
            if let Some(p) = pointer {
                if (8836..=10715).contains(&p) {
                    return Ok(Step::one(0xE000 - 8836 + p));
                }
            }
            let code_point = pointer.and_then(|p| index::code_point_for(p, self.table));
            if let Some(cp) = code_point {
                return Ok(Step::one(cp));
            }
            if b <= 0x7F {
                stream.prepend(b);
            }
            return decoder_error(self.fatal);
        }

        match b {
            0x00..=0x80 => Ok(Step::one(b)),
            0xA1..=0xDF => Ok(Step::one(0xFF61 - 0xA1 + b)),
            0x81..=0x9F | 0xE0..=0xFC => {
                self.lead = b;
                Ok(Step::Pending)
            }
            _ => decoder_error(self.fatal),
        }
    }
}

pub struct ShiftJisEncoder {
    table: &'static [Option<u32>],
}

impl ShiftJisEncoder {
    pub fn new(table: &'static [Option<u32>]) -> ShiftJisEncoder {
        ShiftJisEncoder { table }
    }

    pub fn handler(&mut self, _stream: &mut Stream, code_point: Option<Token>) -> Result<Step, Error> {
        let cp = match code_point {
            Some(cp) => cp,
            None => return Ok(Step::Finished),
        };
        if cp <= 0x7F || cp == 0x80 {
            return Ok(Step::one(cp));
        }
        if cp == 0xA5 {
            return Ok(Step::one(0x5C));
        }
        if cp == 0x203E {
            return Ok(Step::one(0x7E));
        }
        if (0xFF61..=0xFF9F).contains(&cp) {
            return Ok(Step::one(cp - 0xFF61 + 0xA1));
        }
        let cp = if cp == 0x2212 { 0xFF0D } else { cp };
        match index::shift_jis_pointer_for(cp, self.table) {
            Some(pointer) => {
                let lead = pointer / 188;
                let lead_offset: u32 = if lead < 0x1F { 0x81 } else { 0xC1 };
                let trail = pointer % 188;
                let offset: u32 = if trail < 0x3F { 0x40 } else { 0x41 };
                Ok(Step::pair(lead + lead_offset, trail + offset))
            }
            None => encoder_error(cp),
        }
    }
}
