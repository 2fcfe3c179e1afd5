// Copyright 2026 the textcodec developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option. This file may not be copied, modified, or distributed except
// according to those terms.

use crate::error::Error;
use crate::index;
use crate::stream::{Stream, Token};
use crate::variant::{decoder_error, encoder_error, Step};

pub struct Big5Decoder {
    fatal: bool,
    table: &'static [Option<u32>],
    lead: Token,
}

impl Big5Decoder {
    pub fn new(table: &'static [Option<u32>], fatal: bool) -> Big5Decoder {
        Big5Decoder {
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
            let offset: Token = if b < 0x7F { 0x40 } else { 0x62 };
            let pointer = if (0x40..=0x7E).contains(&b) || (0xA1..=0xFE).contains(&b) {
                Some((lead - 0x81) * 157 + (b - offset))
            } else {
                None
            };
            // Four pointers decode to a base letter plus combining mark.
            match pointer {
                Some(1133) => return Ok(Step::pair(0x00CA, 0x0304)),
                Some(1135) => return Ok(Step::pair(0x00CA, 0x030C)),
                Some(1164) => return Ok(Step::pair(0x00EA, 0x0304)),
                Some(1166) => return Ok(Step::pair(0x00EA, 0x030C)),
                _ => {}
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
            0x00..=0x7F => Ok(Step::one(b)),
            0x81..=0xFE => {
                self.lead = b;
                Ok(Step::Pending)
            }
            _ => decoder_error(self.fatal),
        }
    }
}

pub struct Big5Encoder {
    table: &'static [Option<u32>],
}

impl Big5Encoder {
    pub fn new(table: &'static [Option<u32>]) -> Big5Encoder {
        Big5Encoder { table }
    }

    pub fn handler(&mut self, _stream: &mut Stream, code_point: Option<Token>) -> Result<Step, Error> {
        let cp = match code_point {
            Some(cp) => cp,
            None => return Ok(Step::Finished),
        };
        if cp <= 0x7F {
            return Ok(Step::one(cp));
        }
        match index::big5_pointer_for(cp, self.table) {
            Some(pointer) => {
                let lead = pointer / 157 + 0x81;
                let trail = pointer % 157;
                let offset: u32 = if trail < 0x3F { 0x40 } else { 0x62 };
                Ok(Step::pair(lead, trail + offset))
            }
            None => encoder_error(cp),
        }
    }
}
