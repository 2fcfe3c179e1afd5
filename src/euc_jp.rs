// Copyright 2026 the textcodec developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option. This file may not be copied, modified, or distributed except
// according to those terms.

use crate::error::Error;
use crate::index;
use crate::stream::{Stream, Token};
use crate::variant::{decoder_error, encoder_error, Step};

/// The decoder reads both the JIS X 0208 and JIS X 0212 planes; 0212 rows
/// are introduced by the 0x8F lead. The encoder only ever produces 0208,
/// which keeps euc-jp round-trippable with the other JIS encodings.
pub struct EucJpDecoder {
    fatal: bool,
    jis0208: &'static [Option<u32>],
    jis0212: &'static [Option<u32>],
    lead: Token,
    jis0212_flag: bool,
}

impl EucJpDecoder {
    pub fn new(
        jis0208: &'static [Option<u32>],
        jis0212: &'static [Option<u32>],
        fatal: bool,
    ) -> EucJpDecoder {
        EucJpDecoder {
            fatal,
            jis0208,
            jis0212,
            lead: 0,
            jis0212_flag: false,
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

        if self.lead == 0x8E && (0xA1..=0xDF).contains(&b) {
            self.lead = 0;
            return Ok(Step::one(0xFF61 - 0xA1 + b));
        }
        if self.lead == 0x8F && (0xA1..=0xFE).contains(&b) {
            self.jis0212_flag = true;
            self.lead = b;
            return Ok(Step::Pending);
        }
        if self.lead != 0 {
            let lead = self.lead;
            self.lead = 0;
            let code_point = if (0xA1..=0xFE).contains(&lead) && (0xA1..=0xFE).contains(&b) {
                let pointer = (lead - 0xA1) * 94 + (b - 0xA1);
                let table = if self.jis0212_flag {
                    self.jis0212
                } else {
                    self.jis0208
                };
                index::code_point_for(pointer, table)
            } else {
                None
            };
            self.jis0212_flag = false;
            if !(0xA1..=0xFE).contains(&b) {
                stream.prepend(b);
            }
            return match code_point {
                Some(cp) => Ok(Step::one(cp)),
                None => decoder_error(self.fatal),
            };
        }

        match b {
            0x00..=0x7F => Ok(Step::one(b)),
            0x8E | 0x8F | 0xA1..=0xFE => {
                self.lead = b;
                Ok(Step::Pending)
            }
            _ => decoder_error(self.fatal),
        }
    }
}

pub struct EucJpEncoder {
    jis0208: &'static [Option<u32>],
}

impl EucJpEncoder {
    pub fn new(jis0208: &'static [Option<u32>]) -> EucJpEncoder {
        EucJpEncoder { jis0208 }
    }

    pub fn handler(&mut self, _stream: &mut Stream, code_point: Option<Token>) -> Result<Step, Error> {
        let cp = match code_point {
            Some(cp) => cp,
            None => return Ok(Step::Finished),
        };
        if cp <= 0x7F {
            return Ok(Step::one(cp));
        }
        if cp == 0xA5 {
            return Ok(Step::one(0x5C));
        }
        if cp == 0x203E {
            return Ok(Step::one(0x7E));
        }
        if (0xFF61..=0xFF9F).contains(&cp) {
            return Ok(Step::pair(0x8E, cp - 0xFF61 + 0xA1));
        }
        let cp = if cp == 0x2212 { 0xFF0D } else { cp };
        match index::pointer_for(cp, self.jis0208) {
            Some(pointer) => {
                let lead = pointer / 94 + 0xA1;
                let trail = pointer % 94 + 0xA1;
                Ok(Step::pair(lead, trail))
            }
            None => encoder_error(cp),
        }
    }
}
