// Copyright 2026 the textcodec developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option. This file may not be copied, modified, or distributed except
// according to those terms.

use crate::error::Error;
use crate::index;
use crate::stream::{Stream, Token};
use crate::variant::{decoder_error, encoder_error, Step};

pub struct EucKrDecoder {
    fatal: bool,
    table: &'static [Option<u32>],
    lead: Token,
}

impl EucKrDecoder {
    pub fn new(table: &'static [Option<u32>], fatal: bool) -> EucKrDecoder {
        EucKrDecoder {
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
            let pointer = if (0x41..=0xFE).contains(&b) {
                Some((lead - 0x81) * 190 + (b - 0x41))
            } else {
                None
            };
            let code_point = pointer.and_then(|p| index::code_point_for(p, self.table));
            if pointer.is_none() && b <= 0x7F {
                stream.prepend(b);
            }
            return match code_point {
                Some(cp) => Ok(Step::one(cp)),
                None => decoder_error(self.fatal),
            };
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

pub struct EucKrEncoder {
    table: &'static [Option<u32>],
}

impl EucKrEncoder {
    pub fn new(table: &'static [Option<u32>]) -> EucKrEncoder {
        EucKrEncoder { table }
    }

    pub fn handler(&mut self, _stream: &mut Stream, code_point: Option<Token>) -> Result<Step, Error> {
        let cp = match code_point {
            Some(cp) => cp,
            None => return Ok(Step::Finished),
        };
        if cp <= 0x7F {
            return Ok(Step::one(cp));
        }
        match index::pointer_for(cp, self.table) {
            Some(pointer) => {
                let lead = pointer / 190 + 0x81;
                let trail = pointer % 190 + 0x41;
                Ok(Step::pair(lead, trail))
            }
            None => encoder_error(cp),
        }
    }
}
