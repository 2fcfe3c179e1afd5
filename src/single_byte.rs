// Copyright 2026 the textcodec developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option. This file may not be copied, modified, or distributed except
// according to those terms.

//! One decoder and one encoder cover all 27 single-byte encodings in the
//! catalog; only the 128-entry mapping table differs.

use crate::error::Error;
use crate::index;
use crate::stream::{Stream, Token};
use crate::variant::{decoder_error, encoder_error, Step};

pub struct SingleByteDecoder {
    fatal: bool,
    table: &'static [Option<u32>],
}

impl SingleByteDecoder {
    pub fn new(table: &'static [Option<u32>], fatal: bool) -> SingleByteDecoder {
        SingleByteDecoder { fatal, table }
    }

    pub fn handler(&mut self, _stream: &mut Stream, byte: Option<Token>) -> Result<Step, Error> {
        let b = match byte {
            Some(b) => b,
            None => return Ok(Step::Finished),
        };
        if b <= 0x7F {
            return Ok(Step::one(b));
        }
        match index::code_point_for(b - 0x80, self.table) {
            Some(code_point) => Ok(Step::one(code_point)),
            None => decoder_error(self.fatal),
        }
    }
}

pub struct SingleByteEncoder {
    table: &'static [Option<u32>],
}

impl SingleByteEncoder {
    pub fn new(table: &'static [Option<u32>]) -> SingleByteEncoder {
        SingleByteEncoder { table }
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
            Some(pointer) => Ok(Step::one(pointer as Token + 0x80)),
            None => encoder_error(cp),
        }
    }
}
