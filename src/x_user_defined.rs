// Copyright 2026 the textcodec developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option. This file may not be copied, modified, or distributed except
// according to those terms.

//! x-user-defined maps the high half of the byte range onto a window of the
//! private use area, with no table involved. Nothing here can be malformed
//! on the decode side.

use crate::error::Error;
use crate::stream::{Stream, Token};
use crate::variant::{encoder_error, Step};

pub struct XUserDefinedDecoder;

impl XUserDefinedDecoder {
    pub fn new() -> XUserDefinedDecoder {
        XUserDefinedDecoder
    }

    pub fn handler(&mut self, _stream: &mut Stream, byte: Option<Token>) -> Result<Step, Error> {
        match byte {
            Some(b @ 0x00..=0x7F) => Ok(Step::one(b)),
            Some(b) => Ok(Step::one(0xF780 + b - 0x80)),
            None => Ok(Step::Finished),
        }
    }
}

impl Default for XUserDefinedDecoder {
    fn default() -> XUserDefinedDecoder {
        XUserDefinedDecoder::new()
    }
}

pub struct XUserDefinedEncoder;

impl XUserDefinedEncoder {
    pub fn new() -> XUserDefinedEncoder {
        XUserDefinedEncoder
    }

    pub fn handler(&mut self, _stream: &mut Stream, code_point: Option<Token>) -> Result<Step, Error> {
        match code_point {
            Some(cp @ 0x00..=0x7F) => Ok(Step::one(cp)),
            Some(cp @ 0xF780..=0xF7FF) => Ok(Step::one(cp - 0xF780 + 0x80)),
            Some(cp) => encoder_error(cp),
            None => Ok(Step::Finished),
        }
    }
}

impl Default for XUserDefinedEncoder {
    fn default() -> XUserDefinedEncoder {
        XUserDefinedEncoder::new()
    }
}
