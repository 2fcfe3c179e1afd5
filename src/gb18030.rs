// Copyright 2026 the textcodec developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option. This file may not be copied, modified, or distributed except
// according to those terms.

//! GBK and gb18030 share these state machines. The decoder is always the
//! full gb18030 one; a `gbk` flag on the encoder restricts output to
//! two-byte sequences and maps U+20AC to the 0x80 money byte.

use crate::error::Error;
use crate::index;
use crate::stream::{Stream, Token};
use crate::variant::{decoder_error, encoder_error, Step};

pub struct Gb18030Decoder {
    fatal: bool,
    table: &'static [Option<u32>],
    ranges: &'static [(u32, u32)],
    first: Token,
    second: Token,
    third: Token,
}

impl Gb18030Decoder {
    pub fn new(
        table: &'static [Option<u32>],
        ranges: &'static [(u32, u32)],
        fatal: bool,
    ) -> Gb18030Decoder {
        Gb18030Decoder {
            fatal,
            table,
            ranges,
            first: 0,
            second: 0,
            third: 0,
        }
    }

    pub fn handler(&mut self, stream: &mut Stream, byte: Option<Token>) -> Result<Step, Error> {
        let b = match byte {
            Some(b) => b,
            None => {
                if self.first == 0 && self.second == 0 && self.third == 0 {
                    return Ok(Step::Finished);
                }
                self.first = 0;
                self.second = 0;
                self.third = 0;
                return decoder_error(self.fatal);
            }
        };

        if self.third != 0 {
            let code_point = if (0x30..=0x39).contains(&b) {
                let pointer = (((self.first - 0x81) * 10 + self.second - 0x30) * 126
                    + self.third - 0x81)
                    * 10
                    + b
                    - 0x30;
                index::gb18030_ranges_code_point_for(pointer, self.ranges)
            } else {
                None
            };
            let buffer = [self.second, self.third, b];
            self.first = 0;
            self.second = 0;
            self.third = 0;
            match code_point {
                Some(cp) => return Ok(Step::one(cp)),
                None => {
                    // The four-byte form fell through; replay everything
                    // after the lead so shorter interpretations get a
                    // chance.
                    stream.prepend_all(&buffer);
                    return decoder_error(self.fatal);
                }
            }
        }

        if self.second != 0 {
            if (0x81..=0xFE).contains(&b) {
                self.third = b;
                return Ok(Step::Pending);
            }
            let buffer = [self.second, b];
            self.first = 0;
            self.second = 0;
            stream.prepend_all(&buffer);
            return decoder_error(self.fatal);
        }

        if self.first != 0 {
            if (0x30..=0x39).contains(&b) {
                self.second = b;
                return Ok(Step::Pending);
            }
            let lead = self.first;
            self.first = 0;
            let offset: Token = if b < 0x7F { 0x40 } else { 0x41 };
            let pointer = if (0x40..=0x7E).contains(&b) || (0x80..=0xFE).contains(&b) {
                Some((lead - 0x81) * 190 + (b - offset))
            } else {
                None
            };
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
            0x80 => Ok(Step::one(0x20AC)),
            0x81..=0xFE => {
                self.first = b;
                Ok(Step::Pending)
            }
            _ => decoder_error(self.fatal),
        }
    }
}

pub struct Gb18030Encoder {
    table: &'static [Option<u32>],
    ranges: &'static [(u32, u32)],
    gbk: bool,
}

impl Gb18030Encoder {
    pub fn new(
        table: &'static [Option<u32>],
        ranges: &'static [(u32, u32)],
        gbk: bool,
    ) -> Gb18030Encoder {
        Gb18030Encoder { table, ranges, gbk }
    }

    pub fn handler(&mut self, _stream: &mut Stream, code_point: Option<Token>) -> Result<Step, Error> {
        let cp = match code_point {
            Some(cp) => cp,
            None => return Ok(Step::Finished),
        };
        if cp <= 0x7F {
            return Ok(Step::one(cp));
        }
        // U+E5E5 sits in a private-use hole the index intentionally skips.
        if cp == 0xE5E5 {
            return encoder_error(cp);
        }
        if self.gbk && cp == 0x20AC {
            return Ok(Step::one(0x80));
        }
        if let Some(pointer) = index::pointer_for(cp, self.table) {
            let pointer = pointer as Token;
            let lead = pointer / 190 + 0x81;
            let trail = pointer % 190;
            let offset: Token = if trail < 0x3F { 0x40 } else { 0x41 };
            return Ok(Step::pair(lead, trail + offset));
        }
        if self.gbk {
            return encoder_error(cp);
        }
        let mut pointer = index::gb18030_ranges_pointer_for(cp, self.ranges);
        let byte1 = pointer / (10 * 126 * 10);
        pointer -= byte1 * (10 * 126 * 10);
        let byte2 = pointer / (10 * 126);
        pointer -= byte2 * (10 * 126);
        let byte3 = pointer / 10;
        let byte4 = pointer - byte3 * 10;
        Ok(Step::emit(&[
            byte1 + 0x81,
            byte2 + 0x30,
            byte3 + 0x81,
            byte4 + 0x30,
        ]))
    }
}
