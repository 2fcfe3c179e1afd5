// Copyright 2026 the textcodec developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option. This file may not be copied, modified, or distributed except
// according to those terms.

use crate::error::Error;
use crate::index;
use crate::stream::{Stream, Token};
use crate::variant::{decoder_error, encoder_error, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Iso2022JpDecoderState {
    Ascii,
    Roman,
    Katakana,
    LeadByte,
    TrailByte,
    EscapeStart,
    Escape,
}

/// Escape-switched decoder. `output_state` remembers the mode to fall back
/// to when an escape sequence does not pan out, and `output_flag` tracks
/// whether the previous escape produced no characters, so that two mode
/// switches in a row fault.
pub struct Iso2022JpDecoder {
    fatal: bool,
    table: &'static [Option<u32>],
    state: Iso2022JpDecoderState,
    output_state: Iso2022JpDecoderState,
    lead: Token,
    output_flag: bool,
}

impl Iso2022JpDecoder {
    pub fn new(table: &'static [Option<u32>], fatal: bool) -> Iso2022JpDecoder {
        Iso2022JpDecoder {
            fatal,
            table,
            state: Iso2022JpDecoderState::Ascii,
            output_state: Iso2022JpDecoderState::Ascii,
            lead: 0,
            output_flag: false,
        }
    }

    pub fn handler(&mut self, stream: &mut Stream, byte: Option<Token>) -> Result<Step, Error> {
        use Iso2022JpDecoderState::*;
        match self.state {
            Ascii => match byte {
                Some(0x1B) => {
                    self.state = EscapeStart;
                    Ok(Step::Pending)
                }
                Some(b @ 0x00..=0x7F) if b != 0x0E && b != 0x0F => {
                    self.output_flag = false;
                    Ok(Step::one(b))
                }
                None => Ok(Step::Finished),
                Some(_) => {
                    self.output_flag = false;
                    decoder_error(self.fatal)
                }
            },
            Roman => match byte {
                Some(0x1B) => {
                    self.state = EscapeStart;
                    Ok(Step::Pending)
                }
                Some(0x5C) => {
                    self.output_flag = false;
                    Ok(Step::one(0xA5))
                }
                Some(0x7E) => {
                    self.output_flag = false;
                    Ok(Step::one(0x203E))
                }
                Some(b @ 0x00..=0x7F) if b != 0x0E && b != 0x0F => {
                    self.output_flag = false;
                    Ok(Step::one(b))
                }
                None => Ok(Step::Finished),
                Some(_) => {
                    self.output_flag = false;
                    decoder_error(self.fatal)
                }
            },
            Katakana => match byte {
                Some(0x1B) => {
                    self.state = EscapeStart;
                    Ok(Step::Pending)
                }
                Some(b @ 0x21..=0x5F) => {
                    self.output_flag = false;
                    Ok(Step::one(0xFF61 - 0x21 + b))
                }
                None => Ok(Step::Finished),
                Some(_) => {
                    self.output_flag = false;
                    decoder_error(self.fatal)
                }
            },
            LeadByte => match byte {
                Some(0x1B) => {
                    self.state = EscapeStart;
                    Ok(Step::Pending)
                }
                Some(b @ 0x21..=0x7E) => {
                    self.output_flag = false;
                    self.lead = b;
                    self.state = TrailByte;
                    Ok(Step::Pending)
                }
                None => Ok(Step::Finished),
                Some(_) => {
                    self.output_flag = false;
                    decoder_error(self.fatal)
                }
            },
            TrailByte => match byte {
                Some(0x1B) => {
                    self.state = EscapeStart;
                    decoder_error(self.fatal)
                }
                Some(b @ 0x21..=0x7E) => {
                    self.state = LeadByte;
                    let pointer = (self.lead - 0x21) * 94 + b - 0x21;
                    match index::code_point_for(pointer, self.table) {
                        Some(cp) => Ok(Step::one(cp)),
                        None => decoder_error(self.fatal),
                    }
                }
                None => {
                    self.state = LeadByte;
                    decoder_error(self.fatal)
                }
                Some(_) => {
                    self.state = LeadByte;
                    decoder_error(self.fatal)
                }
            },
            EscapeStart => {
                match byte {
                    Some(b @ (0x24 | 0x28)) => {
                        self.lead = b;
                        self.state = Escape;
                        return Ok(Step::Pending);
                    }
                    Some(b) => stream.prepend(b),
                    None => {}
                }
                self.output_flag = false;
                self.state = self.output_state;
                decoder_error(self.fatal)
            }
            Escape => {
                let lead = self.lead;
                self.lead = 0;
                let next = match (lead, byte) {
                    (0x28, Some(0x42)) => Some(Ascii),
                    (0x28, Some(0x4A)) => Some(Roman),
                    (0x28, Some(0x49)) => Some(Katakana),
                    (0x24, Some(0x40 | 0x42)) => Some(LeadByte),
                    _ => None,
                };
                if let Some(next) = next {
                    self.state = next;
                    self.output_state = next;
                    let flag = self.output_flag;
                    self.output_flag = true;
                    return if flag {
                        // Two escapes with no character in between.
                        decoder_error(self.fatal)
                    } else {
                        Ok(Step::Pending)
                    };
                }
                match byte {
                    Some(b) => stream.prepend_all(&[lead, b]),
                    None => stream.prepend(lead),
                }
                self.output_flag = false;
                self.state = self.output_state;
                decoder_error(self.fatal)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Iso2022JpEncoderState {
    Ascii,
    Roman,
    Jis0208,
}

pub struct Iso2022JpEncoder {
    table: &'static [Option<u32>],
    state: Iso2022JpEncoderState,
}

impl Iso2022JpEncoder {
    pub fn new(table: &'static [Option<u32>]) -> Iso2022JpEncoder {
        Iso2022JpEncoder {
            table,
            state: Iso2022JpEncoderState::Ascii,
        }
    }

    pub fn handler(&mut self, stream: &mut Stream, code_point: Option<Token>) -> Result<Step, Error> {
        use Iso2022JpEncoderState::*;
        let cp = match code_point {
            Some(cp) => cp,
            None => {
                // The stream must end in ASCII mode.
                if self.state != Ascii {
                    self.state = Ascii;
                    return Ok(Step::emit(&[0x1B, 0x28, 0x42]));
                }
                return Ok(Step::Finished);
            }
        };

        if (self.state == Ascii || self.state == Roman)
            && (cp == 0x0E || cp == 0x0F || cp == 0x1B)
        {
            // SO, SI and ESC in the data would desynchronize the modes.
            return encoder_error(0xFFFD);
        }
        if self.state == Ascii && cp <= 0x7F {
            return Ok(Step::one(cp));
        }
        if self.state == Roman
            && ((cp <= 0x7F && cp != 0x5C && cp != 0x7E) || cp == 0xA5 || cp == 0x203E)
        {
            if cp <= 0x7F {
                return Ok(Step::one(cp));
            }
            if cp == 0xA5 {
                return Ok(Step::one(0x5C));
            }
            return Ok(Step::one(0x7E));
        }
        if cp <= 0x7F && self.state != Ascii {
            stream.prepend(cp);
            self.state = Ascii;
            return Ok(Step::emit(&[0x1B, 0x28, 0x42]));
        }
        if (cp == 0xA5 || cp == 0x203E) && self.state != Roman {
            stream.prepend(cp);
            self.state = Roman;
            return Ok(Step::emit(&[0x1B, 0x28, 0x4A]));
        }
        let cp = if cp == 0x2212 { 0xFF0D } else { cp };
        let pointer = match index::pointer_for(cp, self.table) {
            Some(pointer) => pointer,
            None => return encoder_error(cp),
        };
        if self.state != Jis0208 {
            stream.prepend(cp);
            self.state = Jis0208;
            return Ok(Step::emit(&[0x1B, 0x24, 0x42]));
        }
        let lead = pointer / 94 + 0x21;
        let trail = pointer % 94 + 0x21;
        Ok(Step::pair(lead, trail))
    }
}
