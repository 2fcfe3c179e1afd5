// Copyright 2026 the textcodec developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Enums that wrap the per-encoding decoders and encoders, plus the
//! tri-state result their handlers return. The dispatch is written out
//! explicitly for the finite catalog so the state machines stay `Sized` and
//! the facades can own them by value.

use smallvec::SmallVec;

use crate::big5::{Big5Decoder, Big5Encoder};
use crate::error::Error;
use crate::euc_jp::{EucJpDecoder, EucJpEncoder};
use crate::euc_kr::{EucKrDecoder, EucKrEncoder};
use crate::gb18030::{Gb18030Decoder, Gb18030Encoder};
use crate::iso_2022_jp::{Iso2022JpDecoder, Iso2022JpEncoder};
use crate::shift_jis::{ShiftJisDecoder, ShiftJisEncoder};
use crate::single_byte::{SingleByteDecoder, SingleByteEncoder};
use crate::stream::{Stream, Token};
use crate::utf_16::{Utf16Decoder, Utf16Encoder};
use crate::utf_8::{Utf8Decoder, Utf8Encoder};
use crate::x_user_defined::{XUserDefinedDecoder, XUserDefinedEncoder};

/// What one handler step produced.
///
/// A handler consumes one token (or the end-of-stream signal) per step and
/// reports one of three outcomes; a single return channel with sentinel
/// values would conflate "no output yet" with "stop driving me".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Tokens to append to the output, in order. At most four per step
    /// (a GB18030 four-byte sequence or a UTF-16 surrogate pair's bytes).
    Emit(SmallVec<[Token; 4]>),
    /// Not enough input yet to produce anything.
    Pending,
    /// End of stream reached with no pending state; stop driving the
    /// handler.
    Finished,
}

impl Step {
    pub(crate) fn one(token: Token) -> Step {
        Step::Emit(SmallVec::from_slice(&[token]))
    }

    pub(crate) fn pair(first: Token, second: Token) -> Step {
        Step::Emit(SmallVec::from_slice(&[first, second]))
    }

    pub(crate) fn emit(tokens: &[Token]) -> Step {
        Step::Emit(SmallVec::from_slice(tokens))
    }
}

/// In fatal mode a malformed sequence is a hard error; otherwise one
/// U+FFFD REPLACEMENT CHARACTER is substituted and decoding continues.
pub(crate) fn decoder_error(fatal: bool) -> Result<Step, Error> {
    if fatal {
        Err(Error::Malformed)
    } else {
        Ok(Step::one(0xFFFD))
    }
}

/// Unmappable code points are unrecoverable on the encode side in both
/// error modes: the catalog defines no substitute byte for the legacy
/// encodings.
pub(crate) fn encoder_error(code_point: Token) -> Result<Step, Error> {
    Err(Error::Unmappable(code_point))
}

/// A decoder state machine for one encoding, dispatched by variant.
pub enum VariantDecoder {
    Utf8(Utf8Decoder),
    Utf16(Utf16Decoder),
    SingleByte(SingleByteDecoder),
    Gb18030(Gb18030Decoder),
    Big5(Big5Decoder),
    ShiftJis(ShiftJisDecoder),
    EucJp(EucJpDecoder),
    Iso2022Jp(Iso2022JpDecoder),
    EucKr(EucKrDecoder),
    XUserDefined(XUserDefinedDecoder),
}

impl VariantDecoder {
    /// Feeds one byte (or `None` for end-of-stream) to the state machine.
    /// `stream` is the byte source the token was read from; handlers push
    /// look-ahead bytes back onto it when a sequence turns out malformed.
    pub fn handler(&mut self, stream: &mut Stream, byte: Option<Token>) -> Result<Step, Error> {
        match self {
            VariantDecoder::Utf8(d) => d.handler(stream, byte),
            VariantDecoder::Utf16(d) => d.handler(stream, byte),
            VariantDecoder::SingleByte(d) => d.handler(stream, byte),
            VariantDecoder::Gb18030(d) => d.handler(stream, byte),
            VariantDecoder::Big5(d) => d.handler(stream, byte),
            VariantDecoder::ShiftJis(d) => d.handler(stream, byte),
            VariantDecoder::EucJp(d) => d.handler(stream, byte),
            VariantDecoder::Iso2022Jp(d) => d.handler(stream, byte),
            VariantDecoder::EucKr(d) => d.handler(stream, byte),
            VariantDecoder::XUserDefined(d) => d.handler(stream, byte),
        }
    }
}

/// An encoder state machine for one encoding, dispatched by variant.
pub enum VariantEncoder {
    Utf8(Utf8Encoder),
    Utf16(Utf16Encoder),
    SingleByte(SingleByteEncoder),
    Gb18030(Gb18030Encoder),
    Big5(Big5Encoder),
    ShiftJis(ShiftJisEncoder),
    EucJp(EucJpEncoder),
    Iso2022Jp(Iso2022JpEncoder),
    EucKr(EucKrEncoder),
    XUserDefined(XUserDefinedEncoder),
}

impl VariantEncoder {
    /// Feeds one code point (or `None` for end-of-stream) to the state
    /// machine.
    pub fn handler(
        &mut self,
        stream: &mut Stream,
        code_point: Option<Token>,
    ) -> Result<Step, Error> {
        match self {
            VariantEncoder::Utf8(e) => e.handler(stream, code_point),
            VariantEncoder::Utf16(e) => e.handler(stream, code_point),
            VariantEncoder::SingleByte(e) => e.handler(stream, code_point),
            VariantEncoder::Gb18030(e) => e.handler(stream, code_point),
            VariantEncoder::Big5(e) => e.handler(stream, code_point),
            VariantEncoder::ShiftJis(e) => e.handler(stream, code_point),
            VariantEncoder::EucJp(e) => e.handler(stream, code_point),
            VariantEncoder::Iso2022Jp(e) => e.handler(stream, code_point),
            VariantEncoder::EucKr(e) => e.handler(stream, code_point),
            VariantEncoder::XUserDefined(e) => e.handler(stream, code_point),
        }
    }
}
