// Copyright 2026 the textcodec developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option. This file may not be copied, modified, or distributed except
// according to those terms.

//! textcodec implements the WHATWG Encoding Standard: streaming decoders
//! and encoders for UTF-8, UTF-16LE/BE and the legacy web encodings,
//! resolved from labels the way browsers resolve `charset` values.
//!
//! The mapping tables for the legacy encodings ("indexes") are not
//! compiled in. The embedding application loads them, typically from an
//! `encoding-indexes` JSON file, and installs them once at startup:
//!
//! ```no_run
//! use textcodec::index::{install, Indexes};
//! use textcodec::TextDecoder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let json = std::fs::read_to_string("encoding-indexes.json")?;
//! install(Indexes::from_json_str(&json)?);
//!
//! let mut decoder = TextDecoder::new("shift_jis", Default::default())?;
//! let text = decoder.decode(&[0x88, 0x9F])?;
//! assert_eq!(text, "亜");
//! # Ok(())
//! # }
//! ```
//!
//! UTF-8, UTF-16LE, UTF-16BE and x-user-defined are algorithmic and work
//! without any installed indexes.
//!
//! Decoding is lossy by default (malformed sequences become U+FFFD) and
//! strict with `fatal`. Encoding is always strict: the legacy encodings
//! define no substitute byte, so an unmappable code point is an error.
//! Both facades support incremental use through the `stream` option.

pub mod error;
pub mod index;
pub mod stream;
pub mod variant;

pub mod big5;
pub mod euc_jp;
pub mod euc_kr;
pub mod gb18030;
pub mod iso_2022_jp;
pub mod shift_jis;
pub mod single_byte;
pub mod utf_16;
pub mod utf_8;
pub mod x_user_defined;

use std::collections::HashMap;

use once_cell::sync::Lazy;

pub use crate::error::Error;
pub use crate::stream::{Stream, Token};
pub use crate::variant::{Step, VariantDecoder, VariantEncoder};

use crate::big5::{Big5Decoder, Big5Encoder};
use crate::euc_jp::{EucJpDecoder, EucJpEncoder};
use crate::euc_kr::{EucKrDecoder, EucKrEncoder};
use crate::gb18030::{Gb18030Decoder, Gb18030Encoder};
use crate::iso_2022_jp::{Iso2022JpDecoder, Iso2022JpEncoder};
use crate::shift_jis::{ShiftJisDecoder, ShiftJisEncoder};
use crate::single_byte::{SingleByteDecoder, SingleByteEncoder};
use crate::utf_16::{Utf16Decoder, Utf16Encoder};
use crate::utf_8::{Utf8Decoder, Utf8Encoder};
use crate::x_user_defined::{XUserDefinedDecoder, XUserDefinedEncoder};

/// One entry of the encoding catalog: a canonical name plus the labels
/// that resolve to it.
pub struct Encoding {
    name: &'static str,
    labels: &'static [&'static str],
}

macro_rules! encoding {
    ($(#[$meta:meta])* $id:ident, $name:expr, [$($label:expr),+ $(,)?]) => {
        $(#[$meta])*
        pub static $id: Encoding = Encoding {
            name: $name,
            labels: &[$($label),+],
        };
    };
}

encoding!(UTF_8, "UTF-8", ["unicode-1-1-utf-8", "utf-8", "utf8"]);
encoding!(IBM866, "IBM866", ["866", "cp866", "csibm866", "ibm866"]);
encoding!(
    ISO_8859_2,
    "ISO-8859-2",
    [
        "csisolatin2",
        "iso-8859-2",
        "iso-ir-101",
        "iso8859-2",
        "iso88592",
        "iso_8859-2",
        "iso_8859-2:1987",
        "l2",
        "latin2",
    ]
);
encoding!(
    ISO_8859_3,
    "ISO-8859-3",
    [
        "csisolatin3",
        "iso-8859-3",
        "iso-ir-109",
        "iso8859-3",
        "iso88593",
        "iso_8859-3",
        "iso_8859-3:1988",
        "l3",
        "latin3",
    ]
);
encoding!(
    ISO_8859_4,
    "ISO-8859-4",
    [
        "csisolatin4",
        "iso-8859-4",
        "iso-ir-110",
        "iso8859-4",
        "iso88594",
        "iso_8859-4",
        "iso_8859-4:1988",
        "l4",
        "latin4",
    ]
);
encoding!(
    ISO_8859_5,
    "ISO-8859-5",
    [
        "csisolatincyrillic",
        "cyrillic",
        "iso-8859-5",
        "iso-ir-144",
        "iso8859-5",
        "iso88595",
        "iso_8859-5",
        "iso_8859-5:1988",
    ]
);
encoding!(
    ISO_8859_6,
    "ISO-8859-6",
    [
        "arabic",
        "asmo-708",
        "csiso88596e",
        "csiso88596i",
        "csisolatinarabic",
        "ecma-114",
        "iso-8859-6",
        "iso-8859-6-e",
        "iso-8859-6-i",
        "iso-ir-127",
        "iso8859-6",
        "iso88596",
        "iso_8859-6",
        "iso_8859-6:1987",
    ]
);
encoding!(
    ISO_8859_7,
    "ISO-8859-7",
    [
        "csisolatingreek",
        "ecma-118",
        "elot_928",
        "greek",
        "greek8",
        "iso-8859-7",
        "iso-ir-126",
        "iso8859-7",
        "iso88597",
        "iso_8859-7",
        "iso_8859-7:1987",
        "sun_eu_greek",
    ]
);
encoding!(
    ISO_8859_8,
    "ISO-8859-8",
    [
        "csiso88598e",
        "csisolatinhebrew",
        "hebrew",
        "iso-8859-8",
        "iso-8859-8-e",
        "iso-ir-138",
        "iso8859-8",
        "iso88598",
        "iso_8859-8",
        "iso_8859-8:1988",
        "visual",
    ]
);
encoding!(
    ISO_8859_10,
    "ISO-8859-10",
    [
        "csisolatin6",
        "iso-8859-10",
        "iso-ir-157",
        "iso8859-10",
        "iso885910",
        "l6",
        "latin6",
    ]
);
encoding!(
    ISO_8859_13,
    "ISO-8859-13",
    ["iso-8859-13", "iso8859-13", "iso885913"]
);
encoding!(
    ISO_8859_14,
    "ISO-8859-14",
    ["iso-8859-14", "iso8859-14", "iso885914"]
);
encoding!(
    ISO_8859_15,
    "ISO-8859-15",
    [
        "csisolatin9",
        "iso-8859-15",
        "iso8859-15",
        "iso885915",
        "iso_8859-15",
        "l9",
    ]
);
encoding!(ISO_8859_16, "ISO-8859-16", ["iso-8859-16"]);
encoding!(KOI8_R, "KOI8-R", ["cskoi8r", "koi", "koi8", "koi8-r", "koi8_r"]);
encoding!(KOI8_U, "KOI8-U", ["koi8-ru", "koi8-u"]);
encoding!(
    MACINTOSH,
    "macintosh",
    ["csmacintosh", "mac", "macintosh", "x-mac-roman"]
);
encoding!(
    WINDOWS_874,
    "windows-874",
    [
        "dos-874",
        "iso-8859-11",
        "iso8859-11",
        "iso885911",
        "tis-620",
        "windows-874",
    ]
);
encoding!(WINDOWS_1250, "windows-1250", ["cp1250", "windows-1250", "x-cp1250"]);
encoding!(WINDOWS_1251, "windows-1251", ["cp1251", "windows-1251", "x-cp1251"]);
encoding!(
    /// The default for unlabeled content on the web; also where the plain
    /// "ascii" and "latin1" labels land.
    WINDOWS_1252,
    "windows-1252",
    [
        "ansi_x3.4-1968",
        "ascii",
        "cp1252",
        "cp819",
        "csisolatin1",
        "ibm819",
        "iso-8859-1",
        "iso-ir-100",
        "iso8859-1",
        "iso88591",
        "iso_8859-1",
        "iso_8859-1:1987",
        "l1",
        "latin1",
        "us-ascii",
        "windows-1252",
        "x-cp1252",
    ]
);
encoding!(WINDOWS_1253, "windows-1253", ["cp1253", "windows-1253", "x-cp1253"]);
encoding!(
    WINDOWS_1254,
    "windows-1254",
    [
        "cp1254",
        "csisolatin5",
        "iso-8859-9",
        "iso-ir-148",
        "iso8859-9",
        "iso88599",
        "iso_8859-9",
        "iso_8859-9:1989",
        "l5",
        "latin5",
        "windows-1254",
        "x-cp1254",
    ]
);
encoding!(WINDOWS_1255, "windows-1255", ["cp1255", "windows-1255", "x-cp1255"]);
encoding!(WINDOWS_1256, "windows-1256", ["cp1256", "windows-1256", "x-cp1256"]);
encoding!(WINDOWS_1257, "windows-1257", ["cp1257", "windows-1257", "x-cp1257"]);
encoding!(WINDOWS_1258, "windows-1258", ["cp1258", "windows-1258", "x-cp1258"]);
encoding!(
    X_MAC_CYRILLIC,
    "x-mac-cyrillic",
    ["x-mac-cyrillic", "x-mac-ukrainian"]
);
encoding!(
    GBK,
    "GBK",
    [
        "chinese",
        "csgb2312",
        "csiso58gb231280",
        "gb2312",
        "gb_2312",
        "gb_2312-80",
        "gbk",
        "iso-ir-58",
        "x-gbk",
    ]
);
encoding!(GB18030, "gb18030", ["gb18030"]);
encoding!(
    BIG5,
    "Big5",
    ["big5", "big5-hkscs", "cn-big5", "csbig5", "x-x-big5"]
);
encoding!(
    EUC_JP,
    "EUC-JP",
    ["cseucpkdfmtjapanese", "euc-jp", "x-euc-jp"]
);
encoding!(ISO_2022_JP, "ISO-2022-JP", ["csiso2022jp", "iso-2022-jp"]);
encoding!(
    SHIFT_JIS,
    "Shift_JIS",
    [
        "csshiftjis",
        "ms932",
        "ms_kanji",
        "shift-jis",
        "shift_jis",
        "sjis",
        "windows-31j",
        "x-sjis",
    ]
);
encoding!(
    EUC_KR,
    "EUC-KR",
    [
        "cseuckr",
        "csksc56011987",
        "euc-kr",
        "iso-ir-149",
        "korean",
        "ks_c_5601-1987",
        "ks_c_5601-1989",
        "ksc5601",
        "ksc_5601",
        "windows-949",
    ]
);
encoding!(
    /// A deliberate dead end. Labels for encodings that were used in
    /// smuggling attacks resolve here, and here refuses to instantiate.
    REPLACEMENT,
    "replacement",
    [
        "csiso2022kr",
        "hz-gb-2312",
        "iso-2022-cn",
        "iso-2022-cn-ext",
        "iso-2022-kr",
        "replacement",
    ]
);
encoding!(UTF_16BE, "UTF-16BE", ["unicodefffe", "utf-16be"]);
encoding!(
    UTF_16LE,
    "UTF-16LE",
    [
        "csunicode",
        "iso-10646-ucs-2",
        "ucs-2",
        "unicode",
        "unicodefeff",
        "utf-16",
        "utf-16le",
    ]
);
encoding!(X_USER_DEFINED, "x-user-defined", ["x-user-defined"]);

/// Every encoding in the catalog, in Encoding Standard order.
/// ISO-8859-8-I is deliberately absent: the standard `encoding-indexes`
/// data carries no table under that name, so its labels do not resolve.
pub static ENCODINGS: [&Encoding; 39] = [
    &UTF_8,
    &IBM866,
    &ISO_8859_2,
    &ISO_8859_3,
    &ISO_8859_4,
    &ISO_8859_5,
    &ISO_8859_6,
    &ISO_8859_7,
    &ISO_8859_8,
    &ISO_8859_10,
    &ISO_8859_13,
    &ISO_8859_14,
    &ISO_8859_15,
    &ISO_8859_16,
    &KOI8_R,
    &KOI8_U,
    &MACINTOSH,
    &WINDOWS_874,
    &WINDOWS_1250,
    &WINDOWS_1251,
    &WINDOWS_1252,
    &WINDOWS_1253,
    &WINDOWS_1254,
    &WINDOWS_1255,
    &WINDOWS_1256,
    &WINDOWS_1257,
    &WINDOWS_1258,
    &X_MAC_CYRILLIC,
    &GBK,
    &GB18030,
    &BIG5,
    &EUC_JP,
    &ISO_2022_JP,
    &SHIFT_JIS,
    &EUC_KR,
    &REPLACEMENT,
    &UTF_16BE,
    &UTF_16LE,
    &X_USER_DEFINED,
];

static LABEL_MAP: Lazy<HashMap<&'static str, &'static Encoding>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for &encoding in &ENCODINGS {
        for &label in encoding.labels {
            map.insert(label, encoding);
        }
    }
    map
});

/// The characters a label may be padded with, per the Encoding Standard's
/// definition of ASCII whitespace.
fn is_label_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
}

impl Encoding {
    /// Resolves a label to its catalog entry, after stripping leading and
    /// trailing ASCII whitespace and lowercasing. Returns `None` for
    /// unknown labels.
    pub fn for_label(label: &str) -> Option<&'static Encoding> {
        let trimmed = label.trim_matches(is_label_whitespace);
        let lowered = trimmed.to_ascii_lowercase();
        LABEL_MAP.get(lowered.as_str()).copied()
    }

    /// The canonical name, in the Encoding Standard's casing.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The labels that resolve to this encoding, lowercased and sorted.
    pub fn labels(&self) -> &'static [&'static str] {
        self.labels
    }

    /// Instantiates a decoder state machine for this encoding.
    ///
    /// Fails for the replacement pseudo-encoding and when a legacy
    /// encoding's index has not been installed.
    pub fn new_decoder(&'static self, fatal: bool) -> Result<VariantDecoder, Error> {
        Ok(match self.name {
            "UTF-8" => VariantDecoder::Utf8(Utf8Decoder::new(fatal)),
            "UTF-16LE" => VariantDecoder::Utf16(Utf16Decoder::new(false, fatal)),
            "UTF-16BE" => VariantDecoder::Utf16(Utf16Decoder::new(true, fatal)),
            // GBK decodes with the full gb18030 machinery.
            "GBK" | "gb18030" => VariantDecoder::Gb18030(Gb18030Decoder::new(
                index::dense("gb18030")?,
                index::ranges("gb18030-ranges")?,
                fatal,
            )),
            "Big5" => VariantDecoder::Big5(Big5Decoder::new(index::dense("big5")?, fatal)),
            "Shift_JIS" => {
                VariantDecoder::ShiftJis(ShiftJisDecoder::new(index::dense("jis0208")?, fatal))
            }
            "EUC-JP" => VariantDecoder::EucJp(EucJpDecoder::new(
                index::dense("jis0208")?,
                index::dense("jis0212")?,
                fatal,
            )),
            "ISO-2022-JP" => {
                VariantDecoder::Iso2022Jp(Iso2022JpDecoder::new(index::dense("jis0208")?, fatal))
            }
            "EUC-KR" => VariantDecoder::EucKr(EucKrDecoder::new(index::dense("euc-kr")?, fatal)),
            "x-user-defined" => VariantDecoder::XUserDefined(XUserDefinedDecoder::new()),
            "replacement" => return Err(Error::Replacement(self.name.to_owned())),
            _ => VariantDecoder::SingleByte(SingleByteDecoder::new(
                index::dense(&self.name.to_ascii_lowercase())?,
                fatal,
            )),
        })
    }

    /// Instantiates an encoder state machine for this encoding.
    pub fn new_encoder(&'static self) -> Result<VariantEncoder, Error> {
        Ok(match self.name {
            "UTF-8" => VariantEncoder::Utf8(Utf8Encoder::new()),
            "UTF-16LE" => VariantEncoder::Utf16(Utf16Encoder::new(false)),
            "UTF-16BE" => VariantEncoder::Utf16(Utf16Encoder::new(true)),
            "GBK" => VariantEncoder::Gb18030(Gb18030Encoder::new(
                index::dense("gb18030")?,
                index::ranges("gb18030-ranges")?,
                true,
            )),
            "gb18030" => VariantEncoder::Gb18030(Gb18030Encoder::new(
                index::dense("gb18030")?,
                index::ranges("gb18030-ranges")?,
                false,
            )),
            "Big5" => VariantEncoder::Big5(Big5Encoder::new(index::dense("big5")?)),
            "Shift_JIS" => {
                VariantEncoder::ShiftJis(ShiftJisEncoder::new(index::dense("jis0208")?))
            }
            "EUC-JP" => VariantEncoder::EucJp(EucJpEncoder::new(index::dense("jis0208")?)),
            "ISO-2022-JP" => {
                VariantEncoder::Iso2022Jp(Iso2022JpEncoder::new(index::dense("jis0208")?))
            }
            "EUC-KR" => VariantEncoder::EucKr(EucKrEncoder::new(index::dense("euc-kr")?)),
            "x-user-defined" => VariantEncoder::XUserDefined(XUserDefinedEncoder::new()),
            "replacement" => return Err(Error::Replacement(self.name.to_owned())),
            _ => VariantEncoder::SingleByte(SingleByteEncoder::new(index::dense(
                &self.name.to_ascii_lowercase(),
            )?)),
        })
    }

    fn has_bom(&self) -> bool {
        matches!(self.name, "UTF-8" | "UTF-16LE" | "UTF-16BE")
    }
}

impl std::fmt::Debug for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Encoding({})", self.name)
    }
}

impl PartialEq for Encoding {
    fn eq(&self, other: &Encoding) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for Encoding {}

/// Construction options for [`TextDecoder`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DecoderOptions {
    /// Error out on malformed input instead of substituting U+FFFD.
    pub fatal: bool,
    /// Keep a leading byte order mark in the output instead of consuming
    /// it.
    pub ignore_bom: bool,
}

/// Per-call options for [`TextDecoder::decode_with_options`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DecodeOptions {
    /// More input follows; keep incomplete trailing sequences pending
    /// instead of flushing them.
    pub stream: bool,
}

/// Streaming bytes-to-text facade over one encoding's decoder.
pub struct TextDecoder {
    encoding: &'static Encoding,
    fatal: bool,
    ignore_bom: bool,
    bom_seen: bool,
    decoder: Option<VariantDecoder>,
    do_not_flush: bool,
}

impl TextDecoder {
    /// Resolves `label` and prepares a decoder for it.
    ///
    /// Index availability is checked here, so a `TextDecoder` that
    /// constructs successfully will not fail later for lack of tables.
    pub fn new(label: &str, options: DecoderOptions) -> Result<TextDecoder, Error> {
        let encoding = Encoding::for_label(label)
            .ok_or_else(|| Error::UnknownLabel(label.to_owned()))?;
        if encoding.name == "replacement" {
            return Err(Error::Replacement(label.to_owned()));
        }
        encoding.new_decoder(options.fatal)?;
        tracing::debug!(encoding = encoding.name, fatal = options.fatal, "decoder ready");
        Ok(TextDecoder {
            encoding,
            fatal: options.fatal,
            ignore_bom: options.ignore_bom,
            bom_seen: false,
            decoder: None,
            do_not_flush: false,
        })
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn fatal(&self) -> bool {
        self.fatal
    }

    pub fn ignore_bom(&self) -> bool {
        self.ignore_bom
    }

    /// Decodes a complete input in one call.
    pub fn decode(&mut self, input: &[u8]) -> Result<String, Error> {
        self.decode_with_options(input, DecodeOptions::default())
    }

    /// Decodes one chunk. With `stream` set, sequences cut off at the end
    /// of `input` stay pending and are completed by the next call; the
    /// first non-streaming call finishes the run and resets.
    pub fn decode_with_options(
        &mut self,
        input: &[u8],
        options: DecodeOptions,
    ) -> Result<String, Error> {
        // `do_not_flush` still holds the previous call's stream flag here:
        // a fresh machine is only made when the previous run completed.
        if !self.do_not_flush {
            self.decoder = Some(self.encoding.new_decoder(self.fatal)?);
            self.bom_seen = false;
        }
        self.do_not_flush = options.stream;

        let mut stream = Stream::from_bytes(input);
        let mut output: Vec<Token> = Vec::new();
        let result = match self.decoder.as_mut() {
            Some(decoder) => run_decoder(decoder, &mut stream, !options.stream, &mut output),
            None => Ok(()),
        };
        if let Err(e) = result {
            // A fatal error poisons the machine; the next call starts over.
            self.decoder = None;
            self.do_not_flush = false;
            return Err(e);
        }
        if !self.do_not_flush {
            self.decoder = None;
        }
        Ok(self.serialize(output))
    }

    /// BOM handling on the way out: the first code point of the first
    /// chunk is dropped if it is U+FEFF under a BOM-carrying encoding.
    fn serialize(&mut self, mut output: Vec<Token>) -> String {
        if self.encoding.has_bom() && !self.ignore_bom && !self.bom_seen && !output.is_empty() {
            if output[0] == 0xFEFF {
                output.remove(0);
            }
            self.bom_seen = true;
        }
        code_points_to_string(&output)
    }
}

/// A lossy UTF-8 decoder, matching the default label.
impl Default for TextDecoder {
    fn default() -> TextDecoder {
        TextDecoder {
            encoding: &UTF_8,
            fatal: false,
            ignore_bom: false,
            bom_seen: false,
            decoder: None,
            do_not_flush: false,
        }
    }
}

fn run_decoder(
    decoder: &mut VariantDecoder,
    stream: &mut Stream,
    flush: bool,
    output: &mut Vec<Token>,
) -> Result<(), Error> {
    loop {
        let token = match stream.read() {
            Some(token) => token,
            None => break,
        };
        match decoder.handler(stream, Some(token))? {
            Step::Finished => break,
            Step::Emit(tokens) => output.extend(tokens),
            Step::Pending => {}
        }
    }
    if flush {
        // Handlers may push bytes back while flushing, so keep going until
        // the stream is drained, not just until the first end-of-stream.
        loop {
            let token = stream.read();
            match decoder.handler(stream, token)? {
                Step::Finished => break,
                Step::Emit(tokens) => output.extend(tokens),
                Step::Pending => {}
            }
            if stream.at_end() {
                break;
            }
        }
    }
    Ok(())
}

/// Construction options for [`TextEncoder::with_label`].
#[derive(Debug, Default, Clone, Copy)]
pub struct EncoderOptions {
    /// Kept for symmetry with [`DecoderOptions`]. Unmappable code points
    /// are hard errors in both modes, so this does not change encode
    /// outcomes.
    pub fatal: bool,
    /// Permit encoding to a legacy encoding. Without this, any label
    /// other than a UTF-8 one falls back to UTF-8.
    pub allow_legacy_encoding: bool,
}

/// Per-call options for [`TextEncoder::encode_with_options`].
#[derive(Debug, Default, Clone, Copy)]
pub struct EncodeOptions {
    /// More input follows; keep encoder mode state (ISO-2022-JP) across
    /// calls and defer the final flush.
    pub stream: bool,
}

/// Streaming text-to-bytes facade over one encoding's encoder.
pub struct TextEncoder {
    encoding: &'static Encoding,
    encoder: Option<VariantEncoder>,
    do_not_flush: bool,
}

impl TextEncoder {
    /// A UTF-8 encoder. Never needs index data, so this cannot fail.
    pub fn new() -> TextEncoder {
        TextEncoder {
            encoding: &UTF_8,
            encoder: None,
            do_not_flush: false,
        }
    }

    /// An encoder for the labeled encoding. Unless
    /// [`EncoderOptions::allow_legacy_encoding`] is set, non-UTF-8 labels
    /// are overridden to UTF-8.
    pub fn with_label(label: &str, options: EncoderOptions) -> Result<TextEncoder, Error> {
        let mut encoding = Encoding::for_label(label)
            .ok_or_else(|| Error::UnknownLabel(label.to_owned()))?;
        if encoding.name == "replacement" {
            return Err(Error::Replacement(label.to_owned()));
        }
        if !options.allow_legacy_encoding && encoding.name != "UTF-8" {
            tracing::warn!(
                label,
                resolved = encoding.name,
                "legacy target not allowed, encoding as UTF-8"
            );
            encoding = &UTF_8;
        }
        encoding.new_encoder()?;
        Ok(TextEncoder {
            encoding,
            encoder: None,
            do_not_flush: false,
        })
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Encodes a complete string in one call.
    pub fn encode(&mut self, input: &str) -> Result<Vec<u8>, Error> {
        self.encode_with_options(input, EncodeOptions::default())
    }

    /// Encodes one chunk of a string. `&str` input carries scalar values
    /// only, so no surrogate cleanup is needed here.
    pub fn encode_with_options(
        &mut self,
        input: &str,
        options: EncodeOptions,
    ) -> Result<Vec<u8>, Error> {
        let code_points: Vec<Token> = input.chars().map(|c| c as Token).collect();
        self.encode_code_points(code_points, options)
    }

    /// Encodes one chunk of UTF-16 code units. Lone surrogates become
    /// U+FFFD before encoding, matching how DOMString input behaves.
    pub fn encode_utf16(
        &mut self,
        input: &[u16],
        options: EncodeOptions,
    ) -> Result<Vec<u8>, Error> {
        let code_points: Vec<Token> = char::decode_utf16(input.iter().copied())
            .map(|r| r.map_or(0xFFFD, |c| c as Token))
            .collect();
        self.encode_code_points(code_points, options)
    }

    fn encode_code_points(
        &mut self,
        code_points: Vec<Token>,
        options: EncodeOptions,
    ) -> Result<Vec<u8>, Error> {
        if !self.do_not_flush {
            self.encoder = Some(self.encoding.new_encoder()?);
        }
        self.do_not_flush = options.stream;

        let mut stream = Stream::from_code_points(code_points);
        let mut output: Vec<Token> = Vec::new();
        let result = match self.encoder.as_mut() {
            Some(encoder) => run_encoder(encoder, &mut stream, !options.stream, &mut output),
            None => Ok(()),
        };
        if let Err(e) = result {
            self.encoder = None;
            self.do_not_flush = false;
            return Err(e);
        }
        if !self.do_not_flush {
            self.encoder = None;
        }
        Ok(output.into_iter().map(|b| b as u8).collect())
    }
}

impl Default for TextEncoder {
    fn default() -> TextEncoder {
        TextEncoder::new()
    }
}

fn run_encoder(
    encoder: &mut VariantEncoder,
    stream: &mut Stream,
    flush: bool,
    output: &mut Vec<Token>,
) -> Result<(), Error> {
    loop {
        let token = match stream.read() {
            Some(token) => token,
            None => break,
        };
        match encoder.handler(stream, Some(token))? {
            Step::Finished => break,
            Step::Emit(tokens) => output.extend(tokens),
            Step::Pending => {}
        }
    }
    if flush {
        loop {
            let token = stream.read();
            match encoder.handler(stream, token)? {
                Step::Finished => break,
                Step::Emit(tokens) => output.extend(tokens),
                Step::Pending => {}
            }
        }
    }
    Ok(())
}

fn code_points_to_string(code_points: &[Token]) -> String {
    code_points
        .iter()
        .map(|&cp| char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
