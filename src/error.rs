// Copyright 2026 the textcodec developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option. This file may not be copied, modified, or distributed except
// according to those terms.

use thiserror::Error;

/// Errors reported by codec construction and by the transcoding facades.
///
/// The first six variants are configuration errors: they surface when a
/// facade or state machine is constructed, before any data is processed,
/// and are unaffected by the error mode. `Malformed` and `Unmappable` are
/// data errors raised while transcoding.
#[derive(Debug, Error)]
pub enum Error {
    /// The label did not resolve to any encoding in the catalog.
    #[error("unknown encoding label {0:?}")]
    UnknownLabel(String),

    /// The label resolved to the replacement pseudo-encoding, which exists
    /// only to reject the labels mapped to it and is never instantiated.
    #[error("label {0:?} names the replacement encoding, which cannot be instantiated")]
    Replacement(String),

    /// No mapping table has been installed under the given index name.
    #[error("no index data installed for {0:?}")]
    MissingIndex(String),

    /// The installed table has the wrong shape (dense where ranges were
    /// expected, or vice versa).
    #[error("index {0:?} has the wrong shape")]
    IndexShape(String),

    /// Index JSON that parses but does not follow the `encoding-indexes`
    /// layout.
    #[error("malformed index data: {0}")]
    BadIndexData(String),

    /// Index JSON that is not JSON at all.
    #[error("unparseable index data")]
    IndexJson(#[from] serde_json::Error),

    /// A byte sequence with no interpretation under the bound encoding was
    /// read while in fatal mode.
    #[error("malformed byte sequence")]
    Malformed,

    /// The code point has no representation in the bound encoding. The
    /// catalog defines no lossy substitute byte, so this is a hard error in
    /// both error modes.
    #[error("code point U+{0:04X} cannot be encoded")]
    Unmappable(u32),
}
