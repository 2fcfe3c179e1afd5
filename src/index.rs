// Copyright 2026 the textcodec developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Mapping-table ("index") service.
//!
//! The static code-point tables for the legacy encodings are data, not code,
//! and are not compiled into this crate. The embedding application installs
//! them once at startup, keyed by lowercase encoding name (plus the special
//! `"gb18030-ranges"` key), either programmatically or from the WHATWG
//! `encoding-indexes` JSON. Codec construction fails with
//! [`Error::MissingIndex`] if a required table is absent.
//!
//! This module also hosts the pointer arithmetic the standard layers on top
//! of the raw tables: the GB18030 piecewise-range lookups and the filtered
//! reverse searches used by the Shift_JIS and Big5 encoders.

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use serde_json::Value;

use crate::error::Error;
use crate::stream::Token;

/// One mapping table.
#[derive(Debug, Clone)]
pub enum Index {
    /// Position is the pointer, value the code point (`None` where the
    /// pointer has no mapping). Used by every table except the GB18030
    /// ranges.
    Dense(Vec<Option<u32>>),
    /// `(pointer, code point)` range offsets sorted ascending by pointer,
    /// defining piecewise-linear spans. Only `"gb18030-ranges"` has this
    /// shape.
    Ranges(Vec<(u32, u32)>),
}

/// The set of mapping tables available to codec construction.
#[derive(Debug, Clone, Default)]
pub struct Indexes {
    tables: HashMap<String, Index>,
}

impl Indexes {
    pub fn new() -> Indexes {
        Indexes::default()
    }

    pub fn insert_dense(&mut self, name: &str, table: Vec<Option<u32>>) {
        self.tables.insert(name.to_owned(), Index::Dense(table));
    }

    pub fn insert_ranges(&mut self, name: &str, ranges: Vec<(u32, u32)>) {
        self.tables.insert(name.to_owned(), Index::Ranges(ranges));
    }

    /// Parses tables in the shape of the WHATWG `encoding-indexes` JSON: an
    /// object mapping index names to arrays of code points and nulls, except
    /// `"gb18030-ranges"`, which holds `[pointer, code point]` pairs.
    pub fn from_json_str(json: &str) -> Result<Indexes, Error> {
        let value: Value = serde_json::from_str(json)?;
        let object = value
            .as_object()
            .ok_or_else(|| Error::BadIndexData("top level is not an object".to_owned()))?;
        let mut indexes = Indexes::new();
        for (name, entry) in object {
            let array = entry
                .as_array()
                .ok_or_else(|| Error::BadIndexData(format!("index {name:?} is not an array")))?;
            if name == "gb18030-ranges" {
                let mut ranges = Vec::with_capacity(array.len());
                for pair in array {
                    let (pointer, code_point) = pair
                        .as_array()
                        .filter(|p| p.len() == 2)
                        .and_then(|p| Some((p[0].as_u64()?, p[1].as_u64()?)))
                        .ok_or_else(|| {
                            Error::BadIndexData(format!(
                                "index {name:?} entries must be [pointer, code point] pairs"
                            ))
                        })?;
                    ranges.push((pointer as u32, code_point as u32));
                }
                indexes.insert_ranges(name, ranges);
            } else {
                let mut table = Vec::with_capacity(array.len());
                for cell in array {
                    table.push(match cell {
                        Value::Null => None,
                        Value::Number(n) => Some(
                            n.as_u64()
                                .filter(|&cp| cp <= 0x10FFFF)
                                .ok_or_else(|| {
                                    Error::BadIndexData(format!(
                                        "index {name:?} contains a non-code-point entry"
                                    ))
                                })? as u32,
                        ),
                        _ => {
                            return Err(Error::BadIndexData(format!(
                                "index {name:?} contains a non-numeric entry"
                            )))
                        }
                    });
                }
                indexes.insert_dense(name, table);
            }
        }
        Ok(indexes)
    }
}

static INDEXES: OnceCell<Indexes> = OnceCell::new();

/// Installs the mapping tables for the whole process. The first call wins;
/// later calls are ignored and return `false`.
pub fn install(indexes: Indexes) -> bool {
    let count = indexes.tables.len();
    let installed = INDEXES.set(indexes).is_ok();
    if installed {
        tracing::debug!(tables = count, "mapping tables installed");
    }
    installed
}

fn get(name: &str) -> Result<&'static Index, Error> {
    INDEXES
        .get()
        .and_then(|indexes| indexes.tables.get(name))
        .ok_or_else(|| Error::MissingIndex(name.to_owned()))
}

pub(crate) fn dense(name: &str) -> Result<&'static [Option<u32>], Error> {
    match get(name)? {
        Index::Dense(table) => Ok(table),
        Index::Ranges(_) => Err(Error::IndexShape(name.to_owned())),
    }
}

pub(crate) fn ranges(name: &str) -> Result<&'static [(u32, u32)], Error> {
    match get(name)? {
        Index::Ranges(ranges) => Ok(ranges),
        Index::Dense(_) => Err(Error::IndexShape(name.to_owned())),
    }
}

/// The code point for `pointer`, if any.
pub(crate) fn code_point_for(pointer: u32, table: &[Option<u32>]) -> Option<Token> {
    table.get(pointer as usize).copied().flatten()
}

/// The lowest pointer mapping to `code_point`, if any.
pub(crate) fn pointer_for(code_point: Token, table: &[Option<u32>]) -> Option<u32> {
    table
        .iter()
        .position(|&cp| cp == Some(code_point))
        .map(|pointer| pointer as u32)
}

/// GB18030 four-byte decode: resolves a pointer through the range table.
/// Pointers 39420–188999 and above 1237575 never map; 7457 is pinned to
/// U+E7C7 independently of the table.
pub(crate) fn gb18030_ranges_code_point_for(
    pointer: u32,
    ranges: &[(u32, u32)],
) -> Option<Token> {
    if (pointer > 39419 && pointer < 189000) || pointer > 1237575 {
        return None;
    }
    if pointer == 7457 {
        return Some(0xE7C7);
    }
    let mut offset = 0;
    let mut code_point_offset = 0;
    for &(range_pointer, range_code_point) in ranges {
        if range_pointer <= pointer {
            offset = range_pointer;
            code_point_offset = range_code_point;
        } else {
            break;
        }
    }
    Some(code_point_offset + pointer - offset)
}

/// GB18030 four-byte encode: the inverse of
/// [`gb18030_ranges_code_point_for`]. Every code point the encoder sends
/// here has a pointer, so this is total.
pub(crate) fn gb18030_ranges_pointer_for(code_point: Token, ranges: &[(u32, u32)]) -> u32 {
    if code_point == 0xE7C7 {
        return 7457;
    }
    let mut offset = 0;
    let mut pointer_offset = 0;
    for &(range_pointer, range_code_point) in ranges {
        if range_code_point <= code_point {
            offset = range_code_point;
            pointer_offset = range_pointer;
        } else {
            break;
        }
    }
    pointer_offset + code_point - offset
}

/// Shift_JIS reverse search over jis0208, skipping the window 8272–8835
/// reserved for the IBM extension rows.
pub(crate) fn shift_jis_pointer_for(code_point: Token, jis0208: &[Option<u32>]) -> Option<u32> {
    jis0208.iter().enumerate().find_map(|(pointer, &cp)| {
        if (8272..=8835).contains(&pointer) {
            return None;
        }
        (cp == Some(code_point)).then_some(pointer as u32)
    })
}

/// Pointers below this boundary would produce a Big5 lead byte under 0xA1.
const BIG5_LEAD_BOUNDARY: usize = (0xA1 - 0x81) * 157;

/// Big5 reverse search, restricted to pointers whose lead byte is at least
/// 0xA1. Six code points are duplicated in the index for legacy reasons and
/// must resolve to the *last* matching pointer; everything else takes the
/// first match.
pub(crate) fn big5_pointer_for(code_point: Token, big5: &[Option<u32>]) -> Option<u32> {
    let boundary = BIG5_LEAD_BOUNDARY.min(big5.len());
    let searchable = &big5[boundary..];
    let position = match code_point {
        0x2550 | 0x255E | 0x2561 | 0x256A | 0x5341 | 0x5345 => {
            searchable.iter().rposition(|&cp| cp == Some(code_point))
        }
        _ => searchable.iter().position(|&cp| cp == Some(code_point)),
    };
    position.map(|p| (p + boundary) as u32)
}
