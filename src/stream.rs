// Copyright 2026 the textcodec developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license, at your
// option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Token streams.
//!
//! Decoding reads bytes out of a [`Stream`] and encoding reads code points
//! out of one; both directions share the same cursor. A handler that looks
//! ahead and finds a token belonging to the next sequence pushes it back
//! with [`Stream::prepend`] so it is re-read on the following step.

use std::collections::VecDeque;

/// Either a byte (`0..=0xFF`) when the stream carries bytes or a Unicode
/// scalar value (`0..=0x10FFFF`) when it carries code points. End-of-stream
/// is represented out of band as `None` wherever a token may be absent.
pub type Token = u32;

/// An ordered, mutable cursor over a sequence of tokens. Strictly FIFO:
/// tokens removed by [`read`](Stream::read) only come back through an
/// explicit [`prepend`](Stream::prepend).
#[derive(Debug)]
pub struct Stream {
    tokens: VecDeque<Token>,
}

impl Stream {
    pub fn from_bytes(bytes: &[u8]) -> Stream {
        Stream {
            tokens: bytes.iter().map(|&b| Token::from(b)).collect(),
        }
    }

    pub fn from_code_points<I>(code_points: I) -> Stream
    where
        I: IntoIterator<Item = Token>,
    {
        Stream {
            tokens: code_points.into_iter().collect(),
        }
    }

    /// Removes and returns the foremost token, or `None` at end-of-stream.
    pub fn read(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    /// Reinserts one token immediately before what `read` would next return.
    pub fn prepend(&mut self, token: Token) {
        self.tokens.push_front(token);
    }

    /// Reinserts several tokens, preserving their relative order.
    pub fn prepend_all(&mut self, tokens: &[Token]) {
        for &token in tokens.iter().rev() {
            self.tokens.push_front(token);
        }
    }

    /// True when no tokens remain.
    pub fn at_end(&self) -> bool {
        self.tokens.is_empty()
    }
}
