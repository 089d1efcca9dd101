//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Mx.
//! The Mx project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Identifier Parser
//!
//! A single forward scan over the input characters driven by two small
//! enums: the scanner [`ParseState`] and the [`SyntaxMode`] that decides
//! whether a finished segment is a name or a key part.
//!
//! End of input is treated as a sentinel character so that every state
//! handles "no more text" in the same `match` as `,`, `)` and `}`.

use crate::errors::{MxError, Result};
use crate::identifier::segment::{MxIdentifier, MxQuoting, MxSegment};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParseState {
    Start,
    BeforeSegment,
    InBracketSegment,
    InBareSegment,
    AfterSegment,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SyntaxMode {
    Name,
    FirstKey,
    NextKey,
}

/// Accumulates segments, deferring key parts until the compound key is
/// complete.
#[derive(Debug, Default)]
struct SegmentBuilder {
    segments: Vec<MxSegment>,
    pending_keys: Vec<String>,
}

impl SegmentBuilder {
    fn push(&mut self, name: String, quoting: MxQuoting, mode: SyntaxMode) {
        if mode != SyntaxMode::NextKey {
            self.flush();
        }
        match mode {
            SyntaxMode::Name => self.segments.push(MxSegment::new(name, quoting)),
            SyntaxMode::FirstKey | SyntaxMode::NextKey => self.pending_keys.push(name),
        }
    }

    fn flush(&mut self) {
        if !self.pending_keys.is_empty() {
            let parts = std::mem::take(&mut self.pending_keys);
            self.segments.push(MxSegment::key(parts));
        }
    }

    fn finish(mut self) -> Vec<MxSegment> {
        self.flush();
        self.segments
    }
}

/// Hand-written scanner for `[Dim].[Level].&[key]` style names.
#[derive(Debug)]
pub struct MxIdentifierParser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
    start: usize,
    state: ParseState,
    mode: SyntaxMode,
    builder: SegmentBuilder,
}

impl<'a> MxIdentifierParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            pos: 0,
            start: 0,
            state: ParseState::Start,
            mode: SyntaxMode::Name,
            builder: SegmentBuilder::default(),
        }
    }

    /// Runs the scanner to completion.
    pub fn parse(mut self) -> Result<MxIdentifier> {
        self.scan()?;

        match self.state {
            ParseState::BeforeSegment => {
                let after = if self.mode == SyntaxMode::Name { '.' } else { '&' };
                return Err(self.error(format!("identifier expected after '{}'", after)));
            }
            ParseState::InBracketSegment => {
                return Err(self.error("unterminated bracket segment"));
            }
            ParseState::Start | ParseState::InBareSegment | ParseState::AfterSegment => {}
        }

        let identifier = MxIdentifier::from_segments(self.builder.finish());
        log::trace!(
            "identifier.parse: parsed identifier - input={}, segments={}",
            self.input,
            identifier.len()
        );
        Ok(identifier)
    }

    /// `None` is the end-of-input sentinel.
    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn scan(&mut self) -> Result<()> {
        loop {
            let c = self.current();
            match self.state {
                ParseState::Start | ParseState::BeforeSegment => match c {
                    Some('[') => {
                        self.start = self.pos;
                        self.pos += 1;
                        self.state = ParseState::InBracketSegment;
                    }
                    Some(' ') => self.pos += 1,
                    None | Some(',') | Some('}') => return Ok(()),
                    Some('.') => return Err(self.error("unexpected '.'")),
                    Some('&') => {
                        if self.mode != SyntaxMode::Name {
                            return Err(self.error("unexpected '&'"));
                        }
                        self.mode = SyntaxMode::FirstKey;
                        self.pos += 1;
                    }
                    Some(_) => {
                        self.start = self.pos;
                        self.state = ParseState::InBareSegment;
                    }
                },
                ParseState::InBareSegment => match c {
                    None | Some(',') | Some(')') | Some('}') => {
                        self.emit_bare();
                        self.state = ParseState::AfterSegment;
                        return Ok(());
                    }
                    Some('.') => {
                        self.emit_bare();
                        self.mode = SyntaxMode::Name;
                        self.state = ParseState::BeforeSegment;
                        self.pos += 1;
                    }
                    Some('&') => {
                        self.emit_bare();
                        self.mode = SyntaxMode::NextKey;
                        self.state = ParseState::BeforeSegment;
                        self.pos += 1;
                    }
                    Some(_) => self.pos += 1,
                },
                ParseState::InBracketSegment => match c {
                    None => return Err(self.error("unterminated bracket segment")),
                    Some(']') if self.peek_next() == Some(']') => self.pos += 2,
                    Some(']') => {
                        self.emit_bracketed();
                        self.pos += 1;
                        self.state = ParseState::AfterSegment;
                    }
                    Some(_) => self.pos += 1,
                },
                ParseState::AfterSegment => match c {
                    Some(' ') => self.pos += 1,
                    Some('.') => {
                        self.mode = SyntaxMode::Name;
                        self.state = ParseState::BeforeSegment;
                        self.pos += 1;
                    }
                    Some('&') => {
                        self.mode = match self.mode {
                            SyntaxMode::Name => SyntaxMode::FirstKey,
                            SyntaxMode::FirstKey | SyntaxMode::NextKey => SyntaxMode::NextKey,
                        };
                        self.state = ParseState::BeforeSegment;
                        self.pos += 1;
                    }
                    None | Some(',') | Some(')') | Some('}') => return Ok(()),
                    Some(other) => {
                        return Err(self.error(format!(
                            "expected '.' or '&' after segment, found '{}'",
                            other
                        )));
                    }
                },
            }
        }
    }

    fn emit_bare(&mut self) {
        let text: String = self.chars[self.start..self.pos].iter().collect();
        self.builder
            .push(text.trim().to_string(), MxQuoting::Unquoted, self.mode);
    }

    fn emit_bracketed(&mut self) {
        // chars[start] is '[' and chars[pos] is the closing ']'
        let inner: String = self.chars[self.start + 1..self.pos].iter().collect();
        self.builder
            .push(inner.replace("]]", "]"), MxQuoting::Quoted, self.mode);
    }

    fn error(&self, message: impl Into<String>) -> MxError {
        MxError::syntax(self.pos, message, self.input)
    }
}
