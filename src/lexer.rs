//! Splits clause text into keyword, number and terminator tokens.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use itertools::Itertools;
use phf::{Map, phf_map};

use crate::error::ClauseError;

/// A recognized clause keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    CornerSpacing,
    ConvexCorner,
    ConcaveCorner,
    SameMask,
    CornerOnly,
    CornerToCorner,
    ExceptEol,
    ExceptJogLength,
    EdgeLength,
    IncludeLShape,
    MinLength,
    ExceptNotch,
    ExceptSameNet,
    ExceptSameMetal,
    Width,
    Spacing,
}

/// Keyword spellings. Matching is exact and case-sensitive.
/// Please keep names sorted alphabetically.
const KEYWORDS: Map<&'static str, Keyword> = phf_map! {
    "CONCAVECORNER" => Keyword::ConcaveCorner,
    "CONVEXCORNER" => Keyword::ConvexCorner,
    "CORNERONLY" => Keyword::CornerOnly,
    "CORNERSPACING" => Keyword::CornerSpacing,
    "CORNERTOCORNER" => Keyword::CornerToCorner,
    "EDGELENGTH" => Keyword::EdgeLength,
    "EXCEPTEOL" => Keyword::ExceptEol,
    "EXCEPTJOGLENGTH" => Keyword::ExceptJogLength,
    "EXCEPTNOTCH" => Keyword::ExceptNotch,
    "EXCEPTSAMEMETAL" => Keyword::ExceptSameMetal,
    "EXCEPTSAMENET" => Keyword::ExceptSameNet,
    "INCLUDELSHAPE" => Keyword::IncludeLShape,
    "MINLENGTH" => Keyword::MinLength,
    "SAMEMASK" => Keyword::SameMask,
    "SPACING" => Keyword::Spacing,
    "WIDTH" => Keyword::Width,
};

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::CornerSpacing => "CORNERSPACING",
            Keyword::ConvexCorner => "CONVEXCORNER",
            Keyword::ConcaveCorner => "CONCAVECORNER",
            Keyword::SameMask => "SAMEMASK",
            Keyword::CornerOnly => "CORNERONLY",
            Keyword::CornerToCorner => "CORNERTOCORNER",
            Keyword::ExceptEol => "EXCEPTEOL",
            Keyword::ExceptJogLength => "EXCEPTJOGLENGTH",
            Keyword::EdgeLength => "EDGELENGTH",
            Keyword::IncludeLShape => "INCLUDELSHAPE",
            Keyword::MinLength => "MINLENGTH",
            Keyword::ExceptNotch => "EXCEPTNOTCH",
            Keyword::ExceptSameNet => "EXCEPTSAMENET",
            Keyword::ExceptSameMetal => "EXCEPTSAMEMETAL",
            Keyword::Width => "WIDTH",
            Keyword::Spacing => "SPACING",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Keyword(Keyword),
    Number(f64),
    Semicolon,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(kw) => write!(f, "{kw}"),
            TokenKind::Number(n) => write!(f, "number {n}"),
            TokenKind::Semicolon => write!(f, "';'"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub offset: usize,
}

/// Tokenize a whole clause.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ClauseError> {
    Lexer {
        input,
        chars: input.char_indices().peekable(),
    }
    .tokenize()
}

struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl Lexer<'_> {
    fn tokenize(&mut self) -> Result<Vec<Token>, ClauseError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let Some(&(offset, ch)) = self.chars.peek() else {
                break;
            };
            if ch == ';' {
                self.chars.next();
                tokens.push(Token {
                    kind: TokenKind::Semicolon,
                    offset,
                });
                continue;
            }
            let end = self
                .chars
                .peeking_take_while(|&(_, c)| !c.is_whitespace() && c != ';')
                .last()
                .map(|(i, c)| i + c.len_utf8())
                .unwrap_or(offset);
            let word = &self.input[offset..end];
            tokens.push(Token {
                kind: classify(word, offset)?,
                offset,
            });
        }
        Ok(tokens)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some(&(_, c)) if c.is_whitespace()) {
            self.chars.next();
        }
    }
}

fn classify(word: &str, offset: usize) -> Result<TokenKind, ClauseError> {
    if let Some(&kw) = KEYWORDS.get(word) {
        return Ok(TokenKind::Keyword(kw));
    }
    if !word.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.')) {
        return Err(ClauseError::UnknownWord {
            offset,
            word: word.to_string(),
        });
    }
    match word.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(TokenKind::Number(value)),
        _ => Err(ClauseError::InvalidNumber {
            offset,
            text: word.to_string(),
        }),
    }
}
