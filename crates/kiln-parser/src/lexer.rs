//! Lexer for type-declaration text.
//!
//! Produces a flat token stream of words, string literals and single
//! punctuation characters. Whitespace and comments are dropped, so braces
//! inside comments or strings never affect block matching.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_until, take_while1},
    character::complete::{anychar, char, multispace1},
    combinator::{map, recognize, value},
    error::{Error, ErrorKind},
    multi::many0,
    sequence::{pair, tuple},
    IResult,
};

/// Kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// Identifier, keyword or number.
    Word(&'a str),
    /// Contents of a quoted string, without the quotes.
    Str(&'a str),
    /// Any other single character.
    Punct(char),
}

/// A token with its byte span in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub start: usize,
    pub end: usize,
}

impl<'a> Token<'a> {
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    pub fn is_word(&self, w: &str) -> bool {
        matches!(self.kind, TokenKind::Word(word) if word == w)
    }

    /// The word or string contents, if this token can name a member.
    pub fn name(&self) -> Option<&'a str> {
        match self.kind {
            TokenKind::Word(w) | TokenKind::Str(w) => Some(w),
            TokenKind::Punct(_) => None,
        }
    }
}

/// Split source text into tokens.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = source;

    loop {
        if let Ok((after, ())) = trivia(rest) {
            rest = after;
        }
        if rest.is_empty() {
            break;
        }

        let start = source.len() - rest.len();
        let Ok((after, kind)) = token(rest) else {
            break;
        };
        tokens.push(Token {
            kind,
            start,
            end: source.len() - after.len(),
        });
        rest = after;
    }

    tokens
}

fn token(input: &str) -> IResult<&str, TokenKind<'_>> {
    alt((
        map(alt((quoted('"'), quoted('\''))), TokenKind::Str),
        map(word, TokenKind::Word),
        map(anychar, TokenKind::Punct),
    ))(input)
}

/// Identifier-like run: letters, digits, `_` and `$`.
fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '$')(input)
}

/// A quoted string honouring backslash escapes. Returns the raw contents.
fn quoted(quote: char) -> impl Fn(&str) -> IResult<&str, &str> {
    move |input: &str| {
        let (rest, _) = char(quote)(input)?;
        let mut escaped = false;
        for (i, c) in rest.char_indices() {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                return Ok((&rest[i + c.len_utf8()..], &rest[..i]));
            }
        }
        Err(nom::Err::Error(Error::new(input, ErrorKind::Char)))
    }
}

fn line_comment(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("//"), take_till(|c: char| c == '\n')))(input)
}

fn block_comment(input: &str) -> IResult<&str, &str> {
    recognize(tuple((tag("/*"), take_until("*/"), tag("*/"))))(input)
}

/// Whitespace and comments.
fn trivia(input: &str) -> IResult<&str, ()> {
    value((), many0(alt((multispace1, line_comment, block_comment))))(input)
}
