//! Interface extraction over the token stream.
//!
//! Only a fixed declaration shape is understood:
//!
//! ```text
//! interface Name {
//!   styleMap: { "--css-var": Type; ... };
//!   data: { field: Type; ... };
//!   children?: Type;
//! }
//! ```
//!
//! Everything else inside an interface body is skipped member by member.

use indexmap::IndexMap;
use kiln_core::{ComponentInterface, InterfaceTable};
use std::ops::Range;

use crate::lexer::{tokenize, Token, TokenKind};

/// Extract every interface declaration from source text.
pub fn parse(source: &str) -> InterfaceTable {
    let tokens = tokenize(source);
    Scanner::new(source, &tokens).scan()
}

/// A parsed member: `name?: Type`.
#[derive(Debug)]
struct Member<'a> {
    name: &'a str,
    ty: MemberType,
    /// Token index after the member.
    next: usize,
}

#[derive(Debug)]
enum MemberType {
    /// Plain type text, e.g. `string` or `"a" | "b"`.
    Text(String),
    /// Object literal type; the range covers the tokens between the braces.
    Block(Range<usize>),
    /// Object literal type without a matching close.
    Unclosed,
}

struct Scanner<'s, 't> {
    source: &'s str,
    tokens: &'t [Token<'s>],
}

impl<'s, 't> Scanner<'s, 't> {
    fn new(source: &'s str, tokens: &'t [Token<'s>]) -> Self {
        Self { source, tokens }
    }

    fn scan(&self) -> InterfaceTable {
        let mut table = InterfaceTable::new();
        let mut pos = 0;

        while pos < self.tokens.len() {
            let Some((name, open)) = self.interface_header(pos) else {
                pos += 1;
                continue;
            };

            let (body_end, resume) = match self.matching_close(open, self.tokens.len()) {
                Some(close) => (close, close + 1),
                None => {
                    let end = self.next_header(open + 1).unwrap_or(self.tokens.len());
                    tracing::debug!(interface = name, "interface body is not closed");
                    (end, end)
                }
            };

            table.insert(self.parse_body(name, open + 1..body_end));
            pos = resume;
        }

        table
    }

    /// Match `interface Name ... {` at `pos`. Returns the name and the index of `{`.
    ///
    /// Tokens between the name and the brace (`extends Base`, type
    /// parameters) are allowed as long as they contain no `{`, `}` or `;`.
    fn interface_header(&self, pos: usize) -> Option<(&'s str, usize)> {
        if !self.tokens.get(pos)?.is_word("interface") {
            return None;
        }
        let name = match self.tokens.get(pos + 1)?.kind {
            TokenKind::Word(name) => name,
            _ => return None,
        };
        for (offset, token) in self.tokens[pos + 2..].iter().enumerate() {
            if token.is_punct('{') {
                return Some((name, pos + 2 + offset));
            }
            if token.is_punct('}') || token.is_punct(';') {
                return None;
            }
        }
        None
    }

    fn next_header(&self, from: usize) -> Option<usize> {
        (from..self.tokens.len()).find(|&i| self.interface_header(i).is_some())
    }

    /// Index of the `}` matching the `{` at `open`, searching below `limit`.
    fn matching_close(&self, open: usize, limit: usize) -> Option<usize> {
        let mut depth = 0usize;
        for i in open..limit {
            let token = &self.tokens[i];
            if token.is_punct('{') {
                depth += 1;
            } else if token.is_punct('}') {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
        }
        None
    }

    fn parse_body(&self, name: &str, body: Range<usize>) -> ComponentInterface {
        let mut interface = ComponentInterface::empty(name);

        self.for_each_member(body, |member| match member.name {
            "styleMap" => match &member.ty {
                MemberType::Block(range) => interface.style_fields = Some(self.parse_fields(range.clone())),
                MemberType::Unclosed => interface.style_fields = None,
                MemberType::Text(_) => {}
            },
            "data" => match &member.ty {
                MemberType::Block(range) => interface.data_fields = Some(self.parse_fields(range.clone())),
                MemberType::Unclosed => interface.data_fields = None,
                MemberType::Text(_) => {}
            },
            "children" => interface.accepts_children = true,
            _ => {}
        });

        interface
    }

    /// Field name -> type text for every member of a block.
    fn parse_fields(&self, block: Range<usize>) -> IndexMap<String, String> {
        let mut fields = IndexMap::new();
        self.for_each_member(block, |member| {
            let ty = match &member.ty {
                MemberType::Text(text) => text.clone(),
                MemberType::Block(range) => self.text(range.start - 1, range.end),
                MemberType::Unclosed => return,
            };
            fields.insert(member.name.to_string(), ty);
        });
        fields
    }

    fn for_each_member(&self, range: Range<usize>, mut visit: impl FnMut(&Member<'s>)) {
        let mut pos = range.start;
        while pos < range.end {
            match self.member(pos, range.end) {
                Some(member) => {
                    visit(&member);
                    pos = member.next;
                }
                None => pos = self.skip_member(pos, range.end),
            }
        }
    }

    /// Parse `[readonly] name[?]: Type` starting at `pos`.
    fn member(&self, mut pos: usize, end: usize) -> Option<Member<'s>> {
        if pos + 1 < end
            && self.tokens.get(pos)?.is_word("readonly")
            && self.tokens[pos + 1].name().is_some()
        {
            pos += 1;
        }

        let name = self.tokens.get(pos).filter(|_| pos < end)?.name()?;
        pos += 1;
        if pos < end && self.tokens[pos].is_punct('?') {
            pos += 1;
        }
        if pos >= end || !self.tokens[pos].is_punct(':') {
            return None;
        }
        pos += 1;
        if pos >= end {
            return None;
        }

        if self.tokens[pos].is_punct('{') {
            return Some(match self.matching_close(pos, end) {
                Some(close) => Member {
                    name,
                    ty: MemberType::Block(pos + 1..close),
                    next: close + 1,
                },
                None => Member {
                    name,
                    ty: MemberType::Unclosed,
                    next: end,
                },
            });
        }

        let type_start = pos;
        let mut depth = 0usize;
        while pos < end {
            let token = &self.tokens[pos];
            if depth == 0 && (token.is_punct(';') || token.is_punct(',') || token.is_punct('}')) {
                break;
            }
            match token.kind {
                TokenKind::Punct('{' | '(' | '[' | '<') => depth += 1,
                TokenKind::Punct('}' | ')' | ']' | '>') => depth = depth.saturating_sub(1),
                _ => {}
            }
            pos += 1;
        }
        if pos == type_start {
            return None;
        }

        let ty = self.text(type_start, pos - 1);
        let next = if pos < end && (self.tokens[pos].is_punct(';') || self.tokens[pos].is_punct(',')) {
            pos + 1
        } else {
            pos
        };
        Some(Member {
            name,
            ty: MemberType::Text(ty),
            next,
        })
    }

    /// Skip past whatever is at `pos` up to the next top-level separator.
    fn skip_member(&self, mut pos: usize, end: usize) -> usize {
        let mut depth = 0usize;
        while pos < end {
            let token = &self.tokens[pos];
            pos += 1;
            match token.kind {
                TokenKind::Punct('{' | '(' | '[') => depth += 1,
                TokenKind::Punct('}' | ')' | ']') => depth = depth.saturating_sub(1),
                TokenKind::Punct(';' | ',') if depth == 0 => return pos,
                _ => {}
            }
        }
        end
    }

    /// Source text spanning tokens `first..=last`.
    fn text(&self, first: usize, last: usize) -> String {
        self.source[self.tokens[first].start..self.tokens[last].end].to_string()
    }
}
