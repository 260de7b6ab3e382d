use crate::expression::error::ExprError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Ident(String),
    Number(f64),

    LParen,
    RParen,
    Comma,
    Dot,

    Plus,
    Minus,
    Star,
    Slash,

    Eof,
}

/// Byte cursor over ASCII-significant input. Non-ASCII bytes are only ever reported.
struct Cursor<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    fn at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.pos;
        while self.at(0).is_some_and(&pred) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn number(&mut self, start: usize) -> Result<f64, ExprError> {
        self.eat_while(|b| b.is_ascii_digit());
        if self.at(0) == Some(b'.') {
            self.pos += 1;
            self.eat_while(|b| b.is_ascii_digit());
        }
        if matches!(self.at(0), Some(b'e' | b'E')) {
            let e_pos = self.pos;
            self.pos += 1;
            if matches!(self.at(0), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.eat_while(|b| b.is_ascii_digit()) == 0 {
                return Err(ExprError::new(
                    e_pos,
                    "invalid number exponent (expected digits)",
                ));
            }
        }
        self.src[start..self.pos]
            .parse()
            .map_err(|_| ExprError::new(start, "invalid number"))
    }

    fn punct(&mut self, start: usize) -> Result<TokenKind, ExprError> {
        let kind = match self.bytes[start] {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b',' => TokenKind::Comma,
            b'.' => TokenKind::Dot,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            _ => {
                let c = self.src[start..].chars().next().unwrap_or('?');
                return Err(ExprError::new(start, format!("unexpected character '{c}'")));
            }
        };
        self.pos += 1;
        Ok(kind)
    }
}

pub(crate) fn lex(input: &str) -> Result<Vec<Token>, ExprError> {
    let mut cur = Cursor::new(input);
    let mut out = Vec::new();

    loop {
        cur.eat_while(|b| b.is_ascii_whitespace());
        let start = cur.pos;
        let Some(b) = cur.at(0) else { break };

        let starts_number =
            b.is_ascii_digit() || (b == b'.' && cur.at(1).is_some_and(|n| n.is_ascii_digit()));
        let kind = if starts_number {
            TokenKind::Number(cur.number(start)?)
        } else if b.is_ascii_alphabetic() || b == b'_' {
            cur.eat_while(|b| b.is_ascii_alphanumeric() || b == b'_');
            TokenKind::Ident(input[start..cur.pos].to_owned())
        } else {
            cur.punct(start)?
        };
        out.push(Token {
            kind,
            span: Span {
                start,
                end: cur.pos,
            },
        });
    }

    out.push(Token {
        kind: TokenKind::Eof,
        span: Span {
            start: input.len(),
            end: input.len(),
        },
    });
    Ok(out)
}
