use crate::expression::ast::{BinaryOp, Builtin, Expr};
use crate::expression::error::ExprError;
use crate::expression::lexer::{Span, Token, TokenKind, lex};

/// Parse coordinate expression text.
///
/// Leading/trailing whitespace is ignored; error offsets refer to the trimmed text.
pub fn parse_expr(src: &str) -> Result<Expr, ExprError> {
    let src = src.trim();
    if src.is_empty() {
        return Err(ExprError::new(0, "empty expression"));
    }
    let tokens = lex(src)?;
    let mut p = Parser { tokens, pos: 0 };
    let expr = p.parse_term()?;
    p.expect(TokenKind::Eof)?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> &Token {
        let t = &self.tokens[self.pos];
        // Eof is sticky.
        if t.kind != TokenKind::Eof {
            self.pos += 1;
        }
        t
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ExprError> {
        if self.peek().kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(ExprError::new(
                self.span().start,
                format!("expected {kind:?}, found {:?}", self.peek().kind),
            ))
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn parse_term(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_factor()?;
        loop {
            let op = if self.consume(TokenKind::Plus) {
                BinaryOp::Add
            } else if self.consume(TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            let r = self.parse_factor()?;
            e = Expr::Binary {
                op,
                left: Box::new(e),
                right: Box::new(r),
            };
        }
        Ok(e)
    }

    fn parse_factor(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_unary()?;
        loop {
            let op = if self.consume(TokenKind::Star) {
                BinaryOp::Mul
            } else if self.consume(TokenKind::Slash) {
                BinaryOp::Div
            } else {
                break;
            };
            let r = self.parse_unary()?;
            e = Expr::Binary {
                op,
                left: Box::new(e),
                right: Box::new(r),
            };
        }
        Ok(e)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        if self.consume(TokenKind::Minus) {
            return Ok(match self.parse_unary()? {
                Expr::Num(v) => Expr::Num(-v),
                e => Expr::Neg(Box::new(e)),
            });
        }
        if self.consume(TokenKind::Plus) {
            return self.parse_unary();
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        let t = self.bump().clone();
        match t.kind {
            TokenKind::Number(v) => Ok(Expr::Num(v)),
            TokenKind::Ident(name) => {
                if self.consume(TokenKind::LParen) {
                    return self.parse_call(name, t.span);
                }
                let member = if self.consume(TokenKind::Dot) {
                    Some(self.parse_member()?)
                } else {
                    None
                };
                if self.peek().kind == TokenKind::Dot {
                    return Err(ExprError::new(
                        self.span().start,
                        "member access is limited to one level",
                    ));
                }
                Ok(Expr::Symbol { name, member })
            }
            TokenKind::LParen => {
                let e = self.parse_term()?;
                self.expect(TokenKind::RParen)?;
                Ok(e)
            }
            other => Err(ExprError::new(
                t.span.start,
                format!("unexpected token {other:?}"),
            )),
        }
    }

    fn parse_member(&mut self) -> Result<String, ExprError> {
        let t = self.bump().clone();
        match t.kind {
            TokenKind::Ident(s) => Ok(s),
            other => Err(ExprError::new(
                t.span.start,
                format!("expected ident after '.', found {other:?}"),
            )),
        }
    }

    fn parse_call(&mut self, name: String, at: Span) -> Result<Expr, ExprError> {
        let func = Builtin::from_name(&name)
            .ok_or_else(|| ExprError::new(at.start, format!("unknown function '{name}'")))?;

        let mut args = Vec::new();
        if !self.consume(TokenKind::RParen) {
            loop {
                args.push(self.parse_term()?);
                if self.consume(TokenKind::Comma) {
                    continue;
                }
                self.expect(TokenKind::RParen)?;
                break;
            }
        }

        if args.len() != func.arity() {
            return Err(ExprError::new(
                at.start,
                format!(
                    "{}() takes {} argument(s), got {}",
                    func.name(),
                    func.arity(),
                    args.len()
                ),
            ));
        }
        Ok(Expr::Call { func, args })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/parser.rs"]
mod tests;
