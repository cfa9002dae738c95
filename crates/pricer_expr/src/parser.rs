//! Recursive-descent parser for payoff expressions.
//!
//! Precedence, loosest to tightest: `+ -`, then `* / % //`, then unary
//! `+ -`, then `**` (right-associative, binding tighter than unary on its
//! left but accepting a signed exponent on its right). Nesting depth is
//! bounded by [`MAX_DEPTH`] so untrusted input cannot exhaust the stack.
//!
//! Attribute access (`.`), subscripting (`[]`) and assignment (`=`) are
//! recognised and rejected with a security error rather than a syntax
//! error: they parse in most host languages, and the distinction matters
//! to callers displaying sandbox violations.

use crate::ast::{BinaryOp, Expr, ExprKind, UnaryOp};
use crate::error::{ExprError, Span};
use crate::lexer::{Token, TokenKind};

/// Maximum expression nesting depth.
///
/// Deliberate difference from the reference behaviour, which had no bound
/// on nesting and was therefore open to stack exhaustion from untrusted
/// input.
pub const MAX_DEPTH: usize = 64;

/// Parses a token stream into an expression tree.
///
/// # Errors
///
/// [`ExprError::Syntax`] on malformed input, [`ExprError::Security`] on a
/// disallowed construct, [`ExprError::TooDeep`] past the nesting bound.
pub fn parse(tokens: Vec<Token>) -> Result<Expr, ExprError> {
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expr(0)?;
    if let Some(tok) = parser.peek() {
        return Err(ExprError::Syntax {
            message: format!("unexpected trailing {}", describe(&tok.kind)),
            span: tok.span,
        });
    }
    Ok(expr)
}

/// Parser state over a token stream.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eof_span(&self) -> Span {
        self.tokens
            .last()
            .map_or(Span::new(0, 0), |t| Span::new(t.span.end, t.span.end))
    }

    fn expect(&mut self, expected: &TokenKind, what: &str) -> Result<Span, ExprError> {
        match self.peek() {
            Some(tok) if &tok.kind == expected => {
                let span = tok.span;
                self.pos += 1;
                Ok(span)
            }
            Some(tok) => Err(ExprError::Syntax {
                message: format!("expected {what}, got {}", describe(&tok.kind)),
                span: tok.span,
            }),
            None => Err(ExprError::Syntax {
                message: format!("expected {what}, got end of input"),
                span: self.eof_span(),
            }),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), ExprError> {
        if depth > MAX_DEPTH {
            Err(ExprError::TooDeep { max: MAX_DEPTH })
        } else {
            Ok(())
        }
    }

    /// expr := additive
    fn parse_expr(&mut self, depth: usize) -> Result<Expr, ExprError> {
        self.check_depth(depth)?;
        self.parse_additive(depth)
    }

    /// additive := term { ("+" | "-") term }
    fn parse_additive(&mut self, depth: usize) -> Result<Expr, ExprError> {
        let mut lhs = self.parse_term(depth)?;
        while let Some(op) = self.peek_binary(&[
            (TokenKind::Plus, BinaryOp::Add),
            (TokenKind::Minus, BinaryOp::Sub),
        ]) {
            self.pos += 1;
            let rhs = self.parse_term(depth)?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// term := unary { ("*" | "/" | "%" | "//") unary }
    fn parse_term(&mut self, depth: usize) -> Result<Expr, ExprError> {
        let mut lhs = self.parse_unary(depth)?;
        while let Some(op) = self.peek_binary(&[
            (TokenKind::Star, BinaryOp::Mul),
            (TokenKind::Slash, BinaryOp::Div),
            (TokenKind::Percent, BinaryOp::Rem),
            (TokenKind::SlashSlash, BinaryOp::FloorDiv),
        ]) {
            self.pos += 1;
            let rhs = self.parse_unary(depth)?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// unary := ("+" | "-") unary | power
    fn parse_unary(&mut self, depth: usize) -> Result<Expr, ExprError> {
        self.check_depth(depth)?;
        let op = match self.peek().map(|t| (&t.kind, t.span)) {
            Some((TokenKind::Plus, span)) => Some((UnaryOp::Plus, span)),
            Some((TokenKind::Minus, span)) => Some((UnaryOp::Neg, span)),
            _ => None,
        };
        if let Some((op, op_span)) = op {
            self.pos += 1;
            let operand = self.parse_unary(depth + 1)?;
            let span = Span::new(op_span.start, operand.span.end);
            return Ok(Expr {
                kind: ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                span,
            });
        }
        self.parse_power(depth)
    }

    /// power := postfix [ "**" unary ]
    ///
    /// Right-associative; the exponent re-enters `unary` so `x ** -2`
    /// parses, while `-x ** 2` negates the power.
    fn parse_power(&mut self, depth: usize) -> Result<Expr, ExprError> {
        let base = self.parse_postfix(depth)?;
        if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::StarStar)) {
            self.pos += 1;
            let exponent = self.parse_unary(depth + 1)?;
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    /// postfix := primary { "." | "[" | "=" }  (all rejected)
    fn parse_postfix(&mut self, depth: usize) -> Result<Expr, ExprError> {
        let expr = self.parse_primary(depth)?;
        match self.peek() {
            Some(tok) if tok.kind == TokenKind::Dot => Err(ExprError::Security {
                message: "attribute access is not allowed".to_string(),
                span: tok.span,
            }),
            Some(tok) if tok.kind == TokenKind::LBracket => Err(ExprError::Security {
                message: "subscripting is not allowed".to_string(),
                span: tok.span,
            }),
            Some(tok) if tok.kind == TokenKind::Assign => Err(ExprError::Security {
                message: "assignment is not allowed".to_string(),
                span: tok.span,
            }),
            _ => Ok(expr),
        }
    }

    /// primary := NUMBER | IDENT | IDENT "(" args ")" | "(" expr ")"
    fn parse_primary(&mut self, depth: usize) -> Result<Expr, ExprError> {
        let tok = match self.advance() {
            Some(tok) => tok,
            None => {
                return Err(ExprError::Syntax {
                    message: "expected expression, got end of input".to_string(),
                    span: self.eof_span(),
                })
            }
        };

        match tok.kind {
            TokenKind::Number(value) => Ok(Expr {
                kind: ExprKind::Number(value),
                span: tok.span,
            }),
            TokenKind::Ident(name) => {
                if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::LParen)) {
                    self.pos += 1;
                    let (args, close) = self.parse_call_args(depth)?;
                    Ok(Expr {
                        kind: ExprKind::Call { name, args },
                        span: Span::new(tok.span.start, close.end),
                    })
                } else {
                    Ok(Expr {
                        kind: ExprKind::Name(name),
                        span: tok.span,
                    })
                }
            }
            TokenKind::LParen => {
                let inner = self.parse_expr(depth + 1)?;
                let close = self.expect(&TokenKind::RParen, "')'")?;
                Ok(Expr {
                    kind: inner.kind,
                    span: Span::new(tok.span.start, close.end),
                })
            }
            TokenKind::LBracket => Err(ExprError::Security {
                message: "list or subscript syntax is not allowed".to_string(),
                span: tok.span,
            }),
            TokenKind::Assign => Err(ExprError::Security {
                message: "assignment is not allowed".to_string(),
                span: tok.span,
            }),
            other => Err(ExprError::Syntax {
                message: format!("expected expression, got {}", describe(&other)),
                span: tok.span,
            }),
        }
    }

    /// args := [ expr { "," expr } ] ")"
    fn parse_call_args(&mut self, depth: usize) -> Result<(Vec<Expr>, Span), ExprError> {
        let mut args = Vec::new();
        if let Some(tok) = self.peek() {
            if tok.kind == TokenKind::RParen {
                let span = tok.span;
                self.pos += 1;
                return Ok((args, span));
            }
        }
        loop {
            args.push(self.parse_expr(depth + 1)?);
            match self.peek() {
                Some(tok) if tok.kind == TokenKind::Comma => {
                    self.pos += 1;
                }
                Some(tok) if tok.kind == TokenKind::RParen => {
                    let span = tok.span;
                    self.pos += 1;
                    return Ok((args, span));
                }
                Some(tok) => {
                    return Err(ExprError::Syntax {
                        message: format!(
                            "expected ',' or ')' in argument list, got {}",
                            describe(&tok.kind)
                        ),
                        span: tok.span,
                    })
                }
                None => {
                    return Err(ExprError::Syntax {
                        message: "unterminated argument list".to_string(),
                        span: self.eof_span(),
                    })
                }
            }
        }
    }

    fn peek_binary(&self, table: &[(TokenKind, BinaryOp)]) -> Option<BinaryOp> {
        let kind = &self.peek()?.kind;
        table
            .iter()
            .find(|(tok, _)| tok == kind)
            .map(|(_, op)| *op)
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    let span = Span::new(lhs.span.start, rhs.span.end);
    Expr {
        kind: ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        span,
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Number(n) => format!("number {n}"),
        TokenKind::Ident(name) => format!("identifier '{name}'"),
        TokenKind::Plus => "'+'".to_string(),
        TokenKind::Minus => "'-'".to_string(),
        TokenKind::Star => "'*'".to_string(),
        TokenKind::StarStar => "'**'".to_string(),
        TokenKind::Slash => "'/'".to_string(),
        TokenKind::SlashSlash => "'//'".to_string(),
        TokenKind::Percent => "'%'".to_string(),
        TokenKind::LParen => "'('".to_string(),
        TokenKind::RParen => "')'".to_string(),
        TokenKind::Comma => "','".to_string(),
        TokenKind::Dot => "'.'".to_string(),
        TokenKind::LBracket => "'['".to_string(),
        TokenKind::RBracket => "']'".to_string(),
        TokenKind::Assign => "'='".to_string(),
    }
}
