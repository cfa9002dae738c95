//! Lexer for payoff expressions.
//!
//! Produces span-carrying tokens for the restricted arithmetic grammar.
//! A handful of tokens (`.`, `[`, `]`, `=`) are recognised only so the
//! parser can reject attribute access, subscripting and assignment with a
//! targeted security error instead of a generic syntax error.

use crate::error::{ExprError, Span};

/// Token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token kind and payload.
    pub kind: TokenKind,
    /// Source byte range.
    pub span: Span,
}

/// Token types of the expression grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Numeric literal.
    Number(f64),
    /// Identifier: variable, constant or function name.
    Ident(String),

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `**` (power)
    StarStar,
    /// `/`
    Slash,
    /// `//` (floor division)
    SlashSlash,
    /// `%` (floored modulo)
    Percent,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,

    // Recognised solely for targeted rejection in the parser.
    /// `.` not forming part of a numeric literal (attribute access).
    Dot,
    /// `[` (subscript or list syntax).
    LBracket,
    /// `]`
    RBracket,
    /// `=` (assignment; `==` lexes as two of these).
    Assign,
}

/// Tokenises payoff source text.
///
/// # Errors
///
/// Returns [`ExprError::Syntax`] on characters outside the grammar,
/// malformed numbers or out-of-range numeric literals.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ExprError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let start = pos;
        let b = bytes[pos];

        match b {
            b' ' | b'\t' | b'\r' | b'\n' => {
                pos += 1;
            }
            b'0'..=b'9' => {
                let (value, end) = lex_number(source, pos)?;
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    span: Span::new(start, end),
                });
                pos = end;
            }
            b'.' => {
                // A leading dot may still start a number (`.5`).
                if bytes.get(pos + 1).is_some_and(|c| c.is_ascii_digit()) {
                    let (value, end) = lex_number(source, pos)?;
                    tokens.push(Token {
                        kind: TokenKind::Number(value),
                        span: Span::new(start, end),
                    });
                    pos = end;
                } else {
                    tokens.push(Token {
                        kind: TokenKind::Dot,
                        span: Span::new(start, start + 1),
                    });
                    pos += 1;
                }
            }
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                let mut end = pos + 1;
                while end < bytes.len()
                    && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_')
                {
                    end += 1;
                }
                tokens.push(Token {
                    kind: TokenKind::Ident(source[pos..end].to_string()),
                    span: Span::new(start, end),
                });
                pos = end;
            }
            b'+' => {
                tokens.push(Token {
                    kind: TokenKind::Plus,
                    span: Span::new(start, start + 1),
                });
                pos += 1;
            }
            b'-' => {
                tokens.push(Token {
                    kind: TokenKind::Minus,
                    span: Span::new(start, start + 1),
                });
                pos += 1;
            }
            b'*' => {
                if bytes.get(pos + 1) == Some(&b'*') {
                    tokens.push(Token {
                        kind: TokenKind::StarStar,
                        span: Span::new(start, start + 2),
                    });
                    pos += 2;
                } else {
                    tokens.push(Token {
                        kind: TokenKind::Star,
                        span: Span::new(start, start + 1),
                    });
                    pos += 1;
                }
            }
            b'/' => {
                if bytes.get(pos + 1) == Some(&b'/') {
                    tokens.push(Token {
                        kind: TokenKind::SlashSlash,
                        span: Span::new(start, start + 2),
                    });
                    pos += 2;
                } else {
                    tokens.push(Token {
                        kind: TokenKind::Slash,
                        span: Span::new(start, start + 1),
                    });
                    pos += 1;
                }
            }
            b'%' => {
                tokens.push(Token {
                    kind: TokenKind::Percent,
                    span: Span::new(start, start + 1),
                });
                pos += 1;
            }
            b'(' => {
                tokens.push(Token {
                    kind: TokenKind::LParen,
                    span: Span::new(start, start + 1),
                });
                pos += 1;
            }
            b')' => {
                tokens.push(Token {
                    kind: TokenKind::RParen,
                    span: Span::new(start, start + 1),
                });
                pos += 1;
            }
            b',' => {
                tokens.push(Token {
                    kind: TokenKind::Comma,
                    span: Span::new(start, start + 1),
                });
                pos += 1;
            }
            b'[' => {
                tokens.push(Token {
                    kind: TokenKind::LBracket,
                    span: Span::new(start, start + 1),
                });
                pos += 1;
            }
            b']' => {
                tokens.push(Token {
                    kind: TokenKind::RBracket,
                    span: Span::new(start, start + 1),
                });
                pos += 1;
            }
            b'=' => {
                tokens.push(Token {
                    kind: TokenKind::Assign,
                    span: Span::new(start, start + 1),
                });
                pos += 1;
            }
            b'"' | b'\'' => {
                return Err(ExprError::Syntax {
                    message: "string literals are not supported".to_string(),
                    span: Span::new(start, start + 1),
                });
            }
            _ => {
                let ch_len = source[pos..]
                    .chars()
                    .next()
                    .map_or(1, |c| c.len_utf8());
                return Err(ExprError::Syntax {
                    message: format!(
                        "unexpected character {:?}",
                        &source[pos..pos + ch_len]
                    ),
                    span: Span::new(start, start + ch_len),
                });
            }
        }
    }

    Ok(tokens)
}

/// Lexes a numeric literal starting at `start`: digits, optional fraction,
/// optional exponent. Returns the value and the end offset.
fn lex_number(source: &str, start: usize) -> Result<(f64, usize), ExprError> {
    let bytes = source.as_bytes();
    let mut end = start;

    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    // Exponent: `e`/`E`, optional sign, at least one digit. An `e` not
    // followed by a digit is left for the identifier lexer (Euler constant).
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        if exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            end = exp_end;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
        }
    }

    let text = &source[start..end];
    let value: f64 = text.parse().map_err(|_| ExprError::Syntax {
        message: format!("malformed number {:?}", text),
        span: Span::new(start, end),
    })?;
    if !value.is_finite() {
        return Err(ExprError::Syntax {
            message: format!("numeric literal {:?} out of range", text),
            span: Span::new(start, end),
        });
    }
    Ok((value, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_expression() {
        assert_eq!(
            kinds("s + 1"),
            vec![
                TokenKind::Ident("s".to_string()),
                TokenKind::Plus,
                TokenKind::Number(1.0),
            ]
        );
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(kinds("3.5"), vec![TokenKind::Number(3.5)]);
        assert_eq!(kinds(".5"), vec![TokenKind::Number(0.5)]);
        assert_eq!(kinds("2e3"), vec![TokenKind::Number(2000.0)]);
        assert_eq!(kinds("1.5e-2"), vec![TokenKind::Number(0.015)]);
    }

    #[test]
    fn test_euler_constant_not_eaten_by_exponent() {
        // `2e` is the number 2 followed by the identifier e.
        assert_eq!(
            kinds("2 * e"),
            vec![
                TokenKind::Number(2.0),
                TokenKind::Star,
                TokenKind::Ident("e".to_string()),
            ]
        );
    }

    #[test]
    fn test_power_and_floor_div() {
        assert_eq!(
            kinds("s ** 2 // 3"),
            vec![
                TokenKind::Ident("s".to_string()),
                TokenKind::StarStar,
                TokenKind::Number(2.0),
                TokenKind::SlashSlash,
                TokenKind::Number(3.0),
            ]
        );
    }

    #[test]
    fn test_call_tokens() {
        assert_eq!(
            kinds("max(s-100,0)"),
            vec![
                TokenKind::Ident("max".to_string()),
                TokenKind::LParen,
                TokenKind::Ident("s".to_string()),
                TokenKind::Minus,
                TokenKind::Number(100.0),
                TokenKind::Comma,
                TokenKind::Number(0.0),
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn test_rejection_tokens_lex() {
        assert_eq!(
            kinds("s.x"),
            vec![
                TokenKind::Ident("s".to_string()),
                TokenKind::Dot,
                TokenKind::Ident("x".to_string()),
            ]
        );
        assert!(kinds("a[0]").contains(&TokenKind::LBracket));
        assert!(kinds("x = 1").contains(&TokenKind::Assign));
    }

    #[test]
    fn test_string_literal_is_syntax_error() {
        let err = tokenize("\"os\"").unwrap_err();
        assert!(matches!(err, ExprError::Syntax { .. }));
        assert!(err.to_string().contains("string"));
    }

    #[test]
    fn test_unknown_character_is_syntax_error() {
        let err = tokenize("s @ 2").unwrap_err();
        assert!(matches!(err, ExprError::Syntax { .. }));
    }

    #[test]
    fn test_huge_literal_rejected() {
        let err = tokenize("1e999").unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_spans_cover_source() {
        let tokens = tokenize("max(s, 10)").unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 3));
        assert_eq!(tokens.last().unwrap().span, Span::new(9, 10));
    }
}
