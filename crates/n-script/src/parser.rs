//! Recursive-descent expression parser.
//!
//! One function per precedence level, lowest first:
//!
//! ```text
//! ternary   a ? b : c
//! or        a || b
//! and       a && b
//! compare   a == b   a =~# b   a is b      (not chained)
//! additive  a + b    a - b    a . b   a .. b
//! term      a * b    a / b    a % b
//! unary     !a  -a  +a
//! postfix   a[i]  a[i:j]  a.key  f(x)
//! atom      literal, name, &option, @r, $ENV, (expr)
//! ```

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::ScriptError;
use crate::lexer::{Token, TokenKind, tokenize};

/// Parse a single expression spanning all of `source`.
///
/// # Errors
///
/// Lexer errors, E15 for malformed input, E488 when text follows the
/// expression, and the bracket-specific codes (E110, E111, E697, E720,
/// E723).
pub fn parse_expression(source: &str) -> Result<Expr, ScriptError> {
    let mut parser = Parser::new(source)?;
    let expr = parser.expression()?;
    parser.finish()?;
    Ok(expr)
}

/// Parse whitespace-separated expressions (`:echo` and `:execute`).
///
/// # Errors
///
/// As [`parse_expression`]. An empty `source` gives an empty list.
pub fn parse_expr_list(source: &str) -> Result<Vec<Expr>, ScriptError> {
    let mut parser = Parser::new(source)?;
    let mut exprs = Vec::new();
    while !parser.at_end() {
        exprs.push(parser.expression()?);
    }
    Ok(exprs)
}

struct Parser<'a> {
    src: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Result<Self, ScriptError> {
        Ok(Self { src, tokens: tokenize(src)?, pos: 0 })
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn peek_token(&self, ahead: usize) -> Option<&Token> {
        self.tokens.get(self.pos + ahead)
    }

    fn advance(&mut self) -> Option<TokenKind> {
        let token = self.tokens.get(self.pos)?.kind.clone();
        self.pos += 1;
        Some(token)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn rest(&self) -> &str {
        self.tokens.get(self.pos).map_or("", |t| &self.src[t.start..])
    }

    fn invalid(&self) -> ScriptError {
        ScriptError::InvalidExpression(self.src.trim().to_string())
    }

    fn finish(&self) -> Result<(), ScriptError> {
        if self.at_end() {
            Ok(())
        } else {
            Err(ScriptError::TrailingCharacters(self.rest().to_string()))
        }
    }

    // -- Precedence levels --------------------------------------------------

    fn expression(&mut self) -> Result<Expr, ScriptError> {
        let cond = self.or()?;
        if !self.eat(&TokenKind::Question) {
            return Ok(cond);
        }
        let then = self.expression()?;
        if !self.eat(&TokenKind::Colon) {
            return Err(self.invalid());
        }
        let otherwise = self.expression()?;
        Ok(Expr::Ternary {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    fn or(&mut self) -> Result<Expr, ScriptError> {
        let mut lhs = self.and()?;
        while self.eat(&TokenKind::OrOr) {
            let rhs = self.and()?;
            lhs = Expr::binary(BinaryOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    fn and(&mut self) -> Result<Expr, ScriptError> {
        let mut lhs = self.compare()?;
        while self.eat(&TokenKind::AndAnd) {
            let rhs = self.compare()?;
            lhs = Expr::binary(BinaryOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    fn compare(&mut self) -> Result<Expr, ScriptError> {
        let lhs = self.additive()?;
        let Some(&TokenKind::Compare(op, case)) = self.peek() else {
            return Ok(lhs);
        };
        self.pos += 1;
        let rhs = self.additive()?;
        Ok(Expr::Compare { op, case, lhs: Box::new(lhs), rhs: Box::new(rhs) })
    }

    fn additive(&mut self) -> Result<Expr, ScriptError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Subtract,
                Some(TokenKind::Dot | TokenKind::DotDot) => BinaryOp::Concat,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn term(&mut self) -> Result<Expr, ScriptError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Star) => BinaryOp::Multiply,
                Some(TokenKind::Slash) => BinaryOp::Divide,
                Some(TokenKind::Percent) => BinaryOp::Modulo,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Expr, ScriptError> {
        let op = match self.peek() {
            Some(TokenKind::Bang) => UnaryOp::Not,
            Some(TokenKind::Minus) => UnaryOp::Negate,
            Some(TokenKind::Plus) => UnaryOp::Plus,
            _ => return self.postfix(),
        };
        self.pos += 1;
        let operand = self.unary()?;
        Ok(Expr::Unary { op, operand: Box::new(operand) })
    }

    fn postfix(&mut self) -> Result<Expr, ScriptError> {
        let mut expr = self.atom()?;
        loop {
            let Some(next) = self.peek_token(0) else { return Ok(expr) };
            match next.kind {
                TokenKind::LBracket if !next.spaced => {
                    self.pos += 1;
                    expr = self.subscript(expr)?;
                }
                TokenKind::LParen if !next.spaced => {
                    self.pos += 1;
                    let args = self.arguments()?;
                    expr = Expr::Call { callee: Box::new(expr), args };
                }
                TokenKind::Dot if !next.spaced => {
                    let key = match self.peek_token(1) {
                        Some(Token { kind: TokenKind::Ident(name), spaced: false, .. }) => name.clone(),
                        Some(Token { kind: TokenKind::Number(n), spaced: false, .. }) => n.to_string(),
                        _ => return Ok(expr),
                    };
                    self.pos += 2;
                    expr = Expr::Member { target: Box::new(expr), key };
                }
                _ => return Ok(expr),
            }
        }
    }

    /// After `[`: an index or a slice.
    fn subscript(&mut self, target: Expr) -> Result<Expr, ScriptError> {
        let target = Box::new(target);
        let start = if self.peek() == Some(&TokenKind::Colon) {
            None
        } else {
            Some(Box::new(self.expression()?))
        };

        if self.eat(&TokenKind::Colon) {
            let end = if self.peek() == Some(&TokenKind::RBracket) {
                None
            } else {
                Some(Box::new(self.expression()?))
            };
            self.close_bracket()?;
            return Ok(Expr::Slice { target, start, end });
        }

        self.close_bracket()?;
        match start {
            Some(index) => Ok(Expr::Index { target, index }),
            None => Err(self.invalid()),
        }
    }

    fn close_bracket(&mut self) -> Result<(), ScriptError> {
        if self.eat(&TokenKind::RBracket) {
            Ok(())
        } else {
            Err(ScriptError::MissingBracket)
        }
    }

    /// After `(`: comma-separated arguments up to `)`.
    fn arguments(&mut self) -> Result<Vec<Expr>, ScriptError> {
        let mut args = Vec::new();
        if self.eat(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.expression()?);
            if self.eat(&TokenKind::RParen) {
                return Ok(args);
            }
            if !self.eat(&TokenKind::Comma) {
                return Err(ScriptError::MissingParen);
            }
        }
    }

    // -- Atoms --------------------------------------------------------------

    fn atom(&mut self) -> Result<Expr, ScriptError> {
        let opened = self.rest().to_string();
        let Some(token) = self.advance() else {
            return Err(self.invalid());
        };
        let expr = match token {
            TokenKind::Number(n) => Expr::Number(n),
            TokenKind::Float(f) => Expr::Float(f),
            TokenKind::Str(s) => Expr::Str(s),
            TokenKind::Blob(b) => Expr::Blob(b),
            TokenKind::Ident(name) => Expr::Var(name),
            TokenKind::Option { name, scope } => Expr::Option { name, scope },
            TokenKind::Register(r) => Expr::Register(r),
            TokenKind::Env(name) => Expr::Env(name),
            TokenKind::LParen => {
                let inner = self.expression()?;
                if !self.eat(&TokenKind::RParen) {
                    return Err(ScriptError::MissingParen);
                }
                inner
            }
            TokenKind::LBracket => self.list(opened)?,
            TokenKind::LBrace => self.dict(opened, false)?,
            TokenKind::HashBrace => self.dict(opened, true)?,
            _ => return Err(self.invalid()),
        };
        Ok(expr)
    }

    fn list(&mut self, source: String) -> Result<Expr, ScriptError> {
        let mut items = Vec::new();
        loop {
            if self.eat(&TokenKind::RBracket) {
                return Ok(Expr::List(items));
            }
            if self.at_end() {
                return Err(ScriptError::MissingListEnd(source));
            }
            items.push(self.expression()?);
            if !self.eat(&TokenKind::Comma) && self.peek() != Some(&TokenKind::RBracket) {
                return Err(ScriptError::MissingListEnd(source));
            }
        }
    }

    fn dict(&mut self, source: String, literal_keys: bool) -> Result<Expr, ScriptError> {
        let mut entries = Vec::new();
        loop {
            if self.eat(&TokenKind::RBrace) {
                return Ok(Expr::Dict(entries));
            }
            if self.at_end() {
                return Err(ScriptError::MissingDictEnd(source));
            }
            let key = if literal_keys { self.literal_key()? } else { self.expression()? };
            if !self.eat(&TokenKind::Colon) {
                return Err(ScriptError::MissingDictColon(self.rest().to_string()));
            }
            let value = self.expression()?;
            entries.push((key, value));
            if !self.eat(&TokenKind::Comma) && self.peek() != Some(&TokenKind::RBrace) {
                return Err(ScriptError::MissingDictEnd(source));
            }
        }
    }

    fn literal_key(&mut self) -> Result<Expr, ScriptError> {
        match self.advance() {
            Some(TokenKind::Ident(name)) => Ok(Expr::Str(name)),
            Some(TokenKind::Number(n)) => Ok(Expr::Str(n.to_string())),
            Some(TokenKind::Str(s)) => Ok(Expr::Str(s)),
            _ => Err(self.invalid()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
