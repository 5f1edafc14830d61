//! Expression tree produced by the parser.

use n_editor::options::Scope;

pub use crate::lexer::{CaseMode, CompareOp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Negate,
    Plus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    /// `.` and `..`
    Concat,
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(i64),
    Float(f64),
    Str(String),
    Blob(Vec<u8>),
    List(Vec<Expr>),
    /// Keys are expressions; `#{k: v}` keys arrive as [`Expr::Str`].
    Dict(Vec<(Expr, Expr)>),
    Option { name: String, scope: Scope },
    Register(char),
    Env(String),
    Var(String),
    Call { callee: Box<Expr>, args: Vec<Expr> },
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary { op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr> },
    Compare { op: CompareOp, case: CaseMode, lhs: Box<Expr>, rhs: Box<Expr> },
    Ternary { cond: Box<Expr>, then: Box<Expr>, otherwise: Box<Expr> },
    Index { target: Box<Expr>, index: Box<Expr> },
    Slice { target: Box<Expr>, start: Option<Box<Expr>>, end: Option<Box<Expr>> },
    /// `target.key`
    Member { target: Box<Expr>, key: String },
}

impl Expr {
    pub(crate) fn binary(op: BinaryOp, lhs: Self, rhs: Self) -> Self {
        Self::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    /// The function name when this is a plain `name(...)` call.
    #[must_use]
    pub fn call_name(&self) -> Option<&str> {
        match self {
            Self::Call { callee, .. } => match callee.as_ref() {
                Self::Var(name) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }
}
