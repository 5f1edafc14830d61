//! Expression evaluation.
//!
//! [`Evaluator`] walks an [`Expr`] against an [`Environment`] and a
//! [`FunctionTable`]. Evaluation never mutates the environment; `:let`
//! and `:unlet` go through [`assign`] and [`unlet`], which evaluate first
//! and write after.

use std::cmp::Ordering;

use regex::{Regex, RegexBuilder};

use crate::ast::{BinaryOp, CaseMode, CompareOp, Expr, UnaryOp};
use crate::command::{LetOp, LetTarget};
use crate::env::Environment;
use crate::error::ScriptError;
use crate::functions::FunctionTable;
use crate::value::{Dictionary, VimValue};

pub struct Evaluator<'a> {
    env: &'a dyn Environment,
    functions: &'a FunctionTable,
}

impl<'a> Evaluator<'a> {
    #[must_use]
    pub fn new(env: &'a dyn Environment, functions: &'a FunctionTable) -> Self {
        Self { env, functions }
    }

    #[must_use]
    pub fn env(&self) -> &dyn Environment {
        self.env
    }

    #[must_use]
    pub const fn functions(&self) -> &FunctionTable {
        self.functions
    }

    /// Evaluate `expr`.
    ///
    /// # Errors
    ///
    /// Any type, index, name, or arity error the expression runs into.
    pub fn eval(&self, expr: &Expr) -> Result<VimValue, ScriptError> {
        match expr {
            Expr::Number(n) => Ok(VimValue::Number(*n)),
            Expr::Float(f) => Ok(VimValue::Float(*f)),
            Expr::Str(s) => Ok(VimValue::String(s.clone())),
            Expr::Blob(b) => Ok(VimValue::Blob(b.clone())),
            Expr::List(items) => Ok(VimValue::List(
                items.iter().map(|e| self.eval(e)).collect::<Result<_, _>>()?,
            )),
            Expr::Dict(entries) => {
                let mut dict = Dictionary::new();
                for (key, value) in entries {
                    dict.insert(self.eval(key)?.to_str()?, self.eval(value)?);
                }
                Ok(VimValue::Dict(dict))
            }
            Expr::Option { name, scope } => self.env.option(name, *scope),
            Expr::Register(name) => Ok(VimValue::String(self.env.register(*name))),
            Expr::Env(name) => Ok(VimValue::String(self.env.env_var(name).unwrap_or_default())),
            Expr::Var(name) => self
                .env
                .variable(name)
                .ok_or_else(|| ScriptError::UndefinedVariable(name.clone())),
            Expr::Call { callee, args } => self.call(callee, args),
            Expr::Unary { op, operand } => unary(*op, &self.eval(operand)?),
            Expr::Binary { op: BinaryOp::And, lhs, rhs } => {
                let result = self.eval(lhs)?.to_bool()? && self.eval(rhs)?.to_bool()?;
                Ok(VimValue::from_bool(result))
            }
            Expr::Binary { op: BinaryOp::Or, lhs, rhs } => {
                let result = self.eval(lhs)?.to_bool()? || self.eval(rhs)?.to_bool()?;
                Ok(VimValue::from_bool(result))
            }
            Expr::Binary { op, lhs, rhs } => binary(*op, &self.eval(lhs)?, &self.eval(rhs)?),
            Expr::Compare { op, case, lhs, rhs } => {
                let ignore = match case {
                    CaseMode::Default => self.env.ignore_case(),
                    CaseMode::Match => false,
                    CaseMode::Ignore => true,
                };
                compare(*op, ignore, &self.eval(lhs)?, &self.eval(rhs)?).map(VimValue::from_bool)
            }
            Expr::Ternary { cond, then, otherwise } => {
                if self.eval(cond)?.to_bool()? {
                    self.eval(then)
                } else {
                    self.eval(otherwise)
                }
            }
            Expr::Index { target, index } => index_value(&self.eval(target)?, &self.eval(index)?),
            Expr::Slice { target, start, end } => {
                let bound = |e: &Option<Box<Expr>>| -> Result<Option<i64>, ScriptError> {
                    e.as_deref().map(|e| self.eval(e)?.to_integer()).transpose()
                };
                slice_value(&self.eval(target)?, bound(start)?, bound(end)?)
            }
            Expr::Member { target, key } => self.member(&self.eval(target)?, key),
        }
    }

    fn member(&self, target: &VimValue, key: &str) -> Result<VimValue, ScriptError> {
        if let VimValue::Dict(dict) = target {
            return dict
                .get(key)
                .cloned()
                .ok_or_else(|| ScriptError::KeyNotPresent(key.to_string()));
        }
        // Not a dictionary: `a.b` is the concatenation of `a` and `b`.
        let rhs = if key.bytes().all(|b| b.is_ascii_digit()) {
            VimValue::String(key.to_string())
        } else {
            self.env
                .variable(key)
                .ok_or_else(|| ScriptError::UndefinedVariable(key.to_string()))?
        };
        binary(BinaryOp::Concat, target, &rhs)
    }

    fn call(&self, callee: &Expr, args: &[Expr]) -> Result<VimValue, ScriptError> {
        let name = match callee {
            Expr::Var(name) if self.functions.contains(name) => name.clone(),
            Expr::Var(name) => match self.env.variable(name) {
                Some(VimValue::Funcref(target)) => target,
                _ => return Err(ScriptError::UnknownFunction(name.clone())),
            },
            other => match self.eval(other)? {
                VimValue::Funcref(target) => target,
                value => return Err(ScriptError::InvalidExpression(value.repr())),
            },
        };
        let values = args.iter().map(|a| self.eval(a)).collect::<Result<Vec<_>, _>>()?;
        self.call_function(&name, &values)
    }

    /// Call builtin `name` with already evaluated arguments.
    ///
    /// # Errors
    ///
    /// E117 for unknown names, E118 / E119 for arity, or the function's own
    /// error.
    pub fn call_function(&self, name: &str, args: &[VimValue]) -> Result<VimValue, ScriptError> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| ScriptError::UnknownFunction(name.to_string()))?;
        if args.len() < function.min_args {
            return Err(ScriptError::NotEnoughArguments(name.to_string()));
        }
        if args.len() > function.max_args {
            return Err(ScriptError::TooManyArguments(name.to_string()));
        }
        tracing::trace!(function = name, args = args.len(), "call");
        (function.call)(self, args)
    }
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

fn unary(op: UnaryOp, value: &VimValue) -> Result<VimValue, ScriptError> {
    Ok(match (op, value) {
        (UnaryOp::Not, VimValue::Float(f)) => VimValue::Float(if *f == 0.0 { 1.0 } else { 0.0 }),
        (UnaryOp::Not, v) => VimValue::from_bool(v.to_number()? == 0),
        (UnaryOp::Negate, VimValue::Float(f)) => VimValue::Float(-f),
        (UnaryOp::Negate, v) => VimValue::Number(v.to_number()?.wrapping_neg()),
        (UnaryOp::Plus, VimValue::Float(f)) => VimValue::Float(*f),
        (UnaryOp::Plus, v) => VimValue::Number(v.to_number()?),
    })
}

/// Arithmetic, concatenation, and the non-short-circuit logic operators.
///
/// # Errors
///
/// Coercion errors of the operands; E804 for `%` on a Float.
pub fn binary(op: BinaryOp, lhs: &VimValue, rhs: &VimValue) -> Result<VimValue, ScriptError> {
    match (op, lhs, rhs) {
        (BinaryOp::Concat, l, r) => Ok(VimValue::String(l.to_str()? + &r.to_str()?)),
        (BinaryOp::And, l, r) => Ok(VimValue::from_bool(l.to_bool()? && r.to_bool()?)),
        (BinaryOp::Or, l, r) => Ok(VimValue::from_bool(l.to_bool()? || r.to_bool()?)),
        (BinaryOp::Add, VimValue::List(l), VimValue::List(r)) => {
            Ok(VimValue::List(l.iter().chain(r).cloned().collect()))
        }
        (BinaryOp::Add, VimValue::Blob(l), VimValue::Blob(r)) => {
            Ok(VimValue::Blob(l.iter().chain(r).copied().collect()))
        }
        (BinaryOp::Modulo, VimValue::Float(_), _) | (BinaryOp::Modulo, _, VimValue::Float(_)) => {
            Err(ScriptError::FloatModulo)
        }
        (_, VimValue::Float(_), _) | (_, _, VimValue::Float(_)) => {
            Ok(VimValue::Float(float_op(op, lhs.to_float()?, rhs.to_float()?)))
        }
        (_, l, r) => Ok(VimValue::Number(number_op(op, l.to_number()?, r.to_number()?))),
    }
}

/// `+ - * /` on Floats. Division by zero follows IEEE.
fn float_op(op: BinaryOp, l: f64, r: f64) -> f64 {
    match op {
        BinaryOp::Add => l + r,
        BinaryOp::Subtract => l - r,
        BinaryOp::Multiply => l * r,
        _ => l / r,
    }
}

/// Integer arithmetic with Vim's division rules: `x / 0` is the largest
/// value of `x`'s sign, `0 / 0` is `i64::MIN`, and `x % 0` is 0.
const fn number_op(op: BinaryOp, l: i64, r: i64) -> i64 {
    match op {
        BinaryOp::Add => l.wrapping_add(r),
        BinaryOp::Subtract => l.wrapping_sub(r),
        BinaryOp::Multiply => l.wrapping_mul(r),
        BinaryOp::Modulo if r == 0 => 0,
        BinaryOp::Modulo => l.wrapping_rem(r),
        _ if r == 0 => match l {
            0 => i64::MIN,
            l if l > 0 => i64::MAX,
            _ => -i64::MAX,
        },
        _ => l.wrapping_div(r),
    }
}

/// Evaluate a comparison.
///
/// # Errors
///
/// E691 / E735 / E692 / E736 / E694 / E978 for container comparisons Vim
/// refuses, E383 for a bad pattern, and coercion errors.
pub fn compare(op: CompareOp, ignore_case: bool, lhs: &VimValue, rhs: &VimValue) -> Result<bool, ScriptError> {
    use CompareOp as C;
    use VimValue as V;

    let equality = matches!(op, C::Equal | C::NotEqual | C::Is | C::IsNot);
    let negate = matches!(op, C::NotEqual | C::IsNot | C::NoMatch);

    if matches!(op, C::Is | C::IsNot) && lhs.type_number() != rhs.type_number() {
        return Ok(negate);
    }

    let result = match (lhs, rhs) {
        (V::List(_), V::List(_)) | (V::Dict(_), V::Dict(_)) | (V::Funcref(_), V::Funcref(_)) | (V::Blob(_), V::Blob(_))
            if equality =>
        {
            values_equal(lhs, rhs, ignore_case)
        }
        (V::List(_), V::List(_)) => return Err(ScriptError::ListOperation),
        (V::List(_), _) | (_, V::List(_)) => return Err(ScriptError::CompareListWithOther),
        (V::Dict(_), V::Dict(_)) => return Err(ScriptError::DictOperation),
        (V::Dict(_), _) | (_, V::Dict(_)) => return Err(ScriptError::CompareDictWithOther),
        (V::Funcref(_), _) | (_, V::Funcref(_)) if equality => false,
        (V::Funcref(_), _) | (_, V::Funcref(_)) => return Err(ScriptError::FuncrefOperation),
        (V::Blob(_), _) | (_, V::Blob(_)) if equality => false,
        (V::Blob(_), _) | (_, V::Blob(_)) => return Err(ScriptError::BlobOperation),
        _ if matches!(op, C::Match | C::NoMatch) => {
            let pattern = compile_pattern(&rhs.to_str()?, ignore_case)?;
            pattern.is_match(&lhs.to_str()?)
        }
        _ => {
            let ordering = scalar_ordering(lhs, rhs, ignore_case)?;
            match op {
                C::Greater => ordering == Some(Ordering::Greater),
                C::GreaterEqual => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
                C::Less => ordering == Some(Ordering::Less),
                C::LessEqual => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
                _ => ordering == Some(Ordering::Equal),
            }
        }
    };
    Ok(result != negate)
}

/// Ordering of two Numbers, Floats, or Strings. A String compared with a
/// Number is read as a Number; `None` means unordered (NaN).
fn scalar_ordering(lhs: &VimValue, rhs: &VimValue, ignore_case: bool) -> Result<Option<Ordering>, ScriptError> {
    use VimValue as V;
    Ok(match (lhs, rhs) {
        (V::String(l), V::String(r)) if ignore_case => Some(l.to_lowercase().cmp(&r.to_lowercase())),
        (V::String(l), V::String(r)) => Some(l.cmp(r)),
        (V::Float(_), _) | (_, V::Float(_)) => lhs.to_float()?.partial_cmp(&rhs.to_float()?),
        _ => Some(lhs.to_number()?.cmp(&rhs.to_number()?)),
    })
}

fn values_equal(lhs: &VimValue, rhs: &VimValue, ignore_case: bool) -> bool {
    use VimValue as V;
    match (lhs, rhs) {
        (V::List(l), V::List(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(a, b)| values_equal(a, b, ignore_case))
        }
        (V::Dict(l), V::Dict(r)) => {
            l.len() == r.len()
                && l.iter().all(|(k, v)| r.get(k).is_some_and(|w| values_equal(v, w, ignore_case)))
        }
        (V::Funcref(l), V::Funcref(r)) => l == r,
        (V::Blob(l), V::Blob(r)) => l == r,
        (V::String(l), V::String(r)) if ignore_case => l.to_lowercase() == r.to_lowercase(),
        _ => matches!(scalar_ordering(lhs, rhs, ignore_case), Ok(Some(Ordering::Equal))),
    }
}

// ---------------------------------------------------------------------------
// Indexing
// ---------------------------------------------------------------------------

fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let i = if index < 0 { len + index } else { index };
    (0..len).contains(&i).then(|| usize::try_from(i).ok()).flatten()
}

/// `value[index]`.
///
/// # Errors
///
/// E684, E716, E979 for missing elements, E689 for unindexable values.
pub fn index_value(value: &VimValue, index: &VimValue) -> Result<VimValue, ScriptError> {
    match value {
        VimValue::List(items) => {
            let i = index.to_integer()?;
            resolve_index(i, items.len())
                .map(|i| items[i].clone())
                .ok_or(ScriptError::ListIndexOutOfRange(i))
        }
        VimValue::Dict(dict) => {
            let key = index.to_str()?;
            dict.get(&key).cloned().ok_or(ScriptError::KeyNotPresent(key))
        }
        VimValue::Blob(bytes) => {
            let i = index.to_integer()?;
            resolve_index(i, bytes.len())
                .map(|i| VimValue::Number(i64::from(bytes[i])))
                .ok_or(ScriptError::BlobIndexOutOfRange(i))
        }
        VimValue::String(_) | VimValue::Number(_) => {
            // Strings index by character; negative and out-of-range give "".
            let text = value.to_str()?;
            let i = index.to_integer()?;
            let ch = usize::try_from(i).ok().and_then(|i| text.chars().nth(i));
            Ok(VimValue::String(ch.map(String::from).unwrap_or_default()))
        }
        VimValue::Float(_) | VimValue::Funcref(_) => Err(ScriptError::CannotIndex),
    }
}

/// Inclusive `[start, end]` bounds over `len` items, negatives counted
/// from the end. `None` when the slice is empty.
fn slice_bounds(start: Option<i64>, end: Option<i64>, len: usize) -> Option<(usize, usize)> {
    let len = i64::try_from(len).ok()?;
    let norm = |i: i64| if i < 0 { len + i } else { i };
    let start = norm(start.unwrap_or(0)).max(0);
    let end = norm(end.unwrap_or(-1)).min(len - 1);
    if start > end {
        return None;
    }
    Some((usize::try_from(start).ok()?, usize::try_from(end).ok()?))
}

/// `value[start : end]`, end inclusive.
///
/// # Errors
///
/// E689 for Dictionaries, Floats, and Funcrefs.
pub fn slice_value(value: &VimValue, start: Option<i64>, end: Option<i64>) -> Result<VimValue, ScriptError> {
    Ok(match value {
        VimValue::List(items) => VimValue::List(
            slice_bounds(start, end, items.len()).map_or_else(Vec::new, |(s, e)| items[s..=e].to_vec()),
        ),
        VimValue::Blob(bytes) => VimValue::Blob(
            slice_bounds(start, end, bytes.len()).map_or_else(Vec::new, |(s, e)| bytes[s..=e].to_vec()),
        ),
        VimValue::String(_) | VimValue::Number(_) => {
            let chars: Vec<char> = value.to_str()?.chars().collect();
            VimValue::String(
                slice_bounds(start, end, chars.len()).map_or_else(String::new, |(s, e)| chars[s..=e].iter().collect()),
            )
        }
        VimValue::Dict(_) | VimValue::Float(_) | VimValue::Funcref(_) => return Err(ScriptError::CannotIndex),
    })
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// Compile a Vim pattern (magic by default) into a [`Regex`].
///
/// `\c` / `\C` anywhere in the pattern override `ignore_case`. `\v` and
/// `\m` switch between very magic and magic for the rest of the pattern.
///
/// # Errors
///
/// E383 when the translated pattern does not compile.
pub fn compile_pattern(pattern: &str, ignore_case: bool) -> Result<Regex, ScriptError> {
    let (translated, case) = translate_pattern(pattern);
    RegexBuilder::new(&translated)
        .case_insensitive(case.unwrap_or(ignore_case))
        .build()
        .map_err(|_| ScriptError::InvalidPattern(pattern.to_string()))
}

fn translate_pattern(pattern: &str) -> (String, Option<bool>) {
    let mut out = String::with_capacity(pattern.len());
    let mut case = None;
    let mut very_magic = false;
    let mut chars = pattern.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            match ch {
                '(' | ')' | '|' | '+' | '?' | '{' | '}' if !very_magic => {
                    out.push('\\');
                    out.push(ch);
                }
                '<' | '>' if very_magic => out.push_str("\\b"),
                '=' if very_magic => out.push('?'),
                '~' => out.push('~'),
                _ => out.push(ch),
            }
            continue;
        }
        let Some(next) = chars.next() else {
            out.push_str("\\\\");
            break;
        };
        match next {
            'v' => very_magic = true,
            'm' | 'M' | 'V' => very_magic = false,
            'c' => case = Some(true),
            'C' => case = Some(false),
            '<' | '>' if !very_magic => out.push_str("\\b"),
            '(' | ')' | '|' | '+' | '?' | '{' | '}' if !very_magic => out.push(next),
            '=' if !very_magic => out.push('?'),
            's' | 'S' | 'd' | 'D' | 'w' | 'W' | 'n' | 't' => {
                out.push('\\');
                out.push(next);
            }
            'e' => out.push_str("\\x1b"),
            'a' => out.push_str("[A-Za-z]"),
            'A' => out.push_str("[^A-Za-z]"),
            'l' => out.push_str("[a-z]"),
            'L' => out.push_str("[^a-z]"),
            'u' => out.push_str("[A-Z]"),
            'U' => out.push_str("[^A-Z]"),
            'x' => out.push_str("[0-9A-Fa-f]"),
            'X' => out.push_str("[^0-9A-Fa-f]"),
            'h' => out.push_str("[A-Za-z_]"),
            'H' => out.push_str("[^A-Za-z_]"),
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }
    (out, case)
}

// ---------------------------------------------------------------------------
// :let and :unlet
// ---------------------------------------------------------------------------

const fn op_text(op: LetOp) -> &'static str {
    match op {
        LetOp::Assign => "",
        LetOp::Add => "+",
        LetOp::Subtract => "-",
        LetOp::Multiply => "*",
        LetOp::Divide => "/",
        LetOp::Modulo => "%",
        LetOp::Concat => ".",
    }
}

fn combine(op: LetOp, current: &VimValue, value: &VimValue) -> Result<VimValue, ScriptError> {
    let binary_op = match op {
        LetOp::Assign => return Ok(value.clone()),
        LetOp::Add => BinaryOp::Add,
        LetOp::Subtract => BinaryOp::Subtract,
        LetOp::Multiply => BinaryOp::Multiply,
        LetOp::Divide => BinaryOp::Divide,
        LetOp::Modulo => BinaryOp::Modulo,
        LetOp::Concat => BinaryOp::Concat,
    };
    let fits = match current {
        VimValue::Dict(_) | VimValue::Funcref(_) => false,
        VimValue::List(_) | VimValue::Blob(_) => op == LetOp::Add,
        _ => true,
    };
    if !fits {
        return Err(ScriptError::WrongVariableType(op_text(op)));
    }
    binary(binary_op, current, value)
}

/// Run `:let target op= value`.
///
/// # Errors
///
/// Evaluation errors, E121 when a compound operator finds no variable,
/// E734 for a compound operator the current value does not support, and
/// the target's own write errors.
pub fn assign(
    env: &mut dyn Environment,
    functions: &FunctionTable,
    target: &LetTarget,
    op: LetOp,
    value: &Expr,
) -> Result<(), ScriptError> {
    let (value, current) = {
        let evaluator = Evaluator::new(&*env, functions);
        let value = evaluator.eval(value)?;
        let current = match (op, target) {
            (LetOp::Assign, _) => None,
            (_, LetTarget::Var(name)) => Some(
                env.variable(name)
                    .ok_or_else(|| ScriptError::UndefinedVariable(name.clone()))?,
            ),
            (_, LetTarget::Option { name, scope }) => Some(env.option(name, *scope)?),
            (_, LetTarget::Register(name)) => Some(VimValue::String(env.register(*name))),
            (_, LetTarget::Env(name)) => Some(VimValue::String(env.env_var(name).unwrap_or_default())),
        };
        (value, current)
    };
    let value = match current {
        Some(current) => combine(op, &current, &value)?,
        None => value,
    };

    tracing::debug!(?target, "let");
    match target {
        LetTarget::Var(name) => env.set_variable(name, value),
        LetTarget::Option { name, scope } => env.set_option(name, *scope, &value),
        LetTarget::Register(name) => {
            env.set_register(*name, &value.to_str()?);
            Ok(())
        }
        LetTarget::Env(name) => {
            env.set_env_var(name, value.to_str()?);
            Ok(())
        }
    }
}

/// Run `:unlet[!] names`. Without `force`, a missing variable is E108 and
/// stops at that name.
///
/// # Errors
///
/// E108 for a missing variable, E46 for `v:` names.
pub fn unlet(env: &mut dyn Environment, names: &[String], force: bool) -> Result<(), ScriptError> {
    for name in names {
        if name.starts_with("v:") {
            return Err(ScriptError::ReadOnlyVariable(name.clone()));
        }
        if !env.remove_variable(name) && !force {
            return Err(ScriptError::NoSuchVariable(name.clone()));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{EditorEnv, Variables};
    use crate::parser::parse_expression;
    use n_editor::options::Options;
    use n_editor::register::RegisterFile;

    struct Fixture {
        variables: Variables,
        options: Options,
        registers: RegisterFile,
        functions: FunctionTable,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                variables: Variables::new(),
                options: Options::new(),
                registers: RegisterFile::new(),
                functions: FunctionTable::builtin(),
            }
        }

        fn env(&mut self) -> EditorEnv<'_> {
            EditorEnv {
                variables: &mut self.variables,
                options: &mut self.options,
                registers: &mut self.registers,
            }
        }

        fn eval(&mut self, text: &str) -> Result<VimValue, ScriptError> {
            let expr = parse_expression(text)?;
            let env = EditorEnv {
                variables: &mut self.variables,
                options: &mut self.options,
                registers: &mut self.registers,
            };
            Evaluator::new(&env, &self.functions).eval(&expr)
        }

        fn let_(&mut self, target: LetTarget, op: LetOp, value: &str) -> Result<(), ScriptError> {
            let expr = parse_expression(value)?;
            let mut env = EditorEnv {
                variables: &mut self.variables,
                options: &mut self.options,
                registers: &mut self.registers,
            };
            assign(&mut env, &self.functions, &target, op, &expr)
        }
    }

    fn eval(text: &str) -> Result<VimValue, ScriptError> {
        Fixture::new().eval(text)
    }

    fn num(n: i64) -> Result<VimValue, ScriptError> {
        Ok(VimValue::Number(n))
    }

    // -- Arithmetic ---------------------------------------------------------

    #[test]
    fn numbers_and_floats() {
        assert_eq!(eval("1 + 2 * 3"), num(7));
        assert_eq!(eval("7 / 2"), num(3));
        assert_eq!(eval("-7 % 3"), num(-1));
        assert_eq!(eval("1 + 0.5"), Ok(VimValue::Float(1.5)));
        assert_eq!(eval("'3' + '0x10'"), num(19));
        assert_eq!(eval("1.5 % 1"), Err(ScriptError::FloatModulo));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(eval("5 / 0"), num(i64::MAX));
        assert_eq!(eval("-5 / 0"), num(-i64::MAX));
        assert_eq!(eval("0 / 0"), num(i64::MIN));
        assert_eq!(eval("5 % 0"), num(0));
    }

    #[test]
    fn concatenation() {
        assert_eq!(eval("'a' . 1 .. 'b'"), Ok(VimValue::string("a1b")));
        assert_eq!(eval("'a' . 1.5"), Err(ScriptError::FloatAsString));
        assert_eq!(eval("'a' . [1]"), Err(ScriptError::ListAsString));
        assert_eq!(eval("'a' . {}"), Err(ScriptError::DictAsString));
        assert_eq!(eval("[1] + [2]"), Ok(VimValue::List(vec![1.into(), 2.into()])));
        assert_eq!(eval("[1] + 1"), Err(ScriptError::ListAsNumber));
    }

    #[test]
    fn logic_short_circuits() {
        assert_eq!(eval("0 && undefined"), num(0));
        assert_eq!(eval("1 || undefined"), num(1));
        assert_eq!(eval("1 && undefined"), Err(ScriptError::UndefinedVariable("undefined".into())));
        assert_eq!(eval("!0"), num(1));
        assert_eq!(eval("1 ? 'y' : 'n'"), Ok(VimValue::string("y")));
    }

    // -- Comparison ---------------------------------------------------------

    #[test]
    fn case_follows_ignorecase_unless_suffixed() {
        let mut fx = Fixture::new();
        assert_eq!(fx.eval("'a' == 'A'"), num(0));
        assert_eq!(fx.eval("'a' ==? 'A'"), num(1));
        fx.options.execute_set(n_editor::options::Scope::Both, "ignorecase").unwrap();
        assert_eq!(fx.eval("'a' == 'A'"), num(1));
        assert_eq!(fx.eval("'a' ==# 'A'"), num(0));
    }

    #[test]
    fn mixed_comparisons() {
        assert_eq!(eval("'10' == 10"), num(1));
        assert_eq!(eval("'abc' < 'abd'"), num(1));
        assert_eq!(eval("1.5 > 1"), num(1));
        assert_eq!(eval("[1, 'a'] == [1, 'a']"), num(1));
        assert_eq!(eval("{'a': 1} != {'a': 2}"), num(1));
        assert_eq!(eval("1 is 1"), num(1));
        assert_eq!(eval("1 is '1'"), num(0));
        assert_eq!(eval("[1] isnot [1]"), num(0));
    }

    #[test]
    fn container_comparison_errors() {
        assert_eq!(eval("[1] < [2]"), Err(ScriptError::ListOperation));
        assert_eq!(eval("[1] == 1"), Err(ScriptError::CompareListWithOther));
        assert_eq!(eval("{} > {}"), Err(ScriptError::DictOperation));
        assert_eq!(eval("{} == 'x'"), Err(ScriptError::CompareDictWithOther));
        assert_eq!(eval("function('abs') < function('abs')"), Err(ScriptError::FuncrefOperation));
    }

    #[test]
    fn pattern_matching() {
        assert_eq!(eval("'foobar' =~ 'o\\+b'"), num(1));
        assert_eq!(eval("'foo bar' =~ '\\<bar'"), num(1));
        assert_eq!(eval("'a+b' =~ 'a+b'"), num(1));
        assert_eq!(eval("'FOO' =~ '\\cfoo'"), num(1));
        assert_eq!(eval("'FOO' !~# 'foo'"), num(1));
        assert_eq!(eval("'abc' =~ '\\v(b|x)c'"), num(1));
        assert_eq!(eval("'x' =~ '\\v('"), Err(ScriptError::InvalidPattern("\\v(".into())));
    }

    // -- Indexing -----------------------------------------------------------

    #[test]
    fn indexes_and_slices() {
        assert_eq!(eval("[1, 2, 3][-1]"), num(3));
        assert_eq!(eval("[1, 2, 3][3]"), Err(ScriptError::ListIndexOutOfRange(3)));
        assert_eq!(eval("[1, 2, 3][1:]"), Ok(VimValue::List(vec![2.into(), 3.into()])));
        assert_eq!(eval("[1, 2, 3][5:]"), Ok(VimValue::List(vec![])));
        assert_eq!(eval("'hello'[1:3]"), Ok(VimValue::string("ell")));
        assert_eq!(eval("'hello'[1]"), Ok(VimValue::string("e")));
        assert_eq!(eval("'hello'[9]"), Ok(VimValue::string("")));
        assert_eq!(eval("{'a': 1}['b']"), Err(ScriptError::KeyNotPresent("b".into())));
        assert_eq!(eval("{'a': 1}.a"), num(1));
        assert_eq!(eval("0zFF00[0]"), num(255));
        assert_eq!(eval("1.5[0]"), Err(ScriptError::CannotIndex));
        assert_eq!(eval("[1, 2][1.0]"), Err(ScriptError::FloatAsNumber));
    }

    #[test]
    fn member_on_non_dict_concatenates() {
        let mut fx = Fixture::new();
        fx.variables.set("s", VimValue::string("ab")).unwrap();
        fx.variables.set("t", VimValue::string("cd")).unwrap();
        assert_eq!(fx.eval("s.t"), Ok(VimValue::string("abcd")));
        assert_eq!(fx.eval("s.1"), Ok(VimValue::string("ab1")));
    }

    // -- Names --------------------------------------------------------------

    #[test]
    fn names_and_sigils() {
        let mut fx = Fixture::new();
        fx.registers.set('a', "reg");
        assert_eq!(fx.eval("@a"), Ok(VimValue::string("reg")));
        assert_eq!(fx.eval("&ts"), num(8));
        assert_eq!(fx.eval("&l:sw"), num(8));
        assert_eq!(fx.eval("v:true"), num(1));
        assert_eq!(fx.eval("nope"), Err(ScriptError::UndefinedVariable("nope".into())));
        assert_eq!(fx.eval("nope()"), Err(ScriptError::UnknownFunction("nope".into())));
        assert_eq!(fx.eval("&nope"), Err(ScriptError::Editor(n_editor::EditorError::UnknownOption("nope".into()))));
    }

    #[test]
    fn funcref_variables_are_callable() {
        let mut fx = Fixture::new();
        fx.variables.set("F", VimValue::Funcref("abs".into())).unwrap();
        assert_eq!(fx.eval("F(-3)"), num(3));
        assert_eq!(fx.eval("function('abs')(-4)"), num(4));
    }

    // -- :let ---------------------------------------------------------------

    #[test]
    fn let_operators() {
        let mut fx = Fixture::new();
        let x = || LetTarget::Var("x".into());
        fx.let_(x(), LetOp::Assign, "1").unwrap();
        fx.let_(x(), LetOp::Add, "2").unwrap();
        fx.let_(x(), LetOp::Multiply, "5").unwrap();
        assert_eq!(fx.variables.get("x"), Some(VimValue::Number(15)));
        fx.let_(x(), LetOp::Concat, "'!'").unwrap();
        assert_eq!(fx.variables.get("g:x"), Some(VimValue::string("15!")));

        fx.let_(LetTarget::Var("l".into()), LetOp::Assign, "[1]").unwrap();
        fx.let_(LetTarget::Var("l".into()), LetOp::Add, "[2]").unwrap();
        assert_eq!(fx.variables.get("l"), Some(VimValue::List(vec![1.into(), 2.into()])));
        assert_eq!(
            fx.let_(LetTarget::Var("l".into()), LetOp::Concat, "'x'"),
            Err(ScriptError::WrongVariableType("."))
        );
        assert_eq!(
            fx.let_(LetTarget::Var("y".into()), LetOp::Add, "1"),
            Err(ScriptError::UndefinedVariable("y".into()))
        );
    }

    #[test]
    fn let_options_and_registers() {
        let mut fx = Fixture::new();
        let ts = LetTarget::Option { name: "ts".into(), scope: n_editor::options::Scope::Both };
        fx.let_(ts.clone(), LetOp::Assign, "4").unwrap();
        fx.let_(ts, LetOp::Add, "2").unwrap();
        assert_eq!(fx.options.number("tabstop"), 6);

        fx.let_(LetTarget::Register('a'), LetOp::Assign, "'one'").unwrap();
        fx.let_(LetTarget::Register('a'), LetOp::Concat, "'two'").unwrap();
        assert_eq!(fx.registers.get(Some('a')).content(), "onetwo");
    }

    #[test]
    fn unlet_reports_missing() {
        let mut fx = Fixture::new();
        fx.variables.set("x", VimValue::Number(1)).unwrap();
        let names = vec!["x".to_string()];
        assert_eq!(unlet(&mut fx.env(), &names, false), Ok(()));
        assert_eq!(unlet(&mut fx.env(), &names, false), Err(ScriptError::NoSuchVariable("x".into())));
        assert_eq!(unlet(&mut fx.env(), &names, true), Ok(()));
    }
}
