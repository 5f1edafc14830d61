//! Builtin functions.
//!
//! Each builtin is registered explicitly in [`FunctionTable::builtin`] with
//! its arity range. The evaluator checks arity before the call, so a
//! function body can index `args` up to `min_args` without checking.

use std::collections::HashMap;

use n_editor::options::Scope;

use crate::env::Environment;
use crate::error::ScriptError;
use crate::eval::{Evaluator, compile_pattern, index_value};
use crate::value::{Dictionary, VimValue, float_to_number, str2nr};

pub type BuiltinFn = fn(&Evaluator<'_>, &[VimValue]) -> Result<VimValue, ScriptError>;

/// One registered function.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub min_args: usize,
    pub max_args: usize,
    pub call: BuiltinFn,
}

/// Name → builtin.
#[derive(Debug, Clone)]
pub struct FunctionTable {
    functions: HashMap<&'static str, Builtin>,
}

impl FunctionTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self { functions: HashMap::new() }
    }

    /// The table with every builtin registered.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.register("abs", 1, 1, abs);
        table.register("and", 2, 2, and);
        table.register("call", 2, 3, call);
        table.register("empty", 1, 1, empty);
        table.register("exists", 1, 1, exists);
        table.register("float2nr", 1, 1, float2nr);
        table.register("function", 1, 1, function);
        table.register("get", 2, 3, get);
        table.register("has_key", 2, 2, has_key);
        table.register("invert", 1, 1, invert);
        table.register("join", 1, 2, join);
        table.register("keys", 1, 1, keys);
        table.register("len", 1, 1, len);
        table.register("or", 2, 2, or);
        table.register("range", 1, 3, range);
        table.register("split", 1, 3, split);
        table.register("str2nr", 1, 2, str2nr_fn);
        table.register("string", 1, 1, string);
        table.register("tolower", 1, 1, tolower);
        table.register("toupper", 1, 1, toupper);
        table.register("type", 1, 1, type_fn);
        table.register("values", 1, 1, values);
        table.register("xor", 2, 2, xor);
        table
    }

    /// Add or replace a function.
    pub fn register(&mut self, name: &'static str, min_args: usize, max_args: usize, call: BuiltinFn) {
        self.functions.insert(name, Builtin { name, min_args, max_args, call });
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Builtin> {
        self.functions.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }
}

impl Default for FunctionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

fn abs(_: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    Ok(match &args[0] {
        VimValue::Float(f) => VimValue::Float(f.abs()),
        other => VimValue::Number(other.to_number()?.checked_abs().unwrap_or(i64::MAX)),
    })
}

fn and(_: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    Ok(VimValue::Number(args[0].to_integer()? & args[1].to_integer()?))
}

fn or(_: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    Ok(VimValue::Number(args[0].to_integer()? | args[1].to_integer()?))
}

fn xor(_: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    Ok(VimValue::Number(args[0].to_integer()? ^ args[1].to_integer()?))
}

fn invert(_: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    Ok(VimValue::Number(!args[0].to_integer()?))
}

fn float2nr(_: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    match &args[0] {
        VimValue::Float(f) => Ok(VimValue::Number(float_to_number(*f))),
        VimValue::Number(n) => Ok(VimValue::Number(*n)),
        _ => Err(ScriptError::NumberOrFloatRequired),
    }
}

fn str2nr_fn(_: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    let base = match args.get(1) {
        Some(base) => u32::try_from(base.to_integer()?).map_err(|_| ScriptError::InvalidArgument)?,
        None => 10,
    };
    if !matches!(base, 2 | 8 | 10 | 16) {
        return Err(ScriptError::InvalidArgument);
    }
    Ok(VimValue::Number(str2nr(&args[0].to_str()?, base)))
}

fn range(_: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    let first = args[0].to_integer()?;
    let (start, end) = match args.get(1) {
        Some(end) => (first, end.to_integer()?),
        None => (0, first.checked_sub(1).ok_or(ScriptError::StartPastEnd)?),
    };
    let stride = args.get(2).map(VimValue::to_integer).transpose()?.unwrap_or(1);
    if stride == 0 {
        return Err(ScriptError::StrideIsZero);
    }
    let past_end = if stride > 0 { end.saturating_add(1) < start } else { end.saturating_sub(1) > start };
    if past_end {
        return Err(ScriptError::StartPastEnd);
    }

    let mut items = Vec::new();
    let mut i = start;
    while (stride > 0 && i <= end) || (stride < 0 && i >= end) {
        items.push(VimValue::Number(i));
        let Some(next) = i.checked_add(stride) else { break };
        i = next;
    }
    Ok(VimValue::List(items))
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

fn tolower(_: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    Ok(VimValue::String(args[0].to_str()?.to_lowercase()))
}

fn toupper(_: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    Ok(VimValue::String(args[0].to_str()?.to_uppercase()))
}

fn string(_: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    Ok(VimValue::String(args[0].repr()))
}

/// `split(text [, pattern [, keepempty]])`. Without `keepempty`, an empty
/// first or last item is dropped.
fn split(eval: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    let text = args[0].to_str()?;
    let pattern = match args.get(1) {
        Some(p) if !p.to_str()?.is_empty() => p.to_str()?,
        _ => "\\s\\+".to_string(),
    };
    let keep_empty = args.get(2).map(VimValue::to_bool).transpose()?.unwrap_or(false);

    let regex = compile_pattern(&pattern, eval.env().ignore_case())?;
    let mut parts: Vec<&str> = regex.split(&text).collect();
    if !keep_empty {
        if parts.first().is_some_and(|p| p.is_empty()) {
            parts.remove(0);
        }
        if parts.last().is_some_and(|p| p.is_empty()) {
            parts.pop();
        }
    }
    Ok(VimValue::List(parts.into_iter().map(VimValue::from).collect()))
}

fn join(_: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    let VimValue::List(items) = &args[0] else {
        return Err(ScriptError::ListRequired);
    };
    let separator = match args.get(1) {
        Some(sep) => sep.to_str()?,
        None => " ".to_string(),
    };
    let parts: Vec<String> = items
        .iter()
        .map(|item| match item {
            VimValue::String(s) => s.clone(),
            other => other.repr(),
        })
        .collect();
    Ok(VimValue::String(parts.join(&separator)))
}

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

fn len(_: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    let n = match &args[0] {
        VimValue::String(s) => s.len(),
        VimValue::Number(n) => n.to_string().len(),
        VimValue::List(items) => items.len(),
        VimValue::Dict(dict) => dict.len(),
        VimValue::Blob(bytes) => bytes.len(),
        VimValue::Float(_) | VimValue::Funcref(_) => return Err(ScriptError::InvalidLenType),
    };
    Ok(VimValue::Number(i64::try_from(n).unwrap_or(i64::MAX)))
}

fn empty(_: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    Ok(VimValue::from_bool(args[0].is_empty_value()))
}

fn dict_arg(value: &VimValue) -> Result<&Dictionary, ScriptError> {
    match value {
        VimValue::Dict(dict) => Ok(dict),
        _ => Err(ScriptError::DictRequired),
    }
}

fn keys(_: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    let dict = dict_arg(&args[0])?;
    Ok(VimValue::List(dict.iter().map(|(k, _)| VimValue::from(k)).collect()))
}

fn values(_: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    let dict = dict_arg(&args[0])?;
    Ok(VimValue::List(dict.iter().map(|(_, v)| v.clone()).collect()))
}

fn has_key(_: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    let dict = dict_arg(&args[0])?;
    Ok(VimValue::from_bool(dict.contains_key(&args[1].to_str()?)))
}

/// `get(container, key [, default])`: like indexing, but a missing item
/// gives `default` (0 when omitted).
fn get(_: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    if !matches!(args[0], VimValue::List(_) | VimValue::Dict(_) | VimValue::Blob(_)) {
        return Err(ScriptError::ContainerRequired("get()"));
    }
    match index_value(&args[0], &args[1]) {
        Ok(value) => Ok(value),
        Err(
            ScriptError::ListIndexOutOfRange(_)
            | ScriptError::KeyNotPresent(_)
            | ScriptError::BlobIndexOutOfRange(_),
        ) => Ok(args.get(2).cloned().unwrap_or(VimValue::Number(0))),
        Err(err) => Err(err),
    }
}

// ---------------------------------------------------------------------------
// Functions and names
// ---------------------------------------------------------------------------

fn function_name(value: &VimValue) -> Result<String, ScriptError> {
    match value {
        VimValue::Funcref(name) | VimValue::String(name) => Ok(name.clone()),
        _ => Err(ScriptError::FunctionNameRequired),
    }
}

fn function(eval: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    let name = function_name(&args[0])?;
    if !eval.functions().contains(&name) {
        return Err(ScriptError::UnknownFuncref(name));
    }
    Ok(VimValue::Funcref(name))
}

fn call(eval: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    let name = function_name(&args[0])?;
    let VimValue::List(arguments) = &args[1] else {
        return Err(ScriptError::ListRequired);
    };
    eval.call_function(&name, arguments)
}

/// `exists()`: `&option`, `$ENV`, `*function`, or a variable name.
fn exists(eval: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    let text = args[0].to_str()?;
    let env: &dyn Environment = eval.env();
    let found = if let Some(option) = text.strip_prefix('&') {
        let (scope, name) = if let Some(n) = option.strip_prefix("l:") {
            (Scope::Local, n)
        } else if let Some(n) = option.strip_prefix("g:") {
            (Scope::Global, n)
        } else {
            (Scope::Both, option)
        };
        env.option(name, scope).is_ok()
    } else if let Some(name) = text.strip_prefix('$') {
        env.env_var(name).is_some()
    } else if let Some(name) = text.strip_prefix('*') {
        eval.functions().contains(name)
    } else {
        env.variable(&text).is_some()
    };
    Ok(VimValue::from_bool(found))
}

fn type_fn(_: &Evaluator<'_>, args: &[VimValue]) -> Result<VimValue, ScriptError> {
    Ok(VimValue::Number(args[0].type_number()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
