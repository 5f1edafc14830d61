//! What expressions read and `:let` writes: variables, options, registers,
//! and environment variables.
//!
//! [`Environment`] is the evaluator's only view of the editor. The engine
//! implements it with [`EditorEnv`], which borrows the session's stores for
//! the duration of one command.

use std::collections::{BTreeMap, HashMap};

use n_editor::options::{OptionValue, Options, Scope};
use n_editor::register::RegisterFile;

use crate::error::ScriptError;
use crate::value::{VimValue, type_id};

/// Everything an expression can name.
pub trait Environment {
    fn variable(&self, name: &str) -> Option<VimValue>;

    /// # Errors
    ///
    /// E461 for an illegal name, E46 for `v:` variables.
    fn set_variable(&mut self, name: &str, value: VimValue) -> Result<(), ScriptError>;

    /// True if the variable existed.
    fn remove_variable(&mut self, name: &str) -> bool;

    /// # Errors
    ///
    /// E518 for unknown options.
    fn option(&self, name: &str, scope: Scope) -> Result<VimValue, ScriptError>;

    /// # Errors
    ///
    /// Unknown option, or a value the option refuses.
    fn set_option(&mut self, name: &str, scope: Scope, value: &VimValue) -> Result<(), ScriptError>;

    fn register(&self, name: char) -> String;

    fn set_register(&mut self, name: char, text: &str);

    fn env_var(&self, name: &str) -> Option<String>;

    fn set_env_var(&mut self, name: &str, value: String);

    /// Whether plain comparison operators ignore case (`'ignorecase'`).
    fn ignore_case(&self) -> bool;
}

// ---------------------------------------------------------------------------
// Variables
// ---------------------------------------------------------------------------

/// Script variables of one session.
///
/// Bare names are globals: `x` and `g:x` are the same variable. `v:`
/// variables are predefined and read-only.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    values: BTreeMap<String, VimValue>,
    env: HashMap<String, String>,
}

const PREDEFINED: &[(&str, i64)] = &[
    ("v:false", 0),
    ("v:true", 1),
    ("v:t_number", type_id::NUMBER),
    ("v:t_string", type_id::STRING),
    ("v:t_func", type_id::FUNC),
    ("v:t_list", type_id::LIST),
    ("v:t_dict", type_id::DICT),
    ("v:t_float", type_id::FLOAT),
    ("v:t_blob", type_id::BLOB),
];

impl Variables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical form of `name`: `g:` for bare names.
    fn canonical(name: &str) -> String {
        if name.len() > 2 && name.as_bytes()[1] == b':' {
            name.to_string()
        } else {
            format!("g:{name}")
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<VimValue> {
        let key = Self::canonical(name);
        if let Some((_, n)) = PREDEFINED.iter().find(|(v, _)| *v == key) {
            return Some(VimValue::Number(*n));
        }
        self.values.get(&key).cloned()
    }

    /// # Errors
    ///
    /// E46 for `v:` names.
    pub fn set(&mut self, name: &str, value: VimValue) -> Result<(), ScriptError> {
        let key = Self::canonical(name);
        if key.starts_with("v:") {
            return Err(ScriptError::ReadOnlyVariable(name.to_string()));
        }
        self.values.insert(key, value);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.values.remove(&Self::canonical(name)).is_some()
    }

    /// `:let` listing, one `name  value` line per variable. Globals are
    /// shown without their `g:`.
    #[must_use]
    pub fn list(&self, names: &[String]) -> String {
        let show = |key: &str, value: &VimValue| {
            let name = key.strip_prefix("g:").unwrap_or(key);
            let marker = match value {
                VimValue::List(_) => "[]",
                VimValue::Dict(_) => "{}",
                VimValue::Funcref(_) => "*",
                VimValue::String(_) => "",
                _ => "#",
            };
            format!("{name:<18} {marker:<1} {}", value.echo_text()).trim_end().to_string()
        };
        let lines: Vec<String> = if names.is_empty() {
            self.values.iter().map(|(k, v)| show(k, v)).collect()
        } else {
            names
                .iter()
                .filter_map(|n| self.get(n).map(|v| show(&Self::canonical(n), &v)))
                .collect()
        };
        lines.join("\n")
    }

    #[must_use]
    pub fn env_var(&self, name: &str) -> Option<String> {
        self.env.get(name).cloned().or_else(|| std::env::var(name).ok())
    }

    /// Session-local override; the process environment is never written.
    pub fn set_env_var(&mut self, name: &str, value: String) {
        self.env.insert(name.to_string(), value);
    }
}

// ---------------------------------------------------------------------------
// EditorEnv
// ---------------------------------------------------------------------------

/// [`Environment`] over borrowed editor stores.
pub struct EditorEnv<'a> {
    pub variables: &'a mut Variables,
    pub options: &'a mut Options,
    pub registers: &'a mut RegisterFile,
}

/// An option value as Vimscript sees it: booleans are Numbers, lists are
/// their comma-joined String.
#[must_use]
pub fn option_to_value(value: &OptionValue) -> VimValue {
    match value {
        OptionValue::Bool(b) => VimValue::from_bool(*b),
        OptionValue::Number(n) => VimValue::Number(*n),
        OptionValue::String(_) | OptionValue::List(_) => VimValue::String(value.to_string()),
    }
}

/// The reverse of [`option_to_value`].
///
/// # Errors
///
/// The value's Number or String coercion error.
pub fn value_to_option(value: &VimValue) -> Result<OptionValue, ScriptError> {
    match value {
        VimValue::String(s) => Ok(OptionValue::String(s.clone())),
        other => Ok(OptionValue::Number(other.to_integer()?)),
    }
}

impl Environment for EditorEnv<'_> {
    fn variable(&self, name: &str) -> Option<VimValue> {
        self.variables.get(name)
    }

    fn set_variable(&mut self, name: &str, value: VimValue) -> Result<(), ScriptError> {
        self.variables.set(name, value)
    }

    fn remove_variable(&mut self, name: &str) -> bool {
        self.variables.remove(name)
    }

    fn option(&self, name: &str, scope: Scope) -> Result<VimValue, ScriptError> {
        Ok(option_to_value(&self.options.get(scope, name)?))
    }

    fn set_option(&mut self, name: &str, scope: Scope, value: &VimValue) -> Result<(), ScriptError> {
        self.options.set(scope, name, value_to_option(value)?)?;
        Ok(())
    }

    fn register(&self, name: char) -> String {
        self.registers.get(Some(name)).content().to_string()
    }

    fn set_register(&mut self, name: char, text: &str) {
        self.registers.set(name, text);
    }

    fn env_var(&self, name: &str) -> Option<String> {
        self.variables.env_var(name)
    }

    fn set_env_var(&mut self, name: &str, value: String) {
        self.variables.set_env_var(name, value);
    }

    fn ignore_case(&self) -> bool {
        self.options.flag("ignorecase")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_names_are_globals() {
        let mut vars = Variables::new();
        vars.set("x", VimValue::Number(1)).unwrap();
        assert_eq!(vars.get("g:x"), Some(VimValue::Number(1)));
        assert!(vars.remove("g:x"));
        assert_eq!(vars.get("x"), None);
    }

    #[test]
    fn v_variables_are_read_only() {
        let mut vars = Variables::new();
        assert_eq!(vars.get("v:true"), Some(VimValue::Number(1)));
        assert_eq!(vars.get("v:t_list"), Some(VimValue::Number(3)));
        assert_eq!(
            vars.set("v:true", VimValue::Number(0)),
            Err(ScriptError::ReadOnlyVariable("v:true".into()))
        );
    }

    #[test]
    fn options_convert_both_ways() {
        let mut vars = Variables::new();
        let mut options = Options::new();
        let mut registers = RegisterFile::new();
        let mut env = EditorEnv { variables: &mut vars, options: &mut options, registers: &mut registers };

        env.set_option("ts", Scope::Both, &VimValue::Number(4)).unwrap();
        assert_eq!(env.option("tabstop", Scope::Both), Ok(VimValue::Number(4)));
        assert_eq!(env.option("ic", Scope::Both), Ok(VimValue::Number(0)));
        env.set_option("ic", Scope::Both, &VimValue::Number(1)).unwrap();
        assert!(env.ignore_case());
        assert_eq!(
            env.option("km", Scope::Both),
            Ok(VimValue::string("continueselect,stopselect"))
        );
        assert_eq!(
            env.set_option("ts", Scope::Both, &VimValue::Float(1.5)),
            Err(ScriptError::FloatAsNumber)
        );
    }

    #[test]
    fn registers_and_env() {
        let mut vars = Variables::new();
        let mut options = Options::new();
        let mut registers = RegisterFile::new();
        let mut env = EditorEnv { variables: &mut vars, options: &mut options, registers: &mut registers };

        env.set_register('a', "text");
        assert_eq!(env.register('a'), "text");
        env.set_env_var("N_VIM_TEST_VAR", "1".into());
        assert_eq!(env.env_var("N_VIM_TEST_VAR"), Some("1".into()));
    }
}
