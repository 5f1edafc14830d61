//! Key mappings: `:map`, `:noremap`, and friends.
//!
//! A [`MappingTable`] stores `lhs → rhs` key sequences per mode set. The
//! engine keeps typed keys in a queue and asks [`MappingTable::resolve`]
//! what to do with its front:
//!
//! ```text
//! :nmap gx dd      queue "g"   → Wait        (prefix of "gx")
//!                  queue "gx"  → Expand "dd"
//!                  queue "gy"  → Raw 1       ("g" goes through unmapped)
//! ```
//!
//! When a mapping is both complete and a prefix of a longer one (`:map a x`
//! with `:map ab y`), the engine waits for the next key or for
//! `flush_pending()` after `timeoutlen`.
//!
//! Recursive mappings expand at most [`MAX_MAP_DEPTH`] times before failing
//! with E223.

use std::fmt::Write as _;

use bitflags::bitflags;

use crate::error::EditorError;
use crate::key::{Key, to_notation};
use crate::mode::Mode;

/// Expansion limit for recursive mappings (Vim's `maxmapdepth`).
pub const MAX_MAP_DEPTH: usize = 1000;

bitflags! {
    /// Modes a mapping applies in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct MapModes: u8 {
        const NORMAL           = 0b0000_0001;
        const VISUAL           = 0b0000_0010;
        const SELECT           = 0b0000_0100;
        const OPERATOR_PENDING = 0b0000_1000;
        const INSERT           = 0b0001_0000;
    }
}

impl MapModes {
    /// `:map` / `:noremap` / `:unmap`.
    pub const NVO: Self = Self::NORMAL
        .union(Self::VISUAL)
        .union(Self::SELECT)
        .union(Self::OPERATOR_PENDING);

    /// The mode set named by a map command's prefix: `""` for `:map`, `n`,
    /// `v`, `x`, `s`, `o`, `i`.
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Some(match prefix {
            "" => Self::NVO,
            "n" => Self::NORMAL,
            "v" => Self::VISUAL | Self::SELECT,
            "x" => Self::VISUAL,
            "s" => Self::SELECT,
            "o" => Self::OPERATOR_PENDING,
            "i" => Self::INSERT,
            _ => return None,
        })
    }

    /// Mappings consulted in `mode`.
    #[must_use]
    pub const fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Normal => Self::NORMAL,
            Mode::Visual { .. } => Self::VISUAL,
            Mode::Select { .. } => Self::SELECT,
            Mode::OperatorPending { .. } => Self::OPERATOR_PENDING,
            Mode::Insert | Mode::Replace => Self::INSERT,
            Mode::CommandLine => Self::empty(),
        }
    }

    /// Mode column of the `:map` listing.
    fn label(self) -> String {
        if self == Self::NVO {
            return " ".to_string();
        }
        if self == Self::VISUAL | Self::SELECT {
            return "v".to_string();
        }
        let mut label = String::new();
        for (flag, ch) in [
            (Self::NORMAL, 'n'),
            (Self::VISUAL, 'x'),
            (Self::SELECT, 's'),
            (Self::OPERATOR_PENDING, 'o'),
            (Self::INSERT, 'i'),
        ] {
            if self.contains(flag) {
                label.push(ch);
            }
        }
        label
    }
}

/// One `lhs → rhs` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub modes: MapModes,
    pub lhs: Vec<Key>,
    pub rhs: Vec<Key>,
    /// Defined with a `noremap` command: the rhs is not mapped again.
    pub noremap: bool,
}

/// How a key sequence relates to the defined mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    None,
    /// The keys start some longer mapping.
    Prefix,
    Full(&'a Mapping),
    /// The keys are a mapping and also start a longer one.
    FullAndPrefix(&'a Mapping),
}

/// What to do with the front of the typeahead queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// More keys (or a timeout) are needed to decide.
    Wait,
    /// Pass the first `consumed` keys through unmapped.
    Raw { consumed: usize },
    /// Replace the first `consumed` keys with `rhs`. `remap` is false for
    /// `noremap` mappings. `keep_first` keys at the front of `rhs` repeat
    /// the lhs and must not be mapped again.
    Expand {
        consumed: usize,
        rhs: Vec<Key>,
        remap: bool,
        keep_first: usize,
    },
}

/// All mappings of one engine session.
#[derive(Debug, Default, Clone)]
pub struct MappingTable {
    entries: Vec<Mapping>,
}

impl MappingTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Define `lhs → rhs` for `modes`, replacing any mapping of the same
    /// lhs in those modes.
    pub fn define(&mut self, modes: MapModes, lhs: Vec<Key>, rhs: Vec<Key>, noremap: bool) -> Result<(), EditorError> {
        if lhs.is_empty() || modes.is_empty() {
            return Err(EditorError::InvalidArgument(to_notation(&lhs)));
        }
        self.clear_modes(modes, &lhs);
        tracing::debug!(lhs = %to_notation(&lhs), rhs = %to_notation(&rhs), noremap, "map");
        self.entries.push(Mapping {
            modes,
            lhs,
            rhs,
            noremap,
        });
        Ok(())
    }

    /// Remove the mapping of `lhs` from `modes`. Fails with E31 when no
    /// mapping of `lhs` exists in any of them.
    pub fn remove(&mut self, modes: MapModes, lhs: &[Key]) -> Result<(), EditorError> {
        let found = self
            .entries
            .iter()
            .any(|m| m.lhs == lhs && m.modes.intersects(modes));
        if !found {
            return Err(EditorError::NoSuchMapping);
        }
        self.clear_modes(modes, lhs);
        Ok(())
    }

    fn clear_modes(&mut self, modes: MapModes, lhs: &[Key]) {
        for entry in &mut self.entries {
            if entry.lhs == lhs {
                entry.modes -= modes;
            }
        }
        self.entries.retain(|m| !m.modes.is_empty());
    }

    /// Classify `keys` for `mode`.
    #[must_use]
    pub fn lookup(&self, mode: MapModes, keys: &[Key]) -> Lookup<'_> {
        let mut full = None;
        let mut prefix = false;
        for entry in self.entries.iter().filter(|m| m.modes.intersects(mode)) {
            if entry.lhs == keys {
                full = Some(entry);
            } else if entry.lhs.len() > keys.len() && entry.lhs.starts_with(keys) {
                prefix = true;
            }
        }
        match (full, prefix) {
            (Some(m), true) => Lookup::FullAndPrefix(m),
            (Some(m), false) => Lookup::Full(m),
            (None, true) => Lookup::Prefix,
            (None, false) => Lookup::None,
        }
    }

    /// Decide what happens to the front of `keys`. With `flush` set (the
    /// mapping timeout expired or input ended) an ambiguous prefix resolves
    /// to the longest complete mapping, or to the raw first key.
    #[must_use]
    pub fn resolve(&self, mode: MapModes, keys: &[Key], flush: bool) -> Resolution {
        if keys.is_empty() {
            return Resolution::Wait;
        }
        match self.lookup(mode, keys) {
            Lookup::Full(m) => expand(m, keys.len()),
            Lookup::FullAndPrefix(m) if flush => expand(m, keys.len()),
            Lookup::FullAndPrefix(_) | Lookup::Prefix if !flush => Resolution::Wait,
            _ => self.longest_full(mode, keys),
        }
    }

    fn longest_full(&self, mode: MapModes, keys: &[Key]) -> Resolution {
        for len in (1..keys.len()).rev() {
            if let Lookup::Full(m) | Lookup::FullAndPrefix(m) = self.lookup(mode, &keys[..len]) {
                return expand(m, len);
            }
        }
        Resolution::Raw { consumed: 1 }
    }

    /// The `:map` listing for `modes`, optionally only mappings whose lhs
    /// starts with `prefix`.
    #[must_use]
    pub fn list(&self, modes: MapModes, prefix: &[Key]) -> String {
        let mut rows: Vec<(String, &Mapping)> = self
            .entries
            .iter()
            .filter(|m| m.modes.intersects(modes) && m.lhs.starts_with(prefix))
            .map(|m| (to_notation(&m.lhs), m))
            .collect();
        if rows.is_empty() {
            return "No mapping found".to_string();
        }
        rows.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = String::new();
        for (i, (lhs, m)) in rows.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let mark = if m.noremap { '*' } else { ' ' };
            let _ = write!(out, "{:<3}{lhs:<12}", m.modes.label());
            if lhs.chars().count() >= 12 {
                out.push(' ');
            }
            let _ = write!(out, "{mark} {}", to_notation(&m.rhs));
        }
        out
    }
}

fn expand(m: &Mapping, consumed: usize) -> Resolution {
    // `:map x xy` must not loop on its own first key.
    let keep_first = if !m.noremap && m.rhs.starts_with(&m.lhs) {
        m.lhs.len()
    } else {
        0
    };
    Resolution::Expand {
        consumed,
        rhs: m.rhs.clone(),
        remap: !m.noremap,
        keep_first,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::parse_keys;
    use pretty_assertions::assert_eq;

    fn keys(text: &str) -> Vec<Key> {
        parse_keys(text)
    }

    fn table(defs: &[(MapModes, &str, &str, bool)]) -> MappingTable {
        let mut t = MappingTable::new();
        for (modes, lhs, rhs, noremap) in defs {
            t.define(*modes, keys(lhs), keys(rhs), *noremap).unwrap();
        }
        t
    }

    // -- Modes --------------------------------------------------------------

    #[test]
    fn prefixes_name_mode_sets() {
        assert_eq!(MapModes::from_prefix(""), Some(MapModes::NVO));
        assert_eq!(MapModes::from_prefix("v"), Some(MapModes::VISUAL | MapModes::SELECT));
        assert_eq!(MapModes::from_prefix("i"), Some(MapModes::INSERT));
        assert_eq!(MapModes::from_prefix("q"), None);
    }

    #[test]
    fn replace_mode_uses_insert_mappings() {
        assert_eq!(MapModes::for_mode(Mode::Replace), MapModes::INSERT);
        assert!(MapModes::for_mode(Mode::CommandLine).is_empty());
    }

    // -- Lookup -------------------------------------------------------------

    #[test]
    fn lookup_classifies_sequences() {
        let t = table(&[
            (MapModes::NORMAL, "gx", "dd", false),
            (MapModes::NORMAL, "a", "x", false),
            (MapModes::NORMAL, "ab", "y", false),
        ]);
        let n = MapModes::NORMAL;
        assert_eq!(t.lookup(n, &keys("g")), Lookup::Prefix);
        assert!(matches!(t.lookup(n, &keys("gx")), Lookup::Full(m) if m.rhs == keys("dd")));
        assert!(matches!(t.lookup(n, &keys("a")), Lookup::FullAndPrefix(_)));
        assert_eq!(t.lookup(n, &keys("q")), Lookup::None);
        assert_eq!(t.lookup(MapModes::INSERT, &keys("gx")), Lookup::None);
    }

    #[test]
    fn redefinition_replaces_only_named_modes() {
        let mut t = table(&[(MapModes::NVO, "Q", "gq", false)]);
        t.define(MapModes::NORMAL, keys("Q"), keys("x"), true).unwrap();
        assert!(matches!(t.lookup(MapModes::NORMAL, &keys("Q")), Lookup::Full(m) if m.noremap));
        assert!(matches!(t.lookup(MapModes::VISUAL, &keys("Q")), Lookup::Full(m) if !m.noremap));
    }

    #[test]
    fn empty_lhs_is_rejected() {
        let mut t = MappingTable::new();
        assert!(t.define(MapModes::NORMAL, Vec::new(), keys("x"), false).is_err());
    }

    // -- Resolve ------------------------------------------------------------

    #[test]
    fn resolve_waits_on_prefix_then_expands() {
        let t = table(&[(MapModes::NORMAL, "gx", "dd", false)]);
        let n = MapModes::NORMAL;
        assert_eq!(t.resolve(n, &keys("g"), false), Resolution::Wait);
        assert_eq!(
            t.resolve(n, &keys("gx"), false),
            Resolution::Expand {
                consumed: 2,
                rhs: keys("dd"),
                remap: true,
                keep_first: 0
            }
        );
        assert_eq!(t.resolve(n, &keys("gy"), false), Resolution::Raw { consumed: 1 });
        assert_eq!(t.resolve(n, &keys("g"), true), Resolution::Raw { consumed: 1 });
    }

    #[test]
    fn ambiguous_mapping_waits_until_flush() {
        let t = table(&[
            (MapModes::NORMAL, "a", "x", true),
            (MapModes::NORMAL, "ab", "y", true),
        ]);
        let n = MapModes::NORMAL;
        assert_eq!(t.resolve(n, &keys("a"), false), Resolution::Wait);
        assert!(matches!(t.resolve(n, &keys("a"), true), Resolution::Expand { consumed: 1, remap: false, .. }));
        // "ac": the longer mapping is ruled out, the shorter one applies.
        assert!(matches!(t.resolve(n, &keys("ac"), false), Resolution::Expand { consumed: 1, .. }));
    }

    #[test]
    fn rhs_starting_with_lhs_keeps_first_keys() {
        let t = table(&[(MapModes::NORMAL, "x", "xy", false)]);
        assert!(matches!(
            t.resolve(MapModes::NORMAL, &keys("x"), false),
            Resolution::Expand { keep_first: 1, .. }
        ));
    }

    // -- Remove -------------------------------------------------------------

    #[test]
    fn unmap_removes_and_reports_missing() {
        let mut t = table(&[(MapModes::NVO, "Q", "gq", false)]);
        t.remove(MapModes::NORMAL, &keys("Q")).unwrap();
        assert_eq!(t.lookup(MapModes::NORMAL, &keys("Q")), Lookup::None);
        assert!(matches!(t.lookup(MapModes::VISUAL, &keys("Q")), Lookup::Full(_)));
        assert_eq!(t.remove(MapModes::NORMAL, &keys("Q")), Err(EditorError::NoSuchMapping));
        assert_eq!(t.remove(MapModes::INSERT, &keys("zz")), Err(EditorError::NoSuchMapping));
    }

    // -- Listing ------------------------------------------------------------

    #[test]
    fn listing_layout() {
        let t = table(&[
            (MapModes::NORMAL, "gx", "dd", true),
            (MapModes::NVO, "Q", "gq", false),
            (MapModes::VISUAL | MapModes::SELECT, "<C-x>", "<Esc>", false),
        ]);
        assert_eq!(
            t.list(MapModes::NVO, &[]),
            "v  <C-x>         <Esc>\n   Q             gq\nn  gx          * dd"
        );
        assert_eq!(t.list(MapModes::INSERT, &[]), "No mapping found");
        assert_eq!(t.list(MapModes::NORMAL, &keys("g")), "n  gx          * dd");
    }
}
