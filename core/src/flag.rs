//! Flag entities: the four registrable kinds and their value-assignment rules.
//!
//! The kinds are unified behind the tagged enum [`Flag`], which exposes the
//! shared capability surface (`is_set`, `is_obligatory`, `accept`,
//! `describe`) through exhaustive matches. Assignment semantics differ per
//! kind:
//!
//! - **Switch** — boolean, set true on first occurrence, idempotent.
//! - **Regular** — single optional value; with an append separator
//!   configured, repeated assignment concatenates instead of replacing.
//! - **Multi** — ordered value sequence bounded by `lowest`/`saturation`.
//! - **Positional** — a Multi that is filled from the positional queue in
//!   declaration order rather than matched by name.

use std::fmt;

use serde::Serialize;

use crate::error::AssignError;

/// The four flag kinds, used for help grouping and option gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlagKind {
    Switch,
    Regular,
    Multi,
    Positional,
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FlagKind::Switch => "switch",
            FlagKind::Regular => "regular",
            FlagKind::Multi => "multi",
            FlagKind::Positional => "positional",
        };
        f.write_str(label)
    }
}

/// Immutable identity of a flag: canonical name, optional one-character
/// alias, and help text. Created at registration time, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagIdentity {
    name: String,
    alias: Option<char>,
    help: String,
}

impl FlagIdentity {
    pub fn new(name: &str, help: &str, alias: Option<char>) -> Self {
        Self {
            name: name.to_string(),
            alias,
            help: help.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> Option<char> {
        self.alias
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// Display label, `name/a` when an alias is bound.
    pub fn label(&self) -> String {
        match self.alias {
            Some(alias) => format!("{}/{alias}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Boolean flag. Never obligatory, never takes a value.
#[derive(Debug, Clone)]
pub struct SwitchFlag {
    identity: FlagIdentity,
    value: bool,
}

impl SwitchFlag {
    pub fn new(identity: FlagIdentity) -> Self {
        Self { identity, value: false }
    }

    pub fn is_set(&self) -> bool {
        self.value
    }

    /// Idempotent: supplying the switch twice is a no-op, not an error.
    pub fn set(&mut self) {
        self.value = true;
    }

    pub fn reset(&mut self) {
        self.value = false;
    }
}

/// Single-valued flag with an optional default and an optional append
/// separator.
#[derive(Debug, Clone)]
pub struct RegularFlag {
    identity: FlagIdentity,
    default: Option<String>,
    value: Option<String>,
    separator: Option<char>,
    obligatory: bool,
}

impl RegularFlag {
    pub fn new(identity: FlagIdentity, default: Option<&str>, obligatory: bool) -> Self {
        Self {
            identity,
            default: default.map(String::from),
            value: None,
            separator: None,
            obligatory,
        }
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_appendable(&self) -> bool {
        self.separator.is_some()
    }

    pub fn make_obligatory(&mut self) {
        self.obligatory = true;
    }

    pub fn set_separator(&mut self, separator: Option<char>) {
        self.separator = separator;
    }

    /// Replace, or append with the configured separator when one is set
    /// and a value already exists.
    pub fn assign(&mut self, value: &str) {
        match (&mut self.value, self.separator) {
            (Some(existing), Some(separator)) => {
                existing.push(separator);
                existing.push_str(value);
            }
            _ => self.value = Some(value.to_string()),
        }
    }

    /// Set value falling back to the default when unset.
    pub fn value(&self) -> Option<String> {
        self.value.clone().or_else(|| self.default.clone())
    }

    /// The value split on the append separator, empty fields kept. Without
    /// a separator this is the value as a one-element sequence.
    pub fn iterable(&self) -> Vec<String> {
        match (self.value(), self.separator) {
            (Some(value), Some(separator)) => {
                value.split(separator).map(String::from).collect()
            }
            (Some(value), None) => vec![value],
            (None, _) => Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.value = None;
    }
}

/// Multi-valued flag: an ordered sequence bounded by `lowest` (minimum
/// count, 0 = optional) and `saturation` (maximum count, 0 = unbounded).
#[derive(Debug, Clone)]
pub struct MultiFlag {
    identity: FlagIdentity,
    values: Vec<String>,
    lowest: usize,
    saturation: usize,
}

impl MultiFlag {
    pub fn new(identity: FlagIdentity, lowest: usize, saturation: usize) -> Self {
        Self {
            identity,
            values: Vec::new(),
            lowest,
            saturation,
        }
    }

    pub fn is_set(&self) -> bool {
        !self.values.is_empty()
    }

    pub fn is_obligatory(&self) -> bool {
        self.lowest > 0
    }

    pub fn is_loadable(&self) -> bool {
        self.saturation == 0 || self.values.len() < self.saturation
    }

    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    pub fn lowest(&self) -> usize {
        self.lowest
    }

    pub fn saturation(&self) -> usize {
        self.saturation
    }

    pub fn set_lowest(&mut self, lowest: usize) {
        self.lowest = lowest;
    }

    pub fn set_saturation(&mut self, saturation: usize) {
        self.saturation = saturation;
    }

    pub fn push(&mut self, value: &str) -> Result<(), AssignError> {
        if !self.is_loadable() {
            return Err(AssignError::Saturated);
        }
        self.values.push(value.to_string());
        Ok(())
    }

    /// Joined for display; `None` when no value has arrived.
    pub fn value(&self) -> Option<String> {
        if self.is_set() {
            Some(self.values.join(","))
        } else {
            None
        }
    }

    pub fn iterable(&self) -> Vec<String> {
        self.values.clone()
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }
}

/// Positional flag: a [`MultiFlag`] filled by arrival order from the
/// positional queue. The 1-based `position` records declaration order for
/// help display only; it plays no part in matching.
#[derive(Debug, Clone)]
pub struct PositionalFlag {
    position: usize,
    inner: MultiFlag,
}

impl PositionalFlag {
    pub fn new(position: usize, identity: FlagIdentity, lowest: usize, saturation: usize) -> Self {
        Self {
            position,
            inner: MultiFlag::new(identity, lowest, saturation),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn inner(&self) -> &MultiFlag {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut MultiFlag {
        &mut self.inner
    }
}

/// A registered flag entity of any kind.
///
/// The dispatcher and query API work through this enum; every capability is
/// an exhaustive match, so adding a kind is a compile-visible change.
#[derive(Debug, Clone)]
pub enum Flag {
    Switch(SwitchFlag),
    Regular(RegularFlag),
    Multi(MultiFlag),
    Positional(PositionalFlag),
}

impl Flag {
    pub fn identity(&self) -> &FlagIdentity {
        match self {
            Flag::Switch(flag) => &flag.identity,
            Flag::Regular(flag) => &flag.identity,
            Flag::Multi(flag) => &flag.identity,
            Flag::Positional(flag) => &flag.inner.identity,
        }
    }

    pub fn kind(&self) -> FlagKind {
        match self {
            Flag::Switch(_) => FlagKind::Switch,
            Flag::Regular(_) => FlagKind::Regular,
            Flag::Multi(_) => FlagKind::Multi,
            Flag::Positional(_) => FlagKind::Positional,
        }
    }

    pub fn name(&self) -> &str {
        self.identity().name()
    }

    pub fn alias(&self) -> Option<char> {
        self.identity().alias()
    }

    pub fn is_set(&self) -> bool {
        match self {
            Flag::Switch(flag) => flag.is_set(),
            Flag::Regular(flag) => flag.is_set(),
            Flag::Multi(flag) => flag.is_set(),
            Flag::Positional(flag) => flag.inner.is_set(),
        }
    }

    pub fn is_obligatory(&self) -> bool {
        match self {
            Flag::Switch(_) => false,
            Flag::Regular(flag) => flag.obligatory,
            Flag::Multi(flag) => flag.is_obligatory(),
            Flag::Positional(flag) => flag.inner.is_obligatory(),
        }
    }

    /// Whether the flag consumes a value token. Only switches do not.
    pub fn takes_value(&self) -> bool {
        !matches!(self, Flag::Switch(_))
    }

    /// Whether another value may be accepted without hitting saturation.
    pub fn is_loadable(&self) -> bool {
        match self {
            Flag::Switch(_) | Flag::Regular(_) => true,
            Flag::Multi(flag) => flag.is_loadable(),
            Flag::Positional(flag) => flag.inner.is_loadable(),
        }
    }

    /// Applies one value assignment according to the kind's rules.
    ///
    /// Switches ignore any supplied value; the other kinds reject `None`
    /// with [`AssignError::MissingValue`], and multi-valued kinds reject
    /// values past saturation with [`AssignError::Saturated`].
    pub fn accept(&mut self, value: Option<&str>) -> Result<(), AssignError> {
        match self {
            Flag::Switch(flag) => {
                flag.set();
                Ok(())
            }
            Flag::Regular(flag) => {
                let value = value.ok_or(AssignError::MissingValue)?;
                flag.assign(value);
                Ok(())
            }
            Flag::Multi(flag) => {
                let value = value.ok_or(AssignError::MissingValue)?;
                flag.push(value)
            }
            Flag::Positional(flag) => {
                let value = value.ok_or(AssignError::MissingValue)?;
                flag.inner.push(value)
            }
        }
    }

    pub fn value(&self) -> Option<String> {
        match self {
            Flag::Switch(flag) => flag.is_set().then(String::new),
            Flag::Regular(flag) => flag.value(),
            Flag::Multi(flag) => flag.value(),
            Flag::Positional(flag) => flag.inner.value(),
        }
    }

    pub fn iterable(&self) -> Vec<String> {
        match self {
            Flag::Switch(_) => Vec::new(),
            Flag::Regular(flag) => flag.iterable(),
            Flag::Multi(flag) => flag.iterable(),
            Flag::Positional(flag) => flag.inner.iterable(),
        }
    }

    /// Number of values held; for single-valued kinds this is 0 or 1.
    pub fn value_count(&self) -> usize {
        match self {
            Flag::Switch(flag) => usize::from(flag.is_set()),
            Flag::Regular(flag) => usize::from(flag.is_set()),
            Flag::Multi(flag) => flag.value_count(),
            Flag::Positional(flag) => flag.inner.value_count(),
        }
    }

    /// `(lowest, saturation)` for the multi-valued kinds, `None` otherwise.
    pub fn bounds(&self) -> Option<(usize, usize)> {
        match self {
            Flag::Switch(_) | Flag::Regular(_) => None,
            Flag::Multi(flag) => Some((flag.lowest, flag.saturation)),
            Flag::Positional(flag) => Some((flag.inner.lowest, flag.inner.saturation)),
        }
    }

    /// Clears value state, leaving identity and configuration intact.
    pub fn reset(&mut self) {
        match self {
            Flag::Switch(flag) => flag.reset(),
            Flag::Regular(flag) => flag.reset(),
            Flag::Multi(flag) => flag.reset(),
            Flag::Positional(flag) => flag.inner.reset(),
        }
    }

    /// One-line diagnostic rendering of the flag and its current value.
    pub fn describe(&self) -> String {
        match self {
            Flag::Switch(flag) => format!(
                "Switch: {} [{}]",
                flag.identity.label(),
                if flag.is_set() { "set" } else { "unset" },
            ),
            Flag::Regular(flag) => format!(
                "Regular: {} value: {:?}",
                flag.identity.label(),
                flag.value(),
            ),
            Flag::Multi(flag) => format!(
                "Multi: {} values: {:?} (lowest {}, saturation {})",
                flag.identity.label(),
                flag.values,
                flag.lowest,
                flag.saturation,
            ),
            Flag::Positional(flag) => format!(
                "@{} Positional: {} values: {:?} (lowest {}, saturation {})",
                flag.position,
                flag.inner.identity.label(),
                flag.inner.values,
                flag.inner.lowest,
                flag.inner.saturation,
            ),
        }
    }
}
