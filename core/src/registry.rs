//! Flag registry: an arena of flag entities with two owned index maps.
//!
//! Entities live in an append-only `Vec` and are addressed by stable index
//! handles; the name map and the alias map both point into the arena, which
//! avoids the reference-invalidation hazards of indexing maps directly by
//! entity. Positional declarations are additionally recorded in order, since
//! arrival order against that list is the only thing positional matching
//! uses.
//!
//! Registration is create-once: a duplicate canonical name or alias is a
//! configuration error, reported immediately.
//!
//! # Help and version triggers
//!
//! The registry also tracks the built-in help/version keywords and aliases
//! (defaults `help`/`h` and `version`/`V`). A built-in trigger can never be
//! claimed simultaneously by a user flag: registering a flag whose name or
//! alias collides with an active trigger silently disables that trigger.
//! This is deliberate, documented behavior rather than an error.

use std::collections::HashMap;

use crate::error::ConfigError;
use crate::flag::{Flag, FlagIdentity, MultiFlag, PositionalFlag, RegularFlag, SwitchFlag};

/// Default long keyword that triggers help output.
pub const DEFAULT_HELP_KEYWORD: &str = "help";
/// Default short alias that triggers help output.
pub const DEFAULT_HELP_ALIAS: char = 'h';
/// Default long keyword that triggers version output.
pub const DEFAULT_VERSION_KEYWORD: &str = "version";
/// Default short alias that triggers version output. Uppercase, leaving
/// `v` free for the conventional verbose switch.
pub const DEFAULT_VERSION_ALIAS: char = 'V';

/// Registry of flag entities, indexed by canonical name and by alias.
#[derive(Debug, Clone)]
pub struct Registry {
    flags: Vec<Flag>,
    by_name: HashMap<String, usize>,
    by_alias: HashMap<char, usize>,
    positional_order: Vec<usize>,
    help_keyword: Option<String>,
    help_alias: Option<char>,
    version_keyword: Option<String>,
    version_alias: Option<char>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            flags: Vec::new(),
            by_name: HashMap::new(),
            by_alias: HashMap::new(),
            positional_order: Vec::new(),
            help_keyword: Some(DEFAULT_HELP_KEYWORD.to_string()),
            help_alias: Some(DEFAULT_HELP_ALIAS),
            version_keyword: Some(DEFAULT_VERSION_KEYWORD.to_string()),
            version_alias: Some(DEFAULT_VERSION_ALIAS),
        }
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a switch (boolean) flag.
    pub fn add_switch(
        &mut self,
        name: &str,
        help: &str,
        alias: Option<char>,
    ) -> Result<(), ConfigError> {
        let identity = FlagIdentity::new(name, help, alias);
        self.insert(Flag::Switch(SwitchFlag::new(identity)))
    }

    /// Registers a regular (single-valued) flag with an optional default.
    pub fn add_argument(
        &mut self,
        name: &str,
        help: &str,
        alias: Option<char>,
        default: Option<&str>,
    ) -> Result<(), ConfigError> {
        let identity = FlagIdentity::new(name, help, alias);
        self.insert(Flag::Regular(RegularFlag::new(identity, default, false)))
    }

    /// Registers an obligatory regular flag: validation fails unless it is
    /// set at least once.
    pub fn add_obligatory(
        &mut self,
        name: &str,
        help: &str,
        alias: Option<char>,
    ) -> Result<(), ConfigError> {
        let identity = FlagIdentity::new(name, help, alias);
        self.insert(Flag::Regular(RegularFlag::new(identity, None, true)))
    }

    /// Registers a multi-valued flag bounded by `lowest`/`saturation`
    /// (0 = optional / unbounded respectively).
    pub fn add_multi(
        &mut self,
        name: &str,
        help: &str,
        alias: Option<char>,
        lowest: usize,
        saturation: usize,
    ) -> Result<(), ConfigError> {
        check_bounds(name, lowest, saturation)?;
        let identity = FlagIdentity::new(name, help, alias);
        self.insert(Flag::Multi(MultiFlag::new(identity, lowest, saturation)))
    }

    /// Registers a positional flag. Declaration order determines which slot
    /// each arriving positional value fills.
    pub fn add_positional(
        &mut self,
        name: &str,
        help: &str,
        lowest: usize,
        saturation: usize,
    ) -> Result<(), ConfigError> {
        check_bounds(name, lowest, saturation)?;
        let position = self.positional_order.len() + 1;
        let identity = FlagIdentity::new(name, help, None);
        self.insert(Flag::Positional(PositionalFlag::new(
            position, identity, lowest, saturation,
        )))
    }

    fn insert(&mut self, flag: Flag) -> Result<(), ConfigError> {
        let name = flag.name().to_string();
        if name.is_empty() || name.starts_with('-') {
            return Err(ConfigError::InvalidName(name));
        }
        if self.by_name.contains_key(&name) {
            return Err(ConfigError::DuplicateName(name));
        }
        if let Some(alias) = flag.alias() {
            if let Some(&handle) = self.by_alias.get(&alias) {
                return Err(ConfigError::DuplicateAlias {
                    alias,
                    bound_to: self.flags[handle].name().to_string(),
                });
            }
        }

        // A user flag that claims a built-in trigger wins; the trigger is
        // silently disabled rather than rejected.
        if self.help_keyword.as_deref() == Some(name.as_str()) {
            self.help_keyword = None;
        }
        if self.version_keyword.as_deref() == Some(name.as_str()) {
            self.version_keyword = None;
        }
        if let Some(alias) = flag.alias() {
            if self.help_alias == Some(alias) {
                self.help_alias = None;
            }
            if self.version_alias == Some(alias) {
                self.version_alias = None;
            }
        }

        let handle = self.flags.len();
        self.by_name.insert(name, handle);
        if let Some(alias) = flag.alias() {
            self.by_alias.insert(alias, handle);
        }
        if matches!(flag, Flag::Positional(_)) {
            self.positional_order.push(handle);
        }
        self.flags.push(flag);
        Ok(())
    }

    // Post-hoc per-flag configuration -------------------------------------

    /// Turns a regular flag into an appending one: repeated assignment
    /// concatenates with `separator` instead of replacing.
    pub fn enable_append(&mut self, name: &str, separator: char) -> Result<(), ConfigError> {
        self.with_regular(name, "append separators", |flag| {
            flag.set_separator(Some(separator));
        })
    }

    /// Restores replace semantics on a regular flag.
    pub fn disable_append(&mut self, name: &str) -> Result<(), ConfigError> {
        self.with_regular(name, "append separators", |flag| {
            flag.set_separator(None);
        })
    }

    /// Marks a regular flag obligatory after registration.
    pub fn make_obligatory(&mut self, name: &str) -> Result<(), ConfigError> {
        self.with_regular(name, "obligatory status", RegularFlag::make_obligatory)
    }

    /// Sets the minimum value count of a multi or positional flag.
    pub fn set_lowest(&mut self, name: &str, lowest: usize) -> Result<(), ConfigError> {
        let flag = self.entry_mut(name)?;
        match flag {
            Flag::Multi(multi) => {
                check_bounds(name, lowest, multi.saturation())?;
                multi.set_lowest(lowest);
                Ok(())
            }
            Flag::Positional(positional) => {
                check_bounds(name, lowest, positional.inner().saturation())?;
                positional.inner_mut().set_lowest(lowest);
                Ok(())
            }
            other => Err(ConfigError::UnsupportedOption {
                name: name.to_string(),
                kind: other.kind(),
                option: "value count bounds",
            }),
        }
    }

    /// Sets the maximum value count of a multi or positional flag
    /// (0 = unbounded).
    pub fn set_saturation(&mut self, name: &str, saturation: usize) -> Result<(), ConfigError> {
        let flag = self.entry_mut(name)?;
        match flag {
            Flag::Multi(multi) => {
                check_bounds(name, multi.lowest(), saturation)?;
                multi.set_saturation(saturation);
                Ok(())
            }
            Flag::Positional(positional) => {
                check_bounds(name, positional.inner().lowest(), saturation)?;
                positional.inner_mut().set_saturation(saturation);
                Ok(())
            }
            other => Err(ConfigError::UnsupportedOption {
                name: name.to_string(),
                kind: other.kind(),
                option: "value count bounds",
            }),
        }
    }

    fn with_regular(
        &mut self,
        name: &str,
        option: &'static str,
        apply: impl FnOnce(&mut RegularFlag),
    ) -> Result<(), ConfigError> {
        match self.entry_mut(name)? {
            Flag::Regular(regular) => {
                apply(regular);
                Ok(())
            }
            other => Err(ConfigError::UnsupportedOption {
                name: name.to_string(),
                kind: other.kind(),
                option,
            }),
        }
    }

    // Help/version trigger configuration ----------------------------------

    /// Replaces the long help keyword; an already-registered flag with the
    /// same name keeps its claim and the trigger stays disabled.
    pub fn set_help_keyword(&mut self, keyword: &str) {
        self.help_keyword = self.claimable_keyword(keyword);
    }

    /// Replaces the short help alias, with the same claim rule.
    pub fn set_help_alias(&mut self, alias: char) {
        self.help_alias = self.claimable_alias(alias);
    }

    pub fn disable_help(&mut self) {
        self.help_keyword = None;
        self.help_alias = None;
    }

    /// Replaces the long version keyword, with the same claim rule.
    pub fn set_version_keyword(&mut self, keyword: &str) {
        self.version_keyword = self.claimable_keyword(keyword);
    }

    /// Replaces the short version alias, with the same claim rule.
    pub fn set_version_alias(&mut self, alias: char) {
        self.version_alias = self.claimable_alias(alias);
    }

    pub fn disable_version(&mut self) {
        self.version_keyword = None;
        self.version_alias = None;
    }

    fn claimable_keyword(&self, keyword: &str) -> Option<String> {
        if keyword.is_empty() || self.by_name.contains_key(keyword) {
            None
        } else {
            Some(keyword.to_string())
        }
    }

    fn claimable_alias(&self, alias: char) -> Option<char> {
        if self.by_alias.contains_key(&alias) {
            None
        } else {
            Some(alias)
        }
    }

    pub fn is_help_keyword(&self, name: &str) -> bool {
        self.help_keyword.as_deref() == Some(name)
    }

    pub fn is_help_alias(&self, alias: char) -> bool {
        self.help_alias == Some(alias)
    }

    pub fn is_version_keyword(&self, name: &str) -> bool {
        self.version_keyword.as_deref() == Some(name)
    }

    pub fn is_version_alias(&self, alias: char) -> bool {
        self.version_alias == Some(alias)
    }

    pub fn help_trigger(&self) -> (Option<&str>, Option<char>) {
        (self.help_keyword.as_deref(), self.help_alias)
    }

    pub fn version_trigger(&self) -> (Option<&str>, Option<char>) {
        (self.version_keyword.as_deref(), self.version_alias)
    }

    // Lookup ---------------------------------------------------------------

    /// Resolves a canonical name to its entity.
    pub fn lookup(&self, name: &str) -> Result<&Flag, ConfigError> {
        self.handle(name)
            .map(|handle| &self.flags[handle])
            .ok_or_else(|| ConfigError::UnknownArgument(name.to_string()))
    }

    /// Resolves an alias character to its entity.
    pub fn lookup_alias(&self, alias: char) -> Option<&Flag> {
        self.alias_handle(alias).map(|handle| &self.flags[handle])
    }

    pub(crate) fn handle(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub(crate) fn alias_handle(&self, alias: char) -> Option<usize> {
        self.by_alias.get(&alias).copied()
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut Flag, ConfigError> {
        match self.handle(name) {
            Some(handle) => Ok(&mut self.flags[handle]),
            None => Err(ConfigError::UnknownArgument(name.to_string())),
        }
    }

    pub(crate) fn flag_mut(&mut self, handle: usize) -> &mut Flag {
        &mut self.flags[handle]
    }

    pub(crate) fn positional_handles(&self) -> &[usize] {
        &self.positional_order
    }

    /// All flags in registration order.
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Clears every flag's value state, keeping registrations intact.
    pub fn reset_values(&mut self) {
        for flag in &mut self.flags {
            flag.reset();
        }
    }
}

fn check_bounds(name: &str, lowest: usize, saturation: usize) -> Result<(), ConfigError> {
    if saturation != 0 && saturation < lowest {
        return Err(ConfigError::InvalidBounds {
            name: name.to_string(),
            lowest,
            saturation,
        });
    }
    Ok(())
}
