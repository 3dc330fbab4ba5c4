//! Error types for the argument engine.
//!
//! Failures fall into two tiers with different lifecycles:
//!
//! - [`ConfigError`] — programmer errors raised while the registry is being
//!   configured (duplicate names, bad bounds). These abort configuration
//!   immediately and are never expected with correct call sites.
//! - [`ParseError`] — user-input errors raised while consuming argv tokens.
//!   They carry the offending token or flag name for diagnosability and
//!   abort the parse pass; no partial-success state is exposed.
//!
//! Validation failures are a third category, collected rather than raised;
//! see [`ValidationFailure`](crate::ValidationFailure).

use thiserror::Error;

use crate::flag::FlagKind;

/// Errors raised while configuring the flag registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Flag name is empty or starts with `-`.
    #[error("invalid flag name {0:?}: must be non-empty and must not start with '-'")]
    InvalidName(String),
    /// A flag with this canonical name is already registered.
    #[error("flag {0} is already registered")]
    DuplicateName(String),
    /// The alias character is already bound to another flag.
    #[error("alias '{alias}' is already bound to flag {bound_to}")]
    DuplicateAlias { alias: char, bound_to: String },
    /// `saturation` is nonzero but below `lowest`.
    #[error("flag {name}: saturation {saturation} is below the lowest required count {lowest}")]
    InvalidBounds {
        name: String,
        lowest: usize,
        saturation: usize,
    },
    /// A per-kind option was applied to a flag kind that does not support it.
    #[error("{kind} flag {name} does not support {option}")]
    UnsupportedOption {
        name: String,
        kind: FlagKind,
        option: &'static str,
    },
    /// No flag is registered under the given canonical name.
    #[error("no flag registered under name {0}")]
    UnknownArgument(String),
}

/// Errors raised while consuming user-supplied tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A flag that requires a value had none (end of input, or the next
    /// token looks like a flag).
    #[error("missing value for flag {flag}")]
    MissingValue { flag: String },
    /// A short-flag character did not resolve to any alias. `group` is the
    /// whole token, for diagnostic context when the character was part of a
    /// grouped short-flag token.
    #[error("unrecognized flag '{symbol}' in token {group}")]
    UnknownFlag { symbol: char, group: String },
    /// A long flag name did not resolve to any registered flag.
    #[error("unrecognized argument --{name}")]
    UnknownArgument { name: String },
    /// An `=`-assignment with more than one character after a single dash:
    /// it cannot be told apart from a grouped short-flag token.
    #[error("'=' assignment cannot be combined with grouped short flags: {token}")]
    AmbiguousAssignment { token: String },
    /// An explicit value arrived for a multi-valued flag that is already at
    /// its saturation bound.
    #[error("flag {flag} is saturated and takes no further values")]
    Saturated { flag: String },
}

/// Kind-level rejection of a single value assignment.
///
/// Produced by [`Flag::accept`](crate::Flag::accept); the dispatcher attaches
/// the flag name and converts to a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AssignError {
    /// The flag requires a value and none was supplied.
    #[error("a value is required")]
    MissingValue,
    /// The value sequence is already at its saturation bound.
    #[error("value count is at saturation")]
    Saturated,
}

impl AssignError {
    /// Promotes a kind-level rejection to a parse error naming the flag.
    pub(crate) fn for_flag(self, flag: &str) -> ParseError {
        match self {
            AssignError::MissingValue => ParseError::MissingValue { flag: flag.to_string() },
            AssignError::Saturated => ParseError::Saturated { flag: flag.to_string() },
        }
    }
}
