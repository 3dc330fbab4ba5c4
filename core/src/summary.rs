//! Serializable snapshots of post-parse state.
//!
//! [`ParseSummary`] captures everything a wrapper needs to display or log
//! about a finished parse: per-flag descriptors, the positional queue, the
//! numerical argument, omitted overflow, and validation failures. All types
//! serialize with [`serde`], so a CLI can emit the summary as JSON.

use serde::Serialize;

use crate::dispatch::Arguments;
use crate::flag::{Flag, FlagKind};

/// Snapshot of one registered flag and its current value state.
#[derive(Debug, Clone, Serialize)]
pub struct FlagDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<char>,
    pub kind: FlagKind,
    pub help: String,
    pub obligatory: bool,
    pub set: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowest: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation: Option<usize>,
}

impl FlagDescriptor {
    pub fn from_flag(flag: &Flag) -> Self {
        let (lowest, saturation) = match flag.bounds() {
            Some((lowest, saturation)) => (Some(lowest), Some(saturation)),
            None => (None, None),
        };
        Self {
            name: flag.name().to_string(),
            alias: flag.alias(),
            kind: flag.kind(),
            help: flag.identity().help().to_string(),
            obligatory: flag.is_obligatory(),
            set: flag.is_set(),
            value: flag.value(),
            values: flag.iterable(),
            lowest,
            saturation,
        }
    }
}

/// Snapshot of a whole parse session, ready for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct ParseSummary {
    pub program: String,
    pub flags: Vec<FlagDescriptor>,
    pub positional: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numerical: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub omitted: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<String>,
}

impl ParseSummary {
    pub(crate) fn capture(args: &Arguments) -> Self {
        Self {
            program: args.program().to_string(),
            flags: args.registry().flags().map(FlagDescriptor::from_flag).collect(),
            positional: args.positional().to_vec(),
            numerical: args.numerical(),
            omitted: args.omitted().to_vec(),
            failures: args.failures().iter().map(ToString::to_string).collect(),
        }
    }
}
