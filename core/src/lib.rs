//! Flat-stream CLI argument engine.
//!
//! This crate parses exactly one flat argv token stream per invocation
//! against a registry of heterogeneous flag kinds:
//!
//! - [`Arguments`] — the configure → parse → query session type and the
//!   primary entry point.
//! - [`Registry`] — the flag arena with name and alias indexes and the
//!   ordered positional declarations.
//! - [`Flag`] — the four flag kinds (switch, regular, multi, positional)
//!   behind one capability surface.
//! - [`classify`] / [`TokenKind`] — the pure token classifier the
//!   dispatcher routes through.
//! - [`validate`] / [`ValidationFailure`] — the aggregate post-parse pass.
//!
//! There are no subcommands, no configuration-file merging, and no shell
//! completion: tokens in, queryable flag state out.
//!
//! # Example
//!
//! ```
//! use flagline_core::{Arguments, ParseOutcome};
//!
//! let mut args = Arguments::new("mytool", "1.2.0");
//! args.add_switch("verbose", "Enable verbose output", Some('v'))?;
//! args.add_argument("tag", "Tags to attach", Some('t'), None)?;
//! args.enable_append("tag", ',')?;
//! args.add_positional("input", "Input files", 1, 0)?;
//!
//! let outcome = args.parse(["--tag", "a", "-t", "b", "in.txt"])?;
//! assert_eq!(outcome, ParseOutcome::Ok);
//! assert_eq!(args.value("tag")?, Some("a,b".to_string()));
//! assert_eq!(args.iterable("tag")?, vec!["a".to_string(), "b".to_string()]);
//! assert_eq!(args.positional(), ["in.txt"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Lifecycle
//!
//! Flags are created during a configuration phase, mutated only by the
//! dispatcher during a `parse` call, and read-only afterward through the
//! query API. Re-parsing without [`Arguments::reset`] deliberately
//! accumulates into existing append/multi state (batch re-parsing); see the
//! [`dispatch`]-module docs.
//!
//! [`dispatch`]: Arguments::parse

mod dispatch;
mod error;
mod flag;
mod help;
mod registry;
mod summary;
mod token;
mod validate;

pub use dispatch::{Arguments, ParseOutcome};
pub use error::{AssignError, ConfigError, ParseError};
pub use flag::{Flag, FlagIdentity, FlagKind};
pub use help::{render_help, render_version};
pub use registry::{
    DEFAULT_HELP_ALIAS, DEFAULT_HELP_KEYWORD, DEFAULT_VERSION_ALIAS, DEFAULT_VERSION_KEYWORD,
    Registry,
};
pub use summary::{FlagDescriptor, ParseSummary};
pub use token::{TokenKind, classify, looks_like_flag, numeral};
pub use validate::{ValidationFailure, render_report, validate};
