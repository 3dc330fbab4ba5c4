//! Dispatcher: the control loop that resolves argv tokens against the
//! registry.
//!
//! [`Arguments`] is the configure → parse → query session type. One
//! [`parse`](Arguments::parse) call walks the token stream left to right,
//! routes each token through the [classifier](crate::token) to the matching
//! flag entity (or the positional queue), honors the help/version
//! short-circuit, then drains the positional queue into the declared
//! positional flags and runs validation.
//!
//! Two deliberate lenient behaviors live here and are covered by tests:
//!
//! - Positional values beyond the declared positional capacity are reported
//!   as *omitted* (a warning), not rejected. Saturation overflow on an
//!   explicit multi flag is still a hard [`ParseError::Saturated`].
//! - Re-parsing without [`reset`](Arguments::reset) accumulates into
//!   existing append/multi state. This supports batch re-parsing but is a
//!   surprising default; call `reset` for a fresh pass.

use tracing::{debug, warn};

use crate::error::{ConfigError, ParseError};
use crate::help;
use crate::registry::Registry;
use crate::summary::ParseSummary;
use crate::token::{self, TokenKind};
use crate::validate::{self, ValidationFailure};

/// Terminal result of one parse invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// All tokens consumed and every validation check passed.
    Ok,
    /// A help trigger fired; remaining tokens were not consumed.
    Help,
    /// A version trigger fired; remaining tokens were not consumed.
    Version,
    /// Parsing finished but validation collected this many failures.
    ValidationFailed(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Scanning,
    PositionalOnly,
    HelpRequested,
    VersionRequested,
}

/// A configure → parse → query argument session.
///
/// # Examples
///
/// ```
/// use flagline_core::{Arguments, ParseOutcome};
///
/// let mut args = Arguments::new("demo", "0.1.0");
/// args.add_switch("verbose", "Chatty output", Some('v'))?;
/// args.add_argument("output", "Output path", Some('o'), None)?;
/// args.add_positional("input", "Input file", 1, 1)?;
///
/// let outcome = args.parse(["-v", "-o", "out.txt", "in.txt"])?;
/// assert_eq!(outcome, ParseOutcome::Ok);
/// assert!(args.is_set("verbose")?);
/// assert_eq!(args.value("output")?, Some("out.txt".to_string()));
/// assert_eq!(args.iterable("input")?, vec!["in.txt".to_string()]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Arguments {
    program: String,
    version: String,
    registry: Registry,
    positional: Vec<String>,
    numerical: Option<i64>,
    omitted: Vec<String>,
    failures: Vec<ValidationFailure>,
}

impl Arguments {
    pub fn new(program: &str, version: &str) -> Self {
        Self {
            program: program.to_string(),
            version: version.to_string(),
            registry: Registry::new(),
            positional: Vec::new(),
            numerical: None,
            omitted: Vec::new(),
            failures: Vec::new(),
        }
    }

    // Configuration (delegates to the registry) ---------------------------

    pub fn add_switch(
        &mut self,
        name: &str,
        help: &str,
        alias: Option<char>,
    ) -> Result<(), ConfigError> {
        self.registry.add_switch(name, help, alias)
    }

    pub fn add_argument(
        &mut self,
        name: &str,
        help: &str,
        alias: Option<char>,
        default: Option<&str>,
    ) -> Result<(), ConfigError> {
        self.registry.add_argument(name, help, alias, default)
    }

    pub fn add_obligatory(
        &mut self,
        name: &str,
        help: &str,
        alias: Option<char>,
    ) -> Result<(), ConfigError> {
        self.registry.add_obligatory(name, help, alias)
    }

    pub fn add_multi(
        &mut self,
        name: &str,
        help: &str,
        alias: Option<char>,
        lowest: usize,
        saturation: usize,
    ) -> Result<(), ConfigError> {
        self.registry.add_multi(name, help, alias, lowest, saturation)
    }

    pub fn add_positional(
        &mut self,
        name: &str,
        help: &str,
        lowest: usize,
        saturation: usize,
    ) -> Result<(), ConfigError> {
        self.registry.add_positional(name, help, lowest, saturation)
    }

    pub fn enable_append(&mut self, name: &str, separator: char) -> Result<(), ConfigError> {
        self.registry.enable_append(name, separator)
    }

    pub fn make_obligatory(&mut self, name: &str) -> Result<(), ConfigError> {
        self.registry.make_obligatory(name)
    }

    /// Direct access for trigger configuration and the less common setters.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    // Parsing --------------------------------------------------------------

    /// Parses the process's own argument vector (without the program name).
    pub fn parse_env(&mut self) -> Result<ParseOutcome, ParseError> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        self.parse(args)
    }

    /// Consumes one flat token stream (argv without the program name).
    ///
    /// Runs to completion or returns an error before any query method is
    /// meaningful. Flag value state is *not* cleared first; see the module
    /// docs on re-parse accumulation.
    pub fn parse<I, S>(&mut self, args: I) -> Result<ParseOutcome, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<String> = args.into_iter().map(|t| t.as_ref().to_string()).collect();
        self.positional.clear();
        self.omitted.clear();
        self.failures.clear();

        let mut state = ScanState::Scanning;
        let mut index = 0;
        while index < tokens.len() {
            if matches!(state, ScanState::HelpRequested | ScanState::VersionRequested) {
                break;
            }
            let current = &tokens[index];
            match token::classify(current) {
                TokenKind::Separator => {
                    debug!("bare '--': remaining tokens taken verbatim as positional");
                    self.positional.extend(tokens[index + 1..].iter().cloned());
                    state = ScanState::PositionalOnly;
                    index = tokens.len();
                    continue;
                }
                TokenKind::Assignment { target, value } => {
                    self.dispatch_assignment(current, target, value)?;
                }
                TokenKind::Long(name) => {
                    if self.registry.is_help_keyword(name) {
                        state = ScanState::HelpRequested;
                    } else if self.registry.is_version_keyword(name) {
                        state = ScanState::VersionRequested;
                    } else {
                        let next = tokens.get(index + 1).map(String::as_str);
                        index += self.dispatch_long(name, next)?;
                    }
                }
                TokenKind::Short(symbol) => {
                    if self.registry.is_help_alias(symbol) {
                        state = ScanState::HelpRequested;
                    } else if self.registry.is_version_alias(symbol) {
                        state = ScanState::VersionRequested;
                    } else {
                        let next = tokens.get(index + 1).map(String::as_str);
                        index += self.dispatch_short(current, symbol, next)?;
                    }
                }
                TokenKind::Group(group) => {
                    // A group that is entirely a numeral is the numerical
                    // argument; this takes priority over alias scanning.
                    if let Some(number) = token::numeral(group) {
                        debug!(number, "captured numerical argument");
                        self.numerical = Some(number);
                    } else if let Some(trigger) = self.dispatch_group(current, group)? {
                        state = trigger;
                    }
                }
                TokenKind::Positional => {
                    debug!(token = %current, "queued positional value");
                    self.positional.push(current.clone());
                }
            }
            index += 1;
        }

        match state {
            ScanState::HelpRequested => {
                debug!("help requested, remaining tokens skipped");
                return Ok(ParseOutcome::Help);
            }
            ScanState::VersionRequested => {
                debug!("version requested, remaining tokens skipped");
                return Ok(ParseOutcome::Version);
            }
            ScanState::Scanning | ScanState::PositionalOnly => {}
        }

        self.drain_positional();
        self.failures = validate::validate(&self.registry);
        if self.failures.is_empty() {
            Ok(ParseOutcome::Ok)
        } else {
            Ok(ParseOutcome::ValidationFailed(self.failures.len()))
        }
    }

    /// Resolves a `--name` token, consuming the next token as its value when
    /// the flag takes one. Returns how many extra tokens were consumed.
    fn dispatch_long(&mut self, name: &str, next: Option<&str>) -> Result<usize, ParseError> {
        let handle = self
            .registry
            .handle(name)
            .ok_or_else(|| ParseError::UnknownArgument { name: name.to_string() })?;
        self.assign_with_lookahead(handle, next)
    }

    /// Resolves a `-c` token exactly like a long flag.
    fn dispatch_short(
        &mut self,
        current: &str,
        symbol: char,
        next: Option<&str>,
    ) -> Result<usize, ParseError> {
        let handle = self.registry.alias_handle(symbol).ok_or_else(|| {
            ParseError::UnknownFlag {
                symbol,
                group: current.to_string(),
            }
        })?;
        self.assign_with_lookahead(handle, next)
    }

    fn assign_with_lookahead(
        &mut self,
        handle: usize,
        next: Option<&str>,
    ) -> Result<usize, ParseError> {
        let flag = self.registry.flag_mut(handle);
        let name = flag.name().to_string();
        if !flag.takes_value() {
            flag.accept(None).map_err(|e| e.for_flag(&name))?;
            debug!(flag = %name, "switch set");
            return Ok(0);
        }
        match next {
            Some(value) if !token::looks_like_flag(value) => {
                flag.accept(Some(value)).map_err(|e| e.for_flag(&name))?;
                debug!(flag = %name, value = %value, "value consumed from lookahead");
                Ok(1)
            }
            _ => Err(ParseError::MissingValue { flag: name }),
        }
    }

    /// Handles `target=value` tokens: `--name=value` assigns by long name,
    /// `-c=value` by alias; anything longer after a single dash is ambiguous
    /// with a grouped short-flag token and rejected.
    fn dispatch_assignment(
        &mut self,
        current: &str,
        target: &str,
        value: &str,
    ) -> Result<(), ParseError> {
        let handle = if let Some(name) = target.strip_prefix("--") {
            self.registry
                .handle(name)
                .ok_or_else(|| ParseError::UnknownArgument { name: name.to_string() })?
        } else {
            let body = &target[1..];
            let mut chars = body.chars();
            match (chars.next(), chars.next()) {
                (Some(symbol), None) => {
                    self.registry.alias_handle(symbol).ok_or_else(|| {
                        ParseError::UnknownFlag {
                            symbol,
                            group: current.to_string(),
                        }
                    })?
                }
                _ => {
                    return Err(ParseError::AmbiguousAssignment {
                        token: current.to_string(),
                    });
                }
            }
        };

        let flag = self.registry.flag_mut(handle);
        let name = flag.name().to_string();
        flag.accept(Some(value)).map_err(|e| e.for_flag(&name))?;
        debug!(flag = %name, value = %value, "value assigned via '='");
        Ok(())
    }

    /// Scans a grouped short-flag token character by character. A switch
    /// alias sets and continues; a value-taking alias consumes the rest of
    /// the token as its value and ends the group. Returns the scan state to
    /// enter when a help/version alias short-circuits the group.
    fn dispatch_group(
        &mut self,
        current: &str,
        group: &str,
    ) -> Result<Option<ScanState>, ParseError> {
        let chars: Vec<char> = group.chars().collect();
        let mut pos = 0;
        while pos < chars.len() {
            let symbol = chars[pos];
            if self.registry.is_help_alias(symbol) {
                return Ok(Some(ScanState::HelpRequested));
            }
            if self.registry.is_version_alias(symbol) {
                return Ok(Some(ScanState::VersionRequested));
            }
            let handle = self.registry.alias_handle(symbol).ok_or_else(|| {
                ParseError::UnknownFlag {
                    symbol,
                    group: current.to_string(),
                }
            })?;
            let flag = self.registry.flag_mut(handle);
            let name = flag.name().to_string();
            if !flag.takes_value() {
                flag.accept(None).map_err(|e| e.for_flag(&name))?;
                debug!(flag = %name, group = %current, "switch set from group");
                pos += 1;
                continue;
            }
            let value: String = chars[pos + 1..].iter().collect();
            if value.is_empty() {
                return Err(ParseError::MissingValue { flag: name });
            }
            flag.accept(Some(&value)).map_err(|e| e.for_flag(&name))?;
            debug!(flag = %name, value = %value, "group remainder consumed as value");
            return Ok(None);
        }
        Ok(None)
    }

    /// Drains the positional queue into the declared positional flags in
    /// declaration order. Values left over once every declared flag is
    /// saturated are reported as omitted, not rejected.
    fn drain_positional(&mut self) {
        let handles: Vec<usize> = self.registry.positional_handles().to_vec();
        let mut cursor = 0;
        for handle in handles {
            while cursor < self.positional.len() {
                let flag = self.registry.flag_mut(handle);
                if !flag.is_loadable() {
                    break;
                }
                if flag.accept(Some(self.positional[cursor].as_str())).is_err() {
                    break;
                }
                cursor += 1;
            }
        }
        if cursor < self.positional.len() {
            self.omitted = self.positional[cursor..].to_vec();
            warn!(
                omitted = ?self.omitted,
                "positional values exceed declared capacity",
            );
        }
    }

    // Query API ------------------------------------------------------------

    pub fn is_set(&self, name: &str) -> Result<bool, ConfigError> {
        Ok(self.registry.lookup(name)?.is_set())
    }

    /// Current value of a flag: the set value, or its default, or `None`.
    pub fn value(&self, name: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.registry.lookup(name)?.value())
    }

    /// Like [`value`](Arguments::value), with a caller-supplied fallback.
    pub fn value_or(&self, name: &str, fallback: &str) -> Result<String, ConfigError> {
        Ok(self.value(name)?.unwrap_or_else(|| fallback.to_string()))
    }

    /// The flag's values as a sequence: the appended parts of a regular
    /// flag, or the collected values of a multi/positional flag.
    pub fn iterable(&self, name: &str) -> Result<Vec<String>, ConfigError> {
        Ok(self.registry.lookup(name)?.iterable())
    }

    /// All tokens routed to the positional queue, in arrival order.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// The process-wide numerical argument (e.g. a leading `-42`), if any.
    pub fn numerical(&self) -> Option<i64> {
        self.numerical
    }

    /// Positional values that exceeded declared positional capacity.
    pub fn omitted(&self) -> &[String] {
        &self.omitted
    }

    /// Validation failures collected by the last parse.
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// Full textual report of the last parse's validation failures.
    pub fn report(&self) -> String {
        validate::render_report(&self.failures)
    }

    pub fn help_text(&self) -> String {
        help::render_help(&self.program, &self.registry)
    }

    pub fn version_text(&self) -> String {
        help::render_version(&self.program, &self.version)
    }

    /// Serializable snapshot of the post-parse state.
    pub fn summary(&self) -> ParseSummary {
        ParseSummary::capture(self)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Clears all value state so the registry can run a fresh parse.
    pub fn reset(&mut self) {
        self.registry.reset_values();
        self.positional.clear();
        self.numerical = None;
        self.omitted.clear();
        self.failures.clear();
    }
}
