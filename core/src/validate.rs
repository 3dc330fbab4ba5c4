//! Post-parse validation.
//!
//! Runs after the dispatcher has finished and aggregates every failing flag
//! instead of stopping at the first, so a single pass can print a complete
//! diagnostic report. The dispatcher maps a nonzero failure count to
//! [`ParseOutcome::ValidationFailed`](crate::ParseOutcome).

use thiserror::Error;

use crate::registry::Registry;

/// A single validation failure, collected rather than raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// An obligatory flag was never set.
    #[error("obligatory flag not set: {0}")]
    ObligatoryUnset(String),
    /// A multi or positional flag received fewer values than its `lowest`
    /// bound requires.
    #[error("flag {name} requires at least {lowest} value(s), got {count}")]
    BelowLowest {
        name: String,
        lowest: usize,
        count: usize,
    },
    /// A multi or positional flag holds more values than its `saturation`
    /// bound permits.
    #[error("flag {name} accepts at most {saturation} value(s), got {count}")]
    AboveSaturation {
        name: String,
        saturation: usize,
        count: usize,
    },
}

/// Checks every registered flag and returns all failures.
///
/// For multi-valued kinds an empty obligatory flag is reported as
/// [`ValidationFailure::BelowLowest`] (the bound carries the requirement);
/// `ObligatoryUnset` covers the single-valued kinds.
pub fn validate(registry: &Registry) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();

    for flag in registry.flags() {
        match flag.bounds() {
            Some((lowest, saturation)) => {
                let count = flag.value_count();
                if lowest > 0 && count < lowest {
                    failures.push(ValidationFailure::BelowLowest {
                        name: flag.name().to_string(),
                        lowest,
                        count,
                    });
                } else if saturation > 0 && count > saturation {
                    failures.push(ValidationFailure::AboveSaturation {
                        name: flag.name().to_string(),
                        saturation,
                        count,
                    });
                }
            }
            None => {
                if flag.is_obligatory() && !flag.is_set() {
                    failures.push(ValidationFailure::ObligatoryUnset(flag.name().to_string()));
                }
            }
        }
    }

    failures
}

/// Renders the aggregated failures as a multi-line report.
pub fn render_report(failures: &[ValidationFailure]) -> String {
    if failures.is_empty() {
        return "all flags valid".to_string();
    }

    let mut report = format!("validation failed with {} error(s):\n", failures.len());
    for failure in failures {
        report.push_str("  - ");
        report.push_str(&failure.to_string());
        report.push('\n');
    }
    report
}
