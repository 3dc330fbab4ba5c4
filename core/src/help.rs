//! Help and version text rendering.
//!
//! The help screen groups flags by kind in a fixed order (positional,
//! regular, multi, switch) and appends the built-in help/version triggers
//! when they are still active. The version line follows the
//! `name [version]` convention.

use std::fmt::Write;

use crate::flag::{Flag, FlagKind};
use crate::registry::Registry;

const KIND_ORDER: [(FlagKind, &str); 4] = [
    (FlagKind::Positional, "Positional arguments:"),
    (FlagKind::Regular, "Flags:"),
    (FlagKind::Multi, "Multi-value flags:"),
    (FlagKind::Switch, "Switches:"),
];

/// Renders the full help screen for a configured registry.
pub fn render_help(program: &str, registry: &Registry) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Usage: {program}{}", usage_suffix(registry));

    for (kind, header) in KIND_ORDER {
        let group: Vec<&Flag> = registry.flags().filter(|flag| flag.kind() == kind).collect();
        let builtins = builtin_lines(registry, kind);
        if group.is_empty() && builtins.is_empty() {
            continue;
        }

        output.push('\n');
        output.push_str(header);
        output.push('\n');
        for flag in group {
            let _ = writeln!(output, "  {:<24}{}", flag_label(flag), flag_detail(flag));
        }
        for (label, detail) in builtins {
            let _ = writeln!(output, "  {label:<24}{detail}");
        }
    }

    output
}

/// Renders the one-line version string.
pub fn render_version(program: &str, version: &str) -> String {
    format!("{program} [{version}]")
}

fn usage_suffix(registry: &Registry) -> String {
    let mut suffix = String::new();
    if registry.flags().any(|flag| flag.kind() != FlagKind::Positional) {
        suffix.push_str(" [flags]");
    }
    for flag in registry.flags() {
        if flag.kind() == FlagKind::Positional {
            let _ = write!(suffix, " <{}>", flag.name());
        }
    }
    suffix
}

fn flag_label(flag: &Flag) -> String {
    match flag.kind() {
        FlagKind::Positional => flag.name().to_string(),
        _ => match flag.alias() {
            Some(alias) => format!("--{}, -{alias}", flag.name()),
            None => format!("--{}", flag.name()),
        },
    }
}

fn flag_detail(flag: &Flag) -> String {
    let mut detail = flag.identity().help().to_string();
    if flag.is_obligatory() && flag.bounds().is_none() {
        detail.push_str(" [obligatory]");
    }
    if let Flag::Regular(_) = flag {
        if let Some(value) = flag.value() {
            if !flag.is_set() {
                let _ = write!(detail, " [default: {value}]");
            }
        }
    }
    if let Some((lowest, saturation)) = flag.bounds() {
        match (lowest, saturation) {
            (0, 0) => {}
            (lowest, 0) => {
                let _ = write!(detail, " (at least {lowest})");
            }
            (0, saturation) => {
                let _ = write!(detail, " (at most {saturation})");
            }
            (lowest, saturation) => {
                let _ = write!(detail, " (between {lowest} and {saturation})");
            }
        }
    }
    detail.trim_start().to_string()
}

fn builtin_lines(registry: &Registry, kind: FlagKind) -> Vec<(String, String)> {
    if kind != FlagKind::Switch {
        return Vec::new();
    }

    let mut lines = Vec::new();
    if let Some(label) = trigger_label(registry.help_trigger()) {
        lines.push((label, "Print this help and exit".to_string()));
    }
    if let Some(label) = trigger_label(registry.version_trigger()) {
        lines.push((label, "Print version and exit".to_string()));
    }
    lines
}

fn trigger_label((keyword, alias): (Option<&str>, Option<char>)) -> Option<String> {
    match (keyword, alias) {
        (Some(keyword), Some(alias)) => Some(format!("--{keyword}, -{alias}")),
        (Some(keyword), None) => Some(format!("--{keyword}")),
        (None, Some(alias)) => Some(format!("-{alias}")),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> Registry {
        let mut registry = Registry::new();
        registry.add_positional("input", "Input file", 1, 1).unwrap();
        registry
            .add_argument("output", "Output path", Some('o'), Some("out.txt"))
            .unwrap();
        registry.add_obligatory("name", "Job name", None).unwrap();
        registry.add_multi("include", "Search path", Some('I'), 0, 4).unwrap();
        registry.add_switch("verbose", "Chatty output", Some('v')).unwrap();
        registry
    }

    #[test]
    fn test_help_groups_by_kind_in_fixed_order() {
        let help = render_help("demo", &sample_registry());

        let positional = help.find("Positional arguments:").unwrap();
        let regular = help.find("Flags:").unwrap();
        let multi = help.find("Multi-value flags:").unwrap();
        let switches = help.find("Switches:").unwrap();
        assert!(positional < regular && regular < multi && multi < switches);

        assert!(help.starts_with("Usage: demo [flags] <input>"));
        assert!(help.contains("--output, -o"));
        assert!(help.contains("[default: out.txt]"));
        assert!(help.contains("[obligatory]"));
        assert!(help.contains("(at most 4)"));
        assert!(help.contains("--help, -h"));
        assert!(help.contains("--version, -V"));
    }

    #[test]
    fn test_disabled_triggers_are_not_listed() {
        let mut registry = sample_registry();
        registry.disable_help();
        registry.disable_version();
        let help = render_help("demo", &registry);
        assert!(!help.contains("--help"));
        assert!(!help.contains("--version"));
    }

    #[test]
    fn test_version_line() {
        assert_eq!(render_version("demo", "0.1.0"), "demo [0.1.0]");
    }
}
