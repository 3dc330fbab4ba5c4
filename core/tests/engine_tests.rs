//! End-to-end tests for the configure → parse → query lifecycle.

use flagline_core::{Arguments, ParseError, ParseOutcome, ValidationFailure};

/// Registry used by the end-to-end cases: a switch, a regular flag without
/// a default, and a single obligatory positional.
fn file_tool() -> Arguments {
    let mut args = Arguments::new("filetool", "0.1.0");
    args.add_switch("verbose", "Chatty output", Some('v')).unwrap();
    args.add_argument("output", "Output path", Some('o'), None).unwrap();
    args.add_positional("input", "Input file", 1, 1).unwrap();
    args
}

#[test]
fn test_switch_set_through_every_spelling() {
    for tokens in [
        vec!["--verbose"],
        vec!["-v"],
        vec!["-v", "--verbose", "-v"],
    ] {
        let mut args = file_tool();
        args.parse(tokens.iter().chain(["in.txt"].iter())).unwrap();
        assert!(args.is_set("verbose").unwrap(), "tokens: {tokens:?}");
    }

    // Inside a grouped token as well.
    let mut args = file_tool();
    args.add_switch("force", "Overwrite", Some('f')).unwrap();
    args.parse(["-vf", "in.txt"]).unwrap();
    assert!(args.is_set("verbose").unwrap());
    assert!(args.is_set("force").unwrap());
}

#[test]
fn test_append_separator_concatenates_repeated_values() {
    let mut args = Arguments::new("demo", "0.1.0");
    args.add_argument("tag", "Tags", Some('t'), None).unwrap();
    args.enable_append("tag", ',').unwrap();

    args.parse(["--tag", "a", "--tag", "b"]).unwrap();
    assert_eq!(args.value("tag").unwrap(), Some("a,b".to_string()));
    assert_eq!(
        args.iterable("tag").unwrap(),
        vec!["a".to_string(), "b".to_string()],
    );
}

#[test]
fn test_multi_bounds() {
    let build = || {
        let mut args = Arguments::new("demo", "0.1.0");
        args.add_multi("include", "Search paths", Some('I'), 1, 2).unwrap();
        args
    };

    // One or two values pass validation.
    let mut args = build();
    assert_eq!(args.parse(["--include", "a"]).unwrap(), ParseOutcome::Ok);
    let mut args = build();
    assert_eq!(
        args.parse(["--include", "a", "--include", "b"]).unwrap(),
        ParseOutcome::Ok,
    );

    // Zero values fail validation with BelowLowest.
    let mut args = build();
    assert_eq!(args.parse::<_, &str>([]).unwrap(), ParseOutcome::ValidationFailed(1));
    assert_eq!(
        args.failures(),
        [ValidationFailure::BelowLowest {
            name: "include".to_string(),
            lowest: 1,
            count: 0,
        }],
    );

    // A third explicit value is a hard parse error.
    let mut args = build();
    let err = args
        .parse(["-I", "a", "-I", "b", "-I", "c"])
        .unwrap_err();
    assert_eq!(err, ParseError::Saturated { flag: "include".to_string() });
}

#[test]
fn test_equals_assignment_matches_lookahead_form() {
    let mut spaced = Arguments::new("demo", "0.1.0");
    spaced.add_argument("name", "Job name", Some('n'), None).unwrap();
    spaced.parse(["--name", "job1"]).unwrap();

    let mut assigned = Arguments::new("demo", "0.1.0");
    assigned.add_argument("name", "Job name", Some('n'), None).unwrap();
    assigned.parse(["--name=job1"]).unwrap();

    let mut alias_assigned = Arguments::new("demo", "0.1.0");
    alias_assigned.add_argument("name", "Job name", Some('n'), None).unwrap();
    alias_assigned.parse(["-n=job1"]).unwrap();

    for args in [&spaced, &assigned, &alias_assigned] {
        assert_eq!(args.value("name").unwrap(), Some("job1".to_string()));
    }
}

#[test]
fn test_equals_assignment_rejected_for_grouped_flags() {
    let mut args = Arguments::new("demo", "0.1.0");
    args.add_switch("all", "", Some('a')).unwrap();
    args.add_argument("block", "", Some('b'), None).unwrap();

    let err = args.parse(["-ab=c"]).unwrap_err();
    assert_eq!(err, ParseError::AmbiguousAssignment { token: "-ab=c".to_string() });
}

#[test]
fn test_separator_forces_positional_interpretation() {
    let mut args = Arguments::new("demo", "0.1.0");
    args.add_switch("verbose", "", Some('v')).unwrap();

    args.parse(["-v", "--", "-x", "--not-a-flag", "-", "plain"]).unwrap();
    assert!(args.is_set("verbose").unwrap());
    assert_eq!(args.positional(), ["-x", "--not-a-flag", "-", "plain"]);
}

#[test]
fn test_lone_dash_is_positional() {
    let mut args = Arguments::new("demo", "0.1.0");
    args.parse(["-"]).unwrap();
    assert_eq!(args.positional(), ["-"]);
}

#[test]
fn test_end_to_end_full_invocation() {
    let mut args = file_tool();
    let outcome = args.parse(["-v", "-o", "out.txt", "in.txt"]).unwrap();

    assert_eq!(outcome, ParseOutcome::Ok);
    assert!(args.is_set("verbose").unwrap());
    assert_eq!(args.value("output").unwrap(), Some("out.txt".to_string()));
    assert_eq!(args.positional(), ["in.txt"]);
    assert_eq!(args.iterable("input").unwrap(), vec!["in.txt".to_string()]);
    assert!(args.failures().is_empty());
}

#[test]
fn test_end_to_end_fallback_value() {
    let mut args = file_tool();
    let outcome = args.parse(["in.txt"]).unwrap();

    assert_eq!(outcome, ParseOutcome::Ok);
    assert!(!args.is_set("output").unwrap());
    assert_eq!(
        args.value_or("output", "default.txt").unwrap(),
        "default.txt".to_string(),
    );
}

#[test]
fn test_end_to_end_obligatory_unset() {
    let mut args = Arguments::new("demo", "0.1.0");
    args.add_obligatory("name", "Job name", None).unwrap();

    let outcome = args.parse::<_, &str>([]).unwrap();
    assert_eq!(outcome, ParseOutcome::ValidationFailed(1));
    assert_eq!(
        args.failures(),
        [ValidationFailure::ObligatoryUnset("name".to_string())],
    );
    assert!(args.report().contains("obligatory flag not set: name"));
}

#[test]
fn test_help_short_circuits_remaining_tokens() {
    for tokens in [
        vec!["--help", "--no-such-flag"],
        vec!["-h", "--no-such-flag"],
        vec!["-vh", "--no-such-flag"],
    ] {
        let mut args = file_tool();
        // The unknown flag after the trigger must never be reached.
        let outcome = args.parse(&tokens).unwrap();
        assert_eq!(outcome, ParseOutcome::Help, "tokens: {tokens:?}");
    }

    let mut args = file_tool();
    assert_eq!(args.parse(["--version"]).unwrap(), ParseOutcome::Version);
    let mut args = file_tool();
    assert_eq!(args.parse(["-V"]).unwrap(), ParseOutcome::Version);
}

#[test]
fn test_user_flag_claims_builtin_trigger() {
    let mut args = Arguments::new("demo", "0.1.0");
    args.add_switch("help", "User-owned help switch", None).unwrap();

    // "--help" now resolves to the user switch instead of short-circuiting.
    let outcome = args.parse(["--help"]).unwrap();
    assert_eq!(outcome, ParseOutcome::Ok);
    assert!(args.is_set("help").unwrap());

    // The untouched short alias still triggers the built-in.
    let mut args = Arguments::new("demo", "0.1.0");
    args.add_switch("help", "User-owned help switch", None).unwrap();
    assert_eq!(args.parse(["-h"]).unwrap(), ParseOutcome::Help);
}

#[test]
fn test_grouped_value_flag_consumes_token_remainder() {
    let mut args = Arguments::new("demo", "0.1.0");
    args.add_switch("verbose", "", Some('v')).unwrap();
    args.add_argument("output", "", Some('o'), None).unwrap();

    args.parse(["-voresult.txt"]).unwrap();
    assert!(args.is_set("verbose").unwrap());
    assert_eq!(args.value("output").unwrap(), Some("result.txt".to_string()));
}

#[test]
fn test_grouped_value_flag_without_remainder_is_missing_value() {
    let mut args = Arguments::new("demo", "0.1.0");
    args.add_switch("verbose", "", Some('v')).unwrap();
    args.add_argument("output", "", Some('o'), None).unwrap();

    let err = args.parse(["-vo"]).unwrap_err();
    assert_eq!(err, ParseError::MissingValue { flag: "output".to_string() });
}

#[test]
fn test_unknown_group_character_names_whole_group() {
    let mut args = Arguments::new("demo", "0.1.0");
    args.add_switch("verbose", "", Some('v')).unwrap();

    let err = args.parse(["-vxz"]).unwrap_err();
    assert_eq!(
        err,
        ParseError::UnknownFlag { symbol: 'x', group: "-vxz".to_string() },
    );
}

#[test]
fn test_numeric_group_becomes_numerical_argument() {
    let mut args = Arguments::new("demo", "0.1.0");
    args.add_switch("four", "", Some('4')).unwrap();

    // Numeral capture wins over alias scanning.
    args.parse(["-42"]).unwrap();
    assert_eq!(args.numerical(), Some(42));
    assert!(!args.is_set("four").unwrap());
}

#[test]
fn test_missing_value_cases() {
    let build = || {
        let mut args = Arguments::new("demo", "0.1.0");
        args.add_argument("output", "", Some('o'), None).unwrap();
        args.add_switch("verbose", "", Some('v')).unwrap();
        args
    };

    // End of input.
    let err = build().parse(["--output"]).unwrap_err();
    assert_eq!(err, ParseError::MissingValue { flag: "output".to_string() });

    // Next token looks like a flag.
    let err = build().parse(["--output", "--verbose"]).unwrap_err();
    assert_eq!(err, ParseError::MissingValue { flag: "output".to_string() });

    // A lone "-" is a legitimate value (conventional stdin marker).
    let mut args = build();
    args.parse(["--output", "-"]).unwrap();
    assert_eq!(args.value("output").unwrap(), Some("-".to_string()));
}

#[test]
fn test_unknown_names_are_parse_errors() {
    let mut args = Arguments::new("demo", "0.1.0");
    assert_eq!(
        args.parse(["--nope"]).unwrap_err(),
        ParseError::UnknownArgument { name: "nope".to_string() },
    );
    assert_eq!(
        args.parse(["-z"]).unwrap_err(),
        ParseError::UnknownFlag { symbol: 'z', group: "-z".to_string() },
    );
}

#[test]
fn test_positional_overflow_is_lenient() {
    let mut args = Arguments::new("demo", "0.1.0");
    args.add_positional("input", "Input file", 1, 1).unwrap();

    // Extra trailing values are omitted with a warning, never an error.
    let outcome = args.parse(["a", "b", "c"]).unwrap();
    assert_eq!(outcome, ParseOutcome::Ok);
    assert_eq!(args.iterable("input").unwrap(), vec!["a".to_string()]);
    assert_eq!(args.positional(), ["a", "b", "c"]);
    assert_eq!(args.omitted(), ["b", "c"]);
}

#[test]
fn test_positional_drain_follows_declaration_order() {
    let mut args = Arguments::new("demo", "0.1.0");
    args.add_positional("first", "", 1, 2).unwrap();
    args.add_positional("rest", "", 0, 0).unwrap();

    args.parse(["a", "b", "c", "d"]).unwrap();
    assert_eq!(
        args.iterable("first").unwrap(),
        vec!["a".to_string(), "b".to_string()],
    );
    assert_eq!(
        args.iterable("rest").unwrap(),
        vec!["c".to_string(), "d".to_string()],
    );
    assert!(args.omitted().is_empty());
}

#[test]
fn test_reparse_accumulates_until_reset() {
    let mut args = Arguments::new("demo", "0.1.0");
    args.add_multi("include", "", Some('I'), 0, 0).unwrap();

    args.parse(["-I", "a"]).unwrap();
    args.parse(["-I", "b"]).unwrap();
    // Accumulation across parses is the documented default.
    assert_eq!(
        args.iterable("include").unwrap(),
        vec!["a".to_string(), "b".to_string()],
    );

    args.reset();
    args.parse(["-I", "c"]).unwrap();
    assert_eq!(args.iterable("include").unwrap(), vec!["c".to_string()]);
}

#[test]
fn test_switch_via_assignment_ignores_value() {
    let mut args = Arguments::new("demo", "0.1.0");
    args.add_switch("verbose", "", Some('v')).unwrap();

    args.parse(["--verbose=yes"]).unwrap();
    assert!(args.is_set("verbose").unwrap());
}
