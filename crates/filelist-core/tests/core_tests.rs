use chrono::{NaiveDate, NaiveDateTime};
use filelist_core::{
    CommandPlan, DuplicateMode, FileFacts, Operation, OptionError, OptionName, RawSelectors,
    SelectedSet, SelectorError, SelectorSet, Stats, compile_pattern, parse_size, parse_timestamp,
};
use std::path::PathBuf;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

fn plan(args: &[&str]) -> Result<CommandPlan, OptionError> {
    CommandPlan::from_args(args.iter().copied())
}

#[test]
fn test_plan_defaults_to_plain_listing() {
    let plan = plan(&[]).unwrap();

    assert!(plan.operation.is_none());
    assert!(plan.paths.is_empty());
    assert!(plan.output.listing_enabled());
    assert!(!plan.output.stats);
    assert_eq!(plan.output.duplicates, None);
    assert_eq!(plan.selectors, RawSelectors::default());
}

#[test]
fn test_plan_full_command_line() {
    let plan = plan(&[
        "-after", "20230101", "-smaller", "2k", "-stats", "-zip", "out.zip", "docs", "src",
    ])
    .unwrap();

    assert_eq!(plan.selectors.after.as_deref(), Some("20230101"));
    assert_eq!(plan.selectors.smaller.as_deref(), Some("2k"));
    assert!(plan.output.stats);
    assert_eq!(
        plan.operation,
        Some(Operation::Archive {
            destination: PathBuf::from("out.zip")
        })
    );
    assert_eq!(plan.paths, ["docs", "src"]);
}

#[test]
fn test_plan_conflicts() {
    let cases: &[(&[&str], OptionError)] = &[
        (&["-duplcont", "-duplname"], OptionError::BothDuplicateModes),
        (&["-duplname", "-nofilelist"], OptionError::NoListingWithDuplicates),
        (&["-duplcont", "-delete"], OptionError::DuplicatesWithOperation),
        (&["-duplname", "-zip", "a.zip"], OptionError::DuplicatesWithOperation),
        (&["-delete", "-zip", "a.zip"], OptionError::DeleteWithArchive),
        (
            &["-stats", "-stats"],
            OptionError::Repeated {
                option: OptionName::Stats,
            },
        ),
        (
            &["-match"],
            OptionError::MissingValue {
                option: OptionName::Match,
            },
        ),
    ];

    for (args, expected) in cases {
        assert_eq!(plan(args).unwrap_err(), *expected, "args: {args:?}");
    }
}

#[test]
fn test_duplicate_mode_suppresses_listing() {
    let plan = plan(&["-duplcont", "-stats"]).unwrap();

    assert!(plan.output.listing_enabled());
    let output = plan.effective_output();
    assert!(!output.listing_enabled());
    assert!(output.stats);
    assert_eq!(output.duplicates, Some(DuplicateMode::Content));
}

#[test]
fn test_options_after_first_path_are_paths() {
    let plan = plan(&["-stats", "dir", "-delete"]).unwrap();
    assert!(plan.operation.is_none());
    assert_eq!(plan.paths, ["dir", "-delete"]);
}

#[test]
fn test_resolved_selectors_against_dated_files() {
    // 1000 bytes modified 2023-01-01, 50 bytes modified 2023-06-01.
    let a = FileFacts::new(1000, at(2023, 1, 1, 12, 0, 0));
    let b = FileFacts::new(50, at(2023, 6, 1, 12, 0, 0));

    let bigger = RawSelectors {
        bigger: Some("500".into()),
        ..Default::default()
    }
    .resolve()
    .unwrap();
    assert!(bigger.select("a.txt", &a));
    assert!(!bigger.select("b.txt", &b));

    let window = RawSelectors {
        after: Some("20230301".into()),
        before: Some("20231231".into()),
        ..Default::default()
    }
    .resolve()
    .unwrap();
    assert!(!window.select("a.txt", &a));
    assert!(window.select("b.txt", &b));

    let inverted = RawSelectors {
        after: Some("20231231".into()),
        before: Some("20230101".into()),
        ..Default::default()
    }
    .resolve()
    .unwrap();
    assert!(!inverted.select("a.txt", &a));
    assert!(!inverted.select("b.txt", &b));
}

#[test]
fn test_pattern_matches_whole_name() {
    let selectors = SelectorSet::builder()
        .pattern(compile_pattern("a.*").unwrap())
        .build()
        .unwrap();
    let facts = FileFacts::new(1, at(2023, 1, 1, 0, 0, 0));

    assert!(selectors.select("abc.txt", &facts));
    assert!(!selectors.select("xabc.txt", &facts));

    let alternation = compile_pattern("a|b").unwrap();
    assert!(alternation.is_match("a"));
    assert!(alternation.is_match("b"));
    assert!(!alternation.is_match("ab"));
}

#[test]
fn test_size_bounds_are_inclusive() {
    let at_least = parse_size(OptionName::Bigger, "1k").unwrap();
    let at_most = parse_size(OptionName::Smaller, "1k").unwrap();

    assert!(at_least.admits_at_least(1024));
    assert!(!at_least.admits_at_least(1023));
    assert!(at_most.admits_at_most(1024));
    assert!(!at_most.admits_at_most(1025));
}

#[test]
fn test_datetime_bound_is_exact() {
    let before = parse_timestamp(OptionName::Before, "20230101T120000").unwrap();

    assert!(before.admits_before(at(2023, 1, 1, 12, 0, 0)));
    assert!(!before.admits_before(at(2023, 1, 1, 12, 0, 1)));
}

#[test]
fn test_bad_values_are_selector_errors() {
    assert!(matches!(
        parse_timestamp(OptionName::After, "2023"),
        Err(SelectorError::InvalidTimestamp { .. })
    ));
    assert!(matches!(
        parse_size(OptionName::Smaller, "12x"),
        Err(SelectorError::InvalidSize { .. })
    ));
    assert!(matches!(
        compile_pattern("(unclosed"),
        Err(SelectorError::InvalidPattern { .. })
    ));
}

#[test]
fn test_stats_and_selected_set() {
    let mut stats = Stats::new();
    stats.record_visit(10);
    stats.record_visit(20);
    stats.record_listed(20);
    assert_eq!(stats.files_visited, 2);
    assert_eq!(stats.bytes_visited, 30);
    assert_eq!(stats.files_listed, 1);
    assert_eq!(stats.bytes_listed, 20);

    let mut selected = SelectedSet::new();
    assert!(selected.insert(PathBuf::from("/b/x")));
    assert!(selected.insert(PathBuf::from("/a/y")));
    assert!(!selected.insert(PathBuf::from("/b/x")));

    let discovered: Vec<_> = selected.iter().collect();
    assert_eq!(discovered, [PathBuf::from("/b/x"), PathBuf::from("/a/y")]);
    assert_eq!(selected.sorted(), [PathBuf::from("/a/y"), PathBuf::from("/b/x")]);
}
