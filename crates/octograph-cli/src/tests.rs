use super::*;

#[test]
fn parses_fetch_with_year() {
    let cli = Cli::try_parse_from(["octograph", "fetch", "octocat", "--year", "2024"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Fetch {
            ref username,
            span: SpanArgs { year: Some(2024), from: None, to: None },
            cache_duration: None,
            ..
        }) if username == "octocat"
    ));
}

#[test]
fn parses_fetch_with_range_and_cache_duration() {
    let cli = Cli::try_parse_from([
        "octograph",
        "fetch",
        "octocat",
        "--from",
        "2024-03-01",
        "--to",
        "2024-05-31",
        "--cache-duration",
        "1h",
        "--json",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Fetch {
        span,
        cache_duration,
        output,
        ..
    }) = cli.command
    else {
        panic!("expected fetch command");
    };
    assert_eq!(span.from, NaiveDate::from_ymd_opt(2024, 3, 1));
    assert_eq!(span.to, NaiveDate::from_ymd_opt(2024, 5, 31));
    assert_eq!(cache_duration.as_deref(), Some("1h"));
    assert!(output.json);
}

#[test]
fn year_conflicts_with_range() {
    let result = Cli::try_parse_from([
        "octograph",
        "fetch",
        "octocat",
        "--year",
        "2024",
        "--from",
        "2024-01-01",
        "--to",
        "2024-02-01",
    ]);
    assert!(result.is_err());
}

#[test]
fn from_requires_to() {
    let result = Cli::try_parse_from(["octograph", "fetch", "octocat", "--from", "2024-01-01"]);
    assert!(result.is_err());
}

#[test]
fn rejects_malformed_date() {
    let result = Cli::try_parse_from([
        "octograph", "fetch", "octocat", "--from", "01/02/2024", "--to", "2024-02-01",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_demo_defaults() {
    let cli = Cli::try_parse_from(["octograph", "demo"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Demo {
            year: None,
            seed: None,
            ..
        })
    ));
}

#[test]
fn parses_process_file() {
    let cli = Cli::try_parse_from(["octograph", "process", "calendar.json", "--dark"])
        .expect("expected valid cli args");
    let Some(Commands::Process { file, output, .. }) = cli.command else {
        panic!("expected process command");
    };
    assert_eq!(file, PathBuf::from("calendar.json"));
    assert!(output.dark);
}

#[test]
fn parses_themes_mode() {
    let cli = Cli::try_parse_from(["octograph", "themes", "--mode", "dark"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Themes {
            mode: ModeArg::Dark
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["octograph"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn span_prefers_explicit_range() {
    let span = SpanArgs {
        year: None,
        from: NaiveDate::from_ymd_opt(2024, 1, 1),
        to: NaiveDate::from_ymd_opt(2024, 1, 31),
    };
    let range = span.to_span(2020).unwrap().resolve().unwrap();
    assert_eq!(range.num_days(), 31);
}

#[test]
fn span_falls_back_to_default_year() {
    let span = SpanArgs::default();
    assert_eq!(span.to_span(2019).unwrap(), CalendarSpan::Year(2019));
}

#[test]
fn inverted_range_is_an_error() {
    let span = SpanArgs {
        year: None,
        from: NaiveDate::from_ymd_opt(2024, 2, 1),
        to: NaiveDate::from_ymd_opt(2024, 1, 1),
    };
    assert!(span.to_span(2024).is_err());
}

#[test]
fn latest_year_comes_from_the_newest_day() {
    let calendar = generate_mock_calendar(2022, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(latest_year(&calendar), Some(2022));
}

#[test]
fn mode_arg_maps_to_theme_mode() {
    assert_eq!(ThemeMode::from(ModeArg::Dark), ThemeMode::Dark);
    assert_eq!(ThemeMode::from(ModeArg::Light), ThemeMode::Light);
}

#[test]
fn malformed_cache_duration_flag_is_rejected() {
    let err = load_fetch_config(Some("1 hour")).unwrap_err();
    assert!(err.to_string().contains("--cache-duration"));
}

#[test]
fn offline_commands_run_without_config() {
    let output = OutputArgs {
        json: true,
        ..OutputArgs::default()
    };
    assert!(run_demo(Some(2024), Some(7), &output).is_ok());
    run_themes(ThemeMode::Dark);
}
