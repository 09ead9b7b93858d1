use super::*;
use pretty_assertions::assert_eq;

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn defaults_without_flags() {
    let (options, lines) = parse_options(&args(&["x <- 1", "y <- 2"])).unwrap();
    assert_eq!(options, CliOptions::default());
    assert_eq!(lines, args(&["x <- 1", "y <- 2"]));
}

#[test]
fn all_flags() {
    let (options, lines) = parse_options(&args(&[
        "--kind=case:3",
        "--keywords=de.properties",
        "--no-unify",
        "--max-width=60",
        "--color=never",
        "--vars",
        "wahl",
    ]))
    .unwrap();
    assert_eq!(
        options,
        CliOptions {
            kind: ElementKind::Case { lines: 3 },
            keywords: Some(PathBuf::from("de.properties")),
            unify: false,
            max_width: Some(60),
            color: ColorMode::Never,
            show_variables: true,
        }
    );
    assert_eq!(lines, args(&["wahl"]));
}

#[test]
fn double_dash_ends_options() {
    let (_, lines) = parse_options(&args(&["--", "--x", "a"])).unwrap();
    assert_eq!(lines, args(&["--x", "a"]));
}

#[test]
fn bad_flags() {
    assert_eq!(
        parse_options(&args(&["--max-width=wide"])).unwrap_err(),
        OptionError::Width("wide".to_owned())
    );
    assert_eq!(
        parse_options(&args(&["--color=sometimes"])).unwrap_err(),
        OptionError::Color("sometimes".to_owned())
    );
    assert_eq!(
        parse_options(&args(&["--verbose"])).unwrap_err(),
        OptionError::Unknown("--verbose".to_owned())
    );
    assert!(matches!(
        parse_options(&args(&["--kind=loop"])),
        Err(OptionError::Kind(_))
    ));
}
