//! Integration tests for merging args with tilt_config.json.

mod common;

use std::collections::BTreeMap;

use chrono::Utc;
use common::{define, define_positional, settings, string_map, Fixture};
use tiltflags::config::FlagsState;
use tiltflags::script::{CallArgs, Value};

struct Case {
    name: &'static str,
    args: &'static [&'static str],
    config: Option<BTreeMap<String, Vec<String>>>,
    expected: BTreeMap<String, Vec<String>>,
    starting_state: FlagsState,
}

fn run_case(case: Case) {
    let f = Fixture::new(case.starting_state, case.args);
    if let Some(config) = &case.config {
        f.write_config(config);
    }

    let mut host = f.host();
    define(&mut host, "a");
    define(&mut host, "b");
    define_positional(&mut host, "c");
    let cfg = host.call("flags.parse", CallArgs::new()).unwrap();
    for name in ["a", "b", "c"] {
        let values = cfg.get_or(name, Value::List(vec![]));
        host.print(&[Value::from(format!("{name}={values}"))]);
    }
    let result = host.finish();

    let printed: Vec<String> = ["a", "b", "c"]
        .into_iter()
        .map(|name| {
            let expected = case.expected.get(name).cloned().unwrap_or_default();
            format!("{name}={}", Value::string_list(expected))
        })
        .collect();
    assert_eq!(result.lines(), printed.as_slice(), "{}: printed values", case.name);

    assert_eq!(f.config(), case.expected, "{}: persisted config", case.name);

    let returned: BTreeMap<String, Vec<String>> = ["a", "b", "c"]
        .into_iter()
        .filter_map(|name| {
            cfg.index(name)
                .ok()
                .and_then(Value::to_string_list)
                .map(|v| (name.to_string(), v))
        })
        .collect();
    assert_eq!(returned, case.expected, "{}: returned values", case.name);

    let state = settings(&result).flags_state;
    assert!(state.last_args_write.is_some(), "{}: last args write", case.name);
    if let Some(start) = case.starting_state.last_args_write {
        assert_eq!(state.last_args_write, Some(start), "{}: marker refreshed", case.name);
    }
}

#[test]
fn args_only() {
    run_case(Case {
        name: "args only",
        args: &["-a", "1", "-a", "2", "-b", "3", "-a", "4", "5", "6"],
        config: None,
        expected: string_map(&[("a", &["1", "2", "4"]), ("b", &["3"]), ("c", &["5", "6"])]),
        starting_state: FlagsState::default(),
    });
}

#[test]
fn config_only() {
    run_case(Case {
        name: "config only",
        args: &[],
        config: Some(string_map(&[("b", &["7", "8"]), ("c", &["9"])])),
        expected: string_map(&[("b", &["7", "8"]), ("c", &["9"])]),
        starting_state: FlagsState::default(),
    });
}

#[test]
fn args_trump_config() {
    run_case(Case {
        name: "args trump config",
        args: &["-a", "1", "-a", "2", "-a", "4", "5", "6"],
        config: Some(string_map(&[("b", &["7", "8"]), ("c", &["9"])])),
        expected: string_map(&[("a", &["1", "2", "4"]), ("b", &["7", "8"]), ("c", &["5", "6"])]),
        starting_state: FlagsState::default(),
    });
}

#[test]
fn args_ignored_if_already_written() {
    run_case(Case {
        name: "args ignored if already written",
        args: &["-a", "1", "-a", "2", "-a", "4", "5", "6"],
        config: Some(string_map(&[("b", &["7", "8"]), ("c", &["9"])])),
        expected: string_map(&[("b", &["7", "8"]), ("c", &["9"])]),
        starting_state: FlagsState::new(Some(Utc::now())),
    });
}

#[test]
fn second_run_ignores_new_args() {
    let f = Fixture::new(FlagsState::default(), &["-a", "1"]);
    let mut host = f.host();
    define(&mut host, "a");
    host.call("flags.parse", CallArgs::new()).unwrap();
    let first = settings(&host.finish()).flags_state;
    assert!(first.last_args_write.is_some());

    // Same project, next run, different args: the stored value sticks.
    let next = Fixture::new(first, &["-a", "2"]);
    next.write_config(&f.config());
    let mut host = next.host();
    define(&mut host, "a");
    let cfg = host.call("flags.parse", CallArgs::new()).unwrap();
    let result = host.finish();

    assert_eq!(cfg.index("a").unwrap(), &Value::string_list(["1"]));
    assert_eq!(next.config(), string_map(&[("a", &["1"])]));
    assert_eq!(settings(&result).flags_state, first);
}

#[test]
fn undefined_arg_in_config_file() {
    let f = Fixture::new(FlagsState::default(), &[]);
    f.file("tilt_config.json", r#"{"bar": "1"}"#);

    let mut host = f.host();
    define(&mut host, "foo");
    let err = host.call("flags.parse", CallArgs::new()).unwrap_err();
    assert!(err.to_string().contains("specified unknown flag name 'bar'"));

    // Config problems are not command-line problems: no usage text.
    assert!(!host.finish().output().contains("Usage:"));
}

#[test]
fn wrong_type_arg_in_config_file() {
    let f = Fixture::new(FlagsState::default(), &[]);
    f.file("tilt_config.json", r#"{"foo": "1"}"#);

    let mut host = f.host();
    define(&mut host, "foo");
    let err = host.call("flags.parse", CallArgs::new()).unwrap_err();
    assert!(err
        .to_string()
        .contains("specified invalid value for flag foo: expected array"));
}

#[test]
fn malformed_config_file_fails() {
    let f = Fixture::new(FlagsState::default(), &[]);
    f.file("tilt_config.json", "{not json");

    let mut host = f.host();
    define(&mut host, "foo");
    let err = host.call("flags.parse", CallArgs::new()).unwrap_err();
    assert!(err.to_string().contains("failed to parse config file"));
    assert_eq!(
        std::fs::read_to_string(f.join_path("tilt_config.json")).unwrap(),
        "{not json"
    );
}
