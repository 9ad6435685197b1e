use std::path::PathBuf;

use ph_toolbox::{config, keys, ConfigError, ConfigStore, ConfigValue, Severity};

fn store(args: &[&str]) -> ConfigStore {
    let mut argv = vec!["config_test"];
    argv.extend_from_slice(args);
    ConfigStore::from_args(argv).unwrap()
}

#[test]
fn test_cli_params() {
    // (args, debug, log_level)
    let cases: &[(&[&str], bool, Severity)] = &[
        (&[], false, Severity::Info),
        (&["--"], false, Severity::Info),
        (&["--debug"], true, Severity::Debug),
        (&["--log-level", "INFO"], false, Severity::Info),
        (&["--debug", "--log-level", "INFO"], true, Severity::Info),
        (&["--log-level", "WARNING", "--debug"], true, Severity::Warning),
        (&["--log-level", "error"], false, Severity::Error),
        (&["--debug", "--", "--log-level", "ERROR"], true, Severity::Debug),
        (&["--verbose", "--debug"], true, Severity::Debug),
        (&["serve", "--debug"], true, Severity::Debug),
        (&["serve", "--port", "80", "--log-level", "CRITICAL"], false, Severity::Critical),
        (&["--log-level=warning", "--verbose"], false, Severity::Warning),
    ];

    for (args, debug, level) in cases {
        let cfg = store(args);
        assert_eq!(cfg.is_debug(), *debug, "debug for {args:?}");
        assert_eq!(cfg.log_level().unwrap(), *level, "log_level for {args:?}");
    }
}

#[test]
fn test_sess_name_flag() {
    assert_eq!(store(&[]).get(keys::SESS_NAME), Some(ConfigValue::from("")));
    assert_eq!(
        store(&["--sess-name", "nightly"]).get(keys::SESS_NAME),
        Some(ConfigValue::from("nightly"))
    );
    assert_eq!(
        store(&["run", "--fast", "--sess-name", "nightly"]).get(keys::SESS_NAME),
        Some(ConfigValue::from("nightly"))
    );
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let err = ConfigStore::from_args(["config_test", "--log-level", "LOUD"]).unwrap_err();
    assert_eq!(err.as_label(), "config_invalid_args");
}

#[test]
fn test_directory_defaults() {
    let cfg = store(&[]);
    let base = cfg.get(keys::DIR_BASE).unwrap();
    let base: PathBuf = base.as_path().unwrap().to_path_buf();

    assert_eq!(
        cfg.get(keys::DIR_SRC).unwrap().as_path(),
        Some(base.join("src").as_path())
    );
    assert_eq!(
        cfg.get(keys::DIR_MODULE).unwrap().as_path(),
        Some(base.join("src").join("ph_toolbox").as_path())
    );
}

#[test]
fn test_missing_values() {
    let cfg = store(&[]);
    assert_eq!(cfg.get("param_not_exists"), None);
    assert_eq!(cfg.get_or("param_not_exists", 10), ConfigValue::Int(10));
    assert_eq!(
        cfg.get_required("param_not_exists"),
        Err(ConfigError::MissingValue {
            key: "param_not_exists".to_string()
        })
    );
}

#[test]
fn test_set_and_formatter() {
    let cfg = store(&[]);
    cfg.set("new_param", "100");

    assert_eq!(cfg.get("new_param"), Some(ConfigValue::from("100")));
    assert_eq!(cfg.get_as::<i64>("new_param").unwrap(), Some(100));
    assert_eq!(cfg.get_required_as::<u16>("new_param").unwrap(), 100);
    assert_eq!(
        cfg.get_with("new_param", |v| v.to_string().parse::<f64>()).unwrap(),
        Some(100.0)
    );

    cfg.set("new_param", "not a number");
    let err = cfg.get_as::<i64>("new_param").unwrap_err();
    assert_eq!(err.as_label(), "config_format");
}

#[test]
fn test_delete_reinitializes_from_args() {
    let cfg = store(&["--debug"]);
    cfg.set(keys::DEBUG, false);
    cfg.set("extra", 1);
    assert!(!cfg.is_debug());

    cfg.delete();

    assert!(cfg.is_debug());
    assert_eq!(cfg.get("extra"), None);
}

#[test]
fn test_tagging() {
    let cfg = store(&[]);
    cfg.set("db_host", "localhost");
    cfg.set("db_port", 5432);
    cfg.set("db_user", "admin");

    cfg.set_tag("db", ["db_port", "db_host"]).unwrap();
    assert_eq!(
        cfg.get_tag("db").unwrap(),
        vec![
            ("db_port".to_string(), ConfigValue::Int(5432)),
            ("db_host".to_string(), ConfigValue::from("localhost")),
        ]
    );

    cfg.extend_tag("db", ["db_port", "db_user"]).unwrap();
    assert_eq!(
        cfg.tag_keys("db").unwrap(),
        vec!["db_port", "db_host", "db_user"]
    );

    // Values are read at lookup time.
    cfg.set("db_host", "db.internal");
    assert_eq!(
        cfg.get_tag("db").unwrap()[1],
        ("db_host".to_string(), ConfigValue::from("db.internal"))
    );

    cfg.set_tag("db", ["db_user"]).unwrap();
    assert_eq!(cfg.tag_keys("db").unwrap(), vec!["db_user"]);
}

#[test]
fn test_tag_errors() {
    let cfg = store(&[]);
    cfg.set("db_host", "localhost");

    assert!(matches!(
        cfg.get_tag("not_existing_tag"),
        Err(ConfigError::UnknownTag { .. })
    ));
    assert!(matches!(
        cfg.extend_tag("not_existing_tag", ["db_host"]),
        Err(ConfigError::UnknownTag { .. })
    ));
    assert!(matches!(
        cfg.set_tag("db", ["db_host", "db_pass"]),
        Err(ConfigError::UnknownKey { .. })
    ));
    assert_eq!(cfg.tag_keys("db"), None);

    cfg.set_tag("db", ["db_host"]).unwrap();
    assert!(matches!(
        cfg.extend_tag("db", ["db_pass"]),
        Err(ConfigError::UnknownKey { .. })
    ));
    assert_eq!(cfg.tag_keys("db").unwrap(), vec!["db_host"]);
}

// The only test touching the process-wide store.
#[test]
fn test_global_shorthand() {
    let global = ConfigStore::global();
    global.delete();

    assert_eq!(config("global_param_not_exists"), None);
    assert!(config(keys::LOG_LEVEL).is_some());

    global.set("global_param", "value");
    assert_eq!(config("global_param"), Some(ConfigValue::from("value")));

    global.delete();
    assert_eq!(config("global_param"), None);
}
