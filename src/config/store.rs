//! # Config store.
//!
//! [`ConfigStore`] is a flat key → [`ConfigValue`] registry with named tags
//! (ordered groups of keys). It is filled lazily on first access:
//!
//! ```text
//! first access ──► defaults ──► command-line overlay ──► ready
//!                                                          │ set(), set_tag(), ...
//! delete() ──► empty; the next access initializes again ◄──┘
//! ```
//!
//! ## Defaults
//! - `sess_name = ""`
//! - `debug = false`
//! - `log_level = INFO`
//! - `dir_base = <current dir>`, `dir_src = <base>/src`, `dir_module = <base>/src/ph_toolbox`
//!
//! ## Argument sources
//! The process-wide store ([`ConfigStore::global`]) reads `std::env::args()` each
//! time it initializes; arguments that fail to parse are reported and the
//! defaults are kept. A store built with [`ConfigStore::from_args`] validates its
//! arguments up front and replays them on every re-initialization.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;

use crate::config::args::CliArgs;
use crate::config::keys;
use crate::config::value::ConfigValue;
use crate::error::ConfigError;
use crate::severity::Severity;

/// Directory name of this crate's sources under `dir_src`.
const MODULE_DIR: &str = "ph_toolbox";

static GLOBAL_CONFIG: Lazy<ConfigStore> = Lazy::new(ConfigStore::from_process);

#[derive(Debug, Clone)]
enum ArgSource {
    Process,
    Fixed(Vec<OsString>),
}

#[derive(Debug, Default)]
struct StoreState {
    values: BTreeMap<String, ConfigValue>,
    tags: BTreeMap<String, Vec<String>>,
}

impl StoreState {
    fn initialized(args: &CliArgs) -> Self {
        let base = std::env::current_dir().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "current directory unavailable; using \".\"");
            PathBuf::from(".")
        });
        let src = base.join("src");
        let module = src.join(MODULE_DIR);

        let mut values = BTreeMap::new();
        values.insert(keys::SESS_NAME.to_string(), ConfigValue::from(""));
        values.insert(keys::DEBUG.to_string(), ConfigValue::Bool(false));
        values.insert(keys::LOG_LEVEL.to_string(), ConfigValue::Level(Severity::Info));
        values.insert(keys::DIR_BASE.to_string(), ConfigValue::Path(base));
        values.insert(keys::DIR_SRC.to_string(), ConfigValue::Path(src));
        values.insert(keys::DIR_MODULE.to_string(), ConfigValue::Path(module));

        if args.debug {
            values.insert(keys::DEBUG.to_string(), ConfigValue::Bool(true));
        }
        if let Some(level) = args.effective_log_level() {
            values.insert(keys::LOG_LEVEL.to_string(), ConfigValue::Level(level));
        }
        if let Some(name) = &args.sess_name {
            values.insert(keys::SESS_NAME.to_string(), ConfigValue::from(name.as_str()));
        }

        Self {
            values,
            tags: BTreeMap::new(),
        }
    }

    fn check_keys(&self, tag: &str, keys: &[String]) -> Result<(), ConfigError> {
        match keys.iter().find(|k| !self.values.contains_key(*k)) {
            Some(missing) => Err(ConfigError::UnknownKey {
                tag: tag.to_string(),
                key: missing.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Global-or-explicit configuration registry.
#[derive(Debug)]
pub struct ConfigStore {
    source: ArgSource,
    state: Mutex<Option<StoreState>>,
}

impl ConfigStore {
    fn from_process() -> Self {
        Self {
            source: ArgSource::Process,
            state: Mutex::new(None),
        }
    }

    /// Returns the process-wide store.
    pub fn global() -> &'static ConfigStore {
        &GLOBAL_CONFIG
    }

    /// Builds a store from an explicit command line (first item: binary name).
    ///
    /// ### Errors
    /// [`ConfigError::InvalidArgs`] if the arguments do not parse.
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let parsed = CliArgs::parse_from_args(args.clone())?;
        Ok(Self {
            source: ArgSource::Fixed(args),
            state: Mutex::new(Some(StoreState::initialized(&parsed))),
        })
    }

    fn parse_source(&self) -> CliArgs {
        let parsed = match &self.source {
            ArgSource::Process => CliArgs::parse_from_args(std::env::args_os()),
            ArgSource::Fixed(args) => CliArgs::parse_from_args(args.clone()),
        };
        parsed.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring command line; using config defaults");
            CliArgs::default()
        })
    }

    /// Runs `f` on the state under the lock, initializing it first if needed.
    fn with_state<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let state = guard.get_or_insert_with(|| {
            tracing::debug!("config store initialized");
            StoreState::initialized(&self.parse_source())
        });
        f(state)
    }

    /// Initializes now if the store is empty; a no-op otherwise.
    pub fn initialize(&self) {
        self.with_state(|_| ());
    }

    /// Empties the store. The next access initializes it again.
    pub fn delete(&self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = None;
        tracing::debug!("config store deleted");
    }

    /// Snapshot of every key and value.
    pub fn all(&self) -> BTreeMap<String, ConfigValue> {
        self.with_state(|s| s.values.clone())
    }

    /// Value of `key`, or `None` when absent.
    pub fn get(&self, key: &str) -> Option<ConfigValue> {
        self.with_state(|s| s.values.get(key).cloned())
    }

    /// Value of `key`, or `default` when absent.
    pub fn get_or(&self, key: &str, default: impl Into<ConfigValue>) -> ConfigValue {
        self.get(key).unwrap_or_else(|| default.into())
    }

    /// ### Errors
    /// [`ConfigError::MissingValue`] when absent.
    pub fn get_required(&self, key: &str) -> Result<ConfigValue, ConfigError> {
        self.get(key).ok_or_else(|| ConfigError::MissingValue {
            key: key.to_string(),
        })
    }

    /// Value of `key` passed through `formatter`; `None` when absent.
    ///
    /// ### Errors
    /// [`ConfigError::Format`] if the formatter rejects the value.
    pub fn get_with<T, E, F>(&self, key: &str, formatter: F) -> Result<Option<T>, ConfigError>
    where
        F: FnOnce(&ConfigValue) -> Result<T, E>,
        E: std::fmt::Display,
    {
        match self.get(key) {
            None => Ok(None),
            Some(value) => formatter(&value).map(Some).map_err(|e| ConfigError::Format {
                key: key.to_string(),
                value: value.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Value of `key` parsed from its string form; `None` when absent.
    ///
    /// ```rust
    /// use ph_toolbox::ConfigStore;
    ///
    /// let cfg = ConfigStore::from_args(["app"])?;
    /// cfg.set("new_param", "100");
    /// assert_eq!(cfg.get_as::<i64>("new_param")?, Some(100));
    /// # Ok::<(), ph_toolbox::ConfigError>(())
    /// ```
    pub fn get_as<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get_with(key, |v| v.to_string().parse::<T>())
    }

    /// Like [`ConfigStore::get_as`], failing with `MissingValue` when absent.
    pub fn get_required_as<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get_as(key)?.ok_or_else(|| ConfigError::MissingValue {
            key: key.to_string(),
        })
    }

    /// Inserts or overwrites `key`.
    pub fn set(&self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        let key = key.into();
        let value = value.into();
        tracing::trace!(key = %key, value = %value, "config value set");
        self.with_state(|s| s.values.insert(key, value));
    }

    /// `debug` flag; `false` if unset or not a boolean.
    pub fn is_debug(&self) -> bool {
        self.get(keys::DEBUG)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    /// The `log_level` setting on the shared severity scale.
    ///
    /// ### Errors
    /// `MissingValue` if unset, `Format` if the value is not a level.
    pub fn log_level(&self) -> Result<Severity, ConfigError> {
        let value = self.get_required(keys::LOG_LEVEL)?;
        value.as_level().ok_or_else(|| ConfigError::Format {
            key: keys::LOG_LEVEL.to_string(),
            value: value.to_string(),
            reason: "not a severity level".to_string(),
        })
    }

    /// Creates or replaces `tag` with `keys` (duplicates dropped, order kept).
    ///
    /// ### Errors
    /// [`ConfigError::UnknownKey`] if a key is not in the store.
    pub fn set_tag<I, K>(&self, tag: &str, keys: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let keys = dedup(keys.into_iter().map(Into::into));
        self.with_state(|s| {
            s.check_keys(tag, &keys)?;
            s.tags.insert(tag.to_string(), keys);
            Ok(())
        })
    }

    /// Appends `keys` to an existing tag, skipping keys it already holds.
    ///
    /// ### Errors
    /// [`ConfigError::UnknownTag`] or [`ConfigError::UnknownKey`]; the tag is
    /// left untouched on error.
    pub fn extend_tag<I, K>(&self, tag: &str, keys: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let keys = dedup(keys.into_iter().map(Into::into));
        self.with_state(|s| {
            if !s.tags.contains_key(tag) {
                return Err(ConfigError::UnknownTag {
                    tag: tag.to_string(),
                });
            }
            s.check_keys(tag, &keys)?;
            if let Some(existing) = s.tags.get_mut(tag) {
                for key in keys {
                    if !existing.contains(&key) {
                        existing.push(key);
                    }
                }
            }
            Ok(())
        })
    }

    /// `(key, value)` pairs of the keys grouped under `tag`, in tag order.
    ///
    /// ### Errors
    /// [`ConfigError::UnknownTag`] if the tag was never set.
    pub fn get_tag(&self, tag: &str) -> Result<Vec<(String, ConfigValue)>, ConfigError> {
        self.with_state(|s| {
            let keys = s.tags.get(tag).ok_or_else(|| ConfigError::UnknownTag {
                tag: tag.to_string(),
            })?;
            Ok(keys
                .iter()
                .filter_map(|k| s.values.get(k).map(|v| (k.clone(), v.clone())))
                .collect())
        })
    }

    /// Keys grouped under `tag`, in tag order.
    pub fn tag_keys(&self, tag: &str) -> Option<Vec<String>> {
        self.with_state(|s| s.tags.get(tag).cloned())
    }
}

fn dedup(keys: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for key in keys {
        if !out.contains(&key) {
            out.push(key);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ConfigStore {
        ConfigStore::from_args(["config.py"]).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = store();
        let base = std::env::current_dir().unwrap();
        assert_eq!(cfg.get(keys::SESS_NAME), Some(ConfigValue::from("")));
        assert_eq!(cfg.get(keys::DEBUG), Some(ConfigValue::Bool(false)));
        assert_eq!(cfg.log_level().unwrap(), Severity::Info);
        assert_eq!(cfg.get(keys::DIR_BASE), Some(ConfigValue::Path(base.clone())));
        assert_eq!(
            cfg.get(keys::DIR_MODULE),
            Some(ConfigValue::Path(base.join("src").join("ph_toolbox")))
        );
        assert_eq!(cfg.all().len(), 6);
    }

    #[test]
    fn test_missing_values() {
        let cfg = store();
        assert_eq!(cfg.get("param_not_exists"), None);
        assert_eq!(cfg.get_or("param_not_exists", true), ConfigValue::Bool(true));
        assert_eq!(
            cfg.get_or("param_not_exists", "testing"),
            ConfigValue::from("testing")
        );
        assert_eq!(
            cfg.get_required("param_not_exists"),
            Err(ConfigError::MissingValue {
                key: "param_not_exists".into()
            })
        );
    }

    #[test]
    fn test_formatter() {
        let cfg = store();
        cfg.set("new_param", "100");
        assert_eq!(cfg.get_required("new_param").unwrap(), ConfigValue::from("100"));
        assert_eq!(cfg.get_required_as::<i64>("new_param").unwrap(), 100);

        cfg.set("bad", "abc");
        let err = cfg.get_as::<i64>("bad").unwrap_err();
        assert_eq!(err.as_label(), "config_format");

        let doubled = cfg
            .get_with("new_param", |v| v.to_string().parse::<i64>().map(|n| n * 2))
            .unwrap();
        assert_eq!(doubled, Some(200));
    }

    #[test]
    fn test_delete_reinitializes_from_same_args() {
        let cfg = ConfigStore::from_args(["app", "--debug"]).unwrap();
        cfg.set("new_param", "testing");
        cfg.delete();

        assert_eq!(cfg.get("new_param"), None);
        assert!(cfg.is_debug());
        assert_eq!(cfg.log_level().unwrap(), Severity::Debug);
    }

    #[test]
    fn test_log_level_accepts_string_value() {
        let cfg = store();
        cfg.set(keys::LOG_LEVEL, "error");
        assert_eq!(cfg.log_level().unwrap(), Severity::Error);

        cfg.set(keys::LOG_LEVEL, 3);
        assert_eq!(cfg.log_level().unwrap_err().as_label(), "config_format");
    }

    #[test]
    fn test_tag_dedup_and_order() {
        let cfg = store();
        cfg.set("a", 1);
        cfg.set("b", 2);
        cfg.set_tag("t", ["b", "a", "b"]).unwrap();
        cfg.extend_tag("t", ["a", "debug"]).unwrap();
        assert_eq!(cfg.tag_keys("t").unwrap(), vec!["b", "a", "debug"]);
    }

    #[test]
    fn test_get_tag_keeps_tag_order() {
        let cfg = store();
        cfg.set("zeta", 1);
        cfg.set("alpha", 2);
        cfg.set_tag("t", ["zeta", "alpha"]).unwrap();

        let keys: Vec<String> = cfg.get_tag("t").unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_set_after_delete_is_kept() {
        let cfg = store();
        cfg.delete();
        cfg.set("late", "value");
        assert_eq!(cfg.get("late"), Some(ConfigValue::from("value")));
        assert_eq!(cfg.get(keys::LOG_LEVEL), Some(ConfigValue::Level(Severity::Info)));
    }

    #[test]
    fn test_flags_after_host_args_apply() {
        let cfg = ConfigStore::from_args(["app", "serve", "--debug"]).unwrap();
        assert!(cfg.is_debug());
        assert_eq!(cfg.log_level().unwrap(), Severity::Debug);
    }

    #[test]
    fn test_failed_extend_leaves_tag_untouched() {
        let cfg = store();
        cfg.set("a", 1);
        cfg.set_tag("t", ["a"]).unwrap();
        assert!(cfg.extend_tag("t", ["debug", "missing"]).is_err());
        assert_eq!(cfg.tag_keys("t").unwrap(), vec!["a"]);
    }

    #[test]
    fn test_invalid_args_rejected_up_front() {
        let err = ConfigStore::from_args(["app", "--log-level", "LOUD"]).unwrap_err();
        assert_eq!(err.as_label(), "config_invalid_args");
    }
}
