//! Global configuration registry.
//!
//! ## Contents
//! - [`ConfigStore`] defaults + command-line overlay + runtime mutations, with tags
//! - [`ConfigValue`] typed values (`Bool`, `Int`, `Float`, `Str`, `Path`, `Level`)
//! - [`keys`]        names of the built-in settings
//! - [`config`]      shorthand for `ConfigStore::global().get(key)`
//!
//! ## Example
//! ```rust
//! use ph_toolbox::{ConfigStore, Severity};
//!
//! let cfg = ConfigStore::from_args(["app", "--debug", "--log-level", "WARNING"])?;
//! assert!(cfg.is_debug());
//! assert_eq!(cfg.log_level()?, Severity::Warning);
//!
//! cfg.set("db_host", "localhost");
//! cfg.set("db_port", 5432);
//! cfg.set_tag("db", ["db_host", "db_port"])?;
//! assert_eq!(cfg.get_tag("db")?.len(), 2);
//! # Ok::<(), ph_toolbox::ConfigError>(())
//! ```

mod args;
mod store;
mod value;

pub use store::ConfigStore;
pub use value::ConfigValue;

/// Names of the built-in settings.
pub mod keys {
    /// Session name (`--sess-name`), empty by default.
    pub const SESS_NAME: &str = "sess_name";
    /// Debugging switch (`--debug`).
    pub const DEBUG: &str = "debug";
    /// Minimum severity (`--log-level`), a [`Severity`](crate::Severity).
    pub const LOG_LEVEL: &str = "log_level";
    /// Working directory at initialization.
    pub const DIR_BASE: &str = "dir_base";
    /// `<dir_base>/src`.
    pub const DIR_SRC: &str = "dir_src";
    /// `<dir_src>/ph_toolbox`.
    pub const DIR_MODULE: &str = "dir_module";
}

/// Reads `key` from the process-wide store.
pub fn config(key: &str) -> Option<ConfigValue> {
    ConfigStore::global().get(key)
}
