//! # Typed config values.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::severity::Severity;

/// One value held by the config store.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// Flag such as `debug`.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Free text; also what typed lookups parse from.
    Str(String),
    /// Filesystem path such as `dir_base`.
    Path(PathBuf),
    /// Shares the event bus scale.
    Level(Severity),
}

impl ConfigValue {
    /// The value of a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The value of an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// A `Float`, or an `Int` widened to `f64`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(f) => Some(*f),
            ConfigValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The text of a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The path of a `Path`.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            ConfigValue::Path(p) => Some(p),
            _ => None,
        }
    }

    /// A `Level`, or a `Str` naming a level.
    pub fn as_level(&self) -> Option<Severity> {
        match self {
            ConfigValue::Level(level) => Some(*level),
            ConfigValue::Str(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{b}"),
            ConfigValue::Int(i) => write!(f, "{i}"),
            ConfigValue::Float(x) => write!(f, "{x}"),
            ConfigValue::Str(s) => f.write_str(s),
            ConfigValue::Path(p) => write!(f, "{}", p.display()),
            ConfigValue::Level(level) => write!(f, "{level}"),
        }
    }
}

macro_rules! impl_from {
    ($($t:ty => $variant:ident($conv:expr)),* $(,)?) => {
        $(
            impl From<$t> for ConfigValue {
                fn from(v: $t) -> Self {
                    ConfigValue::$variant($conv(v))
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool(std::convert::identity),
    i64 => Int(std::convert::identity),
    i32 => Int(i64::from),
    u32 => Int(i64::from),
    f64 => Float(std::convert::identity),
    String => Str(std::convert::identity),
    &str => Str(str::to_owned),
    PathBuf => Path(std::convert::identity),
    &Path => Path(Path::to_path_buf),
    Severity => Level(std::convert::identity),
}
