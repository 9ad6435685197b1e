//! # Command-line overlay.
//!
//! The toolbox shares the process command line with its host application. Its
//! own flags are picked out wherever they appear before a `--` terminator, then
//! parsed with `clap`; every other token belongs to the host:
//!
//! ```text
//! <bin> [HOST ARGS...] [--debug] [--log-level <LEVEL>] [--sess-name <NAME>] [HOST ARGS...] [-- HOST ARGS...]
//! ```
//!
//! - `--debug` turns debugging on and lowers `log_level` to `DEBUG`,
//!   unless `--log-level` is also given.
//! - `--log-level=<LEVEL>` and `--sess-name=<NAME>` are accepted too.
//! - After `--` nothing is interpreted; host tokens are kept (lossily, if not UTF-8).

use std::ffi::OsString;

use clap::Parser;

use crate::error::ConfigError;
use crate::severity::Severity;

#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(
    name = "ph-toolbox",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub(crate) struct CliArgs {
    /// Enable debugging (implies `--log-level DEBUG`).
    #[arg(long)]
    pub debug: bool,

    /// Minimum severity to log.
    #[arg(long = "log-level", value_name = "LEVEL", value_parser = parse_level)]
    pub log_level: Option<Severity>,

    /// Session name.
    #[arg(long = "sess-name", value_name = "NAME")]
    pub sess_name: Option<String>,

    /// Arguments owned by the host application, in order.
    #[arg(skip)]
    pub rest: Vec<String>,
}

/// Flags owned by the toolbox, with whether each one takes a value.
const TOOLBOX_FLAGS: [(&str, bool); 3] = [
    ("--debug", false),
    ("--log-level", true),
    ("--sess-name", true),
];

/// Splits `args` into the toolbox's own tokens (binary name first) and the host's.
fn split_toolbox_args(args: Vec<OsString>) -> (Vec<OsString>, Vec<String>) {
    let mut iter = args.into_iter();
    let mut own: Vec<OsString> = iter.next().into_iter().collect();
    let mut host = Vec::new();

    while let Some(arg) = iter.next() {
        let text = arg.to_string_lossy().into_owned();
        if text == "--" {
            host.extend(iter.by_ref().map(|a| a.to_string_lossy().into_owned()));
            break;
        }
        let (name, inline_value) = match text.split_once('=') {
            Some((name, _)) => (name, true),
            None => (text.as_str(), false),
        };
        match TOOLBOX_FLAGS.iter().find(|(flag, _)| *flag == name) {
            Some(&(_, takes_value)) => {
                own.push(arg);
                if takes_value && !inline_value {
                    own.extend(iter.next());
                }
            }
            None => host.push(text),
        }
    }
    (own, host)
}

fn parse_level(raw: &str) -> Result<Severity, String> {
    raw.parse::<Severity>().map_err(|e| e.to_string())
}

impl CliArgs {
    /// Parses `args`; the first item is the binary name.
    pub fn parse_from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let (own, host) = split_toolbox_args(args);
        let mut parsed =
            Self::try_parse_from(own).map_err(|e| ConfigError::InvalidArgs(e.to_string()))?;
        parsed.rest = host;
        Ok(parsed)
    }

    /// Level implied by the flags, if any.
    pub fn effective_log_level(&self) -> Option<Severity> {
        match (self.log_level, self.debug) {
            (Some(level), _) => Some(level),
            (None, true) => Some(Severity::Debug),
            (None, false) => None,
        }
    }
}
