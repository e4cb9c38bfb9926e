//! Severity type definitions
//!
//! A severity is the coarse category of a log call. The fine-grained numeric
//! `level` on each event ranks verbosity: lower values are shown more readily.
//! Trace defaults to a high (low-priority) level so trace output stays hidden
//! unless verbosity is explicitly raised.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default level for debug/info/error/exception events
pub const DEFAULT_LEVEL: i64 = 0;

/// Default level for trace events
pub const TRACE_LEVEL: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    #[default]
    Info,
    Trace,
    Error,
    Exception,
}

impl Severity {
    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Trace => "TRACE",
            Severity::Error => "ERROR",
            Severity::Exception => "EXCEPTION",
        }
    }

    /// Default verbosity level assigned when the caller supplies none
    pub fn default_level(&self) -> i64 {
        match self {
            Severity::Trace => TRACE_LEVEL,
            _ => DEFAULT_LEVEL,
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::Debug => Blue,
            Severity::Info => Green,
            Severity::Trace => BrightBlack,
            Severity::Error => Red,
            Severity::Exception => BrightRed,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "TRACE" => Ok(Severity::Trace),
            "ERROR" => Ok(Severity::Error),
            "EXCEPTION" => Ok(Severity::Exception),
            _ => Err(format!("Invalid severity: '{}'", s)),
        }
    }
}
