//! Signal specifications passed to `terminate`.
//!
//! A signal is either a raw number or a symbolic name. Resolution against the
//! platform's signal table happens in the runtime crate.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A numeric or named signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalSpec {
    /// Raw signal number. `0` is the null (probe) signal.
    Number(i32),
    /// Symbolic name such as `"SIGTERM"`, `"TERM"` or `"term"`.
    Name(String),
}

impl SignalSpec {
    /// The name in canonical form: upper-case with the `SIG` prefix.
    ///
    /// Returns `None` for numeric specs.
    pub fn canonical_name(&self) -> Option<String> {
        match self {
            Self::Number(_) => None,
            Self::Name(name) => {
                let upper = name.trim().to_ascii_uppercase();
                if upper.starts_with("SIG") {
                    Some(upper)
                } else {
                    Some(format!("SIG{upper}"))
                }
            }
        }
    }
}

impl Default for SignalSpec {
    fn default() -> Self {
        Self::Name("SIGTERM".to_string())
    }
}

impl fmt::Display for SignalSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<i32> for SignalSpec {
    fn from(n: i32) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for SignalSpec {
    fn from(s: &str) -> Self {
        match s.trim().parse::<i32>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Name(s.trim().to_string()),
        }
    }
}

impl From<String> for SignalSpec {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

/// Decimal text becomes `Number`, anything else `Name`.
impl FromStr for SignalSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}
