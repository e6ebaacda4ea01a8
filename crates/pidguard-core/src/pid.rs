//! Process identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PidFileError;

/// An OS process identifier.
///
/// Not range-checked beyond fitting in the platform `pid_t`; the OS decides
/// what a valid target is when a signal is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(i32);

impl ProcessId {
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// PID of the calling process.
    #[allow(clippy::cast_possible_wrap)]
    pub fn current() -> Self {
        Self(std::process::id() as i32)
    }

    pub const fn as_raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ProcessId {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl TryFrom<u32> for ProcessId {
    type Error = PidFileError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        i32::try_from(raw)
            .map(Self)
            .map_err(|_| PidFileError::InvalidPid(raw.to_string()))
    }
}

/// Parses decimal text. Surrounding whitespace (including the trailing
/// newline of a PID file) is ignored.
impl FromStr for ProcessId {
    type Err = PidFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i32>()
            .map(Self)
            .map_err(|_| PidFileError::InvalidPid(s.to_string()))
    }
}

/// Anything a caller may hand over as a PID: an integer or its decimal text.
pub trait IntoPid {
    fn into_pid(self) -> Result<ProcessId, PidFileError>;
}

impl IntoPid for ProcessId {
    fn into_pid(self) -> Result<ProcessId, PidFileError> {
        Ok(self)
    }
}

impl IntoPid for i32 {
    fn into_pid(self) -> Result<ProcessId, PidFileError> {
        Ok(ProcessId(self))
    }
}

impl IntoPid for u32 {
    fn into_pid(self) -> Result<ProcessId, PidFileError> {
        ProcessId::try_from(self)
    }
}

impl IntoPid for &str {
    fn into_pid(self) -> Result<ProcessId, PidFileError> {
        self.parse()
    }
}

impl IntoPid for &String {
    fn into_pid(self) -> Result<ProcessId, PidFileError> {
        self.parse()
    }
}

impl IntoPid for String {
    fn into_pid(self) -> Result<ProcessId, PidFileError> {
        self.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pid_file_content() {
        let pid: ProcessId = "4242\n".parse().expect("parse failed");
        assert_eq!(pid.as_raw(), 4242);
        assert_eq!(pid.to_string(), "4242");
    }

    #[test]
    fn rejects_non_numeric_text() {
        let err = "not-a-pid".parse::<ProcessId>().unwrap_err();
        assert!(matches!(err, PidFileError::InvalidPid(ref s) if s == "not-a-pid"));

        assert!("".parse::<ProcessId>().is_err());
        assert!("12 34".parse::<ProcessId>().is_err());
    }

    #[test]
    fn u32_out_of_range_is_invalid() {
        assert!(ProcessId::try_from(u32::MAX).is_err());
        assert_eq!(ProcessId::try_from(17_u32).unwrap(), ProcessId::new(17));
    }

    #[test]
    fn into_pid_accepts_numbers_and_text() {
        assert_eq!(7_i32.into_pid().unwrap(), ProcessId::new(7));
        assert_eq!(7_u32.into_pid().unwrap(), ProcessId::new(7));
        assert_eq!(" 7 ".into_pid().unwrap(), ProcessId::new(7));
        assert_eq!(String::from("7").into_pid().unwrap(), ProcessId::new(7));
        assert!("seven".into_pid().is_err());
    }

    #[test]
    fn current_matches_std() {
        assert_eq!(
            ProcessId::current().to_string(),
            std::process::id().to_string()
        );
    }
}
