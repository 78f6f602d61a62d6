use std::fmt;
use std::str::FromStr;

/// What the top level does when a recipe step exits non-zero.
///
/// Later steps of the recipe are skipped either way; this only decides the
/// process outcome.
///
/// - `Report`: log the failure and exit successfully (default).
/// - `Fail`: propagate the failure so the process exits with an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    #[default]
    Report,
    Fail,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "report" => Ok(FailurePolicy::Report),
            "fail" => Ok(FailurePolicy::Fail),
            other => Err(format!(
                "invalid failure policy: {other} (expected \"report\" or \"fail\")"
            )),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Report => f.write_str("report"),
            FailurePolicy::Fail => f.write_str("fail"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(" Fail ".parse::<FailurePolicy>(), Ok(FailurePolicy::Fail));
        assert_eq!("report".parse::<FailurePolicy>(), Ok(FailurePolicy::Report));
        assert!("ignore".parse::<FailurePolicy>().is_err());
    }
}
