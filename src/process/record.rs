//! One-line outcome records written to the log.

use std::fmt;

/// Component tag used by the process controller
pub const PROCESS_COMPONENT: &str = "process";

/// Action that was attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Activate,
    Terminate,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::Terminate => "terminate",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            Self::Activate => "activated",
            Self::Terminate => "terminated",
        }
    }
}

/// How an attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// `{component, verb, subject, result, timestamp}` flattened into one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeRecord {
    pub component: &'static str,
    pub verb: Verb,
    pub subject: String,
    pub outcome: Outcome,
    pub timestamp: String,
}

impl OutcomeRecord {
    pub fn new(verb: Verb, subject: impl Into<String>, outcome: Outcome, timestamp: impl Into<String>) -> Self {
        Self {
            component: PROCESS_COMPONENT,
            verb,
            subject: subject.into(),
            outcome,
            timestamp: timestamp.into(),
        }
    }
}

impl fmt::Display for OutcomeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] ", self.timestamp, self.component)?;
        match &self.outcome {
            Outcome::Success => write!(f, "{} has been {} successfully.", self.subject, self.verb.past_tense()),
            Outcome::Failure(message) => {
                // Records are line-oriented
                let message = message.replace(['\r', '\n'], " ");
                write!(f, "Error: could not {} {}: {}", self.verb.as_str(), self.subject, message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_line() {
        let record = OutcomeRecord::new(Verb::Activate, "notepad", Outcome::Success, "2024_03_07 09:05:02");
        assert_eq!(
            record.to_string(),
            "2024_03_07 09:05:02 [process] notepad has been activated successfully."
        );
    }

    #[test]
    fn test_failure_line() {
        let record = OutcomeRecord::new(
            Verb::Terminate,
            "notepad",
            Outcome::Failure("access denied".to_string()),
            "T",
        );
        assert_eq!(record.to_string(), "T [process] Error: could not terminate notepad: access denied");
    }

    #[test]
    fn test_failure_message_stays_on_one_line() {
        let record = OutcomeRecord::new(Verb::Activate, "x", Outcome::Failure("a\nb\r\nc".to_string()), "T");
        assert_eq!(record.to_string().lines().count(), 1);
    }
}
