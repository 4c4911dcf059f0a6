/// Job status definitions for tracking analysis progress
///
/// This module defines all possible states an analysis job can be in, and
/// which transitions between them are legal.
use std::fmt;

/// Represents the current state of an analysis job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    /// Job has been submitted and is waiting for a worker
    Queued,

    /// Job has been picked up and analysis is in progress
    Running,

    /// Analysis finished and all link probes completed
    Done,

    /// Analysis failed (bad URL or primary fetch failure)
    Error,
}

impl JobStatus {
    /// Returns true if this is a terminal state (no further transitions)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }

    /// Returns true if the transition from `self` to `next` is legal
    ///
    /// Transitions move strictly forward: Queued -> Running -> {Done, Error}.
    /// Terminal states accept no transitions, and Running is never skipped.
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (Self::Queued, Self::Running)
                | (Self::Running, Self::Done)
                | (Self::Running, Self::Error)
        )
    }

    /// Returns the status label used in result records and API payloads
    pub fn label(&self) -> &'static str {
        match self {
            Self::Queued => "Queued",
            Self::Running => "Running",
            Self::Done => "Done",
            Self::Error => "Error",
        }
    }

    /// Parses a status from its label
    ///
    /// Returns None if the string doesn't match any known status.
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "Queued" => Some(Self::Queued),
            "Running" => Some(Self::Running),
            "Done" => Some(Self::Done),
            "Error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_terminal() {
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Running.is_terminal());

        assert!(JobStatus::Done.is_terminal());
        assert!(JobStatus::Error.is_terminal());
    }

    #[test]
    fn test_legal_transitions() {
        assert!(JobStatus::Queued.can_transition_to(JobStatus::Running));
        assert!(JobStatus::Running.can_transition_to(JobStatus::Done));
        assert!(JobStatus::Running.can_transition_to(JobStatus::Error));
    }

    #[test]
    fn test_running_cannot_be_skipped() {
        assert!(!JobStatus::Queued.can_transition_to(JobStatus::Done));
        assert!(!JobStatus::Queued.can_transition_to(JobStatus::Error));
    }

    #[test]
    fn test_no_regressions() {
        assert!(!JobStatus::Running.can_transition_to(JobStatus::Queued));
        assert!(!JobStatus::Done.can_transition_to(JobStatus::Running));
        assert!(!JobStatus::Error.can_transition_to(JobStatus::Queued));
    }

    #[test]
    fn test_terminal_states_absorbing() {
        for next in [
            JobStatus::Queued,
            JobStatus::Running,
            JobStatus::Done,
            JobStatus::Error,
        ] {
            assert!(!JobStatus::Done.can_transition_to(next));
            assert!(!JobStatus::Error.can_transition_to(next));
        }
    }

    #[test]
    fn test_no_self_transitions() {
        for status in [
            JobStatus::Queued,
            JobStatus::Running,
            JobStatus::Done,
            JobStatus::Error,
        ] {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn test_label_roundtrip() {
        for status in [
            JobStatus::Queued,
            JobStatus::Running,
            JobStatus::Done,
            JobStatus::Error,
        ] {
            assert_eq!(JobStatus::from_label(status.label()), Some(status));
        }
        assert_eq!(JobStatus::from_label("invalid"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", JobStatus::Queued), "Queued");
        assert_eq!(format!("{}", JobStatus::Done), "Done");
    }
}
