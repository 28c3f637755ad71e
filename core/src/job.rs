use crate::error::JobError;
use crate::status::JobOutcome;

/// Backend task a status channel reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    Extraction,
    Transcription,
    Analysis,
}

impl JobKind {
    /// Shown until the first push event arrives.
    pub fn provisional_label(&self) -> &'static str {
        match self {
            JobKind::Extraction => "Extracting audio",
            JobKind::Transcription => "Transcribing",
            JobKind::Analysis => "Analyzing",
        }
    }

    /// Path segment under `/videos/{id}/` that starts the job, if the
    /// client can start it at all.
    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            JobKind::Extraction => None,
            JobKind::Transcription => Some("transcript"),
            JobKind::Analysis => Some("analyze"),
        }
    }

    pub fn action_label(&self) -> &'static str {
        match self {
            JobKind::Extraction => "Extract audio",
            JobKind::Transcription => "Transcribe",
            JobKind::Analysis => "Analyze",
        }
    }
}

/// Lifecycle of one tracked job:
/// `Idle -> Submitted -> Streaming -> Terminal -> Idle`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Submitted { provisional: String },
    Streaming { label: String },
    Terminal(JobOutcome),
}

impl JobState {
    pub fn submit(&self, provisional: impl Into<String>) -> Result<JobState, JobError> {
        match self {
            JobState::Idle => Ok(JobState::Submitted {
                provisional: provisional.into(),
            }),
            _ => Err(self.invalid("Submitted")),
        }
    }

    pub fn progress(&self, label: impl Into<String>) -> Result<JobState, JobError> {
        match self {
            JobState::Submitted { .. } | JobState::Streaming { .. } => Ok(JobState::Streaming {
                label: label.into(),
            }),
            _ => Err(self.invalid("Streaming")),
        }
    }

    pub fn finish(&self, outcome: JobOutcome) -> Result<JobState, JobError> {
        match self {
            JobState::Submitted { .. } | JobState::Streaming { .. } => {
                Ok(JobState::Terminal(outcome))
            }
            _ => Err(self.invalid("Terminal")),
        }
    }

    /// The follow-up list refresh finished.
    pub fn settle(&self) -> Result<JobState, JobError> {
        match self {
            JobState::Terminal(_) => Ok(JobState::Idle),
            _ => Err(self.invalid("Idle")),
        }
    }

    pub fn live_label(&self) -> Option<&str> {
        match self {
            JobState::Submitted { provisional } => Some(provisional),
            JobState::Streaming { label } => Some(label),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Terminal(_))
    }

    fn invalid(&self, to: &'static str) -> JobError {
        JobError::InvalidTransition {
            from: self.clone(),
            to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_lifecycle() {
        let state = JobState::Idle.submit("Transcribing").unwrap();
        assert_eq!(state.live_label(), Some("Transcribing"));

        let state = state.progress("Analyzing audio").unwrap();
        let state = state.progress("Transcription completed").unwrap();
        assert_eq!(state.live_label(), Some("Transcription completed"));

        let state = state.finish(JobOutcome::Success).unwrap();
        assert!(state.is_terminal());
        assert_eq!(state.live_label(), None);

        assert_eq!(state.settle().unwrap(), JobState::Idle);
    }

    #[test]
    fn submitted_job_can_fail_before_streaming() {
        let state = JobState::Idle.submit("Analyzing").unwrap();
        let state = state
            .finish(JobOutcome::Failure("Job not found".to_string()))
            .unwrap();
        assert_eq!(state, JobState::Terminal(JobOutcome::Failure("Job not found".to_string())));
    }

    #[test]
    fn rejects_out_of_order_transitions() {
        assert!(JobState::Idle.progress("x").is_err());
        assert!(JobState::Idle.finish(JobOutcome::Success).is_err());
        assert!(JobState::Idle.settle().is_err());

        let terminal = JobState::Terminal(JobOutcome::Success);
        assert!(terminal.progress("late event").is_err());
        assert!(terminal.submit("again").is_err());

        let err = JobState::Streaming { label: "x".into() }.submit("y").unwrap_err();
        assert!(err.to_string().contains("-> Submitted"));
    }

    #[test]
    fn only_transcript_and_analysis_are_client_started() {
        assert_eq!(JobKind::Transcription.endpoint(), Some("transcript"));
        assert_eq!(JobKind::Analysis.endpoint(), Some("analyze"));
        assert_eq!(JobKind::Extraction.endpoint(), None);
    }
}
