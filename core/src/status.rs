use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Last persisted pipeline stage of a video, as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum ProcessingStatus {
    #[default]
    Unknown,
    Uploading,
    Uploaded,
    VideoUploaded,
    AudioExtracted,
    TranscriptionCompleted,
    TranscriptionChunksEmotionCompleted,
    AudioChunksUploaded,
    AudioChunksEmotionCompleted,
    VideoFaceRecognition,
    VideoFaceRecognitionEmotion,
    Processing,
    Completed,
    Other(String),
}

impl ProcessingStatus {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "" => ProcessingStatus::Unknown,
            "uploading" => ProcessingStatus::Uploading,
            "uploaded" => ProcessingStatus::Uploaded,
            "video_uploaded" => ProcessingStatus::VideoUploaded,
            "audio_extracted" => ProcessingStatus::AudioExtracted,
            "transcription_completed" => ProcessingStatus::TranscriptionCompleted,
            "transcription_chunks_emotion_completed" => {
                ProcessingStatus::TranscriptionChunksEmotionCompleted
            }
            "audio_chunks_uploaded" => ProcessingStatus::AudioChunksUploaded,
            "audio_chunks_emotion_completed" => ProcessingStatus::AudioChunksEmotionCompleted,
            // the backend spells it this way
            "video_face_recognizion" => ProcessingStatus::VideoFaceRecognition,
            "video_face_recognizion_emotion" => ProcessingStatus::VideoFaceRecognitionEmotion,
            "processing" => ProcessingStatus::Processing,
            "completed" => ProcessingStatus::Completed,
            other => ProcessingStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProcessingStatus::Unknown => "",
            ProcessingStatus::Uploading => "uploading",
            ProcessingStatus::Uploaded => "uploaded",
            ProcessingStatus::VideoUploaded => "video_uploaded",
            ProcessingStatus::AudioExtracted => "audio_extracted",
            ProcessingStatus::TranscriptionCompleted => "transcription_completed",
            ProcessingStatus::TranscriptionChunksEmotionCompleted => {
                "transcription_chunks_emotion_completed"
            }
            ProcessingStatus::AudioChunksUploaded => "audio_chunks_uploaded",
            ProcessingStatus::AudioChunksEmotionCompleted => "audio_chunks_emotion_completed",
            ProcessingStatus::VideoFaceRecognition => "video_face_recognizion",
            ProcessingStatus::VideoFaceRecognitionEmotion => "video_face_recognizion_emotion",
            ProcessingStatus::Processing => "processing",
            ProcessingStatus::Completed => "completed",
            ProcessingStatus::Other(label) => label,
        }
    }

    /// Text shown in the status column.
    pub fn label(&self) -> String {
        match self {
            ProcessingStatus::Unknown => "Not processed".to_string(),
            ProcessingStatus::VideoFaceRecognition => "Video face recognition".to_string(),
            ProcessingStatus::VideoFaceRecognitionEmotion => {
                "Video face recognition emotion".to_string()
            }
            other => humanize(other.as_str()),
        }
    }

    /// Tailwind badge colours, same palette as the queue table.
    pub fn badge_class(&self) -> &'static str {
        match self {
            ProcessingStatus::Unknown | ProcessingStatus::Other(_) => "bg-gray-100 text-gray-800",
            ProcessingStatus::Uploading | ProcessingStatus::Uploaded => {
                "bg-yellow-100 text-yellow-800"
            }
            ProcessingStatus::Completed
            | ProcessingStatus::AudioChunksEmotionCompleted
            | ProcessingStatus::VideoFaceRecognitionEmotion => "bg-green-100 text-green-800",
            _ => "bg-blue-100 text-blue-800",
        }
    }
}

impl From<Option<String>> for ProcessingStatus {
    fn from(value: Option<String>) -> Self {
        value
            .as_deref()
            .map(ProcessingStatus::from_label)
            .unwrap_or_default()
    }
}

impl From<ProcessingStatus> for Option<String> {
    fn from(value: ProcessingStatus) -> Self {
        match value {
            ProcessingStatus::Unknown => None,
            other => Some(other.as_str().to_string()),
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// "extracting_audio" -> "Extracting audio"
pub fn humanize(label: &str) -> String {
    let spaced = label.trim().replace(['_', '-'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Success,
    Failure(String),
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, JobOutcome::Success)
    }
}

/// What a single push event means for the job it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Progress(String),
    Terminal(JobOutcome),
    Empty,
}

/// One JSON message from `/ws/status/{job_id}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatusEvent {
    pub job_id: Option<String>,
    pub status: Option<String>,
    pub step: Option<String>,
    pub meta: Option<Map<String, Value>>,
    pub error: Option<String>,
}

impl StatusEvent {
    pub fn parse(text: &str) -> Result<Self, ApiError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Most specific stage name carried by the event: an explicit step,
    /// then the step stored in the job meta, then the raw job status.
    pub fn stage(&self) -> Option<&str> {
        let meta_step = self
            .meta
            .as_ref()
            .and_then(|meta| meta.get("step"))
            .and_then(Value::as_str);

        self.step
            .as_deref()
            .or(meta_step)
            .or(self.status.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    pub fn classify(&self, terminal_stages: &[String]) -> EventKind {
        if let Some(error) = &self.error {
            return EventKind::Terminal(JobOutcome::Failure(error.clone()));
        }

        match self.status.as_deref() {
            Some("finished") => return EventKind::Terminal(JobOutcome::Success),
            Some(status @ ("failed" | "canceled" | "stopped")) => {
                return EventKind::Terminal(JobOutcome::Failure(format!("Job {status}")));
            }
            _ => {}
        }

        match self.stage() {
            Some(stage) if terminal_stages.iter().any(|t| t == stage) => {
                EventKind::Terminal(JobOutcome::Success)
            }
            Some(stage) => EventKind::Progress(humanize(stage)),
            None => EventKind::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn stages() -> Vec<String> {
        vec!["audio_chunked".to_string()]
    }

    #[rstest]
    #[case("completed", ProcessingStatus::Completed)]
    #[case("video_uploaded", ProcessingStatus::VideoUploaded)]
    #[case("video_face_recognizion", ProcessingStatus::VideoFaceRecognition)]
    #[case("", ProcessingStatus::Unknown)]
    #[case("reticulating", ProcessingStatus::Other("reticulating".to_string()))]
    fn parses_known_and_unknown_labels(#[case] raw: &str, #[case] expected: ProcessingStatus) {
        assert_eq!(ProcessingStatus::from_label(raw), expected);
        assert_eq!(expected.as_str(), raw);
    }

    #[test]
    fn null_status_deserializes_as_unknown() {
        let status: ProcessingStatus = serde_json::from_str("null").unwrap();
        assert_eq!(status, ProcessingStatus::Unknown);
        assert_eq!(status.label(), "Not processed");
    }

    #[test]
    fn labels_are_humanized() {
        assert_eq!(ProcessingStatus::AudioExtracted.label(), "Audio extracted");
        assert_eq!(humanize("extracting_audio"), "Extracting audio");
        assert_eq!(humanize(""), "");
    }

    #[rstest]
    #[case(r#"{"status":"finished"}"#, EventKind::Terminal(JobOutcome::Success))]
    #[case(
        r#"{"job_id":"j1","status":"failed","meta":{}}"#,
        EventKind::Terminal(JobOutcome::Failure("Job failed".to_string()))
    )]
    #[case(
        r#"{"error":"Job not found"}"#,
        EventKind::Terminal(JobOutcome::Failure("Job not found".to_string()))
    )]
    #[case(r#"{"step":"audio_chunked","chunks":4}"#, EventKind::Terminal(JobOutcome::Success))]
    #[case(
        r#"{"status":"started","meta":{"step":"extracting_audio"}}"#,
        EventKind::Progress("Extracting audio".to_string())
    )]
    #[case(r#"{"status":"queued"}"#, EventKind::Progress("Queued".to_string()))]
    #[case(r#"{"meta":{}}"#, EventKind::Empty)]
    fn classifies_events(#[case] raw: &str, #[case] expected: EventKind) {
        let event = StatusEvent::parse(raw).unwrap();
        assert_eq!(event.classify(&stages()), expected);
    }

    #[test]
    fn explicit_step_wins_over_meta_and_status() {
        let event = StatusEvent::parse(
            r#"{"status":"started","step":"analyzing_audio","meta":{"step":"extracting_audio"}}"#,
        )
        .unwrap();
        assert_eq!(event.stage(), Some("analyzing_audio"));
    }

    #[test]
    fn malformed_event_is_a_parse_error() {
        assert!(matches!(
            StatusEvent::parse("not json"),
            Err(ApiError::Parse(_))
        ));
    }
}
