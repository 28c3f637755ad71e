use crate::status::ProcessingStatus;
use crate::utils::{display_id, format_created_at};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EmotionSegment {
    #[serde(default)]
    pub emotion: Option<String>,
    #[serde(default)]
    pub emotion_score: Option<f64>,
    #[serde(default)]
    pub text: String,
    pub timestamp: (f64, f64),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PromptItem {
    pub role: String,
    pub content: String,
}

/// Video document as the backend serializes it. Field names drifted between
/// backend revisions, hence the aliases.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RawVideoRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub video_filename: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, alias = "audio_object_path")]
    pub audio_object: Option<String>,
    #[serde(default, alias = "video_object_path")]
    pub video_object: Option<String>,
    #[serde(default, alias = "transcription_result")]
    pub transcript: Option<String>,
    #[serde(default, alias = "emotion_chunks")]
    pub emotions: Option<Vec<EmotionSegment>>,
    #[serde(default, alias = "transcript_process_status")]
    pub processing_status: ProcessingStatus,
    #[serde(default)]
    pub emotion_prompt_result: Option<String>,
    #[serde(default)]
    pub emotion_prompt: Option<Vec<PromptItem>>,
}

/// Normalized row of the video store.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoItem {
    pub id: String,
    pub display_id: String,
    pub filename: String,
    pub created_at: String,
    pub audio_object: Option<String>,
    pub video_object: Option<String>,
    pub transcript: Option<String>,
    pub emotions: Vec<EmotionSegment>,
    pub status: ProcessingStatus,
    pub analysis: Option<String>,
    pub prompt: Vec<PromptItem>,
}

impl VideoItem {
    pub fn has_transcript(&self) -> bool {
        non_blank(&self.transcript)
    }

    pub fn has_analysis(&self) -> bool {
        non_blank(&self.analysis)
    }
}

fn non_blank(text: &Option<String>) -> bool {
    text.as_deref().is_some_and(|t| !t.trim().is_empty())
}

impl From<RawVideoRecord> for VideoItem {
    fn from(raw: RawVideoRecord) -> Self {
        Self {
            display_id: display_id(&raw.id),
            created_at: raw
                .created_at
                .as_deref()
                .map(format_created_at)
                .unwrap_or_default(),
            id: raw.id,
            filename: raw.video_filename,
            audio_object: raw.audio_object,
            video_object: raw.video_object,
            transcript: raw.transcript,
            emotions: raw.emotions.unwrap_or_default(),
            status: raw.processing_status,
            analysis: raw.emotion_prompt_result,
            prompt: raw.emotion_prompt.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VideosResponse {
    #[serde(default)]
    pub videos: Vec<RawVideoRecord>,
    #[serde(default)]
    pub total: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, alias = "extract_job_id")]
    pub job_id: Option<String>,
}

/// What the upload form hands to its parent after a 201.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedVideo {
    pub id: String,
    pub job_id: Option<String>,
}

impl From<UploadResponse> for UploadedVideo {
    fn from(response: UploadResponse) -> Self {
        Self {
            id: response.id,
            job_id: response.job_id.filter(|j| !j.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JobResponse {
    pub job_id: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_current_backend_document() {
        let raw: RawVideoRecord = serde_json::from_str(
            r#"{
                "_id": "6650f1c2e4b0a1d2c3f4e5d6",
                "video_filename": "clip.mp4",
                "video_object_path": "videos/6650f1c2e4b0a1d2c3f4e5d6/clip.mp4",
                "created_at": "2025-06-01T14:03:27.512000",
                "audio_object_path": null,
                "transcription_result": "hello there",
                "emotion_chunks": [
                    {"timestamp": [34.36, 37.8], "text": "And you can do that.", "emotion": "neutral", "emotion_score": 0.94}
                ],
                "transcript_process_status": "transcription_completed"
            }"#,
        )
        .unwrap();

        let item = VideoItem::from(raw);
        assert_eq!(item.display_id, "4e5d6");
        assert_eq!(item.filename, "clip.mp4");
        assert_eq!(item.created_at, "2025-06-01 14:03");
        assert_eq!(item.video_object.as_deref(), Some("videos/6650f1c2e4b0a1d2c3f4e5d6/clip.mp4"));
        assert_eq!(item.audio_object, None);
        assert_eq!(item.status, ProcessingStatus::TranscriptionCompleted);
        assert_eq!(item.emotions.len(), 1);
        assert_eq!(item.emotions[0].emotion.as_deref(), Some("neutral"));
        assert!(item.has_transcript());
        assert!(!item.has_analysis());
    }

    #[test]
    fn minimal_document_gets_defaults() {
        let raw: RawVideoRecord =
            serde_json::from_str(r#"{"_id": "abc123", "transcript_process_status": null}"#).unwrap();
        let item = VideoItem::from(raw);
        assert_eq!(item.status, ProcessingStatus::Unknown);
        assert!(item.emotions.is_empty());
        assert!(item.prompt.is_empty());
        assert_eq!(item.created_at, "");
    }

    #[test]
    fn blank_transcript_counts_as_absent() {
        let raw: RawVideoRecord =
            serde_json::from_str(r#"{"_id": "abc123", "transcript": "   "}"#).unwrap();
        assert!(!VideoItem::from(raw).has_transcript());
    }

    #[test]
    fn upload_response_accepts_either_job_key() {
        let a: UploadResponse = serde_json::from_str(r#"{"_id":"abc123","job_id":"j1"}"#).unwrap();
        let b: UploadResponse =
            serde_json::from_str(r#"{"_id":"abc123","extract_job_id":"abc123-extract"}"#).unwrap();
        let c: UploadResponse = serde_json::from_str(r#"{"_id":"abc123"}"#).unwrap();

        assert_eq!(UploadedVideo::from(a).job_id.as_deref(), Some("j1"));
        assert_eq!(UploadedVideo::from(b).job_id.as_deref(), Some("abc123-extract"));
        assert_eq!(UploadedVideo::from(c).job_id, None);
    }
}
