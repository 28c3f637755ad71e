use crate::models::VideoItem;
use crate::status::JobOutcome;
use crate::tracker::LiveOverlay;
use crate::utils::display_id;

#[derive(Debug, Clone, PartialEq)]
pub enum StatusCell {
    /// A tracked job is running; rendered with the animated indicator.
    Live(String),
    Persisted { label: String, badge_class: &'static str },
}

impl StatusCell {
    pub fn label(&self) -> &str {
        match self {
            StatusCell::Live(label) => label,
            StatusCell::Persisted { label, .. } => label,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, StatusCell::Live(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoRow {
    pub id: String,
    pub display_id: String,
    pub filename: String,
    pub created_at: String,
    pub status: StatusCell,
    pub can_view_transcript: bool,
    pub can_view_analysis: bool,
    pub can_start_jobs: bool,
    pub emotion_count: usize,
}

/// Merges the persisted list with the live overlay. An overlay entry wins
/// over the stored status until the tracker clears it.
pub fn build_rows(videos: &[VideoItem], overlay: &LiveOverlay) -> Vec<VideoRow> {
    videos
        .iter()
        .map(|video| {
            let live = overlay.get(&video.id);
            let status = match live {
                Some(label) => StatusCell::Live(label.clone()),
                None => StatusCell::Persisted {
                    label: video.status.label(),
                    badge_class: video.status.badge_class(),
                },
            };

            VideoRow {
                id: video.id.clone(),
                display_id: video.display_id.clone(),
                filename: video.filename.clone(),
                created_at: video.created_at.clone(),
                status,
                can_view_transcript: video.has_transcript(),
                can_view_analysis: video.has_analysis(),
                can_start_jobs: live.is_none(),
                emotion_count: video.emotions.len(),
            }
        })
        .collect()
}

/// Outcome line shown above the table after a tracked job ends.
#[derive(Debug, Clone, PartialEq)]
pub enum JobNotice {
    Finished(String),
    Stopped(String),
}

impl JobNotice {
    pub fn for_outcome(video_id: &str, outcome: &JobOutcome) -> Self {
        let short_id = display_id(video_id);
        match outcome {
            JobOutcome::Success => {
                JobNotice::Finished(format!("Processing of video {short_id} finished."))
            }
            JobOutcome::Failure(reason) => {
                JobNotice::Stopped(format!("Tracking of video {short_id} stopped: {reason}"))
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            JobNotice::Finished(msg) | JobNotice::Stopped(msg) => msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawVideoRecord;
    use crate::status::ProcessingStatus;

    fn video(id: &str, transcript: Option<&str>, status: &str) -> VideoItem {
        RawVideoRecord {
            id: id.to_string(),
            video_filename: format!("{id}.mp4"),
            transcript: transcript.map(str::to_string),
            processing_status: ProcessingStatus::from_label(status),
            ..Default::default()
        }
        .into()
    }

    #[test]
    fn overlay_wins_until_cleared() {
        let videos = vec![video("abc123", None, "video_uploaded")];
        let mut overlay = LiveOverlay::new();
        overlay.insert("abc123".to_string(), "Extracting audio".to_string());

        let rows = build_rows(&videos, &overlay);
        assert_eq!(rows[0].status, StatusCell::Live("Extracting audio".to_string()));
        assert!(!rows[0].can_start_jobs);

        overlay.clear();
        let rows = build_rows(&videos, &overlay);
        assert!(!rows[0].status.is_live());
        assert_eq!(rows[0].status.label(), "Video uploaded");
        assert!(rows[0].can_start_jobs);
    }

    #[test]
    fn view_transcript_enabled_exactly_when_transcript_present() {
        let videos = vec![
            video("a", Some("hello"), "completed"),
            video("b", Some(""), "completed"),
            video("c", None, "completed"),
        ];
        let rows = build_rows(&videos, &LiveOverlay::new());
        let enabled: Vec<bool> = rows.iter().map(|r| r.can_view_transcript).collect();
        assert_eq!(enabled, vec![true, false, false]);
        assert!(rows.iter().all(|r| !r.can_view_analysis));
    }

    #[test]
    fn rows_follow_list_order() {
        let videos = vec![video("first", None, ""), video("second", None, "")];
        let rows = build_rows(&videos, &LiveOverlay::new());
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
        assert_eq!(rows[0].status.label(), "Not processed");
    }

    #[test]
    fn failed_job_notice_is_a_warning_not_a_success() {
        let stopped = JobNotice::for_outcome(
            "abc123",
            &JobOutcome::Failure("Status channel error: connection reset".to_string()),
        );
        assert_eq!(
            stopped,
            JobNotice::Stopped(
                "Tracking of video bc123 stopped: Status channel error: connection reset"
                    .to_string()
            )
        );

        let finished = JobNotice::for_outcome("abc123", &JobOutcome::Success);
        assert!(matches!(finished, JobNotice::Finished(_)));
        assert_eq!(finished.message(), "Processing of video bc123 finished.");
    }
}
