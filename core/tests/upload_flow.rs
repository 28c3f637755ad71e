use dashboard_core::job::JobKind;
use dashboard_core::responses::{parse_delete, parse_upload, parse_video_list};
use dashboard_core::status::{JobOutcome, ProcessingStatus, StatusEvent};
use dashboard_core::table::build_rows;
use dashboard_core::tracker::{ChannelHandle, JobTracker, TrackerUpdate};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct CountingHandle(Rc<Cell<usize>>);

impl ChannelHandle for CountingHandle {
    fn close(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn upload_then_finished_event_shows_server_status() {
    let mut tracker = JobTracker::new(vec!["audio_chunked".to_string()]);
    let handle = CountingHandle::default();

    // upload clip.mp4
    let uploaded = parse_upload(201, r#"{"_id":"abc123","video_filename":"clip.mp4","job_id":"j1"}"#)
        .unwrap();
    let job_id = uploaded.job_id.clone().unwrap();
    tracker.track(&job_id, &uploaded.id, JobKind::Extraction, handle.clone());

    // optimistic row while the job runs
    let before = parse_video_list(
        200,
        r#"{"videos":[{"_id":"abc123","video_filename":"clip.mp4","processing_status":"video_uploaded"}]}"#,
    )
    .unwrap();
    let rows = build_rows(&before, &tracker.overlay());
    assert!(rows[0].status.is_live());
    assert_eq!(rows[0].status.label(), "Extracting audio");

    let update = tracker.apply(&job_id, &StatusEvent::parse(r#"{"status":"finished"}"#).unwrap());
    assert_eq!(
        update,
        TrackerUpdate::Finished {
            video_id: "abc123".to_string(),
            outcome: JobOutcome::Success
        }
    );
    assert_eq!(handle.0.get(), 1);

    // re-fetch replaces the optimistic state
    let after = parse_video_list(
        200,
        r#"{"videos":[{"_id":"abc123","video_filename":"clip.mp4","processing_status":"completed"}]}"#,
    )
    .unwrap();
    assert_eq!(tracker.refresh_completed(), 1);
    assert!(tracker.overlay().is_empty());

    let rows = build_rows(&after, &tracker.overlay());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].display_id, "bc123");
    assert!(!rows[0].status.is_live());
    assert_eq!(after[0].status, ProcessingStatus::Completed);
    assert_eq!(rows[0].status.label(), "Completed");
}

#[test]
fn failed_delete_leaves_list_untouched() {
    let list = parse_video_list(
        200,
        r#"{"videos":[{"_id":"abc123","video_filename":"clip.mp4"},{"_id":"def456","video_filename":"b.mp4"}]}"#,
    )
    .unwrap();

    let err = parse_delete(500, r#"{"detail":"Storage unavailable"}"#).unwrap_err();
    assert_eq!(err.to_string(), "Storage unavailable");
    assert_eq!(list.len(), 2);

    parse_delete(204, "").unwrap();
    let refreshed = parse_video_list(
        200,
        r#"{"videos":[{"_id":"def456","video_filename":"b.mp4"}]}"#,
    )
    .unwrap();
    let rows = build_rows(&refreshed, &Default::default());
    assert!(rows.iter().all(|row| row.id != "abc123"));
}

#[test]
fn empty_collection_is_not_an_error() {
    let list = parse_video_list(404, r#"{"detail":"No videos found."}"#).unwrap();
    assert!(build_rows(&list, &Default::default()).is_empty());
}
