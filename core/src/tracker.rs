use crate::error::ApiError;
use crate::job::{JobKind, JobState};
use crate::status::{EventKind, JobOutcome, StatusEvent};
use std::collections::HashMap;

/// Video id -> most recent live status label.
pub type LiveOverlay = HashMap<String, String>;

/// Something that keeps a status subscription open until closed.
pub trait ChannelHandle {
    fn close(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackerUpdate {
    Progress { video_id: String, label: String },
    Finished { video_id: String, outcome: JobOutcome },
    Ignored,
}

struct TrackedJob<H> {
    video_id: String,
    kind: JobKind,
    state: JobState,
    handle: Option<H>,
    seq: u64,
}

/// Owns every open status subscription, keyed by job id, together with the
/// state machine of the job it reports on.
pub struct JobTracker<H: ChannelHandle> {
    jobs: HashMap<String, TrackedJob<H>>,
    terminal_stages: Vec<String>,
    next_seq: u64,
}

impl<H: ChannelHandle> JobTracker<H> {
    pub fn new(terminal_stages: Vec<String>) -> Self {
        Self {
            jobs: HashMap::new(),
            terminal_stages,
            next_seq: 0,
        }
    }

    /// Starts tracking `job_id` with the kind's provisional label. A job id
    /// that is already tracked has its old subscription closed first.
    pub fn track(&mut self, job_id: &str, video_id: &str, kind: JobKind, mut handle: H) {
        if let Some(mut previous) = self.jobs.remove(job_id) {
            log::debug!("Replacing status subscription for job {job_id}");
            if let Some(mut old) = previous.handle.take() {
                old.close();
            }
        }

        let state = match JobState::default().submit(kind.provisional_label()) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Cannot track job {job_id}: {e}");
                handle.close();
                return;
            }
        };

        self.next_seq += 1;
        self.jobs.insert(
            job_id.to_string(),
            TrackedJob {
                video_id: video_id.to_string(),
                kind,
                state,
                handle: Some(handle),
                seq: self.next_seq,
            },
        );
        log::info!("Tracking {kind:?} job {job_id} for video {video_id}");
    }

    pub fn apply(&mut self, job_id: &str, event: &StatusEvent) -> TrackerUpdate {
        let kind = event.classify(&self.terminal_stages);
        let Some(job) = self.jobs.get_mut(job_id) else {
            log::debug!("Status event for untracked job {job_id}");
            return TrackerUpdate::Ignored;
        };

        match kind {
            EventKind::Progress(label) => match job.state.progress(label.clone()) {
                Ok(state) => {
                    job.state = state;
                    TrackerUpdate::Progress {
                        video_id: job.video_id.clone(),
                        label,
                    }
                }
                Err(e) => {
                    log::warn!("Dropping event for job {job_id}: {e}");
                    TrackerUpdate::Ignored
                }
            },
            EventKind::Terminal(outcome) => self.finish(job_id, outcome),
            EventKind::Empty => TrackerUpdate::Ignored,
        }
    }

    /// The channel broke before a terminal event; tracking is abandoned.
    pub fn channel_error(&mut self, job_id: &str, error: &ApiError) -> TrackerUpdate {
        log::warn!("Status channel for job {job_id} failed: {error}");
        self.finish(job_id, JobOutcome::Failure(error.to_string()))
    }

    fn finish(&mut self, job_id: &str, outcome: JobOutcome) -> TrackerUpdate {
        let Some(job) = self.jobs.get_mut(job_id) else {
            return TrackerUpdate::Ignored;
        };

        match job.state.finish(outcome.clone()) {
            Ok(state) => job.state = state,
            Err(e) => {
                log::debug!("Ignoring terminal event for job {job_id}: {e}");
                return TrackerUpdate::Ignored;
            }
        }

        if let Some(mut handle) = job.handle.take() {
            handle.close();
        }
        log::info!("{:?} job {job_id} finished: {outcome:?}", job.kind);

        TrackerUpdate::Finished {
            video_id: job.video_id.clone(),
            outcome,
        }
    }

    /// Called once the list re-fetch after a terminal event is done. Every
    /// terminal job returns to idle and is forgotten.
    pub fn refresh_completed(&mut self) -> usize {
        let before = self.jobs.len();
        self.jobs
            .retain(|_, job| job.state.settle().map(|s| s != JobState::Idle).unwrap_or(true));
        before - self.jobs.len()
    }

    /// Drops every job of a deleted video, closing open subscriptions.
    pub fn untrack_video(&mut self, video_id: &str) -> usize {
        let job_ids: Vec<String> = self
            .jobs
            .iter()
            .filter(|(_, job)| job.video_id == video_id)
            .map(|(job_id, _)| job_id.clone())
            .collect();

        for job_id in &job_ids {
            if let Some(mut handle) = self.jobs.remove(job_id).and_then(|mut job| job.handle.take()) {
                handle.close();
            }
        }
        job_ids.len()
    }

    /// Closes every open subscription. Used on unmount.
    pub fn close_all(&mut self) -> usize {
        let mut closed = 0;
        for (_, mut job) in self.jobs.drain() {
            if let Some(mut handle) = job.handle.take() {
                handle.close();
                closed += 1;
            }
        }
        closed
    }

    pub fn is_tracking(&self, job_id: &str) -> bool {
        self.jobs
            .get(job_id)
            .is_some_and(|job| job.state.live_label().is_some())
    }

    pub fn active_jobs(&self) -> usize {
        self.jobs
            .values()
            .filter(|job| job.state.live_label().is_some())
            .count()
    }

    /// Live label of the most recently started non-terminal job of a video.
    pub fn live_status(&self, video_id: &str) -> Option<&str> {
        self.jobs
            .values()
            .filter(|job| job.video_id == video_id)
            .filter_map(|job| job.state.live_label().map(|label| (job.seq, label)))
            .max_by_key(|(seq, _)| *seq)
            .map(|(_, label)| label)
    }

    pub fn overlay(&self) -> LiveOverlay {
        let mut newest: HashMap<&str, (u64, &str)> = HashMap::new();
        for job in self.jobs.values() {
            if let Some(label) = job.state.live_label() {
                let entry = newest.entry(job.video_id.as_str()).or_insert((job.seq, label));
                if job.seq > entry.0 {
                    *entry = (job.seq, label);
                }
            }
        }
        newest
            .into_iter()
            .map(|(video_id, (_, label))| (video_id.to_string(), label.to_string()))
            .collect()
    }
}

impl<H: ChannelHandle> Drop for JobTracker<H> {
    fn drop(&mut self) {
        self.close_all();
    }
}
